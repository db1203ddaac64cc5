//! # Analytics Sink
//!
//! An append-only log of named events. Sessions and the HTTP server get an
//! [`EventLog`] handed to them; nothing reaches for a global.
//!
//! ```text
//! QuizSession ─┐
//!              ├── record(name, payload) ──► EventLog ──► read_all() / clear()
//! ConceptSession ┘
//! ```
//!
//! Recording never fails from the caller's point of view. A payload that
//! can't be turned into JSON is logged and dropped.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use chrono::{SecondsFormat, Utc};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A single recorded event. `data` always carries a `timestamp` string.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct AnalyticsEvent {
    pub name: String,
    pub data: Map<String, Value>,
}

impl AnalyticsEvent {
    pub fn timestamp(&self) -> Option<&str> {
        self.data.get("timestamp").and_then(Value::as_str)
    }
}

/// Shared, cloneable handle to an in-memory event log.
///
/// A log built with [`bounded`](Self::bounded) keeps only the newest
/// `max_events`; [`new`](Self::new) grows without limit.
#[derive(Clone, Debug, Default)]
pub struct EventLog {
    events: Arc<Mutex<Vec<AnalyticsEvent>>>,
    max_events: Option<usize>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// A log that drops its oldest events once it holds more than
    /// `max_events`.
    pub fn bounded(max_events: usize) -> Self {
        Self {
            events: Arc::default(),
            max_events: Some(max_events),
        }
    }

    /// Records an event, stamping it with the current time unless the
    /// payload already carries a non-empty `timestamp`.
    pub fn record<T: Serialize>(&self, name: &str, payload: T) {
        let value = match serde_json::to_value(payload) {
            Ok(v) => v,
            Err(e) => {
                warn!("Error tracking event {}: {}", name, e);
                return;
            }
        };

        let mut data = match value {
            Value::Object(map) => map,
            Value::Null => Map::new(),
            other => {
                let mut map = Map::new();
                map.insert("value".to_string(), other);
                map
            }
        };

        if needs_timestamp(data.get("timestamp")) {
            data.insert("timestamp".to_string(), Value::String(now_rfc3339()));
        }

        info!("[Analytics] Event: {} {}", name, Value::Object(data.clone()));

        let mut events = self.lock();
        events.push(AnalyticsEvent {
            name: name.to_string(),
            data,
        });
        if let Some(max) = self.max_events
            && events.len() > max
        {
            let excess = events.len() - max;
            events.drain(..excess);
            debug!("Event log full, dropped {} oldest event(s)", excess);
        }
    }

    /// Returns a copy of every event recorded so far, oldest first.
    pub fn read_all(&self) -> Vec<AnalyticsEvent> {
        self.lock().clone()
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    // A panic while holding the lock can't leave a half-pushed Vec behind,
    // so a poisoned lock is still safe to use.
    fn lock(&self) -> MutexGuard<'_, Vec<AnalyticsEvent>> {
        self.events.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn needs_timestamp(existing: Option<&Value>) -> bool {
    match existing {
        None | Some(Value::Null) => true,
        Some(Value::String(s)) => s.is_empty(),
        Some(_) => false,
    }
}

fn now_rfc3339() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}
