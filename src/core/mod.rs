//! # Core Application Logic
//!
//! The tutor's business logic. It knows nothing about HTTP or terminals.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • QuizSession          │
//!                    │  • ConceptSession       │
//!                    │  • EventLog             │
//!                    │  • QuestionBank, Course │
//!                    │                         │
//!                    │  No rendering. No HTTP. │
//!                    └───────────┬─────────────┘
//!                                │
//!            ┌───────────────────┴───────────────────┐
//!            ▼                                       ▼
//!     ┌────────────┐                          ┌────────────┐
//!     │    CLI     │                          │   Server   │
//!     │  Adapter   │                          │   (axum)   │
//!     └────────────┘                          └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`quiz`]: practice-quiz state machine
//! - [`concept`]: concept Q&A transcript
//! - [`analytics`]: the injected event log
//! - [`question_bank`], [`course`]: static course data
//! - [`config`]: layered configuration

pub mod analytics;
pub mod concept;
pub mod config;
pub mod course;
pub mod question_bank;
pub mod quiz;

pub use analytics::{AnalyticsEvent, EventLog};
pub use concept::{AskError, ChatRole, ChatTurn, ConceptSession};
pub use course::{CourseCatalog, CourseContext};
pub use question_bank::{AnswerCheck, Question, QuestionBank, QuestionSource};
pub use quiz::{QuizError, QuizPhase, QuizSession, ScheduledAdvance};
