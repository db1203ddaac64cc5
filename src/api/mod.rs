//! Client side of the tutor's REST API, plus the JSON bodies both sides share.

pub mod client;
pub mod types;

pub use client::TutorClient;
