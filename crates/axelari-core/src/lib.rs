//! axelari-core: Assessment engine, scoring, and profile aggregation.
//!
//! This crate defines the data model, the question bank, the section state
//! machine and the aggregation logic that the rest of axelari builds on.

pub mod answers;
pub mod catalog;
pub mod engine;
pub mod error;
pub mod history;
pub mod metadata;
pub mod model;
pub mod notify;
pub mod parser;
pub mod profile;
pub mod scoring;
pub mod session;
pub mod store;
pub mod timer;
pub mod traits;
pub mod trend;

pub use engine::{AssessmentEngine, EngineConfig};
pub use error::AssessmentError;
pub use session::{AssessmentSession, CompletionOutcome, CompletionTrigger};
