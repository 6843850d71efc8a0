//! Collaborators around the projection engine
//!
//! Persistence, advice, report rendering and delivery live outside this crate.
//! They are reached through the traits below; none of them can change a
//! projection result.

mod advice;
mod memory;
mod pipeline;

pub use advice::{advice_or_fallback, fallback_advice, format_clp, ADVICE_COUNT};
pub use memory::InMemoryStore;
pub use pipeline::{send_report, Delivery};

use thiserror::Error;

use crate::summary::{PensionRecord, ProjectionBundle};

/// Errors reported by collaborators
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ServiceError {
    #[error("Service unavailable: {0}")]
    Unavailable(String),

    #[error("Session '{session_id}' not found")]
    NotFound { session_id: String },

    #[error("Request rejected: {0}")]
    Rejected(String),
}

/// Persists projection records keyed by session id
pub trait ResultStore: Send + Sync {
    /// Store a record, replacing any earlier record for the same session
    fn save(&self, record: PensionRecord) -> Result<(), ServiceError>;

    fn load(&self, session_id: &str) -> Result<Option<PensionRecord>, ServiceError>;
}

/// Produces personalised advice lines for a projection
pub trait Advisor: Send + Sync {
    fn advise(&self, bundle: &ProjectionBundle) -> Result<Vec<String>, ServiceError>;
}

/// Renders a record and its advice into a document
pub trait ReportGenerator: Send + Sync {
    fn render(&self, record: &PensionRecord, advice: &[String]) -> Result<Vec<u8>, ServiceError>;
}

/// Sends a rendered document to its recipient
pub trait DeliveryService: Send + Sync {
    fn deliver(&self, delivery: &Delivery) -> Result<(), ServiceError>;
}
