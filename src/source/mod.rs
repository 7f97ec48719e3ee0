//! Student data source
//!
//! Explicit, injectable collaborator handle. A missing configuration is a
//! first-class `Unavailable` variant rather than a nullable global; the
//! orchestrator turns any fetch failure into a synthetic cohort.

pub mod store;
pub mod synthetic;

use thiserror::Error;

use crate::logic::RawStudent;
use store::StoreClient;

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("store unavailable: {0}")]
    Unavailable(String),
    #[error("store request failed: {0}")]
    Network(String),
    #[error("store request timed out")]
    Timeout,
    #[error("store returned status {0}")]
    Status(u16),
    #[error("store payload malformed: {0}")]
    Decode(String),
}

/// The data-source handle held in application state.
pub enum DataSource {
    /// Connected document store.
    Store(StoreClient),
    /// No store configured or reachable at startup; every fetch fails and
    /// the pipeline falls back to synthetic data.
    Unavailable { reason: String },
    /// Canned records for endpoint tests.
    #[cfg(test)]
    Fixed(Vec<RawStudent>),
}

impl DataSource {
    pub async fn fetch_students(&self) -> Result<Vec<RawStudent>, SourceError> {
        match self {
            Self::Store(client) => client.fetch_students().await,
            Self::Unavailable { reason } => Err(SourceError::Unavailable(reason.clone())),
            #[cfg(test)]
            Self::Fixed(records) => Ok(records.clone()),
        }
    }

    /// Short mode string for startup and per-request logs.
    pub fn describe(&self) -> &'static str {
        match self {
            Self::Store(_) => "store",
            Self::Unavailable { .. } => "unavailable (synthetic fallback)",
            #[cfg(test)]
            Self::Fixed(_) => "fixed",
        }
    }
}
