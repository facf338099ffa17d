use thiserror::Error;

use crate::models::page::PageCategory;

/// Failures surfaced by fetchers, the registry and the page state machine
#[derive(Error, Debug)]
pub enum DashboardError {
    #[error("{endpoint} responded with status {status}")]
    FetchFailure { endpoint: String, status: u16 },

    #[error("request to {endpoint} could not complete: {source}")]
    NetworkFailure {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("malformed response from {endpoint}: {reason}")]
    MalformedResponse { endpoint: String, reason: String },

    #[error("not found: {0}")]
    MissingResource(String),

    #[error("persisted wallet list is unreadable: {0}")]
    MalformedState(String),

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("wallet store error: {0}")]
    Persistence(String),

    #[error("cannot {action} a page that is {from}")]
    InvalidTransition {
        from: &'static str,
        action: &'static str,
    },
}

impl DashboardError {
    /// Static inline message shown in place of a page that failed to load.
    ///
    /// Fetch and network failures read the same here; `is_retryable` keeps
    /// the distinction for callers.
    pub fn user_message(&self, category: PageCategory) -> String {
        match self {
            DashboardError::MissingResource(_) => {
                format!("{} not found.", category.subject_singular())
            }
            _ => format!(
                "Failed to load {}. Please try again later.",
                category.subject()
            ),
        }
    }

    /// True when the request never completed (offline, DNS, timeout)
    pub fn is_retryable(&self) -> bool {
        matches!(self, DashboardError::NetworkFailure { .. })
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, DashboardError::MissingResource(_))
    }
}

pub type DashboardResult<T> = std::result::Result<T, DashboardError>;
