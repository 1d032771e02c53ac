//! Error type for the matching pipeline.
//!
//! All variants surface to callers as a single `bad_request`; the kind is
//! preserved for diagnostics and logging, not exposed as distinct status
//! codes.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("no candidates found for fix {fix_index}")]
    NoCandidates { fix_index: usize },

    #[error("no feasible path through the candidate lattice")]
    Infeasible,

    #[error("network facade error: {0}")]
    FacadeError(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl Error {
    /// Short machine-stable name for the error kind, used in diagnostics
    /// and log fields.
    pub fn kind(&self) -> &'static str {
        match self {
            Error::InvalidInput(_) => "invalid_input",
            Error::NoCandidates { .. } => "no_candidates",
            Error::Infeasible => "infeasible",
            Error::FacadeError(_) => "facade_error",
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
