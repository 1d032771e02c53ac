//! HMM-based GPS trace map matching.
//!
//! Snaps a noisy ordered sequence of GPS fixes onto the edges of a
//! pre-indexed road network, producing the most plausible sequence of
//! on-road positions together with the shortest driving path that
//! threads them. This crate owns the decoder itself; the road network
//! and its spatial index are supplied by a [`NetworkFacade`]
//! implementation from elsewhere in the toolkit.
//!
//! # Pipeline
//!
//! 1. [`candidates`] — per-fix candidate generation against the facade.
//! 2. [`trace`] — U-turn detection from successive bearings.
//! 3. [`hmm`] — the Viterbi decoder (emission + transition scoring).
//! 4. [`route`] — stitches the chosen candidates into one materialized
//!    route.
//!
//! [`pipeline::Pipeline`] orchestrates all four stages.

pub mod candidates;
pub mod config;
pub mod coordinate;
pub mod error;
pub mod facade;
pub mod geo;
pub mod hmm;
pub mod pipeline;
pub mod route;
pub mod trace;

pub use config::MatchConfig;
pub use coordinate::Coordinate;
pub use error::{Error, Result};
pub use facade::{Candidate, CandidateId, FacadeFailure, NetworkFacade, RawRoute};
pub use pipeline::{MatchOptions, MatchResponse, OutputFormat, Pipeline};

/// Initialize structured logging with tracing.
///
/// - `log_format`: "text" for human-readable, "json" for structured JSON
///   lines.
/// - Respects `RUST_LOG` (default: `info`).
pub fn init_tracing(log_format: &str) {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    match log_format {
        "json" => {
            fmt().json().with_env_filter(filter).with_target(true).init();
        }
        _ => {
            fmt().with_env_filter(filter).with_target(false).init();
        }
    }
}
