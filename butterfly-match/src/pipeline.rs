//! Orchestrates candidate generation, U-turn detection, HMM decoding and
//! route stitching into a single entry point.

use serde::{Deserialize, Serialize};

use crate::candidates::generate_candidates;
use crate::config::MatchConfig;
use crate::coordinate::Coordinate;
use crate::error::{Error, Result};
use crate::facade::{NetworkFacade, RawRoute};
use crate::hmm::decode;
use crate::route::stitch;
use crate::trace::detect_uturns;

/// Output format requested for the external renderer; matching itself is
/// unaffected by this choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Json,
    Gpx,
}

impl Default for OutputFormat {
    fn default() -> Self {
        OutputFormat::Json
    }
}

/// Request options forwarded to the external renderer; they do not
/// influence matching.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchOptions {
    pub output_format: OutputFormat,
    pub zoom_level: Option<u32>,
    pub print_instructions: bool,
    pub geometry: bool,
    pub compression: bool,
}

/// Per-fix diagnostic: how many candidates were available and the
/// emission cost of the one that was ultimately chosen.
#[derive(Debug, Clone, Serialize)]
pub struct FixDiagnostic {
    pub candidate_count: usize,
    pub chosen_emission: f64,
}

/// Per-transition diagnostic between two adjacent matched fixes.
#[derive(Debug, Clone, Serialize)]
pub struct TransitionDiagnostic {
    pub route_m: f64,
    pub great_circle_m: f64,
}

/// Diagnostics attached to every successful match.
#[derive(Debug, Clone, Serialize)]
pub struct MatchDiagnostics {
    pub fixes: Vec<FixDiagnostic>,
    pub transitions: Vec<TransitionDiagnostic>,
    pub total_score: f64,
}

/// Result of a successful `Pipeline::match_trace` call.
#[derive(Debug, Clone)]
pub struct MatchResponse {
    pub matched: Vec<Coordinate>,
    pub route: RawRoute,
    pub diagnostics: MatchDiagnostics,
    pub options: MatchOptions,
}

/// Entry point tying candidate generation, U-turn detection, the HMM
/// decoder, and route stitching together.
pub struct Pipeline<'a> {
    facade: &'a dyn NetworkFacade,
    config: MatchConfig,
}

impl<'a> Pipeline<'a> {
    pub fn new(facade: &'a dyn NetworkFacade, config: MatchConfig) -> Self {
        Self { facade, config }
    }

    /// Matches a trace of fixes against the road network, returning the
    /// chosen path and diagnostics, or a typed error.
    pub fn match_trace(&self, fixes: &[Coordinate], options: MatchOptions) -> Result<MatchResponse> {
        let span = tracing::info_span!("match_trace", trace_len = fixes.len());
        let _enter = span.enter();

        if fixes.len() < 2 {
            let err = Error::InvalidInput(format!(
                "trace must contain at least 2 fixes, got {}",
                fixes.len()
            ));
            tracing::warn!(error = %err, "rejecting trace");
            return Err(err);
        }
        if let Some((i, _)) = fixes.iter().enumerate().find(|(_, c)| !c.is_valid()) {
            let err = Error::InvalidInput(format!("fix {i} is not a valid coordinate"));
            tracing::warn!(error = %err, "rejecting trace");
            return Err(err);
        }

        let result = self.run(fixes, &options);
        match &result {
            Ok(resp) => {
                tracing::info!(
                    total_score = resp.diagnostics.total_score,
                    candidates = resp.diagnostics.fixes.iter().map(|f| f.candidate_count).sum::<usize>(),
                    "match succeeded"
                );
            }
            Err(Error::NoCandidates { fix_index }) => {
                tracing::debug!(fix_index, "no candidates at fix");
            }
            Err(Error::Infeasible) => {
                tracing::debug!("no feasible path through lattice");
            }
            Err(err) => {
                tracing::warn!(error = %err, "match failed");
            }
        }
        result
    }

    fn run(&self, fixes: &[Coordinate], options: &MatchOptions) -> Result<MatchResponse> {
        let uturn_flags = detect_uturns(fixes, self.config.uturn_threshold_deg);
        let candidate_lists = generate_candidates(self.facade, fixes, self.config.max_candidates)?;
        let candidate_counts: Vec<usize> = candidate_lists.iter().map(|c| c.len()).collect();

        let outcome = decode(self.facade, fixes, &candidate_lists, &uturn_flags, &self.config)?;
        let route = stitch(self.facade, &outcome.chosen)?;

        let fixes_diag = candidate_counts
            .into_iter()
            .zip(outcome.emissions.iter())
            .map(|(count, &emission)| FixDiagnostic {
                candidate_count: count,
                chosen_emission: emission,
            })
            .collect();

        let transitions_diag = outcome
            .transitions
            .iter()
            .map(|t| TransitionDiagnostic {
                route_m: t.route_m,
                great_circle_m: t.great_circle_m,
            })
            .collect();

        Ok(MatchResponse {
            matched: outcome.chosen.iter().map(|c| c.coordinate).collect(),
            route,
            diagnostics: MatchDiagnostics {
                fixes: fixes_diag,
                transitions: transitions_diag,
                total_score: outcome.total_score,
            },
            options: options.clone(),
        })
    }
}
