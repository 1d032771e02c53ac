//! The Viterbi decoder: emission and transition scoring over the
//! candidate lattice.

use crate::config::MatchConfig;
use crate::coordinate::Coordinate;
use crate::error::{Error, Result};
use crate::facade::{Candidate, NetworkFacade};
use crate::geo::approx_distance_m;

/// Emission cost E(d): the negative log-likelihood of observing a fix at
/// perpendicular distance `d` (meters) from a candidate, under a
/// Gaussian noise model with standard deviation `sigma`. Lower is
/// better; the decoder minimizes the summed cost.
pub fn emission_cost(d: f64, sigma: f64) -> f64 {
    0.5 * (d / sigma).powi(2) + sigma.ln() + 0.5 * (2.0 * std::f64::consts::PI).ln()
}

/// Transition cost T(u, v): the disagreement between the great-circle
/// distance and the network shortest-path distance between two
/// successive candidates, scaled by `beta`. Infinite when the network
/// distance is unreachable.
pub fn transition_cost(great_circle_m: f64, route_m: f64, beta: f64) -> f64 {
    if route_m.is_infinite() {
        return f64::INFINITY;
    }
    (great_circle_m - route_m).abs() / beta
}

/// Per-step diagnostics recorded for the winning transition into each
/// fix (from fix 1 onward).
#[derive(Debug, Clone)]
pub struct TransitionDiagnostic {
    pub route_m: f64,
    pub great_circle_m: f64,
}

/// Output of a successful decode.
pub struct MatchOutcome {
    /// Chosen candidate for each fix, in fix order.
    pub chosen: Vec<Candidate>,
    /// Index into each fix's candidate list of the chosen candidate.
    pub chosen_indices: Vec<usize>,
    pub total_score: f64,
    pub emissions: Vec<f64>,
    pub transitions: Vec<TransitionDiagnostic>,
}

#[derive(Clone, Copy)]
struct LatticeNode {
    score: f64,
    backptr: Option<usize>,
}

/// Runs the Viterbi decoder over the full candidate lattice.
///
/// `candidates[i]` must be non-empty for every `i` (enforced by
/// [`crate::candidates::generate_candidates`] before this is called).
/// `uturn_flags[i]` permits reversing transitions that land on fix `i`.
pub fn decode(
    facade: &dyn NetworkFacade,
    fixes: &[Coordinate],
    candidates: &[Vec<Candidate>],
    uturn_flags: &[bool],
    config: &MatchConfig,
) -> Result<MatchOutcome> {
    let n = candidates.len();
    debug_assert_eq!(n, fixes.len());
    debug_assert_eq!(n, uturn_flags.len());

    let mut emissions = vec![0.0_f64; n];
    let mut columns: Vec<Vec<LatticeNode>> = Vec::with_capacity(n);
    let mut transition_by_step: Vec<Vec<Option<TransitionDiagnostic>>> = Vec::with_capacity(n - 1);

    let first_column: Vec<LatticeNode> = candidates[0]
        .iter()
        .map(|c| LatticeNode {
            score: emission_cost(c.distance_m, config.sigma_z),
            backptr: None,
        })
        .collect();
    columns.push(first_column);

    for i in 0..n - 1 {
        let sources = &candidates[i];
        let targets = &candidates[i + 1];
        let great_circle_m = approx_distance_m(fixes[i], fixes[i + 1]);

        let uturn_allowed = vec![uturn_flags[i + 1]; targets.len()];
        let matrix = facade
            .many_to_many_distance(sources, targets, &uturn_allowed)
            .map_err(Error::FacadeError)?;

        let prev = &columns[i];
        let mut next = Vec::with_capacity(targets.len());
        let mut step_diag = Vec::with_capacity(targets.len());

        for (v, target) in targets.iter().enumerate() {
            let mut best_score = f64::INFINITY;
            let mut best_u = None;
            let mut best_route_m = f64::INFINITY;

            for (u, prev_node) in prev.iter().enumerate() {
                let route_m = matrix[u][v];
                let trans = transition_cost(great_circle_m, route_m, config.beta);
                if trans.is_infinite() || prev_node.score.is_infinite() {
                    continue;
                }
                let candidate_score = prev_node.score + trans;
                if candidate_score < best_score {
                    best_score = candidate_score;
                    best_u = Some(u);
                    best_route_m = route_m;
                }
            }

            let emission = emission_cost(target.distance_m, config.sigma_z);
            let total = if best_u.is_some() {
                best_score + emission
            } else {
                f64::INFINITY
            };
            next.push(LatticeNode {
                score: total,
                backptr: best_u,
            });
            step_diag.push(best_u.map(|_| TransitionDiagnostic {
                route_m: best_route_m,
                great_circle_m,
            }));
        }

        columns.push(next);
        transition_by_step.push(step_diag);
    }

    let last = columns.last().expect("at least one fix");
    let (best_idx, best_node) = last
        .iter()
        .enumerate()
        .min_by(|(_, a), (_, b)| a.score.partial_cmp(&b.score).unwrap())
        .expect("non-empty final column");

    if best_node.score.is_infinite() {
        return Err(Error::Infeasible);
    }

    let mut chosen_indices = vec![0usize; n];
    let mut transitions: Vec<Option<TransitionDiagnostic>> = vec![None; n.saturating_sub(1)];

    let mut idx = best_idx;
    chosen_indices[n - 1] = idx;
    for i in (0..n - 1).rev() {
        let node = columns[i + 1][idx];
        let pred = node.backptr.expect("reached via finite transition");
        transitions[i] = transition_by_step[i][idx].clone();
        chosen_indices[i] = pred;
        idx = pred;
        emissions[i + 1] = emission_cost(candidates[i + 1][chosen_indices[i + 1]].distance_m, config.sigma_z);
    }
    emissions[0] = emission_cost(candidates[0][chosen_indices[0]].distance_m, config.sigma_z);

    let chosen: Vec<Candidate> = chosen_indices
        .iter()
        .enumerate()
        .map(|(i, &ci)| candidates[i][ci])
        .collect();

    let transitions = transitions.into_iter().flatten().collect();

    Ok(MatchOutcome {
        chosen,
        chosen_indices,
        total_score: best_node.score,
        emissions,
        transitions,
    })
}
