//! Per-fix candidate generation against the network facade.

use crate::coordinate::Coordinate;
use crate::error::{Error, Result};
use crate::facade::{Candidate, NetworkFacade};
use crate::geo::approx_distance_m;

/// Computes the search radius for fix `i`: half the distance to the
/// adjacent fix, using the following fix for the first one.
pub fn search_radius_m(fixes: &[Coordinate], i: usize) -> f64 {
    let d = if i == 0 {
        if fixes.len() > 1 {
            approx_distance_m(fixes[0], fixes[1])
        } else {
            0.0
        }
    } else {
        approx_distance_m(fixes[i - 1], fixes[i])
    };
    d / 2.0
}

/// Produces the candidate list for every fix, failing the whole request
/// if any fix yields no candidates.
pub fn generate_candidates(
    facade: &dyn NetworkFacade,
    fixes: &[Coordinate],
    max_candidates: usize,
) -> Result<Vec<Vec<Candidate>>> {
    let mut lists = Vec::with_capacity(fixes.len());
    for (i, &fix) in fixes.iter().enumerate() {
        let radius = search_radius_m(fixes, i);
        let candidates = facade
            .find_candidates(fix, radius, max_candidates)
            .map_err(Error::FacadeError)?;
        if candidates.is_empty() {
            return Err(Error::NoCandidates { fix_index: i });
        }
        lists.push(candidates);
    }
    Ok(lists)
}
