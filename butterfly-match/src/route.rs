//! Stitches the chosen candidate sequence into a single materialized
//! route via the facade's shortest-path oracle.

use crate::error::{Error, Result};
use crate::facade::{Candidate, NetworkFacade, RawRoute};

/// Builds adjacent (source, target) pairs from the matched candidates
/// and asks the facade to materialize the path through all of them.
/// U-turns are uniformly permitted here: the decoder has already
/// committed to these endpoints, so the stitcher must honor them as
/// given rather than second-guess the turn heuristic.
pub fn stitch(facade: &dyn NetworkFacade, matched: &[Candidate]) -> Result<RawRoute> {
    if matched.len() < 2 {
        return Err(Error::InvalidInput(
            "at least two matched candidates are required to stitch a route".into(),
        ));
    }

    let pairs: Vec<(Candidate, Candidate)> = matched.windows(2).map(|w| (w[0], w[1])).collect();
    let uturn_allowed = vec![true; pairs.len()];

    facade
        .shortest_path(&pairs, &uturn_allowed)
        .map_err(Error::FacadeError)
}
