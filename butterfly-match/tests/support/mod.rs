//! In-memory `NetworkFacade` test double.
//!
//! Candidates per fix and pairwise route distances are supplied
//! up front by the test; `find_candidates` simply replays them in
//! call order, since the pipeline calls it exactly once per fix.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use butterfly_match::{Candidate, CandidateId, Coordinate, FacadeFailure, NetworkFacade, RawRoute};

pub struct StubFacade {
    candidates_by_fix: Vec<Vec<Candidate>>,
    call_index: AtomicUsize,
    route_distances: HashMap<(u64, u64), f64>,
}

impl StubFacade {
    pub fn new(candidates_by_fix: Vec<Vec<Candidate>>) -> Self {
        Self {
            candidates_by_fix,
            call_index: AtomicUsize::new(0),
            route_distances: HashMap::new(),
        }
    }

    pub fn with_route_distance(mut self, from: CandidateId, to: CandidateId, meters: f64) -> Self {
        self.route_distances.insert((from.0, to.0), meters);
        self
    }
}

pub fn candidate(id: u64, lat: f64, lon: f64, distance_m: f64) -> Candidate {
    Candidate {
        id: CandidateId(id),
        coordinate: Coordinate::from_degrees(lat, lon),
        distance_m,
    }
}

impl NetworkFacade for StubFacade {
    fn find_candidates(
        &self,
        _fix: Coordinate,
        _max_radius_m: f64,
        _k: usize,
    ) -> Result<Vec<Candidate>, FacadeFailure> {
        let i = self.call_index.fetch_add(1, Ordering::SeqCst);
        Ok(self.candidates_by_fix.get(i).cloned().unwrap_or_default())
    }

    fn many_to_many_distance(
        &self,
        sources: &[Candidate],
        targets: &[Candidate],
        _uturn_allowed: &[bool],
    ) -> Result<Vec<Vec<f64>>, FacadeFailure> {
        Ok(sources
            .iter()
            .map(|s| {
                targets
                    .iter()
                    .map(|t| {
                        *self
                            .route_distances
                            .get(&(s.id.0, t.id.0))
                            .unwrap_or(&f64::INFINITY)
                    })
                    .collect()
            })
            .collect())
    }

    fn shortest_path(
        &self,
        pairs: &[(Candidate, Candidate)],
        _uturn_allowed: &[bool],
    ) -> Result<RawRoute, FacadeFailure> {
        let mut coordinates = Vec::new();
        let mut distance_m = 0.0;
        for (i, (a, b)) in pairs.iter().enumerate() {
            if i == 0 {
                coordinates.push(a.coordinate);
            }
            coordinates.push(b.coordinate);
            distance_m += self
                .route_distances
                .get(&(a.id.0, b.id.0))
                .copied()
                .unwrap_or(0.0);
        }
        Ok(RawRoute {
            coordinates,
            distance_m,
        })
    }
}
