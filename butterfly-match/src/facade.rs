//! The network facade: the abstract, read-only interface onto the
//! preprocessed road network that the matcher treats as an oracle.
//!
//! This crate never depends on how the facade represents the graph.
//! Implementations live outside this crate; only an in-memory test
//! double (`support::StubFacade` under `tests/`) ships here.

use crate::coordinate::Coordinate;

/// Opaque identity of an on-road candidate ("phantom node"), handed back
/// to the facade verbatim when asking for distances or a materialized
/// path. The core never inspects its contents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CandidateId(pub u64);

/// An on-road projection of a fix.
#[derive(Debug, Clone, Copy)]
pub struct Candidate {
    pub id: CandidateId,
    pub coordinate: Coordinate,
    /// Perpendicular distance in meters from the originating fix to this
    /// candidate's projection onto the road.
    pub distance_m: f64,
}

/// Materialized route produced by [`NetworkFacade::shortest_path`].
#[derive(Debug, Clone, Default)]
pub struct RawRoute {
    pub coordinates: Vec<Coordinate>,
    pub distance_m: f64,
}

/// Error surfaced by a facade implementation; opaque to the core beyond
/// `Display`/`Error`, wrapped into [`crate::Error::FacadeError`] at the
/// call site.
pub type FacadeFailure = Box<dyn std::error::Error + Send + Sync>;

/// Read-only oracle over the preprocessed road network.
///
/// Implementations must be safely shareable across concurrently running
/// matches (§5): no method takes `&mut self`.
pub trait NetworkFacade: Send + Sync {
    /// Up to `k` nearest on-road candidates within `max_radius_m` of
    /// `fix`, nearest first. May return fewer than `k`, including zero.
    fn find_candidates(
        &self,
        fix: Coordinate,
        max_radius_m: f64,
        k: usize,
    ) -> Result<Vec<Candidate>, FacadeFailure>;

    /// Shortest-path distance in meters from every source to every
    /// target, row-major (`sources.len()` rows by `targets.len()`
    /// columns). Unreachable pairs are `f64::INFINITY`.
    ///
    /// `uturn_allowed` has one entry per target: when true, the facade
    /// may route through a reversal at that target candidate.
    fn many_to_many_distance(
        &self,
        sources: &[Candidate],
        targets: &[Candidate],
        uturn_allowed: &[bool],
    ) -> Result<Vec<Vec<f64>>, FacadeFailure>;

    /// Materializes the path threading the given adjacent candidate
    /// pairs in order. `uturn_allowed` has one entry per pair.
    fn shortest_path(
        &self,
        pairs: &[(Candidate, Candidate)],
        uturn_allowed: &[bool],
    ) -> Result<RawRoute, FacadeFailure>;
}
