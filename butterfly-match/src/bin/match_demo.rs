//! Demonstration CLI for the map matcher.
//!
//! Builds a handful of synthetic roads, reads a trace of `lat,lon`
//! pairs and runs the pipeline against them, printing the matched
//! coordinates and the score breakdown. Not the routing engine's HTTP
//! surface — see `butterfly-serve` for that.

use std::collections::HashMap;

use clap::Parser;

use butterfly_match::{
    init_tracing, Candidate, CandidateId, Coordinate, FacadeFailure, MatchConfig, MatchOptions,
    NetworkFacade, Pipeline, RawRoute,
};

#[derive(Parser)]
#[command(name = "match-demo", about = "Map match a trace against a synthetic road network")]
struct Cli {
    /// Trace points as "lat,lon" pairs, e.g. 48.85,2.35 48.86,2.36
    #[arg(required = true, num_args = 2..)]
    points: Vec<String>,

    /// Log format: "text" or "json"
    #[arg(long, default_value = "text")]
    log_format: String,
}

/// A toy facade: every trace fix snaps exactly onto itself, and the
/// road distance between consecutive fixes equals their great-circle
/// distance. Useful for exercising the pipeline without a real index.
struct SyntheticFacade {
    distances: HashMap<(u64, u64), f64>,
}

impl NetworkFacade for SyntheticFacade {
    fn find_candidates(
        &self,
        fix: Coordinate,
        _max_radius_m: f64,
        _k: usize,
    ) -> Result<Vec<Candidate>, FacadeFailure> {
        let id = CandidateId((fix.lat_e6 as u64) << 32 | (fix.lon_e6 as u32 as u64));
        Ok(vec![Candidate {
            id,
            coordinate: fix,
            distance_m: 0.0,
        }])
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
                        self.distances
                            .get(&(s.id.0, t.id.0))
                            .copied()
                            .unwrap_or(f64::INFINITY)
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
            distance_m += self.distances.get(&(a.id.0, b.id.0)).copied().unwrap_or(0.0);
        }
        Ok(RawRoute { coordinates, distance_m })
    }
}

fn parse_point(s: &str) -> anyhow::Result<Coordinate> {
    let (lat, lon) = s
        .split_once(',')
        .ok_or_else(|| anyhow::anyhow!("expected \"lat,lon\", got {s}"))?;
    Ok(Coordinate::from_degrees(lat.trim().parse()?, lon.trim().parse()?))
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli.log_format);

    let fixes: Vec<Coordinate> = cli
        .points
        .iter()
        .map(|s| parse_point(s))
        .collect::<anyhow::Result<_>>()?;

    let mut distances = HashMap::new();
    for w in fixes.windows(2) {
        let ida = CandidateId((w[0].lat_e6 as u64) << 32 | (w[0].lon_e6 as u32 as u64));
        let idb = CandidateId((w[1].lat_e6 as u64) << 32 | (w[1].lon_e6 as u32 as u64));
        let d = butterfly_match::geo::approx_distance_m(w[0], w[1]);
        distances.insert((ida.0, idb.0), d);
    }
    let facade = SyntheticFacade { distances };

    let pipeline = Pipeline::new(&facade, MatchConfig::default());
    let response = pipeline.match_trace(&fixes, MatchOptions::default())?;

    println!("matched {} fixes, total score {:.4}", response.matched.len(), response.diagnostics.total_score);
    for (i, c) in response.matched.iter().enumerate() {
        println!(
            "  fix {i}: {:.6},{:.6} (emission {:.4})",
            c.lat(),
            c.lon(),
            response.diagnostics.fixes[i].chosen_emission
        );
    }

    Ok(())
}
