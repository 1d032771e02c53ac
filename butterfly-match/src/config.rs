//! Tunable configuration for the matcher.

use serde::{Deserialize, Serialize};

fn default_sigma_z() -> f64 {
    4.07
}

fn default_beta() -> f64 {
    5.0
}

fn default_max_candidates() -> usize {
    5
}

fn default_uturn_threshold_deg() -> f64 {
    80.0
}

/// Tunable parameters for the HMM matcher. Deserializable from the
/// toolkit's usual TOML/JSON config sources; any field left unset in a
/// config file falls back to the default below.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchConfig {
    /// GPS noise standard deviation, in meters, used by the emission model.
    pub sigma_z: f64,
    /// Transition cost scale, in meters.
    pub beta: f64,
    /// Maximum candidates considered per fix.
    pub max_candidates: usize,
    /// Deflection from straight, in degrees, above which a fix is flagged
    /// as a plausible U-turn.
    pub uturn_threshold_deg: f64,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            sigma_z: default_sigma_z(),
            beta: default_beta(),
            max_candidates: default_max_candidates(),
            uturn_threshold_deg: default_uturn_threshold_deg(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_matches_documented_tunables() {
        let cfg = MatchConfig::default();
        assert_eq!(cfg.sigma_z, 4.07);
        assert_eq!(cfg.beta, 5.0);
        assert_eq!(cfg.max_candidates, 5);
        assert_eq!(cfg.uturn_threshold_deg, 80.0);
    }

    #[test]
    fn deserializes_partial_overrides() {
        let cfg: MatchConfig = serde_json::from_str(r#"{"beta": 10.0}"#).unwrap();
        assert_eq!(cfg.beta, 10.0);
        assert_eq!(cfg.sigma_z, 4.07);
    }
}
