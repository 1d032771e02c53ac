//! Fixed-point coordinate type.
//!
//! Latitude/longitude are stored as degrees times 1e6, matching the
//! on-wire representation the network facade exchanges with this crate.

use serde::{Deserialize, Serialize};

const COORD_PRECISION: f64 = 1_000_000.0;

/// A fixed-point geographic coordinate (degrees * 1e6).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat_e6: i32,
    pub lon_e6: i32,
}

impl Coordinate {
    pub fn new(lat_e6: i32, lon_e6: i32) -> Self {
        Self { lat_e6, lon_e6 }
    }

    /// Builds a coordinate from floating point degrees, rounding to the
    /// fixed-point grid.
    pub fn from_degrees(lat: f64, lon: f64) -> Self {
        Self {
            lat_e6: (lat * COORD_PRECISION).round() as i32,
            lon_e6: (lon * COORD_PRECISION).round() as i32,
        }
    }

    pub fn lat(&self) -> f64 {
        self.lat_e6 as f64 / COORD_PRECISION
    }

    pub fn lon(&self) -> f64 {
        self.lon_e6 as f64 / COORD_PRECISION
    }

    /// Valid per the input contract: latitude in [-90, 90], longitude in
    /// (-180, 180], and never the invalid sentinel.
    pub fn is_valid(&self) -> bool {
        if self.lat_e6 == i32::MIN && self.lon_e6 == i32::MIN {
            return false;
        }
        let lat = self.lat_e6 as i64;
        let lon = self.lon_e6 as i64;
        (-90_000_000..=90_000_000).contains(&lat) && (-180_000_000..=180_000_000).contains(&lon) && lon != -180_000_000
    }
}
