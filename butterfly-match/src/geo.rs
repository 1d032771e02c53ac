//! Great-circle and planar geometry helpers used by the matcher.
//!
//! `approx_distance_m` and `perpendicular_distance` use an equirectangular
//! approximation scaled by the mean latitude of the two points involved;
//! this is accurate to well under 1% at the scale of candidate search
//! radii and trace segments and avoids trigonometric calls on the hot
//! Viterbi path.

use crate::coordinate::Coordinate;

const EARTH_RADIUS_M: f64 = 6_371_000.0;

pub fn deg_to_rad(deg: f64) -> f64 {
    deg * std::f64::consts::PI / 180.0
}

pub fn rad_to_deg(rad: f64) -> f64 {
    rad * 180.0 / std::f64::consts::PI
}

/// Equirectangular-approximate distance in meters between two coordinates.
pub fn approx_distance_m(a: Coordinate, b: Coordinate) -> f64 {
    let lat1 = deg_to_rad(a.lat());
    let lat2 = deg_to_rad(b.lat());
    let mean_lat = (lat1 + lat2) / 2.0;
    let dx = deg_to_rad(b.lon() - a.lon()) * mean_lat.cos();
    let dy = lat2 - lat1;
    EARTH_RADIUS_M * (dx * dx + dy * dy).sqrt()
}

/// Forward azimuth from `a` to `b` in degrees, in [0, 360).
pub fn bearing(a: Coordinate, b: Coordinate) -> f64 {
    let lat1 = deg_to_rad(a.lat());
    let lat2 = deg_to_rad(b.lat());
    let dlon = deg_to_rad(b.lon() - a.lon());

    let y = dlon.sin() * lat2.cos();
    let x = lat1.cos() * lat2.sin() - lat1.sin() * lat2.cos() * dlon.cos();
    let theta = y.atan2(x);
    (rad_to_deg(theta) + 360.0) % 360.0
}

/// Interior angle at `b` formed by the path a -> b -> c, in [0, 360).
/// 180 degrees means a straight line through b; values near 0 or 360
/// indicate a reversal.
pub fn turn_angle(a: Coordinate, b: Coordinate, c: Coordinate) -> f64 {
    let incoming = bearing(a, b);
    let outgoing = bearing(b, c);
    let mut turn = outgoing - incoming + 180.0;
    turn %= 360.0;
    if turn < 0.0 {
        turn += 360.0;
    }
    turn
}

/// Result of projecting `q` onto the segment `s` -> `t`.
pub struct Projection {
    /// Great-circle distance in meters from `q` to the projected foot.
    pub distance_m: f64,
    /// Clamped projection ratio along the segment, in [0, 1].
    pub ratio: f64,
    /// The projected point itself.
    pub foot: Coordinate,
}

/// Projects `q` onto the segment `s` -> `t`, clamping the ratio to [0, 1].
/// Degenerate segments (`s == t`) project to `s` with ratio 0.
pub fn perpendicular_distance(s: Coordinate, t: Coordinate, q: Coordinate) -> Projection {
    if s.lat_e6 == t.lat_e6 && s.lon_e6 == t.lon_e6 {
        return Projection {
            distance_m: approx_distance_m(q, s),
            ratio: 0.0,
            foot: s,
        };
    }

    let mean_lat = deg_to_rad((s.lat() + t.lat()) / 2.0);
    let scale_x = mean_lat.cos();

    let sx = s.lon() * scale_x;
    let sy = s.lat();
    let tx = t.lon() * scale_x;
    let ty = t.lat();
    let qx = q.lon() * scale_x;
    let qy = q.lat();

    let dx = tx - sx;
    let dy = ty - sy;
    let len_sq = dx * dx + dy * dy;

    let ratio = if len_sq <= f64::EPSILON {
        0.0
    } else {
        (((qx - sx) * dx + (qy - sy) * dy) / len_sq).clamp(0.0, 1.0)
    };

    let foot_lon = s.lon() + ratio * (t.lon() - s.lon());
    let foot_lat = s.lat() + ratio * (t.lat() - s.lat());
    let foot = Coordinate::from_degrees(foot_lat, foot_lon);

    Projection {
        distance_m: approx_distance_m(q, foot),
        ratio,
        foot,
    }
}
