use std::f64;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{Angle, Distance, Pt2D};

const EARTH_RADIUS_M: f64 = 6_371_000.0;
const METERS_PER_DEGREE: f64 = 2.0 * f64::consts::PI * EARTH_RADIUS_M / 360.0;

/// A geographic coordinate. Longitude is x, latitude is y.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct LonLat {
    pub longitude: f64,
    pub latitude: f64,
}

impl LonLat {
    pub fn new(lon: f64, lat: f64) -> LonLat {
        LonLat {
            longitude: lon,
            latitude: lat,
        }
    }

    /// The Haversine distance along the earth's surface.
    pub fn gps_dist(self, other: LonLat) -> Distance {
        let lon1 = self.longitude.to_radians();
        let lon2 = other.longitude.to_radians();
        let lat1 = self.latitude.to_radians();
        let lat2 = other.latitude.to_radians();

        let delta_lat = lat2 - lat1;
        let delta_lon = lon2 - lon1;

        let a = (delta_lat / 2.0).sin().powi(2)
            + (delta_lon / 2.0).sin().powi(2) * lat1.cos() * lat2.cos();
        let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
        Distance::meters(EARTH_RADIUS_M * c)
    }

    /// The initial great-circle bearing to another point, clockwise from
    /// true north.
    pub fn bearing_to(self, other: LonLat) -> Angle {
        let lat1 = self.latitude.to_radians();
        let lat2 = other.latitude.to_radians();
        let delta_lon = (other.longitude - self.longitude).to_radians();

        let y = delta_lon.sin() * lat2.cos();
        let x = lat1.cos() * lat2.sin() - lat1.sin() * lat2.cos() * delta_lon.cos();
        Angle::new_rads(y.atan2(x))
    }

    /// The destination point after travelling some distance along a bearing.
    pub fn project_away(self, dist: Distance, bearing: Angle) -> LonLat {
        let d = dist.inner_meters() / EARTH_RADIUS_M;
        let theta = bearing.normalized_radians();
        let lat1 = self.latitude.to_radians();
        let lon1 = self.longitude.to_radians();

        let lat2 = (lat1.sin() * d.cos() + lat1.cos() * d.sin() * theta.cos()).asin();
        let lon2 = lon1
            + (theta.sin() * d.sin() * lat1.cos()).atan2(d.cos() - lat1.sin() * lat2.sin());
        LonLat::new(lon2.to_degrees(), lat2.to_degrees())
    }

    /// Shifts the point by east/north offsets in meters. Fine for the small
    /// shapes this crate works with; use `project_away` for anything long.
    pub fn offset(self, east: f64, north: f64) -> LonLat {
        let lat = self.latitude + north / METERS_PER_DEGREE;
        let lon = self.longitude + east / (METERS_PER_DEGREE * self.latitude.to_radians().cos());
        LonLat::new(lon, lat)
    }
}

impl fmt::Display for LonLat {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "LonLat({}, {})", self.longitude, self.latitude)
    }
}

/// A bounding box of GPS coordinates, which projects lon/lat into world
/// space (meters east/north of the box's southwest corner) and back.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GPSBounds {
    pub(crate) min_lon: f64,
    pub(crate) min_lat: f64,
    pub(crate) max_lon: f64,
    pub(crate) max_lat: f64,
}

impl GPSBounds {
    pub fn new() -> GPSBounds {
        GPSBounds {
            min_lon: f64::MAX,
            min_lat: f64::MAX,
            max_lon: f64::MIN,
            max_lat: f64::MIN,
        }
    }

    pub fn from(pts: &[LonLat]) -> GPSBounds {
        let mut b = GPSBounds::new();
        for pt in pts {
            b.update(*pt);
        }
        b
    }

    pub fn update(&mut self, pt: LonLat) {
        self.min_lon = self.min_lon.min(pt.longitude);
        self.max_lon = self.max_lon.max(pt.longitude);
        self.min_lat = self.min_lat.min(pt.latitude);
        self.max_lat = self.max_lat.max(pt.latitude);
    }

    pub fn contains(&self, pt: LonLat) -> bool {
        pt.longitude >= self.min_lon
            && pt.longitude <= self.max_lon
            && pt.latitude >= self.min_lat
            && pt.latitude <= self.max_lat
    }

    // Equirectangular about the box's center latitude. Good to centimeters
    // at the few-kilometer scale this crate operates on.
    fn meters_per_degree(&self) -> (f64, f64) {
        let center_lat = (self.min_lat + self.max_lat) / 2.0;
        (
            METERS_PER_DEGREE * center_lat.to_radians().cos(),
            METERS_PER_DEGREE,
        )
    }

    /// Projects into world space. Results may fall outside the box; that's
    /// fine.
    pub fn convert(&self, pts: &[LonLat]) -> Vec<Pt2D> {
        let (m_per_lon, m_per_lat) = self.meters_per_degree();
        pts.iter()
            .map(|pt| {
                Pt2D::new(
                    (pt.longitude - self.min_lon) * m_per_lon,
                    (pt.latitude - self.min_lat) * m_per_lat,
                )
            })
            .collect()
    }

    /// The inverse of `convert`, also accepting points outside the box.
    pub fn convert_back(&self, pts: &[Pt2D]) -> Vec<LonLat> {
        let (m_per_lon, m_per_lat) = self.meters_per_degree();
        pts.iter()
            .map(|pt| {
                LonLat::new(
                    self.min_lon + pt.x() / m_per_lon,
                    self.min_lat + pt.y() / m_per_lat,
                )
            })
            .collect()
    }
}

impl Default for GPSBounds {
    fn default() -> GPSBounds {
        GPSBounds::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn haversine() {
        // One degree of longitude along the equator
        let a = LonLat::new(0.0, 0.0);
        let b = LonLat::new(1.0, 0.0);
        let dist = a.gps_dist(b).inner_meters();
        assert!((dist - 111_195.0).abs() < 1.0, "got {}", dist);
    }

    #[test]
    fn bearings() {
        let origin = LonLat::new(-122.3, 47.6);
        let east = origin.offset(100.0, 0.0);
        let north = origin.offset(0.0, 100.0);
        assert!((origin.bearing_to(east).normalized_degrees() - 90.0).abs() < 0.1);
        assert!(origin.bearing_to(north).normalized_degrees() < 0.1);
    }

    #[test]
    fn project_away_roundtrip() {
        let origin = LonLat::new(-122.3, 47.6);
        let there = origin.project_away(Distance::meters(500.0), Angle::new_degs(37.0));
        let dist = origin.gps_dist(there).inner_meters();
        assert!((dist - 500.0).abs() < 0.01, "got {}", dist);
    }

    #[test]
    fn convert_roundtrip() {
        let pts = vec![
            LonLat::new(-122.3, 47.6),
            LonLat::new(-122.29, 47.605),
            LonLat::new(-122.31, 47.61),
        ];
        let bounds = GPSBounds::from(&pts);
        let back = bounds.convert_back(&bounds.convert(&pts));
        for (orig, roundtrip) in pts.iter().zip(back.iter()) {
            assert!(orig.gps_dist(*roundtrip).inner_meters() < 0.01);
        }
    }

    #[test]
    fn convert_out_of_bounds() {
        let pts = vec![LonLat::new(-122.3, 47.6), LonLat::new(-122.29, 47.61)];
        let bounds = GPSBounds::from(&pts);
        // A projected point south-west of the box maps to negative world
        // coordinates and back again.
        let outside = bounds.convert_back(&[Pt2D::new(-50.0, -50.0)]);
        assert!(!bounds.contains(outside[0]));
    }
}
