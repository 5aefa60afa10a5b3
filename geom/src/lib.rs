//! Geometry for building map-editor shapes. World space is a flat plane
//! measured in meters; the GPS layer projects lon/lat coordinates into that
//! plane and back. Polygon boolean ops and centroids are delegated to the
//! `geo` crate.

mod angle;
mod distance;
mod gps;
mod line;
mod polygon;
mod polyline;
mod pt;
mod ring;

pub use crate::angle::Angle;
pub use crate::distance::Distance;
pub use crate::gps::{GPSBounds, LonLat};
pub use crate::line::Line;
pub use crate::polygon::Polygon;
pub use crate::polyline::PolyLine;
pub use crate::pt::{HashablePt2D, Pt2D};
pub use crate::ring::Ring;

/// Reduce the precision of an f64. This helps ensure serialization is
/// stable and makes equality checks on points behave predictably.
pub fn trim_f64(x: f64) -> f64 {
    (x * 10_000.0).round() / 10_000.0
}
