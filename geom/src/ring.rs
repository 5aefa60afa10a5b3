use std::collections::HashSet;
use std::fmt;

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};

use crate::{GPSBounds, Polygon, Pt2D};

/// Like a PolyLine, but closed: the first and last point are equal.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Ring {
    // First equals last
    pts: Vec<Pt2D>,
}

impl Ring {
    /// A fully validated ring: closed, at least 3 distinct points, no point
    /// visited twice.
    pub fn new(pts: Vec<Pt2D>) -> Result<Ring> {
        basic_checks(&pts)?;

        let mut seen_pts = HashSet::new();
        for pt in pts.iter().skip(1) {
            seen_pts.insert(pt.to_hashable());
        }
        if seen_pts.len() != pts.len() - 1 {
            bail!("Ring has repeat points");
        }

        Ok(Ring { pts })
    }

    pub fn must_new(pts: Vec<Pt2D>) -> Ring {
        Ring::new(pts).unwrap()
    }

    /// Squashes repeated adjacent points together and skips the
    /// repeat-visit check. Buffered outlines of sharply bent lines can
    /// legitimately self-touch.
    pub fn deduping_new(mut pts: Vec<Pt2D>) -> Result<Ring> {
        pts.dedup();
        basic_checks(&pts)?;
        Ok(Ring { pts })
    }

    pub fn points(&self) -> &Vec<Pt2D> {
        &self.pts
    }

    pub fn into_points(self) -> Vec<Pt2D> {
        self.pts
    }

    pub fn into_polygon(self) -> Polygon {
        Polygon::with_holes(self, Vec::new())
    }

    pub(crate) fn to_geojson_coords(&self, gps: Option<&GPSBounds>) -> Vec<Vec<f64>> {
        match gps {
            Some(gps) => gps
                .convert_back(&self.pts)
                .into_iter()
                .map(|pt| vec![pt.longitude, pt.latitude])
                .collect(),
            None => self.pts.iter().map(|pt| vec![pt.x(), pt.y()]).collect(),
        }
    }

    /// A GeoJSON polygon with this ring as its only boundary, optionally
    /// mapped back to GPS coordinates.
    pub fn to_geojson(&self, gps: Option<&GPSBounds>) -> geojson::Geometry {
        geojson::Geometry::new(geojson::Value::Polygon(vec![self.to_geojson_coords(gps)]))
    }
}

fn basic_checks(pts: &[Pt2D]) -> Result<()> {
    if pts.len() < 4 {
        bail!("Can't make a ring with only {} points", pts.len());
    }
    if pts[0] != *pts.last().unwrap() {
        bail!("Can't make a ring with mismatching first/last points");
    }
    if pts.windows(2).any(|pair| pair[0] == pair[1]) {
        bail!("Ring has repeat adjacent points");
    }
    Ok(())
}

impl fmt::Display for Ring {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Ring({} points)", self.pts.len())
    }
}
