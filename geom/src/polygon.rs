use std::fmt;

use anyhow::Result;
use geo::{Area, BooleanOps, Centroid};
use serde::{Deserialize, Serialize};

use crate::{GPSBounds, Pt2D, Ring};

/// A polygon: one outer ring and any number of interior rings (holes).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Polygon {
    // Outer ring first
    rings: Vec<Ring>,
}

impl Polygon {
    pub fn with_holes(outer: Ring, mut inner: Vec<Ring>) -> Polygon {
        inner.insert(0, outer);
        Polygon { rings: inner }
    }

    pub fn from_rings(rings: Vec<Ring>) -> Polygon {
        assert!(!rings.is_empty());
        Polygon { rings }
    }

    pub fn outer_ring(&self) -> &Ring {
        &self.rings[0]
    }

    pub fn holes(&self) -> &[Ring] {
        &self.rings[1..]
    }

    /// Discards interior rings, keeping only the outer boundary.
    pub fn strip_holes(&self) -> Polygon {
        Polygon {
            rings: vec![self.rings[0].clone()],
        }
    }

    /// In square meters.
    pub fn area(&self) -> f64 {
        self.to_geo().unsigned_area()
    }

    pub fn center_of_mass(&self) -> Pt2D {
        match self.to_geo().centroid() {
            Some(pt) => Pt2D::new(pt.x(), pt.y()),
            // Degenerate zero-area polygon; any boundary point is as good
            None => self.rings[0].points()[0],
        }
    }

    /// Unions all of the polygons into one geo::MultiPolygon.
    pub fn union_all(mut list: Vec<Polygon>) -> geo::MultiPolygon {
        if list.is_empty() {
            return geo::MultiPolygon(Vec::new());
        }

        let mut result = geo::MultiPolygon(vec![list.pop().unwrap().into()]);
        for p in list {
            result = result.union(&geo::MultiPolygon(vec![p.into()]));
        }
        result
    }

    /// Splits a geo::MultiPolygon into this crate's polygons. Degenerate
    /// members (squashed to nothing by coordinate rounding) are errors.
    pub fn from_multi(multi: geo::MultiPolygon) -> Result<Vec<Polygon>> {
        multi.into_iter().map(Polygon::from_geo).collect()
    }

    pub fn from_geo(polygon: geo::Polygon) -> Result<Polygon> {
        let (exterior, interiors) = polygon.into_inner();
        let mut rings = vec![Ring::deduping_new(to_pts(&exterior))?];
        for interior in interiors {
            // Holes can collapse under coordinate rounding; drop them rather
            // than rejecting the whole polygon.
            if let Ok(ring) = Ring::deduping_new(to_pts(&interior)) {
                rings.push(ring);
            }
        }
        Ok(Polygon { rings })
    }

    /// The ring coordinates in GeoJSON nesting order, optionally mapped back
    /// to GPS.
    pub fn to_geojson_coords(&self, gps: Option<&GPSBounds>) -> Vec<Vec<Vec<f64>>> {
        self.rings
            .iter()
            .map(|ring| ring.to_geojson_coords(gps))
            .collect()
    }

    pub fn to_geojson(&self, gps: Option<&GPSBounds>) -> geojson::Geometry {
        geojson::Geometry::new(geojson::Value::Polygon(self.to_geojson_coords(gps)))
    }

    // A less verbose way of invoking the From/Into impl.
    fn to_geo(&self) -> geo::Polygon {
        self.clone().into()
    }
}

fn to_pts(line_string: &geo::LineString) -> Vec<Pt2D> {
    line_string.coords().map(|coord| Pt2D::from(*coord)).collect()
}

impl From<Polygon> for geo::Polygon {
    fn from(polygon: Polygon) -> Self {
        let mut rings = polygon.rings.into_iter().map(|ring| {
            geo::LineString::from(
                ring.into_points()
                    .into_iter()
                    .map(geo::Coord::from)
                    .collect::<Vec<_>>(),
            )
        });
        let exterior = rings.next().unwrap();
        geo::Polygon::new(exterior, rings.collect())
    }
}

impl fmt::Display for Polygon {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "Polygon({} points in the outer ring, {} holes)",
            self.rings[0].points().len(),
            self.rings.len() - 1
        )
    }
}
