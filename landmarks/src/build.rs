use anyhow::{bail, Result};
use geojson::{Geometry, Value};

use geom::{Distance, GPSBounds, LonLat, PolyLine};

/// How to turn a merged line into a landmark polygon. Resolved once per
/// operation and never persisted.
#[derive(Clone, Debug, PartialEq)]
pub struct LandmarkOptions {
    pub width: Distance,
    /// Trim the line's ends before buffering, so the polygon's ends align
    /// with the path's endpoints instead of overshooting them.
    pub strict_boundary: bool,
    /// Some downstream consumers (school-zone and venue tile builders)
    /// reject holed polygons.
    pub remove_holes: bool,
}

// Trimmed beyond the buffer radius in strict mode, so the rounded-off ends
// land inside the original termini.
const STRICT_TRIM_MARGIN: Distance = Distance::const_meters(1.0);

/// Buffers a line into a closed landmark polygon, as GeoJSON in GPS
/// coordinates.
pub fn build_landmark(line: &[LonLat], opts: &LandmarkOptions) -> Result<Geometry> {
    let gps = GPSBounds::from(line);
    let mut pl = PolyLine::deduping_new(gps.convert(line))?;

    if opts.strict_boundary {
        let trim = opts.width / 2.0 + STRICT_TRIM_MARGIN;
        if pl.length() <= trim * 2.0 {
            bail!(
                "Line of length {} is too short to trim {} from both ends",
                pl.length(),
                trim
            );
        }
        pl = pl.maybe_exact_slice(trim, pl.length() - trim)?;
    }

    let polygon = pl.make_polygons(opts.width);
    let mut geometry = polygon.to_geojson(Some(&gps));
    if opts.remove_holes {
        geometry = remove_holes_from_geometry(geometry);
    }
    Ok(geometry)
}

/// Strips interior rings from a Polygon or each member of a MultiPolygon,
/// keeping only outer boundaries. Panics on any other geometry kind; hole
/// removal only ever runs on buffered output.
pub fn remove_holes_from_geometry(geometry: Geometry) -> Geometry {
    match geometry.value {
        Value::Polygon(mut rings) => {
            rings.truncate(1);
            Geometry::new(Value::Polygon(rings))
        }
        Value::MultiPolygon(polygons) => Geometry::new(Value::MultiPolygon(
            polygons
                .into_iter()
                .map(|mut rings| {
                    rings.truncate(1);
                    rings
                })
                .collect(),
        )),
        value => panic!("Can't remove holes from a {}", geometry_kind(&value)),
    }
}

pub(crate) fn geometry_kind(value: &Value) -> &'static str {
    match value {
        Value::Point(_) => "Point",
        Value::MultiPoint(_) => "MultiPoint",
        Value::LineString(_) => "LineString",
        Value::MultiLineString(_) => "MultiLineString",
        Value::Polygon(_) => "Polygon",
        Value::MultiPolygon(_) => "MultiPolygon",
        Value::GeometryCollection(_) => "GeometryCollection",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn east_west_line(meters: f64) -> Vec<LonLat> {
        // Along the equator, so longitude degrees convert simply
        let start = LonLat::new(0.0, 0.0);
        vec![start, start.offset(meters, 0.0)]
    }

    fn polygon_rings(geometry: &Geometry) -> &Vec<Vec<Vec<f64>>> {
        match &geometry.value {
            Value::Polygon(rings) => rings,
            _ => panic!("expected a polygon"),
        }
    }

    // Measures the north-south extent of the result, in meters
    fn lat_extent(geometry: &Geometry) -> f64 {
        let ring = &polygon_rings(geometry)[0];
        let lats: Vec<f64> = ring.iter().map(|pt| pt[1]).collect();
        let max = lats.iter().cloned().fold(f64::MIN, f64::max);
        let min = lats.iter().cloned().fold(f64::MAX, f64::min);
        LonLat::new(0.0, min).gps_dist(LonLat::new(0.0, max)).inner_meters()
    }

    #[test]
    fn buffered_width_matches() {
        let geometry = build_landmark(
            &east_west_line(100.0),
            &LandmarkOptions {
                width: Distance::meters(3.0),
                strict_boundary: false,
                remove_holes: false,
            },
        )
        .unwrap();
        let extent = lat_extent(&geometry);
        assert!((extent - 3.0).abs() < 0.1, "got {}", extent);
    }

    #[test]
    fn strict_boundary_shortens_the_line() {
        let opts = |strict| LandmarkOptions {
            width: Distance::meters(10.0),
            strict_boundary: strict,
            remove_holes: false,
        };
        let line = east_west_line(100.0);

        let lon_extent = |geometry: &Geometry| {
            let ring = &polygon_rings(geometry)[0];
            let lons: Vec<f64> = ring.iter().map(|pt| pt[0]).collect();
            let max = lons.iter().cloned().fold(f64::MIN, f64::max);
            let min = lons.iter().cloned().fold(f64::MAX, f64::min);
            LonLat::new(min, 0.0).gps_dist(LonLat::new(max, 0.0)).inner_meters()
        };

        let loose = build_landmark(&line, &opts(false)).unwrap();
        let strict = build_landmark(&line, &opts(true)).unwrap();
        // width/2 + 1m trimmed from each end
        let difference = lon_extent(&loose) - lon_extent(&strict);
        assert!((difference - 12.0).abs() < 0.1, "got {}", difference);
    }

    #[test]
    fn strict_boundary_rejects_short_lines() {
        // 10m long, but 2 * (5 + 1) needs 12m
        let result = build_landmark(
            &east_west_line(10.0),
            &LandmarkOptions {
                width: Distance::meters(10.0),
                strict_boundary: true,
                remove_holes: false,
            },
        );
        assert!(result.is_err());
    }

    #[test]
    fn hole_removal() {
        let outer = vec![
            vec![0.0, 0.0],
            vec![10.0, 0.0],
            vec![10.0, 10.0],
            vec![0.0, 10.0],
            vec![0.0, 0.0],
        ];
        let hole = vec![
            vec![4.0, 4.0],
            vec![6.0, 4.0],
            vec![6.0, 6.0],
            vec![4.0, 6.0],
            vec![4.0, 4.0],
        ];
        let holed = Geometry::new(Value::MultiPolygon(vec![
            vec![outer.clone(), hole.clone()],
            vec![outer.clone(), hole],
        ]));

        let stripped = remove_holes_from_geometry(holed);
        match &stripped.value {
            Value::MultiPolygon(polygons) => {
                assert_eq!(polygons.len(), 2);
                for rings in polygons {
                    assert_eq!(rings.len(), 1);
                    assert_eq!(rings[0], outer);
                }
            }
            _ => panic!("expected a multipolygon"),
        }

        // Idempotent
        assert_eq!(stripped, remove_holes_from_geometry(stripped.clone()));
    }

    #[test]
    #[should_panic(expected = "Can't remove holes")]
    fn hole_removal_rejects_lines() {
        remove_holes_from_geometry(Geometry::new(Value::LineString(vec![
            vec![0.0, 0.0],
            vec![1.0, 1.0],
        ])));
    }
}
