use anyhow::{bail, Result};
use geo::Centroid;
use geojson::{Geometry, Value};

use geom::{Distance, GPSBounds, LonLat, PolyLine, Polygon, Ring};

use crate::build::geometry_kind;

/// A fixed small polygon, authored as (east, north) meter offsets around an
/// anchor point. Templates are pre-closed: the first and last offset
/// coincide.
pub type ShapeTemplate = &'static [(f64, f64)];

/// A camera body with its lens pointing north.
pub const CAMERA_UP: ShapeTemplate = &[
    (-4.0, -3.0),
    (4.0, -3.0),
    (4.0, 1.0),
    (2.0, 1.0),
    (3.0, 4.0),
    (-3.0, 4.0),
    (-2.0, 1.0),
    (-4.0, 1.0),
    (-4.0, -3.0),
];

/// `CAMERA_UP` rotated to point south.
pub const CAMERA_DOWN: ShapeTemplate = &[
    (4.0, 3.0),
    (-4.0, 3.0),
    (-4.0, -1.0),
    (-2.0, -1.0),
    (-3.0, -4.0),
    (3.0, -4.0),
    (2.0, -1.0),
    (4.0, -1.0),
    (4.0, 3.0),
];

/// `CAMERA_UP` rotated to point west.
pub const CAMERA_LEFT: ShapeTemplate = &[
    (3.0, -4.0),
    (3.0, 4.0),
    (-1.0, 4.0),
    (-1.0, 2.0),
    (-4.0, 3.0),
    (-4.0, -3.0),
    (-1.0, -2.0),
    (-1.0, -4.0),
    (3.0, -4.0),
];

/// `CAMERA_UP` rotated to point east.
pub const CAMERA_RIGHT: ShapeTemplate = &[
    (-3.0, 4.0),
    (-3.0, -4.0),
    (1.0, -4.0),
    (1.0, -2.0),
    (4.0, -3.0),
    (4.0, 3.0),
    (1.0, 2.0),
    (1.0, 4.0),
    (-3.0, 4.0),
];

/// A straight-ahead arrow pointing north.
pub const ARROW_STRAIGHT: ShapeTemplate = &[
    (-2.0, -10.0),
    (2.0, -10.0),
    (2.0, 2.0),
    (6.0, 2.0),
    (0.0, 10.0),
    (-6.0, 2.0),
    (-2.0, 2.0),
    (-2.0, -10.0),
];

/// A right-turn arrow: north, then bending east.
pub const ARROW_RIGHT: ShapeTemplate = &[
    (-2.0, -10.0),
    (-2.0, 2.0),
    (6.0, 2.0),
    (6.0, 6.0),
    (14.0, 0.0),
    (6.0, -6.0),
    (6.0, -2.0),
    (2.0, -2.0),
    (2.0, -10.0),
    (-2.0, -10.0),
];

/// A left-turn arrow: north, then bending west.
pub const ARROW_LEFT: ShapeTemplate = &[
    (2.0, -10.0),
    (2.0, 2.0),
    (-6.0, 2.0),
    (-6.0, 6.0),
    (-14.0, 0.0),
    (-6.0, -6.0),
    (-6.0, -2.0),
    (-2.0, -2.0),
    (-2.0, -10.0),
    (2.0, -10.0),
];

/// Wing and apex offset for freehand arrows, in meters.
const ARROW_SIZE: Distance = Distance::const_meters(10.0);

/// Stamps a template down at an anchor point, producing a closed GeoJSON
/// polygon.
pub fn place_shape(template: ShapeTemplate, anchor: LonLat) -> Geometry {
    let ring: Vec<Vec<f64>> = template
        .iter()
        .map(|(east, north)| {
            let pt = anchor.offset(*east, *north);
            vec![pt.longitude, pt.latitude]
        })
        .collect();
    Geometry::new(Value::Polygon(vec![ring]))
}

/// Stamps a template down at the centroid of an existing feature's geometry.
pub fn shape_on_feature(template: ShapeTemplate, existing: &Geometry) -> Result<Geometry> {
    Ok(place_shape(template, geometry_centroid(existing)?))
}

/// The centroid of a GeoJSON Polygon or MultiPolygon in GPS coordinates.
pub fn geometry_centroid(geometry: &Geometry) -> Result<LonLat> {
    let centroid = match &geometry.value {
        Value::Polygon(rings) => to_geo_polygon(rings)?.centroid(),
        Value::MultiPolygon(polygons) => {
            let members = polygons
                .iter()
                .map(|rings| to_geo_polygon(rings))
                .collect::<Result<Vec<_>>>()?;
            geo::MultiPolygon(members).centroid()
        }
        value => bail!("Can't take the centroid of a {}", geometry_kind(value)),
    };
    match centroid {
        Some(pt) => Ok(LonLat::new(pt.x(), pt.y())),
        None => bail!("Geometry has no area, so no centroid"),
    }
}

fn to_geo_polygon(rings: &[Vec<Vec<f64>>]) -> Result<geo::Polygon> {
    if rings.is_empty() {
        bail!("Polygon has no rings");
    }
    let mut line_strings = rings.iter().map(|ring| {
        geo::LineString::from(
            ring.iter()
                .map(|pt| geo::Coord { x: pt[0], y: pt[1] })
                .collect::<Vec<_>>(),
        )
    });
    let exterior = line_strings.next().unwrap();
    Ok(geo::Polygon::new(exterior, line_strings.collect()))
}

/// Turns a freehand line into an arrow: the line itself becomes the shaft,
/// and an arrowhead lands on its final point, aimed along the line's
/// terminal bearing.
pub fn arrow_from_line(line: &[LonLat]) -> Result<Geometry> {
    if line.len() < 2 {
        bail!("Can't make an arrow from a {}-point line", line.len());
    }
    let tip = line[line.len() - 1];
    let bearing = line[line.len() - 2].bearing_to(tip);

    // A kite: wings off to both sides of the tip, apex further along the
    // bearing
    let head = vec![
        tip,
        tip.project_away(ARROW_SIZE, bearing.rotate_degs(90.0)),
        tip.project_away(ARROW_SIZE, bearing),
        tip.project_away(ARROW_SIZE, bearing.rotate_degs(-90.0)),
        tip,
    ];

    let gps = GPSBounds::from(line);
    // A third of the arrowhead size to each side
    let shaft =
        PolyLine::deduping_new(gps.convert(line))?.make_polygons(ARROW_SIZE * 2.0 / 3.0);
    let head = Ring::deduping_new(gps.convert(&head))?.into_polygon();

    let mut polygons = Polygon::from_multi(Polygon::union_all(vec![shaft, head]))?;
    if polygons.len() == 1 {
        Ok(polygons.pop().unwrap().to_geojson(Some(&gps)))
    } else {
        Ok(Geometry::new(Value::MultiPolygon(
            polygons
                .iter()
                .map(|polygon| polygon.to_geojson_coords(Some(&gps)))
                .collect(),
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn templates_are_closed() {
        for template in [
            CAMERA_UP,
            CAMERA_DOWN,
            CAMERA_LEFT,
            CAMERA_RIGHT,
            ARROW_STRAIGHT,
            ARROW_RIGHT,
            ARROW_LEFT,
        ] {
            assert!(template.len() >= 4);
            assert_eq!(template[0], *template.last().unwrap());
        }
    }

    #[test]
    fn placed_shapes_stay_near_the_anchor() {
        let anchor = LonLat::new(-122.3, 47.6);
        let geometry = place_shape(CAMERA_UP, anchor);
        match &geometry.value {
            Value::Polygon(rings) => {
                assert_eq!(rings.len(), 1);
                assert_eq!(rings[0][0], *rings[0].last().unwrap());
                for pt in &rings[0] {
                    let dist = anchor.gps_dist(LonLat::new(pt[0], pt[1])).inner_meters();
                    assert!(dist < 10.0, "{}m from the anchor", dist);
                }
            }
            _ => panic!("expected a polygon"),
        }
    }

    #[test]
    fn centroid_of_a_square() {
        let square = Geometry::new(Value::Polygon(vec![vec![
            vec![0.0, 0.0],
            vec![0.002, 0.0],
            vec![0.002, 0.002],
            vec![0.0, 0.002],
            vec![0.0, 0.0],
        ]]));
        let centroid = geometry_centroid(&square).unwrap();
        assert!((centroid.longitude - 0.001).abs() < 1e-9);
        assert!((centroid.latitude - 0.001).abs() < 1e-9);

        let point = Geometry::new(Value::Point(vec![0.0, 0.0]));
        assert!(geometry_centroid(&point).is_err());
    }

    #[test]
    fn arrow_needs_two_points() {
        assert!(arrow_from_line(&[]).is_err());
        assert!(arrow_from_line(&[LonLat::new(0.0, 0.0)]).is_err());
    }

    #[test]
    fn arrow_is_bigger_than_its_shaft() {
        let line = vec![
            LonLat::new(0.0, 0.0),
            LonLat::new(0.0, 0.001),
            LonLat::new(0.0005, 0.002),
        ];
        let geometry = arrow_from_line(&line).unwrap();

        let area = |geometry: &Geometry| -> f64 {
            use geo::Area;
            match &geometry.value {
                Value::Polygon(rings) => to_geo_polygon(rings).unwrap().unsigned_area(),
                Value::MultiPolygon(polygons) => polygons
                    .iter()
                    .map(|rings| to_geo_polygon(rings).unwrap().unsigned_area())
                    .sum(),
                _ => panic!("expected an areal geometry"),
            }
        };
        // In squared degrees, but enough to show the head contributed
        let gps = GPSBounds::from(&line);
        let shaft_only = PolyLine::deduping_new(gps.convert(&line))
            .unwrap()
            .make_polygons(ARROW_SIZE * 2.0 / 3.0)
            .to_geojson(Some(&gps));
        assert!(area(&geometry) > area(&shaft_only));
    }
}
