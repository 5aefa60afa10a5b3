use std::fmt;

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};

use crate::{Distance, Line, Polygon, Pt2D, Ring};

/// An ordered sequence of at least two points, with no repeated adjacent
/// points.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PolyLine {
    pts: Vec<Pt2D>,
    length: Distance,
}

impl PolyLine {
    pub fn new(pts: Vec<Pt2D>) -> Result<PolyLine> {
        if pts.len() < 2 {
            bail!("A PolyLine needs at least 2 points, not {}", pts.len());
        }
        if pts.windows(2).any(|pair| pair[0] == pair[1]) {
            bail!("PolyLine has repeat adjacent points: {:?}", pts);
        }

        let length = pts
            .windows(2)
            .fold(Distance::ZERO, |so_far, pair| so_far + pair[0].dist_to(pair[1]));
        Ok(PolyLine { pts, length })
    }

    pub fn must_new(pts: Vec<Pt2D>) -> PolyLine {
        PolyLine::new(pts).unwrap()
    }

    /// Like `new`, but repeated adjacent points are squashed together first.
    pub fn deduping_new(mut pts: Vec<Pt2D>) -> Result<PolyLine> {
        pts.dedup();
        PolyLine::new(pts)
    }

    pub fn points(&self) -> &Vec<Pt2D> {
        &self.pts
    }

    pub fn into_points(self) -> Vec<Pt2D> {
        self.pts
    }

    pub fn length(&self) -> Distance {
        self.length
    }

    pub fn first_pt(&self) -> Pt2D {
        self.pts[0]
    }

    pub fn last_pt(&self) -> Pt2D {
        *self.pts.last().unwrap()
    }

    pub fn reversed(&self) -> PolyLine {
        let mut pts = self.pts.clone();
        pts.reverse();
        PolyLine::must_new(pts)
    }

    /// Glues two polylines together. The other line must start exactly where
    /// this one ends; that shared point is kept once.
    pub fn extend(self, other: PolyLine) -> Result<PolyLine> {
        if *self.pts.last().unwrap() != other.pts[0] {
            bail!("Can't extend PolyLine; endpoints don't match");
        }
        let mut pts = self.pts;
        pts.pop();
        pts.extend(other.pts);
        PolyLine::new(pts)
    }

    fn lines(&self) -> impl Iterator<Item = Line> + '_ {
        self.pts
            .windows(2)
            .map(|pair| Line::must_new(pair[0], pair[1]))
    }

    /// The subset of the line between two distances along it. Fails when the
    /// range is empty or out of bounds.
    pub fn maybe_exact_slice(&self, start: Distance, end: Distance) -> Result<PolyLine> {
        if start < Distance::ZERO || end > self.length || start >= end {
            bail!(
                "Can't get a slice [{}, {}] of a polyline of length {}",
                start,
                end,
                self.length
            );
        }

        let mut result: Vec<Pt2D> = Vec::new();
        let mut dist_so_far = Distance::ZERO;

        for line in self.lines() {
            let length = line.length();

            // Does this line contain the first point of the slice?
            if result.is_empty() && dist_so_far + length >= start {
                result.push(line.dist_along(start - dist_so_far));
            }

            // Does this line contain the last point of the slice?
            if dist_so_far + length >= end {
                result.push(line.dist_along(end - dist_so_far));
                return PolyLine::deduping_new(result);
            }

            // If we're in the middle of the slice, just collect the endpoint.
            if !result.is_empty() {
                result.push(line.pt2());
            }

            dist_so_far += length;
        }

        // Floating point imprecision in the distance sums; snap to the end.
        result.push(self.last_pt());
        PolyLine::deduping_new(result)
    }

    /// Panics when the slice is out of bounds.
    pub fn exact_slice(&self, start: Distance, end: Distance) -> PolyLine {
        self.maybe_exact_slice(start, end).unwrap()
    }

    // Shifts the entire line perpendicularly, with miter joins at the
    // vertices. The number of points is preserved.
    fn shift_with_sharp_angles(&self, width: Distance) -> Vec<Pt2D> {
        if self.pts.len() == 2 {
            let l = Line::must_new(self.pts[0], self.pts[1]).shift_either_direction(width);
            return vec![l.pt1(), l.pt2()];
        }

        let mut result: Vec<Pt2D> = Vec::new();

        let mut pt3_idx = 2;
        let mut pt1_raw = self.pts[0];
        let mut pt2_raw = self.pts[1];

        loop {
            let pt3_raw = self.pts[pt3_idx];

            let l1 = Line::must_new(pt1_raw, pt2_raw).shift_either_direction(width);
            let l2 = Line::must_new(pt2_raw, pt3_raw).shift_either_direction(width);
            // When the lines are parallel, the shifted copies just touch and
            // the middle vertex is redundant.
            let pt2_shift = l1.infinite_intersection(&l2).unwrap_or_else(|| l1.pt2());

            if pt3_idx == 2 {
                result.push(l1.pt1());
            }
            result.push(pt2_shift);
            if pt3_idx == self.pts.len() - 1 {
                result.push(l2.pt2());
                break;
            }

            pt1_raw = pt2_raw;
            pt2_raw = pt3_raw;
            pt3_idx += 1;
        }

        result
    }

    /// Thickens the line into a closed polygon, half the width on each side.
    pub fn make_polygons(&self, width: Distance) -> Polygon {
        let half = width / 2.0;
        let side1 = self.shift_with_sharp_angles(half);
        let mut side2 = self.shift_with_sharp_angles(-1.0 * half);
        side2.reverse();

        let mut points = side1;
        points.extend(side2);
        points.push(points[0]);
        Ring::deduping_new(points)
            .unwrap_or_else(|err| panic!("make_polygons({}) failed: {}", width, err))
            .into_polygon()
    }
}

impl fmt::Display for PolyLine {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "PolyLine({} points, {} long)", self.pts.len(), self.length)
    }
}
