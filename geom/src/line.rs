use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{Angle, Distance, Pt2D};

/// A line segment.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Line(Pt2D, Pt2D);

impl Line {
    /// Fails on a degenerate segment with both endpoints in the same place.
    pub fn new(pt1: Pt2D, pt2: Pt2D) -> Option<Line> {
        if pt1 == pt2 {
            return None;
        }
        Some(Line(pt1, pt2))
    }

    /// Panics on a degenerate segment.
    pub fn must_new(pt1: Pt2D, pt2: Pt2D) -> Line {
        Line::new(pt1, pt2).unwrap_or_else(|| panic!("Can't make a Line at {}", pt1))
    }

    pub fn pt1(&self) -> Pt2D {
        self.0
    }

    pub fn pt2(&self) -> Pt2D {
        self.1
    }

    pub fn length(&self) -> Distance {
        self.pt1().dist_to(self.pt2())
    }

    pub fn angle(&self) -> Angle {
        self.pt1().angle_to(self.pt2())
    }

    /// The point this far along the segment. Callers are expected to stay
    /// within [0, length].
    pub fn dist_along(&self, dist: Distance) -> Pt2D {
        self.percent_along(dist / self.length())
    }

    pub fn percent_along(&self, percent: f64) -> Pt2D {
        Pt2D::new(
            self.pt1().x() + percent * (self.pt2().x() - self.pt1().x()),
            self.pt1().y() + percent * (self.pt2().y() - self.pt1().y()),
        )
    }

    /// Perpendicular offset; positive widths shift towards the left of the
    /// segment's direction, negative towards the right.
    pub fn shift_either_direction(&self, width: Distance) -> Line {
        let angle = self.angle().rotate_degs(90.0);
        Line(
            self.pt1().project_away(width, angle),
            self.pt2().project_away(width, angle),
        )
    }

    /// Treats both segments as infinite lines and intersects those. None when
    /// they're parallel.
    pub fn infinite_intersection(&self, other: &Line) -> Option<Pt2D> {
        let (x1, y1) = (self.pt1().x(), self.pt1().y());
        let (x2, y2) = (self.pt2().x(), self.pt2().y());
        let (x3, y3) = (other.pt1().x(), other.pt1().y());
        let (x4, y4) = (other.pt2().x(), other.pt2().y());

        let denom = (x1 - x2) * (y3 - y4) - (y1 - y2) * (x3 - x4);
        if denom.abs() < 1e-9 {
            return None;
        }
        let t = ((x1 - x3) * (y3 - y4) - (y1 - y3) * (x3 - x4)) / denom;
        Some(Pt2D::new(x1 + t * (x2 - x1), y1 + t * (y2 - y1)))
    }
}

impl fmt::Display for Line {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Line({} to {})", self.pt1(), self.pt2())
    }
}
