use anyhow::{bail, Result};

use editor_model::MapRead;
use geom::LonLat;

use crate::{Direction, OrderedSegment};

/// Stitches the ordered segments' coordinate sequences into one continuous
/// line. Segments share exact endpoint coordinates at junctions; the
/// duplicate point at each seam is kept only once.
pub fn merge_geometry(ordered: &[OrderedSegment], map: &dyn MapRead) -> Result<Vec<LonLat>> {
    let mut result: Vec<LonLat> = Vec::new();
    for entry in ordered {
        let segment = map.segment(entry.id)?;
        let mut pts = segment.center;
        if entry.dir == Direction::Back {
            pts.reverse();
        }
        if !result.is_empty() {
            result.pop();
        }
        result.extend(pts);
    }
    if result.len() < 2 {
        bail!(
            "Merging {} segments only produced {} points",
            ordered.len(),
            result.len()
        );
    }
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    use editor_model::{FakeHost, SegmentID};

    fn pt(i: u64) -> LonLat {
        LonLat::new(0.001 * (i as f64), 0.0)
    }

    #[test]
    fn junction_points_dedupe() {
        let mut host = FakeHost::new();
        host.add_segment(100, 1, 2, vec![pt(0), pt(1), pt(2)]);
        host.add_segment(101, 2, 3, vec![pt(2), pt(3)]);
        host.add_segment(102, 3, 4, vec![pt(3), pt(4), pt(5)]);

        let ordered: Vec<OrderedSegment> = [100, 101, 102]
            .into_iter()
            .map(|id| OrderedSegment {
                id: SegmentID(id),
                dir: Direction::Fwd,
            })
            .collect();
        let line = merge_geometry(&ordered, &host).unwrap();
        // 3 + 2 + 3 points, minus one per junction
        assert_eq!(line.len(), 6);
        assert_eq!(line, vec![pt(0), pt(1), pt(2), pt(3), pt(4), pt(5)]);
    }

    #[test]
    fn reversed_segments_flip_before_stitching() {
        let mut host = FakeHost::new();
        host.add_segment(100, 1, 2, vec![pt(0), pt(1)]);
        // Points from node3 to node2
        host.add_segment(101, 3, 2, vec![pt(2), pt(1)]);

        let ordered = vec![
            OrderedSegment {
                id: SegmentID(100),
                dir: Direction::Fwd,
            },
            OrderedSegment {
                id: SegmentID(101),
                dir: Direction::Back,
            },
        ];
        let line = merge_geometry(&ordered, &host).unwrap();
        assert_eq!(line, vec![pt(0), pt(1), pt(2)]);
    }
}
