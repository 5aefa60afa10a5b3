use std::collections::BTreeSet;
use std::fmt;

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};

use editor_model::{MapRead, NodeID, Segment, SegmentID};

/// Which way a path traverses a segment, relative to the segment's own
/// src -> dst orientation.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub enum Direction {
    Fwd,
    Back,
}

impl Direction {
    pub fn opposite(self) -> Direction {
        match self {
            Direction::Fwd => Direction::Back,
            Direction::Back => Direction::Fwd,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Direction::Fwd => write!(f, "forwards"),
            Direction::Back => write!(f, "backwards"),
        }
    }
}

/// One entry of an ordered path.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct OrderedSegment {
    pub id: SegmentID,
    pub dir: Direction,
}

/// Orders an unordered set of segments into one continuous directed path.
///
/// The selection is assumed to form a simple path; this walks outward from
/// the first segment in both directions along node adjacency. At a branching
/// junction the first unvisited candidate in the node's incident order wins.
/// Known limitation, matching the structures this runs on: selections with
/// real branches produce one of several valid walks.
pub fn order_path(ids: &[SegmentID], map: &dyn MapRead) -> Result<Vec<OrderedSegment>> {
    if ids.is_empty() {
        bail!("Can't order an empty set of segments");
    }

    let in_set: BTreeSet<SegmentID> = ids.iter().cloned().collect();
    let mut visited = BTreeSet::new();

    let seed = map.segment(ids[0])?;
    visited.insert(seed.id);

    // Walk onwards from the seed's far end
    let mut forwards = vec![OrderedSegment {
        id: seed.id,
        dir: Direction::Fwd,
    }];
    let mut node = seed.dst_n;
    while let Some(seg) = next_unvisited(node, &in_set, &mut visited, map)? {
        let (dir, far_end) = if seg.src_n == node {
            (Direction::Fwd, seg.dst_n)
        } else {
            (Direction::Back, seg.src_n)
        };
        forwards.push(OrderedSegment { id: seg.id, dir });
        node = far_end;
    }

    // And symmetrically behind the seed. These entries wind up before the
    // seed, so a segment ENDING at the node we reached it from counts as Fwd.
    let mut backwards = Vec::new();
    let mut node = seed.src_n;
    while let Some(seg) = next_unvisited(node, &in_set, &mut visited, map)? {
        let (dir, far_end) = if seg.dst_n == node {
            (Direction::Fwd, seg.src_n)
        } else {
            (Direction::Back, seg.dst_n)
        };
        backwards.push(OrderedSegment { id: seg.id, dir });
        node = far_end;
    }

    backwards.reverse();
    backwards.extend(forwards);
    Ok(backwards)
}

fn next_unvisited(
    node: NodeID,
    in_set: &BTreeSet<SegmentID>,
    visited: &mut BTreeSet<SegmentID>,
    map: &dyn MapRead,
) -> Result<Option<Segment>> {
    for id in map.node(node)?.segments {
        if in_set.contains(&id) && !visited.contains(&id) {
            visited.insert(id);
            return Ok(Some(map.segment(id)?));
        }
    }
    Ok(None)
}
