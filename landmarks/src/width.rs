use anyhow::{bail, Result};

use editor_model::{MapRead, SegmentID, UnitSystem, WidthStore, DEFAULT_LANE_WIDTH};
use geom::Distance;

/// The user's width decision for one operation.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum WidthChoice {
    /// A number picked from the dropdown, in meters.
    Explicit(usize),
    /// Derive the width from the selected segments' lane metadata.
    Infer,
}

/// Resolves the landmark width. An explicit choice is persisted as the new
/// session default; inferring clears it, so later sessions re-infer instead
/// of reusing a stale number.
pub fn resolve_width(
    choice: WidthChoice,
    ids: &[SegmentID],
    map: &dyn MapRead,
    store: &mut dyn WidthStore,
) -> Result<Distance> {
    match choice {
        WidthChoice::Explicit(meters) => {
            store.set(meters);
            Ok(Distance::meters(meters as f64))
        }
        WidthChoice::Infer => {
            store.clear();
            if ids.is_empty() {
                bail!("Can't infer a width from zero segments");
            }

            let imperial = map.user_settings().units == UnitSystem::Imperial;
            let mut total = 0.0;
            for id in ids {
                let segment = map.segment(*id)?;
                let default = map
                    .address(*id)
                    .default_lane_width(segment.road_type)
                    .unwrap_or(DEFAULT_LANE_WIDTH);

                let fwd_width = lane_width_meters(segment.fwd_lanes.width, imperial, default);
                let back_width = lane_width_meters(segment.back_lanes.width, imperial, default);
                let avg_count = (segment.fwd_lanes.count.unwrap_or(1) as f64
                    + segment.back_lanes.count.unwrap_or(1) as f64)
                    / 2.0;
                total += (fwd_width + back_width) / 2.0 * avg_count;
            }
            Ok(Distance::meters((total / ids.len() as f64).round()))
        }
    }
}

fn lane_width_meters(supplied: Option<f64>, imperial: bool, default: Distance) -> f64 {
    match supplied {
        Some(width) if imperial => Distance::feet(width).inner_meters(),
        Some(width) => width,
        None => default.inner_meters(),
    }
}
