use anyhow::Result;
use futures::future::{self, Either};
use futures_channel::oneshot;
use geojson::Geometry;
use log::warn;

use editor_model::{
    EditorUi, FeatureID, MapRead, MapWrite, ObjectKind, SegmentID, Selection, WidthStore,
};

use crate::{
    apply_geometry, arrow_from_line, build_landmark, merge_geometry, order_path, resolve_width,
    LandmarkOptions, Target, WidthChoice,
};

/// How a wait for the user ended.
#[derive(Debug, PartialEq)]
pub enum WaitOutcome {
    Completed(Selection),
    Cancelled,
}

/// Waits for the next selection-changed notification, unless the user
/// cancels first. A dropped sender on either channel counts as cancelling;
/// that's the host tearing the document down.
pub async fn wait_for_feature_selection(
    selection: oneshot::Receiver<Selection>,
    cancel: oneshot::Receiver<()>,
) -> WaitOutcome {
    match future::select(selection, cancel).await {
        Either::Left((Ok(selection), _)) => WaitOutcome::Completed(selection),
        Either::Left((Err(_), _)) => WaitOutcome::Cancelled,
        Either::Right(_) => WaitOutcome::Cancelled,
    }
}

/// Builds the landmark geometry for the currently selected segments: resolve
/// the width, order the path, merge it, buffer it. Returns None (after
/// logging) when nothing suitable is selected.
pub fn landmark_from_selection(
    choice: WidthChoice,
    strict_boundary: bool,
    remove_holes: bool,
    map: &dyn MapRead,
    store: &mut dyn WidthStore,
) -> Result<Option<Geometry>> {
    let selection = match map.selection() {
        Some(selection)
            if selection.kind == ObjectKind::Segment && !selection.ids.is_empty() =>
        {
            selection
        }
        Some(selection) => {
            warn!("Selected {:?}, not road segments", selection.kind);
            return Ok(None);
        }
        None => {
            warn!("Nothing is selected");
            return Ok(None);
        }
    };

    let ids: Vec<SegmentID> = selection.ids.iter().map(|id| SegmentID(*id)).collect();
    let width = resolve_width(choice, &ids, map, store)?;
    let ordered = order_path(&ids, map)?;
    let line = merge_geometry(&ordered, map)?;
    let geometry = build_landmark(
        &line,
        &LandmarkOptions {
            width,
            strict_boundary,
            remove_holes,
        },
    )?;
    Ok(Some(geometry))
}

/// The "use an existing feature" flow: wait for the user to select the
/// target feature (or cancel), then push the geometry to it. On cancel the
/// geometry is discarded and nothing is written.
pub async fn apply_when_feature_chosen<H: MapWrite + EditorUi>(
    geometry: Geometry,
    selection: oneshot::Receiver<Selection>,
    cancel: oneshot::Receiver<()>,
    host: &mut H,
) -> Result<Option<FeatureID>> {
    let chosen = match wait_for_feature_selection(selection, cancel).await {
        WaitOutcome::Completed(selection) => selection,
        WaitOutcome::Cancelled => return Ok(None),
    };

    match Target::from_selection(&chosen) {
        Some(target) => apply_geometry(target, geometry, host),
        None => {
            warn!("Can't push geometry to a {:?} selection", chosen.kind);
            host.notify("Select a map comment, venue, or permanent hazard");
            Ok(None)
        }
    }
}

/// The freehand flow: ask the host for a drawn line, then drop an arrow
/// comment along it. An abandoned drawing is a clean no-op.
pub async fn arrow_from_drawn_line<H: EditorUi + MapWrite>(
    host: &mut H,
) -> Result<Option<FeatureID>> {
    let drawn = host.draw_line();
    let line = match drawn.await {
        Ok(line) => line,
        Err(_) => return Ok(None),
    };
    let geometry = arrow_from_line(&line)?;
    let id = host.create_comment(geometry)?;
    // Leave the new comment selected, ready for editing
    host.set_selection(Selection::new(ObjectKind::MapComment, vec![id.0]));
    Ok(Some(id))
}
