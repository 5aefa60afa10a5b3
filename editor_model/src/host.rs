use anyhow::Result;
use futures_channel::oneshot;
use geojson::Geometry;

use geom::LonLat;

use crate::{
    Address, FeatureID, HazardKind, Node, NodeID, Segment, SegmentID, Selection, UserSettings,
    VenueCategory,
};

/// Read capabilities of the host data model. Lookups return fresh snapshots;
/// failures mean the host doesn't know the id.
pub trait MapRead {
    fn segment(&self, id: SegmentID) -> Result<Segment>;
    fn node(&self, id: NodeID) -> Result<Node>;
    /// Country/address metadata governing the segment's default lane widths.
    fn address(&self, id: SegmentID) -> Address;
    fn user_settings(&self) -> UserSettings;
    fn selection(&self) -> Option<Selection>;
}

/// Write capabilities of the host data model. Geometry payloads are GeoJSON
/// Polygons or MultiPolygons; the host serializes its own writes.
pub trait MapWrite {
    fn create_comment(&mut self, geometry: Geometry) -> Result<FeatureID>;
    fn update_comment(&mut self, id: FeatureID, geometry: Geometry) -> Result<()>;
    fn create_venue(&mut self, category: VenueCategory, geometry: Geometry) -> Result<FeatureID>;
    fn update_venue(&mut self, id: FeatureID, geometry: Geometry) -> Result<()>;
    fn update_hazard(&mut self, id: FeatureID, geometry: Geometry) -> Result<()>;
    /// Every hazard subtype this id resolves to. More than one is a data
    /// inconsistency the caller has to tolerate.
    fn hazard_kinds(&self, id: FeatureID) -> Vec<HazardKind>;
}

/// UI capabilities of the host editor.
pub trait EditorUi {
    fn set_selection(&mut self, selection: Selection);
    /// Shows the user a transient notice.
    fn notify(&mut self, msg: &str);
    /// Starts a freehand line drawing interaction. The receiver resolves when
    /// the user finishes the line; a dropped sender means they abandoned it.
    fn draw_line(&mut self) -> oneshot::Receiver<Vec<LonLat>>;
}
