//! The boundary to the hosting map editor: typed snapshots of the host's
//! loosely-typed data model, capability traits for reading and writing it,
//! and the session-scoped width preference. The host objects are opaque and
//! read fresh per operation; nothing here caches them.

mod fake;
mod host;
mod objects;
mod prefs;

pub use crate::fake::FakeHost;
pub use crate::host::{EditorUi, MapRead, MapWrite};
pub use crate::objects::{
    Address, FeatureID, HazardKind, LaneConfig, Node, NodeID, ObjectKind, RoadType, Segment,
    SegmentID, Selection, UnitSystem, UserSettings, VenueCategory, DEFAULT_LANE_WIDTH,
};
pub use crate::prefs::{SessionWidthStore, WidthStore, DEFAULT_WIDTH, WIDTH_PRESETS};
