use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use geom::{Distance, LonLat};

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SegmentID(pub u64);

impl fmt::Display for SegmentID {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Segment #{}", self.0)
    }
}

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeID(pub u64);

impl fmt::Display for NodeID {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Node #{}", self.0)
    }
}

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct FeatureID(pub u64);

impl fmt::Display for FeatureID {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Feature #{}", self.0)
    }
}

/// Road categories, carrying the host's numeric codes.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RoadType {
    Street,
    PrimaryStreet,
    Freeway,
    Ramp,
    MajorHighway,
    MinorHighway,
    Offroad,
    PrivateRoad,
    ParkingLot,
}

impl RoadType {
    pub fn from_code(code: u8) -> Option<RoadType> {
        match code {
            1 => Some(RoadType::Street),
            2 => Some(RoadType::PrimaryStreet),
            3 => Some(RoadType::Freeway),
            4 => Some(RoadType::Ramp),
            6 => Some(RoadType::MajorHighway),
            7 => Some(RoadType::MinorHighway),
            8 => Some(RoadType::Offroad),
            17 => Some(RoadType::PrivateRoad),
            20 => Some(RoadType::ParkingLot),
            _ => None,
        }
    }

    pub fn code(self) -> u8 {
        match self {
            RoadType::Street => 1,
            RoadType::PrimaryStreet => 2,
            RoadType::Freeway => 3,
            RoadType::Ramp => 4,
            RoadType::MajorHighway => 6,
            RoadType::MinorHighway => 7,
            RoadType::Offroad => 8,
            RoadType::PrivateRoad => 17,
            RoadType::ParkingLot => 20,
        }
    }
}

/// Lane metadata for one direction of a segment, as the host reports it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct LaneConfig {
    pub count: Option<usize>,
    /// In the acting user's units; feet when their preference is imperial.
    pub width: Option<f64>,
}

/// An immutable snapshot of one road segment.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Segment {
    pub id: SegmentID,
    pub src_n: NodeID,
    pub dst_n: NodeID,
    /// At least two points, running from src_n to dst_n.
    pub center: Vec<LonLat>,
    pub fwd_lanes: LaneConfig,
    pub back_lanes: LaneConfig,
    pub road_type: RoadType,
}

/// An immutable snapshot of a junction node.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Node {
    pub id: NodeID,
    /// Incident segments, in the order the host returns them.
    pub segments: Vec<SegmentID>,
}

/// Country-level defaults attached to a segment's address.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Address {
    pub default_lane_widths: BTreeMap<RoadType, Distance>,
}

impl Address {
    pub fn default_lane_width(&self, road_type: RoadType) -> Option<Distance> {
        self.default_lane_widths.get(&road_type).copied()
    }
}

/// Used when neither the segment nor its address supplies a lane width.
pub const DEFAULT_LANE_WIDTH: Distance = Distance::const_meters(3.3);

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub enum UnitSystem {
    Metric,
    Imperial,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct UserSettings {
    pub units: UnitSystem,
}

impl Default for UserSettings {
    fn default() -> UserSettings {
        UserSettings {
            units: UnitSystem::Metric,
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub enum ObjectKind {
    Segment,
    MapComment,
    Venue,
    PermanentHazard,
}

/// What the user currently has selected in the editor.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Selection {
    pub kind: ObjectKind,
    pub ids: Vec<u64>,
}

impl Selection {
    pub fn new(kind: ObjectKind, ids: Vec<u64>) -> Selection {
        Selection { kind, ids }
    }
}

/// Subtypes of the permanent-hazard feature category.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
pub enum HazardKind {
    SpeedCamera,
    RedLightCamera,
    SchoolZone,
    RailroadCrossing,
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct VenueCategory(pub String);

impl VenueCategory {
    pub fn new(category: &str) -> VenueCategory {
        VenueCategory(category.to_string())
    }
}
