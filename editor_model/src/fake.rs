//! An in-memory stand-in for the host, used by tests across the workspace.

use std::collections::BTreeMap;

use anyhow::{anyhow, bail, Result};
use futures_channel::oneshot;
use geojson::Geometry;

use geom::LonLat;

use crate::{
    Address, EditorUi, FeatureID, HazardKind, LaneConfig, MapRead, MapWrite, Node, NodeID,
    ObjectKind, RoadType, Segment, SegmentID, Selection, UserSettings, VenueCategory,
};

#[derive(Default)]
pub struct FakeHost {
    pub segments: BTreeMap<SegmentID, Segment>,
    pub nodes: BTreeMap<NodeID, Node>,
    pub addresses: BTreeMap<SegmentID, Address>,
    pub settings: UserSettings,
    pub current_selection: Option<Selection>,
    pub comments: BTreeMap<FeatureID, Geometry>,
    pub venues: BTreeMap<FeatureID, (VenueCategory, Geometry)>,
    pub hazards: BTreeMap<FeatureID, (Vec<HazardKind>, Geometry)>,
    pub notices: Vec<String>,
    /// What the next draw_line interaction produces. None means the user
    /// abandons the drawing.
    pub next_drawn_line: Option<Vec<LonLat>>,
    next_feature_id: u64,
}

impl FakeHost {
    pub fn new() -> FakeHost {
        FakeHost::default()
    }

    /// Registers a segment and wires up adjacency at both endpoint nodes.
    pub fn add_segment(
        &mut self,
        id: u64,
        src_n: u64,
        dst_n: u64,
        center: Vec<LonLat>,
    ) -> SegmentID {
        let id = SegmentID(id);
        for node in [NodeID(src_n), NodeID(dst_n)] {
            self.nodes
                .entry(node)
                .or_insert_with(|| Node {
                    id: node,
                    segments: Vec::new(),
                })
                .segments
                .push(id);
        }
        self.segments.insert(
            id,
            Segment {
                id,
                src_n: NodeID(src_n),
                dst_n: NodeID(dst_n),
                center,
                fwd_lanes: LaneConfig::default(),
                back_lanes: LaneConfig::default(),
                road_type: RoadType::Street,
            },
        );
        id
    }

    pub fn segment_mut(&mut self, id: SegmentID) -> &mut Segment {
        self.segments.get_mut(&id).unwrap()
    }

    pub fn add_hazard(&mut self, kinds: Vec<HazardKind>, geometry: Geometry) -> FeatureID {
        let id = self.next_id();
        self.hazards.insert(id, (kinds, geometry));
        id
    }

    pub fn select(&mut self, kind: ObjectKind, ids: Vec<u64>) {
        self.current_selection = Some(Selection::new(kind, ids));
    }

    fn next_id(&mut self) -> FeatureID {
        self.next_feature_id += 1;
        FeatureID(self.next_feature_id)
    }
}

impl MapRead for FakeHost {
    fn segment(&self, id: SegmentID) -> Result<Segment> {
        self.segments
            .get(&id)
            .cloned()
            .ok_or_else(|| anyhow!("{} isn't known", id))
    }

    fn node(&self, id: NodeID) -> Result<Node> {
        self.nodes
            .get(&id)
            .cloned()
            .ok_or_else(|| anyhow!("{} isn't known", id))
    }

    fn address(&self, id: SegmentID) -> Address {
        self.addresses.get(&id).cloned().unwrap_or_default()
    }

    fn user_settings(&self) -> UserSettings {
        self.settings
    }

    fn selection(&self) -> Option<Selection> {
        self.current_selection.clone()
    }
}

impl MapWrite for FakeHost {
    fn create_comment(&mut self, geometry: Geometry) -> Result<FeatureID> {
        let id = self.next_id();
        self.comments.insert(id, geometry);
        Ok(id)
    }

    fn update_comment(&mut self, id: FeatureID, geometry: Geometry) -> Result<()> {
        if !self.comments.contains_key(&id) {
            bail!("{} isn't a comment", id);
        }
        self.comments.insert(id, geometry);
        Ok(())
    }

    fn create_venue(&mut self, category: VenueCategory, geometry: Geometry) -> Result<FeatureID> {
        let id = self.next_id();
        self.venues.insert(id, (category, geometry));
        Ok(id)
    }

    fn update_venue(&mut self, id: FeatureID, geometry: Geometry) -> Result<()> {
        match self.venues.get_mut(&id) {
            Some(venue) => {
                venue.1 = geometry;
                Ok(())
            }
            None => bail!("{} isn't a venue", id),
        }
    }

    fn update_hazard(&mut self, id: FeatureID, geometry: Geometry) -> Result<()> {
        match self.hazards.get_mut(&id) {
            Some(hazard) => {
                hazard.1 = geometry;
                Ok(())
            }
            None => bail!("{} isn't a hazard", id),
        }
    }

    fn hazard_kinds(&self, id: FeatureID) -> Vec<HazardKind> {
        self.hazards
            .get(&id)
            .map(|(kinds, _)| kinds.clone())
            .unwrap_or_default()
    }
}

impl EditorUi for FakeHost {
    fn set_selection(&mut self, selection: Selection) {
        self.current_selection = Some(selection);
    }

    fn notify(&mut self, msg: &str) {
        self.notices.push(msg.to_string());
    }

    fn draw_line(&mut self) -> oneshot::Receiver<Vec<LonLat>> {
        let (tx, rx) = oneshot::channel();
        if let Some(line) = self.next_drawn_line.take() {
            // The receiver might be dropped without being awaited; that's not
            // this fake's problem.
            let _ = tx.send(line);
        }
        rx
    }
}
