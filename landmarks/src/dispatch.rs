use anyhow::Result;
use geojson::Geometry;
use log::warn;

use editor_model::{FeatureID, HazardKind, MapWrite, ObjectKind, Selection, VenueCategory};

use crate::build::remove_holes_from_geometry;

/// Where a synthesized geometry should land.
#[derive(Clone, Debug, PartialEq)]
pub enum Target {
    NewComment,
    Comment(FeatureID),
    NewVenue(VenueCategory),
    Venue(FeatureID),
    Hazard(FeatureID),
}

impl Target {
    /// The feature the selection names, if it's a kind geometry can be
    /// pushed to.
    pub fn from_selection(selection: &Selection) -> Option<Target> {
        let id = FeatureID(*selection.ids.first()?);
        match selection.kind {
            ObjectKind::MapComment => Some(Target::Comment(id)),
            ObjectKind::Venue => Some(Target::Venue(id)),
            ObjectKind::PermanentHazard => Some(Target::Hazard(id)),
            ObjectKind::Segment => None,
        }
    }
}

/// Routes a geometry to the right host write call, applying the
/// hole-removal policy for consumers that reject holed polygons. Returns the
/// feature written, or None (after logging) when the target can't take it.
pub fn apply_geometry(
    target: Target,
    mut geometry: Geometry,
    writes: &mut dyn MapWrite,
) -> Result<Option<FeatureID>> {
    match target {
        Target::NewComment => writes.create_comment(geometry).map(Some),
        Target::Comment(id) => {
            writes.update_comment(id, geometry)?;
            Ok(Some(id))
        }
        // Venue tile builders reject holed polygons
        Target::NewVenue(category) => writes
            .create_venue(category, remove_holes_from_geometry(geometry))
            .map(Some),
        Target::Venue(id) => {
            writes.update_venue(id, remove_holes_from_geometry(geometry))?;
            Ok(Some(id))
        }
        Target::Hazard(id) => {
            let kinds = writes.hazard_kinds(id);
            let kind = match kinds.len() {
                0 => {
                    warn!("{} doesn't resolve to any hazard subtype", id);
                    return Ok(None);
                }
                1 => kinds[0],
                n => {
                    warn!("{} resolves to {} hazard subtypes; using the first", id, n);
                    kinds[0]
                }
            };
            // The school-zone tile builder rejects holed polygons too
            if kind == HazardKind::SchoolZone {
                geometry = remove_holes_from_geometry(geometry);
            }
            writes.update_hazard(id, geometry)?;
            Ok(Some(id))
        }
    }
}
