//! End-to-end runs of the whole pipeline against the in-memory host.

use futures::executor::block_on;
use futures_channel::oneshot;

use editor_model::{
    FakeHost, LaneConfig, MapRead, MapWrite, ObjectKind, Selection, SessionWidthStore, WidthStore,
};
use geojson::Value;
use geom::LonLat;
use landmarks::{
    apply_geometry, apply_when_feature_chosen, landmark_from_selection, Target, WidthChoice,
};

// Three segments following a street that bends north, selected out of order.
fn bent_street() -> (FakeHost, Vec<u64>) {
    let mut host = FakeHost::new();
    host.add_segment(
        100,
        1,
        2,
        vec![LonLat::new(-122.3000, 47.6000), LonLat::new(-122.2990, 47.6000)],
    );
    host.add_segment(
        101,
        2,
        3,
        vec![
            LonLat::new(-122.2990, 47.6000),
            LonLat::new(-122.2980, 47.6001),
        ],
    );
    host.add_segment(
        102,
        3,
        4,
        vec![
            LonLat::new(-122.2980, 47.6001),
            LonLat::new(-122.2980, 47.6010),
        ],
    );
    for id in [100, 101, 102] {
        let segment = host.segment_mut(editor_model::SegmentID(id));
        segment.fwd_lanes = LaneConfig {
            count: Some(1),
            width: Some(3.3),
        };
        segment.back_lanes = LaneConfig {
            count: Some(1),
            width: Some(3.3),
        };
    }
    (host, vec![101, 102, 100])
}

#[test]
fn selection_to_new_comment() {
    let (mut host, ids) = bent_street();
    host.select(ObjectKind::Segment, ids);
    let mut store = SessionWidthStore::new();

    let geometry =
        landmark_from_selection(WidthChoice::Infer, false, false, &host, &mut store)
            .unwrap()
            .unwrap();

    // Inferred 3.3 * 1 lane, so nothing was persisted as an explicit choice
    assert_eq!(store.get(), None);

    match &geometry.value {
        Value::Polygon(rings) => {
            assert_eq!(rings.len(), 1);
            let ring = &rings[0];
            assert_eq!(ring.first(), ring.last());
            // The outline stays near the street
            for pt in ring {
                let dist = LonLat::new(pt[0], pt[1])
                    .gps_dist(LonLat::new(-122.2990, 47.6002))
                    .inner_meters();
                assert!(dist < 250.0, "{}m away from the street", dist);
            }
        }
        _ => panic!("expected a polygon"),
    }

    let id = apply_geometry(Target::NewComment, geometry, &mut host)
        .unwrap()
        .unwrap();
    assert!(host.comments.contains_key(&id));
}

#[test]
fn explicit_width_survives_for_the_next_operation() {
    let (mut host, ids) = bent_street();
    host.select(ObjectKind::Segment, ids);
    let mut store = SessionWidthStore::new();

    landmark_from_selection(WidthChoice::Explicit(20), true, true, &host, &mut store)
        .unwrap()
        .unwrap();
    assert_eq!(store.get(), Some(20));
}

#[test]
fn full_flow_into_an_existing_venue() {
    let (mut host, ids) = bent_street();
    host.select(ObjectKind::Segment, ids);
    let mut store = SessionWidthStore::new();

    let geometry =
        landmark_from_selection(WidthChoice::Explicit(10), false, false, &host, &mut store)
            .unwrap()
            .unwrap();

    let venue = host
        .create_venue(
            editor_model::VenueCategory::new("PARKING_LOT"),
            geojson::Geometry::new(Value::Polygon(vec![vec![
                vec![0.0, 0.0],
                vec![1.0, 0.0],
                vec![1.0, 1.0],
                vec![0.0, 0.0],
            ]])),
        )
        .unwrap();

    // The user picks the venue while the flow waits
    let (selection_tx, selection_rx) = oneshot::channel();
    let (_cancel_tx, cancel_rx) = oneshot::channel();
    selection_tx
        .send(Selection::new(ObjectKind::Venue, vec![venue.0]))
        .unwrap();

    let written = block_on(apply_when_feature_chosen(
        geometry,
        selection_rx,
        cancel_rx,
        &mut host,
    ))
    .unwrap();
    assert_eq!(written, Some(venue));

    // Venue geometry is written hole-free
    match &host.venues[&venue].1.value {
        Value::Polygon(rings) => assert_eq!(rings.len(), 1),
        _ => panic!("expected a polygon"),
    }
}

#[test]
fn unsupported_wait_selection_notifies_the_user() {
    let (mut host, ids) = bent_street();
    host.select(ObjectKind::Segment, ids.clone());
    let mut store = SessionWidthStore::new();
    let geometry =
        landmark_from_selection(WidthChoice::Infer, false, false, &host, &mut store)
            .unwrap()
            .unwrap();

    // The user selects more segments instead of a feature
    let (selection_tx, selection_rx) = oneshot::channel();
    let (_cancel_tx, cancel_rx) = oneshot::channel();
    selection_tx
        .send(Selection::new(ObjectKind::Segment, ids))
        .unwrap();

    let written = block_on(apply_when_feature_chosen(
        geometry,
        selection_rx,
        cancel_rx,
        &mut host,
    ))
    .unwrap();
    assert_eq!(written, None);
    assert_eq!(host.notices.len(), 1);
    assert!(host.comments.is_empty());
}

#[test]
fn geometry_serializes_in_the_host_wire_shape() {
    let (mut host, ids) = bent_street();
    host.select(ObjectKind::Segment, ids);
    let mut store = SessionWidthStore::new();

    let geometry =
        landmark_from_selection(WidthChoice::Explicit(10), false, false, &host, &mut store)
            .unwrap()
            .unwrap();
    let json = serde_json::to_value(&geometry).unwrap();
    assert_eq!(json["type"], "Polygon");
    assert!(json["coordinates"][0].as_array().unwrap().len() >= 4);
}

#[test]
fn merged_point_counts_line_up() {
    let (host, _) = bent_street();
    let ids: Vec<editor_model::SegmentID> =
        [100, 101, 102].into_iter().map(editor_model::SegmentID).collect();
    let ordered = landmarks::order_path(&ids, &host).unwrap();
    let line = landmarks::merge_geometry(&ordered, &host).unwrap();

    let total: usize = ids
        .iter()
        .map(|id| host.segment(*id).unwrap().center.len())
        .sum();
    assert_eq!(line.len(), total - (ids.len() - 1));
}
