//! Tests for the FrameBuilder workflow API.

use frame_types::MemberKind;
use test_harness::{FrameBuilder, HarnessError};

#[test]
fn default_parameters_build_bare_frame() {
    let mut m = FrameBuilder::mock();
    m.build().unwrap();
    m.assert_member_count(8).unwrap();
    // 4 * (50 - 20) + 4 * 100
    m.assert_total_length(520.0).unwrap();
}

#[test]
fn fluent_parameters_reach_the_assembler() {
    let mut m = FrameBuilder::mock()
        .dimensions(400.0, 200.0, 300.0)
        .bottom_bridges([50.0, 200.0]);
    m.build().unwrap();
    m.assert_member_count(10).unwrap().assert_total_length(2880.0).unwrap();

    let bridge = m.member("bottom_bridge_2").unwrap();
    assert_eq!(bridge.kind, MemberKind::Bridge);
    assert_eq!(bridge.placement.position.x, 200.0);
}

#[test]
fn access_before_build_is_an_error() {
    let m = FrameBuilder::mock();
    assert!(matches!(m.tree(), Err(HarnessError::NotBuilt)));
    assert!(matches!(m.bom(), Err(HarnessError::NotBuilt)));
}

#[test]
fn invalid_parameters_fail_the_build() {
    let mut m = FrameBuilder::mock()
        .dimensions(400.0, 200.0, 300.0)
        .top_bridges([400.0]);
    let err = m.build().err().unwrap();
    assert!(matches!(err, HarnessError::Config(_)), "{}", err);
    assert!(m.tree().is_err(), "failed build leaves no tree behind");
}

#[test]
fn unknown_member_is_reported_by_label() {
    let mut m = FrameBuilder::mock();
    m.build().unwrap();
    match m.member("middle_bridge_1") {
        Err(HarnessError::MemberNotFound { label }) => assert_eq!(label, "middle_bridge_1"),
        other => panic!("expected MemberNotFound, got {:?}", other.map(|m| &m.label)),
    }
}

#[test]
fn rebuild_with_derives_a_new_config() {
    let mut m = FrameBuilder::mock().dimensions(400.0, 200.0, 300.0);
    m.build().unwrap();
    m.rebuild_with(|c| c.with_top_bridges(vec![10.0, 20.0]))
        .unwrap();
    m.assert_member_count(10).unwrap();
    assert_eq!(m.history().len(), 2);

    let err = m
        .rebuild_with(|c| c.with_dimensions(100.0, 200.0, 300.0))
        .err()
        .unwrap();
    assert!(matches!(err, HarnessError::Config(_)));
}

#[test]
fn auto_check_passes_on_valid_frames() {
    let mut m = FrameBuilder::mock()
        .with_auto_check()
        .dimensions(210.0, 450.0, 420.0)
        .bottom_bridges([0.0, 85.0, 170.0])
        .top_bridges([20.0, 150.0]);
    m.build().unwrap();
    m.assert_member_count(13).unwrap();
}

#[test]
fn viewer_json_round_trips_through_serde_json() {
    let mut m = FrameBuilder::mock().bottom_bridges([10.0]);
    m.build().unwrap();
    let json = m.to_json().unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["root"]["children"].as_array().unwrap().len(), 3);
}
