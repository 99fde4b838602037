//! TruckKernel scenario tests.
//!
//! These run the full frame build against real truck geometry.

use profile_ops::ProfileSource;
use test_harness::assertions::{assert_all_pass, assert_topology_eq};
use test_harness::helpers::two_bridge_config;
use test_harness::FrameBuilder;

#[test]
fn test_truck_reference_frame() {
    let config = two_bridge_config().unwrap();
    let mut m = FrameBuilder::truck().config(&config);
    m.build().unwrap();

    m.assert_member_count(10).unwrap();
    m.assert_total_length(2880.0).unwrap();
    assert_all_pass(&m.check_frame().unwrap(), "truck frame").unwrap();
    assert_all_pass(&m.check_solids().unwrap(), "truck solids").unwrap();
}

#[test]
fn test_truck_sharp_section_is_a_box() {
    let mut m = FrameBuilder::truck()
        .with_source(ProfileSource::sharp())
        .bottom_bridges([10.0]);
    m.build().unwrap();

    for label in ["front_left", "front_top", "bottom_bridge_1"] {
        let handle = m.solid_handle(label).unwrap();
        assert_topology_eq(m.kernel(), &handle, 8, 12, 6, label).unwrap();
    }
}

#[test]
fn test_truck_report() {
    let mut m = FrameBuilder::truck().bottom_bridges([0.0]);
    m.build().unwrap();
    let report = m.report().unwrap();
    assert!(report.all_passed(), "{}", report);
}
