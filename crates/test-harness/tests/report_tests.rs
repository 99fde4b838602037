//! Tests for the report module.

use test_harness::FrameBuilder;

#[test]
fn report_requires_a_build() {
    let m = FrameBuilder::mock();
    assert!(m.report().is_err());
}

#[test]
fn report_contains_every_section() {
    let mut m = FrameBuilder::mock()
        .dimensions(400.0, 200.0, 300.0)
        .bottom_bridges([50.0, 200.0]);
    m.build().unwrap();

    let report = m.report().unwrap();
    let text = report.to_text();
    assert!(text.starts_with("=== Frame Report ==="));
    assert!(text.contains("Dimensions: 400.0 x 200.0 x 300.0 mm"), "{}", text);
    assert!(text.contains("=== Material Report ==="));
    assert!(text.contains("Total length: 2880.0 mm (2.880 m)"), "{}", text);
    assert!(text.contains("Assembly:"));
    assert!(text.contains("pc_frame/"));
    assert!(text.contains("Bounding Box:"));
    assert!(text.contains("Oracle Results"));
    assert_eq!(text, report.to_string());
}

#[test]
fn report_groups_members_by_solid() {
    let mut m = FrameBuilder::mock().bottom_bridges([10.0, 20.0]);
    m.build().unwrap();
    let report = m.report().unwrap();

    assert_eq!(report.solids.len(), 3);
    let verticals = &report.solids[0];
    assert_eq!(
        verticals.members,
        vec!["front_left", "front_right", "back_left", "back_right"]
    );
    let text = report.to_text();
    assert!(text.contains("Euler V-E+F=2 (OK)"), "{}", text);
    assert!(report.all_passed());
}
