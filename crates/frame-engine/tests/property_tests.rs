//! Properties that must hold for every valid frame configuration.

use proptest::prelude::*;

use frame_engine::{FrameAssembler, FrameConfig, MaterialCalculator};
use profile_kernel::MockKernel;
use profile_ops::KernelProfileProvider;

/// Width, height and depth at or above the 40mm minimum.
fn arb_dims() -> impl Strategy<Value = (f64, f64, f64)> {
    (40.0f64..2000.0, 40.0f64..2000.0, 40.0f64..2000.0)
}

/// Bridge positions as fractions of the usable width.
fn arb_fractions() -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec(0.0f64..=1.0, 0..5)
}

fn config_from(
    (w, h, d): (f64, f64, f64),
    bottom: &[f64],
    top: &[f64],
) -> FrameConfig {
    let usable = w - 40.0;
    FrameConfig::new(
        w,
        h,
        d,
        bottom.iter().map(|f| f * usable).collect(),
        top.iter().map(|f| f * usable).collect(),
    )
    .unwrap()
}

proptest! {
    #[test]
    fn material_total_matches_placed_members(
        dims in arb_dims(),
        bottom in arb_fractions(),
        top in arb_fractions(),
    ) {
        let config = config_from(dims, &bottom, &top);
        let bom = MaterialCalculator::calculate(&config);

        let mut kernel = MockKernel::new();
        let mut provider = KernelProfileProvider::new(&mut kernel);
        let tree = FrameAssembler::new().assemble(&config, &mut provider).unwrap();

        prop_assert_eq!(bom.total_members(), tree.member_count());
        prop_assert_eq!(bom.total_length_mm, tree.total_member_length());
    }
}

proptest! {
    #[test]
    fn positions_inside_usable_width_are_accepted(
        dims in arb_dims(),
        bottom in arb_fractions(),
    ) {
        let config = config_from(dims, &bottom, &[]);
        prop_assert_eq!(config.bridge_count(), bottom.len());
    }
}

proptest! {
    #[test]
    fn positions_past_usable_width_are_rejected(
        dims in arb_dims(),
        excess in 0.001f64..500.0,
        index in 0usize..3,
    ) {
        let (w, h, d) = dims;
        let mut positions = vec![0.0; index];
        positions.push(w - 40.0 + excess);
        let result = FrameConfig::new(w, h, d, positions, vec![]);
        let rejected = matches!(
            result,
            Err(frame_engine::ConfigError::BridgeBeyondUsableWidth { index: i, .. }) if i == index + 1
        );
        prop_assert!(rejected);
    }
}

proptest! {
    #[test]
    fn every_member_has_label_and_finite_placement(
        dims in arb_dims(),
        bottom in arb_fractions(),
        top in arb_fractions(),
    ) {
        let config = config_from(dims, &bottom, &top);
        let mut kernel = MockKernel::new();
        let mut provider = KernelProfileProvider::new(&mut kernel);
        let tree = FrameAssembler::new().assemble(&config, &mut provider).unwrap();

        for m in tree.members() {
            prop_assert!(!m.label.is_empty());
            prop_assert!(m.placement.is_finite());
            prop_assert!(m.length > 0.0);
        }
    }
}
