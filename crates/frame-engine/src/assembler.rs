//! Placement of every frame member.
//!
//! Coordinates: X runs along the width, Y along the depth and Z along the
//! height. Each extrusion starts in its local frame with the section on the
//! XY plane and the bar along +Z; a member's placement rotates that frame
//! about its origin and then moves it to the member position.

use std::collections::HashSet;

use frame_types::{BridgeLevel, EulerAngles, FrameFace, MemberKind, Placement};
use profile_ops::{ProfileProvider, ShapeConstructionError, PROFILE_2020_SIZE};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

use crate::assembly::{AssemblyTree, MemberTemplate, SubAssembly, ROOT_LABEL};
use crate::config::FrameConfig;
use crate::material::MaterialCalculator;

/// Section tolerance when checking a provider's extrusions.
const SECTION_TOLERANCE: f64 = 1e-6;

/// Sign and offset conventions for member placement.
///
/// The defaults reproduce the reference layout: rails rotated a quarter turn
/// about Y, bridges a quarter turn about X, anchored at the back face
/// (`y = depth`) and sitting one extrusion below their level.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FrameConventions {
    pub horizontal_rotation: EulerAngles,
    pub bridge_rotation: EulerAngles,
    /// Bridge Y position as a multiple of the frame depth.
    pub bridge_anchor_depth_factor: f64,
    /// Z of bottom bridges.
    pub bottom_bridge_z: f64,
    /// Z of top bridges, relative to the frame height.
    pub top_bridge_z_offset: f64,
}

impl Default for FrameConventions {
    fn default() -> Self {
        Self {
            horizontal_rotation: EulerAngles::about_y(FrameAssembler::RIGHT_ANGLE),
            bridge_rotation: EulerAngles::about_x(FrameAssembler::RIGHT_ANGLE),
            bridge_anchor_depth_factor: 1.0,
            bottom_bridge_z: -FrameAssembler::EXTRUSION_SIZE,
            top_bridge_z_offset: -FrameAssembler::EXTRUSION_SIZE,
        }
    }
}

impl FrameConventions {
    fn bridge_z(&self, level: BridgeLevel, height: f64) -> f64 {
        match level {
            BridgeLevel::Bottom => self.bottom_bridge_z,
            BridgeLevel::Top => height + self.top_bridge_z_offset,
        }
    }
}

/// Builds the frame assembly from a configuration.
#[derive(Debug, Clone, Default)]
pub struct FrameAssembler {
    conventions: FrameConventions,
}

impl FrameAssembler {
    /// Side of the square extrusion section, in millimeters.
    pub const EXTRUSION_SIZE: f64 = PROFILE_2020_SIZE;
    /// Quarter turn, in degrees.
    pub const RIGHT_ANGLE: f64 = 90.0;

    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_conventions(conventions: FrameConventions) -> Self {
        Self { conventions }
    }

    pub fn conventions(&self) -> &FrameConventions {
        &self.conventions
    }

    /// Assemble the frame. Any provider failure aborts the whole assembly.
    #[instrument(
        skip(self, config, provider),
        fields(width = config.width(), height = config.height(), depth = config.depth())
    )]
    pub fn assemble(
        &self,
        config: &FrameConfig,
        provider: &mut dyn ProfileProvider,
    ) -> Result<AssemblyTree, ShapeConstructionError> {
        let vertical = self.template(
            provider,
            MemberKind::Vertical,
            MaterialCalculator::vertical_length(config),
        )?;
        let horizontal = self.template(
            provider,
            MemberKind::Horizontal,
            MaterialCalculator::horizontal_length(config),
        )?;
        let bridge = self.template(
            provider,
            MemberKind::Bridge,
            MaterialCalculator::bridge_length(config),
        )?;

        let front = self.front_frame(config, &vertical, &horizontal);
        let back = front.relabeled_copy(
            FrameFace::Front.prefix(),
            FrameFace::Back.prefix(),
            0.0,
            config.depth(),
            0.0,
        );

        let mut root = SubAssembly::new(ROOT_LABEL);
        root.push_assembly(front);
        root.push_assembly(back);

        for level in [BridgeLevel::Bottom, BridgeLevel::Top] {
            self.place_bridges(config, level, &bridge, &mut root);
        }

        let tree = AssemblyTree::new(root);
        info!(
            members = tree.member_count(),
            total_length_mm = tree.total_member_length(),
            "frame assembled"
        );
        Ok(tree)
    }

    fn template(
        &self,
        provider: &mut dyn ProfileProvider,
        kind: MemberKind,
        length: f64,
    ) -> Result<MemberTemplate, ShapeConstructionError> {
        let size = provider.section_size();
        if (size - Self::EXTRUSION_SIZE).abs() > SECTION_TOLERANCE {
            return Err(ShapeConstructionError::SectionMismatch {
                expected: Self::EXTRUSION_SIZE,
                actual_width: size,
                actual_height: size,
            });
        }

        let extrusion = provider.make_extrusion(length)?;
        let (w, h) = extrusion.section_extent();
        if (w - Self::EXTRUSION_SIZE).abs() > SECTION_TOLERANCE
            || (h - Self::EXTRUSION_SIZE).abs() > SECTION_TOLERANCE
        {
            return Err(ShapeConstructionError::SectionMismatch {
                expected: Self::EXTRUSION_SIZE,
                actual_width: w,
                actual_height: h,
            });
        }
        for warning in &extrusion.diagnostics.warnings {
            warn!(kind = %kind, "{}", warning);
        }
        debug!(kind = %kind, length, handle = extrusion.handle.id(), "template built");
        Ok(MemberTemplate::new(kind, extrusion))
    }

    fn front_frame(
        &self,
        config: &FrameConfig,
        vertical: &MemberTemplate,
        horizontal: &MemberTemplate,
    ) -> SubAssembly {
        let face = FrameFace::Front;
        let rail = self.conventions.horizontal_rotation;
        let placements = [
            ("left", vertical, Placement::at(0.0, 0.0, 0.0)),
            (
                "right",
                vertical,
                Placement::at(config.width() - Self::EXTRUSION_SIZE, 0.0, 0.0),
            ),
            (
                "top",
                horizontal,
                Placement::at(0.0, 0.0, config.height()).rotated(rail),
            ),
            ("bottom", horizontal, Placement::at(0.0, 0.0, 0.0).rotated(rail)),
        ];

        let mut frame = SubAssembly::new(face.assembly_label());
        for (name, template, placement) in placements {
            let label = format!("{}{}", face.prefix(), name);
            debug!(label = %label, position = ?placement.position, "placing member");
            frame.push_member(template.instantiate(label, placement));
        }
        frame
    }

    fn place_bridges(
        &self,
        config: &FrameConfig,
        level: BridgeLevel,
        bridge: &MemberTemplate,
        root: &mut SubAssembly,
    ) {
        let y = config.depth() * self.conventions.bridge_anchor_depth_factor;
        let z = self.conventions.bridge_z(level, config.height());
        let positions = config.bridge_positions(level);
        let repeats = repeated_positions(positions);

        for (i, (&x, repeated)) in positions.iter().zip(repeats).enumerate() {
            let label = level.member_label(i + 1);
            if repeated {
                warn!(label = %label, x, "duplicate {} bridge position", level);
            }
            let placement = Placement::at(x, y, z).rotated(self.conventions.bridge_rotation);
            debug!(label = %label, position = ?placement.position, "placing member");
            root.push_member(bridge.instantiate(label, placement));
        }
    }
}

/// For each position, whether an equal position appears earlier in the list.
/// `-0.0` and `0.0` count as equal.
fn repeated_positions(positions: &[f64]) -> Vec<bool> {
    let mut seen = HashSet::new();
    positions
        .iter()
        .map(|&x| !seen.insert((x + 0.0).to_bits()))
        .collect()
}
