//! Bill of materials: how much 2020 extrusion a frame needs.

use std::fmt;

use frame_types::MemberKind;
use serde::Serialize;

use crate::assembler::FrameAssembler;
use crate::config::FrameConfig;

/// Members of one kind, all cut to the same length.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineItem {
    pub kind: MemberKind,
    pub count: usize,
    /// Cut length of each piece, in millimeters.
    pub length: f64,
}

impl LineItem {
    pub fn subtotal(&self) -> f64 {
        self.count as f64 * self.length
    }
}

/// Counts, per-kind lengths and totals for one frame configuration.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BillOfMaterials {
    /// One line per [`MemberKind`], in [`MemberKind::ALL`] order.
    pub items: Vec<LineItem>,
    pub total_length_mm: f64,
}

impl BillOfMaterials {
    pub fn item(&self, kind: MemberKind) -> Option<&LineItem> {
        self.items.iter().find(|i| i.kind == kind)
    }

    pub fn total_members(&self) -> usize {
        self.items.iter().map(|i| i.count).sum()
    }

    pub fn total_length_m(&self) -> f64 {
        self.total_length_mm / 1000.0
    }

    /// Human-readable material summary.
    pub fn report(&self) -> String {
        let mut out = String::new();
        out.push_str("=== Material Report ===\n");
        out.push_str("Profile: 2020 aluminum extrusion\n\n");
        for item in &self.items {
            out.push_str(&format!(
                "  {:<10} {:>2} x {:>8.1} mm = {:>9.1} mm\n",
                item.kind.name(),
                item.count,
                item.length,
                item.subtotal()
            ));
        }
        out.push_str(&format!("\nMembers: {}\n", self.total_members()));
        out.push_str(&format!(
            "Total length: {:.1} mm ({:.3} m)\n",
            self.total_length_mm,
            self.total_length_m()
        ));
        out
    }
}

impl fmt::Display for BillOfMaterials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.report())
    }
}

/// Derives material quantities from a configuration. Pure; no geometry.
pub struct MaterialCalculator;

impl MaterialCalculator {
    /// Members of each kind per frame: two faces, two of each per face.
    pub const VERTICAL_COUNT: usize = 4;
    pub const HORIZONTAL_COUNT: usize = 4;

    pub fn vertical_length(config: &FrameConfig) -> f64 {
        config.height() - FrameAssembler::EXTRUSION_SIZE
    }

    pub fn horizontal_length(config: &FrameConfig) -> f64 {
        config.width()
    }

    pub fn bridge_length(config: &FrameConfig) -> f64 {
        config.depth() - FrameAssembler::EXTRUSION_SIZE
    }

    /// Every cut length, one entry per member, in the order the assembler
    /// places them: each face as left, right, top, bottom, then bottom
    /// bridges and top bridges.
    ///
    /// Summing this list in order gives the same total as summing the
    /// placed members of the assembled tree.
    pub fn cut_list(config: &FrameConfig) -> Vec<f64> {
        let vertical = Self::vertical_length(config);
        let horizontal = Self::horizontal_length(config);
        let face = [vertical, vertical, horizontal, horizontal];
        let mut cuts = Vec::with_capacity(2 * face.len() + config.bridge_count());
        cuts.extend_from_slice(&face);
        cuts.extend_from_slice(&face);
        cuts.extend(std::iter::repeat(Self::bridge_length(config)).take(config.bridge_count()));
        cuts
    }

    pub fn calculate(config: &FrameConfig) -> BillOfMaterials {
        let items = vec![
            LineItem {
                kind: MemberKind::Vertical,
                count: Self::VERTICAL_COUNT,
                length: Self::vertical_length(config),
            },
            LineItem {
                kind: MemberKind::Horizontal,
                count: Self::HORIZONTAL_COUNT,
                length: Self::horizontal_length(config),
            },
            LineItem {
                kind: MemberKind::Bridge,
                count: config.bridge_count(),
                length: Self::bridge_length(config),
            },
        ];
        let total_length_mm = Self::cut_list(config).into_iter().sum();
        BillOfMaterials {
            items,
            total_length_mm,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn two_bottom_bridges() {
        let config = FrameConfig::new(400.0, 200.0, 300.0, vec![50.0, 200.0], vec![]).unwrap();
        let bom = MaterialCalculator::calculate(&config);

        assert_eq!(bom.item(MemberKind::Vertical).unwrap().length, 180.0);
        assert_eq!(bom.item(MemberKind::Horizontal).unwrap().length, 400.0);
        let bridges = bom.item(MemberKind::Bridge).unwrap();
        assert_eq!(bridges.count, 2);
        assert_eq!(bridges.length, 280.0);
        assert_eq!(bom.total_members(), 10);
        assert_eq!(bom.total_length_mm, 2880.0);
        assert_eq!(bom.total_length_m(), 2.88);
    }

    #[test]
    fn no_bridges_keeps_zero_line() {
        let config = FrameConfig::builder().build().unwrap();
        let bom = MaterialCalculator::calculate(&config);
        assert_eq!(bom.items.len(), 3);
        assert_eq!(bom.item(MemberKind::Bridge).unwrap().count, 0);
        // 4 * 30 + 4 * 100
        assert_eq!(bom.total_length_mm, 520.0);
    }

    #[test]
    fn cut_list_matches_line_items() {
        let config = FrameConfig::new(400.0, 200.0, 300.0, vec![50.0], vec![100.0]).unwrap();
        let cuts = MaterialCalculator::cut_list(&config);
        assert_eq!(
            cuts,
            vec![180.0, 180.0, 400.0, 400.0, 180.0, 180.0, 400.0, 400.0, 280.0, 280.0]
        );
        let bom = MaterialCalculator::calculate(&config);
        assert_eq!(cuts.len(), bom.total_members());
    }

    #[test]
    fn report_lists_totals() {
        let config = FrameConfig::new(400.0, 200.0, 300.0, vec![50.0], vec![100.0]).unwrap();
        let bom = MaterialCalculator::calculate(&config);
        let text = bom.to_string();
        assert!(text.contains("=== Material Report ==="));
        assert!(text.contains("Members: 10"));
        assert!(text.contains("Total length: 2880.0 mm (2.880 m)"), "{}", text);
        assert!(text.contains("bridge"));
    }
}
