//! Structured text reports of a built frame.

use std::fmt;

use frame_engine::FrameConfig;

use crate::helpers::HarnessError;
use crate::oracle::OracleVerdict;
use crate::workflow::FrameBuilder;

/// A complete frame report with all sections.
pub struct FrameReport {
    pub dimensions: (f64, f64, f64),
    pub bottom_bridges: Vec<f64>,
    pub top_bridges: Vec<f64>,
    pub material: String,
    pub topology: String,
    pub bounding_box: Option<([f64; 3], [f64; 3])>,
    pub solids: Vec<SolidSummary>,
    pub oracle_results: Vec<OracleVerdict>,
}

/// Topology of one distinct solid and the members placed from it.
pub struct SolidSummary {
    pub shape_id: u64,
    pub members: Vec<String>,
    pub topology: (usize, usize, usize),
}

impl FrameReport {
    /// Format the report as text.
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        out.push_str("=== Frame Report ===\n\n");

        let (w, h, d) = self.dimensions;
        out.push_str(&format!("Dimensions: {:.1} x {:.1} x {:.1} mm (W x H x D)\n", w, h, d));
        out.push_str(&format!("Bottom bridges: {:?}\n", self.bottom_bridges));
        out.push_str(&format!("Top bridges: {:?}\n\n", self.top_bridges));

        out.push_str(&self.material);

        out.push_str("\nAssembly:\n");
        for line in self.topology.lines() {
            out.push_str(&format!("  {}\n", line));
        }

        if !self.solids.is_empty() {
            out.push_str(&format!("\nSolids ({}):\n", self.solids.len()));
            for s in &self.solids {
                let (v, e, f) = s.topology;
                let euler = v as i64 - e as i64 + f as i64;
                let status = if euler == 2 { "OK" } else { "WARN" };
                out.push_str(&format!(
                    "  #{}: V={} E={} F={} | Euler V-E+F={} ({}) | used by {}\n",
                    s.shape_id,
                    v,
                    e,
                    f,
                    euler,
                    status,
                    s.members.join(", "),
                ));
            }
        }

        if let Some((min, max)) = self.bounding_box {
            out.push_str(&format!(
                "\nBounding Box: ({:.1}, {:.1}, {:.1}) -> ({:.1}, {:.1}, {:.1})\n",
                min[0], min[1], min[2], max[0], max[1], max[2],
            ));
        }

        if !self.oracle_results.is_empty() {
            let failed = self.oracle_results.iter().filter(|v| !v.passed).count();
            out.push_str(&format!(
                "\nOracle Results ({} checks, {} failed):\n",
                self.oracle_results.len(),
                failed
            ));
            for v in &self.oracle_results {
                let status = if v.passed { "PASS" } else { "FAIL" };
                out.push_str(&format!("  [{}] {}: {}\n", status, v.oracle_name, v.detail));
            }
        }

        out
    }

    pub fn all_passed(&self) -> bool {
        self.oracle_results.iter().all(|v| v.passed)
    }
}

impl fmt::Display for FrameReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_text())
    }
}

impl FrameBuilder {
    /// Generate a complete report of the last build.
    pub fn report(&self) -> Result<FrameReport, HarnessError> {
        let config: &FrameConfig = self.config_ref()?;
        let tree = self.tree()?;
        let bom = self.bom()?;
        let introspect = self.kernel.as_introspect();

        let mut solids: Vec<SolidSummary> = Vec::new();
        for m in tree.members() {
            let id = m.shape.id();
            match solids.iter_mut().find(|s| s.shape_id == id) {
                Some(s) => s.members.push(m.label.clone()),
                None => solids.push(SolidSummary {
                    shape_id: id,
                    members: vec![m.label.clone()],
                    topology: (
                        introspect.list_vertices(&m.shape).len(),
                        introspect.list_edges(&m.shape).len(),
                        introspect.list_faces(&m.shape).len(),
                    ),
                }),
            }
        }

        let bounds = tree.world_bounds();
        let bounding_box = if bounds.is_empty() {
            None
        } else {
            Some((bounds.min.to_array(), bounds.max.to_array()))
        };

        let mut oracle_results = self.check_frame()?;
        oracle_results.extend(self.check_solids()?);

        Ok(FrameReport {
            dimensions: (config.width(), config.height(), config.depth()),
            bottom_bridges: config.bottom_bridge_positions().to_vec(),
            top_bridges: config.top_bridge_positions().to_vec(),
            material: bom.report(),
            topology: tree.show_topology(),
            bounding_box,
            solids,
            oracle_results,
        })
    }
}
