//! Verification oracles: pure functions returning pass/fail verdicts.
//!
//! Each oracle returns an `OracleVerdict` with diagnostic detail, not panics.
//! This lets a test collect all failures in one pass.

use std::collections::HashSet;

use frame_engine::{
    AssemblyTree, BillOfMaterials, FrameAssembler, FrameConfig, Member, ROOT_LABEL,
};
use frame_types::{BoundingBox, BridgeLevel, FrameFace, MemberKind};
use profile_kernel::{KernelIntrospect, KernelSolidHandle};

/// Positional tolerance in millimeters.
const TOL: f64 = 1e-6;

/// The result of a single oracle check.
#[derive(Debug, Clone)]
pub struct OracleVerdict {
    pub oracle_name: String,
    pub passed: bool,
    pub detail: String,
    pub value: Option<f64>,
}

impl OracleVerdict {
    fn pass(name: &str, detail: String) -> Self {
        Self {
            oracle_name: name.to_string(),
            passed: true,
            detail,
            value: None,
        }
    }

    fn pass_val(name: &str, detail: String, value: f64) -> Self {
        Self {
            oracle_name: name.to_string(),
            passed: true,
            detail,
            value: Some(value),
        }
    }

    fn fail(name: &str, detail: String) -> Self {
        Self {
            oracle_name: name.to_string(),
            passed: false,
            detail,
            value: None,
        }
    }

    fn fail_val(name: &str, detail: String, value: f64) -> Self {
        Self {
            oracle_name: name.to_string(),
            passed: false,
            detail,
            value: Some(value),
        }
    }
}

// ── Material Oracles ────────────────────────────────────────────────────────

/// The bill of materials total must equal the summed length of placed members.
pub fn check_material_cross_check(bom: &BillOfMaterials, tree: &AssemblyTree) -> OracleVerdict {
    let placed = tree.total_member_length();
    let diff = (bom.total_length_mm - placed).abs();
    if bom.total_length_mm == placed {
        OracleVerdict::pass_val(
            "material_cross_check",
            format!("bill {:.3}mm == placed {:.3}mm", bom.total_length_mm, placed),
            placed,
        )
    } else {
        OracleVerdict::fail_val(
            "material_cross_check",
            format!(
                "bill {:.3}mm != placed {:.3}mm (diff {:e})",
                bom.total_length_mm, placed, diff
            ),
            placed,
        )
    }
}

/// Per-kind counts in the bill must match the members in the tree.
pub fn check_member_counts(bom: &BillOfMaterials, tree: &AssemblyTree) -> OracleVerdict {
    let members = tree.members();
    let mut mismatches = Vec::new();
    for kind in MemberKind::ALL {
        let billed = bom.item(kind).map(|i| i.count).unwrap_or(0);
        let placed = members.iter().filter(|m| m.kind == kind).count();
        if billed != placed {
            mismatches.push(format!("{}: billed {}, placed {}", kind, billed, placed));
        }
    }
    if mismatches.is_empty() {
        OracleVerdict::pass_val(
            "member_counts",
            format!("{} members match the bill", members.len()),
            members.len() as f64,
        )
    } else {
        OracleVerdict::fail("member_counts", mismatches.join("; "))
    }
}

// ── Layout Oracles ──────────────────────────────────────────────────────────

/// Every back-frame member mirrors its front counterpart moved by `depth`
/// along Y, with the same rotation.
pub fn check_back_frame_offset(tree: &AssemblyTree, depth: f64) -> OracleVerdict {
    let name = "back_frame_offset";
    let (front, back) = match (
        tree.find_assembly(FrameFace::Front.assembly_label()),
        tree.find_assembly(FrameFace::Back.assembly_label()),
    ) {
        (Some(f), Some(b)) => (f.members(), b.members()),
        _ => return OracleVerdict::fail(name, "front or back frame missing".to_string()),
    };
    if front.len() != back.len() {
        return OracleVerdict::fail(
            name,
            format!("front has {} members, back has {}", front.len(), back.len()),
        );
    }

    for (f, b) in front.iter().zip(back.iter()) {
        let expected_label =
            f.label
                .replacen(FrameFace::Front.prefix(), FrameFace::Back.prefix(), 1);
        let fp = f.placement.position;
        let bp = b.placement.position;
        let offset_ok = (bp.x - fp.x).abs() <= TOL
            && (bp.y - fp.y - depth).abs() <= TOL
            && (bp.z - fp.z).abs() <= TOL;
        let same_rotation = b.placement.orientation == f.placement.orientation;
        if b.label != expected_label || !offset_ok || !same_rotation {
            return OracleVerdict::fail(
                name,
                format!(
                    "{} at {:?} does not mirror {} at {:?} (+{} in Y)",
                    b.label, bp, f.label, fp, depth
                ),
            );
        }
    }
    OracleVerdict::pass(
        name,
        format!("{} back members offset by {:.1} in Y", back.len(), depth),
    )
}

/// Labels are non-empty and unique across the tree.
pub fn check_labels(tree: &AssemblyTree) -> OracleVerdict {
    let mut seen = HashSet::new();
    for m in tree.members() {
        if m.label.is_empty() {
            return OracleVerdict::fail("labels", "member with empty label".to_string());
        }
        if !seen.insert(m.label.as_str()) {
            return OracleVerdict::fail("labels", format!("duplicate label {}", m.label));
        }
    }
    OracleVerdict::pass("labels", format!("{} unique labels", seen.len()))
}

/// Root children appear as front frame, back frame, bottom bridges, top
/// bridges, each bridge group in list order.
pub fn check_composition_order(tree: &AssemblyTree, config: &FrameConfig) -> OracleVerdict {
    let mut expected = vec![
        FrameFace::Front.assembly_label().to_string(),
        FrameFace::Back.assembly_label().to_string(),
    ];
    for level in [BridgeLevel::Bottom, BridgeLevel::Top] {
        for i in 1..=config.bridge_positions(level).len() {
            expected.push(level.member_label(i));
        }
    }
    let actual = tree.child_labels();
    if tree.label() == ROOT_LABEL && actual == expected {
        OracleVerdict::pass(
            "composition_order",
            format!("{} children in order", actual.len()),
        )
    } else {
        OracleVerdict::fail(
            "composition_order",
            format!(
                "root {:?} children {:?}, expected {} children {:?}",
                tree.label(),
                actual,
                ROOT_LABEL,
                expected
            ),
        )
    }
}

/// Every placement is finite.
pub fn check_placements_finite(tree: &AssemblyTree) -> OracleVerdict {
    let bad: Vec<&str> = tree
        .members()
        .into_iter()
        .filter(|m| !m.placement.is_finite())
        .map(|m| m.label.as_str())
        .collect();
    if bad.is_empty() {
        OracleVerdict::pass("placements_finite", "all placements finite".to_string())
    } else {
        OracleVerdict::fail("placements_finite", format!("non-finite: {:?}", bad))
    }
}

/// Every bridge must touch the inner side of the front face and the inner
/// side of the back face.
pub fn check_bridges_between_faces(tree: &AssemblyTree) -> OracleVerdict {
    let face_bounds = |face: FrameFace| {
        tree.find_assembly(face.assembly_label()).map(|a| {
            a.members()
                .into_iter()
                .fold(BoundingBox::empty(), |acc, m| acc.union(&m.world_bounds()))
        })
    };
    let (front, back) = match (face_bounds(FrameFace::Front), face_bounds(FrameFace::Back)) {
        (Some(f), Some(b)) if !f.is_empty() && !b.is_empty() => (f, b),
        _ => return OracleVerdict::fail("bridges_between_faces", "missing frame face".to_string()),
    };

    for m in tree.members().into_iter().filter(|m| m.kind == MemberKind::Bridge) {
        let b = m.world_bounds();
        let flush = (b.min.y - front.max.y).abs() <= TOL && (b.max.y - back.min.y).abs() <= TOL;
        if !flush {
            return OracleVerdict::fail_val(
                "bridges_between_faces",
                format!(
                    "{} spans y {:.3}..{:.3}, faces end at {:.3} and start at {:.3}",
                    m.label, b.min.y, b.max.y, front.max.y, back.min.y
                ),
                b.max.y,
            );
        }
    }
    OracleVerdict::pass(
        "bridges_between_faces",
        format!("bridges span y {:.1}..{:.1}", front.max.y, back.min.y),
    )
}

/// A member's local section must be the nominal square.
pub fn check_section_envelope(member: &Member, size: f64) -> OracleVerdict {
    let s = member.local_bounds.size();
    let fits = (s[0] - size).abs() <= TOL
        && (s[1] - size).abs() <= TOL
        && (s[2] - member.length).abs() <= TOL;
    if fits {
        OracleVerdict::pass(
            "section_envelope",
            format!("{}: {:.3} x {:.3} x {:.3}", member.label, s[0], s[1], s[2]),
        )
    } else {
        OracleVerdict::fail(
            "section_envelope",
            format!(
                "{}: {:.3} x {:.3} x {:.3}, expected {:.3} x {:.3} x {:.3}",
                member.label, s[0], s[1], s[2], size, size, member.length
            ),
        )
    }
}

// ── Topology Oracles ────────────────────────────────────────────────────────

/// Check Euler's formula: V - E + F = 2 (for genus-0 solids).
pub fn check_euler_formula(
    introspect: &dyn KernelIntrospect,
    solid: &KernelSolidHandle,
) -> OracleVerdict {
    let v = introspect.list_vertices(solid).len() as i64;
    let e = introspect.list_edges(solid).len() as i64;
    let f = introspect.list_faces(solid).len() as i64;
    let euler = v - e + f;

    if euler == 2 {
        OracleVerdict::pass_val(
            "euler_formula",
            format!("V({}) - E({}) + F({}) = 2", v, e, f),
            euler as f64,
        )
    } else {
        OracleVerdict::fail_val(
            "euler_formula",
            format!("V({}) - E({}) + F({}) = {} (expected 2)", v, e, f, euler),
            euler as f64,
        )
    }
}

// ── Batch ───────────────────────────────────────────────────────────────────

/// Run every frame-level oracle.
pub fn run_frame_checks(
    config: &FrameConfig,
    bom: &BillOfMaterials,
    tree: &AssemblyTree,
) -> Vec<OracleVerdict> {
    let mut out = vec![
        check_material_cross_check(bom, tree),
        check_member_counts(bom, tree),
        check_back_frame_offset(tree, config.depth()),
        check_labels(tree),
        check_composition_order(tree, config),
        check_placements_finite(tree),
        check_bridges_between_faces(tree),
    ];
    for m in tree.members() {
        out.push(check_section_envelope(m, FrameAssembler::EXTRUSION_SIZE));
    }
    out
}

/// Run topology oracles on each distinct solid in the tree.
pub fn run_solid_checks(
    introspect: &dyn KernelIntrospect,
    tree: &AssemblyTree,
) -> Vec<OracleVerdict> {
    let mut seen = HashSet::new();
    tree.members()
        .into_iter()
        .filter(|m| seen.insert(m.shape.id()))
        .map(|m| check_euler_formula(introspect, &m.shape))
        .collect()
}
