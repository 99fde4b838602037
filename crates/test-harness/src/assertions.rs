//! Rich assertion helpers with diagnostic output.
//!
//! Every failure includes expected vs actual plus enough of the assembly to
//! see what went wrong without a debugger.

use frame_engine::{AssemblyTree, BillOfMaterials};
use frame_types::{EulerAngles, Point3};
use profile_kernel::KernelSolidHandle;
use profile_ops::KernelBundle;

use crate::helpers::{fmt_xyz, HarnessError};
use crate::oracle::OracleVerdict;

/// Assert exact topology counts (V, E, F) for a solid.
pub fn assert_topology_eq(
    kb: &dyn KernelBundle,
    solid: &KernelSolidHandle,
    expected_v: usize,
    expected_e: usize,
    expected_f: usize,
    ctx: &str,
) -> Result<(), HarnessError> {
    let introspect = kb.as_introspect();
    let v = introspect.list_vertices(solid).len();
    let e = introspect.list_edges(solid).len();
    let f = introspect.list_faces(solid).len();

    if v == expected_v && e == expected_e && f == expected_f {
        Ok(())
    } else {
        Err(HarnessError::AssertionFailed {
            detail: format!(
                "[{}] expected V={} E={} F={}, got V={} E={} F={}",
                ctx, expected_v, expected_e, expected_f, v, e, f,
            ),
        })
    }
}

/// Assert a member sits at `expected` within `tol`.
pub fn assert_member_at(
    tree: &AssemblyTree,
    label: &str,
    expected: Point3,
    tol: f64,
    ctx: &str,
) -> Result<(), HarnessError> {
    let member = tree
        .find_member(label)
        .ok_or_else(|| HarnessError::MemberNotFound {
            label: label.to_string(),
        })?;
    let p = member.placement.position;
    if p.distance_to(&expected) <= tol {
        Ok(())
    } else {
        Err(HarnessError::AssertionFailed {
            detail: format!(
                "[{}] {} expected at {}, got {} (tol={})",
                ctx,
                label,
                fmt_xyz(expected.x, expected.y, expected.z),
                fmt_xyz(p.x, p.y, p.z),
                tol,
            ),
        })
    }
}

/// Assert a member's rotation exactly.
pub fn assert_member_rotation(
    tree: &AssemblyTree,
    label: &str,
    expected: EulerAngles,
    ctx: &str,
) -> Result<(), HarnessError> {
    let member = tree
        .find_member(label)
        .ok_or_else(|| HarnessError::MemberNotFound {
            label: label.to_string(),
        })?;
    if member.placement.orientation == expected {
        Ok(())
    } else {
        Err(HarnessError::AssertionFailed {
            detail: format!(
                "[{}] {} expected rotation {:?}, got {:?}",
                ctx, label, expected, member.placement.orientation,
            ),
        })
    }
}

/// Assert the root's children, in order.
pub fn assert_child_labels(
    tree: &AssemblyTree,
    expected: &[&str],
    ctx: &str,
) -> Result<(), HarnessError> {
    let actual = tree.child_labels();
    if actual == expected {
        Ok(())
    } else {
        Err(HarnessError::AssertionFailed {
            detail: format!(
                "[{}] expected children {:?}, got {:?}\n{}",
                ctx,
                expected,
                actual,
                tree.show_topology(),
            ),
        })
    }
}

/// Assert the bill's total length within `tol` millimeters.
pub fn assert_total_length(
    bom: &BillOfMaterials,
    expected_mm: f64,
    tol: f64,
    ctx: &str,
) -> Result<(), HarnessError> {
    if (bom.total_length_mm - expected_mm).abs() <= tol {
        Ok(())
    } else {
        Err(HarnessError::AssertionFailed {
            detail: format!(
                "[{}] expected total {:.3}mm, got {:.3}mm\n{}",
                ctx,
                expected_mm,
                bom.total_length_mm,
                bom.report(),
            ),
        })
    }
}

/// Assert the assembly's overall bounds within `tol`.
pub fn assert_world_bounds(
    tree: &AssemblyTree,
    expected_min: Point3,
    expected_max: Point3,
    tol: f64,
    ctx: &str,
) -> Result<(), HarnessError> {
    let b = tree.world_bounds();
    let actual = [b.min.to_array(), b.max.to_array()];
    let expected = [expected_min.to_array(), expected_max.to_array()];

    for (corner, name) in [(0, "min"), (1, "max")] {
        for i in 0..3 {
            if (actual[corner][i] - expected[corner][i]).abs() > tol {
                return Err(HarnessError::AssertionFailed {
                    detail: format!(
                        "[{}] world bounds {}[{}]: expected {:.3}, got {:.3} (tol={})",
                        ctx, name, i, expected[corner][i], actual[corner][i], tol,
                    ),
                });
            }
        }
    }
    Ok(())
}

/// Turn a batch of oracle verdicts into a single error naming every failure.
pub fn assert_all_pass(verdicts: &[OracleVerdict], ctx: &str) -> Result<(), HarnessError> {
    let failures: Vec<String> = verdicts
        .iter()
        .filter(|v| !v.passed)
        .map(|v| format!("{}: {}", v.oracle_name, v.detail))
        .collect();
    if failures.is_empty() {
        Ok(())
    } else {
        Err(HarnessError::OracleFailure {
            oracle: ctx.to_string(),
            detail: failures.join("; "),
        })
    }
}
