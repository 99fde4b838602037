use frame_types::SectionProfile;
use profile_kernel::PlaneFrame;
use tracing::{info, instrument};

use crate::kernel_ext::KernelBundle;
use crate::types::{Diagnostics, Extrusion, ShapeConstructionError};

/// Length mismatch tolerated between the request and the kernel's solid.
const LENGTH_TOLERANCE: f64 = 1e-6;

/// Execute an extrusion of `section` to `length` along local +Z.
///
/// Builds a planar face on the XY plane, sweeps it, then reads the solid's
/// bounds back from the kernel so callers get the geometry the kernel
/// actually produced rather than the one requested.
#[instrument(skip(kb, section), fields(points = section.len()))]
pub fn execute_extrusion(
    kb: &mut dyn KernelBundle,
    section: &SectionProfile,
    length: f64,
) -> Result<Extrusion, ShapeConstructionError> {
    if !length.is_finite() || length <= 0.0 {
        return Err(ShapeConstructionError::InvalidLength { length });
    }

    let face = kb.make_face_from_section(section, &PlaneFrame::XY)?;
    let handle = kb.extrude_face(face, [0.0, 0.0, 1.0], length)?;

    let bounds = kb
        .as_introspect()
        .bounding_box(&handle)
        .ok_or_else(|| ShapeConstructionError::NoSolid {
            reason: format!("solid {} has no vertices", handle.id()),
        })?;

    let mut diagnostics = Diagnostics::default();
    let measured = bounds.size()[2];
    if (measured - length).abs() > LENGTH_TOLERANCE {
        return Err(ShapeConstructionError::NoSolid {
            reason: format!(
                "solid {} is {:.6}mm long, requested {:.6}mm",
                handle.id(),
                measured,
                length
            ),
        });
    }
    if bounds.min.z.abs() > LENGTH_TOLERANCE {
        diagnostics.warnings.push(format!(
            "solid {} starts at z={:.6} instead of the section plane",
            handle.id(),
            bounds.min.z
        ));
    }

    info!(handle = handle.id(), length, "extrusion built");

    Ok(Extrusion {
        handle,
        length,
        bounds,
        diagnostics,
    })
}
