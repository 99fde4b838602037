use frame_types::BoundingBox;
use profile_kernel::KernelSolidHandle;

/// A solid extrusion produced by the profile provider.
///
/// The solid lies in its own local frame: the section fills `[0, 20]` on
/// local X and Y and the bar runs from `z = 0` to `z = length`.
#[derive(Debug, Clone)]
pub struct Extrusion {
    /// Handle to the solid in the kernel. Runtime-only, not persisted.
    pub handle: KernelSolidHandle,
    /// Requested length along local +Z.
    pub length: f64,
    /// Local bounds as reported by the kernel.
    pub bounds: BoundingBox,
    /// Non-fatal notes from building the solid.
    pub diagnostics: Diagnostics,
}

impl Extrusion {
    /// Cross-section extent `(x, y)` of the solid.
    pub fn section_extent(&self) -> (f64, f64) {
        let size = self.bounds.size();
        (size[0], size[1])
    }
}

/// Non-fatal diagnostics from an operation.
#[derive(Debug, Clone, Default)]
pub struct Diagnostics {
    /// Warning messages.
    pub warnings: Vec<String>,
}

/// Errors raised while producing an extruded member.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ShapeConstructionError {
    #[error("kernel error: {0}")]
    Kernel(#[from] profile_kernel::KernelError),

    #[error("invalid extrusion length {length}: must be positive and finite")]
    InvalidLength { length: f64 },

    #[error("degenerate section profile: {reason}")]
    DegenerateProfile { reason: String },

    #[error(
        "section is {actual_width:.3} x {actual_height:.3}mm, expected {expected:.3} x {expected:.3}mm"
    )]
    SectionMismatch {
        expected: f64,
        actual_width: f64,
        actual_height: f64,
    },

    #[error("kernel produced no usable solid: {reason}")]
    NoSolid { reason: String },
}
