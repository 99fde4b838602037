use serde::{Serialize, Serializer};

// Re-export shared types from frame-types
pub use frame_types::{BoundingBox, Point3, SectionProfile};

/// Opaque handle to a solid in the geometry kernel.
/// NEVER persisted. Valid only for the current kernel session.
///
/// Solids behind a handle are never modified after creation, so a handle may
/// be cloned freely into every member placed from the same template.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KernelSolidHandle(pub(crate) u64);

impl KernelSolidHandle {
    pub fn id(&self) -> u64 {
        self.0
    }
}

/// Session-local ids are exported as plain numbers for viewer handoff.
impl Serialize for KernelSolidHandle {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.0.serialize(serializer)
    }
}

/// Transient kernel-internal entity identifier.
/// Stable within a single kernel session but NOT across sessions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KernelId(pub u64);

/// Errors from kernel operations.
#[derive(Debug, Clone, thiserror::Error)]
pub enum KernelError {
    #[error("invalid section profile: {reason}")]
    ProfileInvalid { reason: String },

    #[error("extrude failed: {reason}")]
    ExtrudeFailed { reason: String },

    #[error("entity not found: {id:?}")]
    EntityNotFound { id: KernelId },
}

/// Orthonormal frame of a sketch plane: origin and in-plane X/Y axes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlaneFrame {
    pub origin: [f64; 3],
    pub x_axis: [f64; 3],
    pub y_axis: [f64; 3],
}

impl PlaneFrame {
    /// The XY plane through the origin, normal +Z.
    pub const XY: Self = Self {
        origin: [0.0, 0.0, 0.0],
        x_axis: [1.0, 0.0, 0.0],
        y_axis: [0.0, 1.0, 0.0],
    };

    /// Lift an in-plane (u, v) coordinate into 3D.
    pub fn lift(&self, u: f64, v: f64) -> [f64; 3] {
        [
            self.origin[0] + self.x_axis[0] * u + self.y_axis[0] * v,
            self.origin[1] + self.x_axis[1] * u + self.y_axis[1] * v,
            self.origin[2] + self.x_axis[2] * u + self.y_axis[2] * v,
        ]
    }
}

pub(crate) fn normalize(v: [f64; 3]) -> Option<[f64; 3]> {
    let len = (v[0] * v[0] + v[1] * v[1] + v[2] * v[2]).sqrt();
    if len < 1e-12 || !len.is_finite() {
        None
    } else {
        Some([v[0] / len, v[1] / len, v[2] / len])
    }
}

/// Reject outlines no kernel can turn into a planar face.
pub(crate) fn check_section(section: &SectionProfile) -> Result<(), KernelError> {
    if section.len() < 3 {
        return Err(KernelError::ProfileInvalid {
            reason: format!("outline has {} points, need at least 3", section.len()),
        });
    }
    if !section.is_finite() {
        return Err(KernelError::ProfileInvalid {
            reason: "outline has non-finite coordinates".to_string(),
        });
    }
    if section.signed_area().abs() < 1e-9 {
        return Err(KernelError::ProfileInvalid {
            reason: "outline encloses zero area".to_string(),
        });
    }
    Ok(())
}
