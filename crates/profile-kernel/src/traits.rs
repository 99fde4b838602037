use crate::types::*;

/// Shape construction operations the frame needs from a geometry kernel.
/// Implemented by TruckKernel (wraps real truck) and MockKernel (deterministic test double).
pub trait Kernel {
    /// Create a planar face from a closed section outline lying on `plane`.
    fn make_face_from_section(
        &mut self,
        section: &SectionProfile,
        plane: &PlaneFrame,
    ) -> Result<KernelId, KernelError>;

    /// Extrude a planar face along a direction vector. Consumes the face.
    fn extrude_face(
        &mut self,
        face: KernelId,
        direction: [f64; 3],
        depth: f64,
    ) -> Result<KernelSolidHandle, KernelError>;
}

/// Topology introspection trait. Provides read-only queries on kernel geometry.
pub trait KernelIntrospect {
    /// List all faces of a solid.
    fn list_faces(&self, solid: &KernelSolidHandle) -> Vec<KernelId>;

    /// List all edges of a solid.
    fn list_edges(&self, solid: &KernelSolidHandle) -> Vec<KernelId>;

    /// List all vertices of a solid.
    fn list_vertices(&self, solid: &KernelSolidHandle) -> Vec<KernelId>;

    /// Axis-aligned bounds of a solid in its own coordinates.
    fn bounding_box(&self, solid: &KernelSolidHandle) -> Option<BoundingBox>;

    /// Number of solids alive in this kernel session.
    fn solid_count(&self) -> usize;
}
