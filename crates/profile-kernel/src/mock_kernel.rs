//! MockKernel: deterministic test double implementing Kernel + KernelIntrospect.
//!
//! Extrusions become exact prisms over the section outline, with predictable
//! entity counts (2n vertices, 3n edges, n + 2 faces for an n-gon) and exact
//! bounding boxes. Used by profile-ops and frame-engine for unit testing.

use crate::traits::{Kernel, KernelIntrospect};
use crate::types::*;
use std::collections::HashMap;

/// A mock vertex with known position.
#[derive(Debug, Clone)]
struct MockVertex {
    id: KernelId,
    position: [f64; 3],
}

/// A mock edge with known endpoints.
#[derive(Debug, Clone)]
struct MockEdge {
    id: KernelId,
    start: KernelId,
    end: KernelId,
}

/// A mock face, identified by its bounding edges.
#[derive(Debug, Clone)]
struct MockFace {
    id: KernelId,
    edges: Vec<KernelId>,
}

/// A planar face awaiting extrusion.
#[derive(Debug, Clone)]
struct PendingFace {
    outline: Vec<[f64; 3]>,
}

/// A synthetic prism solid with deterministic topology.
#[derive(Debug, Clone)]
struct MockSolid {
    vertices: Vec<MockVertex>,
    edges: Vec<MockEdge>,
    faces: Vec<MockFace>,
}

/// Deterministic test double for the geometry kernel.
/// Implements both Kernel and KernelIntrospect.
pub struct MockKernel {
    next_id: u64,
    next_handle: u64,
    solids: HashMap<u64, MockSolid>,
    /// Section faces waiting to be swept.
    pending_faces: HashMap<u64, PendingFace>,
    /// Number of extrusions allowed before every further one fails.
    extrude_budget: Option<usize>,
}

impl MockKernel {
    pub fn new() -> Self {
        Self {
            next_id: 1,
            next_handle: 1,
            solids: HashMap::new(),
            pending_faces: HashMap::new(),
            extrude_budget: None,
        }
    }

    /// A kernel whose extrusions start failing after `successes` have
    /// been produced. Used to exercise error propagation.
    pub fn failing_after(successes: usize) -> Self {
        Self {
            extrude_budget: Some(successes),
            ..Self::new()
        }
    }

    fn alloc_id(&mut self) -> KernelId {
        let id = KernelId(self.next_id);
        self.next_id += 1;
        id
    }

    fn alloc_handle(&mut self) -> KernelSolidHandle {
        let h = KernelSolidHandle(self.next_handle);
        self.next_handle += 1;
        h
    }

    /// Sweep an outline into a prism: bottom ring, top ring, then side edges.
    fn make_prism(&mut self, outline: &[[f64; 3]], sweep: [f64; 3]) -> MockSolid {
        let n = outline.len();

        let positions: Vec<[f64; 3]> = outline
            .iter()
            .copied()
            .chain(
                outline
                    .iter()
                    .map(|p| [p[0] + sweep[0], p[1] + sweep[1], p[2] + sweep[2]]),
            )
            .collect();

        let vertices: Vec<MockVertex> = positions
            .into_iter()
            .map(|position| MockVertex {
                id: self.alloc_id(),
                position,
            })
            .collect();

        // Edge layout: [0, n) bottom ring, [n, 2n) top ring, [2n, 3n) sides.
        let mut edge_pairs = Vec::with_capacity(3 * n);
        for i in 0..n {
            edge_pairs.push((i, (i + 1) % n));
        }
        for i in 0..n {
            edge_pairs.push((n + i, n + (i + 1) % n));
        }
        for i in 0..n {
            edge_pairs.push((i, n + i));
        }

        let edges: Vec<MockEdge> = edge_pairs
            .iter()
            .map(|&(si, ei)| MockEdge {
                id: self.alloc_id(),
                start: vertices[si].id,
                end: vertices[ei].id,
            })
            .collect();

        let mut face_edges: Vec<Vec<KernelId>> = Vec::with_capacity(n + 2);
        face_edges.push((0..n).map(|i| edges[i].id).collect());
        face_edges.push((n..2 * n).map(|i| edges[i].id).collect());
        for i in 0..n {
            let j = (i + 1) % n;
            face_edges.push(vec![
                edges[i].id,
                edges[2 * n + j].id,
                edges[n + i].id,
                edges[2 * n + i].id,
            ]);
        }

        let faces: Vec<MockFace> = face_edges
            .into_iter()
            .map(|edges| MockFace {
                id: self.alloc_id(),
                edges,
            })
            .collect();

        MockSolid {
            vertices,
            edges,
            faces,
        }
    }
}

impl Default for MockKernel {
    fn default() -> Self {
        Self::new()
    }
}

impl Kernel for MockKernel {
    fn make_face_from_section(
        &mut self,
        section: &SectionProfile,
        plane: &PlaneFrame,
    ) -> Result<KernelId, KernelError> {
        check_section(section)?;

        let outline = section
            .points
            .iter()
            .map(|&(u, v)| plane.lift(u, v))
            .collect();

        let face_id = self.alloc_id();
        self.pending_faces
            .insert(face_id.0, PendingFace { outline });
        Ok(face_id)
    }

    fn extrude_face(
        &mut self,
        face: KernelId,
        direction: [f64; 3],
        depth: f64,
    ) -> Result<KernelSolidHandle, KernelError> {
        let mock_face = self
            .pending_faces
            .remove(&face.0)
            .ok_or(KernelError::EntityNotFound { id: face })?;

        if let Some(budget) = self.extrude_budget.as_mut() {
            if *budget == 0 {
                return Err(KernelError::ExtrudeFailed {
                    reason: "mock kernel extrusion budget exhausted".to_string(),
                });
            }
            *budget -= 1;
        }

        if !depth.is_finite() || depth <= 0.0 {
            return Err(KernelError::ExtrudeFailed {
                reason: format!("extrude depth must be positive, got {}", depth),
            });
        }
        let dir = normalize(direction).ok_or_else(|| KernelError::ExtrudeFailed {
            reason: "extrude direction has zero length".to_string(),
        })?;
        let sweep = [dir[0] * depth, dir[1] * depth, dir[2] * depth];

        let solid = self.make_prism(&mock_face.outline, sweep);
        let handle = self.alloc_handle();
        self.solids.insert(handle.id(), solid);
        tracing::debug!(handle = handle.id(), depth, "mock extrusion created");
        Ok(handle)
    }
}

impl KernelIntrospect for MockKernel {
    fn list_faces(&self, solid: &KernelSolidHandle) -> Vec<KernelId> {
        self.solids
            .get(&solid.id())
            .map(|s| s.faces.iter().map(|f| f.id).collect())
            .unwrap_or_default()
    }

    fn list_edges(&self, solid: &KernelSolidHandle) -> Vec<KernelId> {
        self.solids
            .get(&solid.id())
            .map(|s| s.edges.iter().map(|e| e.id).collect())
            .unwrap_or_default()
    }

    fn list_vertices(&self, solid: &KernelSolidHandle) -> Vec<KernelId> {
        self.solids
            .get(&solid.id())
            .map(|s| s.vertices.iter().map(|v| v.id).collect())
            .unwrap_or_default()
    }

    fn bounding_box(&self, solid: &KernelSolidHandle) -> Option<BoundingBox> {
        let s = self.solids.get(&solid.id())?;
        let points: Vec<Point3> = s
            .vertices
            .iter()
            .map(|v| Point3::from_array(v.position))
            .collect();
        let bb = BoundingBox::from_points(&points);
        (!bb.is_empty()).then_some(bb)
    }

    fn solid_count(&self) -> usize {
        self.solids.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extrude_square(kernel: &mut MockKernel, size: f64, depth: f64) -> KernelSolidHandle {
        let face = kernel
            .make_face_from_section(&SectionProfile::square(size), &PlaneFrame::XY)
            .unwrap();
        kernel.extrude_face(face, [0.0, 0.0, 1.0], depth).unwrap()
    }

    #[test]
    fn square_prism_has_box_topology() {
        let mut kernel = MockKernel::new();
        let handle = extrude_square(&mut kernel, 20.0, 100.0);

        assert_eq!(kernel.list_vertices(&handle).len(), 8);
        assert_eq!(kernel.list_edges(&handle).len(), 12);
        assert_eq!(kernel.list_faces(&handle).len(), 6);
    }

    #[test]
    fn prism_faces_close_every_edge() {
        let mut kernel = MockKernel::new();
        let face = kernel
            .make_face_from_section(
                &SectionProfile::rounded_square(20.0, 1.5, 3),
                &PlaneFrame::XY,
            )
            .unwrap();
        let handle = kernel.extrude_face(face, [0.0, 0.0, 1.0], 10.0).unwrap();
        let solid = &kernel.solids[&handle.id()];

        for edge in &solid.edges {
            let owners = solid
                .faces
                .iter()
                .filter(|f| f.edges.contains(&edge.id))
                .count();
            assert_eq!(owners, 2, "every prism edge borders exactly two faces");
        }
        let v = solid.vertices.len() as i64;
        let e = solid.edges.len() as i64;
        let f = solid.faces.len() as i64;
        assert_eq!(v - e + f, 2);
    }

    #[test]
    fn bounding_box_spans_section_and_depth() {
        let mut kernel = MockKernel::new();
        let handle = extrude_square(&mut kernel, 20.0, 180.0);
        let bb = kernel.bounding_box(&handle).unwrap();
        assert_eq!(bb.min, Point3::new(0.0, 0.0, 0.0));
        assert_eq!(bb.max, Point3::new(20.0, 20.0, 180.0));
    }

    #[test]
    fn face_is_consumed_by_extrude() {
        let mut kernel = MockKernel::new();
        let face = kernel
            .make_face_from_section(&SectionProfile::square(20.0), &PlaneFrame::XY)
            .unwrap();
        kernel.extrude_face(face, [0.0, 0.0, 1.0], 5.0).unwrap();
        let again = kernel.extrude_face(face, [0.0, 0.0, 1.0], 5.0);
        assert!(matches!(again, Err(KernelError::EntityNotFound { .. })));
    }

    #[test]
    fn non_positive_depth_is_rejected() {
        let mut kernel = MockKernel::new();
        let face = kernel
            .make_face_from_section(&SectionProfile::square(20.0), &PlaneFrame::XY)
            .unwrap();
        let result = kernel.extrude_face(face, [0.0, 0.0, 1.0], 0.0);
        assert!(matches!(result, Err(KernelError::ExtrudeFailed { .. })));
    }

    #[test]
    fn failing_after_budget() {
        let mut kernel = MockKernel::failing_after(1);
        extrude_square(&mut kernel, 20.0, 10.0);
        let face = kernel
            .make_face_from_section(&SectionProfile::square(20.0), &PlaneFrame::XY)
            .unwrap();
        let result = kernel.extrude_face(face, [0.0, 0.0, 1.0], 10.0);
        assert!(matches!(result, Err(KernelError::ExtrudeFailed { .. })));
        assert_eq!(kernel.solid_count(), 1);
    }

    #[test]
    fn degenerate_section_is_rejected() {
        let mut kernel = MockKernel::new();
        let result = kernel.make_face_from_section(
            &SectionProfile::new(vec![(0.0, 0.0), (1.0, 1.0)]),
            &PlaneFrame::XY,
        );
        assert!(matches!(result, Err(KernelError::ProfileInvalid { .. })));
    }
}
