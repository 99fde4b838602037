//! TruckKernel: B-rep backend built on the truck modeling crates.

use std::collections::HashMap;

use truck_modeling::builder;
use truck_modeling::geometry::{Curve, Line};
use truck_modeling::topology::{Edge, Face, Solid, Vertex, Wire};
use truck_modeling::{InnerSpace, Point3 as TruckPoint3, Vector3};

use crate::traits::Kernel;
use crate::types::*;

/// Prism solids swept from planar section faces with truck.
pub struct TruckKernel {
    next_id: u64,
    solids: HashMap<u64, Solid>,
    /// Section faces waiting to be swept; sweeping consumes them.
    pending_faces: HashMap<u64, Face>,
}

impl TruckKernel {
    pub fn new() -> Self {
        Self {
            next_id: 1,
            solids: HashMap::new(),
            pending_faces: HashMap::new(),
        }
    }

    fn next(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub(crate) fn get_solid(&self, handle: &KernelSolidHandle) -> Option<&Solid> {
        self.solids.get(&handle.id())
    }

    pub(crate) fn solids_len(&self) -> usize {
        self.solids.len()
    }
}

impl Default for TruckKernel {
    fn default() -> Self {
        Self::new()
    }
}

/// Closed polyline wire through the section points lifted onto `plane`.
/// Consecutive edges share their vertex so the wire is connected.
fn section_wire(section: &SectionProfile, plane: &PlaneFrame) -> Wire {
    let points: Vec<TruckPoint3> = section
        .points
        .iter()
        .map(|&(u, v)| {
            let [x, y, z] = plane.lift(u, v);
            TruckPoint3::new(x, y, z)
        })
        .collect();
    let vertices: Vec<Vertex> = points.iter().map(|&p| builder::vertex(p)).collect();

    let n = points.len();
    (0..n)
        .map(|i| {
            let j = (i + 1) % n;
            Edge::new(
                &vertices[i],
                &vertices[j],
                Curve::Line(Line(points[i], points[j])),
            )
        })
        .collect()
}

impl Kernel for TruckKernel {
    fn make_face_from_section(
        &mut self,
        section: &SectionProfile,
        plane: &PlaneFrame,
    ) -> Result<KernelId, KernelError> {
        check_section(section)?;

        let wire = section_wire(section, plane);
        let face = builder::try_attach_plane(&[wire]).map_err(|e| KernelError::ProfileInvalid {
            reason: format!("section is not a planar region: {}", e),
        })?;

        let id = self.next();
        self.pending_faces.insert(id, face);
        Ok(KernelId(id))
    }

    fn extrude_face(
        &mut self,
        face: KernelId,
        direction: [f64; 3],
        depth: f64,
    ) -> Result<KernelSolidHandle, KernelError> {
        if !depth.is_finite() || depth <= 0.0 {
            return Err(KernelError::ExtrudeFailed {
                reason: format!("extrude depth must be positive, got {}", depth),
            });
        }
        let dir = Vector3::new(direction[0], direction[1], direction[2]);
        if dir.magnitude() < 1e-12 {
            return Err(KernelError::ExtrudeFailed {
                reason: "extrude direction has zero length".to_string(),
            });
        }
        let section_face = self
            .pending_faces
            .remove(&face.0)
            .ok_or(KernelError::EntityNotFound { id: face })?;

        let solid = builder::tsweep(&section_face, dir.normalize() * depth);
        let id = self.next();
        self.solids.insert(id, solid);
        tracing::debug!(handle = id, depth, "truck extrusion created");
        Ok(KernelSolidHandle(id))
    }
}
