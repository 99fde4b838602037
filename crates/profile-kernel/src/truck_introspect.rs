//! Read-only queries over solids held by the truck backend.

use std::collections::HashSet;
use std::hash::Hash;

use crate::traits::KernelIntrospect;
use crate::truck_kernel::TruckKernel;
use crate::types::*;

/// Ids are allotted in blocks per solid: `handle * ID_BLOCK + offset + i`.
const ID_BLOCK: u64 = 10_000;
const FACE_OFFSET: u64 = 0;
const EDGE_OFFSET: u64 = 1_000;
const VERTEX_OFFSET: u64 = 5_000;

/// Number distinct topology entities (truck iterators may revisit shared
/// edges and vertices) into kernel ids for one solid.
fn number_distinct<K, I>(handle: &KernelSolidHandle, offset: u64, keys: I) -> Vec<KernelId>
where
    K: Eq + Hash + Clone,
    I: IntoIterator<Item = K>,
{
    let mut seen = HashSet::new();
    keys.into_iter()
        .filter(|k| seen.insert(k.clone()))
        .enumerate()
        .map(|(i, _)| KernelId(handle.id() * ID_BLOCK + offset + i as u64))
        .collect()
}

impl KernelIntrospect for TruckKernel {
    fn list_faces(&self, solid: &KernelSolidHandle) -> Vec<KernelId> {
        let Some(s) = self.get_solid(solid) else {
            return Vec::new();
        };
        let faces = s
            .boundaries()
            .iter()
            .flat_map(|shell| shell.face_iter().map(|f| f.id()));
        number_distinct(solid, FACE_OFFSET, faces)
    }

    fn list_edges(&self, solid: &KernelSolidHandle) -> Vec<KernelId> {
        let Some(s) = self.get_solid(solid) else {
            return Vec::new();
        };
        let edges = s
            .boundaries()
            .iter()
            .flat_map(|shell| shell.edge_iter().map(|e| e.id()));
        number_distinct(solid, EDGE_OFFSET, edges)
    }

    fn list_vertices(&self, solid: &KernelSolidHandle) -> Vec<KernelId> {
        let Some(s) = self.get_solid(solid) else {
            return Vec::new();
        };
        let vertices = s
            .boundaries()
            .iter()
            .flat_map(|shell| shell.vertex_iter().map(|v| v.id()));
        number_distinct(solid, VERTEX_OFFSET, vertices)
    }

    fn bounding_box(&self, solid: &KernelSolidHandle) -> Option<BoundingBox> {
        let s = self.get_solid(solid)?;
        let points: Vec<Point3> = s
            .boundaries()
            .iter()
            .flat_map(|shell| shell.vertex_iter())
            .map(|v| {
                let p = v.point();
                Point3::new(p[0], p[1], p[2])
            })
            .collect();
        let bb = BoundingBox::from_points(&points);
        (!bb.is_empty()).then_some(bb)
    }

    fn solid_count(&self) -> usize {
        self.solids_len()
    }
}
