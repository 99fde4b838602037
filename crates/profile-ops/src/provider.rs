//! The profile provider: the single seam between frame assembly and the
//! geometry kernel.

use crate::extrude::execute_extrusion;
use crate::kernel_ext::KernelBundle;
use crate::section::{ProfileSource, PROFILE_2020_SIZE};
use crate::types::{Extrusion, ShapeConstructionError};

/// Produces fixed-section extruded bars of a requested length.
///
/// Implementations are free to synthesize the section from a sketch or to
/// take it from a reference outline; callers only rely on the returned
/// solid having the nominal section and the requested length along +Z.
pub trait ProfileProvider {
    /// Side length of the square section every extrusion carries.
    fn section_size(&self) -> f64;

    /// Build one extrusion of `length` millimeters.
    fn make_extrusion(&mut self, length: f64) -> Result<Extrusion, ShapeConstructionError>;
}

/// ProfileProvider backed by any kernel implementing [`KernelBundle`].
pub struct KernelProfileProvider<'k> {
    kb: &'k mut dyn KernelBundle,
    source: ProfileSource,
    section_size: f64,
}

impl<'k> KernelProfileProvider<'k> {
    /// A 2020 provider using the stock filleted sketch.
    pub fn new(kb: &'k mut dyn KernelBundle) -> Self {
        Self::with_source(kb, ProfileSource::default())
    }

    pub fn with_source(kb: &'k mut dyn KernelBundle, source: ProfileSource) -> Self {
        Self {
            kb,
            source,
            section_size: PROFILE_2020_SIZE,
        }
    }

    pub fn source(&self) -> &ProfileSource {
        &self.source
    }

    /// Read-only view of the kernel, for inspecting produced solids.
    pub fn kernel(&self) -> &dyn KernelBundle {
        &*self.kb
    }
}

impl ProfileProvider for KernelProfileProvider<'_> {
    fn section_size(&self) -> f64 {
        self.section_size
    }

    fn make_extrusion(&mut self, length: f64) -> Result<Extrusion, ShapeConstructionError> {
        let section = self.source.section(self.section_size)?;
        execute_extrusion(&mut *self.kb, &section, length)
    }
}
