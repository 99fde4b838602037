use profile_kernel::{Kernel, KernelIntrospect};

/// A kernel that can both build solids and answer queries about them.
///
/// Extrusion needs `&mut` access to build and `&` access to measure the
/// result through the same object; `as_introspect` hands out the read view.
pub trait KernelBundle: Kernel + KernelIntrospect {
    fn as_introspect(&self) -> &dyn KernelIntrospect;
}

impl<T: Kernel + KernelIntrospect> KernelBundle for T {
    fn as_introspect(&self) -> &dyn KernelIntrospect {
        self
    }
}
