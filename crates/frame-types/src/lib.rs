pub mod geometry;
pub mod roles;
pub mod section;

pub use geometry::*;
pub use roles::*;
pub use section::*;
