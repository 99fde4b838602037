pub mod extrude;
pub mod kernel_ext;
pub mod provider;
pub mod section;
pub mod types;

pub use extrude::execute_extrusion;
pub use kernel_ext::KernelBundle;
pub use provider::{KernelProfileProvider, ProfileProvider};
pub use section::{ProfileSource, PROFILE_2020_SIZE};
pub use types::*;
