pub mod assembler;
pub mod assembly;
pub mod config;
pub mod material;
pub mod types;

use profile_ops::ProfileProvider;
use tracing::info;

pub use assembler::{FrameAssembler, FrameConventions};
pub use assembly::{AssemblyNode, AssemblyTree, Member, MemberTemplate, SubAssembly, ROOT_LABEL};
pub use config::{ConfigError, Dimension, FrameConfig, FrameConfigBuilder, FrameParams};
pub use material::{BillOfMaterials, LineItem, MaterialCalculator};
pub use types::FrameError;

/// A built frame together with its material list.
#[derive(Debug, Clone)]
pub struct FrameBuild {
    pub tree: AssemblyTree,
    pub bom: BillOfMaterials,
}

/// Compute the bill of materials, then assemble the frame with the default
/// placement conventions.
pub fn build_frame(
    config: &FrameConfig,
    provider: &mut dyn ProfileProvider,
) -> Result<FrameBuild, FrameError> {
    let bom = MaterialCalculator::calculate(config);
    let tree = FrameAssembler::new().assemble(config, provider)?;
    info!(
        width = config.width(),
        members = bom.total_members(),
        total_length_mm = bom.total_length_mm,
        "frame built"
    );
    Ok(FrameBuild { tree, bom })
}

/// Validate raw parameters and build the frame in one step.
pub fn build_frame_from_params(
    params: FrameParams,
    provider: &mut dyn ProfileProvider,
) -> Result<FrameBuild, FrameError> {
    let config = FrameConfig::from_params(params)?;
    build_frame(&config, provider)
}
