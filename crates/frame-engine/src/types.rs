use profile_ops::ShapeConstructionError;

use crate::config::ConfigError;

/// Errors from the full frame pipeline.
///
/// Invalid input and geometry failures stay distinct so callers can tell a
/// bad configuration from a kernel that could not build a member.
#[derive(Debug, Clone, thiserror::Error)]
pub enum FrameError {
    #[error("invalid frame configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("failed to build frame member: {0}")]
    Shape(#[from] ShapeConstructionError),
}
