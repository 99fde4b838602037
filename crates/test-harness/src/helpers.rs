//! Helper functions: error type, sample configurations, profile outlines.

use frame_engine::{ConfigError, FrameConfig, FrameError};
use frame_types::SectionProfile;
use profile_ops::ShapeConstructionError;

// ── Error Type ──────────────────────────────────────────────────────────────

/// Unified error type for the test harness.
#[derive(Debug, thiserror::Error)]
pub enum HarnessError {
    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    #[error("shape error: {0}")]
    Shape(#[from] ShapeConstructionError),

    #[error("frame not built yet")]
    NotBuilt,

    #[error("member not found: {label}")]
    MemberNotFound { label: String },

    #[error("assertion failed: {detail}")]
    AssertionFailed { detail: String },

    #[error("oracle failure ({oracle}): {detail}")]
    OracleFailure { oracle: String, detail: String },

    #[error("serialization error: {reason}")]
    Serialization { reason: String },
}

impl From<FrameError> for HarnessError {
    fn from(err: FrameError) -> Self {
        match err {
            FrameError::Config(e) => HarnessError::Config(e),
            FrameError::Shape(e) => HarnessError::Shape(e),
        }
    }
}

// ── Sample Configurations ───────────────────────────────────────────────────

/// 400 x 200 x 300 frame with bottom bridges at 50 and 200.
pub fn two_bridge_config() -> Result<FrameConfig, ConfigError> {
    FrameConfig::new(400.0, 200.0, 300.0, vec![50.0, 200.0], vec![])
}

/// 400 x 200 x 300 frame with no bridges.
pub fn bare_config() -> Result<FrameConfig, ConfigError> {
    FrameConfig::new(400.0, 200.0, 300.0, vec![], vec![])
}

/// Mid-tower case: 210 x 450 x 420 with bridges on both levels.
pub fn tower_config() -> Result<FrameConfig, ConfigError> {
    FrameConfig::new(210.0, 450.0, 420.0, vec![0.0, 85.0, 170.0], vec![20.0, 150.0])
}

/// Expected total extrusion length for a configuration, computed directly
/// from the cut rules.
pub fn expected_total_length(config: &FrameConfig) -> f64 {
    4.0 * (config.height() - 20.0)
        + 4.0 * config.width()
        + config.bridge_count() as f64 * (config.depth() - 20.0)
}

// ── Profile Outlines ────────────────────────────────────────────────────────

/// 2020 outline with a T-slot opening centered on each side.
///
/// `slot` is the opening width and `lip` how far the slot cuts in.
pub fn slotted_2020_outline(slot: f64, lip: f64) -> SectionProfile {
    let h = 10.0;
    let s = slot / 2.0;
    // One side, from the lower corner up to just before the next corner.
    let side = [(h, -h), (h, -s), (h - lip, -s), (h - lip, s), (h, s)];
    let mut points = Vec::with_capacity(side.len() * 4);
    for turn in 0..4 {
        for &(x, y) in &side {
            points.push(match turn {
                0 => (x, y),
                1 => (-y, x),
                2 => (-x, -y),
                _ => (y, -x),
            });
        }
    }
    SectionProfile::new(points)
}

/// Format a point triple for assertion messages.
pub fn fmt_xyz(x: f64, y: f64, z: f64) -> String {
    format!("({:.3}, {:.3}, {:.3})", x, y, z)
}
