//! Frame dimensions and bridge placement, validated at construction.

use std::fmt;

use frame_types::BridgeLevel;
use serde::{Deserialize, Serialize};

use crate::assembler::FrameAssembler;

/// Which overall box dimension a validation failure refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Dimension {
    Width,
    Height,
    Depth,
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Dimension::Width => "width",
            Dimension::Height => "height",
            Dimension::Depth => "depth",
        })
    }
}

/// Errors from building a [`FrameConfig`]. Bridge indices are 1-based,
/// matching the `bottom_bridge_{i}` / `top_bridge_{i}` member labels.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("{field} must be a finite number, got {value}")]
    NonFiniteDimension { field: Dimension, value: f64 },

    #[error("{level} bridge {index} position must be a finite number, got {value}")]
    NonFiniteBridgePosition {
        level: BridgeLevel,
        index: usize,
        value: f64,
    },

    #[error("{level} bridge {index} position {value} is negative (must be >= 0)")]
    NegativeBridgePosition {
        level: BridgeLevel,
        index: usize,
        value: f64,
    },

    #[error("{level} bridge {index} position {value} exceeds usable width {bound}")]
    BridgeBeyondUsableWidth {
        level: BridgeLevel,
        index: usize,
        value: f64,
        bound: f64,
    },

    #[error("{field} {value} is below the minimum {minimum}")]
    DimensionTooSmall {
        field: Dimension,
        value: f64,
        minimum: f64,
    },

    #[error("invalid frame parameters: {reason}")]
    Json { reason: String },
}

/// Raw, unvalidated frame parameters. Every field has a default, so partial
/// input (e.g. JSON naming only `width`) fills the rest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FrameParams {
    pub width: f64,
    pub height: f64,
    pub depth: f64,
    pub bottom_bridge_positions: Vec<f64>,
    pub top_bridge_positions: Vec<f64>,
}

impl Default for FrameParams {
    fn default() -> Self {
        Self {
            width: 100.0,
            height: 50.0,
            depth: 100.0,
            bottom_bridge_positions: Vec::new(),
            top_bridge_positions: Vec::new(),
        }
    }
}

/// Validated frame configuration. Immutable: variants are derived as new,
/// re-validated copies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "FrameParams", into = "FrameParams")]
pub struct FrameConfig {
    width: f64,
    height: f64,
    depth: f64,
    bottom_bridge_positions: Vec<f64>,
    top_bridge_positions: Vec<f64>,
}

impl FrameConfig {
    /// Validate and build a configuration.
    pub fn new(
        width: f64,
        height: f64,
        depth: f64,
        bottom_bridge_positions: Vec<f64>,
        top_bridge_positions: Vec<f64>,
    ) -> Result<Self, ConfigError> {
        Self::from_params(FrameParams {
            width,
            height,
            depth,
            bottom_bridge_positions,
            top_bridge_positions,
        })
    }

    pub fn from_params(params: FrameParams) -> Result<Self, ConfigError> {
        validate(&params)?;
        Ok(Self {
            width: params.width,
            height: params.height,
            depth: params.depth,
            bottom_bridge_positions: params.bottom_bridge_positions,
            top_bridge_positions: params.top_bridge_positions,
        })
    }

    /// Parse and validate parameters from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let params: FrameParams =
            serde_json::from_str(json).map_err(|e| ConfigError::Json {
                reason: e.to_string(),
            })?;
        Self::from_params(params)
    }

    pub fn builder() -> FrameConfigBuilder {
        FrameConfigBuilder::default()
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn depth(&self) -> f64 {
        self.depth
    }

    pub fn bottom_bridge_positions(&self) -> &[f64] {
        &self.bottom_bridge_positions
    }

    pub fn top_bridge_positions(&self) -> &[f64] {
        &self.top_bridge_positions
    }

    pub fn bridge_positions(&self, level: BridgeLevel) -> &[f64] {
        match level {
            BridgeLevel::Bottom => &self.bottom_bridge_positions,
            BridgeLevel::Top => &self.top_bridge_positions,
        }
    }

    /// Span between the inner faces of the two verticals; the legal range
    /// for bridge positions is `[0, usable_width]`.
    pub fn usable_width(&self) -> f64 {
        usable_width(self.width)
    }

    pub fn bridge_count(&self) -> usize {
        self.bottom_bridge_positions.len() + self.top_bridge_positions.len()
    }

    pub fn to_params(&self) -> FrameParams {
        FrameParams::from(self.clone())
    }

    /// Copy with new box dimensions, re-validated against the same bridges.
    pub fn with_dimensions(&self, width: f64, height: f64, depth: f64) -> Result<Self, ConfigError> {
        Self::from_params(FrameParams {
            width,
            height,
            depth,
            ..self.to_params()
        })
    }

    pub fn with_bottom_bridges(&self, positions: Vec<f64>) -> Result<Self, ConfigError> {
        Self::from_params(FrameParams {
            bottom_bridge_positions: positions,
            ..self.to_params()
        })
    }

    pub fn with_top_bridges(&self, positions: Vec<f64>) -> Result<Self, ConfigError> {
        Self::from_params(FrameParams {
            top_bridge_positions: positions,
            ..self.to_params()
        })
    }
}

impl TryFrom<FrameParams> for FrameConfig {
    type Error = ConfigError;

    fn try_from(params: FrameParams) -> Result<Self, Self::Error> {
        Self::from_params(params)
    }
}

impl From<FrameConfig> for FrameParams {
    fn from(config: FrameConfig) -> Self {
        Self {
            width: config.width,
            height: config.height,
            depth: config.depth,
            bottom_bridge_positions: config.bottom_bridge_positions,
            top_bridge_positions: config.top_bridge_positions,
        }
    }
}

/// Fluent construction of a [`FrameConfig`]; validation happens in `build`.
#[derive(Debug, Clone, Default)]
pub struct FrameConfigBuilder {
    params: FrameParams,
}

impl FrameConfigBuilder {
    pub fn width(mut self, width: f64) -> Self {
        self.params.width = width;
        self
    }

    pub fn height(mut self, height: f64) -> Self {
        self.params.height = height;
        self
    }

    pub fn depth(mut self, depth: f64) -> Self {
        self.params.depth = depth;
        self
    }

    pub fn bottom_bridges(mut self, positions: impl IntoIterator<Item = f64>) -> Self {
        self.params.bottom_bridge_positions = positions.into_iter().collect();
        self
    }

    pub fn top_bridges(mut self, positions: impl IntoIterator<Item = f64>) -> Self {
        self.params.top_bridge_positions = positions.into_iter().collect();
        self
    }

    pub fn build(self) -> Result<FrameConfig, ConfigError> {
        FrameConfig::from_params(self.params)
    }
}

fn usable_width(width: f64) -> f64 {
    width - 2.0 * FrameAssembler::EXTRUSION_SIZE
}

/// Run every check in order, stopping at the first failure: finiteness of
/// the dimensions, then finiteness of the bottom and top bridge lists, then
/// the range of each bridge list (bottom, then top), then the minimum
/// dimensions.
fn validate(params: &FrameParams) -> Result<(), ConfigError> {
    let dims = [
        (Dimension::Width, params.width),
        (Dimension::Height, params.height),
        (Dimension::Depth, params.depth),
    ];

    for (field, value) in dims {
        if !value.is_finite() {
            return Err(ConfigError::NonFiniteDimension { field, value });
        }
    }

    let levels = [
        (BridgeLevel::Bottom, &params.bottom_bridge_positions),
        (BridgeLevel::Top, &params.top_bridge_positions),
    ];
    for (level, positions) in levels {
        if let Some((i, &value)) = positions.iter().enumerate().find(|(_, v)| !v.is_finite()) {
            return Err(ConfigError::NonFiniteBridgePosition {
                level,
                index: i + 1,
                value,
            });
        }
    }

    let bound = usable_width(params.width);
    check_bridges(BridgeLevel::Bottom, &params.bottom_bridge_positions, bound)?;
    check_bridges(BridgeLevel::Top, &params.top_bridge_positions, bound)?;

    let minimum = 2.0 * FrameAssembler::EXTRUSION_SIZE;
    for (field, value) in dims {
        if value < minimum {
            return Err(ConfigError::DimensionTooSmall {
                field,
                value,
                minimum,
            });
        }
    }

    Ok(())
}

fn check_bridges(level: BridgeLevel, positions: &[f64], bound: f64) -> Result<(), ConfigError> {
    for (i, &value) in positions.iter().enumerate() {
        let index = i + 1;
        if value < 0.0 {
            return Err(ConfigError::NegativeBridgePosition {
                level,
                index,
                value,
            });
        }
        if value > bound {
            return Err(ConfigError::BridgeBeyondUsableWidth {
                level,
                index,
                value,
                bound,
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_defaults_validate() {
        let config = FrameConfig::builder().build().unwrap();
        assert_eq!(config.width(), 100.0);
        assert_eq!(config.height(), 50.0);
        assert_eq!(config.depth(), 100.0);
        assert_eq!(config.bridge_count(), 0);
    }

    #[test]
    fn non_finite_top_bridge_reported_before_out_of_range_bottom_bridge() {
        let err = FrameConfig::new(400.0, 200.0, 300.0, vec![500.0], vec![10.0, f64::NAN])
            .unwrap_err();
        match err {
            ConfigError::NonFiniteBridgePosition { level, index, value } => {
                assert_eq!(level, BridgeLevel::Top);
                assert_eq!(index, 2);
                assert!(value.is_nan());
            }
            other => panic!("expected NonFiniteBridgePosition, got {:?}", other),
        }
    }

    #[test]
    fn zero_depth_is_too_small() {
        let err = FrameConfig::new(100.0, 50.0, 0.0, vec![], vec![]).unwrap_err();
        assert_eq!(
            err,
            ConfigError::DimensionTooSmall {
                field: Dimension::Depth,
                value: 0.0,
                minimum: 40.0,
            }
        );
    }

    #[test]
    fn bridge_past_usable_width_names_index_value_and_bound() {
        let err = FrameConfig::new(400.0, 200.0, 300.0, vec![380.0], vec![]).unwrap_err();
        assert_eq!(
            err,
            ConfigError::BridgeBeyondUsableWidth {
                level: BridgeLevel::Bottom,
                index: 1,
                value: 380.0,
                bound: 360.0,
            }
        );
        let msg = err.to_string();
        assert!(msg.contains("bottom bridge 1"), "{}", msg);
        assert!(msg.contains("380"), "{}", msg);
        assert!(msg.contains("360"), "{}", msg);
    }

    #[test]
    fn bounds_are_inclusive() {
        let config = FrameConfig::new(400.0, 200.0, 300.0, vec![0.0, 360.0], vec![360.0]).unwrap();
        assert_eq!(config.usable_width(), 360.0);
        assert_eq!(config.bridge_count(), 3);
    }

    #[test]
    fn negative_top_bridge_names_second_index() {
        let err = FrameConfig::new(400.0, 200.0, 300.0, vec![], vec![10.0, -1.0]).unwrap_err();
        assert_eq!(
            err,
            ConfigError::NegativeBridgePosition {
                level: BridgeLevel::Top,
                index: 2,
                value: -1.0,
            }
        );
    }

    #[test]
    fn bottom_list_is_checked_before_top_list() {
        let err = FrameConfig::new(400.0, 200.0, 300.0, vec![500.0], vec![-5.0]).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::BridgeBeyondUsableWidth {
                level: BridgeLevel::Bottom,
                ..
            }
        ));
    }

    #[test]
    fn bridge_checks_run_before_dimension_checks() {
        // Width 30 gives a negative usable width, so the bridge fails first.
        let err = FrameConfig::new(30.0, 50.0, 100.0, vec![0.0], vec![]).unwrap_err();
        assert!(matches!(err, ConfigError::BridgeBeyondUsableWidth { .. }));
        let err = FrameConfig::new(30.0, 50.0, 100.0, vec![], vec![]).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::DimensionTooSmall {
                field: Dimension::Width,
                ..
            }
        ));
    }

    #[test]
    fn non_finite_values_are_rejected() {
        let err = FrameConfig::new(f64::NAN, 50.0, 100.0, vec![], vec![]).unwrap_err();
        assert!(matches!(err, ConfigError::NonFiniteDimension { .. }));
        let err = FrameConfig::new(100.0, 50.0, 100.0, vec![f64::NAN], vec![]).unwrap_err();
        assert!(matches!(err, ConfigError::NonFiniteBridgePosition { index: 1, .. }));
    }

    #[test]
    fn variants_are_revalidated_copies() {
        let base = FrameConfig::new(400.0, 200.0, 300.0, vec![300.0], vec![]).unwrap();
        let narrower = base.with_dimensions(200.0, 200.0, 300.0);
        assert!(matches!(
            narrower,
            Err(ConfigError::BridgeBeyondUsableWidth { bound, .. }) if bound == 160.0
        ));
        let topped = base.with_top_bridges(vec![10.0]).unwrap();
        assert_eq!(topped.top_bridge_positions(), &[10.0]);
        assert!(base.top_bridge_positions().is_empty());
    }

    #[test]
    fn json_input_is_validated() {
        let config = FrameConfig::from_json(
            r#"{"width": 400, "height": 200, "depth": 300, "bottom_bridge_positions": [50, 200]}"#,
        )
        .unwrap();
        assert_eq!(config.bottom_bridge_positions(), &[50.0, 200.0]);
        assert!(config.top_bridge_positions().is_empty());

        let err = FrameConfig::from_json(r#"{"depth": 10}"#).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::DimensionTooSmall {
                field: Dimension::Depth,
                ..
            }
        ));

        let err = FrameConfig::from_json(r#"{"width": "wide"}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Json { .. }));
    }

    #[test]
    fn serde_round_trip_goes_through_validation() {
        let config = FrameConfig::new(400.0, 200.0, 300.0, vec![50.0], vec![100.0]).unwrap();
        let json = serde_json::to_string(&config).unwrap();
        let back: FrameConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, config);
    }
}
