//! Where the 2020 cross-section comes from.

use frame_types::SectionProfile;
use serde::{Deserialize, Serialize};

use crate::types::ShapeConstructionError;

/// Side length of the square 2020 extrusion section, in millimeters.
pub const PROFILE_2020_SIZE: f64 = 20.0;

/// Corner fillet radius of the stock parametric sketch.
pub const DEFAULT_FILLET_RADIUS: f64 = 1.5;

/// Straight segments used to approximate each filleted corner.
pub const DEFAULT_SEGMENTS_PER_CORNER: u32 = 4;

/// Allowed deviation of a reference outline from the nominal section size.
const SECTION_TOLERANCE: f64 = 1e-6;

/// Source of the section outline handed to the kernel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ProfileSource {
    /// Square sketch with optionally rounded corners.
    Parametric {
        fillet_radius: f64,
        segments_per_corner: u32,
    },
    /// A reference outline, e.g. a slotted 2020 face taken from a vendor
    /// drawing. It must fill the nominal square envelope.
    Reference { outline: SectionProfile },
}

impl Default for ProfileSource {
    fn default() -> Self {
        Self::Parametric {
            fillet_radius: DEFAULT_FILLET_RADIUS,
            segments_per_corner: DEFAULT_SEGMENTS_PER_CORNER,
        }
    }
}

impl ProfileSource {
    /// Square sketch without corner rounding.
    pub fn sharp() -> Self {
        Self::Parametric {
            fillet_radius: 0.0,
            segments_per_corner: 0,
        }
    }

    pub fn reference(outline: SectionProfile) -> Self {
        Self::Reference { outline }
    }

    /// Resolve the outline for a square section of side `size`, with its
    /// corner on the origin and wound counter-clockwise.
    pub fn section(&self, size: f64) -> Result<SectionProfile, ShapeConstructionError> {
        match self {
            ProfileSource::Parametric {
                fillet_radius,
                segments_per_corner,
            } => {
                if !fillet_radius.is_finite() || *fillet_radius < 0.0 {
                    return Err(ShapeConstructionError::DegenerateProfile {
                        reason: format!("fillet radius {} is not a valid radius", fillet_radius),
                    });
                }
                if *fillet_radius * 2.0 >= size {
                    return Err(ShapeConstructionError::DegenerateProfile {
                        reason: format!(
                            "fillet radius {} leaves no flat on a {}mm section",
                            fillet_radius, size
                        ),
                    });
                }
                Ok(SectionProfile::rounded_square(
                    size,
                    *fillet_radius,
                    *segments_per_corner,
                ))
            }
            ProfileSource::Reference { outline } => {
                if outline.is_empty() {
                    return Err(ShapeConstructionError::DegenerateProfile {
                        reason: "reference profile is missing".to_string(),
                    });
                }
                if outline.len() < 3 || !outline.is_finite() {
                    return Err(ShapeConstructionError::DegenerateProfile {
                        reason: format!(
                            "reference profile has {} usable points",
                            outline.len()
                        ),
                    });
                }
                if outline.signed_area().abs() < 1e-9 {
                    return Err(ShapeConstructionError::DegenerateProfile {
                        reason: "reference profile encloses zero area".to_string(),
                    });
                }
                let (w, h) = outline.extent().unwrap_or((0.0, 0.0));
                if (w - size).abs() > SECTION_TOLERANCE || (h - size).abs() > SECTION_TOLERANCE {
                    return Err(ShapeConstructionError::SectionMismatch {
                        expected: size,
                        actual_width: w,
                        actual_height: h,
                    });
                }
                Ok(outline.anchored_at_origin().counter_clockwise())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_source_is_filleted_square() {
        let section = ProfileSource::default().section(PROFILE_2020_SIZE).unwrap();
        assert_eq!(section.len(), 4 * (DEFAULT_SEGMENTS_PER_CORNER as usize + 1));
        let ((x0, y0), (x1, y1)) = section.bounds().unwrap();
        assert!(x0.abs() < 1e-9 && y0.abs() < 1e-9);
        assert!((x1 - 20.0).abs() < 1e-9 && (y1 - 20.0).abs() < 1e-9);
    }

    #[test]
    fn oversized_fillet_is_degenerate() {
        let source = ProfileSource::Parametric {
            fillet_radius: 10.0,
            segments_per_corner: 4,
        };
        assert!(matches!(
            source.section(20.0),
            Err(ShapeConstructionError::DegenerateProfile { .. })
        ));
    }

    #[test]
    fn empty_reference_is_missing() {
        let source = ProfileSource::reference(SectionProfile::new(Vec::new()));
        let err = source.section(20.0).unwrap_err();
        assert!(err.to_string().contains("missing"));
    }

    #[test]
    fn reference_outline_is_anchored_and_wound_ccw() {
        // Clockwise 20x20 square centered on the origin.
        let outline = SectionProfile::new(vec![
            (-10.0, -10.0),
            (-10.0, 10.0),
            (10.0, 10.0),
            (10.0, -10.0),
        ]);
        let section = ProfileSource::reference(outline).section(20.0).unwrap();
        assert!(section.signed_area() > 0.0);
        assert_eq!(section.bounds(), Some(((0.0, 0.0), (20.0, 20.0))));
    }

    #[test]
    fn reference_outline_must_fit_envelope() {
        let outline = SectionProfile::square(30.0);
        match ProfileSource::reference(outline).section(20.0) {
            Err(ShapeConstructionError::SectionMismatch {
                expected,
                actual_width,
                ..
            }) => {
                assert_eq!(expected, 20.0);
                assert_eq!(actual_width, 30.0);
            }
            other => panic!("expected SectionMismatch, got {:?}", other),
        }
    }
}
