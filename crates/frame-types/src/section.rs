use serde::{Deserialize, Serialize};

/// Closed 2D outline of an extrusion cross-section, in millimeters.
///
/// Points are listed in order around the outline; the closing edge from the
/// last point back to the first is implicit. The section plane's local X/Y
/// map onto the member's local X/Y, and the member extrudes along local +Z.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionProfile {
    pub points: Vec<(f64, f64)>,
}

impl SectionProfile {
    pub fn new(points: Vec<(f64, f64)>) -> Self {
        Self { points }
    }

    /// Square outline of side `size` spanning `[0, size]` on both axes.
    pub fn square(size: f64) -> Self {
        Self::new(vec![(0.0, 0.0), (size, 0.0), (size, size), (0.0, size)])
    }

    /// Square outline with rounded corners, spanning `[0, size]` on both axes.
    ///
    /// Each corner arc is approximated by `segments_per_corner` straight
    /// edges. A non-positive radius or zero segments gives a sharp square.
    pub fn rounded_square(size: f64, radius: f64, segments_per_corner: u32) -> Self {
        if radius <= 0.0 || segments_per_corner == 0 {
            return Self::square(size);
        }
        let (near, far) = (radius, size - radius);
        // Corner arc centers in counter-clockwise order, with each arc's start angle.
        let corners = [
            (far, near, -90.0f64),
            (far, far, 0.0),
            (near, far, 90.0),
            (near, near, 180.0),
        ];

        let mut points = Vec::with_capacity(corners.len() * (segments_per_corner as usize + 1));
        for (cx, cy, start_deg) in corners {
            for k in 0..=segments_per_corner {
                let angle = (start_deg + 90.0 * k as f64 / segments_per_corner as f64).to_radians();
                points.push((cx + radius * angle.cos(), cy + radius * angle.sin()));
            }
        }
        Self::new(points)
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Shoelace area; positive for counter-clockwise outlines.
    pub fn signed_area(&self) -> f64 {
        let n = self.points.len();
        if n < 3 {
            return 0.0;
        }
        let mut twice_area = 0.0;
        for i in 0..n {
            let (x0, y0) = self.points[i];
            let (x1, y1) = self.points[(i + 1) % n];
            twice_area += x0 * y1 - x1 * y0;
        }
        twice_area / 2.0
    }

    /// 2D bounds as `((min_x, min_y), (max_x, max_y))`, or `None` if empty.
    pub fn bounds(&self) -> Option<((f64, f64), (f64, f64))> {
        let (&first, rest) = self.points.split_first()?;
        let mut min = first;
        let mut max = first;
        for &(x, y) in rest {
            min.0 = min.0.min(x);
            min.1 = min.1.min(y);
            max.0 = max.0.max(x);
            max.1 = max.1.max(y);
        }
        Some((min, max))
    }

    /// Width and height of the outline's bounds.
    pub fn extent(&self) -> Option<(f64, f64)> {
        self.bounds()
            .map(|((x0, y0), (x1, y1))| (x1 - x0, y1 - y0))
    }

    /// Copy shifted so its bounds start at the origin.
    pub fn anchored_at_origin(&self) -> Self {
        match self.bounds() {
            Some(((x0, y0), _)) => {
                Self::new(self.points.iter().map(|&(x, y)| (x - x0, y - y0)).collect())
            }
            None => self.clone(),
        }
    }

    /// Copy wound counter-clockwise.
    pub fn counter_clockwise(&self) -> Self {
        if self.signed_area() < 0.0 {
            Self::new(self.points.iter().rev().copied().collect())
        } else {
            self.clone()
        }
    }

    pub fn is_finite(&self) -> bool {
        self.points.iter().all(|(x, y)| x.is_finite() && y.is_finite())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn square_area_and_extent() {
        let sq = SectionProfile::square(20.0);
        assert_eq!(sq.len(), 4);
        assert!((sq.signed_area() - 400.0).abs() < 1e-9);
        assert_eq!(sq.extent(), Some((20.0, 20.0)));
    }

    #[test]
    fn rounded_square_keeps_envelope() {
        let rs = SectionProfile::rounded_square(20.0, 1.5, 4);
        assert_eq!(rs.len(), 20);
        let ((x0, y0), (x1, y1)) = rs.bounds().unwrap();
        assert!(x0.abs() < 1e-9 && y0.abs() < 1e-9);
        assert!((x1 - 20.0).abs() < 1e-9);
        assert!((y1 - 20.0).abs() < 1e-9);
        // Rounding removes (4 - pi) * r^2 from the square.
        let area = rs.signed_area();
        assert!(area < 400.0);
        assert!(area > 400.0 - (4.0 - std::f64::consts::PI) * 1.5 * 1.5 - 0.5);
    }

    #[test]
    fn zero_radius_is_plain_square() {
        assert_eq!(
            SectionProfile::rounded_square(20.0, 0.0, 8),
            SectionProfile::square(20.0)
        );
    }

    #[test]
    fn clockwise_outline_is_reversed() {
        let cw = SectionProfile::new(vec![(0.0, 0.0), (0.0, 1.0), (1.0, 1.0), (1.0, 0.0)]);
        assert!(cw.signed_area() < 0.0);
        assert!(cw.counter_clockwise().signed_area() > 0.0);
    }

    #[test]
    fn anchoring_moves_min_corner_to_origin() {
        let off = SectionProfile::new(vec![(-10.0, -10.0), (10.0, -10.0), (10.0, 10.0), (-10.0, 10.0)]);
        assert_eq!(off.anchored_at_origin(), SectionProfile::square(20.0));
    }

    #[test]
    fn empty_outline_has_no_bounds() {
        let empty = SectionProfile::new(Vec::new());
        assert!(empty.is_empty());
        assert_eq!(empty.bounds(), None);
        assert_eq!(empty.signed_area(), 0.0);
    }
}
