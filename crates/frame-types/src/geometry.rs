use nalgebra::{Isometry3, Rotation3, Translation3, UnitQuaternion};
use serde::{Deserialize, Serialize};

/// A point in 3D space, in millimeters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Point3 {
    pub const ORIGIN: Self = Self {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };

    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Same point moved by the given offsets.
    pub fn offset(&self, dx: f64, dy: f64, dz: f64) -> Self {
        Self::new(self.x + dx, self.y + dy, self.z + dz)
    }

    pub fn distance_to(&self, other: &Self) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        let dz = self.z - other.z;
        (dx * dx + dy * dy + dz * dz).sqrt()
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }

    pub fn to_array(&self) -> [f64; 3] {
        [self.x, self.y, self.z]
    }

    pub fn from_array(arr: [f64; 3]) -> Self {
        Self::new(arr[0], arr[1], arr[2])
    }

    fn to_na(self) -> nalgebra::Point3<f64> {
        nalgebra::Point3::new(self.x, self.y, self.z)
    }

    fn from_na(p: nalgebra::Point3<f64>) -> Self {
        Self::new(p.x, p.y, p.z)
    }
}

impl Default for Point3 {
    fn default() -> Self {
        Self::ORIGIN
    }
}

/// Rotation as Euler angles in degrees about the X, Y and Z axes.
///
/// Angles are applied extrinsically in X, Y, Z order. Every rotation the
/// frame uses is about a single axis, where the order does not matter.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct EulerAngles {
    pub x_deg: f64,
    pub y_deg: f64,
    pub z_deg: f64,
}

impl EulerAngles {
    pub const IDENTITY: Self = Self {
        x_deg: 0.0,
        y_deg: 0.0,
        z_deg: 0.0,
    };

    pub fn new(x_deg: f64, y_deg: f64, z_deg: f64) -> Self {
        Self {
            x_deg,
            y_deg,
            z_deg,
        }
    }

    pub fn about_x(deg: f64) -> Self {
        Self::new(deg, 0.0, 0.0)
    }

    pub fn about_y(deg: f64) -> Self {
        Self::new(0.0, deg, 0.0)
    }

    pub fn is_identity(&self) -> bool {
        self.x_deg == 0.0 && self.y_deg == 0.0 && self.z_deg == 0.0
    }

    pub fn is_finite(&self) -> bool {
        self.x_deg.is_finite() && self.y_deg.is_finite() && self.z_deg.is_finite()
    }

    pub fn to_rotation(&self) -> Rotation3<f64> {
        Rotation3::from_euler_angles(
            self.x_deg.to_radians(),
            self.y_deg.to_radians(),
            self.z_deg.to_radians(),
        )
    }
}

/// Where a member sits: the local origin of its extrusion plus its rotation.
///
/// The rotation is applied about the local origin first, then the result is
/// moved to `position`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Placement {
    pub position: Point3,
    pub orientation: EulerAngles,
}

impl Placement {
    pub fn new(position: Point3, orientation: EulerAngles) -> Self {
        Self {
            position,
            orientation,
        }
    }

    pub fn at(x: f64, y: f64, z: f64) -> Self {
        Self::new(Point3::new(x, y, z), EulerAngles::IDENTITY)
    }

    /// Same placement with the rotation replaced.
    pub fn rotated(self, orientation: EulerAngles) -> Self {
        Self {
            orientation,
            ..self
        }
    }

    /// Same rotation, position moved by the given offsets.
    pub fn translated(self, dx: f64, dy: f64, dz: f64) -> Self {
        Self {
            position: self.position.offset(dx, dy, dz),
            ..self
        }
    }

    pub fn is_finite(&self) -> bool {
        self.position.is_finite() && self.orientation.is_finite()
    }

    pub fn isometry(&self) -> Isometry3<f64> {
        let rotation = UnitQuaternion::from_rotation_matrix(&self.orientation.to_rotation());
        let translation = Translation3::new(self.position.x, self.position.y, self.position.z);
        Isometry3::from_parts(translation, rotation)
    }

    /// Map a point from member-local to assembly coordinates.
    pub fn transform_point(&self, p: &Point3) -> Point3 {
        Point3::from_na(self.isometry().transform_point(&p.to_na()))
    }

    /// Axis-aligned bounds of a local box after this placement is applied.
    pub fn transform_bounds(&self, local: &BoundingBox) -> BoundingBox {
        BoundingBox::from_points(&local.corners().map(|c| self.transform_point(&c)))
    }
}

/// Axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min: Point3,
    pub max: Point3,
}

impl BoundingBox {
    pub fn new(min: Point3, max: Point3) -> Self {
        Self { min, max }
    }

    pub fn empty() -> Self {
        Self {
            min: Point3::new(f64::INFINITY, f64::INFINITY, f64::INFINITY),
            max: Point3::new(f64::NEG_INFINITY, f64::NEG_INFINITY, f64::NEG_INFINITY),
        }
    }

    pub fn from_points(points: &[Point3]) -> Self {
        let mut bb = Self::empty();
        for p in points {
            bb.expand_to_include(p);
        }
        bb
    }

    pub fn is_empty(&self) -> bool {
        self.min.x > self.max.x || self.min.y > self.max.y || self.min.z > self.max.z
    }

    pub fn expand_to_include(&mut self, p: &Point3) {
        self.min.x = self.min.x.min(p.x);
        self.min.y = self.min.y.min(p.y);
        self.min.z = self.min.z.min(p.z);
        self.max.x = self.max.x.max(p.x);
        self.max.y = self.max.y.max(p.y);
        self.max.z = self.max.z.max(p.z);
    }

    pub fn union(&self, other: &Self) -> Self {
        if other.is_empty() {
            return *self;
        }
        let mut bb = *self;
        bb.expand_to_include(&other.min);
        bb.expand_to_include(&other.max);
        bb
    }

    /// Extent along each axis as `[dx, dy, dz]`.
    pub fn size(&self) -> [f64; 3] {
        [
            self.max.x - self.min.x,
            self.max.y - self.min.y,
            self.max.z - self.min.z,
        ]
    }

    pub fn corners(&self) -> [Point3; 8] {
        let (a, b) = (self.min, self.max);
        [
            Point3::new(a.x, a.y, a.z),
            Point3::new(b.x, a.y, a.z),
            Point3::new(b.x, b.y, a.z),
            Point3::new(a.x, b.y, a.z),
            Point3::new(a.x, a.y, b.z),
            Point3::new(b.x, a.y, b.z),
            Point3::new(b.x, b.y, b.z),
            Point3::new(a.x, b.y, b.z),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn assert_point_eq(actual: Point3, expected: Point3) {
        assert_relative_eq!(actual.x, expected.x, epsilon = 1e-9);
        assert_relative_eq!(actual.y, expected.y, epsilon = 1e-9);
        assert_relative_eq!(actual.z, expected.z, epsilon = 1e-9);
    }

    #[test]
    fn quarter_turn_about_y_sends_z_to_x() {
        let placement = Placement::at(0.0, 0.0, 0.0).rotated(EulerAngles::about_y(90.0));
        let p = placement.transform_point(&Point3::new(0.0, 0.0, 100.0));
        assert_point_eq(p, Point3::new(100.0, 0.0, 0.0));
    }

    #[test]
    fn quarter_turn_about_x_sends_z_to_negative_y() {
        let placement = Placement::at(5.0, 300.0, -20.0).rotated(EulerAngles::about_x(90.0));
        let p = placement.transform_point(&Point3::new(0.0, 0.0, 280.0));
        assert_point_eq(p, Point3::new(5.0, 20.0, -20.0));
    }

    #[test]
    fn translated_keeps_orientation() {
        let placement = Placement::at(1.0, 2.0, 3.0).rotated(EulerAngles::about_y(90.0));
        let moved = placement.translated(0.0, 10.0, 0.0);
        assert_eq!(moved.orientation, placement.orientation);
        assert_eq!(moved.position, Point3::new(1.0, 12.0, 3.0));
    }

    #[test]
    fn transform_bounds_of_rotated_box() {
        let local = BoundingBox::new(Point3::new(-10.0, -10.0, 0.0), Point3::new(10.0, 10.0, 50.0));
        let placement = Placement::at(0.0, 0.0, 0.0).rotated(EulerAngles::about_y(90.0));
        let world = placement.transform_bounds(&local);
        let size = world.size();
        assert_relative_eq!(size[0], 50.0, epsilon = 1e-9);
        assert_relative_eq!(size[1], 20.0, epsilon = 1e-9);
        assert_relative_eq!(size[2], 20.0, epsilon = 1e-9);
    }

    #[test]
    fn empty_box_union() {
        let bb = BoundingBox::from_points(&[Point3::new(1.0, 2.0, 3.0)]);
        assert!(!bb.is_empty());
        assert!(BoundingBox::empty().is_empty());
        let u = BoundingBox::empty().union(&bb);
        assert_eq!(u.min, Point3::new(1.0, 2.0, 3.0));
        assert_eq!(u.max, Point3::new(1.0, 2.0, 3.0));
    }
}
