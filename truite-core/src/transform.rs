//! Per-object rotation tracking and the sequential axis rotation

use nalgebra::{Point3, Vector3};

/// Cumulative rotation applied to an object, in degrees per axis.
///
/// Purely informational: the point coordinates carry the actual rotation,
/// this only records how much has been requested so far.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RotationState {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl RotationState {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    pub fn zero() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            z: 0.0,
        }
    }

    /// Accumulate delta amounts (in degrees)
    pub fn rotate(&mut self, dx: f32, dy: f32, dz: f32) {
        self.x += dx;
        self.y += dy;
        self.z += dz;
    }
}

impl Default for RotationState {
    fn default() -> Self {
        Self::zero()
    }
}

/// Rotate `point` in place by `delta` degrees, one axis at a time.
///
/// The X step turns the (y, z) pair, the Y step turns (x, z) using the z the
/// X step just wrote, and the Z step turns (x, y) using the x the Y step just
/// wrote. Each pair is converted to polar form, its angle advanced, and
/// converted back. The steps do not commute, so this is not equivalent to
/// multiplying by a rotation matrix: repeated calls shear shapes over time.
///
/// An axis with a zero delta is skipped entirely, so `(0, 0, 0)` leaves the
/// point bit-for-bit unchanged.
pub fn rotate_sequential(point: &mut Point3<f32>, delta_degrees: &Vector3<f32>) {
    if delta_degrees.x != 0.0 {
        let angle = point.y.atan2(point.z) + delta_degrees.x.to_radians();
        let dist = point.y.hypot(point.z);
        point.y = angle.sin() * dist;
        point.z = angle.cos() * dist;
    }

    if delta_degrees.y != 0.0 {
        let angle = point.x.atan2(point.z) + delta_degrees.y.to_radians();
        let dist = point.x.hypot(point.z);
        point.x = angle.sin() * dist;
        point.z = angle.cos() * dist;
    }

    if delta_degrees.z != 0.0 {
        let angle = point.y.atan2(point.x) + delta_degrees.z.to_radians();
        let dist = point.x.hypot(point.y);
        point.x = angle.cos() * dist;
        point.y = angle.sin() * dist;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_rotation_state() {
        let mut state = RotationState::zero();
        assert_eq!(state.x, 0.0);
        assert_eq!(state.y, 0.0);
        assert_eq!(state.z, 0.0);

        state.rotate(10.0, 20.0, 30.0);
        state.rotate(5.0, 0.0, -30.0);
        assert_eq!(state, RotationState::new(15.0, 20.0, 0.0));
    }

    #[test]
    fn test_zero_delta_is_identity() {
        let original = Point3::new(3.5, -2.25, 7.0);
        let mut point = original;
        for _ in 0..1000 {
            rotate_sequential(&mut point, &Vector3::zeros());
        }
        assert_eq!(point, original);
    }

    #[test]
    fn test_x_step_turns_y_towards_z() {
        // (y, z) = (0, 1) has angle atan2(0, 1) = 0; +90 degrees lands on y = 1
        let mut point = Point3::new(5.0, 0.0, 1.0);
        rotate_sequential(&mut point, &Vector3::new(90.0, 0.0, 0.0));
        assert_relative_eq!(point, Point3::new(5.0, 1.0, 0.0), epsilon = 1e-6);
    }

    #[test]
    fn test_y_step() {
        let mut point = Point3::new(0.0, 4.0, 2.0);
        rotate_sequential(&mut point, &Vector3::new(0.0, 90.0, 0.0));
        assert_relative_eq!(point, Point3::new(2.0, 4.0, 0.0), epsilon = 1e-6);
    }

    #[test]
    fn test_z_step() {
        let mut point = Point3::new(1.0, 0.0, 3.0);
        rotate_sequential(&mut point, &Vector3::new(0.0, 0.0, 90.0));
        assert_relative_eq!(point, Point3::new(0.0, 1.0, 3.0), epsilon = 1e-6);
    }

    #[test]
    fn test_steps_consume_previous_output() {
        // X moves (y, z) = (0, 1) onto y, so the Y step starts from
        // (x, z) = (1, 0) at 90 degrees and ends at 180: x = 0, z = -1.
        // Reading the original z = 1 instead would have left x at 1.
        let mut point = Point3::new(1.0, 0.0, 1.0);
        rotate_sequential(&mut point, &Vector3::new(90.0, 90.0, 0.0));
        assert_relative_eq!(point, Point3::new(0.0, 1.0, -1.0), epsilon = 1e-6);
    }

    #[test]
    fn test_preserves_distance_per_step() {
        let mut point = Point3::new(2.0, -1.0, 4.0);
        let before = point.coords.norm();
        rotate_sequential(&mut point, &Vector3::new(12.0, -33.0, 71.0));
        assert_relative_eq!(point.coords.norm(), before, epsilon = 1e-4);
    }

    #[test]
    fn test_origin_stays_put() {
        let mut point = Point3::origin();
        rotate_sequential(&mut point, &Vector3::new(45.0, 45.0, 45.0));
        assert_eq!(point, Point3::origin());
    }
}
