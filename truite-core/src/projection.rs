//! Camera state and perspective projection

use nalgebra::{Point2, Point3, Vector3};

/// Smallest focal length the camera accepts.
pub const MIN_SCREEN_DIST: f32 = 1.0;

/// A perspective camera looking down +Z.
///
/// There is no view matrix: world coordinates are only translated by the
/// camera position and divided by `screen_dist + depth`.
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    pub position: Point3<f32>,
    width: f32,
    height: f32,
    screen_dist: f32,
}

impl Camera {
    pub fn new(width: u32, height: u32, fov_degrees: f32) -> Self {
        let width = width as f32;
        Self {
            position: Point3::origin(),
            width,
            height: height as f32,
            screen_dist: focal_length(width, fov_degrees).max(MIN_SCREEN_DIST),
        }
    }

    pub fn with_position(mut self, position: Point3<f32>) -> Self {
        self.position = position;
        self
    }

    pub fn screen_dist(&self) -> f32 {
        self.screen_dist
    }

    /// Center of the render surface in screen coordinates.
    pub fn center(&self) -> Point2<f32> {
        Point2::new(self.width / 2.0, self.height / 2.0)
    }

    pub fn translate(&mut self, delta: &Vector3<f32>) {
        self.position += delta;
    }

    pub fn set_screen_dist(&mut self, screen_dist: f32) {
        self.screen_dist = screen_dist.max(MIN_SCREEN_DIST);
    }

    /// Change the focal length by `delta`, never going below [`MIN_SCREEN_DIST`].
    pub fn adjust_screen_dist(&mut self, delta: f32) -> f32 {
        self.set_screen_dist(self.screen_dist + delta);
        self.screen_dist
    }

    /// Depth of a world point relative to the camera plane.
    pub fn depth(&self, world: &Point3<f32>) -> f32 {
        world.z - self.position.z
    }

    /// Whether `world` lies strictly in front of the plane `depth = -threshold`.
    pub fn is_in_front(&self, world: &Point3<f32>, threshold: f32) -> bool {
        self.depth(world) > -threshold
    }

    /// Near-plane test: the perspective denominator must be strictly positive.
    pub fn is_visible(&self, world: &Point3<f32>) -> bool {
        self.denominator(world) > 0.0
    }

    /// Project a world point to screen space.
    ///
    /// Returns `None` when the point fails the near-plane test, including the
    /// exact singular case `screen_dist + depth == 0`.
    pub fn project(&self, world: &Point3<f32>) -> Option<Point2<f32>> {
        let denom = self.denominator(world);
        if !(denom > 0.0) {
            return None;
        }

        let relative = world - self.position;
        Some(Point2::new(
            self.screen_dist * relative.x / denom + self.width / 2.0,
            self.screen_dist * relative.y / denom + self.height / 2.0,
        ))
    }

    fn denominator(&self, world: &Point3<f32>) -> f32 {
        self.screen_dist + self.depth(world)
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(500, 480, 60.0)
    }
}

/// Focal length giving a horizontal field of view of `fov_degrees` across `width`.
pub fn focal_length(width: f32, fov_degrees: f32) -> f32 {
    (width / 2.0) / (fov_degrees.to_radians() / 2.0).tan()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_camera_creation() {
        let camera = Camera::new(500, 480, 60.0);
        assert_eq!(camera.center(), Point2::new(250.0, 240.0));
        assert_relative_eq!(
            camera.screen_dist(),
            250.0 / 30f32.to_radians().tan(),
            epsilon = 1e-3
        );
    }

    #[test]
    fn test_focal_length_at_ninety_degrees() {
        assert_relative_eq!(focal_length(800.0, 90.0), 400.0, epsilon = 1e-3);
    }

    #[test]
    fn test_project_center() {
        let mut camera = Camera::new(640, 480, 60.0);
        camera.set_screen_dist(300.0);
        let projected = camera.project(&Point3::origin()).unwrap();
        assert_eq!(projected, Point2::new(320.0, 240.0));
    }

    #[test]
    fn test_project_offset_point() {
        let mut camera = Camera::new(200, 100, 60.0).with_position(Point3::new(10.0, 0.0, -50.0));
        camera.set_screen_dist(50.0);
        // denom = 50 + 0 - (-50) = 100; x = 50 * (30 - 10) / 100 + 100
        let projected = camera.project(&Point3::new(30.0, 20.0, 0.0)).unwrap();
        assert_relative_eq!(projected, Point2::new(110.0, 60.0));
    }

    #[test]
    fn test_visibility_boundary() {
        let mut camera = Camera::new(200, 200, 90.0);
        camera.set_screen_dist(100.0);

        let on_plane = Point3::new(0.0, 0.0, -100.0);
        assert!(!camera.is_visible(&on_plane));
        assert!(camera.project(&on_plane).is_none());

        let just_in_front = Point3::new(0.0, 0.0, -100.0 + 1e-3);
        assert!(camera.is_visible(&just_in_front));
        assert!(camera.project(&just_in_front).is_some());

        assert!(!camera.is_visible(&Point3::new(0.0, 0.0, -250.0)));
    }

    #[test]
    fn test_screen_dist_clamped() {
        let mut camera = Camera::default();
        camera.set_screen_dist(10.0);
        assert_eq!(camera.adjust_screen_dist(-4.0), 6.0);
        assert_eq!(camera.adjust_screen_dist(-100.0), MIN_SCREEN_DIST);
        assert_eq!(camera.adjust_screen_dist(2.0), 3.0);
    }

    #[test]
    fn test_translate() {
        let mut camera = Camera::default();
        camera.translate(&Vector3::new(1.0, -2.0, 3.0));
        camera.translate(&Vector3::new(1.0, 0.0, 0.0));
        assert_eq!(camera.position, Point3::new(2.0, -2.0, 3.0));
    }
}
