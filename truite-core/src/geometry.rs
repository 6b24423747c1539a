//! Geometry primitives: points, faces and raw mesh data

use nalgebra::{Point2, Point3, Vector3};

use crate::projection::Camera;

/// A vertex owned by one [`MeshObject`](crate::MeshObject).
///
/// `origin` is fixed at creation; `current` is what scale and rotate write
/// to. `projected` and `visible` are per-frame scratch values filled in by
/// [`Point::project`].
#[derive(Debug, Clone, PartialEq)]
pub struct Point {
    origin: Point3<f32>,
    pub current: Point3<f32>,
    projected: Point2<f32>,
    visible: bool,
}

impl Point {
    pub fn new(origin: Point3<f32>) -> Self {
        Self {
            origin,
            current: origin,
            projected: Point2::origin(),
            visible: false,
        }
    }

    pub fn origin(&self) -> &Point3<f32> {
        &self.origin
    }

    /// World position of this point for an object placed at `object_position`.
    pub fn world(&self, object_position: &Point3<f32>) -> Point3<f32> {
        *object_position + self.current.coords
    }

    /// Recompute the screen position against the current camera.
    ///
    /// A point that fails the near-plane test keeps its previous projection
    /// and is marked invisible.
    pub fn project(&mut self, object_position: &Point3<f32>, camera: &Camera) {
        match camera.project(&self.world(object_position)) {
            Some(projected) => {
                self.projected = projected;
                self.visible = true;
            }
            None => self.visible = false,
        }
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// The projected position, only if the point passed this frame's near-plane test.
    pub fn screen(&self) -> Option<Point2<f32>> {
        self.visible.then_some(self.projected)
    }
}

/// An ordered list of point indices describing one polygon.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Face(Vec<usize>);

impl Face {
    pub fn new(indices: Vec<usize>) -> Self {
        Self(indices)
    }

    pub fn indices(&self) -> &[usize] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Consecutive index pairs plus the closing pair from last back to first.
    pub fn edges(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        let n = self.0.len();
        (0..n).map(move |i| (self.0[i], self.0[(i + 1) % n]))
    }
}

impl From<Vec<usize>> for Face {
    fn from(indices: Vec<usize>) -> Self {
        Self::new(indices)
    }
}

/// Axis-aligned size of a point set.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Extents {
    pub width: f32,
    pub height: f32,
    pub depth: f32,
}

impl Extents {
    /// `None` for an empty point set, which has no meaningful bounds.
    pub fn of<'a>(points: impl IntoIterator<Item = &'a Point3<f32>>) -> Option<Self> {
        let mut points = points.into_iter();
        let first = points.next()?;
        let (min, max) = points.fold((first.coords, first.coords), |(min, max), p| {
            (min.inf(&p.coords), max.sup(&p.coords))
        });
        let size = max - min;
        Some(Self {
            width: size.x,
            height: size.y,
            depth: size.z,
        })
    }

    pub fn scaled(&self, factors: &Vector3<f32>) -> Self {
        Self {
            width: self.width * factors.x,
            height: self.height * factors.y,
            depth: self.depth * factors.z,
        }
    }
}

/// Vertex coordinates and faces as read from a file or built in code.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeshData {
    pub vertices: Vec<Point3<f32>>,
    pub faces: Vec<Face>,
}

impl MeshData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    /// An axis-aligned cube with one corner at the origin and six quad faces.
    pub fn cube(size: f32) -> Self {
        let vertices = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(size, 0.0, 0.0),
            Point3::new(size, size, 0.0),
            Point3::new(0.0, size, 0.0),
            Point3::new(0.0, 0.0, size),
            Point3::new(size, 0.0, size),
            Point3::new(size, size, size),
            Point3::new(0.0, size, size),
        ];
        let faces = [
            [0, 1, 2, 3], // front
            [5, 4, 7, 6], // back
            [4, 0, 3, 7], // left
            [1, 5, 6, 2], // right
            [4, 5, 1, 0], // top
            [3, 2, 6, 7], // bottom
        ]
        .into_iter()
        .map(|face| Face::new(face.to_vec()))
        .collect();

        Self { vertices, faces }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_face_edges_close_the_loop() {
        let face = Face::new(vec![0, 1, 2, 3]);
        let edges: Vec<_> = face.edges().collect();
        assert_eq!(edges, vec![(0, 1), (1, 2), (2, 3), (3, 0)]);
    }

    #[test]
    fn test_triangle_edges() {
        let face = Face::new(vec![4, 2, 7]);
        assert_eq!(face.edges().count(), 3);
        assert_eq!(face.edges().last(), Some((7, 4)));
    }

    #[test]
    fn test_extents() {
        let points = [
            Point3::new(-1.0, 2.0, 0.0),
            Point3::new(3.0, -2.0, 5.0),
            Point3::new(0.0, 0.0, 1.0),
        ];
        let extents = Extents::of(&points).unwrap();
        assert_eq!(
            extents,
            Extents {
                width: 4.0,
                height: 4.0,
                depth: 5.0
            }
        );
        assert_eq!(
            extents.scaled(&Vector3::new(2.0, 0.5, 1.0)),
            Extents {
                width: 8.0,
                height: 2.0,
                depth: 5.0
            }
        );
    }

    #[test]
    fn test_extents_of_nothing() {
        assert!(Extents::of(&[] as &[Point3<f32>]).is_none());
    }

    #[test]
    fn test_point_keeps_stale_projection_when_hidden() {
        let mut camera = Camera::new(100, 100, 90.0);
        camera.set_screen_dist(50.0);
        let mut point = Point::new(Point3::new(10.0, 0.0, 0.0));

        point.project(&Point3::origin(), &camera);
        let first = point.screen().unwrap();

        camera.position.z = 80.0;
        point.project(&Point3::origin(), &camera);
        assert!(!point.is_visible());
        assert!(point.screen().is_none());

        camera.position.z = 0.0;
        point.project(&Point3::origin(), &camera);
        assert_eq!(point.screen(), Some(first));
    }

    #[test]
    fn test_cube_topology() {
        let cube = MeshData::cube(2.0);
        assert_eq!(cube.vertex_count(), 8);
        assert_eq!(cube.face_count(), 6);
        assert!(cube
            .faces
            .iter()
            .all(|face| face.len() == 4 && face.indices().iter().all(|&i| i < 8)));
    }
}
