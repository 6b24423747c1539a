//! Mesh objects: a positioned set of points and faces that can be scaled,
//! rotated and drawn onto a [`RenderSurface`].

use nalgebra::{Point2, Point3, Vector3};

use crate::color::Color;
use crate::error::ObjectError;
use crate::geometry::{Extents, Face, Point};
use crate::projection::Camera;
use crate::surface::RenderSurface;
use crate::transform::{rotate_sequential, RotationState};

/// Radius of the dot drawn at each visible point.
pub const MARKER_RADIUS: f32 = 2.0;

/// Filled mode keeps a point only if it is this many times closer than the
/// near plane would require.
const FILL_NEAR_FACTOR: f32 = 1.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenderMode {
    #[default]
    Wireframe,
    Filled,
}

/// How edges are derived for an object, chosen once per draw.
#[derive(Debug, Clone, Copy)]
pub enum DrawStrategy<'a> {
    /// No topology: every pair of distinct points is an edge.
    EdgeList,
    /// Edges and polygons come from the faces.
    FaceList(&'a [Face]),
}

#[derive(Debug, Clone)]
pub struct MeshObject {
    pub position: Point3<f32>,
    pub color: Color,
    pub mode: RenderMode,
    pub show_markers: bool,
    points: Vec<Point>,
    faces: Vec<Face>,
    scale: Vector3<f32>,
    rotation: RotationState,
    base_extents: Extents,
    extents: Extents,
}

impl MeshObject {
    /// Build an object from point coordinates relative to `position`.
    ///
    /// Rejects an empty point list, empty faces and face indices that do not
    /// name a point.
    pub fn new(
        position: Point3<f32>,
        coords: Vec<Point3<f32>>,
        faces: Vec<Face>,
        color: Color,
    ) -> Result<Self, ObjectError> {
        let base_extents = Extents::of(&coords).ok_or(ObjectError::NoPoints)?;

        for (face_index, face) in faces.iter().enumerate() {
            if face.is_empty() {
                return Err(ObjectError::EmptyFace { face: face_index });
            }
            if let Some(&index) = face.indices().iter().find(|&&i| i >= coords.len()) {
                return Err(ObjectError::FaceIndexOutOfRange {
                    face: face_index,
                    index,
                    len: coords.len(),
                });
            }
        }

        Ok(Self {
            position,
            color,
            mode: RenderMode::default(),
            show_markers: true,
            points: coords.into_iter().map(Point::new).collect(),
            faces,
            scale: Vector3::repeat(1.0),
            rotation: RotationState::zero(),
            base_extents,
            extents: base_extents,
        })
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn faces(&self) -> &[Face] {
        &self.faces
    }

    pub fn scale_factors(&self) -> &Vector3<f32> {
        &self.scale
    }

    pub fn rotation(&self) -> &RotationState {
        &self.rotation
    }

    pub fn extents(&self) -> &Extents {
        &self.extents
    }

    pub fn translate(&mut self, delta: &Vector3<f32>) {
        self.position += delta;
    }

    /// Set every point to its origin scaled by `factors`.
    ///
    /// Always starts from the origin coordinates, so this discards any
    /// rotation applied since the last scale and never compounds.
    pub fn scale(&mut self, factors: Vector3<f32>) {
        for point in &mut self.points {
            point.current = Point3::from(point.origin().coords.component_mul(&factors));
        }
        self.scale = factors;
        self.extents = self.base_extents.scaled(&factors);
    }

    /// Rotate every point's current coordinates by `delta_degrees`, X then Y then Z.
    ///
    /// See [`rotate_sequential`] for why repeated calls do not behave like a
    /// rigid rotation.
    pub fn rotate(&mut self, delta_degrees: Vector3<f32>) {
        for point in &mut self.points {
            rotate_sequential(&mut point.current, &delta_degrees);
        }
        self.rotation
            .rotate(delta_degrees.x, delta_degrees.y, delta_degrees.z);
    }

    /// Recompute projection and visibility of every point for this frame.
    pub fn project(&mut self, camera: &Camera) {
        let position = self.position;
        for point in &mut self.points {
            point.project(&position, camera);
        }
    }

    pub fn strategy(&self) -> DrawStrategy<'_> {
        if self.faces.is_empty() {
            DrawStrategy::EdgeList
        } else {
            DrawStrategy::FaceList(&self.faces)
        }
    }

    /// Issue this object's draw calls. Expects [`project`](Self::project) to
    /// have run against the same camera this frame.
    pub fn draw<S: RenderSurface>(&self, surface: &mut S, camera: &Camera) {
        match (self.mode, self.strategy()) {
            (RenderMode::Filled, DrawStrategy::FaceList(faces)) => {
                self.draw_polygons(surface, camera, faces)
            }
            (_, strategy) => self.draw_wireframe(surface, strategy),
        }

        if self.show_markers {
            let marker = self.color.inverse();
            for center in self.points.iter().filter_map(Point::screen) {
                surface.draw_circle(center, MARKER_RADIUS, marker);
            }
        }
    }

    fn draw_wireframe<S: RenderSurface>(&self, surface: &mut S, strategy: DrawStrategy<'_>) {
        match strategy {
            DrawStrategy::EdgeList => {
                for a in 0..self.points.len() {
                    for b in a + 1..self.points.len() {
                        self.draw_edge(surface, a, b);
                    }
                }
            }
            DrawStrategy::FaceList(faces) => {
                for (a, b) in faces.iter().flat_map(|face| face.edges()) {
                    self.draw_edge(surface, a, b);
                }
            }
        }
    }

    /// Edges with a hidden endpoint are dropped, not clipped.
    fn draw_edge<S: RenderSurface>(&self, surface: &mut S, a: usize, b: usize) {
        if let (Some(from), Some(to)) = (self.points[a].screen(), self.points[b].screen()) {
            surface.draw_line(from, to, self.color);
        }
    }

    /// Fill each face from the points that pass a stricter near-plane test.
    /// Faces left with fewer than three points are skipped for this frame.
    fn draw_polygons<S: RenderSurface>(&self, surface: &mut S, camera: &Camera, faces: &[Face]) {
        let threshold = camera.screen_dist() / FILL_NEAR_FACTOR;
        let mut polygon: Vec<Point2<f32>> = Vec::new();

        for face in faces {
            polygon.clear();
            polygon.extend(face.indices().iter().filter_map(|&i| {
                let point = &self.points[i];
                if camera.is_in_front(&point.world(&self.position), threshold) {
                    point.screen()
                } else {
                    None
                }
            }));

            if polygon.len() >= 3 {
                surface.draw_polygon(&polygon, self.color);
            }
        }
    }
}
