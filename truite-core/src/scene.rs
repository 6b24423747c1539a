//! The scene: camera, object registry and per-frame rendering

use std::path::Path;

use nalgebra::{Point3, Vector3};

use crate::color::Color;
use crate::config::SceneConfig;
use crate::error::{ConfigError, ObjectError};
use crate::geometry::{Face, MeshData};
use crate::input::CameraAction;
use crate::loader;
use crate::object::{MeshObject, MARKER_RADIUS};
use crate::projection::Camera;
use crate::surface::RenderSurface;

/// Handle to an object registered with a [`Scene`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId(usize);

/// Owns the camera and every object, and drives one frame at a time.
///
/// Objects are drawn in registration order with no depth sorting, so later
/// objects paint over earlier ones.
#[derive(Debug)]
pub struct Scene {
    config: SceneConfig,
    camera: Camera,
    objects: Vec<MeshObject>,
    light_mode: bool,
}

impl Scene {
    pub fn new(config: SceneConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let camera = Camera::new(config.screen_width, config.screen_height, config.fov_degrees)
            .with_position(config.camera_position);

        Ok(Self {
            config,
            camera,
            objects: Vec::new(),
            light_mode: false,
        })
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn camera_mut(&mut self) -> &mut Camera {
        &mut self.camera
    }

    /// Register a new object and return its handle.
    pub fn create_object(
        &mut self,
        position: Point3<f32>,
        coords: Vec<Point3<f32>>,
        faces: Vec<Face>,
        color: Color,
    ) -> Result<ObjectId, ObjectError> {
        let object = MeshObject::new(position, coords, faces, color)?;
        let id = ObjectId(self.objects.len());
        tracing::debug!(
            ?id,
            points = object.points().len(),
            faces = object.faces().len(),
            "object created"
        );
        self.objects.push(object);
        Ok(id)
    }

    pub fn add_mesh(
        &mut self,
        position: Point3<f32>,
        mesh: MeshData,
        color: Color,
    ) -> Result<ObjectId, ObjectError> {
        self.create_object(position, mesh.vertices, mesh.faces, color)
    }

    /// Load a mesh file and register it as an object.
    ///
    /// Never fails loudly: a missing file, an unknown format or a file with no
    /// vertices is logged and yields `None`. Without a `color` the object
    /// gets a random one.
    pub fn load_object_from_file(
        &mut self,
        path: impl AsRef<Path>,
        position: Point3<f32>,
        color: Option<Color>,
    ) -> Option<ObjectId> {
        let path = path.as_ref();
        let mesh = match loader::load_mesh(path) {
            Ok(mesh) => mesh,
            Err(error) => {
                tracing::warn!(%error, "could not load mesh");
                return None;
            }
        };

        let color = color.unwrap_or_else(|| Color::random(&mut rand::thread_rng()));
        match self.add_mesh(position, mesh, color) {
            Ok(id) => Some(id),
            Err(error) => {
                tracing::warn!(path = %path.display(), %error, "mesh file produced no usable object");
                None
            }
        }
    }

    pub fn object(&self, id: ObjectId) -> Option<&MeshObject> {
        self.objects.get(id.0)
    }

    pub fn object_mut(&mut self, id: ObjectId) -> Option<&mut MeshObject> {
        self.objects.get_mut(id.0)
    }

    pub fn objects(&self) -> impl Iterator<Item = (ObjectId, &MeshObject)> {
        self.objects
            .iter()
            .enumerate()
            .map(|(index, object)| (ObjectId(index), object))
    }

    pub fn objects_mut(&mut self) -> impl Iterator<Item = &mut MeshObject> {
        self.objects.iter_mut()
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Move the camera by `delta`. No bounds are enforced.
    pub fn move_camera(&mut self, delta: Vector3<f32>) {
        self.camera.translate(&delta);
    }

    pub fn set_camera_position(&mut self, position: Point3<f32>) {
        self.camera.position = position;
    }

    /// Change the focal length, clamped to at least 1. Returns the new value.
    pub fn adjust_screen_dist(&mut self, delta: f32) -> f32 {
        self.camera.adjust_screen_dist(delta)
    }

    pub fn light_mode(&self) -> bool {
        self.light_mode
    }

    pub fn set_light_mode(&mut self, light_mode: bool) {
        self.light_mode = light_mode;
    }

    pub fn background(&self) -> Color {
        if self.light_mode {
            self.config.light_background
        } else {
            self.config.background
        }
    }

    /// Apply held camera actions for a tick lasting `dt` seconds.
    pub fn apply_actions(&mut self, actions: impl IntoIterator<Item = CameraAction>, dt: f32) {
        let step = self.config.camera_speed * dt;
        let zoom = self.config.zoom_speed * dt;

        for action in actions {
            match action {
                CameraAction::Left => self.move_camera(Vector3::new(-step, 0.0, 0.0)),
                CameraAction::Right => self.move_camera(Vector3::new(step, 0.0, 0.0)),
                CameraAction::Up => self.move_camera(Vector3::new(0.0, -step, 0.0)),
                CameraAction::Down => self.move_camera(Vector3::new(0.0, step, 0.0)),
                CameraAction::Forward => self.move_camera(Vector3::new(0.0, 0.0, step)),
                CameraAction::Back => self.move_camera(Vector3::new(0.0, 0.0, -step)),
                CameraAction::ZoomIn => {
                    self.adjust_screen_dist(zoom);
                }
                CameraAction::ZoomOut => {
                    self.adjust_screen_dist(-zoom);
                }
            }
        }
    }

    /// Draw one frame: clear, mark the surface center, project and draw every
    /// object in registration order, then present.
    ///
    /// Objects paint over the center marker.
    pub fn render<S: RenderSurface>(&mut self, surface: &mut S) -> Result<(), S::Error> {
        surface.clear(self.background());
        surface.draw_circle(self.camera.center(), MARKER_RADIUS, self.config.center_marker);

        for object in &mut self.objects {
            object.project(&self.camera);
            object.draw(surface, &self.camera);
        }

        surface.present()
    }
}
