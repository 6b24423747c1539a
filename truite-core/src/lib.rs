//! Truite Core Library - scene, projection and mesh logic
//!
//! This library holds everything a host needs to render a scene of mesh
//! objects under a moving perspective camera: the projection math, the
//! per-object transforms, draw-mode selection and the mesh file readers.
//! Hosts supply a [`RenderSurface`] and drive [`Scene::render`] once per frame.

pub mod color;
pub mod config;
pub mod error;
pub mod geometry;
pub mod input;
pub mod loader;
pub mod object;
pub mod projection;
pub mod scene;
pub mod surface;
pub mod transform;

// Re-export commonly used types
pub use color::Color;
pub use config::SceneConfig;
pub use error::{ConfigError, LoadError, ObjectError};
pub use geometry::{Extents, Face, MeshData, Point};
pub use input::{CameraAction, KeyBindings, KeyState};
pub use loader::{load_mesh, MeshFormat};
pub use object::{DrawStrategy, MeshObject, RenderMode};
pub use projection::Camera;
pub use scene::{ObjectId, Scene};
pub use surface::RenderSurface;
pub use transform::RotationState;
