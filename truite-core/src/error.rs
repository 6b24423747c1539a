//! Error types for mesh loading, object construction and scene configuration

use std::path::PathBuf;

use thiserror::Error;

/// Failures while reading an external mesh file.
///
/// These never escape [`Scene::load_object_from_file`](crate::Scene::load_object_from_file);
/// the scene logs them and hands back the empty sentinel instead.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("File not found: {path}")]
    FileNotFound {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Unsupported format: {path}")]
    UnsupportedFormat { path: PathBuf },
}

/// Invariant violations rejected when a [`MeshObject`](crate::MeshObject) is built.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ObjectError {
    #[error("an object needs at least one point")]
    NoPoints,

    #[error("face {face} has no indices")]
    EmptyFace { face: usize },

    #[error("face {face} references point {index} but the object has {len} points")]
    FaceIndexOutOfRange { face: usize, index: usize, len: usize },
}

/// Rejected [`SceneConfig`](crate::SceneConfig) values.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("field of view must lie strictly between 0 and 180 degrees, got {0}")]
    FieldOfView(f32),

    #[error("screen size must be non-zero, got {width}x{height}")]
    ScreenSize { width: u32, height: u32 },
}
