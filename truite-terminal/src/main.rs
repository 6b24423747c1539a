//! Truite Terminal Demo
//!
//! Renders the classic three-object scene (a spinning cube, a pyramid and an
//! octagonal prism) plus any OBJ or DAE files given on the command line.
//! Controls:
//!   - A/D, W/S, Up/Down: Move the camera
//!   - +/- or Right/Left: Change the focal length
//!   - F: Toggle filled faces
//!   - Space: Light mode while held (toggles on terminals without key release events)
//!   - Q/ESC: Quit

use crossterm::terminal;
use nalgebra::{Point3, Vector3};
use std::env;
use std::io;
use tracing_subscriber::EnvFilter;
use truite_core::{Color, MeshData, Scene, SceneConfig};
use truite_terminal::renderer::CELL_ASPECT;
use truite_terminal::TerminalApp;

/// The demo scene was laid out for a 500x480 window.
const DESIGN_SIZE: (f32, f32) = (500.0, 480.0);

fn main() -> io::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    println!("Truite Terminal Renderer - Loading...");

    let (columns, rows) = terminal::size()?;
    let width = columns as u32;
    let height = (rows as f32 * CELL_ASPECT) as u32;
    let fit = (width as f32 / DESIGN_SIZE.0).min(height as f32 / DESIGN_SIZE.1);

    let defaults = SceneConfig::new(width, height);
    let config = SceneConfig {
        camera_position: defaults.camera_position * fit,
        camera_speed: defaults.camera_speed * fit,
        ..defaults
    };
    let mut scene =
        Scene::new(config).map_err(|error| io::Error::new(io::ErrorKind::InvalidInput, error))?;

    let mut rng = rand_color_source();
    let cube = scene
        .add_mesh(Point3::origin(), MeshData::cube(100.0), rng())
        .map_err(invalid_data)?;
    let pyramid = scene
        .create_object(
            Point3::new(0.0, 300.0, 0.0) * fit,
            vec![
                Point3::new(0.0, 0.0, 0.0),
                Point3::new(100.0, 0.0, 0.0),
                Point3::new(100.0, 0.0, 100.0),
                Point3::new(0.0, 0.0, 100.0),
                Point3::new(50.0, -100.0, 50.0),
            ],
            Vec::new(),
            rng(),
        )
        .map_err(invalid_data)?;
    let prism = scene
        .create_object(
            Point3::new(300.0, 0.0, 0.0) * fit,
            octagonal_prism(),
            Vec::new(),
            rng(),
        )
        .map_err(invalid_data)?;

    for id in [cube, pyramid, prism] {
        if let Some(object) = scene.object_mut(id) {
            object.scale(Vector3::repeat(fit));
        }
    }

    let mut loaded = Vec::new();
    for path in env::args().skip(1) {
        println!("Loading mesh file: {}", path);
        match scene.load_object_from_file(&path, Point3::new(150.0, 150.0, 200.0) * fit, None) {
            Some(id) => loaded.push(id),
            None => eprintln!("Could not load {}, see log output for details", path),
        }
    }

    println!("Starting terminal renderer (press Q to quit)...");
    std::thread::sleep(std::time::Duration::from_secs(1));

    let mut app = TerminalApp::new(scene, columns, rows);
    app.spin(cube, Vector3::new(20.0, 30.0, 0.0));
    for id in loaded {
        app.spin(id, Vector3::new(0.0, 25.0, 0.0));
    }
    app.run()?;

    println!("Thank you for using Truite Terminal Renderer!");
    Ok(())
}

/// Two stacked octagons joined along their vertical edges.
fn octagonal_prism() -> Vec<Point3<f32>> {
    let ring = [
        (25.0, 0.0),
        (75.0, 0.0),
        (100.0, 25.0),
        (100.0, 75.0),
        (75.0, 100.0),
        (25.0, 100.0),
        (0.0, 75.0),
        (0.0, 25.0),
    ];
    [0.0, 300.0]
        .into_iter()
        .flat_map(|y| ring.iter().map(move |&(x, z)| Point3::new(x, y, z)))
        .collect()
}

fn rand_color_source() -> impl FnMut() -> Color {
    let mut rng = rand::thread_rng();
    move || Color::random(&mut rng)
}

fn invalid_data(error: truite_core::ObjectError) -> io::Error {
    io::Error::new(io::ErrorKind::InvalidData, error)
}
