//! Example: Load a single OBJ or DAE file and orbit it in the terminal
//!
//! Usage: cargo run --example load_mesh -- path/to/file.obj

use crossterm::terminal;
use nalgebra::{Point3, Vector3};
use std::env;
use std::io;
use truite_core::{Color, Scene, SceneConfig};
use truite_terminal::renderer::CELL_ASPECT;
use truite_terminal::TerminalApp;

fn main() -> io::Result<()> {
    tracing_subscriber::fmt().with_writer(io::stderr).init();

    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        eprintln!("Usage: {} <mesh-file>", args[0]);
        return Ok(());
    }

    let (columns, rows) = terminal::size()?;
    let config = SceneConfig {
        camera_position: Point3::origin(),
        ..SceneConfig::new(columns as u32, (rows as f32 * CELL_ASPECT) as u32)
    };
    let mut scene =
        Scene::new(config).map_err(|error| io::Error::new(io::ErrorKind::InvalidInput, error))?;

    let mesh_path = &args[1];
    println!("Loading mesh file: {}", mesh_path);

    let Some(id) = scene.load_object_from_file(mesh_path, Point3::origin(), Some(Color::WHITE))
    else {
        return Err(io::Error::new(
            io::ErrorKind::InvalidData,
            format!("Failed to load {}", mesh_path),
        ));
    };

    // Fit the mesh to roughly a third of the screen and push it in front of the camera
    if let Some(object) = scene.object_mut(id) {
        let extents = *object.extents();
        let largest = extents.width.max(extents.height).max(extents.depth).max(f32::EPSILON);
        let fit = columns as f32 / 3.0 / largest;
        object.scale(Vector3::repeat(fit));
        object.position = Point3::new(0.0, 0.0, columns as f32 / 2.0);
        println!("Loaded {} points, {} faces", object.points().len(), object.faces().len());
    }

    println!("Starting terminal renderer (press Q to quit)...");
    std::thread::sleep(std::time::Duration::from_secs(1));

    let mut app = TerminalApp::new(scene, columns, rows);
    app.spin(id, Vector3::new(0.0, 30.0, 0.0));
    app.run()?;

    println!("Thank you for using Truite Terminal Renderer!");
    Ok(())
}
