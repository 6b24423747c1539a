use std::fs;

use nalgebra::Point3;
use truite_core::{load_mesh, Color, Face, LoadError, RenderMode, Scene, SceneConfig};

const TETRAHEDRON_OBJ: &str = "\
# tetrahedron
v 0.0 0.0 0.0
v 10.0 0.0 0.0
v 0.0 10.0 0.0
v 0.0 0.0 10.0
f 1 2 3
f 1/1/1 2/2/2 4/4/4
f 1//1 3//1 4//1
f 2 3 4
";

fn scene() -> Scene {
    Scene::new(SceneConfig::default()).unwrap()
}

#[test]
fn test_load_obj_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tetrahedron.obj");
    fs::write(&path, TETRAHEDRON_OBJ).unwrap();

    let mesh = load_mesh(&path).unwrap();
    assert_eq!(mesh.vertex_count(), 4);
    assert_eq!(mesh.vertices[1], Point3::new(-10.0, -0.0, -0.0));
    assert_eq!(mesh.faces[1], Face::new(vec![0, 1, 3]));
}

#[test]
fn test_scene_loads_obj_with_faces() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tetrahedron.obj");
    fs::write(&path, TETRAHEDRON_OBJ).unwrap();

    let mut scene = scene();
    let id = scene
        .load_object_from_file(&path, Point3::new(1.0, 2.0, 3.0), Some(Color::WHITE))
        .expect("object should load");

    let object = scene.object(id).unwrap();
    assert_eq!(object.position, Point3::new(1.0, 2.0, 3.0));
    assert_eq!(object.color, Color::WHITE);
    assert_eq!(object.faces().len(), 4);
    assert_eq!(object.mode, RenderMode::Wireframe);
    assert_eq!(object.extents().width, 10.0);
}

#[test]
fn test_scene_loads_dae_positions() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("triangle.dae");
    fs::write(
        &path,
        r#"<COLLADA>
  <library_geometries>
    <geometry id="Tri-mesh" name="Tri">
      <mesh>
        <source id="Tri-mesh-positions">
          <float_array id="Tri-mesh-positions-array" count="9">0 0 0 1 0 0 0 1 0</float_array>
        </source>
      </mesh>
    </geometry>
  </library_geometries>
</COLLADA>
"#,
    )
    .unwrap();

    let mut scene = scene();
    let id = scene
        .load_object_from_file(&path, Point3::origin(), None)
        .expect("object should load");

    let object = scene.object(id).unwrap();
    assert_eq!(object.points().len(), 3);
    assert!(object.faces().is_empty());
    assert_eq!(*object.points()[1].origin(), Point3::new(1.0, 0.0, 0.0));
}

#[test]
fn test_unsupported_format_is_not_loaded() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("cloud.xyz");
    fs::write(&path, "1 2 3\n").unwrap();

    assert!(matches!(
        load_mesh(&path),
        Err(LoadError::UnsupportedFormat { .. })
    ));

    let mut scene = scene();
    assert!(scene
        .load_object_from_file(&path, Point3::origin(), None)
        .is_none());
    assert!(scene.is_empty());
}

#[test]
fn test_missing_file_is_not_loaded() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing.obj");

    assert!(matches!(load_mesh(&path), Err(LoadError::FileNotFound { .. })));

    let mut scene = scene();
    assert!(scene
        .load_object_from_file(&path, Point3::origin(), None)
        .is_none());
}

#[test]
fn test_file_without_vertices_is_not_loaded() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("empty.obj");
    fs::write(&path, "# nothing here\n").unwrap();

    let mut scene = scene();
    assert!(scene
        .load_object_from_file(&path, Point3::origin(), None)
        .is_none());
    assert!(scene.is_empty());
}
