//! Mesh file loading for Wavefront OBJ and COLLADA (`.dae`) files
//!
//! Both readers are lenient: malformed records are logged and skipped, and
//! only a missing file or an unknown suffix fails the load as a whole.

use std::fs;
use std::path::Path;

use nalgebra::Point3;
use nom::{
    bytes::complete::{tag, take_till},
    character::complete::{digit1, multispace0, multispace1},
    combinator::{all_consuming, map_res},
    multi::{many1, separated_list0},
    number::complete::float,
    sequence::{delimited, preceded, terminated},
    IResult,
};

use crate::error::LoadError;
use crate::geometry::{Face, MeshData};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MeshFormat {
    Obj,
    Dae,
}

impl MeshFormat {
    /// Pick a format from the file suffix alone.
    pub fn from_path(path: &Path) -> Option<Self> {
        let extension = path.extension()?.to_str()?;
        if extension.eq_ignore_ascii_case("obj") {
            Some(Self::Obj)
        } else if extension.eq_ignore_ascii_case("dae") {
            Some(Self::Dae)
        } else {
            None
        }
    }

    pub fn parse(&self, input: &str) -> MeshData {
        match self {
            Self::Obj => parse_obj(input),
            Self::Dae => parse_dae(input),
        }
    }
}

/// Read and parse the mesh at `path`.
pub fn load_mesh(path: impl AsRef<Path>) -> Result<MeshData, LoadError> {
    let path = path.as_ref();
    let format = MeshFormat::from_path(path).ok_or_else(|| LoadError::UnsupportedFormat {
        path: path.to_path_buf(),
    })?;

    let data = fs::read(path).map_err(|source| LoadError::FileNotFound {
        path: path.to_path_buf(),
        source,
    })?;
    let mesh = format.parse(&String::from_utf8_lossy(&data));

    tracing::debug!(
        path = %path.display(),
        ?format,
        vertices = mesh.vertex_count(),
        faces = mesh.face_count(),
        "mesh loaded"
    );
    Ok(mesh)
}

/// Parse OBJ text. Vertex coordinates are negated on all three axes; face
/// indices are converted from 1-based to 0-based and any texture or normal
/// references after a `/` are ignored.
pub fn parse_obj(input: &str) -> MeshData {
    let mut mesh = MeshData::new();

    for (number, line) in input.lines().enumerate() {
        let line = line.trim_start();
        if line.starts_with("v ") {
            match vertex_record(line) {
                Ok((_, vertex)) => mesh.vertices.push(vertex),
                Err(error) => {
                    tracing::warn!(line = number + 1, ?error, "skipping malformed vertex record")
                }
            }
        } else if line.starts_with("f ") {
            let face = face_record(line)
                .ok()
                .and_then(|(_, indices)| to_zero_based(indices));
            match face {
                Some(face) => mesh.faces.push(face),
                None => tracing::warn!(line = number + 1, "skipping malformed face record"),
            }
        }
    }

    let vertex_count = mesh.vertex_count();
    mesh.faces.retain(|face| {
        let in_range = face.indices().iter().all(|&index| index < vertex_count);
        if !in_range {
            tracing::warn!(?face, vertex_count, "dropping face with out-of-range index");
        }
        in_range
    });

    mesh
}

fn vertex_record(input: &str) -> IResult<&str, Point3<f32>> {
    let (input, _) = tag("v")(input)?;
    let (input, x) = preceded(multispace1, float)(input)?;
    let (input, y) = preceded(multispace1, float)(input)?;
    let (input, z) = preceded(multispace1, float)(input)?;
    Ok((input, Point3::new(-x, -y, -z)))
}

fn face_record(input: &str) -> IResult<&str, Vec<usize>> {
    all_consuming(delimited(
        tag("f"),
        many1(preceded(multispace1, face_index)),
        multispace0,
    ))(input)
}

/// A vertex index, optionally followed by `/texture/normal` references.
fn face_index(input: &str) -> IResult<&str, usize> {
    terminated(
        map_res(digit1, |digits: &str| digits.parse::<usize>()),
        take_till(|c: char| c.is_whitespace()),
    )(input)
}

fn to_zero_based(indices: Vec<usize>) -> Option<Face> {
    indices
        .into_iter()
        .map(|index| index.checked_sub(1))
        .collect::<Option<Vec<_>>>()
        .map(Face::new)
}

/// Parse COLLADA text as a stream of tags.
///
/// Each `<geometry name="...">` sets the active geometry; the
/// `<float_array>` whose id is `{name}-mesh-positions-array` supplies its
/// vertex positions as consecutive triples. Line breaks are irrelevant, so
/// minified files read the same as pretty-printed ones. No faces are read
/// and coordinates are kept as written.
pub fn parse_dae(input: &str) -> MeshData {
    let mut mesh = MeshData::new();
    let mut positions_id: Option<String> = None;
    let mut rest = input;

    while let Some(start) = rest.find('<') {
        let tag = &rest[start..];
        rest = &tag[1..];

        if tag.starts_with("<geometry") {
            if let Some(name) = attribute(open_tag(tag), "name") {
                positions_id = Some(format!("{name}-mesh-positions-array"));
            }
            continue;
        }
        if !tag.starts_with("<float_array") {
            continue;
        }

        let Some(expected) = positions_id.as_deref() else {
            continue;
        };
        let open = open_tag(tag);
        if attribute(open, "id") != Some(expected) {
            continue;
        }

        let body = &tag[open.len()..];
        let payload = match body.find("</float_array>") {
            Some(end) => &body[..end],
            None => body,
        };
        rest = &body[payload.len()..];

        let values = match float_list(payload) {
            Ok((tail, values)) => {
                if !tail.is_empty() {
                    tracing::warn!(id = expected, "ignoring unparsable tail of positions array");
                }
                values
            }
            Err(error) => {
                tracing::warn!(id = expected, ?error, "skipping malformed positions array");
                continue;
            }
        };

        let triples = values.chunks_exact(3);
        if !triples.remainder().is_empty() {
            tracing::warn!(
                id = expected,
                count = values.len(),
                "positions array length is not a multiple of three"
            );
        }
        mesh.vertices
            .extend(triples.map(|xyz| Point3::new(xyz[0], xyz[1], xyz[2])));
    }

    mesh
}

/// The opening tag at the start of `tag`, up to and including its `>`.
fn open_tag(tag: &str) -> &str {
    match tag.find('>') {
        Some(end) => &tag[..=end],
        None => tag,
    }
}

/// Value of a double-quoted attribute on `line`.
fn attribute<'a>(line: &'a str, name: &str) -> Option<&'a str> {
    let pattern = format!(" {name}=\"");
    let start = line.find(&pattern)? + pattern.len();
    let rest = &line[start..];
    rest.find('"').map(|end| &rest[..end])
}

fn float_list(input: &str) -> IResult<&str, Vec<f32>> {
    delimited(multispace0, separated_list0(multispace1, float), multispace0)(input)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_obj_vertex_is_negated() {
        let mesh = parse_obj("v 1.0 2.0 3.0\n");
        assert_eq!(mesh.vertices, vec![Point3::new(-1.0, -2.0, -3.0)]);
    }

    #[test]
    fn test_obj_faces() {
        let input = "\
v 0 0 0
v 1 0 0
v 1 1 0
v 0 1 0
v 0 0 1
v 1 0 1
v 1 1 1
v 0 1 1
v 0 0 2
f 1 2 3
f 1/2/3 4/5/6 7/8/9
f 2//1 3//1 4//1
";
        let mesh = parse_obj(input);
        assert_eq!(mesh.vertex_count(), 9);
        assert_eq!(
            mesh.faces,
            vec![
                Face::new(vec![0, 1, 2]),
                Face::new(vec![0, 3, 6]),
                Face::new(vec![1, 2, 3]),
            ]
        );
    }

    #[test]
    fn test_obj_ignores_other_records() {
        let input = "\
# comment
o Cube
vn 0.0 1.0 0.0
vt 0.5 0.5
v 1 1 1
usemtl Material
s off
";
        let mesh = parse_obj(input);
        assert_eq!(mesh.vertices, vec![Point3::new(-1.0, -1.0, -1.0)]);
        assert!(mesh.faces.is_empty());
    }

    #[test]
    fn test_obj_skips_malformed_records() {
        let input = "\
v 1 2
v 1 2 3
v 4 5 6
v 7 8 9
f 0 1 2
f 1 2 x
f -1 -2 -3
f 1 2 9
f 3 2 1
";
        let mesh = parse_obj(input);
        assert_eq!(mesh.vertex_count(), 3);
        assert_eq!(mesh.faces, vec![Face::new(vec![2, 1, 0])]);
    }

    #[test]
    fn test_obj_windows_line_endings() {
        let mesh = parse_obj("v 1 2 3\r\nv 4 5 6\r\nf 1 2\r\n");
        assert_eq!(mesh.vertex_count(), 2);
        assert_eq!(mesh.faces, vec![Face::new(vec![0, 1])]);
    }

    const CUBE_DAE: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<COLLADA xmlns="http://www.collada.org/2005/11/COLLADASchema" version="1.4.1">
  <library_geometries>
    <geometry id="Cube-mesh" name="Cube">
      <mesh>
        <source id="Cube-mesh-positions">
          <float_array id="Cube-mesh-positions-array" count="6">1 1 1 1 -1 -1</float_array>
        </source>
        <source id="Cube-mesh-normals">
          <float_array id="Cube-mesh-normals-array" count="3">0 0 1</float_array>
        </source>
      </mesh>
    </geometry>
    <geometry id="Plane-mesh" name="Plane">
      <mesh>
        <source id="Plane-mesh-positions">
          <float_array id="Plane-mesh-positions-array" count="7">
            -2.5 0 3
            4 5e-1 6
            9
          </float_array>
        </source>
      </mesh>
    </geometry>
  </library_geometries>
</COLLADA>
"#;

    #[test]
    fn test_dae_positions() {
        let mesh = parse_dae(CUBE_DAE);
        assert_eq!(
            mesh.vertices,
            vec![
                Point3::new(1.0, 1.0, 1.0),
                Point3::new(1.0, -1.0, -1.0),
                Point3::new(-2.5, 0.0, 3.0),
                Point3::new(4.0, 0.5, 6.0),
            ]
        );
        assert!(mesh.faces.is_empty());
    }

    #[test]
    fn test_dae_single_line() {
        let input = concat!(
            r#"<COLLADA><library_materials><material id="Material-material" name="Material"/>"#,
            r#"</library_materials><library_geometries><geometry id="Cube-mesh" name="Cube"><mesh>"#,
            r#"<source id="Cube-mesh-normals"><float_array id="Cube-mesh-normals-array" count="3">0 0 1</float_array></source>"#,
            r#"<source id="Cube-mesh-positions"><float_array id="Cube-mesh-positions-array" count="3">1 2 3</float_array></source>"#,
            r#"</mesh></geometry></library_geometries></COLLADA>"#,
        );
        let mesh = parse_dae(input);
        assert_eq!(mesh.vertices, vec![Point3::new(1.0, 2.0, 3.0)]);
    }

    #[test]
    fn test_dae_without_geometry() {
        let input = r#"<float_array id="-mesh-positions-array" count="3">1 2 3</float_array>"#;
        assert!(parse_dae(input).is_empty());
    }

    #[test]
    fn test_attribute() {
        let line = r#"<geometry id="Cube-mesh" name="Cube">"#;
        assert_eq!(attribute(line, "name"), Some("Cube"));
        assert_eq!(attribute(line, "id"), Some("Cube-mesh"));
        assert_eq!(attribute(line, "count"), None);
    }

    #[test]
    fn test_format_from_suffix() {
        assert_eq!(MeshFormat::from_path(Path::new("a/b.obj")), Some(MeshFormat::Obj));
        assert_eq!(MeshFormat::from_path(Path::new("scene.DAE")), Some(MeshFormat::Dae));
        assert_eq!(MeshFormat::from_path(Path::new("cloud.xyz")), None);
        assert_eq!(MeshFormat::from_path(Path::new("obj")), None);
    }

    #[test]
    fn test_unsupported_suffix_is_checked_first() {
        let result = load_mesh("does/not/exist.xyz");
        assert!(matches!(result, Err(LoadError::UnsupportedFormat { .. })));
    }

    #[test]
    fn test_missing_file() {
        let result = load_mesh("does/not/exist.obj");
        assert!(matches!(result, Err(LoadError::FileNotFound { .. })));
    }
}
