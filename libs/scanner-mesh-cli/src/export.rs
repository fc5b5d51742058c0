//! # Mesh Export
//!
//! Writes the rendered mesh in the format named by the output extension.
//!
//! | Extension | Format           | Face colors |
//! |-----------|------------------|-------------|
//! | `.ply`    | ASCII PLY        | RGBA        |
//! | `.stl`    | ASCII STL        | no          |
//! | `.obj`    | Wavefront OBJ    | no          |

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use ply_rs::ply::{
    Addable, DefaultElement, ElementDef, Encoding, Ply, Property, PropertyDef, PropertyType,
    ScalarType,
};
use ply_rs::writer::Writer;
use scanner_mesh::{Mesh, MeshSink, ScannerMeshError, ScannerMeshResult};

/// Supported output formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MeshFormat {
    /// Polygon File Format with per-face colors.
    Ply,
    /// Stereolithography, geometry only.
    Stl,
    /// Wavefront OBJ, geometry only.
    Obj,
}

impl MeshFormat {
    /// Detects the format from a file extension, case-insensitively.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Option<Self> {
        let ext = path.as_ref().extension()?.to_str()?.to_lowercase();
        match ext.as_str() {
            "ply" => Some(Self::Ply),
            "stl" => Some(Self::Stl),
            "obj" => Some(Self::Obj),
            _ => None,
        }
    }

    /// Canonical extension.
    pub const fn extension(&self) -> &'static str {
        match self {
            Self::Ply => "ply",
            Self::Stl => "stl",
            Self::Obj => "obj",
        }
    }
}

/// Writes `mesh` to `writer` in `format`.
pub fn write_mesh<W: Write>(mesh: &Mesh, format: MeshFormat, writer: &mut W) -> io::Result<()> {
    match format {
        MeshFormat::Ply => write_ply(mesh, writer),
        MeshFormat::Stl => write_stl(mesh, writer),
        MeshFormat::Obj => write_obj(mesh, writer),
    }
}

/// Sink that writes the mesh to a file.
#[derive(Debug, Clone)]
pub struct FileSink {
    path: PathBuf,
    format: MeshFormat,
}

impl FileSink {
    /// Creates a sink for `path`, picking the format from its extension.
    pub fn new(path: impl Into<PathBuf>) -> ScannerMeshResult<Self> {
        let path = path.into();
        let format = MeshFormat::from_path(&path).ok_or_else(|| {
            ScannerMeshError::sink(format!(
                "unsupported output extension for {} (expected .ply, .stl or .obj)",
                path.display()
            ))
        })?;
        Ok(Self { path, format })
    }

    /// The detected format.
    pub fn format(&self) -> MeshFormat {
        self.format
    }
}

impl MeshSink for FileSink {
    fn write_mesh(&mut self, mesh: &Mesh) -> ScannerMeshResult<()> {
        let to_sink_error =
            |e: io::Error| ScannerMeshError::sink(format!("{}: {e}", self.path.display()));
        let file = File::create(&self.path).map_err(to_sink_error)?;
        let mut writer = BufWriter::new(file);
        write_mesh(mesh, self.format, &mut writer).map_err(to_sink_error)?;
        writer.flush().map_err(to_sink_error)?;
        log::info!(
            "Wrote {} ({})",
            self.path.display(),
            self.format.extension()
        );
        Ok(())
    }
}

// =============================================================================
// PLY
// =============================================================================

const COLOR_CHANNELS: [&str; 4] = ["red", "green", "blue", "alpha"];

fn write_ply<W: Write>(mesh: &Mesh, writer: &mut W) -> io::Result<()> {
    let mut ply = Ply::<DefaultElement>::new();
    ply.header.encoding = Encoding::Ascii;
    ply.header
        .comments
        .push("scanner detector geometry".to_string());

    let mut vertex_def = ElementDef::new("vertex".to_string());
    for axis in ["x", "y", "z"] {
        vertex_def.properties.add(PropertyDef::new(
            axis.to_string(),
            PropertyType::Scalar(ScalarType::Float),
        ));
    }
    vertex_def.count = mesh.vertex_count();
    ply.header.elements.add(vertex_def);

    let colors = mesh.face_colors();
    let mut face_def = ElementDef::new("face".to_string());
    face_def.properties.add(PropertyDef::new(
        "vertex_indices".to_string(),
        PropertyType::List(ScalarType::UChar, ScalarType::Int),
    ));
    if colors.is_some() {
        for channel in COLOR_CHANNELS {
            face_def.properties.add(PropertyDef::new(
                channel.to_string(),
                PropertyType::Scalar(ScalarType::UChar),
            ));
        }
    }
    face_def.count = mesh.triangle_count();
    ply.header.elements.add(face_def);

    let vertices = mesh
        .vertices()
        .iter()
        .map(|v| {
            let mut element = DefaultElement::new();
            element.insert("x".to_string(), Property::Float(v.x as f32));
            element.insert("y".to_string(), Property::Float(v.y as f32));
            element.insert("z".to_string(), Property::Float(v.z as f32));
            element
        })
        .collect();
    ply.payload.insert("vertex".to_string(), vertices);

    let faces = mesh
        .triangles()
        .iter()
        .enumerate()
        .map(|(index, &[a, b, c])| {
            let mut element = DefaultElement::new();
            element.insert(
                "vertex_indices".to_string(),
                Property::ListInt(vec![a as i32, b as i32, c as i32]),
            );
            if let Some(color) = colors.and_then(|colors| colors.get(index)) {
                for (channel, value) in COLOR_CHANNELS.iter().zip(color) {
                    element.insert(channel.to_string(), Property::UChar(*value));
                }
            }
            element
        })
        .collect();
    ply.payload.insert("face".to_string(), faces);

    Writer::new().write_ply(writer, &mut ply)?;
    Ok(())
}

// =============================================================================
// STL / OBJ
// =============================================================================

fn write_stl<W: Write>(mesh: &Mesh, writer: &mut W) -> io::Result<()> {
    writeln!(writer, "solid scanner")?;
    for &[a, b, c] in mesh.triangles() {
        let (v0, v1, v2) = (mesh.vertex(a), mesh.vertex(b), mesh.vertex(c));
        let n = (v1 - v0).cross(v2 - v0).normalize_or_zero();
        writeln!(writer, "  facet normal {:.6e} {:.6e} {:.6e}", n.x, n.y, n.z)?;
        writeln!(writer, "    outer loop")?;
        for v in [v0, v1, v2] {
            writeln!(writer, "      vertex {:.6e} {:.6e} {:.6e}", v.x, v.y, v.z)?;
        }
        writeln!(writer, "    endloop")?;
        writeln!(writer, "  endfacet")?;
    }
    writeln!(writer, "endsolid scanner")?;
    Ok(())
}

fn write_obj<W: Write>(mesh: &Mesh, writer: &mut W) -> io::Result<()> {
    writeln!(writer, "# scanner detector geometry")?;
    for v in mesh.vertices() {
        writeln!(writer, "v {} {} {}", v.x, v.y, v.z)?;
    }
    // OBJ indices are 1-based
    for &[a, b, c] in mesh.triangles() {
        writeln!(writer, "f {} {} {}", a + 1, b + 1, c + 1)?;
    }
    Ok(())
}
