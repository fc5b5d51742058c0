//! # Scanner Mesh
//!
//! Turns a scanner's replicated detector geometry into a single colored
//! triangle mesh.
//!
//! ## Architecture
//!
//! ```text
//! ScannerSource → ScannerHeader → traversal → Vec<Mesh> ─┐
//!                      │              ↑                  ├→ concatenate → MeshSink
//!                      └→ efficiency → color   FOV cylinder ┘
//! ```
//!
//! ## Modes
//!
//! - **Per element**: one box per crystal instance
//! - **Per module** (`modules_only`): one convex hull per module instance
//!
//! ## Usage
//!
//! ```rust
//! use config::constants::EngineConfig;
//! use glam::DVec3;
//! use scanner_mesh::header::*;
//! use scanner_mesh::transform::RigidTransform;
//! use scanner_mesh::{render_scanner, RenderOptions};
//!
//! let crystal = SolidVolume { shape: BoxShape::centered(DVec3::ONE), material_id: 0 };
//! let module = ReplicatedModule {
//!     object: DetectorModule {
//!         detecting_elements: vec![ReplicatedDetectingElement {
//!             object: crystal,
//!             transforms: vec![RigidTransform::IDENTITY],
//!         }],
//!     },
//!     transforms: vec![RigidTransform::IDENTITY],
//! };
//! let mut header = ScannerHeader::default();
//! header.scanner.scanner_geometry.replicated_modules.push(module);
//!
//! let mesh = render_scanner(&header, &RenderOptions::default(), &EngineConfig::default()).unwrap();
//! assert_eq!(mesh.triangle_count(), 12);
//! ```

pub mod color;
pub mod efficiency;
pub mod error;
pub mod header;
pub mod mesh;
pub mod ops;
pub mod options;
pub mod primitives;
pub mod source;
pub mod transform;
pub mod traversal;

use config::constants::{EngineConfig, FOV_COLOR};

pub use error::{ScannerMeshError, ScannerMeshResult};
pub use header::ScannerHeader;
pub use mesh::{Mesh, Rgba};
pub use options::{Fov, RenderOptions};
pub use source::{load_header, MeshSink, ScannerSource};
pub use traversal::build_solids;

/// Renders the scanner and optional field of view cylinder into one mesh.
///
/// The cylinder, when requested, is appended after every detector solid.
pub fn render_scanner(
    header: &ScannerHeader,
    options: &RenderOptions,
    config: &EngineConfig,
) -> ScannerMeshResult<Mesh> {
    if let Some(fov) = &options.fov {
        fov.validate()?;
    }

    let mut solids = build_solids(header, options, config)?;

    if let Some(fov) = &options.fov {
        let mut cylinder =
            primitives::create_cylinder(fov.radius, fov.height, config.cylinder_segments)?;
        cylinder.set_uniform_color(FOV_COLOR);
        solids.push(cylinder);
    }

    Ok(ops::concatenate(&solids))
}

/// Reads a scanner from `source`, renders it and hands the mesh to `sink`.
pub fn export_scanner<S, K>(
    source: &mut S,
    sink: &mut K,
    options: &RenderOptions,
    config: &EngineConfig,
) -> ScannerMeshResult<Mesh>
where
    S: ScannerSource + ?Sized,
    K: MeshSink + ?Sized,
{
    let header = load_header(source)?;
    let mesh = render_scanner(&header, options, config)?;
    log::info!(
        "Writing mesh with {} vertices and {} triangles",
        mesh.vertex_count(),
        mesh.triangle_count()
    );
    sink.write_mesh(&mesh)?;
    Ok(mesh)
}
