//! # Traversal
//!
//! Walks the replicated geometry tree, resolves every crystal placement into
//! world space and synthesizes the colored solids.
//!
//! ## Ordering
//!
//! ```text
//! for module type t          (header order)
//!   for module placement i   (transform list order)
//!     for crystal group g    (header order)
//!       for crystal placement j
//!         element index k += 1
//! ```
//!
//! `k` runs globally across module types. Placement and synthesis run on
//! rayon per module; coloring is applied afterwards in the order above so a
//! seeded random run is reproducible.

use std::ops::Range;

use config::constants::EngineConfig;
use glam::DVec3;
use log::{debug, info};
use rayon::prelude::*;

use crate::color::{ColorAssigner, ColorMode};
use crate::efficiency::{check_weights_match_geometry, extract_detector_efficiencies};
use crate::error::{ScannerMeshError, ScannerMeshResult};
use crate::header::{BoxShape, ReplicatedModule, ScannerGeometry, ScannerHeader};
use crate::mesh::Mesh;
use crate::ops::hull_from_points;
use crate::options::RenderOptions;
use crate::primitives::box_from_corners;
use crate::transform::{apply_to_box, compose, RigidTransform};

/// One module placement with its crystals resolved to world space.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedModule {
    /// Index of the replicated module type.
    pub module_type: usize,
    /// Placement index within that module type.
    pub instance: usize,
    /// Global index of this module's first element instance.
    pub first_element: usize,
    /// World-space crystal boxes, in element order.
    pub boxes: Vec<BoxShape>,
}

impl PlacedModule {
    /// Global element indices covered by this module.
    pub fn elements(&self) -> Range<usize> {
        self.first_element..self.first_element + self.boxes.len()
    }

    /// All corners of all crystals, for hull synthesis.
    pub fn corners(&self) -> Vec<DVec3> {
        self.boxes
            .iter()
            .flat_map(|shape| shape.corners.iter().copied())
            .collect()
    }
}

// =============================================================================
// PLACEMENT
// =============================================================================

/// Resolves every module placement into world-space crystal boxes.
///
/// Each crystal is placed by `compose([module, element])`, so the element
/// transform applies first. Modules are independent and resolved in
/// parallel; the output keeps traversal order.
pub fn place_modules(geometry: &ScannerGeometry) -> Vec<PlacedModule> {
    let mut jobs = Vec::with_capacity(geometry.module_instances());
    let mut next_element = 0;
    for (module_type, module) in geometry.replicated_modules.iter().enumerate() {
        let per_module = module.elements_per_module();
        for (instance, transform) in module.transforms.iter().enumerate() {
            jobs.push((module_type, instance, next_element, module, transform));
            next_element += per_module;
        }
    }

    jobs.into_par_iter()
        .map(|(module_type, instance, first_element, module, transform)| PlacedModule {
            module_type,
            instance,
            first_element,
            boxes: place_elements(module, transform),
        })
        .collect()
}

fn place_elements(module: &ReplicatedModule, module_transform: &RigidTransform) -> Vec<BoxShape> {
    module
        .object
        .detecting_elements
        .iter()
        .flat_map(|group| {
            group.transforms.iter().map(move |element_transform| {
                let world = compose(&[*module_transform, *element_transform]);
                apply_to_box(&world, &group.object.shape)
            })
        })
        .collect()
}

// =============================================================================
// SOLIDS
// =============================================================================

/// Builds the ordered, colored solid list for a scanner header.
///
/// Per-element mode yields one box per crystal; `modules_only` yields one
/// convex hull per module placement. Every configuration check runs before
/// the first solid is synthesized, so an error means nothing was produced.
/// A missing efficiency table is always an error when `show_det_eff` is set;
/// the table's shape is only checked when its weights color the solids.
pub fn build_solids(
    header: &ScannerHeader,
    options: &RenderOptions,
    config: &EngineConfig,
) -> ScannerMeshResult<Vec<Mesh>> {
    let geometry = header.geometry();
    let table = header.efficiency_table();
    if options.show_det_eff && table.is_none() {
        return Err(ScannerMeshError::MissingEfficiencyTable);
    }

    // Random colors never read the weights.
    let weighted = options.show_det_eff && !options.random_color;
    let weights = extract_detector_efficiencies(table, weighted)?;
    let mode = ColorMode::resolve(options.random_color, &weights);
    if mode == ColorMode::Efficiency {
        check_weights_match_geometry(&weights, geometry)?;
    }

    info!(
        "Traversing {} module types, {} modules, {} elements ({} mode, {:?} colors)",
        geometry.replicated_modules.len(),
        geometry.module_instances(),
        geometry.element_instances(),
        if options.modules_only { "module hull" } else { "element box" },
        mode
    );

    let modules = place_modules(geometry);

    let tolerance = config.tolerance;
    let modules_only = options.modules_only;
    let shaped: Vec<(Range<usize>, Vec<Mesh>)> = modules
        .par_iter()
        .map(|placed| {
            debug!(
                "module type {} instance {}: {} elements from index {}",
                placed.module_type,
                placed.instance,
                placed.boxes.len(),
                placed.first_element
            );
            let solids = if modules_only {
                vec![hull_from_points(&placed.corners(), tolerance)]
            } else {
                placed
                    .boxes
                    .iter()
                    .map(|shape| box_from_corners(&shape.corners))
                    .collect()
            };
            (placed.elements(), solids)
        })
        .collect();

    let mut colors = ColorAssigner::new(mode, config, options.color_seed);
    let mut solids = Vec::new();
    for (elements, meshes) in shaped {
        if modules_only {
            for mut mesh in meshes {
                mesh.set_uniform_color(colors.module_color(&weights, elements.clone()));
                solids.push(mesh);
            }
        } else {
            for (index, mut mesh) in elements.zip(meshes) {
                mesh.set_uniform_color(colors.element_color(&weights, index));
                solids.push(mesh);
            }
        }
    }

    info!("Synthesized {} solids", solids.len());
    Ok(solids)
}
