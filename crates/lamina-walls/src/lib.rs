#![warn(missing_docs)]

//! Wall (inset) generation for the lamina slicing pipeline.
//!
//! Given the sliced cross-sections of a model, this crate computes the
//! concentric wall contours printed for each region of each layer and
//! the boundary later stages use to place infill, then prunes regions
//! too small to print.
//!
//! # Example
//!
//! ```ignore
//! use lamina_walls::{generate_walls, Layer, WallSettings};
//!
//! let mut layers: Vec<Layer> = // ... from the slicing stage
//! let settings = WallSettings::default();
//! generate_walls(&mut layers, &settings, None)?;
//!
//! for layer in &layers {
//!     for region in &layer.regions {
//!         assert!(!region.walls.is_empty());
//!     }
//! }
//! ```

pub mod contour;
pub mod error;
pub mod layer;
pub mod texture;
pub mod walls;

pub use contour::{ContourSet, JoinStyle, Polygon};
pub use error::{Result, WallsError};
pub use layer::{process_layer, Layer, Region};
pub use texture::{TextureStrategy, WavyTexture};
pub use walls::WallGenerator;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// Wall-width parameters, bound once per print job.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WallSettings {
    /// Extra inward inset applied to the outer wall only (mm).
    pub wall_0_inset: f64,
    /// Extrusion line width of the outer wall (mm).
    pub line_width_0: f64,
    /// Extrusion line width of the inner walls (mm).
    pub line_width_x: f64,
    /// Number of walls to generate per region.
    pub wall_count: u32,
    /// Recompute the fill boundary from the printed extent of the outer
    /// wall instead of copying the raw slice outline.
    pub recompute_fill_boundary: bool,
    /// Remove regions that produced no walls from their layer.
    pub prune_wallless_regions: bool,
    /// Apply the texture strategy to the outer wall.
    pub textured_walls: bool,
}

impl Default for WallSettings {
    fn default() -> Self {
        Self {
            wall_0_inset: 0.0,
            line_width_0: 0.45,
            line_width_x: 0.45,
            wall_count: 3,
            recompute_fill_boundary: false,
            prune_wallless_regions: true,
            textured_walls: false,
        }
    }
}

impl WallSettings {
    /// Validate settings.
    pub fn validate(&self) -> Result<()> {
        if self.line_width_0 <= 0.0 {
            return Err(WallsError::InvalidSettings(
                "line_width_0 must be positive".into(),
            ));
        }
        if self.line_width_x <= 0.0 {
            return Err(WallsError::InvalidSettings(
                "line_width_x must be positive".into(),
            ));
        }
        if self.wall_0_inset < 0.0 {
            return Err(WallsError::InvalidSettings(
                "wall_0_inset must not be negative".into(),
            ));
        }
        Ok(())
    }
}

/// Generate walls for every layer in parallel.
///
/// One task per layer; each task constructs its own [`WallGenerator`]
/// and owns its layer outright for the duration of the run, so no
/// mutable state is shared across layers. `texture` (used when the
/// settings enable textured walls) is the only shared object and is
/// only invoked through its deterministic, concurrency-safe contract.
pub fn generate_walls(
    layers: &mut [Layer],
    settings: &WallSettings,
    texture: Option<&dyn TextureStrategy>,
) -> Result<()> {
    settings.validate()?;

    layers.par_iter_mut().enumerate().for_each(|(index, layer)| {
        let generator = WallGenerator::new(*settings, index, texture);
        process_layer(&generator, layer);
    });

    Ok(())
}
