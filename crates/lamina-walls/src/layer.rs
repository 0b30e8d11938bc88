//! Layer and region data model, plus the per-layer post-processing pass.

use crate::contour::ContourSet;
use crate::walls::WallGenerator;

/// One connected printable area of a layer's cross-section.
#[derive(Debug, Clone, PartialEq)]
pub struct Region {
    /// The original slice outline. Never modified by wall generation.
    pub boundary: ContourSet,
    /// Wall centerlines, outermost first; each entry is an inward offset
    /// of the previous one. Never longer than the requested wall count.
    pub walls: Vec<ContourSet>,
    /// The boundary later stages use to place infill.
    pub fill_boundary: ContourSet,
}

impl Region {
    /// Create a region from its slice outline.
    pub fn new(boundary: ContourSet) -> Self {
        Self {
            boundary,
            walls: Vec::new(),
            fill_boundary: ContourSet::new(),
        }
    }
}

/// One horizontal cross-section of the model: the regions printed at a
/// single Z height. Exclusively owned by the task processing it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Layer {
    /// The regions of this cross-section. Order carries no meaning and
    /// is not preserved by pruning.
    pub regions: Vec<Region>,
}

impl Layer {
    /// Create a layer from its regions.
    pub fn new(regions: Vec<Region>) -> Self {
        Self { regions }
    }
}

/// Generate walls for every region of `layer`, then prune the regions
/// that produced none.
///
/// A region with zero walls is too small to print, and every later
/// stage assumes each retained region has at least one wall. Pruning
/// (when enabled in the settings) swap-removes such regions, so the
/// relative order of the remaining regions is not preserved.
pub fn process_layer(generator: &WallGenerator<'_>, layer: &mut Layer) {
    for region in &mut layer.regions {
        generator.generate(region);
    }

    if generator.settings().prune_wallless_regions {
        let mut i = 0;
        while i < layer.regions.len() {
            if layer.regions[i].walls.is_empty() {
                // The last element lands at i and has not been examined
                // yet, so do not advance.
                layer.regions.swap_remove(i);
            } else {
                i += 1;
            }
        }
    }
}
