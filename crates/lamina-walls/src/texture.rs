//! Pluggable surface texturing for the outer wall.

use lamina_math::right_normal;

use crate::contour::{ContourSet, Polygon};

/// A perturbation applied to the outer wall to produce a textured
/// surface finish.
///
/// Implementations must be deterministic for a given
/// `(layer_index, contours)` pair and safe to invoke concurrently from
/// the per-layer tasks; the strategy is the only object shared across
/// layers.
pub trait TextureStrategy: Send + Sync {
    /// Return a perturbed copy of `contours` enclosing approximately the
    /// same region, with altered vertex positions and count.
    fn apply(&self, layer_index: usize, contours: &ContourSet) -> ContourSet;
}

/// Wavy-wall texture: resamples each contour at a fixed spacing and
/// jitters the samples along the local edge normal, seeded by the layer
/// index so the waves shift from layer to layer.
#[derive(Debug, Clone, Copy)]
pub struct WavyTexture {
    /// Maximum displacement to either side of the nominal wall (mm).
    pub amplitude: f64,
    /// Approximate distance between samples along the contour (mm).
    pub spacing: f64,
}

impl Default for WavyTexture {
    fn default() -> Self {
        Self {
            amplitude: 0.15,
            spacing: 0.75,
        }
    }
}

impl TextureStrategy for WavyTexture {
    fn apply(&self, layer_index: usize, contours: &ContourSet) -> ContourSet {
        let mut state = seed(layer_index);
        let polygons = contours
            .polygons
            .iter()
            .map(|poly| self.perturb(poly, &mut state))
            .collect();
        ContourSet::from_polygons(polygons)
    }
}

impl WavyTexture {
    fn perturb(&self, poly: &Polygon, state: &mut u64) -> Polygon {
        let n = poly.len();
        if n < 3 || self.amplitude <= 0.0 || self.spacing <= 0.0 {
            return poly.clone();
        }

        let mut points = Vec::with_capacity(n * 2);
        for i in 0..n {
            let p = poly.points[i];
            let q = poly.points[(i + 1) % n];
            let edge = q - p;
            let len = edge.norm();
            if len <= 0.0 {
                continue;
            }
            let dir = edge / len;
            let normal = right_normal(&dir);

            // Original vertex, displaced
            points.push(p + normal * self.displacement(state));
            // Interior samples along the edge
            let mut t = self.spacing;
            while t < len {
                points.push(p + dir * t + normal * self.displacement(state));
                t += self.spacing;
            }
        }

        if points.len() < 3 {
            return poly.clone();
        }
        Polygon::new(points)
    }

    fn displacement(&self, state: &mut u64) -> f64 {
        (next_f64(state) * 2.0 - 1.0) * self.amplitude
    }
}

/// Mix the layer index into a non-zero xorshift seed.
fn seed(layer_index: usize) -> u64 {
    (layer_index as u64 ^ 0x5DEE_CE66_D001)
        .wrapping_mul(0x9E37_79B9_7F4A_7C15)
        | 1
}

fn next_u64(state: &mut u64) -> u64 {
    let mut x = *state;
    x ^= x << 13;
    x ^= x >> 7;
    x ^= x << 17;
    *state = x;
    x
}

/// Uniform sample in `[0, 1)`.
fn next_f64(state: &mut u64) -> f64 {
    (next_u64(state) >> 11) as f64 / (1u64 << 53) as f64
}
