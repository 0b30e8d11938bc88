//! Wall (inset) generation for one region of a layer.

use crate::contour::JoinStyle;
use crate::layer::Region;
use crate::texture::TextureStrategy;
use crate::WallSettings;

/// Computes the concentric wall contours for the regions of one layer.
///
/// One generator is constructed per layer; the per-layer tasks never
/// share a generator or the layers it touches, so no synchronization is
/// needed. The generator is immutable after construction.
pub struct WallGenerator<'a> {
    settings: WallSettings,
    layer_index: usize,
    texture: Option<&'a dyn TextureStrategy>,
}

impl<'a> WallGenerator<'a> {
    /// Create a generator for the layer at `layer_index`.
    ///
    /// `texture` is bound only when the settings enable textured walls;
    /// the layer index makes the texture deterministic per layer.
    pub fn new(
        settings: WallSettings,
        layer_index: usize,
        texture: Option<&'a dyn TextureStrategy>,
    ) -> Self {
        Self {
            texture: if settings.textured_walls {
                texture
            } else {
                None
            },
            settings,
            layer_index,
        }
    }

    /// The settings this generator was constructed with.
    pub fn settings(&self) -> &WallSettings {
        &self.settings
    }

    /// Generate the walls and fill boundary for one region.
    ///
    /// Walls are computed outside-in; wall `i` is an inward offset of
    /// wall `i - 1`. Generation stops early when the remaining material
    /// is too thin for another wall, so a region may end up with fewer
    /// walls than requested — the empty attempt is discarded, never
    /// kept. A region that is too thin for even the outer wall keeps an
    /// empty wall list and is a candidate for pruning.
    ///
    /// Expects a freshly sliced region: `walls` empty, `fill_boundary`
    /// unset.
    pub fn generate(&self, region: &mut Region) {
        let s = &self.settings;

        if s.wall_count == 0 {
            region.walls.push(region.boundary.clone());
            region.fill_boundary = region.boundary.clone();
            return;
        }

        for i in 0..s.wall_count as usize {
            let mut wall = if i == 0 {
                let outer = region
                    .boundary
                    .offset(-(s.line_width_0 / 2.0 + s.wall_0_inset), JoinStyle::Round);
                match self.texture {
                    Some(texture) => texture.apply(self.layer_index, &outer),
                    None => outer,
                }
            } else if i == 1 {
                // Compensate the outer-wall inset so this wall sits at
                // the nominal spacing from the nominal outer wall.
                region.walls[0].offset(
                    -(s.line_width_0 / 2.0 - s.wall_0_inset + s.line_width_x / 2.0),
                    JoinStyle::Round,
                )
            } else {
                region.walls[i - 1].offset(-s.line_width_x, JoinStyle::Round)
            };

            // Every point removed here saves time in all later stages.
            wall.simplify();
            wall.remove_degenerate_verts();
            region.walls.push(wall);

            if i == 0 {
                region.fill_boundary = if s.recompute_fill_boundary {
                    // The actual printed extent of the outer wall, not
                    // the raw slice outline.
                    region.walls[0].offset(s.line_width_0 / 2.0, JoinStyle::Square)
                } else {
                    region.boundary.clone()
                };
            }

            if region.walls[i].is_empty() {
                region.walls.pop();
                break;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use crate::contour::{ContourSet, Polygon};
    use crate::texture::WavyTexture;
    use lamina_math::Point2;

    fn square_region(size: f64) -> Region {
        Region::new(ContourSet::from_polygons(vec![Polygon::new(vec![
            Point2::new(0.0, 0.0),
            Point2::new(size, 0.0),
            Point2::new(size, size),
            Point2::new(0.0, size),
        ])]))
    }

    fn settings(wall_count: u32) -> WallSettings {
        WallSettings {
            wall_0_inset: 0.0,
            line_width_0: 0.4,
            line_width_x: 0.4,
            wall_count,
            ..WallSettings::default()
        }
    }

    #[test]
    fn test_zero_wall_count_passes_boundary_through() {
        let generator = WallGenerator::new(settings(0), 0, None);
        let mut region = square_region(20.0);
        generator.generate(&mut region);
        assert_eq!(region.walls.len(), 1);
        assert_eq!(region.walls[0], region.boundary);
        assert_eq!(region.fill_boundary, region.boundary);
    }

    #[test]
    fn test_wall_spacing_on_square() {
        let generator = WallGenerator::new(settings(3), 0, None);
        let mut region = square_region(20.0);
        generator.generate(&mut region);
        assert_eq!(region.walls.len(), 3);

        // Inward depths from the boundary: w0/2, then w0/2 + wx/2 more,
        // then wx more. Sides: 20 - 2d.
        let side = |d: f64| (20.0 - 2.0 * d) * (20.0 - 2.0 * d);
        assert_relative_eq!(region.walls[0].area(), side(0.2), epsilon = 1e-9);
        assert_relative_eq!(region.walls[1].area(), side(0.6), epsilon = 1e-9);
        assert_relative_eq!(region.walls[2].area(), side(1.0), epsilon = 1e-9);
    }

    #[test]
    fn test_walls_nest_inward() {
        let generator = WallGenerator::new(settings(4), 0, None);
        let mut region = square_region(30.0);
        generator.generate(&mut region);
        assert_eq!(region.walls.len(), 4);
        for i in 1..region.walls.len() {
            assert!(region.walls[i].area() < region.walls[i - 1].area());
        }
    }

    #[test]
    fn test_outer_inset_is_compensated_at_wall_one() {
        let mut with_inset = settings(2);
        with_inset.wall_0_inset = 0.1;
        let generator = WallGenerator::new(with_inset, 0, None);
        let mut region = square_region(20.0);
        generator.generate(&mut region);

        let generator_plain = WallGenerator::new(settings(2), 0, None);
        let mut region_plain = square_region(20.0);
        generator_plain.generate(&mut region_plain);

        // Wall 0 sits deeper by the inset, wall 1 lands at the same
        // nominal position either way.
        assert!(region.walls[0].area() < region_plain.walls[0].area());
        assert!((region.walls[1].area() - region_plain.walls[1].area()).abs() < 1e-9);
    }

    #[test]
    fn test_thin_region_truncates_walls() {
        // 1.0mm wide strip fits the 0.4mm outer wall but not a second
        // wall 0.4mm further in.
        let mut region = Region::new(ContourSet::from_polygons(vec![Polygon::new(vec![
            Point2::new(0.0, 0.0),
            Point2::new(30.0, 0.0),
            Point2::new(30.0, 1.0),
            Point2::new(0.0, 1.0),
        ])]));
        let generator = WallGenerator::new(settings(3), 0, None);
        generator.generate(&mut region);
        assert!(region.walls.len() < 3);
        assert!(!region.walls.is_empty());
        assert!(!region.walls.last().unwrap().is_empty());
    }

    #[test]
    fn test_too_thin_region_keeps_no_walls() {
        let mut region = Region::new(ContourSet::from_polygons(vec![Polygon::new(vec![
            Point2::new(0.0, 0.0),
            Point2::new(30.0, 0.0),
            Point2::new(30.0, 0.3),
            Point2::new(0.0, 0.3),
        ])]));
        let generator = WallGenerator::new(settings(2), 0, None);
        generator.generate(&mut region);
        assert!(region.walls.is_empty());
    }

    #[test]
    fn test_fill_boundary_copied_by_default() {
        let generator = WallGenerator::new(settings(2), 0, None);
        let mut region = square_region(20.0);
        generator.generate(&mut region);
        assert_eq!(region.fill_boundary, region.boundary);
    }

    #[test]
    fn test_fill_boundary_recomputed_from_outer_wall() {
        let mut s = settings(2);
        s.recompute_fill_boundary = true;
        let generator = WallGenerator::new(s, 0, None);
        let mut region = square_region(20.0);
        generator.generate(&mut region);

        // Reconstructed from wall 0, not the raw outline: the squared
        // corners land inside the 20x20 slice outline by four chamfer
        // triangles with w0/2 legs.
        let expected = region.walls[0].offset(0.2, JoinStyle::Square);
        assert_eq!(region.fill_boundary, expected);
        assert_ne!(region.fill_boundary, region.boundary);
        assert_relative_eq!(
            region.fill_boundary.area(),
            400.0 - 4.0 * 0.5 * 0.2 * 0.2,
            epsilon = 1e-9
        );
    }

    #[test]
    fn test_textured_outer_wall_is_deterministic() {
        let texture = WavyTexture::default();
        let mut s = settings(2);
        s.textured_walls = true;

        let generator = WallGenerator::new(s, 5, Some(&texture));
        let mut a = square_region(20.0);
        let mut b = square_region(20.0);
        generator.generate(&mut a);
        generator.generate(&mut b);
        assert_eq!(a.walls[0], b.walls[0]);

        let other_layer = WallGenerator::new(s, 6, Some(&texture));
        let mut c = square_region(20.0);
        other_layer.generate(&mut c);
        assert_ne!(a.walls[0], c.walls[0]);
    }

    #[test]
    fn test_texture_ignored_when_disabled() {
        let texture = WavyTexture::default();
        let generator = WallGenerator::new(settings(2), 5, Some(&texture));
        let plain = WallGenerator::new(settings(2), 5, None);

        let mut a = square_region(20.0);
        let mut b = square_region(20.0);
        generator.generate(&mut a);
        plain.generate(&mut b);
        assert_eq!(a.walls, b.walls);
    }
}
