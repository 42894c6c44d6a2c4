//! Hit-area rasterization: template strokes drawn as thick halos, and
//! player ink measured against them.

use glam::Vec2;

use crate::api::config::RasterConfig;
use crate::core::layout::LetterBox;
use crate::raster::mask::{HitMask, PixelRect};
use crate::raster::pixmap::PixmapSurface;
use crate::raster::surface::RasterSurface;
use crate::templates::Stroke;

/// Extra device-independent margin around a segment's halo.
const SEGMENT_MARGIN: f32 = 2.0;

/// Target and covered pixel counts for one coverage measurement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CoverageSample {
    /// Set pixels of the template halo.
    pub target: usize,
    /// Halo pixels also covered by ink.
    pub covered: usize,
}

impl CoverageSample {
    /// covered / target, or 0 when there is no target.
    pub fn ratio(&self) -> f32 {
        if self.target == 0 {
            0.0
        } else {
            self.covered as f32 / self.target as f32
        }
    }
}

/// Rasterizes letter templates for one viewport.
///
/// Every call allocates its own surface and drops it before returning;
/// only counts and owned masks leave this type.
#[derive(Debug, Clone, Copy)]
pub struct Rasterizer<'a> {
    config: &'a RasterConfig,
    viewport: Vec2,
}

impl<'a> Rasterizer<'a> {
    pub fn new(config: &'a RasterConfig, viewport: Vec2) -> Self {
        Self { config, viewport }
    }

    pub fn scale(&self) -> f32 {
        self.config.raster_scale.max(0.0)
    }

    /// Whole viewport in device pixels.
    pub fn canvas_rect(&self) -> PixelRect {
        PixelRect::enclosing(Vec2::ZERO, self.viewport.max(Vec2::ZERO) * self.scale())
    }

    /// Brush width used for player ink when scoring coverage.
    pub fn ink_width(&self, tolerance: f32) -> f32 {
        tolerance * self.config.ink_width_ratio
    }

    /// Union of all template strokes as a viewport-sized mask.
    ///
    /// The mask spans the whole canvas so a validator can tell "outside the
    /// halo" apart from "outside the canvas".
    pub fn rasterize_template(&self, strokes: &[Stroke], letter_box: &LetterBox, tolerance: f32) -> HitMask {
        let mut surface = PixmapSurface::new(self.canvas_rect(), self.scale());
        for stroke in to_canvas(strokes, letter_box) {
            surface.draw_thick_polyline(&stroke, tolerance);
        }
        surface.read_mask(self.config.alpha_threshold)
    }

    /// Coverage of a single template stroke, measured on a surface bounded
    /// to that stroke's padded bounding box.
    pub fn segment_coverage(
        &self,
        segment: &Stroke,
        letter_box: &LetterBox,
        ink: &[Vec<Vec2>],
        tolerance: f32,
    ) -> CoverageSample {
        let template = to_canvas(std::slice::from_ref(segment), letter_box);
        self.measure(&template, ink, tolerance)
    }

    /// Coverage of the whole letter at once.
    pub fn letter_coverage(
        &self,
        strokes: &[Stroke],
        letter_box: &LetterBox,
        ink: &[Vec<Vec2>],
        tolerance: f32,
    ) -> CoverageSample {
        let template = to_canvas(strokes, letter_box);
        self.measure(&template, ink, tolerance)
    }

    fn measure(&self, template: &[Vec<Vec2>], ink: &[Vec<Vec2>], tolerance: f32) -> CoverageSample {
        let rect = self.padded_bounds(template, tolerance);
        let mut surface = PixmapSurface::new(rect, self.scale());
        for stroke in template {
            surface.draw_thick_polyline(stroke, tolerance);
        }

        let threshold = self.config.alpha_threshold;
        let target = surface.count_set_pixels(rect, threshold);
        if target == 0 || ink.is_empty() {
            return CoverageSample { target, covered: 0 };
        }

        surface.composite_masked_strokes(ink, self.ink_width(tolerance));
        let covered = surface.count_set_pixels(rect, threshold);
        CoverageSample { target, covered }
    }

    /// Device-pixel bounds of the halo around `strokes`, clipped to the canvas.
    fn padded_bounds(&self, strokes: &[Vec<Vec2>], tolerance: f32) -> PixelRect {
        let mut points = strokes.iter().flatten();
        let Some(&first) = points.next() else {
            return PixelRect::EMPTY;
        };
        let (min, max) = points.fold((first, first), |(lo, hi), &p| (lo.min(p), hi.max(p)));
        let pad = Vec2::splat(tolerance / 2.0 + SEGMENT_MARGIN);
        let scale = self.scale();
        PixelRect::enclosing((min - pad) * scale, (max + pad) * scale).intersect(&self.canvas_rect())
    }
}

fn to_canvas(strokes: &[Stroke], letter_box: &LetterBox) -> Vec<Vec<Vec2>> {
    strokes
        .iter()
        .map(|s| s.iter().map(|&p| letter_box.to_canvas(p)).collect())
        .collect()
}
