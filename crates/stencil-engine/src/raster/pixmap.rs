//! tiny-skia backed raster surface.

use glam::Vec2;
use tiny_skia::{
    Color, FillRule, LineCap, LineJoin, Mask, MaskType, Paint, PathBuilder, Pixmap, Stroke,
    Transform,
};

use crate::raster::mask::{HitMask, PixelRect};
use crate::raster::surface::RasterSurface;

/// Anti-aliased alpha surface covering a device-pixel rectangle.
///
/// An empty rectangle yields a surface with no backing pixmap: drawing is a
/// no-op and every count is zero.
pub struct PixmapSurface {
    pixmap: Option<Pixmap>,
    rect: PixelRect,
    scale: f32,
}

impl PixmapSurface {
    pub fn new(rect: PixelRect, scale: f32) -> Self {
        let pixmap = if rect.is_empty() {
            None
        } else {
            Pixmap::new(rect.width, rect.height)
        };
        let rect = match pixmap {
            Some(_) => rect,
            None => {
                if !rect.is_empty() {
                    log::warn!("raster surface allocation failed for {rect:?}");
                }
                PixelRect::EMPTY
            }
        };
        Self { pixmap, rect, scale }
    }

    /// Canvas units -> local pixmap pixels.
    fn transform(&self) -> Transform {
        Transform::from_scale(self.scale, self.scale)
            .post_translate(-(self.rect.x as f32), -(self.rect.y as f32))
    }

    fn ink() -> Paint<'static> {
        let mut paint = Paint::default();
        paint.set_color_rgba8(0, 0, 0, 255);
        paint.anti_alias = true;
        paint
    }

    fn stroke_into(
        pixmap: &mut Pixmap,
        transform: Transform,
        points: &[Vec2],
        width: f32,
        clip: Option<&Mask>,
    ) {
        let Some(&first) = points.first() else {
            return;
        };
        if width <= 0.0 {
            return;
        }
        let paint = Self::ink();

        if points.iter().all(|p| *p == first) {
            if let Some(dot) = PathBuilder::from_circle(first.x, first.y, width / 2.0) {
                pixmap.fill_path(&dot, &paint, FillRule::Winding, transform, clip);
            }
            return;
        }

        let mut pb = PathBuilder::new();
        pb.move_to(first.x, first.y);
        for p in &points[1..] {
            pb.line_to(p.x, p.y);
        }
        let Some(path) = pb.finish() else {
            return;
        };

        let stroke = Stroke {
            width,
            line_cap: LineCap::Round,
            line_join: LineJoin::Round,
            ..Stroke::default()
        };
        pixmap.stroke_path(&path, &paint, &stroke, transform, clip);
    }
}

impl RasterSurface for PixmapSurface {
    fn bounds(&self) -> PixelRect {
        self.rect
    }

    fn scale(&self) -> f32 {
        self.scale
    }

    fn draw_thick_polyline(&mut self, points: &[Vec2], width: f32) {
        let transform = self.transform();
        if let Some(pixmap) = self.pixmap.as_mut() {
            Self::stroke_into(pixmap, transform, points, width, None);
        }
    }

    fn composite_masked_strokes(&mut self, strokes: &[Vec<Vec2>], width: f32) {
        let transform = self.transform();
        let Some(pixmap) = self.pixmap.as_mut() else {
            return;
        };
        let clip = Mask::from_pixmap(pixmap.as_ref(), MaskType::Alpha);
        pixmap.fill(Color::TRANSPARENT);
        for stroke in strokes {
            Self::stroke_into(pixmap, transform, stroke, width, Some(&clip));
        }
    }

    fn alpha_at(&self, x: i32, y: i32) -> Option<u8> {
        let pixmap = self.pixmap.as_ref()?;
        let index = self.rect.index_of(x, y)?;
        pixmap.pixels().get(index).map(|p| p.alpha())
    }

    fn count_set_pixels(&self, region: PixelRect, threshold: u8) -> usize {
        let Some(pixmap) = self.pixmap.as_ref() else {
            return 0;
        };
        let region = region.intersect(&self.rect);
        if region.is_empty() {
            return 0;
        }
        let pixels = pixmap.pixels();
        let stride = self.rect.width as usize;
        let x0 = (region.x - self.rect.x) as usize;
        let x1 = x0 + region.width as usize;
        (region.y..region.bottom())
            .map(|y| {
                let row = (y - self.rect.y) as usize * stride;
                pixels[row + x0..row + x1]
                    .iter()
                    .filter(|p| p.alpha() > threshold)
                    .count()
            })
            .sum()
    }

    fn read_mask(&self, threshold: u8) -> HitMask {
        match self.pixmap.as_ref() {
            Some(pixmap) => {
                let alpha = pixmap.pixels().iter().map(|p| p.alpha()).collect();
                HitMask::new(self.rect, self.scale, threshold, alpha)
            }
            None => HitMask::empty(self.scale, threshold),
        }
    }
}
