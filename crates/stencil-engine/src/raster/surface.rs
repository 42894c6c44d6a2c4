use glam::Vec2;

use crate::raster::mask::{HitMask, PixelRect};

/// An off-screen alpha surface the hit-area rasterizer draws into.
///
/// Points are given in canvas units; implementations map them to device
/// pixels with their own scale. Lines are stroked with round caps and
/// round joins.
pub trait RasterSurface {
    /// Device-pixel region backed by this surface.
    fn bounds(&self) -> PixelRect;

    /// Device pixels per canvas unit.
    fn scale(&self) -> f32;

    /// Stroke a polyline of the given width. A single point (or a run of
    /// identical points) draws a round dot.
    fn draw_thick_polyline(&mut self, points: &[Vec2], width: f32);

    /// Replace the content with `strokes`, clipped to the current content
    /// ("source-in" compositing).
    fn composite_masked_strokes(&mut self, strokes: &[Vec<Vec2>], width: f32);

    /// Alpha of device pixel `(x, y)`, or `None` outside the surface.
    fn alpha_at(&self, x: i32, y: i32) -> Option<u8>;

    /// Count pixels inside `region` whose alpha exceeds `threshold`.
    fn count_set_pixels(&self, region: PixelRect, threshold: u8) -> usize {
        let region = region.intersect(&self.bounds());
        let mut count = 0;
        for y in region.y..region.bottom() {
            for x in region.x..region.right() {
                if self.alpha_at(x, y).is_some_and(|a| a > threshold) {
                    count += 1;
                }
            }
        }
        count
    }

    /// Copy the alpha channel out into an owned mask.
    fn read_mask(&self, threshold: u8) -> HitMask {
        let rect = self.bounds();
        let mut alpha = Vec::with_capacity(rect.area());
        for y in rect.y..rect.bottom() {
            for x in rect.x..rect.right() {
                alpha.push(self.alpha_at(x, y).unwrap_or(0));
            }
        }
        HitMask::new(rect, self.scale(), threshold, alpha)
    }
}
