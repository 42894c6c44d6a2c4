//! Word layout on the handwriting guide lines.
//!
//! Letter boxes sit between the sky line (top) and the grass line
//! (baseline), side by side with a constant gap, centered horizontally.
//! Metrics are derived data: recompute them whenever the viewport or the
//! word changes, or hit-testing drifts away from what the player sees.

use glam::Vec2;
use serde::Serialize;

use crate::api::config::LayoutConfig;

/// Axis-aligned box a letter template is stretched into.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LetterBox {
    /// Top-left corner in canvas units.
    pub origin: Vec2,
    /// Width and height in canvas units.
    pub size: Vec2,
}

impl LetterBox {
    /// Map a unit-square template point into canvas space.
    pub fn to_canvas(&self, unit: Vec2) -> Vec2 {
        self.origin + unit * self.size
    }

    /// Map a canvas point into this box's unit space. A degenerate box maps everything to the origin.
    pub fn to_unit(&self, canvas: Vec2) -> Vec2 {
        if self.size.x <= 0.0 || self.size.y <= 0.0 {
            return Vec2::ZERO;
        }
        (canvas - self.origin) / self.size
    }

    pub fn right(&self) -> f32 {
        self.origin.x + self.size.x
    }

    pub fn bottom(&self) -> f32 {
        self.origin.y + self.size.y
    }
}

/// Y positions of the four guide lines, in canvas units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GuideLines {
    pub sky: f32,
    pub plane: f32,
    pub grass: f32,
    pub worm: f32,
}

/// Per-(word, viewport) layout.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutMetrics {
    pub viewport: Vec2,
    pub letter_count: usize,
    pub letter_box_width: f32,
    pub letter_box_height: f32,
    pub letter_padding: f32,
    /// Bottom edge of every letter box (grass line).
    pub baseline_y: f32,
    /// Top edge of every letter box.
    pub top_y: f32,
    pub start_x: f32,
    pub guides: GuideLines,
}

impl LayoutMetrics {
    /// Lay out `letter_count` boxes in a viewport.
    ///
    /// If the word is wider than the viewport minus one padding of margin
    /// per side, boxes and gaps shrink uniformly to fit. The baseline stays
    /// on the grass line, so shrunken letters hang lower than the sky line.
    pub fn compute(letter_count: usize, viewport: Vec2, config: &LayoutConfig) -> Self {
        let viewport = viewport.max(Vec2::ZERO);
        let (w, h) = (viewport.x, viewport.y);

        let guides = GuideLines {
            sky: h * config.sky,
            plane: h * config.plane,
            grass: h * config.grass,
            worm: h * config.worm,
        };

        let mut height = (guides.grass - guides.sky).max(0.0);
        let mut width = height * config.aspect;
        let mut padding = config.letter_padding.max(0.0);

        let n = letter_count as f32;
        let total = n * width + (n - 1.0).max(0.0) * padding;
        let available = (w - 2.0 * config.letter_padding).max(0.0);
        if total > available && total > 0.0 {
            let shrink = available / total;
            height *= shrink;
            width *= shrink;
            padding *= shrink;
        }

        let total = n * width + (n - 1.0).max(0.0) * padding;
        Self {
            viewport,
            letter_count,
            letter_box_width: width,
            letter_box_height: height,
            letter_padding: padding,
            baseline_y: guides.grass,
            top_y: guides.grass - height,
            start_x: (w - total) / 2.0,
            guides,
        }
    }

    /// Width of the whole word block.
    pub fn total_width(&self) -> f32 {
        let n = self.letter_count as f32;
        n * self.letter_box_width + (n - 1.0).max(0.0) * self.letter_padding
    }

    /// Box of the letter at `index`, or `None` past the end of the word.
    pub fn letter_box(&self, index: usize) -> Option<LetterBox> {
        (index < self.letter_count).then(|| LetterBox {
            origin: Vec2::new(
                self.start_x + index as f32 * (self.letter_box_width + self.letter_padding),
                self.top_y,
            ),
            size: Vec2::new(self.letter_box_width, self.letter_box_height),
        })
    }

    pub fn boxes(&self) -> impl Iterator<Item = LetterBox> + '_ {
        (0..self.letter_count).filter_map(|i| self.letter_box(i))
    }
}

/// Layout for a word in a viewport.
pub fn compute_layout(word: &str, viewport: Vec2, config: &LayoutConfig) -> LayoutMetrics {
    LayoutMetrics::compute(word.chars().count(), viewport, config)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_well_formed(layout: &LayoutMetrics) {
        let boxes: Vec<_> = layout.boxes().collect();
        assert_eq!(boxes.len(), layout.letter_count);
        for pair in boxes.windows(2) {
            assert!(pair[0].right() <= pair[1].origin.x + 1e-3, "boxes overlap: {pair:?}");
        }
        assert!(layout.start_x >= 0.0);
        assert!(layout.start_x + layout.total_width() <= layout.viewport.x + 1e-3);
        let left_gap = layout.start_x;
        let right_gap = layout.viewport.x - (layout.start_x + layout.total_width());
        assert!((left_gap - right_gap).abs() < 1e-3, "block not centered");
    }

    #[test]
    fn letter_box_spans_sky_to_grass() {
        let config = LayoutConfig::default();
        let layout = compute_layout("CAT", Vec2::new(1000.0, 600.0), &config);
        assert!((layout.letter_box_height - 240.0).abs() < 1e-3);
        assert!((layout.letter_box_width - 168.0).abs() < 1e-3);
        assert!((layout.top_y - 150.0).abs() < 1e-3);
        assert!((layout.baseline_y - 390.0).abs() < 1e-3);
        assert!((layout.total_width() - (3.0 * 168.0 + 2.0 * 20.0)).abs() < 1e-3);
        assert_well_formed(&layout);
    }

    #[test]
    fn guide_lines_follow_viewport_height() {
        let layout = compute_layout("A", Vec2::new(400.0, 1000.0), &LayoutConfig::default());
        assert_eq!(layout.guides.sky, 250.0);
        assert_eq!(layout.guides.plane, 450.0);
        assert_eq!(layout.guides.grass, 650.0);
        assert_eq!(layout.guides.worm, 850.0);
    }

    #[test]
    fn wide_word_shrinks_to_fit() {
        let config = LayoutConfig::default();
        let layout = compute_layout("ELEPHANTS", Vec2::new(500.0, 600.0), &config);
        assert!(layout.letter_box_height < 240.0);
        assert!((layout.letter_box_width / layout.letter_box_height - config.aspect).abs() < 1e-4);
        assert!((layout.start_x - config.letter_padding).abs() < 1e-3);
        assert!((layout.letter_box(0).unwrap().bottom() - layout.baseline_y).abs() < 1e-3);
        assert_well_formed(&layout);
    }

    #[test]
    fn various_viewports_stay_well_formed() {
        let config = LayoutConfig::default();
        for &(w, h) in &[(320.0, 480.0), (1920.0, 1080.0), (50.0, 900.0), (800.0, 100.0)] {
            for word in ["I", "CAT", "QUIZZES", "ABCDEFGHIJKLMNOP"] {
                assert_well_formed(&compute_layout(word, Vec2::new(w, h), &config));
            }
        }
    }

    #[test]
    fn zero_viewport_is_degenerate_not_panicking() {
        let layout = compute_layout("CAT", Vec2::ZERO, &LayoutConfig::default());
        assert_eq!(layout.letter_box_width, 0.0);
        assert_eq!(layout.letter_box_height, 0.0);
        assert!(layout.letter_box(2).is_some());
        assert!(layout.letter_box(3).is_none());
    }

    #[test]
    fn unit_and_canvas_round_trip_through_box() {
        let layout = compute_layout("AB", Vec2::new(800.0, 600.0), &LayoutConfig::default());
        let b = layout.letter_box(1).unwrap();
        let canvas = b.to_canvas(Vec2::new(0.5, 1.0));
        assert!((canvas.y - layout.baseline_y).abs() < 1e-3);
        assert!((b.to_unit(canvas) - Vec2::new(0.5, 1.0)).length() < 1e-5);
    }
}
