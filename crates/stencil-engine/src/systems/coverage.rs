use glam::Vec2;

use crate::api::config::{CoverageConfig, CoveragePolicy};
use crate::core::layout::LetterBox;
use crate::raster::Rasterizer;
use crate::templates::Stroke;

/// Result of scoring accumulated ink against a letter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Coverage {
    /// The letter counts as traced.
    Pass,
    /// Keep tracing. `segment` is the first template stroke that fell
    /// short (per-segment policy only).
    Fail { segment: Option<usize>, ratio: f32 },
}

impl Coverage {
    pub fn is_pass(&self) -> bool {
        matches!(self, Coverage::Pass)
    }
}

/// Score accepted ink (canvas coordinates) against a letter's template strokes.
///
/// `tolerance` is the effective halo width for this letter, boost included.
pub fn score_coverage(
    ink: &[Vec<Vec2>],
    template: &[Stroke],
    letter_box: &LetterBox,
    tolerance: f32,
    rasterizer: &Rasterizer<'_>,
    config: &CoverageConfig,
) -> Coverage {
    match config.policy {
        CoveragePolicy::PerSegment => {
            for (i, segment) in template.iter().enumerate() {
                let sample = rasterizer.segment_coverage(segment, letter_box, ink, tolerance);
                let ratio = sample.ratio();
                log::debug!(
                    "segment {i}: {}/{} pixels covered ({ratio:.2})",
                    sample.covered,
                    sample.target
                );
                if sample.target == 0 || ratio < config.segment_threshold {
                    return Coverage::Fail { segment: Some(i), ratio };
                }
            }
            if template.is_empty() {
                return Coverage::Fail { segment: None, ratio: 0.0 };
            }
            Coverage::Pass
        }
        CoveragePolicy::WholeLetter => {
            let sample = rasterizer.letter_coverage(template, letter_box, ink, tolerance);
            let ratio = sample.ratio();
            log::debug!(
                "letter: {}/{} pixels covered ({ratio:.2})",
                sample.covered,
                sample.target
            );
            if sample.target > 0 && ratio >= config.letter_threshold {
                Coverage::Pass
            } else {
                Coverage::Fail { segment: None, ratio }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::config::{LayoutConfig, RasterConfig};
    use crate::core::layout::compute_layout;
    use crate::templates::TemplateStore;

    const VIEWPORT: Vec2 = Vec2::new(1200.0, 900.0);

    fn setup(letter: char) -> (Vec<Stroke>, LetterBox) {
        let store = TemplateStore::builtin();
        let layout = compute_layout("X", VIEWPORT, &LayoutConfig::default());
        (store.get_strokes(letter).unwrap().to_vec(), layout.letter_box(0).unwrap())
    }

    fn trace(stroke: &Stroke, b: &LetterBox) -> Vec<Vec2> {
        stroke.iter().map(|&p| b.to_canvas(p)).collect()
    }

    fn per_segment() -> CoverageConfig {
        CoverageConfig::default()
    }

    fn whole_letter() -> CoverageConfig {
        CoverageConfig { policy: CoveragePolicy::WholeLetter, ..CoverageConfig::default() }
    }

    #[test]
    fn two_segment_letter_needs_both_segments() {
        let raster = RasterConfig::default();
        let r = Rasterizer::new(&raster, VIEWPORT);
        let (t, b) = setup('T');
        assert_eq!(t.len(), 2);

        let stem_only = vec![trace(&t[1], &b)];
        match score_coverage(&stem_only, &t, &b, 50.0, &r, &per_segment()) {
            Coverage::Fail { segment, ratio } => {
                assert_eq!(segment, Some(0));
                assert!(ratio < 0.5);
            }
            Coverage::Pass => panic!("crossbar was never traced"),
        }

        let both = vec![trace(&t[0], &b), trace(&t[1], &b)];
        assert!(score_coverage(&both, &t, &b, 50.0, &r, &per_segment()).is_pass());
    }

    #[test]
    fn shrunken_word_still_needs_the_crossbar() {
        let raster = RasterConfig::default();
        let viewport = Vec2::new(375.0, 667.0);
        let r = Rasterizer::new(&raster, viewport);
        let layout = compute_layout("CATS", viewport, &LayoutConfig::default());
        let b = layout.letter_box(1).unwrap();
        let a = TemplateStore::builtin().get_strokes('A').unwrap().to_vec();
        let tolerance = raster.effective_tolerance(1.0, layout.letter_box_height);
        assert!(tolerance < 25.0);

        let diagonals = vec![trace(&a[0], &b), trace(&a[1], &b)];
        match score_coverage(&diagonals, &a, &b, tolerance, &r, &per_segment()) {
            Coverage::Fail { segment, ratio } => {
                assert_eq!(segment, Some(2));
                assert!(ratio < 0.5);
            }
            Coverage::Pass => panic!("crossbar was never traced"),
        }

        let all: Vec<_> = a.iter().map(|s| trace(s, &b)).collect();
        assert!(score_coverage(&all, &a, &b, tolerance, &r, &per_segment()).is_pass());
    }

    #[test]
    fn first_failing_segment_is_reported() {
        let raster = RasterConfig::default();
        let r = Rasterizer::new(&raster, VIEWPORT);
        let (a, b) = setup('A');
        let diagonals = vec![trace(&a[0], &b), trace(&a[1], &b)];
        match score_coverage(&diagonals, &a, &b, 50.0, &r, &per_segment()) {
            Coverage::Fail { segment, ratio } => {
                assert_eq!(segment, Some(2));
                assert!(ratio < 0.5);
            }
            Coverage::Pass => panic!("crossbar was never traced"),
        }
    }

    #[test]
    fn over_inking_one_stroke_does_not_pass_per_segment() {
        let raster = RasterConfig::default();
        let r = Rasterizer::new(&raster, VIEWPORT);
        let (a, b) = setup('A');
        let crossbar = trace(&a[2], &b);
        let ink = vec![crossbar.clone(), crossbar.clone(), crossbar];
        assert!(!score_coverage(&ink, &a, &b, 50.0, &r, &per_segment()).is_pass());
    }

    #[test]
    fn whole_letter_policy_passes_on_full_trace() {
        let raster = RasterConfig::default();
        let r = Rasterizer::new(&raster, VIEWPORT);
        let (a, b) = setup('A');
        let all: Vec<_> = a.iter().map(|s| trace(s, &b)).collect();
        assert!(score_coverage(&all, &a, &b, 50.0, &r, &whole_letter()).is_pass());
        assert_eq!(
            score_coverage(&[], &a, &b, 50.0, &r, &whole_letter()),
            Coverage::Fail { segment: None, ratio: 0.0 }
        );
    }

    #[test]
    fn curved_letter_passes_with_boosted_tolerance() {
        let raster = RasterConfig::default();
        let r = Rasterizer::new(&raster, VIEWPORT);
        let (c, b) = setup('C');
        let ink = vec![trace(&c[0], &b)];
        let boosted = 50.0 * crate::templates::CURVED_TOLERANCE_BOOST;
        assert!(score_coverage(&ink, &c, &b, boosted, &r, &per_segment()).is_pass());
    }

    #[test]
    fn empty_template_never_passes() {
        let raster = RasterConfig::default();
        let r = Rasterizer::new(&raster, VIEWPORT);
        let (_, b) = setup('T');
        assert!(!score_coverage(&[], &[], &b, 50.0, &r, &per_segment()).is_pass());
    }
}
