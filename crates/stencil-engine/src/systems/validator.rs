use glam::Vec2;

use crate::api::config::ValidatorConfig;
use crate::raster::HitMask;

/// Verdict on one finished pen stroke.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Validation {
    /// Too few points to be a deliberate stroke (a tap). Dropped silently.
    Degenerate,
    /// Enough sampled points fell inside the halo.
    Accepted { accuracy: f32 },
    /// Too many sampled points missed the halo.
    Rejected { accuracy: f32 },
}

impl Validation {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Validation::Accepted { .. })
    }
}

/// Sampled containment of a stroke in a hit mask.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SampleStats {
    /// Samples that landed inside the raster.
    pub sampled: usize,
    /// Of those, samples on a set pixel.
    pub hits: usize,
}

impl SampleStats {
    /// hits / sampled; a stroke with no in-bounds samples scores 0.
    pub fn accuracy(&self) -> f32 {
        if self.sampled == 0 {
            0.0
        } else {
            self.hits as f32 / self.sampled as f32
        }
    }
}

/// Test every `stride`-th point against the mask, starting with the first.
/// Points outside the raster count neither as hits nor as misses.
pub fn sample_stroke(points: &[Vec2], mask: &HitMask, stride: usize) -> SampleStats {
    let mut stats = SampleStats::default();
    for &p in points.iter().step_by(stride.max(1)) {
        if let Some(hit) = mask.sample(p) {
            stats.sampled += 1;
            if hit {
                stats.hits += 1;
            }
        }
    }
    stats
}

/// Decide whether a captured stroke traces the letter whose halo is `mask`.
pub fn validate(points: &[Vec2], mask: &HitMask, config: &ValidatorConfig) -> Validation {
    if points.len() < config.min_stroke_points {
        return Validation::Degenerate;
    }

    let stats = sample_stroke(points, mask, config.sample_stride);
    let accuracy = stats.accuracy();
    log::debug!(
        "stroke: {} points, {}/{} samples on target, accuracy {:.2}",
        points.len(),
        stats.hits,
        stats.sampled,
        accuracy
    );

    if accuracy >= config.accept_accuracy {
        Validation::Accepted { accuracy }
    } else {
        Validation::Rejected { accuracy }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::config::{LayoutConfig, RasterConfig};
    use crate::core::layout::compute_layout;
    use crate::raster::{PixelRect, Rasterizer};
    use crate::templates::TemplateStore;

    const VIEWPORT: Vec2 = Vec2::new(800.0, 600.0);

    /// Points every `step` canvas units along a polyline.
    fn densify(polyline: &[Vec2], step: f32) -> Vec<Vec2> {
        let mut out = vec![polyline[0]];
        for pair in polyline.windows(2) {
            let n = (pair[0].distance(pair[1]) / step).ceil().max(1.0) as usize;
            for i in 1..=n {
                out.push(pair[0].lerp(pair[1], i as f32 / n as f32));
            }
        }
        out
    }

    fn mask_for(letter: char) -> (HitMask, Vec<Vec<Vec2>>) {
        let store = TemplateStore::builtin();
        let raster = RasterConfig::default();
        let layout = compute_layout("X", VIEWPORT, &LayoutConfig::default());
        let b = layout.letter_box(0).unwrap();
        let strokes = store.get_strokes(letter).unwrap();
        let mask = Rasterizer::new(&raster, VIEWPORT).rasterize_template(strokes, &b, 50.0);
        let canvas = strokes
            .iter()
            .map(|s| s.iter().map(|&p| b.to_canvas(p)).collect())
            .collect();
        (mask, canvas)
    }

    #[test]
    fn stroke_on_template_line_is_accepted() {
        let (mask, strokes) = mask_for('T');
        let trace = densify(&strokes[1], 4.0);
        match validate(&trace, &mask, &ValidatorConfig::default()) {
            Validation::Accepted { accuracy } => assert_eq!(accuracy, 1.0),
            other => panic!("expected Accepted, got {other:?}"),
        }
    }

    #[test]
    fn stroke_across_opposite_corner_is_rejected() {
        let (mask, _) = mask_for('T');
        let trace = densify(&[Vec2::new(650.0, 590.0), Vec2::new(790.0, 450.0)], 4.0);
        match validate(&trace, &mask, &ValidatorConfig::default()) {
            Validation::Rejected { accuracy } => assert_eq!(accuracy, 0.0),
            other => panic!("expected Rejected, got {other:?}"),
        }
    }

    #[test]
    fn short_stroke_is_degenerate() {
        let (mask, strokes) = mask_for('T');
        let trace = &strokes[1][..2];
        let three = [trace[0], trace[0].lerp(trace[1], 0.5), trace[1]];
        assert_eq!(
            validate(&three, &mask, &ValidatorConfig::default()),
            Validation::Degenerate
        );
    }

    #[test]
    fn partially_off_stroke_uses_threshold() {
        let (mask, strokes) = mask_for('T');
        let on = densify(&strokes[1], 4.0);
        // half on the stem, half wandering far off to the right
        let last = *on.last().unwrap();
        let off = densify(&[last + Vec2::new(200.0, 0.0), last + Vec2::new(200.0, -190.0)], 4.0);
        let mut trace = on.clone();
        trace.extend(off.iter().take(on.len() / 3));
        assert!(validate(&trace, &mask, &ValidatorConfig::default()).is_accepted());

        let mut mostly_off = on[..on.len() / 3].to_vec();
        mostly_off.extend(off);
        assert!(!validate(&mostly_off, &mask, &ValidatorConfig::default()).is_accepted());
    }

    #[test]
    fn out_of_bounds_samples_are_skipped() {
        let mask = HitMask::new(PixelRect::new(0, 0, 10, 10), 1.0, 20, vec![255; 100]);
        let points: Vec<Vec2> = (0..9)
            .map(|i| if i % 2 == 0 { Vec2::new(5.0, 5.0) } else { Vec2::new(-50.0, 5.0) })
            .collect();
        let stats = sample_stroke(&points, &mask, 1);
        assert_eq!(stats, SampleStats { sampled: 5, hits: 5 });
        assert_eq!(stats.accuracy(), 1.0);
    }

    #[test]
    fn stride_picks_every_nth_point() {
        let mask = HitMask::new(PixelRect::new(0, 0, 10, 10), 1.0, 20, vec![255; 100]);
        let points = vec![Vec2::new(1.0, 1.0); 7];
        assert_eq!(sample_stroke(&points, &mask, 3).sampled, 3);
        assert_eq!(sample_stroke(&points, &mask, 0).sampled, 7);
    }

    #[test]
    fn entirely_off_canvas_stroke_is_rejected() {
        let (mask, _) = mask_for('T');
        let trace = vec![Vec2::new(-100.0, -100.0); 6];
        assert_eq!(
            validate(&trace, &mask, &ValidatorConfig::default()),
            Validation::Rejected { accuracy: 0.0 }
        );
    }
}
