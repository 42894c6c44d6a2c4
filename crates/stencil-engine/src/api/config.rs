use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Which coverage rule decides that a letter is finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CoveragePolicy {
    /// Every template stroke must be covered on its own.
    #[default]
    PerSegment,
    /// The letter's total halo area must be covered as a whole.
    WholeLetter,
}

/// Guide-line geometry and letter spacing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Top guide line (cap height) as a fraction of viewport height.
    pub sky: f32,
    /// Dashed middle guide line.
    pub plane: f32,
    /// Baseline.
    pub grass: f32,
    /// Descender line.
    pub worm: f32,
    /// Letter box width as a fraction of its height.
    pub aspect: f32,
    /// Horizontal gap between letter boxes (canvas units).
    pub letter_padding: f32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            sky: 0.25,
            plane: 0.45,
            grass: 0.65,
            worm: 0.85,
            aspect: 0.7,
            letter_padding: 20.0,
        }
    }
}

/// Hit-area rasterization parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RasterConfig {
    /// Halo thickness around template strokes for a letter box
    /// `reference_box_height` tall, in canvas units.
    pub tolerance_width: f32,
    /// Letter box height at which `tolerance_width` applies unscaled.
    /// Shorter boxes get a proportionally thinner halo.
    pub reference_box_height: f32,
    /// Floor for the scaled halo, before the curved-letter boost.
    pub min_tolerance_width: f32,
    /// Device pixels per canvas unit. Supplied by the host.
    pub raster_scale: f32,
    /// Pixels with alpha above this value count as set.
    pub alpha_threshold: u8,
    /// Coverage brush width as a fraction of the effective tolerance.
    pub ink_width_ratio: f32,
}

impl Default for RasterConfig {
    fn default() -> Self {
        Self {
            tolerance_width: 50.0,
            // sky-to-grass height of a 900 unit tall canvas
            reference_box_height: 360.0,
            min_tolerance_width: 12.0,
            raster_scale: 1.0,
            alpha_threshold: 20,
            ink_width_ratio: 0.6,
        }
    }
}

impl RasterConfig {
    /// Halo width for a letter box `letter_height` units tall.
    ///
    /// The halo shrinks with the box so neighbouring strokes of a small
    /// letter do not swallow each other's targets. It never grows past
    /// `tolerance_width`.
    pub fn effective_tolerance(&self, multiplier: f32, letter_height: f32) -> f32 {
        let scale = if self.reference_box_height > 0.0 {
            (letter_height / self.reference_box_height).clamp(0.0, 1.0)
        } else {
            1.0
        };
        (self.tolerance_width * scale).max(self.min_tolerance_width) * multiplier
    }
}

/// Stroke acceptance parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidatorConfig {
    /// Strokes with fewer points are dropped silently.
    pub min_stroke_points: usize,
    /// Test every Nth captured point.
    pub sample_stride: usize,
    /// Minimum fraction of in-bounds samples that must hit the halo.
    pub accept_accuracy: f32,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            min_stroke_points: 5,
            sample_stride: 3,
            accept_accuracy: 0.6,
        }
    }
}

/// Letter completion parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CoverageConfig {
    pub policy: CoveragePolicy,
    /// Required covered/target ratio per template stroke.
    pub segment_threshold: f32,
    /// Required covered/target ratio for the whole-letter policy.
    /// Wider tolerances need a lower value since the halo grows faster than the ink.
    pub letter_threshold: f32,
}

impl Default for CoverageConfig {
    fn default() -> Self {
        Self {
            policy: CoveragePolicy::PerSegment,
            segment_threshold: 0.5,
            letter_threshold: 0.45,
        }
    }
}

/// Configuration for the engine, provided by the host page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Fixed timestep in seconds (default: 1/60).
    pub fixed_dt: f32,
    /// Opacity lost per second by a rejected stroke.
    pub fade_per_second: f32,
    /// Pause between finishing a word and picking the next one (seconds).
    pub word_complete_delay: f32,
    /// Seed for word selection.
    pub seed: u64,
    pub layout: LayoutConfig,
    pub raster: RasterConfig,
    pub validator: ValidatorConfig,
    pub coverage: CoverageConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            fixed_dt: 1.0 / 60.0,
            // 0.05 per frame at 60 fps
            fade_per_second: 3.0,
            word_complete_delay: 0.8,
            seed: 42,
            layout: LayoutConfig::default(),
            raster: RasterConfig::default(),
            validator: ValidatorConfig::default(),
            coverage: CoverageConfig::default(),
        }
    }
}

impl EngineConfig {
    /// Parse a config from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Set the halo tolerance width.
    pub fn with_tolerance(mut self, tolerance_width: f32) -> Self {
        self.raster.tolerance_width = tolerance_width;
        self
    }

    /// Set the coverage policy.
    pub fn with_policy(mut self, policy: CoveragePolicy) -> Self {
        self.coverage.policy = policy;
        self
    }

    /// Set the word selection seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Set the device pixel ratio used for rasterization.
    pub fn with_raster_scale(mut self, raster_scale: f32) -> Self {
        self.raster.raster_scale = raster_scale;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_json_gives_defaults() {
        let config = EngineConfig::from_json("{}").unwrap();
        assert_eq!(config, EngineConfig::default());
    }

    #[test]
    fn partial_json_overrides_nested_fields() {
        let json = r#"{
            "seed": 7,
            "raster": { "tolerance_width": 40.0 },
            "coverage": { "policy": "whole_letter" }
        }"#;
        let config = EngineConfig::from_json(json).unwrap();
        assert_eq!(config.seed, 7);
        assert_eq!(config.raster.tolerance_width, 40.0);
        assert_eq!(config.raster.alpha_threshold, 20);
        assert_eq!(config.coverage.policy, CoveragePolicy::WholeLetter);
        assert_eq!(config.coverage.segment_threshold, 0.5);
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(EngineConfig::from_json("{ seed: }").is_err());
    }

    #[test]
    fn tolerance_follows_letter_height() {
        let raster = RasterConfig::default();
        assert_eq!(raster.effective_tolerance(1.0, 360.0), 50.0);
        assert_eq!(raster.effective_tolerance(1.0, 720.0), 50.0);
        assert_eq!(raster.effective_tolerance(1.0, 180.0), 25.0);
        assert_eq!(raster.effective_tolerance(2.0, 180.0), 50.0);
        assert_eq!(raster.effective_tolerance(1.0, 36.0), 12.0);
        assert_eq!(raster.effective_tolerance(1.0, 0.0), 12.0);

        let unscaled = RasterConfig { reference_box_height: 0.0, ..RasterConfig::default() };
        assert_eq!(unscaled.effective_tolerance(1.0, 100.0), 50.0);
    }

    #[test]
    fn builders_chain() {
        let config = EngineConfig::default()
            .with_tolerance(60.0)
            .with_seed(3)
            .with_raster_scale(2.0)
            .with_policy(CoveragePolicy::WholeLetter);
        assert_eq!(config.raster.tolerance_width, 60.0);
        assert_eq!(config.seed, 3);
        assert_eq!(config.raster.raster_scale, 2.0);
        assert_eq!(config.coverage.policy, CoveragePolicy::WholeLetter);
    }
}
