pub mod api;
pub mod core;
pub mod error;
pub mod input;
pub mod raster;
pub mod systems;
pub mod templates;
pub mod words;

// Re-export key types at crate root for convenience
pub use api::config::{
    CoverageConfig, CoveragePolicy, EngineConfig, LayoutConfig, RasterConfig, ValidatorConfig,
};
pub use api::engine::StencilEngine;
pub use api::render_model::{GuideKind, GuideLine, GuideStyle, RenderModel};
pub use api::types::{Phase, StencilEvent, StrokeOutcome};
pub use crate::core::layout::{compute_layout, GuideLines, LayoutMetrics, LetterBox};
pub use crate::core::rng::Rng;
pub use crate::core::time::{Delay, FixedTimestep};
pub use error::{Result, StencilError};
pub use input::{InputEvent, InputQueue};
pub use raster::{CoverageSample, HitMask, PixelRect, PixmapSurface, RasterSurface, Rasterizer};
pub use systems::{decay, score_coverage, validate, Coverage, FadingStroke, Validation};
pub use templates::{LetterTemplate, Stroke, TemplateStore};
pub use words::WordList;
