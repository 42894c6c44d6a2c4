pub mod coverage;
pub mod fading;
pub mod validator;

pub use coverage::{score_coverage, Coverage};
pub use fading::{decay, FadingStroke};
pub use validator::{sample_stroke, validate, SampleStats, Validation};
