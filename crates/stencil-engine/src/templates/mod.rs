pub mod alphabet;
pub mod store;

pub use store::{LetterTemplate, Stroke, TemplateStore, CURVED_TOLERANCE_BOOST};
