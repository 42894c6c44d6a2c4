pub mod config;
pub mod engine;
pub mod render_model;
pub mod types;
