use glam::Vec2;
use serde::Serialize;

/// A rejected stroke fading out of view, in canvas coordinates.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FadingStroke {
    pub points: Vec<Vec2>,
    /// 1.0 when rejected, removed once it reaches 0.
    pub opacity: f32,
}

impl FadingStroke {
    pub fn new(points: Vec<Vec2>) -> Self {
        Self { points, opacity: 1.0 }
    }
}

/// Advance every fading stroke by `dt` seconds and drop the ones that
/// became invisible.
pub fn decay(mut fading: Vec<FadingStroke>, dt: f32, fade_per_second: f32) -> Vec<FadingStroke> {
    let step = (dt * fade_per_second).max(0.0);
    for stroke in &mut fading {
        stroke.opacity -= step;
    }
    fading.retain(|s| s.opacity > 0.0);
    fading
}
