//! Snapshot of everything the host page needs to draw one frame.
//!
//! All coordinates are canvas units. The host clears the canvas and draws,
//! in order: guide lines, template strokes, fading strokes, accepted
//! strokes, the active stroke.

use glam::Vec2;
use serde::Serialize;

use crate::core::layout::{GuideLines, LetterBox};
use crate::systems::FadingStroke;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GuideKind {
    Sky,
    Plane,
    Grass,
    Worm,
}

/// Stroke style for a guide line.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GuideStyle {
    pub line_width: f32,
    /// Dash pattern in canvas units; empty for a solid line.
    pub dash: Vec<f32>,
}

impl GuideStyle {
    fn solid(line_width: f32) -> Self {
        Self { line_width, dash: Vec::new() }
    }

    fn dashed(line_width: f32, on: f32, off: f32) -> Self {
        Self { line_width, dash: vec![on, off] }
    }
}

/// One full-width horizontal guide line.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GuideLine {
    pub kind: GuideKind,
    pub y: f32,
    pub style: GuideStyle,
}

/// Guide lines in draw order, top to bottom.
pub fn guide_lines(guides: &GuideLines) -> Vec<GuideLine> {
    vec![
        GuideLine { kind: GuideKind::Sky, y: guides.sky, style: GuideStyle::solid(2.0) },
        GuideLine { kind: GuideKind::Plane, y: guides.plane, style: GuideStyle::dashed(1.0, 5.0, 5.0) },
        GuideLine { kind: GuideKind::Grass, y: guides.grass, style: GuideStyle::solid(1.0) },
        GuideLine { kind: GuideKind::Worm, y: guides.worm, style: GuideStyle::solid(1.0) },
    ]
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderModel {
    pub viewport: Vec2,
    pub word: String,
    pub letter_index: usize,
    pub completed_letters: Vec<bool>,
    /// Accepted strokes of the current letter.
    pub accepted_strokes: Vec<Vec<Vec2>>,
    pub fading_strokes: Vec<FadingStroke>,
    /// Template strokes per letter of the word.
    pub template_strokes: Vec<Vec<Vec<Vec2>>>,
    pub letter_boxes: Vec<LetterBox>,
    pub guide_lines: Vec<GuideLine>,
    /// Points of the stroke being drawn, if any.
    pub active_stroke: Vec<Vec2>,
    pub word_complete: bool,
}

impl RenderModel {
    pub fn to_json(&self) -> crate::error::Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}
