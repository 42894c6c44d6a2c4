use std::collections::{BTreeMap, HashMap};

use glam::Vec2;
use serde::Deserialize;

use crate::error::{Result, StencilError};
use crate::templates::alphabet;

/// One template stroke: an ordered polyline in the unit square.
pub type Stroke = Vec<Vec2>;

/// Tolerance multiplier applied to letters built from arcs.
/// Freehand deviation on curves is larger than on straight lines.
pub const CURVED_TOLERANCE_BOOST: f32 = 1.35;

/// Vector template for a single letter.
#[derive(Debug, Clone, PartialEq)]
pub struct LetterTemplate {
    pub letter: char,
    /// Strokes in drawing order, coordinates in [0, 1] x [0, 1] (y down).
    pub strokes: Vec<Stroke>,
    /// Scales the halo tolerance for this letter.
    pub tolerance_multiplier: f32,
}

impl LetterTemplate {
    pub fn new(letter: char, strokes: Vec<Stroke>, curved: bool) -> Self {
        Self {
            letter,
            strokes,
            tolerance_multiplier: if curved { CURVED_TOLERANCE_BOOST } else { 1.0 },
        }
    }

    pub fn is_curved(&self) -> bool {
        self.tolerance_multiplier > 1.0
    }
}

/// Template file format: letter -> strokes, each stroke a list of [x, y] points.
#[derive(Debug, Deserialize)]
struct TemplateFile {
    letters: HashMap<String, TemplateDef>,
}

#[derive(Debug, Deserialize)]
struct TemplateDef {
    #[serde(default)]
    curved: bool,
    #[serde(default)]
    tolerance_multiplier: Option<f32>,
    strokes: Vec<Vec<[f32; 2]>>,
}

/// Immutable letter -> template lookup, loaded once.
#[derive(Debug, Clone, Default)]
pub struct TemplateStore {
    templates: BTreeMap<char, LetterTemplate>,
}

impl TemplateStore {
    /// The compiled-in uppercase alphabet.
    pub fn builtin() -> Self {
        Self::from_templates(alphabet::uppercase())
    }

    pub fn from_templates(templates: impl IntoIterator<Item = LetterTemplate>) -> Self {
        Self {
            templates: templates.into_iter().map(|t| (t.letter, t)).collect(),
        }
    }

    /// Parse and validate a template set from JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        let file: TemplateFile = serde_json::from_str(json)?;
        let mut templates = BTreeMap::new();

        for (key, def) in file.letters {
            let mut chars = key.chars();
            let letter = match (chars.next(), chars.next()) {
                (Some(c), None) => c,
                _ => {
                    return Err(StencilError::InvalidTemplate {
                        letter: key.chars().next().unwrap_or(' '),
                        reason: format!("key {key:?} is not a single character"),
                    })
                }
            };

            let strokes = validate_strokes(letter, &def.strokes)?;
            let mut template = LetterTemplate::new(letter, strokes, def.curved);
            if let Some(multiplier) = def.tolerance_multiplier {
                if !(multiplier.is_finite() && multiplier > 0.0) {
                    return Err(StencilError::InvalidTemplate {
                        letter,
                        reason: format!("tolerance multiplier {multiplier} must be positive"),
                    });
                }
                template.tolerance_multiplier = multiplier;
            }
            templates.insert(letter, template);
        }

        Ok(Self { templates })
    }

    /// Look up a template. Falls back to the uppercase letter.
    pub fn get(&self, letter: char) -> Option<&LetterTemplate> {
        self.templates
            .get(&letter)
            .or_else(|| self.templates.get(&letter.to_ascii_uppercase()))
    }

    /// Strokes for a letter, or `None` if the letter is not defined.
    pub fn get_strokes(&self, letter: char) -> Option<&[Stroke]> {
        self.get(letter).map(|t| t.strokes.as_slice())
    }

    /// Tolerance multiplier for a letter (1.0 for unknown letters).
    pub fn tolerance_multiplier(&self, letter: char) -> f32 {
        self.get(letter).map(|t| t.tolerance_multiplier).unwrap_or(1.0)
    }

    pub fn has_letter(&self, letter: char) -> bool {
        self.get(letter).is_some()
    }

    /// Whether every letter of `word` has a template.
    pub fn covers_word(&self, word: &str) -> bool {
        word.chars().all(|c| self.has_letter(c))
    }

    /// Defined letters in sorted order.
    pub fn letters(&self) -> impl Iterator<Item = char> + '_ {
        self.templates.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}

fn validate_strokes(letter: char, raw: &[Vec<[f32; 2]>]) -> Result<Vec<Stroke>> {
    let invalid = |reason: String| StencilError::InvalidTemplate { letter, reason };

    if raw.is_empty() {
        return Err(invalid("no strokes".into()));
    }

    raw.iter()
        .enumerate()
        .map(|(i, stroke)| {
            if stroke.len() < 2 {
                return Err(invalid(format!("stroke {i} has {} point(s)", stroke.len())));
            }
            stroke
                .iter()
                .map(|&[x, y]| {
                    let in_unit = |v: f32| v.is_finite() && (0.0..=1.0).contains(&v);
                    if in_unit(x) && in_unit(y) {
                        Ok(Vec2::new(x, y))
                    } else {
                        Err(invalid(format!("stroke {i} point ({x}, {y}) outside unit square")))
                    }
                })
                .collect()
        })
        .collect()
}
