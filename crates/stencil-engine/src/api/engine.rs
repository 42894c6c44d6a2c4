use glam::Vec2;

use crate::api::config::EngineConfig;
use crate::api::render_model::{guide_lines, RenderModel};
use crate::api::types::{Phase, StencilEvent, StrokeOutcome};
use crate::core::layout::{compute_layout, LayoutMetrics, LetterBox};
use crate::core::rng::Rng;
use crate::core::time::Delay;
use crate::error::{Result, StencilError};
use crate::input::InputEvent;
use crate::raster::{HitMask, Rasterizer};
use crate::systems::{decay, score_coverage, validate, Coverage, FadingStroke, Validation};
use crate::templates::{Stroke, TemplateStore};
use crate::words::WordList;

/// The tracing game. Owns every piece of session state.
///
/// The host feeds pointer events and frame ticks, then reads back a
/// [`RenderModel`] and the drained [`StencilEvent`]s. Nothing here touches
/// the DOM, so the whole game runs under plain `cargo test`.
pub struct StencilEngine {
    config: EngineConfig,
    templates: TemplateStore,
    words: WordList,
    rng: Rng,
    viewport: Vec2,
    layout: LayoutMetrics,
    phase: Phase,
    word: String,
    letters: Vec<char>,
    completed_letters: Vec<bool>,
    /// Accepted strokes of the current letter, in that letter's unit space.
    accepted: Vec<Stroke>,
    fading: Vec<FadingStroke>,
    /// Points of the stroke in progress, in canvas units.
    pen: Option<Vec<Vec2>>,
    /// Halo of the current letter. `None` means stale.
    hit_mask: Option<HitMask>,
    events: Vec<StencilEvent>,
}

impl StencilEngine {
    /// Engine with the builtin alphabet and word list.
    pub fn new(config: EngineConfig) -> Result<Self> {
        let templates = TemplateStore::builtin();
        let words = WordList::builtin(&templates)?;
        Ok(Self::with_data(config, templates, words))
    }

    pub fn with_data(config: EngineConfig, templates: TemplateStore, words: WordList) -> Self {
        let rng = Rng::new(config.seed);
        let layout = compute_layout("", Vec2::ZERO, &config.layout);
        Self {
            config,
            templates,
            words,
            rng,
            viewport: Vec2::ZERO,
            layout,
            phase: Phase::AwaitingWord,
            word: String::new(),
            letters: Vec::new(),
            completed_letters: Vec::new(),
            accepted: Vec::new(),
            fading: Vec::new(),
            pen: None,
            hit_mask: None,
            events: Vec::new(),
        }
    }

    // ---- Pointer input ----

    /// Pen down. Ignored unless a letter is being traced.
    pub fn on_stroke_start(&mut self, point: Vec2) {
        if !self.phase.is_tracing() {
            return;
        }
        self.pen = Some(vec![point]);
    }

    /// Pen moved. Only buffers the point; nothing is validated until the pen lifts.
    pub fn on_stroke_move(&mut self, point: Vec2) {
        if let Some(pen) = self.pen.as_mut() {
            if pen.last() != Some(&point) {
                pen.push(point);
            }
        }
    }

    /// Pen lifted: validate the buffered stroke and score coverage.
    pub fn on_stroke_end(&mut self) -> StrokeOutcome {
        let Some(points) = self.pen.take() else {
            return StrokeOutcome::Ignored;
        };
        let Phase::Tracing { letter } = self.phase else {
            return StrokeOutcome::Ignored;
        };
        let Some(letter_box) = self.layout.letter_box(letter) else {
            return StrokeOutcome::Ignored;
        };
        if points.len() < self.config.validator.min_stroke_points {
            return StrokeOutcome::Degenerate;
        }

        self.ensure_hit_mask(letter);
        let validation = match &self.hit_mask {
            Some(mask) => validate(&points, mask, &self.config.validator),
            None => return StrokeOutcome::Ignored,
        };

        match validation {
            Validation::Degenerate => StrokeOutcome::Degenerate,
            Validation::Rejected { accuracy } => {
                log::debug!("stroke rejected on letter {letter} ({accuracy:.2})");
                self.fading.push(FadingStroke::new(points));
                self.events.push(StencilEvent::StrokeRejected { accuracy });
                StrokeOutcome::Rejected { accuracy }
            }
            Validation::Accepted { accuracy } => {
                self.accepted
                    .push(points.iter().map(|&p| letter_box.to_unit(p)).collect());
                self.events.push(StencilEvent::StrokeAccepted { accuracy });

                let coverage = self.score_letter(letter, &letter_box);
                if coverage.is_pass() {
                    self.complete_letter(letter);
                }
                StrokeOutcome::Accepted { accuracy, coverage }
            }
        }
    }

    /// Pointer left the canvas or the touch was cancelled: drop the stroke unvalidated.
    pub fn on_stroke_cancel(&mut self) {
        self.pen = None;
    }

    // ---- Viewport ----

    /// Canvas resized. Layout is recomputed now; the hit mask on next use.
    /// A stroke in progress is dropped since its points refer to the old layout.
    pub fn on_resize(&mut self, width: f32, height: f32) {
        self.viewport = Vec2::new(width, height).max(Vec2::ZERO);
        self.layout = compute_layout(&self.word, self.viewport, &self.config.layout);
        self.hit_mask = None;
        self.pen = None;
        log::debug!(
            "resize {}x{}: letter box {:.1}x{:.1}",
            self.viewport.x,
            self.viewport.y,
            self.layout.letter_box_width,
            self.layout.letter_box_height
        );
    }

    /// Device pixels per canvas unit used for rasterization.
    pub fn set_raster_scale(&mut self, scale: f32) {
        if !scale.is_finite() || scale <= 0.0 {
            log::warn!("ignoring raster scale {scale}");
            return;
        }
        if scale != self.config.raster.raster_scale {
            self.config.raster.raster_scale = scale;
            self.hit_mask = None;
        }
    }

    // ---- Word cycle ----

    /// Start a random word, different from the current one when possible.
    pub fn request_new_word(&mut self) -> Result<()> {
        let previous = self.words.position(&self.word);
        let index = self.rng.next_index_excluding(self.words.len(), previous);
        let word = self.words.pick(index).to_string();
        self.start_word(&word)
    }

    /// Start tracing `word` from its first letter.
    ///
    /// Fails with [`StencilError::UndefinedGlyph`] on a letter without a
    /// template; the current state is left untouched in that case.
    pub fn start_word(&mut self, word: &str) -> Result<()> {
        let word = word.trim().to_uppercase();
        if word.is_empty() {
            return Err(StencilError::EmptyWord);
        }
        if let Some(missing) = word.chars().find(|&c| !self.templates.has_letter(c)) {
            log::warn!("cannot start {word:?}: no template for '{missing}'");
            return Err(StencilError::UndefinedGlyph(missing));
        }

        self.letters = word.chars().collect();
        self.completed_letters = vec![false; self.letters.len()];
        self.layout = compute_layout(&word, self.viewport, &self.config.layout);
        self.word = word;
        self.phase = Phase::Tracing { letter: 0 };
        self.clear_letter_state();
        self.pen = None;

        log::info!("word started: {}", self.word);
        self.events.push(StencilEvent::WordStarted { word: self.word.clone() });
        Ok(())
    }

    /// Restart the current word from its first letter (the clear button).
    pub fn reset_current_word(&mut self) {
        if self.word.is_empty() {
            return;
        }
        let word = self.word.clone();
        if let Err(e) = self.start_word(&word) {
            log::warn!("reset failed: {e}");
        }
    }

    // ---- Frame ----

    /// Advance animations by `dt` seconds. Never validates.
    pub fn tick(&mut self, dt: f32) {
        let fading = std::mem::take(&mut self.fading);
        self.fading = decay(fading, dt, self.config.fade_per_second);

        let elapsed = match &mut self.phase {
            Phase::WordComplete { delay } => delay.tick(dt),
            _ => false,
        };
        if elapsed {
            if let Err(e) = self.request_new_word() {
                log::warn!("could not pick the next word: {e}");
                self.phase = Phase::AwaitingWord;
            }
        }
    }

    /// Dispatch one queued input event.
    pub fn apply_input(&mut self, event: InputEvent) {
        match event {
            InputEvent::StrokeStart { x, y } => self.on_stroke_start(Vec2::new(x, y)),
            InputEvent::StrokeMove { x, y } => self.on_stroke_move(Vec2::new(x, y)),
            InputEvent::StrokeEnd { x, y } => {
                self.on_stroke_move(Vec2::new(x, y));
                self.on_stroke_end();
            }
            InputEvent::StrokeCancel => self.on_stroke_cancel(),
            InputEvent::Resize { width, height, pixel_ratio } => {
                self.set_raster_scale(pixel_ratio);
                self.on_resize(width, height);
            }
            InputEvent::NewWord => {
                if let Err(e) = self.request_new_word() {
                    log::warn!("new word failed: {e}");
                }
            }
            InputEvent::ResetWord => self.reset_current_word(),
        }
    }

    /// Take the events emitted since the last call.
    pub fn drain_events(&mut self) -> Vec<StencilEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn render_model(&self) -> RenderModel {
        let accepted_strokes = match self.current_box() {
            Some(b) => self.accepted.iter().map(|s| to_canvas(s, &b)).collect(),
            None => Vec::new(),
        };
        let template_strokes = self
            .letters
            .iter()
            .zip(self.layout.boxes())
            .map(|(&c, b)| self.letter_strokes(c, &b))
            .collect();

        RenderModel {
            viewport: self.viewport,
            word: self.word.clone(),
            letter_index: self.letter_index(),
            completed_letters: self.completed_letters.clone(),
            accepted_strokes,
            fading_strokes: self.fading.clone(),
            template_strokes,
            letter_boxes: self.layout.boxes().collect(),
            guide_lines: guide_lines(&self.layout.guides),
            active_stroke: self.pen.clone().unwrap_or_default(),
            word_complete: matches!(self.phase, Phase::WordComplete { .. }),
        }
    }

    // ---- Accessors ----

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn word(&self) -> &str {
        &self.word
    }

    /// Index of the letter being traced; the word length once it is complete.
    pub fn letter_index(&self) -> usize {
        match self.phase {
            Phase::AwaitingWord => 0,
            Phase::Tracing { letter } => letter,
            Phase::WordComplete { .. } => self.letters.len(),
        }
    }

    pub fn completed_letters(&self) -> &[bool] {
        &self.completed_letters
    }

    pub fn layout(&self) -> &LayoutMetrics {
        &self.layout
    }

    pub fn viewport(&self) -> Vec2 {
        self.viewport
    }

    pub fn accepted_stroke_count(&self) -> usize {
        self.accepted.len()
    }

    pub fn fading_strokes(&self) -> &[FadingStroke] {
        &self.fading
    }

    pub fn is_stroke_active(&self) -> bool {
        self.pen.is_some()
    }

    /// Template strokes of the letter at `index`, in canvas units.
    pub fn template_strokes(&self, index: usize) -> Option<Vec<Vec<Vec2>>> {
        let letter = *self.letters.get(index)?;
        let letter_box = self.layout.letter_box(index)?;
        Some(self.letter_strokes(letter, &letter_box))
    }

    // ---- Internals ----

    fn current_box(&self) -> Option<LetterBox> {
        match self.phase {
            Phase::Tracing { letter } => self.layout.letter_box(letter),
            _ => None,
        }
    }

    /// Halo width for `letter` in the current layout, boost included.
    fn tolerance(&self, letter: char) -> f32 {
        self.config.raster.effective_tolerance(
            self.templates.tolerance_multiplier(letter),
            self.layout.letter_box_height,
        )
    }

    fn letter_strokes(&self, letter: char, letter_box: &LetterBox) -> Vec<Vec<Vec2>> {
        self.templates
            .get_strokes(letter)
            .map(|strokes| strokes.iter().map(|s| to_canvas(s, letter_box)).collect())
            .unwrap_or_default()
    }

    fn ensure_hit_mask(&mut self, index: usize) {
        if self.hit_mask.is_some() {
            return;
        }
        let (Some(&letter), Some(letter_box)) = (self.letters.get(index), self.layout.letter_box(index)) else {
            return;
        };
        let Some(strokes) = self.templates.get_strokes(letter) else {
            return;
        };
        let rasterizer = Rasterizer::new(&self.config.raster, self.viewport);
        let mask = rasterizer.rasterize_template(strokes, &letter_box, self.tolerance(letter));
        log::debug!("hit mask for '{letter}': {} pixels", mask.target_pixel_count());
        self.hit_mask = Some(mask);
    }

    /// Coverage of the accepted strokes, mapped through the current layout.
    fn score_letter(&self, index: usize, letter_box: &LetterBox) -> Coverage {
        let Some(&letter) = self.letters.get(index) else {
            return Coverage::Fail { segment: None, ratio: 0.0 };
        };
        let Some(template) = self.templates.get_strokes(letter) else {
            return Coverage::Fail { segment: None, ratio: 0.0 };
        };
        let ink: Vec<Vec<Vec2>> = self.accepted.iter().map(|s| to_canvas(s, letter_box)).collect();
        let rasterizer = Rasterizer::new(&self.config.raster, self.viewport);
        score_coverage(
            &ink,
            template,
            letter_box,
            self.tolerance(letter),
            &rasterizer,
            &self.config.coverage,
        )
    }

    fn complete_letter(&mut self, index: usize) {
        if let Some(done) = self.completed_letters.get_mut(index) {
            *done = true;
        }
        self.clear_letter_state();
        self.events.push(StencilEvent::LetterComplete { index });

        let next = index + 1;
        if next >= self.letters.len() {
            log::info!("word complete: {}", self.word);
            self.phase = Phase::WordComplete {
                delay: Delay::new(self.config.word_complete_delay),
            };
            self.events.push(StencilEvent::WordComplete { word: self.word.clone() });
        } else {
            log::info!("letter {index} of {} complete", self.word);
            self.phase = Phase::Tracing { letter: next };
        }
    }

    fn clear_letter_state(&mut self) {
        self.accepted.clear();
        self.fading.clear();
        self.hit_mask = None;
    }
}

fn to_canvas(unit: &[Vec2], letter_box: &LetterBox) -> Vec<Vec2> {
    unit.iter().map(|&p| letter_box.to_canvas(p)).collect()
}
