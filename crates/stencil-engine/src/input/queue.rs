/// Input events the engine understands, in canvas units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Pen or finger went down at (x, y).
    StrokeStart { x: f32, y: f32 },
    /// Pen moved to (x, y) while down.
    StrokeMove { x: f32, y: f32 },
    /// Pen lifted at (x, y).
    StrokeEnd { x: f32, y: f32 },
    /// Pointer left the canvas or the touch was cancelled.
    StrokeCancel,
    /// Canvas resized. `pixel_ratio` is device pixels per canvas unit.
    Resize { width: f32, height: f32, pixel_ratio: f32 },
    /// Skip to another word.
    NewWord,
    /// Clear button: restart the current word.
    ResetWord,
}

/// A queue of input events.
/// JS writes events into the queue; Rust drains them each frame.
pub struct InputQueue {
    events: Vec<InputEvent>,
}

impl InputQueue {
    pub fn new() -> Self {
        Self {
            events: Vec::with_capacity(32),
        }
    }

    pub fn push(&mut self, event: InputEvent) {
        self.events.push(event);
    }

    /// Drain all pending events in arrival order.
    pub fn drain(&mut self) -> Vec<InputEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn iter(&self) -> impl Iterator<Item = &InputEvent> {
        self.events.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }
}

impl Default for InputQueue {
    fn default() -> Self {
        Self::new()
    }
}
