use serde::Serialize;

use crate::core::time::Delay;
use crate::systems::Coverage;

/// What happened to a finished pen stroke.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StrokeOutcome {
    /// No stroke was in progress, or there is no letter to trace.
    Ignored,
    /// Too short to count. Nothing changed.
    Degenerate,
    /// The stroke strayed from the letter and is fading out.
    Rejected { accuracy: f32 },
    /// The stroke was kept. `coverage` says whether the letter is now done.
    Accepted { accuracy: f32, coverage: Coverage },
}

impl StrokeOutcome {
    pub fn is_accepted(&self) -> bool {
        matches!(self, StrokeOutcome::Accepted { .. })
    }

    /// True when this stroke finished the current letter.
    pub fn completed_letter(&self) -> bool {
        matches!(self, StrokeOutcome::Accepted { coverage: Coverage::Pass, .. })
    }
}

/// Game event reported to the host page.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StencilEvent {
    WordStarted { word: String },
    StrokeAccepted { accuracy: f32 },
    StrokeRejected { accuracy: f32 },
    LetterComplete { index: usize },
    WordComplete { word: String },
}

/// Where the engine is in the word cycle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Phase {
    /// No word loaded yet.
    AwaitingWord,
    /// Tracing the letter at this index.
    Tracing { letter: usize },
    /// Every letter traced; the next word is picked when `delay` runs out.
    WordComplete { delay: Delay },
}

impl Phase {
    pub fn is_tracing(&self) -> bool {
        matches!(self, Phase::Tracing { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn events_serialize_with_kind_tag() {
        let json = serde_json::to_string(&StencilEvent::LetterComplete { index: 2 }).unwrap();
        assert_eq!(json, r#"{"kind":"letter_complete","index":2}"#);
        let json = serde_json::to_string(&StencilEvent::WordStarted { word: "CAT".into() }).unwrap();
        assert_eq!(json, r#"{"kind":"word_started","word":"CAT"}"#);
    }

    #[test]
    fn outcome_helpers() {
        let done = StrokeOutcome::Accepted { accuracy: 1.0, coverage: Coverage::Pass };
        assert!(done.is_accepted());
        assert!(done.completed_letter());
        let partial = StrokeOutcome::Accepted {
            accuracy: 0.9,
            coverage: Coverage::Fail { segment: Some(1), ratio: 0.1 },
        };
        assert!(partial.is_accepted());
        assert!(!partial.completed_letter());
        assert!(!StrokeOutcome::Rejected { accuracy: 0.2 }.is_accepted());
    }
}
