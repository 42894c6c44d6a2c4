use crate::error::{Result, StencilError};
use crate::templates::TemplateStore;

/// Words shipped with the game. Filtered against the template store at load.
pub const DEFAULT_WORDS: &[&str] = &[
    "CAT", "DOG", "SUN", "HAT", "BOX", "FOX", "PIG", "COW", "BUS", "CUP",
    "MAP", "PEN", "JAM", "KEY", "OWL", "ZOO", "BEE", "YAK", "ANT", "EGG",
    "FISH", "FROG", "BIRD", "STAR", "MOON", "TREE", "CAKE", "DUCK", "LION", "QUIZ",
];

/// Pool of traceable words.
#[derive(Debug, Clone)]
pub struct WordList {
    words: Vec<String>,
}

impl WordList {
    /// Keep only words whose every letter has a template.
    /// Words are upper-cased and trimmed; blank entries are dropped.
    pub fn filtered<S: AsRef<str>>(words: impl IntoIterator<Item = S>, store: &TemplateStore) -> Result<Self> {
        let mut kept = Vec::new();
        for word in words {
            let word = word.as_ref().trim().to_uppercase();
            if word.is_empty() {
                continue;
            }
            if store.covers_word(&word) {
                kept.push(word);
            } else {
                log::warn!("dropping word {word:?}: undefined letters");
            }
        }

        if kept.is_empty() {
            return Err(StencilError::EmptyWordList);
        }
        Ok(Self { words: kept })
    }

    /// The compiled-in list, filtered against `store`.
    pub fn builtin(store: &TemplateStore) -> Result<Self> {
        Self::filtered(DEFAULT_WORDS.iter().copied(), store)
    }

    /// Parse a JSON array of strings, then filter against `store`.
    pub fn from_json(json: &str, store: &TemplateStore) -> Result<Self> {
        let words: Vec<String> = serde_json::from_str(json)?;
        Self::filtered(words, store)
    }

    /// Pick a word by index (caller provides random index).
    pub fn pick(&self, index: usize) -> &str {
        &self.words[index % self.words.len()]
    }

    pub fn position(&self, word: &str) -> Option<usize> {
        self.words.iter().position(|w| w == word)
    }

    /// Number of words in the list. Never zero.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.words.iter().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_words_are_all_traceable() {
        let store = TemplateStore::builtin();
        let words = WordList::builtin(&store).unwrap();
        assert_eq!(words.len(), DEFAULT_WORDS.len());
        assert!(words.iter().all(|w| store.covers_word(w)));
    }

    #[test]
    fn filter_drops_undefined_letters() {
        let store = TemplateStore::builtin();
        let words = WordList::filtered(["cat", "R2D2", " dog ", "", "é"], &store).unwrap();
        assert_eq!(words.iter().collect::<Vec<_>>(), vec!["CAT", "DOG"]);
    }

    #[test]
    fn nothing_left_is_an_error() {
        let store = TemplateStore::builtin();
        assert!(matches!(
            WordList::filtered(["123"], &store),
            Err(StencilError::EmptyWordList)
        ));
    }

    #[test]
    fn parse_and_pick_wraps_around() {
        let store = TemplateStore::builtin();
        let words = WordList::from_json(r#"["alpha", "beta", "gamma"]"#, &store).unwrap();
        assert_eq!(words.pick(0), "ALPHA");
        assert_eq!(words.pick(5), "GAMMA");
        assert_eq!(words.position("BETA"), Some(1));
    }
}
