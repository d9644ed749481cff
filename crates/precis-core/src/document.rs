//! Input document.

use serde::Serialize;

use crate::text::word_count;

/// Immutable input handed to the summarizer by a caller.
///
/// The word count is derived once at construction; the raw text is never
/// mutated afterwards. Only [`Document::new`] and the `From` conversions
/// build one, so the count always matches the text.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    raw_text: String,
    word_count: usize,
}

impl Document {
    /// Wrap raw text as a document.
    pub fn new(raw_text: impl Into<String>) -> Self {
        let raw_text = raw_text.into();
        let word_count = word_count(&raw_text);
        Self {
            raw_text,
            word_count,
        }
    }

    /// The original text.
    #[must_use]
    pub fn raw_text(&self) -> &str {
        &self.raw_text
    }

    /// Whitespace word count of the original text.
    #[must_use]
    pub fn word_count(&self) -> usize {
        self.word_count
    }

    /// Whether the document contains nothing but whitespace.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.raw_text.trim().is_empty()
    }
}

impl From<String> for Document {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

impl From<&str> for Document {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derives_word_count() {
        let doc = Document::new("The quick brown fox");
        assert_eq!(doc.word_count(), 4);
        assert_eq!(doc.raw_text(), "The quick brown fox");
    }

    #[test]
    fn blank_detection() {
        assert!(Document::new("").is_blank());
        assert!(Document::new(" \n ").is_blank());
        assert!(!Document::new(" a ").is_blank());
    }

    #[test]
    fn from_conversions() {
        let a: Document = "x y".into();
        let b: Document = String::from("x y").into();
        assert_eq!(a, b);
    }

    #[test]
    fn serializes_derived_count() {
        let json = serde_json::to_value(Document::new("one two  three")).unwrap();
        assert_eq!(json["rawText"], "one two  three");
        assert_eq!(json["wordCount"], 3);
    }
}
