//! Approximate size measures.
//!
//! Model budgets are expressed in "tokens", but nothing here runs a real
//! tokenizer: words are whitespace-separated runs and characters are Unicode
//! scalar values. Both are recomputed from the text on every call.

/// Number of whitespace-separated words in `text`.
#[must_use]
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Number of Unicode scalar values in `text`.
#[must_use]
pub fn char_count(text: &str) -> usize {
    text.chars().count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_has_no_words() {
        assert_eq!(word_count(""), 0);
        assert_eq!(word_count("   \n\t "), 0);
    }

    #[test]
    fn counts_runs_of_whitespace_once() {
        assert_eq!(word_count("one  two\nthree\tfour "), 4);
    }

    #[test]
    fn punctuation_stays_attached() {
        assert_eq!(word_count("Hello, world. Bye."), 3);
    }

    #[test]
    fn char_count_is_not_byte_length() {
        assert_eq!(char_count("héllo"), 5);
        assert_eq!("héllo".len(), 6);
    }
}
