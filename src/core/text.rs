//! Source Text Holder
//!
//! Owns the input text exactly once for the lifetime of a parse. The
//! tokenizer borrows the holder, so the text is referenced, never copied,
//! while it is being scanned.

/// Immutable holder for the text a tokenizer scans.
///
/// One holder feeds one [`Tokenizer`](crate::Tokenizer) instance; there are
/// no mutation methods.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceText {
    text: String,
}

impl SourceText {
    /// Create a new holder from the full input text.
    pub fn new(text: impl Into<String>) -> Self {
        SourceText { text: text.into() }
    }

    /// The held text.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// The held text as bytes.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        self.text.as_bytes()
    }

    /// Length of the text in bytes.
    #[inline]
    pub fn len(&self) -> usize {
        self.text.len()
    }

    /// True if the text is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

impl From<&str> for SourceText {
    fn from(text: &str) -> Self {
        SourceText::new(text)
    }
}

impl From<String> for SourceText {
    fn from(text: String) -> Self {
        SourceText { text }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_holds_text() {
        let source = SourceText::new("<a/>");
        assert_eq!(source.as_str(), "<a/>");
        assert_eq!(source.len(), 4);
        assert!(!source.is_empty());
    }

    #[test]
    fn test_empty() {
        let source = SourceText::from(String::new());
        assert!(source.is_empty());
        assert_eq!(source.len(), 0);
    }
}
