//! Transient Parse State
//!
//! The automaton's working memory: byte accumulators for the piece of
//! markup currently being read, the open-tag stack, and the attribute list
//! of the current tag. Created together with a tokenizer and discarded with
//! it; nothing persists across parses.

use super::literal::Value;

/// A single attribute of a tag: ordered `(key, coerced value)` pair.
///
/// Keys are not deduplicated; insertion order is preserved per tag.
#[derive(Debug, Clone, PartialEq)]
pub struct Attribute {
    /// Attribute key
    pub key: String,
    /// Coerced attribute value
    pub value: Value,
}

impl Attribute {
    pub fn new(key: impl Into<String>, value: Value) -> Self {
        Attribute {
            key: key.into(),
            value,
        }
    }
}

/// Mutable working memory of the automaton.
#[derive(Debug, Default)]
pub(crate) struct ScanState {
    /// Stack of currently open tag names
    pub stack: Vec<String>,
    /// Tag name accumulator (opening or closing tag at the current position)
    pub tag: Vec<u8>,
    /// Attribute key accumulator
    pub key: Vec<u8>,
    /// Attribute value accumulator
    pub value: Vec<u8>,
    /// Attributes of the tag at the current position
    pub attributes: Vec<Attribute>,
    /// Raw content accumulator
    pub content: Vec<u8>,
    /// Coerced content of the last content event
    pub content_value: Value,
    /// Quote character the current attribute value was opened with
    pub quote: u8,
}

impl ScanState {
    pub fn new() -> Self {
        ScanState {
            quote: b'"',
            ..ScanState::default()
        }
    }

    /// Reset the per-event accumulators at the start of a pull.
    pub fn clear_event(&mut self) {
        self.tag.clear();
        self.content.clear();
        self.content_value = Value::Null;
        self.attributes.clear();
    }
}
