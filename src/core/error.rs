//! Structural Parse Errors
//!
//! Every violation is fatal: it is detected at the exact byte offset that
//! triggers it and aborts both the current pull and the whole parse. There
//! is no recovery or skip-and-continue mode.

use std::error::Error;
use std::fmt;

/// Category of structural violation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// `<>`, `<` followed by whitespace, or `<` at end of input
    EmptyTagName,
    /// A second `<?...>` declaration, anywhere in the input
    DuplicateProlog,
    /// Forbidden character inside a tag name, attribute key, or closing name
    IllegalChar(char),
    /// `/` in a tag header not immediately followed by `>`
    UnclosedTag(String),
    /// Quote character found where an attribute key was expected
    EmptyKey(char),
    /// Non-whitespace character other than `=` after an attribute key
    ExpectedEquals,
    /// Attribute value did not start with `"` or `'`
    ExpectedQuote,
    /// Closing tag name does not match the innermost open tag
    TagMismatch { open: String, close: String },
    /// Input ended while the named tag was still open
    UnexpectedEof(String),
}

/// A structural parse failure with the 0-based byte offset at which the
/// violation was detected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxError {
    pub kind: ErrorKind,
    pub position: usize,
}

impl SyntaxError {
    pub fn new(kind: ErrorKind, position: usize) -> Self {
        SyntaxError { kind, position }
    }
}

impl fmt::Display for SyntaxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ErrorKind::EmptyTagName => write!(f, "empty tag name")?,
            ErrorKind::DuplicateProlog => write!(f, "another prolog declaration")?,
            ErrorKind::IllegalChar(c) => write!(f, "unexpected sign ({c})")?,
            ErrorKind::UnclosedTag(tag) if tag.is_empty() => {
                write!(f, "tag is not closed, '>' missed")?
            }
            ErrorKind::UnclosedTag(tag) => write!(f, "tag '{tag}' is not closed, '>' missed")?,
            ErrorKind::EmptyKey(quote) => {
                write!(f, "empty key, quote ({quote}) is not expected")?
            }
            ErrorKind::ExpectedEquals => write!(f, "value missed, equal sign '=' expected")?,
            ErrorKind::ExpectedQuote => {
                write!(f, "value missed, start quote (' or \") missed")?
            }
            ErrorKind::TagMismatch { open, close } => {
                write!(f, "close tag </{close}> does not match open tag <{open}>")?
            }
            ErrorKind::UnexpectedEof(tag) => {
                write!(f, "unexpected end of input, tag <{tag}> is not closed")?
            }
        }
        write!(f, " at position {}", self.position)
    }
}

impl Error for SyntaxError {}
