//! taglex - Streaming pull tokenizer for an XML-like markup dialect
//!
//! The dialect covers nested tags, self-closing tags, quoted attributes,
//! text content, comments, and a single optional prolog declaration.
//! Attribute values and content are coerced to typed [`Value`]s through a
//! JSON-style literal grammar, falling back to plain strings.
//!
//! Parsing is single-pass and forward-only: the consumer pulls one event at
//! a time and inspects the tokenizer's accessors between pulls.
//!
//! ```
//! use taglex::{SourceText, TokenKind, Tokenizer, Value};
//!
//! let source = SourceText::new(r#"<task id="7" urgent="true">review</task>"#);
//! let mut tokenizer = Tokenizer::new(&source);
//!
//! assert_eq!(tokenizer.next_token()?, Some(TokenKind::StartTag));
//! assert_eq!(tokenizer.tag_name(), Some("task"));
//! assert_eq!(tokenizer.attributes()[0].value, Value::Int(7));
//! assert_eq!(tokenizer.attributes()[1].value, Value::Bool(true));
//!
//! assert_eq!(tokenizer.next_token()?, Some(TokenKind::Text));
//! assert_eq!(tokenizer.content(), &Value::Str("review".to_string()));
//!
//! assert_eq!(tokenizer.next_token()?, Some(TokenKind::EndTag));
//! assert_eq!(tokenizer.next_token()?, None);
//! # Ok::<(), taglex::SyntaxError>(())
//! ```

mod core;

pub use crate::core::error::{ErrorKind, SyntaxError};
pub use crate::core::literal::Value;
pub use crate::core::stage::Stage;
pub use crate::core::state::Attribute;
pub use crate::core::text::SourceText;
pub use crate::core::tokenizer::{TokenKind, Tokenizer};
