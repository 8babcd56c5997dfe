//! Dialect Tokenizer - State machine for lexical event extraction
//!
//! Implements a pull-parser style tokenizer over the markup dialect:
//! - Start / end / empty (self-closing) tags with typed attributes
//! - Text content, coerced through the literal grammar
//! - Comments (`<!...>`, skipped, no event)
//! - A single optional prolog (`<?...>`, captured, no event)
//!
//! Each pull advances the automaton until one complete event is recognized
//! or the input is exhausted. Structural violations abort the parse with a
//! [`SyntaxError`] at the offending byte offset.

use memchr::memchr;

use super::error::{ErrorKind, SyntaxError};
use super::literal::{self, Value};
use super::stage::Stage;
use super::state::{Attribute, ScanState};
use super::text::SourceText;

/// Kind of lexical event reported to the consumer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// Opening tag: `<name ...>`
    StartTag,
    /// Closing tag: `</name>`
    EndTag,
    /// Self-closing tag: `<name .../>`
    EmptyTag,
    /// Text content between tags
    Text,
}

/// Pull tokenizer over a borrowed [`SourceText`].
///
/// Forward-only and single-use: pull events with [`next_token`] (or the
/// `Iterator` adapter) until it reports exhaustion. The accessors
/// ([`tag_name`], [`attributes`], [`content`]) describe the most recent
/// event and are valid only until the next pull.
///
/// [`next_token`]: Tokenizer::next_token
/// [`tag_name`]: Tokenizer::tag_name
/// [`attributes`]: Tokenizer::attributes
/// [`content`]: Tokenizer::content
pub struct Tokenizer<'a> {
    input: &'a [u8],
    /// Index of the next unexamined byte
    pos: usize,
    stage: Stage,
    /// Stage to resume from at the next pull
    next_stage: Stage,
    state: ScanState,
    prolog_buf: Vec<u8>,
    prolog: Option<String>,
    done: bool,
}

impl<'a> Tokenizer<'a> {
    /// Create a tokenizer bound to the given text holder.
    pub fn new(source: &'a SourceText) -> Self {
        Tokenizer {
            input: source.as_bytes(),
            pos: 0,
            stage: Stage::AwaitTag,
            next_stage: Stage::AwaitTag,
            state: ScanState::new(),
            prolog_buf: Vec::new(),
            prolog: None,
            done: false,
        }
    }

    /// Name of the tag of the last event (opening, closing, or self-closing).
    pub fn tag_name(&self) -> Option<&str> {
        std::str::from_utf8(&self.state.tag).ok()
    }

    /// Attributes of the last start/empty tag event, in insertion order.
    pub fn attributes(&self) -> &[Attribute] {
        &self.state.attributes
    }

    /// Coerced content of the last text event.
    pub fn content(&self) -> &Value {
        &self.state.content_value
    }

    /// The captured prolog text, if one was declared.
    pub fn prolog(&self) -> Option<&str> {
        self.prolog.as_deref()
    }

    /// Current byte offset of the scan cursor.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Pull the next lexical event.
    ///
    /// Returns `Ok(Some(kind))` when an event was recognized, `Ok(None)`
    /// when the input is exhausted, and `Err` on the first structural
    /// violation. After an error or exhaustion the tokenizer is spent and
    /// further pulls report exhaustion.
    pub fn next_token(&mut self) -> Result<Option<TokenKind>, SyntaxError> {
        if self.done {
            return Ok(None);
        }

        self.stage = self.next_stage;
        self.state.clear_event();

        match self.scan() {
            Ok(Some(kind)) => {
                log::trace!(target: "taglex.tokenizer", "emit {kind:?} at {}", self.pos);
                Ok(Some(kind))
            }
            Ok(None) => {
                self.done = true;
                if let Some(open) = self.state.stack.last() {
                    return Err(SyntaxError::new(
                        ErrorKind::UnexpectedEof(open.clone()),
                        self.input.len(),
                    ));
                }
                Ok(None)
            }
            Err(err) => {
                self.done = true;
                Err(err)
            }
        }
    }

    /// Run the automaton forward until an event is finalized or the input
    /// ends.
    fn scan(&mut self) -> Result<Option<TokenKind>, SyntaxError> {
        while self.pos < self.input.len() {
            let i = self.pos;
            let b = self.input[i];
            self.pos += 1;

            match self.stage {
                Stage::AwaitTag => {
                    if b == b'<' {
                        self.dispatch_markup()?;
                    } else {
                        // Stray bytes between tags carry no meaning
                        self.pos = run_to(self.input, self.pos, b'<');
                    }
                }

                Stage::TagName => {
                    if let Some(kind) = self.read_tag_name(b, i)? {
                        return Ok(Some(kind));
                    }
                }

                Stage::AwaitKey => {
                    if let Some(kind) = self.await_key(b, i)? {
                        return Ok(Some(kind));
                    }
                }

                Stage::Key => self.read_key(b, i)?,

                Stage::AwaitEquals => self.await_equals(b, i)?,

                Stage::AwaitValue => self.await_value(b, i)?,

                Stage::Value => {
                    if b == self.state.quote {
                        self.push_attribute();
                    } else {
                        self.state.value.push(b);
                        let run = run_to(self.input, self.pos, self.state.quote);
                        self.state.value.extend_from_slice(&self.input[self.pos..run]);
                        self.pos = run;
                    }
                }

                Stage::AwaitContent => {
                    if b == b'<' {
                        self.dispatch_markup()?;
                    } else if !is_whitespace(b) {
                        self.stage = Stage::Content;
                        self.state.content.push(b);
                    }
                }

                Stage::Content => {
                    if b == b'<' {
                        // Leave the '<' for the next pull to dispatch
                        self.pos = i;
                        self.next_stage = Stage::AwaitTag;
                        self.finish_content();
                        return Ok(Some(TokenKind::Text));
                    }
                    self.state.content.push(b);
                    let run = run_to(self.input, self.pos, b'<');
                    self.state.content.extend_from_slice(&self.input[self.pos..run]);
                    self.pos = run;
                }

                Stage::CloseTag => {
                    if let Some(kind) = self.read_close_tag(b, i)? {
                        return Ok(Some(kind));
                    }
                }

                Stage::Comment => {
                    if b == b'>' {
                        self.stage = Stage::AwaitTag;
                    } else {
                        self.pos = run_to(self.input, self.pos, b'>');
                    }
                }

                Stage::Prolog => {
                    if b == b'>' {
                        let text = String::from_utf8_lossy(&self.prolog_buf).into_owned();
                        log::debug!(target: "taglex.tokenizer", "prolog captured ({} bytes)", text.len());
                        self.prolog = Some(text);
                        self.stage = Stage::AwaitTag;
                    } else {
                        self.prolog_buf.push(b);
                        let run = run_to(self.input, self.pos, b'>');
                        self.prolog_buf.extend_from_slice(&self.input[self.pos..run]);
                        self.pos = run;
                    }
                }
            }
        }

        Ok(None)
    }

    /// Route the byte after `<` to the right stage: closing tag, comment,
    /// prolog, or tag name. Used both when awaiting a tag and when markup
    /// interrupts content.
    fn dispatch_markup(&mut self) -> Result<(), SyntaxError> {
        match self.input.get(self.pos).copied() {
            Some(c) if is_whitespace(c) => {
                Err(SyntaxError::new(ErrorKind::EmptyTagName, self.pos))
            }
            Some(b'/') => {
                self.stage = Stage::CloseTag;
                self.pos += 1;
                Ok(())
            }
            Some(b'!') => {
                self.stage = Stage::Comment;
                self.pos += 1;
                Ok(())
            }
            Some(b'?') => {
                if self.prolog.is_some() {
                    return Err(SyntaxError::new(ErrorKind::DuplicateProlog, self.pos));
                }
                self.stage = Stage::Prolog;
                self.pos += 1;
                Ok(())
            }
            Some(b'>') | None => Err(SyntaxError::new(ErrorKind::EmptyTagName, self.pos)),
            Some(c) => {
                self.stage = Stage::TagName;
                self.state.tag.push(c);
                self.pos += 1;
                Ok(())
            }
        }
    }

    /// One byte of an opening tag name.
    fn read_tag_name(&mut self, b: u8, i: usize) -> Result<Option<TokenKind>, SyntaxError> {
        if is_whitespace(b) {
            self.stage = Stage::AwaitKey;
            return Ok(None);
        }
        match b {
            b'>' => Ok(Some(self.finish_open_tag())),
            b'/' => self.finish_empty_tag().map(Some),
            b'"' | b'\'' | b'<' | b'&' => {
                Err(SyntaxError::new(ErrorKind::IllegalChar(b as char), i))
            }
            _ => {
                self.state.tag.push(b);
                Ok(None)
            }
        }
    }

    /// Inside a tag header, between the name or previous attribute and the
    /// next key.
    fn await_key(&mut self, b: u8, i: usize) -> Result<Option<TokenKind>, SyntaxError> {
        match b {
            b'>' => Ok(Some(self.finish_open_tag())),
            b'/' => self.finish_empty_tag().map(Some),
            b'"' | b'\'' => Err(SyntaxError::new(ErrorKind::EmptyKey(b as char), i)),
            c if is_whitespace(c) => Ok(None),
            c => {
                self.stage = Stage::Key;
                self.state.key.push(c);
                Ok(None)
            }
        }
    }

    /// One byte of an attribute key.
    fn read_key(&mut self, b: u8, i: usize) -> Result<(), SyntaxError> {
        if is_whitespace(b) {
            self.stage = Stage::AwaitEquals;
            return Ok(());
        }
        match b {
            b'=' => {
                self.stage = Stage::AwaitValue;
                Ok(())
            }
            b'"' | b'\'' | b'/' | b'>' | b'<' | b'&' => {
                Err(SyntaxError::new(ErrorKind::IllegalChar(b as char), i))
            }
            _ => {
                self.state.key.push(b);
                Ok(())
            }
        }
    }

    fn await_equals(&mut self, b: u8, i: usize) -> Result<(), SyntaxError> {
        if b == b'=' {
            self.stage = Stage::AwaitValue;
            return Ok(());
        }
        if is_whitespace(b) {
            Ok(())
        } else {
            Err(SyntaxError::new(ErrorKind::ExpectedEquals, i))
        }
    }

    fn await_value(&mut self, b: u8, i: usize) -> Result<(), SyntaxError> {
        if b == b'"' || b == b'\'' {
            self.state.quote = b;
            self.stage = Stage::Value;
            return Ok(());
        }
        if is_whitespace(b) {
            Ok(())
        } else {
            Err(SyntaxError::new(ErrorKind::ExpectedQuote, i))
        }
    }

    /// One byte of a closing tag name, or its `>` terminator.
    fn read_close_tag(&mut self, b: u8, i: usize) -> Result<Option<TokenKind>, SyntaxError> {
        match b {
            b'>' => {
                let close = self.tag_text();
                let open = self.state.stack.pop().unwrap_or_default();
                if open != close {
                    return Err(SyntaxError::new(ErrorKind::TagMismatch { open, close }, i));
                }
                self.next_stage = Stage::AwaitTag;
                Ok(Some(TokenKind::EndTag))
            }
            b'"' | b'\'' | b'/' | b'<' => {
                Err(SyntaxError::new(ErrorKind::IllegalChar(b as char), i))
            }
            _ => {
                self.state.tag.push(b);
                Ok(None)
            }
        }
    }

    /// `>` seen: the accumulated name opens a tag.
    fn finish_open_tag(&mut self) -> TokenKind {
        self.state.stack.push(self.tag_text());
        self.next_stage = Stage::AwaitContent;
        TokenKind::StartTag
    }

    /// `/` seen in a tag header: must be `/>`, finalizing a self-closing tag.
    fn finish_empty_tag(&mut self) -> Result<TokenKind, SyntaxError> {
        if self.input.get(self.pos).copied() != Some(b'>') {
            return Err(SyntaxError::new(
                ErrorKind::UnclosedTag(self.tag_text()),
                self.pos,
            ));
        }
        self.pos += 1;
        self.next_stage = Stage::AwaitTag;
        Ok(TokenKind::EmptyTag)
    }

    /// Closing quote seen: coerce and store the accumulated attribute.
    fn push_attribute(&mut self) {
        let key = String::from_utf8_lossy(&self.state.key).into_owned();
        let raw = String::from_utf8_lossy(&self.state.value);
        let value = literal::coerce_attribute(&raw);
        self.state.attributes.push(Attribute::new(key, value));
        self.state.key.clear();
        self.state.value.clear();
        self.stage = Stage::AwaitKey;
    }

    /// Content terminated by `<`: coerce what was accumulated.
    fn finish_content(&mut self) {
        let raw = String::from_utf8_lossy(&self.state.content);
        self.state.content_value = literal::coerce_content(&raw);
    }

    fn tag_text(&self) -> String {
        String::from_utf8_lossy(&self.state.tag).into_owned()
    }
}

impl<'a> Iterator for Tokenizer<'a> {
    type Item = Result<TokenKind, SyntaxError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_token().transpose()
    }
}

/// Position of the next `delim` at or after `pos`, or end of input.
#[inline]
fn run_to(input: &[u8], pos: usize, delim: u8) -> usize {
    match memchr(delim, &input[pos..]) {
        Some(off) => pos + off,
        None => input.len(),
    }
}

/// Check if byte is whitespace
#[inline]
fn is_whitespace(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\n' | b'\r')
}
