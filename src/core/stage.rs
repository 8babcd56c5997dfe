//! Automaton Stages
//!
//! The closed set of scanning modes the tokenizer's state machine moves
//! through. Exactly one stage is active at a time; transitions are
//! deterministic given the stage and the current (or next) byte.

/// Current scanning stage of the tokenizer automaton.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Waiting for the next `<` that starts a piece of markup
    AwaitTag,
    /// Reading a tag name after `<`
    TagName,
    /// Inside a tag header, waiting for an attribute key (or `>`/`/>`)
    AwaitKey,
    /// Reading an attribute key
    Key,
    /// Key finished, waiting for `=`
    AwaitEquals,
    /// `=` seen, waiting for the opening quote of the value
    AwaitValue,
    /// Reading a quoted attribute value up to the matching quote
    Value,
    /// Tag opened, waiting for content or nested markup
    AwaitContent,
    /// Reading text content up to the next `<`
    Content,
    /// Reading a closing tag name after `</`
    CloseTag,
    /// Skipping a `<!...>` comment up to the terminating `>`
    Comment,
    /// Capturing the one-time `<?...>` prolog up to the terminating `>`
    Prolog,
}
