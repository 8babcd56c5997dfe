//! Core tokenization primitives
//!
//! This module contains the building blocks of the pull tokenizer:
//! - Text: immutable source text holder the tokenizer borrows
//! - Stage: the closed set of automaton scanning modes
//! - Error: fatal structural errors with byte offsets
//! - State: transient working memory (accumulators, tag stack)
//! - Literal: typed values and the attribute/content coercion grammar
//! - Tokenizer: the state machine driving event extraction

pub mod error;
pub mod literal;
pub mod stage;
pub mod state;
pub mod text;
pub mod tokenizer;
