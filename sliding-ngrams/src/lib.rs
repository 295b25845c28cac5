//! Incremental n-gram generation over token streams.
//!
//! [`NgramIterator`] pulls tokens from a [`TokenSource`] one at a time and produces
//! every contiguous run of `min_n..=max_n` tokens, keeping only the last `max_n`
//! tokens in memory. Grams are returned as borrowed views into that window.
#![deny(missing_docs)]

pub mod errors;
pub mod ngram;
pub mod source;

pub use ngram::{NgramIterator, OwnedNgrams, TokenFilter};
pub use source::{tokens, TokenIter, TokenSource, WordReader};
