use std::io::BufRead;

use hashbrown::HashSet;
use sliding_ngrams::{TokenSource, WordReader};

/// Conditions a token has to satisfy, combined with logical AND.
#[derive(Default, Debug)]
pub struct FilterConfig {
    excluded_prefixes: Vec<Vec<u8>>,
    min_token_len: usize,
    stopwords: HashSet<Vec<u8>>,
}

impl FilterConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn exclude_prefixes<I, P>(mut self, prefixes: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: AsRef<[u8]>,
    {
        self.excluded_prefixes
            .extend(prefixes.into_iter().map(|p| p.as_ref().to_vec()));
        self
    }

    pub fn min_token_len(mut self, len: usize) -> Self {
        self.min_token_len = len;
        self
    }

    /// Loads whitespace-separated stopwords.
    pub fn stopwords<R>(mut self, rdr: R) -> std::io::Result<Self>
    where
        R: BufRead,
    {
        let mut words = WordReader::new(rdr);
        while let Some(word) = words.next_token()? {
            self.stopwords.insert(word.to_vec());
        }
        Ok(self)
    }

    /// Returns `true` if no condition is set.
    pub fn is_trivial(&self) -> bool {
        self.excluded_prefixes.is_empty() && self.min_token_len <= 1 && self.stopwords.is_empty()
    }

    pub fn accepts(&self, token: &[u8]) -> bool {
        token.len() >= self.min_token_len
            && !self
                .excluded_prefixes
                .iter()
                .any(|p| token.starts_with(p))
            && !self.stopwords.contains(token)
    }
}
