//! Incremental n-gram generation over a bounded sliding window.
use std::io::{BufReader, Read};

use crate::errors::{NgramError, Result};
use crate::source::{is_space, TokenSource, WordReader};

/// Predicate deciding whether a token takes part in n-grams.
pub type TokenFilter = Box<dyn Fn(&[u8]) -> bool>;

/// Iterator producing every n-gram of `min_n..=max_n` tokens from a token stream.
///
/// After each new token, the grams ending at that token are produced from the
/// longest to the shortest. Only the last `max_n` tokens are kept, so memory usage
/// does not depend on the stream length.
///
/// # Examples
///
/// ```
/// use sliding_ngrams::NgramIterator;
///
/// let mut iter = NgramIterator::from_reader("foo bar baz".as_bytes(), 1, 2);
/// let mut grams = vec![];
/// while let Some(gram) = iter.next_gram().unwrap() {
///     grams.push(gram.join(&b' '));
/// }
/// assert_eq!(
///     grams,
///     vec![
///         b"foo".to_vec(),
///         b"foo bar".to_vec(),
///         b"bar".to_vec(),
///         b"bar baz".to_vec(),
///         b"baz".to_vec(),
///     ]
/// );
/// ```
pub struct NgramIterator<S> {
    source: S,
    min_n: usize,
    max_n: usize,
    // Oldest first; its length is the current window size. Grows during warm-up.
    window: Vec<Vec<u8>>,
    // Length of the next gram to emit, or 0 if the window must advance.
    curr_n: usize,
    filter: Option<TokenFilter>,
    started: bool,
    exhausted: bool,
}

impl<R> NgramIterator<WordReader<BufReader<R>>>
where
    R: Read,
{
    /// Creates an instance over whitespace-delimited words read from `reader`.
    ///
    /// See [`NgramIterator::new`] for the handling of `min_n` and `max_n`.
    pub fn from_reader(reader: R, min_n: usize, max_n: usize) -> Self {
        Self::new(WordReader::new(BufReader::new(reader)), min_n, max_n)
    }
}

impl<S> NgramIterator<S>
where
    S: TokenSource,
{
    /// Creates an instance.
    ///
    /// # Arguments
    ///
    /// * `source` - Token source consumed in order.
    /// * `min_n` - Minimum number of tokens in a gram. Zero is treated as one.
    /// * `max_n` - Maximum number of tokens in a gram. Values below `min_n` are raised to it.
    pub fn new(source: S, min_n: usize, max_n: usize) -> Self {
        let (min_n, max_n) = normalize(min_n, max_n);
        Self {
            source,
            min_n,
            max_n,
            window: vec![],
            curr_n: 0,
            filter: None,
            started: false,
            exhausted: false,
        }
    }

    /// Sets the token filter. Tokens for which `filter` returns `false` are skipped
    /// as if they were not in the stream.
    ///
    /// The filter can only be set before the first call of [`Self::next_gram()`];
    /// later calls return an error and keep the current filter.
    pub fn set_filter<F>(&mut self, filter: F) -> Result<()>
    where
        F: Fn(&[u8]) -> bool + 'static,
    {
        if self.started {
            return Err(NgramError::input(
                "The filter must be set before producing grams.",
            ));
        }
        self.filter = Some(Box::new(filter));
        Ok(())
    }

    /// Builder-style variant of [`Self::set_filter()`].
    pub fn filter<F>(mut self, filter: F) -> Result<Self>
    where
        F: Fn(&[u8]) -> bool + 'static,
    {
        self.set_filter(filter)?;
        Ok(self)
    }

    /// Gets the minimum number of tokens in a gram.
    pub const fn min_n(&self) -> usize {
        self.min_n
    }

    /// Gets the maximum number of tokens in a gram.
    pub const fn max_n(&self) -> usize {
        self.max_n
    }

    /// Gets the number of tokens currently held in the window.
    pub fn window_len(&self) -> usize {
        self.window.len()
    }

    /// Produces the next gram, or `None` at the end of the stream.
    ///
    /// The returned slice borrows the internal window, so it must be copied
    /// to be retained past the next call. Once `None` is returned,
    /// all subsequent calls return `None`. An error of the token source is
    /// returned as is, leaving the iterator unchanged.
    pub fn next_gram(&mut self) -> Result<Option<&[Vec<u8>]>> {
        self.started = true;
        while self.window.len() < self.min_n {
            if !self.advance()? {
                return Ok(None);
            }
        }
        if self.curr_n == 0 && !self.advance()? {
            return Ok(None);
        }
        let start = self.window.len() - self.curr_n;
        self.curr_n -= 1;
        if self.curr_n < self.min_n {
            self.curr_n = 0;
        }
        Ok(Some(&self.window[start..]))
    }

    /// Calls `func` for every remaining gram, returning the number of grams.
    pub fn try_for_each_gram<F>(&mut self, mut func: F) -> Result<usize>
    where
        F: FnMut(&[Vec<u8>]),
    {
        let mut num_grams = 0;
        while let Some(gram) = self.next_gram()? {
            func(gram);
            num_grams += 1;
        }
        Ok(num_grams)
    }

    /// Converts into an [`Iterator`] yielding copies of the grams.
    pub fn into_owned(self) -> OwnedNgrams<S> {
        OwnedNgrams { inner: self }
    }

    /// Slides the window by one accepted token, returning `false` if the source is exhausted.
    fn advance(&mut self) -> Result<bool> {
        if self.exhausted {
            return Ok(false);
        }
        loop {
            let token = match self.source.next_token()? {
                Some(token) => token,
                None => {
                    log::debug!(
                        "[NgramIterator::advance] Token source exhausted (window_len={})",
                        self.window.len()
                    );
                    self.exhausted = true;
                    return Ok(false);
                }
            };
            if token.iter().all(|&b| is_space(b)) {
                continue;
            }
            if let Some(filter) = self.filter.as_ref() {
                if !filter(token) {
                    continue;
                }
            }
            if self.window.len() < self.max_n {
                self.window.push(token.to_vec());
            } else {
                // Evicts the oldest token, reusing its buffer for the new one.
                self.window.rotate_left(1);
                let slot = &mut self.window[self.max_n - 1];
                slot.clear();
                slot.extend_from_slice(token);
            }
            self.curr_n = self.window.len();
            return Ok(true);
        }
    }
}

fn normalize(min_n: usize, max_n: usize) -> (usize, usize) {
    let new_min = min_n.max(1);
    let new_max = max_n.max(new_min);
    if (new_min, new_max) != (min_n, max_n) {
        log::debug!(
            "[NgramIterator::new] Normalized min_n={min_n},max_n={max_n} to min_n={new_min},max_n={new_max}"
        );
    }
    (new_min, new_max)
}

/// Iterator of owned grams, created by [`NgramIterator::into_owned()`].
pub struct OwnedNgrams<S> {
    inner: NgramIterator<S>,
}

impl<S> OwnedNgrams<S> {
    /// Unwraps the underlying [`NgramIterator`].
    pub fn into_inner(self) -> NgramIterator<S> {
        self.inner
    }
}

impl<S> Iterator for OwnedNgrams<S>
where
    S: TokenSource,
{
    type Item = Result<Vec<Vec<u8>>>;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next_gram().transpose().map(|r| r.map(<[_]>::to_vec))
    }
}
