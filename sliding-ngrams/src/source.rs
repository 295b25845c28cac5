//! Token sources feeding [`NgramIterator`](crate::NgramIterator).
use std::io::{self, BufRead};

/// A producer of tokens, consumed strictly in order and at most once each.
pub trait TokenSource {
    /// Gets the next token, or `None` once the stream is exhausted.
    ///
    /// The returned slice is only valid until the next call.
    fn next_token(&mut self) -> io::Result<Option<&[u8]>>;
}

impl<S> TokenSource for &mut S
where
    S: TokenSource + ?Sized,
{
    fn next_token(&mut self) -> io::Result<Option<&[u8]>> {
        (**self).next_token()
    }
}

#[inline(always)]
pub(crate) const fn is_space(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\n' | b'\x0B' | b'\x0C' | b'\r')
}

/// Splits a byte stream into maximal runs of non-whitespace bytes.
///
/// Only ASCII whitespace delimits tokens. The reader is consumed incrementally,
/// so memory usage is bounded by the longest token.
pub struct WordReader<R> {
    reader: R,
    token: Vec<u8>,
    // A read failed in the middle of `token`; the next call resumes it.
    resuming: bool,
}

impl<R> WordReader<R>
where
    R: BufRead,
{
    /// Creates an instance reading from `reader`.
    pub const fn new(reader: R) -> Self {
        Self {
            reader,
            token: vec![],
            resuming: false,
        }
    }

    /// Unwraps the underlying reader. Bytes following the last token are left unread.
    pub fn into_inner(self) -> R {
        self.reader
    }
}

impl<R> TokenSource for WordReader<R>
where
    R: BufRead,
{
    fn next_token(&mut self) -> io::Result<Option<&[u8]>> {
        if !self.resuming {
            self.token.clear();
        }
        loop {
            let buf = match self.reader.fill_buf() {
                Ok(buf) => buf,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => {
                    self.resuming = true;
                    return Err(e);
                }
            };
            if buf.is_empty() {
                break;
            }
            // Leading whitespace is skipped only until the token starts.
            let start = if self.token.is_empty() {
                buf.iter().position(|&b| !is_space(b)).unwrap_or(buf.len())
            } else {
                0
            };
            let rest = &buf[start..];
            let (len, done) = match rest.iter().position(|&b| is_space(b)) {
                Some(end) => (end, true),
                None => (rest.len(), false),
            };
            self.token.extend_from_slice(&rest[..len]);
            self.reader.consume(start + len);
            if done {
                break;
            }
        }
        self.resuming = false;
        Ok(if self.token.is_empty() {
            None
        } else {
            Some(self.token.as_slice())
        })
    }
}

/// Token source over an in-memory iterator of byte strings.
pub struct TokenIter<I>
where
    I: Iterator,
{
    iter: I,
    current: Option<I::Item>,
}

impl<I> TokenSource for TokenIter<I>
where
    I: Iterator,
    I::Item: AsRef<[u8]>,
{
    fn next_token(&mut self) -> io::Result<Option<&[u8]>> {
        self.current = self.iter.next();
        Ok(self.current.as_ref().map(AsRef::as_ref))
    }
}

/// Creates a [`TokenIter`] yielding the items of `iter` as tokens.
///
/// Empty items are passed through; [`NgramIterator`](crate::NgramIterator) discards them.
pub fn tokens<I>(iter: I) -> TokenIter<I::IntoIter>
where
    I: IntoIterator,
    I::Item: AsRef<[u8]>,
{
    TokenIter {
        iter: iter.into_iter(),
        current: None,
    }
}
