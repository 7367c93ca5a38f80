//! Byte sources feeding the decoder.
//!
//! All I/O lives here: the decode layer pulls bytes through [`ByteSource`]
//! and never touches files or stdin directly. A source is accessed by
//! exactly one decode in flight at a time.

use std::io::{ErrorKind, Read};

use thiserror::Error;

/// Internal read buffer size for [`ReadSource`].
const BUF_CAPACITY: usize = 64 * 1024;

/// A sequential pull of bytes with a clean end-of-input signal.
pub trait ByteSource {
    /// Pull the next byte. `Ok(None)` is a clean end of input.
    fn next_byte(&mut self) -> Result<Option<u8>, SourceError>;

    /// Fill as much of `buf` as the source can provide, returning the
    /// number of bytes written. Fewer than `buf.len()` only at end of
    /// input.
    fn read_into(&mut self, buf: &mut [u8]) -> Result<usize, SourceError>;
}

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Buffered [`ByteSource`] over any [`Read`] impl (file, stdin, or an
/// in-memory slice).
///
/// # Examples
/// ```
/// use bershark_core::{ByteSource, ReadSource};
///
/// let bytes: &[u8] = &[0x02, 0x01];
/// let mut source = ReadSource::new(bytes);
/// assert_eq!(source.next_byte()?, Some(0x02));
/// assert_eq!(source.next_byte()?, Some(0x01));
/// assert_eq!(source.next_byte()?, None);
/// # Ok::<(), bershark_core::SourceError>(())
/// ```
pub struct ReadSource<R> {
    inner: R,
    buf: Vec<u8>,
    pos: usize,
    filled: usize,
}

impl<R: Read> ReadSource<R> {
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            buf: vec![0; BUF_CAPACITY],
            pos: 0,
            filled: 0,
        }
    }

    fn refill(&mut self) -> Result<(), SourceError> {
        loop {
            match self.inner.read(&mut self.buf) {
                Ok(n) => {
                    self.pos = 0;
                    self.filled = n;
                    return Ok(());
                }
                Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                Err(err) => return Err(err.into()),
            }
        }
    }
}

impl<R: Read> ByteSource for ReadSource<R> {
    fn next_byte(&mut self) -> Result<Option<u8>, SourceError> {
        if self.pos == self.filled {
            self.refill()?;
            if self.filled == 0 {
                return Ok(None);
            }
        }
        let byte = self.buf[self.pos];
        self.pos += 1;
        Ok(Some(byte))
    }

    fn read_into(&mut self, buf: &mut [u8]) -> Result<usize, SourceError> {
        let mut written = 0;
        while written < buf.len() {
            if self.pos == self.filled {
                self.refill()?;
                if self.filled == 0 {
                    break;
                }
            }
            let take = (self.filled - self.pos).min(buf.len() - written);
            buf[written..written + take].copy_from_slice(&self.buf[self.pos..self.pos + take]);
            self.pos += take;
            written += take;
        }
        Ok(written)
    }
}
