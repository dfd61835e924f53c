use std::io::{self, BufRead};
use tokio_util::sync::CancellationToken;

/// Line iterator over a hosts source.
///
/// A line ends at `\n`, `\r\n` or a lone `\r`. Invalid UTF-8 is replaced
/// instead of failing the whole source. The iterator yields at most one read
/// error and ends after it. With a cancellation token attached it also ends
/// at the next line boundary once the token fires.
pub struct SourceLines<R> {
    reader: R,
    buf: Vec<u8>,
    cancel: Option<CancellationToken>,
    /// Previous line ended with `\r`; a leading `\n` belongs to it.
    skip_lf: bool,
    done: bool,
}

impl<R: BufRead> SourceLines<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            buf: Vec::with_capacity(256),
            cancel: None,
            skip_lf: false,
            done: false,
        }
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = Some(token);
        self
    }

    /// Reads one line into `buf` without its terminator. Returns `false` at
    /// end of input with nothing read.
    fn read_line(&mut self) -> io::Result<bool> {
        self.buf.clear();
        let mut read_any = false;

        loop {
            let available = match self.reader.fill_buf() {
                Ok(available) => available,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            };
            if available.is_empty() {
                return Ok(read_any);
            }

            if self.skip_lf {
                self.skip_lf = false;
                if available[0] == b'\n' {
                    self.reader.consume(1);
                    continue;
                }
            }

            match available.iter().position(|&b| b == b'\n' || b == b'\r') {
                Some(pos) => {
                    self.skip_lf = available[pos] == b'\r';
                    self.buf.extend_from_slice(&available[..pos]);
                    self.reader.consume(pos + 1);
                    return Ok(true);
                }
                None => {
                    let len = available.len();
                    self.buf.extend_from_slice(available);
                    self.reader.consume(len);
                    read_any = true;
                }
            }
        }
    }
}

impl<R: BufRead> Iterator for SourceLines<R> {
    type Item = io::Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done || self.cancel.as_ref().is_some_and(|t| t.is_cancelled()) {
            return None;
        }

        match self.read_line() {
            Ok(true) => Some(Ok(String::from_utf8_lossy(&self.buf).into_owned())),
            Ok(false) => {
                self.done = true;
                None
            }
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }
}
