use std::fmt;
use std::fmt::Write as _;
use std::io;
use std::io::Write as _;

/// Destination for decoded text.
///
/// Printers route every fragment through a sink so that decoding logic
/// never performs I/O directly; destination and buffering policy live
/// entirely with the caller.
pub trait PrintSink {
    fn emit(&mut self, args: fmt::Arguments<'_>);
}

/// Sink that accumulates into a `String`. Used by tests and golden
/// comparisons.
#[derive(Debug, Default)]
pub struct StringSink {
    buf: String,
}

impl StringSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn as_str(&self) -> &str {
        &self.buf
    }

    pub fn into_string(self) -> String {
        self.buf
    }
}

impl PrintSink for StringSink {
    fn emit(&mut self, args: fmt::Arguments<'_>) {
        // fmt::Write on String cannot fail.
        let _ = self.buf.write_fmt(args);
    }
}

/// Sink over any `io::Write`. The first write error is retained instead
/// of aborting mid-packet; callers check it once the run is over.
#[derive(Debug)]
pub struct IoSink<W: io::Write> {
    inner: W,
    error: Option<io::Error>,
}

impl<W: io::Write> IoSink<W> {
    pub fn new(inner: W) -> Self {
        Self { inner, error: None }
    }

    pub fn take_error(&mut self) -> Option<io::Error> {
        self.error.take()
    }

    pub fn into_inner(self) -> W {
        self.inner
    }
}

impl<W: io::Write> PrintSink for IoSink<W> {
    fn emit(&mut self, args: fmt::Arguments<'_>) {
        if self.error.is_some() {
            return;
        }
        if let Err(err) = self.inner.write_fmt(args) {
            self.error = Some(err);
        }
    }
}
