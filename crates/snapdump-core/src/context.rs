use std::fmt;

use crate::sink::PrintSink;

/// Output configuration shared by every printer in a session.
#[derive(Debug, Clone, Copy, Default)]
pub struct DisplayOptions {
    /// Render port numbers numerically instead of via token tables.
    pub numeric_ports: bool,
    /// 0 = terse, higher values add capture metadata to each line.
    pub verbosity: u8,
}

/// Per-session decoding state: the print sink plus display options.
///
/// Constructed once per capture session. Per-packet extents are not kept
/// here; printers receive an explicit [`SnapshotView`](crate::SnapshotView)
/// for each message, so repeated or interleaved decodes cannot leak state
/// between packets.
pub struct CaptureContext<'a> {
    sink: &'a mut dyn PrintSink,
    pub opts: DisplayOptions,
}

impl<'a> CaptureContext<'a> {
    pub fn new(sink: &'a mut dyn PrintSink, opts: DisplayOptions) -> Self {
        Self { sink, opts }
    }

    pub fn emit(&mut self, args: fmt::Arguments<'_>) {
        self.sink.emit(args);
    }
}

/// Formatted write into a context's sink.
macro_rules! emit {
    ($ctx:expr, $($arg:tt)*) => {
        $ctx.emit(format_args!($($arg)*))
    };
}
pub(crate) use emit;

#[cfg(test)]
mod tests {
    use super::{CaptureContext, DisplayOptions};
    use crate::sink::StringSink;

    #[test]
    fn emit_routes_through_sink() {
        let mut sink = StringSink::new();
        let mut ctx = CaptureContext::new(&mut sink, DisplayOptions::default());
        emit!(ctx, " rrep-ack {}", 2);
        drop(ctx);
        assert_eq!(sink.as_str(), " rrep-ack 2");
    }
}
