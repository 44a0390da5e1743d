use crate::context::CaptureContext;
use crate::snapshot::SnapshotView;

/// Address family of the IP header enclosing a message. IPv6 selects
/// wider address fields and, for some tags, a distinct wire epoch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Family {
    V4,
    V6,
}

/// Printer entry point: renders one message through the context's sink.
pub type Printer = fn(&mut CaptureContext<'_>, &SnapshotView<'_>, Family);

/// Well-known UDP port for AODV control traffic (RFC 3561).
pub const AODV_PORT: u16 = 654;

/// Maps well-known UDP ports to printer entry points.
///
/// The external demultiplexer consults this after peeling the link, IP
/// and UDP layers; printers registered here have no dependency on how
/// that demultiplexing happens.
pub struct PrinterRegistry {
    entries: Vec<(u16, Printer)>,
}

impl PrinterRegistry {
    pub fn new() -> Self {
        Self { entries: Vec::new() }
    }

    pub fn register(&mut self, port: u16, printer: Printer) {
        self.entries.push((port, printer));
    }

    pub fn lookup(&self, port: u16) -> Option<Printer> {
        self.entries
            .iter()
            .find(|(registered, _)| *registered == port)
            .map(|(_, printer)| *printer)
    }
}

impl Default for PrinterRegistry {
    fn default() -> Self {
        let mut registry = Self::new();
        registry.register(AODV_PORT, crate::protocols::aodv::print_aodv);
        registry
    }
}
