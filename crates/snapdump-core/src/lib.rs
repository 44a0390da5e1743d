//! snapdump core library: truncation-safe packet-to-text dissection.
//!
//! This crate implements the decoding pipeline used by the CLI: packet
//! sources feed the dissection driver, which demultiplexes frames down to
//! UDP, selects a protocol printer from the registry, and renders fields
//! through bounds-checked snapshot views into an injected print sink.
//! Printers are byte-oriented and perform no I/O; all file access is
//! isolated in `source` modules, all output goes through `sink`.
//!
//! Invariants:
//! - No printer reads a byte at or past the snapshot end: every field
//!   access goes through a `SnapshotView`, which bounds reads by
//!   `min(declared length, captured bytes)`.
//! - Truncation is rendered inline as a bracketed marker (`[|rreq]`,
//!   `[|rerr]`, ...) after whatever was decodable; it is never an error to
//!   the caller, so one cut packet cannot abort a session.
//! - Unrecognized message tags and extension types render generically;
//!   they are valid-but-unknown data, not failures.
//! - Decoding the same bytes twice yields identical output; no mutable
//!   state survives a packet.
//!
//! # Examples
//! ```
//! use snapdump_core::{
//!     CaptureContext, DisplayOptions, Family, SnapshotView, StringSink,
//! };
//! use snapdump_core::protocols::aodv::print_aodv;
//!
//! // A fully captured IPv4 route request.
//! let payload = [
//!     1u8, 0x80, 0, 3, 0, 0, 0, 7, 10, 0, 0, 1, 0, 0, 0, 5, 10, 0, 0, 2, 0, 0, 0, 9,
//! ];
//! let mut sink = StringSink::new();
//! let mut ctx = CaptureContext::new(&mut sink, DisplayOptions::default());
//! print_aodv(&mut ctx, &SnapshotView::new(&payload, payload.len()), Family::V4);
//! drop(ctx);
//! assert!(sink.as_str().contains(" rreq 24 [J] hops 3 id 0x00000007"));
//! ```

mod context;
mod dissect;
mod registry;
mod sink;
mod snapshot;
mod source;
mod tokens;

pub mod protocols;

pub use context::{CaptureContext, DisplayOptions};
pub use dissect::{
    DissectError, DissectSummary, UdpDatagram, UdpError, dissect_pcap_file, dissect_source,
    parse_udp_datagram,
};
pub use registry::{AODV_PORT, Family, Printer, PrinterRegistry};
pub use sink::{IoSink, PrintSink, StringSink};
pub use snapshot::{SnapshotView, Truncated};
pub use source::{PacketEvent, PacketSource, PcapFileSource, SourceError};
pub use tokens::{Token, TokenBase, TokenTable};

/// Maximum permissible snapshot length per packet.
pub const MAX_SNAPLEN: usize = 65535;
