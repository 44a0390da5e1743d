use std::path::Path;

use thiserror::Error;

use crate::context::{CaptureContext, DisplayOptions, emit};
use crate::registry::PrinterRegistry;
use crate::sink::PrintSink;
use crate::snapshot::SnapshotView;
use crate::source::{PacketEvent, PacketSource, PcapFileSource, SourceError};
use crate::tokens::{Token, TokenBase, TokenTable};

mod udp;

pub use udp::{UdpDatagram, UdpError, parse_udp_datagram};

/// Well-known UDP port labels for the line prefix.
const UDP_SERVICES: TokenTable = TokenTable::new(
    &[Token {
        value: crate::registry::AODV_PORT as u32,
        label: "aodv",
    }],
    TokenBase::Decimal,
);

#[derive(Debug, Error)]
pub enum DissectError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Source error: {0}")]
    Source(#[from] SourceError),
}

/// Counters for one dissection run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct DissectSummary {
    pub packets_total: u64,
    pub packets_printed: u64,
}

pub fn dissect_pcap_file(
    path: &Path,
    sink: &mut dyn PrintSink,
    opts: DisplayOptions,
) -> Result<DissectSummary, DissectError> {
    let source = PcapFileSource::open(path)?;
    dissect_source(source, sink, opts)
}

/// Decode every packet from `source` into `sink`, one line per packet
/// with a registered printer.
///
/// The registry is consulted with the destination port first, then the
/// source port. Packets that fail to demultiplex, or carry no registered
/// protocol, are counted and skipped; nothing in here aborts the run.
pub fn dissect_source<S: PacketSource>(
    mut source: S,
    sink: &mut dyn PrintSink,
    opts: DisplayOptions,
) -> Result<DissectSummary, DissectError> {
    let registry = PrinterRegistry::default();
    let mut ctx = CaptureContext::new(sink, opts);
    let mut summary = DissectSummary::default();

    while let Some(PacketEvent {
        ts,
        linktype,
        data,
        origlen,
    }) = source.next_packet()?
    {
        summary.packets_total += 1;
        let datagram = match parse_udp_datagram(linktype, &data) {
            Ok(Some(datagram)) => datagram,
            Ok(None) | Err(_) => continue,
        };
        let printer = match registry
            .lookup(datagram.dst_port)
            .or_else(|| registry.lookup(datagram.src_port))
        {
            Some(printer) => printer,
            None => continue,
        };

        print_prefix(&mut ctx, ts, &datagram, data.len(), origlen);
        let view = SnapshotView::new(datagram.payload, datagram.declared_len);
        printer(&mut ctx, &view, datagram.family);
        emit!(ctx, "\n");
        summary.packets_printed += 1;
    }

    Ok(summary)
}

fn print_prefix(
    ctx: &mut CaptureContext<'_>,
    ts: Option<f64>,
    datagram: &UdpDatagram<'_>,
    caplen: usize,
    origlen: u32,
) {
    if let Some(ts) = ts {
        emit!(ctx, "{ts:.6} ");
    }
    let (src_port, dst_port) = if ctx.opts.numeric_ports {
        (
            datagram.src_port.to_string(),
            datagram.dst_port.to_string(),
        )
    } else {
        (
            UDP_SERVICES.lookup(datagram.src_port as u32).into_owned(),
            UDP_SERVICES.lookup(datagram.dst_port as u32).into_owned(),
        )
    };
    emit!(
        ctx,
        "{src}.{src_port} > {dst}.{dst_port}:",
        src = datagram.src,
        dst = datagram.dst,
    );
    if ctx.opts.verbosity > 0 {
        emit!(ctx, " [caplen {caplen} len {origlen}]");
    }
}
