use std::net::IpAddr;

use super::layout;
use crate::snapshot::{SnapshotView, Truncated};

/// Wire epoch of a message: the tag byte plus the enclosing address family
/// select exactly one of these, and only then is a layout applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Wire {
    V4,
    V6,
    V6Draft,
}

impl Wire {
    fn unreach_size(self) -> usize {
        match self {
            Wire::V4 => layout::UNREACH_V4_SIZE,
            Wire::V6 | Wire::V6Draft => layout::UNREACH_V6_SIZE,
        }
    }

    fn read_addr(self, view: &SnapshotView<'_>, offset: usize) -> Result<IpAddr, Truncated> {
        match self {
            Wire::V4 => view.read_ipv4(offset).map(IpAddr::V4),
            Wire::V6 | Wire::V6Draft => view.read_ipv6(offset).map(IpAddr::V6),
        }
    }
}

#[derive(Debug)]
pub struct RouteRequest {
    pub flags: u8,
    pub hops: u8,
    pub id: u32,
    pub dst: IpAddr,
    pub dst_seq: u32,
    pub src: IpAddr,
    pub src_seq: u32,
    pub extensions: ExtensionScan,
}

#[derive(Debug)]
pub struct RouteReply {
    pub flags: u8,
    pub prefix: u8,
    pub hops: u8,
    pub dst: IpAddr,
    pub dst_seq: u32,
    pub src: IpAddr,
    pub lifetime_ms: u32,
    pub extensions: ExtensionScan,
}

#[derive(Debug)]
pub struct RouteError {
    pub flags: u8,
    pub dest_count: u8,
    pub unreachable: Vec<Unreachable>,
    /// Declared count exceeded what the capture can back.
    pub truncated: bool,
}

#[derive(Debug)]
pub struct Unreachable {
    pub addr: IpAddr,
    pub seq: u32,
}

#[derive(Debug, PartialEq, Eq)]
pub enum Extension {
    Hello { interval_ms: u32 },
    Other { kind: u8, length: u8 },
}

/// How an extension scan ended early, if it did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtTruncation {
    /// The two-byte extension header itself was cut.
    Header,
    /// A hello extension's interval field was cut.
    Hello,
}

#[derive(Debug)]
pub struct ExtensionScan {
    pub records: Vec<Extension>,
    pub truncated: Option<ExtTruncation>,
}

pub(crate) fn parse_rreq(view: &SnapshotView<'_>, wire: Wire) -> Result<RouteRequest, Truncated> {
    let (size, flags, hops, id, dst, dst_seq, src, src_seq) = match wire {
        Wire::V4 => (
            layout::RREQ_V4_SIZE,
            layout::RREQ_V4_FLAGS,
            layout::RREQ_V4_HOPS,
            layout::RREQ_V4_ID,
            layout::RREQ_V4_DST,
            layout::RREQ_V4_DST_SEQ,
            layout::RREQ_V4_SRC,
            layout::RREQ_V4_SRC_SEQ,
        ),
        Wire::V6 => (
            layout::RREQ_V6_SIZE,
            layout::RREQ_V6_FLAGS,
            layout::RREQ_V6_HOPS,
            layout::RREQ_V6_ID,
            layout::RREQ_V6_DST,
            layout::RREQ_V6_DST_SEQ,
            layout::RREQ_V6_SRC,
            layout::RREQ_V6_SRC_SEQ,
        ),
        Wire::V6Draft => (
            layout::RREQ_V6_DRAFT_SIZE,
            layout::RREQ_V6_DRAFT_FLAGS,
            layout::RREQ_V6_DRAFT_HOPS,
            layout::RREQ_V6_DRAFT_ID,
            layout::RREQ_V6_DRAFT_DST,
            layout::RREQ_V6_DRAFT_DST_SEQ,
            layout::RREQ_V6_DRAFT_SRC,
            layout::RREQ_V6_DRAFT_SRC_SEQ,
        ),
    };
    view.require_captured(0, size)?;
    Ok(RouteRequest {
        flags: view.read_u8(flags)?,
        hops: view.read_u8(hops)?,
        id: view.read_u32_be(id)?,
        dst: wire.read_addr(view, dst)?,
        dst_seq: view.read_u32_be(dst_seq)?,
        src: wire.read_addr(view, src)?,
        src_seq: view.read_u32_be(src_seq)?,
        extensions: scan_extensions(view, size),
    })
}

pub(crate) fn parse_rrep(view: &SnapshotView<'_>, wire: Wire) -> Result<RouteReply, Truncated> {
    let (size, flags, prefix, hops, dst, dst_seq, src, lifetime) = match wire {
        Wire::V4 => (
            layout::RREP_V4_SIZE,
            layout::RREP_V4_FLAGS,
            layout::RREP_V4_PREFIX,
            layout::RREP_V4_HOPS,
            layout::RREP_V4_DST,
            layout::RREP_V4_DST_SEQ,
            layout::RREP_V4_SRC,
            layout::RREP_V4_LIFETIME,
        ),
        Wire::V6 => (
            layout::RREP_V6_SIZE,
            layout::RREP_V6_FLAGS,
            layout::RREP_V6_PREFIX,
            layout::RREP_V6_HOPS,
            layout::RREP_V6_DST,
            layout::RREP_V6_DST_SEQ,
            layout::RREP_V6_SRC,
            layout::RREP_V6_LIFETIME,
        ),
        Wire::V6Draft => (
            layout::RREP_V6_DRAFT_SIZE,
            layout::RREP_V6_DRAFT_FLAGS,
            layout::RREP_V6_DRAFT_PREFIX,
            layout::RREP_V6_DRAFT_HOPS,
            layout::RREP_V6_DRAFT_DST,
            layout::RREP_V6_DRAFT_DST_SEQ,
            layout::RREP_V6_DRAFT_SRC,
            layout::RREP_V6_DRAFT_LIFETIME,
        ),
    };
    view.require_captured(0, size)?;
    Ok(RouteReply {
        flags: view.read_u8(flags)?,
        prefix: view.read_u8(prefix)? & layout::RREP_PREFIX_MASK,
        hops: view.read_u8(hops)?,
        dst: wire.read_addr(view, dst)?,
        dst_seq: view.read_u32_be(dst_seq)?,
        src: wire.read_addr(view, src)?,
        lifetime_ms: view.read_u32_be(lifetime)?,
        extensions: scan_extensions(view, size),
    })
}

/// The declared destination count and the bytes actually captured are
/// independent; only `min(count, available / entry_size)` entries are
/// walked, and a shortfall is reported instead of trusted.
pub(crate) fn parse_rerr(view: &SnapshotView<'_>, wire: Wire) -> Result<RouteError, Truncated> {
    view.require_captured(0, layout::RERR_HEADER_SIZE)?;
    let flags = view.read_u8(layout::RERR_FLAGS)?;
    let dest_count = view.read_u8(layout::RERR_DEST_COUNT)?;

    let entry_size = wire.unreach_size();
    let available = view.effective_len().saturating_sub(layout::RERR_ENTRIES);
    let walkable = (dest_count as usize).min(available / entry_size);

    let mut unreachable = Vec::with_capacity(walkable);
    for index in 0..walkable {
        let offset = layout::RERR_ENTRIES + index * entry_size;
        let addr = wire.read_addr(view, offset)?;
        let seq = view.read_u32_be(offset + entry_size - 4)?;
        unreachable.push(Unreachable { addr, seq });
    }

    Ok(RouteError {
        flags,
        dest_count,
        unreachable,
        truncated: dest_count as usize > walkable,
    })
}

/// Walks extension records left to right from the byte after the fixed
/// header. The budget comes from the declared length, so a record the
/// sender claims but the capture cut off surfaces as a truncation note;
/// every dereference is still bounded by the captured region. Unknown
/// extension payloads are skipped, never read.
pub(crate) fn scan_extensions(view: &SnapshotView<'_>, fixed_size: usize) -> ExtensionScan {
    let mut records = Vec::new();
    let mut truncated = None;
    let mut offset = fixed_size;
    let mut budget = view.declared_len().saturating_sub(fixed_size);

    while budget >= layout::EXT_HEADER_SIZE {
        let (kind, length) = match (view.read_u8(offset), view.read_u8(offset + 1)) {
            (Ok(kind), Ok(length)) => (kind, length),
            _ => {
                truncated = Some(ExtTruncation::Header);
                break;
            }
        };

        if kind == layout::EXT_HELLO {
            match view.read_u32_be(offset + layout::HELLO_INTERVAL_OFFSET) {
                Ok(interval_ms) => records.push(Extension::Hello { interval_ms }),
                Err(_) => {
                    truncated = Some(ExtTruncation::Hello);
                    break;
                }
            }
        } else {
            records.push(Extension::Other { kind, length });
        }

        // Each record consumes its header plus its declared payload.
        let advance = layout::EXT_HEADER_SIZE + length as usize;
        offset += advance;
        budget = budget.saturating_sub(advance);
    }

    ExtensionScan { records, truncated }
}
