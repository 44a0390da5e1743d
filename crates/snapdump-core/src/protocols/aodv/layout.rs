//! AODV wire layout: message tags, flag bits, and the byte offsets of the
//! fixed header variants. Offsets are the source of truth; the parser does
//! no arithmetic of its own beyond repeated-entry strides.
//!
//! Each message kind has three genuinely distinct fixed layouts: the IPv4
//! form, the RFC 3561 IPv6 form, and the draft-01 IPv6 form (which places
//! sequence numbers before the addresses). They share field names but not
//! offsets.

pub const RREQ: u8 = 1;
pub const RREP: u8 = 2;
pub const RERR: u8 = 3;
pub const RREP_ACK: u8 = 4;

pub const V6_DRAFT_01_RREQ: u8 = 16;
pub const V6_DRAFT_01_RREP: u8 = 17;
pub const V6_DRAFT_01_RERR: u8 = 18;
pub const V6_DRAFT_01_RREP_ACK: u8 = 19;

pub const RREQ_JOIN: u8 = 0x80;
pub const RREQ_REPAIR: u8 = 0x40;
pub const RREQ_GRAT: u8 = 0x20;
pub const RREQ_DEST: u8 = 0x10;
pub const RREQ_UNKNOWN: u8 = 0x08;

pub const RREP_REPAIR: u8 = 0x80;
pub const RREP_ACK_REQUIRED: u8 = 0x40;
pub const RREP_PREFIX_MASK: u8 = 0x1f;

pub const RERR_NODELETE: u8 = 0x80;

/// Route request, IPv4 form: type, flags, reserved, hops, id, then
/// destination address/seq and originator address/seq.
pub const RREQ_V4_SIZE: usize = 24;
pub const RREQ_V4_FLAGS: usize = 1;
pub const RREQ_V4_HOPS: usize = 3;
pub const RREQ_V4_ID: usize = 4;
pub const RREQ_V4_DST: usize = 8;
pub const RREQ_V4_DST_SEQ: usize = 12;
pub const RREQ_V4_SRC: usize = 16;
pub const RREQ_V4_SRC_SEQ: usize = 20;

pub const RREQ_V6_SIZE: usize = 48;
pub const RREQ_V6_FLAGS: usize = 1;
pub const RREQ_V6_HOPS: usize = 3;
pub const RREQ_V6_ID: usize = 4;
pub const RREQ_V6_DST: usize = 8;
pub const RREQ_V6_DST_SEQ: usize = 24;
pub const RREQ_V6_SRC: usize = 28;
pub const RREQ_V6_SRC_SEQ: usize = 44;

/// Draft-01 reorders the tail: both sequence numbers precede the addresses.
pub const RREQ_V6_DRAFT_SIZE: usize = 48;
pub const RREQ_V6_DRAFT_FLAGS: usize = 1;
pub const RREQ_V6_DRAFT_HOPS: usize = 3;
pub const RREQ_V6_DRAFT_ID: usize = 4;
pub const RREQ_V6_DRAFT_DST_SEQ: usize = 8;
pub const RREQ_V6_DRAFT_SRC_SEQ: usize = 12;
pub const RREQ_V6_DRAFT_DST: usize = 16;
pub const RREQ_V6_DRAFT_SRC: usize = 32;

/// Route reply, IPv4 form: type, flags, prefix size, hops, destination
/// address/seq, originator address, lifetime.
pub const RREP_V4_SIZE: usize = 20;
pub const RREP_V4_FLAGS: usize = 1;
pub const RREP_V4_PREFIX: usize = 2;
pub const RREP_V4_HOPS: usize = 3;
pub const RREP_V4_DST: usize = 4;
pub const RREP_V4_DST_SEQ: usize = 8;
pub const RREP_V4_SRC: usize = 12;
pub const RREP_V4_LIFETIME: usize = 16;

pub const RREP_V6_SIZE: usize = 44;
pub const RREP_V6_FLAGS: usize = 1;
pub const RREP_V6_PREFIX: usize = 2;
pub const RREP_V6_HOPS: usize = 3;
pub const RREP_V6_DST: usize = 4;
pub const RREP_V6_DST_SEQ: usize = 20;
pub const RREP_V6_SRC: usize = 24;
pub const RREP_V6_LIFETIME: usize = 40;

pub const RREP_V6_DRAFT_SIZE: usize = 44;
pub const RREP_V6_DRAFT_FLAGS: usize = 1;
pub const RREP_V6_DRAFT_PREFIX: usize = 2;
pub const RREP_V6_DRAFT_HOPS: usize = 3;
pub const RREP_V6_DRAFT_DST_SEQ: usize = 4;
pub const RREP_V6_DRAFT_DST: usize = 8;
pub const RREP_V6_DRAFT_SRC: usize = 24;
pub const RREP_V6_DRAFT_LIFETIME: usize = 40;

/// Route error header: type, flags, reserved, destination count. The
/// unreachable-destination entries follow immediately.
pub const RERR_HEADER_SIZE: usize = 4;
pub const RERR_FLAGS: usize = 1;
pub const RERR_DEST_COUNT: usize = 3;
pub const RERR_ENTRIES: usize = 4;
pub const UNREACH_V4_SIZE: usize = 8;
pub const UNREACH_V6_SIZE: usize = 20;

/// Route reply acknowledgement: type plus one reserved byte. The shortest
/// message; its size is the minimum any AODV payload must have captured.
pub const RREP_ACK_SIZE: usize = 2;

pub const EXT_HEADER_SIZE: usize = 2;
pub const EXT_HELLO: u8 = 1;
/// Hello extension: header plus a 4-byte interval, unaligned on the wire.
pub const HELLO_EXT_SIZE: usize = 6;
pub const HELLO_INTERVAL_OFFSET: usize = 2;
