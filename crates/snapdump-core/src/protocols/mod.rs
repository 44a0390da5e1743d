//! Protocol printer modules.
//!
//! Each protocol follows a layered structure:
//! - `layout`: tags, flag bits, byte offsets (source of truth)
//! - `parser`: snapshot-view decoding into typed records
//! - `printer`: text rendering through the capture context's sink
//!
//! Every byte a printer touches goes through a `SnapshotView`; packet
//! bytes are untrusted network input and the view's bounds checks are the
//! only thing standing between a short capture and an out-of-bounds read.
//! Truncation is rendered inline as a bracketed marker, never raised to
//! the caller.

pub mod aodv;
