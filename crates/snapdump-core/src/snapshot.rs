use std::net::{Ipv4Addr, Ipv6Addr};

use thiserror::Error;

/// A field read ran past the end of the captured region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("captured region too short: need {needed} bytes at offset {offset}, {available} available")]
pub struct Truncated {
    pub offset: usize,
    pub needed: usize,
    pub available: usize,
}

/// Bounds-checked view over one protocol message.
///
/// `data` holds the bytes that were actually captured for this message;
/// `declared` is the length the enclosing layer claims the message has,
/// which may exceed `data.len()` when the capture was cut short. No read
/// ever dereferences past `min(declared, data.len())`.
#[derive(Debug, Clone, Copy)]
pub struct SnapshotView<'a> {
    data: &'a [u8],
    declared: usize,
}

impl<'a> SnapshotView<'a> {
    pub fn new(data: &'a [u8], declared: usize) -> Self {
        Self { data, declared }
    }

    /// Length the enclosing layer claims this message has.
    pub fn declared_len(&self) -> usize {
        self.declared
    }

    /// Number of bytes that may actually be read.
    pub fn effective_len(&self) -> usize {
        self.declared.min(self.data.len())
    }

    /// Whether `len` bytes starting at `offset` lie inside the captured
    /// region. Overflow-safe: an `offset + len` that would wrap is treated
    /// as out of bounds, never as a wrapped address.
    pub fn is_captured(&self, offset: usize, len: usize) -> bool {
        match offset.checked_add(len) {
            Some(end) => end <= self.effective_len(),
            None => false,
        }
    }

    pub fn require_captured(&self, offset: usize, len: usize) -> Result<(), Truncated> {
        if self.is_captured(offset, len) {
            Ok(())
        } else {
            Err(Truncated {
                offset,
                needed: len,
                available: self.effective_len().saturating_sub(offset),
            })
        }
    }

    pub fn read_u8(&self, offset: usize) -> Result<u8, Truncated> {
        self.require_captured(offset, 1)?;
        Ok(self.data[offset])
    }

    pub fn read_u16_be(&self, offset: usize) -> Result<u16, Truncated> {
        let bytes = self.read_slice(offset, 2)?;
        Ok(u16::from_be_bytes([bytes[0], bytes[1]]))
    }

    pub fn read_u32_be(&self, offset: usize) -> Result<u32, Truncated> {
        let bytes = self.read_slice(offset, 4)?;
        Ok(u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }

    pub fn read_ipv4(&self, offset: usize) -> Result<Ipv4Addr, Truncated> {
        let bytes = self.read_slice(offset, 4)?;
        let octets: [u8; 4] = [bytes[0], bytes[1], bytes[2], bytes[3]];
        Ok(Ipv4Addr::from(octets))
    }

    pub fn read_ipv6(&self, offset: usize) -> Result<Ipv6Addr, Truncated> {
        let bytes = self.read_slice(offset, 16)?;
        let mut octets = [0u8; 16];
        octets.copy_from_slice(bytes);
        Ok(Ipv6Addr::from(octets))
    }

    pub fn read_slice(&self, offset: usize, len: usize) -> Result<&'a [u8], Truncated> {
        self.require_captured(offset, len)?;
        Ok(&self.data[offset..offset + len])
    }
}
