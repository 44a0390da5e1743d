use std::net::IpAddr;

use etherparse::{LaxNetSlice, LaxSlicedPacket, TransportSlice};
use pcap_parser::Linktype;
use thiserror::Error;

use crate::registry::Family;

/// UDP datagram peeled out of one captured frame.
///
/// `payload` holds the captured payload bytes; `declared_len` is what the
/// UDP header claims the payload length is. The two differ when the
/// snapshot boundary cut the datagram, and that difference is exactly
/// what seeds a truncated [`SnapshotView`](crate::SnapshotView).
pub struct UdpDatagram<'a> {
    pub src: IpAddr,
    pub src_port: u16,
    pub dst: IpAddr,
    pub dst_port: u16,
    pub family: Family,
    pub declared_len: usize,
    pub payload: &'a [u8],
}

#[derive(Debug, Error)]
pub enum UdpError {
    #[error("slice error: {0}")]
    Slice(String),
}

const UDP_HEADER_LEN: usize = 8;

/// Peel link, IP and UDP layers from a captured frame.
///
/// Slicing is lax on purpose: length fields claiming more than was
/// captured must still demultiplex, because rendering truncated packets
/// is the whole point. Returns `Ok(None)` for non-UDP traffic and for
/// linktypes this demultiplexer does not speak.
pub fn parse_udp_datagram(
    linktype: Linktype,
    data: &[u8],
) -> Result<Option<UdpDatagram<'_>>, UdpError> {
    let sliced = match linktype {
        Linktype::ETHERNET => {
            LaxSlicedPacket::from_ethernet(data).map_err(|e| UdpError::Slice(e.to_string()))?
        }
        Linktype::RAW => {
            LaxSlicedPacket::from_ip(data).map_err(|e| UdpError::Slice(e.to_string()))?
        }
        _ => return Ok(None),
    };

    let net = match sliced.net {
        Some(net) => net,
        None => return Ok(None),
    };
    let udp = match sliced.transport {
        Some(TransportSlice::Udp(udp)) => udp,
        _ => return Ok(None),
    };

    let (src, dst, family) = match &net {
        LaxNetSlice::Ipv4(ipv4) => (
            IpAddr::V4(ipv4.header().source_addr()),
            IpAddr::V4(ipv4.header().destination_addr()),
            Family::V4,
        ),
        LaxNetSlice::Ipv6(ipv6) => (
            IpAddr::V6(ipv6.header().source_addr()),
            IpAddr::V6(ipv6.header().destination_addr()),
            Family::V6,
        ),
        _ => return Ok(None),
    };

    let payload = udp.payload();
    let header_claim = udp.length() as usize;
    // A length field below the header size is bogus; fall back to what
    // was captured rather than underflowing.
    let declared_len = if header_claim >= UDP_HEADER_LEN {
        header_claim - UDP_HEADER_LEN
    } else {
        payload.len()
    };

    Ok(Some(UdpDatagram {
        src,
        src_port: udp.source_port(),
        dst,
        dst_port: udp.destination_port(),
        family,
        declared_len,
        payload,
    }))
}
