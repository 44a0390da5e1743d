//! AODV (Ad hoc On-Demand Distance Vector, RFC 3561) printing.
//!
//! Four message kinds (route request, route reply, route error, reply
//! acknowledgement), each with an IPv4 layout, an IPv6 layout, and the
//! draft-01 IPv6 layout whose tags 16-19 identify it unambiguously.
//! Fixed headers may be followed by extension records; the only payload
//! interpreted is the hello interval.
//!
//! Rendering preserves tcpdump's literal field tokens, including the
//! bracketed truncation markers (`[|rreq]`, `[|rerr]`, `[|hello]`, ...),
//! so output can be diffed against existing consumers. Byte offsets live
//! in `layout`, typed decoding in `parser`, text in `printer`.

pub mod layout;
pub mod parser;
pub mod printer;

pub use printer::print_aodv;
