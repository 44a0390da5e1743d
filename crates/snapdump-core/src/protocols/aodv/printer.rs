use super::layout;
use super::parser::{
    Extension, ExtTruncation, ExtensionScan, RouteError, RouteReply, RouteRequest, Wire,
    parse_rerr, parse_rrep, parse_rreq,
};
use crate::context::{CaptureContext, emit};
use crate::registry::Family;
use crate::snapshot::SnapshotView;

/// AODV printer entry point.
///
/// The tag byte at offset 0 is the sole selector for which fixed layout
/// the remaining bytes are interpreted as, and no layout is chosen before
/// the shortest possible record (the two-byte RREP-ACK) is known to be
/// captured. Truncation is never an error to the caller: each renderer
/// emits its bracketed marker and returns, so one cut packet cannot abort
/// the session.
pub fn print_aodv(ctx: &mut CaptureContext<'_>, view: &SnapshotView<'_>, family: Family) {
    if !view.is_captured(0, layout::RREP_ACK_SIZE) {
        emit!(ctx, " [|aodv]");
        return;
    }
    emit!(ctx, " aodv");

    let Ok(tag) = view.read_u8(0) else {
        emit!(ctx, " [|aodv]");
        return;
    };
    let length = view.declared_len();

    match tag {
        layout::RREQ => match family {
            Family::V4 => rreq(ctx, view, Wire::V4, " rreq", " [|rreq]"),
            Family::V6 => rreq(ctx, view, Wire::V6, " v6 rreq", " [|rreq6]"),
        },
        layout::RREP => match family {
            Family::V4 => rrep(ctx, view, Wire::V4, " [|rrep]"),
            Family::V6 => rrep(ctx, view, Wire::V6, " [|rrep6]"),
        },
        layout::RERR => match family {
            Family::V4 => rerr(ctx, view, Wire::V4),
            Family::V6 => rerr(ctx, view, Wire::V6),
        },
        layout::RREP_ACK => emit!(ctx, " rrep-ack {length}"),
        // The draft-01 tags are unambiguous and bypass the family flag.
        layout::V6_DRAFT_01_RREQ => rreq(ctx, view, Wire::V6Draft, " rreq", " [|rreq6]"),
        layout::V6_DRAFT_01_RREP => rrep(ctx, view, Wire::V6Draft, " [|rrep6]"),
        layout::V6_DRAFT_01_RERR => rerr(ctx, view, Wire::V6Draft),
        layout::V6_DRAFT_01_RREP_ACK => emit!(ctx, " rrep-ack {length}"),
        _ => emit!(ctx, " {tag} {length}"),
    }
}

fn rreq(
    ctx: &mut CaptureContext<'_>,
    view: &SnapshotView<'_>,
    wire: Wire,
    label: &str,
    marker: &str,
) {
    let msg = match parse_rreq(view, wire) {
        Ok(msg) => msg,
        Err(_) => {
            emit!(ctx, "{marker}");
            return;
        }
    };
    render_rreq(ctx, &msg, view.declared_len(), label);
}

fn render_rreq(ctx: &mut CaptureContext<'_>, msg: &RouteRequest, length: usize, label: &str) {
    // Each flag maps to a fixed literal marker; [U] carries the trailing
    // separator, otherwise a lone space precedes "hops".
    let mut flags = String::new();
    if msg.flags & layout::RREQ_JOIN != 0 {
        flags.push_str("[J]");
    }
    if msg.flags & layout::RREQ_REPAIR != 0 {
        flags.push_str("[R]");
    }
    if msg.flags & layout::RREQ_GRAT != 0 {
        flags.push_str("[G]");
    }
    if msg.flags & layout::RREQ_DEST != 0 {
        flags.push_str("[D]");
    }
    flags.push_str(if msg.flags & layout::RREQ_UNKNOWN != 0 {
        "[U] "
    } else {
        " "
    });

    emit!(
        ctx,
        "{label} {length} {flags}hops {hops} id 0x{id:08x}\n\tdst {dst} seq {dst_seq} src {src} seq {src_seq}",
        hops = msg.hops,
        id = msg.id,
        dst = msg.dst,
        dst_seq = msg.dst_seq,
        src = msg.src,
        src_seq = msg.src_seq,
    );
    render_extensions(ctx, &msg.extensions);
}

fn rrep(ctx: &mut CaptureContext<'_>, view: &SnapshotView<'_>, wire: Wire, marker: &str) {
    let msg = match parse_rrep(view, wire) {
        Ok(msg) => msg,
        Err(_) => {
            emit!(ctx, "{marker}");
            return;
        }
    };
    render_rrep(ctx, &msg, view.declared_len());
}

fn render_rrep(ctx: &mut CaptureContext<'_>, msg: &RouteReply, length: usize) {
    let mut flags = String::new();
    if msg.flags & layout::RREP_REPAIR != 0 {
        flags.push_str("[R]");
    }
    flags.push_str(if msg.flags & layout::RREP_ACK_REQUIRED != 0 {
        "[A] "
    } else {
        " "
    });

    emit!(
        ctx,
        " rrep {length} {flags}prefix {prefix} hops {hops}\n\tdst {dst} dseq {dst_seq} src {src} {lifetime} ms",
        prefix = msg.prefix,
        hops = msg.hops,
        dst = msg.dst,
        dst_seq = msg.dst_seq,
        src = msg.src,
        lifetime = msg.lifetime_ms,
    );
    render_extensions(ctx, &msg.extensions);
}

fn rerr(ctx: &mut CaptureContext<'_>, view: &SnapshotView<'_>, wire: Wire) {
    let msg = match parse_rerr(view, wire) {
        Ok(msg) => msg,
        Err(_) => {
            emit!(ctx, " [|rerr]");
            return;
        }
    };
    render_rerr(ctx, &msg, view.declared_len());
}

fn render_rerr(ctx: &mut CaptureContext<'_>, msg: &RouteError, length: usize) {
    let flag = if msg.flags & layout::RERR_NODELETE != 0 {
        "[D]"
    } else {
        ""
    };
    emit!(
        ctx,
        " rerr {flag} [items {count}] [{length}]:",
        count = msg.dest_count,
    );
    for entry in &msg.unreachable {
        emit!(ctx, " {{{addr}}}({seq})", addr = entry.addr, seq = entry.seq);
    }
    // Entries already rendered stay; the shortfall is flagged after them.
    if msg.truncated {
        emit!(ctx, "[|rerr]");
    }
}

fn render_extensions(ctx: &mut CaptureContext<'_>, scan: &ExtensionScan) {
    for record in &scan.records {
        match record {
            Extension::Hello { interval_ms } => {
                emit!(ctx, "\n\text HELLO {interval_ms} ms");
            }
            Extension::Other { kind, length } => {
                emit!(ctx, "\n\text {kind} {length}");
            }
        }
    }
    match scan.truncated {
        Some(ExtTruncation::Header) => emit!(ctx, " [|ext]"),
        Some(ExtTruncation::Hello) => emit!(ctx, " [|hello]"),
        None => {}
    }
}

#[cfg(test)]
mod tests {
    use super::print_aodv;
    use crate::context::{CaptureContext, DisplayOptions};
    use crate::protocols::aodv::layout;
    use crate::registry::Family;
    use crate::sink::StringSink;
    use crate::snapshot::SnapshotView;

    fn print(data: &[u8], declared: usize, family: Family) -> String {
        let mut sink = StringSink::new();
        let mut ctx = CaptureContext::new(&mut sink, DisplayOptions::default());
        print_aodv(&mut ctx, &SnapshotView::new(data, declared), family);
        drop(ctx);
        sink.into_string()
    }

    fn rreq_v4() -> Vec<u8> {
        vec![
            1, 0x80, 0, 3, // type, join flag, reserved, hops
            0, 0, 0, 7, // id
            10, 0, 0, 1, 0, 0, 0, 5, // dst, dst seq
            10, 0, 0, 2, 0, 0, 0, 9, // src, src seq
        ]
    }

    #[test]
    fn rreq_fully_captured() {
        let data = rreq_v4();
        let out = print(&data, data.len(), Family::V4);
        assert_eq!(
            out,
            " aodv rreq 24 [J] hops 3 id 0x00000007\n\tdst 10.0.0.1 seq 5 src 10.0.0.2 seq 9"
        );
        assert!(!out.contains("[|"));
    }

    #[test]
    fn rreq_one_byte_short_renders_only_marker() {
        let data = rreq_v4();
        let out = print(&data[..layout::RREQ_V4_SIZE - 1], data.len(), Family::V4);
        assert_eq!(out, " aodv [|rreq]");
    }

    #[test]
    fn rreq_without_flags_keeps_double_space() {
        let mut data = rreq_v4();
        data[1] = 0;
        let out = print(&data, data.len(), Family::V4);
        assert!(out.contains(" rreq 24  hops 3"));
    }

    #[test]
    fn rreq_unknown_seq_flag_has_trailing_space() {
        let mut data = rreq_v4();
        data[1] = 0x88;
        let out = print(&data, data.len(), Family::V4);
        assert!(out.contains(" rreq 24 [J][U] hops 3"));
    }

    #[test]
    fn rreq_with_hello_extension() {
        let mut data = rreq_v4();
        data.extend_from_slice(&[1, 4, 0, 0, 0x03, 0xe8]);
        let out = print(&data, data.len(), Family::V4);
        assert!(out.ends_with("\n\text HELLO 1000 ms"));
    }

    #[test]
    fn rreq_with_cut_hello_extension() {
        let mut data = rreq_v4();
        data.extend_from_slice(&[1, 4, 0]);
        let out = print(&data, data.len() + 3, Family::V4);
        assert!(out.contains("dst 10.0.0.1"));
        assert!(out.ends_with(" [|hello]"));
    }

    #[test]
    fn rreq_with_unknown_extension() {
        let mut data = rreq_v4();
        data.extend_from_slice(&[9, 2, 0xaa, 0xbb]);
        let out = print(&data, data.len(), Family::V4);
        assert!(out.ends_with("\n\text 9 2"));
    }

    #[test]
    fn rreq_declared_extension_not_captured() {
        let data = rreq_v4();
        // Declared length claims an extension follows; nothing captured.
        let out = print(&data, data.len() + 6, Family::V4);
        assert!(out.ends_with(" [|ext]"));
    }

    #[test]
    fn v6_rreq_uses_v6_label_and_marker() {
        let mut data = vec![1, 0, 0, 1];
        data.extend_from_slice(&[0, 0, 0, 2]);
        data.extend_from_slice(&[0u8; 15]);
        data.push(1); // dst ::1
        data.extend_from_slice(&[0, 0, 0, 3]);
        data.extend_from_slice(&[0u8; 15]);
        data.push(2); // src ::2
        data.extend_from_slice(&[0, 0, 0, 4]);
        assert_eq!(data.len(), layout::RREQ_V6_SIZE);

        let out = print(&data, data.len(), Family::V6);
        assert!(out.contains(" v6 rreq 48"));
        assert!(out.contains("dst ::1 seq 3 src ::2 seq 4"));

        let short = print(&data[..4], data.len(), Family::V6);
        assert_eq!(short, " aodv [|rreq6]");
    }

    #[test]
    fn rrep_fully_captured() {
        let data = vec![
            2, 0x40, 0x1f, 2, // type, ack flag, prefix, hops
            10, 0, 0, 1, 0, 0, 0, 5, // dst, dseq
            10, 0, 0, 2, // src
            0, 0, 0x0b, 0xb8, // lifetime 3000 ms
        ];
        let out = print(&data, data.len(), Family::V4);
        assert_eq!(
            out,
            " aodv rrep 20 [A] prefix 31 hops 2\n\tdst 10.0.0.1 dseq 5 src 10.0.0.2 3000 ms"
        );
    }

    #[test]
    fn rrep_truncated_marker() {
        let data = [2u8, 0, 0, 0];
        assert_eq!(print(&data, 20, Family::V4), " aodv [|rrep]");
        assert_eq!(print(&data, 44, Family::V6), " aodv [|rrep6]");
    }

    #[test]
    fn rerr_partial_entries_then_marker() {
        // Declared count 5, only 2 entries captured.
        let mut data = vec![3, 0, 0, 5];
        for n in 1..=2u8 {
            data.extend_from_slice(&[10, 0, 0, n]);
            data.extend_from_slice(&[0, 0, 0, n]);
        }
        let out = print(&data, data.len(), Family::V4);
        assert_eq!(
            out,
            " aodv rerr  [items 5] [20]: {10.0.0.1}(1) {10.0.0.2}(2)[|rerr]"
        );
    }

    #[test]
    fn rerr_nodelete_flag() {
        let mut data = vec![3, 0x80, 0, 1];
        data.extend_from_slice(&[10, 0, 0, 1, 0, 0, 0, 1]);
        let out = print(&data, data.len(), Family::V4);
        assert_eq!(out, " aodv rerr [D] [items 1] [12]: {10.0.0.1}(1)");
    }

    #[test]
    fn rrep_ack_prints_length() {
        let data = [4u8, 0];
        assert_eq!(print(&data, 2, Family::V4), " aodv rrep-ack 2");
        let draft = [19u8, 0];
        assert_eq!(print(&draft, 2, Family::V6), " aodv rrep-ack 2");
    }

    #[test]
    fn unknown_tag_renders_generic_fallback() {
        let data = [99u8, 0, 0, 0];
        assert_eq!(print(&data, 4, Family::V4), " aodv 99 4");
    }

    #[test]
    fn tag_byte_not_captured_renders_generic_marker() {
        let data = [1u8];
        assert_eq!(print(&data, 24, Family::V4), " [|aodv]");
        assert_eq!(print(&[], 0, Family::V4), " [|aodv]");
    }

    #[test]
    fn boundary_exact_header_has_no_marker() {
        let data = rreq_v4();
        let out = print(&data, layout::RREQ_V4_SIZE, Family::V4);
        assert!(out.contains("hops 3"));
        assert!(!out.contains("[|"));
    }

    #[test]
    fn decoding_is_idempotent() {
        let mut data = rreq_v4();
        data.extend_from_slice(&[1, 4, 0, 0, 0, 50]);
        let first = print(&data, data.len(), Family::V4);
        let second = print(&data, data.len(), Family::V4);
        assert_eq!(first, second);
    }

    #[test]
    fn every_prefix_length_decodes_without_panic() {
        let mut samples: Vec<Vec<u8>> = Vec::new();
        samples.push(rreq_v4());
        let mut rerr = vec![3, 0x80, 0, 4];
        for n in 1..=4u8 {
            rerr.extend_from_slice(&[10, 0, 0, n, 0, 0, 0, n]);
        }
        samples.push(rerr);
        for tag in [2u8, 16, 17, 18, 19, 42] {
            let mut msg = vec![tag, 0xff, 0x1f, 9];
            msg.extend((0..60).map(|n| n as u8));
            samples.push(msg);
        }

        for sample in &samples {
            for cut in 0..=sample.len() {
                for family in [Family::V4, Family::V6] {
                    let out = print(&sample[..cut], sample.len(), family);
                    let again = print(&sample[..cut], sample.len(), family);
                    assert_eq!(out, again);
                }
            }
        }
    }
}
