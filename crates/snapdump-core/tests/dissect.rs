use etherparse::PacketBuilder;
use pcap_parser::Linktype;
use snapdump_core::{
    CaptureContext, DisplayOptions, Family, PacketEvent, PacketSource, SnapshotView, SourceError,
    StringSink, dissect_source,
};

struct VecSource(std::vec::IntoIter<PacketEvent>);

impl PacketSource for VecSource {
    fn next_packet(&mut self) -> Result<Option<PacketEvent>, SourceError> {
        Ok(self.0.next())
    }
}

fn udp_event(payload: &[u8], snaplen: Option<usize>) -> PacketEvent {
    let builder = PacketBuilder::ethernet2([1, 2, 3, 4, 5, 6], [7, 8, 9, 10, 11, 12])
        .ipv4([192, 168, 1, 10], [192, 168, 1, 20], 64)
        .udp(654, 654);
    let mut data = Vec::with_capacity(builder.size(payload.len()));
    builder.write(&mut data, payload).unwrap();
    let origlen = data.len() as u32;
    if let Some(snaplen) = snaplen {
        data.truncate(snaplen);
    }
    PacketEvent {
        ts: Some(1.5),
        linktype: Linktype::ETHERNET,
        data,
        origlen,
    }
}

fn rreq() -> Vec<u8> {
    vec![
        1, 0x80, 0, 3, 0, 0, 0, 7, 10, 0, 0, 1, 0, 0, 0, 5, 10, 0, 0, 2, 0, 0, 0, 9,
    ]
}

#[test]
fn full_rreq_end_to_end() {
    let source = VecSource(vec![udp_event(&rreq(), None)].into_iter());
    let mut sink = StringSink::new();
    let summary = dissect_source(source, &mut sink, DisplayOptions::default()).unwrap();
    assert_eq!(summary.packets_printed, 1);

    let out = sink.as_str();
    assert!(out.starts_with("1.500000 192.168.1.10.aodv > 192.168.1.20.aodv:"));
    assert!(out.contains(" aodv rreq 24 [J] hops 3 id 0x00000007"));
    assert!(out.contains("\n\tdst 10.0.0.1 seq 5 src 10.0.0.2 seq 9"));
    assert!(!out.contains("[|"));
}

#[test]
fn hello_extension_end_to_end() {
    let mut payload = rreq();
    payload.extend_from_slice(&[1, 4, 0, 0, 0x03, 0xe8]);
    let source = VecSource(vec![udp_event(&payload, None)].into_iter());
    let mut sink = StringSink::new();
    dissect_source(source, &mut sink, DisplayOptions::default()).unwrap();
    assert!(sink.as_str().contains("\n\text HELLO 1000 ms"));
}

#[test]
fn snaplen_truncation_yields_marker_not_failure() {
    // Cut inside the AODV header: eth 14 + ip 20 + udp 8 + 10 payload bytes.
    let source = VecSource(vec![udp_event(&rreq(), Some(52))].into_iter());
    let mut sink = StringSink::new();
    let summary = dissect_source(source, &mut sink, DisplayOptions::default()).unwrap();
    assert_eq!(summary.packets_printed, 1);
    assert!(sink.as_str().contains(" aodv [|rreq]"));
    assert!(!sink.as_str().contains("hops"));
}

#[test]
fn rerr_entries_match_capture_formula() {
    // Declared count 5; snaplen leaves room for exactly 2 entries.
    let mut payload = vec![3u8, 0, 0, 5];
    for n in 1..=5u8 {
        payload.extend_from_slice(&[10, 0, 0, n, 0, 0, 0, n]);
    }
    let headers = 14 + 20 + 8;
    let source =
        VecSource(vec![udp_event(&payload, Some(headers + 4 + 2 * 8))].into_iter());
    let mut sink = StringSink::new();
    dissect_source(source, &mut sink, DisplayOptions::default()).unwrap();

    let out = sink.as_str();
    assert!(out.contains("[items 5] [44]:"));
    assert!(out.contains("{10.0.0.1}(1) {10.0.0.2}(2)[|rerr]"));
    assert!(!out.contains("10.0.0.3"));
}

#[test]
fn session_survives_arbitrary_truncation_points() {
    let mut payload = rreq();
    payload.extend_from_slice(&[1, 4, 0, 0, 0, 50]);
    let full_len = 14 + 20 + 8 + payload.len();

    let events: Vec<PacketEvent> = (0..=full_len)
        .map(|snaplen| udp_event(&payload, Some(snaplen)))
        .collect();
    let count = events.len() as u64;
    let source = VecSource(events.into_iter());
    let mut sink = StringSink::new();
    let summary = dissect_source(source, &mut sink, DisplayOptions::default()).unwrap();
    // Every event is consumed; frames cut above the UDP header print.
    assert_eq!(summary.packets_total, count);
    assert!(summary.packets_printed > 0);
}

#[test]
fn direct_printer_output_is_idempotent_for_any_cut() {
    let mut payload = rreq();
    payload.extend_from_slice(&[1, 4, 0, 0, 0, 50]);

    for cut in 0..=payload.len() {
        let mut outputs = Vec::new();
        for _ in 0..2 {
            let mut sink = StringSink::new();
            let mut ctx = CaptureContext::new(&mut sink, DisplayOptions::default());
            let view = SnapshotView::new(&payload[..cut], payload.len());
            snapdump_core::protocols::aodv::print_aodv(&mut ctx, &view, Family::V4);
            drop(ctx);
            outputs.push(sink.into_string());
        }
        assert_eq!(outputs[0], outputs[1], "cut at {cut}");
    }
}
