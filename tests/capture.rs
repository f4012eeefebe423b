//! End-to-end capture scenarios against an in-memory sink.
//!
//! The sink and the enablement flags are process-wide, so every test takes
//! the serialization guard first and starts from a drained sink with all
//! events disabled. Event names go through `backend::active`, so the same
//! assertions hold for a PF and a VF build.

use nic_trace::backend::active as events;
use nic_trace::config::{self, TraceConfig};
use nic_trace::prelude::*;
use nic_trace::{format, registry, schema, sink};
use pretty_assertions::assert_eq;
use std::sync::{Mutex, MutexGuard, OnceLock};

const MASK_BITS: u16 = 8;

fn test_sink() -> &'static MemorySink {
    static SINK: OnceLock<&'static MemorySink> = OnceLock::new();
    *SINK.get_or_init(|| {
        config::init(&TraceConfig {
            cpu_mask_bits: MASK_BITS,
        })
        .expect("init");
        let s: &'static MemorySink = Box::leak(Box::new(MemorySink::new()));
        sink::install(s).expect("install sink");
        s
    })
}

fn serial() -> MutexGuard<'static, ()> {
    static GUARD: Mutex<()> = Mutex::new(());
    GUARD.lock().unwrap_or_else(|e| e.into_inner())
}

fn fresh() -> (MutexGuard<'static, ()>, &'static MemorySink) {
    let guard = serial();
    let sink = test_sink();
    registry::disable_all();
    sink.drain();
    (guard, sink)
}

fn poll_queue(affinity: &CpuMask) -> QueueVector<'_> {
    QueueVector {
        name: "eth0-TxRx-3",
        irq_num: 41,
        affinity,
    }
}

#[test]
fn enabled_poll_captures_all_fields() {
    let (_guard, sink) = fresh();
    registry::enable(events::napi_poll::DEF.name()).unwrap();

    let affinity = CpuMask::from_cpus([0, 1, 2, 5]);
    nic_trace::nic_trace!(
        napi_poll,
        Some("eth0"),
        &poll_queue(&affinity),
        64,
        32,
        10,
        5,
        true,
        false,
    );

    let records = sink.drain();
    assert_eq!(records.len(), 1);
    let rec = &records[0];

    assert_eq!(rec.event(), events::napi_poll::DEF.name());
    assert!(std::ptr::eq(rec.schema(), &schema::NAPI_POLL));
    assert_eq!(rec.field("budget"), Some(&FieldValue::Int32(64)));
    assert_eq!(rec.field("budget_per_ring"), Some(&FieldValue::Int32(32)));
    assert_eq!(rec.field("rx_cleaned"), Some(&FieldValue::UInt32(10)));
    assert_eq!(rec.field("tx_cleaned"), Some(&FieldValue::UInt32(5)));
    assert_eq!(rec.field("rx_clean_complete"), Some(&FieldValue::Bool(true)));
    assert_eq!(rec.field("tx_clean_complete"), Some(&FieldValue::Bool(false)));
    assert_eq!(rec.field("irq_num"), Some(&FieldValue::Int32(41)));

    match rec.field("dev_name").unwrap() {
        FieldValue::Str(s) => assert_eq!(s.as_str(), "eth0"),
        other => panic!("unexpected dev_name value: {other:?}"),
    }
    // CPU index is stamped from the calling core.
    assert!(rec.cpu() < 4096);
}

#[test]
fn record_layout_follows_schema() {
    let (_guard, sink) = fresh();
    registry::enable(events::napi_poll::DEF.name()).unwrap();

    let affinity = CpuMask::new();
    nic_trace::nic_trace!(
        napi_poll,
        None,
        &poll_queue(&affinity),
        64,
        32,
        0,
        0,
        false,
        false,
    );

    let records = sink.drain();
    let rec = &records[0];
    assert_eq!(rec.fields().len(), rec.schema().fields.len());
    for (value, spec) in rec.fields().iter().zip(rec.schema().fields) {
        assert_eq!(value.kind(), spec.kind, "field {} kind drifted", spec.name);
    }
}

#[test]
fn disabled_poll_produces_nothing() {
    let (_guard, sink) = fresh();

    let affinity = CpuMask::from_cpus([0]);
    nic_trace::nic_trace!(
        napi_poll,
        Some("eth0"),
        &poll_queue(&affinity),
        64,
        32,
        10,
        5,
        true,
        false,
    );

    assert!(sink.is_empty());
    assert!(!nic_trace::nic_trace_enabled!(napi_poll));
}

#[test]
fn absent_device_name_becomes_placeholder() {
    let (_guard, sink) = fresh();
    registry::enable(events::xmit_frame_ring_drop::DEF.name()).unwrap();

    nic_trace::nic_trace!(xmit_frame_ring_drop, Handle(0xa0), Handle(0xb0), None);

    let records = sink.drain();
    match records[0].field("devname").unwrap() {
        FieldValue::Str(s) => assert_eq!(s.as_str(), NO_DEV),
        other => panic!("unexpected devname value: {other:?}"),
    }
}

#[test]
fn interned_string_outlives_callers_buffer() {
    let (_guard, sink) = fresh();
    registry::enable(events::clean_rx_irq::DEF.name()).unwrap();

    let mut dev = String::from("eth1");
    nic_trace::nic_trace!(
        clean_rx_irq,
        Handle(0x1),
        Handle(0x2),
        Handle(0x3),
        Some(&dev),
    );
    // Rewriting (or dropping) the source after the call must not show up in
    // the captured record.
    dev.clear();
    dev.push_str("mutated");

    let records = sink.drain();
    match records[0].field("devname").unwrap() {
        FieldValue::Str(s) => assert_eq!(s.as_str(), "eth1"),
        other => panic!("unexpected devname value: {other:?}"),
    }
}

#[test]
fn mask_capture_reproduces_source_bits() {
    let (_guard, sink) = fresh();
    registry::enable(events::napi_poll::DEF.name()).unwrap();

    // Bit 200 is within storage capacity but beyond the configured width;
    // it must not survive capture.
    let affinity = CpuMask::from_cpus([0, 1, 2, 3, 6, 200]);
    nic_trace::nic_trace!(
        napi_poll,
        Some("eth0"),
        &poll_queue(&affinity),
        64,
        32,
        0,
        0,
        true,
        true,
    );

    let records = sink.drain();
    match records[0].field("irq_affinity").unwrap() {
        FieldValue::Mask(m) => {
            assert_eq!(m.bits(), MASK_BITS);
            assert_eq!(m.iter_set().collect::<Vec<_>>(), vec![0, 1, 2, 3, 6]);
        }
        other => panic!("unexpected irq_affinity value: {other:?}"),
    }
}

#[test]
fn template_siblings_capture_independently() {
    let (_guard, sink) = fresh();
    registry::enable(events::clean_tx_irq::DEF.name()).unwrap();
    registry::enable(events::clean_tx_irq_unmap::DEF.name()).unwrap();

    nic_trace::nic_trace!(
        clean_tx_irq,
        Handle(0x10),
        Handle(0x11),
        Handle(0x12),
        Some("eth0"),
    );
    nic_trace::nic_trace!(
        clean_tx_irq_unmap,
        Handle(0x20),
        Handle(0x21),
        Handle(0x22),
        Some("eth0"),
    );

    let records = sink.drain();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].event(), events::clean_tx_irq::DEF.name());
    assert_eq!(records[1].event(), events::clean_tx_irq_unmap::DEF.name());
    assert!(std::ptr::eq(records[0].schema(), records[1].schema()));
    assert_eq!(
        records[0].field("ring"),
        Some(&FieldValue::Handle(Handle(0x10)))
    );
    assert_eq!(
        records[1].field("ring"),
        Some(&FieldValue::Handle(Handle(0x20)))
    );

    // Disabling one sibling leaves the other live.
    registry::disable(events::clean_tx_irq::DEF.name()).unwrap();
    nic_trace::nic_trace!(
        clean_tx_irq,
        Handle(0x30),
        Handle(0x31),
        Handle(0x32),
        Some("eth0"),
    );
    nic_trace::nic_trace!(
        clean_tx_irq_unmap,
        Handle(0x40),
        Handle(0x41),
        Handle(0x42),
        Some("eth0"),
    );
    let records = sink.drain();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].event(), events::clean_tx_irq_unmap::DEF.name());
}

#[test]
fn timestamps_are_monotonic() {
    let (_guard, sink) = fresh();
    registry::enable(events::xmit_frame_ring::DEF.name()).unwrap();

    nic_trace::nic_trace!(xmit_frame_ring, Handle(0x1), Handle(0x2), Some("eth0"));
    nic_trace::nic_trace!(xmit_frame_ring, Handle(0x3), Handle(0x4), Some("eth0"));

    let records = sink.drain();
    assert!(records[0].timestamp_ns() <= records[1].timestamp_ns());
}

#[test]
fn rendering_matches_print_template() {
    let (_guard, sink) = fresh();
    registry::enable(events::napi_poll::DEF.name()).unwrap();

    let affinity = CpuMask::from_cpus([0, 1, 2, 3, 6]);
    nic_trace::nic_trace!(
        napi_poll,
        Some("eth0"),
        &poll_queue(&affinity),
        64,
        32,
        10,
        5,
        true,
        false,
    );

    let records = sink.drain();
    let rec = &records[0];
    let expected = format!(
        "{}: on dev eth0 q eth0-TxRx-3 irq 41 irq_mask 0-3,6 \
         curr_cpu {} budget 64 bpr 32 rx_cleaned 10 tx_cleaned 5 \
         rx_clean_complete 1 tx_clean_complete 0",
        events::napi_poll::DEF.name(),
        rec.cpu()
    );
    assert_eq!(format::render(rec), expected);
    assert_eq!(rec.to_string(), expected);
}

#[test]
fn ring_event_renders_handles_as_hex() {
    let (_guard, sink) = fresh();
    registry::enable(events::clean_rx_irq_rx::DEF.name()).unwrap();

    nic_trace::nic_trace!(
        clean_rx_irq_rx,
        Handle(0x1000),
        Handle(0x2000),
        Handle(0x3000),
        Some("eth2"),
    );

    let records = sink.drain();
    let expected = format!(
        "{}: netdev: eth2 ring: 0x0000000000001000 \
         desc: 0x0000000000002000 xdp: 0x0000000000003000",
        events::clean_rx_irq_rx::DEF.name()
    );
    assert_eq!(format::render(&records[0]), expected);
}
