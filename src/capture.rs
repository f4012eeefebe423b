//! Shared capture routines, one per event template.
//!
//! Callers have already passed the enablement gate; everything here runs
//! only for an enabled event. Each routine copies its arguments into an
//! [`EventRecord`] in schema order and forwards the record to the sink.
//! No allocation, no locking.

use crate::backend::EventDef;
use crate::record::{EventRecord, FieldValue, InlineStr, MaskValue};
use crate::schema::NO_DEV;
use crate::sink;
use crate::types::{Handle, QueueVector};

fn device_name(dev: Option<&str>) -> InlineStr {
    InlineStr::copy_from(dev.unwrap_or(NO_DEV))
}

#[allow(clippy::too_many_arguments)]
pub(crate) fn napi_poll(
    def: &'static EventDef,
    dev: Option<&str>,
    q: &QueueVector<'_>,
    budget: i32,
    budget_per_ring: i32,
    rx_cleaned: u32,
    tx_cleaned: u32,
    rx_clean_complete: bool,
    tx_clean_complete: bool,
) {
    let mut rec = EventRecord::start(def);
    rec.push(FieldValue::Int32(budget));
    rec.push(FieldValue::Int32(budget_per_ring));
    rec.push(FieldValue::UInt32(rx_cleaned));
    rec.push(FieldValue::UInt32(tx_cleaned));
    rec.push(FieldValue::Bool(rx_clean_complete));
    rec.push(FieldValue::Bool(tx_clean_complete));
    rec.push(FieldValue::Int32(q.irq_num));
    rec.push(FieldValue::Str(InlineStr::copy_from(q.name)));
    rec.push(FieldValue::Str(device_name(dev)));
    rec.push(FieldValue::Mask(MaskValue::copy_from(q.affinity)));
    sink::submit(rec);
}

/// Capture body shared by the `tx_ring` and `rx_ring` templates; both carry
/// three handles and a device name, only the schemas differ.
pub(crate) fn ring_descriptors(
    def: &'static EventDef,
    ring: Handle,
    desc: Handle,
    third: Handle,
    dev: Option<&str>,
) {
    let mut rec = EventRecord::start(def);
    rec.push(FieldValue::Handle(ring));
    rec.push(FieldValue::Handle(desc));
    rec.push(FieldValue::Handle(third));
    rec.push(FieldValue::Str(device_name(dev)));
    sink::submit(rec);
}

/// Capture body for the `xmit_frame` template.
pub(crate) fn frame(def: &'static EventDef, skb: Handle, ring: Handle, dev: Option<&str>) {
    let mut rec = EventRecord::start(def);
    rec.push(FieldValue::Handle(skb));
    rec.push(FieldValue::Handle(ring));
    rec.push(FieldValue::Str(device_name(dev)));
    sink::submit(rec);
}
