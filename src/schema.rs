//! Static event schemas.
//!
//! One schema per event template. Field order is stable once defined:
//! external tooling keys off it, and the leading fields mirror the order of
//! the call-site arguments. Derived fields (irq number, queue name, device
//! name, affinity mask) follow the proto arguments.

use derive_more::Display;

/// Placeholder captured when the device-name source is absent.
pub const NO_DEV: &str = "(no_device)";

#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug, Display)]
pub enum FieldKind {
    #[display(fmt = "i32")]
    Int32,
    #[display(fmt = "u32")]
    UInt32,
    #[display(fmt = "bool")]
    Bool,
    #[display(fmt = "handle")]
    Handle,
    #[display(fmt = "str")]
    Str,
    #[display(fmt = "mask")]
    Mask,
}

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct FieldSpec {
    pub name: &'static str,
    pub kind: FieldKind,
}

/// Compile-time description of an event template: name, ordered fields and
/// the print template the formatter substitutes into.
///
/// Sibling events instantiated from one template share a single schema;
/// identity (and the enablement flag) lives on the concrete
/// [`EventDef`](crate::backend::EventDef) instead.
#[derive(Debug)]
pub struct EventSchema {
    pub name: &'static str,
    pub fields: &'static [FieldSpec],
    pub format: &'static str,
}

impl EventSchema {
    /// Position and spec of a field, looked up by name.
    pub fn field(&self, name: &str) -> Option<(usize, &FieldSpec)> {
        self.fields.iter().enumerate().find(|(_, f)| f.name == name)
    }
}

const fn field(name: &'static str, kind: FieldKind) -> FieldSpec {
    FieldSpec { name, kind }
}

/// Queue poll completion. Standalone event, not shared by a template.
pub static NAPI_POLL: EventSchema = EventSchema {
    name: "napi_poll",
    fields: &[
        field("budget", FieldKind::Int32),
        field("budget_per_ring", FieldKind::Int32),
        field("rx_cleaned", FieldKind::UInt32),
        field("tx_cleaned", FieldKind::UInt32),
        field("rx_clean_complete", FieldKind::Bool),
        field("tx_clean_complete", FieldKind::Bool),
        field("irq_num", FieldKind::Int32),
        field("qname", FieldKind::Str),
        field("dev_name", FieldKind::Str),
        field("irq_affinity", FieldKind::Mask),
    ],
    format: "on dev {dev_name} q {qname} irq {irq_num} irq_mask {irq_affinity} \
             curr_cpu {cpu} budget {budget} bpr {budget_per_ring} \
             rx_cleaned {rx_cleaned} tx_cleaned {tx_cleaned} \
             rx_clean_complete {rx_clean_complete} tx_clean_complete {tx_clean_complete}",
};

/// Transmit ring cleanup template, shared by `clean_tx_irq` and
/// `clean_tx_irq_unmap`.
pub static TX_RING: EventSchema = EventSchema {
    name: "tx_ring",
    fields: &[
        field("ring", FieldKind::Handle),
        field("desc", FieldKind::Handle),
        field("buf", FieldKind::Handle),
        field("devname", FieldKind::Str),
    ],
    format: "netdev: {devname} ring: {ring} desc: {desc} buf: {buf}",
};

/// Receive ring cleanup template, shared by `clean_rx_irq` and
/// `clean_rx_irq_rx`.
pub static RX_RING: EventSchema = EventSchema {
    name: "rx_ring",
    fields: &[
        field("ring", FieldKind::Handle),
        field("desc", FieldKind::Handle),
        field("xdp", FieldKind::Handle),
        field("devname", FieldKind::Str),
    ],
    format: "netdev: {devname} ring: {ring} desc: {desc} xdp: {xdp}",
};

/// Frame transmit template, shared by `xmit_frame_ring` and
/// `xmit_frame_ring_drop`.
pub static XMIT_FRAME: EventSchema = EventSchema {
    name: "xmit_frame",
    fields: &[
        field("skb", FieldKind::Handle),
        field("ring", FieldKind::Handle),
        field("devname", FieldKind::Str),
    ],
    format: "netdev: {devname} skb: {skb} ring: {ring}",
};
