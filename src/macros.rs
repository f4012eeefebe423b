//! Call-site macros.
//!
//! Driver code refers to events by their logical name only; the macros
//! resolve through `backend::active`, so the same call site emits
//! `pf_<name>` in a PF build and `vf_<name>` in a VF build. A logical name
//! the active role does not declare fails to compile.

/// Fire a logical trace event against the active device role.
///
/// ```
/// use nic_trace::types::Handle;
///
/// let skb = Handle(0x1000);
/// let ring = Handle(0x2000);
/// nic_trace::nic_trace!(xmit_frame_ring, skb, ring, Some("eth0"));
/// ```
#[macro_export]
macro_rules! nic_trace {
    ($event:ident, $($args:expr),* $(,)?) => {
        $crate::backend::active::$event::emit($($args),*)
    };
}

/// Probe whether a logical event is enabled for the active device role.
///
/// Cheap enough to guard expensive argument computation:
///
/// ```
/// if nic_trace::nic_trace_enabled!(clean_tx_irq) {
///     // gather descriptor state, then nic_trace!(clean_tx_irq, ...)
/// }
/// ```
#[macro_export]
macro_rules! nic_trace_enabled {
    ($event:ident) => {
        $crate::backend::active::$event::enabled()
    };
}
