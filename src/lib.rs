//! # Overview
//!
//! Structured event instrumentation for NIC driver datapaths. Driver code
//! fires logical events; this crate resolves each to the concrete event of
//! the device role the artifact was built for, captures typed fields into a
//! transient record and hands it to an external sink:
//!
//! * `nic_trace!(napi_poll, ...)` resolves to `pf_napi_poll` in a PF build
//!   and to `vf_napi_poll` in a VF build (cargo feature `vf`), with no
//!   runtime branch and a compile error for unknown names
//! * every concrete event carries its own enablement flag, all disabled at
//!   startup; a disabled event costs one relaxed atomic load
//! * capture is allocation- and lock-free: scalars and handles copy by
//!   value, strings copy into bounded inline storage, CPU masks copy
//!   width-clamped words
//! * rendering is lazy — the sink stores records, a consumer formats them
//!   later via [`format::render`] or `Display`
//!
//! # Events
//!
//! | Template | Concrete events (per role) |
//! |---|---|
//! | `napi_poll` | `napi_poll` |
//! | `tx_ring` | `clean_tx_irq`, `clean_tx_irq_unmap` |
//! | `rx_ring` | `clean_rx_irq`, `clean_rx_irq_rx` |
//! | `xmit_frame` | `xmit_frame_ring`, `xmit_frame_ring_drop` |
//!
//! Sibling events of one template share schema, capture routine and print
//! format; enablement stays independent per event.
//!
//! # Wiring
//!
//! At driver probe time: `config::init` with the startup-determined CPU mask
//! width, `sink::install` with the collector, then let the control plane
//! enable events through [`registry`].
#![deny(warnings, clippy::all)]

pub mod backend;
pub(crate) mod capture;
pub mod config;
pub mod error;
pub mod format;
mod macros;
pub mod prelude;
pub mod record;
pub mod registry;
pub mod schema;
pub mod sink;
pub mod tracing;
pub mod types;
