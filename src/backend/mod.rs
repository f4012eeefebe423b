//! Concrete event backends for the two device roles.
//!
//! Every logical event exists twice, once per role, as a generated module
//! holding its [`EventDef`] plus `emit` and `enabled` entry points:
//!
//! * `backend::pf::napi_poll` — physical-function build (`pf_napi_poll`)
//! * `backend::vf::napi_poll` — virtual-function build (`vf_napi_poll`)
//!
//! `backend::active` re-exports exactly one of the two role modules, picked
//! by the `vf` cargo feature, and the [`nic_trace!`](crate::nic_trace)
//! call-site macro resolves through it. Referring to an event the active
//! role does not declare is a compile error, never a silent no-op.
//!
//! Sibling events of one template share their schema and capture routine;
//! only the `EventDef` (name + enablement flag) is per-event.

use crate::schema::EventSchema;
use std::sync::atomic::{AtomicBool, Ordering};

/// Identity of one concrete event: role-prefixed name, template schema and
/// the event's own enablement flag.
pub struct EventDef {
    name: &'static str,
    schema: &'static EventSchema,
    enabled: AtomicBool,
}

impl EventDef {
    pub const fn new(name: &'static str, schema: &'static EventSchema) -> Self {
        Self {
            name,
            schema,
            enabled: AtomicBool::new(false),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn schema(&self) -> &'static EventSchema {
        self.schema
    }

    /// Single relaxed flag read. Toggles from other cores become visible
    /// eventually, which is all the contract asks for.
    #[inline]
    pub fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::Relaxed)
    }

    pub fn set_enabled(&self, enabled: bool) {
        self.enabled.store(enabled, Ordering::Relaxed);
    }
}

/// Transmit ring cleanup event, instantiated from the `tx_ring` template.
macro_rules! tx_ring_event {
    ($role:ident, $name:ident) => {
        pub mod $name {
            use crate::backend::EventDef;
            use crate::types::Handle;

            pub static DEF: EventDef = EventDef::new(
                concat!(stringify!($role), "_", stringify!($name)),
                &crate::schema::TX_RING,
            );

            #[inline]
            pub fn enabled() -> bool {
                DEF.is_enabled()
            }

            #[inline]
            pub fn emit(ring: Handle, desc: Handle, buf: Handle, dev: Option<&str>) {
                if !DEF.is_enabled() {
                    return;
                }
                crate::capture::ring_descriptors(&DEF, ring, desc, buf, dev);
            }
        }
    };
}

/// Receive ring cleanup event, instantiated from the `rx_ring` template.
macro_rules! rx_ring_event {
    ($role:ident, $name:ident) => {
        pub mod $name {
            use crate::backend::EventDef;
            use crate::types::Handle;

            pub static DEF: EventDef = EventDef::new(
                concat!(stringify!($role), "_", stringify!($name)),
                &crate::schema::RX_RING,
            );

            #[inline]
            pub fn enabled() -> bool {
                DEF.is_enabled()
            }

            #[inline]
            pub fn emit(ring: Handle, desc: Handle, xdp: Handle, dev: Option<&str>) {
                if !DEF.is_enabled() {
                    return;
                }
                crate::capture::ring_descriptors(&DEF, ring, desc, xdp, dev);
            }
        }
    };
}

/// Frame transmit event, instantiated from the `xmit_frame` template.
macro_rules! xmit_frame_event {
    ($role:ident, $name:ident) => {
        pub mod $name {
            use crate::backend::EventDef;
            use crate::types::Handle;

            pub static DEF: EventDef = EventDef::new(
                concat!(stringify!($role), "_", stringify!($name)),
                &crate::schema::XMIT_FRAME,
            );

            #[inline]
            pub fn enabled() -> bool {
                DEF.is_enabled()
            }

            #[inline]
            pub fn emit(skb: Handle, ring: Handle, dev: Option<&str>) {
                if !DEF.is_enabled() {
                    return;
                }
                crate::capture::frame(&DEF, skb, ring, dev);
            }
        }
    };
}

/// Events common to both device roles.
macro_rules! role_events {
    ($role:ident) => {
        /// Queue poll completion.
        pub mod napi_poll {
            use crate::backend::EventDef;
            use crate::types::QueueVector;

            pub static DEF: EventDef = EventDef::new(
                concat!(stringify!($role), "_napi_poll"),
                &crate::schema::NAPI_POLL,
            );

            #[inline]
            pub fn enabled() -> bool {
                DEF.is_enabled()
            }

            #[inline]
            #[allow(clippy::too_many_arguments)]
            pub fn emit(
                dev: Option<&str>,
                q: &QueueVector<'_>,
                budget: i32,
                budget_per_ring: i32,
                rx_cleaned: u32,
                tx_cleaned: u32,
                rx_clean_complete: bool,
                tx_clean_complete: bool,
            ) {
                if !DEF.is_enabled() {
                    return;
                }
                crate::capture::napi_poll(
                    &DEF,
                    dev,
                    q,
                    budget,
                    budget_per_ring,
                    rx_cleaned,
                    tx_cleaned,
                    rx_clean_complete,
                    tx_clean_complete,
                );
            }
        }

        tx_ring_event!($role, clean_tx_irq);
        tx_ring_event!($role, clean_tx_irq_unmap);
        rx_ring_event!($role, clean_rx_irq);
        rx_ring_event!($role, clean_rx_irq_rx);
        xmit_frame_event!($role, xmit_frame_ring);
        xmit_frame_event!($role, xmit_frame_ring_drop);

        /// Concrete events declared for this device role.
        pub static EVENTS: &[&crate::backend::EventDef] = &[
            &napi_poll::DEF,
            &clean_tx_irq::DEF,
            &clean_tx_irq_unmap::DEF,
            &clean_rx_irq::DEF,
            &clean_rx_irq_rx::DEF,
            &xmit_frame_ring::DEF,
            &xmit_frame_ring_drop::DEF,
        ];
    };
}

/// Physical-function device role.
pub mod pf {
    role_events!(pf);

    // Events unique to the PF are declared here, outside the shared set.
}

/// Virtual-function device role.
pub mod vf {
    role_events!(vf);
}

#[cfg(not(feature = "vf"))]
pub use pf as active;
#[cfg(feature = "vf")]
pub use vf as active;
