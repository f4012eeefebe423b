//! Process-wide event table for the active device role.
//!
//! Every event starts disabled; an external control plane flips flags
//! through this module by concrete event name (`"pf_napi_poll"`,
//! `"vf_clean_tx_irq"`, ...). Toggles take effect eventually on other
//! cores, which is the visibility the capture path is specified for.

use crate::backend::{self, EventDef};
use crate::error::Error;
use tracing::debug;

/// Events declared for the active device role, in declaration order.
pub fn events() -> &'static [&'static EventDef] {
    backend::active::EVENTS
}

/// Look up an event by its concrete (role-prefixed) name.
///
/// The table has a handful of entries, so a scan beats carrying an index.
pub fn find(name: &str) -> Option<&'static EventDef> {
    events().iter().copied().find(|e| e.name() == name)
}

pub fn set_enabled(name: &str, enabled: bool) -> Result<(), Error> {
    let def = find(name).ok_or_else(|| Error::UnknownEvent(name.to_owned()))?;
    def.set_enabled(enabled);
    debug!(
        "Event {} {}",
        name,
        if enabled { "enabled" } else { "disabled" }
    );
    Ok(())
}

pub fn enable(name: &str) -> Result<(), Error> {
    set_enabled(name, true)
}

pub fn disable(name: &str) -> Result<(), Error> {
    set_enabled(name, false)
}

/// Reset every event of the active role to its startup state.
pub fn disable_all() {
    for def in events() {
        def.set_enabled(false);
    }
}
