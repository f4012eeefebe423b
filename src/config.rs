//! Startup configuration.
//!
//! The embedding control plane decides the values (typically from its own
//! config file, hence the serde derives) and calls [`init`] once during
//! probe, before any event is enabled. This crate owns no file I/O.

use crate::error::Error;
use crate::record;
use crate::types::CPU_MASK_CAPACITY;
use serde::Deserialize;
use std::sync::OnceLock;
use tracing::info;

pub const DEFAULT_CPU_MASK_BITS: u16 = 64;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct TraceConfig {
    /// Width of captured CPU affinity masks in bits, normally the number of
    /// possible CPUs. Fixed for the process lifetime.
    pub cpu_mask_bits: u16,
}

impl Default for TraceConfig {
    fn default() -> Self {
        Self {
            cpu_mask_bits: DEFAULT_CPU_MASK_BITS,
        }
    }
}

static CPU_MASK_BITS: OnceLock<u16> = OnceLock::new();

/// Apply the startup configuration. Call once, at driver probe time.
///
/// Rejects a mask width beyond the fixed capture capacity here so the
/// capture path never needs a truncation check. Also pins the monotonic
/// timestamp epoch.
pub fn init(config: &TraceConfig) -> Result<(), Error> {
    if usize::from(config.cpu_mask_bits) > CPU_MASK_CAPACITY {
        return Err(Error::MaskWidthExceedsCapacity {
            requested: config.cpu_mask_bits,
            capacity: CPU_MASK_CAPACITY,
        });
    }
    CPU_MASK_BITS
        .set(config.cpu_mask_bits)
        .map_err(|_| Error::AlreadyInitialized)?;
    let _ = record::monotonic_ns();
    info!(
        "Trace capture initialized, cpu-mask-bits {}",
        config.cpu_mask_bits
    );
    Ok(())
}

/// Configured mask width, or the default when [`init`] was never called.
pub(crate) fn cpu_mask_bits() -> u16 {
    CPU_MASK_BITS
        .get()
        .copied()
        .unwrap_or(DEFAULT_CPU_MASK_BITS)
}
