//! Transient event records.
//!
//! A record is built on the capturing call's stack, fully inline: scalar
//! copies, one bounded string copy per string field and a width-clamped
//! word copy per mask field. Nothing here allocates or locks, so building a
//! record is safe from interrupt-like execution contexts.

use crate::backend::EventDef;
use crate::config;
use crate::schema::{EventSchema, FieldKind};
use crate::types::{CpuMask, Handle, CPU_MASK_WORDS};
use std::fmt;
use std::sync::OnceLock;
use std::time::Instant;

/// Upper bound on fields per schema, checked when a record is built.
pub const MAX_FIELDS: usize = 12;

/// Inline capacity for captured string fields.
///
/// Sized for `IFNAMSIZ`-style device names plus `"-TxRx-NN"` queue-name
/// suffixes; longer sources are truncated at a UTF-8 boundary.
pub const STR_CAPACITY: usize = 48;

/// String contents copied into a record at capture time.
///
/// Owns its bytes inline, so the record stays valid when the caller's source
/// buffer is freed or rewritten right after the call returns.
#[derive(Copy, Clone, Eq, PartialEq)]
pub struct InlineStr {
    buf: [u8; STR_CAPACITY],
    len: u8,
}

impl InlineStr {
    /// Copy `s` into inline storage, truncating at a char boundary if it
    /// exceeds [`STR_CAPACITY`].
    pub fn copy_from(s: &str) -> Self {
        let mut end = s.len().min(STR_CAPACITY);
        while !s.is_char_boundary(end) {
            end -= 1;
        }
        let mut buf = [0u8; STR_CAPACITY];
        buf[..end].copy_from_slice(&s.as_bytes()[..end]);
        Self {
            buf,
            len: end as u8,
        }
    }

    pub fn as_str(&self) -> &str {
        std::str::from_utf8(&self.buf[..usize::from(self.len)]).unwrap_or("")
    }
}

impl fmt::Debug for InlineStr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("InlineStr").field(&self.as_str()).finish()
    }
}

impl fmt::Display for InlineStr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Bit-for-bit copy of a caller's [`CpuMask`], clamped to the configured
/// process-wide width and zero-padded above it.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct MaskValue {
    words: [u64; CPU_MASK_WORDS],
    bits: u16,
}

impl MaskValue {
    /// Capture `mask`, keeping only the configured number of bits.
    ///
    /// `config::init` guarantees the width never exceeds the storage
    /// capacity, so no truncation of in-range bits can occur here.
    pub fn copy_from(mask: &CpuMask) -> Self {
        let bits = config::cpu_mask_bits();
        let mut words = *mask.words();
        for (i, word) in words.iter_mut().enumerate() {
            let lo = i as u16 * 64;
            if bits <= lo {
                *word = 0;
            } else if bits < lo + 64 {
                *word &= (1u64 << (bits - lo)) - 1;
            }
        }
        Self { words, bits }
    }

    /// Captured width in bits.
    pub fn bits(&self) -> u16 {
        self.bits
    }

    pub fn is_set(&self, cpu: usize) -> bool {
        cpu < usize::from(self.bits) && (self.words[cpu / 64] >> (cpu % 64)) & 1 == 1
    }

    /// Indices of the set bits, ascending.
    pub fn iter_set(&self) -> impl Iterator<Item = usize> + '_ {
        (0..usize::from(self.bits)).filter(|cpu| self.is_set(*cpu))
    }
}

#[derive(Copy, Clone, PartialEq, Debug)]
pub enum FieldValue {
    Int32(i32),
    UInt32(u32),
    Bool(bool),
    Handle(Handle),
    Str(InlineStr),
    Mask(MaskValue),
}

impl FieldValue {
    pub fn kind(&self) -> FieldKind {
        match self {
            FieldValue::Int32(_) => FieldKind::Int32,
            FieldValue::UInt32(_) => FieldKind::UInt32,
            FieldValue::Bool(_) => FieldKind::Bool,
            FieldValue::Handle(_) => FieldKind::Handle,
            FieldValue::Str(_) => FieldKind::Str,
            FieldValue::Mask(_) => FieldKind::Mask,
        }
    }
}

/// One fired occurrence of an event.
///
/// Exclusively owned by the capturing call until handed to the sink; never
/// mutated afterwards.
#[derive(Copy, Clone, Debug)]
pub struct EventRecord {
    event: &'static str,
    schema: &'static EventSchema,
    timestamp_ns: u64,
    cpu: u32,
    len: u8,
    fields: [FieldValue; MAX_FIELDS],
}

impl EventRecord {
    /// Start a record for `def`, stamping the monotonic timestamp and the
    /// calling CPU.
    pub(crate) fn start(def: &'static EventDef) -> Self {
        Self {
            event: def.name(),
            schema: def.schema(),
            timestamp_ns: monotonic_ns(),
            cpu: current_cpu(),
            len: 0,
            fields: [FieldValue::Bool(false); MAX_FIELDS],
        }
    }

    /// Append the next field. Order and kind must follow the schema; a
    /// mismatch is a capture-routine defect.
    pub(crate) fn push(&mut self, value: FieldValue) {
        let idx = usize::from(self.len);
        debug_assert!(idx < self.schema.fields.len(), "too many fields pushed");
        if let Some(spec) = self.schema.fields.get(idx) {
            debug_assert_eq!(
                spec.kind,
                value.kind(),
                "field {idx} kind mismatch for {}",
                self.event
            );
        }
        if idx < MAX_FIELDS {
            self.fields[idx] = value;
            self.len += 1;
        }
    }

    /// Concrete event name, including the device-role prefix.
    pub fn event(&self) -> &'static str {
        self.event
    }

    pub fn schema(&self) -> &'static EventSchema {
        self.schema
    }

    pub fn timestamp_ns(&self) -> u64 {
        self.timestamp_ns
    }

    /// CPU index the event was captured on.
    pub fn cpu(&self) -> u32 {
        self.cpu
    }

    /// Captured fields in schema order.
    pub fn fields(&self) -> &[FieldValue] {
        &self.fields[..usize::from(self.len)]
    }

    /// Captured value of a field, looked up by schema name.
    pub fn field(&self, name: &str) -> Option<&FieldValue> {
        let (idx, _) = self.schema.field(name)?;
        self.fields().get(idx)
    }
}

/// Nanoseconds since the first capture (or since `config::init`, which pins
/// the epoch eagerly).
pub(crate) fn monotonic_ns() -> u64 {
    static EPOCH: OnceLock<Instant> = OnceLock::new();
    let epoch = *EPOCH.get_or_init(Instant::now);
    Instant::now().duration_since(epoch).as_nanos() as u64
}

#[cfg(target_os = "linux")]
pub(crate) fn current_cpu() -> u32 {
    // Raw syscall wrapper; -1 only when the kernel predates getcpu.
    let cpu = unsafe { libc::sched_getcpu() };
    cpu.max(0) as u32
}

#[cfg(not(target_os = "linux"))]
pub(crate) fn current_cpu() -> u32 {
    0
}
