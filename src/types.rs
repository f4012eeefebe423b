use derive_more::{Display, From, Into};

/// Storage words backing a [`CpuMask`].
pub const CPU_MASK_WORDS: usize = 4;

/// Fixed upper bound on the bits a mask field can capture.
///
/// The configured runtime width (see [`crate::config::TraceConfig`]) must not
/// exceed this; `config::init` enforces it once at startup so the capture
/// path never has to.
pub const CPU_MASK_CAPACITY: usize = CPU_MASK_WORDS * 64;

/// Captured address of a driver object (ring, descriptor, buffer, frame).
///
/// The pointee is never dereferenced by this crate; the value only serves to
/// correlate records, so it renders as a fixed-width hex address.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug, Display, From, Into)]
#[display(fmt = "{:#018x}", _0)]
#[repr(transparent)]
pub struct Handle(pub u64);

impl Handle {
    pub const NULL: Handle = Handle(0);

    /// Capture the address of a driver object.
    #[inline]
    pub fn of<T>(t: &T) -> Self {
        Handle(t as *const T as u64)
    }

    #[inline]
    pub fn is_null(&self) -> bool {
        self.0 == 0
    }
}

/// Caller-side CPU bit-set, e.g. an interrupt affinity mask.
///
/// Capacity is fixed at [`CPU_MASK_CAPACITY`] bits; the number of bits that
/// actually get captured into a record is the process-wide width from
/// `config::init`.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Default)]
pub struct CpuMask {
    words: [u64; CPU_MASK_WORDS],
}

impl CpuMask {
    pub const fn new() -> Self {
        Self {
            words: [0; CPU_MASK_WORDS],
        }
    }

    /// Build a mask from an iterator of CPU indices.
    pub fn from_cpus<I: IntoIterator<Item = usize>>(cpus: I) -> Self {
        let mut mask = Self::new();
        for cpu in cpus {
            mask.set(cpu);
        }
        mask
    }

    /// Set the bit for `cpu`. Indices at or beyond capacity are ignored.
    pub fn set(&mut self, cpu: usize) {
        debug_assert!(cpu < CPU_MASK_CAPACITY, "cpu index {cpu} out of range");
        if cpu < CPU_MASK_CAPACITY {
            self.words[cpu / 64] |= 1 << (cpu % 64);
        }
    }

    pub fn clear(&mut self, cpu: usize) {
        if cpu < CPU_MASK_CAPACITY {
            self.words[cpu / 64] &= !(1 << (cpu % 64));
        }
    }

    pub fn is_set(&self, cpu: usize) -> bool {
        cpu < CPU_MASK_CAPACITY && (self.words[cpu / 64] >> (cpu % 64)) & 1 == 1
    }

    pub fn is_empty(&self) -> bool {
        self.words.iter().all(|w| *w == 0)
    }

    pub(crate) fn words(&self) -> &[u64; CPU_MASK_WORDS] {
        &self.words
    }
}

/// Borrowed view of the driver queue vector firing a poll event.
///
/// The polling loop owns the real structure; this view carries only the
/// parts the instrumentation captures.
#[derive(Copy, Clone, Debug)]
pub struct QueueVector<'a> {
    /// Queue vector name, e.g. `"eth0-TxRx-3"`.
    pub name: &'a str,
    /// Interrupt line assigned to the vector.
    pub irq_num: i32,
    /// Interrupt affinity of the vector.
    pub affinity: &'a CpuMask,
}
