pub use crate::backend::EventDef;
pub use crate::config::TraceConfig;
pub use crate::record::{EventRecord, FieldValue, InlineStr, MaskValue};
pub use crate::schema::{EventSchema, FieldKind, FieldSpec, NO_DEV};
pub use crate::sink::{EventSink, MemorySink};
pub use crate::types::{CpuMask, Handle, QueueVector};
pub use crate::{nic_trace, nic_trace_enabled};
