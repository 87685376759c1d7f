pub mod error;
pub mod pipeline;
pub mod scheduler;
pub mod sources;
pub mod traits;

pub use error::{EtlError, Result};
pub use pipeline::{Pipeline, RunSummary};
pub use scheduler::DailySchedule;
pub use traits::{GenerationSink, SnapshotSource};
