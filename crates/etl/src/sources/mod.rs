mod snapshot_file;
mod wca;

pub use snapshot_file::{SnapshotFile, write_json};
pub use wca::WcaSource;
