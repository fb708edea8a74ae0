mod snapshot;

pub use snapshot::{GameInfo, Snapshot};
