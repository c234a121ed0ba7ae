pub mod batch;
pub mod error;
pub mod outcome;
pub mod scanner;
pub mod sync;

pub use batch::BatchPlan;
pub use error::SyncError;
pub use outcome::{Outcome, RunSummary};
pub use scanner::{MediaFolder, scan_media_folders};
pub use sync::{Backend, Candidate, SyncEvent, SyncOptions, run_sync};
