mod format;
mod progress;

pub use format::format_size;
pub use progress::{ProgressReporter, TransferOutcome, DEFAULT_TICK_INTERVAL};
