//! Console and log-file output for sync records.

mod format;
mod logging;

pub use format::DashFormat;
pub use logging::{LoggingSetupError, init};
