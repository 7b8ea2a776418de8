//! The fixed-interval pass loop.

mod scheduler;

pub use scheduler::{CompioSleeper, Scheduler, SchedulerError};
