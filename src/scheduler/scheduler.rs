use std::path::PathBuf;
use std::time::Duration;

use snafu::{ResultExt, Snafu};
use tracing::debug;

use crate::reconciler::{EventSink, ReconcileError, Reconciler};

/// Suspends the scheduler between passes.
pub trait Sleeper {
    async fn sleep(&self, duration: Duration);
}

impl<T: Sleeper + ?Sized> Sleeper for &T {
    async fn sleep(&self, duration: Duration) {
        (**self).sleep(duration).await
    }
}

/// Sleeps on the compio runtime timer.
#[derive(Debug, Clone, Copy, Default)]
pub struct CompioSleeper;

impl Sleeper for CompioSleeper {
    async fn sleep(&self, duration: Duration) {
        compio::time::sleep(duration).await;
    }
}

/// Runs reconciliation passes back to back, sleeping a fixed interval after each one.
///
/// Passes never overlap: the interval starts when a pass returns, so a slow pass
/// simply delays the next one.
pub struct Scheduler<S, Z> {
    reconciler: Reconciler<S>,
    sleeper: Z,
    source: PathBuf,
    replica: PathBuf,
    interval: Duration,
}

impl<S: EventSink, Z: Sleeper> Scheduler<S, Z> {
    pub fn new(
        reconciler: Reconciler<S>,
        sleeper: Z,
        source: PathBuf,
        replica: PathBuf,
        interval: Duration,
    ) -> Self {
        Self {
            reconciler,
            sleeper,
            source,
            replica,
            interval,
        }
    }

    /// Runs passes until `stop` returns true for the number of completed passes.
    ///
    /// Returns the number of completed passes. A failed pass ends the loop at once.
    pub async fn run_until(
        &self,
        mut stop: impl FnMut(u64) -> bool,
    ) -> Result<u64, SchedulerError> {
        let mut completed = 0u64;
        loop {
            let pass = completed + 1;
            let summary = self
                .reconciler
                .reconcile(&self.source, &self.replica)
                .await
                .context(PassSnafu { pass })?;
            completed = pass;
            if summary.is_noop() {
                debug!("Pass {pass} finished: replica already up to date");
            } else {
                debug!("Pass {pass} finished: {summary}");
            }

            if stop(completed) {
                return Ok(completed);
            }
            self.sleeper.sleep(self.interval).await;
        }
    }

    /// Runs passes until one fails.
    pub async fn run_forever(&self) -> Result<(), SchedulerError> {
        self.run_until(|_| false).await.map(|_| ())
    }
}

#[derive(Debug, Snafu)]
pub enum SchedulerError {
    #[snafu(display("Reconciliation pass {pass} failed"))]
    PassError { pass: u64, source: ReconcileError },
}
