use snafu::Report;
use snafu::Snafu;
use snafu::prelude::*;
use tracing::{debug, error};

use crate::application::RuntimeConfig;
use crate::logging::LoggingSetupError;
use crate::reconciler::{Reconciler, TracingSink};
use crate::scheduler::{CompioSleeper, Scheduler, SchedulerError};

pub struct Application;

impl Application {
    pub async fn run(app_config: impl Into<RuntimeConfig>) -> Result<(), ApplicationError> {
        let app_config: RuntimeConfig = app_config.into();
        debug!("Runtime config: {:?}", app_config);

        let reconciler = Reconciler::new(TracingSink, app_config.compare);
        let scheduler = Scheduler::new(
            reconciler,
            CompioSleeper,
            app_config.source,
            app_config.replica,
            app_config.interval,
        );

        let result = match app_config.passes {
            Some(limit) => scheduler
                .run_until(|completed| completed >= limit.get())
                .await
                .map(|completed| debug!("Stopping after {completed} passes")),
            None => scheduler.run_forever().await,
        };

        if let Err(err) = &result {
            error!("{}", Report::from_error(err));
        }
        result.context(SyncSnafu)
    }
}

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum ApplicationError {
    #[snafu(display("Critical failure encountered while setting up logging"))]
    LoggingError { source: LoggingSetupError },
    #[snafu(display("Critical failure encountered while mirroring"))]
    SyncError { source: SchedulerError },
}
