use std::time::Duration;

use anyhow::Result;

use crate::argsets::ServiceArgs;
use crate::config::Config;
use crate::constants::defaults;
use crate::helpers::shutdown;
use crate::pipeline;
use crate::runner::{Runner, Termination};

/// Run the collection cycle immediately and then on a fixed-period timer
/// until a shutdown signal is received. A failed cycle is logged and the
/// next tick is awaited.
pub fn service(args: ServiceArgs) -> Result<()> {
    let config = Config::from_env()?;
    shutdown::install_handlers()?;

    let interval = args
        .interval_minutes
        .map(|minutes| Duration::from_secs(minutes * 60))
        .unwrap_or(defaults::READ_INTERVAL);
    log::info!(
        "Starting data collection service (interval: {}s)",
        interval.as_secs()
    );

    let termination = Runner::scheduled(interval).run(shutdown::flag(), || {
        pipeline::run_cycle(&config).map(|_| ())
    })?;
    if termination == Termination::ShutdownRequested {
        log::info!("Service terminated on shutdown signal");
    }
    Ok(())
}
