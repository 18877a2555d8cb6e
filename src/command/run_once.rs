use anyhow::Result;

use crate::config::Config;
use crate::helpers::shutdown;
use crate::pipeline;
use crate::runner::Runner;

/// Perform exactly one collection cycle and exit; repetition is left to
/// an external scheduler. Any stage failure terminates the process with
/// a non-zero exit status.
pub fn run_once() -> Result<()> {
    let config = Config::from_env()?;
    log::info!("Starting one-shot data collection run");

    Runner::one_shot().run(shutdown::flag(), || {
        pipeline::run_cycle(&config).map(|_| ())
    })?;

    log::info!("One-shot run completed; exiting");
    Ok(())
}
