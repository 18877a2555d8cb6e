use anyhow::{anyhow, Result};
use env_logger::Env;

use pam::{argsets, command, helpers};

const CMD_RUN_ONCE: &str = "run-once";
const CMD_SERVICE: &str = "service";

const LOG_LEVEL_ENV_VAR: &str = "LOGGING_LEVEL";
const DEFAULT_LOG_LEVEL: &str = "INFO";

fn main() -> Result<()> {
    helpers::load_dotenv();
    env_logger::Builder::from_env(Env::default().filter_or(LOG_LEVEL_ENV_VAR, DEFAULT_LOG_LEVEL))
        .init();

    let mut args = pico_args::Arguments::from_env();
    match args.subcommand()?.as_deref() {
        Some(CMD_RUN_ONCE) => command::run_once(),
        Some(CMD_SERVICE) => command::service(argsets::ServiceArgs {
            interval_minutes: args.opt_value_from_str("--interval-minutes")?,
        }),
        _ => Err(anyhow!(
            "Subcommand must be one of '{CMD_RUN_ONCE}', '{CMD_SERVICE}'"
        )),
    }
}
