//! Command-line entry point.

use std::env;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;

use crate::app::current;
use crate::infra::acme::AcmeFs;
use crate::infra::config::Config;
use crate::infra::tool::Invocation;

#[derive(Debug, Parser)]
#[command(
    name = "Guru",
    author,
    version,
    about = "Run oracle on the selection of the current Acme window",
    long_about = "Run oracle on the selection of the current Acme window.\n\n\
        Everything from <MODE> on is passed to the tool unchanged, after \
        -pos and -replaceset flags describing the window's file and dot. \
        Run it from an Acme tag; see the tool's own -help for modes."
)]
pub struct Cli {
    /// Tool mode followed by its arguments, e.g. `describe` or `referrers`
    #[arg(
        value_name = "MODE",
        required = true,
        num_args = 1..,
        trailing_var_arg = true,
        allow_hyphen_values = true
    )]
    pub args: Vec<String>,
}

/// Parse the command line, run the tool, and map the outcome to an exit code.
pub fn run() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let _ = err.print();
            return if err.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    match execute(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err:#}");
            ExitCode::FAILURE
        }
    }
}

fn execute(cli: &Cli) -> Result<()> {
    let config = Config::load()?;
    let acme = AcmeFs::new(config.acme.mount());
    let window_env = config.acme.window_env();
    let winid = env::var(&window_env).ok();

    let snapshot = current::snapshot(&acme, &window_env, winid.as_deref())
        .context("cannot open window")?;
    let (start, end) = snapshot.byte_range();
    tracing::info!(file = snapshot.name(), start, end, "resolved selection");

    Invocation::new(config.tool.program(), snapshot, &cli.args).run()?;
    Ok(())
}
