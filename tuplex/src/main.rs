mod commands;
mod json;
mod logging;

use anyhow::Context;
use clap::Parser;
use tracing::debug;

use crate::logging::init_logging;

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

#[derive(Debug, Parser)]
#[command(version, about)]
/// tuplex, inspect composite tuple values and their wire encoding.
///
/// Tuples are given as JSON arrays and bound to a tuple type such as
/// `tuple<ascii, int, boolean>`, encoded bytes are read and written as hex.
pub struct Args {
    #[arg(long, env = "TUPLEX_LOG_LEVEL", default_value = "warn")]
    /// Set the log level.
    ///
    /// This can filter on various levels, for example `info,tuplex_codec=trace`
    /// will display all logs at `info` level severity and above, and every
    /// event emitted while encoding or decoding tuples.
    log_level: String,
    #[arg(long, env = "TUPLEX_LOG_JSON")]
    /// Emit logs in JSON format rather than as plain text.
    log_json: bool,
    #[arg(long, env = "TUPLEX_LOG_NO_ANSI")]
    /// Disable ANSI colour codes being present in the logs.
    log_no_ansi: bool,
    #[command(subcommand)]
    command: commands::Commands,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    init_logging(&args).context("Init logging")?;

    debug!("tuplex v{}", env!("CARGO_PKG_VERSION"));
    args.command.display_startup_message();

    let output = args.command.execute()?;
    println!("{output}");

    Ok(())
}
