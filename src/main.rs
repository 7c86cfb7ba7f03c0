mod args;
mod compiler;
mod config;
mod definitions;
mod header;
mod resolver;
mod targets;

use anyhow::Context;
use args::{Invocation, USAGE};
use config::Config;
use resolver::MacroResolver;
use std::io::{self, IsTerminal, Write};
use std::process::ExitCode;
use targets::TARGET_MACROS;
use tracing::info;
use tracing_subscriber::EnvFilter;

const LOG_ENV: &str = "GEN_ELF_COMPAT_LOG";

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            // One line per failure; build logs never get a backtrace.
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> anyhow::Result<()> {
    match Invocation::parse().context("failed to parse arguments")? {
        Invocation::Help => {
            print!("{USAGE}");
            Ok(())
        }
        Invocation::Version => {
            println!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        Invocation::Generate(arguments) => generate(arguments.try_into_config()?),
    }
}

fn generate(config: Config) -> anyhow::Result<()> {
    init_tracing(&config);

    let resolver = MacroResolver::new(config.compiler);
    let header = resolver
        .resolve(TARGET_MACROS)
        .context("failed to generate compatibility header")?;
    info!(count = header.len(), "resolved all target macros");

    // Only a complete header ever reaches stdout.
    let mut stdout = io::stdout().lock();
    write!(stdout, "{header}").context("write() failed")?;
    stdout.flush().context("flush() failed")?;
    Ok(())
}

fn init_tracing(config: &Config) {
    let filter = EnvFilter::builder()
        .with_default_directive(config.log_level.into())
        .with_env_var(LOG_ENV)
        .from_env_lossy();
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_ansi(io::stderr().is_terminal())
        .with_target(false)
        .init();
}
