use crate::compiler;
use crate::config::Config;
use anyhow::Context;
use lexopt::prelude::*;
use std::ffi::OsString;
use std::path::PathBuf;
use tracing::level_filters::LevelFilter;

pub const USAGE: &str = "\
Generate fallback definitions for <elf.h> macros missing from older glibc.

Usage: gen-elf-compat [OPTIONS] > compat.h

Options:
      --cc <COMMAND>         C compiler command line [env: CC] [default: gcc]
  -I, --include-dir <DIR>    Search DIR before the system include directories
  -v, --verbose              Log more to stderr (repeatable)
  -h, --help                 Print help
  -V, --version              Print version

Log filtering can also be set with GEN_ELF_COMPAT_LOG (e.g. GEN_ELF_COMPAT_LOG=debug).
";

#[derive(Debug)]
pub enum Invocation {
    Help,
    Version,
    Generate(Arguments),
}

#[derive(Debug, Default)]
pub struct Arguments {
    cc: Option<OsString>,
    include_dirs: Vec<PathBuf>,
    verbosity: u8,
}

impl Invocation {
    pub fn parse() -> anyhow::Result<Self> {
        parse_args(std::env::args_os())
    }
}

impl Arguments {
    pub fn try_into_config(self) -> anyhow::Result<Config> {
        self.try_into_config_with(std::env::var_os("CC"))
    }

    fn try_into_config_with(self, cc_env: Option<OsString>) -> anyhow::Result<Config> {
        let compiler = compiler::select(self.cc, cc_env)
            .context("failed to determine the C compiler")?
            .with_include_dirs(self.include_dirs);
        Ok(Config {
            compiler,
            log_level: log_level(self.verbosity),
        })
    }
}

fn log_level(verbosity: u8) -> LevelFilter {
    match verbosity {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    }
}

fn parse_args(args: impl IntoIterator<Item = impl Into<OsString>>) -> anyhow::Result<Invocation> {
    let mut arguments = Arguments::default();

    let mut parser = lexopt::Parser::from_iter(args);
    while let Some(arg) = parser.next()? {
        match arg {
            Short('h') | Long("help") => return Ok(Invocation::Help),
            Short('V') | Long("version") => return Ok(Invocation::Version),
            Long("cc") => {
                arguments.cc = Some(parser.value()?);
            }
            Short('I') | Long("include-dir") => {
                arguments.include_dirs.push(parser.value()?.into());
            }
            Short('v') | Long("verbose") => {
                arguments.verbosity = arguments.verbosity.saturating_add(1);
            }
            _ => return Err(arg.unexpected().into()),
        }
    }

    Ok(Invocation::Generate(arguments))
}
