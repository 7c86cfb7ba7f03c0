use crate::compiler::CompilerCommand;
use tracing::level_filters::LevelFilter;

#[derive(Debug)]
pub struct Config {
    pub compiler: CompilerCommand,
    pub log_level: LevelFilter,
}
