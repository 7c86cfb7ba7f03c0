use crate::compiler::CompilerCommand;
use crate::definitions::Definitions;
use crate::header::{CompatibilityHeader, MacroDefinition};
use crate::targets::TARGET_HEADER;
use std::fmt;
use std::io;
use std::process::ExitStatus;
use tracing::debug;

/// Asks the host preprocessor for the current value of each target macro.
#[derive(Debug)]
pub struct MacroResolver {
    compiler: CompilerCommand,
    header: &'static str,
}

impl MacroResolver {
    pub fn new(compiler: CompilerCommand) -> Self {
        Self {
            compiler,
            header: TARGET_HEADER,
        }
    }

    /// Build the compatibility header for `targets`, in that order.
    ///
    /// Either every target resolves or nothing is produced.
    pub fn resolve(
        &self,
        targets: &[&'static str],
    ) -> Result<CompatibilityHeader, ResolveError> {
        let source = format!("#include <{}>\n", self.header);
        let listing = self.compiler.preprocess(&source)?;
        debug!(bytes = listing.len(), "captured preprocessor listing");
        collect(&listing, targets)
    }
}

fn collect(
    listing: &str,
    targets: &[&'static str],
) -> Result<CompatibilityHeader, ResolveError> {
    let definitions = Definitions::scan(listing, targets);
    debug!(found = definitions.len(), wanted = targets.len(), "scanned listing");

    let mut resolved = Vec::with_capacity(targets.len());
    let mut missing = Vec::new();
    for &name in targets {
        match definitions.get(name) {
            Some(value) => resolved.push(MacroDefinition::new(name, value)),
            None => missing.push(name),
        }
    }
    if !missing.is_empty() {
        return Err(ResolveError::MissingMacros(missing));
    }

    Ok(CompatibilityHeader::new(resolved))
}

#[derive(Debug)]
pub enum ResolveError {
    /// The compiler could not be started at all.
    ToolchainUnavailable { program: String, source: io::Error },
    /// The compiler ran but did not produce a listing.
    Preprocessing {
        status: Option<ExitStatus>,
        diagnostics: String,
    },
    /// The listing lacked these targets.
    MissingMacros(Vec<&'static str>),
}

impl fmt::Display for ResolveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResolveError::ToolchainUnavailable { program, .. } => {
                write!(f, "C compiler `{}` could not be started", program)
            }
            ResolveError::Preprocessing {
                status,
                diagnostics,
            } => {
                write!(f, "preprocessing failed")?;
                if let Some(status) = status {
                    write!(f, " ({})", status)?;
                }
                if !diagnostics.is_empty() {
                    write!(f, ":\n{}", diagnostics)?;
                }
                Ok(())
            }
            ResolveError::MissingMacros(names) => {
                write!(f, "macros not defined by the host headers: {}", names.join(", "))
            }
        }
    }
}

impl std::error::Error for ResolveError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ResolveError::ToolchainUnavailable { source, .. } => Some(source),
            _ => None,
        }
    }
}
