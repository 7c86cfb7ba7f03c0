use crate::resolver::ResolveError;
use anyhow::Context;
use std::ffi::OsString;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::{Command, Stdio};
use tracing::{debug, warn};

/// A C compiler command line able to run `-dD -E` on standard input.
#[derive(Clone, Debug)]
pub struct CompilerCommand {
    argv: Vec<String>,
    include_dirs: Vec<PathBuf>,
}

impl TryFrom<Vec<String>> for CompilerCommand {
    type Error = anyhow::Error;

    fn try_from(argv: Vec<String>) -> Result<Self, Self::Error> {
        anyhow::ensure!(!argv.is_empty(), "compiler command cannot be empty");
        Ok(Self {
            argv,
            include_dirs: Vec::new(),
        })
    }
}

impl CompilerCommand {
    /// Parse a shell-quoted command line such as `CC="ccache gcc"`.
    pub fn parse(command_line: &str) -> anyhow::Result<Self> {
        shell_words::split(command_line)
            .context("failed to split compiler command line")?
            .try_into()
    }

    /// Search `dirs` before the system include directories.
    #[must_use]
    pub fn with_include_dirs(mut self, dirs: Vec<PathBuf>) -> Self {
        self.include_dirs = dirs;
        self
    }

    pub fn program(&self) -> &str {
        &self.argv[0]
    }

    /// Preprocess `source` and return the listing with every macro definition
    /// kept in place.
    pub fn preprocess(&self, source: &str) -> Result<String, ResolveError> {
        let mut command = Command::new(self.program());
        command.args(&self.argv[1..]);
        for dir in &self.include_dirs {
            command.arg("-I").arg(dir);
        }
        command
            .args(["-dD", "-E", "-"])
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        debug!(?command, "running C preprocessor");

        let mut child = command
            .spawn()
            .map_err(|source| ResolveError::ToolchainUnavailable {
                program: self.program().to_owned(),
                source,
            })?;

        // Dropping the handle closes the pipe so the compiler sees EOF.
        if let Some(mut stdin) = child.stdin.take() {
            match stdin.write_all(source.as_bytes()) {
                Ok(()) => {}
                // The exit status below tells us whether it mattered.
                Err(e) if e.kind() == io::ErrorKind::BrokenPipe => {}
                Err(e) => {
                    let _ = child.kill();
                    let _ = child.wait();
                    return Err(ResolveError::Preprocessing {
                        status: None,
                        diagnostics: format!("failed to write to the compiler: {e}"),
                    });
                }
            }
        }

        let output = child
            .wait_with_output()
            .map_err(|e| ResolveError::Preprocessing {
                status: None,
                diagnostics: format!("failed to collect compiler output: {e}"),
            })?;
        let diagnostics = String::from_utf8_lossy(&output.stderr).trim_end().to_owned();

        if !output.status.success() {
            return Err(ResolveError::Preprocessing {
                status: Some(output.status),
                diagnostics,
            });
        }
        if !diagnostics.is_empty() {
            warn!(program = self.program(), "{diagnostics}");
        }

        String::from_utf8(output.stdout).map_err(|e| ResolveError::Preprocessing {
            status: Some(output.status),
            diagnostics: format!("preprocessor output is not valid UTF-8: {e}"),
        })
    }
}

/// Pick the compiler from `--cc`, then `CC`, then fall back to `gcc`.
pub fn select(
    cc_option: Option<OsString>,
    cc_env: Option<OsString>,
) -> anyhow::Result<CompilerCommand> {
    let Some(command_line) = cc_option.or(cc_env.filter(|cc| !cc.is_empty())) else {
        return CompilerCommand::parse(DEFAULT_COMPILER);
    };
    let command_line = command_line
        .into_string()
        .map_err(|_| anyhow::anyhow!("compiler command line contains invalid UTF-8"))?;
    CompilerCommand::parse(&command_line)
}

const DEFAULT_COMPILER: &str = "gcc";

#[cfg(test)]
mod tests {
    use super::*;

    /// `sh -c SCRIPT sh ARGS...`: the appended compiler arguments land in `$@`.
    fn fake(script: &str) -> CompilerCommand {
        CompilerCommand::try_from(vec![
            "sh".to_owned(),
            "-c".to_owned(),
            script.to_owned(),
            "sh".to_owned(),
        ])
        .unwrap()
    }

    #[test]
    fn source_is_fed_on_stdin() {
        let listing = fake("cat").preprocess("#include <elf.h>\n").unwrap();
        assert_eq!(listing, "#include <elf.h>\n");
    }

    #[test]
    fn preprocess_flags_come_last() {
        let listing = fake(r#"cat >/dev/null; printf '%s\n' "$*""#)
            .with_include_dirs(vec![PathBuf::from("/stub")])
            .preprocess("")
            .unwrap();
        assert_eq!(listing, "-I /stub -dD -E -\n");
    }

    #[test]
    fn missing_compiler() {
        let compiler = CompilerCommand::try_from(vec!["/nonexistent/cc".to_owned()]).unwrap();
        let err = compiler.preprocess("#include <elf.h>\n").unwrap_err();
        assert!(
            matches!(&err, ResolveError::ToolchainUnavailable { program, .. } if program == "/nonexistent/cc"),
            "{err:?}",
        );
    }

    #[test]
    fn failing_compiler() {
        let err = fake("cat >/dev/null; echo 'fatal error: elf.h: No such file' >&2; exit 1")
            .preprocess("#include <elf.h>\n")
            .unwrap_err();
        match err {
            ResolveError::Preprocessing {
                status,
                diagnostics,
            } => {
                assert_eq!(status.and_then(|s| s.code()), Some(1));
                assert_eq!(diagnostics, "fatal error: elf.h: No such file");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn compiler_ignoring_stdin() {
        let err = fake("exit 3").preprocess("#include <elf.h>\n").unwrap_err();
        assert!(matches!(err, ResolveError::Preprocessing { .. }), "{err:?}");
    }

    #[test]
    fn warnings_do_not_fail() {
        let listing = fake("cat; echo 'warning: something' >&2")
            .preprocess("#define NT_FILE 1\n")
            .unwrap();
        assert_eq!(listing, "#define NT_FILE 1\n");
    }

    #[test]
    fn parse_splits_words() {
        let compiler = CompilerCommand::parse("ccache 'my gcc' -m32").unwrap();
        assert_eq!(compiler.argv, ["ccache", "my gcc", "-m32"]);
        assert_eq!(compiler.program(), "ccache");
    }

    #[test]
    fn parse_rejects_empty() {
        assert!(CompilerCommand::parse("  ").is_err());
    }

    #[test]
    fn parse_rejects_unbalanced_quotes() {
        assert!(CompilerCommand::parse("'gcc").is_err());
    }

    #[test]
    fn select_prefers_option() {
        let compiler = select(Some("clang".into()), Some("cc".into())).unwrap();
        assert_eq!(compiler.program(), "clang");
    }

    #[test]
    fn select_falls_back_to_env() {
        let compiler = select(None, Some("cc -std=c99".into())).unwrap();
        assert_eq!(compiler.argv, ["cc", "-std=c99"]);
    }

    #[test]
    fn select_ignores_empty_env() {
        let compiler = select(None, Some("".into())).unwrap();
        assert_eq!(compiler.program(), "gcc");
    }

    #[test]
    fn select_default() {
        let compiler = select(None, None).unwrap();
        assert_eq!(compiler.program(), "gcc");
    }
}
