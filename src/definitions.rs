use std::collections::{HashMap, HashSet};
use tracing::{debug, trace};

/// Raw macro values captured from a preprocessor listing, keyed by target name.
#[derive(Debug, Default)]
pub struct Definitions<'t, 'l> {
    values: HashMap<&'t str, &'l str>,
}

impl<'t, 'l> Definitions<'t, 'l> {
    /// Scan a `-dD` listing for `#define` lines naming one of `targets`.
    ///
    /// Names are matched by set membership, so `R_RISCV_32` never picks up
    /// `R_RISCV_32_PCREL`. When a target is defined more than once, the last
    /// line wins.
    pub fn scan(listing: &'l str, targets: &[&'t str]) -> Self {
        let wanted = targets.iter().copied().collect::<HashSet<&'t str>>();
        let mut values = HashMap::with_capacity(wanted.len());

        for line in listing.lines() {
            let Some((name, value)) = parse_define(line) else {
                continue;
            };
            let Some(&name) = wanted.get(name) else {
                continue;
            };
            trace!(macro_name = name, value, "found definition");
            if let Some(previous) = values.insert(name, value) {
                if previous != value {
                    debug!(
                        macro_name = name,
                        previous,
                        value,
                        "macro redefined, keeping the later value"
                    );
                }
            }
        }

        Self { values }
    }

    pub fn get(&self, name: &str) -> Option<&'l str> {
        self.values.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }
}

/// Split a `# define NAME VALUE` line into `(NAME, VALUE)`.
///
/// Blanks may surround the `#`. At least one blank must follow `define` and
/// the name. Function-like macros and bodiless definitions yield `None`.
fn parse_define(line: &str) -> Option<(&str, &str)> {
    let rest = line.trim_start_matches(is_blank).strip_prefix('#')?;
    let rest = rest.trim_start_matches(is_blank).strip_prefix("define")?;
    let rest = skip_blanks(rest)?;
    let end = rest
        .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
        .unwrap_or(rest.len());
    let (name, rest) = rest.split_at(end);
    if name.is_empty() {
        return None;
    }
    Some((name, skip_blanks(rest)?))
}

/// Strip a non-empty run of leading blanks.
fn skip_blanks(s: &str) -> Option<&str> {
    let trimmed = s.trim_start_matches(is_blank);
    (trimmed.len() < s.len()).then_some(trimmed)
}

fn is_blank(c: char) -> bool {
    matches!(c, ' ' | '\t')
}
