use std::fmt;

pub const GENERATED_NOTICE: &str = "// Generated by gen-elf-compat. Do not edit.";

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct MacroDefinition {
    name: &'static str,
    value: String,
}

impl MacroDefinition {
    pub fn new(name: &'static str, value: impl Into<String>) -> Self {
        Self {
            name,
            value: value.into(),
        }
    }
}

/// Fallback definitions, each wrapped in `#ifndef` so the system header wins
/// whenever it already provides the macro.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CompatibilityHeader {
    definitions: Vec<MacroDefinition>,
}

impl CompatibilityHeader {
    pub fn new(definitions: Vec<MacroDefinition>) -> Self {
        Self { definitions }
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }
}

impl fmt::Display for CompatibilityHeader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{GENERATED_NOTICE}")?;
        for MacroDefinition { name, value } in &self.definitions {
            writeln!(f, "#ifndef {name}")?;
            writeln!(f, "#define {name} {value}")?;
            writeln!(f, "#endif")?;
        }
        Ok(())
    }
}
