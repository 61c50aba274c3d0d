use std::fmt::Write;

use crate::config::FilterPattern;

/// Indentation step of the `.any` grammar.
const INDENT: &str = "  ";

/// Line-oriented builder for the `.any` grammar.
///
/// Tracks block depth so callers only name stanzas and values; every `open`
/// must be paired with a `close`. Writing is infallible (`String` target).
#[derive(Debug, Default)]
pub struct AnyWriter {
    buf: String,
    depth: usize,
}

impl AnyWriter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A line at the current depth.
    pub fn line(&mut self, text: &str) {
        for _ in 0..self.depth {
            self.buf.push_str(INDENT);
        }
        self.buf.push_str(text);
        self.buf.push('\n');
    }

    /// `/name {`, increasing depth for subsequent lines.
    pub fn open(&mut self, name: &str) {
        self.line(&format!("/{name} {{"));
        self.depth += 1;
    }

    /// Closing `}` of the innermost block.
    pub fn close(&mut self) {
        debug_assert!(self.depth > 0, "close without matching open");
        self.depth = self.depth.saturating_sub(1);
        self.line("}");
    }

    /// `/name "value"`.
    pub fn scalar(&mut self, name: &str, value: &str) {
        self.line(&format!("/{name} \"{value}\""));
    }

    /// `/name value` without quotes (only `/delay` uses this form).
    pub fn bare(&mut self, name: &str, value: u32) {
        self.line(&format!("/{name} {value}"));
    }

    /// `/name "1"` or `/name "0"`.
    pub fn flag(&mut self, name: &str, value: bool) {
        self.scalar(name, bool_value(value));
    }

    /// A quoted bare list entry such as a client header or virtual host.
    pub fn quoted_item(&mut self, value: &str) {
        self.line(&format!("\"{value}\""));
    }

    #[must_use]
    pub fn finish(self) -> String {
        debug_assert_eq!(self.depth, 0, "unclosed block");
        self.buf
    }
}

/// Boolean directives render as "1"/"0".
#[must_use]
pub const fn bool_value(value: bool) -> &'static str {
    if value { "1" } else { "0" }
}

/// Allow/deny rule type from the `allow` flag.
#[must_use]
pub const fn rule_type(allow: bool) -> &'static str {
    if allow { "allow" } else { "deny" }
}

/// Regex patterns are single-quoted, glob/literal patterns double-quoted.
#[must_use]
pub fn quote_pattern(pattern: &FilterPattern) -> String {
    if pattern.regex {
        format!("'{}'", pattern.pattern)
    } else {
        format!("\"{}\"", pattern.pattern)
    }
}

/// Zero-padded, zero-based key for rule list entries: `/0000`, `/0001`, ...
#[must_use]
pub fn sequence_key(index: usize) -> String {
    format!("{index:04}")
}

/// Appends `/NNNN { /type "..." /glob "..." }` entries for a rule list.
pub fn write_glob_rules(writer: &mut AnyWriter, name: &str, rules: &[crate::config::GlobRule]) {
    writer.open(name);
    for (index, rule) in rules.iter().enumerate() {
        let mut entry = String::new();
        let _ = write!(
            entry,
            "/{} {{ /type \"{}\" /glob \"{}\" }}",
            sequence_key(index),
            rule_type(rule.allow),
            rule.glob
        );
        writer.line(&entry);
    }
    writer.close();
}

#[cfg(test)]
#[path = "any_tests.rs"]
mod tests;
