use std::fmt::Write;

use crate::error::Result;

use super::{OutputFormatter, ValidationReport};

/// Color output mode for terminal display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorMode {
    /// Auto-detect: use colors if stdout is a TTY and `NO_COLOR` is not set
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

/// ANSI color codes
mod ansi {
    pub const GREEN: &str = "\x1b[32m";
    pub const CYAN: &str = "\x1b[36m";
    pub const RESET: &str = "\x1b[0m";
}

pub struct TextFormatter {
    use_colors: bool,
}

impl TextFormatter {
    #[must_use]
    pub fn new(mode: ColorMode) -> Self {
        Self {
            use_colors: Self::should_use_colors(mode),
        }
    }

    fn should_use_colors(mode: ColorMode) -> bool {
        match mode {
            ColorMode::Always => true,
            ColorMode::Never => false,
            ColorMode::Auto => {
                // Respect NO_COLOR environment variable
                if std::env::var("NO_COLOR").is_ok() {
                    return false;
                }
                std::io::IsTerminal::is_terminal(&std::io::stdout())
            }
        }
    }

    fn paint(&self, color: &str, text: &str) -> String {
        if self.use_colors {
            format!("{color}{text}{}", ansi::RESET)
        } else {
            text.to_string()
        }
    }
}

impl OutputFormatter for TextFormatter {
    fn format(&self, report: &ValidationReport) -> Result<String> {
        let mut out = String::new();
        for farm in &report.farms {
            let mut traits = vec![
                format!("{} renderer(s)", farm.renderers),
                format!("{} filter(s)", farm.filters),
            ];
            if farm.cache {
                traits.push("cache".to_string());
            }
            if farm.secure {
                traits.push("secure".to_string());
            }
            let _ = writeln!(
                out,
                "{} {} -> {} [{}]",
                self.paint(ansi::GREEN, "✓"),
                self.paint(ansi::CYAN, &farm.name),
                farm.file_name,
                traits.join(", ")
            );
        }
        let _ = writeln!(
            out,
            "{} farm(s) valid",
            report.farms.len()
        );
        Ok(out)
    }
}

#[cfg(test)]
#[path = "text_tests.rs"]
mod tests;
