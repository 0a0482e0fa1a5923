use std::io::Write;

use crate::assert::Finding;
use crate::checker::CheckResult;
use crate::error::Result;

use super::{OutputFormatter, Tally};

/// Color output mode for terminal display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorMode {
    /// Auto-detect: use colors if stdout is a TTY and `NO_COLOR` is not set
    #[default]
    Auto,
    Always,
    Never,
}

/// ANSI color codes
mod ansi {
    pub const RED: &str = "\x1b[31m";
    pub const GREEN: &str = "\x1b[32m";
    pub const CYAN: &str = "\x1b[36m";
    pub const RESET: &str = "\x1b[0m";
}

/// Human-readable report.
///
/// Failing files are listed with one line per failure message. Passing files
/// are only listed from verbosity 1 upward. Bracketed segments of a message
/// (`[for]`) are shown as inline code.
pub struct TextFormatter {
    use_colors: bool,
    verbose: u8,
}

impl TextFormatter {
    #[must_use]
    pub fn new(mode: ColorMode) -> Self {
        Self::with_verbose(mode, 0)
    }

    #[must_use]
    pub fn with_verbose(mode: ColorMode, verbose: u8) -> Self {
        Self {
            use_colors: Self::should_use_colors(mode),
            verbose,
        }
    }

    fn should_use_colors(mode: ColorMode) -> bool {
        match mode {
            ColorMode::Always => true,
            ColorMode::Never => false,
            ColorMode::Auto => {
                if std::env::var("NO_COLOR").is_ok() {
                    return false;
                }
                std::io::IsTerminal::is_terminal(&std::io::stdout())
            }
        }
    }

    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.use_colors {
            return text.to_string();
        }
        format!("{color}{text}{}", ansi::RESET)
    }

    fn code(&self, text: &str) -> String {
        if self.use_colors {
            self.colorize(text, ansi::CYAN)
        } else {
            format!("`{text}`")
        }
    }

    /// Replace every `[segment]` in `message` with its inline-code rendering.
    /// An unmatched `[` is kept literally.
    fn highlight(&self, message: &str) -> String {
        let mut rendered = String::with_capacity(message.len());
        let mut rest = message;
        while let Some(open) = rest.find('[') {
            let Some(len) = rest[open + 1..].find(']') else {
                break;
            };
            rendered.push_str(&rest[..open]);
            rendered.push_str(&self.code(&rest[open + 1..open + 1 + len]));
            rest = &rest[open + len + 2..];
        }
        rendered.push_str(rest);
        rendered
    }

    fn format_result(&self, result: &CheckResult, output: &mut Vec<u8>) {
        let (icon, status) = if result.is_passed() {
            ("✓", self.colorize("PASSED", ansi::GREEN))
        } else {
            ("✗", self.colorize("FAILED", ansi::RED))
        };
        writeln!(output, "{icon} {status}: {}", result.path().display()).ok();

        for finding in result.failures() {
            self.format_finding(finding, output);
        }
    }

    fn format_finding(&self, finding: &Finding, output: &mut Vec<u8>) {
        for message in finding.outcome.failure_messages() {
            writeln!(output, "   {}: {}", finding.kind, self.highlight(message)).ok();
        }
    }

    fn format_summary(&self, tally: Tally) -> String {
        let passed = self.colorize(&tally.passed.to_string(), ansi::GREEN);
        let failed = self.colorize(&tally.failed.to_string(), ansi::RED);
        format!(
            "{} files checked: {passed} passed, {failed} failed",
            tally.total
        )
    }
}

impl Default for TextFormatter {
    fn default() -> Self {
        Self::new(ColorMode::Auto)
    }
}

impl OutputFormatter for TextFormatter {
    fn format(&self, results: &[CheckResult]) -> Result<String> {
        let mut output = Vec::new();

        for result in results.iter().filter(|r| r.is_failed()) {
            self.format_result(result, &mut output);
            writeln!(output).ok();
        }

        if self.verbose >= 1 {
            for result in results.iter().filter(|r| r.is_passed()) {
                self.format_result(result, &mut output);
                writeln!(output).ok();
            }
        }

        writeln!(output, "{}", self.format_summary(Tally::of(results))).ok();

        Ok(String::from_utf8_lossy(&output).to_string())
    }
}

#[cfg(test)]
#[path = "text_tests.rs"]
mod tests;
