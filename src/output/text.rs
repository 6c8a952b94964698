use std::fmt::Write;

use super::CommitReport;

/// Detail items printed per failing check before the list is cut off.
const MAX_ITEMS: usize = 5;

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
    pub const RED: &str = "\x1b[31m";
    pub const GREEN: &str = "\x1b[32m";
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

    fn colorize(&self, text: &str, color: &str) -> String {
        if self.use_colors {
            format!("{color}{text}{}", ansi::RESET)
        } else {
            text.to_string()
        }
    }

    #[must_use]
    pub fn format(&self, reports: &[CommitReport]) -> String {
        let mut out = String::new();
        for report in reports {
            self.format_commit(report, &mut out);
        }

        let failed_commits = reports.iter().filter(|r| !r.passed()).count();
        if failed_commits == 0 {
            let _ = writeln!(out, "All commits passed.");
        } else {
            let _ = writeln!(
                out,
                "{} of {} commit(s) failed checks.",
                failed_commits,
                reports.len()
            );
        }
        out
    }

    fn format_commit(&self, report: &CommitReport, out: &mut String) {
        if report.passed() {
            let status = self.colorize("PASSED", ansi::GREEN);
            let _ = writeln!(
                out,
                "commit {}: {status} ({} checks)",
                report.commit,
                report.checks.len()
            );
            return;
        }

        let status = self.colorize("FAILED", ansi::RED);
        let _ = writeln!(
            out,
            "commit {}: {status} ({} of {} checks)",
            report.commit,
            report.failed_count(),
            report.checks.len()
        );
        for check in &report.checks {
            let Some(failure) = &check.failure else {
                continue;
            };
            let _ = writeln!(out, "  ✗ {}: {}", check.name, failure.msg);
            for item in failure.items.iter().take(MAX_ITEMS) {
                let _ = writeln!(out, "      {item}");
            }
            if failure.items.len() > MAX_ITEMS {
                let _ = writeln!(
                    out,
                    "      ... and {} more",
                    failure.items.len() - MAX_ITEMS
                );
            }
        }
    }
}

#[cfg(test)]
#[path = "text_tests.rs"]
mod tests;
