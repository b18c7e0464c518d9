use crate::file_processor::MatchInfo;
use colored::*;
use std::io::IsTerminal;

/// When to colorize terminal output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorMode {
    #[default]
    Auto,
    Always,
    Never,
}

impl ColorMode {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "auto" => Some(ColorMode::Auto),
            "always" => Some(ColorMode::Always),
            "never" => Some(ColorMode::Never),
            _ => None,
        }
    }

    /// Resolve `Auto` against NO_COLOR (https://no-color.org/) and stdout
    pub fn should_use_color(self) -> bool {
        match self {
            ColorMode::Always => true,
            ColorMode::Never => false,
            ColorMode::Auto => {
                std::env::var_os("NO_COLOR").is_none() && std::io::stdout().is_terminal()
            }
        }
    }

    /// Resolve the mode and make `colored` follow it, piped stdout included.
    pub fn apply(self) -> bool {
        let use_color = self.should_use_color();
        colored::control::set_override(use_color);
        use_color
    }
}

pub struct MatchFormatter {
    use_color: bool,
    show_context: bool,
}

impl MatchFormatter {
    pub fn new(use_color: bool, show_context: bool) -> Self {
        Self {
            use_color,
            show_context,
        }
    }

    pub fn plain() -> Self {
        Self::new(false, true)
    }

    pub fn file_header(&self, path: &str, match_count: usize) -> String {
        if self.use_color {
            format!(
                "\nFile: {}\nFound {} match(es)\n",
                path.bold().cyan(),
                match_count.to_string().bold()
            )
        } else {
            format!("\nFile: {}\nFound {} match(es)\n", path, match_count)
        }
    }

    /// Describe one match: where it is, what it is, and what it becomes
    pub fn format_match(&self, m: &MatchInfo) -> String {
        let mut output = String::new();

        if self.use_color {
            output.push_str(&format!(
                "\nMatch {} (line {}):\n",
                m.index,
                m.line_number.to_string().bold()
            ));
            output.push_str(&format!("  Found: '{}'\n", m.text.red().bold()));
            if self.show_context {
                output.push_str(&format!("  Context: {}\n", self.highlight_context(m)));
            }
            output.push_str(&format!("  Replace with: '{}'\n", m.replacement.green().bold()));
        } else {
            output.push_str(&format!("\nMatch {} (line {}):\n", m.index, m.line_number));
            output.push_str(&format!("  Found: '{}'\n", m.text));
            if self.show_context {
                output.push_str(&format!("  Context: {}\n", m.context_line));
            }
            output.push_str(&format!("  Replace with: '{}'\n", m.replacement));
        }

        output
    }

    /// Context line with the matched span emphasized
    fn highlight_context(&self, m: &MatchInfo) -> String {
        let line = &m.context_line;
        let start = m.column.min(line.len());
        // a match spanning lines is cut at the end of the context line
        let end = (start + m.text.len()).min(line.len());
        match (line.get(..start), line.get(start..end), line.get(end..)) {
            (Some(before), Some(hit), Some(after)) => {
                format!("{}{}{}", before.dimmed(), hit.yellow().bold(), after.dimmed())
            }
            _ => line.dimmed().to_string(),
        }
    }

    pub fn success(&self, path: &str, count: usize) -> String {
        let text = format!("Successfully replaced {} match(es) in: {}", count, path);
        if self.use_color {
            format!("{} {}", "✓".green().bold(), text)
        } else {
            format!("✓ {}", text)
        }
    }

    pub fn summary(&self, modified: usize, total: usize, dry_run: bool) -> String {
        let rule = "=".repeat(50);
        let headline = if dry_run {
            format!("DRY RUN COMPLETE: {} file(s) would be modified", modified)
        } else {
            format!("OPERATION COMPLETE: {} file(s) modified", modified)
        };

        if self.use_color {
            format!(
                "\n{}\n{}\nTotal files processed: {}\n",
                rule.dimmed(),
                headline.bold(),
                total
            )
        } else {
            format!("\n{}\n{}\nTotal files processed: {}\n", rule, headline, total)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> MatchInfo {
        MatchInfo {
            index: 2,
            line_number: 7,
            start: 40,
            end: 43,
            column: 4,
            text: "foo".to_string(),
            context_line: "let foo = 1;".to_string(),
            replacement: "bar".to_string(),
        }
    }

    #[test]
    fn test_format_match_plain() {
        let out = MatchFormatter::plain().format_match(&sample());
        assert_eq!(
            out,
            "\nMatch 2 (line 7):\n  Found: 'foo'\n  Context: let foo = 1;\n  Replace with: 'bar'\n"
        );
    }

    #[test]
    fn test_format_match_without_context() {
        let out = MatchFormatter::new(false, false).format_match(&sample());
        assert!(!out.contains("Context:"));
    }

    #[test]
    fn test_colored_output_keeps_text() {
        colored::control::set_override(true);
        let out = MatchFormatter::new(true, true).format_match(&sample());
        assert!(out.contains("foo"));
        assert!(out.contains("bar"));
        assert!(out.contains("Replace with"));
    }

    #[test]
    fn test_always_forces_ansi_output() {
        // stdout is captured here, so colored would otherwise stay plain
        assert!(ColorMode::Always.apply());
        let summary = MatchFormatter::new(true, true).summary(1, 2, false);
        assert!(summary.contains("\x1b["));
    }

    #[test]
    fn test_summary() {
        let f = MatchFormatter::plain();
        assert!(f.summary(1, 2, false).contains("OPERATION COMPLETE: 1 file(s) modified\nTotal files processed: 2"));
        assert!(f.summary(3, 4, true).contains("DRY RUN COMPLETE: 3 file(s) would be modified"));
    }

    #[test]
    fn test_color_mode_parse() {
        assert_eq!(ColorMode::parse("never"), Some(ColorMode::Never));
        assert_eq!(ColorMode::parse("sometimes"), None);
        assert!(ColorMode::Always.should_use_color());
        assert!(!ColorMode::Never.should_use_color());
    }
}
