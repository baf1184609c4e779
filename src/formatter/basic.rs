use crate::formatter::{Formatter, FormatterFactory};
use anyhow::{Context, Result};
use serde::Deserialize;

/// Options of the basic formatter.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BasicConfig {
    /// Strip spaces, tabs and stray carriage returns at the end of every line.
    pub trim_trailing_whitespace: bool,
    /// End non-empty content with exactly one newline, dropping trailing blank lines.
    pub ensure_final_newline: bool,
    /// Collapse runs of blank lines longer than this. `None` keeps them.
    pub max_blank_lines: Option<usize>,
    /// Replace each tab in a line's indentation with this many spaces.
    pub indent_tabs_as: Option<usize>,
}

impl Default for BasicConfig {
    fn default() -> Self {
        Self {
            trim_trailing_whitespace: true,
            ensure_final_newline: true,
            max_blank_lines: None,
            indent_tabs_as: None,
        }
    }
}

/// Normalises whitespace in UTF-8 text.
///
/// Output lines are separated by `\n`. Carriage returns right before a line
/// break or at the end of the text belong to the line ending and are dropped
/// whether trimming is enabled or not. The result is stable: formatting it
/// again returns it unchanged.
#[derive(Debug, Clone, Default)]
pub struct BasicFormatter {
    config: BasicConfig,
}

impl BasicFormatter {
    #[must_use]
    pub const fn new(config: BasicConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub const fn config(&self) -> &BasicConfig {
        &self.config
    }

    fn format_line(&self, line: &str) -> String {
        let mut line = match self.config.indent_tabs_as {
            Some(width) => expand_indent_tabs(line, width),
            None => line.to_string(),
        };
        if self.config.trim_trailing_whitespace {
            let trimmed = line.trim_end_matches([' ', '\t', '\r']).len();
            line.truncate(trimmed);
        }
        line
    }

    fn format_text(&self, text: &str) -> String {
        let mut lines: Vec<String> = Vec::new();
        let mut blank_run = 0usize;
        for raw in text.lines() {
            let line = self.format_line(raw.trim_end_matches('\r'));
            if line.trim().is_empty() {
                blank_run += 1;
                if self.config.max_blank_lines.is_some_and(|max| blank_run > max) {
                    continue;
                }
            } else {
                blank_run = 0;
            }
            lines.push(line);
        }

        if self.config.ensure_final_newline {
            while lines.last().is_some_and(|line| line.trim().is_empty()) {
                lines.pop();
            }
            if lines.is_empty() {
                return String::new();
            }
            let mut out = lines.join("\n");
            out.push('\n');
            out
        } else {
            let mut out = lines.join("\n");
            if text.ends_with('\n') {
                out.push('\n');
            }
            out
        }
    }
}

impl Formatter for BasicFormatter {
    fn name(&self) -> &str {
        "basic"
    }

    fn format(&self, content: &[u8]) -> Result<Vec<u8>> {
        let text = std::str::from_utf8(content).context("Content is not valid UTF-8")?;
        Ok(self.format_text(text).into_bytes())
    }
}

/// Factory for [`BasicFormatter`], selected by `type = "basic"`.
#[derive(Debug, Clone, Copy, Default)]
pub struct BasicFormatterFactory;

impl FormatterFactory for BasicFormatterFactory {
    fn formatter_type(&self) -> &'static str {
        "basic"
    }

    fn new_default(&self) -> Box<dyn Formatter> {
        Box::new(BasicFormatter::default())
    }

    fn new_with_config(&self, options: &toml::Table) -> Result<Box<dyn Formatter>> {
        let config: BasicConfig = toml::Value::Table(options.clone())
            .try_into()
            .context("Invalid basic formatter options")?;
        Ok(Box::new(BasicFormatter::new(config)))
    }
}

fn expand_indent_tabs(line: &str, width: usize) -> String {
    let indent_len = line.len() - line.trim_start_matches([' ', '\t']).len();
    let (indent, rest) = line.split_at(indent_len);
    let mut out = String::with_capacity(line.len() + indent.len() * width);
    for ch in indent.chars() {
        if ch == '\t' {
            out.extend(std::iter::repeat_n(' ', width));
        } else {
            out.push(ch);
        }
    }
    out.push_str(rest);
    out
}
