//! Plain-text writer for terminal preview.

use std::fmt::Write;

use crate::error::Result;
use crate::report::{Document, DocumentWriter, ReportFormat, Section};

const LINE_WIDTH: usize = 78;
const KEY_WIDTH: usize = 26;

/// Renders a document as wrapped plain text.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextWriter;

impl DocumentWriter for TextWriter {
    fn format(&self) -> ReportFormat {
        ReportFormat::Text
    }

    fn write(&self, document: &Document) -> Result<Vec<u8>> {
        Ok(render_text(document).into_bytes())
    }
}

/// Render the whole document to a string.
pub fn render_text(document: &Document) -> String {
    let mut out = String::new();
    for section in &document.sections {
        write_section(&mut out, section);
    }
    out
}

fn write_section(out: &mut String, section: &Section) {
    // Writing to a String cannot fail.
    match section {
        Section::Title { title, subtitle } => {
            let _ = writeln!(out, "{title:^width$}", width = LINE_WIDTH);
            let _ = writeln!(out, "{subtitle:^width$}", width = LINE_WIDTH);
            out.push('\n');
        }
        Section::Heading { text, .. } => {
            let _ = writeln!(out, "\n{text}");
            let _ = writeln!(out, "{}", "-".repeat(text.chars().count()));
        }
        Section::KeyValue { rows } => {
            for (key, value) in rows {
                let lines = wrap(value, LINE_WIDTH - KEY_WIDTH - 2);
                for (i, line) in lines.iter().enumerate() {
                    let key = if i == 0 { key.as_str() } else { "" };
                    let _ = writeln!(out, "  {key:<width$}{line}", width = KEY_WIDTH);
                }
            }
        }
        Section::Table { header, rows, .. } => {
            let widths: Vec<usize> = (0..header.len())
                .map(|col| {
                    rows.iter()
                        .filter_map(|r| r.get(col))
                        .chain(std::iter::once(&header[col]))
                        .map(|cell| cell.chars().count())
                        .max()
                        .unwrap_or(0)
                })
                .collect();
            let line = |cells: &[String]| {
                cells
                    .iter()
                    .zip(&widths)
                    .map(|(cell, &w)| format!("{cell:<w$}"))
                    .collect::<Vec<_>>()
                    .join(" | ")
            };
            let _ = writeln!(out, "  {}", line(header.as_slice()));
            let rule: usize = widths.iter().sum::<usize>() + 3 * widths.len().saturating_sub(1);
            let _ = writeln!(out, "  {}", "-".repeat(rule));
            for row in rows {
                let _ = writeln!(out, "  {}", line(row.as_slice()));
            }
        }
        Section::Paragraph { text, strong, .. } => {
            for raw in text.lines() {
                let raw = if *strong { raw.to_uppercase() } else { raw.to_string() };
                for line in wrap(&raw, LINE_WIDTH) {
                    let _ = writeln!(out, "{line}");
                }
            }
            out.push('\n');
        }
        Section::NumberedList { items } => {
            for (i, item) in items.iter().enumerate() {
                let prefix = format!("{}. ", i + 1);
                let indent = " ".repeat(prefix.len());
                for (j, line) in wrap(item, LINE_WIDTH - prefix.len()).iter().enumerate() {
                    let lead = if j == 0 { prefix.as_str() } else { indent.as_str() };
                    let _ = writeln!(out, "{lead}{line}");
                }
            }
        }
        Section::PageBreak => {
            let _ = writeln!(out, "\n{}\n", "=".repeat(LINE_WIDTH));
        }
    }
}

/// Greedy word wrap. Words longer than `width` stay on their own line.
pub(crate) fn wrap(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    for word in text.split_whitespace() {
        let needed = if current.is_empty() {
            word.chars().count()
        } else {
            current.chars().count() + 1 + word.chars().count()
        };
        if needed > width && !current.is_empty() {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }
    if !current.is_empty() || lines.is_empty() {
        lines.push(current);
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrap_respects_width() {
        let lines = wrap("the quick brown fox jumps over the lazy dog", 10);
        assert!(lines.iter().all(|l| l.chars().count() <= 10));
        assert_eq!(lines.join(" "), "the quick brown fox jumps over the lazy dog");
    }

    #[test]
    fn wrap_empty_yields_one_line() {
        assert_eq!(wrap("", 10), vec![String::new()]);
    }

    #[test]
    fn wrap_keeps_long_word_whole() {
        assert_eq!(wrap("supercalifragilistic", 5), vec!["supercalifragilistic"]);
    }
}
