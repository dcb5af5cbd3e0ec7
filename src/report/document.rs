//! Declarative document model.
//!
//! A report is an ordered list of typed sections. Writers ([`super::PdfWriter`],
//! [`super::TextWriter`]) decide how each section looks; the builder only
//! decides what is said and in which order.

use chrono::{DateTime, FixedOffset};
use serde::Serialize;

/// Semantic color of a piece of text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    #[default]
    Normal,
    /// Brand accent (titles, section headings).
    Accent,
    /// Reassuring outcome (benign).
    Positive,
    /// Outcome needing attention (malignant, disclaimers).
    Alert,
}

/// One block of report content.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Section {
    /// Centered title and subtitle.
    Title { title: String, subtitle: String },
    /// Section heading.
    Heading { text: String, tone: Tone },
    /// Two-column label/value table.
    KeyValue { rows: Vec<(String, String)> },
    /// Grid table with a header row. `widths` are relative column weights.
    Table {
        header: Vec<String>,
        rows: Vec<Vec<String>>,
        widths: Vec<f32>,
    },
    /// Body text. `strong` renders larger and bold.
    Paragraph { text: String, tone: Tone, strong: bool },
    /// Numbered list, starting at 1.
    NumberedList { items: Vec<String> },
    /// Force the following content onto a new page.
    PageBreak,
}

impl Section {
    pub fn heading(text: impl Into<String>) -> Self {
        Self::Heading {
            text: text.into(),
            tone: Tone::Accent,
        }
    }

    pub fn paragraph(text: impl Into<String>) -> Self {
        Self::Paragraph {
            text: text.into(),
            tone: Tone::Normal,
            strong: false,
        }
    }

    pub fn key_value<K, V>(rows: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self::KeyValue {
            rows: rows.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }
}

/// A fully built report, ready for a writer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Document {
    pub title: String,
    pub report_id: String,
    pub generated_at: DateTime<FixedOffset>,
    pub sections: Vec<Section>,
}

impl Document {
    /// Headings in order, for navigation and tests.
    pub fn headings(&self) -> Vec<&str> {
        self.sections
            .iter()
            .filter_map(|s| match s {
                Section::Heading { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Sections between the given heading and the next heading.
    pub fn section_body(&self, heading: &str) -> &[Section] {
        let Some(start) = self
            .sections
            .iter()
            .position(|s| matches!(s, Section::Heading { text, .. } if text == heading))
        else {
            return &[];
        };
        let rest = &self.sections[start + 1..];
        let end = rest
            .iter()
            .position(|s| matches!(s, Section::Heading { .. } | Section::PageBreak))
            .unwrap_or(rest.len());
        &rest[..end]
    }

    /// Value of a key/value row anywhere in the document.
    pub fn field(&self, key: &str) -> Option<&str> {
        self.sections.iter().find_map(|s| match s {
            Section::KeyValue { rows } => rows
                .iter()
                .find(|(k, _)| k == key)
                .map(|(_, v)| v.as_str()),
            _ => None,
        })
    }
}
