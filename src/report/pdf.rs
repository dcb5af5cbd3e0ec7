//! PDF writer.
//!
//! Lays a [`Document`] out on A4 pages with 0.75 inch margins using the
//! standard Helvetica fonts, then serializes it with `lopdf`. Text is
//! measured with Helvetica advance widths and word-wrapped per column.

use lopdf::content::{Content, Operation};
use lopdf::{Object, Stream, StringFormat, dictionary};

use crate::error::{Result, ThyraError};
use crate::report::{Document, DocumentWriter, ReportFormat, Section, Tone};
use crate::version::PKG_VERSION;

/// A4 in points.
pub const PAGE_WIDTH: f32 = 595.28;
pub const PAGE_HEIGHT: f32 = 841.89;
/// 0.75 inch.
pub const MARGIN: f32 = 54.0;

const INCH: f32 = 72.0;
const CONTENT_WIDTH: f32 = PAGE_WIDTH - 2.0 * MARGIN;

type Rgb = (f32, f32, f32);

const BLACK: Rgb = (0.0, 0.0, 0.0);
const ORANGE: Rgb = (1.0, 0.549, 0.0); // #FF8C00
const DARK_GREY: Rgb = (0.184, 0.184, 0.184); // #2F2F2F
const FOREST_GREEN: Rgb = (0.133, 0.545, 0.133); // #228B22
const CRIMSON: Rgb = (0.863, 0.078, 0.235); // #DC143C
const RULE_GREY: Rgb = (0.8, 0.8, 0.8); // #CCCCCC
const HEADER_FILL: Rgb = (0.941, 0.941, 0.941); // #F0F0F0

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Font {
    Regular,
    Bold,
}

impl Font {
    fn resource(&self) -> &'static str {
        match self {
            Self::Regular => "F1",
            Self::Bold => "F2",
        }
    }
}

fn tone_color(tone: Tone) -> Rgb {
    match tone {
        Tone::Normal => BLACK,
        Tone::Accent => ORANGE,
        Tone::Positive => FOREST_GREEN,
        Tone::Alert => CRIMSON,
    }
}

/// Writes documents as PDF bytes.
#[derive(Debug, Clone, Copy, Default)]
pub struct PdfWriter;

impl DocumentWriter for PdfWriter {
    fn format(&self) -> ReportFormat {
        ReportFormat::Pdf
    }

    fn write(&self, document: &Document) -> Result<Vec<u8>> {
        let mut layout = Layout::new();
        for section in &document.sections {
            layout.section(section);
        }
        let pages = layout.finish(&document.report_id);
        serialize(document, pages)
    }
}

// ============================================================================
// Layout
// ============================================================================

/// Cursor-based page layout. `y` is the top of the free area on the page.
struct Layout {
    pages: Vec<Vec<Operation>>,
    ops: Vec<Operation>,
    y: f32,
}

impl Layout {
    fn new() -> Self {
        Self {
            pages: Vec::new(),
            ops: Vec::new(),
            y: PAGE_HEIGHT - MARGIN,
        }
    }

    fn at_page_top(&self) -> bool {
        self.y >= PAGE_HEIGHT - MARGIN
    }

    fn new_page(&mut self) {
        self.pages.push(std::mem::take(&mut self.ops));
        self.y = PAGE_HEIGHT - MARGIN;
    }

    /// Start a new page unless `height` still fits on this one.
    fn ensure(&mut self, height: f32) {
        if self.y - height < MARGIN && !self.at_page_top() {
            self.new_page();
        }
    }

    fn space(&mut self, points: f32) {
        if !self.at_page_top() {
            self.y -= points;
        }
    }

    fn section(&mut self, section: &Section) {
        match section {
            Section::Title { title, subtitle } => {
                self.space(12.0);
                self.centered_line(title, Font::Bold, 24.0, ORANGE);
                self.y -= 24.0;
                self.centered_line(subtitle, Font::Regular, 16.0, DARK_GREY);
                self.y -= 20.0;
            }
            Section::Heading { text, tone } => {
                let (size, centered) = match tone {
                    Tone::Alert => (16.0, true),
                    _ => (14.0, false),
                };
                self.space(16.0);
                // Keep the heading with at least a few lines of what follows.
                self.ensure(size + 48.0);
                if centered {
                    self.centered_line(text, Font::Bold, size, tone_color(*tone));
                } else {
                    self.y -= size;
                    self.text(MARGIN, self.y, Font::Bold, size, tone_color(*tone), text);
                }
                self.y -= 10.0;
            }
            Section::KeyValue { rows } => {
                let widths = [2.0 * INCH, 4.0 * INCH];
                for (key, value) in rows {
                    let cells = [(key.as_str(), Font::Bold), (value.as_str(), Font::Regular)];
                    self.row(&cells, &widths, 9.0, 6.0, 4.0, RowStyle::Plain);
                }
                self.y -= 16.0;
            }
            Section::Table {
                header,
                rows,
                widths,
            } => {
                let total: f32 = widths.iter().sum();
                let scale = if total > 0.0 { 6.0 * INCH / total } else { 0.0 };
                let widths: Vec<f32> = widths.iter().map(|w| w * scale).collect();

                let header_cells: Vec<(&str, Font)> =
                    header.iter().map(|h| (h.as_str(), Font::Bold)).collect();
                self.row(&header_cells, &widths, 8.0, 4.0, 6.0, RowStyle::GridHeader);
                for row in rows {
                    let cells: Vec<(&str, Font)> =
                        row.iter().map(|c| (c.as_str(), Font::Regular)).collect();
                    self.row(&cells, &widths, 8.0, 4.0, 6.0, RowStyle::Grid);
                }
                self.y -= 16.0;
            }
            Section::Paragraph { text, tone, strong } => {
                let (font, size, leading) = if *strong {
                    (Font::Bold, 12.0, 15.0)
                } else {
                    (Font::Regular, 10.0, 12.0)
                };
                self.space(2.0);
                for raw in text.lines() {
                    for line in wrap_to_width(raw, font, size, CONTENT_WIDTH) {
                        self.ensure(leading);
                        self.y -= leading;
                        self.text(MARGIN, self.y + leading - size, font, size, tone_color(*tone), &line);
                    }
                }
                self.y -= if *strong { 10.0 } else { 4.0 };
            }
            Section::NumberedList { items } => {
                let indent = 16.0;
                for (i, item) in items.iter().enumerate() {
                    let number = format!("{}.", i + 1);
                    let lines = wrap_to_width(item, Font::Regular, 10.0, CONTENT_WIDTH - indent);
                    for (j, line) in lines.iter().enumerate() {
                        self.ensure(12.0);
                        self.y -= 12.0;
                        let baseline = self.y + 2.0;
                        if j == 0 {
                            self.text(MARGIN, baseline, Font::Regular, 10.0, BLACK, &number);
                        }
                        self.text(MARGIN + indent, baseline, Font::Regular, 10.0, BLACK, line);
                    }
                    self.y -= 3.0;
                }
                self.y -= 13.0;
            }
            Section::PageBreak => {
                if !self.at_page_top() {
                    self.new_page();
                }
            }
        }
    }

    /// One table row with wrapped cells.
    ///
    /// A row taller than a whole page is split into page-sized slices. Cells
    /// that ran out of lines in an earlier slice (the key column, typically)
    /// are repeated on each continuation.
    fn row(
        &mut self,
        cells: &[(&str, Font)],
        widths: &[f32],
        size: f32,
        pad_x: f32,
        pad_y: f32,
        style: RowStyle,
    ) {
        let leading = size + 2.0;
        let wrapped: Vec<Vec<String>> = cells
            .iter()
            .zip(widths)
            .map(|((text, font), w)| wrap_to_width(text, *font, size, w - 2.0 * pad_x))
            .collect();
        let line_count = wrapped.iter().map(Vec::len).max().unwrap_or(1).max(1);

        self.ensure(line_count as f32 * leading + 2.0 * pad_y);
        let mut start = 0;
        loop {
            let room = ((self.y - MARGIN - 2.0 * pad_y) / leading).floor();
            let end = (start + (room.max(1.0) as usize)).min(line_count);
            let slices: Vec<&[String]> = wrapped
                .iter()
                .map(|lines| {
                    if start > 0 && lines.len() <= start {
                        &lines[..lines.len().min(end - start)]
                    } else {
                        &lines[start.min(lines.len())..end.min(lines.len())]
                    }
                })
                .collect();
            self.row_slice(cells, &slices, widths, end - start, size, pad_x, pad_y, style);
            if end >= line_count {
                break;
            }
            self.new_page();
            start = end;
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn row_slice(
        &mut self,
        cells: &[(&str, Font)],
        slices: &[&[String]],
        widths: &[f32],
        line_count: usize,
        size: f32,
        pad_x: f32,
        pad_y: f32,
        style: RowStyle,
    ) {
        let leading = size + 2.0;
        let height = line_count as f32 * leading + 2.0 * pad_y;
        let top = self.y;
        let bottom = top - height;
        let total_width: f32 = widths.iter().sum();

        if style == RowStyle::GridHeader {
            self.fill_rect(MARGIN, bottom, total_width, height, HEADER_FILL);
        }

        let mut x = MARGIN;
        for (((_, font), lines), w) in cells.iter().zip(slices).zip(widths) {
            for (i, line) in lines.iter().enumerate() {
                let baseline = top - pad_y - size - i as f32 * leading;
                let tx = match style {
                    RowStyle::Plain => x + pad_x,
                    RowStyle::Grid | RowStyle::GridHeader => {
                        x + (w - text_width(line, *font, size)) / 2.0
                    }
                };
                self.text(tx, baseline, *font, size, BLACK, line);
            }
            x += w;
        }

        if style != RowStyle::Plain {
            let mut x = MARGIN;
            for w in widths {
                self.stroke_rect(x, bottom, *w, height, RULE_GREY);
                x += w;
            }
        }
        self.y = bottom;
    }

    fn centered_line(&mut self, text: &str, font: Font, size: f32, color: Rgb) {
        self.ensure(size);
        self.y -= size;
        let x = MARGIN + (CONTENT_WIDTH - text_width(text, font, size)).max(0.0) / 2.0;
        self.text(x, self.y, font, size, color, text);
    }

    fn text(&mut self, x: f32, y: f32, font: Font, size: f32, color: Rgb, text: &str) {
        self.ops.extend([
            Operation::new("BT", vec![]),
            Operation::new("Tf", vec![font.resource().into(), real(size)]),
            Operation::new("rg", vec![real(color.0), real(color.1), real(color.2)]),
            Operation::new("Td", vec![real(x), real(y)]),
            Operation::new("Tj", vec![pdf_string(text)]),
            Operation::new("ET", vec![]),
        ]);
    }

    fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: Rgb) {
        self.ops.extend([
            Operation::new("rg", vec![real(color.0), real(color.1), real(color.2)]),
            Operation::new("re", vec![real(x), real(y), real(w), real(h)]),
            Operation::new("f", vec![]),
        ]);
    }

    fn stroke_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: Rgb) {
        self.ops.extend([
            Operation::new("w", vec![real(0.5)]),
            Operation::new("RG", vec![real(color.0), real(color.1), real(color.2)]),
            Operation::new("re", vec![real(x), real(y), real(w), real(h)]),
            Operation::new("S", vec![]),
        ]);
    }

    /// Close the last page and stamp footers on every page.
    fn finish(mut self, report_id: &str) -> Vec<Vec<Operation>> {
        if !self.ops.is_empty() || self.pages.is_empty() {
            self.new_page();
        }
        let total = self.pages.len();
        let mut pages = std::mem::take(&mut self.pages);
        for (i, ops) in pages.iter_mut().enumerate() {
            let footer = format!("{report_id}  |  Page {} of {total}", i + 1);
            let x = MARGIN + (CONTENT_WIDTH - text_width(&footer, Font::Regular, 8.0)) / 2.0;
            self.ops.clear();
            self.text(x, MARGIN / 2.0, Font::Regular, 8.0, DARK_GREY, &footer);
            ops.append(&mut self.ops);
        }
        pages
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RowStyle {
    Plain,
    Grid,
    GridHeader,
}

// ============================================================================
// Serialization
// ============================================================================

fn serialize(document: &Document, pages: Vec<Vec<Operation>>) -> Result<Vec<u8>> {
    let mut doc = lopdf::Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let regular_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
        "Encoding" => "WinAnsiEncoding",
    });
    let bold_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica-Bold",
        "Encoding" => "WinAnsiEncoding",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            Font::Regular.resource() => regular_id,
            Font::Bold.resource() => bold_id,
        },
    });

    let mut kids: Vec<Object> = Vec::with_capacity(pages.len());
    for operations in pages {
        let content = Content { operations };
        let encoded = content
            .encode()
            .map_err(|e| ThyraError::Rendering(format!("Failed to encode page content: {e}")))?;
        let content_id = doc.add_object(Stream::new(dictionary! {}, encoded));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        kids.push(page_id.into());
    }

    let count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => count,
            "Resources" => resources_id,
            "MediaBox" => vec![real(0.0), real(0.0), real(PAGE_WIDTH), real(PAGE_HEIGHT)],
        }),
    );

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let info_id = doc.add_object(dictionary! {
        "Title" => pdf_string(&document.title),
        "Subject" => pdf_string(&document.report_id),
        "Producer" => pdf_string(&format!("thyra {PKG_VERSION}")),
        "CreationDate" => pdf_string(&document.generated_at.format("D:%Y%m%d%H%M%S").to_string()),
    });
    doc.trailer.set("Info", info_id);

    doc.compress();

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes)
        .map_err(|e| ThyraError::Rendering(format!("Failed to write PDF: {e}")))?;
    Ok(bytes)
}

fn real(value: f32) -> Object {
    Object::Real(value.into())
}

/// Literal string in WinAnsi; characters outside it are transliterated.
fn pdf_string(text: &str) -> Object {
    Object::String(to_win_ansi(text), StringFormat::Literal)
}

fn to_win_ansi(text: &str) -> Vec<u8> {
    let mut out = Vec::with_capacity(text.len());
    for c in text.chars() {
        match c {
            ' '..='~' => out.push(c as u8),
            '≥' => out.extend_from_slice(b">="),
            '≤' => out.extend_from_slice(b"<="),
            '–' | '—' => out.push(b'-'),
            '‘' | '’' => out.push(b'\''),
            '“' | '”' => out.push(b'"'),
            '×' => out.push(b'x'),
            '\u{a0}'..='\u{ff}' => out.push(c as u32 as u8),
            _ => out.push(b'?'),
        }
    }
    out
}

// ============================================================================
// Text metrics
// ============================================================================

/// Helvetica advance widths (1/1000 em) for ASCII 32..=126.
const HELVETICA_WIDTHS: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278, // ' '..'/'
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, // '0'..'9'
    278, 278, 584, 584, 584, 556, 1015, // ':'..'@'
    667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, // 'A'..'M'
    722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, // 'N'..'Z'
    278, 278, 278, 469, 556, 333, // '['..'`'
    556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, // 'a'..'m'
    556, 556, 556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, // 'n'..'z'
    334, 260, 334, 584, // '{'..'~'
];

/// Helvetica-Bold advance widths (1/1000 em) for ASCII 32..=126.
const HELVETICA_BOLD_WIDTHS: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278, // ' '..'/'
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, // '0'..'9'
    333, 333, 584, 584, 584, 611, 975, // ':'..'@'
    722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, // 'A'..'M'
    722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, // 'N'..'Z'
    333, 278, 333, 584, 556, 333, // '['..'`'
    556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, // 'a'..'m'
    611, 611, 611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, // 'n'..'z'
    389, 280, 389, 584, // '{'..'~'
];

/// Width of `text` in points. Bytes outside ASCII use the digit width.
fn text_width(text: &str, font: Font, size: f32) -> f32 {
    let table = match font {
        Font::Regular => &HELVETICA_WIDTHS,
        Font::Bold => &HELVETICA_BOLD_WIDTHS,
    };
    let units: u32 = to_win_ansi(text)
        .iter()
        .map(|&b| match b {
            32..=126 => u32::from(table[usize::from(b - 32)]),
            _ => 556,
        })
        .sum();
    units as f32 / 1000.0 * size
}

/// Greedy word wrap by measured width. Overlong words are split by character.
fn wrap_to_width(text: &str, font: Font, size: f32, max_width: f32) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        let candidate = if current.is_empty() {
            word.to_string()
        } else {
            format!("{current} {word}")
        };
        if text_width(&candidate, font, size) <= max_width {
            current = candidate;
            continue;
        }
        if !current.is_empty() {
            lines.push(std::mem::take(&mut current));
        }
        if text_width(word, font, size) <= max_width {
            current = word.to_string();
        } else {
            for c in word.chars() {
                let mut next = current.clone();
                next.push(c);
                if text_width(&next, font, size) > max_width && !current.is_empty() {
                    lines.push(std::mem::take(&mut current));
                    next = c.to_string();
                }
                current = next;
            }
        }
    }
    if !current.is_empty() || lines.is_empty() {
        lines.push(current);
    }
    lines
}
