//! PDF rendering of report documents
//!
//! Lays a [`ReportDocument`] out on A4 pages with printpdf. The built-in
//! Helvetica faces carry no glyph metrics, so line wrapping uses an average
//! glyph width estimate.

use crate::core::document::{Block, ReportDocument};
use crate::domain::errors::ReportError;
use crate::domain::result::Result;
use printpdf::image_crate::codecs::png::PngDecoder;
use printpdf::{
    BuiltinFont, Color, Image, ImageTransform, IndirectFontRef, Line, Mm, PdfDocument,
    PdfDocumentReference, PdfLayerReference, Point, Rect, Rgb,
};
use std::fs::File;
use std::path::{Path, PathBuf};

const PAGE_WIDTH_MM: f32 = 210.0;
const PAGE_HEIGHT_MM: f32 = 297.0;
const LEFT_MARGIN_MM: f32 = 15.0;
const RIGHT_MARGIN_MM: f32 = 15.0;
const TOP_MARGIN_MM: f32 = 10.0;
const PAGE_BREAK_MARGIN_MM: f32 = 20.0;
const CONTENT_WIDTH_MM: f32 = PAGE_WIDTH_MM - LEFT_MARGIN_MM - RIGHT_MARGIN_MM;
const CELL_PADDING_MM: f32 = 1.0;

const LOGO_X_MM: f32 = 10.0;
const LOGO_Y_MM: f32 = 10.0;
const LOGO_WIDTH_MM: f32 = 30.0;

const PT_TO_MM: f32 = 0.352_778;
const BULLET: &str = "*";

/// Heading band fill, light grey (211, 211, 211)
const HEADING_FILL: f32 = 211.0 / 255.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FontStyle {
    Regular,
    Bold,
    Italic,
}

impl FontStyle {
    /// Average glyph advance as a fraction of the font size
    fn average_advance(self) -> f32 {
        match self {
            FontStyle::Bold => 0.56,
            FontStyle::Regular | FontStyle::Italic => 0.5,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Align {
    Left,
    Center,
    Right,
}

/// Renders report documents to PDF bytes
#[derive(Debug, Clone, Default)]
pub struct PdfRenderer {
    logo_path: Option<PathBuf>,
}

impl PdfRenderer {
    pub fn new(logo_path: Option<PathBuf>) -> Self {
        Self { logo_path }
    }

    /// Renders `document` to an in-memory PDF
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::Render`] if fonts cannot be registered or the
    /// document cannot be serialized.
    pub fn render(&self, document: &ReportDocument) -> Result<Vec<u8>> {
        let (doc, page, layer) = PdfDocument::new(
            document.title.clone(),
            Mm(PAGE_WIDTH_MM),
            Mm(PAGE_HEIGHT_MM),
            "Page 1",
        );

        let fonts = Fonts {
            regular: doc
                .add_builtin_font(BuiltinFont::Helvetica)
                .map_err(render_error)?,
            bold: doc
                .add_builtin_font(BuiltinFont::HelveticaBold)
                .map_err(render_error)?,
            italic: doc
                .add_builtin_font(BuiltinFont::HelveticaOblique)
                .map_err(render_error)?,
        };
        let layer = doc.get_page(page).get_layer(layer);

        let mut canvas = Canvas {
            doc,
            layer,
            fonts,
            title: document.title.clone(),
            page_number: 1,
            y: TOP_MARGIN_MM,
        };

        let logo = self.logo_path.as_deref().and_then(load_logo);
        canvas.header(logo);
        for block in &document.blocks {
            canvas.block(block);
        }

        tracing::debug!(
            pages = canvas.page_number,
            blocks = document.blocks.len(),
            "Document rendered"
        );

        canvas.doc.save_to_bytes().map_err(render_error)
    }
}

fn render_error(err: impl std::fmt::Display) -> ReportError {
    ReportError::Render(err.to_string())
}

fn load_logo(path: &Path) -> Option<Image> {
    if !path.exists() {
        tracing::warn!(path = %path.display(), "Logo file not found");
        return None;
    }

    let decoded = File::open(path)
        .map_err(|e| e.to_string())
        .and_then(|mut file| {
            let decoder = PngDecoder::new(&mut file).map_err(|e| e.to_string())?;
            Image::try_from(decoder).map_err(|e| e.to_string())
        });

    match decoded {
        Ok(image) => Some(image),
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "Failed to decode logo");
            None
        }
    }
}

struct Fonts {
    regular: IndirectFontRef,
    bold: IndirectFontRef,
    italic: IndirectFontRef,
}

/// Page cursor; `y` is measured from the top edge in millimetres
struct Canvas {
    doc: PdfDocumentReference,
    layer: PdfLayerReference,
    fonts: Fonts,
    title: String,
    page_number: usize,
    y: f32,
}

impl Canvas {
    fn font(&self, style: FontStyle) -> &IndirectFontRef {
        match style {
            FontStyle::Regular => &self.fonts.regular,
            FontStyle::Bold => &self.fonts.bold,
            FontStyle::Italic => &self.fonts.italic,
        }
    }

    /// First page: logo and centered title. Later pages: a blank band.
    fn header(&mut self, logo: Option<Image>) {
        if self.page_number == 1 {
            if let Some(logo) = logo {
                let width_px = logo.image.width.0 as f32;
                let height_px = logo.image.height.0 as f32;
                let dpi = width_px * 25.4 / LOGO_WIDTH_MM;
                let height_mm = height_px * 25.4 / dpi;
                logo.add_to_layer(
                    self.layer.clone(),
                    ImageTransform {
                        translate_x: Some(Mm(LOGO_X_MM)),
                        translate_y: Some(Mm(PAGE_HEIGHT_MM - LOGO_Y_MM - height_mm)),
                        dpi: Some(dpi),
                        ..Default::default()
                    },
                );
            }
            self.cell(
                &self.title,
                FontStyle::Bold,
                12.0,
                Align::Center,
                CONTENT_WIDTH_MM,
                10.0,
            );
        }
        self.y += 10.0;
    }

    fn new_page(&mut self) {
        self.page_number += 1;
        let (page, layer) = self.doc.add_page(
            Mm(PAGE_WIDTH_MM),
            Mm(PAGE_HEIGHT_MM),
            format!("Page {}", self.page_number),
        );
        self.layer = self.doc.get_page(page).get_layer(layer);
        self.y = TOP_MARGIN_MM;
        self.header(None);
    }

    fn ensure_space(&mut self, height: f32) {
        if self.y + height > PAGE_HEIGHT_MM - PAGE_BREAK_MARGIN_MM {
            self.new_page();
        }
    }

    fn block(&mut self, block: &Block) {
        match block {
            Block::GeneratedVersion(version) => {
                self.line(
                    &format!("Generated Version: {version}"),
                    FontStyle::Italic,
                    10.0,
                    Align::Right,
                    10.0,
                );
                self.y += 5.0;
            }
            Block::PatientInfo(fields) => {
                for (label, value) in fields {
                    self.line(
                        &format!("{label}: {value}"),
                        FontStyle::Regular,
                        10.0,
                        Align::Left,
                        8.0,
                    );
                }
            }
            Block::StyledHeading(text) => self.styled_heading(text),
            Block::Title(text) => {
                self.line(text, FontStyle::Bold, 13.0, Align::Left, 10.0);
                self.y += 1.0;
            }
            Block::Paragraph(text) => {
                self.multi_line(text, FontStyle::Regular, 10.0, 5.0);
                self.y += 5.0;
            }
            Block::BulletList(items) => {
                for item in items {
                    self.multi_line(&format!("{BULLET} {item}"), FontStyle::Regular, 10.0, 5.0);
                }
                self.y += 2.0;
            }
            Block::Table {
                headers,
                widths_mm,
                rows,
            } => self.table(headers, widths_mm, rows),
        }
    }

    fn styled_heading(&mut self, text: &str) {
        self.ensure_space(13.0);

        let top = self.y;
        self.layer.set_fill_color(Color::Rgb(Rgb::new(
            HEADING_FILL,
            HEADING_FILL,
            HEADING_FILL,
            None,
        )));
        self.layer.add_rect(Rect::new(
            Mm(LEFT_MARGIN_MM),
            Mm(PAGE_HEIGHT_MM - top - 10.0),
            Mm(LEFT_MARGIN_MM + CONTENT_WIDTH_MM),
            Mm(PAGE_HEIGHT_MM - top),
        ));
        self.layer.set_fill_color(black());

        self.y = top + 2.0;
        self.cell(
            text,
            FontStyle::Bold,
            12.0,
            Align::Left,
            CONTENT_WIDTH_MM,
            6.0,
        );
        self.y = top + 13.0;
    }

    fn table(&mut self, headers: &[String], widths: &[f32], rows: &[Vec<String>]) {
        self.ensure_space(10.0);
        self.table_row(headers, widths, FontStyle::Bold, 10.0);
        self.y += 10.0;

        for row in rows {
            self.ensure_space(10.0);
            self.table_row(row, widths, FontStyle::Regular, 8.0);
            self.y += 15.0;
        }
    }

    fn table_row(&self, cells: &[String], widths: &[f32], style: FontStyle, size_pt: f32) {
        let mut x = LEFT_MARGIN_MM;
        for (text, width) in cells.iter().zip(widths) {
            self.border(x, self.y, *width, 10.0);
            self.text_at(text, style, size_pt, Align::Center, x, *width, 10.0);
            x += width;
        }
    }

    /// A single-line cell spanning the content width, then a line break
    fn line(&mut self, text: &str, style: FontStyle, size_pt: f32, align: Align, height: f32) {
        self.ensure_space(height);
        self.cell(text, style, size_pt, align, CONTENT_WIDTH_MM, height);
        self.y += height;
    }

    /// Wrapped text, one `line_height` per line
    fn multi_line(&mut self, text: &str, style: FontStyle, size_pt: f32, line_height: f32) {
        let max_width = CONTENT_WIDTH_MM - 2.0 * CELL_PADDING_MM;
        for line in wrap_text(text, max_width, size_pt, style) {
            self.ensure_space(line_height);
            self.cell(
                &line,
                style,
                size_pt,
                Align::Left,
                CONTENT_WIDTH_MM,
                line_height,
            );
            self.y += line_height;
        }
    }

    /// Draws text in a cell at the current `y` without moving the cursor
    fn cell(
        &self,
        text: &str,
        style: FontStyle,
        size_pt: f32,
        align: Align,
        width: f32,
        height: f32,
    ) {
        self.text_at(text, style, size_pt, align, LEFT_MARGIN_MM, width, height);
    }

    #[allow(clippy::too_many_arguments)]
    fn text_at(
        &self,
        text: &str,
        style: FontStyle,
        size_pt: f32,
        align: Align,
        x: f32,
        width: f32,
        height: f32,
    ) {
        if text.is_empty() {
            return;
        }

        let text_width = text_width_mm(text, size_pt, style);
        let left = match align {
            Align::Left => x + CELL_PADDING_MM,
            Align::Center => x + (width - text_width) / 2.0,
            Align::Right => x + width - CELL_PADDING_MM - text_width,
        };
        // Baseline sits a third of the font size below the vertical centre
        let baseline = self.y + height / 2.0 + size_pt * PT_TO_MM * 0.35;

        self.layer.use_text(
            text,
            size_pt,
            Mm(left),
            Mm(PAGE_HEIGHT_MM - baseline),
            self.font(style),
        );
    }

    fn border(&self, x: f32, y: f32, width: f32, height: f32) {
        let top = PAGE_HEIGHT_MM - y;
        let bottom = top - height;
        self.layer.set_outline_color(black());
        self.layer.set_outline_thickness(0.5);
        self.layer.add_line(Line {
            points: vec![
                (Point::new(Mm(x), Mm(top)), false),
                (Point::new(Mm(x + width), Mm(top)), false),
                (Point::new(Mm(x + width), Mm(bottom)), false),
                (Point::new(Mm(x), Mm(bottom)), false),
            ],
            is_closed: true,
        });
    }
}

fn black() -> Color {
    Color::Rgb(Rgb::new(0.0, 0.0, 0.0, None))
}

/// Estimated rendered width of `text` in millimetres
fn text_width_mm(text: &str, size_pt: f32, style: FontStyle) -> f32 {
    text.chars().count() as f32 * size_pt * PT_TO_MM * style.average_advance()
}

/// Greedy word wrap; explicit newlines start a new line and over-long words
/// are split
fn wrap_text(text: &str, max_width_mm: f32, size_pt: f32, style: FontStyle) -> Vec<String> {
    let char_width = size_pt * PT_TO_MM * style.average_advance();
    let max_chars = ((max_width_mm / char_width).floor() as usize).max(1);

    let mut lines = Vec::new();
    for paragraph in text.split('\n') {
        let mut current = String::new();
        for word in paragraph.split_whitespace() {
            let word_len = word.chars().count();
            let current_len = current.chars().count();

            if current_len > 0 && current_len + 1 + word_len <= max_chars {
                current.push(' ');
                current.push_str(word);
                continue;
            }
            if current_len > 0 {
                lines.push(std::mem::take(&mut current));
            }

            if word_len <= max_chars {
                current.push_str(word);
            } else {
                let chars: Vec<char> = word.chars().collect();
                let mut chunks = chars.chunks(max_chars).peekable();
                while let Some(chunk) = chunks.next() {
                    let piece: String = chunk.iter().collect();
                    if chunks.peek().is_some() {
                        lines.push(piece);
                    } else {
                        current = piece;
                    }
                }
            }
        }
        lines.push(current);
    }
    lines
}
