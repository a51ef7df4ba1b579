//! A4 rendering of [`BiodataDocument`] with printpdf.

use std::io::Cursor;

use printpdf::image_crate::codecs::jpeg::JpegDecoder;
use printpdf::image_crate::codecs::png::PngDecoder;
use printpdf::path::PaintMode;
use printpdf::{
    BuiltinFont, Color, Image, ImageTransform, IndirectFontRef, Mm,
    PdfDocument, PdfDocumentReference, PdfLayerReference, Rect, Rgb,
};
use tracing::{debug, warn};

use super::layout::{BiodataDocument, Block, DocumentSection, PhotoRegion, PHOTO_ERROR};
use super::RenderError;
use crate::workflows::biodata::photo::DecodedPhoto;

const PAGE_WIDTH: f32 = 210.0;
const PAGE_HEIGHT: f32 = 297.0;
const MARGIN: f32 = 14.0;
const BOTTOM_LIMIT: f32 = 277.0;
const LINE_HEIGHT: f32 = 6.0;
const WRAPPED_LINE: f32 = 4.5;
const CELL_PADDING: f32 = 1.5;
const TABLE_FONT_SIZE: f32 = 9.0;
const LABEL_WIDTH: f32 = 50.0;
const PHOTO_X: f32 = 15.0;
const PHOTO_Y: f32 = 40.0;
const PHOTO_WIDTH: f32 = 30.0;
const PHOTO_HEIGHT: f32 = 40.0;
const IMAGE_DPI: f32 = 300.0;
const PT_TO_MM: f32 = 0.3528;

/// Section banner colour.
const HEADING_FILL: (u8, u8, u8) = (0, 61, 121);
const TABLE_HEAD_FILL: (u8, u8, u8) = (220, 220, 220);

/// Turns a laid-out biodata document into PDF bytes.
pub trait PdfRenderer: Send + Sync {
    fn render(&self, document: &BiodataDocument) -> Result<Vec<u8>, RenderError>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct PrintPdfRenderer;

impl PdfRenderer for PrintPdfRenderer {
    fn render(&self, document: &BiodataDocument) -> Result<Vec<u8>, RenderError> {
        let canvas = draw(document)?;
        debug!(pages = canvas.pages, "biodata pdf rendered");
        Ok(canvas.doc.save_to_bytes()?)
    }
}

fn draw(document: &BiodataDocument) -> Result<Canvas, RenderError> {
    let (doc, page, layer) =
        PdfDocument::new(document.title, Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "Halaman 1");
    let regular = doc.add_builtin_font(BuiltinFont::Helvetica)?;
    let bold = doc.add_builtin_font(BuiltinFont::HelveticaBold)?;
    let layer = doc.get_page(page).get_layer(layer);

    let mut canvas = Canvas {
        doc,
        layer,
        regular,
        bold,
        cursor: 0.0,
        pages: 1,
    };
    canvas.header(document);
    canvas.photo(&document.photo);
    let position = wrap(&document.applied_position, 10.0, PAGE_WIDTH - MARGIN - 50.0);
    canvas.lines(&position, 10.0, 50.0, 45.0, false);

    canvas.cursor = 90.0;
    for section in &document.sections {
        canvas.section(section);
    }
    Ok(canvas)
}

fn rgb((r, g, b): (u8, u8, u8)) -> Color {
    Color::Rgb(Rgb::new(
        f32::from(r) / 255.0,
        f32::from(g) / 255.0,
        f32::from(b) / 255.0,
        None,
    ))
}

/// Rough Helvetica advance width; builtin fonts carry no metrics here.
fn text_width(text: &str, size: f32) -> f32 {
    text.chars().count() as f32 * size * PT_TO_MM * 0.5
}

/// Greedy word wrap on the estimated advance width. Words wider than the column are split.
fn wrap(text: &str, size: f32, width: f32) -> Vec<String> {
    let max_chars = (width / (size * PT_TO_MM * 0.5)).floor().max(1.0) as usize;
    let mut lines = Vec::new();
    let mut line = String::new();

    for word in text.split_whitespace() {
        let mut chars: Vec<char> = word.chars().collect();
        while chars.len() > max_chars {
            if !line.is_empty() {
                lines.push(std::mem::take(&mut line));
            }
            lines.push(chars.drain(..max_chars).collect());
        }

        let line_len = line.chars().count();
        if line_len > 0 && line_len + 1 + chars.len() > max_chars {
            lines.push(std::mem::take(&mut line));
        }
        if !line.is_empty() {
            line.push(' ');
        }
        line.extend(chars);
    }

    if !line.is_empty() || lines.is_empty() {
        lines.push(line);
    }
    lines
}

fn wrap_cells(cells: &[String], column_width: f32) -> Vec<Vec<String>> {
    cells
        .iter()
        .map(|cell| wrap(cell, TABLE_FONT_SIZE, column_width - 3.0))
        .collect()
}

/// Row height for the tallest wrapped cell; a single line keeps [`LINE_HEIGHT`].
fn row_height(lines: usize) -> f32 {
    (lines.max(1) as f32 * WRAPPED_LINE + CELL_PADDING).max(LINE_HEIGHT)
}

fn cells_height(cells: &[Vec<String>]) -> f32 {
    row_height(cells.iter().map(Vec::len).max().unwrap_or(1))
}

/// Drawing state; coordinates are millimetres from the top-left corner.
struct Canvas {
    doc: PdfDocumentReference,
    layer: PdfLayerReference,
    regular: IndirectFontRef,
    bold: IndirectFontRef,
    cursor: f32,
    pages: usize,
}

impl Canvas {
    fn text(&self, text: &str, size: f32, x: f32, top: f32, bold: bool) {
        let font = if bold { &self.bold } else { &self.regular };
        self.layer
            .use_text(text, size, Mm(x), Mm(PAGE_HEIGHT - top), font);
    }

    fn rect(&self, x: f32, top: f32, width: f32, height: f32, mode: PaintMode) {
        let rect = Rect::new(
            Mm(x),
            Mm(PAGE_HEIGHT - top - height),
            Mm(x + width),
            Mm(PAGE_HEIGHT - top),
        )
        .with_mode(mode);
        self.layer.add_rect(rect);
    }

    fn ensure_room(&mut self, needed: f32) {
        if self.cursor + needed <= BOTTOM_LIMIT {
            return;
        }
        self.pages += 1;
        let (page, layer) = self.doc.add_page(
            Mm(PAGE_WIDTH),
            Mm(PAGE_HEIGHT),
            format!("Halaman {}", self.pages),
        );
        self.layer = self.doc.get_page(page).get_layer(layer);
        self.cursor = 20.0;
    }

    fn header(&self, document: &BiodataDocument) {
        let title_x = (PAGE_WIDTH - text_width(document.title, 14.0)) / 2.0;
        self.text(document.title, 14.0, title_x, 20.0, true);
        let subtitle_x = (PAGE_WIDTH - text_width(document.subtitle, 10.0)) / 2.0;
        self.text(document.subtitle, 10.0, subtitle_x, 26.0, false);
    }

    fn photo(&self, region: &PhotoRegion) {
        match region {
            PhotoRegion::Image(photo) => match embed(photo) {
                Ok(image) => self.place_image(image),
                Err(err) => {
                    warn!(error = %err, "photo could not be embedded; drawing placeholder");
                    self.photo_box(PHOTO_ERROR);
                }
            },
            PhotoRegion::Placeholder(caption) | PhotoRegion::Failed(caption) => {
                self.photo_box(caption)
            }
        }
    }

    fn photo_box(&self, caption: &str) {
        self.layer.set_outline_color(rgb((0, 0, 0)));
        self.layer.set_outline_thickness(0.5);
        self.rect(PHOTO_X, PHOTO_Y, PHOTO_WIDTH, PHOTO_HEIGHT, PaintMode::Stroke);
        self.text(caption, 10.0, PHOTO_X + 2.0, PHOTO_Y + 20.0, false);
    }

    fn place_image(&self, image: Image) {
        let native_width = image.image.width.0 as f32 * 25.4 / IMAGE_DPI;
        let native_height = image.image.height.0 as f32 * 25.4 / IMAGE_DPI;
        let transform = ImageTransform {
            translate_x: Some(Mm(PHOTO_X)),
            translate_y: Some(Mm(PAGE_HEIGHT - PHOTO_Y - PHOTO_HEIGHT)),
            scale_x: Some(PHOTO_WIDTH / native_width.max(f32::EPSILON)),
            scale_y: Some(PHOTO_HEIGHT / native_height.max(f32::EPSILON)),
            dpi: Some(IMAGE_DPI),
            ..Default::default()
        };
        image.add_to_layer(self.layer.clone(), transform);
    }

    fn section(&mut self, section: &DocumentSection) {
        self.ensure_room(12.0 + LINE_HEIGHT);
        self.layer.set_fill_color(rgb(HEADING_FILL));
        self.rect(MARGIN, self.cursor, PAGE_WIDTH - 2.0 * MARGIN, 8.0, PaintMode::Fill);
        self.layer.set_fill_color(rgb((255, 255, 255)));
        self.text(&section.heading, 11.0, MARGIN + 2.0, self.cursor + 5.5, true);
        self.layer.set_fill_color(rgb((0, 0, 0)));
        self.cursor += 12.0;

        for block in &section.blocks {
            match block {
                Block::KeyValue(pairs) => self.key_values(pairs),
                Block::Table { head, rows } => self.table(head, rows),
            }
            self.cursor += 2.0;
        }
        self.cursor += 4.0;
    }

    fn lines(&self, lines: &[String], size: f32, x: f32, top: f32, bold: bool) {
        for (index, line) in lines.iter().enumerate() {
            self.text(line, size, x, top + index as f32 * WRAPPED_LINE, bold);
        }
    }

    fn key_values(&mut self, pairs: &[(String, String)]) {
        let value_width = PAGE_WIDTH - 2.0 * MARGIN - LABEL_WIDTH - 2.0;
        for (label, value) in pairs {
            let labels = wrap(label, 10.0, LABEL_WIDTH - 2.0);
            let values = wrap(value, 10.0, value_width);
            let height = row_height(labels.len().max(values.len()));

            self.ensure_room(height);
            let baseline = self.cursor + 4.5;
            self.lines(&labels, 10.0, MARGIN + 2.0, baseline, true);
            self.lines(&values, 10.0, MARGIN + 2.0 + LABEL_WIDTH, baseline, false);
            self.cursor += height;
        }
    }

    fn table(&mut self, head: &[String], rows: &[Vec<String>]) {
        let columns = head.len().max(1);
        let column_width = (PAGE_WIDTH - 2.0 * MARGIN) / columns as f32;
        let head = wrap_cells(head, column_width);

        self.table_head(&head, column_width);
        for row in rows {
            let cells = wrap_cells(row, column_width);
            let height = cells_height(&cells);
            if self.cursor + height > BOTTOM_LIMIT {
                self.ensure_room(height);
                self.table_head(&head, column_width);
            }
            self.row(&cells, column_width, height, false);
        }
    }

    fn table_head(&mut self, head: &[Vec<String>], column_width: f32) {
        let height = cells_height(head);
        self.ensure_room(height + LINE_HEIGHT);
        self.layer.set_fill_color(rgb(TABLE_HEAD_FILL));
        self.rect(
            MARGIN,
            self.cursor,
            PAGE_WIDTH - 2.0 * MARGIN,
            height,
            PaintMode::Fill,
        );
        self.layer.set_fill_color(rgb((0, 0, 0)));
        self.row(head, column_width, height, true);
    }

    fn row(&mut self, cells: &[Vec<String>], column_width: f32, height: f32, bold: bool) {
        let baseline = self.cursor + 4.3;
        for (index, lines) in cells.iter().enumerate() {
            let x = MARGIN + 1.5 + index as f32 * column_width;
            self.lines(lines, TABLE_FONT_SIZE, x, baseline, bold);
        }
        self.cursor += height;
    }
}

fn embed(photo: &DecodedPhoto) -> Result<Image, printpdf::image_crate::ImageError> {
    let reader = Cursor::new(photo.bytes.as_slice());
    if photo.is_jpeg() {
        Image::try_from(JpegDecoder::new(reader)?)
    } else {
        Image::try_from(PngDecoder::new(reader)?)
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::workflows::biodata::domain::{Application, WorkExperience};
    use crate::workflows::biodata::export::biodata_document;
    use crate::workflows::biodata::photo::PhotoPayload;

    const ADDRESS: &str =
        "Jl. Kaliurang Km 5 No. 12, Perumahan Griya Asri Blok C-17, Sleman, Yogyakarta 55281";

    /// 1x1 RGB PNG.
    const PIXEL_PNG: [u8; 69] = [
        0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0x00, 0x00, 0x00, 0x0D, 0x49, 0x48, 0x44,
        0x52, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x01, 0x08, 0x02, 0x00, 0x00, 0x00, 0x90,
        0x77, 0x53, 0xDE, 0x00, 0x00, 0x00, 0x0C, 0x49, 0x44, 0x41, 0x54, 0x78, 0x9C, 0x63, 0x38,
        0x61, 0x64, 0x04, 0x00, 0x02, 0xF2, 0x01, 0x2D, 0xAC, 0x6A, 0x27, 0xEB, 0x00, 0x00, 0x00,
        0x00, 0x49, 0x45, 0x4E, 0x44, 0xAE, 0x42, 0x60, 0x82,
    ];

    fn application() -> Application {
        let mut application =
            Application::initial(NaiveDate::from_ymd_opt(2026, 10, 18).expect("valid date"));
        application.applied_position = "Staff Administrasi".to_string();
        application.personal.full_name = "Rina Kartika Sari".to_string();
        application
    }

    #[test]
    fn long_values_wrap_without_losing_words() {
        let width = PAGE_WIDTH - 2.0 * MARGIN - LABEL_WIDTH - 2.0;
        let lines = wrap(ADDRESS, 10.0, width);

        assert!(lines.len() > 1, "expected a wrapped address, got {lines:?}");
        assert_eq!(lines.join(" "), ADDRESS);
        assert!(lines.iter().all(|line| text_width(line, 10.0) <= width));
    }

    #[test]
    fn unbroken_words_are_split_across_lines() {
        let word = "x".repeat(30);
        let lines = wrap(&word, 9.0, 20.0);

        assert_eq!(lines.len(), 3);
        assert_eq!(lines.concat(), word);
        assert_eq!(wrap("", 9.0, 20.0), vec![String::new()]);
    }

    #[test]
    fn wrapped_values_push_the_cursor_down() {
        let mut short = application();
        short.personal.address = "Jl. Kaliurang".to_string();
        let mut long = application();
        long.personal.address = ADDRESS.to_string();

        let short = draw(&biodata_document(&short)).expect("short document draws");
        let long = draw(&biodata_document(&long)).expect("long document draws");

        assert!((long.pages, long.cursor) > (short.pages, short.cursor));
    }

    #[test]
    fn long_work_history_continues_on_new_pages() {
        let mut application = application();
        application.work_experience = (0..60)
            .map(|index| WorkExperience {
                from: "2015".to_string(),
                to: "2016".to_string(),
                company_info: format!("PT Contoh Sejahtera {index}, Jakarta Selatan"),
                position_status: "Staff".to_string(),
                reason_for_leaving: "Kontrak selesai".to_string(),
                ..WorkExperience::blank()
            })
            .collect();

        let document = biodata_document(&application);
        let canvas = draw(&document).expect("document draws");
        assert!(canvas.pages >= 2, "expected a page break, got {} page(s)", canvas.pages);

        let bytes = PrintPdfRenderer.render(&document).expect("pdf renders");
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn decodable_photo_is_embedded() {
        let payload = PhotoPayload::from_image_bytes(&PIXEL_PNG).expect("png payload");
        let photo = payload.decode().expect("png decodes");
        embed(&photo).expect("png embeds");

        let mut application = application();
        application.photo = Some(payload);
        let document = biodata_document(&application);
        assert!(matches!(document.photo, PhotoRegion::Image(_)));

        let bytes = PrintPdfRenderer.render(&document).expect("pdf renders");
        assert!(bytes.starts_with(b"%PDF"));
    }
}
