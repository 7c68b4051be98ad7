//! A4 PDF page device built on `lopdf`.
//!
//! Lines are laid out top to bottom with fixed heights per style. When the
//! next line would cross the bottom break margin the device closes the page
//! (stamping its footer) and opens a new one with the page title.
use super::winansi;
use super::{LineStyle, PageDevice};
use anyhow::{anyhow, Result};
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Dictionary, Document, Object, StringFormat, Stream};

const MM: f32 = 72.0 / 25.4;
const PAGE_WIDTH: f32 = 210.0 * MM;
const PAGE_HEIGHT: f32 = 297.0 * MM;
const MARGIN: f32 = 10.0 * MM;
const CELL_PADDING: f32 = 1.0 * MM;
const BREAK_MARGIN: f32 = 20.0 * MM;
const TITLE_HEIGHT: f32 = 10.0 * MM;
const FOOTER_OFFSET: f32 = 15.0 * MM;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Face {
    Regular,
    Bold,
    Italic,
}

impl Face {
    const ALL: [Face; 3] = [Face::Regular, Face::Bold, Face::Italic];

    fn resource(self) -> &'static str {
        match self {
            Face::Regular => "F1",
            Face::Bold => "F2",
            Face::Italic => "F3",
        }
    }

    fn base_font(self) -> &'static str {
        match self {
            Face::Regular => "Helvetica",
            Face::Bold => "Helvetica-Bold",
            Face::Italic => "Helvetica-Oblique",
        }
    }
}

struct LineMetrics {
    face: Face,
    size: f32,
    height: f32,
    gap_after: f32,
}

fn metrics(style: LineStyle) -> LineMetrics {
    let (face, size, height, gap_after) = match style {
        LineStyle::Section => (Face::Bold, 14.0, 10.0, 2.0),
        LineStyle::SubSection => (Face::Bold, 12.0, 10.0, 2.0),
        LineStyle::Entry => (Face::Regular, 12.0, 10.0, 0.0),
        LineStyle::Detail => (Face::Italic, 10.0, 10.0, 1.0),
    };
    LineMetrics {
        face,
        size,
        height: height * MM,
        gap_after: gap_after * MM,
    }
}

/// Page decoration settings.
#[derive(Debug, Clone)]
pub struct PdfOptions {
    /// Centred at the top of every page.
    pub title: String,
}

impl Default for PdfOptions {
    fn default() -> Self {
        Self {
            title: "Wine Menu".to_string(),
        }
    }
}

pub struct PdfDevice {
    options: PdfOptions,
    finished: Vec<Vec<Operation>>,
    current: Option<Vec<Operation>>,
    /// Distance from the top edge to the next free line, in points.
    y: f32,
}

impl PdfDevice {
    pub fn new(options: PdfOptions) -> Self {
        Self {
            options,
            finished: Vec::new(),
            current: None,
            y: MARGIN,
        }
    }

    fn close_page(&mut self) {
        let Some(mut ops) = self.current.take() else {
            return;
        };
        let number = self.finished.len() + 1;
        let footer = format!("Page {number}");
        let top = PAGE_HEIGHT - FOOTER_OFFSET;
        ops.extend(centered_text(Face::Italic, 8.0, top, TITLE_HEIGHT, &footer));
        self.finished.push(ops);
    }

    fn ensure_room(&mut self, height: f32) -> Result<()> {
        if self.current.is_none() || self.y + height > PAGE_HEIGHT - BREAK_MARGIN {
            self.start_page()?;
        }
        Ok(())
    }
}

impl PageDevice for PdfDevice {
    fn start_page(&mut self) -> Result<()> {
        self.close_page();
        let mut ops = Vec::new();
        ops.extend(centered_text(
            Face::Bold,
            12.0,
            MARGIN,
            TITLE_HEIGHT,
            &self.options.title,
        ));
        self.current = Some(ops);
        self.y = MARGIN + TITLE_HEIGHT;
        Ok(())
    }

    fn write_line(&mut self, style: LineStyle, text: &str) -> Result<()> {
        let line = metrics(style);
        self.ensure_room(line.height)?;
        let ops = self
            .current
            .as_mut()
            .ok_or_else(|| anyhow!("no open page for menu line"))?;
        let y = baseline(self.y, line.height, line.size);
        ops.extend(text_ops(
            line.face,
            line.size,
            MARGIN + CELL_PADDING,
            y,
            winansi::encode(text),
        ));
        self.y += line.height + line.gap_after;
        Ok(())
    }

    fn page_count(&self) -> usize {
        self.finished.len() + usize::from(self.current.is_some())
    }

    fn finish(mut self) -> Result<Vec<u8>> {
        if self.current.is_none() && self.finished.is_empty() {
            self.start_page()?;
        }
        self.close_page();
        build_document(self.finished)
    }
}

/// Baseline (from the bottom edge) of text vertically centred in a cell.
fn baseline(top: f32, height: f32, size: f32) -> f32 {
    PAGE_HEIGHT - (top + height / 2.0 + 0.3 * size)
}

fn centered_text(face: Face, size: f32, top: f32, height: f32, text: &str) -> Vec<Operation> {
    let encoded = winansi::encode(text);
    let width = winansi::text_width(&encoded, face == Face::Bold, size);
    let x = ((PAGE_WIDTH - width) / 2.0).max(MARGIN);
    text_ops(face, size, x, baseline(top, height, size), encoded)
}

fn text_ops(face: Face, size: f32, x: f32, y: f32, encoded: Vec<u8>) -> Vec<Operation> {
    vec![
        Operation::new("BT", vec![]),
        Operation::new("Tf", vec![face.resource().into(), size.into()]),
        Operation::new("Td", vec![x.into(), y.into()]),
        Operation::new("Tj", vec![Object::String(encoded, StringFormat::Literal)]),
        Operation::new("ET", vec![]),
    ]
}

fn build_document(pages: Vec<Vec<Operation>>) -> Result<Vec<u8>> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let mut fonts = Dictionary::new();
    for face in Face::ALL {
        let font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => face.base_font(),
            "Encoding" => "WinAnsiEncoding",
        });
        fonts.set(face.resource(), font_id);
    }
    let resources_id = doc.add_object(dictionary! { "Font" => fonts });

    let mut kids: Vec<Object> = Vec::with_capacity(pages.len());
    for operations in pages {
        let content = Content { operations }
            .encode()
            .map_err(|err| anyhow!("encode page content: {err}"))?;
        let content_id = doc.add_object(Stream::new(dictionary! {}, content));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        kids.push(page_id.into());
    }

    let count = kids.len() as i64;
    let media_box: Vec<Object> = vec![
        0.0_f32.into(),
        0.0_f32.into(),
        PAGE_WIDTH.into(),
        PAGE_HEIGHT.into(),
    ];
    let pages_dict = dictionary! {
        "Type" => "Pages",
        "Kids" => kids,
        "Count" => count,
        "Resources" => resources_id,
        "MediaBox" => media_box,
    };
    doc.objects.insert(pages_id, Object::Dictionary(pages_dict));
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes)
        .map_err(|err| anyhow!("serialize menu document: {err}"))?;
    Ok(bytes)
}
