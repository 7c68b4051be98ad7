//! Menu layout driven over a page device.
//!
//! The renderer walks the ordered records once and decides which headers to
//! emit; the device owns fonts, geometry, and page breaks. Headers repeat
//! only when the grouping key changes, never because a page ended.

use crate::model::WineRecord;
use anyhow::Result;
use serde::Serialize;

pub mod pdf;
mod winansi;

pub use pdf::{PdfDevice, PdfOptions};

/// Visual role of a line handed to the device.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineStyle {
    /// Style heading, e.g. "Red".
    Section,
    /// Country and region heading.
    SubSection,
    /// Producer, title, and vintage.
    Entry,
    /// Price, stock, and grape.
    Detail,
}

/// Drawing surface the renderer writes to.
///
/// Implementations advance to a new page on their own when a line does not
/// fit on the current one.
pub trait PageDevice {
    fn start_page(&mut self) -> Result<()>;
    fn write_line(&mut self, style: LineStyle, text: &str) -> Result<()>;
    fn page_count(&self) -> usize;
    fn finish(self) -> Result<Vec<u8>>
    where
        Self: Sized;
}

/// Headers most recently emitted during a render pass.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
struct RenderCursor {
    style: Option<String>,
    country: Option<String>,
    region: Option<String>,
}

impl RenderCursor {
    fn style_changed(&self, record: &WineRecord) -> bool {
        self.style.as_deref() != Some(record.style.as_str())
    }

    fn place_changed(&self, record: &WineRecord) -> bool {
        self.country.as_deref() != Some(record.country.as_str())
            || self.region.as_deref() != Some(record.region.as_str())
    }

    fn enter_style(&mut self, record: &WineRecord) {
        self.style = Some(record.style.clone());
        self.country = None;
        self.region = None;
    }

    fn enter_place(&mut self, record: &WineRecord) {
        self.country = Some(record.country.clone());
        self.region = Some(record.region.clone());
    }
}

/// Counts reported after a render pass.
#[derive(Debug, Default, Clone, Serialize, PartialEq, Eq)]
pub struct RenderSummary {
    pub records: usize,
    pub sections: usize,
    pub sub_sections: usize,
    pub pages: usize,
}

/// Finished document bytes plus what went into them.
pub struct RenderedMenu {
    pub bytes: Vec<u8>,
    pub summary: RenderSummary,
}

/// Display options for record bodies.
#[derive(Debug, Default, Clone)]
pub struct BodyOptions {
    /// Appended after the price, e.g. "NOK".
    pub currency: Option<String>,
}

pub struct MenuRenderer<D> {
    device: D,
    cursor: RenderCursor,
    body: BodyOptions,
    summary: RenderSummary,
}

impl<D: PageDevice> MenuRenderer<D> {
    pub fn new(device: D, body: BodyOptions) -> Self {
        Self {
            device,
            cursor: RenderCursor::default(),
            body,
            summary: RenderSummary::default(),
        }
    }

    /// Render `records` in the given order and finalize the document.
    ///
    /// Input is assumed validated and ordered; only device failures surface.
    pub fn render(mut self, records: &[WineRecord]) -> Result<RenderedMenu> {
        self.cursor = RenderCursor::default();
        self.device.start_page()?;
        for record in records {
            self.add_record(record)?;
        }
        self.summary.pages = self.device.page_count();
        let summary = self.summary;
        let bytes = self.device.finish()?;
        tracing::info!(
            records = summary.records,
            sections = summary.sections,
            sub_sections = summary.sub_sections,
            pages = summary.pages,
            "menu rendered"
        );
        Ok(RenderedMenu { bytes, summary })
    }

    fn add_record(&mut self, record: &WineRecord) -> Result<()> {
        if self.cursor.style_changed(record) {
            self.device.write_line(LineStyle::Section, &record.style)?;
            self.cursor.enter_style(record);
            self.summary.sections += 1;
        }
        if self.cursor.place_changed(record) {
            let place = format!("{} \u{2014} {}", record.country, record.region);
            self.device.write_line(LineStyle::SubSection, &place)?;
            self.cursor.enter_place(record);
            self.summary.sub_sections += 1;
        }
        let detail = self.detail_line(record);
        self.device.write_line(LineStyle::Entry, &record.headline())?;
        self.device.write_line(LineStyle::Detail, &detail)?;
        self.summary.records += 1;
        Ok(())
    }

    fn detail_line(&self, record: &WineRecord) -> String {
        let price = match &self.body.currency {
            Some(currency) if !record.purchase_price.is_empty() => {
                format!("{} {}", record.purchase_price, currency)
            }
            _ => record.purchase_price.clone(),
        };
        format!(
            "Price: {} | Stock: {} | Grape: {}",
            price, record.stock, record.main_grape
        )
    }
}

#[cfg(test)]
#[path = "render_tests.rs"]
mod tests;
