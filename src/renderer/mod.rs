//! Sheet renderer: draws a parsed LeadSheet onto SVG pages.
//!
//! [`SvgSurface`] is a [`Surface`] backed by an SVG document. Pages are
//! stacked vertically in one SVG, each `page_height` tall, and a new page
//! starts after the configured number of staff rows.

mod constants;
mod staff;
mod svg_builder;

use std::ops::{Deref, DerefMut};

use log::debug;

use crate::config::SheetConfig;
use crate::error::{Error, InvalidGeometryError};
use crate::layout::{draw_passage, Align, BarlineKind, Surface};
use crate::model::LeadSheet;
use constants::*;
use staff::{render_barline, render_header};
use svg_builder::SvgBuilder;

// ═══════════════════════════════════════════════════════════════════════
// Public API
// ═══════════════════════════════════════════════════════════════════════

/// Render a lead sheet into a complete SVG string.
pub fn render_sheet_to_svg(sheet: &LeadSheet, config: &SheetConfig) -> Result<String, Error> {
    check_rows_fit(config)?;

    let mut surface = SvgSurface::new(config);
    surface.header(&sheet.title, &sheet.artist);
    for passage in &sheet.passages {
        draw_passage(&mut surface, passage, config)?;
    }

    debug!(
        "rendered {:?}: {} passages on {} pages",
        sheet.title,
        sheet.passages.len(),
        surface.page_count()
    );
    Ok(surface.finish())
}

/// The first page carries the header, so it bounds how many rows a page
/// can hold.
fn check_rows_fit(config: &SheetConfig) -> Result<(), InvalidGeometryError> {
    if config.rows == 0 {
        return Err(InvalidGeometryError::ZeroRows);
    }
    let needed = HEADER_HEIGHT + config.rows as f64 * config.staff_height;
    let available = config.page_height - config.margin_top - config.margin_bottom;
    if needed > available {
        return Err(InvalidGeometryError::RowsOverflowPage {
            rows: config.rows,
            needed,
            available,
        });
    }
    Ok(())
}

// ═══════════════════════════════════════════════════════════════════════
// Fonts
// ═══════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, PartialEq)]
pub struct Font {
    pub family: String,
    pub size: f64,
    pub bold: bool,
}

impl Font {
    pub fn new(family: impl Into<String>, size: f64) -> Self {
        Self {
            family: family.into(),
            size,
            bold: false,
        }
    }

    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    fn weight(&self) -> &'static str {
        if self.bold {
            "bold"
        } else {
            "normal"
        }
    }
}

/// Font override for a scope; the previous font comes back on drop.
pub struct StyleGuard<'a> {
    surface: &'a mut SvgSurface,
    saved: Option<Font>,
}

impl Deref for StyleGuard<'_> {
    type Target = SvgSurface;

    fn deref(&self) -> &SvgSurface {
        &*self.surface
    }
}

impl DerefMut for StyleGuard<'_> {
    fn deref_mut(&mut self) -> &mut SvgSurface {
        &mut *self.surface
    }
}

impl Drop for StyleGuard<'_> {
    fn drop(&mut self) {
        if let Some(font) = self.saved.take() {
            self.surface.font = font;
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════
// SvgSurface
// ═══════════════════════════════════════════════════════════════════════

pub struct SvgSurface {
    svg: SvgBuilder,
    config: SheetConfig,
    font: Font,
    /// Cursor, relative to the current page's top-left corner
    x: f64,
    y: f64,
    page: usize,
    rows_on_page: usize,
    /// Set when a page fills up; the next cell opens the new page so a
    /// full last page does not leave a blank one behind.
    page_break_pending: bool,
}

impl SvgSurface {
    pub fn new(config: &SheetConfig) -> Self {
        let mut surface = Self {
            svg: SvgBuilder::new(config.page_width),
            config: config.clone(),
            font: Font::new(&config.font_family, config.chord_font_size),
            x: config.margin_left,
            y: config.margin_top,
            page: 0,
            rows_on_page: 0,
            page_break_pending: false,
        };
        surface.paint_page();
        surface
    }

    /// Switch font until the returned guard is dropped.
    pub fn styled(&mut self, font: Font) -> StyleGuard<'_> {
        let saved = std::mem::replace(&mut self.font, font);
        StyleGuard {
            surface: self,
            saved: Some(saved),
        }
    }

    pub fn font(&self) -> &Font {
        &self.font
    }

    pub fn page_count(&self) -> usize {
        self.page + 1
    }

    /// Draw the title block and move the cursor below it.
    pub fn header(&mut self, title: &str, artist: &str) {
        render_header(self, title, artist);
        self.y = self.config.margin_top + HEADER_HEIGHT;
    }

    pub fn finish(self) -> String {
        let height = self.page_count() as f64 * self.config.page_height;
        self.svg.build(height)
    }

    fn page_offset(&self) -> f64 {
        self.page as f64 * self.config.page_height
    }

    fn paint_page(&mut self) {
        let top = self.page_offset();
        self.svg
            .rect(0.0, top, self.config.page_width, self.config.page_height, PAGE_COLOR);
    }

    fn open_pending_page(&mut self) {
        if !self.page_break_pending {
            return;
        }
        self.page_break_pending = false;
        self.page += 1;
        self.rows_on_page = 0;
        self.x = self.config.margin_left;
        self.y = self.config.margin_top;
        self.paint_page();
        debug!("starting page {}", self.page_count());
    }

    /// Text in the current font; `y` is page-relative.
    fn write_text(&mut self, x: f64, y: f64, content: &str, anchor: &str, color: &str) {
        let y = self.page_offset() + y;
        self.svg.text(
            x,
            y,
            content,
            &self.font.family,
            self.font.size,
            self.font.weight(),
            color,
            anchor,
        );
    }
}

impl Surface for SvgSurface {
    fn draw_cell(&mut self, width: f64, text: &str, align: Align) {
        self.open_pending_page();
        if !text.is_empty() {
            let (x, anchor) = match align {
                Align::Left => (self.x + TEXT_PADDING, "start"),
                Align::Center => (self.x + width / 2.0, "middle"),
            };
            let baseline = self.y + self.config.staff_height * TEXT_BASELINE;
            self.write_text(x, baseline, text, anchor, CHORD_COLOR);
        }
        self.x += width;
    }

    fn draw_barline(&mut self, width: f64, kind: BarlineKind) {
        self.open_pending_page();
        let top = self.page_offset() + self.y;
        render_barline(&mut self.svg, kind, self.x, top, width, self.config.staff_height);
        self.x += width;
    }

    fn line_break(&mut self, row_height: f64) {
        self.x = self.config.margin_left;
        self.y += row_height;
        self.rows_on_page += 1;
        if self.rows_on_page >= self.config.rows {
            self.page_break_pending = true;
        }
    }

    fn usable_width(&self) -> f64 {
        self.config.usable_width()
    }
}
