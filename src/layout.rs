//! Layout computation: groups bars into staff rows and sizes every cell.
//!
//! A row of `n` bars always carries `n + 1` barlines: one in front of each
//! bar and one closing the row. Whatever width the barlines leave is split
//! evenly between the bars, and each bar's share evenly between its chords.
//! Widths are exact `f64` quotients; nothing is rounded.
//!
//! The engine itself draws nothing. It yields [`Instruction`]s that any
//! [`Surface`] can replay.

use log::{debug, trace, warn};
use serde::Serialize;

use crate::config::SheetConfig;
use crate::error::InvalidGeometryError;
use crate::model::{Bar, Passage};

// ═══════════════════════════════════════════════════════════════════════
// Layout structures
// ═══════════════════════════════════════════════════════════════════════

/// Horizontal placement of a cell's text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Align {
    Left,
    Center,
}

/// One step for the rendering surface.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Instruction {
    /// Draw `text` in a cell `width` wide at the cursor, then advance.
    Cell { text: String, width: f64, align: Align },
    /// Draw a barline in a cell `width` wide at the cursor, then advance.
    Barline { kind: BarlineKind, width: f64 },
    /// Return to the row start and move down by `height`.
    LineBreak { height: f64 },
}

/// Barline drawn in front of a bar or at the end of a row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum BarlineKind {
    Plain,
    RepeatOpen,
    RepeatClose,
}

/// Geometry of a single staff row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StaffGeometry {
    /// Page width minus margins
    pub usable_width: f64,
    /// Bars per row
    pub columns: usize,
    pub barline_width: f64,
    pub repeat_barline_width: f64,
    /// Passed to every line break
    pub row_height: f64,
}

/// The rendering collaborator the layout engine draws onto.
pub trait Surface {
    /// Draw one labelled cell at the cursor and advance by `width`.
    fn draw_cell(&mut self, width: f64, text: &str, align: Align);

    /// Draw a barline cell. Surfaces without barline graphics get the
    /// glyph as centred text.
    fn draw_barline(&mut self, width: f64, kind: BarlineKind) {
        self.draw_cell(width, kind.glyph(), Align::Center);
    }

    /// Move the cursor to the start of the next row.
    fn line_break(&mut self, row_height: f64);

    /// Horizontal space currently available, margins excluded.
    fn usable_width(&self) -> f64;
}

// ═══════════════════════════════════════════════════════════════════════
// Helper functions
// ═══════════════════════════════════════════════════════════════════════

impl BarlineKind {
    /// Kind of the barline sitting between `prev` and `next`. Either side
    /// is `None` at a row edge. Within one passage a repeat-end bar is
    /// always the last bar, so a barline never closes and opens at once.
    pub fn between(prev: Option<&Bar>, next: Option<&Bar>) -> Self {
        if next.is_some_and(|b| b.properties().repeat_begin()) {
            Self::RepeatOpen
        } else if prev.is_some_and(|b| b.properties().repeat_end()) {
            Self::RepeatClose
        } else {
            Self::Plain
        }
    }

    pub fn glyph(self) -> &'static str {
        match self {
            Self::Plain => "|",
            Self::RepeatOpen => "|:",
            Self::RepeatClose => ":|",
        }
    }

    pub fn is_repeat(self) -> bool {
        self != Self::Plain
    }
}

impl StaffGeometry {
    /// Reject geometry that cannot produce sensible widths.
    pub fn validate(&self) -> Result<(), InvalidGeometryError> {
        if !self.usable_width.is_finite() || self.usable_width <= 0.0 {
            return Err(InvalidGeometryError::UsableWidth(self.usable_width));
        }
        if self.columns == 0 {
            return Err(InvalidGeometryError::ZeroColumns);
        }
        for w in [self.barline_width, self.repeat_barline_width] {
            if !w.is_finite() || w < 0.0 {
                return Err(InvalidGeometryError::BarlineWidth(w));
            }
        }
        Ok(())
    }

    pub fn barline_width_of(&self, kind: BarlineKind) -> f64 {
        if kind.is_repeat() {
            self.repeat_barline_width
        } else {
            self.barline_width
        }
    }
}

/// The `n + 1` barlines of a row, left to right.
pub fn row_barlines(row: &[Bar]) -> Vec<BarlineKind> {
    (0..=row.len())
        .map(|i| {
            let prev = i.checked_sub(1).and_then(|p| row.get(p));
            BarlineKind::between(prev, row.get(i))
        })
        .collect()
}

/// Width left for bar content once the row's barlines are placed.
pub fn row_content_width(row: &[Bar], geometry: &StaffGeometry) -> f64 {
    let barlines: f64 = row_barlines(row)
        .into_iter()
        .map(|kind| geometry.barline_width_of(kind))
        .sum();
    geometry.usable_width - barlines
}

// ═══════════════════════════════════════════════════════════════════════
// Main layout computation
// ═══════════════════════════════════════════════════════════════════════

/// Lay a passage out into draw instructions.
///
/// Rows hold exactly `columns` bars except possibly the last, which is
/// shorter and stretched to the full width. Each chord gets one cell; a bar
/// without chords (token `_`) still gets one blank cell of the full bar
/// width so later cells stay on the grid. An empty passage yields no
/// instructions.
pub fn layout_passage(
    passage: &Passage,
    geometry: &StaffGeometry,
) -> Result<Vec<Instruction>, InvalidGeometryError> {
    geometry.validate()?;

    let mut out = Vec::new();
    let mut rows = 0;
    for row in passage.bars().chunks(geometry.columns) {
        layout_row(row, geometry, &mut out)?;
        rows += 1;
    }

    debug!(
        "laid out {} bars in {} rows ({} instructions)",
        passage.bars().len(),
        rows,
        out.len()
    );
    Ok(out)
}

fn layout_row(
    row: &[Bar],
    geometry: &StaffGeometry,
    out: &mut Vec<Instruction>,
) -> Result<(), InvalidGeometryError> {
    let barlines = row_barlines(row);
    let content_width = row_content_width(row, geometry);
    if content_width <= 0.0 {
        return Err(InvalidGeometryError::RowTooNarrow {
            bars: row.len(),
            barlines: geometry.usable_width - content_width,
            usable: geometry.usable_width,
        });
    }

    let bar_width = content_width / row.len() as f64;
    trace!("row of {} bars: content {content_width}, bar {bar_width}", row.len());

    for (bar, &kind) in row.iter().zip(&barlines) {
        out.push(barline(kind, geometry));

        let chords = bar.chords();
        if chords.is_empty() {
            warn!("bar without chords drawn as one blank slot");
            out.push(Instruction::Cell {
                text: String::new(),
                width: bar_width,
                align: Align::Left,
            });
            continue;
        }

        let chord_width = bar_width / chords.len() as f64;
        out.extend(chords.iter().map(|chord| Instruction::Cell {
            text: chord.symbol().to_string(),
            width: chord_width,
            align: Align::Left,
        }));
    }

    if let Some(&closing) = barlines.last() {
        out.push(barline(closing, geometry));
    }
    out.push(Instruction::LineBreak {
        height: geometry.row_height,
    });
    Ok(())
}

fn barline(kind: BarlineKind, geometry: &StaffGeometry) -> Instruction {
    Instruction::Barline {
        kind,
        width: geometry.barline_width_of(kind),
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Drawing
// ═══════════════════════════════════════════════════════════════════════

/// Play instructions onto a surface in order.
pub fn replay<S: Surface + ?Sized>(instructions: &[Instruction], surface: &mut S) {
    for instruction in instructions {
        match instruction {
            Instruction::Cell { text, width, align } => surface.draw_cell(*width, text, *align),
            Instruction::Barline { kind, width } => surface.draw_barline(*width, *kind),
            Instruction::LineBreak { height } => surface.line_break(*height),
        }
    }
}

/// Lay out a passage against the surface's usable width and draw it.
pub fn draw_passage<S: Surface + ?Sized>(
    surface: &mut S,
    passage: &Passage,
    config: &SheetConfig,
) -> Result<(), InvalidGeometryError> {
    let geometry = config.staff_geometry_for(surface.usable_width());
    let instructions = layout_passage(passage, &geometry)?;
    replay(&instructions, surface);
    Ok(())
}
