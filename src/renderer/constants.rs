//! Shared constants for the SVG renderer (page units).

// ── Header ──────────────────────────────────────────────────────────
pub(super) const HEADER_HEIGHT: f64 = 25.0; // space for title + artist
pub(super) const HEADER_LINE_GAP: f64 = 3.0;

// ── Cells ───────────────────────────────────────────────────────────
pub(super) const TEXT_BASELINE: f64 = 0.6; // fraction of the row height
pub(super) const TEXT_PADDING: f64 = 1.0;

// ── Barlines ────────────────────────────────────────────────────────
pub(super) const BARLINE_TOP: f64 = 0.25; // fractions of the row height
pub(super) const BARLINE_BOTTOM: f64 = 0.75;
pub(super) const THIN_LINE_WIDTH: f64 = 0.3;
pub(super) const THICK_LINE_WIDTH: f64 = 1.0;
pub(super) const REPEAT_DOT_RADIUS: f64 = 0.5;
pub(super) const REPEAT_DOT_SPREAD: f64 = 0.08; // dot offset from row middle

// ── Colors ──────────────────────────────────────────────────────────
pub(super) const PAGE_COLOR: &str = "white";
pub(super) const BARLINE_COLOR: &str = "#333333";
pub(super) const CHORD_COLOR: &str = "#1a1a1a";
pub(super) const HEADER_COLOR: &str = "#1a1a1a";
