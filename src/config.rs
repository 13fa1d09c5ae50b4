//! Sheet configuration: page size, margins, grid and fonts.
//!
//! All lengths are in page units (millimetres on the default A4 page).
//! Any field missing from a JSON config keeps its default.

use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::layout::StaffGeometry;

// ── Page & margins ──────────────────────────────────────────────────
pub const DEFAULT_PAGE_WIDTH: f64 = 210.0;
pub const DEFAULT_PAGE_HEIGHT: f64 = 297.0;
pub const DEFAULT_MARGIN: f64 = 10.0;

// ── Grid ────────────────────────────────────────────────────────────
pub const DEFAULT_COLUMNS: usize = 4;
pub const DEFAULT_ROWS: usize = 8;
pub const DEFAULT_BARLINE_WIDTH: f64 = 2.0;
pub const DEFAULT_REPEAT_BARLINE_WIDTH: f64 = 4.0;
pub const DEFAULT_STAFF_HEIGHT: f64 = 30.0;

// ── Fonts ───────────────────────────────────────────────────────────
pub const DEFAULT_FONT_FAMILY: &str = "Arial";
pub const DEFAULT_CHORD_FONT_SIZE: f64 = 10.0;
pub const DEFAULT_TITLE_FONT_SIZE: f64 = 9.0;
pub const DEFAULT_ARTIST_FONT_SIZE: f64 = 5.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SheetConfig {
    pub page_width: f64,
    pub page_height: f64,
    pub margin_left: f64,
    pub margin_top: f64,
    pub margin_right: f64,
    pub margin_bottom: f64,
    /// Bars per staff row
    pub columns: usize,
    /// Staff rows per page
    pub rows: usize,
    pub barline_width: f64,
    pub repeat_barline_width: f64,
    /// Vertical advance of one staff row
    pub staff_height: f64,
    pub font_family: String,
    pub chord_font_size: f64,
    pub title_font_size: f64,
    pub artist_font_size: f64,
}

impl Default for SheetConfig {
    fn default() -> Self {
        Self {
            page_width: DEFAULT_PAGE_WIDTH,
            page_height: DEFAULT_PAGE_HEIGHT,
            margin_left: DEFAULT_MARGIN,
            margin_top: DEFAULT_MARGIN,
            margin_right: DEFAULT_MARGIN,
            margin_bottom: DEFAULT_MARGIN,
            columns: DEFAULT_COLUMNS,
            rows: DEFAULT_ROWS,
            barline_width: DEFAULT_BARLINE_WIDTH,
            repeat_barline_width: DEFAULT_REPEAT_BARLINE_WIDTH,
            staff_height: DEFAULT_STAFF_HEIGHT,
            font_family: DEFAULT_FONT_FAMILY.to_string(),
            chord_font_size: DEFAULT_CHORD_FONT_SIZE,
            title_font_size: DEFAULT_TITLE_FONT_SIZE,
            artist_font_size: DEFAULT_ARTIST_FONT_SIZE,
        }
    }
}

impl SheetConfig {
    /// Load a config from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, Error> {
        serde_json::from_str(json).map_err(|e| Error::Config(e.to_string()))
    }

    /// Horizontal space for one staff row. The page width is rounded to a
    /// whole unit first.
    pub fn usable_width(&self) -> f64 {
        self.page_width.round() - self.margin_left - self.margin_right
    }

    /// Staff geometry for the configured page.
    pub fn staff_geometry(&self) -> StaffGeometry {
        self.staff_geometry_for(self.usable_width())
    }

    /// Staff geometry for a surface reporting its own usable width.
    pub fn staff_geometry_for(&self, usable_width: f64) -> StaffGeometry {
        StaffGeometry {
            usable_width,
            columns: self.columns,
            barline_width: self.barline_width,
            repeat_barline_width: self.repeat_barline_width,
            row_height: self.staff_height,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn default_page_is_a4_with_10mm_margins() {
        let config = SheetConfig::default();
        assert_eq!(config.page_width.round(), 210.0);
        assert_eq!(config.margin_left, 10.0);
        assert_eq!(config.margin_right, 10.0);
        assert_eq!(config.usable_width(), 190.0);
    }

    #[test]
    fn large_margins_shrink_usable_width() {
        let config = SheetConfig {
            margin_left: 50.0,
            margin_right: 50.0,
            ..SheetConfig::default()
        };
        assert_eq!(config.usable_width(), 110.0);
    }

    #[test]
    fn json_overrides_only_given_fields() {
        let config = SheetConfig::from_json(r#"{ "columns": 3, "margin_left": 20 }"#).unwrap();
        assert_eq!(config.columns, 3);
        assert_eq!(config.margin_left, 20.0);
        assert_eq!(config.rows, DEFAULT_ROWS);
        assert_eq!(config.font_family, "Arial");
    }

    #[test]
    fn malformed_json_is_a_config_error() {
        let err = SheetConfig::from_json("{ columns: ").unwrap_err();
        assert!(matches!(err, Error::Config(_)), "unexpected error {err:?}");
    }

    #[test]
    fn geometry_carries_grid_settings() {
        let geometry = SheetConfig::default().staff_geometry();
        assert_eq!(geometry.usable_width, 190.0);
        assert_eq!(geometry.columns, 4);
        assert_eq!(geometry.barline_width, 2.0);
        assert_eq!(geometry.repeat_barline_width, 4.0);
        assert_eq!(geometry.row_height, 30.0);
    }
}
