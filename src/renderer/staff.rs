//! Header and barline rendering.

use super::constants::*;
use super::svg_builder::SvgBuilder;
use super::{Font, SvgSurface};
use crate::layout::BarlineKind;

// ═══════════════════════════════════════════════════════════════════════
// Header rendering
// ═══════════════════════════════════════════════════════════════════════

/// Title centred on the page, artist right-aligned beneath it.
pub(super) fn render_header(surface: &mut SvgSurface, title: &str, artist: &str) {
    let config = &surface.config;
    let center_x = config.page_width / 2.0;
    let right_x = config.page_width - config.margin_right;
    let title_y = config.margin_top + config.title_font_size;
    let artist_y = title_y + HEADER_LINE_GAP + config.artist_font_size;
    let title_font = Font::new(&config.font_family, config.title_font_size).bold();
    let artist_font = Font::new(&config.font_family, config.artist_font_size);

    if !title.is_empty() {
        let mut styled = surface.styled(title_font);
        styled.write_text(center_x, title_y, title, "middle", HEADER_COLOR);
    }
    if !artist.is_empty() {
        let mut styled = surface.styled(artist_font);
        styled.write_text(right_x, artist_y, artist, "end", HEADER_COLOR);
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Barline rendering
// ═══════════════════════════════════════════════════════════════════════

/// Draw a barline glyph inside the cell `[x, x + width]` of a row whose
/// top edge is at `top`.
pub(super) fn render_barline(
    svg: &mut SvgBuilder,
    kind: BarlineKind,
    x: f64,
    top: f64,
    width: f64,
    row_height: f64,
) {
    let y1 = top + row_height * BARLINE_TOP;
    let y2 = top + row_height * BARLINE_BOTTOM;
    let mid_y = (y1 + y2) / 2.0;
    let spread = row_height * REPEAT_DOT_SPREAD;
    let at = |fraction: f64| x + width * fraction;

    match kind {
        BarlineKind::Plain => stroke(svg, at(0.5), y1, y2, THIN_LINE_WIDTH),
        BarlineKind::RepeatOpen => {
            stroke(svg, at(0.2), y1, y2, THICK_LINE_WIDTH);
            stroke(svg, at(0.45), y1, y2, THIN_LINE_WIDTH);
            repeat_dots(svg, at(0.75), mid_y, spread);
        }
        BarlineKind::RepeatClose => {
            repeat_dots(svg, at(0.25), mid_y, spread);
            stroke(svg, at(0.55), y1, y2, THIN_LINE_WIDTH);
            stroke(svg, at(0.8), y1, y2, THICK_LINE_WIDTH);
        }
    }
}

fn stroke(svg: &mut SvgBuilder, x: f64, y1: f64, y2: f64, width: f64) {
    svg.line(x, y1, x, y2, BARLINE_COLOR, width);
}

fn repeat_dots(svg: &mut SvgBuilder, x: f64, mid_y: f64, spread: f64) {
    svg.circle(x, mid_y - spread, REPEAT_DOT_RADIUS, BARLINE_COLOR);
    svg.circle(x, mid_y + spread, REPEAT_DOT_RADIUS, BARLINE_COLOR);
}
