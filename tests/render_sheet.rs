//! Rendering tests — parse sheet notation and render to SVG.

use std::ffi::{CStr, CString};

use leadsheet::{
    leadsheet_free_string, leadsheet_render_notation, parse_sheet, render_notation_to_svg,
    render_sheet_to_svg, Error, SheetConfig,
};

const LET_IT_RUN: &str = "
(C G a F)
C G F_C C
a G F C
(d_G C)
";

#[test]
fn render_sheet_svg() {
    let svg = render_notation_to_svg("Let It Run", "The Examples", LET_IT_RUN, None)
        .expect("Failed to render sheet");

    // Basic SVG structure checks
    assert!(svg.starts_with("<svg"), "Output should be SVG");
    assert!(svg.contains("</svg>"), "SVG should be closed");
    assert!(svg.contains("Let It Run"), "SVG should contain title");
    assert!(svg.contains("The Examples"), "SVG should contain artist");

    // Chords are text, barlines are lines, repeat barlines add dots
    assert!(svg.contains(">Am</text>"), "SVG should contain minor chord");
    assert!(svg.contains(">Dm</text>"));
    assert!(svg.contains("<line"), "SVG should contain barlines");
    assert!(svg.contains("<circle"), "SVG should contain repeat dots");

    // One A4 page
    assert!(svg.contains(r#"viewBox="0 0 210 297""#));
    println!("✓ Rendered sheet ({} bytes)", svg.len());
}

#[test]
fn long_sheet_spills_onto_more_pages() {
    let notation = "C G a F\n".repeat(10);
    let svg = render_notation_to_svg("Long", "", &notation, None).unwrap();
    // 8 rows per page by default
    assert!(svg.contains(r#"viewBox="0 0 210 594""#));
}

#[test]
fn custom_config_controls_page_and_grid() {
    let config = SheetConfig::from_json(
        r#"{ "page_width": 300, "page_height": 200, "columns": 2, "rows": 1 }"#,
    )
    .unwrap();
    let sheet = parse_sheet("Wide", "", "C G a F").unwrap();
    let svg = render_sheet_to_svg(&sheet, &config).unwrap();
    // Two rows of two bars, one row per page
    assert!(svg.contains(r#"viewBox="0 0 300 400""#));
}

#[test]
fn placeholder_slots_draw_no_text() {
    let svg = render_notation_to_svg("", "", "* *_C", None).unwrap();
    assert_eq!(svg.matches("<text").count(), 1);
}

#[test]
fn chord_spelled_like_a_barline_is_drawn_as_text() {
    let svg = render_notation_to_svg("", "", "|:", None).unwrap();
    assert!(svg.contains(">|:</text>"), "chord '|:' should be drawn as text");
    assert_eq!(svg.matches("<text").count(), 1);
    assert_eq!(svg.matches("<circle").count(), 0, "plain barlines have no repeat dots");
}

#[test]
fn chord_text_is_escaped() {
    let svg = render_notation_to_svg("Rock & Roll", "", "C<9>", None).unwrap();
    assert!(svg.contains("Rock &amp; Roll"));
    assert!(svg.contains("C&lt;9&gt;"));
}

#[test]
fn malformed_repeat_is_reported() {
    let err = render_notation_to_svg("T", "A", "(C G", None).unwrap_err();
    assert!(matches!(err, Error::Format(_)), "unexpected error {err:?}");
}

#[test]
fn ffi_round_trip() {
    let title = CString::new("FFI").unwrap();
    let artist = CString::new("C caller").unwrap();
    let notation = CString::new("(a F C G)").unwrap();

    unsafe {
        let ptr = leadsheet_render_notation(title.as_ptr(), artist.as_ptr(), notation.as_ptr());
        assert!(!ptr.is_null());
        let svg = CStr::from_ptr(ptr).to_str().unwrap().to_owned();
        leadsheet_free_string(ptr);
        assert!(svg.contains("FFI"));
    }
}

#[test]
fn ffi_returns_null_on_error() {
    let title = CString::new("T").unwrap();
    let notation = CString::new("(a F").unwrap();

    unsafe {
        let ptr = leadsheet_render_notation(title.as_ptr(), title.as_ptr(), notation.as_ptr());
        assert!(ptr.is_null());
        assert!(leadsheet_render_notation(std::ptr::null(), title.as_ptr(), title.as_ptr()).is_null());
        leadsheet_free_string(std::ptr::null_mut());
    }
}
