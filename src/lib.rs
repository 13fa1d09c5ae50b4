//! leadsheet: chord-chart notation parser and lead-sheet layout library.
//!
//! Bars are separated by spaces and chords within a bar by `_`. `*` is an
//! empty slot, a lowercase letter is a minor chord, and `( … )` wraps a
//! repeated section.
//!
//! # Example
//! ```
//! use leadsheet::{layout_passage, Passage, SheetConfig};
//!
//! let passage = Passage::parse_repeat("(a F C G)").unwrap();
//! let geometry = SheetConfig::default().staff_geometry();
//! let instructions = layout_passage(&passage, &geometry).unwrap();
//! assert_eq!(instructions.len(), 10);
//! ```

pub mod config;
pub mod error;
pub mod layout;
pub mod model;
pub mod parser;
pub mod renderer;

pub use config::SheetConfig;
pub use error::{Error, FormatError, InvalidGeometryError};
pub use layout::{
    draw_passage, layout_passage, replay, Align, BarlineKind, Instruction, StaffGeometry, Surface,
};
pub use model::*;
pub use parser::{parse_bar, parse_chord, parse_passage, parse_repeat, parse_sheet};
pub use renderer::{render_sheet_to_svg, Font, StyleGuard, SvgSurface};

/// Convert a parsed sheet to a JSON string.
/// Useful for passing data across FFI boundaries.
pub fn sheet_to_json(sheet: &LeadSheet) -> Result<String, Error> {
    serde_json::to_string_pretty(sheet).map_err(|e| Error::Json(e.to_string()))
}

/// Parse sheet notation and render it directly to SVG.
///
/// Pass `None` for `config` to use the default A4 page.
pub fn render_notation_to_svg(
    title: &str,
    artist: &str,
    notation: &str,
    config: Option<&SheetConfig>,
) -> Result<String, Error> {
    let sheet = parse_sheet(title, artist, notation)?;
    match config {
        Some(config) => render_sheet_to_svg(&sheet, config),
        None => render_sheet_to_svg(&sheet, &SheetConfig::default()),
    }
}

// ═══════════════════════════════════════════════════════════════════════
// C FFI — for static library / dynamic library consumers
// ═══════════════════════════════════════════════════════════════════════

use std::ffi::{CStr, CString};
use std::os::raw::c_char;

unsafe fn str_arg<'a>(ptr: *const c_char) -> Option<&'a str> {
    if ptr.is_null() {
        return None;
    }
    unsafe { CStr::from_ptr(ptr) }.to_str().ok()
}

/// Parse sheet notation and return SVG as a C string.
/// The caller must free the returned string with `leadsheet_free_string`.
/// Returns null on invalid input or any parse/layout error.
///
/// # Safety
/// `title`, `artist` and `notation` must be valid null-terminated UTF-8
/// C strings.
#[no_mangle]
pub unsafe extern "C" fn leadsheet_render_notation(
    title: *const c_char,
    artist: *const c_char,
    notation: *const c_char,
) -> *mut c_char {
    let args = unsafe { (str_arg(title), str_arg(artist), str_arg(notation)) };
    let (Some(title), Some(artist), Some(notation)) = args else {
        return std::ptr::null_mut();
    };

    match render_notation_to_svg(title, artist, notation, None) {
        Ok(svg) => CString::new(svg).unwrap_or_default().into_raw(),
        Err(e) => {
            log::warn!("render failed: {e}");
            std::ptr::null_mut()
        }
    }
}

/// Free a string previously returned by leadsheet functions.
///
/// # Safety
/// `ptr` must be a string previously returned by a leadsheet function, or null.
#[no_mangle]
pub unsafe extern "C" fn leadsheet_free_string(ptr: *mut c_char) {
    if !ptr.is_null() {
        unsafe {
            let _ = CString::from_raw(ptr);
        }
    }
}
