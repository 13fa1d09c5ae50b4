//! Data model for a parsed lead sheet.
//!
//! These structures capture what the layout engine needs to draw a chord
//! chart: chords grouped into bars, bars grouped into passages, and
//! passages grouped into a titled sheet.

use serde::Serialize;

use crate::error::FormatError;
use crate::parser;

/// A complete lead sheet.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LeadSheet {
    /// Title of the piece
    pub title: String,
    /// Performing artist
    pub artist: String,
    /// Sections in play order, one staff block each
    pub passages: Vec<Passage>,
}

/// An ordered run of bars, optionally marked as a repeated section.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Passage {
    pub(crate) bars: Vec<Bar>,
    pub(crate) kind: PassageKind,
}

/// What bounds a passage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PassageKind {
    #[default]
    Plain,
    /// Played twice; boundary bars carry repeat barlines.
    Repeat,
}

/// A single bar (measure) holding zero or more chord slots.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Bar {
    pub(crate) chords: Vec<Chord>,
    pub(crate) properties: BarProperties,
}

/// Structural flags of a bar. Only the repeat constructor sets them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct BarProperties {
    pub(crate) repeat_begin: bool,
    pub(crate) repeat_end: bool,
}

/// A chord symbol as displayed. Empty for a placeholder slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Chord {
    pub(crate) symbol: String,
}

impl LeadSheet {
    /// Create an empty sheet with a header.
    pub fn new(title: impl Into<String>, artist: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            artist: artist.into(),
            passages: Vec::new(),
        }
    }

    /// Total number of bars across all passages.
    pub fn bar_count(&self) -> usize {
        self.passages.iter().map(|p| p.bars.len()).sum()
    }
}

impl Passage {
    /// Parse a whitespace-separated run of bar tokens.
    pub fn parse(text: &str) -> Self {
        Self {
            bars: parser::parse_passage(text),
            kind: PassageKind::Plain,
        }
    }

    /// Parse a parenthesized repeat, e.g. `"(a F C G)"`.
    pub fn parse_repeat(text: &str) -> Result<Self, FormatError> {
        parser::parse_repeat(text)
    }

    pub fn bars(&self) -> &[Bar] {
        &self.bars
    }

    pub fn kind(&self) -> PassageKind {
        self.kind
    }

    pub fn is_repeat(&self) -> bool {
        self.kind == PassageKind::Repeat
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }
}

impl Bar {
    /// Parse one bar token; chords are separated by `_`.
    pub fn parse(token: &str) -> Self {
        Self {
            chords: parser::parse_bar(token),
            properties: BarProperties::default(),
        }
    }

    pub fn chords(&self) -> &[Chord] {
        &self.chords
    }

    pub fn properties(&self) -> BarProperties {
        self.properties
    }
}

impl BarProperties {
    pub fn repeat_begin(&self) -> bool {
        self.repeat_begin
    }

    pub fn repeat_end(&self) -> bool {
        self.repeat_end
    }
}

impl Chord {
    /// Parse one chord token into its display symbol.
    pub fn parse(token: &str) -> Self {
        Self {
            symbol: parser::parse_chord(token),
        }
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// Whether this slot is a rest (`*`).
    pub fn is_placeholder(&self) -> bool {
        self.symbol.is_empty()
    }
}
