//! Notation parser: converts chord-chart notation into the lead-sheet model.
//!
//! ```text
//! a F_C * E/G#      four bars; "_" splits a bar, "*" is an empty slot
//! (C G a F)         a repeated section
//! ```
//!
//! Everything except repeat delimiters is accepted: odd tokens degrade to
//! some well-defined structure instead of failing.

use log::{debug, warn};

use crate::error::FormatError;
use crate::model::*;

/// Empty beat slot.
pub const PLACEHOLDER: &str = "*";
/// Separates chords within a bar.
pub const CHORD_SEPARATOR: char = '_';
pub const REPEAT_OPEN: char = '(';
pub const REPEAT_CLOSE: char = ')';

// ─── Chord ───────────────────────────────────────────────────────────

/// Parse one chord token into its display symbol.
///
/// A lowercase first letter is minor shorthand: only that letter is kept,
/// so `"c#"` becomes `"Cm"`. Other tokens pass through verbatim.
pub fn parse_chord(token: &str) -> String {
    if token == PLACEHOLDER {
        return String::new();
    }
    match token.chars().next() {
        Some(first) if first.is_lowercase() => {
            let mut symbol: String = first.to_uppercase().collect();
            symbol.push('m');
            symbol
        }
        _ => token.to_string(),
    }
}

// ─── Bar ─────────────────────────────────────────────────────────────

/// Parse a bar token into its chords. Empty sub-tokens are skipped.
pub fn parse_bar(token: &str) -> Vec<Chord> {
    token
        .split(CHORD_SEPARATOR)
        .filter(|sub| !sub.is_empty())
        .map(Chord::parse)
        .collect()
}

// ─── Passage ─────────────────────────────────────────────────────────

/// Parse whitespace-separated bar tokens, keeping source order.
pub fn parse_passage(text: &str) -> Vec<Bar> {
    text.split_whitespace().map(Bar::parse).collect()
}

// ─── Repeat ──────────────────────────────────────────────────────────

/// Parse a repeated section such as `"(a F C G)"`.
///
/// The first bar is tagged repeat-begin and the last repeat-end; a single
/// bar gets both. `"()"` is accepted and yields an empty repeat.
pub fn parse_repeat(text: &str) -> Result<Passage, FormatError> {
    let Some(inner) = text
        .strip_prefix(REPEAT_OPEN)
        .and_then(|rest| rest.strip_suffix(REPEAT_CLOSE))
    else {
        warn!("rejected repeat notation {text:?}");
        return Err(FormatError {
            input: text.to_string(),
            open: REPEAT_OPEN,
            close: REPEAT_CLOSE,
        });
    };

    let mut bars = parse_passage(inner);
    if let Some(first) = bars.first_mut() {
        first.properties.repeat_begin = true;
    }
    if let Some(last) = bars.last_mut() {
        last.properties.repeat_end = true;
    }
    if bars.is_empty() {
        debug!("repeat {text:?} has no bars");
    }

    Ok(Passage {
        bars,
        kind: PassageKind::Repeat,
    })
}

// ─── Sheet ───────────────────────────────────────────────────────────

/// Parse a whole sheet: one passage per non-blank line, and lines
/// starting with `(` are repeats.
pub fn parse_sheet(title: &str, artist: &str, notation: &str) -> Result<LeadSheet, FormatError> {
    let mut sheet = LeadSheet::new(title, artist);

    for line in notation.lines().map(str::trim).filter(|l| !l.is_empty()) {
        let passage = if line.starts_with(REPEAT_OPEN) {
            parse_repeat(line)?
        } else {
            Passage::parse(line)
        };
        sheet.passages.push(passage);
    }

    debug!(
        "parsed sheet {:?}: {} passages, {} bars",
        sheet.title,
        sheet.passages.len(),
        sheet.bar_count()
    );
    Ok(sheet)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn symbols(bar: &Bar) -> Vec<&str> {
        bar.chords().iter().map(Chord::symbol).collect()
    }

    #[rstest]
    #[case("*", "")]
    #[case("a", "Am")]
    #[case("A", "A")]
    #[case("Cm", "Cm")]
    #[case("E/G#", "E/G#")]
    #[case("F#m", "F#m")]
    #[case("c#", "Cm")]
    #[case("", "")]
    fn chord_symbols(#[case] token: &str, #[case] expected: &str) {
        assert_eq!(parse_chord(token), expected);
    }

    #[test]
    fn chord_parsing_is_deterministic() {
        for token in ["a", "*", "G7", "", "bb"] {
            assert_eq!(parse_chord(token), parse_chord(token));
        }
    }

    #[rstest]
    #[case("", 0)]
    #[case("*", 1)]
    #[case("C", 1)]
    #[case("A_A_A_A", 4)]
    #[case("c_c_c_c_c", 5)]
    #[case("_", 0)]
    #[case("_C__G_", 2)]
    fn bar_chord_counts(#[case] token: &str, #[case] count: usize) {
        assert_eq!(parse_bar(token).len(), count);
    }

    #[test]
    fn placeholder_bar_is_one_empty_slot() {
        let bar = Bar::parse("*");
        assert_eq!(symbols(&bar), vec![""]);
        assert!(bar.chords()[0].is_placeholder());
    }

    #[test]
    fn bar_keeps_chord_order() {
        let bar = Bar::parse("a_F_*_E/G#");
        assert_eq!(symbols(&bar), vec!["Am", "F", "", "E/G#"]);
        assert_eq!(bar.properties(), BarProperties::default());
    }

    #[test]
    fn passage_splits_on_any_whitespace() {
        let bars = parse_passage("  a\tF \n C   G ");
        let firsts: Vec<&str> = bars.iter().map(|b| b.chords()[0].symbol()).collect();
        assert_eq!(firsts, vec!["Am", "F", "C", "G"]);
    }

    #[test]
    fn blank_passage_has_no_bars() {
        assert!(parse_passage(" ").is_empty());
        assert!(parse_passage("").is_empty());
        assert!(!Passage::parse("").is_repeat());
    }

    #[test]
    fn one_bar_repeat_gets_both_flags() {
        let repeat = parse_repeat("(a)").unwrap();
        assert!(repeat.is_repeat());
        assert_eq!(repeat.bars().len(), 1);
        let props = repeat.bars()[0].properties();
        assert!(props.repeat_begin());
        assert!(props.repeat_end());
    }

    #[test]
    fn four_bar_repeat_tags_only_boundaries() {
        let repeat = parse_repeat("(a F C G)").unwrap();
        let flags: Vec<(bool, bool)> = repeat
            .bars()
            .iter()
            .map(|b| (b.properties().repeat_begin(), b.properties().repeat_end()))
            .collect();
        assert_eq!(
            flags,
            vec![(true, false), (false, false), (false, false), (false, true)]
        );
    }

    #[rstest]
    #[case("a")]
    #[case("")]
    #[case("(")]
    #[case(")")]
    #[case("(a F")]
    #[case("a F)")]
    #[case(" (a)")]
    fn repeat_without_delimiters_fails(#[case] input: &str) {
        let err = parse_repeat(input).unwrap_err();
        assert_eq!(err.input, input);
        assert_eq!((err.open, err.close), ('(', ')'));
    }

    #[test]
    fn format_error_names_input_and_delimiters() {
        let err = parse_repeat("a F").unwrap_err();
        assert_eq!(
            err.to_string(),
            "repeat 'a F' must start with '(' and end with ')'"
        );
    }

    #[test]
    fn empty_repeat_is_accepted_without_bars() {
        let repeat = parse_repeat("()").unwrap();
        assert!(repeat.is_repeat());
        assert!(repeat.is_empty());
        assert!(parse_repeat("(   )").unwrap().is_empty());
    }

    #[test]
    fn sheet_lines_become_passages() {
        let sheet = parse_sheet("Song", "Band", "\n(a F C G)\n  C G a F  \n\n(G)\n").unwrap();
        assert_eq!(sheet.title, "Song");
        assert_eq!(sheet.artist, "Band");
        let kinds: Vec<PassageKind> = sheet.passages.iter().map(Passage::kind).collect();
        assert_eq!(
            kinds,
            vec![PassageKind::Repeat, PassageKind::Plain, PassageKind::Repeat]
        );
        assert_eq!(sheet.bar_count(), 9);
    }

    #[test]
    fn sheet_with_broken_repeat_fails() {
        let err = parse_sheet("Song", "Band", "C G\n(a F C G\n").unwrap_err();
        assert_eq!(err.input, "(a F C G");
    }
}
