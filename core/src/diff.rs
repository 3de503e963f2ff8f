//! Minimal-edit replacement.
//!
//! Given the raw input tail and its transliteration, computes the single
//! host-surface mutation that rewrites only the diverging suffix: find the
//! first character position where the two strings differ, drop the common
//! prefix from both, and replace the corresponding span before the caret.
//! All offsets are character offsets.

/// A single replace instruction for the host surface: substitute the
/// characters in `start..end` with `text` and place the caret after it.
/// Together with the not-yet-inserted typed character, the rewritten span
/// covers exactly the diverging suffix of the input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplaceEdit {
    pub start: usize,
    pub end: usize,
    pub text: String,
}

/// First character position at which `a` and `b` differ.
///
/// Scans up to the shorter length; when every compared position matches
/// (one string is a prefix of the other, or they are equal) the result is
/// that minimum length.
pub fn divergence_index(a: &str, b: &str) -> usize {
    let mut index = 0;
    for (ca, cb) in a.chars().zip(b.chars()) {
        if ca != cb {
            return index;
        }
        index += 1;
    }
    index
}

/// Compute the replace instruction for a transliterated keystroke.
///
/// `input` is the lookback window plus the newly typed character (which is
/// not yet present on the surface); `caret_start`/`caret_end` are the
/// selection offsets at the time of the keystroke. Returns `None` when the
/// replacement equals the input: a pure passthrough with zero mutations.
pub fn diff_replace(
    input: &str,
    replacement: &str,
    caret_start: usize,
    caret_end: usize,
) -> Option<ReplaceEdit> {
    if input == replacement {
        return None;
    }

    let diverge = divergence_index(input, replacement);
    let chars_in = input.chars().count();
    // When the whole input is a prefix of the replacement there is no
    // diverging position inside it; trimming would drop the typed character,
    // which is not on the surface yet. Recommit the input in full instead.
    let diverge = if diverge == chars_in { 0 } else { diverge };
    let span = chars_in - diverge;
    let text: String = replacement.chars().skip(diverge).collect();

    // The typed character is not on the surface yet, hence the +1.
    Some(ReplaceEdit {
        start: (caret_start + 1).saturating_sub(span),
        end: caret_end,
        text,
    })
}
