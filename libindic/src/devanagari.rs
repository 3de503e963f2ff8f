//! Phonetic Devanagari transliteration (`hi-translit`).
//!
//! Consonant keys commit the consonant with an explicit virama; a following
//! vowel key rewrites the virama into the matching matra (or removes it for
//! the inherent `a`). Doubled vowel keys lengthen: `aa` gives आ word-initially
//! and the ा matra after a consonant. Rule order carries the precedence:
//! matra rules shadow the independent vowels, aspirates shadow plain `h`.

use libtranslit_core::{InputMethod, Rule, RuleError};

/// Build the `hi-translit` input method.
pub fn hi_transliteration() -> Result<InputMethod, RuleError> {
    let mut rules = Vec::new();

    // Vowel keys after a committed consonant: rewrite the virama.
    for (pattern, template) in [
        ("्a", ""),
        ("्i", "ि"),
        ("्u", "ु"),
        ("्e", "े"),
        ("्o", "ो"),
        // Second vowel key after the inherent a: long and diphthong matras.
        ("([क-ह])a", "$1ा"),
        ("([क-ह])i", "$1ै"),
        ("([क-ह])u", "$1ौ"),
        ("िi", "ी"),
        ("ुu", "ू"),
    ] {
        rules.push(Rule::simple(pattern, template)?);
    }

    // Doubled r gives the vocalic ऋ, but only when both keystrokes were
    // typed in direct succession; a stale र् left near the caret (say,
    // after a backspace blanked the context) stays a conjunct.
    rules.push(Rule::context("र्r", "r", "ऋ")?);

    // Independent vowels, doubled forms first.
    for (pattern, template) in [
        ("अa", "आ"),
        ("अi", "ऐ"),
        ("अu", "औ"),
        ("इi", "ई"),
        ("उu", "ऊ"),
        ("a", "अ"),
        ("i", "इ"),
        ("u", "उ"),
        ("e", "ए"),
        ("o", "ओ"),
    ] {
        rules.push(Rule::simple(pattern, template)?);
    }

    // Aspirates: h after a committed consonant, ahead of plain h below.
    for (pattern, template) in [
        ("क्h", "ख्"),
        ("ग्h", "घ्"),
        ("च्h", "छ्"),
        ("ज्h", "झ्"),
        ("ट्h", "ठ्"),
        ("ड्h", "ढ्"),
        ("त्h", "थ्"),
        ("द्h", "ध्"),
        ("प्h", "फ्"),
        ("ब्h", "भ्"),
        ("स्h", "श्"),
    ] {
        rules.push(Rule::simple(pattern, template)?);
    }

    // Consonants commit with the inherent vowel stopped.
    for (pattern, template) in [
        ("k", "क्"),
        ("g", "ग्"),
        ("c", "च्"),
        ("j", "ज्"),
        ("T", "ट्"),
        ("D", "ड्"),
        ("t", "त्"),
        ("d", "द्"),
        ("n", "न्"),
        ("p", "प्"),
        ("b", "ब्"),
        ("m", "म्"),
        ("y", "य्"),
        ("r", "र्"),
        ("l", "ल्"),
        ("v", "व्"),
        ("w", "व्"),
        ("s", "स्"),
        ("h", "ह्"),
        ("M", "ं"),
        ("H", "ः"),
    ] {
        rules.push(Rule::simple(pattern, template)?);
    }

    Ok(InputMethod::new("hi-translit", rules)
        .with_max_lookback(4)
        .with_context_window(2))
}
