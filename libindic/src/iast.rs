//! IAST romanization (`sanskrit-iast`).
//!
//! Latin-to-Latin: doubled vowels take macrons, dot-prefixed consonants take
//! the underdot, and a few digraphs cover the palatals. The alternate table
//! maps single keys straight to their accented forms while AltGr is held.

use libtranslit_core::{InputMethod, Rule, RuleError};

/// Build the `sanskrit-iast` input method.
pub fn sanskrit_iast() -> Result<InputMethod, RuleError> {
    let mut rules = Vec::new();
    for (pattern, template) in [
        ("aa", "ā"),
        ("ii", "ī"),
        ("uu", "ū"),
        (r"\.t", "ṭ"),
        (r"\.d", "ḍ"),
        (r"\.n", "ṇ"),
        (r"\.s", "ṣ"),
        (r"\.m", "ṃ"),
        (r"\.h", "ḥ"),
        (r"\.r", "ṛ"),
        (r"\.l", "ḷ"),
        ("~n", "ñ"),
        ("'s", "ś"),
        ("'n", "ṅ"),
    ] {
        rules.push(Rule::simple(pattern, template)?);
    }

    let mut alt = Vec::new();
    for (pattern, template) in [
        ("a", "ā"),
        ("i", "ī"),
        ("u", "ū"),
        ("t", "ṭ"),
        ("d", "ḍ"),
        ("n", "ṇ"),
        ("s", "ṣ"),
        ("m", "ṃ"),
        ("h", "ḥ"),
        ("r", "ṛ"),
        ("l", "ḷ"),
    ] {
        alt.push(Rule::simple(pattern, template)?);
    }

    Ok(InputMethod::new("sanskrit-iast", rules)
        .with_alt_rules(alt)
        .with_max_lookback(2))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_cleanly() {
        let method = sanskrit_iast().unwrap();
        assert_eq!(method.id(), "sanskrit-iast");
        assert!(method.has_alt_rules());
        assert_eq!(method.context_window(), 0);
    }

    #[test]
    fn doubled_vowels_take_macrons() {
        let method = sanskrit_iast().unwrap();
        assert_eq!(method.transliterate("raa", "", false), "rā");
        assert_eq!(method.transliterate("ii", "", false), "ī");
    }

    #[test]
    fn dot_prefix_takes_the_underdot() {
        let method = sanskrit_iast().unwrap();
        assert_eq!(method.transliterate("a.t", "", false), "aṭ");
        assert_eq!(method.transliterate(".h", "", false), "ḥ");
    }

    #[test]
    fn dot_requires_the_literal_dot() {
        // The pattern dot is escaped; a plain t does not transliterate.
        let method = sanskrit_iast().unwrap();
        assert_eq!(method.transliterate("at", "", false), "at");
    }

    #[test]
    fn alt_table_maps_single_keys() {
        let method = sanskrit_iast().unwrap();
        assert_eq!(method.transliterate("a", "", true), "ā");
        assert_eq!(method.transliterate("t", "", true), "ṭ");
        // Primary rules are not consulted under alt.
        assert_eq!(method.transliterate("aa", "", true), "aā");
    }
}
