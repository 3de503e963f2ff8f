//! Integration tests for the built-in transliteration tables.
//!
//! Drives full keystroke sequences through an `Engine` bound to a
//! `PlainTextSurface`, applying the host's default insertion whenever the
//! engine passes a key through, which is the contract a real surface
//! adapter follows.

use libindic::{
    register_builtin, EditEvent, Engine, KeyResult, MethodRegistry, PlainTextSurface, TextSurface,
};
use std::sync::Arc;

fn engine_for(method: &str) -> Engine<PlainTextSurface> {
    let registry = MethodRegistry::new();
    register_builtin(&registry).expect("built-in tables must compile");
    let mut engine = Engine::new(PlainTextSurface::new(), Arc::new(registry));
    engine.activate();
    assert!(engine.set_method(method), "method {method} not registered");
    engine
}

fn type_char(engine: &mut Engine<PlainTextSurface>, ch: char, alt: bool) -> KeyResult {
    let (start, end) = engine.surface().caret_range();
    let mut event = EditEvent::char_over_selection(ch, start, end);
    if alt {
        event = event.with_alt();
    }
    let result = engine.handle_key(&event);
    if !result.is_handled() {
        engine.surface_mut().insert_at_caret(ch);
    }
    result
}

fn type_str(engine: &mut Engine<PlainTextSurface>, text: &str) {
    for ch in text.chars() {
        type_char(engine, ch, false);
    }
}

#[test]
fn devanagari_namaste() {
    let mut engine = engine_for("hi-translit");
    type_str(&mut engine, "namaste");
    assert_eq!(engine.surface().text(), "नमस्ते");
}

#[test]
fn devanagari_syllables() {
    for (typed, expected) in [
        ("ka", "क"),
        ("kha", "ख"),
        ("kaa", "का"),
        ("ki", "कि"),
        ("kii", "की"),
        ("kai", "कै"),
        ("a", "अ"),
        ("aa", "आ"),
        ("ai", "ऐ"),
        ("hindii", "हिन्दी"),
    ] {
        let mut engine = engine_for("hi-translit");
        type_str(&mut engine, typed);
        assert_eq!(engine.surface().text(), expected, "typing {typed:?}");
    }
}

#[test]
fn devanagari_vocalic_r_needs_successive_keys() {
    let mut engine = engine_for("hi-translit");
    type_str(&mut engine, "rr");
    assert_eq!(engine.surface().text(), "ऋ");

    // Backspace blanks the context, so a fresh r starts a conjunct instead.
    let mut engine = engine_for("hi-translit");
    type_str(&mut engine, "r");
    let (caret, _) = engine.surface().caret_range();
    engine.handle_key(&EditEvent::backspace(caret));
    type_str(&mut engine, "r");
    assert_eq!(engine.surface().text(), "र्र्");
}

#[test]
fn devanagari_unmapped_keys_pass_through() {
    let mut engine = engine_for("hi-translit");
    type_str(&mut engine, "x5 x");
    assert_eq!(engine.surface().text(), "x5 x");
}

#[test]
fn iast_words() {
    for (typed, expected) in [
        ("raama", "rāma"),
        ("k.r.s.na", "kṛṣṇa"),
        ("yoga.h", "yogaḥ"),
        ("j~naana", "jñāna"),
    ] {
        let mut engine = engine_for("sanskrit-iast");
        type_str(&mut engine, typed);
        assert_eq!(engine.surface().text(), expected, "typing {typed:?}");
    }
}

#[test]
fn iast_alt_layer() {
    let mut engine = engine_for("sanskrit-iast");
    type_char(&mut engine, 't', true);
    type_char(&mut engine, 'a', false);
    assert_eq!(engine.surface().text(), "ṭa");
}

#[test]
fn switching_between_methods_mid_stream() {
    let mut engine = engine_for("hi-translit");
    type_str(&mut engine, "ka");
    assert!(engine.set_method("sanskrit-iast"));
    type_str(&mut engine, " aa");
    assert_eq!(engine.surface().text(), "क ā");
}

#[test]
fn unknown_method_keeps_previous_table() {
    let mut engine = engine_for("hi-translit");
    assert!(!engine.set_method("klingon"));
    assert_eq!(engine.method_id(), Some("hi-translit"));
    type_str(&mut engine, "ka");
    assert_eq!(engine.surface().text(), "क");
}

#[test]
fn deactivated_engine_leaves_text_alone() {
    let mut engine = engine_for("hi-translit");
    engine.deactivate();
    type_str(&mut engine, "namaste");
    assert_eq!(engine.surface().text(), "namaste");
}
