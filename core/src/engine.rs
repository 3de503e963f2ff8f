//! Per-surface transliteration engine.
//!
//! The engine binds one host text surface to the registry. Each keystroke is
//! handled to completion: read the caret and a lookback window from the
//! surface, transliterate against the active method and context, then emit at
//! most one replace instruction for the diverging suffix. Keys the engine
//! does not consume fall through to the host's default insertion.
//!
//! All offsets exchanged with the surface are character offsets.

use crate::context::ContextBuffer;
use crate::diff::diff_replace;
use crate::method::InputMethod;
use crate::registry::MethodRegistry;
use std::sync::Arc;
use tracing::{debug, warn};

/// Host text surface the engine edits through.
///
/// Legacy caret/selection handling belongs behind this trait, in the host
/// adapter; the engine only ever sees character offsets.
pub trait TextSurface {
    /// Current selection as `(start, end)` character offsets; equal when
    /// there is no selection.
    fn caret_range(&self) -> (usize, usize);

    /// At most `max_chars` characters immediately preceding `before`.
    fn recent_text(&self, before: usize, max_chars: usize) -> String;

    /// Replace the characters in `start..end` with `text` and move the
    /// caret to `start + chars(text)`.
    fn replace_range(&mut self, start: usize, end: usize, text: &str);
}

/// In-memory text surface: a string plus a caret. Used by tests and demos,
/// and as a reference implementation for host adapters.
#[derive(Debug, Clone, Default)]
pub struct PlainTextSurface {
    text: String,
    caret_start: usize,
    caret_end: usize,
}

impl PlainTextSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Surface pre-filled with `text`, caret at the end.
    pub fn with_text(text: impl Into<String>) -> Self {
        let text = text.into();
        let caret = text.chars().count();
        Self {
            text,
            caret_start: caret,
            caret_end: caret,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Collapse the caret to `pos`.
    pub fn set_caret(&mut self, pos: usize) {
        self.caret_start = pos;
        self.caret_end = pos;
    }

    /// Select `start..end`.
    pub fn select(&mut self, start: usize, end: usize) {
        self.caret_start = start;
        self.caret_end = end;
    }

    /// The host's default behavior for an unconsumed printable key:
    /// replace the selection with the character, caret after it.
    pub fn insert_at_caret(&mut self, ch: char) {
        let (start, end) = (self.caret_start, self.caret_end);
        self.replace_range(start, end, &ch.to_string());
    }
}

impl TextSurface for PlainTextSurface {
    fn caret_range(&self) -> (usize, usize) {
        (self.caret_start, self.caret_end)
    }

    fn recent_text(&self, before: usize, max_chars: usize) -> String {
        if max_chars == 0 {
            return String::new();
        }
        let start = before.saturating_sub(max_chars);
        self.text.chars().skip(start).take(before - start).collect()
    }

    fn replace_range(&mut self, start: usize, end: usize, text: &str) {
        let head: String = self.text.chars().take(start).collect();
        let tail: String = self.text.chars().skip(end).collect();
        self.text = format!("{head}{text}{tail}");
        let caret = start + text.chars().count();
        self.caret_start = caret;
        self.caret_end = caret;
    }
}

/// One edit event delivered by the host surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditEvent {
    /// The typed character.
    pub ch: char,
    /// Selection start at the time of the keystroke (char offset).
    pub caret_start: usize,
    /// Selection end; equals `caret_start` when nothing is selected.
    pub caret_end: usize,
    /// Alt/AltGr held.
    pub alt: bool,
    /// Ctrl or Meta held.
    pub ctrl_or_meta: bool,
    /// ASCII control character.
    pub is_control: bool,
    /// Backspace key.
    pub is_backspace: bool,
}

impl EditEvent {
    /// Plain printable keystroke with a collapsed caret.
    pub fn char_at(ch: char, caret: usize) -> Self {
        Self {
            ch,
            caret_start: caret,
            caret_end: caret,
            alt: false,
            ctrl_or_meta: false,
            is_control: ch.is_ascii_control(),
            is_backspace: false,
        }
    }

    /// Keystroke typed over a selection.
    pub fn char_over_selection(ch: char, caret_start: usize, caret_end: usize) -> Self {
        Self {
            caret_start,
            caret_end,
            ..Self::char_at(ch, caret_start)
        }
    }

    pub fn backspace(caret: usize) -> Self {
        Self {
            is_backspace: true,
            ..Self::char_at('\u{8}', caret)
        }
    }

    pub fn with_alt(mut self) -> Self {
        self.alt = true;
        self
    }

    pub fn with_ctrl_or_meta(mut self) -> Self {
        self.ctrl_or_meta = true;
        self
    }
}

/// Result of handling a key event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyResult {
    /// The engine consumed the key and performed the surface mutation; the
    /// host must suppress its default insertion.
    Handled,
    /// Pass through: the host applies its default behavior.
    NotHandled,
}

impl KeyResult {
    pub fn is_handled(self) -> bool {
        self == KeyResult::Handled
    }
}

/// Transliteration engine bound to one text surface.
///
/// Exactly one engine per bound surface; engine and context state are never
/// shared. The registry is shared read-only across engines.
pub struct Engine<S: TextSurface> {
    surface: S,
    registry: Arc<MethodRegistry>,
    method: Option<Arc<InputMethod>>,
    context: ContextBuffer,
    active: bool,
}

impl<S: TextSurface> Engine<S> {
    /// Bind a surface. The engine starts inactive with no method selected.
    pub fn new(surface: S, registry: Arc<MethodRegistry>) -> Self {
        Self {
            surface,
            registry,
            method: None,
            context: ContextBuffer::new(0),
            active: false,
        }
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    /// Unbind, returning the surface.
    pub fn into_surface(self) -> S {
        self.surface
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn activate(&mut self) {
        self.active = true;
    }

    pub fn deactivate(&mut self) {
        self.active = false;
    }

    pub fn toggle(&mut self) {
        self.active = !self.active;
    }

    /// Id of the currently selected method, if any.
    pub fn method_id(&self) -> Option<&str> {
        self.method.as_deref().map(InputMethod::id)
    }

    pub fn context(&self) -> &ContextBuffer {
        &self.context
    }

    /// Select a method by id. On a lookup miss the previous method (or none)
    /// is kept and `false` is returned; the surface is never touched.
    pub fn set_method(&mut self, id: &str) -> bool {
        match self.registry.lookup(id) {
            Some(method) => {
                self.context.set_window(method.context_window());
                debug!(%id, "input method selected");
                self.method = Some(method);
                true
            }
            None => {
                warn!(%id, "unknown input method, keeping previous");
                false
            }
        }
    }

    /// Drop the selected method; subsequent keystrokes pass through.
    pub fn clear_method(&mut self) {
        self.method = None;
        self.context.set_window(0);
    }

    /// Handle one keystroke to completion.
    ///
    /// Every event is either a passthrough or a transliteration attempt
    /// yielding at most one surface mutation; nothing is left half-applied.
    pub fn handle_key(&mut self, event: &EditEvent) -> KeyResult {
        if !self.active {
            return KeyResult::NotHandled;
        }
        let Some(method) = self.method.clone() else {
            return KeyResult::NotHandled;
        };

        if event.is_backspace {
            self.context.reset();
            return KeyResult::NotHandled;
        }

        // Control characters other than linefeed, Alt without an alternate
        // table, and Ctrl/Meta chords blank the context and pass through.
        if (event.is_control && event.ch != '\n')
            || (event.alt && !method.has_alt_rules())
            || event.ctrl_or_meta
        {
            self.context.reset();
            return KeyResult::NotHandled;
        }

        // Lookback window plus the character that has not been inserted yet.
        let mut input = self
            .surface
            .recent_text(event.caret_start, method.max_lookback());
        input.push(event.ch);

        let replacement = method.transliterate(&input, self.context.as_str(), event.alt);
        self.context.push(event.ch);

        match diff_replace(&input, &replacement, event.caret_start, event.caret_end) {
            Some(edit) => {
                self.surface.replace_range(edit.start, edit.end, &edit.text);
                KeyResult::Handled
            }
            None => KeyResult::NotHandled,
        }
    }
}
