//! Rolling context buffer.
//!
//! Keeps the last few raw keystrokes committed on a surface so context rules
//! can disambiguate otherwise-identical matches. Bounded FIFO: appending past
//! the window drops characters from the front. The buffer holds typed keys,
//! not transliterated output.

/// Bounded rolling window of recently typed characters.
#[derive(Debug, Clone, Default)]
pub struct ContextBuffer {
    buffer: String,
    window: usize,
}

impl ContextBuffer {
    /// Create a buffer holding at most `window` characters.
    pub fn new(window: usize) -> Self {
        Self {
            buffer: String::new(),
            window,
        }
    }

    /// Append a character, then truncate from the front down to the window.
    pub fn push(&mut self, ch: char) {
        if self.window == 0 {
            return;
        }
        self.buffer.push(ch);
        let count = self.buffer.chars().count();
        if count > self.window {
            let excess = count - self.window;
            let cut = self
                .buffer
                .char_indices()
                .nth(excess)
                .map(|(i, _)| i)
                .unwrap_or(self.buffer.len());
            self.buffer.drain(..cut);
        }
    }

    /// Empty the buffer. Triggered by backspace, control characters and
    /// modifier chords; see `Engine::handle_key`.
    pub fn reset(&mut self) {
        self.buffer.clear();
    }

    pub fn as_str(&self) -> &str {
        &self.buffer
    }

    /// Length in characters.
    pub fn len(&self) -> usize {
        self.buffer.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    pub fn window(&self) -> usize {
        self.window
    }

    /// Resize the window and drop the old contents. Used when the engine
    /// switches input methods.
    pub fn set_window(&mut self, window: usize) {
        self.window = window;
        self.reset();
    }
}
