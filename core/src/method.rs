//! Input method definitions.
//!
//! An `InputMethod` is either an ordered rule table (with an optional
//! alternate table used while AltGr is held) or a single custom transform
//! covering the whole method. Tables are scanned linearly and the first
//! matching rule wins; table order is the sole disambiguator, so a later,
//! more specific context rule never overrides an earlier match.

use crate::rule::{Rule, TransformFn};
use tracing::trace;

/// Rule source for a method: an ordered table or a whole-table transform.
#[derive(Debug, Clone)]
pub enum MethodRules {
    Table {
        rules: Vec<Rule>,
        alt_rules: Option<Vec<Rule>>,
    },
    Custom(TransformFn),
}

/// An immutable, ordered transliteration table for one input method.
///
/// `max_lookback` bounds how many committed characters the engine reads back
/// from the caret when building the raw input tail; it must cover the longest
/// literal a match pattern can consume. `context_window` sizes the rolling
/// buffer of previously typed keys tested by context rules.
#[derive(Debug, Clone)]
pub struct InputMethod {
    id: String,
    rules: MethodRules,
    max_lookback: usize,
    context_window: usize,
}

impl InputMethod {
    /// New method from an ordered rule table.
    /// Defaults: `max_lookback = 1`, `context_window = 0`.
    pub fn new(id: impl Into<String>, rules: Vec<Rule>) -> Self {
        Self {
            id: id.into(),
            rules: MethodRules::Table {
                rules,
                alt_rules: None,
            },
            max_lookback: 1,
            context_window: 0,
        }
    }

    /// New method backed entirely by a custom transform function.
    pub fn custom(id: impl Into<String>, f: TransformFn) -> Self {
        Self {
            id: id.into(),
            rules: MethodRules::Custom(f),
            max_lookback: 1,
            context_window: 0,
        }
    }

    /// Attach an alternate (AltGr) rule table. No effect on custom methods.
    pub fn with_alt_rules(mut self, alt: Vec<Rule>) -> Self {
        if let MethodRules::Table { alt_rules, .. } = &mut self.rules {
            *alt_rules = Some(alt);
        }
        self
    }

    pub fn with_max_lookback(mut self, chars: usize) -> Self {
        self.max_lookback = chars;
        self
    }

    pub fn with_context_window(mut self, chars: usize) -> Self {
        self.context_window = chars;
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn max_lookback(&self) -> usize {
        self.max_lookback
    }

    pub fn context_window(&self) -> usize {
        self.context_window
    }

    pub fn rules(&self) -> &MethodRules {
        &self.rules
    }

    /// Whether an alternate table is defined. Alt keystrokes on a method
    /// without one are passed through untranslated.
    pub fn has_alt_rules(&self) -> bool {
        matches!(
            &self.rules,
            MethodRules::Table {
                alt_rules: Some(_),
                ..
            }
        )
    }

    /// Transliterate the raw input tail.
    ///
    /// Scans the active table in order and applies the first rule whose match
    /// pattern (and context guard, if any) holds; later rules are never
    /// consulted. With no matching rule the input is returned unchanged:
    /// a defined no-op, not an error.
    pub fn transliterate(&self, input: &str, context: &str, alt_gr: bool) -> String {
        let rules = match &self.rules {
            MethodRules::Custom(f) => return f(input, context),
            MethodRules::Table { rules, alt_rules } => {
                if alt_gr {
                    alt_rules.as_deref().unwrap_or(rules.as_slice())
                } else {
                    rules.as_slice()
                }
            }
        };

        for (index, rule) in rules.iter().enumerate() {
            if !rule.matches(input) {
                continue;
            }
            if !rule.matches_context(context) {
                continue;
            }
            let output = rule.apply(input, context);
            trace!(method = %self.id, index, %input, %output, "rule matched");
            return output;
        }

        input.to_string()
    }
}
