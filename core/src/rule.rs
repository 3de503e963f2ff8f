//! Transformation rules.
//!
//! A rule pairs an end-anchored match pattern with a replacement, optionally
//! guarded by a second end-anchored pattern tested against the context of
//! previously typed characters. Patterns compile once, at construction; a
//! malformed rule can never enter a table.

use regex::Regex;
use thiserror::Error;

/// Pure replacement function: `(matched_input, context) -> output`.
pub type TransformFn = fn(&str, &str) -> String;

/// Errors surfaced when building a rule (registration-time configuration
/// errors; never raised during transliteration).
#[derive(Debug, Error)]
pub enum RuleError {
    #[error("rule has no match pattern")]
    EmptyPattern,
    #[error("invalid match pattern {pattern:?}")]
    BadPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },
    #[error("invalid context pattern {pattern:?}")]
    BadContext {
        pattern: String,
        #[source]
        source: regex::Error,
    },
}

/// How a matched rule rewrites the input tail.
#[derive(Debug, Clone)]
pub enum Replacement {
    /// Substitution template; `$1`-style references expand capture groups
    /// from the match pattern.
    Template(String),
    /// Function of the matched text and the current context.
    Transform(TransformFn),
}

/// A single transliteration rule.
///
/// The match pattern is wrapped as `(?:pattern)$` so the whole pattern is
/// anchored to the end of the tested string without disturbing capture-group
/// numbering. A rule with a context pattern only fires when the context also
/// matches at its end.
#[derive(Debug, Clone)]
pub struct Rule {
    pattern: Regex,
    context: Option<Regex>,
    replacement: Replacement,
}

fn anchored(pattern: &str) -> Result<Regex, regex::Error> {
    Regex::new(&format!("(?:{pattern})$"))
}

impl Rule {
    /// Context-free rule with a substitution template.
    pub fn simple(pattern: &str, template: &str) -> Result<Self, RuleError> {
        Self::build(pattern, None, Replacement::Template(template.to_string()))
    }

    /// Rule guarded by a context pattern.
    pub fn context(pattern: &str, context: &str, template: &str) -> Result<Self, RuleError> {
        Self::build(
            pattern,
            Some(context),
            Replacement::Template(template.to_string()),
        )
    }

    /// Context-free rule with a functional replacement.
    pub fn transform(pattern: &str, f: TransformFn) -> Result<Self, RuleError> {
        Self::build(pattern, None, Replacement::Transform(f))
    }

    /// Context-guarded rule with a functional replacement.
    pub fn context_transform(
        pattern: &str,
        context: &str,
        f: TransformFn,
    ) -> Result<Self, RuleError> {
        Self::build(pattern, Some(context), Replacement::Transform(f))
    }

    fn build(
        pattern: &str,
        context: Option<&str>,
        replacement: Replacement,
    ) -> Result<Self, RuleError> {
        if pattern.is_empty() {
            return Err(RuleError::EmptyPattern);
        }
        let compiled = anchored(pattern).map_err(|source| RuleError::BadPattern {
            pattern: pattern.to_string(),
            source,
        })?;
        let context = match context {
            Some(c) => Some(anchored(c).map_err(|source| RuleError::BadContext {
                pattern: c.to_string(),
                source,
            })?),
            None => None,
        };
        Ok(Self {
            pattern: compiled,
            context,
            replacement,
        })
    }

    /// Whether this rule carries a context guard.
    pub fn is_context_rule(&self) -> bool {
        self.context.is_some()
    }

    /// Test the match pattern against the end of `input`.
    pub fn matches(&self, input: &str) -> bool {
        self.pattern.is_match(input)
    }

    /// Test the context guard against the end of `context`.
    /// Vacuously true for context-free rules.
    pub fn matches_context(&self, context: &str) -> bool {
        match &self.context {
            Some(re) => re.is_match(context),
            None => true,
        }
    }

    /// Rewrite the end-anchored match in `input`.
    ///
    /// Callers are expected to have checked `matches` first; on a non-match
    /// the input comes back unchanged.
    pub fn apply(&self, input: &str, context: &str) -> String {
        match &self.replacement {
            Replacement::Template(template) => {
                self.pattern.replace(input, template.as_str()).into_owned()
            }
            Replacement::Transform(f) => match self.pattern.find(input) {
                Some(m) => {
                    let mut out = String::with_capacity(input.len());
                    out.push_str(&input[..m.start()]);
                    out.push_str(&f(m.as_str(), context));
                    out
                }
                None => input.to_string(),
            },
        }
    }
}
