//! External method definitions.
//!
//! Rule tables are authored as data and supplied by an external source; the
//! engine only ever consumes already-registered tables. `MethodSpec` is the
//! JSON wire form, compiled into a validated `InputMethod` with all patterns
//! built up front. A table containing a malformed rule is rejected whole:
//! silently dropping one rule would shift positional precedence, which is
//! the table's semantics.

use crate::method::InputMethod;
use crate::registry::{MethodRegistry, RegistryError};
use crate::rule::{Rule, RuleError};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use thiserror::Error;
use tracing::{debug, warn};

/// Errors reported by method loading. A failed load leaves the registry and
/// every engine untouched.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("no definition found for input method {id:?}")]
    NotFound { id: String },
    #[error("failed to read method definition")]
    Io(#[from] std::io::Error),
    #[error("failed to parse method definition")]
    Parse(#[from] serde_json::Error),
    #[error(transparent)]
    Rule(#[from] RuleError),
    #[error(transparent)]
    Registry(#[from] RegistryError),
}

/// One rule in wire form. `context` present makes it a context rule.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuleSpec {
    pub pattern: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
    pub replacement: String,
}

impl RuleSpec {
    fn compile(&self) -> Result<Rule, RuleError> {
        match &self.context {
            Some(ctx) => Rule::context(&self.pattern, ctx, &self.replacement),
            None => Rule::simple(&self.pattern, &self.replacement),
        }
    }
}

/// A complete input method definition in wire form. Unset `max_lookback`
/// and `context_window` take the registration defaults (1 and 0).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MethodSpec {
    pub id: String,
    pub rules: Vec<RuleSpec>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alt_rules: Option<Vec<RuleSpec>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_lookback: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context_window: Option<usize>,
}

impl MethodSpec {
    pub fn from_json(json: &str) -> Result<Self, LoadError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Compile every rule and build the method. Rules keep their authored
    /// order; the first error aborts the whole table.
    pub fn compile(&self) -> Result<InputMethod, LoadError> {
        let rules = self
            .rules
            .iter()
            .map(RuleSpec::compile)
            .collect::<Result<Vec<_>, _>>()?;
        let mut method = InputMethod::new(&self.id, rules);

        if let Some(specs) = &self.alt_rules {
            let alt = specs
                .iter()
                .map(RuleSpec::compile)
                .collect::<Result<Vec<_>, _>>()?;
            method = method.with_alt_rules(alt);
        }
        if let Some(n) = self.max_lookback {
            method = method.with_max_lookback(n);
        }
        if let Some(n) = self.context_window {
            method = method.with_context_window(n);
        }
        Ok(method)
    }
}

/// Supplies `InputMethod` definitions from an external source.
pub trait MethodLoader {
    fn load(&self, id: &str) -> Result<InputMethod, LoadError>;
}

/// Loads `<dir>/<id>.json` definitions from a directory.
#[derive(Debug, Clone)]
pub struct JsonFileLoader {
    dir: PathBuf,
}

impl JsonFileLoader {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Load a definition and register it in one step.
    pub fn load_into(&self, id: &str, registry: &MethodRegistry) -> Result<(), LoadError> {
        let method = self.load(id)?;
        registry.register(method)?;
        Ok(())
    }
}

impl MethodLoader for JsonFileLoader {
    fn load(&self, id: &str) -> Result<InputMethod, LoadError> {
        let path = self.dir.join(format!("{id}.json"));
        if !path.exists() {
            warn!(%id, path = %path.display(), "method definition not found");
            return Err(LoadError::NotFound { id: id.to_string() });
        }
        let json = fs::read_to_string(&path)?;
        let spec = MethodSpec::from_json(&json)?;
        debug!(%id, rules = spec.rules.len(), "loaded method definition");
        spec.compile()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const UMLAUT_JSON: &str = r#"{
        "id": "de-umlaut",
        "rules": [
            { "pattern": "a", "replacement": "ä" },
            { "pattern": "o", "replacement": "ö" }
        ]
    }"#;

    #[test]
    fn parse_and_compile_with_defaults() {
        let spec = MethodSpec::from_json(UMLAUT_JSON).unwrap();
        let method = spec.compile().unwrap();
        assert_eq!(method.id(), "de-umlaut");
        assert_eq!(method.max_lookback(), 1);
        assert_eq!(method.context_window(), 0);
        assert_eq!(method.transliterate("a", "", false), "ä");
    }

    #[test]
    fn explicit_fields_override_defaults() {
        let json = r#"{
            "id": "ctx",
            "rules": [
                { "pattern": "h", "context": "k", "replacement": "ḫ" }
            ],
            "max_lookback": 3,
            "context_window": 2
        }"#;
        let method = MethodSpec::from_json(json).unwrap().compile().unwrap();
        assert_eq!(method.max_lookback(), 3);
        assert_eq!(method.context_window(), 2);
        assert_eq!(method.transliterate("h", "k", false), "ḫ");
        assert_eq!(method.transliterate("h", "", false), "h");
    }

    #[test]
    fn alt_rules_compile_separately() {
        let json = r#"{
            "id": "alt",
            "rules": [{ "pattern": "a", "replacement": "ä" }],
            "alt_rules": [{ "pattern": "a", "replacement": "å" }]
        }"#;
        let method = MethodSpec::from_json(json).unwrap().compile().unwrap();
        assert!(method.has_alt_rules());
        assert_eq!(method.transliterate("a", "", true), "å");
    }

    #[test]
    fn malformed_rule_rejects_the_whole_table() {
        let json = r#"{
            "id": "broken",
            "rules": [
                { "pattern": "a", "replacement": "ä" },
                { "pattern": "(", "replacement": "x" }
            ]
        }"#;
        let spec = MethodSpec::from_json(json).unwrap();
        assert!(matches!(spec.compile(), Err(LoadError::Rule(_))));
    }

    #[test]
    fn empty_pattern_rejects_the_whole_table() {
        let json = r#"{
            "id": "broken",
            "rules": [{ "pattern": "", "replacement": "x" }]
        }"#;
        let spec = MethodSpec::from_json(json).unwrap();
        assert!(matches!(
            spec.compile(),
            Err(LoadError::Rule(RuleError::EmptyPattern))
        ));
    }

    #[test]
    fn file_loader_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("de-umlaut.json"), UMLAUT_JSON).unwrap();

        let loader = JsonFileLoader::new(dir.path());
        let registry = MethodRegistry::new();
        loader.load_into("de-umlaut", &registry).unwrap();
        assert!(registry.lookup("de-umlaut").is_some());
    }

    #[test]
    fn missing_definition_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let loader = JsonFileLoader::new(dir.path());
        let registry = MethodRegistry::new();
        let err = loader.load_into("absent", &registry).unwrap_err();
        assert!(matches!(err, LoadError::NotFound { .. }));
        assert!(registry.is_empty());
    }

    #[test]
    fn failed_load_leaves_registry_untouched() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("broken.json"),
            r#"{ "id": "broken", "rules": [{ "pattern": "(", "replacement": "x" }] }"#,
        )
        .unwrap();

        let loader = JsonFileLoader::new(dir.path());
        let registry = MethodRegistry::new();
        assert!(loader.load_into("broken", &registry).is_err());
        assert!(registry.is_empty());
    }
}
