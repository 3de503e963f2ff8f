//! Process-wide input method registry.
//!
//! Maps method ids to immutable rule tables. Registration overwrites any
//! previous entry under the same id; lookups hand out shared `Arc` clones,
//! so tables are read-only and safely shared by any number of engines.

use crate::method::InputMethod;
use ahash::AHashMap;
use std::sync::{Arc, RwLock};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("input method has an empty id")]
    EmptyId,
}

/// Store of registered input methods, keyed by id.
///
/// Created empty and passed to engines as `Arc<MethodRegistry>`; loaders may
/// keep registering methods after engines exist.
#[derive(Default)]
pub struct MethodRegistry {
    methods: RwLock<AHashMap<String, Arc<InputMethod>>>,
}

impl MethodRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a method. Re-registration under the same id overwrites the
    /// previous table; engines holding the old `Arc` keep using it until
    /// they switch methods.
    pub fn register(&self, method: InputMethod) -> Result<(), RegistryError> {
        if method.id().is_empty() {
            return Err(RegistryError::EmptyId);
        }
        let id = method.id().to_string();
        let previous = self
            .methods
            .write()
            .expect("registry lock poisoned")
            .insert(id.clone(), Arc::new(method));
        debug!(%id, replaced = previous.is_some(), "registered input method");
        Ok(())
    }

    /// Look up a method by id. `None` is the lookup-miss case; callers keep
    /// whatever method they had.
    pub fn lookup(&self, id: &str) -> Option<Arc<InputMethod>> {
        self.methods
            .read()
            .expect("registry lock poisoned")
            .get(id)
            .cloned()
    }

    pub fn len(&self) -> usize {
        self.methods.read().expect("registry lock poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Ids of all registered methods, unordered.
    pub fn ids(&self) -> Vec<String> {
        self.methods
            .read()
            .expect("registry lock poisoned")
            .keys()
            .cloned()
            .collect()
    }
}
