//! # libindic
//!
//! Indic transliteration input methods built on libtranslit-core: rule
//! tables authored in code plus JSON definitions under `data/` for the
//! file loader.

pub mod devanagari;
pub mod iast;

pub use devanagari::hi_transliteration;
pub use iast::sanskrit_iast;

// Re-export the engine surface so binaries only need this crate.
pub use libtranslit_core::{
    EditEvent, Engine, InputMethod, JsonFileLoader, KeyResult, MethodLoader, MethodRegistry,
    PlainTextSurface, Rule, RuleError, TextSurface,
};

/// Register every built-in method into `registry`.
pub fn register_builtin(registry: &MethodRegistry) -> Result<(), Box<dyn std::error::Error>> {
    registry.register(hi_transliteration()?)?;
    registry.register(sanskrit_iast()?)?;
    Ok(())
}
