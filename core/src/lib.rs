//! libtranslit-core
//!
//! Rule-based, real-time transliteration engine shared by language-specific
//! crates (libindic and friends). Raw keystrokes typed in one script are
//! rewritten into a target script by ordered pattern tables keyed on
//! trailing-context matches; only the diverging suffix of the edited text is
//! replaced, in a single host-surface mutation per keystroke.
//!
//! Public API:
//! - `Rule` / `Replacement` - end-anchored transformation rules
//! - `InputMethod` - immutable, ordered rule table (or custom transform)
//! - `MethodRegistry` - id-keyed store of registered methods
//! - `ContextBuffer` - rolling window of recently typed characters
//! - `diff_replace` - minimal prefix-preserving edit computation
//! - `Engine` / `TextSurface` - per-surface keystroke orchestration
//! - `MethodLoader` / `JsonFileLoader` - external method definitions

pub mod rule;
pub use rule::{Replacement, Rule, RuleError, TransformFn};

pub mod method;
pub use method::{InputMethod, MethodRules};

pub mod registry;
pub use registry::{MethodRegistry, RegistryError};

pub mod context;
pub use context::ContextBuffer;

pub mod diff;
pub use diff::{diff_replace, divergence_index, ReplaceEdit};

pub mod engine;
pub use engine::{EditEvent, Engine, KeyResult, PlainTextSurface, TextSurface};

pub mod loader;
pub use loader::{JsonFileLoader, LoadError, MethodLoader, MethodSpec, RuleSpec};
