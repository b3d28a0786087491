//! Provide the canonical shading-language vocabulary for the glint shader front end.
//!
//! This crate is intentionally small and dependency-free. It contains deterministic, `const` data that both the
//! builtin environment builder and tooling (dumps, docs, diagnostics) read from:
//! - type spellings (`float`, `vec3`, `sampler2D`, `mediump`, ...),
//! - intrinsic operator tags and the builtin-name → operator relation table,
//! - the extension registry,
//! - the declarative builtin overload tables.
//!
//! ## Notes
//!
//! - This is a “vocabulary core” crate: **no IO**, no global state, and no compiler-specific types.
//! - Symbol tables, type descriptors, and host resources live in the `glint` crate.

pub mod lang;
