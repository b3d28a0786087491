//! glint shader front end
//!
//! This module contains the pieces a shader compiler sets up before it parses source:
//! - `resources`: stage, spec profile and host capability/limit inputs
//! - `types`: type descriptors
//! - `symbols`: symbol table and level management
//! - `extensions`: extension behavior table and `#extension` handling
//! - `builtins`: builtin environment construction
//! - `errors`: error types

pub mod builtins;
pub mod errors;
pub mod extensions;
pub mod resources;
pub mod symbols;
pub mod types;
