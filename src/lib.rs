#![forbid(unsafe_code)]
//! glint: the builtin symbol environment of a GLSL ES 1.00 shader compiler front end.
//!
//! Before a shader compiler can type-check source it needs the language's predeclared world: builtin function
//! overloads, stage-specific variables such as `gl_FragColor`, implementation-defined constants, intrinsic operator
//! relations, and which extensions the host supports. This crate builds that world for one compilation unit.
//!
//! ## Panic Policy
//!
//! - **Library code**: returns `Result` and propagates with `?`. The `cli` module enforces
//!   `#![deny(clippy::unwrap_used)]`.
//! - **Test code**: `.unwrap()` and `.expect()` are acceptable in tests.
//! - **True invariants**: registry lookups that can only fail on a malformed static table panic with a message.

pub mod cli;
pub mod frontend;

pub use frontend::builtins::{self, BuiltinEnvironment, build_environment};
pub use frontend::errors;
pub use frontend::extensions;
pub use frontend::resources::{ShaderResources, ShaderStage, SpecProfile};
pub use frontend::symbols;
pub use frontend::types;
