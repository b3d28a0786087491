//! Error types for builtin environment construction, symbol lookup, extension directives, and host configuration.
//!
//! All errors are `thiserror` enums that also implement `miette::Diagnostic` so the CLI (and an embedding compiler)
//! can render them with stable codes.

use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

use super::resources::ShaderStage;

/// Errors raised while building a builtin environment.
#[derive(Debug, Error, Diagnostic)]
pub enum BuiltinError {
    /// The embedding compiler asked for a stage this language version has no builtins for.
    #[error("unsupported shader stage: {0}")]
    #[diagnostic(
        code(glint::builtins::unsupported_stage),
        help("only vertex and fragment shaders are supported")
    )]
    UnsupportedStage(ShaderStage),

    /// A static builtin table collided with itself.
    #[error(transparent)]
    #[diagnostic(transparent)]
    Symbol(#[from] SymbolError),
}

/// Errors raised by symbol table insertion and lookup.
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
pub enum SymbolError {
    #[error("duplicate overload `{signature}`")]
    #[diagnostic(code(glint::symbols::duplicate_overload))]
    DuplicateOverload { signature: String },

    #[error("`{name}` is already defined in this scope")]
    #[diagnostic(code(glint::symbols::redefinition))]
    Redefinition { name: String },

    #[error("undeclared identifier `{name}`")]
    #[diagnostic(code(glint::symbols::undeclared))]
    UndeclaredIdentifier { name: String },

    #[error("`{name}` is not a function")]
    #[diagnostic(code(glint::symbols::not_a_function))]
    NotAFunction { name: String },

    #[error("no matching overload for `{call}`")]
    #[diagnostic(code(glint::symbols::no_matching_overload))]
    NoMatchingOverload { call: String },

    #[error("`{name}` requires extension {extension} to be enabled")]
    #[diagnostic(
        code(glint::symbols::extension_not_enabled),
        help("add `#extension {extension} : enable` to the shader")
    )]
    ExtensionNotEnabled { name: String, extension: &'static str },
}

/// Errors raised when applying an `#extension` directive.
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
pub enum ExtensionError {
    #[error("unknown extension behavior `{0}`")]
    #[diagnostic(code(glint::extensions::unknown_behavior))]
    UnknownBehavior(String),

    #[error("extension `all` cannot have `{0}` behavior")]
    #[diagnostic(code(glint::extensions::invalid_all_behavior))]
    InvalidAllBehavior(&'static str),

    #[error("extension `{0}` is not supported")]
    #[diagnostic(code(glint::extensions::unsupported))]
    Unsupported(String),
}

/// Errors raised while loading or validating host resources.
#[derive(Debug, Error, Diagnostic)]
pub enum ConfigError {
    #[error("failed to read resources file {path}")]
    #[diagnostic(code(glint::config::io))]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid resources JSON: {0}")]
    #[diagnostic(code(glint::config::json))]
    Json(#[from] serde_json::Error),

    #[error("invalid resources: {0}")]
    #[diagnostic(code(glint::config::invalid))]
    Invalid(String),
}
