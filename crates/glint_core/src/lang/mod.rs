//! Shading-language vocabulary registries.
//!
//! Callers work with **stable IDs** (e.g. [`types::ElementKind`], [`operators::IntrinsicOp`],
//! [`extensions::ExtensionId`]) and look up spellings/metadata via registry tables instead of matching on strings.
//!
//! ## Examples
//! ```rust
//! use glint_core::lang::extensions::{self, ExtensionId};
//!
//! assert_eq!(extensions::from_str("GL_EXT_frag_depth"), Some(ExtensionId::ExtFragDepth));
//! assert_eq!(extensions::as_str(ExtensionId::ExtFragDepth), "GL_EXT_frag_depth");
//! ```

pub mod builtins;
pub mod extensions;
pub mod operators;
pub mod registry;
pub mod types;
