//! Shareable metadata for `glint_core::lang` registries.
//!
//! Every vocabulary in `glint_core::lang` is **registry-first**: a stable id, one canonical spelling, and a short
//! description, living in a `const` table. This submodule provides the small metadata types reused across all of
//! them.
//!
//! ## Notes
//! - These types are `Copy` so registries can live in `const` tables.
//! - Metadata is meant for tooling/docs/diagnostics; the builder in `glint` decides what gets inserted where.

/// Describe where a vocabulary item comes from.
///
/// ## Examples
/// ```rust
/// use glint_core::lang::registry::Origin;
///
/// assert_eq!(Origin::Core.as_str(), "core");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Origin {
    /// Part of the GLSL ES 1.00 core language.
    Core,
    /// Only exists when a `GL_*` extension is supported by the host.
    Extension,
    /// Only exists in a restricted spec profile (CSS Shaders).
    Profile,
}

impl Origin {
    pub const fn as_str(self) -> &'static str {
        match self {
            Origin::Core => "core",
            Origin::Extension => "extension",
            Origin::Profile => "profile",
        }
    }
}

/// Shared metadata shape for registry items.
///
/// Registries that need extra per-item data should wrap this struct in their own info type.
#[derive(Debug, Clone, Copy)]
pub struct LangItemInfo<Id> {
    pub id: Id,
    pub canonical: &'static str,
    pub description: &'static str,
    pub origin: Origin,
}

/// Build a core-language registry entry.
pub const fn core<Id>(id: Id, canonical: &'static str, description: &'static str) -> LangItemInfo<Id> {
    LangItemInfo {
        id,
        canonical,
        description,
        origin: Origin::Core,
    }
}

/// Build an extension-provided registry entry.
pub const fn extension<Id>(id: Id, canonical: &'static str, description: &'static str) -> LangItemInfo<Id> {
    LangItemInfo {
        id,
        canonical,
        description,
        origin: Origin::Extension,
    }
}
