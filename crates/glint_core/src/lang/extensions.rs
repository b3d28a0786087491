//! Extension vocabulary.
//!
//! The five extensions a host may advertise to shaders. Their spellings are what shader source names in
//! `#extension` directives and what the extension behavior table is keyed by.
//!
//! ## Notes
//! - Lookup via [`from_str`] is **case-sensitive**.
//! - `all` is a directive keyword, not an extension; see [`ALL_EXTENSIONS`].

use super::registry::{self, LangItemInfo};

/// Directive target that addresses every extension at once (`#extension all : warn`).
pub const ALL_EXTENSIONS: &str = "all";

/// Stable identifier for a supported extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ExtensionId {
    OesStandardDerivatives,
    OesEglImageExternal,
    ArbTextureRectangle,
    ExtDrawBuffers,
    ExtFragDepth,
}

pub type ExtensionInfo = LangItemInfo<ExtensionId>;

/// Registry of all extensions, in seeding order.
pub const EXTENSIONS: &[ExtensionInfo] = &[
    registry::extension(
        ExtensionId::OesStandardDerivatives,
        "GL_OES_standard_derivatives",
        "Fragment derivative functions dFdx, dFdy and fwidth.",
    ),
    registry::extension(
        ExtensionId::OesEglImageExternal,
        "GL_OES_EGL_image_external",
        "samplerExternalOES and its texture lookups.",
    ),
    registry::extension(
        ExtensionId::ArbTextureRectangle,
        "GL_ARB_texture_rectangle",
        "sampler2DRect and texture2DRect lookups.",
    ),
    registry::extension(
        ExtensionId::ExtDrawBuffers,
        "GL_EXT_draw_buffers",
        "Writing more than one gl_FragData element.",
    ),
    registry::extension(
        ExtensionId::ExtFragDepth,
        "GL_EXT_frag_depth",
        "Fragment depth output gl_FragDepthEXT.",
    ),
];

/// Return the canonical spelling for an extension.
pub fn as_str(id: ExtensionId) -> &'static str {
    info_for(id).canonical
}

/// Return the full metadata entry for an extension.
///
/// ## Panics
/// - If the registry is missing an entry for `id` (this indicates a programming error).
pub fn info_for(id: ExtensionId) -> &'static ExtensionInfo {
    EXTENSIONS
        .iter()
        .find(|e| e.id == id)
        .expect("extension info missing")
}

/// Resolve an extension spelling.
pub fn from_str(name: &str) -> Option<ExtensionId> {
    EXTENSIONS.iter().find(|e| e.canonical == name).map(|e| e.id)
}
