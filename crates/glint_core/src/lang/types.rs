//! Type vocabulary: element kinds, precisions, storage qualifiers, and their GLSL spellings.
//!
//! This is vocabulary only (spellings + metadata). Concrete type descriptors live in `glint::frontend::types`.
//!
//! ## Notes
//! - Lookup via [`parse_spelling`] is **case-sensitive**, like the language itself.
//! - Vector/matrix spellings are derived from `(kind, size)` rather than enumerated one by one.
//!
//! ## Examples
//! ```rust
//! use glint_core::lang::types::{self, ElementKind, Spelling};
//!
//! assert_eq!(types::vector_spelling(ElementKind::Float, 3), Some("vec3"));
//! assert_eq!(types::vector_spelling(ElementKind::Bool, 1), Some("bool"));
//! assert_eq!(
//!     types::parse_spelling("ivec2"),
//!     Some(Spelling { kind: ElementKind::Int, size: 2, is_matrix: false })
//! );
//! ```

use super::registry::{self, LangItemInfo};

/// Element kind of a shader value type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ElementKind {
    Float,
    Int,
    Bool,
    Sampler2D,
    SamplerCube,
    Sampler2DRect,
    SamplerExternal,
}

impl ElementKind {
    pub const fn is_sampler(self) -> bool {
        matches!(
            self,
            ElementKind::Sampler2D | ElementKind::SamplerCube | ElementKind::Sampler2DRect | ElementKind::SamplerExternal
        )
    }

    /// Precision qualifiers only apply to float and int values.
    pub const fn takes_precision(self) -> bool {
        matches!(self, ElementKind::Float | ElementKind::Int)
    }
}

pub type ElementKindInfo = LangItemInfo<ElementKind>;

/// Registry of element kinds. `canonical` is the scalar spelling.
pub const ELEMENT_KINDS: &[ElementKindInfo] = &[
    registry::core(ElementKind::Float, "float", "Floating-point scalar."),
    registry::core(ElementKind::Int, "int", "Signed integer scalar."),
    registry::core(ElementKind::Bool, "bool", "Boolean scalar."),
    registry::core(ElementKind::Sampler2D, "sampler2D", "Handle to a 2D texture."),
    registry::core(ElementKind::SamplerCube, "samplerCube", "Handle to a cube map texture."),
    registry::extension(
        ElementKind::Sampler2DRect,
        "sampler2DRect",
        "Handle to a rectangle texture (GL_ARB_texture_rectangle).",
    ),
    registry::extension(
        ElementKind::SamplerExternal,
        "samplerExternalOES",
        "Handle to an external EGL image (GL_OES_EGL_image_external).",
    ),
];

/// Precision qualifier. `Unspecified` renders as the empty string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub enum Precision {
    #[default]
    Unspecified,
    Low,
    Medium,
    High,
}

impl Precision {
    pub const fn as_str(self) -> &'static str {
        match self {
            Precision::Unspecified => "",
            Precision::Low => "lowp",
            Precision::Medium => "mediump",
            Precision::High => "highp",
        }
    }
}

/// Storage qualifier attached to a variable or constant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub enum StorageQualifier {
    #[default]
    Global,
    Const,
    Uniform,
    FragmentColorOutput,
    FragmentDataOutput,
    FragmentDepthOutput,
    FragCoordInput,
    FrontFacingInput,
    PointCoordInput,
    VertexPositionOutput,
    PointSizeOutput,
}

pub type StorageQualifierInfo = LangItemInfo<StorageQualifier>;

pub const STORAGE_QUALIFIERS: &[StorageQualifierInfo] = &[
    registry::core(StorageQualifier::Global, "global", "Ordinary global storage."),
    registry::core(StorageQualifier::Const, "const", "Compile-time constant."),
    registry::core(StorageQualifier::Uniform, "uniform", "Read-only value supplied by the host."),
    registry::core(StorageQualifier::FragmentColorOutput, "FragColor", "Fragment color output."),
    registry::core(StorageQualifier::FragmentDataOutput, "FragData", "Indexed fragment data output."),
    registry::extension(StorageQualifier::FragmentDepthOutput, "FragDepth", "Fragment depth output."),
    registry::core(StorageQualifier::FragCoordInput, "FragCoord", "Window-relative fragment position."),
    registry::core(StorageQualifier::FrontFacingInput, "FrontFacing", "Whether the primitive faces front."),
    registry::core(StorageQualifier::PointCoordInput, "PointCoord", "Position within a point sprite."),
    registry::core(StorageQualifier::VertexPositionOutput, "Position", "Clip-space vertex position."),
    registry::core(StorageQualifier::PointSizeOutput, "PointSize", "Rasterized point size."),
];

/// Return the canonical scalar spelling of an element kind.
pub fn as_str(kind: ElementKind) -> &'static str {
    ELEMENT_KINDS
        .iter()
        .find(|k| k.id == kind)
        .map(|k| k.canonical)
        .unwrap_or("<unknown>")
}

/// Return the display spelling of a storage qualifier.
pub fn qualifier_str(qualifier: StorageQualifier) -> &'static str {
    STORAGE_QUALIFIERS
        .iter()
        .find(|q| q.id == qualifier)
        .map(|q| q.canonical)
        .unwrap_or("<unknown>")
}

/// Return the GLSL spelling of a scalar or vector of `kind` with `size` components.
///
/// ## Returns
/// - `None` when the combination does not exist (e.g. `size` outside 1..=4, or a sampler vector).
pub fn vector_spelling(kind: ElementKind, size: u8) -> Option<&'static str> {
    let spelling = match (kind, size) {
        (ElementKind::Float, 2) => "vec2",
        (ElementKind::Float, 3) => "vec3",
        (ElementKind::Float, 4) => "vec4",
        (ElementKind::Int, 2) => "ivec2",
        (ElementKind::Int, 3) => "ivec3",
        (ElementKind::Int, 4) => "ivec4",
        (ElementKind::Bool, 2) => "bvec2",
        (ElementKind::Bool, 3) => "bvec3",
        (ElementKind::Bool, 4) => "bvec4",
        (_, 1) => as_str(kind),
        _ => return None,
    };
    Some(spelling)
}

/// Return the GLSL spelling of a square float matrix.
pub fn matrix_spelling(size: u8) -> Option<&'static str> {
    match size {
        2 => Some("mat2"),
        3 => Some("mat3"),
        4 => Some("mat4"),
        _ => None,
    }
}

/// Decoded shape of a basic-type spelling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Spelling {
    pub kind: ElementKind,
    pub size: u8,
    pub is_matrix: bool,
}

/// Resolve a basic-type spelling (`float`, `vec3`, `mat4`, `samplerCube`, ...) to its shape.
pub fn parse_spelling(name: &str) -> Option<Spelling> {
    for size in 2..=4 {
        if matrix_spelling(size) == Some(name) {
            return Some(Spelling {
                kind: ElementKind::Float,
                size,
                is_matrix: true,
            });
        }
    }
    ELEMENT_KINDS.iter().find_map(|info| {
        (1..=4)
            .find(|&size| vector_spelling(info.id, size) == Some(name))
            .map(|size| Spelling {
                kind: info.id,
                size,
                is_matrix: false,
            })
    })
}

/// Resolve a precision keyword. The empty string is not accepted.
pub fn parse_precision(name: &str) -> Option<Precision> {
    [Precision::Low, Precision::Medium, Precision::High]
        .into_iter()
        .find(|p| p.as_str() == name)
}
