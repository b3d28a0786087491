//! Builtin function, variable, and constant vocabulary.
//!
//! Overloads are not listed one by one. Each family of overloads is a small declarative row,
//! `{ name, return slot, parameter slots, arities }`, that expands to one overload per arity N. Families are grouped
//! into [`BuiltinGroup`]s keyed by the stage and host capability that makes them visible, so the builder iterates one
//! list instead of nesting conditionals.
//!
//! ## Notes
//! - A family expands to concrete [`Overload`]s via [`OverloadFamily::expand`].
//! - Within one build no two overloads of a name may share a parameter list. Families that only differ from a
//!   sibling at N=1 (e.g. `mod(vecN, float)`) therefore start at N=2.
//!
//! ## Examples
//! ```rust
//! use glint_core::lang::builtins::{self, Arities, OverloadFamily, Slot};
//! use glint_core::lang::types::ElementKind;
//!
//! let pow = OverloadFamily::new(
//!     "pow",
//!     Slot::Gen(ElementKind::Float),
//!     &[Slot::Gen(ElementKind::Float), Slot::Gen(ElementKind::Float)],
//!     Arities::ALL,
//! );
//! assert_eq!(pow.expand().count(), 4);
//! assert!(builtins::BUILTIN_GROUPS.iter().any(|g| g.families.iter().any(|f| f.name == "pow")));
//! ```

use super::extensions::ExtensionId;
use super::registry::{self, LangItemInfo, Origin};
use super::types::{ElementKind, Spelling};

const F: ElementKind = ElementKind::Float;
const I: ElementKind = ElementKind::Int;
const B: ElementKind = ElementKind::Bool;
const S2D: ElementKind = ElementKind::Sampler2D;
const SCUBE: ElementKind = ElementKind::SamplerCube;
const SRECT: ElementKind = ElementKind::Sampler2DRect;
const SEXT: ElementKind = ElementKind::SamplerExternal;

/// One argument or return position in an overload family.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    /// Vector of `kind` with the family's current arity N.
    Gen(ElementKind),
    /// Single component of `kind` (also used for samplers).
    Scalar(ElementKind),
    /// Fixed-width vector of `kind`, independent of N.
    Vec(ElementKind, u8),
    /// Square float matrix of dimension N.
    Mat,
}

impl Slot {
    /// Resolve this slot to a concrete shape for arity `n`.
    pub const fn at(self, n: u8) -> Spelling {
        match self {
            Slot::Gen(kind) => Spelling {
                kind,
                size: n,
                is_matrix: false,
            },
            Slot::Scalar(kind) => Spelling {
                kind,
                size: 1,
                is_matrix: false,
            },
            Slot::Vec(kind, size) => Spelling {
                kind,
                size,
                is_matrix: false,
            },
            Slot::Mat => Spelling {
                kind: ElementKind::Float,
                size: n,
                is_matrix: true,
            },
        }
    }
}

/// Inclusive range of arities a family expands over.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Arities {
    pub min: u8,
    pub max: u8,
}

impl Arities {
    /// Scalars and every vector width.
    pub const ALL: Arities = Arities { min: 1, max: 4 };
    /// Vectors only.
    pub const VECTORS: Arities = Arities { min: 2, max: 4 };
    /// A single fixed overload (slots should not use `Gen`/`Mat`).
    pub const ONCE: Arities = Arities { min: 1, max: 1 };

    pub const fn only(n: u8) -> Arities {
        Arities { min: n, max: n }
    }
}

/// A family of overloads sharing one name and one shape rule.
#[derive(Debug, Clone, Copy)]
pub struct OverloadFamily {
    pub name: &'static str,
    pub ret: Slot,
    pub params: &'static [Slot],
    pub arities: Arities,
}

/// One concrete overload produced by expanding a family.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Overload {
    pub name: &'static str,
    pub ret: Spelling,
    pub params: Vec<Spelling>,
}

impl OverloadFamily {
    pub const fn new(name: &'static str, ret: Slot, params: &'static [Slot], arities: Arities) -> Self {
        Self {
            name,
            ret,
            params,
            arities,
        }
    }

    /// Expand into one overload per arity, in ascending arity order.
    pub fn expand(&self) -> impl Iterator<Item = Overload> + '_ {
        (self.arities.min..=self.arities.max).map(move |n| Overload {
            name: self.name,
            ret: self.ret.at(n),
            params: self.params.iter().map(|p| p.at(n)).collect(),
        })
    }
}

/// Which shader stages see a group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StageFilter {
    Any,
    Vertex,
    Fragment,
}

/// Host capability flag that gates a group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    StandardDerivatives,
    ExternalImages,
    TextureRectangle,
}

/// A set of families registered together under one stage/capability condition.
#[derive(Debug, Clone, Copy)]
pub struct BuiltinGroup {
    pub label: &'static str,
    pub stage: StageFilter,
    pub capability: Option<Capability>,
    pub families: &'static [OverloadFamily],
    /// Extension every function in the group is related to.
    pub extension: Option<ExtensionId>,
}

const fn unary(name: &'static str) -> OverloadFamily {
    OverloadFamily::new(name, Slot::Gen(F), &[Slot::Gen(F)], Arities::ALL)
}

const fn binary(name: &'static str) -> OverloadFamily {
    OverloadFamily::new(name, Slot::Gen(F), &[Slot::Gen(F), Slot::Gen(F)], Arities::ALL)
}

const fn binary_scalar_rhs(name: &'static str) -> OverloadFamily {
    OverloadFamily::new(name, Slot::Gen(F), &[Slot::Gen(F), Slot::Scalar(F)], Arities::VECTORS)
}

const fn fixed(name: &'static str, params: &'static [Slot]) -> OverloadFamily {
    OverloadFamily::new(name, Slot::Vec(F, 4), params, Arities::ONCE)
}

const fn relational(name: &'static str, operand: ElementKind) -> OverloadFamily {
    const FLOAT: &[Slot] = &[Slot::Gen(F), Slot::Gen(F)];
    const INT: &[Slot] = &[Slot::Gen(I), Slot::Gen(I)];
    const BOOL: &[Slot] = &[Slot::Gen(B), Slot::Gen(B)];
    let params = match operand {
        ElementKind::Int => INT,
        ElementKind::Bool => BOOL,
        _ => FLOAT,
    };
    OverloadFamily::new(name, Slot::Gen(B), params, Arities::VECTORS)
}

/// Angle, trigonometry, exponential, common, geometric and matrix functions.
pub const MATH_FUNCTIONS: &[OverloadFamily] = &[
    unary("radians"),
    unary("degrees"),
    unary("sin"),
    unary("cos"),
    unary("tan"),
    unary("asin"),
    unary("acos"),
    binary("atan"),
    unary("atan"),
    binary("pow"),
    unary("exp"),
    unary("log"),
    unary("exp2"),
    unary("log2"),
    unary("sqrt"),
    unary("inversesqrt"),
    unary("abs"),
    unary("sign"),
    unary("floor"),
    unary("ceil"),
    unary("fract"),
    binary("mod"),
    binary_scalar_rhs("mod"),
    binary("min"),
    binary_scalar_rhs("min"),
    binary("max"),
    binary_scalar_rhs("max"),
    OverloadFamily::new(
        "clamp",
        Slot::Gen(F),
        &[Slot::Gen(F), Slot::Scalar(F), Slot::Scalar(F)],
        Arities::VECTORS,
    ),
    OverloadFamily::new(
        "clamp",
        Slot::Gen(F),
        &[Slot::Gen(F), Slot::Gen(F), Slot::Gen(F)],
        Arities::ALL,
    ),
    OverloadFamily::new(
        "mix",
        Slot::Gen(F),
        &[Slot::Gen(F), Slot::Gen(F), Slot::Scalar(F)],
        Arities::ALL,
    ),
    OverloadFamily::new(
        "mix",
        Slot::Gen(F),
        &[Slot::Gen(F), Slot::Gen(F), Slot::Gen(F)],
        Arities::VECTORS,
    ),
    binary("step"),
    OverloadFamily::new("step", Slot::Gen(F), &[Slot::Scalar(F), Slot::Gen(F)], Arities::VECTORS),
    OverloadFamily::new(
        "smoothstep",
        Slot::Gen(F),
        &[Slot::Gen(F), Slot::Gen(F), Slot::Gen(F)],
        Arities::ALL,
    ),
    OverloadFamily::new(
        "smoothstep",
        Slot::Gen(F),
        &[Slot::Scalar(F), Slot::Scalar(F), Slot::Gen(F)],
        Arities::VECTORS,
    ),
    OverloadFamily::new("length", Slot::Scalar(F), &[Slot::Gen(F)], Arities::ALL),
    OverloadFamily::new("distance", Slot::Scalar(F), &[Slot::Gen(F), Slot::Gen(F)], Arities::ALL),
    OverloadFamily::new("dot", Slot::Scalar(F), &[Slot::Gen(F), Slot::Gen(F)], Arities::ALL),
    OverloadFamily::new("cross", Slot::Gen(F), &[Slot::Gen(F), Slot::Gen(F)], Arities::only(3)),
    unary("normalize"),
    OverloadFamily::new(
        "faceforward",
        Slot::Gen(F),
        &[Slot::Gen(F), Slot::Gen(F), Slot::Gen(F)],
        Arities::ALL,
    ),
    binary("reflect"),
    OverloadFamily::new(
        "refract",
        Slot::Gen(F),
        &[Slot::Gen(F), Slot::Gen(F), Slot::Scalar(F)],
        Arities::ALL,
    ),
    OverloadFamily::new("matrixCompMult", Slot::Mat, &[Slot::Mat, Slot::Mat], Arities { min: 2, max: 4 }),
];

/// Component-wise comparisons and boolean reductions.
pub const VECTOR_RELATIONAL_FUNCTIONS: &[OverloadFamily] = &[
    relational("lessThan", F),
    relational("lessThan", I),
    relational("lessThanEqual", F),
    relational("lessThanEqual", I),
    relational("greaterThan", F),
    relational("greaterThan", I),
    relational("greaterThanEqual", F),
    relational("greaterThanEqual", I),
    relational("equal", F),
    relational("equal", I),
    relational("equal", B),
    relational("notEqual", F),
    relational("notEqual", I),
    relational("notEqual", B),
    OverloadFamily::new("any", Slot::Scalar(B), &[Slot::Gen(B)], Arities::VECTORS),
    OverloadFamily::new("all", Slot::Scalar(B), &[Slot::Gen(B)], Arities::VECTORS),
    OverloadFamily::new("not", Slot::Gen(B), &[Slot::Gen(B)], Arities::VECTORS),
];

pub const TEXTURE_FUNCTIONS: &[OverloadFamily] = &[
    fixed("texture2D", &[Slot::Scalar(S2D), Slot::Vec(F, 2)]),
    fixed("texture2DProj", &[Slot::Scalar(S2D), Slot::Vec(F, 3)]),
    fixed("texture2DProj", &[Slot::Scalar(S2D), Slot::Vec(F, 4)]),
    fixed("textureCube", &[Slot::Scalar(SCUBE), Slot::Vec(F, 3)]),
];

pub const EXTERNAL_TEXTURE_FUNCTIONS: &[OverloadFamily] = &[
    fixed("texture2D", &[Slot::Scalar(SEXT), Slot::Vec(F, 2)]),
    fixed("texture2DProj", &[Slot::Scalar(SEXT), Slot::Vec(F, 3)]),
    fixed("texture2DProj", &[Slot::Scalar(SEXT), Slot::Vec(F, 4)]),
    fixed("textureCube", &[Slot::Scalar(SEXT), Slot::Vec(F, 3)]),
];

pub const RECT_TEXTURE_FUNCTIONS: &[OverloadFamily] = &[
    fixed("texture2DRect", &[Slot::Scalar(SRECT), Slot::Vec(F, 2)]),
    fixed("texture2DRectProj", &[Slot::Scalar(SRECT), Slot::Vec(F, 3)]),
    fixed("texture2DRectProj", &[Slot::Scalar(SRECT), Slot::Vec(F, 4)]),
];

/// Implicit-LOD lookups with a trailing bias argument.
pub const FRAGMENT_BIAS_TEXTURE_FUNCTIONS: &[OverloadFamily] = &[
    fixed("texture2D", &[Slot::Scalar(S2D), Slot::Vec(F, 2), Slot::Scalar(F)]),
    fixed("texture2DProj", &[Slot::Scalar(S2D), Slot::Vec(F, 3), Slot::Scalar(F)]),
    fixed("texture2DProj", &[Slot::Scalar(S2D), Slot::Vec(F, 4), Slot::Scalar(F)]),
    fixed("textureCube", &[Slot::Scalar(SCUBE), Slot::Vec(F, 3), Slot::Scalar(F)]),
];

/// Explicit-LOD lookups.
pub const VERTEX_LOD_TEXTURE_FUNCTIONS: &[OverloadFamily] = &[
    fixed("texture2DLod", &[Slot::Scalar(S2D), Slot::Vec(F, 2), Slot::Scalar(F)]),
    fixed("texture2DProjLod", &[Slot::Scalar(S2D), Slot::Vec(F, 3), Slot::Scalar(F)]),
    fixed("texture2DProjLod", &[Slot::Scalar(S2D), Slot::Vec(F, 4), Slot::Scalar(F)]),
    fixed("textureCubeLod", &[Slot::Scalar(SCUBE), Slot::Vec(F, 3), Slot::Scalar(F)]),
];

pub const DERIVATIVE_FUNCTIONS: &[OverloadFamily] = &[unary("dFdx"), unary("dFdy"), unary("fwidth")];

/// Every function group, in registration order.
pub const BUILTIN_GROUPS: &[BuiltinGroup] = &[
    BuiltinGroup {
        label: "math",
        stage: StageFilter::Any,
        capability: None,
        families: MATH_FUNCTIONS,
        extension: None,
    },
    BuiltinGroup {
        label: "vector relational",
        stage: StageFilter::Any,
        capability: None,
        families: VECTOR_RELATIONAL_FUNCTIONS,
        extension: None,
    },
    BuiltinGroup {
        label: "texture",
        stage: StageFilter::Any,
        capability: None,
        families: TEXTURE_FUNCTIONS,
        extension: None,
    },
    BuiltinGroup {
        label: "external texture",
        stage: StageFilter::Any,
        capability: Some(Capability::ExternalImages),
        families: EXTERNAL_TEXTURE_FUNCTIONS,
        extension: None,
    },
    BuiltinGroup {
        label: "rectangle texture",
        stage: StageFilter::Any,
        capability: Some(Capability::TextureRectangle),
        families: RECT_TEXTURE_FUNCTIONS,
        extension: None,
    },
    BuiltinGroup {
        label: "fragment bias texture",
        stage: StageFilter::Fragment,
        capability: None,
        families: FRAGMENT_BIAS_TEXTURE_FUNCTIONS,
        extension: None,
    },
    BuiltinGroup {
        label: "standard derivatives",
        stage: StageFilter::Fragment,
        capability: Some(Capability::StandardDerivatives),
        families: DERIVATIVE_FUNCTIONS,
        extension: Some(ExtensionId::OesStandardDerivatives),
    },
    BuiltinGroup {
        label: "vertex lod texture",
        stage: StageFilter::Vertex,
        capability: None,
        families: VERTEX_LOD_TEXTURE_FUNCTIONS,
        extension: None,
    },
];

/// Host limit an implementation-defined constant is taken from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceLimit {
    MaxVertexAttribs,
    MaxVertexUniformVectors,
    MaxVaryingVectors,
    MaxVertexTextureImageUnits,
    MaxCombinedTextureImageUnits,
    MaxTextureImageUnits,
    MaxFragmentUniformVectors,
    MaxDrawBuffers,
}

pub type BuiltinConstantInfo = LangItemInfo<ResourceLimit>;

/// Implementation-defined `const int` builtins. `gl_MaxDrawBuffers` is withheld from the CSS Shaders profile.
pub const BUILTIN_CONSTANTS: &[BuiltinConstantInfo] = &[
    registry::core(ResourceLimit::MaxVertexAttribs, "gl_MaxVertexAttribs", "Vertex attribute slots."),
    registry::core(
        ResourceLimit::MaxVertexUniformVectors,
        "gl_MaxVertexUniformVectors",
        "vec4 uniform slots in the vertex stage.",
    ),
    registry::core(ResourceLimit::MaxVaryingVectors, "gl_MaxVaryingVectors", "vec4 varying slots."),
    registry::core(
        ResourceLimit::MaxVertexTextureImageUnits,
        "gl_MaxVertexTextureImageUnits",
        "Texture units reachable from the vertex stage.",
    ),
    registry::core(
        ResourceLimit::MaxCombinedTextureImageUnits,
        "gl_MaxCombinedTextureImageUnits",
        "Texture units reachable from both stages combined.",
    ),
    registry::core(
        ResourceLimit::MaxTextureImageUnits,
        "gl_MaxTextureImageUnits",
        "Texture units reachable from the fragment stage.",
    ),
    registry::core(
        ResourceLimit::MaxFragmentUniformVectors,
        "gl_MaxFragmentUniformVectors",
        "vec4 uniform slots in the fragment stage.",
    ),
    registry::core(ResourceLimit::MaxDrawBuffers, "gl_MaxDrawBuffers", "Length of gl_FragData."),
];

/// Stable identifier for predeclared variables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BuiltinVarId {
    DepthRange,
    FragCoord,
    FrontFacing,
    PointCoord,
    FragColor,
    FragData,
    FragDepthExt,
    CssMixColor,
    CssColorMatrix,
    Position,
    PointSize,
}

pub type BuiltinVarInfo = LangItemInfo<BuiltinVarId>;

pub const BUILTIN_VARIABLES: &[BuiltinVarInfo] = &[
    registry::core(BuiltinVarId::DepthRange, "gl_DepthRange", "Near/far depth range uniform."),
    registry::core(BuiltinVarId::FragCoord, "gl_FragCoord", "Window-relative fragment position."),
    registry::core(BuiltinVarId::FrontFacing, "gl_FrontFacing", "Whether the fragment is front facing."),
    registry::core(BuiltinVarId::PointCoord, "gl_PointCoord", "Position within a point sprite."),
    registry::core(BuiltinVarId::FragColor, "gl_FragColor", "Fragment color output."),
    registry::core(BuiltinVarId::FragData, "gl_FragData", "Per-draw-buffer fragment outputs."),
    registry::extension(BuiltinVarId::FragDepthExt, "gl_FragDepthEXT", "Fragment depth output."),
    LangItemInfo {
        id: BuiltinVarId::CssMixColor,
        canonical: "css_MixColor",
        description: "Color blended with the element's content.",
        origin: Origin::Profile,
    },
    LangItemInfo {
        id: BuiltinVarId::CssColorMatrix,
        canonical: "css_ColorMatrix",
        description: "Color matrix applied to the element's content.",
        origin: Origin::Profile,
    },
    registry::core(BuiltinVarId::Position, "gl_Position", "Clip-space vertex position."),
    registry::core(BuiltinVarId::PointSize, "gl_PointSize", "Rasterized point size."),
];

/// Name of the predeclared depth-range struct type.
pub const DEPTH_RANGE_STRUCT: &str = "gl_DepthRangeParameters";

/// Field names of [`DEPTH_RANGE_STRUCT`], in declaration order.
pub const DEPTH_RANGE_FIELDS: &[&str] = &["near", "far", "diff"];

/// Return the spelling of a builtin variable.
pub fn var_name(id: BuiltinVarId) -> &'static str {
    BUILTIN_VARIABLES
        .iter()
        .find(|v| v.id == id)
        .map(|v| v.canonical)
        .unwrap_or("<unknown>")
}

/// Return the spelling of a builtin constant.
pub fn constant_name(id: ResourceLimit) -> &'static str {
    BUILTIN_CONSTANTS
        .iter()
        .find(|c| c.id == id)
        .map(|c| c.canonical)
        .unwrap_or("<unknown>")
}
