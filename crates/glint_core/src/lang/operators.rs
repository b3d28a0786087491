//! Intrinsic operator vocabulary.
//!
//! Several builtin functions have a direct intrinsic equivalent: a call to `pow(a, b)` is lowered straight to a
//! `Pow` node instead of a generic call node. This module defines those operator tags ([`IntrinsicOp`]) and the
//! static builtin-name → operator relation tables.
//!
//! ## Notes
//! - [`OPERATOR_RELATIONS`] is independent of stage, profile and host resources.
//! - [`DERIVATIVE_RELATIONS`] only applies to fragment shaders whose host supports standard derivatives.
//! - `matrixCompMult` is the only builtin related to [`IntrinsicOp::Mul`].
//!
//! ## Examples
//! ```rust
//! use glint_core::lang::operators::{self, IntrinsicOp};
//!
//! assert_eq!(operators::relation_for("pow"), Some(IntrinsicOp::Pow));
//! assert_eq!(operators::relation_for("texture2D"), None);
//! ```

/// Stable identifier for intrinsic operators a builtin call can lower to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum IntrinsicOp {
    // Matrix
    Mul,

    // Vector relational
    VectorEqual,
    VectorNotEqual,
    LessThan,
    GreaterThan,
    LessThanEqual,
    GreaterThanEqual,

    // Angle and trigonometry
    Radians,
    Degrees,
    Sin,
    Cos,
    Tan,
    Asin,
    Acos,
    Atan,

    // Exponential
    Pow,
    Exp,
    Log,
    Exp2,
    Log2,
    Sqrt,
    InverseSqrt,

    // Common
    Abs,
    Sign,
    Floor,
    Ceil,
    Fract,
    Mod,
    Min,
    Max,
    Clamp,
    Mix,
    Step,
    SmoothStep,

    // Geometric
    Length,
    Distance,
    Dot,
    Cross,
    Normalize,
    FaceForward,
    Reflect,
    Refract,

    // Vector logical
    Any,
    All,
    VectorLogicalNot,

    // Derivatives (GL_OES_standard_derivatives)
    DFdx,
    DFdy,
    Fwidth,
}

impl IntrinsicOp {
    /// Short mnemonic used in dumps and IR printouts.
    pub const fn mnemonic(self) -> &'static str {
        match self {
            IntrinsicOp::Mul => "mul",
            IntrinsicOp::VectorEqual => "vec-eq",
            IntrinsicOp::VectorNotEqual => "vec-ne",
            IntrinsicOp::LessThan => "lt",
            IntrinsicOp::GreaterThan => "gt",
            IntrinsicOp::LessThanEqual => "le",
            IntrinsicOp::GreaterThanEqual => "ge",
            IntrinsicOp::Radians => "radians",
            IntrinsicOp::Degrees => "degrees",
            IntrinsicOp::Sin => "sin",
            IntrinsicOp::Cos => "cos",
            IntrinsicOp::Tan => "tan",
            IntrinsicOp::Asin => "asin",
            IntrinsicOp::Acos => "acos",
            IntrinsicOp::Atan => "atan",
            IntrinsicOp::Pow => "pow",
            IntrinsicOp::Exp => "exp",
            IntrinsicOp::Log => "log",
            IntrinsicOp::Exp2 => "exp2",
            IntrinsicOp::Log2 => "log2",
            IntrinsicOp::Sqrt => "sqrt",
            IntrinsicOp::InverseSqrt => "inversesqrt",
            IntrinsicOp::Abs => "abs",
            IntrinsicOp::Sign => "sign",
            IntrinsicOp::Floor => "floor",
            IntrinsicOp::Ceil => "ceil",
            IntrinsicOp::Fract => "fract",
            IntrinsicOp::Mod => "mod",
            IntrinsicOp::Min => "min",
            IntrinsicOp::Max => "max",
            IntrinsicOp::Clamp => "clamp",
            IntrinsicOp::Mix => "mix",
            IntrinsicOp::Step => "step",
            IntrinsicOp::SmoothStep => "smoothstep",
            IntrinsicOp::Length => "length",
            IntrinsicOp::Distance => "distance",
            IntrinsicOp::Dot => "dot",
            IntrinsicOp::Cross => "cross",
            IntrinsicOp::Normalize => "normalize",
            IntrinsicOp::FaceForward => "faceforward",
            IntrinsicOp::Reflect => "reflect",
            IntrinsicOp::Refract => "refract",
            IntrinsicOp::Any => "any",
            IntrinsicOp::All => "all",
            IntrinsicOp::VectorLogicalNot => "vec-not",
            IntrinsicOp::DFdx => "dfdx",
            IntrinsicOp::DFdy => "dfdy",
            IntrinsicOp::Fwidth => "fwidth",
        }
    }
}

/// A builtin function name and the operator its calls lower to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OperatorRelation {
    pub name: &'static str,
    pub op: IntrinsicOp,
}

const fn rel(name: &'static str, op: IntrinsicOp) -> OperatorRelation {
    OperatorRelation { name, op }
}

/// Relations that hold in every stage and profile.
pub const OPERATOR_RELATIONS: &[OperatorRelation] = &[
    rel("matrixCompMult", IntrinsicOp::Mul),
    rel("equal", IntrinsicOp::VectorEqual),
    rel("notEqual", IntrinsicOp::VectorNotEqual),
    rel("lessThan", IntrinsicOp::LessThan),
    rel("greaterThan", IntrinsicOp::GreaterThan),
    rel("lessThanEqual", IntrinsicOp::LessThanEqual),
    rel("greaterThanEqual", IntrinsicOp::GreaterThanEqual),
    rel("radians", IntrinsicOp::Radians),
    rel("degrees", IntrinsicOp::Degrees),
    rel("sin", IntrinsicOp::Sin),
    rel("cos", IntrinsicOp::Cos),
    rel("tan", IntrinsicOp::Tan),
    rel("asin", IntrinsicOp::Asin),
    rel("acos", IntrinsicOp::Acos),
    rel("atan", IntrinsicOp::Atan),
    rel("pow", IntrinsicOp::Pow),
    rel("exp2", IntrinsicOp::Exp2),
    rel("log", IntrinsicOp::Log),
    rel("exp", IntrinsicOp::Exp),
    rel("log2", IntrinsicOp::Log2),
    rel("sqrt", IntrinsicOp::Sqrt),
    rel("inversesqrt", IntrinsicOp::InverseSqrt),
    rel("abs", IntrinsicOp::Abs),
    rel("sign", IntrinsicOp::Sign),
    rel("floor", IntrinsicOp::Floor),
    rel("ceil", IntrinsicOp::Ceil),
    rel("fract", IntrinsicOp::Fract),
    rel("mod", IntrinsicOp::Mod),
    rel("min", IntrinsicOp::Min),
    rel("max", IntrinsicOp::Max),
    rel("clamp", IntrinsicOp::Clamp),
    rel("mix", IntrinsicOp::Mix),
    rel("step", IntrinsicOp::Step),
    rel("smoothstep", IntrinsicOp::SmoothStep),
    rel("length", IntrinsicOp::Length),
    rel("distance", IntrinsicOp::Distance),
    rel("dot", IntrinsicOp::Dot),
    rel("cross", IntrinsicOp::Cross),
    rel("normalize", IntrinsicOp::Normalize),
    rel("faceforward", IntrinsicOp::FaceForward),
    rel("reflect", IntrinsicOp::Reflect),
    rel("refract", IntrinsicOp::Refract),
    rel("any", IntrinsicOp::Any),
    rel("all", IntrinsicOp::All),
    rel("not", IntrinsicOp::VectorLogicalNot),
];

/// Relations for the fragment-only derivative functions.
pub const DERIVATIVE_RELATIONS: &[OperatorRelation] = &[
    rel("dFdx", IntrinsicOp::DFdx),
    rel("dFdy", IntrinsicOp::DFdy),
    rel("fwidth", IntrinsicOp::Fwidth),
];

/// Look up the operator a builtin name lowers to, across both relation tables.
pub fn relation_for(name: &str) -> Option<IntrinsicOp> {
    OPERATOR_RELATIONS
        .iter()
        .chain(DERIVATIVE_RELATIONS)
        .find(|r| r.name == name)
        .map(|r| r.op)
}
