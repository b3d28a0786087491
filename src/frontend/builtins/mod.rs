//! Builtin environment construction.
//!
//! Given a shader stage, a spec profile and the host's [`ShaderResources`], populate a caller-owned
//! [`SymbolTable`] and [`ExtensionBehaviorTable`] with everything a shader may reference without declaring it:
//! builtin function overloads, predeclared variables, implementation-defined constants, operator relations, and
//! extension relations.
//!
//! ## Notes
//! - Overloads come from the declarative tables in `glint_core::lang::builtins`; this module only decides which
//!   groups apply and turns vocabulary shapes into [`TypeDesc`]s.
//! - Construction is deterministic: identical inputs produce equal tables.
//! - Nothing here is shared between compilation units. Every unit builds its own tables.
//!
//! ## Examples
//! ```rust
//! use glint::frontend::builtins::build_environment;
//! use glint::frontend::resources::{ShaderResources, ShaderStage, SpecProfile};
//!
//! let env = build_environment(ShaderStage::Fragment, SpecProfile::Standard, &ShaderResources::default()).unwrap();
//! assert!(env.symbols.lookup("gl_FragColor").is_some());
//! ```

use std::sync::Arc;

use glint_core::lang::builtins::{
    self as vocab, BUILTIN_CONSTANTS, BUILTIN_GROUPS, BuiltinGroup, BuiltinVarId, DEPTH_RANGE_FIELDS,
    DEPTH_RANGE_STRUCT, ResourceLimit, StageFilter,
};
use glint_core::lang::extensions::ExtensionId;
use glint_core::lang::operators::{self, DERIVATIVE_RELATIONS, OPERATOR_RELATIONS};
use glint_core::lang::types::{ElementKind, Precision, StorageQualifier};

use super::errors::BuiltinError;
use super::extensions::{ExtensionBehaviorTable, seed_extension_behavior};
use super::resources::{ShaderResources, ShaderStage, SpecProfile};
use super::symbols::{LevelKind, SymbolTable};
use super::types::{StructDesc, TypeDesc};

#[cfg(test)]
mod tests;

/// Freshly built tables for one compilation unit.
#[derive(Debug, Clone, PartialEq)]
pub struct BuiltinEnvironment {
    pub symbols: SymbolTable,
    pub extensions: ExtensionBehaviorTable,
}

/// Build the complete builtin environment for one compilation unit.
///
/// The returned symbol table has a global level pushed on top of the builtin level, ready for the parser.
///
/// ## Errors
/// - [`BuiltinError::UnsupportedStage`] before anything is built if `stage` is not vertex or fragment.
#[tracing::instrument(skip_all, fields(stage = %stage, profile = %profile))]
pub fn build_environment(
    stage: ShaderStage,
    profile: SpecProfile,
    resources: &ShaderResources,
) -> Result<BuiltinEnvironment, BuiltinError> {
    stage.ensure_supported()?;

    let mut symbols = SymbolTable::new();
    register_builtin_functions(stage, profile, resources, &mut symbols)?;
    register_stage_specific_identifiers(stage, profile, resources, &mut symbols)?;
    symbols.push_level(LevelKind::Global);

    let mut extensions = ExtensionBehaviorTable::new();
    seed_extension_behavior(resources, &mut extensions);

    tracing::debug!(
        symbols = symbols.len(),
        extensions = extensions.len(),
        "built builtin environment"
    );
    Ok(BuiltinEnvironment { symbols, extensions })
}

fn group_applies(group: &BuiltinGroup, stage: ShaderStage, resources: &ShaderResources) -> bool {
    let stage_ok = match group.stage {
        StageFilter::Any => true,
        StageFilter::Vertex => stage == ShaderStage::Vertex,
        StageFilter::Fragment => stage == ShaderStage::Fragment,
    };
    stage_ok && group.capability.is_none_or(|cap| resources.supports(cap))
}

fn constant_value(resources: &ShaderResources, limit: ResourceLimit) -> i32 {
    i32::try_from(resources.limit(limit)).unwrap_or(i32::MAX)
}

/// Insert every builtin function overload, the depth-range uniform, and the implementation-defined constants.
///
/// Groups gated on an extension also get their operator and extension relations here.
///
/// ## Errors
/// - [`BuiltinError::UnsupportedStage`] before any insertion for stages other than vertex/fragment.
/// - [`BuiltinError::Symbol`] if the static tables contain a duplicate overload.
#[tracing::instrument(skip_all, fields(stage = %stage, profile = %profile))]
pub fn register_builtin_functions(
    stage: ShaderStage,
    profile: SpecProfile,
    resources: &ShaderResources,
    symbols: &mut SymbolTable,
) -> Result<(), BuiltinError> {
    stage.ensure_supported()?;

    for group in BUILTIN_GROUPS.iter().filter(|g| group_applies(g, stage, resources)) {
        let mut inserted = 0usize;
        for family in group.families {
            for overload in family.expand() {
                let ret = TypeDesc::from_spelling(overload.ret);
                let params = overload.params.into_iter().map(TypeDesc::from_spelling).collect();
                symbols.insert_function_overload(overload.name, ret, params)?;
                inserted += 1;
            }
        }
        if let Some(extension) = group.extension {
            for family in group.families {
                symbols.relate_to_extension(family.name, extension);
                if let Some(op) = operators::relation_for(family.name) {
                    symbols.relate_to_operator(family.name, op);
                }
            }
        }
        tracing::debug!(group = group.label, overloads = inserted, "registered builtin group");
    }

    insert_depth_range(symbols)?;

    for info in BUILTIN_CONSTANTS {
        if info.id == ResourceLimit::MaxDrawBuffers && profile.is_css_shaders() {
            continue;
        }
        symbols.insert_constant_int(info.canonical, constant_value(resources, info.id))?;
    }
    Ok(())
}

fn insert_depth_range(symbols: &mut SymbolTable) -> Result<(), BuiltinError> {
    let field_ty = TypeDesc::scalar(ElementKind::Float).with_precision(Precision::High);
    let desc = DEPTH_RANGE_FIELDS
        .iter()
        .fold(StructDesc::new(DEPTH_RANGE_STRUCT), |desc, field| {
            desc.with_field(*field, field_ty.clone())
        });
    let desc = symbols.insert_struct(desc)?;
    symbols.insert_variable(
        vocab::var_name(BuiltinVarId::DepthRange),
        TypeDesc::structure(Arc::clone(&desc)).with_qualifier(StorageQualifier::Uniform),
    )?;
    Ok(())
}

fn float_var(size: u8, precision: Precision, qualifier: StorageQualifier) -> TypeDesc {
    TypeDesc::vector(ElementKind::Float, size)
        .with_precision(precision)
        .with_qualifier(qualifier)
}

/// Insert the stage's predeclared variables and relate builtin functions to their operators.
///
/// ## Errors
/// - [`BuiltinError::UnsupportedStage`] for stages other than vertex/fragment; nothing is inserted in that case.
#[tracing::instrument(skip_all, fields(stage = %stage, profile = %profile))]
pub fn register_stage_specific_identifiers(
    stage: ShaderStage,
    profile: SpecProfile,
    resources: &ShaderResources,
    symbols: &mut SymbolTable,
) -> Result<(), BuiltinError> {
    use StorageQualifier as Q;

    match stage {
        ShaderStage::Fragment => {
            symbols.insert_variable(
                vocab::var_name(BuiltinVarId::FragCoord),
                float_var(4, Precision::Medium, Q::FragCoordInput),
            )?;
            symbols.insert_variable(
                vocab::var_name(BuiltinVarId::FrontFacing),
                TypeDesc::scalar(ElementKind::Bool).with_qualifier(Q::FrontFacingInput),
            )?;
            symbols.insert_variable(
                vocab::var_name(BuiltinVarId::PointCoord),
                float_var(2, Precision::Medium, Q::PointCoordInput),
            )?;

            if profile.is_css_shaders() {
                symbols.insert_variable(
                    vocab::var_name(BuiltinVarId::CssMixColor),
                    float_var(4, Precision::Medium, Q::Global),
                )?;
                symbols.insert_variable(
                    vocab::var_name(BuiltinVarId::CssColorMatrix),
                    TypeDesc::matrix(4).with_precision(Precision::Medium),
                )?;
            } else {
                symbols.insert_variable(
                    vocab::var_name(BuiltinVarId::FragColor),
                    float_var(4, Precision::Medium, Q::FragmentColorOutput),
                )?;
                symbols.insert_variable(
                    vocab::var_name(BuiltinVarId::FragData),
                    float_var(4, Precision::Medium, Q::FragmentDataOutput).array(resources.max_draw_buffers),
                )?;
                if resources.supports_fragment_depth_extension {
                    let precision = if resources.high_fragment_precision_available {
                        Precision::High
                    } else {
                        Precision::Medium
                    };
                    let name = vocab::var_name(BuiltinVarId::FragDepthExt);
                    symbols.insert_variable(name, float_var(1, precision, Q::FragmentDepthOutput))?;
                    symbols.relate_to_extension(name, ExtensionId::ExtFragDepth);
                }
            }
        }
        ShaderStage::Vertex => {
            symbols.insert_variable(
                vocab::var_name(BuiltinVarId::Position),
                float_var(4, Precision::High, Q::VertexPositionOutput),
            )?;
            symbols.insert_variable(
                vocab::var_name(BuiltinVarId::PointSize),
                float_var(1, Precision::Medium, Q::PointSizeOutput),
            )?;
        }
        ShaderStage::Geometry | ShaderStage::Compute => return Err(BuiltinError::UnsupportedStage(stage)),
    }

    let mut related = 0usize;
    for relation in OPERATOR_RELATIONS {
        related += symbols.relate_to_operator(relation.name, relation.op);
    }

    if stage == ShaderStage::Fragment && resources.supports_standard_derivatives {
        for relation in DERIVATIVE_RELATIONS {
            related += symbols.relate_to_operator(relation.name, relation.op);
            symbols.relate_to_extension(relation.name, ExtensionId::OesStandardDerivatives);
        }
    }
    tracing::debug!(overloads = related, "related builtins to operators");
    Ok(())
}
