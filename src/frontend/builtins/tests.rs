use glint_core::lang::builtins::{BUILTIN_GROUPS, Capability};
use glint_core::lang::operators::IntrinsicOp;

use super::*;
use crate::frontend::symbols::SymbolKind;

fn fresh(stage: ShaderStage, profile: SpecProfile, resources: &ShaderResources) -> SymbolTable {
    let mut symbols = SymbolTable::new();
    register_builtin_functions(stage, profile, resources, &mut symbols).unwrap();
    register_stage_specific_identifiers(stage, profile, resources, &mut symbols).unwrap();
    symbols
}

fn group(label: &str) -> &'static BuiltinGroup {
    BUILTIN_GROUPS.iter().find(|g| g.label == label).unwrap()
}

#[test]
fn ungated_groups_apply_to_both_stages() {
    let r = ShaderResources::default();
    assert!(group_applies(group("math"), ShaderStage::Vertex, &r));
    assert!(group_applies(group("math"), ShaderStage::Fragment, &r));
    assert!(!group_applies(group("fragment bias texture"), ShaderStage::Vertex, &r));
    assert!(!group_applies(group("vertex lod texture"), ShaderStage::Fragment, &r));
}

#[test]
fn capability_groups_follow_resources() {
    let off = ShaderResources::default();
    let on = ShaderResources::new().with_standard_derivatives(true);
    let derivatives = group("standard derivatives");
    assert_eq!(derivatives.capability, Some(Capability::StandardDerivatives));
    assert!(!group_applies(derivatives, ShaderStage::Fragment, &off));
    assert!(group_applies(derivatives, ShaderStage::Fragment, &on));
    assert!(!group_applies(derivatives, ShaderStage::Vertex, &on));
}

#[test]
fn oversized_limits_saturate() {
    let r = ShaderResources {
        max_vertex_attribs: u32::MAX,
        ..ShaderResources::default()
    };
    assert_eq!(constant_value(&r, ResourceLimit::MaxVertexAttribs), i32::MAX);
}

#[test]
fn depth_range_is_a_uniform_struct_with_highp_fields() {
    let symbols = fresh(ShaderStage::Vertex, SpecProfile::Standard, &ShaderResources::default());
    let var = symbols.lookup("gl_DepthRange").unwrap().as_variable().unwrap();
    assert_eq!(var.ty.qualifier(), StorageQualifier::Uniform);
    let desc = var.ty.struct_desc().unwrap();
    assert_eq!(desc.name, "gl_DepthRangeParameters");
    let names: Vec<_> = desc.fields.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(names, vec!["near", "far", "diff"]);
    assert!(desc.fields.iter().all(|f| f.ty.precision() == Precision::High));
    assert!(matches!(
        symbols.lookup("gl_DepthRangeParameters").unwrap().kind,
        SymbolKind::Struct(_)
    ));
}

#[test]
fn registering_functions_twice_reports_duplicates() {
    let r = ShaderResources::default();
    let mut symbols = SymbolTable::new();
    register_builtin_functions(ShaderStage::Vertex, SpecProfile::Standard, &r, &mut symbols).unwrap();
    let err = register_builtin_functions(ShaderStage::Vertex, SpecProfile::Standard, &r, &mut symbols).unwrap_err();
    assert!(matches!(err, BuiltinError::Symbol(_)));
}

#[test]
fn derivatives_are_related_in_first_pass() {
    let r = ShaderResources::new().with_standard_derivatives(true);
    let mut symbols = SymbolTable::new();
    register_builtin_functions(ShaderStage::Fragment, SpecProfile::Standard, &r, &mut symbols).unwrap();
    for overload in symbols.overloads("dFdy") {
        let info = overload.as_function().unwrap();
        assert_eq!(info.op, Some(IntrinsicOp::DFdy));
        assert_eq!(info.extension, Some(ExtensionId::OesStandardDerivatives));
    }
}

#[test]
fn frag_depth_precision_follows_high_precision_flag() {
    let medium = fresh(
        ShaderStage::Fragment,
        SpecProfile::Standard,
        &ShaderResources::new().with_fragment_depth(true),
    );
    let high = fresh(
        ShaderStage::Fragment,
        SpecProfile::Standard,
        &ShaderResources::new()
            .with_fragment_depth(true)
            .with_high_fragment_precision(true),
    );
    let precision = |t: &SymbolTable| {
        t.lookup("gl_FragDepthEXT")
            .unwrap()
            .as_variable()
            .unwrap()
            .ty
            .precision()
    };
    assert_eq!(precision(&medium), Precision::Medium);
    assert_eq!(precision(&high), Precision::High);
    assert_eq!(
        medium.lookup("gl_FragDepthEXT").unwrap().extension(),
        Some(ExtensionId::ExtFragDepth)
    );
}

#[test]
fn frag_depth_needs_the_capability_and_a_standard_profile() {
    let without = fresh(ShaderStage::Fragment, SpecProfile::Standard, &ShaderResources::default());
    assert!(without.lookup("gl_FragDepthEXT").is_none());
    let css = fresh(
        ShaderStage::Fragment,
        SpecProfile::CssShaders,
        &ShaderResources::new().with_fragment_depth(true),
    );
    assert!(css.lookup("gl_FragDepthEXT").is_none());
}

#[test]
fn vertex_outputs_have_expected_qualifiers() {
    let symbols = fresh(ShaderStage::Vertex, SpecProfile::Standard, &ShaderResources::default());
    let position = &symbols.lookup("gl_Position").unwrap().as_variable().unwrap().ty;
    assert_eq!(position.to_string(), "vec4");
    assert_eq!(position.precision(), Precision::High);
    assert_eq!(position.qualifier(), StorageQualifier::VertexPositionOutput);
    let point_size = &symbols.lookup("gl_PointSize").unwrap().as_variable().unwrap().ty;
    assert_eq!(point_size.to_string(), "float");
    assert_eq!(point_size.qualifier(), StorageQualifier::PointSizeOutput);
    assert!(symbols.lookup("gl_FragCoord").is_none());
}

#[test]
fn environment_ends_on_a_global_level() {
    let env = build_environment(ShaderStage::Vertex, SpecProfile::Standard, &ShaderResources::default()).unwrap();
    assert_eq!(env.symbols.current_level_kind(), LevelKind::Global);
    let id = env.symbols.lookup_id("sin").unwrap();
    assert!(env.symbols.is_builtin(id));
}
