//! Property-based tests for builtin environment construction
//!
//! These tests use proptest to check invariants across arbitrary host resource
//! descriptions rather than the handful of configurations unit tests cover.

use glint::frontend::builtins::build_environment;
use glint::frontend::extensions::{ExtensionBehavior, ExtensionBehaviorTable, seed_extension_behavior};
use glint::frontend::resources::{ShaderResources, ShaderStage, SpecProfile};
use glint_core::lang::builtins::BUILTIN_CONSTANTS;
use proptest::prelude::*;

fn resources_strategy() -> impl Strategy<Value = ShaderResources> {
    (
        any::<[bool; 6]>(),
        1u32..=16,
        prop::collection::vec(0u32..=4096, 7),
        any::<u32>(),
    )
        .prop_map(|(flags, draw_buffers, limits, huge)| {
            let mut r = ShaderResources::new()
                .with_standard_derivatives(flags[0])
                .with_external_images(flags[1])
                .with_texture_rectangle(flags[2])
                .with_fragment_depth(flags[3])
                .with_high_fragment_precision(flags[4]);
            if flags[5] {
                r = r.with_draw_buffers(draw_buffers);
            }
            r.max_vertex_attribs = limits[0];
            r.max_vertex_uniform_vectors = limits[1];
            r.max_varying_vectors = limits[2];
            r.max_vertex_texture_image_units = limits[3];
            r.max_combined_texture_image_units = limits[4];
            r.max_texture_image_units = limits[5];
            r.max_fragment_uniform_vectors = huge.max(limits[6]);
            r
        })
}

fn stage_strategy() -> impl Strategy<Value = ShaderStage> {
    prop_oneof![Just(ShaderStage::Vertex), Just(ShaderStage::Fragment)]
}

fn profile_strategy() -> impl Strategy<Value = SpecProfile> {
    prop_oneof![
        Just(SpecProfile::Standard),
        Just(SpecProfile::WebGl),
        Just(SpecProfile::CssShaders)
    ]
}

proptest! {
    /// Property: construction is a pure function of its inputs
    #[test]
    fn construction_is_deterministic(
        resources in resources_strategy(),
        stage in stage_strategy(),
        profile in profile_strategy(),
    ) {
        let a = build_environment(stage, profile, &resources).unwrap();
        let b = build_environment(stage, profile, &resources).unwrap();
        prop_assert_eq!(a, b);
    }

    /// Property: gl_FragData always has exactly max_draw_buffers elements
    #[test]
    fn frag_data_matches_draw_buffer_limit(resources in resources_strategy()) {
        let env = build_environment(ShaderStage::Fragment, SpecProfile::Standard, &resources).unwrap();
        let frag_data = env.symbols.lookup("gl_FragData").and_then(|s| s.as_variable()).unwrap();
        prop_assert_eq!(frag_data.ty.array_size(), Some(resources.max_draw_buffers));
    }

    /// Property: constants equal their limits, saturating at i32::MAX
    #[test]
    fn constants_track_limits(resources in resources_strategy(), stage in stage_strategy()) {
        let env = build_environment(stage, SpecProfile::Standard, &resources).unwrap();
        for info in BUILTIN_CONSTANTS {
            let constant = env.symbols.lookup(info.canonical).and_then(|s| s.as_variable()).and_then(|v| v.constant);
            let expected = i32::try_from(resources.limit(info.id)).unwrap_or(i32::MAX);
            prop_assert_eq!(constant, Some(expected), "{}", info.canonical);
        }
    }

    /// Property: the environment's extension table equals a fresh seeding, all undefined
    #[test]
    fn environment_extensions_equal_seeding(resources in resources_strategy(), stage in stage_strategy()) {
        let env = build_environment(stage, SpecProfile::Standard, &resources).unwrap();
        let mut seeded = ExtensionBehaviorTable::new();
        seed_extension_behavior(&resources, &mut seeded);
        prop_assert!(seeded.iter().all(|(_, b)| b == ExtensionBehavior::Undefined));
        prop_assert_eq!(env.extensions, seeded);
    }

    /// Property: derivative functions exist only in fragment shaders of capable hosts
    #[test]
    fn derivatives_only_where_supported(
        resources in resources_strategy(),
        stage in stage_strategy(),
        profile in profile_strategy(),
    ) {
        let env = build_environment(stage, profile, &resources).unwrap();
        let expected = stage == ShaderStage::Fragment && resources.supports_standard_derivatives;
        prop_assert_eq!(env.symbols.lookup("dFdx").is_some(), expected);
    }
}
