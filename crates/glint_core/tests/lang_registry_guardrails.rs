use std::collections::{HashMap, HashSet};

use glint_core::lang::builtins::{self, StageFilter};
use glint_core::lang::extensions;
use glint_core::lang::operators;
use glint_core::lang::registry::Origin;
use glint_core::lang::types;

#[test]
fn element_kind_spellings_unique_and_resolvable() {
    let mut seen: HashMap<&'static str, types::ElementKind> = HashMap::new();

    for info in types::ELEMENT_KINDS {
        let spelling = types::parse_spelling(info.canonical)
            .unwrap_or_else(|| panic!("element kind spelling not resolvable: {}", info.canonical));
        assert_eq!(spelling.kind, info.id, "parse mismatch for {}", info.canonical);
        assert_eq!(spelling.size, 1);
        assert!(!spelling.is_matrix);
        assert_eq!(types::as_str(info.id), info.canonical, "as_str mismatch for {:?}", info.id);

        if let Some(prev) = seen.insert(info.canonical, info.id) {
            panic!("duplicate element spelling {:?}: {:?} and {:?}", info.canonical, prev, info.id);
        }
    }
}

#[test]
fn extension_spellings_unique_and_resolvable() {
    let mut seen = HashSet::new();

    for info in extensions::EXTENSIONS {
        assert_eq!(
            extensions::from_str(info.canonical),
            Some(info.id),
            "extension name not resolvable: {}",
            info.canonical
        );
        assert_eq!(extensions::as_str(info.id), info.canonical);
        assert!(info.canonical.starts_with("GL_"), "extension without GL_ prefix: {}", info.canonical);
        assert!(seen.insert(info.canonical), "duplicate extension {}", info.canonical);
    }
    assert_eq!(extensions::from_str(extensions::ALL_EXTENSIONS), None);
}

#[test]
fn builtin_variable_and_constant_names_are_unique() {
    let mut seen = HashSet::new();

    for info in builtins::BUILTIN_VARIABLES {
        assert!(info.canonical.starts_with("gl_") || info.canonical.starts_with("css_"));
        assert!(seen.insert(info.canonical), "duplicate builtin variable {}", info.canonical);
        assert!(!info.description.is_empty(), "{} has no description", info.canonical);
        assert_eq!(
            info.canonical.starts_with("css_"),
            info.origin == Origin::Profile,
            "profile origin mismatch for {}",
            info.canonical
        );
        assert_eq!(builtins::var_name(info.id), info.canonical);
    }
    for info in builtins::BUILTIN_CONSTANTS {
        assert!(info.canonical.starts_with("gl_Max"), "odd constant name {}", info.canonical);
        assert!(seen.insert(info.canonical), "duplicate builtin constant {}", info.canonical);
        assert_eq!(builtins::constant_name(info.id), info.canonical);
    }
    assert!(seen.insert(builtins::DEPTH_RANGE_STRUCT));
}

/// Every overload a stage could ever see, with all capabilities on.
fn overload_keys(stage: StageFilter) -> Vec<(String, String)> {
    builtins::BUILTIN_GROUPS
        .iter()
        .filter(|group| group.stage == StageFilter::Any || group.stage == stage)
        .flat_map(|group| group.families.iter())
        .flat_map(|family| family.expand())
        .map(|overload| (overload.name.to_string(), format!("{:?}", overload.params)))
        .collect()
}

#[test]
fn no_stage_sees_the_same_overload_twice() {
    for stage in [StageFilter::Vertex, StageFilter::Fragment] {
        let mut seen = HashSet::new();
        for key in overload_keys(stage) {
            assert!(seen.insert(key.clone()), "duplicate overload {key:?} for {stage:?}");
        }
    }
}

#[test]
fn expanded_overloads_only_use_valid_shapes() {
    for group in builtins::BUILTIN_GROUPS {
        for family in group.families {
            assert!(family.arities.min >= 1 && family.arities.max <= 4, "bad arities on {}", family.name);
            assert!(family.arities.min <= family.arities.max);
            for overload in family.expand() {
                for shape in std::iter::once(&overload.ret).chain(overload.params.iter()) {
                    let spelled = if shape.is_matrix {
                        types::matrix_spelling(shape.size)
                    } else {
                        types::vector_spelling(shape.kind, shape.size)
                    };
                    assert!(spelled.is_some(), "{} expands to an unspellable shape {shape:?}", family.name);
                }
            }
        }
    }
}

#[test]
fn every_relation_names_a_registered_family() {
    let names: HashSet<&str> = builtins::BUILTIN_GROUPS
        .iter()
        .flat_map(|group| group.families.iter())
        .map(|family| family.name)
        .collect();

    for relation in operators::OPERATOR_RELATIONS.iter().chain(operators::DERIVATIVE_RELATIONS) {
        assert!(names.contains(relation.name), "relation for unknown function {}", relation.name);
        assert_eq!(operators::relation_for(relation.name), Some(relation.op));
    }
}

#[test]
fn derivative_relations_stay_out_of_the_common_table() {
    for relation in operators::DERIVATIVE_RELATIONS {
        assert!(
            !operators::OPERATOR_RELATIONS.iter().any(|r| r.name == relation.name),
            "{} must only be related when derivatives are available",
            relation.name
        );
    }
}
