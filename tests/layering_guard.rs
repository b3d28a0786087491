//! Layering guardrails keeping the vocabulary crate dependency-free.
//!
//! `glint_core` holds only static tables shared by the front end and tooling. This test scans its
//! `Cargo.toml` and fails if a `[dependencies]` table with entries appears.

#[test]
fn core_vocabulary_has_no_dependencies() {
    let manifest = include_str!("../crates/glint_core/Cargo.toml");
    let mut in_dependencies = false;

    for raw_line in manifest.lines() {
        let line = raw_line.trim();
        if line.starts_with('[') {
            in_dependencies = line == "[dependencies]" || line.starts_with("[dependencies.");
            continue;
        }

        if !in_dependencies || line.is_empty() || line.starts_with('#') {
            continue;
        }

        panic!("`glint_core` must stay dependency-free, found `{line}`");
    }
}

#[test]
fn core_vocabulary_is_a_normal_dependency_of_the_front_end() {
    let manifest = include_str!("../Cargo.toml");
    assert!(
        manifest.lines().any(|l| l.trim_start().starts_with("glint_core")),
        "root crate must depend on glint_core"
    );
}
