#![no_main]

use glint::frontend::builtins::build_environment;
use glint::frontend::extensions::ExtensionBehavior;
use glint::frontend::resources::{ShaderResources, ShaderStage, SpecProfile};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Treat the input as a host resource file, then replay `#extension` lines against the seeded table
    let Ok(s) = std::str::from_utf8(data) else {
        return;
    };
    let (json, directives) = s.split_once("\n---\n").unwrap_or((s, ""));
    let Ok(resources) = ShaderResources::from_json_str(json) else {
        return;
    };
    for stage in [ShaderStage::Vertex, ShaderStage::Fragment] {
        for profile in [SpecProfile::Standard, SpecProfile::CssShaders] {
            let Ok(mut env) = build_environment(stage, profile, &resources) else {
                continue;
            };
            for line in directives.lines() {
                let Some((name, behavior)) = line.split_once(':') else {
                    continue;
                };
                if let Ok(behavior) = ExtensionBehavior::parse(behavior.trim()) {
                    let _ = env.extensions.apply_directive(name.trim(), behavior);
                }
            }
        }
    }
});
