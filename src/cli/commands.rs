//! CLI command implementations
//!
//! All command functions return `CliResult<ExitCode>` instead of calling
//! `process::exit`. Error handling and exits happen in the top-level `run()`.

use std::path::Path;

use glint_core::lang::extensions;
use serde::Serialize;

use crate::frontend::builtins::{BuiltinEnvironment, build_environment};
use crate::frontend::extensions::ExtensionBehaviorTable;
use crate::frontend::resources::{ShaderResources, ShaderStage, SpecProfile};
use crate::frontend::symbols::{Symbol, SymbolKind, SymbolTable};
use crate::frontend::types::TypeDesc;

use super::{CliError, CliResult, ExitCode};

/// Load resources from `path`, or use the defaults.
fn load_resources(path: Option<&Path>) -> CliResult<ShaderResources> {
    match path {
        Some(path) => ShaderResources::load(path).map_err(CliError::from_diagnostic),
        None => Ok(ShaderResources::default()),
    }
}

fn environment(stage: ShaderStage, profile: SpecProfile, resources: Option<&Path>) -> CliResult<BuiltinEnvironment> {
    let resources = load_resources(resources)?;
    build_environment(stage, profile, &resources).map_err(CliError::from_diagnostic)
}

// ============================================================================
// dump
// ============================================================================

/// One builtin symbol, flattened for JSON output.
#[derive(Debug, Serialize)]
pub struct DumpEntry {
    pub kind: &'static str,
    pub name: String,
    pub signature: String,
    #[serde(rename = "type")]
    pub ty: Option<TypeDesc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub op: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extension: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<i32>,
}

impl DumpEntry {
    fn from_symbol(symbol: &Symbol) -> Self {
        let extension = symbol.extension().map(extensions::as_str);
        match &symbol.kind {
            SymbolKind::Function(info) => Self {
                kind: "function",
                name: symbol.name.clone(),
                signature: symbol.signature(),
                ty: Some(info.ret.clone()),
                op: info.op.map(|op| op.mnemonic()),
                extension,
                value: None,
            },
            SymbolKind::Variable(info) => Self {
                kind: if info.constant.is_some() { "constant" } else { "variable" },
                name: symbol.name.clone(),
                signature: symbol.signature(),
                ty: Some(info.ty.clone()),
                op: None,
                extension,
                value: info.constant,
            },
            SymbolKind::Struct(_) => Self {
                kind: "struct",
                name: symbol.name.clone(),
                signature: symbol.signature(),
                ty: None,
                op: None,
                extension,
                value: None,
            },
        }
    }
}

/// Render one builtin symbol as a single line.
pub fn render_symbol(symbol: &Symbol) -> String {
    let mut line = match &symbol.kind {
        SymbolKind::Function(info) => format!("fn {} -> {}", symbol.signature(), info.ret),
        SymbolKind::Variable(info) => match info.constant {
            Some(value) => format!("const {} = {value}", symbol.name),
            None => format!("var {}: {}", symbol.name, info.ty.qualified()),
        },
        SymbolKind::Struct(desc) => {
            let fields: Vec<String> = desc
                .fields
                .iter()
                .map(|f| format!("{} {};", f.ty.qualified(), f.name))
                .collect();
            format!("struct {} {{ {} }}", desc.name, fields.join(" "))
        }
    };
    if let Some(op) = symbol.as_function().and_then(|f| f.op) {
        line.push_str(&format!(" [op={}]", op.mnemonic()));
    }
    if let Some(ext) = symbol.extension() {
        line.push_str(&format!(" [ext={}]", extensions::as_str(ext)));
    }
    line
}

/// Render every builtin symbol, one per line, in insertion order.
pub fn render_environment(symbols: &SymbolTable) -> String {
    let lines: Vec<String> = symbols.builtin_symbols().map(render_symbol).collect();
    lines.join("\n")
}

/// Print the builtin environment of a stage/profile/resources combination.
pub fn dump(stage: ShaderStage, profile: SpecProfile, resources: Option<&Path>, json: bool) -> CliResult<ExitCode> {
    let env = environment(stage, profile, resources)?;
    if json {
        let entries: Vec<DumpEntry> = env.symbols.builtin_symbols().map(DumpEntry::from_symbol).collect();
        let out = serde_json::to_string_pretty(&entries)
            .map_err(|e| CliError::failure(format!("Error serializing dump: {e}")))?;
        println!("{out}");
    } else {
        println!("{}", render_environment(&env.symbols));
    }
    Ok(ExitCode::SUCCESS)
}

// ============================================================================
// extensions
// ============================================================================

/// Render the extension table as `name: behavior` lines.
pub fn render_extensions(table: &ExtensionBehaviorTable) -> String {
    let lines: Vec<String> = table.iter().map(|(name, b)| format!("{name}: {b}")).collect();
    lines.join("\n")
}

/// Print the extension table seeded from the host resources.
pub fn print_extensions(resources: Option<&Path>) -> CliResult<ExitCode> {
    let resources = load_resources(resources)?;
    let mut table = ExtensionBehaviorTable::new();
    crate::frontend::extensions::seed_extension_behavior(&resources, &mut table);
    if table.is_empty() {
        println!("(no extensions supported)");
    } else {
        println!("{}", render_extensions(&table));
    }
    Ok(ExitCode::SUCCESS)
}

// ============================================================================
// lookup
// ============================================================================

/// Parse argument type spellings for `lookup`.
pub fn parse_arg_types(args: &[String]) -> CliResult<Vec<TypeDesc>> {
    args.iter()
        .map(|a| TypeDesc::parse(a).ok_or_else(|| CliError::failure(format!("Unknown type `{a}`"))))
        .collect()
}

/// Resolve `name(args...)` against the builtin environment and print the chosen overload.
pub fn lookup(
    stage: ShaderStage,
    profile: SpecProfile,
    resources: Option<&Path>,
    name: &str,
    args: &[String],
) -> CliResult<ExitCode> {
    let args = parse_arg_types(args)?;
    let env = environment(stage, profile, resources)?;
    let symbol = env
        .symbols
        .lookup_function(name, &args)
        .map_err(CliError::from_diagnostic)?;
    println!("{}", render_symbol(symbol));
    Ok(ExitCode::SUCCESS)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::frontend::extensions::seed_extension_behavior;

    fn env(stage: ShaderStage, profile: SpecProfile, resources: &ShaderResources) -> BuiltinEnvironment {
        build_environment(stage, profile, resources).unwrap()
    }

    #[test]
    fn renders_extension_table() {
        let mut table = ExtensionBehaviorTable::new();
        seed_extension_behavior(
            &ShaderResources::new().with_standard_derivatives(true).with_draw_buffers(4),
            &mut table,
        );
        insta::assert_snapshot!(render_extensions(&table), @r"
        GL_EXT_draw_buffers: undefined
        GL_OES_standard_derivatives: undefined
        ");
    }

    #[test]
    fn renders_functions_with_relations() {
        let env = env(
            ShaderStage::Fragment,
            SpecProfile::Standard,
            &ShaderResources::new().with_standard_derivatives(true),
        );
        let pow = env
            .symbols
            .lookup_function("pow", &[TypeDesc::parse("vec3").unwrap(), TypeDesc::parse("vec3").unwrap()])
            .unwrap();
        assert_eq!(render_symbol(pow), "fn pow(vec3,vec3) -> vec3 [op=pow]");
        let dfdx = env.symbols.lookup_function("dFdx", &[TypeDesc::parse("vec2").unwrap()]).unwrap();
        assert_eq!(
            render_symbol(dfdx),
            "fn dFdx(vec2) -> vec2 [op=dfdx] [ext=GL_OES_standard_derivatives]"
        );
    }

    #[test]
    fn renders_variables_constants_and_structs() {
        let env = env(ShaderStage::Fragment, SpecProfile::Standard, &ShaderResources::default());
        let frag_data = env.symbols.lookup("gl_FragData").unwrap();
        assert_eq!(render_symbol(frag_data), "var gl_FragData: mediump vec4[1] (FragData)");
        let max = env.symbols.lookup("gl_MaxTextureImageUnits").unwrap();
        assert_eq!(render_symbol(max), "const gl_MaxTextureImageUnits = 8");
        let depth = env.symbols.lookup("gl_DepthRangeParameters").unwrap();
        assert_eq!(
            render_symbol(depth),
            "struct gl_DepthRangeParameters { highp float near; highp float far; highp float diff; }"
        );
    }

    #[test]
    fn dump_entries_serialize_to_json() {
        let env = env(ShaderStage::Vertex, SpecProfile::Standard, &ShaderResources::default());
        let position = env.symbols.lookup("gl_Position").unwrap();
        let json = serde_json::to_value(DumpEntry::from_symbol(position)).unwrap();
        assert_eq!(json["kind"], "variable");
        assert_eq!(json["type"], "highp vec4 (Position)");
        assert!(json.get("op").is_none());
    }

    #[test]
    fn unknown_argument_types_are_reported() {
        let err = parse_arg_types(&["vec3".to_string(), "vec9".to_string()]).unwrap_err();
        assert!(err.message.contains("vec9"));
    }
}
