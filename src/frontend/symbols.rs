//! Symbol table and level management for shader compilation units.
//!
//! Tracks every named entity (functions, variables, constants, struct types) in a stack of levels. Level 0 holds the
//! builtins; the parser pushes a global level on top of it and then one level per function body and block.
//!
//! Functions are stored per overload and keyed by their signature (`name(param,param)`), so one name can carry many
//! entries at the same level. Every other kind of symbol owns its name within a level.

use std::collections::HashMap;
use std::sync::Arc;

use glint_core::lang::extensions::{self, ExtensionId};
use glint_core::lang::operators::IntrinsicOp;
use glint_core::lang::types::{ElementKind, Precision, StorageQualifier};

use super::errors::SymbolError;
use super::extensions::ExtensionBehaviorTable;
use super::types::{StructDesc, TypeDesc};

/// Unique identifier for symbols
pub type SymbolId = usize;

/// Index of the builtin level.
pub const BUILTIN_LEVEL: usize = 0;

/// Symbol table managing all named entities of one compilation unit
#[derive(Debug, Clone, PartialEq)]
pub struct SymbolTable {
    symbols: Vec<Symbol>,
    levels: Vec<Level>,
}

impl Default for SymbolTable {
    fn default() -> Self {
        Self::new()
    }
}

impl SymbolTable {
    /// Create a table holding only an empty builtin level.
    pub fn new() -> Self {
        Self {
            symbols: Vec::new(),
            levels: vec![Level::new(LevelKind::Builtin, 0)],
        }
    }

    /// Enter a new level
    pub fn push_level(&mut self, kind: LevelKind) {
        self.levels.push(Level::new(kind, self.symbols.len()));
    }

    /// Exit the current level, dropping its symbols. The builtin level is never popped.
    pub fn pop_level(&mut self) -> bool {
        if self.levels.len() == 1 {
            return false;
        }
        if let Some(level) = self.levels.pop() {
            self.symbols.truncate(level.first_symbol);
        }
        true
    }

    /// Index of the innermost level
    pub fn current_level(&self) -> usize {
        self.levels.len() - 1
    }

    /// Kind of the innermost level
    pub fn current_level_kind(&self) -> LevelKind {
        self.levels[self.current_level()].kind
    }

    fn push_symbol(&mut self, name: &str, kind: SymbolKind) -> SymbolId {
        let level = self.current_level();
        let id = self.symbols.len();
        self.symbols.push(Symbol {
            name: name.to_string(),
            kind,
            level,
        });
        self.levels[level].names.entry(name.to_string()).or_default().push(id);
        id
    }

    fn name_taken(&self, name: &str) -> bool {
        self.levels[self.current_level()].names.contains_key(name)
    }

    fn name_is_function(&self, name: &str) -> bool {
        self.levels[self.current_level()]
            .names
            .get(name)
            .and_then(|ids| ids.first())
            .is_some_and(|&id| matches!(self.symbols[id].kind, SymbolKind::Function(_)))
    }

    /// Insert one function overload in the current level.
    ///
    /// ## Errors
    /// - [`SymbolError::DuplicateOverload`] if the same name and parameter list is already present.
    /// - [`SymbolError::Redefinition`] if the name is already used by a non-function at this level.
    pub fn insert_function_overload(
        &mut self,
        name: &str,
        ret: TypeDesc,
        params: Vec<TypeDesc>,
    ) -> Result<SymbolId, SymbolError> {
        if self.name_taken(name) && !self.name_is_function(name) {
            return Err(SymbolError::Redefinition { name: name.to_string() });
        }
        let signature = signature(name, &params);
        let level = self.current_level();
        if self.levels[level].signatures.contains_key(&signature) {
            return Err(SymbolError::DuplicateOverload { signature });
        }
        let id = self.push_symbol(
            name,
            SymbolKind::Function(FunctionInfo {
                ret,
                params,
                op: None,
                extension: None,
            }),
        );
        self.levels[level].signatures.insert(signature, id);
        Ok(id)
    }

    /// Insert a variable in the current level.
    pub fn insert_variable(&mut self, name: &str, ty: TypeDesc) -> Result<SymbolId, SymbolError> {
        if self.name_taken(name) {
            return Err(SymbolError::Redefinition { name: name.to_string() });
        }
        Ok(self.push_symbol(
            name,
            SymbolKind::Variable(VariableInfo {
                ty,
                constant: None,
                extension: None,
            }),
        ))
    }

    /// Insert a `const mediump int` with a known value.
    pub fn insert_constant_int(&mut self, name: &str, value: i32) -> Result<SymbolId, SymbolError> {
        if self.name_taken(name) {
            return Err(SymbolError::Redefinition { name: name.to_string() });
        }
        let ty = TypeDesc::scalar(ElementKind::Int)
            .with_precision(Precision::Medium)
            .with_qualifier(StorageQualifier::Const);
        Ok(self.push_symbol(
            name,
            SymbolKind::Variable(VariableInfo {
                ty,
                constant: Some(value),
                extension: None,
            }),
        ))
    }

    /// Declare a struct type and return the shared descriptor for building values of it.
    pub fn insert_struct(&mut self, desc: StructDesc) -> Result<Arc<StructDesc>, SymbolError> {
        if self.name_taken(&desc.name) {
            return Err(SymbolError::Redefinition { name: desc.name });
        }
        let name = desc.name.clone();
        let desc = Arc::new(desc);
        self.push_symbol(&name, SymbolKind::Struct(Arc::clone(&desc)));
        Ok(desc)
    }

    fn builtin_ids(&self, name: &str) -> Vec<SymbolId> {
        self.levels[BUILTIN_LEVEL].names.get(name).cloned().unwrap_or_default()
    }

    /// Relate every builtin overload of `name` to an intrinsic operator.
    ///
    /// ## Returns
    /// - The number of overloads updated (0 when `name` is not a builtin function).
    pub fn relate_to_operator(&mut self, name: &str, op: IntrinsicOp) -> usize {
        let mut updated = 0;
        for id in self.builtin_ids(name) {
            if let SymbolKind::Function(info) = &mut self.symbols[id].kind {
                info.op = Some(op);
                updated += 1;
            }
        }
        updated
    }

    /// Relate a builtin function (every overload) or variable to the extension that must be enabled to use it.
    ///
    /// ## Returns
    /// - The number of symbols updated.
    pub fn relate_to_extension(&mut self, name: &str, extension: ExtensionId) -> usize {
        let mut updated = 0;
        for id in self.builtin_ids(name) {
            match &mut self.symbols[id].kind {
                SymbolKind::Function(info) => info.extension = Some(extension),
                SymbolKind::Variable(info) => info.extension = Some(extension),
                SymbolKind::Struct(_) => continue,
            }
            updated += 1;
        }
        updated
    }

    /// Look up a symbol id by name in the level chain, innermost first.
    ///
    /// For functions this is the first overload declared at the innermost level that has the name.
    pub fn lookup_id(&self, name: &str) -> Option<SymbolId> {
        self.levels
            .iter()
            .rev()
            .find_map(|level| level.names.get(name).and_then(|ids| ids.first().copied()))
    }

    /// Look up a symbol by name in the level chain, innermost first.
    pub fn lookup(&self, name: &str) -> Option<&Symbol> {
        self.lookup_id(name).map(|id| &self.symbols[id])
    }

    /// Resolve a call to `name` with argument types `args`.
    ///
    /// The innermost level declaring `name` decides: a user function hides every builtin overload of the same name.
    /// Matching ignores precision and storage qualifier.
    ///
    /// ## Errors
    /// - [`SymbolError::UndeclaredIdentifier`] when no level declares `name`.
    /// - [`SymbolError::NotAFunction`] when `name` resolves to a variable or struct.
    /// - [`SymbolError::NoMatchingOverload`] when no overload takes exactly `args`.
    pub fn lookup_function(&self, name: &str, args: &[TypeDesc]) -> Result<&Symbol, SymbolError> {
        let ids = self
            .levels
            .iter()
            .rev()
            .find_map(|level| level.names.get(name))
            .ok_or_else(|| SymbolError::UndeclaredIdentifier { name: name.to_string() })?;

        let mut saw_function = false;
        for &id in ids {
            let symbol = &self.symbols[id];
            if let SymbolKind::Function(info) = &symbol.kind {
                saw_function = true;
                if info.params.len() == args.len() && info.params.iter().zip(args).all(|(p, a)| p.same_shape(a)) {
                    return Ok(symbol);
                }
            }
        }

        if !saw_function {
            return Err(SymbolError::NotAFunction { name: name.to_string() });
        }
        Err(SymbolError::NoMatchingOverload {
            call: signature(name, args),
        })
    }

    /// Every function overload named `name`, innermost level first, declaration order within a level.
    pub fn overloads(&self, name: &str) -> Vec<&Symbol> {
        self.levels
            .iter()
            .rev()
            .filter_map(|level| level.names.get(name))
            .flatten()
            .map(|&id| &self.symbols[id])
            .filter(|s| matches!(s.kind, SymbolKind::Function(_)))
            .collect()
    }

    /// Builtin-level symbols in insertion order.
    pub fn builtin_symbols(&self) -> impl Iterator<Item = &Symbol> {
        self.symbols.iter().filter(|s| s.level == BUILTIN_LEVEL)
    }

    /// Get a symbol by ID
    pub fn get(&self, id: SymbolId) -> Option<&Symbol> {
        self.symbols.get(id)
    }

    pub fn is_builtin(&self, id: SymbolId) -> bool {
        self.symbols.get(id).is_some_and(|s| s.level == BUILTIN_LEVEL)
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Check that the extension a symbol is related to (if any) is enabled by the source.
    pub fn check_extension(&self, symbol: &Symbol, table: &ExtensionBehaviorTable) -> Result<(), SymbolError> {
        match symbol.extension() {
            Some(ext) if !table.is_enabled(ext) => Err(SymbolError::ExtensionNotEnabled {
                name: symbol.name.clone(),
                extension: extensions::as_str(ext),
            }),
            _ => Ok(()),
        }
    }
}

/// Render the signature key of an overload, e.g. `pow(vec3,vec3)`.
pub fn signature(name: &str, params: &[TypeDesc]) -> String {
    let params: Vec<String> = params.iter().map(ToString::to_string).collect();
    format!("{name}({})", params.join(","))
}

/// A level containing symbol definitions
#[derive(Debug, Clone, PartialEq)]
pub struct Level {
    pub kind: LevelKind,
    first_symbol: SymbolId,
    names: HashMap<String, Vec<SymbolId>>,
    signatures: HashMap<String, SymbolId>,
}

impl Level {
    pub fn new(kind: LevelKind, first_symbol: SymbolId) -> Self {
        Self {
            kind,
            first_symbol,
            names: HashMap::new(),
            signatures: HashMap::new(),
        }
    }
}

/// Kind of level
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LevelKind {
    Builtin,
    Global,
    Function,
    Block,
}

/// A symbol in the symbol table
#[derive(Debug, Clone, PartialEq)]
pub struct Symbol {
    pub name: String,
    pub kind: SymbolKind,
    pub level: usize,
}

impl Symbol {
    pub fn as_function(&self) -> Option<&FunctionInfo> {
        match &self.kind {
            SymbolKind::Function(info) => Some(info),
            _ => None,
        }
    }

    pub fn as_variable(&self) -> Option<&VariableInfo> {
        match &self.kind {
            SymbolKind::Variable(info) => Some(info),
            _ => None,
        }
    }

    /// Extension this symbol is gated on, if any.
    pub fn extension(&self) -> Option<ExtensionId> {
        match &self.kind {
            SymbolKind::Function(info) => info.extension,
            SymbolKind::Variable(info) => info.extension,
            SymbolKind::Struct(_) => None,
        }
    }

    /// Signature key for functions, plain name otherwise.
    pub fn signature(&self) -> String {
        match &self.kind {
            SymbolKind::Function(info) => signature(&self.name, &info.params),
            _ => self.name.clone(),
        }
    }
}

/// Kind of symbol
#[derive(Debug, Clone, PartialEq)]
pub enum SymbolKind {
    Variable(VariableInfo),
    Function(FunctionInfo),
    Struct(Arc<StructDesc>),
}

/// Variable (or constant) information
#[derive(Debug, Clone, PartialEq)]
pub struct VariableInfo {
    pub ty: TypeDesc,
    /// Folded value for `const int` builtins.
    pub constant: Option<i32>,
    pub extension: Option<ExtensionId>,
}

/// Function overload information
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionInfo {
    pub ret: TypeDesc,
    pub params: Vec<TypeDesc>,
    /// Operator a call lowers to instead of a call node.
    pub op: Option<IntrinsicOp>,
    pub extension: Option<ExtensionId>,
}
