//! Type descriptors for shader values.
//!
//! A [`TypeDesc`] is what the symbol table stores for every builtin parameter, return value, and variable. It is a
//! small value type: element kind (or struct), component count, matrix flag, precision, storage qualifier, and an
//! optional array size.
//!
//! ## Notes
//! - Matrices are always float; [`TypeDesc::matrix`] is the only way to build one.
//! - Overload identity ([`TypeDesc::same_shape`]) ignores precision and storage qualifier.
//! - `Display` renders the unqualified GLSL spelling (`vec4`, `mat3`, `vec4[4]`); [`TypeDesc::qualified`] adds
//!   precision and qualifier for dumps.

use std::fmt;
use std::sync::Arc;

use glint_core::lang::types::{self, ElementKind, Precision, Spelling, StorageQualifier};
use serde::{Serialize, Serializer};

/// Basic type of a descriptor: a builtin element kind or a named struct.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum BasicType {
    Element(ElementKind),
    Struct(Arc<StructDesc>),
}

/// One named field of a struct type.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FieldDesc {
    pub name: String,
    pub ty: TypeDesc,
}

/// Aggregate type with an ordered field list.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StructDesc {
    pub name: String,
    pub fields: Vec<FieldDesc>,
}

impl StructDesc {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
        }
    }

    /// Append a field.
    pub fn with_field(mut self, name: impl Into<String>, ty: TypeDesc) -> Self {
        self.fields.push(FieldDesc { name: name.into(), ty });
        self
    }

    pub fn field(&self, name: &str) -> Option<&FieldDesc> {
        self.fields.iter().find(|f| f.name == name)
    }
}

/// Describe a shader value type.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TypeDesc {
    basic: BasicType,
    size: u8,
    is_matrix: bool,
    precision: Precision,
    qualifier: StorageQualifier,
    array_size: Option<u32>,
}

impl TypeDesc {
    fn element(kind: ElementKind, size: u8, is_matrix: bool) -> Self {
        Self {
            basic: BasicType::Element(kind),
            size,
            is_matrix,
            precision: Precision::Unspecified,
            qualifier: StorageQualifier::Global,
            array_size: None,
        }
    }

    /// A single component of `kind`.
    pub fn scalar(kind: ElementKind) -> Self {
        Self::element(kind, 1, false)
    }

    /// A vector of `kind` with `size` components (1..=4; 1 is a scalar).
    pub fn vector(kind: ElementKind, size: u8) -> Self {
        debug_assert!((1..=4).contains(&size), "vector size out of range: {size}");
        Self::element(kind, size, false)
    }

    /// A square float matrix of dimension `size` (2..=4).
    pub fn matrix(size: u8) -> Self {
        debug_assert!((2..=4).contains(&size), "matrix size out of range: {size}");
        Self::element(ElementKind::Float, size, true)
    }

    /// A value of an aggregate type.
    pub fn structure(desc: Arc<StructDesc>) -> Self {
        Self {
            basic: BasicType::Struct(desc),
            size: 1,
            is_matrix: false,
            precision: Precision::Unspecified,
            qualifier: StorageQualifier::Global,
            array_size: None,
        }
    }

    /// Build from a vocabulary shape (used when expanding overload tables).
    pub fn from_spelling(shape: Spelling) -> Self {
        if shape.is_matrix {
            Self::matrix(shape.size)
        } else {
            Self::vector(shape.kind, shape.size)
        }
    }

    /// Set the precision qualifier. Only float and int based types carry one.
    pub fn with_precision(mut self, precision: Precision) -> Self {
        debug_assert!(
            precision == Precision::Unspecified || self.kind().is_some_and(ElementKind::takes_precision),
            "{self} cannot carry a precision qualifier"
        );
        self.precision = precision;
        self
    }

    pub fn with_qualifier(mut self, qualifier: StorageQualifier) -> Self {
        self.qualifier = qualifier;
        self
    }

    /// Make this an array of `len` elements. A length of 0 means "not an array".
    pub fn array(mut self, len: u32) -> Self {
        self.array_size = (len > 0).then_some(len);
        self
    }

    /// Element kind, or `None` for struct types.
    pub fn kind(&self) -> Option<ElementKind> {
        match &self.basic {
            BasicType::Element(kind) => Some(*kind),
            BasicType::Struct(_) => None,
        }
    }

    pub fn basic(&self) -> &BasicType {
        &self.basic
    }

    pub fn struct_desc(&self) -> Option<&StructDesc> {
        match &self.basic {
            BasicType::Struct(desc) => Some(desc),
            BasicType::Element(_) => None,
        }
    }

    /// Component count for vectors, dimension for matrices.
    pub fn size(&self) -> u8 {
        self.size
    }

    pub fn is_matrix(&self) -> bool {
        self.is_matrix
    }

    pub fn precision(&self) -> Precision {
        self.precision
    }

    pub fn qualifier(&self) -> StorageQualifier {
        self.qualifier
    }

    pub fn array_size(&self) -> Option<u32> {
        self.array_size
    }

    pub fn is_array(&self) -> bool {
        self.array_size.is_some()
    }

    /// Whether two descriptors denote the same type for overload resolution.
    pub fn same_shape(&self, other: &TypeDesc) -> bool {
        let basic_eq = match (&self.basic, &other.basic) {
            (BasicType::Element(a), BasicType::Element(b)) => a == b,
            (BasicType::Struct(a), BasicType::Struct(b)) => a.name == b.name,
            _ => false,
        };
        basic_eq && self.size == other.size && self.is_matrix == other.is_matrix && self.array_size == other.array_size
    }

    /// Parse a spelling such as `vec3`, `sampler2D`, `vec4[4]` or `highp vec2`.
    ///
    /// A leading precision is only accepted on float and int types. Struct names are not resolved here; use the
    /// symbol table for those.
    pub fn parse(spelling: &str) -> Option<TypeDesc> {
        let spelling = spelling.trim();
        let qualified = spelling
            .split_once(char::is_whitespace)
            .and_then(|(head, rest)| Some((types::parse_precision(head)?, rest)));
        if let Some((precision, rest)) = qualified {
            let ty = TypeDesc::parse(rest)?;
            return ty.kind().is_some_and(ElementKind::takes_precision).then(|| ty.with_precision(precision));
        }
        let (base, array) = match spelling.split_once('[') {
            Some((base, rest)) => {
                let len = rest.strip_suffix(']')?.trim().parse::<u32>().ok().filter(|n| *n > 0)?;
                (base.trim(), Some(len))
            }
            None => (spelling, None),
        };
        let shape = types::parse_spelling(base)?;
        let ty = TypeDesc::from_spelling(shape);
        Some(match array {
            Some(len) => ty.array(len),
            None => ty,
        })
    }

    /// Spelling with precision and storage qualifier, e.g. `highp vec4 (Position)`.
    pub fn qualified(&self) -> String {
        let mut out = String::new();
        if self.precision != Precision::Unspecified {
            out.push_str(self.precision.as_str());
            out.push(' ');
        }
        out.push_str(&self.to_string());
        if self.qualifier != StorageQualifier::Global {
            out.push_str(&format!(" ({})", types::qualifier_str(self.qualifier)));
        }
        out
    }
}

impl fmt::Display for TypeDesc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.basic {
            BasicType::Struct(desc) => write!(f, "{}", desc.name)?,
            BasicType::Element(kind) => {
                let spelling = if self.is_matrix {
                    types::matrix_spelling(self.size)
                } else {
                    types::vector_spelling(*kind, self.size)
                };
                write!(f, "{}", spelling.unwrap_or("<invalid>"))?;
            }
        }
        if let Some(len) = self.array_size {
            write!(f, "[{len}]")?;
        }
        Ok(())
    }
}

impl Serialize for TypeDesc {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&self.qualified())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_uses_glsl_spellings() {
        assert_eq!(TypeDesc::vector(ElementKind::Float, 4).to_string(), "vec4");
        assert_eq!(TypeDesc::scalar(ElementKind::Bool).to_string(), "bool");
        assert_eq!(TypeDesc::matrix(3).to_string(), "mat3");
        assert_eq!(TypeDesc::vector(ElementKind::Float, 4).array(4).to_string(), "vec4[4]");
    }

    #[test]
    fn matrices_are_float() {
        let m = TypeDesc::matrix(4);
        assert!(m.is_matrix());
        assert_eq!(m.kind(), Some(ElementKind::Float));
    }

    #[test]
    fn zero_length_array_is_not_an_array() {
        let t = TypeDesc::scalar(ElementKind::Float).array(0);
        assert!(!t.is_array());
        assert_eq!(t.array_size(), None);
    }

    #[test]
    fn same_shape_ignores_precision_and_qualifier() {
        let a = TypeDesc::vector(ElementKind::Float, 2).with_precision(Precision::High);
        let b = TypeDesc::vector(ElementKind::Float, 2).with_qualifier(StorageQualifier::Uniform);
        assert!(a.same_shape(&b));
        assert!(!a.same_shape(&TypeDesc::vector(ElementKind::Int, 2)));
        assert!(!TypeDesc::matrix(2).same_shape(&TypeDesc::vector(ElementKind::Float, 2)));
    }

    #[test]
    fn parse_accepts_arrays_and_rejects_garbage() {
        let t = TypeDesc::parse("vec4[2]").unwrap();
        assert_eq!(t.array_size(), Some(2));
        assert_eq!(t.size(), 4);
        assert!(TypeDesc::parse("vec4[0]").is_none());
        assert!(TypeDesc::parse("vec4[").is_none());
        assert!(TypeDesc::parse("float3").is_none());
    }

    #[test]
    fn parse_accepts_a_leading_precision() {
        let t = TypeDesc::parse("highp vec2").unwrap();
        assert_eq!(t.precision(), Precision::High);
        assert_eq!(t.size(), 2);
        assert_eq!(TypeDesc::parse("lowp  ivec3[2]").unwrap().array_size(), Some(2));
        assert!(TypeDesc::parse("mediump bool").is_none());
        assert!(TypeDesc::parse("highp sampler2D").is_none());
        assert!(TypeDesc::parse("fastp vec2").is_none());
    }

    #[test]
    #[should_panic(expected = "cannot carry a precision qualifier")]
    #[cfg(debug_assertions)]
    fn precision_on_bool_is_rejected() {
        let _ = TypeDesc::scalar(ElementKind::Bool).with_precision(Precision::High);
    }

    #[test]
    fn qualified_spelling_includes_precision_and_storage() {
        let t = TypeDesc::vector(ElementKind::Float, 4)
            .with_precision(Precision::High)
            .with_qualifier(StorageQualifier::VertexPositionOutput);
        assert_eq!(t.qualified(), "highp vec4 (Position)");
    }

    #[test]
    fn struct_fields_are_ordered() {
        let desc = StructDesc::new("S")
            .with_field("a", TypeDesc::scalar(ElementKind::Float))
            .with_field("b", TypeDesc::scalar(ElementKind::Int));
        let names: Vec<_> = desc.fields.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["a", "b"]);
        assert_eq!(TypeDesc::structure(Arc::new(desc)).to_string(), "S");
    }
}
