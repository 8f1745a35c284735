//! Types and symbols shared by the IR, the syntax layer and the semantic model
//!
//! These are descriptors only: the IR carries the symbols it references, and
//! the semantic model hands them out when resolving syntax.

use crate::syntax::TypeSyntax;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrimitiveType {
    Bool,
    Char,
    SByte,
    Byte,
    Short,
    UShort,
    Int,
    UInt,
    Long,
    ULong,
    Float,
    Double,
    Decimal,
    String,
    Object,
}

impl PrimitiveType {
    pub fn keyword(self) -> &'static str {
        match self {
            PrimitiveType::Bool => "bool",
            PrimitiveType::Char => "char",
            PrimitiveType::SByte => "sbyte",
            PrimitiveType::Byte => "byte",
            PrimitiveType::Short => "short",
            PrimitiveType::UShort => "ushort",
            PrimitiveType::Int => "int",
            PrimitiveType::UInt => "uint",
            PrimitiveType::Long => "long",
            PrimitiveType::ULong => "ulong",
            PrimitiveType::Float => "float",
            PrimitiveType::Double => "double",
            PrimitiveType::Decimal => "decimal",
            PrimitiveType::String => "string",
            PrimitiveType::Object => "object",
        }
    }

    pub fn is_integral(self) -> bool {
        matches!(
            self,
            PrimitiveType::SByte
                | PrimitiveType::Byte
                | PrimitiveType::Short
                | PrimitiveType::UShort
                | PrimitiveType::Int
                | PrimitiveType::UInt
                | PrimitiveType::Long
                | PrimitiveType::ULong
        )
    }

    pub fn is_numeric(self) -> bool {
        self.is_integral()
            || matches!(
                self,
                PrimitiveType::Float | PrimitiveType::Double | PrimitiveType::Decimal
            )
    }

    pub fn is_value_type(self) -> bool {
        !matches!(self, PrimitiveType::String | PrimitiveType::Object)
    }

    /// Rank in the implicit numeric conversion lattice, `None` for
    /// non-numeric types. Conversions only go from lower to higher rank
    /// (with the signed/unsigned exceptions handled in `widens_to`).
    fn numeric_rank(self) -> Option<u8> {
        Some(match self {
            PrimitiveType::SByte | PrimitiveType::Byte => 0,
            PrimitiveType::Short | PrimitiveType::UShort | PrimitiveType::Char => 1,
            PrimitiveType::Int | PrimitiveType::UInt => 2,
            PrimitiveType::Long | PrimitiveType::ULong => 3,
            PrimitiveType::Float => 4,
            PrimitiveType::Double => 5,
            PrimitiveType::Decimal => 6,
            _ => return None,
        })
    }

    fn is_unsigned(self) -> bool {
        matches!(
            self,
            PrimitiveType::Byte
                | PrimitiveType::UShort
                | PrimitiveType::UInt
                | PrimitiveType::ULong
                | PrimitiveType::Char
        )
    }

    /// Implicit numeric conversion `self -> target`
    pub fn widens_to(self, target: PrimitiveType) -> bool {
        if self == target {
            return true;
        }
        if target == PrimitiveType::Char {
            return false;
        }
        let (Some(from), Some(to)) = (self.numeric_rank(), target.numeric_rank()) else {
            return false;
        };
        if from >= to {
            return false;
        }
        // float/double never convert to decimal implicitly
        if target == PrimitiveType::Decimal && from >= 4 {
            return false;
        }
        // signed integers never widen into unsigned ones
        if target.is_integral() && target.is_unsigned() && !self.is_unsigned() {
            return false;
        }
        true
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NamedTypeKind {
    Class,
    Struct,
    Enum,
    Interface,
}

/// A resolved type
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TypeRef {
    Primitive(PrimitiveType),
    Named { name: String, kind: NamedTypeKind },
    Nullable(Box<TypeRef>),
    Array(Box<TypeRef>),
}

impl TypeRef {
    pub fn int() -> Self {
        TypeRef::Primitive(PrimitiveType::Int)
    }

    pub fn bool() -> Self {
        TypeRef::Primitive(PrimitiveType::Bool)
    }

    pub fn string() -> Self {
        TypeRef::Primitive(PrimitiveType::String)
    }

    pub fn class(name: impl Into<String>) -> Self {
        TypeRef::Named {
            name: name.into(),
            kind: NamedTypeKind::Class,
        }
    }

    pub fn structure(name: impl Into<String>) -> Self {
        TypeRef::Named {
            name: name.into(),
            kind: NamedTypeKind::Struct,
        }
    }

    pub fn enumeration(name: impl Into<String>) -> Self {
        TypeRef::Named {
            name: name.into(),
            kind: NamedTypeKind::Enum,
        }
    }

    pub fn nullable(inner: TypeRef) -> Self {
        match inner {
            TypeRef::Nullable(_) => inner,
            other => TypeRef::Nullable(Box::new(other)),
        }
    }

    pub fn as_primitive(&self) -> Option<PrimitiveType> {
        match self {
            TypeRef::Primitive(p) => Some(*p),
            _ => None,
        }
    }

    pub fn is_nullable_value_type(&self) -> bool {
        matches!(self, TypeRef::Nullable(_))
    }

    pub fn is_enum(&self) -> bool {
        matches!(
            self,
            TypeRef::Named {
                kind: NamedTypeKind::Enum,
                ..
            }
        )
    }

    pub fn is_value_type(&self) -> bool {
        match self {
            TypeRef::Primitive(p) => p.is_value_type(),
            TypeRef::Named { kind, .. } => {
                matches!(kind, NamedTypeKind::Struct | NamedTypeKind::Enum)
            }
            TypeRef::Nullable(_) => true,
            TypeRef::Array(_) => false,
        }
    }

    /// Whether `null` is a legal value of this type
    pub fn admits_null(&self) -> bool {
        !self.is_value_type() || self.is_nullable_value_type()
    }

    /// `T` for `T?`, the type itself otherwise
    pub fn underlying(&self) -> &TypeRef {
        match self {
            TypeRef::Nullable(inner) => inner,
            other => other,
        }
    }

    /// Types that have built-in `++`/`--` operators
    pub fn supports_increment(&self) -> bool {
        match self.underlying() {
            TypeRef::Primitive(p) => p.is_numeric() || *p == PrimitiveType::Char,
            other => other.is_enum(),
        }
    }

    /// Implicit conversion `self -> target` restricted to identity, numeric
    /// widening, nullable lifting and reference types to `object`
    pub fn converts_to(&self, target: &TypeRef) -> bool {
        if self == target {
            return true;
        }
        match (self, target) {
            (TypeRef::Primitive(from), TypeRef::Primitive(to)) => from.widens_to(*to),
            (_, TypeRef::Primitive(PrimitiveType::Object)) => true,
            (TypeRef::Nullable(from), TypeRef::Nullable(to)) => from.converts_to(to),
            (from, TypeRef::Nullable(to)) => from.converts_to(to),
            _ => false,
        }
    }

    pub fn to_syntax(&self) -> TypeSyntax {
        match self {
            TypeRef::Primitive(p) => TypeSyntax::Predefined(*p),
            TypeRef::Named { name, .. } => TypeSyntax::Name(name.clone()),
            TypeRef::Nullable(inner) => TypeSyntax::Nullable(Box::new(inner.to_syntax())),
            TypeRef::Array(element) => TypeSyntax::Array(Box::new(element.to_syntax())),
        }
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeRef::Primitive(p) => f.write_str(p.keyword()),
            TypeRef::Named { name, .. } => f.write_str(name),
            TypeRef::Nullable(inner) => write!(f, "{}?", inner),
            TypeRef::Array(element) => write!(f, "{}[]", element),
        }
    }
}

/// Parameter passing mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RefKind {
    #[default]
    None,
    Ref,
    Out,
    In,
}

impl RefKind {
    pub fn keyword(self) -> Option<&'static str> {
        match self {
            RefKind::None => None,
            RefKind::Ref => Some("ref"),
            RefKind::Out => Some("out"),
            RefKind::In => Some("in"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocalSymbol {
    pub name: String,
    pub ty: TypeRef,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParameterSymbol {
    pub name: String,
    pub ty: TypeRef,
    #[serde(default)]
    pub ref_kind: RefKind,
    /// Position in the declaring method's parameter list
    #[serde(default)]
    pub ordinal: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldSymbol {
    pub name: String,
    pub ty: TypeRef,
    pub containing_type: TypeRef,
    #[serde(default)]
    pub is_static: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertySymbol {
    pub name: String,
    pub ty: TypeRef,
    pub containing_type: TypeRef,
    #[serde(default)]
    pub is_static: bool,
    #[serde(default = "default_true")]
    pub has_getter: bool,
    #[serde(default = "default_true")]
    pub has_setter: bool,
    #[serde(default)]
    pub returns_by_ref: bool,
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MethodSymbol {
    pub name: String,
    pub containing_type: TypeRef,
    #[serde(default)]
    pub parameters: Vec<ParameterSymbol>,
    /// `None` for `void` methods and constructors
    #[serde(default)]
    pub return_type: Option<TypeRef>,
    #[serde(default)]
    pub is_static: bool,
    #[serde(default)]
    pub is_constructor: bool,
}

/// A symbol the semantic model can bind syntax to
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "symbol", rename_all = "camelCase")]
pub enum Symbol {
    Local(LocalSymbol),
    Parameter(ParameterSymbol),
    Field(FieldSymbol),
    Property(PropertySymbol),
    Method(MethodSymbol),
}

impl Symbol {
    pub fn name(&self) -> &str {
        match self {
            Symbol::Local(s) => &s.name,
            Symbol::Parameter(s) => &s.name,
            Symbol::Field(s) => &s.name,
            Symbol::Property(s) => &s.name,
            Symbol::Method(s) => &s.name,
        }
    }

    /// Type of the value produced by referencing the symbol
    pub fn ty(&self) -> Option<&TypeRef> {
        match self {
            Symbol::Local(s) => Some(&s.ty),
            Symbol::Parameter(s) => Some(&s.ty),
            Symbol::Field(s) => Some(&s.ty),
            Symbol::Property(s) => Some(&s.ty),
            Symbol::Method(s) => s.return_type.as_ref(),
        }
    }

    pub fn is_static(&self) -> bool {
        match self {
            Symbol::Local(_) | Symbol::Parameter(_) => false,
            Symbol::Field(s) => s.is_static,
            Symbol::Property(s) => s.is_static,
            Symbol::Method(s) => s.is_static,
        }
    }
}
