//! In-memory declaration model
//!
//! Describes one method body's scope: its locals and parameters, the type
//! whose members are visible unqualified, and the member declarations of
//! every type it references. Typing follows the target language's rules
//! closely enough for the analyzer's questions (numeric promotion, nullable
//! lifting, `??` and `??=` result types, overload resolution by better
//! conversion) and answers `None` for anything else.

use super::SemanticModel;
use crate::analyzer::AssignmentContext;
use crate::symbols::{
    FieldSymbol, LocalSymbol, MethodSymbol, NamedTypeKind, ParameterSymbol, PrimitiveType, PropertySymbol,
    RefKind, Symbol, TypeRef,
};
use crate::syntax::{
    walk_down_parentheses, Argument, AssignmentOp, BinaryOp, Expr, ExprKind, Literal, PrefixOp,
    TypeSyntax,
};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeclarationModel {
    /// Type whose members are in scope without qualification
    #[serde(default)]
    pub this_type: Option<String>,

    #[serde(default)]
    pub types: IndexMap<String, TypeDeclaration>,

    #[serde(default)]
    pub locals: IndexMap<String, TypeRef>,

    /// In declaration order
    #[serde(default)]
    pub parameters: Vec<ParameterDeclaration>,

    /// Declared return type of the member whose body is analyzed
    #[serde(default)]
    pub return_type: Option<TypeRef>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeDeclaration {
    #[serde(default = "default_kind")]
    pub kind: NamedTypeKind,
    #[serde(default)]
    pub fields: Vec<VariableDeclaration>,
    #[serde(default)]
    pub properties: Vec<PropertyDeclaration>,
    #[serde(default)]
    pub methods: Vec<MethodDeclaration>,
}

fn default_kind() -> NamedTypeKind {
    NamedTypeKind::Class
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VariableDeclaration {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: TypeRef,
    #[serde(default)]
    pub is_static: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyDeclaration {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: TypeRef,
    #[serde(default)]
    pub is_static: bool,
    #[serde(default = "default_true")]
    pub has_getter: bool,
    #[serde(default = "default_true")]
    pub has_setter: bool,
    #[serde(default)]
    pub returns_by_ref: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParameterDeclaration {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: TypeRef,
    #[serde(default)]
    pub ref_kind: RefKind,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MethodDeclaration {
    pub name: String,
    #[serde(default)]
    pub parameters: Vec<ParameterDeclaration>,
    /// `None` for `void`
    #[serde(default)]
    pub return_type: Option<TypeRef>,
    #[serde(default)]
    pub is_static: bool,
}

// =============================================================================
// Builders
// =============================================================================

impl TypeDeclaration {
    pub fn new(kind: NamedTypeKind) -> Self {
        Self {
            kind,
            fields: Vec::new(),
            properties: Vec::new(),
            methods: Vec::new(),
        }
    }

    pub fn class() -> Self {
        Self::new(NamedTypeKind::Class)
    }

    pub fn with_field(mut self, field: VariableDeclaration) -> Self {
        self.fields.push(field);
        self
    }

    pub fn with_property(mut self, property: PropertyDeclaration) -> Self {
        self.properties.push(property);
        self
    }

    pub fn with_method(mut self, method: MethodDeclaration) -> Self {
        self.methods.push(method);
        self
    }
}

impl VariableDeclaration {
    pub fn new(name: impl Into<String>, ty: TypeRef) -> Self {
        Self {
            name: name.into(),
            ty,
            is_static: false,
        }
    }

    pub fn as_static(mut self) -> Self {
        self.is_static = true;
        self
    }
}

impl PropertyDeclaration {
    pub fn new(name: impl Into<String>, ty: TypeRef) -> Self {
        Self {
            name: name.into(),
            ty,
            is_static: false,
            has_getter: true,
            has_setter: true,
            returns_by_ref: false,
        }
    }

    pub fn as_static(mut self) -> Self {
        self.is_static = true;
        self
    }

    /// `ref T Name { get; }`
    pub fn by_ref(mut self) -> Self {
        self.returns_by_ref = true;
        self.has_setter = false;
        self
    }
}

impl ParameterDeclaration {
    pub fn new(name: impl Into<String>, ty: TypeRef) -> Self {
        Self {
            name: name.into(),
            ty,
            ref_kind: RefKind::None,
        }
    }
}

impl MethodDeclaration {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            parameters: Vec::new(),
            return_type: None,
            is_static: false,
        }
    }

    pub fn with_parameter(mut self, name: impl Into<String>, ty: TypeRef) -> Self {
        self.parameters.push(ParameterDeclaration::new(name, ty));
        self
    }

    pub fn returning(mut self, ty: TypeRef) -> Self {
        self.return_type = Some(ty);
        self
    }

    pub fn as_static(mut self) -> Self {
        self.is_static = true;
        self
    }

    fn to_symbol(&self, containing_type: TypeRef) -> MethodSymbol {
        MethodSymbol {
            name: self.name.clone(),
            containing_type,
            parameters: self
                .parameters
                .iter()
                .enumerate()
                .map(|(ordinal, p)| ParameterSymbol {
                    name: p.name.clone(),
                    ty: p.ty.clone(),
                    ref_kind: p.ref_kind,
                    ordinal,
                })
                .collect(),
            return_type: self.return_type.clone(),
            is_static: self.is_static,
            is_constructor: false,
        }
    }
}

impl DeclarationModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// A scope inside a member of `name`
    pub fn for_type(name: impl Into<String>, declaration: TypeDeclaration) -> Self {
        let name = name.into();
        let mut model = Self::default();
        model.types.insert(name.clone(), declaration);
        model.this_type = Some(name);
        model
    }

    pub fn add_type(&mut self, name: impl Into<String>, declaration: TypeDeclaration) {
        self.types.insert(name.into(), declaration);
    }

    pub fn add_local(&mut self, name: impl Into<String>, ty: TypeRef) {
        self.locals.insert(name.into(), ty);
    }

    pub fn add_parameter(&mut self, name: impl Into<String>, ty: TypeRef) {
        self.parameters.push(ParameterDeclaration::new(name, ty));
    }

    pub fn set_return_type(&mut self, ty: TypeRef) {
        self.return_type = Some(ty);
    }

    // =========================================================================
    // Name lookup
    // =========================================================================

    fn named_type(&self, name: &str) -> TypeRef {
        let kind = self
            .types
            .get(name)
            .map_or(NamedTypeKind::Class, |declaration| declaration.kind);
        TypeRef::Named {
            name: name.to_string(),
            kind,
        }
    }

    fn lookup_unqualified(&self, name: &str) -> Option<Symbol> {
        if let Some(ty) = self.locals.get(name) {
            return Some(Symbol::Local(LocalSymbol {
                name: name.to_string(),
                ty: ty.clone(),
            }));
        }
        if let Some((ordinal, parameter)) = self
            .parameters
            .iter()
            .enumerate()
            .find(|(_, p)| p.name == name)
        {
            return Some(Symbol::Parameter(ParameterSymbol {
                name: parameter.name.clone(),
                ty: parameter.ty.clone(),
                ref_kind: parameter.ref_kind,
                ordinal,
            }));
        }
        let this_type = self.this_type.as_deref()?;
        self.member(this_type, name, None)
    }

    /// `name` as a type qualifier, unless something in scope shadows it
    fn as_type_name<'e>(&self, expr: &'e Expr) -> Option<&'e str> {
        match &walk_down_parentheses(expr).kind {
            ExprKind::Identifier(name)
                if self.types.contains_key(name) && self.lookup_unqualified(name).is_none() =>
            {
                Some(name)
            }
            _ => None,
        }
    }

    /// Field, property or (first) method named `name` on `type_name`;
    /// `want_static` filters by static-ness when given
    fn member(&self, type_name: &str, name: &str, want_static: Option<bool>) -> Option<Symbol> {
        let declaration = self.types.get(type_name)?;
        let matches_static = |is_static: bool| want_static.map_or(true, |want| want == is_static);
        let containing_type = self.named_type(type_name);

        if let Some(field) = declaration
            .fields
            .iter()
            .find(|f| f.name == name && matches_static(f.is_static))
        {
            return Some(Symbol::Field(FieldSymbol {
                name: field.name.clone(),
                ty: field.ty.clone(),
                containing_type,
                is_static: field.is_static,
            }));
        }
        if let Some(property) = declaration
            .properties
            .iter()
            .find(|p| p.name == name && matches_static(p.is_static))
        {
            return Some(Symbol::Property(PropertySymbol {
                name: property.name.clone(),
                ty: property.ty.clone(),
                containing_type,
                is_static: property.is_static,
                has_getter: property.has_getter,
                has_setter: property.has_setter,
                returns_by_ref: property.returns_by_ref,
            }));
        }
        declaration
            .methods
            .iter()
            .find(|m| m.name == name && matches_static(m.is_static))
            .map(|method| Symbol::Method(method.to_symbol(containing_type)))
    }

    /// Candidate methods a callee expression names
    fn method_group(&self, callee: &Expr) -> Option<(TypeRef, Vec<&MethodDeclaration>)> {
        let (type_name, name, want_static) = match &walk_down_parentheses(callee).kind {
            ExprKind::Identifier(name) => (self.this_type.clone()?, name, None),
            ExprKind::MemberAccess(receiver, name) => {
                if let Some(type_name) = self.as_type_name(receiver) {
                    (type_name.to_string(), name, Some(true))
                } else {
                    match self.type_of(receiver)? {
                        TypeRef::Named { name: type_name, .. } => (type_name, name, Some(false)),
                        _ => return None,
                    }
                }
            }
            _ => return None,
        };

        let declaration = self.types.get(&type_name)?;
        let group: Vec<&MethodDeclaration> = declaration
            .methods
            .iter()
            .filter(|m| &m.name == name && want_static.map_or(true, |s| s == m.is_static))
            .collect();
        if group.is_empty() {
            return None;
        }
        Some((self.named_type(&type_name), group))
    }

    fn argument_types(&self, arguments: &[Argument]) -> Vec<Option<TypeRef>> {
        arguments.iter().map(|a| self.type_of(&a.value)).collect()
    }

    fn resolve_invocation(&self, callee: &Expr, arguments: &[Argument]) -> Option<MethodSymbol> {
        let (containing_type, group) = self.method_group(callee)?;
        match resolve_overload(&group, &self.argument_types(arguments)) {
            Resolution::Unique(index) => Some(group[index].to_symbol(containing_type)),
            Resolution::Ambiguous | Resolution::Inapplicable => None,
        }
    }

    pub fn resolve_type_syntax(&self, ty: &TypeSyntax) -> TypeRef {
        match ty {
            TypeSyntax::Predefined(p) => TypeRef::Primitive(*p),
            TypeSyntax::Name(name) | TypeSyntax::Qualified(_, name) => self.named_type(name),
            TypeSyntax::Nullable(inner) => TypeRef::nullable(self.resolve_type_syntax(inner)),
            TypeSyntax::Array(element) => {
                TypeRef::Array(Box::new(self.resolve_type_syntax(element)))
            }
        }
    }

    // =========================================================================
    // Expression typing
    // =========================================================================

    fn binary_type(&self, op: BinaryOp, left: &Expr, right: &Expr) -> Option<TypeRef> {
        if op.is_comparison() || matches!(op, BinaryOp::LogicalAnd | BinaryOp::LogicalOr) {
            return Some(TypeRef::bool());
        }

        let left_type = self.type_of(left)?;
        let right_type = self.type_of(right);

        if op == BinaryOp::Coalesce {
            return coalesce_type(left_type, right_type);
        }

        let right_type = right_type?;
        if op == BinaryOp::Add
            && (left_type == TypeRef::string() || right_type == TypeRef::string())
        {
            return Some(TypeRef::string());
        }

        let lifted = left_type.is_nullable_value_type() || right_type.is_nullable_value_type();
        let result = match op {
            BinaryOp::ShiftLeft | BinaryOp::ShiftRight | BinaryOp::UnsignedShiftRight => {
                unary_promotion(left_type.underlying())
            }
            _ => arithmetic_type(op, left_type.underlying(), right_type.underlying())?,
        };
        Some(if lifted {
            TypeRef::nullable(result)
        } else {
            result
        })
    }
}

fn literal_type(literal: &Literal) -> Option<TypeRef> {
    let primitive = match literal {
        Literal::Null => return None,
        Literal::Boolean(_) => PrimitiveType::Bool,
        Literal::Integer(_) => PrimitiveType::Int,
        Literal::Float(_) => PrimitiveType::Double,
        Literal::Char(_) => PrimitiveType::Char,
        Literal::String(_) => PrimitiveType::String,
    };
    Some(TypeRef::Primitive(primitive))
}

/// `byte`, `short`, `char`, ... promote to `int` before arithmetic
fn unary_promotion(ty: &TypeRef) -> TypeRef {
    match ty.as_primitive() {
        Some(
            PrimitiveType::SByte
            | PrimitiveType::Byte
            | PrimitiveType::Short
            | PrimitiveType::UShort
            | PrimitiveType::Char,
        ) => TypeRef::int(),
        _ => ty.clone(),
    }
}

fn arithmetic_type(op: BinaryOp, left: &TypeRef, right: &TypeRef) -> Option<TypeRef> {
    let is_integral = |ty: &TypeRef| ty.as_primitive().is_some_and(PrimitiveType::is_integral);
    let is_bitwise = matches!(
        op,
        BinaryOp::BitwiseAnd | BinaryOp::BitwiseOr | BinaryOp::BitwiseXor
    );

    if left.is_enum() || right.is_enum() {
        return match op {
            BinaryOp::Add | BinaryOp::Subtract if left.is_enum() && is_integral(right) => {
                Some(left.clone())
            }
            BinaryOp::Add if right.is_enum() && is_integral(left) => Some(right.clone()),
            BinaryOp::Subtract if left == right => Some(TypeRef::int()),
            _ if is_bitwise && left == right => Some(left.clone()),
            _ => None,
        };
    }

    if is_bitwise && *left == TypeRef::bool() && *right == TypeRef::bool() {
        return Some(TypeRef::bool());
    }

    let (Some(l), Some(r)) = (left.as_primitive(), right.as_primitive()) else {
        return None;
    };
    let arithmetic = |p: PrimitiveType| p.is_numeric() || p == PrimitiveType::Char;
    if !arithmetic(l) || !arithmetic(r) {
        return None;
    }
    let wider = if l.widens_to(r) {
        r
    } else if r.widens_to(l) {
        l
    } else {
        return None;
    };
    Some(unary_promotion(&TypeRef::Primitive(wider)))
}

/// Type of `left ?? right`; a missing right type is the `null` literal
fn coalesce_type(left: TypeRef, right: Option<TypeRef>) -> Option<TypeRef> {
    match (&left, right) {
        (TypeRef::Nullable(inner), Some(right)) if right.converts_to(inner) => {
            Some((**inner).clone())
        }
        (_, Some(right)) if right.converts_to(&left) => Some(left),
        (_, None) => Some(left),
        _ => None,
    }
}

/// Type of `target ??= value`: the underlying type when the target is a
/// nullable value type and the value converts to it
fn coalesce_assignment_type(target: TypeRef, value: Option<TypeRef>) -> TypeRef {
    match (&target, value) {
        (TypeRef::Nullable(inner), Some(value)) if value.converts_to(inner) => (**inner).clone(),
        _ => target,
    }
}

// =============================================================================
// Overload resolution
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Resolution {
    Unique(usize),
    Ambiguous,
    Inapplicable,
}

fn argument_converts(argument: Option<&TypeRef>, parameter: &TypeRef) -> bool {
    match argument {
        Some(ty) => ty.converts_to(parameter),
        // `null`
        None => parameter.admits_null(),
    }
}

/// Better conversion from `argument` to `first` than to `second`
fn compare_conversions(argument: Option<&TypeRef>, first: &TypeRef, second: &TypeRef) -> Ordering {
    if first == second {
        return Ordering::Equal;
    }
    if let Some(argument) = argument {
        if argument == first {
            return Ordering::Greater;
        }
        if argument == second {
            return Ordering::Less;
        }
    }
    match (first.converts_to(second), second.converts_to(first)) {
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        _ => Ordering::Equal,
    }
}

fn is_better(
    first: &MethodDeclaration,
    second: &MethodDeclaration,
    arguments: &[Option<TypeRef>],
) -> bool {
    let mut better_somewhere = false;
    for ((p1, p2), argument) in first
        .parameters
        .iter()
        .zip(&second.parameters)
        .zip(arguments)
    {
        match compare_conversions(argument.as_ref(), &p1.ty, &p2.ty) {
            Ordering::Greater => better_somewhere = true,
            Ordering::Less => return false,
            Ordering::Equal => {}
        }
    }
    better_somewhere
}

fn resolve_overload(candidates: &[&MethodDeclaration], arguments: &[Option<TypeRef>]) -> Resolution {
    let applicable: Vec<usize> = candidates
        .iter()
        .enumerate()
        .filter(|(_, method)| {
            method.parameters.len() == arguments.len()
                && method
                    .parameters
                    .iter()
                    .zip(arguments)
                    .all(|(p, a)| argument_converts(a.as_ref(), &p.ty))
        })
        .map(|(index, _)| index)
        .collect();

    let best: Vec<usize> = applicable
        .iter()
        .copied()
        .filter(|&i| {
            applicable
                .iter()
                .all(|&j| i == j || is_better(candidates[i], candidates[j], arguments))
        })
        .collect();

    match (applicable.len(), best.as_slice()) {
        (0, _) => Resolution::Inapplicable,
        (_, [only]) => Resolution::Unique(*only),
        _ => Resolution::Ambiguous,
    }
}

impl SemanticModel for DeclarationModel {
    fn symbol_info(&self, expr: &Expr) -> Option<Symbol> {
        match &expr.kind {
            ExprKind::Parenthesized(inner) => self.symbol_info(inner),
            ExprKind::Identifier(name) => self.lookup_unqualified(name),
            ExprKind::MemberAccess(receiver, name) => {
                if let Some(type_name) = self.as_type_name(receiver) {
                    return self.member(type_name, name, Some(true));
                }
                match &walk_down_parentheses(receiver).kind {
                    ExprKind::This => {
                        let this_type = self.this_type.as_deref()?;
                        self.member(this_type, name, Some(false))
                    }
                    _ => match self.type_of(receiver)? {
                        TypeRef::Named {
                            name: type_name, ..
                        } => self.member(&type_name, name, Some(false)),
                        _ => None,
                    },
                }
            }
            ExprKind::Invocation(callee, arguments) => self
                .resolve_invocation(callee, arguments)
                .map(Symbol::Method),
            _ => None,
        }
    }

    fn type_of(&self, expr: &Expr) -> Option<TypeRef> {
        match &expr.kind {
            ExprKind::Literal(literal) => literal_type(literal),
            ExprKind::Identifier(_) | ExprKind::MemberAccess(..) => match self.symbol_info(expr)? {
                Symbol::Method(_) => None,
                symbol => symbol.ty().cloned(),
            },
            ExprKind::This => self.this_type.as_deref().map(|name| self.named_type(name)),
            ExprKind::ElementAccess(receiver, _) => match self.type_of(receiver)? {
                TypeRef::Array(element) => Some(*element),
                _ => None,
            },
            ExprKind::Invocation(callee, arguments) => {
                self.resolve_invocation(callee, arguments)?.return_type
            }
            ExprKind::Parenthesized(inner) => self.type_of(inner),
            ExprKind::Conditional(_, when_true, when_false) => {
                self.type_of(when_true).or_else(|| self.type_of(when_false))
            }
            ExprKind::Binary(op, left, right) => self.binary_type(*op, left, right),
            ExprKind::Prefix(op, operand) => match op {
                PrefixOp::LogicalNot => Some(TypeRef::bool()),
                PrefixOp::Increment | PrefixOp::Decrement => self.type_of(operand),
                PrefixOp::Plus | PrefixOp::Negate | PrefixOp::BitwiseNot => {
                    let ty = self.type_of(operand)?;
                    if ty.is_enum() {
                        Some(ty)
                    } else {
                        Some(unary_promotion(&ty))
                    }
                }
            },
            ExprKind::Postfix(_, operand) => self.type_of(operand),
            ExprKind::Assignment(target, op, value) => {
                let target_type = self.type_of(target)?;
                if *op == AssignmentOp::CoalesceAssign {
                    Some(coalesce_assignment_type(target_type, self.type_of(value)))
                } else {
                    Some(target_type)
                }
            }
            ExprKind::Cast(ty, _) => Some(self.resolve_type_syntax(ty)),
            ExprKind::Is(..) => Some(TypeRef::bool()),
            ExprKind::Throw(_) => None,
            ExprKind::ObjectCreation(creation) => Some(self.resolve_type_syntax(&creation.ty)),
        }
    }

    fn changes_binding(
        &self,
        context: &AssignmentContext<'_>,
        original: &TypeRef,
        rewritten: &TypeRef,
    ) -> bool {
        if original == rewritten {
            return false;
        }
        match context {
            AssignmentContext::ExpressionStatement | AssignmentContext::ForIncrementor => false,
            AssignmentContext::Argument { invocation, index } => {
                let ExprKind::Invocation(callee, arguments) = &invocation.kind else {
                    return true;
                };
                let Some((_, group)) = self.method_group(callee) else {
                    return true;
                };
                let mut argument_types = self.argument_types(arguments);
                if *index >= argument_types.len() {
                    return true;
                }

                argument_types[*index] = Some(original.clone());
                let before = resolve_overload(&group, &argument_types);
                argument_types[*index] = Some(rewritten.clone());
                let after = resolve_overload(&group, &argument_types);

                !matches!((before, after), (Resolution::Unique(a), Resolution::Unique(b)) if a == b)
            }
            // The slot converts both forms to its own type
            AssignmentContext::AssignedTo(target) => {
                self.type_of(target).as_ref() != Some(original)
            }
            AssignmentContext::Return => self.return_type.as_ref() != Some(original),
            AssignmentContext::Other => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::factory::*;

    fn int_nullable() -> TypeRef {
        TypeRef::nullable(TypeRef::int())
    }

    fn model() -> DeclarationModel {
        let mut model = DeclarationModel::for_type(
            "C",
            TypeDeclaration::class()
                .with_field(VariableDeclaration::new("count", TypeRef::int()))
                .with_method(
                    MethodDeclaration::new("M2")
                        .with_parameter("x", int_nullable()),
                )
                .with_method(MethodDeclaration::new("M2").with_parameter("x", TypeRef::int()))
                .with_method(MethodDeclaration::new("M3").with_parameter("x", int_nullable()))
                .with_method(
                    MethodDeclaration::new("Create")
                        .returning(TypeRef::class("C"))
                        .as_static(),
                ),
        );
        model.add_local("a", int_nullable());
        model.add_local("b", TypeRef::Primitive(PrimitiveType::Byte));
        model.add_local("e", TypeRef::enumeration("Color"));
        model.add_parameter("d", TypeRef::Primitive(PrimitiveType::Double));
        model.add_type(
            "Color",
            TypeDeclaration::new(NamedTypeKind::Enum),
        );
        model
    }

    #[test]
    fn test_unqualified_lookup_order() {
        let model = model();
        assert!(matches!(model.symbol_info(&identifier("a")), Some(Symbol::Local(_))));
        match model.symbol_info(&identifier("d")) {
            Some(Symbol::Parameter(p)) => assert_eq!(p.ordinal, 0),
            other => panic!("expected parameter, got {:?}", other),
        }
        assert!(matches!(
            model.symbol_info(&identifier("count")),
            Some(Symbol::Field(_))
        ));
        assert_eq!(model.symbol_info(&identifier("missing")), None);
    }

    #[test]
    fn test_numeric_promotion() {
        let model = model();
        let ty = |e: Expr| model.type_of(&e);
        assert_eq!(
            ty(binary(BinaryOp::Add, identifier("b"), integer(1))),
            Some(TypeRef::int())
        );
        assert_eq!(
            ty(binary(BinaryOp::Multiply, identifier("d"), integer(2))),
            Some(TypeRef::Primitive(PrimitiveType::Double))
        );
        assert_eq!(
            ty(binary(BinaryOp::Add, identifier("a"), integer(1))),
            Some(int_nullable())
        );
        assert_eq!(
            ty(binary(BinaryOp::Add, identifier("e"), integer(1))),
            Some(TypeRef::enumeration("Color"))
        );
    }

    #[test]
    fn test_coalesce_types() {
        let model = model();
        let coalesce_int = binary(BinaryOp::Coalesce, identifier("a"), integer(1));
        assert_eq!(model.type_of(&coalesce_int), Some(TypeRef::int()));

        let coalesce_assignment = binary(
            BinaryOp::Coalesce,
            identifier("a"),
            parenthesized(simple_assignment(identifier("a"), integer(1))),
        );
        assert_eq!(model.type_of(&coalesce_assignment), Some(int_nullable()));

        let compound = assignment(identifier("a"), AssignmentOp::CoalesceAssign, integer(1));
        assert_eq!(model.type_of(&compound), Some(TypeRef::int()));
    }

    #[test]
    fn test_overload_resolution_prefers_exact_match() {
        let model = model();
        let call = |arg: Expr| invocation(identifier("M2"), vec![Argument::positional(arg)]);

        match model.symbol_info(&call(identifier("a"))) {
            Some(Symbol::Method(m)) => assert_eq!(m.parameters[0].ty, int_nullable()),
            other => panic!("expected method, got {:?}", other),
        }
        match model.symbol_info(&call(integer(1))) {
            Some(Symbol::Method(m)) => assert_eq!(m.parameters[0].ty, TypeRef::int()),
            other => panic!("expected method, got {:?}", other),
        }
    }

    #[test]
    fn test_changes_binding_follows_overloads() {
        let model = model();
        let overloaded = invocation(
            identifier("M2"),
            vec![Argument::positional(identifier("a"))],
        );
        let single = invocation(
            identifier("M3"),
            vec![Argument::positional(identifier("a"))],
        );

        let context = AssignmentContext::Argument {
            invocation: &overloaded,
            index: 0,
        };
        assert!(model.changes_binding(&context, &int_nullable(), &TypeRef::int()));

        let context = AssignmentContext::Argument {
            invocation: &single,
            index: 0,
        };
        assert!(!model.changes_binding(&context, &int_nullable(), &TypeRef::int()));

        assert!(!model.changes_binding(
            &AssignmentContext::ExpressionStatement,
            &int_nullable(),
            &TypeRef::int()
        ));
    }

    #[test]
    fn test_changes_binding_for_assigned_and_returned_values() {
        let mut model = model();
        let nullable_target = identifier("a");
        let int_target = identifier("count");

        let context = AssignmentContext::AssignedTo(&nullable_target);
        assert!(!model.changes_binding(&context, &int_nullable(), &TypeRef::int()));
        let context = AssignmentContext::AssignedTo(&int_target);
        assert!(model.changes_binding(&context, &int_nullable(), &TypeRef::int()));

        // Unknown return type
        assert!(model.changes_binding(&AssignmentContext::Return, &int_nullable(), &TypeRef::int()));
        model.set_return_type(int_nullable());
        assert!(!model.changes_binding(&AssignmentContext::Return, &int_nullable(), &TypeRef::int()));
    }

    #[test]
    fn test_static_member_through_type_name() {
        let model = model();
        let call = invocation(member_access(identifier("C"), "Create"), vec![]);
        assert_eq!(model.type_of(&call), Some(TypeRef::class("C")));
        assert_eq!(
            model.type_of(&member_access(call, "count")),
            Some(TypeRef::int())
        );
    }

    #[test]
    fn test_deserialize_model() {
        let json = r#"{
            "thisType": "C",
            "types": {
                "C": {
                    "fields": [{ "name": "i", "type": { "primitive": "int" } }]
                }
            },
            "locals": { "s": { "primitive": "string" } },
            "returnType": { "primitive": "int" }
        }"#;
        let model: DeclarationModel = serde_json::from_str(json).unwrap();
        assert_eq!(model.return_type, Some(TypeRef::int()));
        assert_eq!(model.type_of(&identifier("i")), Some(TypeRef::int()));
        assert_eq!(model.type_of(&identifier("s")), Some(TypeRef::string()));
    }
}
