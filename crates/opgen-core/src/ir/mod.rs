//! Operation IR
//!
//! A typed, immutable tree describing program behavior one level above
//! concrete syntax. Every child is boxed and owned by exactly one parent.
//! The generator consumes trees by value.

mod kind;

pub use kind::OperationKind;

use crate::symbols::{
    FieldSymbol, LocalSymbol, MethodSymbol, ParameterSymbol, PrimitiveType, PropertySymbol,
    TypeRef,
};
use crate::syntax::{BinaryOp, Literal, PrefixOp};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Operation {
    pub data: OperationData,
    /// Compiler-synthesized, with no user-visible syntax
    #[serde(default)]
    pub is_implicit: bool,
    #[serde(default)]
    pub ty: Option<TypeRef>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum OperationData {
    Literal(ConstantValue),
    LocalReference(LocalSymbol),
    ParameterReference(ParameterSymbol),
    InstanceReference,
    FieldReference(FieldReference),
    Conditional(Conditional),
    Block(BlockOperation),
    Return(ReturnOperation),
    Throw(ThrowOperation),
    NameOf(NameOfOperation),
    ObjectCreation(ObjectCreationOperation),
    Parenthesized(ParenthesizedOperation),
    Argument(ArgumentOperation),
    Labeled(LabeledOperation),
    Empty,

    Invocation(InvocationOperation),
    Binary(BinaryOperation),
    Unary(UnaryOperation),
    SimpleAssignment(AssignmentOperation),
    CompoundAssignment(CompoundAssignmentOperation),
    Increment(IncrementOperation),
    Coalesce(CoalesceOperation),
    Conversion(ConversionOperation),
    PropertyReference(PropertyReference),
    ExpressionStatement(ExpressionStatementOperation),
    /// Kinds without a dedicated payload
    Other(OtherOperation),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ConstantValue {
    Null,
    Boolean(bool),
    Integer(i64),
    Float(f64),
    Char(char),
    String(String),
}

impl ConstantValue {
    pub fn to_literal(&self) -> Literal {
        match self {
            ConstantValue::Null => Literal::Null,
            ConstantValue::Boolean(b) => Literal::Boolean(*b),
            ConstantValue::Integer(n) => Literal::Integer(*n),
            ConstantValue::Float(n) => Literal::Float(*n),
            ConstantValue::Char(c) => Literal::Char(*c),
            ConstantValue::String(s) => Literal::String(s.clone()),
        }
    }

    /// Natural type of the constant, `None` for `null`
    pub fn natural_type(&self) -> Option<TypeRef> {
        let primitive = match self {
            ConstantValue::Null => return None,
            ConstantValue::Boolean(_) => PrimitiveType::Bool,
            ConstantValue::Integer(_) => PrimitiveType::Int,
            ConstantValue::Float(_) => PrimitiveType::Double,
            ConstantValue::Char(_) => PrimitiveType::Char,
            ConstantValue::String(_) => PrimitiveType::String,
        };
        Some(TypeRef::Primitive(primitive))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldReference {
    pub field: FieldSymbol,
    #[serde(default)]
    pub instance: Option<Box<Operation>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Conditional {
    pub condition: Option<Box<Operation>>,
    pub when_true: Option<Box<Operation>>,
    #[serde(default)]
    pub when_false: Option<Box<Operation>>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct BlockOperation {
    pub operations: Vec<Operation>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ReturnKind {
    Return,
    YieldReturn,
    YieldBreak,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReturnOperation {
    pub kind: ReturnKind,
    #[serde(default)]
    pub value: Option<Box<Operation>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThrowOperation {
    /// `None` rethrows the current exception
    #[serde(default)]
    pub exception: Option<Box<Operation>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NameOfOperation {
    pub argument: Box<Operation>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectCreationOperation {
    #[serde(default)]
    pub constructor: Option<MethodSymbol>,
    /// `Argument` operations in evaluation order
    #[serde(default)]
    pub arguments: Vec<Operation>,
    #[serde(default)]
    pub initializer: Option<Box<Operation>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParenthesizedOperation {
    pub operand: Box<Operation>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ArgumentKind {
    /// Written in source
    #[default]
    Explicit,
    /// Elements collected into a `params` array
    ParamArray,
    /// Optional parameter filled with its default value
    DefaultValue,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArgumentOperation {
    pub value: Box<Operation>,
    #[serde(default)]
    pub kind: ArgumentKind,
    #[serde(default)]
    pub parameter: Option<ParameterSymbol>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabeledOperation {
    pub label: String,
    #[serde(default)]
    pub operation: Option<Box<Operation>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvocationOperation {
    pub method: MethodSymbol,
    #[serde(default)]
    pub instance: Option<Box<Operation>>,
    #[serde(default)]
    pub arguments: Vec<Operation>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BinaryOperation {
    pub operator: BinaryOp,
    pub left: Box<Operation>,
    pub right: Box<Operation>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnaryOperation {
    pub operator: PrefixOp,
    pub operand: Box<Operation>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssignmentOperation {
    pub target: Box<Operation>,
    pub value: Box<Operation>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompoundAssignmentOperation {
    pub operator: BinaryOp,
    pub target: Box<Operation>,
    pub value: Box<Operation>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IncrementOperation {
    pub is_decrement: bool,
    pub is_postfix: bool,
    pub target: Box<Operation>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoalesceOperation {
    pub value: Box<Operation>,
    pub when_null: Box<Operation>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversionOperation {
    pub operand: Box<Operation>,
    #[serde(default)]
    pub is_explicit: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyReference {
    pub property: PropertySymbol,
    #[serde(default)]
    pub instance: Option<Box<Operation>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpressionStatementOperation {
    pub operation: Box<Operation>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OtherOperation {
    pub kind: OperationKind,
    #[serde(default)]
    pub children: Vec<Operation>,
}

impl Operation {
    pub fn new(data: OperationData) -> Self {
        Operation {
            data,
            is_implicit: false,
            ty: None,
        }
    }

    /// Mark the operation as compiler-synthesized
    pub fn implicit(mut self) -> Self {
        self.is_implicit = true;
        self
    }

    pub fn with_type(mut self, ty: TypeRef) -> Self {
        self.ty = Some(ty);
        self
    }

    pub fn kind(&self) -> OperationKind {
        match &self.data {
            OperationData::Literal(_) => OperationKind::Literal,
            OperationData::LocalReference(_) => OperationKind::LocalReference,
            OperationData::ParameterReference(_) => OperationKind::ParameterReference,
            OperationData::InstanceReference => OperationKind::InstanceReference,
            OperationData::FieldReference(_) => OperationKind::FieldReference,
            OperationData::Conditional(_) => OperationKind::Conditional,
            OperationData::Block(_) => OperationKind::Block,
            OperationData::Return(ret) => match ret.kind {
                ReturnKind::Return => OperationKind::Return,
                ReturnKind::YieldReturn => OperationKind::YieldReturn,
                ReturnKind::YieldBreak => OperationKind::YieldBreak,
            },
            OperationData::Throw(_) => OperationKind::Throw,
            OperationData::NameOf(_) => OperationKind::NameOf,
            OperationData::ObjectCreation(_) => OperationKind::ObjectCreation,
            OperationData::Parenthesized(_) => OperationKind::Parenthesized,
            OperationData::Argument(_) => OperationKind::Argument,
            OperationData::Labeled(_) => OperationKind::Labeled,
            OperationData::Empty => OperationKind::Empty,
            OperationData::Invocation(_) => OperationKind::Invocation,
            OperationData::Binary(_) => OperationKind::Binary,
            OperationData::Unary(_) => OperationKind::Unary,
            OperationData::SimpleAssignment(_) => OperationKind::SimpleAssignment,
            OperationData::CompoundAssignment(op) if op.operator == BinaryOp::Coalesce => {
                OperationKind::CoalesceAssignment
            }
            OperationData::CompoundAssignment(_) => OperationKind::CompoundAssignment,
            OperationData::Increment(op) if op.is_decrement => OperationKind::Decrement,
            OperationData::Increment(_) => OperationKind::Increment,
            OperationData::Coalesce(_) => OperationKind::Coalesce,
            OperationData::Conversion(_) => OperationKind::Conversion,
            OperationData::PropertyReference(_) => OperationKind::PropertyReference,
            OperationData::ExpressionStatement(_) => OperationKind::ExpressionStatement,
            OperationData::Other(other) => other.kind,
        }
    }

    // =========================================================================
    // Constructors
    // =========================================================================

    pub fn literal(value: ConstantValue) -> Self {
        let ty = value.natural_type();
        Operation {
            data: OperationData::Literal(value),
            is_implicit: false,
            ty,
        }
    }

    pub fn local(name: impl Into<String>, ty: TypeRef) -> Self {
        Operation::new(OperationData::LocalReference(LocalSymbol {
            name: name.into(),
            ty: ty.clone(),
        }))
        .with_type(ty)
    }

    pub fn parameter(parameter: ParameterSymbol) -> Self {
        let ty = parameter.ty.clone();
        Operation::new(OperationData::ParameterReference(parameter)).with_type(ty)
    }

    pub fn instance_reference(ty: TypeRef) -> Self {
        Operation::new(OperationData::InstanceReference).with_type(ty)
    }

    pub fn field_reference(field: FieldSymbol, instance: Option<Operation>) -> Self {
        let ty = field.ty.clone();
        Operation::new(OperationData::FieldReference(FieldReference {
            field,
            instance: instance.map(Box::new),
        }))
        .with_type(ty)
    }

    pub fn conditional(
        condition: Operation,
        when_true: Operation,
        when_false: Option<Operation>,
    ) -> Self {
        Operation::new(OperationData::Conditional(Conditional {
            condition: Some(Box::new(condition)),
            when_true: Some(Box::new(when_true)),
            when_false: when_false.map(Box::new),
        }))
    }

    pub fn block(operations: Vec<Operation>) -> Self {
        Operation::new(OperationData::Block(BlockOperation { operations }))
    }

    pub fn return_value(value: Option<Operation>) -> Self {
        Operation::new(OperationData::Return(ReturnOperation {
            kind: ReturnKind::Return,
            value: value.map(Box::new),
        }))
    }

    pub fn yield_return(value: Option<Operation>) -> Self {
        Operation::new(OperationData::Return(ReturnOperation {
            kind: ReturnKind::YieldReturn,
            value: value.map(Box::new),
        }))
    }

    pub fn yield_break() -> Self {
        Operation::new(OperationData::Return(ReturnOperation {
            kind: ReturnKind::YieldBreak,
            value: None,
        }))
    }

    pub fn throw(exception: Option<Operation>) -> Self {
        Operation::new(OperationData::Throw(ThrowOperation {
            exception: exception.map(Box::new),
        }))
    }

    pub fn name_of(argument: Operation) -> Self {
        Operation::new(OperationData::NameOf(NameOfOperation {
            argument: Box::new(argument),
        }))
        .with_type(TypeRef::string())
    }

    pub fn object_creation(
        constructor: Option<MethodSymbol>,
        arguments: Vec<Operation>,
        initializer: Option<Operation>,
    ) -> Self {
        Operation::new(OperationData::ObjectCreation(ObjectCreationOperation {
            constructor,
            arguments,
            initializer: initializer.map(Box::new),
        }))
    }

    pub fn parenthesized(operand: Operation) -> Self {
        let ty = operand.ty.clone();
        Operation {
            data: OperationData::Parenthesized(ParenthesizedOperation {
                operand: Box::new(operand),
            }),
            is_implicit: false,
            ty,
        }
    }

    pub fn argument(
        value: Operation,
        kind: ArgumentKind,
        parameter: Option<ParameterSymbol>,
    ) -> Self {
        Operation::new(OperationData::Argument(ArgumentOperation {
            value: Box::new(value),
            kind,
            parameter,
        }))
    }

    pub fn labeled(label: impl Into<String>, operation: Option<Operation>) -> Self {
        Operation::new(OperationData::Labeled(LabeledOperation {
            label: label.into(),
            operation: operation.map(Box::new),
        }))
    }

    pub fn empty() -> Self {
        Operation::new(OperationData::Empty)
    }

    pub fn binary(operator: BinaryOp, left: Operation, right: Operation) -> Self {
        Operation::new(OperationData::Binary(BinaryOperation {
            operator,
            left: Box::new(left),
            right: Box::new(right),
        }))
    }

    pub fn invocation(
        method: MethodSymbol,
        instance: Option<Operation>,
        arguments: Vec<Operation>,
    ) -> Self {
        let ty = method.return_type.clone();
        Operation {
            data: OperationData::Invocation(InvocationOperation {
                method,
                instance: instance.map(Box::new),
                arguments,
            }),
            is_implicit: false,
            ty,
        }
    }

    pub fn expression_statement(operation: Operation) -> Self {
        Operation::new(OperationData::ExpressionStatement(
            ExpressionStatementOperation {
                operation: Box::new(operation),
            },
        ))
    }

    pub fn other(kind: OperationKind, children: Vec<Operation>) -> Self {
        Operation::new(OperationData::Other(OtherOperation { kind, children }))
    }
}
