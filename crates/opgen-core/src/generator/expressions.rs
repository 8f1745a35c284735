//! Expression-only handlers and argument lists

use super::wrap::wrap_with_argument;
use super::{SyntaxGenerator, SyntaxRole};
use crate::errors::{ContractViolation, GenerateError, GenerateResult, Unimplemented};
use crate::ir::{
    ArgumentKind, ArgumentOperation, ConstantValue, FieldReference, NameOfOperation,
    ObjectCreationOperation, Operation, OperationData, OperationKind, ParenthesizedOperation,
};
use crate::symbols::{RefKind, TypeRef};
use crate::syntax::{factory, Argument, SyntaxNode};

impl SyntaxGenerator {
    pub(super) fn generate_literal(
        &self,
        value: ConstantValue,
        is_implicit: bool,
        role: SyntaxRole,
    ) -> GenerateResult<Option<SyntaxNode>> {
        if is_implicit {
            return Ok(None);
        }
        self.check_not_statement(OperationKind::Literal, role)?;
        Ok(Some(SyntaxNode::Expression(factory::literal(
            value.to_literal(),
        ))))
    }

    /// Local and parameter references
    pub(super) fn generate_reference(
        &self,
        kind: OperationKind,
        name: String,
        is_implicit: bool,
        role: SyntaxRole,
    ) -> GenerateResult<Option<SyntaxNode>> {
        if is_implicit {
            return Ok(None);
        }
        self.check_not_statement(kind, role)?;
        Ok(Some(SyntaxNode::Expression(factory::identifier(name))))
    }

    pub(super) fn generate_instance_reference(
        &self,
        is_implicit: bool,
        role: SyntaxRole,
    ) -> GenerateResult<Option<SyntaxNode>> {
        if is_implicit {
            return Ok(None);
        }
        self.check_not_statement(OperationKind::InstanceReference, role)?;
        Ok(Some(SyntaxNode::Expression(factory::this_expression())))
    }

    pub(super) fn generate_field_reference(
        &self,
        reference: FieldReference,
        role: SyntaxRole,
    ) -> GenerateResult<Option<SyntaxNode>> {
        self.check_not_statement(OperationKind::FieldReference, role)?;

        let FieldReference { field, instance } = reference;
        let receiver = match instance {
            Some(instance) if !instance.is_implicit => self.generate_expression(Some(*instance))?,
            _ => None,
        };

        let expr = match receiver {
            Some(receiver) => factory::member_access(receiver, field.name),
            None if field.is_static => {
                factory::qualified_member_access(&field.containing_type.to_syntax(), field.name)
            }
            None => factory::identifier(field.name),
        };
        Ok(Some(SyntaxNode::Expression(expr)))
    }

    pub(super) fn generate_name_of(
        &self,
        name_of: NameOfOperation,
        role: SyntaxRole,
    ) -> GenerateResult<Option<SyntaxNode>> {
        self.check_not_statement(OperationKind::NameOf, role)?;

        let argument = self.generate_argument_node(wrap_with_argument(*name_of.argument))?;
        let argument = self.required(argument, OperationKind::NameOf, "Argument")?;

        Ok(Some(SyntaxNode::Expression(factory::invocation(
            factory::identifier("nameof"),
            vec![argument],
        ))))
    }

    pub(super) fn generate_object_creation(
        &self,
        creation: ObjectCreationOperation,
        ty: Option<TypeRef>,
        role: SyntaxRole,
    ) -> GenerateResult<Option<SyntaxNode>> {
        let kind = OperationKind::ObjectCreation;
        self.check_not_statement(kind, role)?;

        let ObjectCreationOperation {
            constructor,
            arguments,
            initializer,
        } = creation;

        let created = constructor
            .map(|ctor| ctor.containing_type)
            .or(ty)
            .ok_or(GenerateError::ContractViolation(
                ContractViolation::MissingType { kind },
            ))?;

        let arguments = self.generate_argument_list(arguments)?;

        if initializer.is_some() {
            return Err(GenerateError::NotImplemented(Unimplemented::Initializer));
        }

        Ok(Some(SyntaxNode::Expression(factory::object_creation(
            created.to_syntax(),
            arguments,
            None,
        ))))
    }

    pub(super) fn generate_parenthesized(
        &self,
        parenthesized: ParenthesizedOperation,
        role: SyntaxRole,
    ) -> GenerateResult<Option<SyntaxNode>> {
        self.check_not_statement(OperationKind::Parenthesized, role)?;

        // An absent operand leaves the enclosing slot empty for the parent to report
        Ok(self
            .generate_expression(Some(*parenthesized.operand))?
            .map(|operand| SyntaxNode::Expression(factory::parenthesized(operand))))
    }

    pub(super) fn generate_argument(&self, argument: ArgumentOperation) -> GenerateResult<Argument> {
        let ref_kind = argument
            .parameter
            .as_ref()
            .map_or(RefKind::None, |parameter| parameter.ref_kind);

        let value = self.generate_expression(Some(*argument.value))?;
        let value = self.required(value, OperationKind::Argument, "Value")?;

        Ok(factory::argument(ref_kind, value))
    }

    /// Generate an operation known to be an `Argument`
    fn generate_argument_node(&self, operation: Operation) -> GenerateResult<Option<Argument>> {
        match self.generate(Some(operation), SyntaxRole::Unspecified)? {
            None => Ok(None),
            Some(SyntaxNode::Argument(argument)) => Ok(Some(argument)),
            Some(SyntaxNode::Expression(value)) => Ok(Some(Argument::positional(value))),
            Some(SyntaxNode::Statement(_)) => Err(GenerateError::unsupported_role(
                OperationKind::Argument,
                SyntaxRole::Statement,
            )),
        }
    }

    /// Arguments in evaluation order, skipping ones the compiler filled in
    pub(super) fn generate_argument_list(
        &self,
        arguments: Vec<Operation>,
    ) -> GenerateResult<Vec<Argument>> {
        let mut generated = Vec::with_capacity(arguments.len());
        let mut last_ordinal = None;

        for operation in arguments {
            let operation = wrap_with_argument(operation);
            if let OperationData::Argument(argument) = &operation.data {
                if operation.is_implicit || argument.kind == ArgumentKind::DefaultValue {
                    continue;
                }
                if let Some(parameter) = &argument.parameter {
                    if last_ordinal.is_some_and(|last| parameter.ordinal < last) {
                        return Err(GenerateError::NotImplemented(
                            Unimplemented::ReorderedArguments,
                        ));
                    }
                    last_ordinal = Some(parameter.ordinal);
                }
            }

            if let Some(argument) = self.generate_argument_node(operation)? {
                generated.push(argument);
            }
        }

        Ok(generated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::symbols::{FieldSymbol, MethodSymbol, ParameterSymbol};

    fn generator() -> SyntaxGenerator {
        SyntaxGenerator::new()
    }

    fn render(operation: Operation) -> String {
        generator()
            .generate_expression(Some(operation))
            .unwrap()
            .unwrap()
            .to_string()
    }

    fn widget() -> TypeRef {
        TypeRef::class("Widget")
    }

    fn field(name: &str, is_static: bool) -> FieldSymbol {
        FieldSymbol {
            name: name.to_string(),
            ty: TypeRef::int(),
            containing_type: widget(),
            is_static,
        }
    }

    fn parameter(name: &str, ordinal: usize, ref_kind: RefKind) -> ParameterSymbol {
        ParameterSymbol {
            name: name.to_string(),
            ty: TypeRef::int(),
            ref_kind,
            ordinal,
        }
    }

    fn constructor(parameters: Vec<ParameterSymbol>) -> MethodSymbol {
        MethodSymbol {
            name: ".ctor".to_string(),
            containing_type: widget(),
            parameters,
            return_type: None,
            is_static: false,
            is_constructor: true,
        }
    }

    #[test]
    fn test_literals() {
        assert_eq!(render(Operation::literal(ConstantValue::Integer(42))), "42");
        assert_eq!(render(Operation::literal(ConstantValue::Null)), "null");
        assert_eq!(
            render(Operation::literal(ConstantValue::String("hi".into()))),
            "\"hi\""
        );
        assert_eq!(
            generator()
                .generate_expression(Some(Operation::literal(ConstantValue::Boolean(true)).implicit()))
                .unwrap(),
            None
        );
    }

    #[test]
    fn test_references() {
        assert_eq!(render(Operation::local("count", TypeRef::int())), "count");
        assert_eq!(
            render(Operation::parameter(parameter("value", 0, RefKind::None))),
            "value"
        );
        assert_eq!(render(Operation::instance_reference(widget())), "this");
    }

    #[test]
    fn test_field_reference_forms() {
        let explicit = Operation::field_reference(
            field("count", false),
            Some(Operation::instance_reference(widget())),
        );
        assert_eq!(render(explicit), "this.count");

        let implicit_this = Operation::field_reference(
            field("count", false),
            Some(Operation::instance_reference(widget()).implicit()),
        );
        assert_eq!(render(implicit_this), "count");

        let static_field = Operation::field_reference(field("Instances", true), None);
        assert_eq!(render(static_field), "Widget.Instances");
    }

    #[test]
    fn test_field_reference_is_not_a_statement() {
        let err = generator()
            .generate(
                Some(Operation::field_reference(field("count", false), None)),
                SyntaxRole::Statement,
            )
            .unwrap_err();
        assert_eq!(
            err,
            GenerateError::unsupported_role(OperationKind::FieldReference, SyntaxRole::Statement)
        );
    }

    #[test]
    fn test_name_of_wraps_bare_operand() {
        let op = Operation::name_of(Operation::local("count", TypeRef::int()));
        assert_eq!(render(op), "nameof(count)");
    }

    #[test]
    fn test_name_of_requires_argument() {
        let op = Operation::name_of(Operation::local("count", TypeRef::int()).implicit());
        let err = generator().generate_expression(Some(op)).unwrap_err();
        assert!(err.is_contract_violation());
    }

    #[test]
    fn test_object_creation_uses_constructor_type_and_ref_kinds() {
        let ctor = constructor(vec![
            parameter("a", 0, RefKind::None),
            parameter("b", 1, RefKind::Ref),
        ]);
        let op = Operation::object_creation(
            Some(ctor.clone()),
            vec![
                Operation::argument(
                    Operation::literal(ConstantValue::Integer(1)),
                    ArgumentKind::Explicit,
                    Some(ctor.parameters[0].clone()),
                ),
                Operation::argument(
                    Operation::local("x", TypeRef::int()),
                    ArgumentKind::Explicit,
                    Some(ctor.parameters[1].clone()),
                ),
            ],
            None,
        );
        assert_eq!(render(op), "new Widget(1, ref x)");
    }

    #[test]
    fn test_object_creation_falls_back_to_operation_type() {
        let op = Operation::object_creation(None, vec![], None).with_type(TypeRef::class("Gadget"));
        assert_eq!(render(op), "new Gadget()");

        let err = generator()
            .generate_expression(Some(Operation::object_creation(None, vec![], None)))
            .unwrap_err();
        assert_eq!(
            err,
            GenerateError::ContractViolation(ContractViolation::MissingType {
                kind: OperationKind::ObjectCreation
            })
        );
    }

    #[test]
    fn test_object_creation_skips_default_value_arguments() {
        let ctor = constructor(vec![
            parameter("a", 0, RefKind::None),
            parameter("b", 1, RefKind::None),
        ]);
        let op = Operation::object_creation(
            Some(ctor.clone()),
            vec![
                Operation::argument(
                    Operation::literal(ConstantValue::Integer(1)),
                    ArgumentKind::Explicit,
                    Some(ctor.parameters[0].clone()),
                ),
                Operation::argument(
                    Operation::literal(ConstantValue::Integer(0)),
                    ArgumentKind::DefaultValue,
                    Some(ctor.parameters[1].clone()),
                )
                .implicit(),
            ],
            None,
        );
        assert_eq!(render(op), "new Widget(1)");
    }

    #[test]
    fn test_object_creation_initializer_is_not_implemented() {
        let op = Operation::object_creation(
            Some(constructor(vec![])),
            vec![],
            Some(Operation::other(OperationKind::ObjectOrCollectionInitializer, vec![])),
        );
        let err = generator().generate_expression(Some(op)).unwrap_err();
        assert_eq!(err, GenerateError::NotImplemented(Unimplemented::Initializer));
    }

    #[test]
    fn test_reordered_arguments_are_not_implemented() {
        let ctor = constructor(vec![
            parameter("a", 0, RefKind::None),
            parameter("b", 1, RefKind::None),
        ]);
        let op = Operation::object_creation(
            Some(ctor.clone()),
            vec![
                Operation::argument(
                    Operation::literal(ConstantValue::Integer(2)),
                    ArgumentKind::Explicit,
                    Some(ctor.parameters[1].clone()),
                ),
                Operation::argument(
                    Operation::literal(ConstantValue::Integer(1)),
                    ArgumentKind::Explicit,
                    Some(ctor.parameters[0].clone()),
                ),
            ],
            None,
        );
        let err = generator().generate_expression(Some(op)).unwrap_err();
        assert_eq!(
            err,
            GenerateError::NotImplemented(Unimplemented::ReorderedArguments)
        );
    }

    #[test]
    fn test_parenthesized() {
        let op = Operation::parenthesized(Operation::local("x", TypeRef::int()));
        assert_eq!(render(op), "(x)");
    }

    #[test]
    fn test_argument_node_and_role() {
        let arg = Operation::argument(
            Operation::local("x", TypeRef::int()),
            ArgumentKind::Explicit,
            Some(parameter("p", 0, RefKind::Out)),
        );
        let node = generator()
            .generate(Some(arg.clone()), SyntaxRole::Unspecified)
            .unwrap()
            .unwrap();
        assert_eq!(node.to_string(), "out x");

        let err = generator()
            .generate(Some(arg), SyntaxRole::Statement)
            .unwrap_err();
        assert_eq!(
            err,
            GenerateError::unsupported_role(OperationKind::Argument, SyntaxRole::Statement)
        );
    }
}
