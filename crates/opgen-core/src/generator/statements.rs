//! Handlers whose natural shape is a statement, plus the dual-shape
//! conditional and throw.

use super::wrap::{wrap_with_block, wrap_with_parenthesized};
use super::{SyntaxGenerator, SyntaxRole};
use crate::errors::GenerateResult;
use crate::ir::{
    BlockOperation, Conditional, LabeledOperation, OperationKind, ReturnKind, ReturnOperation,
    ThrowOperation,
};
use crate::syntax::factory;
use crate::syntax::SyntaxNode;

impl SyntaxGenerator {
    /// `if (c) { t } else { f }` in statement role, `(c) ? (t) : (f)` in
    /// expression role. Unspecified picks the expression form when the
    /// operation produces a value.
    pub(super) fn generate_conditional(
        &self,
        conditional: Conditional,
        has_value: bool,
        role: SyntaxRole,
    ) -> GenerateResult<Option<SyntaxNode>> {
        let kind = OperationKind::Conditional;
        let as_expression = match role {
            SyntaxRole::Expression => true,
            SyntaxRole::Statement => false,
            SyntaxRole::Unspecified => has_value,
        };

        let Conditional {
            condition,
            when_true,
            when_false,
        } = conditional;

        if as_expression {
            let condition = self.generate_expression(condition.map(|c| wrap_with_parenthesized(*c)))?;
            let condition = self.required(condition, kind, "Condition")?;
            let when_true = self.generate_expression(when_true.map(|t| wrap_with_parenthesized(*t)))?;
            let when_true = self.required(when_true, kind, "WhenTrue")?;
            let when_false =
                self.generate_expression(when_false.map(|f| wrap_with_parenthesized(*f)))?;
            let when_false = self.required(when_false, kind, "WhenFalse")?;

            return Ok(Some(SyntaxNode::Expression(factory::conditional(
                condition, when_true, when_false,
            ))));
        }

        let condition = self.generate_expression(condition.map(|c| *c))?;
        let condition = self.required(condition, kind, "Condition")?;
        let then_branch = self.generate_statement(when_true.map(|t| wrap_with_block(*t)))?;
        let then_branch = self.required(then_branch, kind, "WhenTrue")?;
        let else_branch = self.generate_statement(when_false.map(|f| wrap_with_block(*f)))?;

        Ok(Some(SyntaxNode::Statement(factory::if_statement(
            condition,
            then_branch,
            else_branch,
        ))))
    }

    pub(super) fn generate_block(
        &self,
        block: BlockOperation,
        role: SyntaxRole,
    ) -> GenerateResult<Option<SyntaxNode>> {
        self.check_not_expression(OperationKind::Block, role)?;

        let mut statements = Vec::with_capacity(block.operations.len());
        for operation in block.operations {
            // Implicit children have nothing to emit
            if let Some(statement) = self.generate_statement(Some(operation))? {
                statements.push(statement);
            }
        }

        Ok(Some(SyntaxNode::Statement(factory::block(statements))))
    }

    pub(super) fn generate_return(
        &self,
        kind: OperationKind,
        ret: ReturnOperation,
        is_implicit: bool,
        role: SyntaxRole,
    ) -> GenerateResult<Option<SyntaxNode>> {
        if is_implicit {
            return Ok(None);
        }
        self.check_not_expression(kind, role)?;

        let statement = match ret.kind {
            ReturnKind::YieldBreak => factory::yield_break_statement(),
            ReturnKind::YieldReturn => {
                let value = self.generate_expression(ret.value.map(|v| *v))?;
                factory::yield_return_statement(self.required(value, kind, "ReturnedValue")?)
            }
            ReturnKind::Return => {
                factory::return_statement(self.generate_expression(ret.value.map(|v| *v))?)
            }
        };

        Ok(Some(SyntaxNode::Statement(statement)))
    }

    pub(super) fn generate_throw(
        &self,
        throw: ThrowOperation,
        is_implicit: bool,
        role: SyntaxRole,
    ) -> GenerateResult<Option<SyntaxNode>> {
        if is_implicit {
            return Ok(None);
        }

        let exception = self.generate_expression(throw.exception.map(|e| *e))?;
        match role {
            SyntaxRole::Expression => {
                let exception = self.required(exception, OperationKind::Throw, "Exception")?;
                Ok(Some(SyntaxNode::Expression(factory::throw_expression(
                    exception,
                ))))
            }
            SyntaxRole::Statement | SyntaxRole::Unspecified => Ok(Some(SyntaxNode::Statement(
                factory::throw_statement(exception),
            ))),
        }
    }

    pub(super) fn generate_labeled(
        &self,
        labeled: LabeledOperation,
        is_implicit: bool,
        role: SyntaxRole,
    ) -> GenerateResult<Option<SyntaxNode>> {
        if is_implicit {
            return Ok(None);
        }
        self.check_not_expression(OperationKind::Labeled, role)?;

        let statement = self.generate_statement(labeled.operation.map(|o| *o))?;
        let statement = self.required(statement, OperationKind::Labeled, "Operation")?;

        Ok(Some(SyntaxNode::Statement(factory::labeled_statement(
            labeled.label,
            statement,
        ))))
    }

    pub(super) fn generate_empty(
        &self,
        is_implicit: bool,
        role: SyntaxRole,
    ) -> GenerateResult<Option<SyntaxNode>> {
        if is_implicit {
            return Ok(None);
        }
        self.check_not_expression(OperationKind::Empty, role)?;
        Ok(Some(SyntaxNode::Statement(factory::empty_statement())))
    }
}
