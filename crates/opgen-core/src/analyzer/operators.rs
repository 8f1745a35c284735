//! Binary operator to compound-assignment operator table

use super::AnalyzerOptions;
use crate::syntax::{AssignmentOp, BinaryOp};

/// `OP` -> `OP=` for every operator that has a compound form
pub fn compound_assignment_operator(op: BinaryOp) -> Option<AssignmentOp> {
    Some(match op {
        BinaryOp::Add => AssignmentOp::AddAssign,
        BinaryOp::Subtract => AssignmentOp::SubtractAssign,
        BinaryOp::Multiply => AssignmentOp::MultiplyAssign,
        BinaryOp::Divide => AssignmentOp::DivideAssign,
        BinaryOp::Modulo => AssignmentOp::ModuloAssign,
        BinaryOp::BitwiseAnd => AssignmentOp::BitwiseAndAssign,
        BinaryOp::BitwiseXor => AssignmentOp::BitwiseXorAssign,
        BinaryOp::BitwiseOr => AssignmentOp::BitwiseOrAssign,
        BinaryOp::ShiftLeft => AssignmentOp::LeftShiftAssign,
        BinaryOp::ShiftRight => AssignmentOp::RightShiftAssign,
        BinaryOp::UnsignedShiftRight => AssignmentOp::UnsignedRightShiftAssign,
        BinaryOp::Coalesce => AssignmentOp::CoalesceAssign,
        BinaryOp::Equal
        | BinaryOp::NotEqual
        | BinaryOp::LessThan
        | BinaryOp::LessThanOrEqual
        | BinaryOp::GreaterThan
        | BinaryOp::GreaterThanOrEqual
        | BinaryOp::LogicalAnd
        | BinaryOp::LogicalOr => return None,
    })
}

/// `OP=` -> `OP`; `None` for plain `=`
pub fn binary_operator(op: AssignmentOp) -> Option<BinaryOp> {
    Some(match op {
        AssignmentOp::Assign => return None,
        AssignmentOp::AddAssign => BinaryOp::Add,
        AssignmentOp::SubtractAssign => BinaryOp::Subtract,
        AssignmentOp::MultiplyAssign => BinaryOp::Multiply,
        AssignmentOp::DivideAssign => BinaryOp::Divide,
        AssignmentOp::ModuloAssign => BinaryOp::Modulo,
        AssignmentOp::BitwiseAndAssign => BinaryOp::BitwiseAnd,
        AssignmentOp::BitwiseXorAssign => BinaryOp::BitwiseXor,
        AssignmentOp::BitwiseOrAssign => BinaryOp::BitwiseOr,
        AssignmentOp::LeftShiftAssign => BinaryOp::ShiftLeft,
        AssignmentOp::RightShiftAssign => BinaryOp::ShiftRight,
        AssignmentOp::UnsignedRightShiftAssign => BinaryOp::UnsignedShiftRight,
        AssignmentOp::CoalesceAssign => BinaryOp::Coalesce,
    })
}

/// Whether `x = x OP y` may become `x OP= y` under `options`
pub fn is_available(op: BinaryOp, options: &AnalyzerOptions) -> bool {
    if !options.prefer_compound_assignment {
        return false;
    }
    match op {
        BinaryOp::Coalesce => options.language_version.supports_coalesce_assignment(),
        BinaryOp::UnsignedShiftRight => options.language_version.supports_unsigned_right_shift(),
        other => compound_assignment_operator(other).is_some(),
    }
}
