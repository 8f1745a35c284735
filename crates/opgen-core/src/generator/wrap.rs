//! IR adapters: hand back the operation when it already has the requested
//! shape, otherwise a freshly synthesized wrapper around it.
//!
//! Total by construction; nothing here validates.

use crate::ir::{ArgumentKind, Operation, OperationData};

/// Promote a bare operand to an explicit argument with no parameter binding
pub fn wrap_with_argument(operation: Operation) -> Operation {
    match operation.data {
        OperationData::Argument(_) => operation,
        _ => Operation::argument(operation, ArgumentKind::Explicit, None),
    }
}

pub fn wrap_with_block(operation: Operation) -> Operation {
    match operation.data {
        OperationData::Block(_) => operation,
        _ => Operation::block(vec![operation]),
    }
}

pub fn wrap_with_parenthesized(operation: Operation) -> Operation {
    match operation.data {
        OperationData::Parenthesized(_) => operation,
        _ => Operation::parenthesized(operation),
    }
}
