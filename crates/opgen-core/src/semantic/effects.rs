use super::SemanticModel;
use crate::symbols::{RefKind, Symbol};
use crate::syntax::equivalence;
use crate::syntax::{walk_down_parentheses, Expr, ExprKind};

/// Whether evaluating `expr` twice is indistinguishable from evaluating it
/// once: `this`, locals, parameters and fields, reached through member
/// access, and elements indexed by literals or such reads. A property getter
/// may run code, so properties are accepted only as the outermost access.
pub fn is_side_effect_free(model: &dyn SemanticModel, expr: &Expr) -> bool {
    side_effect_free(model, expr, true)
}

fn side_effect_free(model: &dyn SemanticModel, expr: &Expr, is_top_level: bool) -> bool {
    match &expr.kind {
        ExprKind::This => true,
        ExprKind::Parenthesized(inner) => side_effect_free(model, inner, is_top_level),
        ExprKind::Identifier(_) => match model.symbol_info(expr) {
            Some(symbol) => symbol_is_plain_read(&symbol, is_top_level),
            // Type names qualifying a static access
            None => !is_top_level,
        },
        ExprKind::MemberAccess(receiver, _) => {
            let Some(symbol) = model.symbol_info(expr) else {
                return false;
            };
            symbol_is_plain_read(&symbol, is_top_level) && side_effect_free(model, receiver, false)
        }
        ExprKind::ElementAccess(receiver, arguments) => {
            side_effect_free(model, receiver, false)
                && arguments
                    .iter()
                    .all(|argument| argument.ref_kind == RefKind::None && is_plain_index(model, &argument.value))
        }
        _ => false,
    }
}

fn is_plain_index(model: &dyn SemanticModel, index: &Expr) -> bool {
    match &walk_down_parentheses(index).kind {
        ExprKind::Literal(_) => true,
        ExprKind::Identifier(_) | ExprKind::MemberAccess(..) => {
            model.symbol_info(index).is_some() && side_effect_free(model, index, false)
        }
        _ => false,
    }
}

fn symbol_is_plain_read(symbol: &Symbol, is_top_level: bool) -> bool {
    match symbol {
        Symbol::Local(_) | Symbol::Parameter(_) | Symbol::Field(_) => true,
        Symbol::Property(property) => is_top_level && !property.returns_by_ref,
        Symbol::Method(_) => false,
    }
}

/// Whether two expressions denote the same storage location: structurally
/// equal once parentheses are removed, treating `this.a` (or `Type.a` for a
/// static member) and `a` as the same when both bind to one symbol.
pub fn are_equivalent(model: &dyn SemanticModel, left: &Expr, right: &Expr) -> bool {
    let left = walk_down_parentheses(left);
    let right = walk_down_parentheses(right);

    match (&left.kind, &right.kind) {
        (ExprKind::MemberAccess(left_receiver, left_name), ExprKind::MemberAccess(right_receiver, right_name)) => {
            left_name == right_name && are_equivalent(model, left_receiver, right_receiver)
        }
        (ExprKind::MemberAccess(receiver, name), ExprKind::Identifier(identifier))
        | (ExprKind::Identifier(identifier), ExprKind::MemberAccess(receiver, name)) => {
            name == identifier && implicit_qualifier_matches(model, receiver, left, right)
        }
        _ => equivalence::are_equivalent(left, right),
    }
}

fn implicit_qualifier_matches(
    model: &dyn SemanticModel,
    receiver: &Expr,
    left: &Expr,
    right: &Expr,
) -> bool {
    let (Some(left_symbol), Some(right_symbol)) = (model.symbol_info(left), model.symbol_info(right))
    else {
        return false;
    };
    if left_symbol != right_symbol {
        return false;
    }
    match walk_down_parentheses(receiver).kind {
        ExprKind::This => !left_symbol.is_static(),
        _ => left_symbol.is_static(),
    }
}
