//! Structural equivalence of syntax, ignoring source locations

use super::*;

/// Strip any number of enclosing parentheses
pub fn walk_down_parentheses(mut expr: &Expr) -> &Expr {
    while let ExprKind::Parenthesized(inner) = &expr.kind {
        expr = inner;
    }
    expr
}

/// Whether two expressions have the same shape and tokens, ignoring spans
pub fn are_equivalent(left: &Expr, right: &Expr) -> bool {
    match (&left.kind, &right.kind) {
        (ExprKind::Literal(a), ExprKind::Literal(b)) => a == b,
        (ExprKind::Identifier(a), ExprKind::Identifier(b)) => a == b,
        (ExprKind::This, ExprKind::This) => true,
        (ExprKind::MemberAccess(ra, na), ExprKind::MemberAccess(rb, nb)) => {
            na == nb && are_equivalent(ra, rb)
        }
        (ExprKind::ElementAccess(ra, aa), ExprKind::ElementAccess(rb, ab))
        | (ExprKind::Invocation(ra, aa), ExprKind::Invocation(rb, ab)) => {
            are_equivalent(ra, rb) && arguments_equivalent(aa, ab)
        }
        (ExprKind::Parenthesized(a), ExprKind::Parenthesized(b)) => are_equivalent(a, b),
        (ExprKind::Conditional(ca, ta, fa), ExprKind::Conditional(cb, tb, fb)) => {
            are_equivalent(ca, cb) && are_equivalent(ta, tb) && are_equivalent(fa, fb)
        }
        (ExprKind::Binary(oa, la, ra), ExprKind::Binary(ob, lb, rb)) => {
            oa == ob && are_equivalent(la, lb) && are_equivalent(ra, rb)
        }
        (ExprKind::Prefix(oa, a), ExprKind::Prefix(ob, b)) => oa == ob && are_equivalent(a, b),
        (ExprKind::Postfix(oa, a), ExprKind::Postfix(ob, b)) => oa == ob && are_equivalent(a, b),
        (ExprKind::Assignment(ta, oa, va), ExprKind::Assignment(tb, ob, vb)) => {
            oa == ob && are_equivalent(ta, tb) && are_equivalent(va, vb)
        }
        (ExprKind::Cast(ta, a), ExprKind::Cast(tb, b)) => ta == tb && are_equivalent(a, b),
        (ExprKind::Is(a, pa), ExprKind::Is(b, pb)) => {
            are_equivalent(a, b)
                && match (pa, pb) {
                    (IsPattern::Constant(ca), IsPattern::Constant(cb)) => are_equivalent(ca, cb),
                    (IsPattern::Type(ta), IsPattern::Type(tb)) => ta == tb,
                    _ => false,
                }
        }
        (ExprKind::Throw(a), ExprKind::Throw(b)) => are_equivalent(a, b),
        (ExprKind::ObjectCreation(a), ExprKind::ObjectCreation(b)) => {
            a.ty == b.ty
                && arguments_equivalent(&a.arguments, &b.arguments)
                && match (&a.initializer, &b.initializer) {
                    (None, None) => true,
                    (Some(ia), Some(ib)) => {
                        ia.len() == ib.len()
                            && ia.iter().zip(ib).all(|(x, y)| are_equivalent(x, y))
                    }
                    _ => false,
                }
        }
        _ => false,
    }
}

fn arguments_equivalent(left: &[Argument], right: &[Argument]) -> bool {
    left.len() == right.len()
        && left.iter().zip(right).all(|(a, b)| {
            a.name == b.name && a.ref_kind == b.ref_kind && are_equivalent(&a.value, &b.value)
        })
}

#[cfg(test)]
mod tests {
    use super::super::factory::*;
    use super::*;
    use crate::span::Span;

    #[test]
    fn test_spans_are_ignored() {
        let a = Expr::new(ExprKind::Identifier("x".into()), Span::new(0, 1, 1, 1));
        let b = Expr::new(ExprKind::Identifier("x".into()), Span::new(9, 10, 2, 3));
        assert!(are_equivalent(&a, &b));
        assert_ne!(a, b);
    }

    #[test]
    fn test_parentheses_are_significant() {
        let a = identifier("x");
        let b = parenthesized(identifier("x"));
        assert!(!are_equivalent(&a, &b));
        assert!(are_equivalent(&a, walk_down_parentheses(&b)));
    }

    #[test]
    fn test_walk_down_nested_parentheses() {
        let e = parenthesized(parenthesized(integer(1)));
        assert_eq!(walk_down_parentheses(&e).to_string(), "1");
    }

    #[test]
    fn test_member_access_names_compared() {
        let a = member_access(this_expression(), "a");
        let b = member_access(this_expression(), "b");
        assert!(!are_equivalent(&a, &b));
    }
}
