use crate::ast::{BetweenExpr, BinaryOp, Expr, LogicalOp, PostfixOp, UnaryOp};

fn binary(op: BinaryOp, lhs: impl Into<Expr>, rhs: impl Into<Expr>) -> Expr {
    Expr::Binary {
        op,
        lhs: Box::new(lhs.into()),
        rhs: Box::new(rhs.into()),
    }
}

fn unary(op: UnaryOp, expr: impl Into<Expr>) -> Expr {
    Expr::Unary {
        op,
        expr: Box::new(expr.into()),
    }
}

fn postfix(op: PostfixOp, expr: impl Into<Expr>) -> Expr {
    Expr::UnaryPostfix {
        op,
        expr: Box::new(expr.into()),
    }
}

/// Variadic conjunction. Zero clauses serialize to nothing, one clause to
/// itself, more to a parenthesized AND chain.
pub fn and<I, T>(clauses: I) -> Expr
where
    I: IntoIterator<Item = T>,
    T: Into<Expr>,
{
    Expr::Logical {
        op: LogicalOp::And,
        clauses: clauses.into_iter().map(Into::into).collect(),
    }
}

/// Variadic disjunction; see [`and`] for arity behavior.
pub fn or<I, T>(clauses: I) -> Expr
where
    I: IntoIterator<Item = T>,
    T: Into<Expr>,
{
    Expr::Logical {
        op: LogicalOp::Or,
        clauses: clauses.into_iter().map(Into::into).collect(),
    }
}

pub fn not(expr: impl Into<Expr>) -> Expr {
    unary(UnaryOp::Not, expr)
}

pub fn neg(expr: impl Into<Expr>) -> Expr {
    unary(UnaryOp::Neg, expr)
}

pub fn bit_not(expr: impl Into<Expr>) -> Expr {
    unary(UnaryOp::BitNot, expr)
}

pub fn is_null(expr: impl Into<Expr>) -> Expr {
    postfix(PostfixOp::IsNull, expr)
}

pub fn is_not_null(expr: impl Into<Expr>) -> Expr {
    postfix(PostfixOp::IsNotNull, expr)
}

pub fn add(lhs: impl Into<Expr>, rhs: impl Into<Expr>) -> Expr {
    binary(BinaryOp::Add, lhs, rhs)
}

pub fn sub(lhs: impl Into<Expr>, rhs: impl Into<Expr>) -> Expr {
    binary(BinaryOp::Sub, lhs, rhs)
}

pub fn mul(lhs: impl Into<Expr>, rhs: impl Into<Expr>) -> Expr {
    binary(BinaryOp::Mul, lhs, rhs)
}

pub fn div(lhs: impl Into<Expr>, rhs: impl Into<Expr>) -> Expr {
    binary(BinaryOp::Div, lhs, rhs)
}

/// Integer division, `//`.
pub fn idiv(lhs: impl Into<Expr>, rhs: impl Into<Expr>) -> Expr {
    binary(BinaryOp::IntDiv, lhs, rhs)
}

pub fn modulo(lhs: impl Into<Expr>, rhs: impl Into<Expr>) -> Expr {
    binary(BinaryOp::Mod, lhs, rhs)
}

pub fn pow(lhs: impl Into<Expr>, rhs: impl Into<Expr>) -> Expr {
    binary(BinaryOp::Pow, lhs, rhs)
}

pub fn bit_and(lhs: impl Into<Expr>, rhs: impl Into<Expr>) -> Expr {
    binary(BinaryOp::BitAnd, lhs, rhs)
}

pub fn bit_or(lhs: impl Into<Expr>, rhs: impl Into<Expr>) -> Expr {
    binary(BinaryOp::BitOr, lhs, rhs)
}

pub fn bit_left(lhs: impl Into<Expr>, rhs: impl Into<Expr>) -> Expr {
    binary(BinaryOp::BitLeft, lhs, rhs)
}

pub fn bit_right(lhs: impl Into<Expr>, rhs: impl Into<Expr>) -> Expr {
    binary(BinaryOp::BitRight, lhs, rhs)
}

pub fn eq(lhs: impl Into<Expr>, rhs: impl Into<Expr>) -> Expr {
    binary(BinaryOp::Eq, lhs, rhs)
}

pub fn neq(lhs: impl Into<Expr>, rhs: impl Into<Expr>) -> Expr {
    binary(BinaryOp::Ne, lhs, rhs)
}

pub fn lt(lhs: impl Into<Expr>, rhs: impl Into<Expr>) -> Expr {
    binary(BinaryOp::Lt, lhs, rhs)
}

pub fn gt(lhs: impl Into<Expr>, rhs: impl Into<Expr>) -> Expr {
    binary(BinaryOp::Gt, lhs, rhs)
}

pub fn lte(lhs: impl Into<Expr>, rhs: impl Into<Expr>) -> Expr {
    binary(BinaryOp::Le, lhs, rhs)
}

pub fn gte(lhs: impl Into<Expr>, rhs: impl Into<Expr>) -> Expr {
    binary(BinaryOp::Ge, lhs, rhs)
}

/// Null-safe inequality, `IS DISTINCT FROM`.
pub fn is_distinct(lhs: impl Into<Expr>, rhs: impl Into<Expr>) -> Expr {
    binary(BinaryOp::IsDistinct, lhs, rhs)
}

/// Null-safe equality, `IS NOT DISTINCT FROM`.
pub fn is_not_distinct(lhs: impl Into<Expr>, rhs: impl Into<Expr>) -> Expr {
    binary(BinaryOp::IsNotDistinct, lhs, rhs)
}

fn between(
    expr: impl Into<Expr>,
    (lo, hi): (impl Into<Expr>, impl Into<Expr>),
    negated: bool,
    exclusive: bool,
) -> Expr {
    Expr::Between(BetweenExpr {
        expr: Box::new(expr.into()),
        extent: Some((Box::new(lo.into()), Box::new(hi.into()))),
        negated,
        exclusive,
    })
}

/// Inclusive range test: `(expr BETWEEN lo AND hi)`.
pub fn is_between(expr: impl Into<Expr>, extent: (impl Into<Expr>, impl Into<Expr>)) -> Expr {
    between(expr, extent, false, false)
}

pub fn is_not_between(expr: impl Into<Expr>, extent: (impl Into<Expr>, impl Into<Expr>)) -> Expr {
    between(expr, extent, true, false)
}

/// Half-open range test: `(lo <= expr AND expr < hi)`.
pub fn is_between_exclusive(
    expr: impl Into<Expr>,
    extent: (impl Into<Expr>, impl Into<Expr>),
) -> Expr {
    between(expr, extent, false, true)
}

pub fn is_not_between_exclusive(
    expr: impl Into<Expr>,
    extent: (impl Into<Expr>, impl Into<Expr>),
) -> Expr {
    between(expr, extent, true, true)
}

/// Membership test: `(expr IN (v1, v2, ...))`.
pub fn is_in<I, T>(expr: impl Into<Expr>, values: I) -> Expr
where
    I: IntoIterator<Item = T>,
    T: Into<Expr>,
{
    Expr::In {
        expr: Box::new(expr.into()),
        values: values.into_iter().map(Into::into).collect(),
    }
}
