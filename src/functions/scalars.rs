use crate::ast::{Expr, IntervalExpr};

use super::func;

pub fn is_nan(expr: impl Into<Expr>) -> Expr {
    func("isnan", [expr.into()])
}

pub fn is_finite(expr: impl Into<Expr>) -> Expr {
    func("isfinite", [expr.into()])
}

pub fn is_infinite(expr: impl Into<Expr>) -> Expr {
    func("isinf", [expr.into()])
}

pub fn greatest<I, T>(exprs: I) -> Expr
where
    I: IntoIterator<Item = T>,
    T: Into<Expr>,
{
    func("greatest", exprs)
}

pub fn least<I, T>(exprs: I) -> Expr
where
    I: IntoIterator<Item = T>,
    T: Into<Expr>,
{
    func("least", exprs)
}

pub fn exp(expr: impl Into<Expr>) -> Expr {
    func("exp", [expr.into()])
}

/// Base-10 logarithm.
pub fn log(expr: impl Into<Expr>) -> Expr {
    func("log", [expr.into()])
}

/// Natural logarithm.
pub fn ln(expr: impl Into<Expr>) -> Expr {
    func("ln", [expr.into()])
}

/// The `pow(base, exponent)` scalar call, as opposed to the `**` operator.
pub fn power(base: impl Into<Expr>, exponent: impl Into<Expr>) -> Expr {
    func("pow", [base.into(), exponent.into()])
}

pub fn sign(expr: impl Into<Expr>) -> Expr {
    func("sign", [expr.into()])
}

pub fn abs(expr: impl Into<Expr>) -> Expr {
    func("abs", [expr.into()])
}

pub fn sqrt(expr: impl Into<Expr>) -> Expr {
    func("sqrt", [expr.into()])
}

pub fn ceil(expr: impl Into<Expr>) -> Expr {
    func("ceil", [expr.into()])
}

pub fn floor(expr: impl Into<Expr>) -> Expr {
    func("floor", [expr.into()])
}

pub fn round(expr: impl Into<Expr>) -> Expr {
    func("round", [expr.into()])
}

pub fn trunc(expr: impl Into<Expr>) -> Expr {
    func("trunc", [expr.into()])
}

pub fn lower(expr: impl Into<Expr>) -> Expr {
    func("lower", [expr.into()])
}

pub fn upper(expr: impl Into<Expr>) -> Expr {
    func("upper", [expr.into()])
}

pub fn length(expr: impl Into<Expr>) -> Expr {
    func("length", [expr.into()])
}

pub fn contains(string: impl Into<Expr>, search: impl Into<Expr>) -> Expr {
    func("contains", [string.into(), search.into()])
}

/// `starts_with(string, search)`.
pub fn prefix(string: impl Into<Expr>, search: impl Into<Expr>) -> Expr {
    func("starts_with", [string.into(), search.into()])
}

/// `ends_with(string, search)`.
pub fn suffix(string: impl Into<Expr>, search: impl Into<Expr>) -> Expr {
    func("ends_with", [string.into(), search.into()])
}

pub fn regexp_matches(string: impl Into<Expr>, pattern: impl Into<Expr>) -> Expr {
    func("regexp_matches", [string.into(), pattern.into()])
}

/// Milliseconds since the UNIX epoch.
pub fn epoch_ms(expr: impl Into<Expr>) -> Expr {
    func("epoch_ms", [expr.into()])
}

/// Truncate a date or timestamp to an interval boundary:
/// `time_bucket(INTERVAL, expr)`.
pub fn date_bin(expr: impl Into<Expr>, interval: IntervalExpr) -> Expr {
    func("time_bucket", [Expr::Interval(interval), expr.into()])
}

/// Map a date to the first day of its month in a common year, for
/// cyclic month comparisons.
pub fn date_month(expr: impl Into<Expr>) -> Expr {
    func(
        "make_date",
        [Expr::from(2012), func("month", [expr.into()]), Expr::from(1)],
    )
}

/// Map a date to its month and day in a common year.
pub fn date_month_day(expr: impl Into<Expr>) -> Expr {
    let expr = expr.into();
    func(
        "make_date",
        [
            Expr::from(2012),
            func("month", [expr.clone()]),
            func("day", [expr]),
        ],
    )
}

/// Map a date to its day of month in a common year.
pub fn date_day(expr: impl Into<Expr>) -> Expr {
    func(
        "make_date",
        [Expr::from(2012), Expr::from(1), func("day", [expr.into()])],
    )
}
