use crate::ast::{AggregateExpr, Expr};

use super::agg_fn;

/// `count(*)`.
pub fn count() -> AggregateExpr {
    agg_fn::<[Expr; 0], Expr>("count", [])
}

pub fn count_of(expr: impl Into<Expr>) -> AggregateExpr {
    agg_fn("count", [expr.into()])
}

pub fn sum(expr: impl Into<Expr>) -> AggregateExpr {
    agg_fn("sum", [expr.into()])
}

pub fn avg(expr: impl Into<Expr>) -> AggregateExpr {
    agg_fn("avg", [expr.into()])
}

pub fn min(expr: impl Into<Expr>) -> AggregateExpr {
    agg_fn("min", [expr.into()])
}

pub fn max(expr: impl Into<Expr>) -> AggregateExpr {
    agg_fn("max", [expr.into()])
}

/// The value of `y` at the row where `x` is maximized.
pub fn argmax(y: impl Into<Expr>, x: impl Into<Expr>) -> AggregateExpr {
    agg_fn("arg_max", [y.into(), x.into()])
}

/// The value of `y` at the row where `x` is minimized.
pub fn argmin(y: impl Into<Expr>, x: impl Into<Expr>) -> AggregateExpr {
    agg_fn("arg_min", [y.into(), x.into()])
}

pub fn first(expr: impl Into<Expr>) -> AggregateExpr {
    agg_fn("first", [expr.into()])
}

pub fn last(expr: impl Into<Expr>) -> AggregateExpr {
    agg_fn("last", [expr.into()])
}

pub fn median(expr: impl Into<Expr>) -> AggregateExpr {
    agg_fn("median", [expr.into()])
}

pub fn mode(expr: impl Into<Expr>) -> AggregateExpr {
    agg_fn("mode", [expr.into()])
}

pub fn quantile(expr: impl Into<Expr>, p: impl Into<Expr>) -> AggregateExpr {
    agg_fn("quantile", [expr.into(), p.into()])
}

pub fn corr(x: impl Into<Expr>, y: impl Into<Expr>) -> AggregateExpr {
    agg_fn("corr", [x.into(), y.into()])
}

pub fn covariance(x: impl Into<Expr>, y: impl Into<Expr>) -> AggregateExpr {
    agg_fn("covar_samp", [x.into(), y.into()])
}

pub fn covar_pop(x: impl Into<Expr>, y: impl Into<Expr>) -> AggregateExpr {
    agg_fn("covar_pop", [x.into(), y.into()])
}

pub fn stddev(expr: impl Into<Expr>) -> AggregateExpr {
    agg_fn("stddev", [expr.into()])
}

pub fn stddev_pop(expr: impl Into<Expr>) -> AggregateExpr {
    agg_fn("stddev_pop", [expr.into()])
}

pub fn variance(expr: impl Into<Expr>) -> AggregateExpr {
    agg_fn("var_samp", [expr.into()])
}

pub fn var_pop(expr: impl Into<Expr>) -> AggregateExpr {
    agg_fn("var_pop", [expr.into()])
}

pub fn product(expr: impl Into<Expr>) -> AggregateExpr {
    agg_fn("product", [expr.into()])
}

pub fn string_agg(expr: impl Into<Expr>) -> AggregateExpr {
    agg_fn("string_agg", [expr.into()])
}

pub fn array_agg(expr: impl Into<Expr>) -> AggregateExpr {
    agg_fn("array_agg", [expr.into()])
}
