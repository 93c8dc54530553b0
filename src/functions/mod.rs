//! Expression constructors: columns, literals, operators, function calls,
//! aggregates, window functions, and frame helpers.

mod aggregates;
mod frames;
mod operators;
mod scalars;
mod windows;

pub use aggregates::*;
pub use frames::*;
pub use operators::*;
pub use scalars::*;
pub use windows::*;

use crate::ast::{
    AggregateExpr, ColumnRef, Expr, IntervalExpr, Literal, Param, Query, SortExpr, TableRef,
    WindowDef, WindowExpr, WindowFunc, WindowFunction, WithClause,
};

/// A column reference. Dotted paths are parsed as table qualifiers:
/// `column("t.foo")` refers to column `foo` of table `t`.
pub fn column(name: impl AsRef<str>) -> Expr {
    Expr::Column(ColumnRef::parse(name.as_ref()))
}

/// A constant value.
pub fn literal(value: impl Into<Literal>) -> Expr {
    Expr::Literal(value.into())
}

/// Raw SQL text, emitted exactly as given.
pub fn verbatim(text: impl Into<String>) -> Expr {
    Expr::Verbatim(text.into())
}

/// An interpolated SQL fragment; parts are concatenated without separators.
pub fn fragment<I: IntoIterator<Item = Expr>>(parts: I) -> Expr {
    Expr::Fragment(parts.into_iter().collect())
}

/// A dynamic scalar value.
pub fn param(value: impl Into<Expr>) -> Expr {
    Expr::Param(Param::new(value))
}

/// A dynamic column name.
pub fn column_param(value: impl Into<Expr>) -> Expr {
    Expr::ColumnParam(Param::new(value))
}

/// A table reference; dotted names are split into path segments.
pub fn table_ref(name: impl Into<TableRef>) -> TableRef {
    name.into()
}

/// A common table expression for a WITH clause.
pub fn cte(name: impl Into<String>, query: impl Into<Query>) -> WithClause {
    WithClause::new(name, query)
}

/// A cast: `(expr)::TYPE`.
pub fn cast(expr: impl Into<Expr>, r#type: impl Into<String>) -> Expr {
    Expr::Cast {
        expr: Box::new(expr.into()),
        r#type: r#type.into(),
    }
}

pub fn int32(expr: impl Into<Expr>) -> Expr {
    cast(expr, "INTEGER")
}

pub fn float32(expr: impl Into<Expr>) -> Expr {
    cast(expr, "FLOAT")
}

pub fn float64(expr: impl Into<Expr>) -> Expr {
    cast(expr, "DOUBLE")
}

pub fn collate(expr: impl Into<Expr>, collation: impl Into<String>) -> Expr {
    Expr::Collate {
        expr: Box::new(expr.into()),
        collation: collation.into(),
    }
}

/// A generic scalar function call.
pub fn func<I, T>(name: impl Into<String>, args: I) -> Expr
where
    I: IntoIterator<Item = T>,
    T: Into<Expr>,
{
    Expr::Function {
        name: name.into(),
        args: args.into_iter().map(Into::into).collect(),
    }
}

/// A generic aggregate function call.
pub fn agg_fn<I, T>(name: impl Into<String>, args: I) -> AggregateExpr
where
    I: IntoIterator<Item = T>,
    T: Into<Expr>,
{
    AggregateExpr::new(name, args.into_iter().map(Into::into).collect())
}

/// A generic window function call, over an empty window definition.
pub fn win_fn<I, T>(name: impl Into<String>, args: I) -> WindowExpr
where
    I: IntoIterator<Item = T>,
    T: Into<Expr>,
{
    WindowExpr::new(
        WindowFunc::Function(WindowFunction::new(
            name,
            args.into_iter().map(Into::into).collect(),
        )),
        WindowDef::new(),
    )
}

/// An empty window definition, to be refined with `partitionby`, `orderby`,
/// or a frame.
pub fn over() -> WindowDef {
    WindowDef::new()
}

pub fn interval(unit: impl Into<String>, steps: impl Into<f64>) -> Expr {
    Expr::Interval(IntervalExpr::new(unit, steps.into()))
}

pub fn years(steps: impl Into<f64>) -> Expr {
    interval("year", steps)
}

pub fn months(steps: impl Into<f64>) -> Expr {
    interval("month", steps)
}

pub fn days(steps: impl Into<f64>) -> Expr {
    interval("day", steps)
}

pub fn hours(steps: impl Into<f64>) -> Expr {
    interval("hour", steps)
}

pub fn minutes(steps: impl Into<f64>) -> Expr {
    interval("minute", steps)
}

pub fn seconds(steps: impl Into<f64>) -> Expr {
    interval("second", steps)
}

pub fn milliseconds(steps: impl Into<f64>) -> Expr {
    interval("millisecond", steps)
}

pub fn microseconds(steps: impl Into<f64>) -> Expr {
    interval("microsecond", steps)
}

pub fn asc(expr: impl Into<Expr>) -> Expr {
    Expr::Sort(SortExpr::new(expr, Some(false), None))
}

pub fn desc(expr: impl Into<Expr>) -> Expr {
    Expr::Sort(SortExpr::new(expr, Some(true), None))
}

pub fn asc_nulls_first(expr: impl Into<Expr>) -> Expr {
    Expr::Sort(SortExpr::new(expr, Some(false), Some(true)))
}

pub fn asc_nulls_last(expr: impl Into<Expr>) -> Expr {
    Expr::Sort(SortExpr::new(expr, Some(false), Some(false)))
}

pub fn desc_nulls_first(expr: impl Into<Expr>) -> Expr {
    Expr::Sort(SortExpr::new(expr, Some(true), Some(true)))
}

pub fn desc_nulls_last(expr: impl Into<Expr>) -> Expr {
    Expr::Sort(SortExpr::new(expr, Some(true), Some(false)))
}
