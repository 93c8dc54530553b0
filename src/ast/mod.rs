//! Typed SQL syntax trees.
//!
//! Expressions form a closed enum ([`Expr`]); queries are fluent builders
//! ([`SelectQuery`], [`SetOperation`]). All nodes serialize to SQL text via
//! `Display`, with generation rules in [`crate::codegen`].

mod aggregate;
mod expr;
mod query;
mod window;

pub use aggregate::AggregateExpr;
pub use expr::{
    BetweenExpr, BinaryOp, CaseExpr, ColumnRef, Expr, IntervalExpr, Literal, LogicalOp, Param,
    PostfixOp, SortExpr, TableRef, UnaryOp, WhenExpr,
};
pub use query::{
    DescribeQuery, FromExpr, FromItem, Query, SampleClause, SampleMethod, SelectItem, SelectQuery,
    SetOp, SetOperation, WindowClause, WithClause,
};
pub use window::{
    FrameExclude, FrameExtent, FrameKind, FrameValue, WindowDef, WindowExpr, WindowFrame,
    WindowFunc, WindowFunction,
};
