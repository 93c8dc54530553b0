//! A trait for rewriting SQL syntax trees.
//!
//! Each method folds one node family and defaults to a free function that
//! reconstructs the node from folded children. Implementors override only
//! the methods they care about. The matches are exhaustive: a new [`Expr`]
//! variant will not compile until handled here.

use itertools::Itertools;

use crate::ast::{
    AggregateExpr, BetweenExpr, CaseExpr, ColumnRef, DescribeQuery, Expr, FrameExtent, FrameValue,
    FromExpr, FromItem, Literal, Query, SelectItem, SelectQuery, SetOperation, SortExpr,
    WhenExpr, WindowDef, WindowExpr, WindowFrame, WindowFunc, WindowFunction, WithClause,
};
use crate::error::Result;

// Fold pattern: https://docs.rs/syn/latest/syn/fold/index.html
pub trait SqlFold {
    fn fold_expr(&mut self, expr: Expr) -> Result<Expr> {
        fold_expr(self, expr)
    }
    fn fold_exprs(&mut self, exprs: Vec<Expr>) -> Result<Vec<Expr>> {
        fold_exprs(self, exprs)
    }
    fn fold_literal(&mut self, literal: Literal) -> Result<Literal> {
        Ok(literal)
    }
    fn fold_column(&mut self, column: ColumnRef) -> Result<ColumnRef> {
        Ok(column)
    }
    fn fold_aggregate(&mut self, agg: AggregateExpr) -> Result<AggregateExpr> {
        fold_aggregate(self, agg)
    }
    fn fold_window(&mut self, window: WindowExpr) -> Result<WindowExpr> {
        fold_window(self, window)
    }
    fn fold_window_def(&mut self, def: WindowDef) -> Result<WindowDef> {
        fold_window_def(self, def)
    }
    fn fold_query(&mut self, query: Query) -> Result<Query> {
        fold_query(self, query)
    }
    fn fold_select_query(&mut self, query: SelectQuery) -> Result<SelectQuery> {
        fold_select_query(self, query)
    }
    fn fold_set_operation(&mut self, set_op: SetOperation) -> Result<SetOperation> {
        fold_set_operation(self, set_op)
    }
    fn fold_describe_query(&mut self, describe: DescribeQuery) -> Result<DescribeQuery> {
        Ok(DescribeQuery {
            query: self.fold_query(describe.query)?,
        })
    }
}

pub fn fold_exprs<F: ?Sized + SqlFold>(fold: &mut F, exprs: Vec<Expr>) -> Result<Vec<Expr>> {
    exprs.into_iter().map(|e| fold.fold_expr(e)).try_collect()
}

fn fold_optional_box<F: ?Sized + SqlFold>(
    fold: &mut F,
    expr: Option<Box<Expr>>,
) -> Result<Option<Box<Expr>>> {
    expr.map(|e| fold.fold_expr(*e).map(Box::new)).transpose()
}

pub fn fold_expr<F: ?Sized + SqlFold>(fold: &mut F, expr: Expr) -> Result<Expr> {
    Ok(match expr {
        Expr::Literal(literal) => Expr::Literal(fold.fold_literal(literal)?),
        Expr::Column(column) => Expr::Column(fold.fold_column(column)?),
        // params are shared state and stay untouched
        Expr::Param(param) => Expr::Param(param),
        Expr::ColumnParam(param) => Expr::ColumnParam(param),
        Expr::Verbatim(text) => Expr::Verbatim(text),
        Expr::Fragment(parts) => Expr::Fragment(fold.fold_exprs(parts)?),
        Expr::Unary { op, expr } => Expr::Unary {
            op,
            expr: Box::new(fold.fold_expr(*expr)?),
        },
        Expr::UnaryPostfix { op, expr } => Expr::UnaryPostfix {
            op,
            expr: Box::new(fold.fold_expr(*expr)?),
        },
        Expr::Binary { op, lhs, rhs } => Expr::Binary {
            op,
            lhs: Box::new(fold.fold_expr(*lhs)?),
            rhs: Box::new(fold.fold_expr(*rhs)?),
        },
        Expr::Logical { op, clauses } => Expr::Logical {
            op,
            clauses: fold.fold_exprs(clauses)?,
        },
        Expr::Between(between) => Expr::Between(BetweenExpr {
            expr: Box::new(fold.fold_expr(*between.expr)?),
            extent: between
                .extent
                .map(|(lo, hi)| -> Result<_> {
                    Ok((
                        Box::new(fold.fold_expr(*lo)?),
                        Box::new(fold.fold_expr(*hi)?),
                    ))
                })
                .transpose()?,
            negated: between.negated,
            exclusive: between.exclusive,
        }),
        Expr::In { expr, values } => Expr::In {
            expr: Box::new(fold.fold_expr(*expr)?),
            values: fold.fold_exprs(values)?,
        },
        Expr::Case(case) => Expr::Case(CaseExpr {
            base: fold_optional_box(fold, case.base)?,
            whens: case
                .whens
                .into_iter()
                .map(|branch| -> Result<_> {
                    Ok(WhenExpr {
                        when: fold.fold_expr(branch.when)?,
                        then: fold.fold_expr(branch.then)?,
                    })
                })
                .try_collect()?,
            else_: fold_optional_box(fold, case.else_)?,
        }),
        Expr::Cast { expr, r#type } => Expr::Cast {
            expr: Box::new(fold.fold_expr(*expr)?),
            r#type,
        },
        Expr::Collate { expr, collation } => Expr::Collate {
            expr: Box::new(fold.fold_expr(*expr)?),
            collation,
        },
        Expr::Function { name, args } => Expr::Function {
            name,
            args: fold.fold_exprs(args)?,
        },
        Expr::Aggregate(agg) => Expr::Aggregate(fold.fold_aggregate(agg)?),
        Expr::Window(window) => Expr::Window(fold.fold_window(window)?),
        Expr::Interval(interval) => Expr::Interval(interval),
        Expr::Sort(sort) => Expr::Sort(SortExpr {
            expr: Box::new(fold.fold_expr(*sort.expr)?),
            desc: sort.desc,
            nulls_first: sort.nulls_first,
        }),
        Expr::Subquery(query) => Expr::Subquery(Box::new(fold.fold_query(*query)?)),
    })
}

pub fn fold_aggregate<F: ?Sized + SqlFold>(
    fold: &mut F,
    agg: AggregateExpr,
) -> Result<AggregateExpr> {
    Ok(AggregateExpr {
        name: agg.name,
        args: fold.fold_exprs(agg.args)?,
        distinct: agg.distinct,
        filter: fold_optional_box(fold, agg.filter)?,
        order: fold.fold_exprs(agg.order)?,
    })
}

pub fn fold_window<F: ?Sized + SqlFold>(fold: &mut F, window: WindowExpr) -> Result<WindowExpr> {
    Ok(WindowExpr {
        func: match window.func {
            WindowFunc::Aggregate(agg) => WindowFunc::Aggregate(fold.fold_aggregate(agg)?),
            WindowFunc::Function(func) => WindowFunc::Function(WindowFunction {
                name: func.name,
                args: fold.fold_exprs(func.args)?,
                ignore_nulls: func.ignore_nulls,
                order: fold.fold_exprs(func.order)?,
            }),
        },
        def: fold.fold_window_def(window.def)?,
    })
}

pub fn fold_window_def<F: ?Sized + SqlFold>(fold: &mut F, def: WindowDef) -> Result<WindowDef> {
    Ok(WindowDef {
        name: def.name,
        partition: fold.fold_exprs(def.partition)?,
        order: fold.fold_exprs(def.order)?,
        frame: def
            .frame
            .map(|frame| -> Result<_> {
                Ok(WindowFrame {
                    kind: frame.kind,
                    extent: FrameExtent {
                        start: fold_frame_value(fold, frame.extent.start)?,
                        end: fold_frame_value(fold, frame.extent.end)?,
                    },
                    exclude: frame.exclude,
                })
            })
            .transpose()?,
    })
}

fn fold_frame_value<F: ?Sized + SqlFold>(fold: &mut F, value: FrameValue) -> Result<FrameValue> {
    Ok(match value {
        FrameValue::Expr(expr) => FrameValue::Expr(Box::new(fold.fold_expr(*expr)?)),
        other => other,
    })
}

pub fn fold_query<F: ?Sized + SqlFold>(fold: &mut F, query: Query) -> Result<Query> {
    Ok(match query {
        Query::Select(select) => Query::Select(fold.fold_select_query(select)?),
        Query::Set(set_op) => Query::Set(fold.fold_set_operation(set_op)?),
    })
}

pub fn fold_select_query<F: ?Sized + SqlFold>(
    fold: &mut F,
    query: SelectQuery,
) -> Result<SelectQuery> {
    Ok(SelectQuery {
        with: fold_with_clauses(fold, query.with)?,
        select: query
            .select
            .into_iter()
            .map(|item| -> Result<_> {
                Ok(SelectItem {
                    expr: item.expr.map(|e| fold.fold_expr(e)).transpose()?,
                    alias: item.alias,
                })
            })
            .try_collect()?,
        distinct: query.distinct,
        from: query
            .from
            .into_iter()
            .map(|item| -> Result<_> {
                Ok(FromItem {
                    expr: match item.expr {
                        FromExpr::Table(table) => FromExpr::Table(table),
                        FromExpr::Query(q) => FromExpr::Query(Box::new(fold.fold_query(*q)?)),
                    },
                    alias: item.alias,
                })
            })
            .try_collect()?,
        where_: fold.fold_exprs(query.where_)?,
        sample: query.sample,
        groupby: fold.fold_exprs(query.groupby)?,
        having: fold.fold_exprs(query.having)?,
        window: query
            .window
            .into_iter()
            .map(|clause| -> Result<_> {
                Ok(crate::ast::WindowClause {
                    name: clause.name,
                    def: fold.fold_window_def(clause.def)?,
                })
            })
            .try_collect()?,
        qualify: fold.fold_exprs(query.qualify)?,
        orderby: fold.fold_exprs(query.orderby)?,
        limit: query.limit.map(|e| fold.fold_expr(e)).transpose()?,
        limit_percent: query.limit_percent,
        offset: query.offset.map(|e| fold.fold_expr(e)).transpose()?,
    })
}

pub fn fold_set_operation<F: ?Sized + SqlFold>(
    fold: &mut F,
    set_op: SetOperation,
) -> Result<SetOperation> {
    Ok(SetOperation {
        op: set_op.op,
        parts: set_op
            .parts
            .into_iter()
            .map(|q| fold.fold_query(q))
            .try_collect()?,
        with: fold_with_clauses(fold, set_op.with)?,
        orderby: fold.fold_exprs(set_op.orderby)?,
        limit: set_op.limit.map(|e| fold.fold_expr(e)).transpose()?,
        limit_percent: set_op.limit_percent,
        offset: set_op.offset.map(|e| fold.fold_expr(e)).transpose()?,
    })
}

fn fold_with_clauses<F: ?Sized + SqlFold>(
    fold: &mut F,
    ctes: Vec<WithClause>,
) -> Result<Vec<WithClause>> {
    ctes.into_iter()
        .map(|cte| -> Result<_> {
            Ok(WithClause {
                name: cte.name,
                query: fold.fold_query(cte.query)?,
                materialized: cte.materialized,
            })
        })
        .try_collect()
}

/// Pre-order replacement: when `replace` returns a node, it is spliced in
/// without revisiting; otherwise children are folded recursively.
pub fn rewrite<R>(expr: Expr, replace: &mut R) -> Result<Expr>
where
    R: FnMut(&Expr) -> Option<Expr>,
{
    Rewriter { replace }.fold_expr(expr)
}

/// [`rewrite`] over every expression position of a query.
pub fn rewrite_query<R>(query: Query, replace: &mut R) -> Result<Query>
where
    R: FnMut(&Expr) -> Option<Expr>,
{
    Rewriter { replace }.fold_query(query)
}

struct Rewriter<'a, R> {
    replace: &'a mut R,
}

impl<R> SqlFold for Rewriter<'_, R>
where
    R: FnMut(&Expr) -> Option<Expr>,
{
    fn fold_expr(&mut self, expr: Expr) -> Result<Expr> {
        match (self.replace)(&expr) {
            Some(replacement) => Ok(replacement),
            None => fold_expr(self, expr),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::functions::*;

    #[test]
    fn rewrite_replaces_columns() {
        let expr = add(column("foo"), mul(column("bar"), literal(2)));
        let rewritten = rewrite(expr, &mut |e| match e {
            Expr::Column(c) if c.column == "bar" => Some(column("baz")),
            _ => None,
        })
        .unwrap();
        assert_eq!(rewritten.to_string(), r#"("foo" + ("baz" * 2))"#);
    }

    #[test]
    fn fold_descends_into_subqueries() {
        struct Renamer;
        impl SqlFold for Renamer {
            fn fold_column(&mut self, mut column: crate::ast::ColumnRef) -> Result<crate::ast::ColumnRef> {
                column.column = column.column.to_uppercase();
                Ok(column)
            }
        }

        let query = Query::select(["foo"]).from(["data"]).where_(gt(column("bar"), literal(5)));
        let folded = Renamer.fold_select_query(query).unwrap();
        assert_eq!(
            folded.to_string(),
            r#"SELECT "FOO" AS "foo" FROM "data" WHERE ("BAR" > 5)"#
        );
    }
}
