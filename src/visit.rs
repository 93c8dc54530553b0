//! Read-only traversal over SQL syntax trees: a pre-order `walk` visitor,
//! node collectors, and aggregate detection for raw SQL text.

use std::sync::OnceLock;

use regex::Regex;

use crate::ast::{
    DescribeQuery, Expr, FrameValue, FromExpr, Param, Query, SelectQuery, SetOperation, WindowDef,
    WindowExpr, WindowFunc,
};

/// Visitor control flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visit {
    Continue,
    /// Do not descend into this node's children.
    SkipChildren,
    /// Stop the entire traversal.
    Abort,
}

/// Nodes that contain expressions and can be traversed pre-order.
pub trait Walk {
    fn walk(&self, f: &mut dyn FnMut(&Expr) -> Visit) -> Visit;
}

impl Walk for Expr {
    fn walk(&self, f: &mut dyn FnMut(&Expr) -> Visit) -> Visit {
        walk_expr(self, f)
    }
}

impl Walk for Query {
    fn walk(&self, f: &mut dyn FnMut(&Expr) -> Visit) -> Visit {
        walk_query(self, f)
    }
}

impl Walk for SelectQuery {
    fn walk(&self, f: &mut dyn FnMut(&Expr) -> Visit) -> Visit {
        walk_select_query(self, f)
    }
}

impl Walk for SetOperation {
    fn walk(&self, f: &mut dyn FnMut(&Expr) -> Visit) -> Visit {
        walk_set_operation(self, f)
    }
}

impl Walk for DescribeQuery {
    fn walk(&self, f: &mut dyn FnMut(&Expr) -> Visit) -> Visit {
        walk_query(&self.query, f)
    }
}

macro_rules! visit {
    ($e:expr) => {
        if let Visit::Abort = $e {
            return Visit::Abort;
        }
    };
}

/// Pre-order walk. The callback sees every expression node; function call
/// heads (aggregate and window function names) are not themselves
/// expression positions, but their arguments are visited.
pub fn walk_expr(expr: &Expr, f: &mut dyn FnMut(&Expr) -> Visit) -> Visit {
    match f(expr) {
        Visit::Abort => return Visit::Abort,
        Visit::SkipChildren => return Visit::Continue,
        Visit::Continue => {}
    }
    match expr {
        Expr::Literal(_)
        | Expr::Column(_)
        | Expr::Param(_)
        | Expr::ColumnParam(_)
        | Expr::Verbatim(_)
        | Expr::Interval(_) => {}
        Expr::Fragment(parts) => visit!(walk_exprs(parts, f)),
        Expr::Unary { expr, .. } | Expr::UnaryPostfix { expr, .. } => visit!(walk_expr(expr, f)),
        Expr::Binary { lhs, rhs, .. } => {
            visit!(walk_expr(lhs, f));
            visit!(walk_expr(rhs, f));
        }
        Expr::Logical { clauses, .. } => visit!(walk_exprs(clauses, f)),
        Expr::Between(between) => {
            visit!(walk_expr(&between.expr, f));
            if let Some((lo, hi)) = &between.extent {
                visit!(walk_expr(lo, f));
                visit!(walk_expr(hi, f));
            }
        }
        Expr::In { expr, values } => {
            visit!(walk_expr(expr, f));
            visit!(walk_exprs(values, f));
        }
        Expr::Case(case) => {
            if let Some(base) = &case.base {
                visit!(walk_expr(base, f));
            }
            for branch in &case.whens {
                visit!(walk_expr(&branch.when, f));
                visit!(walk_expr(&branch.then, f));
            }
            if let Some(else_) = &case.else_ {
                visit!(walk_expr(else_, f));
            }
        }
        Expr::Cast { expr, .. } | Expr::Collate { expr, .. } => visit!(walk_expr(expr, f)),
        Expr::Function { args, .. } => visit!(walk_exprs(args, f)),
        Expr::Aggregate(agg) => {
            visit!(walk_exprs(&agg.args, f));
            if let Some(filter) = &agg.filter {
                visit!(walk_expr(filter, f));
            }
            visit!(walk_exprs(&agg.order, f));
        }
        Expr::Window(window) => visit!(walk_window(window, f)),
        Expr::Sort(sort) => visit!(walk_expr(&sort.expr, f)),
        Expr::Subquery(query) => visit!(walk_query(query, f)),
    }
    Visit::Continue
}

fn walk_exprs(exprs: &[Expr], f: &mut dyn FnMut(&Expr) -> Visit) -> Visit {
    for expr in exprs {
        visit!(walk_expr(expr, f));
    }
    Visit::Continue
}

fn walk_window(window: &WindowExpr, f: &mut dyn FnMut(&Expr) -> Visit) -> Visit {
    match &window.func {
        WindowFunc::Aggregate(agg) => {
            visit!(walk_exprs(&agg.args, f));
            visit!(walk_exprs(&agg.order, f));
        }
        WindowFunc::Function(func) => {
            visit!(walk_exprs(&func.args, f));
            visit!(walk_exprs(&func.order, f));
        }
    }
    walk_window_def(&window.def, f)
}

fn walk_window_def(def: &WindowDef, f: &mut dyn FnMut(&Expr) -> Visit) -> Visit {
    visit!(walk_exprs(&def.partition, f));
    visit!(walk_exprs(&def.order, f));
    if let Some(frame) = &def.frame {
        for bound in [&frame.extent.start, &frame.extent.end] {
            if let FrameValue::Expr(expr) = bound {
                visit!(walk_expr(expr, f));
            }
        }
    }
    Visit::Continue
}

pub fn walk_query(query: &Query, f: &mut dyn FnMut(&Expr) -> Visit) -> Visit {
    match query {
        Query::Select(select) => walk_select_query(select, f),
        Query::Set(set_op) => walk_set_operation(set_op, f),
    }
}

pub fn walk_select_query(query: &SelectQuery, f: &mut dyn FnMut(&Expr) -> Visit) -> Visit {
    for cte in &query.with {
        visit!(walk_query(&cte.query, f));
    }
    for item in &query.select {
        if let Some(expr) = &item.expr {
            visit!(walk_expr(expr, f));
        }
    }
    for item in &query.from {
        if let FromExpr::Query(subquery) = &item.expr {
            visit!(walk_query(subquery, f));
        }
    }
    visit!(walk_exprs(&query.where_, f));
    visit!(walk_exprs(&query.groupby, f));
    visit!(walk_exprs(&query.having, f));
    for clause in &query.window {
        visit!(walk_window_def(&clause.def, f));
    }
    visit!(walk_exprs(&query.qualify, f));
    visit!(walk_exprs(&query.orderby, f));
    if let Some(limit) = &query.limit {
        visit!(walk_expr(limit, f));
    }
    if let Some(offset) = &query.offset {
        visit!(walk_expr(offset, f));
    }
    Visit::Continue
}

pub fn walk_set_operation(set_op: &SetOperation, f: &mut dyn FnMut(&Expr) -> Visit) -> Visit {
    for cte in &set_op.with {
        visit!(walk_query(&cte.query, f));
    }
    for part in &set_op.parts {
        visit!(walk_query(part, f));
    }
    visit!(walk_exprs(&set_op.orderby, f));
    if let Some(limit) = &set_op.limit {
        visit!(walk_expr(limit, f));
    }
    if let Some(offset) = &set_op.offset {
        visit!(walk_expr(offset, f));
    }
    Visit::Continue
}

/// Collect column references and column params in document order,
/// de-duplicated by generated text.
pub fn collect_columns(node: &dyn Walk) -> Vec<Expr> {
    let mut seen = Vec::new();
    let mut columns = Vec::new();
    node.walk(&mut |expr| {
        if matches!(expr, Expr::Column(_) | Expr::ColumnParam(_)) {
            let key = expr.to_string();
            if !seen.contains(&key) {
                seen.push(key);
                columns.push(expr.clone());
            }
        }
        Visit::Continue
    });
    columns
}

/// Collect params in document order, de-duplicated by allocation identity.
pub fn collect_params(node: &dyn Walk) -> Vec<Param> {
    let mut params: Vec<Param> = Vec::new();
    node.walk(&mut |expr| {
        if let Expr::Param(param) | Expr::ColumnParam(param) = expr {
            if !params.iter().any(|p| p.same(param)) {
                params.push(param.clone());
            }
        }
        Visit::Continue
    });
    params
}

/// Collect aggregate calls in document order, de-duplicated by generated
/// text. Aggregates applied over a window are excluded.
pub fn collect_aggregates(node: &dyn Walk) -> Vec<Expr> {
    let mut seen = Vec::new();
    let mut aggregates = Vec::new();
    node.walk(&mut |expr| match expr {
        Expr::Aggregate(_) => {
            let key = expr.to_string();
            if !seen.contains(&key) {
                seen.push(key);
                aggregates.push(expr.clone());
            }
            Visit::Continue
        }
        Expr::Window(_) => Visit::SkipChildren,
        _ => Visit::Continue,
    });
    aggregates
}

/// How an expression was recognized as an aggregate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AggregateMatch {
    /// A structured aggregate node occurs outside any window.
    pub structured: bool,
    /// Raw SQL text contains a top-level aggregate function call.
    pub verbatim: bool,
}

impl AggregateMatch {
    pub fn any(&self) -> bool {
        self.structured || self.verbatim
    }
}

/// Determine if an expression is an aggregate, either structurally or by
/// scanning raw SQL text. This heuristic is the only place aggregate
/// detection for verbatim text lives; results for text are best-effort.
pub fn is_aggregate_expression(node: &dyn Walk) -> AggregateMatch {
    let mut found = AggregateMatch::default();
    node.walk(&mut |expr| match expr {
        Expr::Aggregate(_) => {
            found.structured = true;
            Visit::SkipChildren
        }
        // a windowed call is not an aggregate of the query output
        Expr::Window(_) => Visit::SkipChildren,
        Expr::Verbatim(text) => {
            if verbatim_aggregate(text) {
                found.verbatim = true;
            }
            Visit::SkipChildren
        }
        _ => Visit::Continue,
    });
    found
}

/// Scan raw SQL for an aggregate function call. Quoted strings and
/// identifiers are skipped, text within a scalar subquery is ignored, and
/// a call followed by OVER is a window, not an aggregate.
fn verbatim_aggregate(text: &str) -> bool {
    let text = text.to_lowercase();
    let text = match text.find("(select ") {
        Some(at) => &text[..at],
        None => &text[..],
    };
    if text.contains(") over ") {
        return false;
    }
    for token in func_token().find_iter(text) {
        let token = token.as_str();
        if let Some(name) = token.strip_suffix('(') {
            if AGGREGATE_NAMES.contains(&name) {
                return true;
            }
        }
    }
    false
}

fn func_token() -> &'static Regex {
    static FUNC_TOKEN: OnceLock<Regex> = OnceLock::new();
    FUNC_TOKEN.get_or_init(|| {
        Regex::new(r#"\\'|\\"|"(?:\\"|[^"])*"|'(?:\\'|[^'])*'|\w+\("#).unwrap()
    })
}

/// Aggregate functions, as documented for DuckDB.
const AGGREGATE_NAMES: [&str; 59] = [
    "any_value",
    "arbitrary",
    "arg_max",
    "arg_min",
    "argmax",
    "argmin",
    "array_agg",
    "avg",
    "bit_and",
    "bit_or",
    "bit_xor",
    "bitstring_agg",
    "bool_and",
    "bool_or",
    "corr",
    "count",
    "covar_pop",
    "covar_samp",
    "entropy",
    "favg",
    "first",
    "fsum",
    "geomean",
    "histogram",
    "kurtosis",
    "last",
    "list",
    "mad",
    "max",
    "max_by",
    "mean",
    "median",
    "min",
    "min_by",
    "mode",
    "product",
    "quantile",
    "quantile_cont",
    "quantile_disc",
    "regr_avgx",
    "regr_avgy",
    "regr_count",
    "regr_intercept",
    "regr_r2",
    "regr_slope",
    "regr_sxx",
    "regr_sxy",
    "regr_syy",
    "reservoir_quantile",
    "skewness",
    "stddev",
    "stddev_pop",
    "stddev_samp",
    "string_agg",
    "sum",
    "sumkahan",
    "var_pop",
    "var_samp",
    "variance",
];

#[cfg(test)]
mod test {
    use super::*;
    use crate::functions::*;

    #[test]
    fn collects_columns_in_order() {
        let expr = add(column("foo"), add(column("bar"), column("foo")));
        let columns = collect_columns(&expr);
        let names: Vec<_> = columns.iter().map(|c| c.to_string()).collect();
        assert_eq!(names, [r#""foo""#, r#""bar""#]);
    }

    #[test]
    fn collects_params_by_identity() {
        let param = crate::ast::Param::new(5);
        let expr = add(
            Expr::Param(param.clone()),
            add(Expr::Param(param.clone()), Expr::Param(crate::ast::Param::new(5))),
        );
        assert_eq!(collect_params(&expr).len(), 2);
    }

    #[test]
    fn detects_structured_aggregates() {
        assert!(is_aggregate_expression(&Expr::from(sum(column("foo")))).structured);
        assert!(!is_aggregate_expression(&column("foo")).any());
    }

    #[test]
    fn windowed_calls_are_not_aggregates() {
        let windowed = Expr::Window(sum(column("foo")).orderby([column("bar")]));
        assert!(!is_aggregate_expression(&windowed).any());
    }

    #[test]
    fn detects_verbatim_aggregates() {
        assert!(is_aggregate_expression(&verbatim("SUM(foo + bar)")).verbatim);
        assert!(!is_aggregate_expression(&verbatim("'sum(' || txt")).any());
        assert!(!is_aggregate_expression(&verbatim("sum(x) OVER (PARTITION BY y)")).any());
        assert!(!is_aggregate_expression(&verbatim("(SELECT max(x) FROM t)")).any());
    }
}
