use serde::{Deserialize, Serialize};

use super::{ColumnRef, Expr, TableRef, WindowDef};

/// A runnable query: either a selection or a set operation over queries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Query {
    Select(SelectQuery),
    Set(SetOperation),
}

impl Query {
    /// Start a select query with the given SELECT expressions.
    pub fn select<I, T>(items: I) -> SelectQuery
    where
        I: IntoIterator<Item = T>,
        T: Into<SelectItem>,
    {
        SelectQuery::new().select(items)
    }

    /// Start a select query with the given FROM expressions.
    pub fn from_items<I, T>(items: I) -> SelectQuery
    where
        I: IntoIterator<Item = T>,
        T: Into<FromItem>,
    {
        SelectQuery::new().from(items)
    }

    /// Start a select query with the given WITH clauses.
    pub fn with<I>(ctes: I) -> SelectQuery
    where
        I: IntoIterator<Item = WithClause>,
    {
        SelectQuery::new().with(ctes)
    }

    pub fn union<I: IntoIterator<Item = Query>>(parts: I) -> SetOperation {
        SetOperation::new(SetOp::Union, parts)
    }

    pub fn union_all<I: IntoIterator<Item = Query>>(parts: I) -> SetOperation {
        SetOperation::new(SetOp::UnionAll, parts)
    }

    pub fn intersect<I: IntoIterator<Item = Query>>(parts: I) -> SetOperation {
        SetOperation::new(SetOp::Intersect, parts)
    }

    pub fn except<I: IntoIterator<Item = Query>>(parts: I) -> SetOperation {
        SetOperation::new(SetOp::Except, parts)
    }

    pub fn describe(query: Query) -> DescribeQuery {
        DescribeQuery { query }
    }

    /// The immediate subqueries of this query, with FROM table references
    /// resolved against this query's own WITH clause.
    pub fn subqueries(&self) -> Vec<&Query> {
        match self {
            Query::Select(select) => select.subqueries(),
            Query::Set(set) => set.parts.iter().collect(),
        }
    }

    pub fn as_select(&self) -> Option<&SelectQuery> {
        match self {
            Query::Select(select) => Some(select),
            Query::Set(_) => None,
        }
    }

    pub fn as_select_mut(&mut self) -> Option<&mut SelectQuery> {
        match self {
            Query::Select(select) => Some(select),
            Query::Set(_) => None,
        }
    }
}

impl From<SelectQuery> for Query {
    fn from(query: SelectQuery) -> Self {
        Query::Select(query)
    }
}

impl From<SetOperation> for Query {
    fn from(op: SetOperation) -> Self {
        Query::Set(op)
    }
}

/// A SELECT query under construction. Builder methods consume and return
/// the query; list-valued clauses accumulate across calls.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SelectQuery {
    pub with: Vec<WithClause>,
    pub select: Vec<SelectItem>,
    pub distinct: bool,
    pub from: Vec<FromItem>,
    pub where_: Vec<Expr>,
    pub sample: Option<SampleClause>,
    pub groupby: Vec<Expr>,
    pub having: Vec<Expr>,
    pub window: Vec<WindowClause>,
    pub qualify: Vec<Expr>,
    pub orderby: Vec<Expr>,
    pub limit: Option<Expr>,
    pub limit_percent: bool,
    pub offset: Option<Expr>,
}

impl SelectQuery {
    pub fn new() -> Self {
        SelectQuery::default()
    }

    /// Add WITH common table expressions.
    pub fn with<I>(mut self, ctes: I) -> Self
    where
        I: IntoIterator<Item = WithClause>,
    {
        self.with.extend(ctes);
        self
    }

    /// Merge SELECT expressions. Re-selecting an existing alias replaces
    /// its expression in place; an item with no expression removes the
    /// alias; new aliases append.
    pub fn select<I, T>(mut self, items: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<SelectItem>,
    {
        for item in items {
            let item = item.into();
            let existing = item.alias.as_ref().and_then(|alias| {
                self.select
                    .iter()
                    .position(|s| s.alias.as_deref() == Some(alias.as_str()))
            });
            match (existing, item.expr.is_some()) {
                (Some(at), true) => self.select[at] = item,
                (Some(at), false) => {
                    self.select.remove(at);
                }
                (None, true) => self.select.push(item),
                (None, false) => {}
            }
        }
        self
    }

    /// Replace all SELECT expressions.
    pub fn set_select<I, T>(mut self, items: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<SelectItem>,
    {
        self.select.clear();
        self.select(items)
    }

    pub fn distinct(mut self) -> Self {
        self.distinct = true;
        self
    }

    /// Add FROM expressions.
    pub fn from<I, T>(mut self, items: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<FromItem>,
    {
        self.from.extend(items.into_iter().map(Into::into));
        self
    }

    /// Replace all FROM expressions.
    pub fn set_from<I, T>(mut self, items: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<FromItem>,
    {
        self.from.clear();
        self.from(items)
    }

    /// Set the table sample, using the numeric convention: a value
    /// strictly between 0 and 1 is a percentage, anything else a
    /// (floored) row count.
    pub fn sample(self, value: f64) -> Self {
        let clause = if value > 0.0 && value < 1.0 {
            SampleClause::percent(value * 100.0)
        } else {
            SampleClause::rows(value.floor())
        };
        self.sample_clause(clause)
    }

    pub fn sample_clause(mut self, clause: SampleClause) -> Self {
        self.sample = Some(clause);
        self
    }

    /// Add a WHERE predicate; predicates are AND-joined on output.
    pub fn where_(mut self, predicate: impl Into<Expr>) -> Self {
        self.where_.push(predicate.into());
        self
    }

    /// Replace all WHERE predicates.
    pub fn set_where(mut self, predicate: impl Into<Expr>) -> Self {
        self.where_.clear();
        self.where_(predicate)
    }

    /// Add GROUP BY expressions.
    pub fn groupby<I, T>(mut self, items: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Expr>,
    {
        self.groupby.extend(items.into_iter().map(Into::into));
        self
    }

    /// Add a HAVING predicate; predicates are AND-joined on output.
    pub fn having(mut self, predicate: impl Into<Expr>) -> Self {
        self.having.push(predicate.into());
        self
    }

    /// Add named WINDOW definitions.
    pub fn window<I, N>(mut self, defs: I) -> Self
    where
        I: IntoIterator<Item = (N, WindowDef)>,
        N: Into<String>,
    {
        self.window.extend(defs.into_iter().map(|(name, def)| WindowClause {
            name: name.into(),
            def,
        }));
        self
    }

    /// Add a QUALIFY predicate; predicates are AND-joined on output.
    pub fn qualify(mut self, predicate: impl Into<Expr>) -> Self {
        self.qualify.push(predicate.into());
        self
    }

    /// Add ORDER BY expressions.
    pub fn orderby<I, T>(mut self, items: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Expr>,
    {
        self.orderby.extend(items.into_iter().map(Into::into));
        self
    }

    pub fn limit(mut self, value: impl Into<Expr>) -> Self {
        self.limit = Some(value.into());
        self.limit_percent = false;
        self
    }

    /// Set the LIMIT as a percentage of result rows.
    pub fn limit_percent(mut self, value: impl Into<Expr>) -> Self {
        self.limit = Some(value.into());
        self.limit_percent = true;
        self
    }

    pub fn offset(mut self, value: impl Into<Expr>) -> Self {
        self.offset = Some(value.into());
        self
    }

    /// The subqueries of this query: FROM subqueries directly, and FROM
    /// table references that name one of this query's own CTEs. Unused
    /// CTEs are not listed.
    pub fn subqueries(&self) -> Vec<&Query> {
        self.from
            .iter()
            .filter_map(|item| match &item.expr {
                FromExpr::Query(query) => Some(&**query),
                FromExpr::Table(table) => self
                    .with
                    .iter()
                    .find(|cte| cte.name == table.name())
                    .map(|cte| &cte.query),
            })
            .collect()
    }
}

/// One SELECT list entry. An item without an expression is a removal
/// marker consumed by the merge in [`SelectQuery::select`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectItem {
    pub expr: Option<Expr>,
    pub alias: Option<String>,
}

impl SelectItem {
    pub fn new(expr: impl Into<Expr>, alias: impl Into<String>) -> Self {
        SelectItem {
            expr: Some(expr.into()),
            alias: Some(unquote(&alias.into()).to_string()),
        }
    }

    pub fn bare(expr: impl Into<Expr>) -> Self {
        SelectItem {
            expr: Some(expr.into()),
            alias: None,
        }
    }

    /// A marker that removes the given alias from the selection.
    pub fn remove(alias: impl Into<String>) -> Self {
        SelectItem {
            expr: None,
            alias: Some(alias.into()),
        }
    }
}

impl From<&str> for SelectItem {
    fn from(name: &str) -> Self {
        SelectItem {
            expr: Some(Expr::Column(ColumnRef::parse(name))),
            alias: Some(unquote(name).to_string()),
        }
    }
}

impl From<String> for SelectItem {
    fn from(name: String) -> Self {
        SelectItem::from(name.as_str())
    }
}

impl From<Expr> for SelectItem {
    fn from(expr: Expr) -> Self {
        let alias = match &expr {
            Expr::Column(col) => Some(col.column.clone()),
            _ => None,
        };
        SelectItem {
            expr: Some(expr),
            alias,
        }
    }
}

impl<S: Into<String>> From<(S, Expr)> for SelectItem {
    fn from((alias, expr): (S, Expr)) -> Self {
        SelectItem::new(expr, alias.into())
    }
}

/// One FROM list entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FromItem {
    pub expr: FromExpr,
    pub alias: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FromExpr {
    Table(TableRef),
    Query(Box<Query>),
}

impl From<&str> for FromItem {
    fn from(name: &str) -> Self {
        FromItem {
            expr: FromExpr::Table(TableRef::from(name)),
            alias: Some(unquote(name).to_string()),
        }
    }
}

impl From<String> for FromItem {
    fn from(name: String) -> Self {
        FromItem::from(name.as_str())
    }
}

impl From<TableRef> for FromItem {
    fn from(table: TableRef) -> Self {
        let alias = table.name().to_string();
        FromItem {
            expr: FromExpr::Table(table),
            alias: Some(alias),
        }
    }
}

impl From<Query> for FromItem {
    fn from(query: Query) -> Self {
        FromItem {
            expr: FromExpr::Query(Box::new(query)),
            alias: None,
        }
    }
}

impl From<SelectQuery> for FromItem {
    fn from(query: SelectQuery) -> Self {
        FromItem::from(Query::Select(query))
    }
}

impl<S: Into<String>> From<(S, Query)> for FromItem {
    fn from((alias, query): (S, Query)) -> Self {
        FromItem {
            expr: FromExpr::Query(Box::new(query)),
            alias: Some(alias.into()),
        }
    }
}

impl<S: Into<String>> From<(S, SelectQuery)> for FromItem {
    fn from((alias, query): (S, SelectQuery)) -> Self {
        FromItem::from((alias, Query::Select(query)))
    }
}

impl<S: Into<String>> From<(S, TableRef)> for FromItem {
    fn from((alias, table): (S, TableRef)) -> Self {
        FromItem {
            expr: FromExpr::Table(table),
            alias: Some(alias.into()),
        }
    }
}

/// A common table expression within a WITH clause.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WithClause {
    pub name: String,
    pub query: Query,
    /// `Some(true)` prints AS MATERIALIZED, `Some(false)` AS NOT
    /// MATERIALIZED, `None` leaves the choice to the database.
    pub materialized: Option<bool>,
}

impl WithClause {
    pub fn new(name: impl Into<String>, query: impl Into<Query>) -> Self {
        WithClause {
            name: unquote(&name.into()).to_string(),
            query: query.into(),
            materialized: None,
        }
    }

    pub fn materialized(mut self) -> Self {
        self.materialized = Some(true);
        self
    }

    pub fn not_materialized(mut self) -> Self {
        self.materialized = Some(false);
        self
    }
}

/// A named window definition within a WINDOW clause.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WindowClause {
    pub name: String,
    pub def: WindowDef,
}

/// A USING SAMPLE clause.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SampleClause {
    pub size: f64,
    pub perc: bool,
    pub method: Option<SampleMethod>,
    pub seed: Option<u64>,
}

impl SampleClause {
    pub fn rows(size: f64) -> Self {
        SampleClause {
            size,
            perc: false,
            method: None,
            seed: None,
        }
    }

    pub fn percent(size: f64) -> Self {
        SampleClause {
            size,
            perc: true,
            method: None,
            seed: None,
        }
    }

    pub fn method(mut self, method: SampleMethod) -> Self {
        self.method = Some(method);
        self
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, strum::Display, strum::EnumString,
)]
pub enum SampleMethod {
    #[strum(to_string = "reservoir")]
    Reservoir,
    #[strum(to_string = "bernoulli")]
    Bernoulli,
    #[strum(to_string = "system")]
    System,
}

/// A set operation (UNION, UNION ALL, INTERSECT, EXCEPT) over queries,
/// with optional shared WITH / ORDER BY / LIMIT / OFFSET clauses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SetOperation {
    pub op: SetOp,
    pub parts: Vec<Query>,
    pub with: Vec<WithClause>,
    pub orderby: Vec<Expr>,
    pub limit: Option<Expr>,
    pub limit_percent: bool,
    pub offset: Option<Expr>,
}

impl SetOperation {
    pub fn new<I: IntoIterator<Item = Query>>(op: SetOp, parts: I) -> Self {
        SetOperation {
            op,
            parts: parts.into_iter().collect(),
            with: vec![],
            orderby: vec![],
            limit: None,
            limit_percent: false,
            offset: None,
        }
    }

    pub fn with<I: IntoIterator<Item = WithClause>>(mut self, ctes: I) -> Self {
        self.with.extend(ctes);
        self
    }

    pub fn orderby<I, T>(mut self, items: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Expr>,
    {
        self.orderby.extend(items.into_iter().map(Into::into));
        self
    }

    pub fn limit(mut self, value: impl Into<Expr>) -> Self {
        self.limit = Some(value.into());
        self.limit_percent = false;
        self
    }

    pub fn limit_percent(mut self, value: impl Into<Expr>) -> Self {
        self.limit = Some(value.into());
        self.limit_percent = true;
        self
    }

    pub fn offset(mut self, value: impl Into<Expr>) -> Self {
        self.offset = Some(value.into());
        self
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, strum::Display, strum::EnumString,
)]
pub enum SetOp {
    #[strum(to_string = "UNION")]
    Union,
    #[strum(to_string = "UNION ALL")]
    UnionAll,
    #[strum(to_string = "INTERSECT")]
    Intersect,
    #[strum(to_string = "EXCEPT")]
    Except,
}

/// `DESCRIBE {query}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DescribeQuery {
    pub query: Query,
}

/// Strip a surrounding pair of double quotes, if present.
pub(crate) fn unquote(value: &str) -> &str {
    value
        .strip_prefix('"')
        .and_then(|v| v.strip_suffix('"'))
        .unwrap_or(value)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn select_merge_replaces_in_place() {
        let query = SelectQuery::new()
            .select(["foo", "bar", "baz"])
            .select([SelectItem::new(Expr::from("baz"), "bar")]);
        let aliases: Vec<_> = query
            .select
            .iter()
            .map(|item| item.alias.clone().unwrap())
            .collect();
        assert_eq!(aliases, ["foo", "bar", "baz"]);
        assert_eq!(query.select[1].expr, Some(Expr::from("baz")));
    }

    #[test]
    fn select_merge_removes_on_empty_expr() {
        let query = SelectQuery::new()
            .select(["foo", "bar"])
            .select([SelectItem::remove("foo")]);
        assert_eq!(query.select.len(), 1);
        assert_eq!(query.select[0].alias.as_deref(), Some("bar"));
    }

    #[test]
    fn subqueries_resolve_ctes() {
        let base = Query::select(["x"]).from(["data"]);
        let query = SelectQuery::new()
            .with([WithClause::new("input", Query::Select(base.clone()))])
            .select(["x"])
            .from(["input", "other"]);
        let subs = query.subqueries();
        assert_eq!(subs, vec![&Query::Select(base)]);
    }
}
