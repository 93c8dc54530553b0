use crate::ast::{Expr, FromExpr, Query, SelectQuery, TableRef};
use crate::error::Result;
use crate::fold::{self, SqlFold};

/// Clone a query and push a filter predicate down onto every SELECT whose
/// sole FROM source is the given base table, including selects nested in
/// CTEs and subqueries.
pub fn filter_pushdown(
    query: &Query,
    table: impl Into<TableRef>,
    filter: impl Into<Expr>,
) -> Result<Query> {
    let mut push = Pushdown {
        table: table.into(),
        filter: filter.into(),
    };
    push.fold_query(query.clone())
}

/// A generator of filtered variants of a query: each call clones the
/// query and pushes the given predicate down to the base table.
pub fn filter_query(
    query: Query,
    table: impl Into<TableRef>,
) -> impl Fn(Expr) -> Result<Query> {
    let table = table.into();
    move |filter| filter_pushdown(&query, table.clone(), filter)
}

struct Pushdown {
    table: TableRef,
    filter: Expr,
}

impl SqlFold for Pushdown {
    fn fold_select_query(&mut self, query: SelectQuery) -> Result<SelectQuery> {
        let mut query = fold::fold_select_query(self, query)?;
        if let [item] = query.from.as_slice() {
            if matches!(&item.expr, FromExpr::Table(t) if t.path == self.table.path) {
                log::debug!("pushing filter down to {}", self.table.name());
                query.where_.push(self.filter.clone());
            }
        }
        Ok(query)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::functions::{column, gt};
    use insta::assert_snapshot;

    #[test]
    fn filters_reach_the_base_table() {
        let q = Query::from(Query::select(["u", "v"]).from(["data"]));
        let filtered = filter_pushdown(&q, "data", gt(column("u"), 5)).unwrap();
        assert_snapshot!(
            filtered.to_string(),
            @r#"SELECT "u", "v" FROM "data" WHERE ("u" > 5)"#
        );
    }

    #[test]
    fn filters_descend_through_ctes() {
        let base = Query::select(["u"]).from(["data"]);
        let q = Query::from(
            Query::select(["u"])
                .with([crate::functions::cte("t", base)])
                .from(["t"]),
        );
        let filtered = filter_pushdown(&q, "data", gt(column("u"), 1)).unwrap();
        assert_snapshot!(
            filtered.to_string(),
            @r#"WITH "t" AS (SELECT "u" FROM "data" WHERE ("u" > 1)) SELECT "u" FROM "t""#
        );
    }

    #[test]
    fn other_tables_are_untouched() {
        let q = Query::from(Query::select(["u"]).from(["other"]));
        let filtered = filter_pushdown(&q, "data", gt(column("u"), 5)).unwrap();
        assert_snapshot!(filtered.to_string(), @r#"SELECT "u" FROM "other""#);
    }

    #[test]
    fn generators_apply_per_call() {
        let gen = filter_query(Query::select(["u"]).from(["data"]).into(), "data");
        let a = gen(gt(column("u"), 1)).unwrap();
        let b = gen(gt(column("u"), 2)).unwrap();
        assert_snapshot!(a.to_string(), @r#"SELECT "u" FROM "data" WHERE ("u" > 1)"#);
        assert_snapshot!(b.to_string(), @r#"SELECT "u" FROM "data" WHERE ("u" > 2)"#);
    }
}
