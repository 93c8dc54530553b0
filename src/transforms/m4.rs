use crate::ast::{Expr, FromExpr, FromItem, Query, SelectItem};
use crate::functions::{argmax, argmin, column, cte, floor, int32, max, min};

/// Build an M4 downsampling query: a value-preserving aggregation for
/// plotting large series (https://www.vldb.org/pvldb/vol7/p797-jugel.pdf).
/// Uses a single-scan variant based on argmin/argmax aggregates
/// (https://arxiv.org/pdf/2306.03714.pdf). Per pixel bin, the four
/// extremal points of the bin are retained, so every rendered column
/// keeps its true local minimum and maximum. The `bin` expression maps
/// series values to fractional pixel positions; binning can run along
/// either axis depending on the expression supplied.
///
/// A query input is wrapped as a materialized CTE so it is scanned only
/// once despite feeding four aggregate passes.
pub fn m4(
    input: impl Into<FromItem>,
    bin: impl Into<Expr>,
    x: &str,
    y: &str,
    groups: &[String],
) -> Query {
    let pixel = int32(floor(bin));
    let input = input.into();

    let (from, with) = match input.expr {
        FromExpr::Query(query) => (
            FromItem::from("input"),
            Some(cte("input", *query).materialized()),
        ),
        FromExpr::Table(_) => (input, None),
    };

    let part = |xe: Expr, ye: Expr| -> Query {
        let mut items = vec![SelectItem::new(xe, x), SelectItem::new(ye, y)];
        items.extend(groups.iter().map(|g| SelectItem::from(g.as_str())));
        Query::from_items([from.clone()])
            .select(items)
            .groupby(std::iter::once(pixel.clone()).chain(groups.iter().map(|g| column(g))))
            .into()
    };

    let mut union = Query::union([
        part(min(column(x)).into(), argmin(column(y), column(x)).into()),
        part(max(column(x)).into(), argmax(column(y), column(x)).into()),
        part(argmin(column(x), column(y)).into(), min(column(y)).into()),
        part(argmax(column(x), column(y)).into(), max(column(y)).into()),
    ])
    .orderby(
        groups
            .iter()
            .map(|g| column(g))
            .chain(std::iter::once(column(x))),
    );
    if let Some(with) = with {
        union = union.with([with]);
    }
    union.into()
}

#[cfg(test)]
mod test {
    use super::*;
    use insta::assert_snapshot;

    #[test]
    fn pixel_bins_keep_their_extremes() {
        let q = m4("data", column("u"), "u", "v", &[]);
        assert_snapshot!(
            q.to_string(),
            @r#"SELECT min("u") AS "u", arg_min("v", "u") AS "v" FROM "data" GROUP BY (floor("u"))::INTEGER UNION SELECT max("u") AS "u", arg_max("v", "u") AS "v" FROM "data" GROUP BY (floor("u"))::INTEGER UNION SELECT arg_min("u", "v") AS "u", min("v") AS "v" FROM "data" GROUP BY (floor("u"))::INTEGER UNION SELECT arg_max("u", "v") AS "u", max("v") AS "v" FROM "data" GROUP BY (floor("u"))::INTEGER ORDER BY "u""#
        );
    }

    #[test]
    fn query_inputs_materialize_once() {
        let base = Query::select(["u", "v"]).from(["data"]);
        let q = m4(base, column("u"), "u", "v", &[]);
        let sql = q.to_string();
        assert!(sql.starts_with(
            r#"WITH "input" AS MATERIALIZED (SELECT "u", "v" FROM "data") SELECT"#
        ));
        assert!(sql.contains(r#"FROM "input""#));
    }
}
