//! End to end tests of the analytic SQL generation transforms.

use insta::assert_snapshot;

use vizsql::ast::Query;
use vizsql::functions::{column, gt, sum};
use vizsql::transforms::{
    bin_histogram, bin_linear_2d, filter_query, line_density, m4, BinOptions, ScaleTransform,
};

#[test]
fn histogram_expressions_match_duckdb_output() {
    let expr = bin_histogram(
        column("foo"),
        (0.0, 100.0),
        &BinOptions {
            steps: Some(10),
            ..Default::default()
        },
        &ScaleTransform::Linear,
    );
    assert_snapshot!(
        expr.to_string(),
        @r#"(10 * floor(("foo" / (10)::DOUBLE)))"#
    );
}

#[test]
fn m4_retains_extremes_per_pixel_with_groups() {
    let groups = vec!["series".to_string()];
    let q = m4("data", column("px"), "t", "v", &groups);
    assert_snapshot!(
        q.to_string(),
        @r#"SELECT min("t") AS "t", arg_min("v", "t") AS "v", "series" FROM "data" GROUP BY (floor("px"))::INTEGER, "series" UNION SELECT max("t") AS "t", arg_max("v", "t") AS "v", "series" FROM "data" GROUP BY (floor("px"))::INTEGER, "series" UNION SELECT arg_min("t", "v") AS "t", min("v") AS "v", "series" FROM "data" GROUP BY (floor("px"))::INTEGER, "series" UNION SELECT arg_max("t", "v") AS "t", max("v") AS "v", "series" FROM "data" GROUP BY (floor("px"))::INTEGER, "series" ORDER BY "series", "t""#
    );
}

#[test]
fn linear_2d_binning_unions_four_weighted_passes() {
    let q = bin_linear_2d(
        Query::from_items(["data"]),
        column("x"),
        column("y"),
        None,
        2,
        &[],
    );
    assert_snapshot!(
        q.to_string(),
        @r#"SELECT "i" AS "index", sum("w") AS "density" FROM (SELECT "x" AS "xp", "y" AS "yp", ((floor("x"))::INTEGER + ((floor("y"))::INTEGER * 2)) AS "i", ((((floor("x"))::INTEGER + 1) - "x") * (((floor("y"))::INTEGER + 1) - "y")) AS "w" FROM "data" UNION ALL SELECT "x" AS "xp", "y" AS "yp", ((floor("x"))::INTEGER + (((floor("y"))::INTEGER + 1) * 2)) AS "i", ((((floor("x"))::INTEGER + 1) - "x") * ("y" - (floor("y"))::INTEGER)) AS "w" FROM "data" UNION ALL SELECT "x" AS "xp", "y" AS "yp", (((floor("x"))::INTEGER + 1) + ((floor("y"))::INTEGER * 2)) AS "i", (("x" - (floor("x"))::INTEGER) * (((floor("y"))::INTEGER + 1) - "y")) AS "w" FROM "data" UNION ALL SELECT "x" AS "xp", "y" AS "yp", (((floor("x"))::INTEGER + 1) + (((floor("y"))::INTEGER + 1) * 2)) AS "i", (("x" - (floor("x"))::INTEGER) * ("y" - (floor("y"))::INTEGER)) AS "w" FROM "data") GROUP BY "index" HAVING ("density" <> 0)"#
    );
}

#[test]
fn line_density_chains_the_raster_pipeline() {
    let q = line_density(
        Query::from_items(["data"]),
        column("a"),
        column("b"),
        &["s".to_string()],
        4,
        4,
        &[],
        true,
    );
    assert_snapshot!(
        q.to_string(),
        @r#"WITH "pairs" AS (SELECT "s", "x" AS "x0", "y" AS "y0", (lead("x") OVER "sw" - "x") AS "dx", (lead("y") OVER "sw" - "y") AS "dy" FROM (SELECT (floor("a"))::INTEGER AS "x", (floor("b"))::INTEGER AS "y" FROM "data") WINDOW "sw" AS (PARTITION BY "s" ORDER BY "x" ASC) QUALIFY (("x0" < 4) OR (("x0" + "dx") < 4)) AND (("y0" < 4) OR (("y0" + "dy") < 4)) AND (("x0" > 0) OR (("x0" + "dx") > 0)) AND (("y0" > 0) OR (("y0" + "dy") > 0))), "indices" AS (SELECT (UNNEST(range((SELECT greatest(max(abs("dx")), max(abs("dy"))) AS "x" FROM "pairs"))))::INTEGER AS "i"), "raster" AS (SELECT "s", ("x0" + "i") AS "x", ("y0" + (round((("i" * "dy") / "dx")))::INTEGER) AS "y" FROM "pairs", "indices" WHERE (abs("dy") <= abs("dx")) AND ("i" < abs("dx")) UNION ALL SELECT "s", ("x0" + (round((((sign("dy") * "i") * "dx") / "dy")))::INTEGER) AS "x", ("y0" + (sign("dy") * "i")) AS "y" FROM "pairs", "indices" WHERE (abs("dy") > abs("dx")) AND ("i" < abs("dy")) UNION ALL SELECT "s", "x0" AS "x", "y0" AS "y" FROM "pairs" WHERE ("dx" IS NULL)), "points" AS (SELECT "s", "x", "y", (1 / count(*) OVER (PARTITION BY "x", "s")) AS "w" FROM "raster" WHERE (0 <= "x") AND ("x" < 4) AND (0 <= "y") AND ("y" < 4)) SELECT ("x" + ("y" * (4)::INTEGER)) AS "index", sum("w") AS "density" FROM "points" GROUP BY "index""#
    );
}

#[test]
fn line_density_counts_when_not_normalizing() {
    let q = line_density(
        Query::from_items(["data"]),
        column("a"),
        column("b"),
        &[],
        4,
        4,
        &[],
        false,
    );
    let sql = q.to_string();
    assert!(sql.contains(r#"count(*) AS "density""#));
    assert!(!sql.contains(r#"AS "w""#));
}

#[test]
fn filters_compose_with_generated_queries() {
    let base = Query::select([("total", sum(column("amount")).into())])
        .from(["orders"])
        .groupby([column("region")]);
    let gen = filter_query(base.into(), "orders");
    let filtered = gen(gt(column("amount"), 10)).unwrap();
    assert_snapshot!(
        filtered.to_string(),
        @r#"SELECT sum("amount") AS "total" FROM "orders" WHERE ("amount" > 10) GROUP BY "region""#
    );
}
