//! End to end tests of query construction and SQL generation.

use insta::assert_snapshot;
use rstest::rstest;
use similar_asserts::assert_eq;

use vizsql::ast::{Expr, Query, SampleClause, SampleMethod, SelectItem};
use vizsql::functions::{
    avg, column, count, cte, frame_rows, gt, literal, lt, max, row_number, sum,
};

#[test]
fn select_from_where() {
    let q = Query::select(["foo", "bar"])
        .from(["data"])
        .where_(gt(column("foo"), 5));
    assert_snapshot!(
        q.to_string(),
        @r#"SELECT "foo", "bar" FROM "data" WHERE ("foo" > 5)"#
    );
}

#[test]
fn ctes_precede_the_select() {
    let q = Query::select(["x"])
        .with([cte("a", Query::select(["*"]).from(["t"]))])
        .from(["a"]);
    assert_snapshot!(
        q.to_string(),
        @r#"WITH "a" AS (SELECT * FROM "t") SELECT "x" FROM "a""#
    );

    let first = Query::with([cte("a", Query::select(["*"]).from(["t"]))])
        .select(["x"])
        .from(["a"]);
    assert_eq!(first.to_string(), q.to_string());
}

#[test]
fn materialization_is_explicit() {
    let q = Query::select(["x"])
        .with([cte("a", Query::select(["*"]).from(["t"])).materialized()])
        .from(["a"]);
    assert_snapshot!(
        q.to_string(),
        @r#"WITH "a" AS MATERIALIZED (SELECT * FROM "t") SELECT "x" FROM "a""#
    );

    let q = Query::select(["x"])
        .with([cte("a", Query::select(["*"]).from(["t"])).not_materialized()])
        .from(["a"]);
    assert_snapshot!(
        q.to_string(),
        @r#"WITH "a" AS NOT MATERIALIZED (SELECT * FROM "t") SELECT "x" FROM "a""#
    );
}

#[test]
fn repeated_aliases_replace_in_place() {
    let q = Query::select([("a", column("u")), ("b", column("v"))])
        .from(["data"])
        .select([("a", column("w"))]);
    assert_snapshot!(
        q.to_string(),
        @r#"SELECT "w" AS "a", "v" AS "b" FROM "data""#
    );
}

#[test]
fn empty_expressions_remove_the_alias() {
    let q = Query::select([("a", column("u")), ("b", column("v"))])
        .from(["data"])
        .select([SelectItem::remove("a")]);
    assert_snapshot!(q.to_string(), @r#"SELECT "v" AS "b" FROM "data""#);
}

#[test]
fn serialization_is_stable_across_clones() {
    let q = Query::select([("total", sum(column("amount")).into())])
        .from(["orders"])
        .groupby([column("region")])
        .having(gt(column("total"), 100));
    assert_eq!(q.to_string(), q.clone().to_string());
}

#[test]
fn set_operations_join_their_parts() {
    let q1 = Query::select(["u"]).from(["a"]);
    let q2 = Query::select(["u"]).from(["b"]);
    let union = Query::union([q1.clone().into(), q2.clone().into()]);
    assert_eq!(
        union.to_string(),
        format!("{q1} UNION {q2}")
    );

    let except = Query::except([q1.clone().into(), q2.clone().into()])
        .orderby([column("u")])
        .limit(10);
    assert_snapshot!(
        except.to_string(),
        @r#"SELECT "u" FROM "a" EXCEPT SELECT "u" FROM "b" ORDER BY "u" LIMIT 10"#
    );
}

#[test]
fn describe_wraps_a_query() {
    let q = Query::describe(Query::select(["*"]).from(["data"]).into());
    assert_snapshot!(q.to_string(), @r#"DESCRIBE SELECT * FROM "data""#);
}

#[test]
fn samples_serialize_rows_percentages_and_methods() {
    let q = Query::select(["*"]).from(["data"]).sample(0.3);
    assert_snapshot!(q.to_string(), @r#"SELECT * FROM "data" USING SAMPLE 30%"#);

    let q = Query::select(["*"]).from(["data"]).sample(100.0);
    assert_snapshot!(q.to_string(), @r#"SELECT * FROM "data" USING SAMPLE 100 ROWS"#);

    let q = Query::select(["*"]).from(["data"]).sample_clause(
        SampleClause::percent(10.0)
            .method(SampleMethod::Bernoulli)
            .seed(42),
    );
    assert_snapshot!(
        q.to_string(),
        @r#"SELECT * FROM "data" USING SAMPLE 10% (bernoulli, 42)"#
    );
}

#[test]
fn limits_support_percentages() {
    let q = Query::select(["*"]).from(["data"]).limit_percent(10).offset(5);
    assert_snapshot!(q.to_string(), @r#"SELECT * FROM "data" LIMIT 10% OFFSET 5"#);
}

#[test]
fn frame_bounds_default_to_unbounded() {
    assert_eq!(
        frame_rows((Some(0.0), None)).to_string(),
        "ROWS BETWEEN CURRENT ROW AND UNBOUNDED FOLLOWING"
    );
    assert_eq!(
        frame_rows((None, None)).to_string(),
        "ROWS BETWEEN UNBOUNDED PRECEDING AND UNBOUNDED FOLLOWING"
    );
    assert_eq!(
        frame_rows((Some(2.0), Some(0.0))).to_string(),
        "ROWS BETWEEN 2 PRECEDING AND CURRENT ROW"
    );
}

#[rstest]
#[case(literal(vizsql::ast::Literal::Null), "NULL")]
#[case(literal(true), "TRUE")]
#[case(literal("a'b"), "'a''b'")]
#[case(literal(f64::NAN), "NULL")]
#[case(literal(chrono::NaiveDate::from_ymd_opt(2020, 1, 1).unwrap()), "DATE '2020-1-1'")]
fn literal_encoding(#[case] expr: Expr, #[case] sql: &str) {
    assert_eq!(expr.to_string(), sql);
}

#[test]
fn queries_round_trip_through_json() {
    let day = chrono::NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();
    let q = Query::select([("total", sum(column("amount")).into())])
        .from(["orders"])
        .where_(gt(column("day"), literal(day)))
        .groupby([column("region")])
        .limit(10);
    let json = serde_json::to_string(&q).unwrap();
    let back: vizsql::ast::SelectQuery = serde_json::from_str(&json).unwrap();
    assert_eq!(back.to_string(), q.to_string());
}

#[test]
fn windowed_aggregates_carry_their_modifiers() {
    let q = Query::select([
        ("row", row_number().over("w").into()),
        ("cume", avg(column("v")).partitionby([column("g")]).into()),
    ])
    .from(["data"])
    .window([(
        "w",
        vizsql::ast::WindowDef::new().orderby([column("t")]),
    )]);
    assert_snapshot!(
        q.to_string(),
        @r#"SELECT row_number() OVER "w" AS "row", avg("v") OVER (PARTITION BY "g") AS "cume" FROM "data" WINDOW "w" AS (ORDER BY "t")"#
    );
}

#[test]
fn aggregate_modifiers_compose() {
    let agg = count_distinct_example();
    assert_snapshot!(
        agg.to_string(),
        @r#"max(DISTINCT "v") FILTER (WHERE ("v" < 100))"#
    );
}

fn count_distinct_example() -> vizsql::ast::AggregateExpr {
    max(column("v")).distinct().where_(lt(column("v"), 100))
}

#[test]
fn subqueries_nest_in_from() {
    let inner = Query::select(["u"]).from(["data"]);
    let q = Query::select([("m", max(column("u")).into())]).from([("t", inner)]);
    assert_snapshot!(
        q.to_string(),
        @r#"SELECT max("u") AS "m" FROM (SELECT "u" FROM "data") AS "t""#
    );
}

#[test]
fn counts_have_star_arity() {
    let q = Query::select([("n", count().into())]).from(["data"]);
    assert_snapshot!(q.to_string(), @r#"SELECT count(*) AS "n" FROM "data""#);
}
