//! SQL text generation.
//!
//! [`SqlDialect`] holds one method per node family, each with a default
//! body producing DuckDB-flavored SQL and recursing through `self`, so a
//! dialect overrides individual printers without reimplementing the rest.
//! `Display` on every node delegates to [`DuckDbDialect`].

use std::fmt::{self, Display, Formatter};

use itertools::Itertools;

use crate::ast::{
    AggregateExpr, ColumnRef, DescribeQuery, Expr, FrameValue, FromExpr, FromItem, Literal,
    LogicalOp, Query, SampleClause, SelectItem, SelectQuery, SetOperation, SortExpr, TableRef,
    WindowClause, WindowDef, WindowExpr, WindowFrame, WindowFunc, WindowFunction, WithClause,
};

/// Which side of a frame extent a bound sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameSide {
    Preceding,
    Following,
}

impl FrameSide {
    fn keyword(self) -> &'static str {
        match self {
            FrameSide::Preceding => "PRECEDING",
            FrameSide::Following => "FOLLOWING",
        }
    }
}

pub trait SqlDialect {
    /// Quote an identifier. `*` and already-quoted names pass through.
    fn quote_ident(&self, name: &str) -> String {
        if name == "*" || (name.starts_with('"') && name.ends_with('"') && name.len() >= 2) {
            name.to_string()
        } else {
            format!("\"{name}\"")
        }
    }

    fn sql_table_ref(&self, table: &TableRef) -> String {
        table.path.iter().map(|part| self.quote_ident(part)).join(".")
    }

    fn sql_column(&self, column: &ColumnRef) -> String {
        match &column.table {
            Some(table) => format!(
                "{}.{}",
                self.sql_table_ref(table),
                self.quote_ident(&column.column)
            ),
            None => self.quote_ident(&column.column),
        }
    }

    fn sql_literal(&self, literal: &Literal) -> String {
        match literal {
            Literal::Null => "NULL".to_string(),
            Literal::Boolean(true) => "TRUE".to_string(),
            Literal::Boolean(false) => "FALSE".to_string(),
            Literal::Int(v) => v.to_string(),
            Literal::Float(v) if !v.is_finite() => "NULL".to_string(),
            Literal::Float(v) => v.to_string(),
            Literal::String(s) => format!("'{}'", s.replace('\'', "''")),
            Literal::Date(date) => {
                use chrono::Datelike;
                format!("DATE '{}-{}-{}'", date.year(), date.month(), date.day())
            }
            Literal::Timestamp(ts) => format!("epoch_ms({})", ts.timestamp_millis()),
        }
    }

    fn sql_expr(&self, expr: &Expr) -> String {
        match expr {
            Expr::Literal(literal) => self.sql_literal(literal),
            Expr::Column(column) => self.sql_column(column),
            Expr::Param(param) => self.sql_expr(&param.value()),
            Expr::ColumnParam(param) => {
                let value = param.value();
                match &value {
                    Expr::Literal(Literal::String(name)) => self.quote_ident(name),
                    other => self.quote_ident(&self.sql_expr(other)),
                }
            }
            Expr::Verbatim(text) => text.clone(),
            Expr::Fragment(parts) => parts.iter().map(|p| self.sql_expr(p)).join(""),
            Expr::Unary { op, expr } => format!("({op} {})", self.sql_expr(expr)),
            Expr::UnaryPostfix { op, expr } => format!("({} {op})", self.sql_expr(expr)),
            Expr::Binary { op, lhs, rhs } => {
                format!("({} {op} {})", self.sql_expr(lhs), self.sql_expr(rhs))
            }
            Expr::Logical { op, clauses } => self.sql_logical(*op, clauses),
            Expr::Between(between) => {
                let Some((lo, hi)) = &between.extent else {
                    return String::new();
                };
                let e = self.sql_expr(&between.expr);
                let (lo, hi) = (self.sql_expr(lo), self.sql_expr(hi));
                match (between.exclusive, between.negated) {
                    (false, false) => format!("({e} BETWEEN {lo} AND {hi})"),
                    (false, true) => format!("({e} NOT BETWEEN {lo} AND {hi})"),
                    (true, false) => format!("({lo} <= {e} AND {e} < {hi})"),
                    (true, true) => format!("NOT ({lo} <= {e} AND {e} < {hi})"),
                }
            }
            Expr::In { expr, values } => format!(
                "({} IN ({}))",
                self.sql_expr(expr),
                values.iter().map(|v| self.sql_expr(v)).join(", ")
            ),
            Expr::Case(case) => {
                let mut sql = "CASE ".to_string();
                if let Some(base) = &case.base {
                    sql.push_str(&self.sql_expr(base));
                    sql.push(' ');
                }
                for branch in &case.whens {
                    sql.push_str(&format!(
                        "WHEN {} THEN {} ",
                        self.sql_expr(&branch.when),
                        self.sql_expr(&branch.then)
                    ));
                }
                if let Some(else_) = &case.else_ {
                    sql.push_str(&format!("ELSE {} ", self.sql_expr(else_)));
                }
                sql.push_str("END");
                sql
            }
            Expr::Cast { expr, r#type } => format!("({})::{}", self.sql_expr(expr), r#type),
            Expr::Collate { expr, collation } => {
                format!("{} COLLATE {}", self.sql_expr(expr), collation)
            }
            Expr::Function { name, args } => format!(
                "{name}({})",
                args.iter().map(|a| self.sql_expr(a)).join(", ")
            ),
            Expr::Aggregate(agg) => self.sql_aggregate(agg),
            Expr::Window(window) => self.sql_window(window),
            Expr::Interval(interval) => {
                format!("INTERVAL {} {}", interval.steps, interval.unit)
            }
            Expr::Sort(sort) => self.sql_sort(sort),
            Expr::Subquery(query) => format!("({})", self.sql_query(query)),
        }
    }

    fn sql_logical(&self, op: LogicalOp, clauses: &[Expr]) -> String {
        match clauses {
            [] => String::new(),
            [clause] => self.sql_expr(clause),
            _ => format!(
                "({})",
                clauses
                    .iter()
                    .map(|c| self.sql_expr(c))
                    .join(&format!(" {op} "))
            ),
        }
    }

    fn sql_aggregate(&self, agg: &AggregateExpr) -> String {
        let distinct = if agg.distinct { "DISTINCT" } else { "" };
        let args = if agg.args.is_empty() {
            // only count admits a zero-argument form
            if agg.name == "count" { "*".to_string() } else { String::new() }
        } else {
            agg.args.iter().map(|a| self.sql_expr(a)).join(", ")
        };
        let order = if agg.order.is_empty() {
            String::new()
        } else {
            format!(
                "ORDER BY {}",
                agg.order.iter().map(|o| self.sql_expr(o)).join(", ")
            )
        };
        let inner = [distinct, args.as_str(), order.as_str()]
            .into_iter()
            .filter(|part| !part.is_empty())
            .join(" ");
        let filter = match &agg.filter {
            Some(filter) => format!(" FILTER (WHERE {})", self.sql_expr(filter)),
            None => String::new(),
        };
        format!("{}({inner}){filter}", agg.name)
    }

    fn sql_window(&self, window: &WindowExpr) -> String {
        let func = match &window.func {
            WindowFunc::Aggregate(agg) => self.sql_aggregate(agg),
            WindowFunc::Function(func) => self.sql_window_function(func),
        };
        format!("{func} OVER {}", self.sql_window_def(&window.def))
    }

    fn sql_window_function(&self, func: &WindowFunction) -> String {
        let mut parts = Vec::new();
        if !func.args.is_empty() {
            parts.push(func.args.iter().map(|a| self.sql_expr(a)).join(", "));
        }
        if !func.order.is_empty() {
            parts.push(format!(
                "ORDER BY {}",
                func.order.iter().map(|o| self.sql_expr(o)).join(", ")
            ));
        }
        if func.ignore_nulls {
            parts.push("IGNORE NULLS".to_string());
        }
        format!("{}({})", func.name, parts.join(" "))
    }

    fn sql_window_def(&self, def: &WindowDef) -> String {
        let base = def.name.as_ref().map(|name| self.quote_ident(name));
        let mut parts = Vec::new();
        if let Some(base) = &base {
            parts.push(base.clone());
        }
        if !def.partition.is_empty() {
            parts.push(format!(
                "PARTITION BY {}",
                def.partition.iter().map(|p| self.sql_expr(p)).join(", ")
            ));
        }
        if !def.order.is_empty() {
            parts.push(format!(
                "ORDER BY {}",
                def.order.iter().map(|o| self.sql_expr(o)).join(", ")
            ));
        }
        if let Some(frame) = &def.frame {
            parts.push(self.sql_window_frame(frame));
        }
        match base {
            // a bare name needs no parentheses
            Some(base) if parts.len() < 2 => base,
            _ => format!("({})", parts.join(" ")),
        }
    }

    fn sql_window_frame(&self, frame: &WindowFrame) -> String {
        let start = self.sql_frame_value(&frame.extent.start, FrameSide::Preceding);
        let end = self.sql_frame_value(&frame.extent.end, FrameSide::Following);
        let exclude = match &frame.exclude {
            Some(exclude) => format!(" {exclude}"),
            None => String::new(),
        };
        format!("{} BETWEEN {start} AND {end}{exclude}", frame.kind)
    }

    fn sql_frame_value(&self, value: &FrameValue, side: FrameSide) -> String {
        match value {
            FrameValue::Unbounded => format!("UNBOUNDED {}", side.keyword()),
            FrameValue::Value(v) if *v == 0.0 => "CURRENT ROW".to_string(),
            FrameValue::Value(v) => format!("{} {}", v.abs(), side.keyword()),
            FrameValue::Expr(expr) => format!("{} {}", self.sql_expr(expr), side.keyword()),
        }
    }

    fn sql_sort(&self, sort: &SortExpr) -> String {
        let dir = match sort.desc {
            Some(true) => " DESC",
            Some(false) => " ASC",
            None => "",
        };
        let nulls = match sort.nulls_first {
            Some(true) => " NULLS FIRST",
            Some(false) => " NULLS LAST",
            None => "",
        };
        format!("{}{dir}{nulls}", self.sql_expr(&sort.expr))
    }

    fn sql_query(&self, query: &Query) -> String {
        match query {
            Query::Select(select) => self.sql_select_query(select),
            Query::Set(set_op) => self.sql_set_operation(set_op),
        }
    }

    fn sql_select_item(&self, item: &SelectItem) -> String {
        let Some(expr) = &item.expr else {
            return String::new();
        };
        let sql = self.sql_expr(expr);
        match &item.alias {
            // a bare column selected under its own name needs no alias
            Some(alias)
                if !matches!(expr, Expr::Column(c) if c.table.is_none() && c.column == *alias) =>
            {
                format!("{sql} AS {}", self.quote_ident(alias))
            }
            _ => sql,
        }
    }

    fn sql_from_item(&self, item: &FromItem) -> String {
        match &item.expr {
            FromExpr::Table(table) => {
                let sql = self.sql_table_ref(table);
                match &item.alias {
                    Some(alias)
                        if alias != table.name() && *alias != table.path.join(".") =>
                    {
                        format!("{sql} AS {}", self.quote_ident(alias))
                    }
                    _ => sql,
                }
            }
            FromExpr::Query(query) => {
                let sql = format!("({})", self.sql_query(query));
                match &item.alias {
                    Some(alias) => format!("{sql} AS {}", self.quote_ident(alias)),
                    None => sql,
                }
            }
        }
    }

    fn sql_with_clause(&self, cte: &WithClause) -> String {
        let materialized = match cte.materialized {
            Some(true) => "MATERIALIZED ",
            Some(false) => "NOT MATERIALIZED ",
            None => "",
        };
        format!(
            "{} AS {materialized}({})",
            self.quote_ident(&cte.name),
            self.sql_query(&cte.query)
        )
    }

    fn sql_sample(&self, sample: &SampleClause) -> String {
        let size = if sample.perc {
            format!("{}%", sample.size)
        } else {
            format!("{} ROWS", sample.size)
        };
        match (&sample.method, &sample.seed) {
            (Some(method), Some(seed)) => format!("{size} ({method}, {seed})"),
            (Some(method), None) => format!("{size} ({method})"),
            _ => size,
        }
    }

    fn sql_window_clause(&self, clause: &WindowClause) -> String {
        format!(
            "{} AS {}",
            self.quote_ident(&clause.name),
            self.sql_window_def(&clause.def)
        )
    }

    fn sql_select_query(&self, query: &SelectQuery) -> String {
        let mut sql = Vec::new();
        if !query.with.is_empty() {
            sql.push(format!(
                "WITH {}",
                query.with.iter().map(|c| self.sql_with_clause(c)).join(", ")
            ));
        }
        sql.push(format!(
            "SELECT{} {}",
            if query.distinct { " DISTINCT" } else { "" },
            query.select.iter().map(|s| self.sql_select_item(s)).join(", ")
        ));
        if !query.from.is_empty() {
            sql.push(format!(
                "FROM {}",
                query.from.iter().map(|f| self.sql_from_item(f)).join(", ")
            ));
        }
        if let Some(clause) = self.sql_predicates("WHERE", &query.where_) {
            sql.push(clause);
        }
        if let Some(sample) = &query.sample {
            sql.push(format!("USING SAMPLE {}", self.sql_sample(sample)));
        }
        if !query.groupby.is_empty() {
            sql.push(format!(
                "GROUP BY {}",
                query.groupby.iter().map(|g| self.sql_expr(g)).join(", ")
            ));
        }
        if let Some(clause) = self.sql_predicates("HAVING", &query.having) {
            sql.push(clause);
        }
        if !query.window.is_empty() {
            sql.push(format!(
                "WINDOW {}",
                query.window.iter().map(|w| self.sql_window_clause(w)).join(", ")
            ));
        }
        if let Some(clause) = self.sql_predicates("QUALIFY", &query.qualify) {
            sql.push(clause);
        }
        if !query.orderby.is_empty() {
            sql.push(format!(
                "ORDER BY {}",
                query.orderby.iter().map(|o| self.sql_expr(o)).join(", ")
            ));
        }
        if let Some(limit) = &query.limit {
            sql.push(format!(
                "LIMIT {}{}",
                self.sql_expr(limit),
                if query.limit_percent { "%" } else { "" }
            ));
        }
        if let Some(offset) = &query.offset {
            sql.push(format!("OFFSET {}", self.sql_expr(offset)));
        }
        sql.join(" ")
    }

    /// AND-join predicates under a keyword; empty entries are skipped and
    /// an all-empty list yields no clause at all.
    fn sql_predicates(&self, keyword: &str, predicates: &[Expr]) -> Option<String> {
        if predicates.is_empty() {
            return None;
        }
        let clauses = predicates
            .iter()
            .map(|p| self.sql_expr(p))
            .filter(|sql| !sql.is_empty())
            .join(" AND ");
        if clauses.is_empty() {
            None
        } else {
            Some(format!("{keyword} {clauses}"))
        }
    }

    fn sql_set_operation(&self, set_op: &SetOperation) -> String {
        let mut sql = Vec::new();
        if !set_op.with.is_empty() {
            sql.push(format!(
                "WITH {}",
                set_op.with.iter().map(|c| self.sql_with_clause(c)).join(", ")
            ));
        }
        sql.push(
            set_op
                .parts
                .iter()
                .map(|q| self.sql_query(q))
                .join(&format!(" {} ", set_op.op)),
        );
        if !set_op.orderby.is_empty() {
            sql.push(format!(
                "ORDER BY {}",
                set_op.orderby.iter().map(|o| self.sql_expr(o)).join(", ")
            ));
        }
        if let Some(limit) = &set_op.limit {
            sql.push(format!(
                "LIMIT {}{}",
                self.sql_expr(limit),
                if set_op.limit_percent { "%" } else { "" }
            ));
        }
        if let Some(offset) = &set_op.offset {
            sql.push(format!("OFFSET {}", self.sql_expr(offset)));
        }
        sql.join(" ")
    }

    fn sql_describe(&self, describe: &DescribeQuery) -> String {
        format!("DESCRIBE {}", self.sql_query(&describe.query))
    }
}

/// The default output dialect.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DuckDbDialect;

impl SqlDialect for DuckDbDialect {}

impl Display for Expr {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.write_str(&DuckDbDialect.sql_expr(self))
    }
}

impl Display for Literal {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.write_str(&DuckDbDialect.sql_literal(self))
    }
}

impl Display for ColumnRef {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.write_str(&DuckDbDialect.sql_column(self))
    }
}

impl Display for TableRef {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.write_str(&DuckDbDialect.sql_table_ref(self))
    }
}

impl Display for AggregateExpr {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.write_str(&DuckDbDialect.sql_aggregate(self))
    }
}

impl Display for WindowExpr {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.write_str(&DuckDbDialect.sql_window(self))
    }
}

impl Display for WindowDef {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.write_str(&DuckDbDialect.sql_window_def(self))
    }
}

impl Display for WindowFrame {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.write_str(&DuckDbDialect.sql_window_frame(self))
    }
}

impl Display for SortExpr {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.write_str(&DuckDbDialect.sql_sort(self))
    }
}

impl Display for SampleClause {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.write_str(&DuckDbDialect.sql_sample(self))
    }
}

impl Display for Query {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.write_str(&DuckDbDialect.sql_query(self))
    }
}

impl Display for SelectQuery {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.write_str(&DuckDbDialect.sql_select_query(self))
    }
}

impl Display for SetOperation {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.write_str(&DuckDbDialect.sql_set_operation(self))
    }
}

impl Display for DescribeQuery {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.write_str(&DuckDbDialect.sql_describe(self))
    }
}

#[cfg(test)]
mod test {
    use insta::assert_snapshot;

    use super::*;
    use crate::functions::*;

    #[test]
    fn literals() {
        assert_snapshot!(literal(true).to_string(), @"TRUE");
        assert_snapshot!(literal(5.2).to_string(), @"5.2");
        assert_snapshot!(literal("ab'c").to_string(), @"'ab''c'");
        assert_snapshot!(Expr::Literal(Literal::Null).to_string(), @"NULL");
        assert_snapshot!(literal(f64::NAN).to_string(), @"NULL");
        assert_snapshot!(literal(f64::INFINITY).to_string(), @"NULL");
    }

    #[test]
    fn date_literals() {
        let date = chrono::NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();
        assert_snapshot!(Expr::Literal(Literal::Date(date)).to_string(), @"DATE '2020-1-1'");

        let ts = chrono::DateTime::from_timestamp_millis(1577836800000).unwrap();
        assert_snapshot!(Expr::Literal(Literal::Timestamp(ts)).to_string(), @"epoch_ms(1577836800000)");
    }

    #[test]
    fn columns_and_quoting() {
        assert_snapshot!(column("foo").to_string(), @r#""foo""#);
        assert_snapshot!(column("a.b.c").to_string(), @r#""a"."b"."c""#);
        assert_snapshot!(column("*").to_string(), @"*");
    }

    #[test]
    fn operators_parenthesize() {
        assert_snapshot!(gt(column("foo"), literal(5)).to_string(), @r#"("foo" > 5)"#);
        assert_snapshot!(not(column("done")).to_string(), @r#"(NOT "done")"#);
        assert_snapshot!(is_null(column("foo")).to_string(), @r#"("foo" IS NULL)"#);
        assert_snapshot!(pow(column("a"), literal(2)).to_string(), @r#"("a" ** 2)"#);
        assert_snapshot!(neq(column("a"), column("b")).to_string(), @r#"("a" <> "b")"#);
    }

    #[test]
    fn logical_flattening() {
        assert_snapshot!(and(Vec::<Expr>::new()).to_string(), @"");
        assert_snapshot!(and([gt(column("a"), literal(1))]).to_string(), @r#"("a" > 1)"#);
        assert_snapshot!(
            or([is_null(column("a")), is_null(column("b"))]).to_string(),
            @r#"(("a" IS NULL) OR ("b" IS NULL))"#
        );
    }

    #[test]
    fn between_variants() {
        let extent = (literal(0), literal(1));
        assert_snapshot!(is_between(column("a"), extent.clone()).to_string(), @r#"("a" BETWEEN 0 AND 1)"#);
        assert_snapshot!(is_not_between(column("a"), extent.clone()).to_string(), @r#"("a" NOT BETWEEN 0 AND 1)"#);
        assert_snapshot!(is_between_exclusive(column("a"), extent.clone()).to_string(), @r#"(0 <= "a" AND "a" < 1)"#);
        assert_snapshot!(is_not_between_exclusive(column("a"), extent).to_string(), @r#"NOT (0 <= "a" AND "a" < 1)"#);
    }

    #[test]
    fn casts_and_intervals() {
        assert_snapshot!(float64(literal(10)).to_string(), @"(10)::DOUBLE");
        assert_snapshot!(int32(column("foo")).to_string(), @r#"("foo")::INTEGER"#);
        assert_snapshot!(years(2).to_string(), @"INTERVAL 2 year");
    }

    #[test]
    fn case_expressions() {
        let case = crate::ast::CaseExpr::new()
            .when(gt(column("a"), literal(0)), literal(1))
            .else_(literal(0));
        assert_snapshot!(Expr::Case(case).to_string(), @r#"CASE WHEN ("a" > 0) THEN 1 ELSE 0 END"#);
    }

    #[test]
    fn aggregates() {
        assert_snapshot!(count().to_string(), @"count(*)");
        assert_snapshot!(sum(column("foo")).to_string(), @r#"sum("foo")"#);
        assert_snapshot!(avg(column("foo")).distinct().to_string(), @r#"avg(DISTINCT "foo")"#);
        assert_snapshot!(
            avg(column("foo")).where_(gt(column("bar"), literal(5))).to_string(),
            @r#"avg("foo") FILTER (WHERE ("bar" > 5))"#
        );
        assert_snapshot!(
            first(column("foo")).arg_order([asc(column("bar"))]).to_string(),
            @r#"first("foo" ORDER BY "bar" ASC)"#
        );
        assert_snapshot!(count().distinct().to_string(), @"count(DISTINCT *)");
        assert_snapshot!(
            crate::functions::agg_fn("grouping", Vec::<Expr>::new())
                .arg_order([asc(column("bar"))])
                .to_string(),
            @r#"grouping(ORDER BY "bar" ASC)"#
        );
    }

    #[test]
    fn windows() {
        assert_snapshot!(
            sum(column("foo")).partitionby([column("baz")]).orderby([column("bop")]).to_string(),
            @r#"sum("foo") OVER (PARTITION BY "baz" ORDER BY "bop")"#
        );
        assert_snapshot!(row_number().over("win").to_string(), @r#"row_number() OVER "win""#);
        assert_snapshot!(
            lead(column("x")).ignore_nulls().over("sw").to_string(),
            @r#"lead("x" IGNORE NULLS) OVER "sw""#
        );
    }

    #[test]
    fn window_frames() {
        use crate::ast::{FrameExtent, WindowExpr};
        let framed: WindowExpr = sum(column("foo"))
            .frame(frame_rows(FrameExtent::from((Some(0.0), None))));
        assert_snapshot!(
            framed.to_string(),
            @r#"sum("foo") OVER (ROWS BETWEEN CURRENT ROW AND UNBOUNDED FOLLOWING)"#
        );
        let preceding: WindowExpr = sum(column("foo"))
            .frame(frame_rows(FrameExtent::from((Some(2.0), Some(0.0)))));
        assert_snapshot!(
            preceding.to_string(),
            @r#"sum("foo") OVER (ROWS BETWEEN 2 PRECEDING AND CURRENT ROW)"#
        );
    }

    #[test]
    fn sort_expressions() {
        assert_snapshot!(asc(column("foo")).to_string(), @r#""foo" ASC"#);
        assert_snapshot!(desc(column("foo")).to_string(), @r#""foo" DESC"#);
        assert_snapshot!(asc_nulls_first(column("foo")).to_string(), @r#""foo" ASC NULLS FIRST"#);
        assert_snapshot!(desc_nulls_last(column("foo")).to_string(), @r#""foo" DESC NULLS LAST"#);
    }
}
