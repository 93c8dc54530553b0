use std::sync::{Arc, RwLock};

use chrono::{DateTime, NaiveDate, Utc};
use enum_as_inner::EnumAsInner;
use serde::{Deserialize, Serialize};

use super::{AggregateExpr, Query, WindowExpr};

/// A SQL expression. The set of node kinds is closed: the traversal and
/// generation kernels match exhaustively, so adding a variant is a compile
/// error until every kernel handles it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, EnumAsInner)]
pub enum Expr {
    Literal(Literal),
    Column(ColumnRef),
    /// A dynamic scalar value; serializes its current snapshot.
    Param(Param),
    /// A dynamic column name; serializes as a quoted identifier.
    ColumnParam(Param),
    /// Raw SQL text, emitted as-is.
    Verbatim(String),
    /// Interpolated template pieces, concatenated without separators.
    Fragment(Vec<Expr>),
    Unary {
        op: UnaryOp,
        expr: Box<Expr>,
    },
    UnaryPostfix {
        op: PostfixOp,
        expr: Box<Expr>,
    },
    Binary {
        op: BinaryOp,
        lhs: Box<Expr>,
        rhs: Box<Expr>,
    },
    /// Variadic AND / OR over any number of clauses.
    Logical {
        op: LogicalOp,
        clauses: Vec<Expr>,
    },
    Between(BetweenExpr),
    In {
        expr: Box<Expr>,
        values: Vec<Expr>,
    },
    Case(CaseExpr),
    Cast {
        expr: Box<Expr>,
        r#type: String,
    },
    Collate {
        expr: Box<Expr>,
        collation: String,
    },
    Function {
        name: String,
        args: Vec<Expr>,
    },
    Aggregate(AggregateExpr),
    Window(WindowExpr),
    Interval(IntervalExpr),
    /// An order-by entry; only meaningful inside ordering lists.
    Sort(SortExpr),
    /// A scalar subquery, parenthesized on output.
    Subquery(Box<Query>),
}

/// A constant value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, EnumAsInner)]
pub enum Literal {
    Null,
    Boolean(bool),
    Int(i64),
    Float(f64),
    String(String),
    Date(NaiveDate),
    Timestamp(DateTime<Utc>),
}

/// A column reference with an optional table qualifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnRef {
    pub table: Option<TableRef>,
    pub column: String,
}

impl ColumnRef {
    pub fn new(column: impl Into<String>) -> Self {
        ColumnRef {
            table: None,
            column: column.into(),
        }
    }

    /// Parse a dotted path: the last segment is the column, the rest the
    /// table qualifier. `a.b.c` refers to column `c` of table `a.b`.
    pub fn parse(path: &str) -> Self {
        let mut parts: Vec<&str> = path.split('.').collect();
        let column = parts.pop().unwrap_or_default().to_string();
        let table = if parts.is_empty() {
            None
        } else {
            Some(TableRef::new(parts))
        };
        ColumnRef { table, column }
    }
}

/// A (possibly schema-qualified) table name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableRef {
    pub path: Vec<String>,
}

impl TableRef {
    pub fn new<I, S>(path: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        TableRef {
            path: path.into_iter().map(Into::into).collect(),
        }
    }

    /// The unqualified table name (the last path segment).
    pub fn name(&self) -> &str {
        self.path.last().map(String::as_str).unwrap_or_default()
    }
}

impl From<&str> for TableRef {
    fn from(name: &str) -> Self {
        TableRef::new(name.split('.'))
    }
}

impl From<String> for TableRef {
    fn from(name: String) -> Self {
        TableRef::from(name.as_str())
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, strum::Display, strum::EnumString,
)]
pub enum BinaryOp {
    #[strum(to_string = "+")]
    Add,
    #[strum(to_string = "-")]
    Sub,
    #[strum(to_string = "*")]
    Mul,
    #[strum(to_string = "/")]
    Div,
    #[strum(to_string = "//")]
    IntDiv,
    #[strum(to_string = "%")]
    Mod,
    #[strum(to_string = "**")]
    Pow,
    #[strum(to_string = "&")]
    BitAnd,
    #[strum(to_string = "|")]
    BitOr,
    #[strum(to_string = "<<")]
    BitLeft,
    #[strum(to_string = ">>")]
    BitRight,
    #[strum(to_string = "=")]
    Eq,
    #[strum(to_string = "<>")]
    Ne,
    #[strum(to_string = "<")]
    Lt,
    #[strum(to_string = ">")]
    Gt,
    #[strum(to_string = "<=")]
    Le,
    #[strum(to_string = ">=")]
    Ge,
    #[strum(to_string = "IS DISTINCT FROM")]
    IsDistinct,
    #[strum(to_string = "IS NOT DISTINCT FROM")]
    IsNotDistinct,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, strum::Display, strum::EnumString,
)]
pub enum UnaryOp {
    #[strum(to_string = "NOT")]
    Not,
    #[strum(to_string = "-")]
    Neg,
    #[strum(to_string = "~")]
    BitNot,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, strum::Display, strum::EnumString,
)]
pub enum PostfixOp {
    #[strum(to_string = "IS NULL")]
    IsNull,
    #[strum(to_string = "IS NOT NULL")]
    IsNotNull,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, strum::Display, strum::EnumString,
)]
pub enum LogicalOp {
    #[strum(to_string = "AND")]
    And,
    #[strum(to_string = "OR")]
    Or,
}

/// A range predicate. The exclusive form lowers to a half-open comparison
/// pair instead of SQL `BETWEEN`, which is inclusive on both ends.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BetweenExpr {
    pub expr: Box<Expr>,
    pub extent: Option<(Box<Expr>, Box<Expr>)>,
    pub negated: bool,
    pub exclusive: bool,
}

/// A CASE expression. `when` and `else_` derive new nodes; existing case
/// values are never mutated in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaseExpr {
    pub base: Option<Box<Expr>>,
    pub whens: Vec<WhenExpr>,
    pub else_: Option<Box<Expr>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WhenExpr {
    pub when: Expr,
    pub then: Expr,
}

impl CaseExpr {
    pub fn new() -> Self {
        CaseExpr {
            base: None,
            whens: vec![],
            else_: None,
        }
    }

    pub fn with_base(base: impl Into<Expr>) -> Self {
        CaseExpr {
            base: Some(Box::new(base.into())),
            ..CaseExpr::new()
        }
    }

    /// Derive a new case with an additional WHEN/THEN branch.
    pub fn when(&self, when: impl Into<Expr>, then: impl Into<Expr>) -> Self {
        let mut derived = self.clone();
        derived.whens.push(WhenExpr {
            when: when.into(),
            then: then.into(),
        });
        derived
    }

    /// Derive a new case with the given ELSE value.
    pub fn else_(&self, value: impl Into<Expr>) -> Self {
        let mut derived = self.clone();
        derived.else_ = Some(Box::new(value.into()));
        derived
    }
}

impl Default for CaseExpr {
    fn default() -> Self {
        CaseExpr::new()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntervalExpr {
    pub unit: String,
    pub steps: f64,
}

impl IntervalExpr {
    pub fn new(unit: impl Into<String>, steps: f64) -> Self {
        IntervalExpr {
            unit: unit.into(),
            steps,
        }
    }
}

/// An order-by entry: an expression with optional direction and null
/// ordering. Both default to the dialect's behavior when unset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SortExpr {
    pub expr: Box<Expr>,
    pub desc: Option<bool>,
    pub nulls_first: Option<bool>,
}

impl SortExpr {
    pub fn new(expr: impl Into<Expr>, desc: Option<bool>, nulls_first: Option<bool>) -> Self {
        SortExpr {
            expr: Box::new(expr.into()),
            desc,
            nulls_first,
        }
    }
}

/// A shared dynamic value. Updating a param changes the output of every
/// expression holding it; serialization always reflects the snapshot at
/// generation time. Identity is by allocation, so the same param used in
/// several places collects once.
#[derive(Debug, Clone)]
pub struct Param {
    value: Arc<RwLock<Expr>>,
}

impl Param {
    pub fn new(value: impl Into<Expr>) -> Self {
        Param {
            value: Arc::new(RwLock::new(value.into())),
        }
    }

    /// A snapshot of the current value.
    pub fn value(&self) -> Expr {
        self.read().clone()
    }

    pub fn update(&self, value: impl Into<Expr>) {
        *self
            .value
            .write()
            .unwrap_or_else(|err| err.into_inner()) = value.into();
    }

    /// Allocation identity, used to de-duplicate collected params.
    pub fn same(&self, other: &Param) -> bool {
        Arc::ptr_eq(&self.value, &other.value)
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, Expr> {
        self.value.read().unwrap_or_else(|err| err.into_inner())
    }
}

impl PartialEq for Param {
    fn eq(&self, other: &Self) -> bool {
        self.same(other) || *self.read() == *other.read()
    }
}

impl Serialize for Param {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.read().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Param {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(Param::new(Expr::deserialize(deserializer)?))
    }
}

// Bare strings coerce to column references; use `literal` for string values.
impl From<&str> for Expr {
    fn from(name: &str) -> Self {
        Expr::Column(ColumnRef::parse(name))
    }
}

impl From<String> for Expr {
    fn from(name: String) -> Self {
        Expr::from(name.as_str())
    }
}

impl From<Literal> for Expr {
    fn from(value: Literal) -> Self {
        Expr::Literal(value)
    }
}

impl From<Param> for Expr {
    fn from(param: Param) -> Self {
        Expr::Param(param)
    }
}

impl From<AggregateExpr> for Expr {
    fn from(agg: AggregateExpr) -> Self {
        Expr::Aggregate(agg)
    }
}

impl From<WindowExpr> for Expr {
    fn from(window: WindowExpr) -> Self {
        Expr::Window(window)
    }
}

impl From<CaseExpr> for Expr {
    fn from(case: CaseExpr) -> Self {
        Expr::Case(case)
    }
}

impl From<SortExpr> for Expr {
    fn from(sort: SortExpr) -> Self {
        Expr::Sort(sort)
    }
}

impl From<Query> for Expr {
    fn from(query: Query) -> Self {
        Expr::Subquery(Box::new(query))
    }
}

impl From<bool> for Literal {
    fn from(value: bool) -> Self {
        Literal::Boolean(value)
    }
}

impl From<i32> for Literal {
    fn from(value: i32) -> Self {
        Literal::Int(value as i64)
    }
}

impl From<i64> for Literal {
    fn from(value: i64) -> Self {
        Literal::Int(value)
    }
}

impl From<f64> for Literal {
    fn from(value: f64) -> Self {
        Literal::Float(value)
    }
}

impl From<&str> for Literal {
    fn from(value: &str) -> Self {
        Literal::String(value.to_string())
    }
}

impl From<String> for Literal {
    fn from(value: String) -> Self {
        Literal::String(value)
    }
}

impl From<NaiveDate> for Literal {
    fn from(value: NaiveDate) -> Self {
        Literal::Date(value)
    }
}

impl From<DateTime<Utc>> for Literal {
    fn from(value: DateTime<Utc>) -> Self {
        Literal::Timestamp(value)
    }
}

impl From<bool> for Expr {
    fn from(value: bool) -> Self {
        Expr::Literal(value.into())
    }
}

impl From<i32> for Expr {
    fn from(value: i32) -> Self {
        Expr::Literal(value.into())
    }
}

impl From<i64> for Expr {
    fn from(value: i64) -> Self {
        Expr::Literal(value.into())
    }
}

impl From<f64> for Expr {
    fn from(value: f64) -> Self {
        Expr::Literal(value.into())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn parse_column_paths() {
        assert_eq!(ColumnRef::parse("foo"), ColumnRef::new("foo"));

        let col = ColumnRef::parse("a.b.c");
        assert_eq!(col.column, "c");
        assert_eq!(col.table, Some(TableRef::new(["a", "b"])));
    }

    #[test]
    fn params_share_state() {
        let param = Param::new(5);
        let a = Expr::Param(param.clone());
        param.update(10);
        assert_eq!(a, Expr::Param(Param::new(10)));
        assert!(param.same(&param.clone()));
        assert!(!param.same(&Param::new(10)));
    }

    #[test]
    fn case_derives_are_persistent() {
        let base = CaseExpr::new().when(Expr::from("a"), 1);
        let extended = base.when(Expr::from("b"), 2);
        assert_eq!(base.whens.len(), 1);
        assert_eq!(extended.whens.len(), 2);
    }
}
