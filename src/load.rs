//! SQL generation for loading data into DuckDB: CREATE statements over
//! file readers and literal-values relations.

use itertools::Itertools;

use crate::ast::Literal;
use crate::error::{Error, Result};

/// Options for table and view creation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CreateOptions {
    /// Create a view instead of a table.
    pub view: bool,
    /// Create a temporary table or view.
    pub temp: bool,
    /// Replace an existing relation of the same name. Without this flag
    /// creation is skipped if the relation already exists.
    pub replace: bool,
}

/// Options for loading a file into a table.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoadOptions {
    /// Columns to select from the file. Defaults to `*`.
    pub select: Vec<String>,
    /// An optional filter over the file contents, as raw SQL.
    pub where_: Option<String>,
    pub create: CreateOptions,
    /// Additional parameters passed to the file reader function.
    pub params: Vec<(String, LoadParam)>,
}

/// A parameter value for a DuckDB file reader function.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadParam {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    List(Vec<LoadParam>),
    Struct(Vec<(String, LoadParam)>),
}

impl std::fmt::Display for LoadParam {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            LoadParam::Null => write!(f, "NULL"),
            LoadParam::Bool(b) => write!(f, "{b}"),
            LoadParam::Int(i) => write!(f, "{i}"),
            LoadParam::Float(v) => write!(f, "{v}"),
            LoadParam::String(s) => write!(f, "'{s}'"),
            LoadParam::List(items) => {
                write!(f, "[{}]", items.iter().map(|i| i.to_string()).join(", "))
            }
            LoadParam::Struct(fields) => write!(
                f,
                "{{{}}}",
                fields.iter().map(|(k, v)| format!("'{k}': {v}")).join(", ")
            ),
        }
    }
}

impl From<bool> for LoadParam {
    fn from(value: bool) -> Self {
        LoadParam::Bool(value)
    }
}

impl From<i64> for LoadParam {
    fn from(value: i64) -> Self {
        LoadParam::Int(value)
    }
}

impl From<&str> for LoadParam {
    fn from(value: &str) -> Self {
        LoadParam::String(value.to_string())
    }
}

/// Generate a CREATE statement defining `name` as the result of `query`.
pub fn create(name: &str, query: impl std::fmt::Display, options: &CreateOptions) -> String {
    let replace = if options.replace { " OR REPLACE" } else { "" };
    let temp = if options.temp { "TEMP " } else { "" };
    let kind = if options.view { "VIEW" } else { "TABLE" };
    let exists = if options.replace { "" } else { " IF NOT EXISTS" };
    format!("CREATE{replace} {temp}{kind}{exists} {name} AS {query}")
}

/// Generate a statement loading a file into `table` via the given DuckDB
/// reader function (`read_csv`, `read_json`, `read_parquet`, ...).
/// Entries in `defaults` apply unless overridden in the options.
pub fn load(
    method: &str,
    table: &str,
    file: &str,
    options: &LoadOptions,
    defaults: &[(&str, LoadParam)],
) -> String {
    let mut params: Vec<(String, LoadParam)> = defaults
        .iter()
        .filter(|(key, _)| options.params.iter().all(|(k, _)| k != key))
        .map(|(key, value)| (key.to_string(), value.clone()))
        .collect();
    params.extend(options.params.iter().cloned());

    let params = params
        .iter()
        .map(|(key, value)| format!("{key}={value}"))
        .join(", ");
    let read = if params.is_empty() {
        format!("{method}('{file}')")
    } else {
        format!("{method}('{file}', {params})")
    };

    let select = if options.select.is_empty() {
        "*".to_string()
    } else {
        options.select.join(", ")
    };
    let filter = match &options.where_ {
        Some(where_) => format!(" WHERE {where_}"),
        None => String::new(),
    };
    let query = format!("SELECT {select} FROM {read}{filter}");
    create(table, query, &options.create)
}

/// Load a CSV file, detecting column types over the full file contents.
pub fn load_csv(table: &str, file: &str, options: &LoadOptions) -> String {
    load(
        "read_csv",
        table,
        file,
        options,
        &[
            ("auto_detect", LoadParam::Bool(true)),
            ("sample_size", LoadParam::Int(-1)),
        ],
    )
}

/// Load a JSON file, detecting both the layout and column types.
pub fn load_json(table: &str, file: &str, options: &LoadOptions) -> String {
    load(
        "read_json",
        table,
        file,
        options,
        &[
            ("auto_detect", LoadParam::Bool(true)),
            ("json_format", LoadParam::from("auto")),
        ],
    )
}

/// Load a Parquet file.
pub fn load_parquet(table: &str, file: &str, options: &LoadOptions) -> String {
    load("read_parquet", table, file, options, &[])
}

/// Load an in-memory sequence of rows into a table. Each row is a list
/// of column name and literal value pairs; column order follows the
/// first row.
pub fn load_objects(
    table: &str,
    data: &[Vec<(String, Literal)>],
    options: &LoadOptions,
) -> Result<String> {
    let values = sql_from(data)?;
    let query = if options.select.is_empty() || options.select == ["*"] {
        values
    } else {
        format!("SELECT {} FROM {}", options.select.join(", "), values)
    };
    Ok(create(table, query, &options.create))
}

/// Build a literal-values relation: one SELECT of aliased literals per
/// row, chained with UNION ALL. The column set is taken from the first
/// row and must not be empty.
pub fn sql_from(data: &[Vec<(String, Literal)>]) -> Result<String> {
    let columns: Vec<&String> = data
        .first()
        .map(|row| row.iter().map(|(name, _)| name).collect())
        .unwrap_or_default();
    if columns.is_empty() {
        return Err(Error::invalid_query(
            "can not create a table from an empty column set",
        ));
    }

    let rows = data
        .iter()
        .map(|row| {
            let fields = columns
                .iter()
                .map(|col| {
                    let value = row
                        .iter()
                        .find(|(name, _)| name == *col)
                        .map(|(_, value)| value.clone())
                        .unwrap_or(Literal::Null);
                    format!("{value} AS \"{col}\"")
                })
                .join(", ");
            format!("(SELECT {fields})")
        })
        .join(" UNION ALL ");
    Ok(rows)
}
