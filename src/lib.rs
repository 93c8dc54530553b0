//! # vizsql
//!
//! Typed SQL query construction and analytic SQL generation for
//! visualization workloads, targeting DuckDB.
//!
//! The crate is organized in layers:
//!
//! - [`ast`] defines the expression and query syntax trees, with fluent
//!   builders for SELECT queries, set operations, aggregates, and window
//!   functions.
//! - [`functions`] provides free constructor functions (`column`, `sum`,
//!   `add`, ...) for assembling expressions.
//! - [`codegen`] serializes trees to SQL text through the
//!   [`codegen::SqlDialect`] trait; every node also implements `Display`
//!   using the DuckDB dialect.
//! - [`visit`] and [`fold`] are the traversal kernel: read-only walks,
//!   expression collection, and rewriting folds.
//! - [`transforms`] generates analytic queries: histogram and linear
//!   binning, M4 downsampling, line density rasterization, scale
//!   transforms, and filter pushdown.
//! - [`load`] generates CREATE statements for loading files and
//!   in-memory data.
//!
//! ## Example
//!
//! ```
//! use vizsql::ast::Query;
//! use vizsql::functions::{column, gt};
//!
//! let q = Query::select(["foo", "bar"])
//!     .from(["data"])
//!     .where_(gt(column("foo"), 5));
//! assert_eq!(
//!     q.to_string(),
//!     r#"SELECT "foo", "bar" FROM "data" WHERE ("foo" > 5)"#
//! );
//! ```

pub mod ast;
pub mod codegen;
mod error;
pub mod fold;
pub mod functions;
pub mod load;
pub mod transforms;
pub mod visit;

pub use error::{Error, ErrorKind, Result};
