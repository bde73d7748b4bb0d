//! # portsql-core
//!
//! A portable SQL query builder: a typed relational IR with compilers for
//! PostgreSQL, MySQL, and SQLite. A query is built once and compiles to
//! bit-exact, dialect-correct SQL plus the ordered list of parameter names
//! the caller binds to driver placeholders.
//!
//! ## Building and compiling
//!
//! ```rust
//! use portsql_core::ast::{Column, LogicalType};
//! use portsql_core::ast::expression::param;
//! use portsql_core::builder::from;
//! use portsql_core::compiler::compile;
//! use portsql_core::dialect::Postgres;
//!
//! let id = Column::new("authors", "id", LogicalType::Int64);
//! let query = from("authors")
//!     .columns([id.clone()])
//!     .where_clause(id.eq(param("id", LogicalType::Int64)))
//!     .build();
//!
//! let (sql, params) = compile(&query, &Postgres).unwrap();
//! assert_eq!(
//!     sql,
//!     r#"SELECT "authors"."id" FROM "authors" WHERE ("authors"."id" = $1)"#
//! );
//! assert_eq!(params, vec!["id"]);
//! ```
//!
//! The same IR compiles for every dialect; only the formatting changes:
//!
//! ```rust
//! use portsql_core::ast::{Column, LogicalType};
//! use portsql_core::builder::from;
//! use portsql_core::compiler::compile;
//! use portsql_core::dialect::MySql;
//!
//! let email = Column::new("users", "email", LogicalType::String);
//! let query = from("users").columns([email.clone()]).order_by(email.desc()).build();
//!
//! let (sql, _) = compile(&query, &MySql).unwrap();
//! assert_eq!(
//!     sql,
//!     "SELECT `users`.`email` FROM `users` ORDER BY `users`.`email` COLLATE utf8mb4_bin DESC"
//! );
//! ```
//!
//! ## Parameter binding
//!
//! Placeholders are positional. PostgreSQL numbers them `$1…$N` across the
//! whole statement, including subqueries, CTE bodies, and set-operation
//! branches; MySQL and SQLite use `?` and bind left to right. The returned
//! parameter list names the binding for each position, repeating names that
//! occur more than once.

pub mod ast;
pub mod builder;
pub mod compiler;
pub mod dialect;
pub mod error;
pub mod registry;
pub mod validate;
pub mod walker;

pub use ast::{Column, Expr, LogicalType, Param, Query, QueryKind};
pub use builder::{delete, from, insert_into, update, with, with_columns};
pub use compiler::compile;
pub use dialect::{Dialect, MySql, Postgres, Sqlite};
pub use error::{QueryError, Result};
pub use registry::{
    ReturnCardinality, clear, count, define_exec, define_many, define_one, define_query,
    get_registered,
};
pub use validate::validate;
pub use walker::{collect_param_order, collect_params, has_subqueries, walk_expressions};
