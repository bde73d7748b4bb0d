//! Fluent builders producing query IR values.
//!
//! Builders are thin syntactic layers: they only assemble the IR. All
//! semantic checks run in [`crate::validate`] when the query is compiled,
//! so a query assembled by hand is treated exactly like a built one.
//!
//! Appender methods (`columns`, `join`, `order_by`, `set`, …) accumulate;
//! optional setters (`where_clause`, `having`, `limit`, `offset`) replace
//! on repeated calls.

mod compound;
mod cte;
mod delete;
mod insert;
mod select;
mod update;

pub use compound::CompoundBuilder;
pub use cte::CteBuilder;
pub use delete::DeleteBuilder;
pub use insert::InsertBuilder;
pub use select::SelectBuilder;
pub use update::UpdateBuilder;

use crate::ast::{Query, TableRef};

/// Starts a SELECT query over a table.
#[must_use]
pub fn from(table: impl Into<TableRef>) -> SelectBuilder {
    SelectBuilder::new(table.into(), vec![])
}

/// Starts an INSERT query into a table.
#[must_use]
pub fn insert_into(table: impl Into<TableRef>) -> InsertBuilder {
    InsertBuilder::new(table.into())
}

/// Starts an UPDATE query against a table.
#[must_use]
pub fn update(table: impl Into<TableRef>) -> UpdateBuilder {
    UpdateBuilder::new(table.into())
}

/// Starts a DELETE query against a table.
#[must_use]
pub fn delete(table: impl Into<TableRef>) -> DeleteBuilder {
    DeleteBuilder::new(table.into())
}

/// Starts a WITH clause with a first named CTE.
#[must_use]
pub fn with(name: impl Into<String>, query: impl Into<Query>) -> CteBuilder {
    CteBuilder::new(name.into(), vec![], query.into())
}

/// Starts a WITH clause with a first CTE carrying explicit column names.
#[must_use]
pub fn with_columns<I>(name: impl Into<String>, columns: I, query: impl Into<Query>) -> CteBuilder
where
    I: IntoIterator,
    I::Item: Into<String>,
{
    CteBuilder::new(
        name.into(),
        columns.into_iter().map(Into::into).collect(),
        query.into(),
    )
}
