//! UPDATE builder.

use crate::ast::{Assignment, Column, Expr, Query, TableRef, UpdateQuery};

/// Builds an UPDATE query.
#[derive(Debug, Clone)]
pub struct UpdateBuilder {
    query: UpdateQuery,
}

impl UpdateBuilder {
    pub(crate) fn new(table: TableRef) -> Self {
        Self {
            query: UpdateQuery {
                table,
                set: vec![],
                where_clause: None,
            },
        }
    }

    /// Appends a SET assignment.
    #[must_use]
    pub fn set(mut self, column: Column, value: impl Into<Expr>) -> Self {
        self.query.set.push(Assignment {
            column,
            value: value.into(),
        });
        self
    }

    /// Sets the WHERE condition, replacing any previous one.
    #[must_use]
    pub fn where_clause(mut self, expr: impl Into<Expr>) -> Self {
        self.query.where_clause = Some(expr.into());
        self
    }

    /// Finishes the builder, producing the immutable IR.
    #[must_use]
    pub fn build(self) -> Query {
        Query::Update(self.query)
    }
}

impl From<UpdateBuilder> for Query {
    fn from(builder: UpdateBuilder) -> Self {
        builder.build()
    }
}
