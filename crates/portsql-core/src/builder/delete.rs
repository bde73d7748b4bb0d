//! DELETE builder.

use crate::ast::{DeleteQuery, Expr, Query, TableRef};

/// Builds a DELETE query.
#[derive(Debug, Clone)]
pub struct DeleteBuilder {
    query: DeleteQuery,
}

impl DeleteBuilder {
    pub(crate) fn new(table: TableRef) -> Self {
        Self {
            query: DeleteQuery {
                table,
                where_clause: None,
            },
        }
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
        Query::Delete(self.query)
    }
}

impl From<DeleteBuilder> for Query {
    fn from(builder: DeleteBuilder) -> Self {
        builder.build()
    }
}
