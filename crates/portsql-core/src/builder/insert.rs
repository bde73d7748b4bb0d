//! INSERT builder.

use crate::ast::{Column, Expr, InsertQuery, Query, TableRef};

/// Builds an INSERT query.
#[derive(Debug, Clone)]
pub struct InsertBuilder {
    query: InsertQuery,
}

impl InsertBuilder {
    pub(crate) fn new(table: TableRef) -> Self {
        Self {
            query: InsertQuery {
                table,
                columns: vec![],
                values: vec![],
                returning: vec![],
            },
        }
    }

    /// Appends insert columns.
    #[must_use]
    pub fn columns<I: IntoIterator<Item = Column>>(mut self, cols: I) -> Self {
        self.query.columns.extend(cols);
        self
    }

    /// Appends value expressions, one per column.
    #[must_use]
    pub fn values<I>(mut self, values: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Expr>,
    {
        self.query.values.extend(values.into_iter().map(Into::into));
        self
    }

    /// Appends a single column/value pair.
    #[must_use]
    pub fn value(mut self, column: Column, value: impl Into<Expr>) -> Self {
        self.query.columns.push(column);
        self.query.values.push(value.into());
        self
    }

    /// Appends RETURNING columns.
    ///
    /// The clause is emitted only on dialects that support it; on MySQL it
    /// is dropped and callers read generated keys through the driver's
    /// last-insert-id affordance.
    #[must_use]
    pub fn returning<I: IntoIterator<Item = Column>>(mut self, cols: I) -> Self {
        self.query.returning.extend(cols);
        self
    }

    /// Finishes the builder, producing the immutable IR.
    #[must_use]
    pub fn build(self) -> Query {
        Query::Insert(self.query)
    }
}

impl From<InsertBuilder> for Query {
    fn from(builder: InsertBuilder) -> Self {
        builder.build()
    }
}
