//! Set-operation builder.

use crate::ast::{CompoundQuery, Expr, OrderByItem, Query, SetOpKind};

/// Builds a set operation (UNION / UNION ALL / INTERSECT / EXCEPT) over two
/// queries, with ORDER BY / LIMIT / OFFSET applying to the combined result.
///
/// Chaining a further set operation wraps the current compound as the left
/// branch of the next, so chains associate to the left.
#[derive(Debug, Clone)]
pub struct CompoundBuilder {
    query: CompoundQuery,
}

impl CompoundBuilder {
    pub(crate) fn new(query: CompoundQuery) -> Self {
        Self { query }
    }

    fn chain(self, op: SetOpKind, other: impl Into<Query>) -> Self {
        Self {
            query: CompoundQuery {
                ctes: vec![],
                left: Box::new(Query::Compound(self.query)),
                op,
                right: Box::new(other.into()),
                order_by: vec![],
                limit: None,
                offset: None,
            },
        }
    }

    /// Chains a UNION with another query.
    #[must_use]
    pub fn union(self, other: impl Into<Query>) -> Self {
        self.chain(SetOpKind::Union, other)
    }

    /// Chains a UNION ALL with another query.
    #[must_use]
    pub fn union_all(self, other: impl Into<Query>) -> Self {
        self.chain(SetOpKind::UnionAll, other)
    }

    /// Chains an INTERSECT with another query.
    #[must_use]
    pub fn intersect(self, other: impl Into<Query>) -> Self {
        self.chain(SetOpKind::Intersect, other)
    }

    /// Chains an EXCEPT with another query.
    #[must_use]
    pub fn except(self, other: impl Into<Query>) -> Self {
        self.chain(SetOpKind::Except, other)
    }

    /// Appends an ORDER BY entry over the combined result.
    #[must_use]
    pub fn order_by(mut self, item: OrderByItem) -> Self {
        self.query.order_by.push(item);
        self
    }

    /// Sets the LIMIT over the combined result, replacing any previous one.
    #[must_use]
    pub fn limit(mut self, expr: impl Into<Expr>) -> Self {
        self.query.limit = Some(expr.into());
        self
    }

    /// Sets the OFFSET over the combined result, replacing any previous one.
    #[must_use]
    pub fn offset(mut self, expr: impl Into<Expr>) -> Self {
        self.query.offset = Some(expr.into());
        self
    }

    /// Finishes the builder, producing the immutable IR.
    #[must_use]
    pub fn build(self) -> Query {
        Query::Compound(self.query)
    }
}

impl From<CompoundBuilder> for Query {
    fn from(builder: CompoundBuilder) -> Self {
        builder.build()
    }
}
