//! SELECT builder.

use crate::ast::{
    Column, CompoundQuery, Cte, Expr, Join, JoinType, OrderByItem, Query, SelectItem, SelectQuery,
    SetOpKind, TableRef,
};

use super::compound::CompoundBuilder;

/// Builds a SELECT query.
#[derive(Debug, Clone)]
pub struct SelectBuilder {
    query: SelectQuery,
}

impl SelectBuilder {
    pub(crate) fn new(from: TableRef, ctes: Vec<Cte>) -> Self {
        let mut query = SelectQuery::new(from);
        query.ctes = ctes;
        Self { query }
    }

    /// Selects DISTINCT rows.
    #[must_use]
    pub fn distinct(mut self) -> Self {
        self.query.distinct = true;
        self
    }

    /// Appends plain columns to the select list.
    #[must_use]
    pub fn columns<I: IntoIterator<Item = Column>>(mut self, cols: I) -> Self {
        self.query
            .columns
            .extend(cols.into_iter().map(SelectItem::from));
        self
    }

    /// Appends an expression to the select list.
    #[must_use]
    pub fn expr(mut self, expr: impl Into<Expr>) -> Self {
        self.query.columns.push(SelectItem::new(expr));
        self
    }

    /// Appends an aliased expression to the select list.
    #[must_use]
    pub fn expr_as(mut self, expr: impl Into<Expr>, alias: impl Into<String>) -> Self {
        self.query.columns.push(SelectItem::aliased(expr, alias));
        self
    }

    /// Appends a JSON-array-of-objects aggregation, aliased by `field`.
    #[must_use]
    pub fn select_json_agg<I>(mut self, field: impl Into<String>, cols: I) -> Self
    where
        I: IntoIterator<Item = Column>,
    {
        let field = field.into();
        let agg = Expr::JsonAgg {
            field: field.clone(),
            columns: cols.into_iter().collect(),
        };
        self.query.columns.push(SelectItem::aliased(agg, field));
        self
    }

    fn push_join(mut self, join_type: JoinType, table: impl Into<TableRef>, on: Expr) -> Self {
        self.query.joins.push(Join {
            join_type,
            table: table.into(),
            on,
        });
        self
    }

    /// Appends an INNER JOIN.
    #[must_use]
    pub fn join(self, table: impl Into<TableRef>, on: Expr) -> Self {
        self.push_join(JoinType::Inner, table, on)
    }

    /// Appends a LEFT JOIN.
    #[must_use]
    pub fn left_join(self, table: impl Into<TableRef>, on: Expr) -> Self {
        self.push_join(JoinType::Left, table, on)
    }

    /// Appends a RIGHT JOIN.
    #[must_use]
    pub fn right_join(self, table: impl Into<TableRef>, on: Expr) -> Self {
        self.push_join(JoinType::Right, table, on)
    }

    /// Appends a FULL JOIN.
    #[must_use]
    pub fn full_join(self, table: impl Into<TableRef>, on: Expr) -> Self {
        self.push_join(JoinType::Full, table, on)
    }

    /// Sets the WHERE condition, replacing any previous one.
    #[must_use]
    pub fn where_clause(mut self, expr: impl Into<Expr>) -> Self {
        self.query.where_clause = Some(expr.into());
        self
    }

    /// Appends GROUP BY columns.
    #[must_use]
    pub fn group_by<I: IntoIterator<Item = Column>>(mut self, cols: I) -> Self {
        self.query.group_by.extend(cols);
        self
    }

    /// Sets the HAVING condition, replacing any previous one.
    #[must_use]
    pub fn having(mut self, expr: impl Into<Expr>) -> Self {
        self.query.having = Some(expr.into());
        self
    }

    /// Appends an ORDER BY entry.
    #[must_use]
    pub fn order_by(mut self, item: OrderByItem) -> Self {
        self.query.order_by.push(item);
        self
    }

    /// Sets the LIMIT expression, replacing any previous one.
    #[must_use]
    pub fn limit(mut self, expr: impl Into<Expr>) -> Self {
        self.query.limit = Some(expr.into());
        self
    }

    /// Sets the OFFSET expression, replacing any previous one.
    #[must_use]
    pub fn offset(mut self, expr: impl Into<Expr>) -> Self {
        self.query.offset = Some(expr.into());
        self
    }

    fn set_op(self, op: SetOpKind, other: impl Into<Query>) -> CompoundBuilder {
        CompoundBuilder::new(CompoundQuery {
            ctes: vec![],
            left: Box::new(self.build()),
            op,
            right: Box::new(other.into()),
            order_by: vec![],
            limit: None,
            offset: None,
        })
    }

    /// Combines with another SELECT via UNION.
    #[must_use]
    pub fn union(self, other: impl Into<Query>) -> CompoundBuilder {
        self.set_op(SetOpKind::Union, other)
    }

    /// Combines with another SELECT via UNION ALL.
    #[must_use]
    pub fn union_all(self, other: impl Into<Query>) -> CompoundBuilder {
        self.set_op(SetOpKind::UnionAll, other)
    }

    /// Combines with another SELECT via INTERSECT.
    #[must_use]
    pub fn intersect(self, other: impl Into<Query>) -> CompoundBuilder {
        self.set_op(SetOpKind::Intersect, other)
    }

    /// Combines with another SELECT via EXCEPT.
    #[must_use]
    pub fn except(self, other: impl Into<Query>) -> CompoundBuilder {
        self.set_op(SetOpKind::Except, other)
    }

    /// Finishes the builder, producing the immutable IR.
    #[must_use]
    pub fn build(self) -> Query {
        Query::Select(self.query)
    }
}

impl From<SelectBuilder> for Query {
    fn from(builder: SelectBuilder) -> Self {
        builder.build()
    }
}
