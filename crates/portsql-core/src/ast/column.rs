//! Typed columns and the logical type system.

use core::fmt;

use super::expression::{BinaryOp, Expr, UnaryOp};
use super::query::{OrderByItem, Query};

/// The logical type of a column, as seen by the query layer.
///
/// Decimals are carried as strings at the boundary to preserve precision.
/// Nullability is part of the type, not of individual values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogicalType {
    Int32,
    NullableInt32,
    Int64,
    NullableInt64,
    Float64,
    NullableFloat64,
    Decimal,
    NullableDecimal,
    Bool,
    NullableBool,
    String,
    NullableString,
    Time,
    NullableTime,
    Bytes,
    Json,
    NullableJson,
}

impl LogicalType {
    /// Returns whether this type admits NULL.
    #[must_use]
    pub const fn is_nullable(&self) -> bool {
        matches!(
            self,
            Self::NullableInt32
                | Self::NullableInt64
                | Self::NullableFloat64
                | Self::NullableDecimal
                | Self::NullableBool
                | Self::NullableString
                | Self::NullableTime
                | Self::NullableJson
        )
    }

    /// Returns whether this is a text type.
    ///
    /// Drives dialect hooks that only apply to string columns, such as the
    /// MySQL ORDER BY collation addendum.
    #[must_use]
    pub const fn is_text(&self) -> bool {
        matches!(self, Self::String | Self::NullableString)
    }

    /// Returns the type name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Int32 => "INT32",
            Self::NullableInt32 => "NULLABLE_INT32",
            Self::Int64 => "INT64",
            Self::NullableInt64 => "NULLABLE_INT64",
            Self::Float64 => "FLOAT64",
            Self::NullableFloat64 => "NULLABLE_FLOAT64",
            Self::Decimal => "DECIMAL",
            Self::NullableDecimal => "NULLABLE_DECIMAL",
            Self::Bool => "BOOL",
            Self::NullableBool => "NULLABLE_BOOL",
            Self::String => "STRING",
            Self::NullableString => "NULLABLE_STRING",
            Self::Time => "TIME",
            Self::NullableTime => "NULLABLE_TIME",
            Self::Bytes => "BYTES",
            Self::Json => "JSON",
            Self::NullableJson => "NULLABLE_JSON",
        }
    }
}

impl fmt::Display for LogicalType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A qualified, typed column reference.
///
/// Columns are immutable values: two columns are equal iff table name,
/// column name, and logical type all agree. Aliasing a table produces new
/// column values via [`Column::with_table`]; the original is unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    /// Table (or table alias) the column belongs to.
    pub table: String,
    /// Column name.
    pub name: String,
    /// Logical type.
    pub ty: LogicalType,
}

impl Column {
    /// Creates a new column reference.
    #[must_use]
    pub fn new(
        table: impl Into<String>,
        name: impl Into<String>,
        ty: LogicalType,
    ) -> Self {
        Self {
            table: table.into(),
            name: name.into(),
            ty,
        }
    }

    /// Returns a copy of this column qualified by a different table or alias.
    #[must_use]
    pub fn with_table(&self, alias: impl Into<String>) -> Self {
        Self {
            table: alias.into(),
            name: self.name.clone(),
            ty: self.ty,
        }
    }

    /// Returns this column as an expression.
    #[must_use]
    pub fn expr(&self) -> Expr {
        Expr::Column(self.clone())
    }

    fn binary(&self, op: BinaryOp, rhs: Expr) -> Expr {
        Expr::Binary {
            left: Box::new(self.expr()),
            op,
            right: Box::new(rhs),
        }
    }

    fn subquery_cmp(&self, op: BinaryOp, query: Query) -> Expr {
        self.binary(op, Expr::Subquery(Box::new(query)))
    }

    /// `column = value`
    #[must_use]
    #[allow(clippy::should_implement_trait)]
    pub fn eq(&self, rhs: impl Into<Expr>) -> Expr {
        self.binary(BinaryOp::Eq, rhs.into())
    }

    /// `column <> value`
    #[must_use]
    #[allow(clippy::should_implement_trait)]
    pub fn ne(&self, rhs: impl Into<Expr>) -> Expr {
        self.binary(BinaryOp::NotEq, rhs.into())
    }

    /// `column < value`
    #[must_use]
    pub fn lt(&self, rhs: impl Into<Expr>) -> Expr {
        self.binary(BinaryOp::Lt, rhs.into())
    }

    /// `column <= value`
    #[must_use]
    pub fn le(&self, rhs: impl Into<Expr>) -> Expr {
        self.binary(BinaryOp::LtEq, rhs.into())
    }

    /// `column > value`
    #[must_use]
    pub fn gt(&self, rhs: impl Into<Expr>) -> Expr {
        self.binary(BinaryOp::Gt, rhs.into())
    }

    /// `column >= value`
    #[must_use]
    pub fn ge(&self, rhs: impl Into<Expr>) -> Expr {
        self.binary(BinaryOp::GtEq, rhs.into())
    }

    /// `column LIKE pattern`
    #[must_use]
    pub fn like(&self, pattern: impl Into<Expr>) -> Expr {
        self.binary(BinaryOp::Like, pattern.into())
    }

    /// `column NOT LIKE pattern`
    #[must_use]
    pub fn not_like(&self, pattern: impl Into<Expr>) -> Expr {
        self.binary(BinaryOp::NotLike, pattern.into())
    }

    /// Case-insensitive LIKE.
    ///
    /// Compiled natively on PostgreSQL; other dialects rewrite it through
    /// `LOWER(..) LIKE LOWER(..)`.
    #[must_use]
    pub fn ilike(&self, pattern: impl Into<Expr>) -> Expr {
        Expr::Func {
            name: "ILIKE".into(),
            args: vec![self.expr(), pattern.into()],
        }
    }

    /// `column IN (v1, v2, …)`
    #[must_use]
    pub fn in_list<I>(&self, values: I) -> Expr
    where
        I: IntoIterator,
        I::Item: Into<Expr>,
    {
        let values = values.into_iter().map(Into::into).collect();
        self.binary(BinaryOp::In, Expr::List(values))
    }

    /// `column NOT IN (v1, v2, …)`
    #[must_use]
    pub fn not_in_list<I>(&self, values: I) -> Expr
    where
        I: IntoIterator,
        I::Item: Into<Expr>,
    {
        let values = values.into_iter().map(Into::into).collect();
        self.binary(BinaryOp::NotIn, Expr::List(values))
    }

    /// `column IN (SELECT …)`
    #[must_use]
    pub fn in_subquery(&self, query: impl Into<Query>) -> Expr {
        self.subquery_cmp(BinaryOp::In, query.into())
    }

    /// `column NOT IN (SELECT …)`
    #[must_use]
    pub fn not_in_subquery(&self, query: impl Into<Query>) -> Expr {
        self.subquery_cmp(BinaryOp::NotIn, query.into())
    }

    /// `column = (SELECT …)` against a scalar subquery.
    #[must_use]
    pub fn eq_subquery(&self, query: impl Into<Query>) -> Expr {
        self.subquery_cmp(BinaryOp::Eq, query.into())
    }

    /// `column <> (SELECT …)` against a scalar subquery.
    #[must_use]
    pub fn ne_subquery(&self, query: impl Into<Query>) -> Expr {
        self.subquery_cmp(BinaryOp::NotEq, query.into())
    }

    /// `column > (SELECT …)` against a scalar subquery.
    #[must_use]
    pub fn gt_subquery(&self, query: impl Into<Query>) -> Expr {
        self.subquery_cmp(BinaryOp::Gt, query.into())
    }

    /// `column < (SELECT …)` against a scalar subquery.
    #[must_use]
    pub fn lt_subquery(&self, query: impl Into<Query>) -> Expr {
        self.subquery_cmp(BinaryOp::Lt, query.into())
    }

    /// `column >= (SELECT …)` against a scalar subquery.
    #[must_use]
    pub fn ge_subquery(&self, query: impl Into<Query>) -> Expr {
        self.subquery_cmp(BinaryOp::GtEq, query.into())
    }

    /// `column <= (SELECT …)` against a scalar subquery.
    #[must_use]
    pub fn le_subquery(&self, query: impl Into<Query>) -> Expr {
        self.subquery_cmp(BinaryOp::LtEq, query.into())
    }

    /// `column >= lo AND column <= hi`
    #[must_use]
    pub fn between(&self, lo: impl Into<Expr>, hi: impl Into<Expr>) -> Expr {
        self.ge(lo).and(self.le(hi))
    }

    /// `column IS NULL`
    #[must_use]
    pub fn is_null(&self) -> Expr {
        Expr::Unary {
            op: UnaryOp::IsNull,
            expr: Box::new(self.expr()),
        }
    }

    /// `column IS NOT NULL`
    #[must_use]
    pub fn is_not_null(&self) -> Expr {
        Expr::Unary {
            op: UnaryOp::IsNotNull,
            expr: Box::new(self.expr()),
        }
    }

    /// Ascending ORDER BY entry for this column.
    #[must_use]
    pub fn asc(&self) -> OrderByItem {
        OrderByItem {
            expr: self.expr(),
            desc: false,
        }
    }

    /// Descending ORDER BY entry for this column.
    #[must_use]
    pub fn desc(&self) -> OrderByItem {
        OrderByItem {
            expr: self.expr(),
            desc: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn age() -> Column {
        Column::new("users", "age", LogicalType::Int32)
    }

    #[test]
    fn test_nullability() {
        assert!(LogicalType::NullableString.is_nullable());
        assert!(!LogicalType::String.is_nullable());
        assert!(LogicalType::NullableString.is_text());
        assert!(!LogicalType::Json.is_text());
    }

    #[test]
    fn test_with_table_is_pure() {
        let original = age();
        let aliased = original.with_table("u");
        assert_eq!(original.table, "users");
        assert_eq!(aliased.table, "u");
        assert_eq!(aliased.name, "age");
        assert_eq!(aliased.ty, LogicalType::Int32);
    }

    #[test]
    fn test_column_equality() {
        assert_eq!(age(), Column::new("users", "age", LogicalType::Int32));
        assert_ne!(age(), Column::new("users", "age", LogicalType::Int64));
        assert_ne!(age(), age().with_table("u"));
    }

    #[test]
    fn test_comparison_helpers() {
        let expr = age().gt(18);
        assert!(matches!(
            expr,
            Expr::Binary {
                op: BinaryOp::Gt,
                ..
            }
        ));

        let expr = age().is_null();
        assert!(matches!(
            expr,
            Expr::Unary {
                op: UnaryOp::IsNull,
                ..
            }
        ));
    }

    #[test]
    fn test_in_list_builds_list() {
        let expr = age().in_list([18, 21]);
        match expr {
            Expr::Binary { op, right, .. } => {
                assert_eq!(op, BinaryOp::In);
                assert!(matches!(*right, Expr::List(ref vs) if vs.len() == 2));
            }
            other => panic!("unexpected expression: {other:?}"),
        }
    }

    #[test]
    fn test_order_by_helpers() {
        assert!(!age().asc().desc);
        assert!(age().desc().desc);
    }
}
