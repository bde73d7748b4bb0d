//! Query IR types.

use core::fmt;

use super::column::Column;
use super::expression::Expr;

/// A table reference with an optional alias.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableRef {
    /// Table name.
    pub name: String,
    /// Alias, if any.
    pub alias: Option<String>,
}

impl TableRef {
    /// Creates a table reference without an alias.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            alias: None,
        }
    }

    /// Creates an aliased table reference.
    #[must_use]
    pub fn aliased(name: impl Into<String>, alias: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            alias: Some(alias.into()),
        }
    }
}

impl From<&str> for TableRef {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for TableRef {
    fn from(name: String) -> Self {
        Self::new(name)
    }
}

/// Join type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinType {
    /// INNER JOIN.
    Inner,
    /// LEFT JOIN.
    Left,
    /// RIGHT JOIN.
    Right,
    /// FULL JOIN.
    Full,
}

impl JoinType {
    /// Returns the SQL representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Inner => "INNER JOIN",
            Self::Left => "LEFT JOIN",
            Self::Right => "RIGHT JOIN",
            Self::Full => "FULL JOIN",
        }
    }
}

impl fmt::Display for JoinType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A JOIN clause.
#[derive(Debug, Clone, PartialEq)]
pub struct Join {
    /// The type of join.
    pub join_type: JoinType,
    /// The joined table.
    pub table: TableRef,
    /// The ON condition.
    pub on: Expr,
}

/// An entry in the SELECT list.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectItem {
    /// The projected expression.
    pub expr: Expr,
    /// Column alias, if any.
    pub alias: Option<String>,
}

impl SelectItem {
    /// Creates an unaliased select item.
    #[must_use]
    pub fn new(expr: impl Into<Expr>) -> Self {
        Self {
            expr: expr.into(),
            alias: None,
        }
    }

    /// Creates an aliased select item.
    #[must_use]
    pub fn aliased(expr: impl Into<Expr>, alias: impl Into<String>) -> Self {
        Self {
            expr: expr.into(),
            alias: Some(alias.into()),
        }
    }
}

impl From<Column> for SelectItem {
    fn from(col: Column) -> Self {
        Self::new(col)
    }
}

impl From<Expr> for SelectItem {
    fn from(expr: Expr) -> Self {
        Self::new(expr)
    }
}

/// An ORDER BY entry.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderByItem {
    /// The ordering expression.
    pub expr: Expr,
    /// Whether to order descending.
    pub desc: bool,
}

/// An assignment in UPDATE SET.
#[derive(Debug, Clone, PartialEq)]
pub struct Assignment {
    /// Target column.
    pub column: Column,
    /// Value expression.
    pub value: Expr,
}

/// A common table expression.
#[derive(Debug, Clone, PartialEq)]
pub struct Cte {
    /// CTE name.
    pub name: String,
    /// Explicit column names, if any.
    pub columns: Vec<String>,
    /// The inner query.
    pub query: Query,
}

/// Set operation kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetOpKind {
    Union,
    UnionAll,
    Intersect,
    Except,
}

impl SetOpKind {
    /// Returns the SQL keyword.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Union => "UNION",
            Self::UnionAll => "UNION ALL",
            Self::Intersect => "INTERSECT",
            Self::Except => "EXCEPT",
        }
    }
}

impl fmt::Display for SetOpKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A SELECT query.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectQuery {
    /// Leading WITH clause.
    pub ctes: Vec<Cte>,
    /// Whether to select DISTINCT rows.
    pub distinct: bool,
    /// The select list; empty means `*`.
    pub columns: Vec<SelectItem>,
    /// The FROM table.
    pub from: TableRef,
    /// JOIN clauses, in order.
    pub joins: Vec<Join>,
    /// WHERE condition.
    pub where_clause: Option<Expr>,
    /// GROUP BY columns.
    pub group_by: Vec<Column>,
    /// HAVING condition.
    pub having: Option<Expr>,
    /// ORDER BY entries.
    pub order_by: Vec<OrderByItem>,
    /// LIMIT expression.
    pub limit: Option<Expr>,
    /// OFFSET expression.
    pub offset: Option<Expr>,
}

impl SelectQuery {
    /// Creates an empty SELECT over a table.
    #[must_use]
    pub fn new(from: TableRef) -> Self {
        Self {
            ctes: vec![],
            distinct: false,
            columns: vec![],
            from,
            joins: vec![],
            where_clause: None,
            group_by: vec![],
            having: None,
            order_by: vec![],
            limit: None,
            offset: None,
        }
    }
}

/// An INSERT query.
#[derive(Debug, Clone, PartialEq)]
pub struct InsertQuery {
    /// Target table.
    pub table: TableRef,
    /// Insert column list; may be empty for positional inserts.
    pub columns: Vec<Column>,
    /// One value expression per column.
    pub values: Vec<Expr>,
    /// RETURNING columns; dropped on dialects without RETURNING support.
    pub returning: Vec<Column>,
}

/// An UPDATE query.
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateQuery {
    /// Target table.
    pub table: TableRef,
    /// SET assignments, in order.
    pub set: Vec<Assignment>,
    /// WHERE condition.
    pub where_clause: Option<Expr>,
}

/// A DELETE query.
#[derive(Debug, Clone, PartialEq)]
pub struct DeleteQuery {
    /// Target table.
    pub table: TableRef,
    /// WHERE condition.
    pub where_clause: Option<Expr>,
}

/// A set operation over two queries, with trailing clauses applying to the
/// combined result. Chained operations nest on the left.
#[derive(Debug, Clone, PartialEq)]
pub struct CompoundQuery {
    /// Leading WITH clause.
    pub ctes: Vec<Cte>,
    /// Left branch.
    pub left: Box<Query>,
    /// The set operation.
    pub op: SetOpKind,
    /// Right branch.
    pub right: Box<Query>,
    /// ORDER BY over the combined result.
    pub order_by: Vec<OrderByItem>,
    /// LIMIT over the combined result.
    pub limit: Option<Expr>,
    /// OFFSET over the combined result.
    pub offset: Option<Expr>,
}

/// Query kind discriminator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryKind {
    Select,
    Insert,
    Update,
    Delete,
    Compound,
}

impl QueryKind {
    /// Returns the kind name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Select => "SELECT",
            Self::Insert => "INSERT",
            Self::Update => "UPDATE",
            Self::Delete => "DELETE",
            Self::Compound => "COMPOUND",
        }
    }
}

impl fmt::Display for QueryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A complete query IR.
///
/// Produced by the builders, immutable afterwards. The compiler reads the
/// IR but never mutates it; registered queries are shared by value.
#[derive(Debug, Clone, PartialEq)]
pub enum Query {
    /// SELECT query.
    Select(SelectQuery),
    /// INSERT query.
    Insert(InsertQuery),
    /// UPDATE query.
    Update(UpdateQuery),
    /// DELETE query.
    Delete(DeleteQuery),
    /// Set operation over two queries.
    Compound(CompoundQuery),
}

impl Query {
    /// Returns the query kind.
    #[must_use]
    pub const fn kind(&self) -> QueryKind {
        match self {
            Self::Select(_) => QueryKind::Select,
            Self::Insert(_) => QueryKind::Insert,
            Self::Update(_) => QueryKind::Update,
            Self::Delete(_) => QueryKind::Delete,
            Self::Compound(_) => QueryKind::Compound,
        }
    }

    /// Returns the distinct named parameters referenced by this query, in
    /// first-occurrence order under the depth-first walk.
    #[must_use]
    pub fn params(&self) -> Vec<super::expression::Param> {
        crate::walker::collect_params(self)
    }
}
