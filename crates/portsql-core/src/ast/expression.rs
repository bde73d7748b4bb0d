//! Expression AST types and constructors.

use core::fmt;

use super::column::{Column, LogicalType};
use super::query::Query;

/// A literal scalar value.
///
/// Bytes are representable but rejected by the compiler; binary data must
/// be bound as a parameter.
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    /// NULL literal.
    Null,
    /// Boolean literal.
    Bool(bool),
    /// Signed integer literal.
    Int(i64),
    /// Unsigned integer literal.
    UInt(u64),
    /// Float literal.
    Float(f64),
    /// String literal.
    String(String),
    /// Blob literal.
    Bytes(Vec<u8>),
}

/// Binary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    // Comparison
    Eq,
    NotEq,
    Lt,
    LtEq,
    Gt,
    GtEq,

    // Logical
    And,
    Or,

    // Pattern / membership
    Like,
    NotLike,
    In,
    NotIn,

    // Arithmetic
    Add,
    Sub,
    Mul,
    Div,
}

impl BinaryOp {
    /// Returns the SQL representation of the operator.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Eq => "=",
            Self::NotEq => "<>",
            Self::Lt => "<",
            Self::LtEq => "<=",
            Self::Gt => ">",
            Self::GtEq => ">=",
            Self::And => "AND",
            Self::Or => "OR",
            Self::Like => "LIKE",
            Self::NotLike => "NOT LIKE",
            Self::In => "IN",
            Self::NotIn => "NOT IN",
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
        }
    }
}

impl fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    /// Logical NOT (prefix).
    Not,
    /// IS NULL (postfix).
    IsNull,
    /// IS NOT NULL (postfix).
    IsNotNull,
}

impl UnaryOp {
    /// Returns the SQL representation of the operator.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Not => "NOT",
            Self::IsNull => "IS NULL",
            Self::IsNotNull => "IS NOT NULL",
        }
    }

    /// Returns whether the operator is written after its operand.
    #[must_use]
    pub const fn is_postfix(&self) -> bool {
        matches!(self, Self::IsNull | Self::IsNotNull)
    }
}

impl fmt::Display for UnaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Aggregate functions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AggFunc {
    Count,
    Sum,
    Avg,
    Min,
    Max,
}

impl AggFunc {
    /// Returns the SQL function name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Count => "COUNT",
            Self::Sum => "SUM",
            Self::Avg => "AVG",
            Self::Min => "MIN",
            Self::Max => "MAX",
        }
    }
}

impl fmt::Display for AggFunc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A named bind parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Param {
    /// Parameter name, as bound by the caller.
    pub name: String,
    /// Logical type the bound value must carry.
    pub ty: LogicalType,
}

/// An SQL expression.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// A qualified column reference.
    Column(Column),

    /// A named bind parameter.
    Param(Param),

    /// A literal value.
    Literal(Literal),

    /// A binary expression.
    Binary {
        /// Left operand.
        left: Box<Expr>,
        /// Operator.
        op: BinaryOp,
        /// Right operand.
        right: Box<Expr>,
    },

    /// A unary expression.
    Unary {
        /// Operator.
        op: UnaryOp,
        /// Operand.
        expr: Box<Expr>,
    },

    /// A named function call.
    Func {
        /// Function name.
        name: String,
        /// Arguments.
        args: Vec<Expr>,
    },

    /// A parenthesised comma list, e.g. the right-hand side of IN.
    List(Vec<Expr>),

    /// An aggregate call. `arg` of `None` means `COUNT(*)`.
    Aggregate {
        /// The aggregate function.
        func: AggFunc,
        /// Aggregated expression, or `None` for `COUNT(*)`.
        arg: Option<Box<Expr>>,
        /// Whether DISTINCT was specified.
        distinct: bool,
    },

    /// JSON-array-of-objects aggregation over a set of columns.
    ///
    /// Compiles to the dialect's JSON aggregation form with an empty-array
    /// fallback for groups with no matching rows.
    JsonAgg {
        /// Field name the builder uses as the select-list alias.
        field: String,
        /// Columns to project into each JSON object, keyed by column name.
        columns: Vec<Column>,
    },

    /// A scalar or relation-producing subquery.
    Subquery(Box<Query>),

    /// EXISTS / NOT EXISTS over a subquery.
    Exists {
        /// The inner query.
        query: Box<Query>,
        /// Whether this is NOT EXISTS.
        negated: bool,
    },
}

impl Expr {
    /// `self AND other`
    #[must_use]
    pub fn and(self, other: impl Into<Expr>) -> Expr {
        Expr::Binary {
            left: Box::new(self),
            op: BinaryOp::And,
            right: Box::new(other.into()),
        }
    }

    /// `self OR other`
    #[must_use]
    pub fn or(self, other: impl Into<Expr>) -> Expr {
        Expr::Binary {
            left: Box::new(self),
            op: BinaryOp::Or,
            right: Box::new(other.into()),
        }
    }
}

/// Creates a named bind parameter expression.
#[must_use]
pub fn param(name: impl Into<String>, ty: LogicalType) -> Expr {
    Expr::Param(Param {
        name: name.into(),
        ty,
    })
}

/// Creates a named function call expression.
#[must_use]
pub fn func(name: impl Into<String>, args: Vec<Expr>) -> Expr {
    Expr::Func {
        name: name.into(),
        args,
    }
}

/// The current timestamp, in each dialect's native spelling.
#[must_use]
pub fn now() -> Expr {
    func("NOW", vec![])
}

/// `LOWER(expr)`
#[must_use]
pub fn lower(expr: impl Into<Expr>) -> Expr {
    func("LOWER", vec![expr.into()])
}

/// `UPPER(expr)`
#[must_use]
pub fn upper(expr: impl Into<Expr>) -> Expr {
    func("UPPER", vec![expr.into()])
}

/// `COALESCE(a, b, …)`
#[must_use]
pub fn coalesce(args: Vec<Expr>) -> Expr {
    func("COALESCE", args)
}

/// `COUNT(expr)`
#[must_use]
pub fn count(expr: impl Into<Expr>) -> Expr {
    Expr::Aggregate {
        func: AggFunc::Count,
        arg: Some(Box::new(expr.into())),
        distinct: false,
    }
}

/// `COUNT(*)`
#[must_use]
pub fn count_star() -> Expr {
    Expr::Aggregate {
        func: AggFunc::Count,
        arg: None,
        distinct: false,
    }
}

/// `COUNT(DISTINCT expr)`
#[must_use]
pub fn count_distinct(expr: impl Into<Expr>) -> Expr {
    Expr::Aggregate {
        func: AggFunc::Count,
        arg: Some(Box::new(expr.into())),
        distinct: true,
    }
}

/// `SUM(expr)`
#[must_use]
pub fn sum(expr: impl Into<Expr>) -> Expr {
    aggregate(AggFunc::Sum, expr)
}

/// `AVG(expr)`
#[must_use]
pub fn avg(expr: impl Into<Expr>) -> Expr {
    aggregate(AggFunc::Avg, expr)
}

/// `MIN(expr)`
#[must_use]
pub fn min(expr: impl Into<Expr>) -> Expr {
    aggregate(AggFunc::Min, expr)
}

/// `MAX(expr)`
#[must_use]
pub fn max(expr: impl Into<Expr>) -> Expr {
    aggregate(AggFunc::Max, expr)
}

fn aggregate(func: AggFunc, expr: impl Into<Expr>) -> Expr {
    Expr::Aggregate {
        func,
        arg: Some(Box::new(expr.into())),
        distinct: false,
    }
}

/// `EXISTS (SELECT …)`
#[must_use]
pub fn exists(query: impl Into<Query>) -> Expr {
    Expr::Exists {
        query: Box::new(query.into()),
        negated: false,
    }
}

/// `NOT EXISTS (SELECT …)`
#[must_use]
pub fn not_exists(query: impl Into<Query>) -> Expr {
    Expr::Exists {
        query: Box::new(query.into()),
        negated: true,
    }
}

/// Folds expressions into a left-leaning AND tree.
///
/// Zero expressions yield `None`; a single expression passes through.
#[must_use]
pub fn and<I: IntoIterator<Item = Expr>>(exprs: I) -> Option<Expr> {
    exprs.into_iter().reduce(|left, right| left.and(right))
}

/// Folds expressions into a left-leaning OR tree.
///
/// Zero expressions yield `None`; a single expression passes through.
#[must_use]
pub fn or<I: IntoIterator<Item = Expr>>(exprs: I) -> Option<Expr> {
    exprs.into_iter().reduce(|left, right| left.or(right))
}

/// `NOT expr`
#[must_use]
pub fn not(expr: impl Into<Expr>) -> Expr {
    Expr::Unary {
        op: UnaryOp::Not,
        expr: Box::new(expr.into()),
    }
}

impl From<Column> for Expr {
    fn from(col: Column) -> Self {
        Expr::Column(col)
    }
}

impl From<&Column> for Expr {
    fn from(col: &Column) -> Self {
        Expr::Column(col.clone())
    }
}

impl From<Param> for Expr {
    fn from(p: Param) -> Self {
        Expr::Param(p)
    }
}

impl From<bool> for Expr {
    fn from(v: bool) -> Self {
        Expr::Literal(Literal::Bool(v))
    }
}

impl From<i32> for Expr {
    fn from(v: i32) -> Self {
        Expr::Literal(Literal::Int(i64::from(v)))
    }
}

impl From<i64> for Expr {
    fn from(v: i64) -> Self {
        Expr::Literal(Literal::Int(v))
    }
}

impl From<u64> for Expr {
    fn from(v: u64) -> Self {
        Expr::Literal(Literal::UInt(v))
    }
}

impl From<f64> for Expr {
    fn from(v: f64) -> Self {
        Expr::Literal(Literal::Float(v))
    }
}

impl From<&str> for Expr {
    fn from(v: &str) -> Self {
        Expr::Literal(Literal::String(String::from(v)))
    }
}

impl From<String> for Expr {
    fn from(v: String) -> Self {
        Expr::Literal(Literal::String(v))
    }
}
