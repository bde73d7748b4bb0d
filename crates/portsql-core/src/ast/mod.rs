//! The query IR: typed columns, expressions, and query records.

pub mod column;
pub mod expression;
pub mod query;

pub use column::{Column, LogicalType};
pub use expression::{AggFunc, BinaryOp, Expr, Literal, Param, UnaryOp};
pub use query::{
    Assignment, CompoundQuery, Cte, DeleteQuery, InsertQuery, Join, JoinType, OrderByItem, Query,
    QueryKind, SelectItem, SelectQuery, SetOpKind, TableRef, UpdateQuery,
};
