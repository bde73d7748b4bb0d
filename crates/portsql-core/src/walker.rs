//! Generic depth-first traversal over query IR.
//!
//! The walk visits expressions in the order the compiler emits them, so
//! parameter collection agrees with placeholder positions: CTE bodies
//! first, then the select list, join conditions, WHERE, HAVING, ORDER BY,
//! LIMIT, and OFFSET; INSERT values; UPDATE SET values then WHERE; and both
//! branches of a set operation in order. GROUP BY entries are columns, not
//! expressions, and are not visited.

use crate::ast::{Cte, Expr, Param, Query};

/// Walks every expression in the query depth-first.
///
/// The visitor returns whether to descend into the expression's children;
/// returning `false` prunes the subtree but continues with siblings.
pub fn walk_expressions<F>(query: &Query, visit: &mut F)
where
    F: FnMut(&Expr) -> bool,
{
    walk_query(query, visit);
}

fn walk_query<F>(query: &Query, visit: &mut F)
where
    F: FnMut(&Expr) -> bool,
{
    match query {
        Query::Select(select) => {
            walk_ctes(&select.ctes, visit);
            for item in &select.columns {
                walk_expr(&item.expr, visit);
            }
            for join in &select.joins {
                walk_expr(&join.on, visit);
            }
            walk_optional(select.where_clause.as_ref(), visit);
            walk_optional(select.having.as_ref(), visit);
            for item in &select.order_by {
                walk_expr(&item.expr, visit);
            }
            walk_optional(select.limit.as_ref(), visit);
            walk_optional(select.offset.as_ref(), visit);
        }
        Query::Insert(insert) => {
            for value in &insert.values {
                walk_expr(value, visit);
            }
        }
        Query::Update(update) => {
            for assignment in &update.set {
                walk_expr(&assignment.value, visit);
            }
            walk_optional(update.where_clause.as_ref(), visit);
        }
        Query::Delete(delete) => {
            walk_optional(delete.where_clause.as_ref(), visit);
        }
        Query::Compound(compound) => {
            walk_ctes(&compound.ctes, visit);
            walk_query(&compound.left, visit);
            walk_query(&compound.right, visit);
            for item in &compound.order_by {
                walk_expr(&item.expr, visit);
            }
            walk_optional(compound.limit.as_ref(), visit);
            walk_optional(compound.offset.as_ref(), visit);
        }
    }
}

fn walk_ctes<F>(ctes: &[Cte], visit: &mut F)
where
    F: FnMut(&Expr) -> bool,
{
    for cte in ctes {
        walk_query(&cte.query, visit);
    }
}

fn walk_optional<F>(expr: Option<&Expr>, visit: &mut F)
where
    F: FnMut(&Expr) -> bool,
{
    if let Some(expr) = expr {
        walk_expr(expr, visit);
    }
}

fn walk_expr<F>(expr: &Expr, visit: &mut F)
where
    F: FnMut(&Expr) -> bool,
{
    if !visit(expr) {
        return;
    }
    match expr {
        Expr::Column(_) | Expr::Param(_) | Expr::Literal(_) | Expr::JsonAgg { .. } => {}
        Expr::Binary { left, right, .. } => {
            walk_expr(left, visit);
            walk_expr(right, visit);
        }
        Expr::Unary { expr, .. } => walk_expr(expr, visit),
        Expr::Func { args, .. } => {
            for arg in args {
                walk_expr(arg, visit);
            }
        }
        Expr::List(values) => {
            for value in values {
                walk_expr(value, visit);
            }
        }
        Expr::Aggregate { arg, .. } => {
            if let Some(expr) = arg {
                walk_expr(expr, visit);
            }
        }
        Expr::Subquery(query) => walk_query(query, visit),
        Expr::Exists { query, .. } => walk_query(query, visit),
    }
}

/// Collects the distinct named parameters of a query in first-occurrence
/// order under the depth-first walk.
#[must_use]
pub fn collect_params(query: &Query) -> Vec<Param> {
    let mut params: Vec<Param> = vec![];
    walk_expressions(query, &mut |expr| {
        if let Expr::Param(param) = expr {
            if !params.iter().any(|seen| seen.name == param.name) {
                params.push(param.clone());
            }
        }
        true
    });
    params
}

/// Collects every parameter occurrence in walk order.
///
/// This is the binding order for positional placeholders; a parameter
/// referenced several times appears once per occurrence.
#[must_use]
pub fn collect_param_order(query: &Query) -> Vec<String> {
    let mut order = vec![];
    walk_expressions(query, &mut |expr| {
        if let Expr::Param(param) = expr {
            order.push(param.name.clone());
        }
        true
    });
    order
}

/// Returns whether the query contains any subquery or EXISTS expression.
#[must_use]
pub fn has_subqueries(query: &Query) -> bool {
    let mut found = false;
    walk_expressions(query, &mut |expr| {
        if matches!(expr, Expr::Subquery(_) | Expr::Exists { .. }) {
            found = true;
            return false;
        }
        true
    });
    found
}
