//! Structural validation of query IR.
//!
//! `validate` is the compiler's prologue: every invariant is enforced here,
//! before any SQL is emitted, and recursively for CTE bodies, set-operation
//! branches, and subqueries. Errors carry a fully-qualified description of
//! the offending site.

use std::sync::LazyLock;

use regex::Regex;

use crate::ast::{
    BinaryOp, CompoundQuery, Cte, DeleteQuery, Expr, InsertQuery, Query, SelectQuery, TableRef,
    UpdateQuery,
};
use crate::error::{QueryError, Result};

static IDENTIFIER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("identifier pattern"));

/// Validates a query IR against the structural invariants.
pub fn validate(query: &Query) -> Result<()> {
    match query {
        Query::Select(select) => validate_select(select),
        Query::Insert(insert) => validate_insert(insert),
        Query::Update(update) => validate_update(update),
        Query::Delete(delete) => validate_delete(delete),
        Query::Compound(compound) => validate_compound(compound),
    }
}

fn fail(message: String) -> Result<()> {
    Err(QueryError::Validation(message))
}

fn check_identifier(ident: &str, site: &str) -> Result<()> {
    if IDENTIFIER.is_match(ident) {
        Ok(())
    } else {
        fail(format!("{site}: invalid identifier {ident:?}"))
    }
}

fn check_table(table: &TableRef, site: &str) -> Result<()> {
    if table.name.is_empty() {
        return fail(format!("{site}: table name is empty"));
    }
    check_identifier(&table.name, site)?;
    if let Some(alias) = &table.alias {
        check_identifier(alias, &format!("{site} alias"))?;
    }
    Ok(())
}

fn validate_ctes(ctes: &[Cte]) -> Result<()> {
    for cte in ctes {
        check_identifier(&cte.name, "CTE name")?;
        for (index, column) in cte.columns.iter().enumerate() {
            check_identifier(column, &format!("CTE {:?} column {}", cte.name, index + 1))?;
        }
        validate(&cte.query)?;
    }
    Ok(())
}

fn validate_select(select: &SelectQuery) -> Result<()> {
    validate_ctes(&select.ctes)?;
    check_table(&select.from, "FROM")?;
    for (index, join) in select.joins.iter().enumerate() {
        let site = format!("join {}", index + 1);
        check_table(&join.table, &site)?;
        validate_expr(&join.on)?;
    }
    for item in &select.columns {
        validate_expr(&item.expr)?;
        if let Some(alias) = &item.alias {
            check_identifier(alias, "column alias")?;
        }
    }
    if let Some(expr) = &select.where_clause {
        validate_expr(expr)?;
    }
    if let Some(expr) = &select.having {
        validate_expr(expr)?;
    }
    for item in &select.order_by {
        validate_expr(&item.expr)?;
    }
    if let Some(expr) = &select.limit {
        validate_expr(expr)?;
    }
    if let Some(expr) = &select.offset {
        validate_expr(expr)?;
    }
    Ok(())
}

fn validate_insert(insert: &InsertQuery) -> Result<()> {
    check_table(&insert.table, "INSERT INTO")?;
    if insert.values.is_empty() {
        return fail(String::from("INSERT requires at least one value"));
    }
    if !insert.columns.is_empty() && insert.columns.len() != insert.values.len() {
        return fail(format!(
            "INSERT column count ({}) does not match value count ({})",
            insert.columns.len(),
            insert.values.len()
        ));
    }
    for value in &insert.values {
        validate_expr(value)?;
    }
    Ok(())
}

fn validate_update(update: &UpdateQuery) -> Result<()> {
    check_table(&update.table, "UPDATE")?;
    if update.set.is_empty() {
        return fail(String::from("UPDATE requires at least one SET clause"));
    }
    for assignment in &update.set {
        validate_expr(&assignment.value)?;
    }
    if let Some(expr) = &update.where_clause {
        validate_expr(expr)?;
    }
    Ok(())
}

fn validate_delete(delete: &DeleteQuery) -> Result<()> {
    check_table(&delete.table, "DELETE FROM")?;
    if let Some(expr) = &delete.where_clause {
        validate_expr(expr)?;
    }
    Ok(())
}

fn validate_compound(compound: &CompoundQuery) -> Result<()> {
    validate_ctes(&compound.ctes)?;
    validate(&compound.left)?;
    validate(&compound.right)?;
    for item in &compound.order_by {
        validate_expr(&item.expr)?;
    }
    if let Some(expr) = &compound.limit {
        validate_expr(expr)?;
    }
    if let Some(expr) = &compound.offset {
        validate_expr(expr)?;
    }
    Ok(())
}

fn validate_expr(expr: &Expr) -> Result<()> {
    match expr {
        Expr::Column(_) | Expr::Literal(_) => Ok(()),
        Expr::Param(param) => {
            if param.name.is_empty() {
                fail(String::from("parameter name is empty"))
            } else {
                Ok(())
            }
        }
        Expr::Binary { left, op, right } if matches!(op, BinaryOp::In | BinaryOp::NotIn) => {
            validate_expr(left)?;
            match right.as_ref() {
                Expr::List(values) => {
                    if values.is_empty() {
                        return fail(format!("{op} list is empty"));
                    }
                    for value in values {
                        validate_expr(value)?;
                    }
                    Ok(())
                }
                Expr::Subquery(query) => validate(query),
                other => fail(format!(
                    "{op} requires a value list or subquery, got {other:?}"
                )),
            }
        }
        Expr::Binary { left, right, .. } => {
            validate_expr(left)?;
            validate_expr(right)
        }
        Expr::Unary { expr, .. } => validate_expr(expr),
        Expr::Func { args, .. } => {
            for arg in args {
                validate_expr(arg)?;
            }
            Ok(())
        }
        Expr::List(values) => {
            for value in values {
                validate_expr(value)?;
            }
            Ok(())
        }
        Expr::Aggregate { arg, .. } => match arg {
            Some(expr) => validate_expr(expr),
            None => Ok(()),
        },
        Expr::JsonAgg { field, columns } => {
            if columns.is_empty() {
                fail(format!("JSON aggregation {field:?} has no columns"))
            } else {
                Ok(())
            }
        }
        Expr::Subquery(query) => validate(query),
        Expr::Exists { query, .. } => validate(query),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{Column, LogicalType};
    use crate::ast::expression::param;
    use crate::builder::{from, insert_into, update, with};

    fn id() -> Column {
        Column::new("users", "id", LogicalType::Int64)
    }

    fn assert_validation_error(query: &Query, needle: &str) {
        match validate(query) {
            Err(QueryError::Validation(message)) => {
                assert!(
                    message.contains(needle),
                    "expected {needle:?} in {message:?}"
                );
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_valid_select_passes() {
        let q = from("users")
            .columns([id()])
            .where_clause(id().eq(param("id", LogicalType::Int64)))
            .build();
        assert!(validate(&q).is_ok());
    }

    #[test]
    fn test_empty_from_table() {
        let q = from("").columns([id()]).build();
        assert_validation_error(&q, "table name is empty");
    }

    #[test]
    fn test_invalid_table_identifier() {
        let q = from("1bad").build();
        assert_validation_error(&q, "invalid identifier \"1bad\"");
    }

    #[test]
    fn test_invalid_cte_column() {
        let inner = from("t").columns([Column::new("t", "a", LogicalType::Int32)]).build();
        let q = with("x", inner).select("x").build();
        let q = match q {
            Query::Select(mut s) => {
                s.ctes[0].columns = vec![String::from("1bad")];
                Query::Select(s)
            }
            other => panic!("unexpected query: {other:?}"),
        };
        assert_validation_error(&q, "CTE \"x\" column 1: invalid identifier \"1bad\"");
    }

    #[test]
    fn test_empty_in_list() {
        let q = from("users")
            .where_clause(id().in_list(Vec::<Expr>::new()))
            .build();
        assert_validation_error(&q, "IN list is empty");
    }

    #[test]
    fn test_empty_parameter_name() {
        let q = from("users")
            .where_clause(id().eq(param("", LogicalType::Int64)))
            .build();
        assert_validation_error(&q, "parameter name is empty");
    }

    #[test]
    fn test_insert_arity_mismatch() {
        let q = insert_into("users")
            .columns([id()])
            .values([param("a", LogicalType::Int64), param("b", LogicalType::Int64)])
            .build();
        assert_validation_error(&q, "does not match value count");
    }

    #[test]
    fn test_insert_without_values() {
        let q = insert_into("users").columns([id()]).build();
        assert_validation_error(&q, "at least one value");
    }

    #[test]
    fn test_update_without_set() {
        let q = update("users").where_clause(id().eq(1i64)).build();
        assert_validation_error(&q, "at least one SET clause");
    }

    #[test]
    fn test_empty_json_agg() {
        let q = from("categories").select_json_agg("pets", []).build();
        assert_validation_error(&q, "JSON aggregation \"pets\" has no columns");
    }

    #[test]
    fn test_subquery_is_validated() {
        let bad_inner = from("").build();
        let q = from("users")
            .where_clause(id().in_subquery(bad_inner))
            .build();
        assert_validation_error(&q, "table name is empty");
    }

    #[test]
    fn test_compound_branches_are_validated() {
        let good = from("a").columns([Column::new("a", "x", LogicalType::Int32)]);
        let bad = from("").build();
        let q = good.union(bad).build();
        assert_validation_error(&q, "table name is empty");
    }
}
