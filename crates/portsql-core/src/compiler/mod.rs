//! Compilation of query IR into dialect-specific SQL.
//!
//! A single top-level [`compile`] call validates the IR, then walks it once,
//! appending SQL text and recording every named-parameter occurrence in
//! emission order. One parameter counter is threaded through all nested
//! scopes (subqueries, CTE bodies, and set-operation branches) so
//! PostgreSQL's `$N` numbering stays continuous across the whole statement.

use crate::ast::{
    Column, CompoundQuery, Cte, DeleteQuery, Expr, InsertQuery, Literal, OrderByItem, Param, Query,
    SelectQuery, TableRef, UpdateQuery,
};
use crate::dialect::Dialect;
use crate::error::{QueryError, Result};
use crate::validate::validate;

/// Compiles a query for a dialect.
///
/// Returns the SQL text and the parameter names in placeholder order: the
/// i-th name binds the (i+1)-th positional placeholder. A parameter
/// referenced several times appears once per occurrence.
pub fn compile(query: &Query, dialect: &dyn Dialect) -> Result<(String, Vec<String>)> {
    validate(query)?;
    let mut compiler = Compiler::new(dialect);
    compiler.query(query)?;
    tracing::debug!(
        dialect = dialect.name(),
        kind = %query.kind(),
        params = compiler.param_order.len(),
        "compiled query"
    );
    Ok((compiler.sql, compiler.param_order))
}

struct Compiler<'a> {
    dialect: &'a dyn Dialect,
    sql: String,
    counter: usize,
    param_order: Vec<String>,
}

impl<'a> Compiler<'a> {
    fn new(dialect: &'a dyn Dialect) -> Self {
        Self {
            dialect,
            sql: String::new(),
            counter: 0,
            param_order: vec![],
        }
    }

    fn push(&mut self, s: &str) {
        self.sql.push_str(s);
    }

    fn query(&mut self, query: &Query) -> Result<()> {
        match query {
            Query::Select(select) => self.select(select),
            Query::Insert(insert) => self.insert(insert),
            Query::Update(update) => self.update(update),
            Query::Delete(delete) => self.delete(delete),
            Query::Compound(compound) => self.compound(compound),
        }
    }

    fn select(&mut self, select: &SelectQuery) -> Result<()> {
        self.ctes(&select.ctes)?;
        self.push("SELECT ");
        if select.distinct {
            self.push("DISTINCT ");
        }
        if select.columns.is_empty() {
            self.push("*");
        } else {
            for (index, item) in select.columns.iter().enumerate() {
                if index > 0 {
                    self.push(", ");
                }
                self.expr(&item.expr)?;
                if let Some(alias) = &item.alias {
                    self.push(" AS ");
                    self.identifier(alias);
                }
            }
        }
        self.push(" FROM ");
        self.table_ref(&select.from);
        for join in &select.joins {
            self.push(" ");
            self.push(join.join_type.as_str());
            self.push(" ");
            self.table_ref(&join.table);
            self.push(" ON ");
            self.expr(&join.on)?;
        }
        if let Some(condition) = &select.where_clause {
            self.push(" WHERE ");
            self.expr(condition)?;
        }
        if !select.group_by.is_empty() {
            self.push(" GROUP BY ");
            for (index, column) in select.group_by.iter().enumerate() {
                if index > 0 {
                    self.push(", ");
                }
                self.column(column);
            }
        }
        if let Some(condition) = &select.having {
            self.push(" HAVING ");
            self.expr(condition)?;
        }
        self.order_by(&select.order_by)?;
        self.limit_offset(select.limit.as_ref(), select.offset.as_ref())
    }

    fn insert(&mut self, insert: &InsertQuery) -> Result<()> {
        self.push("INSERT INTO ");
        self.table_ref(&insert.table);
        if !insert.columns.is_empty() {
            self.push(" (");
            for (index, column) in insert.columns.iter().enumerate() {
                if index > 0 {
                    self.push(", ");
                }
                self.identifier(&column.name);
            }
            self.push(")");
        }
        self.push(" VALUES (");
        for (index, value) in insert.values.iter().enumerate() {
            if index > 0 {
                self.push(", ");
            }
            self.expr(value)?;
        }
        self.push(")");
        // MySQL has no RETURNING; callers use the driver's last-insert-id.
        if !insert.returning.is_empty() && self.dialect.supports_returning() {
            self.push(" RETURNING ");
            for (index, column) in insert.returning.iter().enumerate() {
                if index > 0 {
                    self.push(", ");
                }
                self.identifier(&column.name);
            }
        }
        Ok(())
    }

    fn update(&mut self, update: &UpdateQuery) -> Result<()> {
        self.push("UPDATE ");
        self.table_ref(&update.table);
        self.push(" SET ");
        for (index, assignment) in update.set.iter().enumerate() {
            if index > 0 {
                self.push(", ");
            }
            self.identifier(&assignment.column.name);
            self.push(" = ");
            self.expr(&assignment.value)?;
        }
        if let Some(condition) = &update.where_clause {
            self.push(" WHERE ");
            self.expr(condition)?;
        }
        Ok(())
    }

    fn delete(&mut self, delete: &DeleteQuery) -> Result<()> {
        self.push("DELETE FROM ");
        self.table_ref(&delete.table);
        if let Some(condition) = &delete.where_clause {
            self.push(" WHERE ");
            self.expr(condition)?;
        }
        Ok(())
    }

    fn compound(&mut self, compound: &CompoundQuery) -> Result<()> {
        self.ctes(&compound.ctes)?;
        self.branch(&compound.left)?;
        self.push(" ");
        self.push(compound.op.as_str());
        self.push(" ");
        self.branch(&compound.right)?;
        self.order_by(&compound.order_by)?;
        self.limit_offset(compound.limit.as_ref(), compound.offset.as_ref())
    }

    fn branch(&mut self, query: &Query) -> Result<()> {
        if self.dialect.parenthesized_set_ops() {
            self.push("(");
            self.query(query)?;
            self.push(")");
            Ok(())
        } else {
            self.query(query)
        }
    }

    fn ctes(&mut self, ctes: &[Cte]) -> Result<()> {
        if ctes.is_empty() {
            return Ok(());
        }
        self.push("WITH ");
        for (index, cte) in ctes.iter().enumerate() {
            if index > 0 {
                self.push(", ");
            }
            self.identifier(&cte.name);
            if !cte.columns.is_empty() {
                self.push(" (");
                for (col_index, column) in cte.columns.iter().enumerate() {
                    if col_index > 0 {
                        self.push(", ");
                    }
                    self.identifier(column);
                }
                self.push(")");
            }
            self.push(" AS (");
            self.query(&cte.query)?;
            self.push(")");
        }
        self.push(" ");
        Ok(())
    }

    fn order_by(&mut self, items: &[OrderByItem]) -> Result<()> {
        if items.is_empty() {
            return Ok(());
        }
        self.push(" ORDER BY ");
        for (index, item) in items.iter().enumerate() {
            if index > 0 {
                self.push(", ");
            }
            self.expr(&item.expr)?;
            if let Expr::Column(column) = &item.expr {
                if let Some(suffix) = self.dialect.order_by_suffix(column.ty) {
                    self.push(suffix);
                }
            }
            self.push(if item.desc { " DESC" } else { " ASC" });
        }
        Ok(())
    }

    fn limit_offset(&mut self, limit: Option<&Expr>, offset: Option<&Expr>) -> Result<()> {
        if let Some(expr) = limit {
            self.push(" LIMIT ");
            self.expr(expr)?;
        }
        if let Some(expr) = offset {
            self.push(" OFFSET ");
            self.expr(expr)?;
        }
        Ok(())
    }

    fn expr(&mut self, expr: &Expr) -> Result<()> {
        match expr {
            Expr::Column(column) => {
                self.column(column);
                Ok(())
            }
            Expr::Param(param) => {
                self.param(param);
                Ok(())
            }
            Expr::Literal(literal) => self.literal(literal),
            Expr::Binary { left, op, right } => {
                self.push("(");
                self.expr(left)?;
                self.push(" ");
                self.push(op.as_str());
                self.push(" ");
                self.expr(right)?;
                self.push(")");
                Ok(())
            }
            Expr::Unary { op, expr } => {
                if op.is_postfix() {
                    self.expr(expr)?;
                    self.push(" ");
                    self.push(op.as_str());
                } else {
                    self.push(op.as_str());
                    self.push(" ");
                    self.expr(expr)?;
                }
                Ok(())
            }
            Expr::Func { name, args } => self.func(name, args),
            Expr::List(values) => {
                self.push("(");
                for (index, value) in values.iter().enumerate() {
                    if index > 0 {
                        self.push(", ");
                    }
                    self.expr(value)?;
                }
                self.push(")");
                Ok(())
            }
            Expr::Aggregate {
                func,
                arg,
                distinct,
            } => {
                self.push(func.as_str());
                self.push("(");
                match arg {
                    Some(expr) => {
                        if *distinct {
                            self.push("DISTINCT ");
                        }
                        self.expr(expr)?;
                    }
                    None => self.push("*"),
                }
                self.push(")");
                Ok(())
            }
            Expr::JsonAgg { field, columns } => self.json_agg(field, columns),
            Expr::Subquery(query) => {
                self.push("(");
                self.query(query)?;
                self.push(")");
                Ok(())
            }
            Expr::Exists { query, negated } => {
                if *negated {
                    self.push("NOT ");
                }
                self.push("EXISTS (");
                self.query(query)?;
                self.push(")");
                Ok(())
            }
        }
    }

    fn func(&mut self, name: &str, args: &[Expr]) -> Result<()> {
        if name.eq_ignore_ascii_case("NOW") {
            let now = self.dialect.now_function();
            self.push(now);
            return Ok(());
        }
        if name.eq_ignore_ascii_case("ILIKE") {
            let [left, right] = args else {
                return Err(QueryError::UnsupportedExpression(format!(
                    "ILIKE takes exactly two arguments, got {}",
                    args.len()
                )));
            };
            let left = self.fragment(left)?;
            let right = self.fragment(right)?;
            let rewritten = self.dialect.ilike(&left, &right);
            self.push("(");
            self.push(&rewritten);
            self.push(")");
            return Ok(());
        }
        self.push(name);
        self.push("(");
        for (index, arg) in args.iter().enumerate() {
            if index > 0 {
                self.push(", ");
            }
            self.expr(arg)?;
        }
        self.push(")");
        Ok(())
    }

    /// Compiles an expression into a detached fragment while sharing the
    /// parameter counter, for dialect hooks that rearrange operands.
    fn fragment(&mut self, expr: &Expr) -> Result<String> {
        let saved = std::mem::take(&mut self.sql);
        let result = self.expr(expr);
        let fragment = std::mem::replace(&mut self.sql, saved);
        result.map(|()| fragment)
    }

    fn json_agg(&mut self, field: &str, columns: &[Column]) -> Result<()> {
        if columns.is_empty() {
            return Err(QueryError::Validation(format!(
                "JSON aggregation {field:?} has no columns"
            )));
        }
        let entries: Vec<(String, String)> = columns
            .iter()
            .map(|column| {
                let key = quote_string(&column.name);
                let reference = format!(
                    "{}.{}",
                    self.dialect.quote_identifier(&column.table),
                    self.dialect.quote_identifier(&column.name)
                );
                (key, reference)
            })
            .collect();
        let rendered = self.dialect.json_agg(&entries);
        self.push(&rendered);
        Ok(())
    }

    fn literal(&mut self, literal: &Literal) -> Result<()> {
        match literal {
            Literal::Null => self.push("NULL"),
            Literal::Bool(value) => {
                let spelled = self.dialect.bool_literal(*value);
                self.push(spelled);
            }
            Literal::Int(value) => {
                let rendered = value.to_string();
                self.push(&rendered);
            }
            Literal::UInt(value) => {
                let rendered = value.to_string();
                self.push(&rendered);
            }
            Literal::Float(value) => {
                let rendered = value.to_string();
                self.push(&rendered);
            }
            Literal::String(value) => {
                let quoted = quote_string(value);
                self.push(&quoted);
            }
            Literal::Bytes(_) => {
                return Err(QueryError::UnsupportedExpression(String::from(
                    "bytes literals are not supported; bind binary data as a parameter",
                )));
            }
        }
        Ok(())
    }

    fn param(&mut self, param: &Param) {
        self.counter += 1;
        self.param_order.push(param.name.clone());
        let placeholder = self.dialect.placeholder(self.counter);
        self.push(&placeholder);
    }

    fn column(&mut self, column: &Column) {
        self.identifier(&column.table);
        self.sql.push('.');
        self.identifier(&column.name);
    }

    fn identifier(&mut self, ident: &str) {
        let quoted = self.dialect.quote_identifier(ident);
        self.push(&quoted);
    }

    fn table_ref(&mut self, table: &TableRef) {
        self.identifier(&table.name);
        if let Some(alias) = &table.alias {
            self.push(" AS ");
            self.identifier(alias);
        }
    }
}

fn quote_string(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('\'');
    for ch in value.chars() {
        out.push(ch);
        if ch == '\'' {
            out.push('\'');
        }
    }
    out.push('\'');
    out
}
