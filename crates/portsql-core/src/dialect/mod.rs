//! SQL dialect support.
//!
//! A dialect is a vocabulary of formatting decisions: identifier quoting,
//! placeholder style, literal spellings, and rewrites for constructs the
//! engine lacks. Dialects are stateless value objects; one instance can
//! serve any number of concurrent compilations.

mod mysql;
mod postgres;
mod sqlite;

pub use mysql::MySql;
pub use postgres::Postgres;
pub use sqlite::Sqlite;

use crate::ast::LogicalType;

/// Trait for dialect-specific SQL formatting.
pub trait Dialect {
    /// Returns the name of the dialect.
    fn name(&self) -> &'static str;

    /// Returns the identifier quote character.
    fn quote_char(&self) -> char {
        '"'
    }

    /// Quotes an identifier, escaping embedded quote characters by doubling.
    fn quote_identifier(&self, ident: &str) -> String {
        let quote = self.quote_char();
        let mut out = String::with_capacity(ident.len() + 2);
        out.push(quote);
        for ch in ident.chars() {
            out.push(ch);
            if ch == quote {
                out.push(ch);
            }
        }
        out.push(quote);
        out
    }

    /// Renders the placeholder for the 1-based parameter `index`.
    fn placeholder(&self, index: usize) -> String {
        let _ = index;
        String::from("?")
    }

    /// Renders a boolean literal.
    fn bool_literal(&self, value: bool) -> &'static str {
        if value { "TRUE" } else { "FALSE" }
    }

    /// Returns the current-timestamp function call.
    fn now_function(&self) -> &'static str {
        "NOW()"
    }

    /// Returns whether set-operation branches are wrapped in parentheses.
    fn parenthesized_set_ops(&self) -> bool {
        true
    }

    /// Returns whether the dialect supports the RETURNING clause.
    fn supports_returning(&self) -> bool;

    /// Renders a case-insensitive LIKE between two compiled operands.
    fn ilike(&self, left: &str, right: &str) -> String {
        format!("LOWER({left}) LIKE LOWER({right})")
    }

    /// Renders a JSON-array-of-objects aggregation.
    ///
    /// `entries` pairs an already-quoted key literal with the compiled
    /// column reference it projects. The first column doubles as the
    /// NULL sentinel so groups without matching rows collapse to `[]`.
    fn json_agg(&self, entries: &[(String, String)]) -> String;

    /// Returns a suffix appended to ORDER BY column references, if any.
    ///
    /// MySQL uses this to force case-sensitive ordering on text columns.
    fn order_by_suffix(&self, ty: LogicalType) -> Option<&'static str> {
        let _ = ty;
        None
    }
}

pub(crate) fn json_object_args(entries: &[(String, String)]) -> String {
    let mut out = String::new();
    for (index, (key, column)) in entries.iter().enumerate() {
        if index > 0 {
            out.push_str(", ");
        }
        out.push_str(key);
        out.push_str(", ");
        out.push_str(column);
    }
    out
}
