//! SQLite dialect.

use super::{Dialect, json_object_args};

/// SQLite: `"ident"` quoting, `?` placeholders, numeric booleans,
/// `datetime('now')`, bare set-operation branches, RETURNING support.
#[derive(Debug, Clone, Copy, Default)]
pub struct Sqlite;

impl Dialect for Sqlite {
    fn name(&self) -> &'static str {
        "sqlite"
    }

    fn bool_literal(&self, value: bool) -> &'static str {
        if value { "1" } else { "0" }
    }

    fn now_function(&self) -> &'static str {
        "datetime('now')"
    }

    fn parenthesized_set_ops(&self) -> bool {
        false
    }

    fn supports_returning(&self) -> bool {
        true
    }

    fn json_agg(&self, entries: &[(String, String)]) -> String {
        match entries.first() {
            Some((_, sentinel)) => format!(
                "COALESCE(JSON_GROUP_ARRAY(CASE WHEN {sentinel} IS NOT NULL THEN JSON_OBJECT({}) END), '[]')",
                json_object_args(entries)
            ),
            None => String::from("'[]'"),
        }
    }
}
