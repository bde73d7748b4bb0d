//! PostgreSQL dialect.

use super::{Dialect, json_object_args};

/// PostgreSQL: `"ident"` quoting, `$N` placeholders, native booleans and
/// ILIKE, RETURNING support.
#[derive(Debug, Clone, Copy, Default)]
pub struct Postgres;

impl Dialect for Postgres {
    fn name(&self) -> &'static str {
        "postgres"
    }

    fn placeholder(&self, index: usize) -> String {
        format!("${index}")
    }

    fn supports_returning(&self) -> bool {
        true
    }

    fn ilike(&self, left: &str, right: &str) -> String {
        format!("{left} ILIKE {right}")
    }

    fn json_agg(&self, entries: &[(String, String)]) -> String {
        match entries.first() {
            Some((_, sentinel)) => format!(
                "COALESCE(JSON_AGG(JSON_BUILD_OBJECT({})) FILTER (WHERE {sentinel} IS NOT NULL), '[]')",
                json_object_args(entries)
            ),
            None => String::from("'[]'"),
        }
    }
}
