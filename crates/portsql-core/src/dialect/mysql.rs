//! MySQL dialect.

use crate::ast::LogicalType;

use super::{Dialect, json_object_args};

/// MySQL: backtick quoting, `?` placeholders, numeric booleans, no
/// RETURNING, LOWER-based ILIKE, and binary collation on string ORDER BY
/// columns for case-sensitive parity with the other engines.
#[derive(Debug, Clone, Copy, Default)]
pub struct MySql;

impl Dialect for MySql {
    fn name(&self) -> &'static str {
        "mysql"
    }

    fn quote_char(&self) -> char {
        '`'
    }

    fn bool_literal(&self, value: bool) -> &'static str {
        if value { "1" } else { "0" }
    }

    fn supports_returning(&self) -> bool {
        false
    }

    fn json_agg(&self, entries: &[(String, String)]) -> String {
        match entries.first() {
            Some((_, sentinel)) => format!(
                "COALESCE(JSON_ARRAYAGG(CASE WHEN {sentinel} IS NOT NULL THEN JSON_OBJECT({}) END), JSON_ARRAY())",
                json_object_args(entries)
            ),
            None => String::from("JSON_ARRAY()"),
        }
    }

    fn order_by_suffix(&self, ty: LogicalType) -> Option<&'static str> {
        ty.is_text().then_some(" COLLATE utf8mb4_bin")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backtick_quoting_doubles_backticks() {
        assert_eq!(MySql.quote_identifier("name"), "`name`");
        assert_eq!(MySql.quote_identifier("we`ird"), "`we``ird`");
    }

    #[test]
    fn test_positional_placeholders() {
        assert_eq!(MySql.placeholder(1), "?");
        assert_eq!(MySql.placeholder(7), "?");
    }

    #[test]
    fn test_numeric_booleans() {
        assert_eq!(MySql.bool_literal(true), "1");
        assert_eq!(MySql.bool_literal(false), "0");
    }

    #[test]
    fn test_ilike_lowers_both_sides() {
        assert_eq!(
            MySql.ilike("`u`.`name`", "?"),
            "LOWER(`u`.`name`) LIKE LOWER(?)"
        );
    }

    #[test]
    fn test_collation_only_for_text() {
        assert_eq!(
            MySql.order_by_suffix(LogicalType::String),
            Some(" COLLATE utf8mb4_bin")
        );
        assert_eq!(
            MySql.order_by_suffix(LogicalType::NullableString),
            Some(" COLLATE utf8mb4_bin")
        );
        assert_eq!(MySql.order_by_suffix(LogicalType::Int64), None);
    }

    #[test]
    fn test_json_agg_uses_case_guard() {
        let entries = vec![(String::from("'name'"), String::from("`pets`.`name`"))];
        assert_eq!(
            MySql.json_agg(&entries),
            "COALESCE(JSON_ARRAYAGG(CASE WHEN `pets`.`name` IS NOT NULL \
             THEN JSON_OBJECT('name', `pets`.`name`) END), JSON_ARRAY())"
        );
    }
}
