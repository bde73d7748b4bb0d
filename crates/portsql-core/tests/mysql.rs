//! MySQL compilation scenarios.

use portsql_core::ast::expression::param;
use portsql_core::ast::{Column, LogicalType};
use portsql_core::builder::{from, insert_into};
use portsql_core::compiler::compile;
use portsql_core::dialect::MySql;
use pretty_assertions::assert_eq;

fn authors_id() -> Column {
    Column::new("authors", "id", LogicalType::Int64)
}

fn authors_name() -> Column {
    Column::new("authors", "name", LogicalType::String)
}

#[test]
fn single_parameter_select() {
    let query = from("authors")
        .columns([authors_id()])
        .where_clause(authors_id().eq(param("id", LogicalType::Int64)))
        .build();

    let (sql, params) = compile(&query, &MySql).unwrap();
    assert_eq!(
        sql,
        "SELECT `authors`.`id` FROM `authors` WHERE (`authors`.`id` = ?)"
    );
    assert_eq!(params, vec!["id"]);
}

#[test]
fn string_order_by_gets_binary_collation() {
    let name = Column::new("t", "name", LogicalType::String);
    let query = from("t").columns([name.clone()]).order_by(name.desc()).build();

    let (sql, _) = compile(&query, &MySql).unwrap();
    assert_eq!(
        sql,
        "SELECT `t`.`name` FROM `t` ORDER BY `t`.`name` COLLATE utf8mb4_bin DESC"
    );
}

#[test]
fn non_string_order_by_is_untouched() {
    let id = authors_id();
    let query = from("authors").columns([id.clone()]).order_by(id.asc()).build();

    let (sql, _) = compile(&query, &MySql).unwrap();
    assert_eq!(
        sql,
        "SELECT `authors`.`id` FROM `authors` ORDER BY `authors`.`id` ASC"
    );
}

#[test]
fn returning_is_silently_dropped() {
    let query = insert_into("authors")
        .columns([authors_name()])
        .values([param("name", LogicalType::String)])
        .returning([authors_id()])
        .build();

    let (sql, params) = compile(&query, &MySql).unwrap();
    assert_eq!(sql, "INSERT INTO `authors` (`name`) VALUES (?)");
    assert_eq!(params, vec!["name"]);
}

#[test]
fn set_operation_branches_are_parenthesized() {
    let a_x = Column::new("a", "x", LogicalType::Int32);
    let b_x = Column::new("b", "x", LogicalType::Int32);
    let query = from("a")
        .columns([a_x])
        .union_all(from("b").columns([b_x]))
        .build();

    let (sql, _) = compile(&query, &MySql).unwrap();
    assert_eq!(
        sql,
        "(SELECT `a`.`x` FROM `a`) UNION ALL (SELECT `b`.`x` FROM `b`)"
    );
}

#[test]
fn json_aggregation_uses_arrayagg_with_case_guard() {
    let cat_name = Column::new("categories", "name", LogicalType::String);
    let cat_id = Column::new("categories", "id", LogicalType::Int64);
    let pet_name = Column::new("pets", "name", LogicalType::String);
    let pet_category = Column::new("pets", "category_id", LogicalType::Int64);

    let query = from("categories")
        .columns([cat_name.clone()])
        .select_json_agg("pets", [pet_name])
        .left_join("pets", cat_id.eq(pet_category))
        .group_by([cat_name])
        .build();

    let (sql, _) = compile(&query, &MySql).unwrap();
    assert_eq!(
        sql,
        "SELECT `categories`.`name`, COALESCE(JSON_ARRAYAGG(CASE WHEN `pets`.`name` \
         IS NOT NULL THEN JSON_OBJECT('name', `pets`.`name`) END), JSON_ARRAY()) AS `pets` \
         FROM `categories` LEFT JOIN `pets` ON (`categories`.`id` = `pets`.`category_id`) \
         GROUP BY `categories`.`name`"
    );
}

#[test]
fn ilike_is_rewritten_through_lower() {
    let query = from("authors")
        .columns([authors_id()])
        .where_clause(authors_name().ilike(param("pattern", LogicalType::String)))
        .build();

    let (sql, params) = compile(&query, &MySql).unwrap();
    assert!(sql.contains("(LOWER(`authors`.`name`) LIKE LOWER(?))"));
    assert_eq!(params, vec!["pattern"]);
}

#[test]
fn placeholder_count_matches_parameter_list() {
    let query = from("authors")
        .columns([authors_id()])
        .where_clause(
            authors_name()
                .eq(param("name", LogicalType::String))
                .or(authors_name().eq(param("name", LogicalType::String))),
        )
        .limit(param("limit", LogicalType::Int32))
        .build();

    let (sql, params) = compile(&query, &MySql).unwrap();
    assert_eq!(sql.matches('?').count(), params.len());
    assert_eq!(params, vec!["name", "name", "limit"]);
}
