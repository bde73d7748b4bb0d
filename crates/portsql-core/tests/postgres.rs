//! PostgreSQL compilation scenarios.

use portsql_core::ast::expression::{exists, param};
use portsql_core::ast::{Column, LogicalType};
use portsql_core::builder::{from, with};
use portsql_core::compiler::compile;
use portsql_core::dialect::Postgres;
use pretty_assertions::assert_eq;

fn orders_id() -> Column {
    Column::new("orders", "id", LogicalType::Int64)
}

fn orders_status() -> Column {
    Column::new("orders", "status", LogicalType::String)
}

fn orders_customer_id() -> Column {
    Column::new("orders", "customer_id", LogicalType::Int64)
}

fn customers_id() -> Column {
    Column::new("customers", "id", LogicalType::Int64)
}

#[test]
fn nested_params_number_across_subquery() {
    let tier = Column::new("customers", "tier", LogicalType::String);
    let inner = from("customers")
        .columns([customers_id()])
        .where_clause(tier.eq(param("tier", LogicalType::String)))
        .build();
    let query = from("orders")
        .columns([orders_id()])
        .where_clause(
            orders_status()
                .eq(param("status", LogicalType::String))
                .and(orders_customer_id().in_subquery(inner)),
        )
        .build();

    let (sql, params) = compile(&query, &Postgres).unwrap();
    assert_eq!(
        sql,
        "SELECT \"orders\".\"id\" FROM \"orders\" WHERE ((\"orders\".\"status\" = $1) AND \
         (\"orders\".\"customer_id\" IN (SELECT \"customers\".\"id\" FROM \"customers\" \
         WHERE (\"customers\".\"tier\" = $2))))"
    );
    assert_eq!(params, vec!["status", "tier"]);
}

#[test]
fn repeated_parameter_binds_twice() {
    let query = from("orders")
        .columns([orders_id()])
        .where_clause(
            orders_status()
                .eq(param("status", LogicalType::String))
                .or(orders_status().eq(param("status", LogicalType::String))),
        )
        .build();

    let (sql, params) = compile(&query, &Postgres).unwrap();
    assert!(sql.contains("$1"));
    assert!(sql.contains("$2"));
    assert_eq!(params, vec!["status", "status"]);
}

#[test]
fn set_operation_wraps_branches_and_orders_combined_result() {
    let a_email = Column::new("a", "email", LogicalType::String);
    let b_email = Column::new("b", "email", LogicalType::String);
    let query = from("a")
        .columns([a_email.clone()])
        .union(from("b").columns([b_email]))
        .order_by(a_email.desc())
        .limit(10i64)
        .offset(5i64)
        .build();

    let (sql, _) = compile(&query, &Postgres).unwrap();
    assert_eq!(
        sql,
        "(SELECT \"a\".\"email\" FROM \"a\") UNION (SELECT \"b\".\"email\" FROM \"b\") \
         ORDER BY \"a\".\"email\" DESC LIMIT 10 OFFSET 5"
    );
}

#[test]
fn cte_parameters_stay_continuous() {
    let amount = Column::new("orders", "amount", LogicalType::Decimal);
    let recent = from("orders")
        .columns([orders_id()])
        .where_clause(amount.gt(param("min_amount", LogicalType::Decimal)))
        .build();
    let query = with("recent", recent)
        .select("recent")
        .where_clause(
            Column::new("recent", "id", LogicalType::Int64).gt(param("after", LogicalType::Int64)),
        )
        .build();

    let (sql, params) = compile(&query, &Postgres).unwrap();
    assert_eq!(
        sql,
        "WITH \"recent\" AS (SELECT \"orders\".\"id\" FROM \"orders\" \
         WHERE (\"orders\".\"amount\" > $1)) SELECT * FROM \"recent\" \
         WHERE (\"recent\".\"id\" > $2)"
    );
    assert_eq!(params, vec!["min_amount", "after"]);
}

#[test]
fn json_aggregation_with_left_join_falls_back_to_empty_array() {
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

    let (sql, _) = compile(&query, &Postgres).unwrap();
    assert_eq!(
        sql,
        "SELECT \"categories\".\"name\", COALESCE(JSON_AGG(JSON_BUILD_OBJECT('name', \
         \"pets\".\"name\")) FILTER (WHERE \"pets\".\"name\" IS NOT NULL), '[]') AS \"pets\" \
         FROM \"categories\" LEFT JOIN \"pets\" ON (\"categories\".\"id\" = \
         \"pets\".\"category_id\") GROUP BY \"categories\".\"name\""
    );
}

#[test]
fn exists_compiles_with_shared_numbering() {
    let inner = from("orders")
        .columns([orders_id()])
        .where_clause(orders_status().eq(param("status", LogicalType::String)))
        .build();
    let query = from("customers")
        .columns([customers_id()])
        .where_clause(
            Column::new("customers", "active", LogicalType::Bool)
                .eq(param("active", LogicalType::Bool))
                .and(exists(inner)),
        )
        .build();

    let (sql, params) = compile(&query, &Postgres).unwrap();
    assert!(sql.contains("EXISTS (SELECT"));
    assert!(sql.contains("= $1"));
    assert!(sql.contains("= $2"));
    assert_eq!(params, vec!["active", "status"]);
}

#[test]
fn no_collation_suffix_on_string_order_by() {
    let email = Column::new("users", "email", LogicalType::String);
    let query = from("users").columns([email.clone()]).order_by(email.desc()).build();
    let (sql, _) = compile(&query, &Postgres).unwrap();
    assert_eq!(
        sql,
        "SELECT \"users\".\"email\" FROM \"users\" ORDER BY \"users\".\"email\" DESC"
    );
}

#[test]
fn table_alias_qualifies_columns() {
    use portsql_core::ast::TableRef;

    let id = orders_id().with_table("o");
    let query = from(TableRef::aliased("orders", "o"))
        .columns([id.clone()])
        .where_clause(id.eq(param("id", LogicalType::Int64)))
        .build();
    let (sql, _) = compile(&query, &Postgres).unwrap();
    assert_eq!(
        sql,
        "SELECT \"o\".\"id\" FROM \"orders\" AS \"o\" WHERE (\"o\".\"id\" = $1)"
    );
}
