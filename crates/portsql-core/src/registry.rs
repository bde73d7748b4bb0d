//! Process-wide named-query registry.
//!
//! Consumer modules register their query definitions during startup; code
//! generators and runners enumerate them later. The backing map is a
//! concurrent [`DashMap`] so parallel initializers never contend on a
//! single lock. Collisions are programmer errors and fail hard at
//! registration time: continuing past one would silently drop a
//! definition.

use std::collections::HashMap;
use std::sync::LazyLock;

use dashmap::DashMap;
use dashmap::mapref::entry::Entry;

use crate::ast::Query;
use crate::error::{QueryError, Result};

/// How the caller consumes the rows of a registered query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReturnCardinality {
    /// Zero or one row.
    One,
    /// A sequence of rows.
    Many,
    /// No rows expected (INSERT/UPDATE/DELETE without RETURNING).
    Exec,
}

/// A registered query definition.
#[derive(Debug, Clone)]
pub struct RegisteredQuery {
    /// The query IR.
    pub query: Query,
    /// Result consumption model.
    pub cardinality: ReturnCardinality,
}

static REGISTRY: LazyLock<DashMap<String, RegisteredQuery>> = LazyLock::new(DashMap::new);

fn register(name: &str, query: Query, cardinality: ReturnCardinality) -> Result<()> {
    if name.is_empty() {
        return Err(QueryError::Registration(String::from(
            "query name is empty",
        )));
    }
    match REGISTRY.entry(String::from(name)) {
        Entry::Occupied(_) => Err(QueryError::Registration(format!(
            "duplicate query name {name:?}"
        ))),
        Entry::Vacant(slot) => {
            slot.insert(RegisteredQuery { query, cardinality });
            tracing::debug!(query = name, cardinality = ?cardinality, "registered query");
            Ok(())
        }
    }
}

fn define(name: &str, query: Query, cardinality: ReturnCardinality) {
    if let Err(error) = register(name, query, cardinality) {
        panic!("{error}");
    }
}

/// Registers a query returning zero or one row.
///
/// # Panics
///
/// Panics on an empty or duplicate name; registration runs at startup and
/// a collision means two definitions share a name.
pub fn define_one(name: &str, query: impl Into<Query>) {
    define(name, query.into(), ReturnCardinality::One);
}

/// Registers a query returning a sequence of rows.
///
/// # Panics
///
/// Panics on an empty or duplicate name.
pub fn define_many(name: &str, query: impl Into<Query>) {
    define(name, query.into(), ReturnCardinality::Many);
}

/// Registers a query executed for effect, returning no rows.
///
/// # Panics
///
/// Panics on an empty or duplicate name.
pub fn define_exec(name: &str, query: impl Into<Query>) {
    define(name, query.into(), ReturnCardinality::Exec);
}

/// Registers a query with the default MANY cardinality.
///
/// Kept for callers predating the cardinality split.
///
/// # Panics
///
/// Panics on an empty or duplicate name.
pub fn define_query(name: &str, query: impl Into<Query>) {
    define_many(name, query);
}

/// Returns a snapshot copy of the current registry.
///
/// Mutating the returned map does not affect the registry; definitions
/// registered concurrently may or may not appear in the snapshot.
#[must_use]
pub fn get_registered() -> HashMap<String, RegisteredQuery> {
    REGISTRY
        .iter()
        .map(|entry| (entry.key().clone(), entry.value().clone()))
        .collect()
}

/// Removes every registered query. Test-only affordance.
pub fn clear() {
    REGISTRY.clear();
}

/// Returns the number of registered queries. Test-only affordance.
#[must_use]
pub fn count() -> usize {
    REGISTRY.len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{Column, LogicalType};
    use crate::builder::from;

    fn sample() -> Query {
        from("users")
            .columns([Column::new("users", "id", LogicalType::Int64)])
            .build()
    }

    #[test]
    fn test_define_and_snapshot() {
        define_one("registry_test_get_user", sample());
        define_exec("registry_test_touch_user", sample());
        let registered = get_registered();
        assert_eq!(
            registered["registry_test_get_user"].cardinality,
            ReturnCardinality::One
        );
        assert_eq!(
            registered["registry_test_touch_user"].cardinality,
            ReturnCardinality::Exec
        );
        assert!(count() >= 2);
    }

    #[test]
    fn test_define_query_defaults_to_many() {
        define_query("registry_test_list_users", sample());
        assert_eq!(
            get_registered()["registry_test_list_users"].cardinality,
            ReturnCardinality::Many
        );
    }

    #[test]
    fn test_snapshot_is_a_copy() {
        define_many("registry_test_snapshot", sample());
        let mut snapshot = get_registered();
        snapshot.remove("registry_test_snapshot");
        assert!(get_registered().contains_key("registry_test_snapshot"));
    }

    #[test]
    #[should_panic(expected = "duplicate query name")]
    fn test_duplicate_name_panics() {
        define_many("registry_test_duplicate", sample());
        define_one("registry_test_duplicate", sample());
    }

    #[test]
    #[should_panic(expected = "query name is empty")]
    fn test_empty_name_panics() {
        define_many("", sample());
    }

    #[test]
    fn test_concurrent_defines() {
        std::thread::scope(|scope| {
            for worker in 0..8 {
                scope.spawn(move || {
                    for index in 0..16 {
                        define_many(&format!("registry_test_parallel_{worker}_{index}"), sample());
                    }
                });
            }
        });
        let registered = get_registered();
        for worker in 0..8 {
            for index in 0..16 {
                assert!(registered.contains_key(&format!("registry_test_parallel_{worker}_{index}")));
            }
        }
    }
}
