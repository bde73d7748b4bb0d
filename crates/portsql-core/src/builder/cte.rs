//! WITH-clause builder.

use crate::ast::{Cte, Query, TableRef};

use super::select::SelectBuilder;

/// Accumulates named CTEs for a WITH clause.
#[derive(Debug, Clone)]
pub struct CteBuilder {
    ctes: Vec<Cte>,
}

impl CteBuilder {
    pub(crate) fn new(name: String, columns: Vec<String>, query: Query) -> Self {
        Self {
            ctes: vec![Cte {
                name,
                columns,
                query,
            }],
        }
    }

    /// Appends another CTE.
    #[must_use]
    pub fn and(mut self, name: impl Into<String>, query: impl Into<Query>) -> Self {
        self.ctes.push(Cte {
            name: name.into(),
            columns: vec![],
            query: query.into(),
        });
        self
    }

    /// Appends another CTE with explicit column names.
    #[must_use]
    pub fn and_columns<I>(
        mut self,
        name: impl Into<String>,
        columns: I,
        query: impl Into<Query>,
    ) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        self.ctes.push(Cte {
            name: name.into(),
            columns: columns.into_iter().map(Into::into).collect(),
            query: query.into(),
        });
        self
    }

    /// Starts the main SELECT; the accumulated CTEs attach on `build()`.
    #[must_use]
    pub fn select(self, table: impl Into<TableRef>) -> SelectBuilder {
        SelectBuilder::new(table.into(), self.ctes)
    }
}

#[cfg(test)]
mod tests {
    use crate::ast::{Column, LogicalType, Query};
    use crate::builder::{from, with};

    #[test]
    fn test_ctes_attach_to_built_select() {
        let recent = from("orders")
            .columns([Column::new("orders", "id", LogicalType::Int64)])
            .build();
        let q = with("recent", recent)
            .and(
                "totals",
                from("line_items").columns([Column::new("line_items", "total", LogicalType::Decimal)]),
            )
            .select("recent")
            .build();
        match q {
            Query::Select(s) => {
                assert_eq!(s.ctes.len(), 2);
                assert_eq!(s.ctes[0].name, "recent");
                assert_eq!(s.ctes[1].name, "totals");
                assert_eq!(s.from.name, "recent");
            }
            other => panic!("unexpected query: {other:?}"),
        }
    }

    #[test]
    fn test_and_columns_records_names() {
        let inner = from("t")
            .columns([Column::new("t", "a", LogicalType::Int32)])
            .build();
        let q = with("base", inner.clone())
            .and_columns("renamed", ["x"], inner)
            .select("renamed")
            .build();
        match q {
            Query::Select(s) => assert_eq!(s.ctes[1].columns, vec![String::from("x")]),
            other => panic!("unexpected query: {other:?}"),
        }
    }
}
