//! Builds parameterized INSERT and SELECT statements from a catalog resource.

use crate::catalog::Resource;
use serde_json::Value;
use std::collections::HashMap;

/// Quote identifier for PostgreSQL (names only come from the catalog).
fn quoted(s: &str) -> String {
    format!("\"{}\"", s.replace('"', "\"\""))
}

pub struct QueryBuf {
    pub sql: String,
    pub params: Vec<Value>,
}

impl QueryBuf {
    fn new() -> Self {
        QueryBuf {
            sql: String::new(),
            params: Vec::new(),
        }
    }

    fn push_param(&mut self, v: Value) -> usize {
        self.params.push(v);
        self.params.len()
    }
}

fn select_column_list(resource: &Resource) -> String {
    resource
        .columns
        .iter()
        .map(|c| quoted(c.name))
        .collect::<Vec<_>>()
        .join(", ")
}

/// INSERT one row. Body keys are snake_case column names; values are bound as
/// text and cast with `$n::type` so every column type binds correctly.
/// Columns with a database default are omitted when the body has no value;
/// other absent columns are inserted as NULL. Returns the stored row.
pub fn insert(resource: &Resource, body: &HashMap<String, Value>) -> QueryBuf {
    let mut q = QueryBuf::new();
    let mut cols = Vec::new();
    let mut placeholders = Vec::new();
    for c in &resource.columns {
        if c.pk {
            continue;
        }
        let val = body.get(c.name).cloned();
        if val.is_none() && c.has_default {
            continue;
        }
        let n = q.push_param(val.unwrap_or(Value::Null));
        cols.push(quoted(c.name));
        placeholders.push(format!("${}::{}", n, c.pg_type));
    }
    q.sql = format!(
        "INSERT INTO {} ({}) VALUES ({}) RETURNING {}",
        quoted(resource.table_name),
        cols.join(", "),
        placeholders.join(", "),
        select_column_list(resource)
    );
    q
}

/// SELECT every row, newest first. No pagination: list views render the full set.
pub fn select_all(resource: &Resource) -> QueryBuf {
    let mut q = QueryBuf::new();
    q.sql = format!(
        "SELECT {} FROM {} ORDER BY {} DESC",
        select_column_list(resource),
        quoted(resource.table_name),
        quoted("created_at")
    );
    q
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use serde_json::json;

    fn body(pairs: &[(&str, Value)]) -> HashMap<String, Value> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn insert_skips_pk_and_defaulted_created_at() {
        let catalog = Catalog::new();
        let message = catalog.by_path("messages").unwrap();
        let q = insert(
            message,
            &body(&[
                ("name", json!("Ana")),
                ("email", json!("ana@example.com")),
                ("subject", json!("Late arrival")),
                ("message", json!("Arriving after midnight")),
                ("status", json!("pending")),
            ]),
        );
        assert!(q.sql.starts_with("INSERT INTO \"messages\""));
        assert!(!q.sql.contains("(\"id\""));
        assert!(!q.sql.contains("\"created_at\","));
        assert!(q.sql.contains("RETURNING"));
        assert!(q.sql.contains("\"created_at\""));
        assert_eq!(q.params.len(), 5);
    }

    #[test]
    fn insert_binds_null_for_absent_optional_columns() {
        let catalog = Catalog::new();
        let reservation = catalog.by_path("reservations").unwrap();
        let q = insert(
            reservation,
            &body(&[
                ("guest_name", json!("Ana")),
                ("room_number", json!("12")),
                ("check_in_date", json!("2026-03-01T14:00:00Z")),
                ("check_out_date", json!("2026-03-04T11:00:00Z")),
                ("total_amount", json!(420.0)),
                ("document_id", json!("X-991")),
            ]),
        );
        // phone_number, email, notes are inserted explicitly as NULL
        assert_eq!(q.params.len(), 9);
        assert_eq!(q.params.iter().filter(|p| p.is_null()).count(), 3);
        assert!(q.sql.contains("$3::timestamptz"));
        assert!(q.sql.contains("$5::float8"));
    }

    #[test]
    fn select_all_orders_by_creation_desc() {
        let catalog = Catalog::new();
        let feedback = catalog.by_path("feedback").unwrap();
        let q = select_all(feedback);
        assert!(q.sql.ends_with("ORDER BY \"created_at\" DESC"));
        assert!(q.sql.contains("\"rating\""));
        assert!(q.params.is_empty());
    }

    #[test]
    fn identifiers_are_quoted() {
        let catalog = Catalog::new();
        let record = catalog.by_path("check-in-out").unwrap();
        let q = select_all(record);
        // "type" would otherwise need escaping care
        assert!(q.sql.contains("\"type\""));
    }
}
