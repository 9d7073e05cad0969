//! Create and list execution against PostgreSQL.

use crate::case;
use crate::catalog::Resource;
use crate::error::AppError;
use crate::sql::{self, PgBindValue, QueryBuf};
use serde_json::{Map, Value};
use sqlx::PgPool;

pub struct CrudService;

impl CrudService {
    /// Insert one validated row; exactly one durable write. Returns the stored
    /// representation with server defaults applied and camelCase keys.
    pub async fn create(
        pool: &PgPool,
        resource: &Resource,
        body: Map<String, Value>,
    ) -> Result<Value, AppError> {
        let mut body = strip_unknown_fields(body, resource);
        apply_defaults(&mut body, resource);
        if let Some(field) = resource.items_field {
            flatten_items(&mut body, field);
        }
        let columns = case::map_keys_to_snake_case(&body);
        let q = sql::insert(resource, &columns);
        let row = Self::execute_returning_one(pool, &q)
            .await?
            .ok_or(AppError::Db(sqlx::Error::RowNotFound))?;
        Ok(present(row, resource))
    }

    /// All rows, newest first. Side-effect-free.
    pub async fn list(pool: &PgPool, resource: &Resource) -> Result<Vec<Value>, AppError> {
        let q = sql::select_all(resource);
        let rows = Self::query_many(pool, &q).await?;
        Ok(rows.into_iter().map(|r| present(r, resource)).collect())
    }

    async fn execute_returning_one(pool: &PgPool, q: &QueryBuf) -> Result<Option<Value>, AppError> {
        tracing::debug!(sql = %q.sql, "query");
        let mut query = sqlx::query(&q.sql);
        for p in &q.params {
            query = query.bind(PgBindValue::from_json(p));
        }
        let row = query.fetch_optional(pool).await?;
        Ok(row.map(|r| row_to_json(&r)))
    }

    async fn query_many(pool: &PgPool, q: &QueryBuf) -> Result<Vec<Value>, AppError> {
        tracing::debug!(sql = %q.sql, "query");
        let mut query = sqlx::query(&q.sql);
        for p in &q.params {
            query = query.bind(PgBindValue::from_json(p));
        }
        let rows = query.fetch_all(pool).await?;
        Ok(rows.iter().map(row_to_json).collect())
    }
}

/// Drop keys the schema does not name, so server-assigned columns (e.g. a
/// message's status) can never be set by the client.
fn strip_unknown_fields(body: Map<String, Value>, resource: &Resource) -> Map<String, Value> {
    body.into_iter()
        .filter(|(k, _)| resource.rule(k).is_some())
        .collect()
}

/// Fill absent or null fields with the resource's server defaults.
fn apply_defaults(body: &mut Map<String, Value>, resource: &Resource) {
    for (field, value) in &resource.defaults {
        match body.get(*field) {
            None | Some(Value::Null) => {
                body.insert((*field).to_string(), value.clone());
            }
            Some(_) => {}
        }
    }
}

/// Serialize the item list to flat JSON text for the TEXT column.
fn flatten_items(body: &mut Map<String, Value>, field: &str) {
    if let Some(v @ Value::Array(_)) = body.get(field) {
        let text = v.to_string();
        body.insert(field.to_string(), Value::String(text));
    }
}

/// Reconstitute the stored item text into an array. Text that does not parse
/// as a JSON array is left as-is rather than dropped.
fn restore_items(obj: &mut Map<String, Value>, column: &str) {
    if let Some(Value::String(s)) = obj.get(column) {
        if let Ok(parsed @ Value::Array(_)) = serde_json::from_str::<Value>(s) {
            obj.insert(column.to_string(), parsed);
        }
    }
}

/// Shape one stored row for the API: items back to an array, keys to camelCase.
fn present(mut row: Value, resource: &Resource) -> Value {
    if let Value::Object(ref mut obj) = row {
        if let Some(field) = resource.items_field {
            restore_items(obj, &case::to_snake_case(field));
        }
        case::object_keys_to_camel_case(obj);
    }
    row
}

fn row_to_json(row: &sqlx::postgres::PgRow) -> Value {
    use sqlx::Column;
    use sqlx::Row;
    let mut map = Map::new();
    for col in row.columns() {
        let name = col.name();
        map.insert(name.to_string(), cell_to_value(row, name));
    }
    Value::Object(map)
}

fn cell_to_value(row: &sqlx::postgres::PgRow, name: &str) -> Value {
    use sqlx::Row;
    if let Ok(Some(n)) = row.try_get::<Option<i32>, _>(name) {
        return Value::Number(n.into());
    }
    if let Ok(Some(n)) = row.try_get::<Option<i64>, _>(name) {
        return Value::Number(n.into());
    }
    if let Ok(Some(n)) = row.try_get::<Option<f64>, _>(name) {
        if let Some(n) = serde_json::Number::from_f64(n) {
            return Value::Number(n);
        }
    }
    if let Ok(Some(b)) = row.try_get::<Option<bool>, _>(name) {
        return Value::Bool(b);
    }
    if let Ok(Some(d)) = row.try_get::<Option<chrono::DateTime<chrono::Utc>>, _>(name) {
        return Value::String(d.to_rfc3339());
    }
    if let Ok(Some(s)) = row.try_get::<Option<String>, _>(name) {
        return Value::String(s);
    }
    Value::Null
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use serde_json::json;

    fn map(v: Value) -> Map<String, Value> {
        v.as_object().cloned().unwrap()
    }

    #[test]
    fn client_sent_message_status_is_stripped_and_defaulted() {
        let catalog = Catalog::new();
        let message = catalog.by_path("messages").unwrap();
        let mut body = strip_unknown_fields(
            map(json!({
                "name": "Ana",
                "email": "ana@example.com",
                "subject": "Late arrival",
                "message": "Arriving after midnight",
                "status": "answered",
                "admin": true
            })),
            message,
        );
        assert!(!body.contains_key("status"));
        assert!(!body.contains_key("admin"));
        apply_defaults(&mut body, message);
        assert_eq!(body.get("status"), Some(&json!("pending")));
    }

    #[test]
    fn check_in_defaults_minibar_usage() {
        let catalog = Catalog::new();
        let record = catalog.by_path("check-in-out").unwrap();
        let mut body = map(json!({
            "guestName": "Ana",
            "roomNumber": "12",
            "type": "check-in",
            "luggage": 2
        }));
        apply_defaults(&mut body, record);
        assert_eq!(body.get("minibarUsage"), Some(&json!(false)));

        // An explicit value is not overwritten
        let mut body = map(json!({"minibarUsage": true}));
        apply_defaults(&mut body, record);
        assert_eq!(body.get("minibarUsage"), Some(&json!(true)));
    }

    #[test]
    fn food_order_defaults() {
        let catalog = Catalog::new();
        let order = catalog.by_path("food-orders").unwrap();
        let mut body = map(json!({
            "guestName": "Ana",
            "items": ["soup"],
            "totalAmount": 9.0
        }));
        apply_defaults(&mut body, order);
        assert_eq!(body.get("status"), Some(&json!("preparing")));
        assert_eq!(body.get("specialInstructions"), Some(&json!("")));
    }

    #[test]
    fn items_round_trip_preserves_order_and_content() {
        let items = json!(["soup", "bread", "café con leche", "soup"]);
        let mut body = map(json!({ "items": items.clone() }));
        flatten_items(&mut body, "items");
        let stored = body.get("items").unwrap().as_str().unwrap().to_string();

        let mut row = map(json!({ "items": stored }));
        restore_items(&mut row, "items");
        assert_eq!(row.get("items"), Some(&items));
    }

    #[test]
    fn empty_items_round_trip() {
        let mut body = map(json!({ "items": [] }));
        flatten_items(&mut body, "items");
        assert_eq!(body.get("items"), Some(&json!("[]")));

        let mut row = map(json!({ "items": "[]" }));
        restore_items(&mut row, "items");
        assert_eq!(row.get("items"), Some(&json!([])));
    }

    #[test]
    fn unparseable_item_text_is_left_alone() {
        let mut row = map(json!({ "items": "soup, bread" }));
        restore_items(&mut row, "items");
        assert_eq!(row.get("items"), Some(&json!("soup, bread")));
    }

    #[test]
    fn present_camelizes_and_restores_items() {
        let catalog = Catalog::new();
        let order = catalog.by_path("food-orders").unwrap();
        let row = json!({
            "id": 1,
            "guest_name": "Ana",
            "items": "[\"soup\",\"bread\"]",
            "special_instructions": "",
            "total_amount": 18.5,
            "status": "preparing",
            "created_at": "2026-03-01T14:00:00+00:00"
        });
        let shaped = present(row, order);
        assert_eq!(shaped["guestName"], json!("Ana"));
        assert_eq!(shaped["items"], json!(["soup", "bread"]));
        assert_eq!(shaped["createdAt"], json!("2026-03-01T14:00:00+00:00"));
        assert!(shaped.get("guest_name").is_none());
    }
}
