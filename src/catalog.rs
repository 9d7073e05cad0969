//! Static resource catalog: tables, columns, validation rules, and server
//! defaults for the six guest-services resources. This is the single schema
//! definition consumed by validation, SQL building, and bootstrap DDL.

use serde_json::{json, Value};

/// Expected JSON kind of a field in a request body.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Number,
    Boolean,
    TextArray,
}

/// Well-known string formats with dedicated checks.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Format {
    Email,
    /// RFC 3339 datetime with offset, e.g. "2026-03-01T14:00:00Z".
    DateTime,
}

/// Per-field constraints. Constructed via the kind helpers plus struct update.
#[derive(Clone, Debug)]
pub struct FieldRule {
    pub kind: FieldKind,
    pub required: bool,
    pub min_length: Option<usize>,
    pub minimum: Option<f64>,
    pub maximum: Option<f64>,
    /// Strict lower bound (value must be greater than this).
    pub exclusive_minimum: Option<f64>,
    pub pattern: Option<&'static str>,
    pub format: Option<Format>,
    pub allowed: Option<&'static [&'static str]>,
}

impl FieldRule {
    fn of(kind: FieldKind) -> Self {
        FieldRule {
            kind,
            required: false,
            min_length: None,
            minimum: None,
            maximum: None,
            exclusive_minimum: None,
            pattern: None,
            format: None,
            allowed: None,
        }
    }

    pub fn text() -> Self {
        Self::of(FieldKind::Text)
    }

    pub fn number() -> Self {
        Self::of(FieldKind::Number)
    }

    pub fn boolean() -> Self {
        Self::of(FieldKind::Boolean)
    }

    pub fn text_array() -> Self {
        Self::of(FieldKind::TextArray)
    }
}

/// One table column. `pg_type` is used both for DDL and for `$n::type` casts.
#[derive(Clone, Debug)]
pub struct Column {
    pub name: &'static str,
    pub pg_type: &'static str,
    pub pk: bool,
    /// Column has a database default and is omitted from INSERT when absent.
    pub has_default: bool,
}

fn id_column() -> Column {
    Column {
        name: "id",
        pg_type: "int8",
        pk: true,
        has_default: true,
    }
}

fn created_at_column() -> Column {
    Column {
        name: "created_at",
        pg_type: "timestamptz",
        pk: false,
        has_default: true,
    }
}

fn column(name: &'static str, pg_type: &'static str) -> Column {
    Column {
        name,
        pg_type,
        pk: false,
        has_default: false,
    }
}

/// Cross-field rule: the `end_field` datetime must be strictly after `start_field`.
#[derive(Clone, Debug)]
pub struct DateOrder {
    pub start_field: &'static str,
    pub end_field: &'static str,
}

/// One guest-services resource: API path, backing table, and schema.
/// Rule and default keys are the API (camelCase) field names.
#[derive(Clone, Debug)]
pub struct Resource {
    pub name: &'static str,
    pub path_segment: &'static str,
    pub table_name: &'static str,
    pub columns: Vec<Column>,
    /// Ordered so validation reports violations in a stable field order.
    pub rules: Vec<(&'static str, FieldRule)>,
    pub date_order: Option<DateOrder>,
    /// Applied when the field is absent from the (stripped) body.
    pub defaults: Vec<(&'static str, Value)>,
    /// Field whose array value is stored as flat JSON text and reconstituted on read.
    pub items_field: Option<&'static str>,
}

impl Resource {
    pub fn rule(&self, field: &str) -> Option<&FieldRule> {
        self.rules
            .iter()
            .find(|(name, _)| *name == field)
            .map(|(_, r)| r)
    }
}

pub struct Catalog {
    resources: Vec<Resource>,
}

impl Catalog {
    pub fn new() -> Self {
        Catalog {
            resources: vec![
                reservations(),
                feedback(),
                check_in_out(),
                local_preferences(),
                food_orders(),
                messages(),
            ],
        }
    }

    pub fn by_path(&self, segment: &str) -> Option<&Resource> {
        self.resources.iter().find(|r| r.path_segment == segment)
    }

    pub fn resources(&self) -> &[Resource] {
        &self.resources
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::new()
    }
}

fn reservations() -> Resource {
    Resource {
        name: "reservation",
        path_segment: "reservations",
        table_name: "reservations",
        columns: vec![
            id_column(),
            column("guest_name", "text"),
            column("room_number", "text"),
            column("check_in_date", "timestamptz"),
            column("check_out_date", "timestamptz"),
            column("total_amount", "float8"),
            column("document_id", "text"),
            column("phone_number", "text"),
            column("email", "text"),
            column("notes", "text"),
            created_at_column(),
        ],
        rules: vec![
            (
                "guestName",
                FieldRule {
                    required: true,
                    min_length: Some(2),
                    ..FieldRule::text()
                },
            ),
            (
                "roomNumber",
                FieldRule {
                    required: true,
                    min_length: Some(1),
                    ..FieldRule::text()
                },
            ),
            (
                "checkInDate",
                FieldRule {
                    required: true,
                    format: Some(Format::DateTime),
                    ..FieldRule::text()
                },
            ),
            (
                "checkOutDate",
                FieldRule {
                    required: true,
                    format: Some(Format::DateTime),
                    ..FieldRule::text()
                },
            ),
            (
                "totalAmount",
                FieldRule {
                    required: true,
                    exclusive_minimum: Some(0.0),
                    ..FieldRule::number()
                },
            ),
            (
                "documentId",
                FieldRule {
                    required: true,
                    min_length: Some(1),
                    ..FieldRule::text()
                },
            ),
            (
                "phoneNumber",
                FieldRule {
                    pattern: Some(r"^\+?[1-9]\d{1,14}$"),
                    ..FieldRule::text()
                },
            ),
            (
                "email",
                FieldRule {
                    format: Some(Format::Email),
                    ..FieldRule::text()
                },
            ),
            ("notes", FieldRule::text()),
        ],
        date_order: Some(DateOrder {
            start_field: "checkInDate",
            end_field: "checkOutDate",
        }),
        defaults: vec![],
        items_field: None,
    }
}

fn feedback() -> Resource {
    Resource {
        name: "guest_feedback",
        path_segment: "feedback",
        table_name: "guest_feedback",
        columns: vec![
            id_column(),
            column("guest_name", "text"),
            column("room_number", "text"),
            column("rating", "int4"),
            column("comment", "text"),
            column("category", "text"),
            created_at_column(),
        ],
        rules: vec![
            (
                "guestName",
                FieldRule {
                    required: true,
                    min_length: Some(1),
                    ..FieldRule::text()
                },
            ),
            (
                "roomNumber",
                FieldRule {
                    required: true,
                    min_length: Some(1),
                    ..FieldRule::text()
                },
            ),
            (
                "rating",
                FieldRule {
                    required: true,
                    minimum: Some(1.0),
                    maximum: Some(5.0),
                    ..FieldRule::number()
                },
            ),
            (
                "comment",
                FieldRule {
                    required: true,
                    min_length: Some(10),
                    ..FieldRule::text()
                },
            ),
            (
                "category",
                FieldRule {
                    required: true,
                    allowed: Some(&["general", "food", "cleanliness", "service"]),
                    ..FieldRule::text()
                },
            ),
        ],
        date_order: None,
        defaults: vec![],
        items_field: None,
    }
}

fn check_in_out() -> Resource {
    Resource {
        name: "check_in_out",
        path_segment: "check-in-out",
        table_name: "check_in_out",
        columns: vec![
            id_column(),
            column("guest_name", "text"),
            column("room_number", "text"),
            column("type", "text"),
            column("special_requests", "text"),
            column("luggage", "int4"),
            column("room_condition", "text"),
            column("minibar_usage", "bool"),
            created_at_column(),
        ],
        rules: vec![
            (
                "guestName",
                FieldRule {
                    required: true,
                    min_length: Some(1),
                    ..FieldRule::text()
                },
            ),
            (
                "roomNumber",
                FieldRule {
                    required: true,
                    min_length: Some(1),
                    ..FieldRule::text()
                },
            ),
            (
                "type",
                FieldRule {
                    required: true,
                    allowed: Some(&["check-in", "check-out"]),
                    ..FieldRule::text()
                },
            ),
            ("specialRequests", FieldRule::text()),
            (
                "luggage",
                FieldRule {
                    required: true,
                    minimum: Some(0.0),
                    ..FieldRule::number()
                },
            ),
            ("roomCondition", FieldRule::text()),
            ("minibarUsage", FieldRule::boolean()),
        ],
        date_order: None,
        defaults: vec![("minibarUsage", json!(false))],
        items_field: None,
    }
}

fn local_preferences() -> Resource {
    Resource {
        name: "local_preferences",
        path_segment: "local-preferences",
        table_name: "local_preferences",
        columns: vec![
            id_column(),
            column("guest_name", "text"),
            column("room_number", "text"),
            column("language", "text"),
            column("dietary_needs", "text"),
            column("temperature", "float8"),
            column("wake_up_call", "text"),
            column("newspaper", "bool"),
            created_at_column(),
        ],
        rules: vec![
            (
                "guestName",
                FieldRule {
                    required: true,
                    min_length: Some(1),
                    ..FieldRule::text()
                },
            ),
            (
                "roomNumber",
                FieldRule {
                    required: true,
                    min_length: Some(1),
                    ..FieldRule::text()
                },
            ),
            (
                "language",
                FieldRule {
                    required: true,
                    allowed: Some(&["es", "en"]),
                    ..FieldRule::text()
                },
            ),
            ("dietaryNeeds", FieldRule::text()),
            (
                "temperature",
                FieldRule {
                    required: true,
                    minimum: Some(16.0),
                    maximum: Some(30.0),
                    ..FieldRule::number()
                },
            ),
            ("wakeUpCall", FieldRule::text()),
            ("newspaper", FieldRule::boolean()),
        ],
        date_order: None,
        defaults: vec![("newspaper", json!(false))],
        items_field: None,
    }
}

fn food_orders() -> Resource {
    Resource {
        name: "food_order",
        path_segment: "food-orders",
        table_name: "food_orders",
        columns: vec![
            id_column(),
            column("guest_name", "text"),
            column("items", "text"),
            column("special_instructions", "text"),
            column("total_amount", "float8"),
            column("status", "text"),
            created_at_column(),
        ],
        rules: vec![
            (
                "guestName",
                FieldRule {
                    required: true,
                    ..FieldRule::text()
                },
            ),
            (
                "items",
                FieldRule {
                    required: true,
                    ..FieldRule::text_array()
                },
            ),
            ("specialInstructions", FieldRule::text()),
            (
                "totalAmount",
                FieldRule {
                    required: true,
                    ..FieldRule::number()
                },
            ),
            (
                "status",
                FieldRule {
                    allowed: Some(&["preparing", "delivered", "cancelled"]),
                    ..FieldRule::text()
                },
            ),
        ],
        date_order: None,
        defaults: vec![
            ("specialInstructions", json!("")),
            ("status", json!("preparing")),
        ],
        items_field: Some("items"),
    }
}

fn messages() -> Resource {
    Resource {
        name: "message",
        path_segment: "messages",
        table_name: "messages",
        columns: vec![
            id_column(),
            column("name", "text"),
            column("email", "text"),
            column("subject", "text"),
            column("message", "text"),
            column("status", "text"),
            created_at_column(),
        ],
        rules: vec![
            (
                "name",
                FieldRule {
                    required: true,
                    min_length: Some(2),
                    ..FieldRule::text()
                },
            ),
            (
                "email",
                FieldRule {
                    required: true,
                    format: Some(Format::Email),
                    ..FieldRule::text()
                },
            ),
            (
                "subject",
                FieldRule {
                    required: true,
                    min_length: Some(5),
                    ..FieldRule::text()
                },
            ),
            (
                "message",
                FieldRule {
                    required: true,
                    min_length: Some(10),
                    ..FieldRule::text()
                },
            ),
        ],
        date_order: None,
        // Status is server-assigned; a client-sent value is stripped (no rule for it).
        defaults: vec![("status", json!("pending"))],
        items_field: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_has_all_six_resources() {
        let catalog = Catalog::new();
        for segment in [
            "reservations",
            "feedback",
            "check-in-out",
            "local-preferences",
            "food-orders",
            "messages",
        ] {
            assert!(catalog.by_path(segment).is_some(), "missing {}", segment);
        }
        assert_eq!(catalog.resources().len(), 6);
        assert!(catalog.by_path("rooms").is_none());
    }

    #[test]
    fn every_rule_maps_to_a_column() {
        let catalog = Catalog::new();
        for resource in catalog.resources() {
            for (field, _) in &resource.rules {
                let snake = crate::case::to_snake_case(field);
                assert!(
                    resource.columns.iter().any(|c| c.name == snake),
                    "{}: no column for field {}",
                    resource.name,
                    field
                );
            }
        }
    }

    #[test]
    fn every_default_maps_to_a_column() {
        let catalog = Catalog::new();
        for resource in catalog.resources() {
            for (field, _) in &resource.defaults {
                let snake = crate::case::to_snake_case(field);
                assert!(
                    resource.columns.iter().any(|c| c.name == snake),
                    "{}: no column for default {}",
                    resource.name,
                    field
                );
            }
        }
    }

    #[test]
    fn reservation_orders_dates() {
        let catalog = Catalog::new();
        let reservation = catalog.by_path("reservations").unwrap();
        let order = reservation.date_order.as_ref().unwrap();
        assert_eq!(order.start_field, "checkInDate");
        assert_eq!(order.end_field, "checkOutDate");
    }

    #[test]
    fn message_status_is_server_assigned() {
        let catalog = Catalog::new();
        let message = catalog.by_path("messages").unwrap();
        assert!(message.rule("status").is_none());
        assert!(message
            .defaults
            .iter()
            .any(|(f, v)| *f == "status" && v.as_str() == Some("pending")));
    }

    #[test]
    fn food_order_items_are_flat_text() {
        let catalog = Catalog::new();
        let order = catalog.by_path("food-orders").unwrap();
        assert_eq!(order.items_field, Some("items"));
        let items_col = order.columns.iter().find(|c| c.name == "items").unwrap();
        assert_eq!(items_col.pg_type, "text");
    }
}
