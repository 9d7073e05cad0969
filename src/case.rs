//! Key case conversion: the API speaks camelCase, the database snake_case.

use serde_json::{Map, Value};
use std::collections::HashMap;

/// "created_at" -> "createdAt". Identifiers without underscores pass through.
pub fn to_camel_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut upper_next = false;
    for c in s.chars() {
        if c == '_' {
            upper_next = true;
        } else if upper_next {
            out.extend(c.to_uppercase());
            upper_next = false;
        } else {
            out.push(c);
        }
    }
    out
}

/// "checkInDate" -> "check_in_date".
pub fn to_snake_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 4);
    for (i, c) in s.chars().enumerate() {
        if c.is_uppercase() {
            if i > 0 {
                out.push('_');
            }
            out.extend(c.to_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}

/// New map with all keys converted to snake_case, for binding request fields to columns.
pub fn map_keys_to_snake_case(map: &Map<String, Value>) -> HashMap<String, Value> {
    map.iter()
        .map(|(k, v)| (to_snake_case(k), v.clone()))
        .collect()
}

/// Convert a row object's keys to camelCase in place, for API responses.
pub fn object_keys_to_camel_case(obj: &mut Map<String, Value>) {
    let keys: Vec<String> = obj.keys().cloned().collect();
    for k in keys {
        let camel = to_camel_case(&k);
        if camel != k {
            if let Some(v) = obj.remove(&k) {
                obj.insert(camel, v);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn snake_to_camel() {
        assert_eq!(to_camel_case("guest_name"), "guestName");
        assert_eq!(to_camel_case("created_at"), "createdAt");
        assert_eq!(to_camel_case("type"), "type");
        assert_eq!(to_camel_case("id"), "id");
    }

    #[test]
    fn camel_to_snake() {
        assert_eq!(to_snake_case("checkInDate"), "check_in_date");
        assert_eq!(to_snake_case("minibarUsage"), "minibar_usage");
        assert_eq!(to_snake_case("items"), "items");
    }

    #[test]
    fn round_trip_is_stable() {
        for name in ["guestName", "roomNumber", "specialInstructions", "type"] {
            assert_eq!(to_camel_case(&to_snake_case(name)), name);
        }
    }

    #[test]
    fn row_keys_become_camel() {
        let mut obj = json!({"guest_name": "Ana", "room_number": "12", "id": 1})
            .as_object()
            .cloned()
            .unwrap();
        object_keys_to_camel_case(&mut obj);
        assert!(obj.contains_key("guestName"));
        assert!(obj.contains_key("roomNumber"));
        assert!(obj.contains_key("id"));
        assert!(!obj.contains_key("guest_name"));
    }
}
