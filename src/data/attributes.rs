//! Normalization of loosely named feature properties into a typed record.
//!
//! Source datasets disagree on property names (`admin_name` vs `name`, `yield_val`
//! vs `yieldVal`, ...). Each field is resolved once at load time by trying its
//! candidate keys in order; downstream code only ever sees [`RegionAttributes`].

use crate::core::constants::{PLACEHOLDER_ID, PLACEHOLDER_NAME};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

const ID_KEYS: &[&str] = &["ID", "id", "adcode", "code"];
const NAME_KEYS: &[&str] = &["admin_name", "name", "NAME"];
const YIELD_KEYS: &[&str] = &["yield_val", "yieldVal", "yield"];
const CROP_KEYS: &[&str] = &["crop_type", "cropType", "crop"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionAttributes {
    pub id: String,
    pub name: String,
    pub yield_val: f64,
    pub crop_type: Option<String>,
}

impl RegionAttributes {
    pub fn from_properties(properties: &Map<String, Value>) -> Self {
        Self {
            id: first_text(properties, ID_KEYS).unwrap_or_else(|| PLACEHOLDER_ID.to_string()),
            name: first_text(properties, NAME_KEYS)
                .unwrap_or_else(|| PLACEHOLDER_NAME.to_string()),
            yield_val: first_number(properties, YIELD_KEYS).unwrap_or(0.0),
            crop_type: first_text(properties, CROP_KEYS),
        }
    }
}

impl Default for RegionAttributes {
    fn default() -> Self {
        Self::from_properties(&Map::new())
    }
}

/// First non-empty string (or number, rendered as text) among `keys`
fn first_text(properties: &Map<String, Value>, keys: &[&str]) -> Option<String> {
    keys.iter().find_map(|key| match properties.get(*key)? {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    })
}

/// First finite number among `keys`; numeric strings are accepted
fn first_number(properties: &Map<String, Value>, keys: &[&str]) -> Option<f64> {
    keys.iter().find_map(|key| {
        let value = match properties.get(*key)? {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse::<f64>().ok(),
            _ => None,
        };
        value.filter(|v| v.is_finite())
    })
}
