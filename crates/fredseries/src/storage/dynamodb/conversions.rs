//! DynamoDB attribute conversion functions.
//!
//! Pure functions for converting between DynamoDB AttributeValue maps and
//! domain types. These are testable in isolation without DynamoDB access.

use std::collections::HashMap;

use aws_sdk_dynamodb::types::{AttributeValue, TableStatus as SdkTableStatus};
use base64::{engine::general_purpose, Engine as _};
use fredseries_core::observation::Observation;
use fredseries_core::storage::Item;
use fredseries_core::table::{KeySchema, TableStatus};
use serde_json::{Number, Value};

/// Convert an Observation to a DynamoDB item.
pub fn observation_to_item(
    schema: &KeySchema,
    observation: &Observation,
) -> HashMap<String, AttributeValue> {
    let mut item = HashMap::new();
    item.insert(
        schema.partition_key.clone(),
        AttributeValue::S(observation.date.clone()),
    );
    item.insert(
        schema.sort_key.clone(),
        AttributeValue::S(observation.value.clone()),
    );
    item
}

/// Convert a DynamoDB item to its JSON rendering, keeping every attribute.
pub fn item_to_json(item: &HashMap<String, AttributeValue>) -> Item {
    item.iter()
        .map(|(name, value)| (name.clone(), attribute_to_json(value)))
        .collect()
}

/// Render a single attribute value as JSON.
///
/// Numbers become JSON numbers when they print back to the same digits,
/// otherwise strings holding the original text. Binary values are base64
/// encoded.
pub fn attribute_to_json(value: &AttributeValue) -> Value {
    match value {
        AttributeValue::S(s) => Value::String(s.clone()),
        AttributeValue::N(n) => number_to_json(n),
        AttributeValue::Bool(b) => Value::Bool(*b),
        AttributeValue::Null(_) => Value::Null,
        AttributeValue::B(blob) => Value::String(general_purpose::STANDARD.encode(blob.as_ref())),
        AttributeValue::L(list) => Value::Array(list.iter().map(attribute_to_json).collect()),
        AttributeValue::M(map) => Value::Object(item_to_json(map)),
        AttributeValue::Ss(set) => Value::Array(set.iter().cloned().map(Value::String).collect()),
        AttributeValue::Ns(set) => Value::Array(set.iter().map(|n| number_to_json(n)).collect()),
        AttributeValue::Bs(set) => Value::Array(
            set.iter()
                .map(|blob| Value::String(general_purpose::STANDARD.encode(blob.as_ref())))
                .collect(),
        ),
        _ => Value::Null,
    }
}

fn number_to_json(n: &str) -> Value {
    match n.parse::<Number>() {
        Ok(number) if number.to_string() == n => Value::Number(number),
        _ => Value::String(n.to_string()),
    }
}

/// Map the SDK's table status onto the core status.
pub fn table_status_from_sdk(status: Option<&SdkTableStatus>) -> TableStatus {
    match status {
        Some(SdkTableStatus::Active) => TableStatus::Active,
        Some(SdkTableStatus::Creating) => TableStatus::Creating,
        Some(SdkTableStatus::Updating) => TableStatus::Updating,
        Some(SdkTableStatus::Deleting) => TableStatus::Deleting,
        Some(SdkTableStatus::Archiving) => TableStatus::Archiving,
        Some(SdkTableStatus::Archived) => TableStatus::Archived,
        Some(SdkTableStatus::InaccessibleEncryptionCredentials) => TableStatus::Inaccessible,
        Some(other) => TableStatus::Unknown(other.as_str().to_string()),
        None => TableStatus::Unknown("UNKNOWN".to_string()),
    }
}
