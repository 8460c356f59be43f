use crate::error::DataError;
use serde::Serialize;
use serde_json::Value;

/// Render the top-level fields of `value` as `{ "name":"value", ... }`.
///
/// Every field value is quoted: strings appear as is, `null` as `null`, and
/// anything else as its compact JSON text. Fields are emitted in name order.
pub fn to_simple_json<T: Serialize + ?Sized>(value: &T) -> Result<String, DataError> {
    let fields = match serde_json::to_value(value)? {
        Value::Object(fields) => fields,
        other => return Err(DataError::NotAnObject(other.to_string())),
    };

    let mut fields: Vec<(&String, &Value)> = fields.iter().collect();
    fields.sort_by(|left, right| left.0.cmp(right.0));

    let pairs: Vec<String> = fields
        .into_iter()
        .map(|(name, field)| format!("\"{}\":\"{}\"", name, field_text(field)))
        .collect();

    if pairs.is_empty() {
        return Ok("{  }".to_string());
    }

    Ok(format!("{{ {} }}", pairs.join(", ")))
}

fn field_text(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}
