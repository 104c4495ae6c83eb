use serde_json::Value;

/// Print just the key answer value from the output.
///
/// The artifact path wins when present (the point of `generate` is the
/// file); otherwise well-known result fields are searched in priority
/// order, one level deep, then the first field is used as a fallback.
pub fn print_minimal(value: &Value) {
    // The artifact path sits on the envelope, not the result
    if let Some(Value::String(artifact)) = value.get("artifact") {
        println!("{}", artifact);
        return;
    }

    let result_obj = value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value);

    // Priority list of key output fields
    let priority_keys = [
        "simple_payback_years",
        "grand_total_benefit",
        "net_position",
        "total_benefit",
        "total_cost",
        "total_unit_cost",
    ];

    if let Value::Object(map) = result_obj {
        // Direct fields first, then one level into the sub-objects
        for key in &priority_keys {
            if let Some(val) = find_field(map, key) {
                println!("{}", format_minimal(val));
                return;
            }
        }

        if let Some((key, val)) = map.iter().next() {
            println!("{}: {}", key, format_minimal(val));
            return;
        }
    }

    println!("{}", format_minimal(result_obj));
}

fn find_field<'a>(map: &'a serde_json::Map<String, Value>, key: &str) -> Option<&'a Value> {
    if let Some(val) = map.get(key) {
        if !val.is_null() {
            return Some(val);
        }
    }
    for nested in map.values() {
        if let Value::Object(inner) = nested {
            if let Some(val) = inner.get(key) {
                if !val.is_null() {
                    return Some(val);
                }
            }
        }
    }
    None
}

fn format_minimal(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "null".to_string(),
        _ => serde_json::to_string(value).unwrap_or_default(),
    }
}
