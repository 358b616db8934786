use serde_json::Value;

/// Print just the key answer value from the output.
///
/// Amortization results reduce to the total amount paid; solver results to
/// the derived value.
pub fn print_minimal(value: &Value) {
    let result_obj = value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value);

    // Schedule output: the headline number is the total to pay.
    if let Some(total) = result_obj.get("totals").and_then(|t| t.get("total_paid")) {
        println!("{}", format_minimal(total));
        return;
    }

    // Solver output
    let priority_keys = ["value", "total_paid", "total_interest", "correct"];

    if let Value::Object(map) = result_obj {
        for key in &priority_keys {
            if let Some(val) = map.get(*key) {
                if !val.is_null() {
                    println!("{}", format_minimal(val));
                    return;
                }
            }
        }

        if let Some((key, val)) = map.iter().next() {
            println!("{}: {}", key, format_minimal(val));
            return;
        }
    }

    println!("{}", format_minimal(result_obj));
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
