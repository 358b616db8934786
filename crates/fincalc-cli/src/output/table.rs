use rust_decimal::Decimal;
use serde_json::Value;
use tabled::{builder::Builder, Table};

const SCHEDULE_COLUMNS: [&str; 5] = ["Period", "Payment", "Principal", "Interest", "Balance"];
const SCHEDULE_KEYS: [&str; 5] = ["period", "payment", "principal", "interest", "balance"];

/// Format output as tables using the tabled crate.
///
/// Amortization results render as the full schedule with a TOTAL footer;
/// everything else falls back to a two-column field/value table.
pub fn print_table(value: &Value) {
    match value {
        Value::Object(map) => {
            if let Some(result) = map.get("result") {
                if let Some(rows) = result.get("rows").and_then(Value::as_array) {
                    print_schedule_table(rows, result.get("totals"));
                } else {
                    print_flat_object(result);
                }
                print_envelope_notes(map);
            } else {
                print_flat_object(value);
            }
        }
        _ => {
            println!("{}", value);
        }
    }
}

fn print_schedule_table(rows: &[Value], totals: Option<&Value>) {
    let mut builder = Builder::default();
    builder.push_record(SCHEDULE_COLUMNS);

    for row in rows {
        if let Value::Object(map) = row {
            let record: Vec<String> = SCHEDULE_KEYS
                .iter()
                .map(|key| map.get(*key).map(format_value).unwrap_or_default())
                .collect();
            builder.push_record(record);
        }
    }

    if let Some(Value::Object(totals)) = totals {
        builder.push_record([
            "TOTAL".to_string(),
            totals.get("total_paid").map(format_value).unwrap_or_default(),
            totals
                .get("total_principal")
                .map(format_value)
                .unwrap_or_default(),
            totals
                .get("total_interest")
                .map(format_value)
                .unwrap_or_default(),
            String::new(),
        ]);
    }

    println!("{}", Table::from(builder));
}

fn print_flat_object(value: &Value) {
    if let Value::Object(map) = value {
        let mut builder = Builder::default();
        builder.push_record(["Field", "Value"]);
        for (key, val) in map {
            builder.push_record([key.as_str(), &format_value(val)]);
        }
        println!("{}", Table::from(builder));
    }
}

fn print_envelope_notes(envelope: &serde_json::Map<String, Value>) {
    if let Some(Value::Array(warnings)) = envelope.get("warnings") {
        if !warnings.is_empty() {
            println!("\nWarnings:");
            for w in warnings {
                if let Value::String(s) = w {
                    println!("  - {}", s);
                }
            }
        }
    }

    if let Some(Value::String(meth)) = envelope.get("methodology") {
        println!("\nMethodology: {}", meth);
    }
}

/// Decimal values arrive serialized as strings; display them rounded to
/// 2 decimals (the engine keeps full precision internally).
fn format_value(value: &Value) -> String {
    match value {
        Value::String(s) => match s.parse::<Decimal>() {
            Ok(d) => d.round_dp(2).to_string(),
            Err(_) => s.clone(),
        },
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "null".to_string(),
        Value::Array(arr) => {
            let items: Vec<String> = arr.iter().map(format_value).collect();
            items.join(", ")
        }
        Value::Object(_) => serde_json::to_string(value).unwrap_or_default(),
    }
}
