use serde_json::Value;
use std::io;

const SCHEDULE_KEYS: [&str; 5] = ["period", "payment", "principal", "interest", "balance"];

/// Write output as CSV to stdout.
///
/// Amortization results export the schedule rows at full precision (one
/// record per period); other results export as field,value pairs.
pub fn print_csv(value: &Value) {
    let stdout = io::stdout();
    let mut wtr = csv::Writer::from_writer(stdout.lock());

    let result = value
        .as_object()
        .and_then(|map| map.get("result"))
        .unwrap_or(value);

    if let Some(Value::Array(rows)) = result.get("rows") {
        write_schedule_csv(&mut wtr, rows);
    } else if let Value::Object(map) = result {
        let _ = wtr.write_record(["field", "value"]);
        for (key, val) in map {
            let _ = wtr.write_record([key.as_str(), &format_csv_value(val)]);
        }
    } else {
        let _ = wtr.write_record([&format_csv_value(result)]);
    }

    let _ = wtr.flush();
}

fn write_schedule_csv(wtr: &mut csv::Writer<io::StdoutLock<'_>>, rows: &[Value]) {
    let _ = wtr.write_record(SCHEDULE_KEYS);

    for row in rows {
        if let Value::Object(map) = row {
            let record: Vec<String> = SCHEDULE_KEYS
                .iter()
                .map(|key| map.get(*key).map(format_csv_value).unwrap_or_default())
                .collect();
            let _ = wtr.write_record(&record);
        }
    }
}

fn format_csv_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => String::new(),
        _ => serde_json::to_string(value).unwrap_or_default(),
    }
}
