use serde_json::{Map, Value};
use tabled::{builder::Builder, Table};

use super::{format_scalar, schedule_rows};

/// Format output as tables using the tabled crate.
pub fn print_table(value: &Value) {
    println!("{}", render_table(value));
}

pub fn render_table(value: &Value) -> String {
    let mut sections: Vec<String> = Vec::new();

    match value {
        Value::Object(map) => {
            if let Some(rows) = schedule_rows(value) {
                sections.push(array_table(rows));
            } else if let Some(Value::Object(result)) = map.get("result") {
                sections.push(field_table(result, "Field", "Value"));
            } else {
                sections.push(field_table(map, "Field", "Value"));
            }

            if let Some(Value::Object(formatted)) = map.get("formatted") {
                sections.push(field_table(formatted, "Figure", "Amount"));
            }

            if let Some(Value::Array(warnings)) = map.get("warnings") {
                let lines: Vec<String> = warnings
                    .iter()
                    .filter_map(|w| w.as_str())
                    .map(|w| format!("  - {}", w))
                    .collect();
                if !lines.is_empty() {
                    sections.push(format!("Warnings:\n{}", lines.join("\n")));
                }
            }

            if let Some(Value::String(meth)) = map.get("methodology") {
                sections.push(format!("Methodology: {}", meth));
            }
        }
        Value::Array(arr) => sections.push(array_table(arr)),
        _ => sections.push(format_scalar(value)),
    }

    sections.join("\n\n")
}

fn field_table(map: &Map<String, Value>, key_header: &str, value_header: &str) -> String {
    let mut builder = Builder::default();
    builder.push_record([key_header, value_header]);
    for (key, val) in map {
        builder.push_record([key.as_str(), &format_cell(val)]);
    }
    Table::from(builder).to_string()
}

fn array_table(arr: &[Value]) -> String {
    let Some(Value::Object(first)) = arr.first() else {
        if arr.is_empty() {
            return "(empty)".to_string();
        }
        let items: Vec<String> = arr.iter().map(format_cell).collect();
        return items.join("\n");
    };

    let headers: Vec<String> = first.keys().cloned().collect();
    let mut builder = Builder::default();
    builder.push_record(headers.clone());

    for item in arr {
        if let Value::Object(map) = item {
            let row: Vec<String> = headers
                .iter()
                .map(|h| map.get(h.as_str()).map(format_cell).unwrap_or_default())
                .collect();
            builder.push_record(row);
        }
    }

    Table::from(builder).to_string()
}

fn format_cell(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Array(arr) => {
            let items: Vec<String> = arr.iter().map(format_cell).collect();
            items.join(", ")
        }
        _ => format_scalar(value),
    }
}
