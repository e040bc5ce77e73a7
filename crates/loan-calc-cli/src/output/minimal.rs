use serde_json::Value;

use super::format_scalar;

/// Key figures in order of preference.
const PRIORITY_KEYS: [&str; 3] = ["savings", "monthly_payment", "formatted"];

/// Print just the key answer from the output.
pub fn print_minimal(value: &Value) {
    println!("{}", render_minimal(value));
}

/// Prefer the display string from the `formatted` block, then the raw
/// result field, then the first result field.
pub fn render_minimal(value: &Value) -> String {
    let result_obj = value.get("result").unwrap_or(value);
    let formatted = value.get("formatted");

    for key in PRIORITY_KEYS {
        if let Some(val) = formatted.and_then(|f| f.get(key)) {
            return format_scalar(val);
        }
        if let Some(val) = result_obj.get(key) {
            if !val.is_null() {
                return format_scalar(val);
            }
        }
    }

    if let Value::Object(map) = result_obj {
        if let Some((key, val)) = map.iter().next() {
            return format!("{}: {}", key, format_scalar(val));
        }
    }

    format_scalar(result_obj)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_prefers_formatted_figures() {
        let value = json!({
            "result": {"monthly_payment": "2997.75"},
            "formatted": {"monthly_payment": "$2,998"}
        });
        assert_eq!(render_minimal(&value), "$2,998");
    }

    #[test]
    fn test_savings_beats_payment() {
        let value = json!({
            "result": {"savings": "83423.53"},
            "formatted": {"monthly_payment": "$1,842", "savings": "$83,424"}
        });
        assert_eq!(render_minimal(&value), "$83,424");
    }

    #[test]
    fn test_format_command_output() {
        let value = json!({"result": {"amount": "1234567.8", "formatted": "$1,234,568"}});
        assert_eq!(render_minimal(&value), "$1,234,568");
    }
}
