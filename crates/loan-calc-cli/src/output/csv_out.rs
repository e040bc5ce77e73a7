use serde_json::Value;
use std::io;

use super::{format_scalar, schedule_rows};

/// Write output as CSV to stdout.
pub fn print_csv(value: &Value) {
    let stdout = io::stdout();
    if let Err(e) = write_csv(stdout.lock(), value) {
        eprintln!("CSV write error: {}", e);
    }
}

/// Schedules become one row per month; everything else a two-column
/// field/value listing of the result.
pub fn write_csv<W: io::Write>(writer: W, value: &Value) -> csv::Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);

    if let Some(rows) = schedule_rows(value) {
        write_array_csv(&mut wtr, rows)?;
    } else if let Some(Value::Object(result)) = value.get("result") {
        wtr.write_record(["field", "value"])?;
        for (key, val) in result {
            wtr.write_record([key.as_str(), &format_scalar(val)])?;
        }
    } else if let Value::Object(map) = value {
        wtr.write_record(["field", "value"])?;
        for (key, val) in map {
            wtr.write_record([key.as_str(), &format_scalar(val)])?;
        }
    } else {
        wtr.write_record([&format_scalar(value)])?;
    }

    wtr.flush()?;
    Ok(())
}

fn write_array_csv<W: io::Write>(wtr: &mut csv::Writer<W>, arr: &[Value]) -> csv::Result<()> {
    let Some(Value::Object(first)) = arr.first() else {
        return Ok(());
    };

    let headers: Vec<&str> = first.keys().map(|k| k.as_str()).collect();
    wtr.write_record(&headers)?;

    for item in arr {
        if let Value::Object(map) = item {
            let row: Vec<String> = headers
                .iter()
                .map(|h| map.get(*h).map(format_scalar).unwrap_or_default())
                .collect();
            wtr.write_record(&row)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn render(value: &Value) -> String {
        let mut buf = Vec::new();
        write_csv(&mut buf, value).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_result_as_field_value_pairs() {
        let value = json!({"result": {"monthly_payment": "2997.75", "total_amount": "1079190.95"}});
        assert_eq!(
            render(&value),
            "field,value\nmonthly_payment,2997.75\ntotal_amount,1079190.95\n"
        );
    }

    #[test]
    fn test_schedule_rows() {
        let value = json!({"result": {"rows": [
            {"balance": "500", "interest": "0", "month": 1, "payment": "500", "principal": "500"},
            {"balance": "0", "interest": "0", "month": 2, "payment": "500", "principal": "500"}
        ]}});
        let out = render(&value);
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "balance,interest,month,payment,principal");
        assert_eq!(lines[2], "0,0,2,500,500");
    }
}
