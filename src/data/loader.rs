use std::path::Path;

use anyhow::{bail, Context, Result};
use serde_json::Value as JsonValue;

use super::date::{is_iso_date, parse_display_date, ISO_FORMAT};
use super::export::ColumnSpec;
use super::model::{Record, Value};

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a record set from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.json` – `[{ "id": 1, "status": "pending", ... }, ...]`
/// * `.csv`  – header row with field names, one record per line
pub fn load_file(path: &Path) -> Result<Vec<Record>> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let records = match ext.as_str() {
        "json" => load_json(path),
        "csv" => load_csv(path),
        other => bail!("Unsupported file extension: .{other}"),
    }
    .with_context(|| format!("loading {}", path.display()))?;

    log::info!("Loaded {} records from {}", records.len(), path.display());
    Ok(records)
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

fn load_json(path: &Path) -> Result<Vec<Record>> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    parse_json(&text)
}

/// Parse a records-oriented JSON document:
///
/// ```json
/// [
///   { "id": 1, "customer": "Alice", "status": "pending", "date": "2024-03-05" },
///   ...
/// ]
/// ```
///
/// Nested arrays/objects are kept as their JSON text.
pub fn parse_json(text: &str) -> Result<Vec<Record>> {
    let root: JsonValue = serde_json::from_str(text).context("parsing JSON")?;

    let rows = root.as_array().context("Expected top-level JSON array")?;

    rows.iter()
        .enumerate()
        .map(|(i, row)| -> Result<Record> {
            let obj = row
                .as_object()
                .with_context(|| format!("Row {i} is not a JSON object"))?;
            Ok(obj
                .iter()
                .map(|(key, val)| (key.clone(), json_to_value(val)))
                .collect())
        })
        .collect()
}

fn json_to_value(val: &JsonValue) -> Value {
    match val {
        JsonValue::String(s) if is_iso_date(s) => Value::Date(s.clone()),
        JsonValue::String(s) => Value::String(s.clone()),
        JsonValue::Number(n) => {
            if let Some(i) = n.as_i64() {
                Value::Integer(i)
            } else if let Some(f) = n.as_f64() {
                Value::Float(f)
            } else {
                Value::String(n.to_string())
            }
        }
        JsonValue::Bool(b) => Value::Bool(*b),
        JsonValue::Null => Value::Null,
        other => Value::String(other.to_string()),
    }
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

fn load_csv(path: &Path) -> Result<Vec<Record>> {
    let file = std::fs::File::open(path).context("opening CSV")?;
    parse_csv(file)
}

/// Parse CSV with a header row of field names; cell types are inferred.
/// A leading UTF-8 BOM (as written by the exporter) is ignored.
pub fn parse_csv<R: std::io::Read>(input: R) -> Result<Vec<Record>> {
    let mut reader = csv::Reader::from_reader(input);
    let headers: Vec<String> = reader
        .headers()
        .context("reading CSV headers")?
        .iter()
        .enumerate()
        .map(|(i, h)| {
            if i == 0 {
                h.trim_start_matches('\u{FEFF}').to_string()
            } else {
                h.to_string()
            }
        })
        .collect();

    let mut records = Vec::new();

    for (row_no, result) in reader.records().enumerate() {
        let row = result.with_context(|| format!("CSV row {row_no}"))?;
        let record: Record = headers
            .iter()
            .zip(row.iter())
            .map(|(name, cell)| (name.clone(), guess_value_type(cell)))
            .collect();
        records.push(record);
    }

    Ok(records)
}

/// Numbers are only inferred when they print back to the same text, so
/// `00042` or `1.50` stay strings.
fn guess_value_type(s: &str) -> Value {
    if s.is_empty() {
        return Value::Null;
    }
    if let Ok(i) = s.parse::<i64>() {
        if i.to_string() == s {
            return Value::Integer(i);
        }
    }
    if let Ok(f) = s.parse::<f64>() {
        if f.is_finite() && f.to_string() == s {
            return Value::Float(f);
        }
    }
    if s == "true" || s == "false" {
        return Value::Bool(s == "true");
    }
    if is_iso_date(s) {
        return Value::Date(s.to_string());
    }
    Value::String(s.to_string())
}

// ---------------------------------------------------------------------------
// Exported files
// ---------------------------------------------------------------------------

/// Map exported column headers back to the record fields they came from.
///
/// Fields named after a column header with a source field are renamed to that
/// field, and date columns are turned from `05-Mar-2024` back into ISO dates.
/// Other fields are kept as they are, so files already keyed by field name
/// pass through unchanged.
pub fn restore_fields(records: Vec<Record>, columns: &[ColumnSpec]) -> Vec<Record> {
    let by_header: Vec<(&str, &str, bool)> = columns
        .iter()
        .filter_map(|c| c.source().map(|src| (c.header.as_str(), src, c.is_date())))
        .filter(|(header, src, _)| header != src)
        .collect();
    if by_header.is_empty() {
        return records;
    }

    let mut renamed = 0usize;
    let records: Vec<Record> = records
        .into_iter()
        .map(|rec| {
            rec.fields()
                .map(|(name, value)| {
                    match by_header.iter().find(|(header, _, _)| *header == name) {
                        Some(&(_, src, is_date)) => {
                            renamed += 1;
                            let value = if is_date { undisplay_date(value) } else { value.clone() };
                            (src.to_string(), value)
                        }
                        None => (name.to_string(), value.clone()),
                    }
                })
                .collect()
        })
        .collect();

    if renamed > 0 {
        log::debug!("restored {renamed} exported cells to their source fields");
    }
    records
}

fn undisplay_date(value: &Value) -> Value {
    match value {
        Value::String(s) => match parse_display_date(s) {
            Some(date) => Value::Date(date.format(ISO_FORMAT).to_string()),
            None => value.clone(),
        },
        other => other.clone(),
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn json_values_are_typed() {
        let records = parse_json(
            r#"[{"id": 1, "amount": 99.5, "paid": true, "date": "2024-03-05",
                 "note": null, "tags": ["a"], "customer": "Alice"}]"#,
        )
        .unwrap();
        let rec = &records[0];
        assert_eq!(rec.get("id"), Some(&Value::Integer(1)));
        assert_eq!(rec.get("amount"), Some(&Value::Float(99.5)));
        assert_eq!(rec.get("paid"), Some(&Value::Bool(true)));
        assert_eq!(rec.get("date"), Some(&Value::date("2024-03-05")));
        assert_eq!(rec.get("note"), Some(&Value::Null));
        assert_eq!(rec.get("tags"), Some(&Value::String(r#"["a"]"#.into())));
        assert_eq!(rec.get("customer"), Some(&Value::from("Alice")));
    }

    #[test]
    fn json_rejects_non_array_root() {
        assert!(parse_json(r#"{"id": 1}"#).is_err());
        assert!(parse_json(r#"[1, 2]"#).is_err());
    }

    #[test]
    fn csv_cells_are_inferred() {
        let text = "id,customer,amount,date,note\n1,\"Doe, Jane\",1500.25,2024-01-09,\n";
        let records = parse_csv(text.as_bytes()).unwrap();
        assert_eq!(records.len(), 1);
        let rec = &records[0];
        assert_eq!(rec.get("id"), Some(&Value::Integer(1)));
        assert_eq!(rec.get("customer"), Some(&Value::from("Doe, Jane")));
        assert_eq!(rec.get("amount"), Some(&Value::Float(1500.25)));
        assert_eq!(rec.get("date"), Some(&Value::date("2024-01-09")));
        assert_eq!(rec.get("note"), Some(&Value::Null));
    }

    #[test]
    fn csv_keeps_non_canonical_numbers_as_text() {
        let text = "id,transaction_id,amount,ref\n1,00042,1.50,-7\n";
        let rec = &parse_csv(text.as_bytes()).unwrap()[0];
        assert_eq!(rec.get("id"), Some(&Value::Integer(1)));
        assert_eq!(rec.get("transaction_id"), Some(&Value::from("00042")));
        assert_eq!(rec.get("amount"), Some(&Value::from("1.50")));
        assert_eq!(rec.get("ref"), Some(&Value::Integer(-7)));
    }

    #[test]
    fn exported_headers_map_back_to_fields() {
        let columns = [
            ColumnSpec::field("ID", "id"),
            ColumnSpec::date("Date", "date"),
            ColumnSpec::field("Status", "status"),
            ColumnSpec::custom("Total", |_| Value::Null),
        ];
        let text = "\u{FEFF}ID,Date,Status,Total,extra\n4,05-Mar-2024,confirmed,10,x\n";
        let records = restore_fields(parse_csv(text.as_bytes()).unwrap(), &columns);
        let rec = &records[0];
        assert_eq!(rec.id(), Some(&Value::Integer(4)));
        assert_eq!(rec.get("date"), Some(&Value::date("2024-03-05")));
        assert_eq!(rec.text("status").as_deref(), Some("confirmed"));
        assert_eq!(rec.get("Total"), Some(&Value::Integer(10)));
        assert_eq!(rec.text("extra").as_deref(), Some("x"));
        assert_eq!(rec.get("ID"), None);
    }

    #[test]
    fn field_named_files_pass_through_restore() {
        let records = parse_json(r#"[{"id": 1, "date": "2024-03-05", "status": "pending"}]"#)
            .unwrap();
        let columns = [ColumnSpec::field("ID", "id"), ColumnSpec::date("Date", "date")];
        assert_eq!(restore_fields(records.clone(), &columns), records);
    }

    #[test]
    fn csv_ignores_leading_bom() {
        let text = "\u{FEFF}ID,Status\n4,confirmed";
        let records = parse_csv(text.as_bytes()).unwrap();
        assert_eq!(records[0].get("ID"), Some(&Value::Integer(4)));
    }

    #[test]
    fn load_file_dispatches_on_extension() {
        let dir = tempfile::tempdir().unwrap();

        let json_path = dir.path().join("bookings.json");
        std::fs::write(&json_path, r#"[{"id": 7, "status": "pending"}]"#).unwrap();
        assert_eq!(load_file(&json_path).unwrap()[0].text("status").as_deref(), Some("pending"));

        let csv_path = dir.path().join("payments.CSV");
        let mut f = std::fs::File::create(&csv_path).unwrap();
        writeln!(f, "id,status").unwrap();
        writeln!(f, "3,refunded").unwrap();
        drop(f);
        assert_eq!(load_file(&csv_path).unwrap().len(), 1);

        let other = dir.path().join("data.xlsx");
        std::fs::write(&other, "").unwrap();
        let err = load_file(&other).unwrap_err();
        assert!(format!("{err:#}").contains("Unsupported file extension"));
    }
}
