use std::fmt;
use std::io::Write;
use std::sync::Arc;

use chrono::NaiveDate;
use thiserror::Error;

use super::date::{format_date, ISO_FORMAT};
use super::model::{Record, Value};

/// UTF-8 byte-order marker, so spreadsheet tools pick the right encoding
/// for currency symbols and other non-ASCII text.
pub const BOM: char = '\u{FEFF}';

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("writing CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("CSV output is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

// ---------------------------------------------------------------------------
// Column projection
// ---------------------------------------------------------------------------

type Extractor = Arc<dyn Fn(&Record) -> Value + Send + Sync>;

/// One CSV (and table) column: a header and a rule mapping a record to a value.
#[derive(Clone)]
pub struct ColumnSpec {
    pub header: String,
    /// Record field the column reads, when it reads exactly one.
    source: Option<String>,
    /// Whether the column renders `source` through the display date format.
    date: bool,
    extract: Extractor,
}

impl ColumnSpec {
    /// Column showing `field` as-is. Missing fields render empty.
    pub fn field(header: impl Into<String>, field: &str) -> Self {
        let source = field.to_string();
        let field = field.to_string();
        Self::custom(header, move |rec| rec.get(&field).cloned().unwrap_or(Value::Null))
            .with_source(source)
    }

    /// Column showing the ISO date in `field` as `DD-Mon-YYYY`.
    /// Values that do not parse as dates are passed through unchanged.
    pub fn date(header: impl Into<String>, field: &str) -> Self {
        let source = field.to_string();
        let field = field.to_string();
        Self::custom(header, move |rec| match rec.get(&field) {
            Some(Value::Date(s) | Value::String(s)) => Value::String(format_date(s)),
            Some(other) => other.clone(),
            None => Value::Null,
        })
        .with_source(source)
        .as_date()
    }

    /// Column computed by an arbitrary extractor.
    pub fn custom<F>(header: impl Into<String>, extract: F) -> Self
    where
        F: Fn(&Record) -> Value + Send + Sync + 'static,
    {
        ColumnSpec {
            header: header.into(),
            source: None,
            date: false,
            extract: Arc::new(extract),
        }
    }

    fn as_date(mut self) -> Self {
        self.date = true;
        self
    }

    pub fn is_date(&self) -> bool {
        self.date
    }

    fn with_source(mut self, field: String) -> Self {
        self.source = Some(field);
        self
    }

    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }

    pub fn extract(&self, record: &Record) -> Value {
        (self.extract)(record)
    }

    /// Rendered cell text, before CSV escaping.
    pub fn cell(&self, record: &Record) -> String {
        self.extract(record).text().into_owned()
    }
}

impl fmt::Debug for ColumnSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ColumnSpec")
            .field("header", &self.header)
            .field("source", &self.source)
            .field("date", &self.date)
            .finish_non_exhaustive()
    }
}

// ---------------------------------------------------------------------------
// CSV rendering
// ---------------------------------------------------------------------------

/// Render `records` through `columns` as BOM-prefixed CSV text.
///
/// Lines are separated by `\n` with no trailing newline. Fields containing a
/// comma, a double quote or a line break are quoted with inner quotes
/// doubled.
pub fn render_csv<'a, I>(records: I, columns: &[ColumnSpec]) -> Result<String, ExportError>
where
    I: IntoIterator<Item = &'a Record>,
{
    if columns.is_empty() {
        // csv would quote an empty record; keep bare empty lines instead.
        let rows = records.into_iter().count();
        return Ok(format!("{BOM}{}", "\n".repeat(rows)));
    }

    if let [column] = columns {
        // csv quotes a lone empty field; a missing value must stay a bare empty line.
        let mut lines = vec![escape_field(&column.header)?];
        for rec in records {
            lines.push(escape_field(&column.cell(rec))?);
        }
        log::debug!("rendered {} CSV lines across 1 column", lines.len());
        return Ok(format!("{BOM}{}", lines.join("\n")));
    }

    let mut buf = Vec::new();
    let mut lines = 0usize;
    {
        let mut wtr = csv_writer(&mut buf);
        wtr.write_record(columns.iter().map(|c| c.header.as_str()))?;
        lines += 1;
        for rec in records {
            wtr.write_record(columns.iter().map(|c| c.cell(rec)))?;
            lines += 1;
        }
        wtr.flush()?;
    }

    if buf.last() == Some(&b'\n') {
        buf.pop();
    }
    log::debug!("rendered {lines} CSV lines across {} columns", columns.len());

    let mut out = String::with_capacity(buf.len() + BOM.len_utf8());
    out.push(BOM);
    out.push_str(&String::from_utf8(buf)?);
    Ok(out)
}

fn csv_writer<W: Write>(out: W) -> csv::Writer<W> {
    csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .quote_style(csv::QuoteStyle::Necessary)
        .from_writer(out)
}

/// Escape one value on its own; empty stays empty.
fn escape_field(value: &str) -> Result<String, ExportError> {
    if value.is_empty() {
        return Ok(String::new());
    }
    let mut wtr = csv_writer(Vec::new());
    wtr.write_record([value])?;
    let mut bytes = wtr.into_inner().map_err(|e| ExportError::Io(e.into_error()))?;
    if bytes.last() == Some(&b'\n') {
        bytes.pop();
    }
    Ok(String::from_utf8(bytes)?)
}

/// Render and write the CSV text to `out`.
pub fn write_csv<'a, W, I>(
    mut out: W,
    records: I,
    columns: &[ColumnSpec],
) -> Result<(), ExportError>
where
    W: Write,
    I: IntoIterator<Item = &'a Record>,
{
    let text = render_csv(records, columns)?;
    out.write_all(text.as_bytes())?;
    out.flush()?;
    Ok(())
}

/// Best-effort export: never fails, bad values degrade to empty or
/// pass-through text.
pub fn export_csv<'a, I>(records: I, columns: &[ColumnSpec]) -> String
where
    I: IntoIterator<Item = &'a Record>,
{
    render_csv(records, columns).unwrap_or_else(|e| {
        log::error!("CSV export failed: {e}");
        BOM.to_string()
    })
}

/// Download file name: `<entity>-<YYYY-MM-DD>.csv`, dated on the export day.
pub fn export_file_name(entity_slug: &str, date: NaiveDate) -> String {
    format!("{entity_slug}-{}.csv", date.format(ISO_FORMAT))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id_amount() -> Vec<ColumnSpec> {
        vec![ColumnSpec::field("ID", "id"), ColumnSpec::field("Amount", "amount")]
    }

    #[test]
    fn exports_header_and_rows_with_bom() {
        let records = vec![Record::new().with("id", 1).with("amount", 75000)];
        let csv = export_csv(&records, &id_amount());
        assert_eq!(csv, "\u{FEFF}ID,Amount\n1,75000");
    }

    #[test]
    fn escapes_commas_and_quotes() {
        let records = vec![Record::new().with("name", "Jane, \"The Cook\"")];
        let csv = export_csv(&records, &[ColumnSpec::field("Name", "name")]);
        assert_eq!(csv, "\u{FEFF}Name\n\"Jane, \"\"The Cook\"\"\"");
    }

    #[test]
    fn quotes_newlines() {
        let records = vec![Record::new().with("note", "line one\nline two").with("id", 7)];
        let columns = [ColumnSpec::field("ID", "id"), ColumnSpec::field("Note", "note")];
        let csv = export_csv(&records, &columns);
        assert_eq!(csv, "\u{FEFF}ID,Note\n7,\"line one\nline two\"");
    }

    #[test]
    fn missing_and_null_values_render_empty() {
        let records = vec![Record::new().with("id", 1).with("amount", Value::Null)];
        let columns = [
            ColumnSpec::field("ID", "id"),
            ColumnSpec::field("Amount", "amount"),
            ColumnSpec::field("Email", "email"),
        ];
        let csv = export_csv(&records, &columns);
        assert_eq!(csv, "\u{FEFF}ID,Amount,Email\n1,,");
        assert!(!csv.contains("null"));
    }

    #[test]
    fn date_columns_are_reformatted() {
        let records = vec![
            Record::new().with("date", Value::date("2024-03-05")),
            Record::new().with("date", "soon"),
            Record::new(),
        ];
        let columns = [ColumnSpec::field("Raw", "date"), ColumnSpec::date("Date", "date")];
        let csv = export_csv(&records, &columns);
        assert_eq!(csv, "\u{FEFF}Raw,Date\n2024-03-05,05-Mar-2024\nsoon,soon\n,");
    }

    #[test]
    fn custom_columns_compute_values() {
        let records = vec![Record::new().with("qty", 3).with("price", 250)];
        let total = ColumnSpec::custom("Total", |rec| {
            let qty = rec.get("qty").and_then(Value::as_f64).unwrap_or(0.0);
            let price = rec.get("price").and_then(Value::as_f64).unwrap_or(0.0);
            Value::Float(qty * price)
        });
        assert_eq!(export_csv(&records, &[total]), "\u{FEFF}Total\n750");
    }

    #[test]
    fn no_records_yields_header_only() {
        assert_eq!(export_csv(&[], &id_amount()), "\u{FEFF}ID,Amount");
    }

    #[test]
    fn write_csv_emits_same_bytes() {
        let records = vec![Record::new().with("id", 1).with("amount", "₹75,000")];
        let mut out = Vec::new();
        write_csv(&mut out, &records, &id_amount()).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), export_csv(&records, &id_amount()));
        assert!(export_csv(&records, &id_amount()).ends_with("1,\"₹75,000\""));
    }

    #[test]
    fn single_empty_column_renders_bare_line() {
        let records = vec![Record::new().with("id", 1)];
        let csv = export_csv(&records, &[ColumnSpec::field("Email", "email")]);
        assert_eq!(csv, "\u{FEFF}Email\n");
    }

    #[test]
    fn single_column_still_escapes() {
        let records = vec![
            Record::new().with("email", "a@example.com"),
            Record::new().with("email", "x,y"),
            Record::new(),
        ];
        let csv = export_csv(&records, &[ColumnSpec::field("E, mail", "email")]);
        assert_eq!(csv, "\u{FEFF}\"E, mail\"\na@example.com\n\"x,y\"\n");
    }

    #[test]
    fn quotes_carriage_returns() {
        let records = vec![Record::new().with("id", 1).with("note", "a\rb")];
        let columns = [ColumnSpec::field("ID", "id"), ColumnSpec::field("Note", "note")];
        assert_eq!(export_csv(&records, &columns), "\u{FEFF}ID,Note\n1,\"a\rb\"");
    }

    #[test]
    fn headers_are_quoted_when_needed() {
        let columns = [ColumnSpec::field("ID", "id"), ColumnSpec::field("Amount, ₹", "amount")];
        let csv = export_csv(&[Record::new().with("id", 2).with("amount", 10)], &columns);
        assert_eq!(csv, "\u{FEFF}ID,\"Amount, ₹\"\n2,10");
    }

    #[test]
    fn zero_columns_keep_one_line_per_record() {
        let records = vec![Record::new().with("id", 1), Record::new().with("id", 2)];
        let csv = export_csv(&records, &[]);
        assert_eq!(csv, "\u{FEFF}\n\n");
        assert_eq!(csv.split('\n').count(), records.len() + 1);
    }

    #[test]
    fn date_columns_are_flagged() {
        assert!(ColumnSpec::date("Date", "date").is_date());
        assert!(!ColumnSpec::field("ID", "id").is_date());
    }

    #[test]
    fn file_name_uses_slug_and_iso_date() {
        let date = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();
        assert_eq!(export_file_name("bookings", date), "bookings-2026-10-19.csv");
    }
}
