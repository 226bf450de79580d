use crate::utils::error::{CpStarsError, Result};
use serde::Serialize;
use serde_json::Value;
use std::io::Write;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum OutputFormat {
    #[default]
    Json,
    Csv,
}

impl FromStr for OutputFormat {
    type Err = CpStarsError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "csv" => Ok(Self::Csv),
            other => Err(CpStarsError::InvalidConfigValue {
                field: "output.format".to_string(),
                value: other.to_string(),
                reason: "Unsupported format. Valid formats: json, csv".to_string(),
            }),
        }
    }
}

/// Writes a query result (one record or a sequence) in the requested format.
pub fn write_result<T: Serialize, W: Write>(
    result: &T,
    format: OutputFormat,
    mut writer: W,
) -> Result<()> {
    match format {
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut writer, result)?;
            writeln!(writer)?;
        }
        OutputFormat::Csv => {
            let value = serde_json::to_value(result)?;
            write_csv(&value, writer)?;
        }
    }
    Ok(())
}

/// Column holding array elements (or a top-level value) that are not objects.
const SCALAR_COLUMN: &str = "value";

/// One row per record, one column per top-level field in first-seen order.
/// Nested values are written as compact JSON, nulls as empty cells. Elements
/// that are not objects get a row of their own in the `value` column.
fn write_csv<W: Write>(value: &Value, writer: W) -> Result<()> {
    let items: Vec<&Value> = match value {
        Value::Array(items) => items.iter().collect(),
        other => vec![other],
    };

    let mut header: Vec<&str> = Vec::new();
    for &item in &items {
        match item {
            Value::Object(row) => {
                for key in row.keys() {
                    if !header.contains(&key.as_str()) {
                        header.push(key);
                    }
                }
            }
            _ => {
                if !header.contains(&SCALAR_COLUMN) {
                    header.push(SCALAR_COLUMN);
                }
            }
        }
    }

    let mut csv_writer = csv::Writer::from_writer(writer);
    if header.is_empty() {
        csv_writer.flush()?;
        return Ok(());
    }

    csv_writer.write_record(&header)?;
    for item in items {
        let cells: Vec<String> = header
            .iter()
            .map(|key| match item {
                Value::Object(row) => cell(row.get(*key)),
                scalar if *key == SCALAR_COLUMN => cell(Some(scalar)),
                _ => String::new(),
            })
            .collect();
        csv_writer.write_record(&cells)?;
    }
    csv_writer.flush()?;

    Ok(())
}

fn cell(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_csv_output_collects_columns() {
        let records = json!([
            {"id": 1, "band": "V", "value": 6.12},
            {"id": 2, "band": "B", "value": null, "quality": "A"},
            {"id": 3, "datasource": {"id": 7, "name": "Gaia DR2"}}
        ]);

        let mut out = Vec::new();
        write_result(&records, OutputFormat::Csv, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "id,band,value,quality,datasource");
        assert_eq!(lines[1], "1,V,6.12,,");
        assert_eq!(lines[2], "2,B,,A,");
        assert_eq!(lines[3], r#"3,,,,"{""id"":7,""name"":""Gaia DR2""}""#);
    }

    #[test]
    fn test_csv_output_keeps_non_object_elements() {
        let records = json!([
            {"id": 1, "name": "I/345/gaia2"},
            "J/A+A/561/A123",
            42
        ]);

        let mut out = Vec::new();
        write_result(&records, OutputFormat::Csv, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines, vec!["id,name,value", "1,I/345/gaia2,", ",,J/A+A/561/A123", ",,42"]);
    }

    #[test]
    fn test_json_output_single_record() {
        let mut out = Vec::new();
        write_result(&json!({"id": 3, "renson": "61600"}), OutputFormat::Json, &mut out).unwrap();
        let parsed: Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(parsed["renson"], "61600");
    }

    #[test]
    fn test_empty_sequence_writes_nothing_as_csv() {
        let mut out = Vec::new();
        write_result(&json!([]), OutputFormat::Csv, &mut out).unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn test_parse_format() {
        assert_eq!("CSV".parse::<OutputFormat>().unwrap(), OutputFormat::Csv);
        assert!("xml".parse::<OutputFormat>().is_err());
    }
}
