use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use arrow::array::{
    Array, AsArray, BooleanArray, Float32Array, Float64Array, Int32Array, Int64Array,
    StringArray,
};
use arrow::datatypes::DataType;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::Value as JsonValue;

use super::model::{ListingTable, RawRow, RawValue};

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Load and normalize a listing sheet.
pub fn load_listings(path: &Path) -> Result<ListingTable> {
    let rows = load_rows(path)?;
    let table = ListingTable::from_rows(&rows);
    log::info!(
        "Loaded {} listings from {} ({} room labels)",
        table.len(),
        path.display(),
        table.room_options.len()
    );
    Ok(table)
}

/// Load raw rows from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.parquet` – flat scalar columns (recommended)
/// * `.json`    – `[{ "Precio_USD": 120000, "Superficie_m2": 80, ... }, ...]`
/// * `.csv`     – header row, one listing per line
pub fn load_rows(path: &Path) -> Result<Vec<RawRow>> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "parquet" | "pq" => load_parquet(path),
        "json" => load_json(path),
        "csv" => load_csv(path),
        "xlsx" | "xls" => bail!("Spreadsheet files are not supported; export the sheet to CSV or Parquet"),
        other => bail!("Unsupported file extension: .{other}"),
    }
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented, the default `df.to_json(orient='records')`).
fn load_json(path: &Path) -> Result<Vec<RawRow>> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    let root: JsonValue = serde_json::from_str(&text).context("parsing JSON")?;

    let records = root
        .as_array()
        .context("Expected top-level JSON array")?;

    records
        .iter()
        .enumerate()
        .map(|(i, rec)| -> Result<RawRow> {
            let obj = rec
                .as_object()
                .with_context(|| format!("Row {i} is not a JSON object"))?;
            Ok(obj
                .iter()
                .map(|(key, val)| (key.clone(), json_to_raw(val)))
                .collect())
        })
        .collect()
}

fn json_to_raw(val: &JsonValue) -> RawValue {
    match val {
        JsonValue::String(s) => RawValue::String(s.clone()),
        JsonValue::Number(n) => {
            if let Some(i) = n.as_i64() {
                RawValue::Integer(i)
            } else if let Some(f) = n.as_f64() {
                RawValue::Float(f)
            } else {
                RawValue::String(n.to_string())
            }
        }
        JsonValue::Bool(b) => RawValue::Bool(*b),
        JsonValue::Null => RawValue::Null,
        other => RawValue::String(other.to_string()),
    }
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// CSV layout: header row with column names, every cell type-guessed.
fn load_csv(path: &Path) -> Result<Vec<RawRow>> {
    let mut reader = csv::Reader::from_path(path).context("opening CSV")?;
    let headers: Vec<String> = reader
        .headers()
        .context("reading CSV headers")?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    let mut rows = Vec::new();

    for (row_no, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("CSV row {row_no}"))?;

        let row: RawRow = headers
            .iter()
            .zip(record.iter())
            .map(|(col, value)| (col.clone(), guess_cell_type(value)))
            .collect();

        rows.push(row);
    }

    Ok(rows)
}

fn guess_cell_type(s: &str) -> RawValue {
    let s = s.trim();
    if s.is_empty() {
        return RawValue::Null;
    }
    if let Ok(i) = s.parse::<i64>() {
        return RawValue::Integer(i);
    }
    if let Ok(f) = s.parse::<f64>() {
        return RawValue::Float(f);
    }
    if s == "true" || s == "false" {
        return RawValue::Bool(s == "true");
    }
    RawValue::String(s.to_string())
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file of listings.
///
/// Every column is read as a scalar (strings, ints, floats, bools); nested
/// columns are rendered as their type name.  Works with files written by
/// both **Pandas** (`df.to_parquet()`) and **Polars** (`df.write_parquet()`).
fn load_parquet(path: &Path) -> Result<Vec<RawRow>> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let builder = ParquetRecordBatchReaderBuilder::try_new(file)
        .context("reading parquet metadata")?;
    let reader = builder.build().context("building parquet reader")?;

    let mut rows = Vec::new();

    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;
        let schema = batch.schema();

        for row in 0..batch.num_rows() {
            let raw: RawRow = schema
                .fields()
                .iter()
                .enumerate()
                .map(|(col_idx, field)| -> Result<(String, RawValue)> {
                    let value = extract_raw_value(batch.column(col_idx), row)
                        .with_context(|| format!("Row {row}, column '{}'", field.name()))?;
                    Ok((field.name().clone(), value))
                })
                .collect::<Result<_>>()?;
            rows.push(raw);
        }
    }

    Ok(rows)
}

// -- Parquet / Arrow helpers --

fn downcast<'a, T: 'static>(col: &'a Arc<dyn Array>) -> Result<&'a T> {
    col.as_any()
        .downcast_ref::<T>()
        .with_context(|| format!("unexpected array type for {:?}", col.data_type()))
}

/// Extract a single cell from an Arrow column at a given row.
fn extract_raw_value(col: &Arc<dyn Array>, row: usize) -> Result<RawValue> {
    if col.is_null(row) {
        return Ok(RawValue::Null);
    }
    let value = match col.data_type() {
        DataType::Utf8 => RawValue::String(downcast::<StringArray>(col)?.value(row).to_string()),
        DataType::LargeUtf8 => RawValue::String(col.as_string::<i64>().value(row).to_string()),
        DataType::Int32 => RawValue::Integer(downcast::<Int32Array>(col)?.value(row) as i64),
        DataType::Int64 => RawValue::Integer(downcast::<Int64Array>(col)?.value(row)),
        DataType::Float32 => RawValue::Float(downcast::<Float32Array>(col)?.value(row) as f64),
        DataType::Float64 => RawValue::Float(downcast::<Float64Array>(col)?.value(row)),
        DataType::Boolean => RawValue::Bool(downcast::<BooleanArray>(col)?.value(row)),
        other => RawValue::String(format!("{other:?}")),
    };
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    use arrow::datatypes::{Field, Schema};
    use arrow::record_batch::RecordBatch;
    use parquet::arrow::ArrowWriter;

    fn temp_file(suffix: &str, content: &str) -> NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
        write!(file, "{content}").unwrap();
        file
    }

    #[test]
    fn csv_rows_are_type_guessed() {
        let file = temp_file(
            ".csv",
            "Precio_USD,Superficie_m2,habitaciones,barrio\n120000,80.5,3,Centro\n,abc,2,\n",
        );
        let rows = load_rows(file.path()).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0]["Precio_USD"], RawValue::Integer(120_000));
        assert_eq!(rows[0]["Superficie_m2"], RawValue::Float(80.5));
        assert_eq!(rows[0]["barrio"], RawValue::String("Centro".into()));
        assert_eq!(rows[1]["Precio_USD"], RawValue::Null);
        assert_eq!(rows[1]["Superficie_m2"], RawValue::String("abc".into()));
    }

    #[test]
    fn json_listings_normalize() {
        let file = temp_file(
            ".json",
            r#"[
                {"PRECIO_USD": 200000, "SUPERFICIE_M2": 100, "HABITACIONES": 4},
                {"Precio_USD": "n/a", "Superficie_m2": 50.0, "habitaciones": null}
            ]"#,
        );
        let table = load_listings(file.path()).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.records[0].price_per_m2, Some(2000.0));
        assert_eq!(table.records[1].price_usd, None);
        assert_eq!(table.records[1].rooms, None);
        assert_eq!(table.room_options.len(), 1);
    }

    #[test]
    fn json_non_object_row_is_an_error() {
        let file = temp_file(".json", "[1, 2]");
        let err = load_rows(file.path()).unwrap_err();
        assert!(format!("{err:#}").contains("Row 0 is not a JSON object"));
    }

    #[test]
    fn parquet_scalar_columns_round_trip() {
        let schema = Arc::new(Schema::new(vec![
            Field::new("Precio_USD", DataType::Float64, true),
            Field::new("Superficie_m2", DataType::Int64, true),
            Field::new("habitaciones", DataType::Utf8, true),
        ]));
        let batch = RecordBatch::try_new(
            schema.clone(),
            vec![
                Arc::new(Float64Array::from(vec![Some(90_000.0), None])),
                Arc::new(Int64Array::from(vec![Some(60), Some(40)])),
                Arc::new(StringArray::from(vec![Some("2"), None])),
            ],
        )
        .unwrap();

        let file = tempfile::Builder::new().suffix(".parquet").tempfile().unwrap();
        let mut writer = ArrowWriter::try_new(file.reopen().unwrap(), schema, None).unwrap();
        writer.write(&batch).unwrap();
        writer.close().unwrap();

        let rows = load_rows(file.path()).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0]["Precio_USD"], RawValue::Float(90_000.0));
        assert_eq!(rows[0]["Superficie_m2"], RawValue::Integer(60));
        assert_eq!(rows[0]["habitaciones"], RawValue::String("2".into()));
        assert_eq!(rows[1]["Precio_USD"], RawValue::Null);
        assert_eq!(rows[1]["habitaciones"], RawValue::Null);
    }

    #[test]
    fn unsupported_extension_is_rejected() {
        let file = temp_file(".xlsx", "");
        assert!(load_rows(file.path()).is_err());
        let file = temp_file(".txt", "");
        let err = load_rows(file.path()).unwrap_err();
        assert!(err.to_string().contains(".txt"));
    }
}
