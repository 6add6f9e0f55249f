//! CSV Import
//!
//! Loads CSV files into tables so dashboards can chart files on disk.
//! Cells are typed on the way in: integer, float, boolean, text, or null
//! when empty.

use std::io::Write;
use std::path::Path;

use super::error::{TableError, TableResult};
use super::types::{unique_names, Table, Value};

/// CSV reading options
#[derive(Debug, Clone)]
pub struct CsvOptions {
    /// Column to use as the row index instead of positional labels
    pub index_column: Option<String>,
    /// Field delimiter
    pub delimiter: u8,
}

impl Default for CsvOptions {
    fn default() -> Self {
        Self {
            index_column: None,
            delimiter: b',',
        }
    }
}

impl CsvOptions {
    /// Set the index column
    pub fn with_index_column(mut self, column: impl Into<String>) -> Self {
        self.index_column = Some(column.into());
        self
    }

    /// Set the field delimiter
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }
}

/// Type a raw CSV field
pub fn parse_cell(raw: &str) -> Value {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Value::Null;
    }
    if let Ok(i) = trimmed.parse::<i64>() {
        return Value::Int(i);
    }
    if let Ok(f) = trimmed.parse::<f64>() {
        return Value::Float(f);
    }
    match trimmed.to_lowercase().as_str() {
        "true" => Value::Bool(true),
        "false" => Value::Bool(false),
        _ => Value::Text(trimmed.to_string()),
    }
}

/// Read a CSV file with a header row into a table
pub fn read_csv(path: &Path, options: &CsvOptions) -> TableResult<Table> {
    let csv_err = |e: csv::Error| TableError::Csv {
        path: path.to_path_buf(),
        error: e.to_string(),
    };

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .delimiter(options.delimiter)
        .from_path(path)
        .map_err(csv_err)?;

    let headers: Vec<String> = reader
        .headers()
        .map_err(csv_err)?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();
    unique_names(headers.iter().map(String::as_str))?;

    let index_pos = match &options.index_column {
        Some(name) => Some(
            headers
                .iter()
                .position(|h| h == name)
                .ok_or_else(|| TableError::ColumnNotFound(name.clone()))?,
        ),
        None => None,
    };

    let mut cells: Vec<Vec<Value>> = vec![Vec::new(); headers.len()];
    for (line, record) in reader.records().enumerate() {
        let record = record.map_err(csv_err)?;
        if record.len() != headers.len() {
            return Err(TableError::Csv {
                path: path.to_path_buf(),
                error: format!(
                    "record {} has {} fields, expected {}",
                    line + 1,
                    record.len(),
                    headers.len()
                ),
            });
        }
        for (col, field) in record.iter().enumerate() {
            cells[col].push(parse_cell(field));
        }
    }

    let mut index = None;
    let mut columns = Vec::with_capacity(headers.len());
    for (pos, (name, values)) in headers.into_iter().zip(cells).enumerate() {
        if Some(pos) == index_pos {
            index = Some(values);
        } else {
            columns.push((name, values));
        }
    }

    let mut table = Table::new();
    if let Some(index) = index {
        table = table.with_index(index)?;
    }
    for (name, values) in columns {
        table.push_column(name, values)?;
    }

    tracing::debug!(
        path = %path.display(),
        rows = table.row_count(),
        columns = table.column_count(),
        "Loaded CSV table"
    );

    Ok(table)
}

/// Write a table as CSV; the index goes first under `index_label` when given
pub fn write_csv<W: Write>(table: &Table, writer: W, index_label: Option<&str>) -> TableResult<()> {
    let to_err = |e: csv::Error| TableError::Csv {
        path: "<output>".into(),
        error: e.to_string(),
    };

    let mut out = csv::Writer::from_writer(writer);

    let mut header: Vec<String> = Vec::with_capacity(table.column_count() + 1);
    if let Some(label) = index_label {
        header.push(label.to_string());
    }
    header.extend(table.column_names().into_iter().map(str::to_string));
    out.write_record(&header).map_err(to_err)?;

    for row in 0..table.row_count() {
        let mut record: Vec<String> = Vec::with_capacity(header.len());
        if index_label.is_some() {
            record.push(table.index()[row].to_string());
        }
        for column in table.columns() {
            record.push(column.values[row].to_string());
        }
        out.write_record(&record).map_err(to_err)?;
    }

    out.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn write_file(dir: &Path, name: &str, content: &str) -> std::path::PathBuf {
        let path = dir.join(name);
        std::fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_parse_cell_types() {
        assert_eq!(parse_cell(""), Value::Null);
        assert_eq!(parse_cell(" 42 "), Value::Int(42));
        assert_eq!(parse_cell("1.5"), Value::Float(1.5));
        assert_eq!(parse_cell("TRUE"), Value::Bool(true));
        assert_eq!(parse_cell("setosa"), Value::from("setosa"));
    }

    #[test]
    fn test_read_csv_positional_index() {
        let dir = tempdir().unwrap();
        let path = write_file(dir.path(), "data.csv", "a,b\n1,3\n2,4\n");

        let table = read_csv(&path, &CsvOptions::default()).unwrap();

        assert_eq!(table.column_names(), vec!["a", "b"]);
        assert_eq!(table.row_count(), 2);
        assert_eq!(table.column("b").unwrap().values, vec![Value::Int(3), Value::Int(4)]);
        assert!(!table.has_explicit_index());
    }

    #[test]
    fn test_read_csv_with_index_column() {
        let dir = tempdir().unwrap();
        let path = write_file(dir.path(), "data.csv", "date,close\n2024-01-01,10.5\n2024-01-02,11\n");

        let options = CsvOptions::default().with_index_column("date");
        let table = read_csv(&path, &options).unwrap();

        assert_eq!(table.column_names(), vec!["close"]);
        assert_eq!(table.index()[0], Value::from("2024-01-01"));
        assert_eq!(table.column("close").unwrap().values[1], Value::Int(11));
    }

    #[test]
    fn test_read_csv_missing_index_column() {
        let dir = tempdir().unwrap();
        let path = write_file(dir.path(), "data.csv", "a\n1\n");

        let options = CsvOptions::default().with_index_column("date");
        assert!(matches!(read_csv(&path, &options), Err(TableError::ColumnNotFound(_))));
    }

    #[test]
    fn test_read_csv_duplicate_headers() {
        let dir = tempdir().unwrap();
        let path = write_file(dir.path(), "data.csv", "a,a\n1,2\n");
        assert!(matches!(
            read_csv(&path, &CsvOptions::default()),
            Err(TableError::DuplicateColumn(_))
        ));
    }

    #[test]
    fn test_read_csv_missing_file() {
        let result = read_csv(Path::new("/nonexistent/pandex.csv"), &CsvOptions::default());
        assert!(matches!(result, Err(TableError::Csv { .. })));
    }

    #[test]
    fn test_write_csv() {
        let table = Table::from_columns(vec![("a", vec![Value::Int(1), Value::Null])]).unwrap();
        let mut buf = Vec::new();
        write_csv(&table, &mut buf, Some("index")).unwrap();

        assert_eq!(String::from_utf8(buf).unwrap(), "index,a\n0,1\n1,\n");
    }
}
