//! Pandex Tables
//!
//! Tabular data handed to charts:
//!
//! - **types**: Cells, tables, series and the `Data` union
//! - **tidy**: Wide to long (tidy) reshaping
//! - **csv_import**: Loading tables from CSV files
//! - **error**: Error types
//!
//! # Example
//!
//! ```rust
//! use pandex::table::{reshape, Table, Value};
//!
//! let table = Table::from_columns(vec![
//!     ("a", vec![Value::Int(1), Value::Int(2)]),
//!     ("b", vec![Value::Int(3), Value::Int(4)]),
//! ])
//! .unwrap();
//!
//! let tidy = reshape(&table).unwrap();
//! assert_eq!(tidy.row_count(), 4);
//! assert_eq!(tidy.column_names(), vec!["index", "variable", "value"]);
//! ```

pub mod csv_import;
pub mod error;
pub mod tidy;
pub mod types;

// Re-export commonly used types
pub use csv_import::{parse_cell, read_csv, write_csv, CsvOptions};
pub use error::{TableError, TableResult};
pub use tidy::{reshape, reshape_data, reshape_series, TidyTable, INDEX_COLUMN, VALUE_COLUMN, VARIABLE_COLUMN};
pub use types::{positional_index, Column, Data, Series, Table, Value};
