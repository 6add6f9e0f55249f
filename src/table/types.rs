//! Core data types for tabular chart data
//!
//! This module defines the fundamental types handed to charts:
//! - `Value`: A single cell
//! - `Table`: Named, positionally aligned columns plus a row index
//! - `Series`: One column with an index and an optional name
//! - `Data`: Whatever a data source yields (table or series)

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

use super::error::{TableError, TableResult};

/// Precision past which rounding an f64 cannot change it
const MAX_ROUND_DECIMALS: u32 = 15;

/// A single table cell
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

impl Value {
    /// Round floating point cells to `decimals` places, leave everything else as is
    ///
    /// Floats that cannot be scaled without overflowing are returned unchanged.
    pub fn round(&self, decimals: u32) -> Value {
        match self {
            Value::Float(f) if f.is_finite() && decimals <= MAX_ROUND_DECIMALS => {
                let factor = 10f64.powi(decimals as i32);
                let scaled = f * factor;
                if scaled.is_finite() {
                    Value::Float(scaled.round() / factor)
                } else {
                    Value::Float(*f)
                }
            }
            other => other.clone(),
        }
    }

    /// Numeric view of the cell, if it has one
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Int(i) => Some(*i as f64),
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => Ok(()),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Int(i) => write!(f, "{}", i),
            Value::Float(x) => write!(f, "{}", x),
            Value::Text(s) => write!(f, "{}", s),
        }
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int(v as i64)
    }
}

impl From<usize> for Value {
    fn from(v: usize) -> Self {
        Value::Int(v as i64)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Text(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Text(v)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map(Into::into).unwrap_or(Value::Null)
    }
}

/// Positional index labels `0..len`
pub fn positional_index(len: usize) -> Vec<Value> {
    (0..len).map(Value::from).collect()
}

/// A named column of cells
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    pub name: String,
    pub values: Vec<Value>,
}

impl Column {
    pub fn new(name: impl Into<String>, values: Vec<Value>) -> Self {
        Self {
            name: name.into(),
            values,
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Wide table: ordered named columns aligned by row position
///
/// The row index is positional (`0..n`) unless set explicitly with
/// [`Table::with_index`]. Column names are unique. Deserialized tables are
/// checked the same way as built ones.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(try_from = "RawTable")]
pub struct Table {
    index: Vec<Value>,
    columns: Vec<Column>,
    #[serde(default)]
    explicit_index: bool,
}

/// Unchecked wire form of [`Table`]
#[derive(Deserialize)]
struct RawTable {
    #[serde(default)]
    index: Vec<Value>,
    columns: Vec<Column>,
    #[serde(default)]
    explicit_index: bool,
}

impl TryFrom<RawTable> for Table {
    type Error = TableError;

    fn try_from(raw: RawTable) -> TableResult<Self> {
        let table = Table::from_columns(raw.columns.into_iter().map(|c| (c.name, c.values)))?;

        if raw.explicit_index {
            return table.with_index(raw.index);
        }
        if !table.is_empty() && raw.index.len() != table.row_count() {
            return Err(TableError::LengthMismatch {
                name: "index".to_string(),
                expected: table.row_count(),
                actual: raw.index.len(),
            });
        }
        Ok(table)
    }
}

impl Table {
    /// Create an empty table with no rows and no columns
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table from `(name, values)` pairs with a positional index
    pub fn from_columns<I, S>(columns: I) -> TableResult<Self>
    where
        I: IntoIterator<Item = (S, Vec<Value>)>,
        S: Into<String>,
    {
        let mut table = Table::new();
        for (name, values) in columns {
            table.push_column(name, values)?;
        }
        Ok(table)
    }

    /// Replace the row index with explicit labels
    pub fn with_index(mut self, index: Vec<Value>) -> TableResult<Self> {
        if !self.columns.is_empty() && index.len() != self.row_count() {
            return Err(TableError::LengthMismatch {
                name: "index".to_string(),
                expected: self.row_count(),
                actual: index.len(),
            });
        }
        self.index = index;
        self.explicit_index = true;
        Ok(self)
    }

    /// Append a column; its length must match the existing rows
    pub fn push_column(&mut self, name: impl Into<String>, values: Vec<Value>) -> TableResult<()> {
        let name = name.into();

        if self.columns.iter().any(|c| c.name == name) {
            return Err(TableError::DuplicateColumn(name));
        }

        if self.columns.is_empty() && !self.explicit_index {
            self.index = positional_index(values.len());
        } else if values.len() != self.index.len() {
            return Err(TableError::LengthMismatch {
                name,
                expected: self.index.len(),
                actual: values.len(),
            });
        }

        self.columns.push(Column::new(name, values));
        Ok(())
    }

    pub fn row_count(&self) -> usize {
        self.index.len()
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn index(&self) -> &[Value] {
        &self.index
    }

    pub fn has_explicit_index(&self) -> bool {
        self.explicit_index
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    /// Look up a column by name
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Copy of the table with float cells rounded to `decimals` places
    pub fn rounded(&self, decimals: u32) -> Table {
        Table {
            index: self.index.clone(),
            columns: self
                .columns
                .iter()
                .map(|c| Column::new(c.name.clone(), c.values.iter().map(|v| v.round(decimals)).collect()))
                .collect(),
            explicit_index: self.explicit_index,
        }
    }
}

/// A single column with an index and an optional name
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Series {
    pub name: Option<String>,
    pub index: Vec<Value>,
    pub values: Vec<Value>,
}

impl Series {
    /// Create an unnamed series with a positional index
    pub fn new(values: Vec<Value>) -> Self {
        Self {
            name: None,
            index: positional_index(values.len()),
            values,
        }
    }

    /// Builder method: set the series name
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Builder method: set explicit index labels
    pub fn with_index(mut self, index: Vec<Value>) -> TableResult<Self> {
        if index.len() != self.values.len() {
            return Err(TableError::LengthMismatch {
                name: "index".to_string(),
                expected: self.values.len(),
                actual: index.len(),
            });
        }
        self.index = index;
        Ok(self)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Wrap into a one-column table; the series' own name wins over `fallback_name`
    pub fn into_table(self, fallback_name: &str) -> TableResult<Table> {
        let name = self.name.unwrap_or_else(|| fallback_name.to_string());
        let mut table = Table::new().with_index(self.index)?;
        table.push_column(name, self.values)?;
        Ok(table)
    }
}

/// What a data source yields
#[derive(Debug, Clone, PartialEq)]
pub enum Data {
    Table(Table),
    Series(Series),
}

impl Data {
    /// Round float cells to `decimals` places
    pub fn rounded(&self, decimals: u32) -> Data {
        match self {
            Data::Table(t) => Data::Table(t.rounded(decimals)),
            Data::Series(s) => Data::Series(Series {
                name: s.name.clone(),
                index: s.index.clone(),
                values: s.values.iter().map(|v| v.round(decimals)).collect(),
            }),
        }
    }

    /// Normalize to a table, naming a bare series after `title`
    pub fn into_table(self, title: &str) -> TableResult<Table> {
        match self {
            Data::Table(t) => Ok(t),
            Data::Series(s) => s.into_table(title),
        }
    }
}

impl From<Table> for Data {
    fn from(t: Table) -> Self {
        Data::Table(t)
    }
}

impl From<Series> for Data {
    fn from(s: Series) -> Self {
        Data::Series(s)
    }
}

/// Collect column names, rejecting duplicates
pub(crate) fn unique_names<'a>(names: impl IntoIterator<Item = &'a str>) -> TableResult<()> {
    let mut seen = HashSet::new();
    for name in names {
        if !seen.insert(name) {
            return Err(TableError::DuplicateColumn(name.to_string()));
        }
    }
    Ok(())
}
