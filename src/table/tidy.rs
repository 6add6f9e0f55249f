//! Tidy (long form) reshaping
//!
//! Un-pivots a wide table into one row per observation/variable pair:
//!
//! ```text
//!   index | a | b            index | variable | value
//!   ------+---+---           ------+----------+------
//!     0   | 1 | 3    ==>       0   |    a     |   1
//!     1   | 2 | 4              1   |    a     |   2
//!                              0   |    b     |   3
//!                              1   |    b     |   4
//! ```
//!
//! Column order drives the outer loop, row order the inner one.

use std::ops::Deref;

use super::error::{TableError, TableResult};
use super::types::{Data, Series, Table, Value};

pub const INDEX_COLUMN: &str = "index";
pub const VARIABLE_COLUMN: &str = "variable";
pub const VALUE_COLUMN: &str = "value";

/// A table with exactly the columns `index`, `variable` and `value`
#[derive(Debug, Clone, PartialEq)]
pub struct TidyTable(Table);

impl TidyTable {
    pub fn into_inner(self) -> Table {
        self.0
    }

    pub fn index_values(&self) -> &[Value] {
        &self.0.columns()[0].values
    }

    pub fn variables(&self) -> &[Value] {
        &self.0.columns()[1].values
    }

    pub fn values(&self) -> &[Value] {
        &self.0.columns()[2].values
    }

    /// Iterate `(index, variable, value)` triples in row order
    pub fn rows(&self) -> impl Iterator<Item = (&Value, &Value, &Value)> {
        self.index_values()
            .iter()
            .zip(self.variables())
            .zip(self.values())
            .map(|((i, var), val)| (i, var, val))
    }
}

impl Deref for TidyTable {
    type Target = Table;

    fn deref(&self) -> &Table {
        &self.0
    }
}

impl From<TidyTable> for Table {
    fn from(tidy: TidyTable) -> Self {
        tidy.0
    }
}

/// Reshape a wide table into long form without touching the input
pub fn reshape(table: &Table) -> TableResult<TidyTable> {
    if table.is_empty() {
        return Err(TableError::NoColumns);
    }

    let total = table.row_count() * table.column_count();
    let mut index = Vec::with_capacity(total);
    let mut variable = Vec::with_capacity(total);
    let mut value = Vec::with_capacity(total);

    for column in table.columns() {
        for (label, cell) in table.index().iter().zip(&column.values) {
            index.push(label.clone());
            variable.push(Value::Text(column.name.clone()));
            value.push(cell.clone());
        }
    }

    let tidy = Table::from_columns(vec![
        (INDEX_COLUMN, index),
        (VARIABLE_COLUMN, variable),
        (VALUE_COLUMN, value),
    ])?;

    tracing::trace!(
        rows = table.row_count(),
        columns = table.column_count(),
        tidy_rows = tidy.row_count(),
        "Reshaped table to long form"
    );

    Ok(TidyTable(tidy))
}

/// Reshape a series; its own name wins over `title` for the variable label
pub fn reshape_series(series: &Series, title: &str) -> TableResult<TidyTable> {
    let table = series.clone().into_table(title)?;
    reshape(&table)
}

/// Reshape whatever a data source produced
pub fn reshape_data(data: &Data, title: &str) -> TableResult<TidyTable> {
    match data {
        Data::Table(t) => reshape(t),
        Data::Series(s) => reshape_series(s, title),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ints(values: &[i64]) -> Vec<Value> {
        values.iter().map(|v| Value::Int(*v)).collect()
    }

    fn sample() -> Table {
        Table::from_columns(vec![("a", ints(&[1, 2])), ("b", ints(&[3, 4]))]).unwrap()
    }

    #[test]
    fn test_reshape_scenario() {
        let tidy = reshape(&sample()).unwrap();

        let rows: Vec<(Value, Value, Value)> = tidy
            .rows()
            .map(|(i, var, val)| (i.clone(), var.clone(), val.clone()))
            .collect();

        assert_eq!(
            rows,
            vec![
                (Value::Int(0), Value::from("a"), Value::Int(1)),
                (Value::Int(1), Value::from("a"), Value::Int(2)),
                (Value::Int(0), Value::from("b"), Value::Int(3)),
                (Value::Int(1), Value::from("b"), Value::Int(4)),
            ]
        );
        assert_eq!(tidy.column_names(), vec!["index", "variable", "value"]);
    }

    #[test]
    fn test_row_count_is_rows_times_columns() {
        for (rows, cols) in [(0usize, 1usize), (1, 1), (3, 2), (5, 4), (7, 3)] {
            let columns = (0..cols).map(|c| {
                (
                    format!("c{}", c),
                    (0..rows).map(|r| Value::Float((r * c) as f64)).collect(),
                )
            });
            let table = Table::from_columns(columns).unwrap();
            let tidy = reshape(&table).unwrap();

            assert_eq!(tidy.row_count(), rows * cols);
            assert_eq!(tidy.column_count(), 3);
        }
    }

    #[test]
    fn test_reshape_is_deterministic_and_pure() {
        let table = sample();
        let before = table.clone();

        let first = reshape(&table).unwrap();
        let second = reshape(&table).unwrap();

        assert_eq!(first, second);
        assert_eq!(table, before);
    }

    #[test]
    fn test_explicit_index_is_carried() {
        let table = sample()
            .with_index(vec![Value::from("2024-01-01"), Value::from("2024-01-02")])
            .unwrap();
        let tidy = reshape(&table).unwrap();

        assert_eq!(tidy.index_values()[0], Value::from("2024-01-01"));
        assert_eq!(tidy.index_values()[3], Value::from("2024-01-02"));
    }

    #[test]
    fn test_no_columns_fails() {
        assert!(matches!(reshape(&Table::new()), Err(TableError::NoColumns)));
    }

    #[test]
    fn test_series_uses_title_unless_named() {
        let unnamed = Series::new(ints(&[5, 6]));
        let tidy = reshape_series(&unnamed, "Returns").unwrap();
        assert!(tidy.variables().iter().all(|v| *v == Value::from("Returns")));

        let named = Series::new(ints(&[5, 6])).named("close");
        let tidy = reshape_data(&Data::Series(named), "Returns").unwrap();
        assert!(tidy.variables().iter().all(|v| *v == Value::from("close")));
        assert_eq!(tidy.row_count(), 2);
    }
}
