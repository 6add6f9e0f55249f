//! Chart kinds
//!
//! Every descriptor carries one `ChartKind`; the renderer dispatches on it
//! through a single function table.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// What kind of visual element a descriptor renders to
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ChartKind {
    /// Connected lines, one trace per series
    Line,
    /// Vertical bars
    Bar,
    /// Unconnected markers
    Scatter,
    /// Stacked filled lines
    Area,
    /// 2D density heatmap over an x/y pair
    #[serde(alias = "density_heatmap")]
    Heatmap,
    /// Value distribution
    Histogram,
    /// Plain data table
    Table,
}

impl ChartKind {
    /// Get all kinds for iteration
    pub fn all() -> &'static [ChartKind] {
        &[
            ChartKind::Line,
            ChartKind::Bar,
            ChartKind::Scatter,
            ChartKind::Area,
            ChartKind::Heatmap,
            ChartKind::Histogram,
            ChartKind::Table,
        ]
    }

    /// Tabular kinds take cell/header styling instead of a figure template
    pub fn is_tabular(&self) -> bool {
        matches!(self, ChartKind::Table)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ChartKind::Line => "line",
            ChartKind::Bar => "bar",
            ChartKind::Scatter => "scatter",
            ChartKind::Area => "area",
            ChartKind::Heatmap => "heatmap",
            ChartKind::Histogram => "histogram",
            ChartKind::Table => "table",
        }
    }
}

impl fmt::Display for ChartKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ChartKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "line" => Ok(ChartKind::Line),
            "bar" => Ok(ChartKind::Bar),
            "scatter" => Ok(ChartKind::Scatter),
            "area" => Ok(ChartKind::Area),
            "heatmap" | "density_heatmap" => Ok(ChartKind::Heatmap),
            "histogram" => Ok(ChartKind::Histogram),
            "table" => Ok(ChartKind::Table),
            other => Err(format!("unknown chart kind: {}", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_round_trips_display() {
        for kind in ChartKind::all() {
            assert_eq!(kind.to_string().parse::<ChartKind>().unwrap(), *kind);
        }
        assert_eq!("density_heatmap".parse::<ChartKind>().unwrap(), ChartKind::Heatmap);
        assert!("pie".parse::<ChartKind>().is_err());
    }

    #[test]
    fn test_only_table_is_tabular() {
        let tabular: Vec<_> = ChartKind::all().iter().filter(|k| k.is_tabular()).collect();
        assert_eq!(tabular, vec![&ChartKind::Table]);
    }

    #[test]
    fn test_serde_alias() {
        let kind: ChartKind = serde_json::from_str("\"density_heatmap\"").unwrap();
        assert_eq!(kind, ChartKind::Heatmap);
        assert_eq!(serde_json::to_string(&ChartKind::Area).unwrap(), "\"area\"");
    }
}
