//! Dashboard manifests
//!
//! TOML description of a dashboard whose charts read CSV files:
//!
//! ```toml
//! title = "Sales"
//! dark_theme = true
//! reload_interval = "page_refresh"
//!
//! [[rows]]
//! section = "Overview"
//!
//! [[rows]]
//! [[rows.charts]]
//! kind = "line"
//! title = "Revenue"
//! csv = "revenue.csv"
//! index_column = "date"
//! tidy = true
//! ```
//!
//! Relative CSV paths are resolved against the manifest's directory. Files are
//! re-read on every render. Settings the manifest leaves out (`title`,
//! `dark_theme`, `reload_interval`, `layout`, per-chart `decimal_places`) come
//! from the `[dashboard]` and `[layout]` sections of the config.

use serde::Deserialize;
use std::path::{Path, PathBuf};

use super::{Dashboard, DEFAULT_TITLE};
use crate::chart::{ChartDescriptor, ChartKind, Options, Producer, ProducerArgs};
use crate::config::{Config, ConfigError};
use crate::layout::{LayoutDefaults, LayoutRow, RowItem};
use crate::table::{read_csv, CsvOptions};

/// Top-level manifest document
#[derive(Debug, Clone, Deserialize)]
pub struct DashboardManifest {
    #[serde(default)]
    pub title: Option<String>,

    #[serde(default)]
    pub dark_theme: Option<bool>,

    #[serde(default)]
    pub reload_interval: Option<String>,

    #[serde(default)]
    pub layout: Option<LayoutDefaults>,

    #[serde(default)]
    pub rows: Vec<RowManifest>,
}

/// One row: an optional heading followed by charts
#[derive(Debug, Clone, Deserialize)]
pub struct RowManifest {
    #[serde(default)]
    pub section: Option<String>,

    #[serde(default)]
    pub charts: Vec<ChartManifest>,
}

/// One CSV-backed chart
#[derive(Debug, Clone, Deserialize)]
pub struct ChartManifest {
    pub kind: ChartKind,
    pub title: String,
    pub csv: PathBuf,

    #[serde(default)]
    pub id: Option<String>,

    #[serde(default)]
    pub index_column: Option<String>,

    /// Single-byte field delimiter, `,` when absent
    #[serde(default)]
    pub delimiter: Option<char>,

    /// Plot every column against the index in long form
    #[serde(default)]
    pub tidy: bool,

    #[serde(default)]
    pub span: Option<u8>,

    #[serde(default)]
    pub class_name: Option<String>,

    #[serde(default)]
    pub decimal_places: Option<u32>,

    #[serde(default)]
    pub options: Options,

    #[serde(default)]
    pub layout: Options,
}

impl ChartManifest {
    fn into_descriptor(self, base_dir: &Path, default_decimal_places: u32) -> ChartDescriptor {
        let path = if self.csv.is_absolute() {
            self.csv
        } else {
            base_dir.join(self.csv)
        };

        let mut csv_options = CsvOptions::default();
        if let Some(column) = self.index_column {
            csv_options = csv_options.with_index_column(column);
        }
        match self.delimiter {
            Some(d) if d.is_ascii() => csv_options = csv_options.with_delimiter(d as u8),
            Some(d) => tracing::warn!(chart = %self.title, delimiter = %d, "Ignoring non-ASCII CSV delimiter"),
            None => {}
        }

        let producer = Producer::new(move |_: &ProducerArgs| Ok(read_csv(&path, &csv_options)?));

        let mut chart = if self.tidy {
            ChartDescriptor::simple(self.kind, self.title, producer)
        } else {
            ChartDescriptor::new(self.kind, self.title, producer)
        };

        chart.options.extend(self.options);
        chart.layout.extend(self.layout);
        chart.span = self.span;
        if let Some(id) = self.id {
            chart.id = id;
        }
        if let Some(class_name) = self.class_name {
            chart.class_name = class_name;
        }
        chart.decimal_places = self.decimal_places.unwrap_or(default_decimal_places);

        chart
    }
}

impl DashboardManifest {
    /// Parse a manifest from TOML text
    pub fn from_toml(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Load a manifest file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        Self::from_toml(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            error: e.to_string(),
        })
    }

    /// Load a manifest file and build its dashboard
    pub fn load_dashboard(path: &Path, config: &Config) -> Result<Dashboard, ConfigError> {
        let manifest = Self::load(path)?;
        let base_dir = path.parent().unwrap_or_else(|| Path::new("."));
        Ok(manifest.into_dashboard(base_dir, config))
    }

    /// Build the dashboard, resolving CSV paths against `base_dir`
    ///
    /// Anything the manifest leaves unset is taken from `config`.
    pub fn into_dashboard(self, base_dir: &Path, config: &Config) -> Dashboard {
        let decimal_places = config.dashboard.decimal_places;
        let rows = self.rows.into_iter().map(|row| {
            let mut items: Vec<RowItem> = Vec::with_capacity(row.charts.len() + 1);
            if let Some(section) = row.section {
                items.push(RowItem::section(section));
            }
            items.extend(
                row.charts
                    .into_iter()
                    .map(|chart| RowItem::Chart(chart.into_descriptor(base_dir, decimal_places))),
            );
            LayoutRow::new(items)
        });

        let title = self
            .title
            .or_else(|| config.dashboard.title.clone())
            .unwrap_or_else(|| DEFAULT_TITLE.to_string());

        Dashboard::builder(title)
            .rows(rows.collect::<Vec<_>>())
            .dark_theme(self.dark_theme.unwrap_or(config.dashboard.dark_theme))
            .reload_interval(
                self.reload_interval
                    .unwrap_or_else(|| config.dashboard.reload_interval.clone()),
            )
            .layout_defaults(self.layout.unwrap_or_else(|| config.layout.clone()))
            .build()
    }
}
