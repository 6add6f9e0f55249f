//! Data resolution
//!
//! Turns a descriptor's data source into the table handed to the renderer.

use super::descriptor::{ChartDescriptor, DataSource};
use crate::dashboard::{DashboardError, DashboardResult};
use crate::table::{reshape, Table};

impl ChartDescriptor {
    /// Resolve the data source into a rounded table
    ///
    /// Producers run on every call. A bare series becomes a one-column table
    /// named after the series, or after the chart title if unnamed.
    pub fn resolve(&self) -> DashboardResult<Table> {
        let data = match &self.source {
            DataSource::Static(data) => data.rounded(self.decimal_places),
            DataSource::Producer(producer) => {
                let produced = producer.call(&self.producer_args).map_err(|e| {
                    tracing::warn!(chart = %self.title, error = %e, "Data producer failed");
                    DashboardError::DataResolution {
                        title: self.title.clone(),
                        reason: format!("{:#}", e),
                    }
                })?;
                produced.rounded(self.decimal_places)
            }
        };

        data.into_table(&self.title)
            .map_err(|e| DashboardError::DataResolution {
                title: self.title.clone(),
                reason: e.to_string(),
            })
    }

    /// Resolve and, in long-form mode, reshape for charting
    pub fn prepared(&self) -> DashboardResult<Table> {
        let table = self.resolve()?;
        if !self.long_form {
            return Ok(table);
        }

        reshape(&table)
            .map(Table::from)
            .map_err(|e| DashboardError::DataResolution {
                title: self.title.clone(),
                reason: e.to_string(),
            })
    }
}
