//! Pandex Charts
//!
//! Declarative chart descriptors and how their data is resolved:
//!
//! - **kind**: The `ChartKind` tag renderers dispatch on
//! - **descriptor**: `ChartDescriptor`, `DataSource` and producers
//! - **resolve**: Static or produced data to a rounded table

pub mod descriptor;
pub mod kind;
pub mod resolve;

pub use descriptor::{
    ChartDescriptor, DataSource, Options, Producer, ProducerArgs, Style, DEFAULT_DECIMAL_PLACES,
};
pub use kind::ChartKind;
