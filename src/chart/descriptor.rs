//! Chart descriptors
//!
//! A `ChartDescriptor` declares one chart or table: what kind it is, where
//! its data comes from, and any caller overrides for layout and rendering.
//! Layout defaults are never written back into a descriptor; the planner
//! returns them separately.

use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use super::kind::ChartKind;
use crate::table::{Data, Series, Table, INDEX_COLUMN, VALUE_COLUMN, VARIABLE_COLUMN};

/// Free-form rendering options and layout overrides
pub type Options = serde_json::Map<String, serde_json::Value>;

/// CSS properties, rendered in key order
pub type Style = BTreeMap<String, String>;

/// Default number of decimal places kept when resolving data
pub const DEFAULT_DECIMAL_PLACES: u32 = 2;

/// Named arguments passed to a producer on every invocation
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ProducerArgs(Options);

impl ProducerArgs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method: set an argument
    pub fn set(mut self, name: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        self.0.insert(name.into(), value.into());
        self
    }

    pub fn usize_or(&self, name: &str, default: usize) -> usize {
        self.0
            .get(name)
            .and_then(|v| v.as_u64())
            .map(|v| v as usize)
            .unwrap_or(default)
    }

    pub fn f64_or(&self, name: &str, default: f64) -> f64 {
        self.0.get(name).and_then(|v| v.as_f64()).unwrap_or(default)
    }

    /// Booleans also accept the strings "true"/"false"
    pub fn bool_or(&self, name: &str, default: bool) -> bool {
        match self.0.get(name) {
            Some(serde_json::Value::Bool(b)) => *b,
            Some(serde_json::Value::String(s)) => match s.to_lowercase().as_str() {
                "true" => true,
                "false" => false,
                _ => default,
            },
            _ => default,
        }
    }
}

impl From<Options> for ProducerArgs {
    fn from(map: Options) -> Self {
        Self(map)
    }
}

type ProducerFn = dyn Fn(&ProducerArgs) -> anyhow::Result<Data> + Send + Sync;

/// A function that builds chart data on demand
///
/// Invoked afresh on every render; nothing is cached between calls.
#[derive(Clone)]
pub struct Producer {
    func: Arc<ProducerFn>,
}

impl Producer {
    /// Wrap a function returning a `Table`, `Series` or `Data`
    pub fn new<F, T>(func: F) -> Self
    where
        F: Fn(&ProducerArgs) -> anyhow::Result<T> + Send + Sync + 'static,
        T: Into<Data>,
    {
        Self {
            func: Arc::new(move |args| func(args).map(Into::into)),
        }
    }

    pub fn call(&self, args: &ProducerArgs) -> anyhow::Result<Data> {
        (self.func)(args)
    }
}

impl fmt::Debug for Producer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Producer").finish_non_exhaustive()
    }
}

/// Where a descriptor's data comes from
#[derive(Debug, Clone)]
pub enum DataSource {
    /// Data already in hand
    Static(Data),
    /// Computed on every render
    Producer(Producer),
}

impl From<Data> for DataSource {
    fn from(data: Data) -> Self {
        DataSource::Static(data)
    }
}

impl From<Table> for DataSource {
    fn from(table: Table) -> Self {
        DataSource::Static(Data::Table(table))
    }
}

impl From<Series> for DataSource {
    fn from(series: Series) -> Self {
        DataSource::Static(Data::Series(series))
    }
}

impl From<Producer> for DataSource {
    fn from(producer: Producer) -> Self {
        DataSource::Producer(producer)
    }
}

/// Declarative description of one chart or table
#[derive(Debug, Clone)]
pub struct ChartDescriptor {
    /// Element id in the rendered page
    pub id: String,
    /// Heading shown above the chart
    pub title: String,
    pub kind: ChartKind,
    pub source: DataSource,
    /// Arguments handed to a producer source
    pub producer_args: ProducerArgs,
    /// Grid span override (1-12)
    pub span: Option<u8>,
    /// Container style override
    pub style: Option<Style>,
    /// Extra CSS classes appended to the grid class
    pub class_name: String,
    /// Rendering options (`x`, `y`, `color`, `labels`, table styles)
    pub options: Options,
    /// Figure layout overrides
    pub layout: Options,
    /// Decimal places kept for float cells
    pub decimal_places: u32,
    /// Reshape data to long form before rendering
    pub long_form: bool,
}

impl ChartDescriptor {
    /// Create a descriptor that charts its data as given
    pub fn new(kind: ChartKind, title: impl Into<String>, source: impl Into<DataSource>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            title: title.into(),
            kind,
            source: source.into(),
            producer_args: ProducerArgs::new(),
            span: None,
            style: None,
            class_name: String::new(),
            options: Options::new(),
            layout: Options::new(),
            decimal_places: DEFAULT_DECIMAL_PLACES,
            long_form: false,
        }
    }

    /// Create a descriptor that plots every column of a wide table
    ///
    /// Data is reshaped to long form and drawn with the index on x, values
    /// on y and one trace per original column.
    pub fn simple(kind: ChartKind, title: impl Into<String>, source: impl Into<DataSource>) -> Self {
        let mut labels = Options::new();
        labels.insert(VALUE_COLUMN.to_string(), "".into());
        labels.insert(INDEX_COLUMN.to_string(), "".into());

        Self::new(kind, title, source)
            .long_form(true)
            .option("x", INDEX_COLUMN)
            .option("y", VALUE_COLUMN)
            .option("color", VARIABLE_COLUMN)
            .option("labels", serde_json::Value::Object(labels))
    }

    /// Create a data table descriptor
    pub fn table(title: impl Into<String>, source: impl Into<DataSource>) -> Self {
        Self::new(ChartKind::Table, title, source)
    }

    /// Builder method: set the element id
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    /// Builder method: replace producer arguments
    pub fn args(mut self, args: ProducerArgs) -> Self {
        self.producer_args = args;
        self
    }

    /// Builder method: add one producer argument
    pub fn arg(mut self, name: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        self.producer_args = self.producer_args.set(name, value);
        self
    }

    /// Builder method: override the grid span
    pub fn span(mut self, span: u8) -> Self {
        self.span = Some(span);
        self
    }

    /// Builder method: override the container style
    pub fn style(mut self, style: Style) -> Self {
        self.style = Some(style);
        self
    }

    /// Builder method: append CSS classes
    pub fn class_name(mut self, class_name: impl Into<String>) -> Self {
        self.class_name = class_name.into();
        self
    }

    /// Builder method: set a rendering option
    pub fn option(mut self, name: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        self.options.insert(name.into(), value.into());
        self
    }

    /// Builder method: set a figure layout override
    pub fn layout_option(mut self, name: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        self.layout.insert(name.into(), value.into());
        self
    }

    /// Builder method: set decimal places kept for float cells
    pub fn decimal_places(mut self, decimal_places: u32) -> Self {
        self.decimal_places = decimal_places;
        self
    }

    /// Builder method: reshape data to long form before rendering
    pub fn long_form(mut self, long_form: bool) -> Self {
        self.long_form = long_form;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::Value;

    fn table() -> Table {
        Table::from_columns(vec![("a", vec![Value::Int(1)])]).unwrap()
    }

    #[test]
    fn test_new_defaults() {
        let chart = ChartDescriptor::new(ChartKind::Line, "Prices", table());

        assert_eq!(chart.title, "Prices");
        assert_eq!(chart.decimal_places, DEFAULT_DECIMAL_PLACES);
        assert!(chart.span.is_none());
        assert!(chart.style.is_none());
        assert!(!chart.long_form);
        assert!(matches!(chart.source, DataSource::Static(_)));
        assert!(uuid::Uuid::parse_str(&chart.id).is_ok());
    }

    #[test]
    fn test_ids_are_unique_unless_given() {
        let a = ChartDescriptor::new(ChartKind::Bar, "A", table());
        let b = ChartDescriptor::new(ChartKind::Bar, "B", table());
        assert_ne!(a.id, b.id);

        let c = ChartDescriptor::new(ChartKind::Bar, "C", table()).id("fixed");
        assert_eq!(c.id, "fixed");
    }

    #[test]
    fn test_simple_sets_long_form_encoding() {
        let chart = ChartDescriptor::simple(ChartKind::Line, "Returns", table());

        assert!(chart.long_form);
        assert_eq!(chart.options["x"], "index");
        assert_eq!(chart.options["y"], "value");
        assert_eq!(chart.options["color"], "variable");
        assert_eq!(chart.options["labels"]["value"], "");
    }

    #[test]
    fn test_producer_args_getters() {
        let args = ProducerArgs::new()
            .set("rows", 200)
            .set("cumsum", "False")
            .set("scale", 0.5);

        assert_eq!(args.usize_or("rows", 5), 200);
        assert_eq!(args.usize_or("cols", 3), 3);
        assert!(!args.bool_or("cumsum", true));
        assert!(args.bool_or("missing", true));
        assert_eq!(args.f64_or("scale", 1.0), 0.5);
    }

    #[test]
    fn test_producer_invocation() {
        let producer = Producer::new(|args: &ProducerArgs| {
            let rows = args.usize_or("rows", 2);
            Ok(Series::new((0..rows).map(Value::from).collect()))
        });

        let data = producer.call(&ProducerArgs::new().set("rows", 3)).unwrap();
        assert!(matches!(data, Data::Series(s) if s.len() == 3));
    }
}
