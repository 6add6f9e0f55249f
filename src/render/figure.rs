//! Plotly figure construction
//!
//! Builds `{data, layout}` figure JSON for the graphical chart kinds. Traces
//! and the base layout are typed `plotly` values; template overlays, axis
//! titles and per-chart layout overrides are merged into the serialized layout.
//! Encodings come from the chart options:
//!
//! - `x`: column for the x axis (defaults to the row index)
//! - `y`: column for the y axis (defaults to one trace per column)
//! - `color`: column whose distinct values split the data into traces
//! - `labels`: column name to axis title mapping

use plotly::common::Mode;
use plotly::{Bar, HeatMap, Histogram, Plot, Scatter, Trace};
use serde_json::{json, Value as Json};
use std::collections::HashMap;

use super::engine::ChartRequest;
use super::error::{RenderError, RenderResult};
use crate::chart::{ChartKind, Options};
use crate::layout::{template_layout, TEMPLATE_KEY};
use crate::table::{Column, Value};

/// Options understood by figure rendering
const KNOWN_OPTIONS: [&str; 4] = ["x", "y", "color", "labels"];

/// Upper bound on heatmap bins per numeric axis
const MAX_HEATMAP_BINS: usize = 20;

/// Build a complete figure for a graphical chart
pub fn build_figure(request: &ChartRequest<'_>) -> RenderResult<Json> {
    for key in request.plan.options.keys() {
        if !KNOWN_OPTIONS.contains(&key.as_str()) {
            tracing::debug!(chart = %request.title, option = %key, "Ignoring unsupported chart option");
        }
    }

    let mut plot = Plot::new();
    for trace in build_traces(request)? {
        plot.add_trace(trace);
    }
    plot.set_layout(request.defaults.figure_layout());

    let mut figure: Json = serde_json::from_str(&plot.to_json())?;
    let data = figure.get_mut("data").map(Json::take).unwrap_or_else(|| json!([]));
    let mut layout = match figure.get_mut("layout").map(Json::take) {
        Some(Json::Object(map)) => map,
        _ => Options::new(),
    };
    apply_layout_overrides(request, &mut layout);

    Ok(json!({ "data": data, "layout": layout }))
}

/// Look up a column named by a string option
fn column_option<'a>(request: &ChartRequest<'a>, option: &str) -> RenderResult<Option<&'a Column>> {
    let Some(value) = request.plan.options.get(option) else {
        return Ok(None);
    };

    let name = value.as_str().ok_or_else(|| RenderError::InvalidOption {
        chart: request.title.to_string(),
        option: option.to_string(),
        reason: "expected a column name".to_string(),
    })?;

    request
        .table
        .column(name)
        .map(Some)
        .ok_or_else(|| RenderError::MissingColumn {
            chart: request.title.to_string(),
            column: name.to_string(),
        })
}

/// Row positions for each distinct value, in order of first appearance
fn groups(column: &Column) -> Vec<(String, Vec<usize>)> {
    let mut order: Vec<(String, Vec<usize>)> = Vec::new();
    let mut lookup: HashMap<String, usize> = HashMap::new();

    for (row, value) in column.values.iter().enumerate() {
        let key = value.to_string();
        match lookup.get(&key) {
            Some(&slot) => order[slot].1.push(row),
            None => {
                lookup.insert(key.clone(), order.len());
                order.push((key, vec![row]));
            }
        }
    }

    order
}

fn pick(values: &[Value], rows: &[usize]) -> Vec<Value> {
    rows.iter().map(|&r| values[r].clone()).collect()
}

/// One x/y trace for the line, scatter, area and bar kinds
fn xy_trace(kind: ChartKind, name: &str, x: Vec<Value>, y: Vec<Value>) -> Box<dyn Trace> {
    match kind {
        ChartKind::Line => Scatter::new(x, y).name(name).mode(Mode::Lines),
        ChartKind::Scatter => Scatter::new(x, y).name(name).mode(Mode::Markers),
        ChartKind::Area => Scatter::new(x, y).name(name).mode(Mode::Lines).stack_group("one"),
        _ => Bar::new(x, y).name(name),
    }
}

/// Cell assignment along one heatmap axis
#[derive(Debug, Clone, PartialEq)]
enum Bins {
    /// Equal-width bins over the numeric range
    Numeric { min: f64, width: f64, count: usize },
    /// One cell per distinct value
    Categorical(Vec<String>),
}

impl Bins {
    /// Numeric bins when every non-null value is a number, categories otherwise
    fn for_values(values: &[Value]) -> Self {
        let present = values.iter().filter(|v| !matches!(v, Value::Null));
        let numbers: Option<Vec<f64>> = present.clone().map(Value::as_f64).collect();

        match numbers {
            Some(numbers) if !numbers.is_empty() => {
                let min = numbers.iter().copied().fold(f64::INFINITY, f64::min);
                let max = numbers.iter().copied().fold(f64::NEG_INFINITY, f64::max);
                let count = ((numbers.len() as f64).sqrt().ceil() as usize).clamp(1, MAX_HEATMAP_BINS);
                let width = if max > min { (max - min) / count as f64 } else { 1.0 };
                Bins::Numeric { min, width, count }
            }
            _ => {
                let mut labels: Vec<String> = Vec::new();
                for value in present {
                    let label = value.to_string();
                    if !labels.contains(&label) {
                        labels.push(label);
                    }
                }
                Bins::Categorical(labels)
            }
        }
    }

    fn len(&self) -> usize {
        match self {
            Bins::Numeric { count, .. } => *count,
            Bins::Categorical(labels) => labels.len(),
        }
    }

    /// Cell a value falls into; nulls and non-finite numbers have none
    fn slot(&self, value: &Value) -> Option<usize> {
        if matches!(value, Value::Null) {
            return None;
        }
        match self {
            Bins::Numeric { min, width, count } => {
                let v = value.as_f64().filter(|v| v.is_finite())?;
                let slot = ((v - min) / width).floor().max(0.0) as usize;
                Some(slot.min(count - 1))
            }
            Bins::Categorical(labels) => {
                let label = value.to_string();
                labels.iter().position(|l| *l == label)
            }
        }
    }

    /// Axis coordinates: bin centers or category labels
    fn coordinates(&self) -> Vec<Value> {
        match self {
            Bins::Numeric { min, width, count } => (0..*count)
                .map(|i| Value::Float(min + width * (i as f64 + 0.5)))
                .collect(),
            Bins::Categorical(labels) => labels.iter().cloned().map(Value::Text).collect(),
        }
    }
}

/// Row counts per (x, y) cell, as a heatmap trace
fn density_heatmap(name: &str, x: &Column, y: &Column) -> Box<dyn Trace> {
    let x_bins = Bins::for_values(&x.values);
    let y_bins = Bins::for_values(&y.values);

    let mut counts = vec![vec![0u64; x_bins.len()]; y_bins.len()];
    for (xv, yv) in x.values.iter().zip(&y.values) {
        if let (Some(col), Some(row)) = (x_bins.slot(xv), y_bins.slot(yv)) {
            counts[row][col] += 1;
        }
    }

    HeatMap::new(x_bins.coordinates(), y_bins.coordinates(), counts).name(name)
}

fn build_traces(request: &ChartRequest<'_>) -> RenderResult<Vec<Box<dyn Trace>>> {
    let table = request.table;
    let x = column_option(request, "x")?;
    let y = column_option(request, "y")?;
    let color = column_option(request, "color")?;

    let all_rows: Vec<usize> = (0..table.row_count()).collect();
    let row_groups = match color {
        Some(column) => groups(column),
        None => vec![(String::new(), all_rows)],
    };

    let is_encoding = |c: &&Column| {
        [x, color]
            .iter()
            .flatten()
            .all(|enc| enc.name != c.name)
    };

    let mut traces: Vec<Box<dyn Trace>> = Vec::new();

    match request.kind {
        ChartKind::Heatmap => {
            let (Some(x), Some(y)) = (x, y) else {
                return Err(RenderError::InvalidOption {
                    chart: request.title.to_string(),
                    option: "x/y".to_string(),
                    reason: "heatmaps need both x and y columns".to_string(),
                });
            };
            traces.push(density_heatmap(request.title, x, y));
        }
        ChartKind::Histogram => {
            let data_columns: Vec<&Column> = match (x, y) {
                (Some(x), _) => vec![x],
                (None, Some(y)) => vec![y],
                (None, None) => table.columns().iter().filter(is_encoding).collect(),
            };
            for column in data_columns {
                for (group, rows) in &row_groups {
                    let name = if color.is_some() { group.as_str() } else { column.name.as_str() };
                    traces.push(Histogram::new(pick(&column.values, rows)).name(name));
                }
            }
        }
        _ => {
            let x_values: &[Value] = x.map(|c| c.values.as_slice()).unwrap_or(table.index());
            let y_columns: Vec<&Column> = match y {
                Some(y) => vec![y],
                None => table.columns().iter().filter(is_encoding).collect(),
            };
            for column in y_columns {
                for (group, rows) in &row_groups {
                    let name = if color.is_some() { group.as_str() } else { column.name.as_str() };
                    traces.push(xy_trace(
                        request.kind,
                        name,
                        pick(x_values, rows),
                        pick(&column.values, rows),
                    ));
                }
            }
        }
    }

    Ok(traces)
}

/// Merge `overlay` into `target`, descending into nested objects
pub fn merge_into(target: &mut Options, overlay: Options) {
    for (key, value) in overlay {
        match (target.get_mut(&key), value) {
            (Some(Json::Object(existing)), Json::Object(incoming)) => merge_into(existing, incoming),
            (_, value) => {
                target.insert(key, value);
            }
        }
    }
}

fn axis_title(request: &ChartRequest<'_>, option: &str) -> Option<String> {
    let column = request.plan.options.get(option)?.as_str()?;
    let label = request
        .plan
        .options
        .get("labels")
        .and_then(|labels| labels.get(column))
        .and_then(|label| label.as_str());
    Some(label.unwrap_or(column).to_string())
}

/// Theme template, legend orientation, axis titles, then the chart's overrides
fn apply_layout_overrides(request: &ChartRequest<'_>, layout: &mut Options) {
    let mut overrides = request.plan.layout.clone();

    if let Some(template) = overrides.remove(TEMPLATE_KEY) {
        match template.as_str().and_then(template_layout) {
            Some(overlay) => merge_into(layout, overlay),
            None => tracing::debug!(chart = %request.title, template = %template, "Unknown figure template"),
        }
    }

    if let Some(orientation) = overrides.remove("legend_orientation") {
        merge_into(layout, object(json!({ "legend": { "orientation": orientation } })));
    }

    for (option, axis) in [("x", "xaxis"), ("y", "yaxis")] {
        if let Some(title) = axis_title(request, option) {
            merge_into(layout, object(json!({ axis: { "title": { "text": title } } })));
        }
    }

    merge_into(layout, overrides);
}

fn object(value: Json) -> Options {
    match value {
        Json::Object(map) => map,
        _ => Options::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::{ChartDescriptor, ChartKind};
    use crate::layout::{GridLayoutPlanner, ItemPlan, LayoutDefaults, LayoutRow, Theme};
    use crate::table::{reshape, Table};

    fn plan_for(chart: ChartDescriptor, theme: Theme) -> ItemPlan {
        let plans = GridLayoutPlanner::new(theme).plan(&[LayoutRow::new(vec![chart])]).unwrap();
        plans[0].items[0].clone()
    }

    fn wide() -> Table {
        Table::from_columns(vec![
            ("a", vec![Value::Int(1), Value::Int(2)]),
            ("b", vec![Value::Int(3), Value::Int(4)]),
        ])
        .unwrap()
    }

    fn figure(chart: ChartDescriptor, table: &Table, theme: Theme) -> RenderResult<Json> {
        let plan = plan_for(chart.clone(), theme);
        let defaults = LayoutDefaults::default();
        build_figure(&ChartRequest {
            id: &chart.id,
            title: &chart.title,
            kind: chart.kind,
            table,
            plan: &plan,
            defaults: &defaults,
        })
    }

    #[test]
    fn test_wide_table_one_trace_per_column() {
        let table = wide();
        let chart = ChartDescriptor::new(ChartKind::Line, "Wide", table.clone());
        let fig = figure(chart, &table, Theme::Light).unwrap();

        let data = fig["data"].as_array().unwrap();
        assert_eq!(data.len(), 2);
        assert_eq!(data[0]["name"], "a");
        assert_eq!(data[0]["mode"], "lines");
        assert_eq!(data[0]["x"], json!([0, 1]));
        assert_eq!(data[1]["y"], json!([3, 4]));
        assert_eq!(fig["layout"]["height"], 500);
    }

    #[test]
    fn test_long_form_grouped_by_color() {
        let tidy = Table::from(reshape(&wide()).unwrap());
        let chart = ChartDescriptor::simple(ChartKind::Bar, "Long", wide());
        let fig = figure(chart, &tidy, Theme::Light).unwrap();

        let data = fig["data"].as_array().unwrap();
        assert_eq!(data.len(), 2);
        assert_eq!(data[0]["type"], "bar");
        assert_eq!(data[0]["name"], "a");
        assert_eq!(data[0]["y"], json!([1, 2]));
        assert_eq!(data[1]["name"], "b");
        assert_eq!(data[1]["x"], json!([0, 1]));
        assert_eq!(fig["layout"]["xaxis"]["title"]["text"], "");
    }

    #[test]
    fn test_missing_column_is_reported() {
        let table = wide();
        let chart = ChartDescriptor::new(ChartKind::Scatter, "Bad", table.clone()).option("x", "nope");

        assert!(matches!(
            figure(chart, &table, Theme::Light),
            Err(RenderError::MissingColumn { column, .. }) if column == "nope"
        ));
    }

    #[test]
    fn test_heatmap_requires_x_and_y() {
        let table = wide();
        let chart = ChartDescriptor::new(ChartKind::Heatmap, "Heat", table.clone());
        assert!(matches!(
            figure(chart, &table, Theme::Light),
            Err(RenderError::InvalidOption { .. })
        ));

        let chart = ChartDescriptor::new(ChartKind::Heatmap, "Heat", table.clone())
            .option("x", "a")
            .option("y", "b");
        let fig = figure(chart, &table, Theme::Light).unwrap();
        assert_eq!(fig["data"][0]["type"], "heatmap");
        assert_eq!(fig["data"][0]["z"], json!([[1, 0], [0, 1]]));
    }

    #[test]
    fn test_heatmap_bins_numbers_and_counts_categories() {
        let values = |xs: &[f64]| xs.iter().map(|&v| Value::Float(v)).collect::<Vec<_>>();
        let table = Table::from_columns(vec![
            ("width", values(&[1.0, 1.5, 2.0, 4.0])),
            (
                "species",
                ["a", "a", "b", "a"].into_iter().map(Value::from).collect(),
            ),
        ])
        .unwrap();

        let width = Bins::for_values(&table.column("width").unwrap().values);
        assert_eq!(width, Bins::Numeric { min: 1.0, width: 1.5, count: 2 });
        assert_eq!(width.slot(&Value::Float(4.0)), Some(1));
        assert_eq!(width.slot(&Value::Null), None);
        assert_eq!(width.coordinates(), values(&[1.75, 3.25]));

        let chart = ChartDescriptor::new(ChartKind::Heatmap, "Heat", table.clone())
            .option("x", "width")
            .option("y", "species");
        let fig = figure(chart, &table, Theme::Light).unwrap();
        let trace = &fig["data"][0];
        assert_eq!(trace["y"], json!(["a", "b"]));
        assert_eq!(trace["z"], json!([[2, 1], [1, 0]]));
    }

    #[test]
    fn test_histogram_of_x() {
        let table = wide();
        let chart = ChartDescriptor::new(ChartKind::Histogram, "Dist", table.clone()).option("x", "b");
        let fig = figure(chart, &table, Theme::Light).unwrap();

        assert_eq!(fig["data"].as_array().unwrap().len(), 1);
        assert_eq!(fig["data"][0]["x"], json!([3, 4]));
    }

    #[test]
    fn test_dark_template_and_overrides() {
        let table = wide();
        let chart = ChartDescriptor::new(ChartKind::Area, "Dark", table.clone())
            .layout_option("legend_orientation", "h")
            .layout_option("height", 300);
        let fig = figure(chart, &table, Theme::Dark).unwrap();

        let layout = &fig["layout"];
        assert_eq!(layout["paper_bgcolor"], "rgb(17, 17, 17)");
        assert_eq!(layout["legend"]["orientation"], "h");
        assert_eq!(layout["height"], 300);
        assert!(layout.get("template").is_none());
        assert_eq!(fig["data"][0]["stackgroup"], "one");
    }

    #[test]
    fn test_merge_into_is_deep() {
        let mut target = object(json!({ "margin": { "l": 35, "t": 20 }, "height": 500 }));
        merge_into(&mut target, object(json!({ "margin": { "t": 45 } })));

        assert_eq!(target["margin"]["l"], 35);
        assert_eq!(target["margin"]["t"], 45);
        assert_eq!(target["height"], 500);
    }
}
