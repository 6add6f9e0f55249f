//! HTML renderer
//!
//! Default `RenderEngine`: server-side HTML via maud, with graphical charts
//! drawn in the browser by Plotly from embedded figure JSON.

use maud::{html, Markup, PreEscaped, DOCTYPE};

use super::engine::{ChartRequest, PageContext, RenderEngine};
use super::error::RenderResult;
use super::figure::build_figure;
use crate::chart::{ChartKind, Options, Style};
use crate::layout::{ItemPlan, Theme};

/// Plotly bundle loaded by every page
pub const DEFAULT_PLOTLY_SRC: &str = "https://cdn.plot.ly/plotly-2.35.2.min.js";

/// Twelve-column grid plus the dark theme
const PAGE_CSS: &str = r#"
body { font-family: "Open Sans", "HelveticaNeue", "Helvetica Neue", Helvetica, Arial, sans-serif; margin: 0; padding: 0 2rem 2rem; }
.row { display: flex; flex-wrap: wrap; width: 100%; }
.columns { box-sizing: border-box; padding: 0 0.5rem; }
.one.columns { width: 8.333%; } .two.columns { width: 16.667%; } .three.columns { width: 25%; }
.four.columns { width: 33.333%; } .five.columns { width: 41.667%; } .six.columns { width: 50%; }
.seven.columns { width: 58.333%; } .eight.columns { width: 66.667%; } .nine.columns { width: 75%; }
.ten.columns { width: 83.333%; } .eleven.columns { width: 91.667%; } .twelve.columns { width: 100%; }
.pandex-table table { border-collapse: collapse; width: 100%; }
.pandex-table th, .pandex-table td { padding: 4px 8px; text-align: right; border: 1px solid #e1e1e1; }
.pandex-footer { text-align: center; font-size: 0.8rem; opacity: 0.6; margin-top: 2rem; }
body.dark-theme { background: rgb(17, 17, 17); color: #f2f5fa; }
"#;

/// Chart rendering function, selected by kind
type ChartRenderFn = fn(&HtmlRenderer, &ChartRequest<'_>) -> RenderResult<Markup>;

/// Server-side HTML renderer
#[derive(Debug, Clone)]
pub struct HtmlRenderer {
    plotly_src: String,
}

impl Default for HtmlRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl HtmlRenderer {
    pub fn new() -> Self {
        Self {
            plotly_src: DEFAULT_PLOTLY_SRC.to_string(),
        }
    }

    /// Load Plotly from a different URL (e.g. a self-hosted copy)
    pub fn with_plotly_src(mut self, src: impl Into<String>) -> Self {
        self.plotly_src = src.into();
        self
    }

    fn renderer_for(kind: ChartKind) -> ChartRenderFn {
        match kind {
            ChartKind::Table => HtmlRenderer::render_table,
            ChartKind::Line
            | ChartKind::Bar
            | ChartKind::Scatter
            | ChartKind::Area
            | ChartKind::Heatmap
            | ChartKind::Histogram => HtmlRenderer::render_figure,
        }
    }

    /// Title heading plus grid container shared by every chart
    fn frame(&self, request: &ChartRequest<'_>, body: Markup) -> Markup {
        html! {
            div class=(request.plan.class_name) style=(css(&request.plan.style)) {
                h6 style="text-align: center; margin-bottom: -.25rem" { (request.title) }
                (body)
            }
        }
    }

    fn render_figure(&self, request: &ChartRequest<'_>) -> RenderResult<Markup> {
        let figure = build_figure(request)?;
        let figure_json = script_safe(&serde_json::to_string(&figure)?);
        let id_json = script_safe(&serde_json::to_string(request.id)?);

        let script = format!(
            "(function(f){{Plotly.newPlot({}, f.data, f.layout, {{\"responsive\": true}});}})({});",
            id_json, figure_json
        );

        Ok(self.frame(
            request,
            html! {
                div id=(request.id) class="pandex-graph" {}
                script { (PreEscaped(script)) }
            },
        ))
    }

    fn render_table(&self, request: &ChartRequest<'_>) -> RenderResult<Markup> {
        let table = request.table;
        let header_style = style_option(&request.plan.options, "style_header");
        let cell_style = style_option(&request.plan.options, "style_cell");
        let scroll = format!(
            "overflow-x: scroll; overflow-y: scroll; height: {}px",
            request.defaults.height
        );

        Ok(self.frame(
            request,
            html! {
                div id=(request.id) class="pandex-table" style=(scroll) {
                    table {
                        thead {
                            tr {
                                @for name in table.column_names() {
                                    th style=[header_style.as_deref()] { (name) }
                                }
                            }
                        }
                        tbody {
                            @for row in 0..table.row_count() {
                                tr {
                                    @for column in table.columns() {
                                        td style=[cell_style.as_deref()] { (column.values[row].to_string()) }
                                    }
                                }
                            }
                        }
                    }
                }
            },
        ))
    }

}

impl RenderEngine for HtmlRenderer {
    fn render_chart(&self, request: &ChartRequest<'_>) -> RenderResult<Markup> {
        (Self::renderer_for(request.kind))(self, request)
    }

    fn render_section(&self, title: &str, _plan: &ItemPlan) -> Markup {
        html! {
            h4 style="text-align: center; margin-top: 50px; margin-bottom: 0px; width: 100%" { (title) }
        }
    }

    fn container(&self, children: Vec<Markup>, class_name: &str) -> Markup {
        html! {
            div class=(class_name) {
                @for child in children {
                    (child)
                }
            }
        }
    }

    fn page(&self, context: &PageContext<'_>, rows: Vec<Markup>) -> Markup {
        let dark = context.theme.is_dark();
        let main_class = if dark { "twelve columns dark-theme" } else { "twelve columns" };
        let rendered_at = context.rendered_at.format("%Y-%m-%d %H:%M:%S UTC").to_string();

        html! {
            (DOCTYPE)
            html lang="en" {
                head {
                    meta charset="utf-8";
                    meta name="viewport" content="width=device-width, initial-scale=1";
                    title { (context.title) }
                    script src=(self.plotly_src) {}
                    style { (PreEscaped(PAGE_CSS)) }
                }
                body class=[dark.then_some("dark-theme")] {
                    div id="main-pandex" class=(main_class) {
                        h2 style="margin-top: 60px; margin-bottom: 40px; text-align: center" { (context.title) }
                        div {
                            @for row in rows {
                                (row)
                            }
                        }
                    }
                    footer class="pandex-footer" { "Rendered " (rendered_at) }
                }
            }
        }
    }

    fn error_page(&self, title: &str, theme: Theme, detail: Option<&str>) -> Markup {
        html! {
            (DOCTYPE)
            html lang="en" {
                head {
                    meta charset="utf-8";
                    title { (title) }
                    style { (PreEscaped(PAGE_CSS)) }
                }
                body class=[theme.is_dark().then_some("dark-theme")] {
                    h2 style="margin-top: 60px; text-align: center" { (title) }
                    @if let Some(detail) = detail {
                        pre style="white-space: pre-wrap; text-align: left" { (detail) }
                    }
                }
            }
        }
    }
}

/// Inline CSS from a style map
pub fn css(style: &Style) -> String {
    style
        .iter()
        .map(|(k, v)| format!("{}: {}", k, v))
        .collect::<Vec<_>>()
        .join("; ")
}

/// Inline CSS from an object option with camelCase keys
fn style_option(options: &Options, key: &str) -> Option<String> {
    let map = options.get(key)?.as_object()?;
    let style: Style = map
        .iter()
        .map(|(k, v)| {
            let value = v.as_str().map(str::to_string).unwrap_or_else(|| v.to_string());
            (kebab_case(k), value)
        })
        .collect();
    Some(css(&style))
}

fn kebab_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    for ch in name.chars() {
        if ch.is_ascii_uppercase() {
            out.push('-');
            out.push(ch.to_ascii_lowercase());
        } else {
            out.push(ch);
        }
    }
    out
}

/// Keep embedded JSON from closing the surrounding script element
fn script_safe(json: &str) -> String {
    json.replace("</", "<\\/")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::ChartDescriptor;
    use crate::layout::{GridLayoutPlanner, LayoutDefaults, LayoutRow, Theme};
    use crate::table::{Table, Value};
    use chrono::Utc;

    fn table() -> Table {
        Table::from_columns(vec![
            ("a", vec![Value::Int(1), Value::Int(2)]),
            ("b", vec![Value::from("</script>"), Value::from("y")]),
        ])
        .unwrap()
    }

    fn render(chart: ChartDescriptor, theme: Theme) -> String {
        let plans = GridLayoutPlanner::new(theme)
            .plan(&[LayoutRow::new(vec![chart.clone()])])
            .unwrap();
        let table = chart.resolve().unwrap();
        let defaults = LayoutDefaults::default();

        HtmlRenderer::new()
            .render_chart(&ChartRequest {
                id: &chart.id,
                title: &chart.title,
                kind: chart.kind,
                table: &table,
                plan: &plans[0].items[0],
                defaults: &defaults,
            })
            .unwrap()
            .into_string()
    }

    #[test]
    fn test_figure_markup() {
        let chart = ChartDescriptor::new(ChartKind::Line, "Prices", table())
            .id("prices")
            .option("y", "a");
        let html = render(chart, Theme::Light);

        assert!(html.contains("twelve columns"));
        assert!(html.contains("<h6"));
        assert!(html.contains("Prices"));
        assert!(html.contains("id=\"prices\""));
        assert!(html.contains("Plotly.newPlot(\"prices\""));
        assert!(!html.contains("</script>\""));
    }

    #[test]
    fn test_table_markup_with_dark_styles() {
        let chart = ChartDescriptor::table("Data", table());
        let html = render(chart, Theme::Dark);

        assert!(html.contains("<table>"));
        assert!(html.contains("<th style=\"background-color: rgb(25, 25, 25)"));
        assert!(html.contains("color: white"));
        assert!(html.contains("height: 500px"));
        assert!(html.contains("&lt;/script&gt;"));
    }

    #[test]
    fn test_page_and_container() {
        let renderer = HtmlRenderer::new().with_plotly_src("/static/plotly.js");
        let row = renderer.container(vec![html! { p { "chart" } }], "row");
        let page = renderer
            .page(
                &PageContext {
                    title: "Ops",
                    theme: Theme::Dark,
                    rendered_at: Utc::now(),
                },
                vec![row],
            )
            .into_string();

        assert!(page.starts_with("<!DOCTYPE html>"));
        assert!(page.contains("<title>Ops</title>"));
        assert!(page.contains("/static/plotly.js"));
        assert!(page.contains("twelve columns dark-theme"));
        assert!(page.contains("<div class=\"row\"><p>chart</p></div>"));
    }

    #[test]
    fn test_error_page_detail_is_optional() {
        let renderer = HtmlRenderer::new();
        let terse = renderer.error_page("Error", Theme::Light, None).into_string();
        let verbose = renderer
            .error_page("Error", Theme::Dark, Some("producer failed"))
            .into_string();

        assert!(!terse.contains("<pre"));
        assert!(!terse.contains("dark-theme"));
        assert!(verbose.contains("producer failed"));
        assert!(verbose.contains("<body class=\"dark-theme\">"));
    }

    #[test]
    fn test_helpers() {
        assert_eq!(kebab_case("backgroundColor"), "background-color");
        assert_eq!(script_safe("\"</script>\""), "\"<\\/script>\"");

        let mut style = Style::new();
        style.insert("width".to_string(), "50%".to_string());
        style.insert("margin-left".to_string(), "0".to_string());
        assert_eq!(css(&style), "margin-left: 0; width: 50%");
    }
}
