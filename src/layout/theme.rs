//! Dashboard themes
//!
//! A theme contributes per-kind overlays: tables get header/cell styles,
//! figures get a named template.

use serde::{Deserialize, Serialize};

use crate::chart::{ChartKind, Options};

/// Template name forced onto figures in the dark theme
pub const DARK_TEMPLATE: &str = "plotly_dark";

/// Layout key holding the template name
pub const TEMPLATE_KEY: &str = "template";

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn from_dark_flag(dark: bool) -> Self {
        if dark {
            Theme::Dark
        } else {
            Theme::Light
        }
    }

    pub fn is_dark(&self) -> bool {
        matches!(self, Theme::Dark)
    }

    /// Extend a chart's rendering options and layout with this theme
    ///
    /// Existing keys survive except the theme's own keys, which always win.
    pub fn apply(&self, kind: ChartKind, options: &mut Options, layout: &mut Options) {
        if !self.is_dark() {
            return;
        }

        if kind.is_tabular() {
            options.insert(
                "style_header".to_string(),
                serde_json::json!({
                    "backgroundColor": "rgb(25, 25, 25)",
                    "border": "1px solid #283442",
                }),
            );
            options.insert(
                "style_cell".to_string(),
                serde_json::json!({
                    "backgroundColor": "rgb(35, 35, 35)",
                    "color": "white",
                    "border": "1px solid #283442",
                }),
            );
        } else {
            layout.insert(TEMPLATE_KEY.to_string(), DARK_TEMPLATE.into());
        }
    }
}

/// Layout overlay for a named template, if it is known
pub fn template_layout(name: &str) -> Option<Options> {
    let overlay = match name {
        DARK_TEMPLATE => serde_json::json!({
            "paper_bgcolor": "rgb(17, 17, 17)",
            "plot_bgcolor": "rgb(17, 17, 17)",
            "font": { "color": "#f2f5fa" },
            "xaxis": { "gridcolor": "#283442", "zerolinecolor": "#283442" },
            "yaxis": { "gridcolor": "#283442", "zerolinecolor": "#283442" },
        }),
        "plotly_white" => serde_json::json!({
            "paper_bgcolor": "white",
            "plot_bgcolor": "white",
        }),
        _ => return None,
    };

    match overlay {
        serde_json::Value::Object(map) => Some(map),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_light_theme_is_noop() {
        let mut options = Options::new();
        let mut layout = Options::new();
        Theme::Light.apply(ChartKind::Line, &mut options, &mut layout);
        Theme::Light.apply(ChartKind::Table, &mut options, &mut layout);
        assert!(options.is_empty());
        assert!(layout.is_empty());
    }

    #[test]
    fn test_dark_figure_forces_template_and_keeps_overrides() {
        let mut options = Options::new();
        let mut layout = Options::new();
        layout.insert("template".to_string(), "seaborn".into());
        layout.insert("legend_orientation".to_string(), "h".into());

        Theme::Dark.apply(ChartKind::Scatter, &mut options, &mut layout);

        assert_eq!(layout["template"], DARK_TEMPLATE);
        assert_eq!(layout["legend_orientation"], "h");
        assert!(options.is_empty());
    }

    #[test]
    fn test_dark_table_gets_cell_styles() {
        let mut options = Options::new();
        options.insert("page_size".to_string(), 10.into());
        let mut layout = Options::new();

        Theme::Dark.apply(ChartKind::Table, &mut options, &mut layout);

        assert_eq!(options["style_cell"]["color"], "white");
        assert_eq!(options["style_header"]["backgroundColor"], "rgb(25, 25, 25)");
        assert_eq!(options["page_size"], 10);
        assert!(layout.is_empty());
    }

    #[test]
    fn test_template_layout() {
        assert!(template_layout(DARK_TEMPLATE).is_some());
        assert!(template_layout("unknown").is_none());
    }
}
