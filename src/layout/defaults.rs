//! Figure layout defaults
//!
//! Applied to every figure before the chart's own layout overrides.

use plotly::common::Orientation;
use plotly::layout::{HoverMode, Legend, Margin as FigureMargin};
use plotly::Layout;
use serde::{Deserialize, Serialize};

/// Figure margins in pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Margin {
    #[serde(default = "default_side_margin")]
    pub l: u32,
    #[serde(default = "default_side_margin")]
    pub r: u32,
    #[serde(default = "default_side_margin")]
    pub b: u32,
    #[serde(default = "default_top_margin")]
    pub t: u32,
}

fn default_side_margin() -> u32 {
    35
}

fn default_top_margin() -> u32 {
    20
}

impl Default for Margin {
    fn default() -> Self {
        Self {
            l: default_side_margin(),
            r: default_side_margin(),
            b: default_side_margin(),
            t: default_top_margin(),
        }
    }
}

/// Layout settings shared by all figures on a page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutDefaults {
    #[serde(default = "default_autosize")]
    pub autosize: bool,

    /// Figure height, also the scroll height of tables
    #[serde(default = "default_height")]
    pub height: u32,

    #[serde(default)]
    pub margin: Margin,

    #[serde(default = "default_hovermode")]
    pub hovermode: String,

    /// "v" or "h"
    #[serde(default = "default_legend_orientation")]
    pub legend_orientation: String,
}

fn default_autosize() -> bool {
    true
}

fn default_height() -> u32 {
    500
}

fn default_hovermode() -> String {
    "closest".to_string()
}

fn default_legend_orientation() -> String {
    "v".to_string()
}

impl Default for LayoutDefaults {
    fn default() -> Self {
        Self {
            autosize: default_autosize(),
            height: default_height(),
            margin: Margin::default(),
            hovermode: default_hovermode(),
            legend_orientation: default_legend_orientation(),
        }
    }
}

impl LayoutDefaults {
    /// Base figure layout
    ///
    /// Unrecognised `hovermode` or `legend_orientation` values are left to
    /// Plotly's own defaults.
    pub fn figure_layout(&self) -> Layout {
        let margin = FigureMargin::new()
            .left(self.margin.l as usize)
            .right(self.margin.r as usize)
            .bottom(self.margin.b as usize)
            .top(self.margin.t as usize);

        let mut layout = Layout::new()
            .auto_size(self.autosize)
            .height(self.height as usize)
            .margin(margin);

        match hover_mode(&self.hovermode) {
            Some(mode) => layout = layout.hover_mode(mode),
            None => tracing::warn!(hovermode = %self.hovermode, "Unsupported hovermode"),
        }

        match self.legend_orientation.as_str() {
            "v" => layout = layout.legend(Legend::new().orientation(Orientation::Vertical)),
            "h" => layout = layout.legend(Legend::new().orientation(Orientation::Horizontal)),
            other => tracing::warn!(legend_orientation = %other, "Unsupported legend orientation"),
        }

        layout
    }
}

fn hover_mode(name: &str) -> Option<HoverMode> {
    match name {
        "closest" => Some(HoverMode::Closest),
        "x" => Some(HoverMode::X),
        "y" => Some(HoverMode::Y),
        "x unified" => Some(HoverMode::XUnified),
        "y unified" => Some(HoverMode::YUnified),
        "false" => Some(HoverMode::False),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let defaults = LayoutDefaults::default();
        assert!(defaults.autosize);
        assert_eq!(defaults.height, 500);
        assert_eq!(defaults.margin, Margin { l: 35, r: 35, b: 35, t: 20 });
        assert_eq!(defaults.hovermode, "closest");
        assert_eq!(defaults.legend_orientation, "v");
    }

    #[test]
    fn test_figure_layout() {
        let layout = serde_json::to_value(LayoutDefaults::default().figure_layout()).unwrap();
        assert_eq!(layout["height"], 500);
        assert_eq!(layout["autosize"], true);
        assert_eq!(layout["margin"]["t"], 20);
        assert_eq!(layout["margin"]["l"], 35);
        assert_eq!(layout["hovermode"], "closest");
        assert_eq!(layout["legend"]["orientation"], "v");
    }

    #[test]
    fn test_unknown_layout_names_are_left_out() {
        let defaults = LayoutDefaults {
            hovermode: "sideways".to_string(),
            legend_orientation: "diagonal".to_string(),
            ..Default::default()
        };
        let layout = serde_json::to_value(defaults.figure_layout()).unwrap();
        assert!(layout.get("hovermode").is_none());
        assert!(layout.get("legend").is_none());

        let unified = LayoutDefaults {
            hovermode: "x unified".to_string(),
            legend_orientation: "h".to_string(),
            ..Default::default()
        };
        let layout = serde_json::to_value(unified.figure_layout()).unwrap();
        assert_eq!(layout["hovermode"], "x unified");
        assert_eq!(layout["legend"]["orientation"], "h");
    }

    #[test]
    fn test_partial_toml() {
        let defaults: LayoutDefaults = toml::from_str("height = 300\n[margin]\nt = 45\n").unwrap();
        assert_eq!(defaults.height, 300);
        assert_eq!(defaults.margin.t, 45);
        assert_eq!(defaults.margin.l, 35);
        assert_eq!(defaults.hovermode, "closest");
    }
}
