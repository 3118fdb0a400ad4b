//! Graphite render URLs.
//!
//! Parameters are kept in a sorted map, so identical inputs always produce
//! byte-identical URLs.

use std::collections::BTreeMap;

use graphwatch_types::{ColorTag, GraphInterval, MetricKind};
use url::form_urlencoded;

use crate::GraphOptions;

/// Fixed styling for inline sparklines: tiny, undecorated, transparent.
const SPARKLINE_STYLE: &[(&str, &str)] = &[
    ("height", "20"),
    ("width", "120"),
    ("hideGrid", "true"),
    ("hideLegend", "true"),
    ("hideAxes", "true"),
    ("bgcolor", "ff000000"),
    ("fgcolor", "black"),
    ("margin", "0"),
    ("yMin", "0"),
];

/// Fixed styling for full-size graphs on a dark page.
const LARGE_GRAPH_STYLE: &[(&str, &str)] = &[
    ("height", "450"),
    ("width", "800"),
    ("bgcolor", "ff000000"),
    ("fgcolor", "999999"),
    ("yMin", "0"),
];

/// Query parameters for a `/render` request.
#[derive(Debug, Clone, Default)]
pub(crate) struct RenderParams {
    params: BTreeMap<&'static str, String>,
}

impl RenderParams {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    fn styled(style: &[(&'static str, &str)]) -> Self {
        style
            .iter()
            .fold(Self::new(), |params, (name, value)| params.set(*name, *value))
    }

    pub(crate) fn set(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.params.insert(name, value.into());
        self
    }

    fn window(self, interval: &GraphInterval) -> Self {
        self.set("from", interval.graph_from())
            .set("until", interval.graph_until())
    }

    /// `/render?` followed by the encoded parameters, relative to `base`.
    pub(crate) fn render_url(&self, base: &str) -> String {
        let mut serializer = form_urlencoded::Serializer::new(String::new());
        for (name, value) in &self.params {
            serializer.append_pair(name, value);
        }
        format!("{}/render?{}", base, serializer.finish())
    }
}

/// Sum every series matched by `expression` into one.
pub fn sum_series(expression: &str) -> String {
    format!("sumSeries({})", expression)
}

/// Target drawn by [`GraphOptions::large_graph`].
///
/// Series are averaged per minute; counters are additionally scaled to a
/// per-second rate.
pub fn large_graph_target(key: &str, expression: &str) -> String {
    let summarized = format!(r#"summarize({},"1min","avg")"#, sum_series(expression));
    if MetricKind::of(key).is_gauge() {
        summarized
    } else {
        format!("scaleToSeconds({},1)", summarized)
    }
}

impl GraphOptions {
    /// Inline sparkline URL for a target expression.
    pub fn sparkline(&self, expression: &str, color: ColorTag) -> String {
        RenderParams::styled(SPARKLINE_STYLE)
            .set("colorList", color.as_str())
            .set("target", sum_series(expression))
            .window(self.interval())
            .render_url(self.graphite_url())
    }

    /// Full-size graph URL for a target expression of metric `key`.
    pub fn large_graph(&self, key: &str, expression: &str, color: ColorTag) -> String {
        RenderParams::styled(LARGE_GRAPH_STYLE)
            .set("colorList", color.as_str())
            .set("target", large_graph_target(key, expression))
            .window(self.interval())
            .render_url(self.graphite_url())
    }
}
