use std::fmt;

use serde::{Deserialize, Serialize};

use crate::core::{ChartKind, ChartOptions, Dataset, SeriesData, StyleAttributes};
use crate::error::{ChartError, ChartResult};
use crate::extensions::SharedPlugin;

/// Declared chart configuration supplied by the host.
///
/// Exactly one of `data` and `datasets` is expected to be populated when the
/// chart is built.
#[derive(Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartSpec {
    #[serde(rename = "chartType", default)]
    pub kind: ChartKind,
    /// X-axis categories (or slice names for pie-like kinds).
    #[serde(default)]
    pub labels: Vec<String>,
    /// Flat series input.
    #[serde(default)]
    pub data: SeriesData,
    /// Pre-built dataset objects.
    #[serde(default)]
    pub datasets: Vec<Dataset>,
    /// Per-dataset style overrides, matched by index.
    #[serde(default)]
    pub colors: Vec<StyleAttributes>,
    /// Dataset names for multi-series flat input, matched by index.
    #[serde(default)]
    pub series_labels: Vec<String>,
    #[serde(default)]
    pub legend: Option<bool>,
    #[serde(default)]
    pub options: ChartOptions,
    #[serde(skip)]
    pub plugins: Vec<SharedPlugin>,
}

impl ChartSpec {
    #[must_use]
    pub fn new(kind: ChartKind) -> Self {
        Self {
            kind,
            ..Self::default()
        }
    }

    pub fn from_json_str(input: &str) -> ChartResult<Self> {
        serde_json::from_str(input)
            .map_err(|e| ChartError::InvalidData(format!("failed to parse chart spec json: {e}")))
    }

    pub fn to_json_pretty(&self) -> ChartResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| ChartError::InvalidData(format!("failed to serialize chart spec: {e}")))
    }

    #[must_use]
    pub fn with_labels<I, S>(mut self, labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.labels = labels.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn with_data(mut self, data: impl Into<SeriesData>) -> Self {
        self.data = data.into();
        self
    }

    #[must_use]
    pub fn with_datasets(mut self, datasets: Vec<Dataset>) -> Self {
        self.datasets = datasets;
        self
    }

    #[must_use]
    pub fn with_colors(mut self, colors: Vec<StyleAttributes>) -> Self {
        self.colors = colors;
        self
    }

    #[must_use]
    pub fn with_series_labels<I, S>(mut self, labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.series_labels = labels.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn with_legend(mut self, legend: bool) -> Self {
        self.legend = Some(legend);
        self
    }

    #[must_use]
    pub fn with_options(mut self, options: ChartOptions) -> Self {
        self.options = options;
        self
    }

    #[must_use]
    pub fn with_plugin(mut self, plugin: SharedPlugin) -> Self {
        self.plugins.push(plugin);
        self
    }

    /// `true` when either flat series or explicit datasets are non-empty.
    #[must_use]
    pub fn has_data_source(&self) -> bool {
        !self.data.is_empty() || !self.datasets.is_empty()
    }
}

impl fmt::Debug for ChartSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let plugin_ids: Vec<String> = self
            .plugins
            .iter()
            .map(|plugin| plugin.borrow().id().to_owned())
            .collect();
        f.debug_struct("ChartSpec")
            .field("kind", &self.kind)
            .field("labels", &self.labels)
            .field("data", &self.data)
            .field("datasets", &self.datasets)
            .field("colors", &self.colors)
            .field("series_labels", &self.series_labels)
            .field("legend", &self.legend)
            .field("options", &self.options)
            .field("plugins", &plugin_ids)
            .finish()
    }
}
