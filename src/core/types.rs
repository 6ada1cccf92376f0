use std::fmt;
use std::str::FromStr;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::trace;

use crate::error::ChartError;

/// Pixel size of a drawing surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    #[must_use]
    pub fn is_valid(self) -> bool {
        self.width > 0 && self.height > 0
    }
}

/// Chart kinds understood by the plotting library.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ChartKind {
    #[default]
    Line,
    Bar,
    Radar,
    Pie,
    PolarArea,
    Doughnut,
}

impl ChartKind {
    pub const ALL: [ChartKind; 6] = [
        ChartKind::Line,
        ChartKind::Bar,
        ChartKind::Radar,
        ChartKind::Pie,
        ChartKind::PolarArea,
        ChartKind::Doughnut,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            ChartKind::Line => "line",
            ChartKind::Bar => "bar",
            ChartKind::Radar => "radar",
            ChartKind::Pie => "pie",
            ChartKind::PolarArea => "polarArea",
            ChartKind::Doughnut => "doughnut",
        }
    }

    /// Kinds where every point is its own visual category and gets its own color.
    #[must_use]
    pub fn colors_per_point(self) -> bool {
        matches!(
            self,
            ChartKind::Pie | ChartKind::PolarArea | ChartKind::Doughnut
        )
    }
}

impl fmt::Display for ChartKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ChartKind {
    type Err = ChartError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        ChartKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == value)
            .ok_or_else(|| ChartError::InvalidData(format!("unknown chart kind `{value}`")))
    }
}

/// One sample of a dataset: a plain number, a structured point (`{x, y, r}`
/// and friends) or a gap.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DataPoint {
    Number(f64),
    Structured(Map<String, Value>),
    Null,
}

impl DataPoint {
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            DataPoint::Number(value) => Some(*value),
            DataPoint::Structured(_) | DataPoint::Null => None,
        }
    }

    /// Converts a slice of numbers into a point sequence.
    #[must_use]
    pub fn series(values: &[f64]) -> Vec<DataPoint> {
        values.iter().copied().map(DataPoint::Number).collect()
    }
}

impl From<f64> for DataPoint {
    fn from(value: f64) -> Self {
        DataPoint::Number(value)
    }
}

impl From<i32> for DataPoint {
    fn from(value: i32) -> Self {
        DataPoint::Number(f64::from(value))
    }
}

/// Flat series input: either one series or one inner sequence per series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SeriesData {
    Multi(Vec<Vec<DataPoint>>),
    Single(Vec<DataPoint>),
}

impl SeriesData {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            SeriesData::Multi(series) => series.is_empty(),
            SeriesData::Single(points) => points.is_empty(),
        }
    }

    #[must_use]
    pub fn series_count(&self) -> usize {
        match self {
            SeriesData::Multi(series) => series.len(),
            SeriesData::Single(points) if points.is_empty() => 0,
            SeriesData::Single(_) => 1,
        }
    }
}

impl Default for SeriesData {
    fn default() -> Self {
        SeriesData::Single(Vec::new())
    }
}

impl From<Vec<f64>> for SeriesData {
    fn from(values: Vec<f64>) -> Self {
        SeriesData::Single(DataPoint::series(&values))
    }
}

impl From<Vec<Vec<f64>>> for SeriesData {
    fn from(values: Vec<Vec<f64>>) -> Self {
        SeriesData::Multi(values.iter().map(|inner| DataPoint::series(inner)).collect())
    }
}

/// Insertion-ordered style attributes (`backgroundColor`, `borderColor`, ...).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StyleAttributes(IndexMap<String, Value>);

impl StyleAttributes {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.0.insert(key.into(), value.into())
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }

    /// Shallow merge: keys from `other` overwrite existing keys.
    pub fn merge(&mut self, other: &StyleAttributes) {
        for (key, value) in &other.0 {
            self.0.insert(key.clone(), value.clone());
        }
    }
}

impl FromIterator<(String, Value)> for StyleAttributes {
    fn from_iter<T: IntoIterator<Item = (String, Value)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// One named series rendered together.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Dataset {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default)]
    pub data: Vec<DataPoint>,
    #[serde(flatten)]
    pub style: StyleAttributes,
}

impl Dataset {
    #[must_use]
    pub fn new(label: impl Into<String>, data: Vec<DataPoint>) -> Self {
        Self {
            label: Some(label.into()),
            data,
            style: StyleAttributes::new(),
        }
    }

    #[must_use]
    pub fn unlabeled(data: Vec<DataPoint>) -> Self {
        Self {
            label: None,
            data,
            style: StyleAttributes::new(),
        }
    }

    #[must_use]
    pub fn with_style(mut self, style: StyleAttributes) -> Self {
        self.merge_style(&style);
        self
    }

    /// Merges style keys onto this dataset. `label` and `data` are owned by
    /// the dataset itself and are not overwritten by style sets.
    pub fn merge_style(&mut self, style: &StyleAttributes) {
        for (key, value) in style.iter() {
            if key == "label" || key == "data" {
                trace!(key = %key, "ignoring reserved key in style attributes");
                continue;
            }
            self.style.insert(key.clone(), value.clone());
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chart_kind_parses_library_names() {
        for kind in ChartKind::ALL {
            assert_eq!(kind.as_str().parse::<ChartKind>().expect("known kind"), kind);
        }
        assert!("scatter".parse::<ChartKind>().is_err());
    }

    #[test]
    fn series_data_detects_multi_series_json() {
        let multi: SeriesData = serde_json::from_str("[[1, 2], [3]]").expect("multi");
        assert_eq!(multi.series_count(), 2);
        let single: SeriesData = serde_json::from_str("[1, 2, 3]").expect("single");
        assert_eq!(single, SeriesData::from(vec![1.0, 2.0, 3.0]));
    }

    #[test]
    fn merge_style_skips_reserved_keys() {
        let mut dataset = Dataset::new("a", DataPoint::series(&[1.0]));
        let style = StyleAttributes::new()
            .with("label", "other")
            .with("borderColor", "#000");
        dataset.merge_style(&style);
        assert_eq!(dataset.label.as_deref(), Some("a"));
        assert_eq!(dataset.style.len(), 1);
    }
}
