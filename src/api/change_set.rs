use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::core::{
    ChartKind, ChartOptions, ChartSpec, DataPoint, Dataset, SeriesData, StyleAttributes,
};
use crate::extensions::SharedPlugin;

/// Previous and current value of one changed input.
#[derive(Debug, Clone, PartialEq)]
pub struct Change<T> {
    pub previous: Option<T>,
    pub current: T,
}

impl<T> Change<T> {
    /// First assignment of an input, with no previous value.
    #[must_use]
    pub fn first(current: T) -> Self {
        Self {
            previous: None,
            current,
        }
    }

    #[must_use]
    pub fn new(previous: T, current: T) -> Self {
        Self {
            previous: Some(previous),
            current,
        }
    }
}

impl<T: PartialEq> Change<T> {
    /// `true` unless the previous value is known and equal to the current one.
    #[must_use]
    pub fn is_changed(&self) -> bool {
        self.previous.as_ref() != Some(&self.current)
    }
}

/// Labels and per-dataset points appended in one incremental step.
///
/// `data[i]` is appended to the live dataset at index `i`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AddOperation {
    pub labels: Vec<String>,
    pub data: Vec<Vec<DataPoint>>,
}

impl AddOperation {
    #[must_use]
    pub fn new<I, S>(labels: I, data: Vec<Vec<DataPoint>>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            labels: labels.into_iter().map(Into::into).collect(),
            data,
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty() || self.data.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RemoveDirection {
    /// Drop the last label and the last point of every dataset.
    Latest,
    /// Drop the first label and the first point of every dataset.
    Oldest,
}

impl RemoveDirection {
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "latest" => Some(RemoveDirection::Latest),
            "oldest" => Some(RemoveDirection::Oldest),
            _ => None,
        }
    }
}

/// Incremental remove request. The direction stays a raw string because
/// hosts forward it unchecked; unknown values are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RemoveOperation {
    pub orientation: String,
}

impl RemoveOperation {
    #[must_use]
    pub fn new(orientation: impl Into<String>) -> Self {
        Self {
            orientation: orientation.into(),
        }
    }

    #[must_use]
    pub fn direction(&self) -> Option<RemoveDirection> {
        RemoveDirection::parse(&self.orientation)
    }
}

impl From<RemoveDirection> for RemoveOperation {
    fn from(direction: RemoveDirection) -> Self {
        let orientation = match direction {
            RemoveDirection::Latest => "latest",
            RemoveDirection::Oldest => "oldest",
        };
        Self::new(orientation)
    }
}

/// Inputs changed since the previous reconciliation.
#[derive(Clone, Default)]
pub struct ChangeSet {
    pub data: Option<Change<SeriesData>>,
    pub datasets: Option<Change<Vec<Dataset>>>,
    pub labels: Option<Change<Vec<String>>>,
    pub legend: Option<Change<Option<bool>>>,
    pub adding: Option<Change<AddOperation>>,
    pub removing: Option<Change<RemoveOperation>>,
    pub chart_kind: Option<Change<ChartKind>>,
    pub reset_option: Option<Change<Map<String, Value>>>,
    pub colors: Option<Change<Vec<StyleAttributes>>>,
    pub series_labels: Option<Change<Vec<String>>>,
    pub options: Option<Change<ChartOptions>>,
    pub plugins: Option<Change<Vec<SharedPlugin>>>,
}

impl ChangeSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Diffs the declarative fields of two specs. Plugins are never diffed;
    /// options are compared by their JSON values only.
    #[must_use]
    pub fn between(old: &ChartSpec, new: &ChartSpec) -> Self {
        fn diff<T: PartialEq + Clone>(old: &T, new: &T) -> Option<Change<T>> {
            (old != new).then(|| Change::new(old.clone(), new.clone()))
        }

        Self {
            data: (!same_series(&old.data, &new.data))
                .then(|| Change::new(old.data.clone(), new.data.clone())),
            datasets: diff(&old.datasets, &new.datasets),
            labels: diff(&old.labels, &new.labels),
            legend: diff(&old.legend, &new.legend),
            chart_kind: diff(&old.kind, &new.kind),
            colors: diff(&old.colors, &new.colors),
            series_labels: diff(&old.series_labels, &new.series_labels),
            options: (old.options.values() != new.options.values())
                .then(|| Change::new(old.options.clone(), new.options.clone())),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_data(mut self, data: impl Into<SeriesData>) -> Self {
        self.data = Some(Change::first(data.into()));
        self
    }

    #[must_use]
    pub fn with_datasets(mut self, datasets: Vec<Dataset>) -> Self {
        self.datasets = Some(Change::first(datasets));
        self
    }

    #[must_use]
    pub fn with_labels<I, S>(mut self, labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.labels = Some(Change::first(labels.into_iter().map(Into::into).collect()));
        self
    }

    #[must_use]
    pub fn with_legend(mut self, previous: Option<bool>, current: Option<bool>) -> Self {
        self.legend = Some(Change::new(previous, current));
        self
    }

    #[must_use]
    pub fn with_adding(mut self, operation: AddOperation) -> Self {
        self.adding = Some(Change::first(operation));
        self
    }

    #[must_use]
    pub fn with_removing(mut self, operation: impl Into<RemoveOperation>) -> Self {
        self.removing = Some(Change::first(operation.into()));
        self
    }

    #[must_use]
    pub fn with_chart_kind(mut self, previous: ChartKind, current: ChartKind) -> Self {
        self.chart_kind = Some(Change::new(previous, current));
        self
    }

    #[must_use]
    pub fn with_reset_option(mut self, partial: Map<String, Value>) -> Self {
        self.reset_option = Some(Change::first(partial));
        self
    }

    #[must_use]
    pub fn with_colors(mut self, colors: Vec<StyleAttributes>) -> Self {
        self.colors = Some(Change::first(colors));
        self
    }

    #[must_use]
    pub fn with_options(mut self, options: ChartOptions) -> Self {
        self.options = Some(Change::first(options));
        self
    }

    #[must_use]
    pub fn with_plugins(mut self, plugins: Vec<SharedPlugin>) -> Self {
        self.plugins = Some(Change::first(plugins));
        self
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_none()
            && self.datasets.is_none()
            && self.labels.is_none()
            && self.legend.is_none()
            && self.adding.is_none()
            && self.removing.is_none()
            && self.chart_kind.is_none()
            && self.reset_option.is_none()
            && self.colors.is_none()
            && self.series_labels.is_none()
            && self.options.is_none()
            && self.plugins.is_none()
    }
}

/// Empty single and empty multi series both mean "no flat data".
fn same_series(old: &SeriesData, new: &SeriesData) -> bool {
    (old.is_empty() && new.is_empty()) || old == new
}

impl fmt::Debug for ChangeSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChangeSet")
            .field("data", &self.data)
            .field("datasets", &self.datasets)
            .field("labels", &self.labels)
            .field("legend", &self.legend)
            .field("adding", &self.adding)
            .field("removing", &self.removing)
            .field("chart_kind", &self.chart_kind)
            .field("reset_option", &self.reset_option)
            .field("colors", &self.colors)
            .field("series_labels", &self.series_labels)
            .field("options", &self.options)
            .field("plugins", &self.plugins.as_ref().map(|change| change.current.len()))
            .finish()
    }
}

/// Which incremental step a shape diagnostic came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShapeSource {
    DataUpdate,
    Append,
}

/// Non-fatal condition absorbed during reconciliation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Diagnostic {
    /// The live dataset at `dataset_index` had no counterpart in the input
    /// and was left untouched.
    ShapeMismatch {
        dataset_index: usize,
        source: ShapeSource,
    },
    /// A remove request carried an unknown orientation.
    InvalidDirection { orientation: String },
    /// Updated data could not be resolved into datasets.
    Unresolved { reason: String },
}

/// Outcome of one `apply` call.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[must_use]
pub struct ApplyReport {
    /// Values were stored but no chart was touched.
    pub deferred: bool,
    pub rebuilt: bool,
    pub redrawn: bool,
    pub diagnostics: Vec<Diagnostic>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_series_of_either_shape_is_not_a_data_change() {
        let single = ChartSpec::new(ChartKind::Bar);
        let multi = ChartSpec {
            data: SeriesData::Multi(Vec::new()),
            ..ChartSpec::new(ChartKind::Bar)
        };

        assert!(ChangeSet::between(&single, &multi).data.is_none());
        assert!(ChangeSet::between(&multi, &single).is_empty());
        assert!(
            ChangeSet::between(&multi, &multi.clone().with_data(vec![1.0]))
                .data
                .is_some()
        );
    }

    #[test]
    fn change_without_previous_counts_as_changed() {
        assert!(Change::first(Some(true)).is_changed());
        assert!(!Change::new(Some(true), Some(true)).is_changed());
        assert!(Change::new(None, Some(false)).is_changed());
    }

    #[test]
    fn remove_direction_parses_known_orientations_only() {
        assert_eq!(RemoveDirection::parse("latest"), Some(RemoveDirection::Latest));
        assert_eq!(RemoveDirection::parse("oldest"), Some(RemoveDirection::Oldest));
        assert_eq!(RemoveDirection::parse("Oldest"), None);
        assert_eq!(RemoveOperation::from(RemoveDirection::Oldest).orientation, "oldest");
    }

    #[test]
    fn add_operation_is_empty_when_either_side_is_empty() {
        assert!(AddOperation::new(Vec::<String>::new(), vec![vec![DataPoint::from(1)]]).is_empty());
        assert!(AddOperation::new(["a"], Vec::new()).is_empty());
        assert!(!AddOperation::new(["a"], vec![vec![DataPoint::from(1)]]).is_empty());
    }
}
