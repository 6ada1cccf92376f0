use tracing::{debug, trace, warn};

use crate::core::{DataPoint, Dataset};
use crate::render::{ChartBackend, ChartData, LiveChart};

use super::{ChartEngine, Diagnostic, RemoveDirection, ShapeSource};

/// Appends `labels` to the label sequence and `values[i]` to the dataset at
/// index `i`. Datasets without a matching entry stay unchanged and are
/// reported; the dataset list itself is never resized.
///
/// No-op when either `labels` or `values` is empty.
pub fn append_chart_data(
    data: &mut ChartData,
    labels: &[String],
    values: &[Vec<DataPoint>],
) -> Vec<Diagnostic> {
    if labels.is_empty() || values.is_empty() {
        trace!("skipping empty append");
        return Vec::new();
    }

    data.labels.extend_from_slice(labels);

    let mut diagnostics = Vec::new();
    for (index, dataset) in data.datasets.iter_mut().enumerate() {
        match values.get(index) {
            Some(points) => dataset.data.extend_from_slice(points),
            None => {
                warn!(
                    dataset_index = index,
                    provided = values.len(),
                    "appended data does not match the existing datasets"
                );
                diagnostics.push(Diagnostic::ShapeMismatch {
                    dataset_index: index,
                    source: ShapeSource::Append,
                });
            }
        }
    }
    trace!(labels = data.labels.len(), "appended chart data");
    diagnostics
}

/// Drops one label and one point from every dataset at the requested end.
/// Empty sequences are left empty.
///
/// `Latest` is O(1) per sequence. `Oldest` shifts the remaining elements and
/// costs O(labels + points); the live chart's arrays are plain vectors shared
/// with the plotting library, so there is no ring buffer to rotate instead.
pub fn remove_chart_data(data: &mut ChartData, direction: RemoveDirection) {
    match direction {
        RemoveDirection::Latest => {
            data.labels.pop();
            for dataset in &mut data.datasets {
                dataset.data.pop();
            }
        }
        RemoveDirection::Oldest => {
            if !data.labels.is_empty() {
                data.labels.remove(0);
            }
            for dataset in &mut data.datasets {
                if !dataset.data.is_empty() {
                    dataset.data.remove(0);
                }
            }
        }
    }
    trace!(?direction, labels = data.labels.len(), "removed chart data");
}

/// Copies recomputed datasets into the live ones by index.
///
/// Points are always replaced; the label only when the recomputed dataset
/// has one. Live datasets with no counterpart keep their content and are
/// reported, extra recomputed datasets are ignored.
pub fn refresh_chart_datasets(data: &mut ChartData, incoming: Vec<Dataset>) -> Vec<Diagnostic> {
    let provided = incoming.len();
    let mut incoming = incoming.into_iter();
    let mut diagnostics = Vec::new();

    for (index, dataset) in data.datasets.iter_mut().enumerate() {
        match incoming.next() {
            Some(next) => {
                dataset.data = next.data;
                if let Some(label) = next.label {
                    dataset.label = Some(label);
                }
            }
            None => {
                warn!(
                    dataset_index = index,
                    provided, "updated data does not cover every existing dataset"
                );
                diagnostics.push(Diagnostic::ShapeMismatch {
                    dataset_index: index,
                    source: ShapeSource::DataUpdate,
                });
            }
        }
    }

    let ignored = incoming.count();
    if ignored > 0 {
        debug!(ignored, "ignoring datasets beyond the live dataset count");
    }
    diagnostics
}

impl<B: ChartBackend> ChartEngine<B> {
    /// Appends labels and per-dataset points to the live chart without a
    /// redraw. Returns the shape diagnostics of the append.
    pub fn add_data(&mut self, labels: &[String], values: &[Vec<DataPoint>]) -> Vec<Diagnostic> {
        self.with_chart(|chart| append_chart_data(chart.data_mut(), labels, values))
            .unwrap_or_default()
    }

    /// Removes the newest or oldest sample from the live chart without a
    /// redraw. Returns `false` when no chart is live.
    pub fn remove_data(&mut self, direction: RemoveDirection) -> bool {
        self.with_chart(|chart| remove_chart_data(chart.data_mut(), direction))
            .is_some()
    }

    /// Re-resolves the declared datasets and copies them into the live chart.
    pub(super) fn refresh_data(&mut self) -> Vec<Diagnostic> {
        let datasets = match self.resolve_datasets() {
            Ok(datasets) => datasets,
            Err(err) => {
                warn!(error = %err, "skipping data update");
                return vec![Diagnostic::Unresolved {
                    reason: err.to_string(),
                }];
            }
        };
        self.with_chart(|chart| refresh_chart_datasets(chart.data_mut(), datasets))
            .unwrap_or_default()
    }
}
