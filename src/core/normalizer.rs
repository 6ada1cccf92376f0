use tracing::{debug, trace};

use crate::core::{ChartSpec, DataPoint, Dataset, PaletteProvider, SeriesData};
use crate::error::{ChartError, ChartResult};

/// Resolves the canonical dataset list for a [`ChartSpec`].
///
/// Flat series and explicit datasets are mutually exclusive:
/// - explicit datasets are shallow-copied
/// - flat multi-series input yields one dataset per inner sequence, named
///   from `series_labels` or `Label {index}`
/// - flat single-series input yields one dataset named `Label 0`
///
/// Every resulting dataset then receives the caller style at its index, or
/// the palette style when the caller gave none for that index.
pub struct DatasetNormalizer<'a> {
    palette: &'a dyn PaletteProvider,
}

impl<'a> DatasetNormalizer<'a> {
    #[must_use]
    pub fn new(palette: &'a dyn PaletteProvider) -> Self {
        Self { palette }
    }

    pub fn resolve(&self, spec: &ChartSpec) -> ChartResult<Vec<Dataset>> {
        let datasets = self.unstyled(spec)?;
        Ok(self.style(spec, datasets))
    }

    /// Picks the data source and names flat series, without any styling.
    pub fn unstyled(&self, spec: &ChartSpec) -> ChartResult<Vec<Dataset>> {
        let has_series = !spec.data.is_empty();
        let has_datasets = !spec.datasets.is_empty();

        let datasets = match (has_datasets, has_series) {
            (true, true) => return Err(ChartError::AmbiguousDataSource { kind: spec.kind }),
            (false, false) => return Err(ChartError::Configuration { kind: spec.kind }),
            (true, false) => spec.datasets.clone(),
            (false, true) => datasets_from_series(&spec.data, &spec.series_labels),
        };

        debug!(
            kind = %spec.kind,
            count = datasets.len(),
            from_series = has_series,
            "resolved datasets"
        );
        Ok(datasets)
    }

    /// Applies the caller style at each index, or the palette style when the
    /// caller gave none for that index. Palette styles see the final point
    /// counts of `datasets`.
    #[must_use]
    pub fn style(&self, spec: &ChartSpec, datasets: Vec<Dataset>) -> Vec<Dataset> {
        datasets
            .into_iter()
            .enumerate()
            .map(|(index, mut dataset)| {
                match spec.colors.get(index) {
                    Some(style) => dataset.merge_style(style),
                    None => {
                        let style = self.palette.colors_for(spec.kind, index, dataset.len());
                        trace!(index, kind = %spec.kind, "applying palette style");
                        dataset.merge_style(&style);
                    }
                }
                dataset
            })
            .collect()
    }
}

/// Builds unstyled datasets from flat series input.
#[must_use]
pub fn datasets_from_series(data: &SeriesData, series_labels: &[String]) -> Vec<Dataset> {
    match data {
        SeriesData::Multi(series) => series
            .iter()
            .enumerate()
            .map(|(index, points)| Dataset::new(series_label(series_labels, index), points.clone()))
            .collect(),
        SeriesData::Single(points) if points.is_empty() => Vec::new(),
        SeriesData::Single(points) => vec![Dataset::new("Label 0", points.clone())],
    }
}

fn series_label(series_labels: &[String], index: usize) -> String {
    series_labels
        .get(index)
        .filter(|label| !label.is_empty())
        .cloned()
        .unwrap_or_else(|| format!("Label {index}"))
}

/// Point sequences of `datasets`, in order.
#[must_use]
pub fn dataset_points(datasets: &[Dataset]) -> Vec<Vec<DataPoint>> {
    datasets.iter().map(|dataset| dataset.data.clone()).collect()
}
