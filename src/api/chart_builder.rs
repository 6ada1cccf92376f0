use std::cell::RefCell;
use std::rc::Rc;

use tracing::{debug, info, trace};

use crate::core::{ChartOptions, Dataset, DatasetNormalizer};
use crate::error::ChartResult;
use crate::extensions::validate_plugins;
use crate::interaction::{default_click_hook, default_hover_hook};
use crate::render::{ChartBackend, ChartConfig, ChartData, LiveChart};

use super::ChartEngine;

impl<B: ChartBackend> ChartEngine<B> {
    /// Resolves the declared datasets with the engine palette.
    pub fn resolve_datasets(&self) -> ChartResult<Vec<Dataset>> {
        DatasetNormalizer::new(&*self.palette).resolve(&self.spec)
    }

    /// Destroys the current chart, then builds and registers a new one.
    ///
    /// Labels and points of the chart being replaced are carried over, so
    /// samples appended or removed incrementally survive the rebuild. Styling
    /// is recomputed for the new kind. On error no chart is live afterwards.
    pub(super) fn rebuild(&mut self) -> ChartResult<()> {
        let carried = self.with_chart(|chart| chart.data().clone());
        self.teardown();

        let normalizer = DatasetNormalizer::new(&*self.palette);
        let mut data = ChartData {
            labels: self.spec.labels.clone(),
            datasets: normalizer.unstyled(&self.spec)?,
        };
        if let Some(live) = carried {
            carry_live_data(&mut data, live);
        }
        data.datasets = normalizer.style(&self.spec, data.datasets);
        validate_plugins(&self.spec.plugins)?;

        let config = ChartConfig {
            kind: self.spec.kind,
            data,
            options: self.build_options(),
            plugins: self.spec.plugins.clone(),
        };
        let dataset_count = config.data.datasets.len();
        let label_count = config.data.labels.len();

        let handle = self.backend.create(self.surface.context(), config)?;
        let chart = Rc::new(RefCell::new(handle));
        if let (Some(id), Some(registry)) = (self.surface_id.as_deref(), self.registry.as_ref()) {
            registry.register(id, &chart);
        }
        self.live = Some(chart);

        info!(
            kind = %self.spec.kind,
            datasets = dataset_count,
            labels = label_count,
            surface_id = ?self.surface_id,
            "chart built"
        );
        Ok(())
    }

    /// Copies the declared options, applies the legend flag and installs the
    /// default interaction hooks where the caller supplied none.
    pub(super) fn build_options(&self) -> ChartOptions {
        let mut options = self.spec.options.clone();
        if self.spec.legend == Some(false) {
            options.set_legend_display(false);
        }
        if options.install_hover_if_absent(default_hover_hook(self.events.clone())) {
            debug!("installed default hover hook");
        }
        if options.install_click_if_absent(default_click_hook(self.events.clone())) {
            debug!("installed default click hook");
        }
        options
    }
}

/// Replaces the labels and, by index, the points of `data` with those of the
/// chart being replaced. Datasets without a live counterpart keep their
/// resolved points.
fn carry_live_data(data: &mut ChartData, live: ChartData) {
    data.labels = live.labels;
    for (dataset, live_dataset) in data.datasets.iter_mut().zip(live.datasets) {
        dataset.data = live_dataset.data;
    }
    trace!(labels = data.labels.len(), "carried live data into rebuild");
}
