use tracing::{debug, trace, warn};

use crate::error::ChartResult;
use crate::render::{ChartBackend, LiveChart};

use super::{ApplyReport, ChangeSet, ChartEngine, Diagnostic};

impl<B: ChartBackend> ChartEngine<B> {
    /// Reconciles one batch of input changes with the live chart.
    ///
    /// Declared values are stored first, then the batch is applied in a
    /// fixed order:
    /// 1. data/datasets: re-resolve and copy points into live datasets by index
    /// 2. labels: replace the label sequence
    /// 3. legend: toggle `legend.display` when the value actually changed
    /// 4. adding: incremental append
    /// 5. removing: incremental remove (`latest`/`oldest`, anything else ignored)
    /// 6. chart kind: full rebuild
    /// 7. reset option: shallow-merge onto the live options
    ///
    /// At most one redraw is issued, and only when an in-place branch ran
    /// after the last rebuild of the batch. Colors, series labels, options
    /// and plugins are stored for the next rebuild only.
    pub fn apply(&mut self, changes: ChangeSet) -> ChartResult<ApplyReport> {
        let mut report = ApplyReport::default();
        trace!(?changes, "apply change set");

        let ChangeSet {
            data,
            datasets,
            labels,
            legend,
            adding,
            removing,
            chart_kind,
            reset_option,
            colors,
            series_labels,
            options,
            plugins,
        } = changes;

        let data_changed = data.is_some() || datasets.is_some();
        let labels_changed = labels.is_some();
        let legend_toggle = legend
            .as_ref()
            .filter(|change| change.is_changed())
            .map(|change| change.current.unwrap_or(true));
        let kind_changed = chart_kind.is_some();

        if let Some(change) = data {
            self.spec.data = change.current;
        }
        if let Some(change) = datasets {
            self.spec.datasets = change.current;
        }
        if let Some(change) = labels {
            self.spec.labels = change.current;
        }
        if let Some(change) = legend {
            self.spec.legend = change.current;
        }
        if let Some(change) = chart_kind {
            self.spec.kind = change.current;
        }
        if let Some(change) = colors {
            self.spec.colors = change.current;
        }
        if let Some(change) = series_labels {
            self.spec.series_labels = change.current;
        }
        if let Some(change) = options {
            self.spec.options = change.current;
        }
        if let Some(change) = plugins {
            self.spec.plugins = change.current;
        }

        if !self.initialized {
            debug!("engine not initialized; storing changes only");
            report.deferred = true;
            return Ok(report);
        }

        if self.live.is_none() {
            if self.spec.has_data_source() {
                self.rebuild()?;
                report.rebuilt = true;
            } else {
                debug!("no live chart and no data source; storing changes only");
                report.deferred = true;
            }
            return Ok(report);
        }

        let mut needs_redraw = false;

        if data_changed {
            let diagnostics = self.refresh_data();
            needs_redraw |= !diagnostics
                .iter()
                .any(|diagnostic| matches!(diagnostic, Diagnostic::Unresolved { .. }));
            report.diagnostics.extend(diagnostics);
        }

        if labels_changed {
            let labels = self.spec.labels.clone();
            self.with_chart(|chart| chart.data_mut().labels = labels);
            needs_redraw = true;
        }

        if let Some(display) = legend_toggle {
            self.with_chart(|chart| chart.options_mut().set_legend_display(display));
            needs_redraw = true;
        }

        if let Some(change) = adding {
            let operation = change.current;
            if !operation.is_empty() {
                report
                    .diagnostics
                    .extend(self.add_data(&operation.labels, &operation.data));
                needs_redraw = true;
            }
        }

        if let Some(change) = removing {
            match change.current.direction() {
                Some(direction) => {
                    self.remove_data(direction);
                    needs_redraw = true;
                }
                None => {
                    debug!(
                        orientation = %change.current.orientation,
                        "ignoring remove request with unknown orientation"
                    );
                    report.diagnostics.push(Diagnostic::InvalidDirection {
                        orientation: change.current.orientation,
                    });
                }
            }
        }

        if kind_changed {
            self.rebuild()?;
            report.rebuilt = true;
            needs_redraw = false;
        }

        if let Some(change) = reset_option {
            let partial = change.current;
            if self
                .with_chart(|chart| chart.options_mut().merge_shallow(&partial))
                .is_some()
            {
                needs_redraw = true;
            } else {
                warn!("no live chart to merge options into");
            }
        }

        if needs_redraw && self.with_chart(|chart| chart.redraw()).is_some() {
            report.redrawn = true;
        }

        Ok(report)
    }
}
