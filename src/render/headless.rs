use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use tracing::trace;

use crate::core::{ChartKind, ChartOptions, Viewport};
use crate::error::{ChartError, ChartResult};
use crate::extensions::{PluginContext, PluginEvent, SharedPlugin};
use crate::interaction::{ActiveElement, PointerEvent};
use crate::render::{ChartBackend, ChartConfig, ChartData, LiveChart};

/// Adapter call observed by a [`HeadlessBackend`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendCall {
    Created { chart_id: u64, kind: ChartKind },
    Redrawn { chart_id: u64 },
    Destroyed { chart_id: u64 },
}

/// Shared, ordered record of adapter calls.
#[derive(Debug, Clone, Default)]
pub struct BackendLog {
    calls: Rc<RefCell<Vec<BackendCall>>>,
}

impl BackendLog {
    fn record(&self, call: BackendCall) {
        trace!(?call, "headless backend call");
        self.calls.borrow_mut().push(call);
    }

    #[must_use]
    pub fn calls(&self) -> Vec<BackendCall> {
        self.calls.borrow().clone()
    }

    #[must_use]
    pub fn count(&self, predicate: impl Fn(&BackendCall) -> bool) -> usize {
        self.calls.borrow().iter().filter(|call| predicate(call)).count()
    }

    #[must_use]
    pub fn live_charts(&self) -> usize {
        let calls = self.calls.borrow();
        let created = calls
            .iter()
            .filter(|call| matches!(call, BackendCall::Created { .. }))
            .count();
        let destroyed = calls
            .iter()
            .filter(|call| matches!(call, BackendCall::Destroyed { .. }))
            .count();
        created.saturating_sub(destroyed)
    }

    pub fn clear(&self) {
        self.calls.borrow_mut().clear();
    }
}

/// In-memory plotting backend used by tests and headless hosts.
///
/// It keeps chart data exactly as the engine leaves it, notifies inline
/// plugins and records every adapter call in a [`BackendLog`].
#[derive(Debug, Default)]
pub struct HeadlessBackend {
    log: BackendLog,
    next_id: u64,
}

impl HeadlessBackend {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn log(&self) -> BackendLog {
        self.log.clone()
    }
}

impl ChartBackend for HeadlessBackend {
    type Context = Viewport;
    type Handle = HeadlessChart;

    fn create(&mut self, viewport: &Viewport, config: ChartConfig) -> ChartResult<HeadlessChart> {
        if !viewport.is_valid() {
            return Err(ChartError::Backend(format!(
                "invalid surface size: width={}, height={}",
                viewport.width, viewport.height
            )));
        }
        self.next_id += 1;
        let chart = HeadlessChart {
            id: self.next_id,
            kind: config.kind,
            data: config.data,
            options: config.options,
            plugins: config.plugins,
            log: self.log.clone(),
            redraw_count: 0,
            destroyed: false,
        };
        self.log.record(BackendCall::Created {
            chart_id: chart.id,
            kind: chart.kind,
        });
        chart.notify_plugins(PluginEvent::Installed);
        Ok(chart)
    }
}

pub struct HeadlessChart {
    id: u64,
    kind: ChartKind,
    data: ChartData,
    options: ChartOptions,
    plugins: Vec<SharedPlugin>,
    log: BackendLog,
    redraw_count: usize,
    destroyed: bool,
}

impl HeadlessChart {
    #[must_use]
    pub fn id(&self) -> u64 {
        self.id
    }

    #[must_use]
    pub fn redraw_count(&self) -> usize {
        self.redraw_count
    }

    #[must_use]
    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    #[must_use]
    pub fn plugin_count(&self) -> usize {
        self.plugins.len()
    }

    /// Simulates pointer hover over `active` elements.
    pub fn dispatch_hover(&self, event: PointerEvent, active: Option<&[ActiveElement]>) {
        if let Some(hook) = self.options.on_hover() {
            hook(&event, active);
        }
    }

    /// Simulates a click over `active` elements.
    pub fn dispatch_click(&self, event: PointerEvent, active: Option<&[ActiveElement]>) {
        if let Some(hook) = self.options.on_click() {
            hook(&event, active);
        }
    }

    fn notify_plugins(&self, event: PluginEvent) {
        let context = PluginContext {
            kind: self.kind,
            labels_len: self.data.labels.len(),
            datasets_len: self.data.datasets.len(),
        };
        for plugin in &self.plugins {
            plugin.borrow_mut().on_event(event, context);
        }
    }
}

impl fmt::Debug for HeadlessChart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HeadlessChart")
            .field("id", &self.id)
            .field("kind", &self.kind)
            .field("data", &self.data)
            .field("options", &self.options)
            .field("plugins", &self.plugins.len())
            .field("redraw_count", &self.redraw_count)
            .field("destroyed", &self.destroyed)
            .finish()
    }
}

impl LiveChart for HeadlessChart {
    fn kind(&self) -> ChartKind {
        self.kind
    }

    fn data(&self) -> &ChartData {
        &self.data
    }

    fn data_mut(&mut self) -> &mut ChartData {
        &mut self.data
    }

    fn options(&self) -> &ChartOptions {
        &self.options
    }

    fn options_mut(&mut self) -> &mut ChartOptions {
        &mut self.options
    }

    fn redraw(&mut self) {
        if self.destroyed {
            return;
        }
        self.redraw_count += 1;
        self.log.record(BackendCall::Redrawn { chart_id: self.id });
        self.notify_plugins(PluginEvent::Redrawn);
    }

    fn destroy(&mut self) {
        if self.destroyed {
            return;
        }
        self.destroyed = true;
        self.log.record(BackendCall::Destroyed { chart_id: self.id });
        self.notify_plugins(PluginEvent::Destroyed);
    }
}
