use std::cell::RefCell;
use std::rc::Rc;

use tracing::debug;

use crate::core::{ChartSpec, DefaultPalette, PaletteProvider};
use crate::error::{ChartError, ChartResult};
use crate::interaction::{ChartEvent, EventQueue};
use crate::render::{ChartBackend, LiveChart, Surface};

use super::InstanceRegistry;

pub type SharedChart<B> = Rc<RefCell<<B as ChartBackend>::Handle>>;

/// Keeps one live chart in sync with a declared [`ChartSpec`].
///
/// Hosts drive the engine through three entry points: [`initialize`] once
/// the surface exists, [`apply`] for every batch of input changes and
/// [`teardown`] when the surface goes away. The engine is the only owner of
/// the live chart and always destroys the current chart before building a
/// replacement.
///
/// [`initialize`]: ChartEngine::initialize
/// [`apply`]: ChartEngine::apply
/// [`teardown`]: ChartEngine::teardown
pub struct ChartEngine<B: ChartBackend> {
    pub(super) backend: B,
    pub(super) surface: Surface<B::Context>,
    pub(super) spec: ChartSpec,
    pub(super) palette: Box<dyn PaletteProvider>,
    pub(super) registry: Option<InstanceRegistry<B::Handle>>,
    pub(super) live: Option<SharedChart<B>>,
    pub(super) surface_id: Option<String>,
    pub(super) initialized: bool,
    pub(super) events: EventQueue,
}

impl<B: ChartBackend> ChartEngine<B> {
    #[must_use]
    pub fn new(backend: B, surface: Surface<B::Context>, spec: ChartSpec) -> Self {
        Self {
            backend,
            surface,
            spec,
            palette: Box::new(DefaultPalette),
            registry: None,
            live: None,
            surface_id: None,
            initialized: false,
            events: EventQueue::new(),
        }
    }

    #[must_use]
    pub fn with_registry(mut self, registry: InstanceRegistry<B::Handle>) -> Self {
        self.registry = Some(registry);
        self
    }

    #[must_use]
    pub fn with_palette(mut self, palette: impl PaletteProvider + 'static) -> Self {
        self.palette = Box::new(palette);
        self
    }

    /// Builds the first chart.
    ///
    /// Reads the surface identity once, then performs a full build. Fails
    /// with [`ChartError::Configuration`] when the declared inputs have neither flat
    /// series nor datasets; no chart exists afterwards in that case.
    pub fn initialize(&mut self) -> ChartResult<()> {
        self.surface_id = self.surface.identity().map(str::to_owned);
        self.initialized = true;
        if !self.spec.has_data_source() {
            return Err(ChartError::Configuration {
                kind: self.spec.kind,
            });
        }
        self.rebuild()
    }

    /// Destroys the live chart and drops its registry entry. No-op when no
    /// chart is live.
    pub fn teardown(&mut self) {
        let Some(chart) = self.live.take() else {
            return;
        };
        chart.borrow_mut().destroy();
        if let (Some(id), Some(registry)) = (self.surface_id.as_deref(), self.registry.as_ref()) {
            registry.unregister_handle(id, &chart);
        }
        debug!(surface_id = ?self.surface_id, "chart torn down");
    }

    #[must_use]
    pub fn spec(&self) -> &ChartSpec {
        &self.spec
    }

    #[must_use]
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Current live chart, if any.
    #[must_use]
    pub fn chart(&self) -> Option<SharedChart<B>> {
        self.live.clone()
    }

    #[must_use]
    pub fn has_chart(&self) -> bool {
        self.live.is_some()
    }

    /// Surface identity captured by [`ChartEngine::initialize`].
    #[must_use]
    pub fn surface_id(&self) -> Option<&str> {
        self.surface_id.as_deref()
    }

    #[must_use]
    pub fn surface(&self) -> &Surface<B::Context> {
        &self.surface
    }

    #[must_use]
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Hover and click events emitted since the last call.
    #[must_use]
    pub fn drain_events(&self) -> Vec<ChartEvent> {
        self.events.drain()
    }

    /// Runs `f` against the live chart, if any.
    pub(super) fn with_chart<T>(&self, f: impl FnOnce(&mut B::Handle) -> T) -> Option<T> {
        self.live.as_ref().map(|chart| f(&mut chart.borrow_mut()))
    }
}

impl<B: ChartBackend> Drop for ChartEngine<B> {
    fn drop(&mut self) {
        self.teardown();
    }
}
