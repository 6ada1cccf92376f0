mod headless;

use std::fmt;

pub use headless::{BackendCall, BackendLog, HeadlessBackend, HeadlessChart};

use crate::core::{ChartKind, ChartOptions, Dataset};
use crate::error::ChartResult;
use crate::extensions::SharedPlugin;

/// Mutable data arrays of a live chart.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ChartData {
    pub labels: Vec<String>,
    pub datasets: Vec<Dataset>,
}

/// Everything the plotting library needs to construct one chart.
#[derive(Clone)]
pub struct ChartConfig {
    pub kind: ChartKind,
    pub data: ChartData,
    pub options: ChartOptions,
    pub plugins: Vec<SharedPlugin>,
}

impl fmt::Debug for ChartConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChartConfig")
            .field("kind", &self.kind)
            .field("data", &self.data)
            .field("options", &self.options)
            .field("plugins", &self.plugins.len())
            .finish()
    }
}

/// Drawing target: a backend-specific drawing context plus an optional
/// identity used to index the chart in an instance registry.
#[derive(Debug, Clone)]
pub struct Surface<C> {
    context: C,
    identity: Option<String>,
}

impl<C> Surface<C> {
    #[must_use]
    pub fn new(context: C) -> Self {
        Self {
            context,
            identity: None,
        }
    }

    #[must_use]
    pub fn with_identity(mut self, identity: impl Into<String>) -> Self {
        self.identity = Some(identity.into());
        self
    }

    #[must_use]
    pub fn context(&self) -> &C {
        &self.context
    }

    /// Surface identity; an empty identity counts as none.
    #[must_use]
    pub fn identity(&self) -> Option<&str> {
        self.identity.as_deref().filter(|id| !id.is_empty())
    }
}

/// Live rendering object owned by the plotting library.
///
/// Data and options are edited in place; `redraw` makes edits visible.
pub trait LiveChart {
    fn kind(&self) -> ChartKind;
    fn data(&self) -> &ChartData;
    fn data_mut(&mut self) -> &mut ChartData;
    fn options(&self) -> &ChartOptions;
    fn options_mut(&mut self) -> &mut ChartOptions;
    fn redraw(&mut self);
    /// Releases the rendering resources bound to the surface.
    fn destroy(&mut self);
}

/// Contract implemented by any plotting library adapter.
pub trait ChartBackend {
    type Context;
    type Handle: LiveChart;

    fn create(&mut self, context: &Self::Context, config: ChartConfig)
    -> ChartResult<Self::Handle>;
}
