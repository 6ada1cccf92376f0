use std::cell::RefCell;
use std::collections::HashSet;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::core::ChartKind;
use crate::error::{ChartError, ChartResult};

/// Read-only state snapshot passed to plugin hooks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PluginContext {
    pub kind: ChartKind,
    pub labels_len: usize,
    pub datasets_len: usize,
}

/// Live-chart lifecycle events delivered to plugins by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PluginEvent {
    Installed,
    Redrawn,
    Destroyed,
}

/// Extension hook interface attached to a single chart instance.
///
/// Plugins observe events and read chart context; they never mutate the
/// chart data directly.
pub trait ChartPlugin {
    fn id(&self) -> &str;
    fn on_event(&mut self, event: PluginEvent, context: PluginContext);
}

pub type SharedPlugin = Rc<RefCell<dyn ChartPlugin>>;

/// Rejects empty and duplicate plugin ids.
pub fn validate_plugins(plugins: &[SharedPlugin]) -> ChartResult<()> {
    let mut seen = HashSet::with_capacity(plugins.len());
    for plugin in plugins {
        let plugin_id = plugin.borrow().id().to_owned();
        if plugin_id.is_empty() {
            return Err(ChartError::InvalidPlugin(
                "plugin id must not be empty".to_owned(),
            ));
        }
        if !seen.insert(plugin_id.clone()) {
            return Err(ChartError::InvalidPlugin(format!(
                "plugin with id `{plugin_id}` is listed more than once"
            )));
        }
    }
    Ok(())
}
