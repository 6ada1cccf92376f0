//! Inline plugins handed to the plotting library at build time.

pub mod plugins;

pub use plugins::{ChartPlugin, PluginContext, PluginEvent, SharedPlugin, validate_plugins};
