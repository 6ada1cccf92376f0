//! Reconciliation engine: keeps a live chart in sync with declared inputs.

mod change_set;
mod chart_builder;
mod data_controller;
mod engine;
mod instance_registry;
mod reconcile;

pub use change_set::{
    AddOperation, ApplyReport, Change, ChangeSet, Diagnostic, RemoveDirection, RemoveOperation,
    ShapeSource,
};
pub use data_controller::{append_chart_data, refresh_chart_datasets, remove_chart_data};
pub use engine::{ChartEngine, SharedChart};
pub use instance_registry::InstanceRegistry;
