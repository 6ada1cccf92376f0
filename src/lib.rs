//! chart-sync: keeps declarative chart inputs in sync with a live chart.
//!
//! The crate sits between a host UI (which owns the declared inputs and
//! notices when they change) and a plotting library (which owns the mutable
//! chart object). Every batch of input changes is turned into the smallest
//! correct mutation: an in-place field update, an incremental append/remove,
//! or a destroy-then-rebuild of the chart.

pub mod api;
pub mod core;
pub mod error;
pub mod extensions;
pub mod interaction;
pub mod render;
pub mod telemetry;

pub use api::{ChangeSet, ChartEngine, InstanceRegistry};
pub use error::{ChartError, ChartResult};
