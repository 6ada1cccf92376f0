pub mod normalizer;
pub mod options;
pub mod palette;
pub mod spec;
pub mod types;

pub use normalizer::{DatasetNormalizer, dataset_points, datasets_from_series};
pub use options::ChartOptions;
pub use palette::{DEFAULT_COLORS, DefaultPalette, PaletteProvider, Rgb, base_color};
pub use spec::ChartSpec;
pub use types::{ChartKind, DataPoint, Dataset, SeriesData, StyleAttributes, Viewport};
