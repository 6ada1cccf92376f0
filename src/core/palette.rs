//! Default dataset styling.
//!
//! Line-like kinds get one color per series; pie, doughnut and polar-area
//! charts get one color per point since every slice is its own category.

use serde_json::Value;

use crate::core::{ChartKind, StyleAttributes};

/// Maps (chart kind, series index, point count) to style attributes.
///
/// Implementations must be pure: the normalizer calls them for every dataset
/// on every rebuild and data refresh.
pub trait PaletteProvider {
    fn colors_for(&self, kind: ChartKind, index: usize, point_count: usize) -> StyleAttributes;
}

impl<F> PaletteProvider for F
where
    F: Fn(ChartKind, usize, usize) -> StyleAttributes,
{
    fn colors_for(&self, kind: ChartKind, index: usize, point_count: usize) -> StyleAttributes {
        self(kind, index, point_count)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
}

impl Rgb {
    #[must_use]
    pub const fn new(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }

    /// CSS `rgba(...)` string understood by the plotting library.
    #[must_use]
    pub fn rgba(self, alpha: f64) -> String {
        format!("rgba({},{},{},{})", self.red, self.green, self.blue, alpha)
    }
}

pub const DEFAULT_COLORS: [Rgb; 12] = [
    Rgb::new(255, 99, 132),
    Rgb::new(54, 162, 235),
    Rgb::new(255, 206, 86),
    Rgb::new(231, 233, 237),
    Rgb::new(75, 192, 192),
    Rgb::new(151, 187, 205),
    Rgb::new(220, 220, 220),
    Rgb::new(247, 70, 74),
    Rgb::new(70, 191, 189),
    Rgb::new(253, 180, 92),
    Rgb::new(148, 159, 177),
    Rgb::new(77, 83, 96),
];

const WHITE: &str = "#fff";

/// Base color for a series or point index. Indices past the default table
/// get a generated color that is stable for the index.
#[must_use]
pub fn base_color(index: usize) -> Rgb {
    if let Some(color) = DEFAULT_COLORS.get(index) {
        return *color;
    }
    let mixed = splitmix64(index as u64);
    let [red, green, blue, ..] = mixed.to_le_bytes();
    Rgb::new(red, green, blue)
}

fn splitmix64(seed: u64) -> u64 {
    let mut z = seed.wrapping_add(0x9E37_79B9_7F4A_7C15);
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

/// Built-in palette matching the plotting library's usual look.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DefaultPalette;

impl PaletteProvider for DefaultPalette {
    fn colors_for(&self, kind: ChartKind, index: usize, point_count: usize) -> StyleAttributes {
        match kind {
            ChartKind::PolarArea => polar_area_style(point_count),
            kind if kind.colors_per_point() => pie_style(point_count),
            ChartKind::Bar => bar_style(base_color(index)),
            _ => line_style(base_color(index)),
        }
    }
}

fn line_style(color: Rgb) -> StyleAttributes {
    StyleAttributes::new()
        .with("backgroundColor", color.rgba(0.4))
        .with("borderColor", color.rgba(1.0))
        .with("pointBackgroundColor", color.rgba(1.0))
        .with("pointBorderColor", WHITE)
        .with("pointHoverBackgroundColor", WHITE)
        .with("pointHoverBorderColor", color.rgba(0.8))
}

fn bar_style(color: Rgb) -> StyleAttributes {
    StyleAttributes::new()
        .with("backgroundColor", color.rgba(0.6))
        .with("borderColor", color.rgba(1.0))
        .with("hoverBackgroundColor", color.rgba(0.8))
        .with("hoverBorderColor", color.rgba(1.0))
}

fn per_point(point_count: usize, alpha: f64) -> Value {
    Value::Array(
        (0..point_count)
            .map(|index| Value::String(base_color(index).rgba(alpha)))
            .collect(),
    )
}

fn pie_style(point_count: usize) -> StyleAttributes {
    StyleAttributes::new()
        .with("backgroundColor", per_point(point_count, 0.6))
        .with("borderColor", WHITE)
        .with("pointBackgroundColor", per_point(point_count, 1.0))
        .with("pointBorderColor", WHITE)
        .with("pointHoverBackgroundColor", per_point(point_count, 1.0))
        .with("pointHoverBorderColor", per_point(point_count, 0.8))
}

fn polar_area_style(point_count: usize) -> StyleAttributes {
    StyleAttributes::new()
        .with("backgroundColor", per_point(point_count, 0.6))
        .with("borderColor", per_point(point_count, 1.0))
        .with("hoverBackgroundColor", per_point(point_count, 0.8))
        .with("hoverBorderColor", per_point(point_count, 1.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rgba_formats_integral_alpha_without_fraction() {
        assert_eq!(Rgb::new(1, 2, 3).rgba(1.0), "rgba(1,2,3,1)");
        assert_eq!(Rgb::new(1, 2, 3).rgba(0.4), "rgba(1,2,3,0.4)");
    }

    #[test]
    fn per_point_arrays_follow_chart_kind() {
        for kind in ChartKind::ALL {
            let style = DefaultPalette.colors_for(kind, 0, 3);
            let per_point = style.get("backgroundColor").is_some_and(Value::is_array);
            assert_eq!(per_point, kind.colors_per_point(), "{kind}");
        }
    }

    #[test]
    fn generated_colors_are_stable_per_index() {
        assert_eq!(base_color(40), base_color(40));
        assert_eq!(base_color(0), DEFAULT_COLORS[0]);
    }
}
