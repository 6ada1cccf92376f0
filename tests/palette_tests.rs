use chart_sync::core::{ChartKind, DEFAULT_COLORS, DefaultPalette, PaletteProvider, base_color};
use serde_json::{Value, json};

fn per_point_len(value: Option<&Value>) -> Option<usize> {
    value.and_then(Value::as_array).map(Vec::len)
}

#[test]
fn line_and_radar_share_one_color_per_series() {
    for kind in [ChartKind::Line, ChartKind::Radar] {
        let style = DefaultPalette.colors_for(kind, 1, 40);
        assert_eq!(
            style.get("backgroundColor"),
            Some(&json!("rgba(54,162,235,0.4)"))
        );
        assert_eq!(style.get("borderColor"), Some(&json!("rgba(54,162,235,1)")));
        assert_eq!(style.get("pointBorderColor"), Some(&json!("#fff")));
        assert_eq!(
            style.get("pointHoverBorderColor"),
            Some(&json!("rgba(54,162,235,0.8)"))
        );
    }
}

#[test]
fn bar_style_uses_hover_variants() {
    let style = DefaultPalette.colors_for(ChartKind::Bar, 0, 3);
    let keys: Vec<&str> = style.iter().map(|(key, _)| key.as_str()).collect();
    assert_eq!(
        keys,
        vec![
            "backgroundColor",
            "borderColor",
            "hoverBackgroundColor",
            "hoverBorderColor"
        ]
    );
    assert_eq!(
        style.get("backgroundColor"),
        Some(&json!("rgba(255,99,132,0.6)"))
    );
}

#[test]
fn pie_like_kinds_color_every_point() {
    for kind in [ChartKind::Pie, ChartKind::Doughnut, ChartKind::PolarArea] {
        assert!(kind.colors_per_point());
        let style = DefaultPalette.colors_for(kind, 3, 5);
        assert_eq!(per_point_len(style.get("backgroundColor")), Some(5));
    }

    let pie = DefaultPalette.colors_for(ChartKind::Pie, 0, 2);
    assert_eq!(pie.get("borderColor"), Some(&json!("#fff")));

    let polar = DefaultPalette.colors_for(ChartKind::PolarArea, 0, 2);
    assert_eq!(
        polar.get("borderColor"),
        Some(&json!(["rgba(255,99,132,1)", "rgba(54,162,235,1)"]))
    );
}

#[test]
fn palette_is_deterministic_beyond_default_table() {
    let index = DEFAULT_COLORS.len() + 7;
    assert_eq!(
        DefaultPalette.colors_for(ChartKind::Bar, index, 1),
        DefaultPalette.colors_for(ChartKind::Bar, index, 1)
    );
    assert_eq!(base_color(index), base_color(index));
    assert_eq!(
        DefaultPalette.colors_for(ChartKind::Doughnut, 0, 30),
        DefaultPalette.colors_for(ChartKind::Doughnut, 9, 30)
    );
}

#[test]
fn empty_series_gets_empty_point_colors() {
    let style = DefaultPalette.colors_for(ChartKind::Pie, 0, 0);
    assert_eq!(per_point_len(style.get("backgroundColor")), Some(0));
}
