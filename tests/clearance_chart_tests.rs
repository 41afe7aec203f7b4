use std::path::Path;

use approx::assert_relative_eq;
use scrolly_charts::api::{
    ArticleConfig, BrandPalette, ChartBuildContext, ChartLayout, build_clearance_chart,
};
use scrolly_charts::core::Viewport;
use scrolly_charts::data::{
    ClearanceColumns, ClearanceRecord, NumericPolicy, RawTable, transform_clearance,
};
use scrolly_charts::render::{LayerId, SeriesKey};
use scrolly_charts::{ChartError, ChartHandle};

fn fixture_clearance() -> Vec<ClearanceRecord> {
    let path =
        Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/Ophelderingspercentage.csv");
    let table = RawTable::load(&path).expect("fixture table");
    transform_clearance(&table, &ClearanceColumns::default(), NumericPolicy::Lenient)
        .expect("fixture records")
}

fn build(records: &[ClearanceRecord]) -> Result<ChartHandle, ChartError> {
    let palette = BrandPalette::default();
    let layout = ChartLayout::default();
    let ctx = ChartBuildContext {
        viewport: Viewport::new(900, 520),
        palette: &palette,
        layout: &layout,
    };
    build_clearance_chart(records, &ctx, ArticleConfig::default().clearance)
}

#[test]
fn clearance_domain_covers_every_series() {
    let handle = build(&fixture_clearance()).expect("chart");
    let (low, high) = handle.y_scale().domain();
    assert_eq!(low, 0.0);
    assert_relative_eq!(high, 63.2 * 1.2);
}

#[test]
fn violent_label_falls_back_to_last_reported_year() {
    let handle = build(&fixture_clearance()).expect("chart");

    let violent = handle.end_label(SeriesKey::Violent).expect("violent");
    assert_eq!(violent.year, 2022);
    assert_eq!(violent.text, "57,3%");

    let path = &handle.series_layer(SeriesKey::Violent).expect("series").path;
    let (end_x, _) = path.last_point().expect("end");
    assert_relative_eq!(end_x, 612.5);

    let total = handle.end_label(SeriesKey::Total).expect("total");
    assert_eq!(total.year, 2023);
    assert_eq!(total.text, "21,8%");
}

#[test]
fn percent_axis_labels_have_no_decimals() {
    let handle = build(&fixture_clearance()).expect("chart");
    let labels: Vec<&str> = handle
        .frame()
        .layer(LayerId::YAxis)
        .expect("y axis")
        .texts
        .iter()
        .map(|text| text.text.as_str())
        .collect();
    assert!(!labels.is_empty());
    assert!(labels.iter().all(|label| label.ends_with('%')));
    assert!(labels.iter().all(|label| !label.contains('.')));
}

#[test]
fn series_colors_follow_the_palette() {
    let palette = BrandPalette::default();
    let handle = build(&fixture_clearance()).expect("chart");
    let stroke = |key| {
        handle
            .frame()
            .layer(LayerId::Line(key))
            .and_then(|layer| layer.paths.first())
            .and_then(|path| path.stroke)
            .map(|stroke| stroke.color)
            .expect("stroke")
    };
    assert_eq!(stroke(SeriesKey::Total), palette.dark);
    assert_eq!(stroke(SeriesKey::Property), palette.primary);
    assert_eq!(stroke(SeriesKey::Violent), palette.tertiary);
}

#[test]
fn fully_missing_series_draws_nothing() {
    let records: Vec<ClearanceRecord> = fixture_clearance()
        .into_iter()
        .map(|record| ClearanceRecord {
            violent: None,
            ..record
        })
        .collect();
    let handle = build(&records).expect("chart");
    let layer = handle
        .frame()
        .layer(LayerId::Line(SeriesKey::Violent))
        .expect("layer");
    assert!(layer.paths.is_empty());
    assert!(layer.texts.is_empty());
    assert!(handle.end_label(SeriesKey::Violent).is_none());
}

#[test]
fn all_missing_values_still_build_a_unit_domain() {
    let records = [ClearanceRecord {
        year: 2020,
        total: None,
        property: None,
        violent: None,
    }];
    let handle = build(&records).expect("chart");
    assert_eq!(handle.y_scale().domain(), (0.0, 1.0));
}
