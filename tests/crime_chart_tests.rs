use std::path::Path;

use approx::assert_relative_eq;
use scrolly_charts::ChartError;
use scrolly_charts::api::{
    ArticleConfig, BrandPalette, ChartBuildContext, ChartKind, ChartLayout, build_crime_chart,
};
use scrolly_charts::core::Viewport;
use scrolly_charts::data::{CrimeColumns, CrimeRecord, NumericPolicy, RawTable, transform_crime};
use scrolly_charts::render::{LayerId, SeriesKey};

fn fixture_crime() -> Vec<CrimeRecord> {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/Misdrijven.csv");
    let table = RawTable::load(&path).expect("fixture table");
    transform_crime(&table, &CrimeColumns::default(), NumericPolicy::Lenient)
        .expect("fixture records")
}

fn build(records: &[CrimeRecord]) -> Result<scrolly_charts::ChartHandle, ChartError> {
    let palette = BrandPalette::default();
    let layout = ChartLayout::default();
    let ctx = ChartBuildContext {
        viewport: Viewport::new(900, 520),
        palette: &palette,
        layout: &layout,
    };
    build_crime_chart(records, &ctx, ArticleConfig::default().crime)
}

#[test]
fn crime_domain_is_zero_based_with_headroom_over_total() {
    let handle = build(&fixture_crime()).expect("chart");
    assert_eq!(handle.kind(), ChartKind::Crime);
    let (low, high) = handle.y_scale().domain();
    assert_eq!(low, 0.0);
    assert_relative_eq!(high, 1_030_000.0 * 1.1);
    assert_eq!(handle.x_scale().domain(), (2015.0, 2024.0));
}

#[test]
fn axes_are_static_and_series_start_hidden() {
    let handle = build(&fixture_crime()).expect("chart");
    let frame = handle.frame();
    for layer in [LayerId::Grid, LayerId::XAxis, LayerId::YAxis] {
        assert_eq!(frame.opacity(layer), Some(1.0), "{layer}");
    }
    for key in [SeriesKey::Total, SeriesKey::Violent, SeriesKey::Property] {
        assert_eq!(frame.opacity(LayerId::Line(key)), Some(0.0));
        assert_eq!(frame.opacity(LayerId::Legend(key)), Some(0.0));
    }
    assert!(frame.layer(LayerId::ShadedArea).is_none());
    assert!(frame.layer(LayerId::Annotation).is_none());
}

#[test]
fn value_axis_uses_thousands_labels() {
    let handle = build(&fixture_crime()).expect("chart");
    let labels: Vec<&str> = handle
        .frame()
        .layer(LayerId::YAxis)
        .expect("y axis")
        .texts
        .iter()
        .map(|text| text.text.as_str())
        .collect();
    assert!(labels.contains(&"0k"));
    assert!(labels.contains(&"200k"));
    assert!(labels.contains(&"1000k"));

    let years: Vec<&str> = handle
        .frame()
        .layer(LayerId::XAxis)
        .expect("x axis")
        .texts
        .iter()
        .map(|text| text.text.as_str())
        .collect();
    assert!(years.contains(&"2015"));
    assert!(years.iter().all(|year| !year.contains('.') && !year.contains(',')));
}

#[test]
fn end_labels_use_dutch_grouping() {
    let handle = build(&fixture_crime()).expect("chart");
    let total = handle.end_label(SeriesKey::Total).expect("total");
    assert_eq!(total.year, 2024);
    assert_eq!(total.text, "805.000");
    let property = handle.end_label(SeriesKey::Property).expect("property");
    assert_eq!(property.text, "426.000");
    let violent = handle.end_label(SeriesKey::Violent).expect("violent");
    assert_eq!(violent.text, "92.000");
}

#[test]
fn legend_order_follows_series_order() {
    let handle = build(&fixture_crime()).expect("chart");
    let legend_text = |key| {
        handle
            .frame()
            .layer(LayerId::Legend(key))
            .and_then(|layer| layer.texts.first())
            .map(|text| (text.text.clone(), text.y))
            .expect("legend")
    };
    assert_eq!(legend_text(SeriesKey::Total), ("Totaal".to_owned(), 25.0));
    assert_eq!(legend_text(SeriesKey::Violent), ("Geweld".to_owned(), 50.0));
    assert_eq!(legend_text(SeriesKey::Property), ("Vermogen".to_owned(), 75.0));
}

#[test]
fn empty_crime_is_rejected() {
    assert!(matches!(
        build(&[]),
        Err(ChartError::EmptyDataset { dataset: "crime" })
    ));
}

#[test]
fn missing_counts_split_the_line_instead_of_dropping_years() {
    let record = |year, total, violent| CrimeRecord {
        year,
        total,
        violent,
        property: Some(400_000),
        vandalism: None,
    };
    let records = [
        record(2015, Some(1_000_000), Some(100_000)),
        record(2016, None, Some(95_000)),
        record(2017, Some(900_000), Some(90_000)),
    ];
    let handle = build(&records).expect("chart");

    assert_eq!(handle.x_scale().domain(), (2015.0, 2017.0));
    let total = handle.series_layer(SeriesKey::Total).expect("total");
    assert_eq!(total.path.subpaths.len(), 2);
    let violent = handle.series_layer(SeriesKey::Violent).expect("violent");
    assert_eq!(violent.path.subpaths.len(), 1);
    assert_eq!(handle.end_label(SeriesKey::Total).expect("label").year, 2017);
}
