use crate::core::SeriesPoint;
use crate::data::{CRIME_DATASET, CrimeRecord};
use crate::error::ChartResult;
use crate::render::SeriesKey;

use super::chart_scene_builder::{
    EndLabelAnchor, SeriesSpec, ValueDomain, assemble_chart, max_defined,
};
use super::{ChartBuildContext, ChartHandle, ChartKind, ZeroBasedChartOptions};

/// Builds the registered-crime chart (total, violent, property).
///
/// Vandalism counts are parsed with the dataset but not drawn.
pub fn build_crime_chart(
    records: &[CrimeRecord],
    ctx: &ChartBuildContext<'_>,
    options: ZeroBasedChartOptions,
) -> ChartResult<ChartHandle> {
    let palette = ctx.palette;
    let years: Vec<i32> = records.iter().map(|record| record.year).collect();
    let points = |value: fn(&CrimeRecord) -> Option<u64>| -> Vec<SeriesPoint> {
        records
            .iter()
            .map(|record| {
                SeriesPoint::new(f64::from(record.year), value(record).map(count_to_f64))
            })
            .collect()
    };

    let series = vec![
        SeriesSpec {
            key: SeriesKey::Total,
            legend_label: "Totaal",
            color: palette.dark,
            dashed_legend: false,
            anchor: EndLabelAnchor::LastDefined,
            points: points(|record| record.total),
        },
        SeriesSpec {
            key: SeriesKey::Violent,
            legend_label: "Geweld",
            color: palette.tertiary,
            dashed_legend: false,
            anchor: EndLabelAnchor::LastDefined,
            points: points(|record| record.violent),
        },
        SeriesSpec {
            key: SeriesKey::Property,
            legend_label: "Vermogen",
            color: palette.primary,
            dashed_legend: false,
            anchor: EndLabelAnchor::LastDefined,
            points: points(|record| record.property),
        },
    ];

    let domain = ValueDomain {
        floor: 0.0,
        max: max_defined(records.iter().map(|record| record.total.map(count_to_f64))),
        headroom: options.headroom,
    };

    assemble_chart(
        ChartKind::Crime,
        CRIME_DATASET,
        ctx,
        &years,
        domain,
        series,
        false,
    )
}

fn count_to_f64(count: u64) -> f64 {
    count as f64
}
