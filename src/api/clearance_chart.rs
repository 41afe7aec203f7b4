use crate::core::SeriesPoint;
use crate::data::{CLEARANCE_DATASET, ClearanceRecord};
use crate::error::ChartResult;
use crate::render::SeriesKey;

use super::chart_scene_builder::{
    EndLabelAnchor, SeriesSpec, ValueDomain, assemble_chart, max_defined,
};
use super::{ChartBuildContext, ChartHandle, ChartKind, ZeroBasedChartOptions};

/// Builds the clearance-rate chart (total, property, violent, in percent).
pub fn build_clearance_chart(
    records: &[ClearanceRecord],
    ctx: &ChartBuildContext<'_>,
    options: ZeroBasedChartOptions,
) -> ChartResult<ChartHandle> {
    let palette = ctx.palette;
    let years: Vec<i32> = records.iter().map(|record| record.year).collect();
    let points = |value: fn(&ClearanceRecord) -> Option<f64>| -> Vec<SeriesPoint> {
        records
            .iter()
            .map(|record| SeriesPoint::new(f64::from(record.year), value(record)))
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
            key: SeriesKey::Property,
            legend_label: "Vermogen",
            color: palette.primary,
            dashed_legend: false,
            anchor: EndLabelAnchor::LastDefined,
            points: points(|record| record.property),
        },
        SeriesSpec {
            key: SeriesKey::Violent,
            legend_label: "Geweld",
            color: palette.tertiary,
            dashed_legend: false,
            anchor: EndLabelAnchor::LastDefined,
            points: points(|record| record.violent),
        },
    ];

    let domain = ValueDomain {
        floor: 0.0,
        max: max_defined(
            records
                .iter()
                .flat_map(|record| [record.total, record.property, record.violent]),
        ),
        headroom: options.headroom,
    };

    assemble_chart(
        ChartKind::Clearance,
        CLEARANCE_DATASET,
        ctx,
        &years,
        domain,
        series,
        false,
    )
}
