use tracing::debug;

use crate::core::{BandPoint, SeriesPoint, project_band_geometry};
use crate::data::{BUDGET_DATASET, BudgetRecord};
use crate::error::ChartResult;
use crate::render::{LayerId, PathPrimitive, SeriesKey, TextHAlign, TextPrimitive};

use super::chart_scene_builder::{
    EndLabelAnchor, SeriesSpec, ValueDomain, assemble_chart, max_defined,
};
use super::{BudgetChartOptions, ChartBuildContext, ChartHandle, ChartKind};

/// Builds the police budget chart: budgeted, actual and inflation-only lines,
/// the band between budgeted and inflation, and the band annotation.
pub fn build_budget_chart(
    records: &[BudgetRecord],
    ctx: &ChartBuildContext<'_>,
    options: &BudgetChartOptions,
) -> ChartResult<ChartHandle> {
    let palette = ctx.palette;
    let years: Vec<i32> = records.iter().map(|record| record.year).collect();
    let points = |value: fn(&BudgetRecord) -> Option<f64>| -> Vec<SeriesPoint> {
        records
            .iter()
            .map(|record| SeriesPoint::new(f64::from(record.year), value(record)))
            .collect()
    };

    let series = vec![
        SeriesSpec {
            key: SeriesKey::Budgeted,
            legend_label: "Begroting",
            color: palette.primary,
            dashed_legend: false,
            anchor: EndLabelAnchor::SecondToLastRecord,
            points: points(|record| record.budgeted),
        },
        SeriesSpec {
            key: SeriesKey::Actual,
            legend_label: "Realisatie",
            color: palette.secondary,
            dashed_legend: false,
            anchor: EndLabelAnchor::LastDefined,
            points: points(|record| record.actual),
        },
        SeriesSpec {
            key: SeriesKey::Inflation,
            legend_label: "Inflatie (2015)",
            color: palette.tertiary,
            dashed_legend: true,
            anchor: EndLabelAnchor::SecondToLastRecord,
            points: points(|record| record.inflation_adjusted),
        },
    ];

    let domain = ValueDomain {
        floor: options.value_floor,
        max: max_defined(
            records
                .iter()
                .flat_map(|record| [record.budgeted, record.actual]),
        ),
        headroom: options.headroom,
    };

    let mut handle = assemble_chart(
        ChartKind::Budget,
        BUDGET_DATASET,
        ctx,
        &years,
        domain,
        series,
        true,
    )?;
    let x_scale = handle.x_scale();
    let y_scale = handle.y_scale();

    let band_points: Vec<BandPoint> = records
        .iter()
        .map(|record| {
            BandPoint::new(
                f64::from(record.year),
                record.budgeted,
                record.inflation_adjusted,
            )
        })
        .collect();
    let band = project_band_geometry(&band_points, x_scale, y_scale)?;
    for polygon in &band.polygons {
        handle.frame_mut().push_path(
            LayerId::ShadedArea,
            PathPrimitive::filled(polygon.clone(), palette.primary, options.band_fill_opacity),
        );
    }
    handle.set_band(band);

    let annotation = &options.annotation;
    let anchor = records
        .iter()
        .find(|record| record.year == annotation.year)
        .and_then(|record| Some((record.budgeted?, record.inflation_adjusted?)));
    match anchor {
        Some((budgeted, inflation)) if !annotation.text.is_empty() => {
            let x = x_scale.domain_to_pixel(f64::from(annotation.year))?;
            let y =
                (y_scale.domain_to_pixel(budgeted)? + y_scale.domain_to_pixel(inflation)?) / 2.0;
            handle.frame_mut().push_text(
                LayerId::Annotation,
                TextPrimitive::new(
                    annotation.text.clone(),
                    x,
                    y,
                    annotation.font_px,
                    palette.primary,
                    TextHAlign::Center,
                )
                .bold(),
            );
        }
        _ => debug!(year = annotation.year, "budget annotation omitted"),
    }

    handle.frame().validate()?;
    Ok(handle)
}

#[cfg(test)]
mod tests {
    use super::build_budget_chart;
    use crate::api::{BrandPalette, BudgetChartOptions, ChartBuildContext, ChartLayout};
    use crate::core::Viewport;
    use crate::data::BudgetRecord;
    use crate::render::LayerId;

    fn record(year: i32, budgeted: Option<f64>, inflation: Option<f64>) -> BudgetRecord {
        BudgetRecord {
            year,
            budgeted,
            actual: budgeted,
            inflation_adjusted: inflation,
        }
    }

    #[test]
    fn annotation_is_omitted_when_inflation_is_missing() {
        let palette = BrandPalette::default();
        let layout = ChartLayout::default();
        let ctx = ChartBuildContext {
            viewport: Viewport::new(900, 520),
            palette: &palette,
            layout: &layout,
        };
        let records = [
            record(2019, Some(6_000_000.0), Some(5_500_000.0)),
            record(2020, Some(6_500_000.0), None),
            record(2021, Some(7_000_000.0), Some(5_800_000.0)),
        ];
        let handle =
            build_budget_chart(&records, &ctx, &BudgetChartOptions::default()).expect("chart");
        let annotation = handle.frame().layer(LayerId::Annotation).expect("layer");
        assert!(annotation.texts.is_empty());
        // The 2020 gap splits the band into two single-sample runs.
        assert_eq!(handle.band().map(|band| band.polygons.len()), Some(2));
    }
}
