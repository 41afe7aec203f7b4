use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::data::Datasets;
use crate::error::{ChartError, ChartResult};
use crate::render::{LayerId, LayeredRenderFrame, Renderer, SvgRenderer};

use super::scroll::{StepBox, StepEvent, StepEvents, StepObserver};
use super::sequencer::{RevealSequencer, StepOutcome};
use super::{
    ArticleConfig, ChartBuildContext, ChartHandle, ChartKind, EndLabel, build_budget_chart,
    build_clearance_chart, build_crime_chart,
};

/// One chart with its own sequencer and scroll observer.
#[derive(Debug, Clone)]
struct ArticleChart {
    handle: ChartHandle,
    sequencer: RevealSequencer,
    observer: StepObserver,
}

impl ArticleChart {
    fn new(handle: ChartHandle, offset: f64) -> ChartResult<Self> {
        let sequencer = RevealSequencer::new(handle.kind());
        let observer = StepObserver::new(offset, Vec::new())?;
        let mut chart = Self {
            handle,
            sequencer,
            observer,
        };
        chart.sync_frame();
        Ok(chart)
    }

    fn sync_frame(&mut self) {
        self.sequencer.apply_to(self.handle.frame_mut());
    }
}

/// The whole scroll-driven article: three charts, each with its reveal
/// sequencer and step observer.
///
/// Charts share no state; events for one chart never touch another.
#[derive(Debug, Clone)]
pub struct Article {
    config: ArticleConfig,
    budget: ArticleChart,
    crime: ArticleChart,
    clearance: ArticleChart,
}

impl Article {
    pub fn new(datasets: &Datasets, config: ArticleConfig) -> ChartResult<Self> {
        config.validate()?;
        let context = |kind: ChartKind| ChartBuildContext {
            viewport: config.viewports.get(kind),
            palette: &config.palette,
            layout: &config.layout,
        };
        let offset = config.scroll.offset;

        let budget = build_budget_chart(
            &datasets.budget,
            &context(ChartKind::Budget),
            &config.budget,
        )?;
        let crime = build_crime_chart(&datasets.crime, &context(ChartKind::Crime), config.crime)?;
        let clearance = build_clearance_chart(
            &datasets.clearance,
            &context(ChartKind::Clearance),
            config.clearance,
        )?;

        let article = Self {
            budget: ArticleChart::new(budget, offset)?,
            crime: ArticleChart::new(crime, offset)?,
            clearance: ArticleChart::new(clearance, offset)?,
            config,
        };
        debug!(
            budget_layers = article.budget.handle.frame().layers.len(),
            crime_layers = article.crime.handle.frame().layers.len(),
            clearance_layers = article.clearance.handle.frame().layers.len(),
            "article initialized"
        );
        Ok(article)
    }

    /// Loads the three datasets named in `config` and builds the article.
    pub fn load(config: ArticleConfig) -> ChartResult<Self> {
        let datasets = Datasets::load(&config.data, &config.columns, config.numeric_policy)?;
        Self::new(&datasets, config)
    }

    #[must_use]
    pub fn config(&self) -> &ArticleConfig {
        &self.config
    }

    #[must_use]
    pub fn chart(&self, kind: ChartKind) -> &ChartHandle {
        &self.entry(kind).handle
    }

    #[must_use]
    pub fn sequencer(&self, kind: ChartKind) -> &RevealSequencer {
        &self.entry(kind).sequencer
    }

    #[must_use]
    pub fn observer(&self, kind: ChartKind) -> &StepObserver {
        &self.entry(kind).observer
    }

    #[must_use]
    pub fn frame(&self, kind: ChartKind) -> &LayeredRenderFrame {
        self.entry(kind).handle.frame()
    }

    /// Re-measures the chart's step boxes; chart geometry is left as built.
    ///
    /// At most one box per narrative step is accepted, so every step the
    /// observer can report has a reveal-table row.
    pub fn on_resize(&mut self, kind: ChartKind, boxes: Vec<StepBox>) -> ChartResult<()> {
        if boxes.len() > kind.step_count() {
            return Err(ChartError::InvalidData(format!(
                "chart `{}` has {} steps but {} step boxes were measured",
                kind.name(),
                kind.step_count(),
                boxes.len()
            )));
        }
        self.entry_mut(kind).observer.resize(boxes)
    }

    /// Feeds a scroll position to the chart's observer and routes the
    /// resulting exit/enter events into its sequencer.
    pub fn on_scroll(
        &mut self,
        kind: ChartKind,
        scroll_top: f64,
        viewport_height: f64,
        now_ms: f64,
    ) -> ChartResult<StepEvents> {
        let chart = self.entry_mut(kind);
        let events = chart.observer.on_scroll(scroll_top, viewport_height);
        for event in &events {
            match *event {
                StepEvent::Exit { step, .. } => {
                    chart.sequencer.exit_step(step);
                }
                StepEvent::Enter { step, .. } => {
                    chart.sequencer.enter_step(step, now_ms)?;
                }
            }
        }
        chart.sync_frame();
        Ok(events)
    }

    pub fn enter_step(
        &mut self,
        kind: ChartKind,
        step: usize,
        now_ms: f64,
    ) -> ChartResult<StepOutcome> {
        let chart = self.entry_mut(kind);
        let outcome = chart.sequencer.enter_step(step, now_ms)?;
        chart.sync_frame();
        Ok(outcome)
    }

    pub fn exit_step(&mut self, kind: ChartKind, step: usize) -> bool {
        self.entry_mut(kind).sequencer.exit_step(step)
    }

    /// Advances every chart's transitions; returns how many are still running.
    pub fn tick(&mut self, now_ms: f64) -> usize {
        let mut running = 0;
        for chart in self.entries_mut() {
            running += chart.sequencer.tick(now_ms);
            chart.sync_frame();
        }
        running
    }

    /// Finishes every running transition immediately.
    pub fn settle(&mut self) {
        for chart in self.entries_mut() {
            chart.sequencer.settle();
            chart.sync_frame();
        }
    }

    pub fn render<R: Renderer>(&self, kind: ChartKind, renderer: &mut R) -> ChartResult<()> {
        renderer.render(self.frame(kind))
    }

    pub fn render_svg(&self, kind: ChartKind) -> ChartResult<String> {
        let mut renderer = SvgRenderer::new();
        self.render(kind, &mut renderer)?;
        Ok(renderer.into_document())
    }

    #[must_use]
    pub fn snapshot(&self) -> ArticleSnapshot {
        let charts = ChartKind::ALL
            .iter()
            .map(|&kind| {
                let chart = self.entry(kind);
                ChartSnapshot {
                    kind,
                    active_step: chart.sequencer.active_step(),
                    animating: chart.sequencer.is_animating(),
                    opacities: chart
                        .handle
                        .frame()
                        .layers
                        .iter()
                        .map(|layer| (layer.layer, layer.opacity))
                        .collect(),
                    end_labels: chart
                        .handle
                        .series()
                        .iter()
                        .filter_map(|series| series.end_label.clone())
                        .collect(),
                }
            })
            .collect();
        ArticleSnapshot { charts }
    }

    fn entry(&self, kind: ChartKind) -> &ArticleChart {
        match kind {
            ChartKind::Budget => &self.budget,
            ChartKind::Crime => &self.crime,
            ChartKind::Clearance => &self.clearance,
        }
    }

    fn entry_mut(&mut self, kind: ChartKind) -> &mut ArticleChart {
        match kind {
            ChartKind::Budget => &mut self.budget,
            ChartKind::Crime => &mut self.crime,
            ChartKind::Clearance => &mut self.clearance,
        }
    }

    fn entries_mut(&mut self) -> [&mut ArticleChart; 3] {
        [&mut self.budget, &mut self.crime, &mut self.clearance]
    }
}

/// Serializable view of one chart's reveal progress.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSnapshot {
    pub kind: ChartKind,
    pub active_step: Option<usize>,
    pub animating: bool,
    pub opacities: IndexMap<LayerId, f64>,
    pub end_labels: Vec<EndLabel>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArticleSnapshot {
    pub charts: Vec<ChartSnapshot>,
}

impl ArticleSnapshot {
    #[must_use]
    pub fn chart(&self, kind: ChartKind) -> Option<&ChartSnapshot> {
        self.charts.iter().find(|chart| chart.kind == kind)
    }

    pub fn to_json_pretty(&self) -> ChartResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
