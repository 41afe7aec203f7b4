use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};
use crate::render::{LayerId, SeriesKey};

use super::ChartKind;

/// Target opacity of every revealable layer of a chart for one step.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RevealState {
    layers: IndexMap<LayerId, f64>,
}

impl RevealState {
    #[must_use]
    pub fn hidden(layers: &[LayerId]) -> Self {
        Self {
            layers: layers.iter().map(|&layer| (layer, 0.0)).collect(),
        }
    }

    #[must_use]
    pub fn opacity(&self, layer: LayerId) -> Option<f64> {
        self.layers.get(&layer).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (LayerId, f64)> + '_ {
        self.layers.iter().map(|(&layer, &opacity)| (layer, opacity))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.layers.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    /// Layers with a non-zero target.
    pub fn visible_layers(&self) -> impl Iterator<Item = LayerId> + '_ {
        self.iter()
            .filter(|&(_, opacity)| opacity > 0.0)
            .map(|(layer, _)| layer)
    }

    fn apply(&mut self, action: &RevealAction) {
        match action {
            RevealAction::HideAll => {
                for opacity in self.layers.values_mut() {
                    *opacity = 0.0;
                }
            }
            RevealAction::Keep => {}
            RevealAction::Set(writes) => {
                for &(layer, opacity) in *writes {
                    if let Some(target) = self.layers.get_mut(&layer) {
                        *target = opacity;
                    }
                }
            }
        }
    }
}

impl FromIterator<(LayerId, f64)> for RevealState {
    fn from_iter<I: IntoIterator<Item = (LayerId, f64)>>(iter: I) -> Self {
        Self {
            layers: iter.into_iter().collect(),
        }
    }
}

/// What entering a step does on top of the previous step.
#[derive(Debug, Clone, Copy)]
enum RevealAction {
    HideAll,
    Keep,
    Set(&'static [(LayerId, f64)]),
}

const BUDGET_ACTIONS: [RevealAction; 7] = [
    RevealAction::HideAll,
    RevealAction::Keep,
    RevealAction::Set(&[
        (LayerId::Grid, 1.0),
        (LayerId::XAxis, 1.0),
        (LayerId::YAxis, 1.0),
        (LayerId::Line(SeriesKey::Budgeted), 1.0),
        (LayerId::Legend(SeriesKey::Budgeted), 1.0),
    ]),
    RevealAction::Keep,
    RevealAction::Set(&[
        (LayerId::Line(SeriesKey::Inflation), 1.0),
        (LayerId::Legend(SeriesKey::Inflation), 1.0),
    ]),
    RevealAction::Set(&[(LayerId::ShadedArea, 1.0), (LayerId::Annotation, 1.0)]),
    RevealAction::Set(&[
        (LayerId::Line(SeriesKey::Actual), 1.0),
        (LayerId::Legend(SeriesKey::Actual), 1.0),
    ]),
];

const CRIME_ACTIONS: [RevealAction; 5] = [
    RevealAction::HideAll,
    RevealAction::Set(&[
        (LayerId::Line(SeriesKey::Total), 1.0),
        (LayerId::Legend(SeriesKey::Total), 1.0),
    ]),
    RevealAction::Set(&[
        (LayerId::Line(SeriesKey::Violent), 1.0),
        (LayerId::Legend(SeriesKey::Violent), 1.0),
    ]),
    RevealAction::Set(&[
        (LayerId::Line(SeriesKey::Property), 1.0),
        (LayerId::Legend(SeriesKey::Property), 1.0),
    ]),
    RevealAction::Keep,
];

const CLEARANCE_ACTIONS: [RevealAction; 3] = [
    RevealAction::HideAll,
    RevealAction::Set(&[
        (LayerId::Line(SeriesKey::Total), 1.0),
        (LayerId::Line(SeriesKey::Property), 1.0),
        (LayerId::Line(SeriesKey::Violent), 1.0),
        (LayerId::Legend(SeriesKey::Total), 1.0),
        (LayerId::Legend(SeriesKey::Property), 1.0),
        (LayerId::Legend(SeriesKey::Violent), 1.0),
    ]),
    RevealAction::Set(&[
        (LayerId::Line(SeriesKey::Total), 0.3),
        (LayerId::Line(SeriesKey::Violent), 0.3),
        (LayerId::Line(SeriesKey::Property), 1.0),
    ]),
];

fn actions(kind: ChartKind) -> &'static [RevealAction] {
    match kind {
        ChartKind::Budget => &BUDGET_ACTIONS,
        ChartKind::Crime => &CRIME_ACTIONS,
        ChartKind::Clearance => &CLEARANCE_ACTIONS,
    }
}

/// Layers whose opacity is driven by the step sequence.
#[must_use]
pub fn revealable_layers(kind: ChartKind) -> Vec<LayerId> {
    let series: &[SeriesKey] = match kind {
        ChartKind::Budget => &[SeriesKey::Budgeted, SeriesKey::Actual, SeriesKey::Inflation],
        ChartKind::Crime => &[SeriesKey::Total, SeriesKey::Violent, SeriesKey::Property],
        ChartKind::Clearance => &[SeriesKey::Total, SeriesKey::Property, SeriesKey::Violent],
    };
    let mut layers = Vec::with_capacity(series.len() * 2 + 5);
    if kind.reveals_axes() {
        layers.extend([LayerId::Grid, LayerId::XAxis, LayerId::YAxis]);
    }
    if kind == ChartKind::Budget {
        layers.extend([LayerId::ShadedArea, LayerId::Annotation]);
    }
    layers.extend(series.iter().copied().map(LayerId::Line));
    layers.extend(series.iter().copied().map(LayerId::Legend));
    layers
}

/// Fade duration used when entering `step`.
#[must_use]
pub fn transition_duration_ms(kind: ChartKind, step: usize) -> f64 {
    match (kind, step) {
        (ChartKind::Budget, 0) => 800.0,
        (ChartKind::Budget, _) => 1000.0,
        (ChartKind::Crime | ChartKind::Clearance, _) => 800.0,
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RevealStep {
    pub state: RevealState,
    pub duration_ms: f64,
}

/// Precomputed `(chart, step) -> RevealState` lookup.
///
/// Each row is cumulative: it lists a target for every revealable layer, so
/// entering a step yields the same state whatever step came before.
#[derive(Debug, Clone, PartialEq)]
pub struct RevealTable {
    kind: ChartKind,
    steps: Vec<RevealStep>,
}

impl RevealTable {
    #[must_use]
    pub fn for_chart(kind: ChartKind) -> Self {
        let mut state = RevealState::hidden(&revealable_layers(kind));
        let steps = actions(kind)
            .iter()
            .enumerate()
            .map(|(step, action)| {
                state.apply(action);
                RevealStep {
                    state: state.clone(),
                    duration_ms: transition_duration_ms(kind, step),
                }
            })
            .collect();
        Self { kind, steps }
    }

    #[must_use]
    pub fn kind(&self) -> ChartKind {
        self.kind
    }

    #[must_use]
    pub fn step_count(&self) -> usize {
        self.steps.len()
    }

    pub fn step(&self, step: usize) -> ChartResult<&RevealStep> {
        self.steps.get(step).ok_or(ChartError::UnknownStep {
            chart: self.kind.name(),
            step,
            step_count: self.steps.len(),
        })
    }

    pub fn state(&self, step: usize) -> ChartResult<&RevealState> {
        self.step(step).map(|row| &row.state)
    }
}

/// Target state of `kind` at `step`.
pub fn reveal_state(kind: ChartKind, step: usize) -> ChartResult<RevealState> {
    RevealTable::for_chart(kind).state(step).cloned()
}

#[cfg(test)]
mod tests {
    use super::{RevealTable, revealable_layers};
    use crate::api::ChartKind;
    use crate::render::{LayerId, SeriesKey};

    #[test]
    fn tables_cover_every_step() {
        for kind in ChartKind::ALL {
            let table = RevealTable::for_chart(kind);
            assert_eq!(table.step_count(), kind.step_count());
            let layers = revealable_layers(kind);
            for step in 0..table.step_count() {
                let state = table.state(step).expect("state");
                assert_eq!(state.len(), layers.len());
            }
        }
    }

    #[test]
    fn crime_axes_are_not_revealable() {
        let layers = revealable_layers(ChartKind::Crime);
        assert!(!layers.contains(&LayerId::Grid));
        assert!(layers.contains(&LayerId::Legend(SeriesKey::Property)));
    }

    #[test]
    fn out_of_range_step_is_rejected() {
        let table = RevealTable::for_chart(ChartKind::Clearance);
        assert!(table.step(3).is_err());
    }
}
