use approx::assert_relative_eq;
use scrolly_charts::ChartError;
use scrolly_charts::api::{
    ChartKind, Easing, RevealSequencer, RevealTable, reveal_state, transition_duration_ms,
};
use scrolly_charts::core::{Margins, PlotArea, Viewport};
use scrolly_charts::render::{LayerId, LayeredRenderFrame, SeriesKey, canonical_layer_stack};

fn visible(kind: ChartKind, step: usize) -> Vec<String> {
    reveal_state(kind, step)
        .expect("state")
        .visible_layers()
        .map(|layer| layer.to_string())
        .collect()
}

#[test]
fn budget_steps_build_up_the_story() {
    assert!(visible(ChartKind::Budget, 0).is_empty());
    assert!(visible(ChartKind::Budget, 1).is_empty());
    assert_eq!(
        visible(ChartKind::Budget, 2),
        vec!["grid", "x-axis", "y-axis", "line-budgeted", "legend-budgeted"]
    );
    assert_eq!(visible(ChartKind::Budget, 3), visible(ChartKind::Budget, 2));
    assert!(visible(ChartKind::Budget, 4).contains(&"line-inflation".to_owned()));
    assert!(!visible(ChartKind::Budget, 4).contains(&"shaded-area".to_owned()));

    let band_step = visible(ChartKind::Budget, 5);
    assert!(band_step.contains(&"shaded-area".to_owned()));
    assert!(band_step.contains(&"annotation".to_owned()));
    assert!(!band_step.contains(&"line-actual".to_owned()));

    let last = reveal_state(ChartKind::Budget, 6).expect("state");
    assert!(last.iter().all(|(_, opacity)| opacity == 1.0));
}

#[test]
fn crime_final_step_holds_previous_state() {
    assert_eq!(
        reveal_state(ChartKind::Crime, 4).expect("step 4"),
        reveal_state(ChartKind::Crime, 3).expect("step 3")
    );
    assert_eq!(
        visible(ChartKind::Crime, 2),
        vec!["line-total", "line-violent", "legend-total", "legend-violent"]
    );
}

#[test]
fn clearance_focus_step_dims_other_lines() {
    let state = reveal_state(ChartKind::Clearance, 2).expect("state");
    assert_eq!(state.opacity(LayerId::Line(SeriesKey::Total)), Some(0.3));
    assert_eq!(state.opacity(LayerId::Line(SeriesKey::Violent)), Some(0.3));
    assert_eq!(state.opacity(LayerId::Line(SeriesKey::Property)), Some(1.0));
    assert_eq!(state.opacity(LayerId::Legend(SeriesKey::Violent)), Some(1.0));
}

#[test]
fn unknown_step_is_an_error() {
    let mut sequencer = RevealSequencer::new(ChartKind::Crime);
    let err = sequencer.enter_step(5, 0.0).expect_err("out of range");
    assert!(matches!(
        err,
        ChartError::UnknownStep {
            chart: "crime",
            step: 5,
            step_count: 5
        }
    ));
    assert_eq!(sequencer.active_step(), None);
}

#[test]
fn durations_follow_chart_and_step() {
    assert_eq!(transition_duration_ms(ChartKind::Budget, 0), 800.0);
    assert_eq!(transition_duration_ms(ChartKind::Budget, 3), 1000.0);
    assert_eq!(transition_duration_ms(ChartKind::Crime, 2), 800.0);
    let table = RevealTable::for_chart(ChartKind::Budget);
    assert_eq!(table.step(6).expect("step").duration_ms, 1000.0);
}

#[test]
fn entered_step_converges_to_its_target() {
    let mut sequencer = RevealSequencer::new(ChartKind::Budget);
    sequencer.enter_step(5, 0.0).expect("enter");
    assert!(sequencer.is_animating());

    assert_eq!(sequencer.tick(500.0), 9);
    let halfway = sequencer
        .opacity(LayerId::ShadedArea)
        .expect("band opacity");
    assert_relative_eq!(halfway, 0.5);

    assert_eq!(sequencer.tick(1_000.0), 0);
    assert_eq!(
        &sequencer.current_state(),
        sequencer.target_state(5).expect("target")
    );
}

#[test]
fn stepping_back_reverts_the_extra_layers() {
    let mut sequencer = RevealSequencer::new(ChartKind::Crime);
    sequencer.enter_step(3, 0.0).expect("step 3");
    sequencer.settle();

    let outcome = sequencer.enter_step(2, 1_000.0).expect("step 2");
    assert_eq!(
        outcome.started.as_slice(),
        &[
            LayerId::Line(SeriesKey::Property),
            LayerId::Legend(SeriesKey::Property)
        ]
    );
    sequencer.settle();
    assert_eq!(
        sequencer.opacity(LayerId::Line(SeriesKey::Property)),
        Some(0.0)
    );

    sequencer.enter_step(3, 2_000.0).expect("step 3 again");
    sequencer.settle();
    assert_eq!(
        &sequencer.current_state(),
        sequencer.target_state(3).expect("target")
    );
}

#[test]
fn preempted_transition_restarts_from_interpolated_value() {
    let mut sequencer = RevealSequencer::with_easing(ChartKind::Crime, Easing::Linear);
    sequencer.enter_step(1, 0.0).expect("step 1");

    let outcome = sequencer.enter_step(0, 400.0).expect("step 0");
    assert!(outcome.started.contains(&LayerId::Line(SeriesKey::Total)));
    assert_relative_eq!(
        sequencer
            .opacity(LayerId::Line(SeriesKey::Total))
            .expect("opacity"),
        0.5
    );

    sequencer.tick(800.0);
    assert_relative_eq!(
        sequencer
            .opacity(LayerId::Line(SeriesKey::Total))
            .expect("opacity"),
        0.25
    );
    sequencer.tick(1_200.0);
    assert_eq!(
        sequencer.opacity(LayerId::Line(SeriesKey::Total)),
        Some(0.0)
    );
    assert!(!sequencer.is_animating());
}

#[test]
fn reentering_a_settled_step_starts_nothing() {
    let mut sequencer = RevealSequencer::new(ChartKind::Clearance);
    sequencer.enter_step(1, 0.0).expect("enter");
    sequencer.settle();
    let outcome = sequencer.enter_step(1, 5_000.0).expect("again");
    assert!(outcome.started.is_empty());
    assert_eq!(outcome.kept, 0);
    assert!(!sequencer.is_animating());
}

#[test]
fn exit_only_clears_the_matching_step() {
    let mut sequencer = RevealSequencer::new(ChartKind::Budget);
    sequencer.enter_step(2, 0.0).expect("enter");
    assert!(!sequencer.exit_step(1));
    assert!(sequencer.is_active(2));
    assert!(sequencer.exit_step(2));
    assert_eq!(sequencer.active_step(), None);
    // Exit does not revert layer opacities.
    sequencer.settle();
    assert_eq!(sequencer.opacity(LayerId::Grid), Some(1.0));
}

#[test]
fn apply_leaves_static_axes_alone() {
    let viewport = Viewport::new(900, 520);
    let plot = PlotArea::inside(viewport, Margins::default()).expect("plot");
    let stack = canonical_layer_stack(
        &[SeriesKey::Total, SeriesKey::Violent, SeriesKey::Property],
        false,
    );
    let mut frame = LayeredRenderFrame::from_stack(viewport, plot, &stack, 0.0);
    frame.set_opacity(LayerId::Grid, 1.0);

    let mut sequencer = RevealSequencer::new(ChartKind::Crime);
    sequencer.enter_step(1, 0.0).expect("enter");
    sequencer.settle();
    sequencer.apply_to(&mut frame);

    assert_eq!(frame.opacity(LayerId::Grid), Some(1.0));
    assert_eq!(frame.opacity(LayerId::XAxis), Some(0.0));
    assert_eq!(frame.opacity(LayerId::Line(SeriesKey::Total)), Some(1.0));
    assert_eq!(frame.opacity(LayerId::Line(SeriesKey::Violent)), Some(0.0));
}
