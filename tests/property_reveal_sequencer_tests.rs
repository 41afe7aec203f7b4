use proptest::prelude::*;
use scrolly_charts::api::{ChartKind, RevealSequencer};

fn chart_kind() -> impl Strategy<Value = ChartKind> {
    prop_oneof![
        Just(ChartKind::Budget),
        Just(ChartKind::Crime),
        Just(ChartKind::Clearance),
    ]
}

proptest! {
    #[test]
    fn settled_state_matches_last_entered_step(
        kind in chart_kind(),
        visits in proptest::collection::vec((0usize..7, 0.0f64..1_500.0), 1..24)
    ) {
        let mut sequencer = RevealSequencer::new(kind);
        let mut now_ms = 0.0;
        let mut last_step = None;

        for (raw_step, elapsed_ms) in visits {
            let step = raw_step % kind.step_count();
            now_ms += elapsed_ms;
            sequencer.enter_step(step, now_ms).expect("enter");
            last_step = Some(step);

            sequencer.tick(now_ms + elapsed_ms / 2.0);
            for (_, opacity) in sequencer.current_state().iter() {
                prop_assert!((-1e-12..=1.0 + 1e-12).contains(&opacity));
            }
        }

        let step = last_step.expect("at least one visit");
        sequencer.settle();
        prop_assert_eq!(
            &sequencer.current_state(),
            sequencer.target_state(step).expect("target")
        );
        prop_assert_eq!(sequencer.active_step(), Some(step));
    }

    #[test]
    fn history_does_not_change_the_destination(
        kind in chart_kind(),
        detour in proptest::collection::vec(0usize..7, 0..12),
        target in 0usize..7
    ) {
        let target = target % kind.step_count();

        let mut direct = RevealSequencer::new(kind);
        direct.enter_step(target, 0.0).expect("direct");
        direct.settle();

        let mut winding = RevealSequencer::new(kind);
        for (index, step) in detour.iter().enumerate() {
            winding
                .enter_step(step % kind.step_count(), index as f64 * 100.0)
                .expect("detour");
        }
        winding.enter_step(target, 10_000.0).expect("winding");
        winding.tick(20_000.0);

        prop_assert!(!winding.is_animating());
        prop_assert_eq!(winding.current_state(), direct.current_state());
    }
}
