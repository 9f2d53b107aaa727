use klondike_app::driver::{DriverConfig, GameOutcome, play_seeded};

fn quiet(max_steps: usize) -> DriverConfig {
    DriverConfig {
        max_steps,
        quiet: true,
    }
}

#[test]
fn a_spread_of_seeds_plays_to_a_clean_ending() {
    for seed in 0u64..10 {
        let (report, state) = play_seeded(seed, &quiet(500)).expect("engine stays consistent");
        assert_eq!(report.seed, seed, "seed {seed} echoed back");
        assert_eq!(
            report.promoted,
            state.promoted_count(),
            "seed {seed} promoted tally"
        );
        assert!(report.promoted <= 52, "seed {seed} promoted bound");
        match report.outcome {
            GameOutcome::Won => assert!(state.is_won(), "seed {seed} won with full foundations"),
            GameOutcome::Stuck | GameOutcome::StepLimit => {
                assert!(!state.is_won(), "seed {seed} ended with an unfinished table")
            }
        }
    }
}

#[test]
fn replaying_a_seed_reproduces_the_report() {
    let (first, first_state) = play_seeded(3, &quiet(500)).expect("first run");
    let (second, second_state) = play_seeded(3, &quiet(500)).expect("second run");
    assert_eq!(first.outcome, second.outcome);
    assert_eq!(first.steps, second.steps);
    assert_eq!(first.promoted, second.promoted);
    assert_eq!(first_state, second_state);
}

#[test]
fn the_step_cap_bounds_every_run() {
    for seed in 0u64..5 {
        let (report, _state) = play_seeded(seed, &quiet(25)).expect("capped run");
        assert!(report.steps <= 25, "seed {seed} stayed within the cap");
    }
}
