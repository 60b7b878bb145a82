//! Tests for the step history and frame replay

use cyclotron_core::tests::test_helpers::{engine_after, snapshot};
use cyclotron_core::{EngineError, SimulationParameters, TrajectoryEngine};

#[test]
fn test_one_record_per_sub_step() {
    let params = SimulationParameters {
        steps_per_tick: 7,
        ..SimulationParameters::default()
    };
    let engine = engine_after(&params, 5);
    assert_eq!(engine.history_len(), 35);
}

#[test]
fn test_prefix_invariant() {
    let params = SimulationParameters::default();
    let engine = engine_after(&params, 60);
    let len = engine.history_len();
    let last = engine.replay(len as isize - 1).unwrap();

    for k in 0..len {
        let record = engine.replay(k as isize).unwrap();
        assert_eq!(record.index, k);
        assert_eq!(record.trajectory_x.len(), k + 1);
        assert_eq!(record.trajectory_y.len(), k + 1);
        assert_eq!(record.trajectory_x, &last.trajectory_x[..=k]);
        assert_eq!(record.trajectory_y, &last.trajectory_y[..=k]);
        assert_eq!(record.trajectory_x[k], record.position.x);
        assert_eq!(record.trajectory_y[k], record.position.y);
    }
}

#[test]
fn test_step_returns_last_record_of_batch() {
    let params = SimulationParameters::default();
    let mut engine = TrajectoryEngine::new();
    engine.begin(&params);
    engine.step(&params);

    let (index, position) = {
        let outcome = engine.step(&params);
        (outcome.record.index, outcome.record.position)
    };

    assert_eq!(index, 5);
    assert_eq!(position, engine.state().pos);
    assert_eq!(engine.replay(5).unwrap().position, position);
}

#[test]
fn test_replay_fidelity() {
    let params = SimulationParameters::default();
    let mut engine = TrajectoryEngine::new();
    engine.begin(&params);

    let mut seen = Vec::new();
    for _ in 0..100 {
        let outcome = engine.step(&params);
        seen.push((
            outcome.record.index,
            outcome.record.position,
            outcome.record.gap_direction,
            outcome.record.trajectory_x.to_vec(),
        ));
    }
    engine.stop();

    for (index, position, direction, xs) in seen {
        let replayed = engine.replay(index as isize).unwrap();
        assert_eq!(replayed.position, position);
        assert_eq!(replayed.gap_direction, direction);
        assert_eq!(replayed.trajectory_x, xs.as_slice());
    }
}

#[test]
fn test_replay_does_not_mutate_state() {
    let params = SimulationParameters::default();
    let engine = engine_after(&params, 20);
    let state = *engine.state();
    let before = snapshot(&engine);

    for k in 0..engine.history_len() {
        engine.replay(k as isize).unwrap();
    }

    assert_eq!(*engine.state(), state);
    assert_eq!(snapshot(&engine), before);
}

#[test]
fn test_replay_out_of_range_on_empty_history() {
    let engine = TrajectoryEngine::new();
    assert_eq!(
        engine.replay(0).unwrap_err(),
        EngineError::IndexOutOfRange { index: 0, len: 0 }
    );
    assert_eq!(
        engine.replay(-1).unwrap_err(),
        EngineError::IndexOutOfRange { index: -1, len: 0 }
    );
}

#[test]
fn test_replay_bounds_for_any_length() {
    let params = SimulationParameters::default();
    for batches in [1, 2, 10] {
        let engine = engine_after(&params, batches);
        let len = engine.history_len();

        assert!(engine.replay(0).is_ok());
        assert!(engine.replay(len as isize - 1).is_ok());
        assert_eq!(
            engine.replay(len as isize).unwrap_err(),
            EngineError::IndexOutOfRange {
                index: len as isize,
                len
            }
        );
        assert!(matches!(
            engine.replay(-1),
            Err(EngineError::IndexOutOfRange { index: -1, .. })
        ));
    }
}

#[test]
fn test_in_gap_matches_direction() {
    let params = SimulationParameters::default();
    let engine = engine_after(&params, 300);
    let mut saw_gap = false;
    let mut saw_field = false;
    for record in engine.history().iter() {
        if record.in_gap() {
            saw_gap = true;
            assert_ne!(record.gap_direction.signum(), 0);
        } else {
            saw_field = true;
            assert_eq!(record.gap_direction.signum(), 0);
        }
    }
    assert!(saw_gap && saw_field);
}
