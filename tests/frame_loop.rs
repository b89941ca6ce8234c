//! Drives the frame clock and the uniform synchronizer together the way the
//! browser loop does: render ticks, rotation timer ticks and input events
//! interleaved on one logical thread.

#![cfg(not(target_arch = "wasm32"))]

use sphere_grid_wasm::clock::FrameClock;
use sphere_grid_wasm::uniforms::{Adjust, Axis, Synchronizer, UniformSet, UniformSink, OFFSET_STEP};

#[derive(Default)]
struct Recorder {
    pushes: Vec<UniformSet>,
}

impl UniformSink for Recorder {
    fn apply(&mut self, set: &UniformSet) {
        self.pushes.push(*set);
    }
}

#[test]
fn simulated_session_keeps_all_invariants() {
    let mut clock = FrameClock::new(0.0);
    let mut sync = Synchronizer::new(Recorder::default());

    let mut now_ms = 0.0;
    let mut expected_elapsed = 0.0;
    for frame in 0..600 {
        // 60 Hz with an occasional long frame from a busy main thread.
        now_ms += if frame % 97 == 0 { 250.0 } else { 16.0 };
        expected_elapsed += clock.tick(now_ms);

        // Rotation timer fires about once per frame at this cadence.
        sync.rotation_tick();

        // Sporadic user input.
        match frame {
            100 => sync.nudge_offset(-OFFSET_STEP, 0.0, 0.0),
            200 => sync.nudge_offset(0.0, OFFSET_STEP, 0.0),
            300 => sync.adjust_bounds(Axis::X, Adjust::By(1)),
            400 => sync.adjust_bounds(Axis::X, Adjust::Reset),
            _ => {}
        }

        let set = sync.set();
        assert!(set.bounds.iter().all(|&b| b >= 1));
        assert!(set.rotation.iter().all(|&r| (0..360).contains(&r)));
        assert!(clock.smoothed_rate().is_finite());
    }

    assert!((clock.elapsed() - expected_elapsed).abs() < 1.0e-9);
    assert_eq!(sync.set().offset, [-0.5, 0.5, 0.0]);
    assert_eq!(sync.set().bounds[0], 1);
    // 600 ticks of +2 from 44: (44 + 1200) mod 360.
    assert_eq!(sync.set().rotation[2], (44 + 1200) % 360);
}

#[test]
fn every_push_carries_the_full_set() {
    let mut sync = Synchronizer::new(Recorder::default());
    sync.adjust_bounds(Axis::Y, Adjust::By(2));
    sync.set_space(7);

    let recorder = sync.into_sink();
    let last = recorder.pushes.last().unwrap();
    // Fields untouched by the last mutation still arrive with it.
    assert_eq!(last.bounds, [3, 5, 3]);
    assert_eq!(last.space, 7);
    assert_eq!(last.rotation, [45, 45, 44]);
    assert_eq!(last.offset, [0.0, 0.0, 0.0]);
}
