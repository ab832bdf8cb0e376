// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Integration tests for the clock synchronizer: long-run convergence
//! against a server running at an off-nominal rate, and snap behavior on
//! stream discontinuities.

use approx::assert_relative_eq;
use nocturne_world::GlobalClock;

/// The authoritative game time of a server running at `rate`, anchored so
/// the first sample is well away from zero.
fn server_time(now: f64, rate: f64) -> f64 {
    100.0 + now * rate
}

#[test]
fn test_converges_on_off_nominal_server_rate() {
    // Local clock starts at rate 1.0; the server actually runs at 1.2 and
    // reports once a second. Ticks run at 10 Hz for 3000 simulated seconds.
    let true_rate = 1.2;
    let mut clock = GlobalClock::new(0.0, 1.0);
    clock.receive(0.0, server_time(0.0, true_rate), true);

    let mut last_target = clock.target_rate();
    let mut now = 0.0;
    for step in 1..=30_000u32 {
        now = f64::from(step) * 0.1;
        clock.tick(now, 0.1);

        // The applied rate may lead the target to close the gap, but never
        // by more than the 10% headroom plus one tick's worth of step.
        assert!(
            clock.current_rate() <= clock.target_rate() * 1.1 + 0.003,
            "rate ran past headroom at t={now}: {} vs target {}",
            clock.current_rate(),
            clock.target_rate()
        );

        if step % 10 == 0 {
            clock.receive(now, server_time(now, true_rate), true);
            // Every observation is at the true rate, so the blended target
            // only ever moves toward it.
            assert!(clock.target_rate() >= last_target - 1e-12);
            assert!(clock.target_rate() <= true_rate + 1e-9);
            last_target = clock.target_rate();
        }
    }

    // The target estimate has converged and the applied rate has settled
    // around it.
    assert_relative_eq!(clock.target_rate(), true_rate, epsilon = 1e-3);
    assert!(
        (clock.current_rate() - true_rate).abs() < 0.05,
        "applied rate {} has not settled near {true_rate}",
        clock.current_rate()
    );

    // Local time tracks the authoritative projection closely.
    let gap = clock.projected(now) - clock.time();
    assert!(gap.abs() < 10.0, "residual gap {gap} too large");
}

#[test]
fn test_local_time_never_jumps_during_convergence() {
    let mut clock = GlobalClock::new(0.0, 1.0);
    clock.receive(0.0, server_time(0.0, 1.2), true);

    let mut prev_time = clock.time();
    for step in 1..=5_000u32 {
        let now = f64::from(step) * 0.1;
        clock.tick(now, 0.1);
        if step % 10 == 0 {
            clock.receive(now, server_time(now, 1.2), true);
        }
        // Monotone, and bounded by the fastest admissible rate for a 0.1s
        // tick (headroom over a target that never exceeds 1.2).
        let advance = clock.time() - prev_time;
        assert!(advance >= 0.0);
        assert!(advance <= 1.2 * 1.1 * 0.1 + 0.001, "jump of {advance}");
        prev_time = clock.time();
    }
}

#[test]
fn test_reconnection_sized_jump_snaps_exactly() {
    let mut clock = GlobalClock::new(0.0, 1.0);
    clock.receive(0.0, 100.0, true);
    for step in 1..=100u32 {
        clock.tick(f64::from(step) * 0.1, 0.1);
    }

    // A sample more than 500 units away abandons smoothing entirely.
    clock.receive(10.0, 5000.0, true);
    assert_relative_eq!(clock.time(), 5000.0);

    // The rate estimate is untouched by the snap.
    assert_relative_eq!(clock.target_rate(), 1.0);
}

#[test]
fn test_non_incremental_stream_snaps_even_when_close() {
    let mut clock = GlobalClock::new(0.0, 1.0);
    clock.receive(0.0, 100.0, true);
    clock.tick(0.5, 0.5);

    clock.receive(1.0, 101.0, false);
    assert_relative_eq!(clock.time(), 101.0);
}
