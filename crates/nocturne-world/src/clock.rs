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

//! The global clock synchronizer.
//!
//! Reconciles a locally free-running simulation clock with an authoritative
//! server clock delivered sporadically and out of band. The local clock
//! advances every tick at a damped, adjustable rate; the rate is steered so
//! local time converges on a projection of the authoritative time without
//! visible jumps, and snaps outright only on genuine discontinuities
//! (first sample, non-incremental stream, reconnection-sized gaps).
//!
//! All methods take `now` in monotonic wall-clock seconds so the render and
//! network threads share one time base; [`WallClock`] supplies it in
//! production.

use std::time::Instant;

/// Proportional gain applied to the gap between local time and the
/// authoritative projection.
const GAP_GAIN: f64 = 0.001;
/// Upper bound on the gap-proportional rate step per wall-clock second.
const GAP_STEP_CAP: f64 = 0.02;
/// Constant rate pull toward the target rate per wall-clock second.
const RATE_PULL: f64 = 0.002;
/// The applied rate may not run past this ratio of the target rate.
const RATE_HEADROOM: f64 = 1.1;
/// Authoritative samples further than this from the previous one indicate a
/// discontinuity and snap instead of blending.
const SNAP_THRESHOLD: f64 = 500.0;
/// Samples must advance by more than this before they update the target
/// rate estimate.
const MIN_ADVANCE: f64 = 1.0;
/// Per-second-of-elapsed-time weight of a new rate observation.
const BLEND_GAIN: f64 = 0.01;
/// Maximum weight of a single rate observation.
const BLEND_CAP: f64 = 0.5;

/// The nominal game-time rate: game seconds per wall-clock second.
pub const NOMINAL_RATE: f64 = 3.0;

/// Reconciles local render time with sporadic authoritative time samples.
///
/// Two time scales: local time advances monotonically each
/// [`tick`](GlobalClock::tick) by the wall-clock delta scaled by the
/// currently applied rate; the authoritative time arrives through
/// [`receive`](GlobalClock::receive). Between samples the authoritative
/// clock is extrapolated at the target rate, and the applied rate is nudged
/// toward closing the gap, bounded per tick so the rate cannot change
/// abruptly.
#[derive(Debug, Clone)]
pub struct GlobalClock {
    /// Local game time, advanced every tick.
    gtime: f64,
    /// The last authoritative sample.
    sgtime: f64,
    /// Wall-clock seconds at the last authoritative sample.
    epoch: f64,
    /// Estimated true game-time rate, blended from observed samples.
    target_rate: f64,
    /// The rate currently applied to local time.
    current_rate: f64,
}

impl GlobalClock {
    /// Creates a clock at game time zero with the given nominal rate.
    #[must_use]
    pub fn new(now: f64, nominal_rate: f64) -> Self {
        Self {
            gtime: 0.0,
            sgtime: 0.0,
            epoch: now,
            target_rate: nominal_rate,
            current_rate: nominal_rate,
        }
    }

    /// Creates a clock with the standard [`NOMINAL_RATE`].
    #[must_use]
    pub fn standard(now: f64) -> Self {
        Self::new(now, NOMINAL_RATE)
    }

    /// Advances local time by the elapsed wall-clock delta `dt` and steers
    /// the applied rate.
    ///
    /// Two corrective terms act on the rate each tick: a gap-proportional
    /// nudge toward the extrapolated authoritative time, capped at
    /// [`GAP_STEP_CAP`] per second and suppressed once the rate is more than
    /// 10% past the target, and a constant pull back toward the target rate
    /// so the rate recovers to nominal even when the gap is small.
    pub fn tick(&mut self, now: f64, dt: f64) {
        let projected = self.sgtime + (now - self.epoch) * self.target_rate;

        self.gtime += dt * self.current_rate;
        if (projected > self.gtime) && (self.current_rate / self.target_rate < RATE_HEADROOM) {
            self.current_rate += ((projected - self.gtime) * GAP_GAIN).min(GAP_STEP_CAP) * dt;
        } else if (projected < self.gtime) && (self.target_rate / self.current_rate < RATE_HEADROOM)
        {
            self.current_rate -= ((self.gtime - projected) * GAP_GAIN).min(GAP_STEP_CAP) * dt;
        }

        // Constant pull, clamped so it never crosses the target.
        let pull = RATE_PULL * dt;
        if self.current_rate < self.target_rate {
            self.current_rate = (self.current_rate + pull).min(self.target_rate);
        } else if self.current_rate > self.target_rate {
            self.current_rate = (self.current_rate - pull).max(self.target_rate);
        }
    }

    /// Feeds an authoritative time sample.
    ///
    /// Snaps local time directly to `sample`, with no smoothing, when this is
    /// the first sample ever, when the stream is non-incremental, or when
    /// the sample jumped by more than [`SNAP_THRESHOLD`] (reconnection or a
    /// server time-of-day change). Otherwise, if the sample advanced by a
    /// non-trivial amount, the observed rate (advance over elapsed wall
    /// time) is blended into the target rate with a weight that grows with
    /// elapsed time, capped at [`BLEND_CAP`].
    pub fn receive(&mut self, now: f64, sample: f64, incremental: bool) {
        let delta = now - self.epoch;
        self.epoch = now;

        if (self.sgtime == 0.0) || !incremental || ((sample - self.sgtime).abs() > SNAP_THRESHOLD) {
            log::debug!(
                "Global clock snapping from {:.2} to authoritative {:.2}",
                self.gtime,
                sample
            );
            self.gtime = sample;
            self.sgtime = sample;
            return;
        }

        if ((sample - self.sgtime) > MIN_ADVANCE) && (delta > 0.0) {
            let observed = (sample - self.sgtime) / delta;
            let f = (delta * BLEND_GAIN).min(BLEND_CAP);
            self.target_rate = (self.target_rate * (1.0 - f)) + (observed * f);
        }
        self.sgtime = sample;
    }

    /// The current local game time.
    #[must_use]
    pub fn time(&self) -> f64 {
        self.gtime
    }

    /// The rate currently applied to local time.
    #[must_use]
    pub fn current_rate(&self) -> f64 {
        self.current_rate
    }

    /// The estimated true game-time rate.
    #[must_use]
    pub fn target_rate(&self) -> f64 {
        self.target_rate
    }

    /// The authoritative time extrapolated to `now`.
    #[must_use]
    pub fn projected(&self, now: f64) -> f64 {
        self.sgtime + (now - self.epoch) * self.target_rate
    }

    /// Formats the synchronizer internals for diagnostics overlays.
    #[must_use]
    pub fn stats(&self, now: f64) -> String {
        let projected = self.projected(now);
        format!(
            "{:.2} {:.2} {:.2} {:.2} {:.2} {:.2} {:.2}",
            self.gtime,
            self.sgtime,
            self.epoch,
            projected,
            projected - self.gtime,
            self.current_rate,
            self.target_rate
        )
    }
}

/// Monotonic wall-clock seconds since construction.
///
/// The production source of the `now` values fed to [`GlobalClock`] and
/// [`World`](crate::World).
#[derive(Debug)]
pub struct WallClock {
    origin: Instant,
}

impl WallClock {
    /// Starts a wall clock at zero.
    #[must_use]
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }

    /// Seconds elapsed since construction.
    #[must_use]
    pub fn now(&self) -> f64 {
        self.origin.elapsed().as_secs_f64()
    }
}

impl Default for WallClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_first_sample_snaps() {
        let mut clock = GlobalClock::standard(0.0);
        clock.receive(1.0, 1234.5, true);
        assert_relative_eq!(clock.time(), 1234.5);
    }

    #[test]
    fn test_non_incremental_sample_snaps() {
        let mut clock = GlobalClock::standard(0.0);
        clock.receive(1.0, 100.0, true);
        clock.receive(2.0, 103.0, false);
        assert_relative_eq!(clock.time(), 103.0);
    }

    #[test]
    fn test_discontinuity_snaps_without_blending() {
        let mut clock = GlobalClock::standard(0.0);
        clock.receive(1.0, 100.0, true);
        clock.tick(1.5, 0.5);
        // More than 500 units away from the previous sample.
        clock.receive(2.0, 1000.0, true);
        assert_relative_eq!(clock.time(), 1000.0);
    }

    #[test]
    fn test_small_incremental_advance_does_not_snap() {
        let mut clock = GlobalClock::standard(0.0);
        clock.receive(0.0, 100.0, true);
        clock.receive(1.0, 103.0, true);
        // Local time still advances from its own ticks, not the sample.
        assert_relative_eq!(clock.time(), 100.0);
    }

    #[test]
    fn test_rate_step_is_capped_per_tick() {
        let mut clock = GlobalClock::new(0.0, 1.0);
        clock.receive(0.0, 400.0, true);
        let before = clock.current_rate();
        // The projection leads local time by ~99 units after this tick; the
        // gap term is capped at 0.02/s and the pull adds at most 0.002/s.
        clock.tick(100.0, 1.0);
        let step = clock.current_rate() - before;
        assert!(step <= 0.022 + 1e-9, "step = {step}");
        assert!(step >= 0.017, "step = {step}");
    }

    #[test]
    fn test_rate_never_runs_past_headroom() {
        let mut clock = GlobalClock::new(0.0, 1.0);
        clock.receive(0.0, 400.0, true);
        let mut now = 0.0;
        for _ in 0..10_000 {
            // Wall time outpaces the ticked delta, so the projection keeps
            // pulling ahead and the rate keeps getting pushed up.
            now += 0.1;
            clock.tick(now, 0.01);
            assert!(clock.current_rate() <= clock.target_rate() * RATE_HEADROOM + 0.001);
        }
    }

    #[test]
    fn test_observed_rate_blends_into_target() {
        let mut clock = GlobalClock::new(0.0, 1.0);
        clock.receive(0.0, 100.0, true);
        // Samples advancing at 2.0 game seconds per wall second.
        for i in 1..=100 {
            let now = i as f64;
            clock.receive(now, 100.0 + now * 2.0, true);
        }
        let target = clock.target_rate();
        assert!(target > 1.0 && target <= 2.0, "target_rate = {target}");
        // EMA with weight 0.01 per 1s sample: 2 - 0.99^100 ≈ 1.63.
        assert_relative_eq!(target, 2.0 - 0.99_f64.powi(100), epsilon = 1e-9);
    }

    #[test]
    fn test_rate_pull_recovers_to_target_without_gap() {
        let mut clock = GlobalClock::new(0.0, 1.0);
        clock.receive(0.0, 0.0, true);
        clock.current_rate = 1.05;
        clock.sgtime = 0.0;
        // Keep the projection equal to local time so only the pull acts.
        clock.gtime = 0.0;
        let mut now = 0.0;
        for _ in 0..1_000 {
            now += 0.1;
            // Re-anchor so projection tracks gtime and the gap stays small.
            clock.sgtime = clock.gtime;
            clock.epoch = now;
            clock.tick(now, 0.1);
        }
        assert_relative_eq!(clock.current_rate(), clock.target_rate(), epsilon = 1e-6);
    }
}
