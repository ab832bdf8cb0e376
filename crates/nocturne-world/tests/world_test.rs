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

//! Integration tests for the aggregate world state: update batches, frame
//! state contribution, and the weather resolution lifecycle.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

use approx::assert_relative_eq;
use nocturne_render::math::Rgba;
use nocturne_render::state::{LineWidth, Pipe, Slot, SlotKind, SlotRegistry};
use nocturne_world::{
    AstronomyPayload, ResourceRef, Weather, WeatherResolver, World, WorldError, WorldUpdate,
};
use serde_json::{json, Value};

/// A weather effect contributing a line-width state, expiring after a
/// fixed lifetime.
#[derive(Debug)]
struct StubWeather {
    slot: Slot,
    width: f64,
    remaining: f64,
    ticks: Arc<AtomicU32>,
}

impl Weather for StubWeather {
    fn state(&self, pipe: &mut Pipe) {
        pipe.apply(&LineWidth::new(self.slot, self.width));
    }

    fn update(&mut self, args: &[Value]) {
        if let Some(width) = args.first().and_then(Value::as_f64) {
            self.width = width;
        }
    }

    fn tick(&mut self, dt: f64) -> bool {
        self.ticks.fetch_add(1, Ordering::Relaxed);
        self.remaining -= dt;
        self.remaining <= 0.0
    }
}

/// Fails resolution with the retry-later error for a configured number of
/// attempts, then constructs a [`StubWeather`].
struct StubResolver {
    slot: Slot,
    loading_for: AtomicU32,
    ticks: Arc<AtomicU32>,
}

impl StubResolver {
    fn new(slot: Slot, loading_for: u32) -> Self {
        Self {
            slot,
            loading_for: AtomicU32::new(loading_for),
            ticks: Arc::new(AtomicU32::new(0)),
        }
    }
}

impl WeatherResolver for StubResolver {
    fn resolve(
        &self,
        resource: &ResourceRef,
        args: &[Value],
    ) -> Result<Box<dyn Weather>, WorldError> {
        let left = self.loading_for.load(Ordering::Relaxed);
        if left > 0 {
            self.loading_for.store(left - 1, Ordering::Relaxed);
            return Err(WorldError::NotYetAvailable {
                what: resource.0.clone(),
            });
        }
        Ok(Box::new(StubWeather {
            slot: self.slot,
            width: args.first().and_then(Value::as_f64).unwrap_or(1.0),
            remaining: 100.0,
            ticks: Arc::clone(&self.ticks),
        }))
    }
}

struct TestSlots {
    frame: Slot,
    line_width: Slot,
}

fn slots() -> TestSlots {
    let mut registry = SlotRegistry::new();
    TestSlots {
        frame: registry.mint(SlotKind::System),
        line_width: registry.mint(SlotKind::Geometry),
    }
}

fn astronomy_payload() -> AstronomyPayload {
    AstronomyPayload {
        day_time: 0.25,
        moon_phase: 0.5,
        year_time: 0.75,
        night: true,
        moon_color: Rgba::rgb(220, 220, 255),
        is_summer: None,
        sun_power: None,
        sky_density: None,
        years: None,
        year_moon: None,
        moon_dist: None,
    }
}

#[test]
fn test_update_batch_lands_in_every_subsystem() {
    let slots = slots();
    let world = World::new(0.0, slots.frame);

    world.update(
        0.0,
        vec![
            WorldUpdate::Time {
                time: 1000.0,
                incremental: true,
            },
            WorldUpdate::Astronomy(astronomy_payload()),
            WorldUpdate::Attr {
                name: "str".to_string(),
                base: 10,
                comp: 12,
            },
            WorldUpdate::Weather {
                resource: ResourceRef::new("wtr/rain"),
                args: vec![json!(2.5)],
            },
        ],
    );

    // First time sample snaps local time directly.
    assert_relative_eq!(world.time(), 1000.0);

    let ast = world.astronomy().expect("astronomy set");
    assert!(ast.night);
    // Omitted tail fields take protocol defaults.
    assert_relative_eq!(ast.sun_power, 0.5);
    assert!(ast.is_summer);

    assert_eq!(world.attr("str").comp, 12);
    assert_eq!(world.attr("agi").comp, 0);

    assert_eq!(world.weather().len(), 1);
}

#[test]
fn test_frame_state_carries_current_time() {
    let slots = slots();
    let world = World::new(0.0, slots.frame);
    world.update(
        0.0,
        vec![WorldUpdate::Time {
            time: 1000.0,
            incremental: true,
        }],
    );

    let mut pipe = Pipe::new();
    world.apply_frame_state(&mut pipe);

    let info = pipe
        .get(slots.frame)
        .expect("frame info applied under its slot");
    assert!(info.state_eq(&world.frame_info()));
    assert_relative_eq!(world.frame_info().globtime(), 1000.0);
}

#[test]
fn test_weather_retries_until_resource_loads() {
    let slots = slots();
    let world = World::new(0.0, slots.frame);
    let resolver = StubResolver::new(slots.line_width, 2);

    world.update(
        0.0,
        vec![WorldUpdate::Weather {
            resource: ResourceRef::new("wtr/rain"),
            args: vec![json!(2.5)],
        }],
    );

    // Two ticks while the resource loads: the effect stays pending and
    // contributes no state, and nothing errors out.
    for step in 0..2u32 {
        world
            .tick(f64::from(step) * 0.1, &resolver)
            .expect("pending weather is not an error");
        let mut pipe = Pipe::new();
        world.apply_frame_state(&mut pipe);
        assert!(pipe.get(slots.line_width).is_none());
    }
    assert_eq!(resolver.ticks.load(Ordering::Relaxed), 0);

    // Third tick resolves and the effect starts ticking and contributing.
    world.tick(0.2, &resolver).expect("weather resolves");
    assert_eq!(resolver.ticks.load(Ordering::Relaxed), 1);

    let mut pipe = Pipe::new();
    world.apply_frame_state(&mut pipe);
    let width = pipe
        .get_as::<LineWidth>(slots.line_width)
        .expect("resolved weather contributes state");
    assert_relative_eq!(width.width, 2.5);
}

#[test]
fn test_update_reaches_resolved_weather_directly() {
    let slots = slots();
    let world = World::new(0.0, slots.frame);
    let resolver = StubResolver::new(slots.line_width, 0);
    let resource = ResourceRef::new("wtr/rain");

    world.update(
        0.0,
        vec![WorldUpdate::Weather {
            resource: resource.clone(),
            args: vec![json!(2.5)],
        }],
    );
    world.tick(0.0, &resolver).expect("weather resolves");

    world.update(
        0.1,
        vec![WorldUpdate::Weather {
            resource,
            args: vec![json!(4.0)],
        }],
    );

    let mut pipe = Pipe::new();
    world.apply_frame_state(&mut pipe);
    let width = pipe
        .get_as::<LineWidth>(slots.line_width)
        .expect("weather state present");
    assert_relative_eq!(width.width, 4.0);
}

#[test]
fn test_expired_weather_is_removed() {
    let slots = slots();
    let world = World::new(0.0, slots.frame);
    let resolver = StubResolver::new(slots.line_width, 0);

    world.update(
        0.0,
        vec![WorldUpdate::Weather {
            resource: ResourceRef::new("wtr/fog"),
            args: vec![],
        }],
    );

    // The stub lives for 100 game seconds; run past that.
    for step in 0..=110u32 {
        world.tick(f64::from(step), &resolver).expect("tick succeeds");
    }
    assert!(world.weather().is_empty());

    let mut pipe = Pipe::new();
    world.apply_frame_state(&mut pipe);
    assert!(pipe.get(slots.line_width).is_none());
    // The frame info state is still contributed.
    assert!(pipe.get(slots.frame).is_some());
}

#[test]
fn test_construction_failure_is_fatal() {
    struct FailingResolver;
    impl WeatherResolver for FailingResolver {
        fn resolve(
            &self,
            resource: &ResourceRef,
            _args: &[Value],
        ) -> Result<Box<dyn Weather>, WorldError> {
            Err(WorldError::ConstructionFailure {
                what: resource.0.clone(),
                details: "missing expected constructor".to_string(),
            })
        }
    }

    let slots = slots();
    let world = World::new(0.0, slots.frame);
    world.update(
        0.0,
        vec![WorldUpdate::Weather {
            resource: ResourceRef::new("wtr/broken"),
            args: vec![],
        }],
    );

    let err = world
        .tick(0.0, &FailingResolver)
        .expect_err("construction failure propagates");
    assert!(!err.is_retryable());
}

#[test]
fn test_tick_delta_clamps_non_monotonic_wall_clock() {
    let slots = slots();
    let world = World::new(0.0, slots.frame);
    let resolver = StubResolver::new(slots.line_width, 0);
    world.update(
        0.0,
        vec![WorldUpdate::Time {
            time: 1000.0,
            incremental: true,
        }],
    );

    world.tick(10.0, &resolver).expect("tick succeeds");
    let before = world.time();
    // Wall clock steps backwards; game time must hold, not rewind.
    world.tick(9.0, &resolver).expect("tick succeeds");
    assert!(world.time() >= before);
    assert_relative_eq!(world.time(), before);
}
