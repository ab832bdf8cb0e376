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

//! The shared world state.

use std::sync::Mutex;

use nocturne_render::state::{Pipe, Slot};
use serde_json::Value;

use crate::astro::{Astronomy, AstronomyPayload};
use crate::attr::{AttrMap, CharAttr};
use crate::clock::GlobalClock;
use crate::error::WorldError;
use crate::frame::FrameInfo;
use crate::weather::{ResourceRef, WeatherResolver, WeatherSet};

/// One entry of a server world-state batch.
///
/// Batches arrive on the session thread and are applied atomically per
/// entry through [`World::update`].
#[derive(Debug, Clone)]
pub enum WorldUpdate {
    /// An authoritative game-time sample.
    Time {
        /// The sampled game time.
        time: f64,
        /// Whether the sample continues the previous stream.
        incremental: bool,
    },
    /// New celestial lighting parameters.
    Astronomy(AstronomyPayload),
    /// A character attribute change.
    Attr {
        /// The attribute name.
        name: String,
        /// The unmodified base value.
        base: i32,
        /// The effective value after modifiers.
        comp: i32,
    },
    /// Arguments for one weather effect.
    Weather {
        /// The effect's resource.
        resource: ResourceRef,
        /// The effect's arguments, opaque to this layer.
        args: Vec<Value>,
    },
}

/// The session-global world state: the synchronized clock, character
/// attributes, astronomy, and active weather.
///
/// Shared between the session thread (applying updates) and the render
/// thread (ticking and reading); every piece sits behind its own lock so
/// the two sides contend only on what they actually share.
#[derive(Debug)]
pub struct World {
    clock: Mutex<GlobalClock>,
    attrs: AttrMap,
    astronomy: Mutex<Option<Astronomy>>,
    weather: WeatherSet,
    frame_slot: Slot,
    last_tick: Mutex<Option<f64>>,
}

impl World {
    /// Creates a world whose frame time is published under `frame_slot`.
    #[must_use]
    pub fn new(now: f64, frame_slot: Slot) -> Self {
        Self {
            clock: Mutex::new(GlobalClock::standard(now)),
            attrs: AttrMap::new(),
            astronomy: Mutex::new(None),
            weather: WeatherSet::new(),
            frame_slot,
            last_tick: Mutex::new(None),
        }
    }

    /// Advances the world by one frame.
    ///
    /// The delta is derived from the previous tick's `now` and clamped to
    /// zero, so a non-monotonic wall clock can never run time backwards;
    /// the first tick uses a zero delta.
    pub fn tick(&self, now: f64, resolver: &dyn WeatherResolver) -> Result<(), WorldError> {
        let dt = {
            let mut last = self.last_tick.lock().unwrap();
            let dt = match *last {
                Some(prev) => (now - prev).max(0.0),
                None => 0.0,
            };
            *last = Some(now);
            dt
        };

        self.clock.lock().unwrap().tick(now, dt);
        self.weather.tick(dt, resolver)
    }

    /// Applies a batch of server updates.
    pub fn update(&self, now: f64, batch: impl IntoIterator<Item = WorldUpdate>) {
        for entry in batch {
            match entry {
                WorldUpdate::Time { time, incremental } => {
                    self.clock.lock().unwrap().receive(now, time, incremental);
                }
                WorldUpdate::Astronomy(payload) => {
                    *self.astronomy.lock().unwrap() = Some(Astronomy::from_payload(payload));
                }
                WorldUpdate::Attr { name, base, comp } => {
                    if self.attrs.update(&name, base, comp) {
                        log::trace!("Attribute '{name}' now {base}/{comp}");
                    }
                }
                WorldUpdate::Weather { resource, args } => {
                    self.weather.update(resource, args);
                }
            }
        }
    }

    /// The current local game time.
    #[must_use]
    pub fn time(&self) -> f64 {
        self.clock.lock().unwrap().time()
    }

    /// A frame-time state capturing the current game time.
    #[must_use]
    pub fn frame_info(&self) -> FrameInfo {
        FrameInfo::new(self.frame_slot, self.time())
    }

    /// The latest astronomy, if the server has sent any yet.
    #[must_use]
    pub fn astronomy(&self) -> Option<Astronomy> {
        self.astronomy.lock().unwrap().clone()
    }

    /// A snapshot of the named character attribute.
    #[must_use]
    pub fn attr(&self, name: &str) -> CharAttr {
        self.attrs.get(name)
    }

    /// The attribute table.
    #[must_use]
    pub fn attrs(&self) -> &AttrMap {
        &self.attrs
    }

    /// The active weather effects.
    #[must_use]
    pub fn weather(&self) -> &WeatherSet {
        &self.weather
    }

    /// Contributes the per-frame world state to `pipe`: the frame time and
    /// every resolved weather effect.
    pub fn apply_frame_state(&self, pipe: &mut Pipe) {
        pipe.apply(&self.frame_info());
        self.weather.states(pipe);
    }

    /// Formats the clock synchronizer internals for diagnostics overlays.
    #[must_use]
    pub fn clock_stats(&self, now: f64) -> String {
        self.clock.lock().unwrap().stats(now)
    }
}
