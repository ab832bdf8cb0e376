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

//! Server-driven weather effects.
//!
//! Weather implementations live in dynamically loaded resources, so an
//! effect named in a server update may not be constructible yet when the
//! update arrives. Each effect therefore sits in a two-state cell: pending
//! (the raw arguments, waiting for its resource) or resolved (a live
//! [`Weather`] instance). Resolution is retried every tick until the
//! resource is available.

use std::collections::HashMap;
use std::fmt;
use std::sync::Mutex;

use nocturne_render::state::Pipe;
use serde_json::Value;

use crate::error::WorldError;

/// A name identifying a loadable weather resource.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResourceRef(pub String);

impl ResourceRef {
    /// Creates a reference from a resource name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }
}

impl fmt::Display for ResourceRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A live weather effect.
pub trait Weather: fmt::Debug + Send {
    /// Contributes this effect's render state to the frame's pipe.
    fn state(&self, pipe: &mut Pipe);

    /// Applies a new argument list from the server.
    fn update(&mut self, args: &[Value]);

    /// Advances the effect by `dt` seconds.
    ///
    /// Returns `true` once the effect has run its course and should be
    /// dropped.
    fn tick(&mut self, dt: f64) -> bool;
}

/// Constructs [`Weather`] instances from loadable resources.
///
/// [`WorldError::NotYetAvailable`] means the resource is still streaming in
/// and the caller retries next tick; any other error is fatal.
pub trait WeatherResolver {
    /// Instantiates the effect named by `resource` with its server
    /// arguments.
    fn resolve(&self, resource: &ResourceRef, args: &[Value])
        -> Result<Box<dyn Weather>, WorldError>;
}

/// One effect's lifecycle stage.
#[derive(Debug)]
enum WeatherCell {
    /// Arguments received, resource not loaded yet.
    Pending(Vec<Value>),
    /// A constructed, ticking effect.
    Resolved(Box<dyn Weather>),
}

/// The active weather effects, keyed by resource.
#[derive(Debug, Default)]
pub struct WeatherSet {
    cells: Mutex<HashMap<ResourceRef, WeatherCell>>,
}

impl WeatherSet {
    /// Creates an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a server update for one effect.
    ///
    /// A resolved effect receives the arguments directly; a pending one has
    /// its stored arguments replaced; an unknown resource enters the set as
    /// pending.
    pub fn update(&self, resource: ResourceRef, args: Vec<Value>) {
        let mut cells = self.cells.lock().unwrap();
        match cells.get_mut(&resource) {
            Some(WeatherCell::Resolved(weather)) => weather.update(&args),
            Some(cell @ WeatherCell::Pending(_)) => *cell = WeatherCell::Pending(args),
            None => {
                cells.insert(resource, WeatherCell::Pending(args));
            }
        }
    }

    /// Advances all effects by `dt` seconds.
    ///
    /// Pending cells are resolved first; a cell whose resource is still
    /// loading stays pending for the next tick, while a construction
    /// failure propagates. Effects reporting themselves finished are
    /// removed.
    pub fn tick(&self, dt: f64, resolver: &dyn WeatherResolver) -> Result<(), WorldError> {
        let mut cells = self.cells.lock().unwrap();
        let mut finished = Vec::new();

        for (resource, cell) in cells.iter_mut() {
            if let WeatherCell::Pending(args) = cell {
                match resolver.resolve(resource, args) {
                    Ok(weather) => *cell = WeatherCell::Resolved(weather),
                    Err(err) if err.is_retryable() => {
                        log::trace!("Weather '{resource}' still loading; retrying next tick");
                        continue;
                    }
                    Err(err) => return Err(err),
                }
            }
            if let WeatherCell::Resolved(weather) = cell {
                if weather.tick(dt) {
                    finished.push(resource.clone());
                }
            }
        }

        for resource in finished {
            log::debug!("Weather '{resource}' finished");
            cells.remove(&resource);
        }
        Ok(())
    }

    /// Contributes the state of every resolved effect to `pipe`.
    ///
    /// Pending effects contribute nothing until they resolve.
    pub fn states(&self, pipe: &mut Pipe) {
        let cells = self.cells.lock().unwrap();
        for cell in cells.values() {
            if let WeatherCell::Resolved(weather) = cell {
                weather.state(pipe);
            }
        }
    }

    /// Drops effects no longer named by the server.
    ///
    /// `active` is the full set of resources in the latest update; anything
    /// else is removed, resolved or not.
    pub fn retain(&self, active: &[ResourceRef]) {
        let mut cells = self.cells.lock().unwrap();
        cells.retain(|resource, _| active.contains(resource));
    }

    /// The number of effects, pending ones included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.lock().unwrap().len()
    }

    /// Whether no effect is active or pending.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.lock().unwrap().is_empty()
    }
}
