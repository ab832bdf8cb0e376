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

//! # Nocturne World
//!
//! The session-global world state feeding the render layer: a clock
//! synchronized against sporadic authoritative time samples, the per-frame
//! time state, character attributes, astronomy, and server-driven weather
//! effects.
//!
//! - [`clock`]: the game-time synchronizer and its wall-clock source.
//! - [`frame`]: the per-frame time snapshot applied into render pipes.
//! - [`attr`]: named character attributes.
//! - [`astro`]: celestial lighting parameters.
//! - [`weather`]: lazily resolved weather effects.
//! - [`world`]: the aggregate tying the above together.

#![warn(missing_docs)]

pub mod astro;
pub mod attr;
pub mod clock;
pub mod error;
pub mod frame;
pub mod weather;
pub mod world;

pub use astro::{Astronomy, AstronomyPayload};
pub use attr::{AttrMap, CharAttr};
pub use clock::{GlobalClock, WallClock, NOMINAL_RATE};
pub use error::WorldError;
pub use frame::FrameInfo;
pub use weather::{ResourceRef, Weather, WeatherResolver, WeatherSet};
pub use world::{World, WorldUpdate};
