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

//! The per-frame time state.

use std::any::Any;
use std::fmt;

use nocturne_render::context::GraphicsContext;
use nocturne_render::error::RenderError;
use nocturne_render::state::{state_eq, Slot, State};
use nocturne_render::uniform::{UniformType, UniformValue, UniformVar};

/// The shader-visible wrap period of the frame time, in game seconds.
///
/// Keeps the value small enough that `f32` precision holds up in shaders
/// after days of play.
const TIME_WRAP: f64 = 10_000.0;

/// A snapshot of the global game time, applied into a pipe once per frame.
///
/// Carries data for uniform resolution rather than context settings, so
/// binding it is a no-op; shaders read the time through
/// [`uniform_value`](FrameInfo::uniform_value).
#[derive(Debug, Clone, PartialEq)]
pub struct FrameInfo {
    slot: Slot,
    globtime: f64,
}

impl FrameInfo {
    /// Captures the given game time under the given slot.
    #[must_use]
    pub fn new(slot: Slot, globtime: f64) -> Self {
        Self { slot, globtime }
    }

    /// The unwrapped game time this frame was captured at.
    #[must_use]
    pub fn globtime(&self) -> f64 {
        self.globtime
    }

    /// The uniform variable frame time is published under.
    #[must_use]
    pub fn uniform_var(id: u32) -> UniformVar {
        UniformVar::new(id, "globtime", UniformType::Float)
    }

    /// The shader-visible time value: game time wrapped to [`TIME_WRAP`]
    /// and narrowed to `f32`.
    #[must_use]
    pub fn uniform_value(&self) -> UniformValue {
        UniformValue::Float((self.globtime % TIME_WRAP) as f32)
    }
}

impl State for FrameInfo {
    fn slot(&self) -> Slot {
        self.slot
    }

    fn bind(&self, _ctx: &mut dyn GraphicsContext) -> Result<(), RenderError> {
        Ok(())
    }

    fn state_eq(&self, other: &dyn State) -> bool {
        state_eq(self, other)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl fmt::Display for FrameInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#<frameinfo @{}s>", self.globtime)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use nocturne_render::state::{SlotKind, SlotRegistry};

    #[test]
    fn test_uniform_value_wraps_long_uptimes() {
        let mut slots = SlotRegistry::new();
        let slot = slots.mint(SlotKind::System);
        let info = FrameInfo::new(slot, 123_456.75);
        match info.uniform_value() {
            UniformValue::Float(t) => assert_relative_eq!(t, 3456.75),
            other => panic!("unexpected value {other:?}"),
        }
    }

    #[test]
    fn test_equality_is_by_captured_time() {
        let mut slots = SlotRegistry::new();
        let slot = slots.mint(SlotKind::System);
        let a = FrameInfo::new(slot, 10.0);
        let b = FrameInfo::new(slot, 10.0);
        let c = FrameInfo::new(slot, 10.5);
        assert!(State::state_eq(&a, &b));
        assert!(!State::state_eq(&a, &c));
    }
}
