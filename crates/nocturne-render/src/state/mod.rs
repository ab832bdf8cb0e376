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

//! The slot / state / pipe model.
//!
//! A [`State`] is an immutable value describing one concrete setting for one
//! [`Slot`]; a [`Pipe`] maps each slot to at most one current state. Many
//! independent producers apply partial, possibly overlapping state into the
//! same pipe without knowing about each other; flushing a pipe against the
//! previous frame's pipe applies only what actually changed.

pub mod pipe;
pub mod slot;
pub mod states;

pub use pipe::Pipe;
pub use slot::{Slot, SlotKind, SlotRegistry, StdSlots};
pub use states::{
    BlendComponent, BlendFactor, BlendOperation, Blending, DepthTest, LineWidth, MaskDepth,
    Scissor, Viewport,
};

use crate::context::GraphicsContext;
use crate::error::RenderError;
use std::any::Any;
use std::fmt::Debug;
use std::sync::Arc;

/// An opaque shader-program variation requirement.
///
/// A state that needs the program compiled with a particular variation
/// reports it here; the shader layer keys its variant cache on the set of
/// these contributed by a pipe. Built-in states contribute none.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ShaderVariant(pub u32);

/// An immutable value object representing one concrete setting for one slot.
///
/// A state is coupled to exactly one slot by construction: [`apply`]
/// records the state in a pipe under [`slot`], and that is the sole way a
/// state enters a pipe. Change detection uses [`state_eq`] value equality,
/// never identity, so functionally identical states constructed
/// independently compare equal.
///
/// [`apply`]: State::apply
/// [`slot`]: State::slot
/// [`state_eq`]: State::state_eq
pub trait State: Any + Debug + Send + Sync {
    /// The one slot this state occupies.
    fn slot(&self) -> Slot;

    /// The shader-program variation this state requires, if any.
    fn shader(&self) -> Option<ShaderVariant> {
        None
    }

    /// Pushes this state's primitive settings into the context.
    fn bind(&self, ctx: &mut dyn GraphicsContext) -> Result<(), RenderError>;

    /// Value equality across `dyn State`.
    ///
    /// Returns `false` (never panics) when `other` is a different concrete
    /// type. Implementations are one-liners over [`state_eq`].
    fn state_eq(&self, other: &dyn State) -> bool;

    /// Upcast for downcast-based equality.
    fn as_any(&self) -> &dyn Any;

    /// Records this state in `pipe` under its own slot, replacing any
    /// previous state there.
    fn apply(&self, pipe: &mut Pipe)
    where
        Self: Clone + Sized,
    {
        pipe.put(self.slot(), Arc::new(self.clone()));
    }
}

/// Downcast-based value equality between a concrete state and a `dyn State`.
///
/// The standard body for [`State::state_eq`] implementations.
pub fn state_eq<T: State + PartialEq>(me: &T, other: &dyn State) -> bool {
    other.as_any().downcast_ref::<T>().is_some_and(|o| me == o)
}
