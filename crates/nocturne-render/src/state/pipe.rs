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

//! The [`Pipe`]: an ordered mapping from slots to their active states.

use super::{ShaderVariant, Slot, State};
use crate::context::GraphicsContext;
use crate::error::RenderError;
use std::sync::Arc;

/// An ordered mapping from [`Slot`] to at most one current [`State`].
///
/// Composition is the union of contributions with later writers overriding
/// earlier ones for the same slot: applying states for *different* slots is
/// order-independent, while two applications to the *same* slot are
/// last-write-wins (intentionally, so producers can override defaults).
///
/// Pipes are cheap to clone (states are shared via `Arc`), so a typical
/// frame keeps the previous pipe around and [`flush`](Pipe::flush)es only
/// the slots whose state value actually changed.
#[derive(Debug, Default, Clone)]
pub struct Pipe {
    // Indexed by slot mint order; a hole is "never set", which is a legal,
    // meaningful value.
    slots: Vec<Option<Arc<dyn State>>>,
}

impl Pipe {
    /// Creates an empty pipe.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces any existing state for `slot`.
    ///
    /// No error conditions; the write is visible to subsequent
    /// [`get`](Pipe::get) calls and to change detection on flush.
    pub fn put(&mut self, slot: Slot, state: Arc<dyn State>) {
        debug_assert_eq!(slot, state.slot(), "state applied under a foreign slot");
        let index = slot.index() as usize;
        if index >= self.slots.len() {
            self.slots.resize_with(index + 1, || None);
        }
        self.slots[index] = Some(state);
    }

    /// Returns the current state for `slot`, or `None` if never set.
    ///
    /// Absence is legal and meaningful; the caller supplies the default
    /// behavior.
    #[must_use]
    pub fn get(&self, slot: Slot) -> Option<&Arc<dyn State>> {
        self.slots.get(slot.index() as usize)?.as_ref()
    }

    /// Returns the current state for `slot` downcast to its concrete type.
    #[must_use]
    pub fn get_as<T: State>(&self, slot: Slot) -> Option<&T> {
        self.get(slot)?.as_any().downcast_ref::<T>()
    }

    /// Iterates the occupied slots in slot order.
    pub fn iter(&self) -> impl Iterator<Item = (Slot, &Arc<dyn State>)> {
        self.slots
            .iter()
            .filter_map(|entry| entry.as_ref())
            .map(|state| (state.slot(), state))
    }

    /// Returns the number of occupied slots.
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.iter().filter(|entry| entry.is_some()).count()
    }

    /// Returns `true` if no slot is occupied.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(|entry| entry.is_none())
    }

    /// Returns the slots whose state differs between `self` and `prev`, in
    /// slot order.
    ///
    /// A slot counts as changed when it is occupied on one side only, or
    /// when both sides hold states that are not value-equal. Equality is
    /// [`State::state_eq`], never `Arc` identity, so functionally identical
    /// states constructed independently do not count as a change.
    #[must_use]
    pub fn diff(&self, prev: &Pipe) -> Vec<Slot> {
        let len = self.slots.len().max(prev.slots.len());
        let mut changed = Vec::new();
        for index in 0..len {
            let cur = self.slots.get(index).and_then(|entry| entry.as_ref());
            let old = prev.slots.get(index).and_then(|entry| entry.as_ref());
            match (cur, old) {
                (Some(a), Some(b)) => {
                    if !a.state_eq(b.as_ref()) {
                        changed.push(a.slot());
                    }
                }
                (Some(a), None) => changed.push(a.slot()),
                (None, Some(b)) => changed.push(b.slot()),
                (None, None) => {}
            }
        }
        changed
    }

    /// Binds every slot whose state changed relative to `prev` into the
    /// context, in slot order.
    ///
    /// Slots that are occupied in `prev` but not in `self` have no state to
    /// bind and are skipped; the context keeps whatever it had. Pipes are
    /// mutated only through `put`, so in steady state this case does not
    /// arise.
    pub fn flush(&self, prev: &Pipe, ctx: &mut dyn GraphicsContext) -> Result<(), RenderError> {
        for slot in self.diff(prev) {
            if let Some(state) = self.get(slot) {
                state.bind(ctx)?;
            }
        }
        Ok(())
    }

    /// Collects the shader-program variation requirements contributed by the
    /// occupied states, in slot order.
    #[must_use]
    pub fn shader_variants(&self) -> Vec<ShaderVariant> {
        self.iter().filter_map(|(_, state)| state.shader()).collect()
    }

    /// Applies `state` under its own slot (see [`State::apply`]).
    pub fn apply<S: State + Clone>(&mut self, state: &S) {
        state.apply(self);
    }
}
