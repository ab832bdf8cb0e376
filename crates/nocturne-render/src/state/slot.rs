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

//! Slot handles and the registry that mints them.
//!
//! A [`Slot`] names one category of pipeline state ("blending", "viewport",
//! "global time", ...). Slots are opaque handles minted by a
//! [`SlotRegistry`] once at startup and passed explicitly to the states that
//! occupy them; two slots are interchangeable only if they are the same
//! handle. There is no structural equality and no ambient global slot table.

/// The coarse stage a slot belongs to, used for ordering and grouping.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SlotKind {
    /// Per-geometry state (line width, depth flags, ...).
    Geometry,
    /// System-wide state (blending, viewport, frame info, ...).
    System,
}

/// An opaque, identity-keyed handle naming one category of pipeline state.
///
/// Equality and ordering follow mint order within one [`SlotRegistry`];
/// mixing slots from different registries in one [`Pipe`](crate::state::Pipe)
/// is a caller error.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Slot {
    index: u32,
    kind: SlotKind,
}

impl Slot {
    /// The registry-assigned index of this slot (mint order).
    #[inline]
    pub fn index(&self) -> u32 {
        self.index
    }

    /// The stage this slot belongs to.
    #[inline]
    pub fn kind(&self) -> SlotKind {
        self.kind
    }
}

/// Mints [`Slot`] handles.
///
/// Built once at startup; every producer that contributes a state category
/// mints its slot here and keeps the handle.
#[derive(Debug, Default)]
pub struct SlotRegistry {
    kinds: Vec<SlotKind>,
}

impl SlotRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self { kinds: Vec::new() }
    }

    /// Mints a new slot of the given kind.
    pub fn mint(&mut self, kind: SlotKind) -> Slot {
        let index = self.kinds.len() as u32;
        self.kinds.push(kind);
        Slot { index, kind }
    }

    /// Returns the number of slots minted so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.kinds.len()
    }

    /// Returns `true` if no slots have been minted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }
}

/// The built-in slot set used by the standard states.
///
/// Hosts typically build one of these from a fresh registry at startup and
/// mint any additional slots of their own afterwards.
#[derive(Debug, Copy, Clone)]
pub struct StdSlots {
    /// Blend configuration ([`Blending`](crate::state::Blending)).
    pub blend: Slot,
    /// Viewport rectangle ([`Viewport`](crate::state::Viewport)).
    pub viewport: Slot,
    /// Scissor rectangle ([`Scissor`](crate::state::Scissor)).
    pub scissor: Slot,
    /// Rasterized line width ([`LineWidth`](crate::state::LineWidth)).
    pub line_width: Slot,
    /// Depth-test enable marker ([`DepthTest`](crate::state::DepthTest)).
    pub depth_test: Slot,
    /// Depth-write enable marker ([`MaskDepth`](crate::state::MaskDepth)).
    pub mask_depth: Slot,
    /// Per-frame global time info.
    pub frame_info: Slot,
}

impl StdSlots {
    /// Mints the built-in slot set from `registry`.
    pub fn new(registry: &mut SlotRegistry) -> Self {
        Self {
            blend: registry.mint(SlotKind::System),
            viewport: registry.mint(SlotKind::System),
            scissor: registry.mint(SlotKind::System),
            line_width: registry.mint(SlotKind::Geometry),
            depth_test: registry.mint(SlotKind::Geometry),
            mask_depth: registry.mint(SlotKind::Geometry),
            frame_info: registry.mint(SlotKind::System),
        }
    }
}
