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

//! # Nocturne Render
//!
//! The render-state composition layer: describing, combining,
//! deduplicating, and applying graphics-pipeline state to an opaque
//! context, plus the dispatch machinery that binds typed values to shader
//! uniform variables at draw time.
//!
//! - [`state`]: slots, states, and pipes; what state exists, how it
//!   composes, and when it is considered changed.
//! - [`uniform`]: uniform variables, bindable values, and the dispatch
//!   registry routing each value to its binding routine.
//! - [`context`]: the backend boundary; no graphics-API calls are made in
//!   this crate.
//! - [`math`]: the small value types the above consume.

#![warn(missing_docs)]

pub mod context;
pub mod error;
pub mod math;
pub mod state;
pub mod uniform;

pub use context::{GraphicsContext, ProgramId, TextureId};
pub use error::RenderError;
pub use state::{Pipe, Slot, SlotKind, SlotRegistry, State, StdSlots};
pub use uniform::{UniformRegistry, UniformType, UniformValue, UniformVar, ValueKind};
