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

//! The opaque context surface that states and uniform values are applied
//! into.
//!
//! This layer decides *what* state exists, how it composes, and when it is
//! considered changed; the [`GraphicsContext`] trait is the boundary to the
//! backend that performs the actual graphics-API calls. Backends implement
//! the primitive operations; nothing in this crate issues driver calls
//! directly.

use crate::math::Area;
use crate::state::Blending;
use crate::uniform::UniformVar;
use std::fmt::Debug;

/// An opaque handle to a compiled, linked shader program.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct ProgramId(pub u64);

/// An opaque handle to a texture owned by the backend.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct TextureId(pub u64);

/// The primitive apply surface consumed by the state and uniform layers.
///
/// One method per pipeline-state category plus the small set of uniform and
/// sampler primitives the built-in binding routines need. All operations are
/// synchronous, bounded-cost calls made from the render thread.
pub trait GraphicsContext: Debug {
    /// Applies a blend configuration.
    fn set_blend(&mut self, blend: &Blending);

    /// Sets the viewport rectangle.
    fn set_viewport(&mut self, area: Area);

    /// Sets the scissor rectangle.
    fn set_scissor(&mut self, area: Area);

    /// Sets the rasterized line width.
    fn set_line_width(&mut self, width: f32);

    /// Enables the depth test.
    fn enable_depth_test(&mut self);

    /// Enables writes to the depth buffer.
    fn mask_depth(&mut self);

    /// Sets a scalar float uniform on `program`.
    fn uniform_1f(&mut self, program: ProgramId, var: &UniformVar, x: f32);

    /// Sets a 2-component float uniform on `program`.
    fn uniform_2f(&mut self, program: ProgramId, var: &UniformVar, x: f32, y: f32);

    /// Sets a 3-component float uniform on `program`.
    fn uniform_3f(&mut self, program: ProgramId, var: &UniformVar, x: f32, y: f32, z: f32);

    /// Sets a 4-component float uniform on `program`.
    fn uniform_4f(&mut self, program: ProgramId, var: &UniformVar, x: f32, y: f32, z: f32, w: f32);

    /// Looks up the texture unit `program` has assigned to a sampler
    /// variable, if any.
    fn sampler_unit(&self, program: ProgramId, var: &UniformVar) -> Option<u32>;

    /// Makes `unit` the active texture unit for subsequent texture binds.
    fn activate_texture_unit(&mut self, unit: u32);

    /// Binds a texture to the active texture unit.
    fn bind_texture(&mut self, texture: TextureId);
}
