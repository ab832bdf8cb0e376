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

//! The uniform dispatch registry.
//!
//! Given a uniform's declared type and a value's kind tag, the registry
//! finds the one routine that pushes that value into the context for that
//! uniform. Resolution is an exact-key table lookup: deterministic, O(1),
//! and with no ordering or assignability ambiguity. Registration is an
//! upsert and normally happens once at module initialization, before
//! steady-state rendering; resolution runs on the render thread through
//! `&self`.

use super::{UniformType, UniformValue, UniformVar, ValueKind};
use crate::context::{GraphicsContext, ProgramId};
use crate::error::RenderError;
use std::collections::HashMap;

/// A binding routine: converts one value kind into the correct context
/// call(s) for one declared uniform type.
pub type BindRoutine = Box<
    dyn Fn(&mut dyn GraphicsContext, ProgramId, &UniformVar, &UniformValue) -> Result<(), RenderError>
        + Send
        + Sync,
>;

/// Routes typed values to binding routines, keyed by the exact
/// `(declared type, value kind)` pair.
///
/// [`UniformRegistry::standard`] pre-populates the built-in routines;
/// [`register`](UniformRegistry::register) lets hosts add routines for new
/// kinds or replace a built-in.
pub struct UniformRegistry {
    table: HashMap<(UniformType, ValueKind), BindRoutine>,
}

impl UniformRegistry {
    /// Creates an empty registry with no routines at all.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            table: HashMap::new(),
        }
    }

    /// Creates a registry pre-populated with the built-in binding routines.
    #[must_use]
    pub fn standard() -> Self {
        let mut reg = Self::empty();

        reg.register(UniformType::Float, ValueKind::Float, Box::new(bind_float));

        reg.register(UniformType::Vec2, ValueKind::Array2, Box::new(bind_vec2));
        reg.register(UniformType::Vec2, ValueKind::Coord, Box::new(bind_vec2));
        reg.register(UniformType::Vec2, ValueKind::Coord3, Box::new(bind_vec2));

        reg.register(UniformType::Vec3, ValueKind::Array3, Box::new(bind_vec3));
        reg.register(UniformType::Vec3, ValueKind::Coord3, Box::new(bind_vec3));
        reg.register(UniformType::Vec3, ValueKind::Rgba, Box::new(bind_vec3));
        reg.register(UniformType::Vec3, ValueKind::FColor, Box::new(bind_vec3));

        reg.register(UniformType::Vec4, ValueKind::Array4, Box::new(bind_vec4));
        reg.register(UniformType::Vec4, ValueKind::Coord3, Box::new(bind_vec4));
        reg.register(UniformType::Vec4, ValueKind::Rgba, Box::new(bind_vec4));
        reg.register(UniformType::Vec4, ValueKind::FColor, Box::new(bind_vec4));

        reg.register(
            UniformType::Sampler2d,
            ValueKind::Sampler,
            Box::new(bind_sampler),
        );

        reg
    }

    /// Registers `routine` for the `(ty, kind)` pair.
    ///
    /// Idempotent upsert: re-registering a pair replaces the previous
    /// routine.
    pub fn register(&mut self, ty: UniformType, kind: ValueKind, routine: BindRoutine) {
        if self.table.insert((ty, kind), routine).is_some() {
            log::debug!("Replacing uniform binding routine for {ty:?} <- {kind:?}");
        } else {
            log::trace!("Registered uniform binding routine for {ty:?} <- {kind:?}");
        }
    }

    /// Looks up the routine for the `(ty, kind)` pair.
    #[must_use]
    pub fn resolve(&self, ty: UniformType, kind: ValueKind) -> Option<&BindRoutine> {
        self.table.get(&(ty, kind))
    }

    /// Returns `true` if a routine is registered for the pair.
    #[must_use]
    pub fn contains(&self, ty: UniformType, kind: ValueKind) -> bool {
        self.table.contains_key(&(ty, kind))
    }

    /// Returns the number of registered routines.
    #[must_use]
    pub fn len(&self) -> usize {
        self.table.len()
    }

    /// Returns `true` if no routines are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Resolves and invokes the routine for `value` against `var`.
    ///
    /// # Errors
    ///
    /// [`RenderError::UnsupportedBinding`] if no routine is registered for
    /// `(var.ty, value.kind())`: a missing binding implementation for a new
    /// value kind, surfaced to the caller rather than swallowed.
    pub fn apply(
        &self,
        ctx: &mut dyn GraphicsContext,
        program: ProgramId,
        var: &UniformVar,
        value: &UniformValue,
    ) -> Result<(), RenderError> {
        match self.resolve(var.ty, value.kind()) {
            Some(routine) => routine(ctx, program, var, value),
            None => Err(unsupported(var, value)),
        }
    }
}

impl Default for UniformRegistry {
    /// Equivalent to [`UniformRegistry::standard`].
    fn default() -> Self {
        Self::standard()
    }
}

impl std::fmt::Debug for UniformRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UniformRegistry")
            .field("routines", &self.table.len())
            .finish()
    }
}

fn unsupported(var: &UniformVar, value: &UniformValue) -> RenderError {
    RenderError::UnsupportedBinding {
        ty: var.ty,
        kind: value.kind(),
    }
}

fn bind_float(
    ctx: &mut dyn GraphicsContext,
    program: ProgramId,
    var: &UniformVar,
    value: &UniformValue,
) -> Result<(), RenderError> {
    match value {
        UniformValue::Float(x) => {
            ctx.uniform_1f(program, var, *x);
            Ok(())
        }
        _ => Err(unsupported(var, value)),
    }
}

fn bind_vec2(
    ctx: &mut dyn GraphicsContext,
    program: ProgramId,
    var: &UniformVar,
    value: &UniformValue,
) -> Result<(), RenderError> {
    let [x, y] = match value {
        UniformValue::Array2(a) => *a,
        UniformValue::Coord(c) => [c.x as f32, c.y as f32],
        UniformValue::Coord3(c) => [c.x, c.y],
        _ => return Err(unsupported(var, value)),
    };
    ctx.uniform_2f(program, var, x, y);
    Ok(())
}

fn bind_vec3(
    ctx: &mut dyn GraphicsContext,
    program: ProgramId,
    var: &UniformVar,
    value: &UniformValue,
) -> Result<(), RenderError> {
    let [x, y, z] = match value {
        UniformValue::Array3(a) => *a,
        UniformValue::Coord3(c) => [c.x, c.y, c.z],
        UniformValue::Rgba(c) => {
            let [r, g, b, _] = c.to_floats();
            [r, g, b]
        }
        UniformValue::FColor(c) => [c.r, c.g, c.b],
        _ => return Err(unsupported(var, value)),
    };
    ctx.uniform_3f(program, var, x, y, z);
    Ok(())
}

fn bind_vec4(
    ctx: &mut dyn GraphicsContext,
    program: ProgramId,
    var: &UniformVar,
    value: &UniformValue,
) -> Result<(), RenderError> {
    let [x, y, z, w] = match value {
        UniformValue::Array4(a) => *a,
        // A 3-D coordinate promotes with a homogeneous 1.0.
        UniformValue::Coord3(c) => c.homogeneous(),
        UniformValue::Rgba(c) => c.to_floats(),
        UniformValue::FColor(c) => c.to_array(),
        _ => return Err(unsupported(var, value)),
    };
    ctx.uniform_4f(program, var, x, y, z, w);
    Ok(())
}

fn bind_sampler(
    ctx: &mut dyn GraphicsContext,
    program: ProgramId,
    var: &UniformVar,
    value: &UniformValue,
) -> Result<(), RenderError> {
    match value {
        UniformValue::Sampler(texture) => {
            // Texture-unit activation has to precede the bind.
            let unit = ctx
                .sampler_unit(program, var)
                .ok_or_else(|| RenderError::MissingSamplerUnit {
                    name: var.name.to_string(),
                })?;
            ctx.activate_texture_unit(unit);
            ctx.bind_texture(*texture);
            Ok(())
        }
        _ => Err(unsupported(var, value)),
    }
}
