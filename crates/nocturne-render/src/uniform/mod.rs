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

//! Uniform variables, bindable values, and the dispatch registry that routes
//! a value to the routine that pushes it into a named shader uniform.

pub mod registry;

pub use registry::{BindRoutine, UniformRegistry};

use crate::context::TextureId;
use crate::math::{Coord, Coord3, FColor, Rgba};
use std::borrow::Cow;

/// The declared data type of a shader uniform variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UniformType {
    /// A scalar `float`.
    Float,
    /// A 2-component float vector.
    Vec2,
    /// A 3-component float vector.
    Vec3,
    /// A 4-component float vector.
    Vec4,
    /// A 2-D texture sampler.
    Sampler2d,
}

/// A named shader uniform variable with a declared type and a stable,
/// cross-invocation identity.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UniformVar {
    /// Stable identity used by programs to locate the uniform across
    /// invocations.
    pub id: u32,
    /// The variable name as declared in the shader source.
    pub name: Cow<'static, str>,
    /// The declared data type.
    pub ty: UniformType,
}

impl UniformVar {
    /// Creates a uniform variable descriptor.
    pub fn new(id: u32, name: impl Into<Cow<'static, str>>, ty: UniformType) -> Self {
        Self {
            id,
            name: name.into(),
            ty,
        }
    }
}

/// A typed value bound to a uniform at draw time.
///
/// This is the closed, enumerable set of bindable value shapes. Every value
/// carries its kind as a tag ([`UniformValue::kind`]), and the registry
/// resolves a binding routine by the exact `(declared type, kind)` pair,
/// deterministic by construction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UniformValue {
    /// A scalar float.
    Float(f32),
    /// A raw 2-component array.
    Array2([f32; 2]),
    /// A raw 3-component array.
    Array3([f32; 3]),
    /// A raw 4-component array.
    Array4([f32; 4]),
    /// A 2-D integer coordinate.
    Coord(Coord),
    /// A 3-D float coordinate.
    Coord3(Coord3),
    /// A packed 8-bit color (channels normalized by 255 when bound).
    Rgba(Rgba),
    /// A float color.
    FColor(FColor),
    /// A texture sampler.
    Sampler(TextureId),
}

impl UniformValue {
    /// The exact kind tag of this value.
    #[must_use]
    pub fn kind(&self) -> ValueKind {
        match self {
            UniformValue::Float(_) => ValueKind::Float,
            UniformValue::Array2(_) => ValueKind::Array2,
            UniformValue::Array3(_) => ValueKind::Array3,
            UniformValue::Array4(_) => ValueKind::Array4,
            UniformValue::Coord(_) => ValueKind::Coord,
            UniformValue::Coord3(_) => ValueKind::Coord3,
            UniformValue::Rgba(_) => ValueKind::Rgba,
            UniformValue::FColor(_) => ValueKind::FColor,
            UniformValue::Sampler(_) => ValueKind::Sampler,
        }
    }
}

/// The kind tag of a [`UniformValue`], used as the registry lookup key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    /// [`UniformValue::Float`].
    Float,
    /// [`UniformValue::Array2`].
    Array2,
    /// [`UniformValue::Array3`].
    Array3,
    /// [`UniformValue::Array4`].
    Array4,
    /// [`UniformValue::Coord`].
    Coord,
    /// [`UniformValue::Coord3`].
    Coord3,
    /// [`UniformValue::Rgba`].
    Rgba,
    /// [`UniformValue::FColor`].
    FColor,
    /// [`UniformValue::Sampler`].
    Sampler,
}
