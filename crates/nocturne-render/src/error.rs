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

//! Defines the error types for the render-state layer.

use crate::uniform::{UniformType, ValueKind};
use std::fmt;

/// An error raised while applying state or uniform values to a context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderError {
    /// No binding routine is registered for the given (declared uniform
    /// type, value kind) pair.
    ///
    /// This is fatal to the draw call whose uniforms were being set: it
    /// signals a missing binding implementation for a new value kind and
    /// must be surfaced, never silently ignored.
    UnsupportedBinding {
        /// The declared type of the uniform variable.
        ty: UniformType,
        /// The kind of the value that was supplied.
        kind: ValueKind,
    },
    /// A sampler uniform was bound but the program has no texture unit
    /// assigned for the variable.
    MissingSamplerUnit {
        /// The name of the sampler variable.
        name: String,
    },
}

impl fmt::Display for RenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenderError::UnsupportedBinding { ty, kind } => {
                write!(f, "No binding routine registered for {ty:?} <- {kind:?}")
            }
            RenderError::MissingSamplerUnit { name } => {
                write!(f, "No texture unit assigned for sampler '{name}'")
            }
        }
    }
}

impl std::error::Error for RenderError {}
