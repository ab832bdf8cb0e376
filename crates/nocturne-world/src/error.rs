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

//! Defines the error types for the world-state layer.

use std::fmt;

/// An error raised by the world-state layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorldError {
    /// A dependent resource has not finished loading yet.
    ///
    /// Recoverable: the caller retries on a later tick. This is an expected
    /// outcome while backing resources stream in, not a failure.
    NotYetAvailable {
        /// What is still loading.
        what: String,
    },
    /// A dynamically resolved type could not be instantiated with the
    /// expected shape.
    ///
    /// A programming-contract violation; retrying cannot succeed, so this
    /// propagates as fatal.
    ConstructionFailure {
        /// What failed to construct.
        what: String,
        /// Details from the failing constructor.
        details: String,
    },
}

impl WorldError {
    /// Returns `true` if the error is the retry-later outcome.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(self, WorldError::NotYetAvailable { .. })
    }
}

impl fmt::Display for WorldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WorldError::NotYetAvailable { what } => {
                write!(f, "'{what}' is not available yet; retry next tick")
            }
            WorldError::ConstructionFailure { what, details } => {
                write!(f, "Failed to construct '{what}': {details}")
            }
        }
    }
}

impl std::error::Error for WorldError {}
