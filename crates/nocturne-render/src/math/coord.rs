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

//! Provides 2D integer and 3D float coordinate types.

use serde::{Deserialize, Serialize};
use std::ops::{Add, Neg, Sub};

/// A 2-dimensional integer coordinate, used for screen-space positions and
/// rectangle corners.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Coord {
    /// The x component of the coordinate.
    pub x: i32,
    /// The y component of the coordinate.
    pub y: i32,
}

impl Coord {
    /// The origin (`[0, 0]`).
    pub const ZERO: Self = Self { x: 0, y: 0 };

    /// Creates a new `Coord` with the specified components.
    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Returns the component-wise minimum of two coordinates.
    #[inline]
    pub fn min(self, rhs: Self) -> Self {
        Self {
            x: self.x.min(rhs.x),
            y: self.y.min(rhs.y),
        }
    }

    /// Returns the component-wise maximum of two coordinates.
    #[inline]
    pub fn max(self, rhs: Self) -> Self {
        Self {
            x: self.x.max(rhs.x),
            y: self.y.max(rhs.y),
        }
    }
}

impl Add for Coord {
    type Output = Self;
    /// Adds two coordinates component-wise.
    #[inline]
    fn add(self, rhs: Self) -> Self::Output {
        Self {
            x: self.x + rhs.x,
            y: self.y + rhs.y,
        }
    }
}

impl Sub for Coord {
    type Output = Self;
    /// Subtracts two coordinates component-wise.
    #[inline]
    fn sub(self, rhs: Self) -> Self::Output {
        Self {
            x: self.x - rhs.x,
            y: self.y - rhs.y,
        }
    }
}

impl Neg for Coord {
    type Output = Self;
    /// Negates each component.
    #[inline]
    fn neg(self) -> Self::Output {
        Self {
            x: -self.x,
            y: -self.y,
        }
    }
}

/// A 3-dimensional coordinate with `f32` components, used for world-space
/// positions and as a 2-, 3-, or 4-component uniform source.
#[derive(
    Debug,
    Default,
    Copy,
    Clone,
    PartialEq,
    bytemuck::Pod,
    bytemuck::Zeroable,
    Serialize,
    Deserialize,
)]
#[repr(C)]
pub struct Coord3 {
    /// The x component of the coordinate.
    pub x: f32,
    /// The y component of the coordinate.
    pub y: f32,
    /// The z component of the coordinate.
    pub z: f32,
}

impl Coord3 {
    /// The origin (`[0.0, 0.0, 0.0]`).
    pub const ZERO: Self = Self {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };

    /// Creates a new `Coord3` with the specified components.
    #[inline]
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Returns the coordinate as a homogeneous 4-component array, with the
    /// w component set to `1.0`.
    #[inline]
    pub const fn homogeneous(self) -> [f32; 4] {
        [self.x, self.y, self.z, 1.0]
    }
}

impl Add for Coord3 {
    type Output = Self;
    /// Adds two coordinates component-wise.
    #[inline]
    fn add(self, rhs: Self) -> Self::Output {
        Self {
            x: self.x + rhs.x,
            y: self.y + rhs.y,
            z: self.z + rhs.z,
        }
    }
}

impl Sub for Coord3 {
    type Output = Self;
    /// Subtracts two coordinates component-wise.
    #[inline]
    fn sub(self, rhs: Self) -> Self::Output {
        Self {
            x: self.x - rhs.x,
            y: self.y - rhs.y,
            z: self.z - rhs.z,
        }
    }
}
