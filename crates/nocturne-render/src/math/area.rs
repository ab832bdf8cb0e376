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

//! Axis-aligned integer rectangles, used by the viewport and scissor states.

use super::coord::Coord;
use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle defined by an inclusive minimum corner and an
/// exclusive maximum corner.
///
/// `Area` is the unit of screen-space extent for [`Viewport`] and [`Scissor`]
/// states. Equality is structural over both corners.
///
/// [`Viewport`]: crate::state::Viewport
/// [`Scissor`]: crate::state::Scissor
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Area {
    /// The inclusive minimum corner.
    pub min: Coord,
    /// The exclusive maximum corner.
    pub max: Coord,
}

impl Area {
    /// Creates a new `Area` from two corner points.
    ///
    /// The corners are normalized so that `min` holds the component-wise
    /// minimum and `max` the component-wise maximum, regardless of the
    /// argument order.
    #[inline]
    pub fn from_min_max(a: Coord, b: Coord) -> Self {
        Self {
            min: a.min(b),
            max: a.max(b),
        }
    }

    /// Creates a new `Area` from an origin corner and a size.
    #[inline]
    pub fn sized(origin: Coord, size: Coord) -> Self {
        Self::from_min_max(origin, origin + size)
    }

    /// Returns the size of the area as a coordinate (width, height).
    #[inline]
    pub fn size(&self) -> Coord {
        self.max - self.min
    }

    /// Returns `true` if the area covers no pixels.
    #[inline]
    pub fn is_empty(&self) -> bool {
        (self.max.x <= self.min.x) || (self.max.y <= self.min.y)
    }

    /// Checks if a point is inside the area (min-inclusive, max-exclusive).
    #[inline]
    pub fn contains(&self, p: Coord) -> bool {
        (p.x >= self.min.x) && (p.x < self.max.x) && (p.y >= self.min.y) && (p.y < self.max.y)
    }

    /// Returns the intersection of two areas, or `None` if they do not
    /// overlap.
    pub fn intersect(&self, other: &Area) -> Option<Area> {
        let min = self.min.max(other.min);
        let max = self.max.min(other.max);
        let isect = Area { min, max };
        if isect.is_empty() {
            None
        } else {
            Some(isect)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_min_max_normalizes_corners() {
        let a = Area::from_min_max(Coord::new(10, 2), Coord::new(0, 8));
        assert_eq!(a.min, Coord::new(0, 2));
        assert_eq!(a.max, Coord::new(10, 8));
        assert_eq!(a.size(), Coord::new(10, 6));
    }

    #[test]
    fn test_contains_is_max_exclusive() {
        let a = Area::sized(Coord::ZERO, Coord::new(4, 4));
        assert!(a.contains(Coord::new(0, 0)));
        assert!(a.contains(Coord::new(3, 3)));
        assert!(!a.contains(Coord::new(4, 3)));
        assert!(!a.contains(Coord::new(-1, 0)));
    }

    #[test]
    fn test_intersect() {
        let a = Area::sized(Coord::ZERO, Coord::new(4, 4));
        let b = Area::sized(Coord::new(2, 2), Coord::new(4, 4));
        let c = Area::sized(Coord::new(8, 8), Coord::new(2, 2));
        assert_eq!(
            a.intersect(&b),
            Some(Area::from_min_max(Coord::new(2, 2), Coord::new(4, 4)))
        );
        assert_eq!(a.intersect(&c), None);
    }
}
