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

//! The built-in pipeline states: blending, viewport, scissor, line width,
//! and the depth-flag markers.
//!
//! Each built-in is a pure value type: structural equality over its fields,
//! coupled to its slot at construction, applied into a [`Pipe`] through
//! [`State::apply`].

use super::{state_eq, Slot, State};
use crate::context::GraphicsContext;
use crate::error::RenderError;
use crate::math::{Area, FColor};
use std::any::Any;

/// The operation used to combine source and destination in a blend equation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlendOperation {
    /// The result is `source + destination`.
    Add,
    /// The result is `source - destination`.
    Subtract,
    /// The result is `destination - source`.
    ReverseSubtract,
    /// The result is `min(source, destination)`.
    Min,
    /// The result is `max(source, destination)`.
    Max,
}

/// A multiplier applied to the source or destination in a blend equation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlendFactor {
    /// The factor is `0.0`.
    Zero,
    /// The factor is `1.0`.
    One,
    /// The factor is the source color.
    SrcColor,
    /// The factor is the destination color.
    DstColor,
    /// The factor is `1.0 - source color`.
    OneMinusSrcColor,
    /// The factor is `1.0 - destination color`.
    OneMinusDstColor,
    /// The factor is the source alpha component (`src.a`).
    SrcAlpha,
    /// The factor is the destination alpha component (`dst.a`).
    DstAlpha,
    /// The factor is `1.0 - src.a`.
    OneMinusSrcAlpha,
    /// The factor is `1.0 - dst.a`.
    OneMinusDstAlpha,
    /// The factor is the constant blend color.
    ConstantColor,
    /// The factor is `1.0 - constant blend color`.
    OneMinusConstantColor,
    /// The factor is the constant blend color's alpha.
    ConstantAlpha,
    /// The factor is `1.0 - constant blend color's alpha`.
    OneMinusConstantAlpha,
}

/// A complete blend equation for one channel group (color or alpha).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BlendComponent {
    /// The operation combining the scaled source and destination.
    pub operation: BlendOperation,
    /// The blend factor for the source (from the fragment shader).
    pub src_factor: BlendFactor,
    /// The blend factor for the destination (already in the framebuffer).
    pub dst_factor: BlendFactor,
}

impl BlendComponent {
    /// Creates a blend component with the `Add` operation.
    #[inline]
    pub const fn add(src_factor: BlendFactor, dst_factor: BlendFactor) -> Self {
        Self {
            operation: BlendOperation::Add,
            src_factor,
            dst_factor,
        }
    }
}

impl Default for BlendComponent {
    /// Standard non-premultiplied alpha blending:
    /// `Add` with `SrcAlpha` / `OneMinusSrcAlpha`.
    fn default() -> Self {
        Self::add(BlendFactor::SrcAlpha, BlendFactor::OneMinusSrcAlpha)
    }
}

/// The blend configuration state: one equation for the color channels, one
/// for alpha, and an optional constant blend color.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Blending {
    slot: Slot,
    /// The blend equation for the RGB channels.
    pub color: BlendComponent,
    /// The blend equation for the alpha channel.
    pub alpha: BlendComponent,
    /// The constant blend color, if any `Constant*` factor is in use.
    pub constant: Option<FColor>,
}

impl Blending {
    /// Creates a blend state with explicit equations and constant color.
    pub const fn new(
        slot: Slot,
        color: BlendComponent,
        alpha: BlendComponent,
        constant: Option<FColor>,
    ) -> Self {
        Self {
            slot,
            color,
            alpha,
            constant,
        }
    }

    /// Creates a blend state applying one equation to both channel groups.
    pub const fn uniform(slot: Slot, component: BlendComponent) -> Self {
        Self::new(slot, component, component, None)
    }

    /// Creates an `Add` blend state from a factor pair, applied to both
    /// channel groups.
    pub const fn with_factors(slot: Slot, src: BlendFactor, dst: BlendFactor) -> Self {
        Self::uniform(slot, BlendComponent::add(src, dst))
    }

    /// Standard non-premultiplied alpha blending: `Add` with
    /// `SrcAlpha` / `OneMinusSrcAlpha` on both channel groups, no constant
    /// color. This is the default a fresh frame starts from.
    pub const fn standard(slot: Slot) -> Self {
        Self::with_factors(slot, BlendFactor::SrcAlpha, BlendFactor::OneMinusSrcAlpha)
    }
}

impl State for Blending {
    fn slot(&self) -> Slot {
        self.slot
    }

    fn bind(&self, ctx: &mut dyn GraphicsContext) -> Result<(), RenderError> {
        ctx.set_blend(self);
        Ok(())
    }

    fn state_eq(&self, other: &dyn State) -> bool {
        state_eq(self, other)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// The viewport rectangle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    slot: Slot,
    /// The viewport rectangle.
    pub area: Area,
}

impl Viewport {
    /// Creates a viewport state for `area`.
    pub const fn new(slot: Slot, area: Area) -> Self {
        Self { slot, area }
    }
}

impl State for Viewport {
    fn slot(&self) -> Slot {
        self.slot
    }

    fn bind(&self, ctx: &mut dyn GraphicsContext) -> Result<(), RenderError> {
        ctx.set_viewport(self.area);
        Ok(())
    }

    fn state_eq(&self, other: &dyn State) -> bool {
        state_eq(self, other)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// The scissor rectangle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Scissor {
    slot: Slot,
    /// The scissor rectangle.
    pub area: Area,
}

impl Scissor {
    /// Creates a scissor state for `area`.
    pub const fn new(slot: Slot, area: Area) -> Self {
        Self { slot, area }
    }
}

impl State for Scissor {
    fn slot(&self) -> Slot {
        self.slot
    }

    fn bind(&self, ctx: &mut dyn GraphicsContext) -> Result<(), RenderError> {
        ctx.set_scissor(self.area);
        Ok(())
    }

    fn state_eq(&self, other: &dyn State) -> bool {
        state_eq(self, other)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// The rasterized line width state.
///
/// All accepted input representations normalize to one `f32` before any
/// comparison; equality is exact float equality on the normalized value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineWidth {
    slot: Slot,
    /// The line width in pixels.
    pub width: f32,
}

impl LineWidth {
    /// Creates a line-width state, normalizing the input to `f32`.
    ///
    /// Accepts anything that converts losslessly to `f64` (`i32`, `f32`,
    /// `f64`, ...).
    pub fn new(slot: Slot, width: impl Into<f64>) -> Self {
        Self {
            slot,
            width: width.into() as f32,
        }
    }
}

impl State for LineWidth {
    fn slot(&self) -> Slot {
        self.slot
    }

    fn bind(&self, ctx: &mut dyn GraphicsContext) -> Result<(), RenderError> {
        ctx.set_line_width(self.width);
        Ok(())
    }

    fn state_eq(&self, other: &dyn State) -> bool {
        state_eq(self, other)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Zero-field marker state enabling the depth test.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DepthTest {
    slot: Slot,
}

impl DepthTest {
    /// Creates the depth-test marker.
    pub const fn new(slot: Slot) -> Self {
        Self { slot }
    }
}

impl State for DepthTest {
    fn slot(&self) -> Slot {
        self.slot
    }

    fn bind(&self, ctx: &mut dyn GraphicsContext) -> Result<(), RenderError> {
        ctx.enable_depth_test();
        Ok(())
    }

    fn state_eq(&self, other: &dyn State) -> bool {
        state_eq(self, other)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Zero-field marker state enabling depth writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MaskDepth {
    slot: Slot,
}

impl MaskDepth {
    /// Creates the depth-write marker.
    pub const fn new(slot: Slot) -> Self {
        Self { slot }
    }
}

impl State for MaskDepth {
    fn slot(&self) -> Slot {
        self.slot
    }

    fn bind(&self, ctx: &mut dyn GraphicsContext) -> Result<(), RenderError> {
        ctx.mask_depth();
        Ok(())
    }

    fn state_eq(&self, other: &dyn State) -> bool {
        state_eq(self, other)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
