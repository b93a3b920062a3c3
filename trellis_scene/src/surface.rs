// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drawing seam: the submission primitive and the opaque drawing collaborators.
//!
//! The scene never inspects pixels. It hands rectangles, colors and depths to a
//! [`Surface`]; images, nine-slices and text are [`Sprite`]s and
//! [`TextRenderer`]s supplied by the host.

use core::fmt::Debug;

use kurbo::Rect;

/// 8-bit RGBA color.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Color {
    /// Red.
    pub r: u8,
    /// Green.
    pub g: u8,
    /// Blue.
    pub b: u8,
    /// Alpha.
    pub a: u8,
}

impl Color {
    /// Fully transparent black.
    pub const TRANSPARENT: Self = Self::rgba(0, 0, 0, 0);
    /// Opaque white.
    pub const WHITE: Self = Self::rgb(255, 255, 255);
    /// Opaque black.
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    /// Opaque gray.
    pub const GRAY: Self = Self::rgb(128, 128, 128);
    /// Opaque light gray.
    pub const LIGHT_GRAY: Self = Self::rgb(211, 211, 211);
    /// Opaque pale green.
    pub const PALE_GREEN: Self = Self::rgb(152, 251, 152);

    /// Opaque color.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::rgba(r, g, b, 255)
    }

    /// Color with alpha.
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// True when `a == 0`.
    pub const fn is_transparent(self) -> bool {
        self.a == 0
    }
}

/// Region of a texture to sample, in texel coordinates. Opaque to the scene.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SourceRegion(pub Rect);

/// The drawing back end.
///
/// Stacking is decided by `depth`, not by submission order: the back end sorts
/// by depth and breaks ties by submission order.
pub trait Surface {
    /// Queue one quad.
    fn submit(&mut self, rect: Rect, source: Option<SourceRegion>, color: Color, depth: f64);
}

/// One recorded [`Surface::submit`] call.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Submission {
    /// Destination rectangle.
    pub rect: Rect,
    /// Source texture region, if any.
    pub source: Option<SourceRegion>,
    /// Tint.
    pub color: Color,
    /// Depth value.
    pub depth: f64,
}

/// A [`Surface`] that records submissions.
///
/// ```rust
/// use kurbo::Rect;
/// use trellis_scene::{Color, DrawList, Surface};
///
/// let mut list = DrawList::default();
/// list.submit(Rect::new(0.0, 0.0, 1.0, 1.0), None, Color::WHITE, 0.3);
/// list.submit(Rect::new(0.0, 0.0, 2.0, 2.0), None, Color::BLACK, 0.2);
/// let order: Vec<f64> = list.sorted().iter().map(|s| s.depth).collect();
/// assert_eq!(order, [0.2, 0.3]);
/// ```
#[derive(Clone, Debug, Default)]
pub struct DrawList {
    submissions: Vec<Submission>,
}

impl DrawList {
    /// Submissions in the order they were made.
    pub fn submissions(&self) -> &[Submission] {
        &self.submissions
    }

    /// Submissions in composite order: ascending depth, ties by submission order.
    pub fn sorted(&self) -> Vec<Submission> {
        let mut out = self.submissions.clone();
        // `sort_by` is stable, so equal depths keep submission order.
        out.sort_by(|a, b| a.depth.total_cmp(&b.depth));
        out
    }

    /// Forget everything recorded so far.
    pub fn clear(&mut self) {
        self.submissions.clear();
    }

    /// Number of submissions.
    pub fn len(&self) -> usize {
        self.submissions.len()
    }

    /// True when nothing was submitted.
    pub fn is_empty(&self) -> bool {
        self.submissions.is_empty()
    }
}

impl Surface for DrawList {
    fn submit(&mut self, rect: Rect, source: Option<SourceRegion>, color: Color, depth: f64) {
        self.submissions.push(Submission {
            rect,
            source,
            color,
            depth,
        });
    }
}

/// Something that paints itself into a rectangle: an image, a nine-slice, a
/// generated texture.
///
/// `edge_scale` is only meaningful to bordered renderers (nine-slice edge
/// thickness); plain images ignore it.
pub trait Sprite: Debug {
    /// Draw into `rect`.
    fn draw(
        &self,
        surface: &mut dyn Surface,
        rect: Rect,
        color: Color,
        depth: f64,
        edge_scale: f64,
    );
}

/// Solid-color fill; submits `rect` with no source region.
#[derive(Copy, Clone, Debug, Default)]
pub struct SolidSprite;

impl Sprite for SolidSprite {
    fn draw(&self, surface: &mut dyn Surface, rect: Rect, color: Color, depth: f64, _: f64) {
        surface.submit(rect, None, color, depth);
    }
}

/// Horizontal text alignment.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum HorizontalAlign {
    /// Flush left.
    #[default]
    Left,
    /// Centered.
    Center,
    /// Flush right.
    Right,
}

/// Vertical text alignment.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum VerticalAlign {
    /// Flush top.
    #[default]
    Top,
    /// Centered.
    Center,
    /// Flush bottom.
    Bottom,
}

/// How text is scaled to its rectangle.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum TextFit {
    /// Natural size.
    #[default]
    None,
    /// Scale uniformly to fit the rectangle.
    Fill,
    /// Scale to fill the width.
    FillWidth,
    /// Scale to fill the height.
    FillHeight,
}

/// Text drawing parameters handed to a [`TextRenderer`].
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct TextProps {
    /// Text color.
    pub color: Color,
    /// Font size in pixels.
    pub size: f64,
    /// Horizontal alignment inside the rectangle.
    pub horizontal: HorizontalAlign,
    /// Vertical alignment inside the rectangle.
    pub vertical: VerticalAlign,
    /// Fit mode.
    pub fit: TextFit,
    /// Depth the glyphs are submitted at. Filled in by the owning widget.
    pub depth: f64,
}

impl Default for TextProps {
    fn default() -> Self {
        Self {
            color: Color::WHITE,
            size: 32.0,
            horizontal: HorizontalAlign::Left,
            vertical: VerticalAlign::Top,
            fit: TextFit::None,
            depth: 0.0,
        }
    }
}

/// Draws text. Shaping, metrics and glyph upload are the renderer's business.
pub trait TextRenderer: Debug {
    /// Draw `text` inside `rect`.
    fn draw_text(&self, surface: &mut dyn Surface, text: &str, rect: Rect, props: &TextProps);
}
