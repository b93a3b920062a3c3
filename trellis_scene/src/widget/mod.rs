// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Widget behavior: the per-kind logic a node carries.
//!
//! A [`Widget`] never sees the [`Scene`](crate::Scene). It can draw into the
//! rectangle it is given and react to pointer hooks; anything that should
//! change the tree is emitted as a [`Signal`] and applied by the host after
//! the tick.

mod button;
mod image;
mod label;
mod menu;
mod progress;

use core::any::Any;
use core::fmt::Debug;
use core::time::Duration;

use kurbo::Rect;
use trellis_pointer::PointerHooks;

use crate::node::NodeStyle;
use crate::surface::{SolidSprite, Sprite, Surface};
use crate::types::NodeId;

pub use button::Button;
pub use image::ImageWidget;
pub use label::Label;
pub use menu::{Corner, Menu};
pub use progress::{ContinuousProgressBar, TickProgressBar};

/// Behavior attached to a scene node.
///
/// Drawing happens in three steps per node: [`Widget::draw_background`], the
/// node's border, then [`Widget::draw_content`]. Children are drawn after.
pub trait Widget: PointerHooks<HookCx> + Any + Debug {
    /// Decoration a fresh [`SceneNode`](crate::SceneNode) starts with.
    fn default_style(&self) -> NodeStyle {
        NodeStyle::default()
    }

    /// Per-frame logic. Runs for hidden nodes too.
    fn update(&mut self, _dt: Duration) {}

    /// Paint the background. The default paints the node style's background.
    fn draw_background(&self, cx: &DrawCx<'_>, surface: &mut dyn Surface) {
        cx.draw_style_background(surface);
    }

    /// Paint content above the border.
    fn draw_content(&self, _cx: &DrawCx<'_>, _surface: &mut dyn Surface) {}

    /// Name of the concrete widget type, for diagnostics.
    fn kind(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}

/// What a widget gets to know while drawing.
#[derive(Clone, Copy, Debug)]
pub struct DrawCx<'a> {
    /// The node being drawn.
    pub node: NodeId,
    /// Its resolved rectangle.
    pub rect: Rect,
    /// Its depth value.
    pub depth: f64,
    /// Its decoration.
    pub style: &'a NodeStyle,
}

impl DrawCx<'_> {
    /// Paint the style background into the node rectangle.
    pub fn draw_style_background(&self, surface: &mut dyn Surface) {
        self.draw_background_in(surface, self.rect);
    }

    /// Paint the style background into `rect` at the node depth.
    pub fn draw_background_in(&self, surface: &mut dyn Surface, rect: Rect) {
        match &self.style.background {
            Some(sprite) => {
                sprite.draw(surface, rect, self.style.background_color, self.depth, 1.0);
            }
            None if self.style.background_color.is_transparent() => {}
            None => SolidSprite.draw(surface, rect, self.style.background_color, self.depth, 1.0),
        }
    }
}

/// What a widget is told while handling a pointer hook.
#[derive(Debug)]
pub struct HookCx {
    node: NodeId,
    signals: Vec<Signal>,
}

impl HookCx {
    /// Context for a hook delivered to `node`.
    pub fn new(node: NodeId) -> Self {
        Self {
            node,
            signals: Vec::new(),
        }
    }

    /// The node receiving the hook.
    pub fn node(&self) -> NodeId {
        self.node
    }

    /// Emit a signal on behalf of the receiving node.
    pub fn emit(&mut self, kind: SignalKind) {
        self.emit_for(self.node, kind);
    }

    /// Emit a signal on behalf of another node.
    pub fn emit_for(&mut self, source: NodeId, kind: SignalKind) {
        self.signals.push(Signal { source, kind });
    }

    /// Signals emitted so far.
    pub fn into_signals(self) -> Vec<Signal> {
        self.signals
    }
}

/// A request from a widget to the host.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Signal {
    /// Node the signal is about.
    pub source: NodeId,
    /// What happened.
    pub kind: SignalKind,
}

/// Kinds of widget signal.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum SignalKind {
    /// A button was clicked (pressed and released over it).
    Clicked,
    /// A menu asked to be closed.
    CloseRequested,
}

/// Errors raised by widget setters.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq)]
pub enum WidgetError {
    /// Value below the minimum.
    #[error("value {value} is less than the minimum {min}")]
    BelowMin {
        /// Rejected value.
        value: f64,
        /// Current minimum.
        min: f64,
    },
    /// Value above the maximum.
    #[error("value {value} is greater than the maximum {max}")]
    AboveMax {
        /// Rejected value.
        value: f64,
        /// Current maximum.
        max: f64,
    },
    /// Range bounds are inverted.
    #[error("minimum {min} is greater than maximum {max}")]
    InvertedRange {
        /// Requested minimum.
        min: f64,
        /// Requested maximum.
        max: f64,
    },
}

/// A plain container; draws its style and nothing else.
#[derive(Copy, Clone, Debug, Default)]
pub struct Panel;

impl PointerHooks<HookCx> for Panel {}

impl Widget for Panel {}
