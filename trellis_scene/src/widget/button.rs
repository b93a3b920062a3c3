// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::rc::Rc;

use trellis_pointer::PointerHooks;

use super::{DrawCx, HookCx, SignalKind, Widget};
use crate::surface::{Color, Sprite, Surface};
use crate::types::NodeId;

/// An image that reacts to the pointer and emits a signal when clicked.
///
/// The image tint follows the pointer: `hover_color` while hovered,
/// `click_color` while a click is held, `rest_color` otherwise. Releasing a
/// click over the button emits the button's signal.
#[derive(Clone, Debug)]
pub struct Button {
    image: Rc<dyn Sprite>,
    /// Tint while hovered.
    pub hover_color: Color,
    /// Tint while a click is held.
    pub click_color: Color,
    /// Tint at rest.
    pub rest_color: Color,
    tint: Color,
    signal: SignalKind,
    on_behalf_of: Option<NodeId>,
}

impl Button {
    /// A button drawing `image`, emitting [`SignalKind::Clicked`].
    pub fn new(image: Rc<dyn Sprite>) -> Self {
        Self {
            image,
            hover_color: Color::LIGHT_GRAY,
            click_color: Color::PALE_GREEN,
            rest_color: Color::WHITE,
            tint: Color::WHITE,
            signal: SignalKind::Clicked,
            on_behalf_of: None,
        }
    }

    /// Emit `signal` instead of [`SignalKind::Clicked`].
    #[must_use]
    pub fn with_signal(mut self, signal: SignalKind) -> Self {
        self.signal = signal;
        self
    }

    /// Set the three tints.
    #[must_use]
    pub fn with_colors(mut self, rest: Color, hover: Color, click: Color) -> Self {
        self.rest_color = rest;
        self.hover_color = hover;
        self.click_color = click;
        self.tint = rest;
        self
    }

    /// Emit the signal as if it came from `source` instead of the button.
    pub fn set_signal_source(&mut self, source: Option<NodeId>) {
        self.on_behalf_of = source;
    }

    /// Signal kind emitted on click.
    pub fn signal(&self) -> SignalKind {
        self.signal
    }

    /// Current image tint.
    pub fn tint(&self) -> Color {
        self.tint
    }
}

impl PointerHooks<HookCx> for Button {
    fn on_hover_start(&mut self, _cx: &mut HookCx) {
        self.tint = self.hover_color;
    }

    fn on_hover(&mut self, _cx: &mut HookCx) {
        self.tint = self.hover_color;
    }

    fn on_hover_end(&mut self, _cx: &mut HookCx) {
        self.tint = self.rest_color;
    }

    fn on_click(&mut self, _cx: &mut HookCx) {
        self.tint = self.click_color;
    }

    fn on_click_canceled(&mut self, _cx: &mut HookCx) {
        self.tint = self.rest_color;
    }

    fn on_click_end(&mut self, cx: &mut HookCx) {
        match self.on_behalf_of {
            Some(source) => cx.emit_for(source, self.signal),
            None => cx.emit(self.signal),
        }
        self.tint = self.rest_color;
    }
}

impl Widget for Button {
    fn draw_background(&self, cx: &DrawCx<'_>, surface: &mut dyn Surface) {
        if cx.style.background.is_some() {
            cx.draw_style_background(surface);
        }
        self.image.draw(surface, cx.rect, self.tint, cx.depth, 1.0);
    }
}
