// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::rc::Rc;

use trellis_pointer::PointerHooks;

use super::{DrawCx, HookCx, Widget};
use crate::surface::{Surface, TextProps, TextRenderer};

/// A line of text drawn through a [`TextRenderer`].
///
/// The depth in [`TextProps`] is overwritten with the node's depth on every
/// draw. A label without a renderer draws only its style.
#[derive(Clone, Debug)]
pub struct Label {
    text: String,
    renderer: Option<Rc<dyn TextRenderer>>,
    /// Color, size, alignment and fit.
    pub props: TextProps,
}

impl Label {
    /// A label showing `text` with default properties and no renderer.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            renderer: None,
            props: TextProps::default(),
        }
    }

    /// Draw through `renderer`.
    #[must_use]
    pub fn with_renderer(mut self, renderer: Rc<dyn TextRenderer>) -> Self {
        self.renderer = Some(renderer);
        self
    }

    /// Use `props` for drawing.
    #[must_use]
    pub fn with_props(mut self, props: TextProps) -> Self {
        self.props = props;
        self
    }

    /// The text shown.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Replace the text.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    /// Replace the renderer.
    pub fn set_renderer(&mut self, renderer: Option<Rc<dyn TextRenderer>>) {
        self.renderer = renderer;
    }
}

impl Default for Label {
    fn default() -> Self {
        Self::new("label")
    }
}

impl PointerHooks<HookCx> for Label {}

impl Widget for Label {
    fn draw_content(&self, cx: &DrawCx<'_>, surface: &mut dyn Surface) {
        let Some(renderer) = &self.renderer else {
            return;
        };
        let props = TextProps {
            depth: cx.depth,
            ..self.props
        };
        renderer.draw_text(surface, &self.text, cx.rect, &props);
    }
}
