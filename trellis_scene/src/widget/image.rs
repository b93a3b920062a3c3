// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::rc::Rc;

use trellis_pointer::PointerHooks;

use super::{DrawCx, HookCx, Widget};
use crate::surface::{Sprite, Surface};

/// Draws an image over the node, tinted with the node's background color.
///
/// A background sprite set on the node style is drawn underneath; without one
/// only the image is drawn.
#[derive(Clone, Debug)]
pub struct ImageWidget {
    image: Rc<dyn Sprite>,
}

impl ImageWidget {
    /// Wrap `image`.
    pub fn new(image: Rc<dyn Sprite>) -> Self {
        Self { image }
    }

    /// The image drawn.
    pub fn image(&self) -> &Rc<dyn Sprite> {
        &self.image
    }

    /// Replace the image.
    pub fn set_image(&mut self, image: Rc<dyn Sprite>) {
        self.image = image;
    }
}

impl PointerHooks<HookCx> for ImageWidget {}

impl Widget for ImageWidget {
    fn draw_background(&self, cx: &DrawCx<'_>, surface: &mut dyn Surface) {
        if cx.style.background.is_some() {
            cx.draw_style_background(surface);
        }
        self.image
            .draw(surface, cx.rect, cx.style.background_color, cx.depth, 1.0);
    }
}

#[cfg(test)]
mod tests {
    use kurbo::Rect;

    use super::*;
    use crate::node::NodeStyle;
    use crate::surface::{Color, DrawList, SolidSprite, SourceRegion};
    use crate::types::NodeId;

    #[derive(Debug)]
    struct Atlas(Rect);

    impl Sprite for Atlas {
        fn draw(&self, surface: &mut dyn Surface, rect: Rect, color: Color, depth: f64, _: f64) {
            surface.submit(rect, Some(SourceRegion(self.0)), color, depth);
        }
    }

    #[test]
    fn image_is_tinted_with_background_color() {
        let texels = Rect::new(0.0, 0.0, 16.0, 16.0);
        let widget = ImageWidget::new(Rc::new(Atlas(texels)));
        let style = NodeStyle {
            background_color: Color::WHITE,
            ..NodeStyle::default()
        };
        let cx = DrawCx {
            node: NodeId::new(1, 1),
            rect: Rect::new(0.0, 0.0, 32.0, 32.0),
            depth: 0.25,
            style: &style,
        };
        let mut list = DrawList::default();
        widget.draw_background(&cx, &mut list);
        assert_eq!(list.len(), 1);
        let only = list.submissions()[0];
        assert_eq!(only.source, Some(SourceRegion(texels)));
        assert_eq!(only.color, Color::WHITE);
        assert_eq!(only.depth, 0.25);
    }

    #[test]
    fn background_sprite_goes_underneath() {
        let widget = ImageWidget::new(Rc::new(Atlas(Rect::new(0.0, 0.0, 8.0, 8.0))));
        let style = NodeStyle {
            background: Some(Rc::new(SolidSprite)),
            background_color: Color::GRAY,
            ..NodeStyle::default()
        };
        let cx = DrawCx {
            node: NodeId::new(1, 1),
            rect: Rect::new(0.0, 0.0, 8.0, 8.0),
            depth: 0.2,
            style: &style,
        };
        let mut list = DrawList::default();
        widget.draw_background(&cx, &mut list);
        let sources: Vec<_> = list.submissions().iter().map(|s| s.source.is_some()).collect();
        assert_eq!(sources, [false, true]);
    }
}
