// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::any::Any;

use trellis_layout::LayoutSpec;
use trellis_pointer::PointerHooks;

use super::{Button, DrawCx, HookCx, SignalKind, Widget};
use crate::node::{NodeStyle, SceneNode};
use crate::surface::{Color, Surface};
use crate::tree::{Scene, SceneError};
use crate::types::NodeId;

/// Corner of a menu the close button is anchored to.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Corner {
    /// Top left.
    TopLeft,
    /// Top right.
    #[default]
    TopRight,
    /// Bottom left.
    BottomLeft,
    /// Bottom right.
    BottomRight,
}

impl Corner {
    /// Set the two edges of `layout` that touch this corner to `distance` and
    /// clear the other two.
    pub fn anchor(self, layout: &mut LayoutSpec, distance: f64) {
        let (top, left) = match self {
            Self::TopLeft => (true, true),
            Self::TopRight => (true, false),
            Self::BottomLeft => (false, true),
            Self::BottomRight => (false, false),
        };
        layout.top = top.then_some(distance);
        layout.bottom = (!top).then_some(distance);
        layout.left = left.then_some(distance);
        layout.right = (!left).then_some(distance);
    }
}

/// Edge scale of the menu's nine-slice background.
const BACKGROUND_EDGE_SCALE: f64 = 2.0;

/// A framed panel with an optional close button.
///
/// The close button is a child node holding a [`Button`] that emits
/// [`SignalKind::CloseRequested`] on behalf of the menu. Closing is up to the
/// host: it sees the signal and decides what to hide or destroy.
///
/// Menus that own a close button must be created with [`Menu::insert`], and
/// their close button edited through the associated functions taking a
/// [`Scene`], since the button is a separate node.
#[derive(Clone, Debug)]
pub struct Menu {
    close_button: Option<NodeId>,
    corner: Option<Corner>,
    distance: f64,
    size: f64,
}

impl Default for Menu {
    fn default() -> Self {
        Self {
            close_button: None,
            corner: Some(Corner::TopRight),
            distance: 24.0,
            size: 24.0,
        }
    }
}

impl Menu {
    /// A menu with its close button in the top right corner.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with the close button in `corner`, or detached.
    #[must_use]
    pub fn with_close_corner(mut self, corner: Option<Corner>) -> Self {
        self.corner = corner;
        self
    }

    /// Start with the close button `distance` away from both edges of its corner.
    #[must_use]
    pub fn with_close_button_distance(mut self, distance: f64) -> Self {
        self.distance = distance;
        self
    }

    /// Start with a `size` by `size` close button.
    #[must_use]
    pub fn with_close_button_size(mut self, size: f64) -> Self {
        self.size = size;
        self
    }

    /// The close button node, once inserted.
    pub fn close_button(&self) -> Option<NodeId> {
        self.close_button
    }

    /// Corner the close button sits in; `None` when detached.
    pub fn close_corner(&self) -> Option<Corner> {
        self.corner
    }

    /// Close button distance from its corner's edges.
    pub fn close_button_distance(&self) -> f64 {
        self.distance
    }

    /// Close button side length.
    pub fn close_button_size(&self) -> f64 {
        self.size
    }

    /// Insert `node`, whose widget must be a [`Menu`], under `parent`, along
    /// with `close_button` as its close button.
    ///
    /// The close button is attached in the menu's corner, or left detached
    /// when the menu has no corner.
    pub fn insert(
        scene: &mut Scene,
        parent: NodeId,
        node: SceneNode,
        close_button: Button,
    ) -> Result<NodeId, SceneError> {
        let any: &dyn Any = &*node.widget;
        let Some(menu) = any.downcast_ref::<Self>() else {
            return Err(SceneError::TypeMismatch {
                id: node.id.clone().unwrap_or_default(),
                expected: core::any::type_name::<Self>(),
                found: node.widget.kind(),
            });
        };
        let (corner, distance, size) = (menu.corner, menu.distance, menu.size);

        let id = scene.insert(parent, node)?;
        let mut button = close_button.with_signal(SignalKind::CloseRequested);
        button.set_signal_source(Some(id));
        let mut layout = LayoutSpec::sized(size, size);
        if let Some(corner) = corner {
            corner.anchor(&mut layout, distance);
        }
        let button = SceneNode::new(button).with_layout(layout);
        let close = match corner {
            Some(_) => scene.insert(id, button)?,
            None => scene.insert_detached(button),
        };
        Self::get_mut(scene, id)?.close_button = Some(close);
        Ok(id)
    }

    /// Move the close button of `menu` to `corner`, or detach it with `None`.
    pub fn set_close_corner(
        scene: &mut Scene,
        menu: NodeId,
        corner: Option<Corner>,
    ) -> Result<(), SceneError> {
        let this = Self::get_mut(scene, menu)?;
        if this.corner == corner {
            return Ok(());
        }
        this.corner = corner;
        let (close, distance) = (this.close_button, this.distance);
        let Some(close) = close else {
            return Ok(());
        };
        match corner {
            Some(corner) => {
                if let Some(layout) = scene.layout_mut(close) {
                    corner.anchor(layout, distance);
                }
                if scene.parent_of(close).is_none() {
                    scene.add_child(menu, close)?;
                }
            }
            None => {
                if scene.parent_of(close) == Some(menu) {
                    scene.remove_child(menu, close)?;
                }
            }
        }
        Ok(())
    }

    /// Change how far the close button of `menu` sits from its corner's edges.
    pub fn set_close_button_distance(
        scene: &mut Scene,
        menu: NodeId,
        distance: f64,
    ) -> Result<(), SceneError> {
        let this = Self::get_mut(scene, menu)?;
        this.distance = distance;
        if let (Some(close), Some(corner)) = (this.close_button, this.corner)
            && let Some(layout) = scene.layout_mut(close)
        {
            corner.anchor(layout, distance);
        }
        Ok(())
    }

    /// Resize the close button of `menu`.
    pub fn set_close_button_size(
        scene: &mut Scene,
        menu: NodeId,
        size: f64,
    ) -> Result<(), SceneError> {
        let this = Self::get_mut(scene, menu)?;
        this.size = size;
        if let Some(close) = this.close_button
            && let Some(layout) = scene.layout_mut(close)
        {
            layout.width = Some(size);
            layout.height = Some(size);
        }
        Ok(())
    }

    fn get_mut(scene: &mut Scene, menu: NodeId) -> Result<&mut Self, SceneError> {
        let found = scene
            .widget(menu)
            .ok_or(SceneError::StaleNode(menu))?
            .kind();
        if scene.widget_as::<Self>(menu).is_none() {
            return Err(SceneError::TypeMismatch {
                id: scene.node_id(menu).unwrap_or_default().to_owned(),
                expected: core::any::type_name::<Self>(),
                found,
            });
        }
        scene
            .widget_as_mut::<Self>(menu)
            .ok_or(SceneError::StaleNode(menu))
    }
}

impl PointerHooks<HookCx> for Menu {}

impl Widget for Menu {
    fn default_style(&self) -> NodeStyle {
        NodeStyle {
            background_color: Color::WHITE,
            ..NodeStyle::default()
        }
    }

    fn draw_background(&self, cx: &DrawCx<'_>, surface: &mut dyn Surface) {
        match &cx.style.background {
            Some(nine_slice) => nine_slice.draw(
                surface,
                cx.rect,
                cx.style.background_color,
                cx.depth,
                BACKGROUND_EDGE_SCALE,
            ),
            None => cx.draw_style_background(surface),
        }
    }
}
