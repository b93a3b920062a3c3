// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-node data: identity, flags, layout, decoration and the widget itself.

use std::rc::Rc;

use trellis_layout::LayoutSpec;

use crate::surface::{Color, Sprite};
use crate::types::NodeFlags;
use crate::widget::{Panel, Widget};

/// Background and border decoration shared by every widget kind.
#[derive(Clone, Debug)]
pub struct NodeStyle {
    /// Background sprite; `None` paints a solid fill.
    pub background: Option<Rc<dyn Sprite>>,
    /// Background tint. Fully transparent backgrounds are not submitted.
    pub background_color: Color,
    /// Border sprite, drawn just above the background. `None` draws no border.
    pub border: Option<Rc<dyn Sprite>>,
    /// Border tint.
    pub border_color: Color,
    /// Border edge scale handed to the border sprite.
    pub border_width: f64,
}

impl Default for NodeStyle {
    fn default() -> Self {
        Self {
            background: None,
            background_color: Color::TRANSPARENT,
            border: None,
            border_color: Color::TRANSPARENT,
            border_width: 0.0,
        }
    }
}

/// A node ready to be inserted into a [`Scene`](crate::Scene).
///
/// ```rust
/// use trellis_layout::LayoutSpec;
/// use trellis_scene::{Color, Panel, SceneNode};
///
/// let node = SceneNode::new(Panel)
///     .with_id("sidebar")
///     .with_layout(LayoutSpec::default().with_left(0.0).with_width(200.0))
///     .with_background_color(Color::GRAY);
/// assert_eq!(node.id.as_deref(), Some("sidebar"));
/// ```
#[derive(Debug)]
pub struct SceneNode {
    /// Optional string identifier used by [`Scene::find_by_id`](crate::Scene::find_by_id).
    /// Uniqueness is not enforced; the first match in pre-order wins.
    pub id: Option<String>,
    /// Own visibility and interactability.
    pub flags: NodeFlags,
    /// Layout constraints.
    pub layout: LayoutSpec,
    /// Background and border.
    pub style: NodeStyle,
    /// Widget behavior.
    pub widget: Box<dyn Widget>,
}

impl Default for SceneNode {
    fn default() -> Self {
        Self::new(Panel)
    }
}

impl SceneNode {
    /// A visible, interactable node filling its parent, decorated with the
    /// widget's [`default_style`](Widget::default_style).
    pub fn new(widget: impl Widget) -> Self {
        Self {
            id: None,
            flags: NodeFlags::default(),
            layout: LayoutSpec::default(),
            style: widget.default_style(),
            widget: Box::new(widget),
        }
    }

    /// Set the string identifier.
    #[must_use]
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Set the layout constraints.
    #[must_use]
    pub fn with_layout(mut self, layout: LayoutSpec) -> Self {
        self.layout = layout;
        self
    }

    /// Set the decoration.
    #[must_use]
    pub fn with_style(mut self, style: NodeStyle) -> Self {
        self.style = style;
        self
    }

    /// Set the background tint.
    #[must_use]
    pub fn with_background_color(mut self, color: Color) -> Self {
        self.style.background_color = color;
        self
    }

    /// Start hidden.
    #[must_use]
    pub fn hidden(mut self) -> Self {
        self.flags.remove(NodeFlags::VISIBLE);
        self
    }

    /// Start non-interactable.
    #[must_use]
    pub fn non_interactable(mut self) -> Self {
        self.flags.remove(NodeFlags::INTERACTABLE);
        self
    }
}
