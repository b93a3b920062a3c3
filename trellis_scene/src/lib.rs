// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Trellis Scene: a retained-mode widget tree for 2D games and tools.
//!
//! - Holds a hierarchy of nodes, each with a [`LayoutSpec`](trellis_layout::LayoutSpec),
//!   [`NodeFlags`], a [`NodeStyle`] and a boxed [`Widget`].
//! - Resolves node rectangles on demand against the parent or the viewport.
//! - Assigns every node a depth that grows with nesting, and uses it both
//!   for compositing and for deciding which node a click lands on.
//! - Routes pointer hooks to widgets through [`trellis_pointer`].
//!
//! ## Three pieces
//!
//! - [`Scene`]: arena tree with generational [`NodeId`] handles and the
//!   per-frame update and draw passes.
//! - [`Widget`]: per-kind behavior. Widgets draw into the rectangle they are
//!   given and react to pointer hooks; they never see the scene. Requests
//!   that need the scene (like closing a menu) come out as [`Signal`]s.
//! - [`Ui`]: one explicit context owning the scene, a
//!   [`PointerRouter`](trellis_pointer::PointerRouter) and a pointer tracker.
//!   Nodes inserted through it are registered for routing.
//!
//! ## Drawing
//!
//! Drawing goes through the [`Surface`] seam. The scene submits rectangles
//! with a color and a depth, pre-order: for each visible node its background,
//! then its border one [`OVERLAY_STEP`] above, then its widget content, then
//! its children. Hidden nodes skip their whole subtree. Submission order is
//! not stacking order; back ends sort by depth ([`DrawList::sorted`] shows
//! how).
//!
//! Images, nine-slices and text are opaque [`Sprite`] and [`TextRenderer`]
//! implementations supplied by the host.
//!
//! ## Hit testing
//!
//! [`Scene`] implements [`HitTargets`](trellis_pointer::HitTargets): a node
//! contains a point if its resolved rectangle does (half-open), it is
//! interactable if it and every ancestor are and it is attached below the
//! root, and its depth is the same value used for drawing. Visibility does
//! not affect hit testing.
//!
//! ```rust
//! use std::rc::Rc;
//!
//! use kurbo::Rect;
//! use trellis_layout::LayoutSpec;
//! use trellis_scene::{Button, Color, DrawList, Panel, SceneNode, SolidSprite, Ui};
//!
//! let mut ui = Ui::new(Rect::new(0.0, 0.0, 320.0, 240.0));
//! let root = ui.scene().root();
//! let panel = ui
//!     .insert(
//!         root,
//!         SceneNode::new(Panel)
//!             .with_layout(LayoutSpec::all(20.0))
//!             .with_background_color(Color::GRAY),
//!     )
//!     .unwrap();
//! let button = SceneNode::new(Button::new(Rc::new(SolidSprite)))
//!     .with_layout(LayoutSpec::sized(80.0, 24.0));
//! ui.insert(panel, button).unwrap();
//!
//! let mut list = DrawList::default();
//! ui.draw(&mut list);
//! assert_eq!(list.len(), 2);
//! assert!(list.submissions()[1].depth > list.submissions()[0].depth);
//! ```

mod depth;
mod hit;
mod node;
mod surface;
mod tree;
mod types;
mod ui;
mod widget;

pub use depth::{DepthPolicy, Layer, OVERLAY_STEP};
pub use node::{NodeStyle, SceneNode};
pub use surface::{
    Color, DrawList, HorizontalAlign, SolidSprite, SourceRegion, Sprite, Submission, Surface,
    TextFit, TextProps, TextRenderer, VerticalAlign,
};
pub use tree::{Scene, SceneError};
pub use types::{NodeFlags, NodeId};
pub use ui::{Ui, UiConfig};
pub use widget::{
    Button, ContinuousProgressBar, Corner, DrawCx, HookCx, ImageWidget, Label, Menu, Panel,
    Signal, SignalKind, TickProgressBar, Widget, WidgetError,
};
