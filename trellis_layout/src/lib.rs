// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Trellis Layout: edge and size constraints for retained-mode UI boxes.
//!
//! Every UI box carries a [`LayoutSpec`]: six optional offsets (`left`, `right`,
//! `top`, `bottom`, `width`, `height`) and a [`Positioning`] mode. [`resolve`]
//! turns a layout plus a parent rectangle into an absolute [`kurbo::Rect`].
//!
//! ## Resolution rules
//!
//! Each axis is resolved independently. For the horizontal axis:
//!
//! | left | right | width | result |
//! |---|---|---|---|
//! | set | set | set | [`LayoutError::Conflict`] |
//! | set | set | - | `x = parent.x + left`, `w = parent.w - left - right` |
//! | set | - | set | `x = parent.x + left`, `w = width` |
//! | - | set | set | `x = parent.x + parent.w - width - right`, `w = width` |
//! | set | - | - | `x = parent.x + left`, `w = parent.w - left` |
//! | - | set | - | `x = parent.x`, `w = parent.w - right` |
//! | - | - | set | centered, `w = width` |
//! | - | - | - | fill the parent |
//!
//! The vertical axis is symmetric with `top`, `bottom` and `height`.
//!
//! ## Not cached
//!
//! [`resolve`] is pure and cheap. Callers are expected to call it again every
//! time they need a rectangle rather than storing the result, so a layout can be
//! mutated at any time without an invalidation step. Conflicts are therefore
//! detected at resolution time, not when a layout is built.
//!
//! ## Positioning
//!
//! [`Positioning`] only records which rectangle a box anchors to: its tree
//! parent's ([`Positioning::Relative`]) or the viewport
//! ([`Positioning::Absolute`]). Picking that rectangle is up to the owner of
//! the tree; `resolve` just takes whatever parent rectangle it is given.
//!
//! ```rust
//! use kurbo::Rect;
//! use trellis_layout::{LayoutSpec, resolve};
//!
//! let viewport = Rect::new(0.0, 0.0, 800.0, 600.0);
//! let layout = LayoutSpec::default()
//!     .with_left(10.0)
//!     .with_top(10.0)
//!     .with_width(100.0)
//!     .with_height(50.0);
//! assert_eq!(resolve(&layout, viewport).unwrap(), Rect::new(10.0, 10.0, 110.0, 60.0));
//! ```

mod resolve;
mod spec;

pub use resolve::{LayoutError, resolve, resolve_axis};
pub use spec::{Axis, LayoutSpec, Positioning};
