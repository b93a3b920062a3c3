// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core scene implementation: structure, lookup, geometry, per-frame passes.

use core::any::Any;
use core::time::Duration;

use kurbo::Rect;
use smallvec::SmallVec;
use trellis_layout::{LayoutError, LayoutSpec, Positioning, resolve};

use crate::depth::{DepthPolicy, OVERLAY_STEP};
use crate::node::{NodeStyle, SceneNode};
use crate::surface::Surface;
use crate::types::{NodeFlags, NodeId};
use crate::widget::{DrawCx, Widget, WidgetError};

/// Errors raised by scene operations.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum SceneError {
    /// The identifier does not refer to a live node.
    #[error("node {0:?} is not alive")]
    StaleNode(NodeId),
    /// No node carries the requested string id.
    #[error("no node with id {0:?}")]
    NotFound(String),
    /// A node carries the requested id but holds a different widget.
    #[error("node {id:?} holds a {found}, not a {expected}")]
    TypeMismatch {
        /// The string id looked up.
        id: String,
        /// Requested widget type.
        expected: &'static str,
        /// Widget type actually found.
        found: &'static str,
    },
    /// The root cannot be attached, detached or destroyed.
    #[error("the root node is fixed")]
    RootIsFixed,
    /// The node already has a parent.
    #[error("node {0:?} already has a parent")]
    AlreadyAttached(NodeId),
    /// Attaching would make a node its own ancestor.
    #[error("attaching {child:?} under {parent:?} would create a cycle")]
    WouldCycle {
        /// Requested parent.
        parent: NodeId,
        /// Requested child.
        child: NodeId,
    },
    /// The node is not a child of the given parent.
    #[error("{child:?} is not a child of {parent:?}")]
    NotAChild {
        /// Given parent.
        parent: NodeId,
        /// Given child.
        child: NodeId,
    },
    /// Child index past the end of the child list.
    #[error("child index {index} out of range for {len} children")]
    IndexOutOfRange {
        /// Requested index.
        index: usize,
        /// Number of children.
        len: usize,
    },
    /// A node's layout constraints could not be resolved.
    #[error("layout of node {node:?} failed")]
    Layout {
        /// The node whose constraints conflict.
        node: NodeId,
        /// Underlying cause.
        #[source]
        source: LayoutError,
    },
    /// A widget rejected a value.
    #[error(transparent)]
    Widget(#[from] WidgetError),
}

/// Retained UI tree.
///
/// Nodes live in an arena and are addressed by generational [`NodeId`]s.
/// There is always exactly one root, created with the scene. Other nodes are
/// either attached somewhere below the root or detached (no parent); detached
/// nodes stay alive until [`Scene::destroy`] but are neither drawn nor
/// updated.
///
/// Rectangles are not cached: [`Scene::rect`] resolves the ancestor chain
/// every time, so edits to layout or to the viewport are visible immediately.
///
/// ## Example
///
/// ```rust
/// use kurbo::Rect;
/// use trellis_layout::LayoutSpec;
/// use trellis_scene::{Panel, Scene, SceneNode};
///
/// let mut scene = Scene::new(Rect::new(0.0, 0.0, 800.0, 600.0));
/// let root = scene.root();
/// let bar = scene
///     .insert(
///         root,
///         SceneNode::new(Panel)
///             .with_layout(LayoutSpec::default().with_top(0.0).with_height(40.0)),
///     )
///     .unwrap();
///
/// assert_eq!(scene.rect(bar).unwrap(), Rect::new(0.0, 0.0, 800.0, 40.0));
/// assert!(scene.depth(bar).unwrap() > scene.depth(root).unwrap());
/// ```
pub struct Scene {
    /// slots
    nodes: Vec<Option<Node>>,
    /// last generation per slot (persists across frees)
    generations: Vec<u32>,
    free_list: Vec<usize>,
    root: NodeId,
    viewport: Rect,
    depth_policy: DepthPolicy,
}

impl core::fmt::Debug for Scene {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let total = self.nodes.len();
        let alive = self.nodes.iter().filter(|n| n.is_some()).count();
        f.debug_struct("Scene")
            .field("nodes_total", &total)
            .field("nodes_alive", &alive)
            .field("free_list", &self.free_list.len())
            .field("root", &self.root)
            .field("viewport", &self.viewport)
            .field("depth_policy", &self.depth_policy)
            .finish_non_exhaustive()
    }
}

#[derive(Debug)]
struct Node {
    generation: u32,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    data: SceneNode,
}

impl Scene {
    /// Create a scene whose root fills `viewport`.
    pub fn new(viewport: Rect) -> Self {
        Self::with_depth_policy(viewport, DepthPolicy::default())
    }

    /// Create a scene with a custom depth policy.
    pub fn with_depth_policy(viewport: Rect, depth_policy: DepthPolicy) -> Self {
        let mut scene = Self {
            nodes: Vec::new(),
            generations: Vec::new(),
            free_list: Vec::new(),
            root: NodeId::new(0, 1),
            viewport,
            depth_policy,
        };
        scene.root = scene.alloc(SceneNode::default().with_id("root"));
        scene
    }

    // --- structure ---

    /// Insert `node` as the last child of `parent`.
    pub fn insert(&mut self, parent: NodeId, node: SceneNode) -> Result<NodeId, SceneError> {
        self.slot(parent)?;
        let id = self.alloc(node);
        self.link_parent(id, parent);
        Ok(id)
    }

    /// Insert `node` without a parent. Attach it later with [`Scene::add_child`].
    pub fn insert_detached(&mut self, node: SceneNode) -> NodeId {
        self.alloc(node)
    }

    /// Attach a detached node as the last child of `parent`.
    pub fn add_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), SceneError> {
        self.slot(parent)?;
        let node = self.slot(child)?;
        if child == self.root {
            return Err(SceneError::RootIsFixed);
        }
        if node.parent.is_some() {
            return Err(SceneError::AlreadyAttached(child));
        }
        let mut cursor = Some(parent);
        while let Some(ancestor) = cursor {
            if ancestor == child {
                return Err(SceneError::WouldCycle { parent, child });
            }
            cursor = self.parent_of(ancestor);
        }
        self.link_parent(child, parent);
        Ok(())
    }

    /// Detach `child` from `parent`. The child stays alive.
    pub fn remove_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), SceneError> {
        self.slot(parent)?;
        if self.slot(child)?.parent != Some(parent) {
            return Err(SceneError::NotAChild { parent, child });
        }
        self.unlink_parent(child, parent);
        Ok(())
    }

    /// Detach the child at `index` of `parent`, returning it.
    pub fn remove_child_at(&mut self, parent: NodeId, index: usize) -> Result<NodeId, SceneError> {
        let children = &self.slot(parent)?.children;
        let child = *children.get(index).ok_or(SceneError::IndexOutOfRange {
            index,
            len: children.len(),
        })?;
        self.unlink_parent(child, parent);
        Ok(child)
    }

    /// Detach every child of `parent`, returning them in their former order.
    pub fn clear_children(&mut self, parent: NodeId) -> Result<Vec<NodeId>, SceneError> {
        let children = core::mem::take(&mut self.slot_mut(parent)?.children);
        for &child in &children {
            if let Ok(node) = self.slot_mut(child) {
                node.parent = None;
            }
        }
        Ok(children)
    }

    /// Free `id` and its whole subtree, returning the freed ids in pre-order.
    ///
    /// Freed ids become stale; their slots are reused with a new generation.
    pub fn destroy(&mut self, id: NodeId) -> Result<Vec<NodeId>, SceneError> {
        if id == self.root {
            return Err(SceneError::RootIsFixed);
        }
        if let Some(parent) = self.slot(id)?.parent {
            self.unlink_parent(id, parent);
        }
        let freed = self.subtree(id);
        for &n in &freed {
            self.nodes[n.idx()] = None;
            self.free_list.push(n.idx());
        }
        Ok(freed)
    }

    /// `id` followed by all its descendants in pre-order. Empty if `id` is stale.
    pub fn subtree(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack = vec![id];
        while let Some(next) = stack.pop() {
            let Ok(node) = self.slot(next) else {
                continue;
            };
            out.push(next);
            stack.extend(node.children.iter().rev().copied());
        }
        out
    }

    // --- lookup ---

    /// Search `from` and its descendants in pre-order for a node with string
    /// id `id`. The first match wins.
    pub fn find_by_id(&self, from: NodeId, id: &str) -> Option<NodeId> {
        self.find(from, |node| node.id.as_deref() == Some(id))
    }

    /// Search `from` and its descendants in pre-order for the first node
    /// matching `pred`.
    pub fn find(&self, from: NodeId, mut pred: impl FnMut(&SceneNode) -> bool) -> Option<NodeId> {
        let mut stack = vec![from];
        while let Some(next) = stack.pop() {
            let Ok(node) = self.slot(next) else {
                continue;
            };
            if pred(&node.data) {
                return Some(next);
            }
            stack.extend(node.children.iter().rev().copied());
        }
        None
    }

    /// Like [`Scene::find_by_id`], but downcasts the widget to `T`.
    pub fn find_by_id_typed<T: Widget>(&self, from: NodeId, id: &str) -> Result<&T, SceneError> {
        let node = self
            .find_by_id(from, id)
            .ok_or_else(|| SceneError::NotFound(id.to_owned()))?;
        let widget: &dyn Widget = &*self.slot(node)?.data.widget;
        let found = widget.kind();
        let any: &dyn Any = widget;
        any.downcast_ref::<T>()
            .ok_or_else(|| SceneError::TypeMismatch {
                id: id.to_owned(),
                expected: core::any::type_name::<T>(),
                found,
            })
    }

    /// Mutable variant of [`Scene::find_by_id_typed`].
    pub fn find_by_id_typed_mut<T: Widget>(
        &mut self,
        from: NodeId,
        id: &str,
    ) -> Result<&mut T, SceneError> {
        let node = self
            .find_by_id(from, id)
            .ok_or_else(|| SceneError::NotFound(id.to_owned()))?;
        let widget: &mut dyn Widget = &mut *self.slot_mut(node)?.data.widget;
        let found = widget.kind();
        let any: &mut dyn Any = widget;
        any.downcast_mut::<T>()
            .ok_or_else(|| SceneError::TypeMismatch {
                id: id.to_owned(),
                expected: core::any::type_name::<T>(),
                found,
            })
    }

    /// The widget of `id` as a `T`, or `None` if stale or of another type.
    pub fn widget_as<T: Widget>(&self, id: NodeId) -> Option<&T> {
        let any: &dyn Any = self.widget(id)?;
        any.downcast_ref::<T>()
    }

    /// Mutable variant of [`Scene::widget_as`].
    pub fn widget_as_mut<T: Widget>(&mut self, id: NodeId) -> Option<&mut T> {
        let any: &mut dyn Any = self.widget_mut(id)?;
        any.downcast_mut::<T>()
    }

    /// Run a fallible edit on the widget of `id` as a `T`.
    ///
    /// A rejected edit comes back as [`SceneError::Widget`].
    ///
    /// ```rust
    /// use kurbo::Rect;
    /// use trellis_scene::{ContinuousProgressBar, Scene, SceneError, SceneNode};
    ///
    /// let mut scene = Scene::new(Rect::new(0.0, 0.0, 100.0, 100.0));
    /// let bar = ContinuousProgressBar::new(0.5, 0.0, 1.0).unwrap();
    /// let bar = scene.insert(scene.root(), SceneNode::new(bar)).unwrap();
    ///
    /// scene.edit_widget(bar, |b: &mut ContinuousProgressBar| b.set_value(0.8)).unwrap();
    /// let err = scene.edit_widget(bar, |b: &mut ContinuousProgressBar| b.set_value(2.0));
    /// assert!(matches!(err, Err(SceneError::Widget(_))));
    /// ```
    pub fn edit_widget<T: Widget, R>(
        &mut self,
        id: NodeId,
        edit: impl FnOnce(&mut T) -> Result<R, WidgetError>,
    ) -> Result<R, SceneError> {
        let data = &mut self.slot_mut(id)?.data;
        let found = data.widget.kind();
        let any: &mut dyn Any = &mut *data.widget;
        let widget = any
            .downcast_mut::<T>()
            .ok_or_else(|| SceneError::TypeMismatch {
                id: data.id.clone().unwrap_or_default(),
                expected: core::any::type_name::<T>(),
                found,
            })?;
        Ok(edit(widget)?)
    }

    // --- accessors ---

    /// The root node.
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Returns true if `id` refers to a live node.
    pub fn is_alive(&self, id: NodeId) -> bool {
        self.slot(id).is_ok()
    }

    /// Number of live nodes, root included.
    pub fn len(&self) -> usize {
        self.nodes.len() - self.free_list.len()
    }

    /// Always false: the root is always present.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Returns the parent of a node if live, or `None` for roots, detached
    /// nodes and stale ids.
    pub fn parent_of(&self, id: NodeId) -> Option<NodeId> {
        self.slot(id).ok()?.parent
    }

    /// Get the children of a node, or empty slice if node is stale.
    pub fn children_of(&self, id: NodeId) -> &[NodeId] {
        self.slot(id).map(|n| n.children.as_slice()).unwrap_or(&[])
    }

    /// Topmost ancestor of `id` (itself if it has no parent).
    pub fn root_of(&self, id: NodeId) -> Option<NodeId> {
        self.slot(id).ok()?;
        let mut top = id;
        while let Some(parent) = self.parent_of(top) {
            top = parent;
        }
        Some(top)
    }

    /// Number of ancestors of `id`.
    pub fn ancestor_count(&self, id: NodeId) -> Option<usize> {
        let mut cursor = self.slot(id).ok()?.parent;
        let mut count = 0;
        while let Some(parent) = cursor {
            count += 1;
            cursor = self.parent_of(parent);
        }
        Some(count)
    }

    /// String id of a node.
    pub fn node_id(&self, id: NodeId) -> Option<&str> {
        self.slot(id).ok()?.data.id.as_deref()
    }

    /// Replace the string id of a node.
    pub fn set_node_id(&mut self, id: NodeId, name: Option<String>) -> Result<(), SceneError> {
        self.slot_mut(id)?.data.id = name;
        Ok(())
    }

    /// Own flags of a node.
    pub fn flags(&self, id: NodeId) -> Option<NodeFlags> {
        Some(self.slot(id).ok()?.data.flags)
    }

    /// Own visibility flag.
    pub fn is_visible(&self, id: NodeId) -> bool {
        self.flags(id)
            .is_some_and(|f| f.contains(NodeFlags::VISIBLE))
    }

    /// Show or hide a node and its subtree.
    pub fn set_visible(&mut self, id: NodeId, visible: bool) -> Result<(), SceneError> {
        self.slot_mut(id)?
            .data
            .flags
            .set(NodeFlags::VISIBLE, visible);
        Ok(())
    }

    /// Own interactable flag, ignoring ancestors.
    pub fn interactable(&self, id: NodeId) -> bool {
        self.flags(id)
            .is_some_and(|f| f.contains(NodeFlags::INTERACTABLE))
    }

    /// Enable or disable pointer routing to a node and its subtree.
    pub fn set_interactable(&mut self, id: NodeId, interactable: bool) -> Result<(), SceneError> {
        self.slot_mut(id)?
            .data
            .flags
            .set(NodeFlags::INTERACTABLE, interactable);
        Ok(())
    }

    /// True when the node and every ancestor are interactable.
    pub fn effective_interactable(&self, id: NodeId) -> bool {
        let mut cursor = Some(id);
        while let Some(n) = cursor {
            if !self.interactable(n) {
                return false;
            }
            cursor = self.parent_of(n);
        }
        true
    }

    /// Layout constraints of a node.
    pub fn layout(&self, id: NodeId) -> Option<&LayoutSpec> {
        Some(&self.slot(id).ok()?.data.layout)
    }

    /// Mutable layout constraints of a node.
    pub fn layout_mut(&mut self, id: NodeId) -> Option<&mut LayoutSpec> {
        Some(&mut self.slot_mut(id).ok()?.data.layout)
    }

    /// Replace the layout constraints of a node.
    pub fn set_layout(&mut self, id: NodeId, layout: LayoutSpec) -> Result<(), SceneError> {
        self.slot_mut(id)?.data.layout = layout;
        Ok(())
    }

    /// Decoration of a node.
    pub fn style(&self, id: NodeId) -> Option<&NodeStyle> {
        Some(&self.slot(id).ok()?.data.style)
    }

    /// Mutable decoration of a node.
    pub fn style_mut(&mut self, id: NodeId) -> Option<&mut NodeStyle> {
        Some(&mut self.slot_mut(id).ok()?.data.style)
    }

    /// Widget of a node.
    pub fn widget(&self, id: NodeId) -> Option<&dyn Widget> {
        Some(&*self.slot(id).ok()?.data.widget)
    }

    /// Mutable widget of a node.
    pub fn widget_mut(&mut self, id: NodeId) -> Option<&mut dyn Widget> {
        Some(&mut *self.slot_mut(id).ok()?.data.widget)
    }

    /// The rectangle everything is ultimately resolved against.
    pub fn viewport(&self) -> Rect {
        self.viewport
    }

    /// Replace the viewport. Takes effect on the next geometry query.
    pub fn set_viewport(&mut self, viewport: Rect) {
        self.viewport = viewport;
    }

    /// Depth policy in use.
    pub fn depth_policy(&self) -> DepthPolicy {
        self.depth_policy
    }

    /// Replace the depth policy.
    pub fn set_depth_policy(&mut self, policy: DepthPolicy) {
        self.depth_policy = policy;
    }

    // --- geometry ---

    /// Resolve the rectangle of `id`.
    ///
    /// Walks up to the nearest absolutely positioned ancestor-or-self (or the
    /// topmost ancestor), then resolves down from the viewport.
    pub fn rect(&self, id: NodeId) -> Result<Rect, SceneError> {
        let mut chain: SmallVec<[NodeId; 16]> = SmallVec::new();
        let mut cursor = id;
        loop {
            let node = self.slot(cursor)?;
            chain.push(cursor);
            if node.data.layout.position == Positioning::Absolute {
                break;
            }
            match node.parent {
                Some(parent) => cursor = parent,
                None => break,
            }
        }
        let mut rect = self.viewport;
        for &n in chain.iter().rev() {
            rect = resolve(&self.slot(n)?.data.layout, rect)
                .map_err(|source| SceneError::Layout { node: n, source })?;
        }
        Ok(rect)
    }

    /// Depth value of `id` under the scene's depth policy.
    pub fn depth(&self, id: NodeId) -> Option<f64> {
        self.ancestor_count(id).map(|n| self.depth_policy.depth(n))
    }

    // --- per-frame ---

    /// Run every attached widget's update, parents before children. Hidden
    /// subtrees are included.
    pub fn update(&mut self, dt: Duration) {
        for id in self.subtree(self.root) {
            if let Ok(node) = self.slot_mut(id) {
                node.data.widget.update(dt);
            }
        }
    }

    /// Draw the attached tree into `surface`.
    ///
    /// A node whose layout fails to resolve draws nothing. Its relatively
    /// positioned descendants have nothing to resolve against and are skipped
    /// too; absolutely positioned ones are still drawn.
    pub fn draw(&self, surface: &mut dyn Surface) {
        self.draw_node(self.root, Some(self.viewport), 0, surface);
    }

    fn draw_node(
        &self,
        id: NodeId,
        parent_rect: Option<Rect>,
        ancestors: usize,
        surface: &mut dyn Surface,
    ) {
        let Ok(node) = self.slot(id) else {
            return;
        };
        let data = &node.data;
        if !data.flags.contains(NodeFlags::VISIBLE) {
            return;
        }
        let basis = match data.layout.position {
            Positioning::Absolute => Some(self.viewport),
            Positioning::Relative => parent_rect,
        };
        let rect = basis.and_then(|basis| match resolve(&data.layout, basis) {
            Ok(rect) => Some(rect),
            Err(err) => {
                tracing::warn!(node = ?id, error = %err, "layout failed; node not drawn");
                None
            }
        });
        if let Some(rect) = rect {
            let depth = self.depth_policy.depth(ancestors);
            let cx = DrawCx {
                node: id,
                rect,
                depth,
                style: &data.style,
            };
            data.widget.draw_background(&cx, surface);
            if let Some(border) = &data.style.border {
                border.draw(
                    surface,
                    rect,
                    data.style.border_color,
                    depth + OVERLAY_STEP,
                    data.style.border_width,
                );
            }
            data.widget.draw_content(&cx, surface);
        }
        for &child in &node.children {
            self.draw_node(child, rect, ancestors + 1, surface);
        }
    }

    // --- internals ---

    fn slot(&self, id: NodeId) -> Result<&Node, SceneError> {
        self.nodes
            .get(id.idx())
            .and_then(|n| n.as_ref())
            .filter(|n| n.generation == id.1)
            .ok_or(SceneError::StaleNode(id))
    }

    fn slot_mut(&mut self, id: NodeId) -> Result<&mut Node, SceneError> {
        self.nodes
            .get_mut(id.idx())
            .and_then(|n| n.as_mut())
            .filter(|n| n.generation == id.1)
            .ok_or(SceneError::StaleNode(id))
    }

    fn alloc(&mut self, data: SceneNode) -> NodeId {
        let node = |generation| Node {
            generation,
            parent: None,
            children: Vec::new(),
            data,
        };
        let (idx, generation) = if let Some(idx) = self.free_list.pop() {
            let generation = self.generations[idx].saturating_add(1);
            self.generations[idx] = generation;
            self.nodes[idx] = Some(node(generation));
            (idx, generation)
        } else {
            let generation = 1_u32;
            self.nodes.push(Some(node(generation)));
            self.generations.push(generation);
            (self.nodes.len() - 1, generation)
        };
        #[allow(
            clippy::cast_possible_truncation,
            reason = "NodeId uses 32-bit indices."
        )]
        let idx = idx as u32;
        NodeId::new(idx, generation)
    }

    /// Both ids must be live.
    fn link_parent(&mut self, id: NodeId, parent: NodeId) {
        if let Ok(p) = self.slot_mut(parent) {
            p.children.push(id);
        }
        if let Ok(n) = self.slot_mut(id) {
            n.parent = Some(parent);
        }
    }

    /// Both ids must be live.
    fn unlink_parent(&mut self, id: NodeId, parent: NodeId) {
        if let Ok(p) = self.slot_mut(parent) {
            p.children.retain(|c| *c != id);
        }
        if let Ok(n) = self.slot_mut(id) {
            n.parent = None;
        }
    }
}
