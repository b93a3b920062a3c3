// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! One explicit context owning the scene, the pointer router and the pointer
//! tracker.

use core::time::Duration;

use kurbo::Rect;
use trellis_pointer::{
    PointerRouter, PointerSample, PointerTracker, RawPointer, RouterConfig, Tick,
};

use crate::depth::DepthPolicy;
use crate::node::SceneNode;
use crate::surface::Surface;
use crate::tree::{Scene, SceneError};
use crate::types::NodeId;
use crate::widget::{Button, HookCx, Menu, Signal};

/// Configuration for a [`Ui`].
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct UiConfig {
    /// Depth assignment for scene nodes.
    pub depth: DepthPolicy,
    /// Router policies.
    pub router: RouterConfig,
}

/// Scene plus pointer routing.
///
/// Nodes inserted through the `Ui` are registered with the router; the root
/// never is. Nodes created or destroyed directly on [`Ui::scene_mut`] bypass
/// the registry and must be registered with [`Ui::register_subtree`] or
/// cleaned up by the caller.
///
/// ```rust
/// use std::rc::Rc;
///
/// use kurbo::Rect;
/// use trellis_layout::LayoutSpec;
/// use trellis_pointer::RawPointer;
/// use trellis_scene::{Button, SceneNode, SignalKind, SolidSprite, Ui};
///
/// let mut ui = Ui::new(Rect::new(0.0, 0.0, 640.0, 480.0));
/// let root = ui.scene().root();
/// let ok = ui
///     .insert(
///         root,
///         SceneNode::new(Button::new(Rc::new(SolidSprite)))
///             .with_layout(LayoutSpec::sized(100.0, 40.0)),
///     )
///     .unwrap();
///
/// let at = RawPointer::at((320.0, 210.0));
/// ui.tick(at);
/// ui.tick(at.with_left(true));
/// ui.tick(at);
///
/// let signals: Vec<_> = ui.drain_signals().collect();
/// assert_eq!(signals.len(), 1);
/// assert_eq!((signals[0].source, signals[0].kind), (ok, SignalKind::Clicked));
/// ```
#[derive(Debug)]
pub struct Ui {
    scene: Scene,
    router: PointerRouter<NodeId>,
    tracker: PointerTracker,
    signals: Vec<Signal>,
    last_tick: Tick<NodeId>,
}

impl Ui {
    /// A context over an empty scene filling `viewport`.
    pub fn new(viewport: Rect) -> Self {
        Self::with_config(viewport, UiConfig::default())
    }

    /// A context with explicit configuration.
    pub fn with_config(viewport: Rect, config: UiConfig) -> Self {
        Self {
            scene: Scene::with_depth_policy(viewport, config.depth),
            router: PointerRouter::with_config(config.router),
            tracker: PointerTracker::new(),
            signals: Vec::new(),
            last_tick: Tick::default(),
        }
    }

    /// Insert `node` under `parent` and register it for pointer routing.
    pub fn insert(&mut self, parent: NodeId, node: SceneNode) -> Result<NodeId, SceneError> {
        let id = self.scene.insert(parent, node)?;
        self.router.register(id);
        tracing::debug!(node = ?id, "registered");
        Ok(id)
    }

    /// Insert a menu and its close button, registering both.
    pub fn insert_menu(
        &mut self,
        parent: NodeId,
        node: SceneNode,
        close_button: Button,
    ) -> Result<NodeId, SceneError> {
        let menu = Menu::insert(&mut self.scene, parent, node, close_button)?;
        self.register_subtree(menu);
        if let Some(close) = self.scene.widget_as::<Menu>(menu).and_then(Menu::close_button) {
            self.router.register(close);
        }
        Ok(menu)
    }

    /// Register `id` and every descendant. Already registered nodes keep
    /// their place in the registry.
    pub fn register_subtree(&mut self, id: NodeId) {
        for node in self.scene.subtree(id) {
            if node != self.scene.root() && self.router.register(node) {
                tracing::debug!(?node, "registered");
            }
        }
    }

    /// Unregister and free `id` and its subtree, returning the freed ids.
    ///
    /// Detached close buttons of menus in the subtree are freed too.
    pub fn destroy(&mut self, id: NodeId) -> Result<Vec<NodeId>, SceneError> {
        if id == self.scene.root() {
            return Err(SceneError::RootIsFixed);
        }
        if !self.scene.is_alive(id) {
            return Err(SceneError::StaleNode(id));
        }
        let mut doomed = self.scene.subtree(id);
        let orphans: Vec<NodeId> = doomed
            .iter()
            .filter_map(|&n| self.scene.widget_as::<Menu>(n)?.close_button())
            .filter(|&close| self.scene.is_alive(close) && self.scene.parent_of(close).is_none())
            .collect();
        for &orphan in &orphans {
            doomed.extend(self.scene.subtree(orphan));
        }
        for &node in &doomed {
            if self.router.unregister(node) {
                tracing::debug!(?node, "unregistered");
            }
        }
        let mut freed = self.scene.destroy(id)?;
        for orphan in orphans {
            freed.extend(self.scene.destroy(orphan)?);
        }
        Ok(freed)
    }

    /// Advance the pointer, route one tick, and deliver every per-target hook
    /// to its widget in order.
    ///
    /// Signals emitted by widgets are queued for [`Ui::drain_signals`].
    pub fn tick(&mut self, raw: RawPointer) -> &Tick<NodeId> {
        let sample = self.tracker.advance(raw);
        let tick = self.router.tick(&sample, &self.scene);
        for (target, hook) in tick.hooks() {
            let Some(widget) = self.scene.widget_mut(target) else {
                tracing::trace!(node = ?target, ?hook, "dropping hook for stale node");
                continue;
            };
            let mut cx = HookCx::new(target);
            widget.handle(hook, &mut cx);
            self.signals.extend(cx.into_signals());
        }
        self.last_tick = tick;
        &self.last_tick
    }

    /// The most recent tick.
    pub fn last_tick(&self) -> &Tick<NodeId> {
        &self.last_tick
    }

    /// Run widget updates.
    pub fn update(&mut self, dt: Duration) {
        self.scene.update(dt);
    }

    /// Draw the scene.
    pub fn draw(&self, surface: &mut dyn Surface) {
        self.scene.draw(surface);
    }

    /// Take every queued signal, oldest first.
    pub fn drain_signals(&mut self) -> impl Iterator<Item = Signal> + '_ {
        self.signals.drain(..)
    }

    /// Latest pointer sample.
    pub fn pointer(&self) -> &PointerSample {
        self.tracker.sample()
    }

    /// The scene.
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// The scene, mutably.
    pub fn scene_mut(&mut self) -> &mut Scene {
        &mut self.scene
    }

    /// The router.
    pub fn router(&self) -> &PointerRouter<NodeId> {
        &self.router
    }

    /// Resize the viewport.
    pub fn set_viewport(&mut self, viewport: Rect) {
        self.scene.set_viewport(viewport);
    }
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use trellis_layout::LayoutSpec;
    use trellis_pointer::{Miss, PointerHook};

    use super::*;
    use crate::surface::{Color, SolidSprite};
    use crate::widget::{Panel, SignalKind};

    fn ui() -> Ui {
        Ui::new(Rect::new(0.0, 0.0, 400.0, 300.0))
    }

    fn button_node() -> SceneNode {
        SceneNode::new(Button::new(Rc::new(SolidSprite)))
            .with_layout(LayoutSpec::sized(50.0, 20.0).with_left(10.0).with_top(10.0))
    }

    #[test]
    fn root_is_never_registered() {
        let mut ui = ui();
        let root = ui.scene().root();
        let panel = ui.insert(root, SceneNode::new(Panel)).unwrap();
        assert_eq!(ui.router().registered(), &[panel]);
        ui.register_subtree(root);
        assert_eq!(ui.router().registered(), &[panel]);
    }

    #[test]
    fn button_click_flow() {
        let mut ui = ui();
        let root = ui.scene().root();
        let button = ui.insert(root, button_node()).unwrap();
        let at = RawPointer::at((20.0, 15.0));

        let hooks: Vec<_> = ui.tick(at).for_target(button).collect();
        assert_eq!(hooks, [PointerHook::HoverStart]);
        assert_eq!(ui.scene().widget_as::<Button>(button).unwrap().tint(), Color::LIGHT_GRAY);

        ui.tick(at.with_left(true));
        let hooks: Vec<_> = ui.tick(at.with_left(true)).for_target(button).collect();
        assert_eq!(hooks, [PointerHook::Hover, PointerHook::Click]);
        assert_eq!(ui.scene().widget_as::<Button>(button).unwrap().tint(), Color::PALE_GREEN);

        let hooks: Vec<_> = ui.tick(at).for_target(button).collect();
        assert_eq!(hooks, [PointerHook::Hover, PointerHook::ClickEnd]);
        assert_eq!(ui.scene().widget_as::<Button>(button).unwrap().tint(), Color::WHITE);

        let signals: Vec<_> = ui.drain_signals().collect();
        assert_eq!(
            signals,
            [Signal {
                source: button,
                kind: SignalKind::Clicked
            }]
        );
        assert_eq!(ui.drain_signals().count(), 0);
    }

    #[test]
    fn leaving_while_held_cancels_without_signal() {
        let mut ui = ui();
        let root = ui.scene().root();
        let button = ui.insert(root, button_node()).unwrap();
        let inside = RawPointer::at((20.0, 15.0));
        let outside = RawPointer::at((200.0, 200.0));

        ui.tick(inside);
        ui.tick(inside.with_left(true));
        let hooks: Vec<_> = ui.tick(outside.with_left(true)).for_target(button).collect();
        assert_eq!(hooks, [PointerHook::ClickCanceled, PointerHook::HoverEnd]);
        ui.tick(outside);
        assert_eq!(ui.drain_signals().count(), 0);
    }

    #[test]
    fn press_over_nothing_is_a_miss() {
        let mut ui = ui();
        let root = ui.scene().root();
        let button = ui.insert(root, button_node()).unwrap();
        let far = RawPointer::at((300.0, 250.0));
        ui.tick(far);
        let tick = ui.tick(far.with_left(true));
        assert_eq!(tick.misses().collect::<Vec<_>>(), [Miss::ClickStart]);
        assert_eq!(
            tick.for_target(button).collect::<Vec<_>>(),
            [PointerHook::ClickStartMissAll]
        );
        assert!(ui.pointer().left_pressed());
    }

    #[test]
    fn menu_close_button_requests_close_for_menu() {
        let mut ui = ui();
        let root = ui.scene().root();
        let menu = ui
            .insert_menu(
                root,
                SceneNode::new(Menu::new()).with_layout(LayoutSpec::all(20.0)),
                Button::new(Rc::new(SolidSprite)),
            )
            .unwrap();
        let close = ui.scene().widget_as::<Menu>(menu).unwrap().close_button().unwrap();
        assert_eq!(ui.router().registered(), &[menu, close]);

        // Menu spans 20..380; close button is at 380-24-24 = 332..356, 44..68.
        let at = RawPointer::at((340.0, 50.0));
        ui.tick(at);
        let tick = ui.tick(at.with_left(true));
        assert_eq!(
            tick.for_target(close).collect::<Vec<_>>(),
            [PointerHook::Hover, PointerHook::ClickStart]
        );
        assert_eq!(tick.for_target(menu).collect::<Vec<_>>(), [PointerHook::Hover]);
        ui.tick(at);

        let signals: Vec<_> = ui.drain_signals().collect();
        assert_eq!(
            signals,
            [Signal {
                source: menu,
                kind: SignalKind::CloseRequested
            }]
        );
    }

    #[test]
    fn destroy_unregisters_subtree_and_orphaned_close_button() {
        let mut ui = ui();
        let root = ui.scene().root();
        let menu = ui
            .insert_menu(
                root,
                SceneNode::new(Menu::new().with_close_corner(None)),
                Button::new(Rc::new(SolidSprite)),
            )
            .unwrap();
        let inner = ui.insert(menu, SceneNode::new(Panel)).unwrap();
        let close = ui.scene().widget_as::<Menu>(menu).unwrap().close_button().unwrap();
        assert_eq!(ui.router().len(), 3);

        let freed = ui.destroy(menu).unwrap();
        assert_eq!(freed, [menu, inner, close]);
        assert!(ui.router().is_empty());
        assert!(!ui.scene().is_alive(close));
        assert_eq!(ui.destroy(root), Err(SceneError::RootIsFixed));
        assert_eq!(ui.destroy(menu), Err(SceneError::StaleNode(menu)));
    }

    #[test]
    fn hidden_nodes_still_route() {
        let mut ui = ui();
        let root = ui.scene().root();
        let button = ui.insert(root, button_node().hidden()).unwrap();
        let hooks: Vec<_> = ui.tick(RawPointer::at((20.0, 15.0))).for_target(button).collect();
        assert_eq!(hooks, [PointerHook::HoverStart]);

        ui.scene_mut().set_interactable(button, false).unwrap();
        let hooks: Vec<_> = ui.tick(RawPointer::at((20.0, 15.0))).for_target(button).collect();
        assert_eq!(hooks, [PointerHook::HoverEnd]);
    }
}
