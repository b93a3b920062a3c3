// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Router implementation.
//!
//! ## Overview
//!
//! Keeps the registry of hit targets, the hovered set and the active-click set,
//! and turns each [`PointerSample`] into an ordered stream of
//! [`PointerEvent`]s.
//!
//! ## Tick order
//!
//! 1. Hovered now: every registered target that is interactable and contains
//!    the pointer, in registration order.
//! 2. Targets that left the hovered set get [`PointerHook::ClickCanceled`]
//!    first if they held an active click, then [`PointerHook::HoverEnd`].
//! 3. Targets that stayed get [`PointerHook::Hover`].
//! 4. Targets that entered get [`PointerHook::HoverStart`].
//! 5. Exactly one of press, release or hold is then routed:
//!    - press edge: topmost hovered targets by depth get
//!      [`PointerHook::ClickStart`]; exact depth ties all receive it;
//!    - release edge: active targets get [`PointerHook::ClickEnd`];
//!    - held: active targets get [`PointerHook::Click`].
//!
//!    Whenever the relevant set is empty a [`Miss`] is emitted, followed by the
//!    matching `*MissAll` hook on every registered target.
//!
//! ## Targets
//!
//! The router stores keys, not targets. Geometry, depth and interactability
//! are read through [`HitTargets`] on every tick, so anything that can answer
//! those questions for a key can be routed.

use core::fmt::Debug;
use core::hash::Hash;

use hashbrown::HashSet;
use kurbo::Point;
use smallvec::SmallVec;

use crate::hooks::{Miss, PointerEvent, PointerHook};
use crate::sample::PointerSample;

/// Geometry and eligibility queries for routed targets.
pub trait HitTargets<K> {
    /// Whether `target` covers `point`.
    fn contains(&self, target: K, point: Point) -> bool;
    /// Depth of `target` at `point`; higher is nearer the viewer.
    ///
    /// NaN ranks as negative infinity.
    fn depth_at(&self, target: K, point: Point) -> f64;
    /// Whether `target` currently takes part in hover and click routing.
    fn interactable(&self, target: K) -> bool;
}

/// Router policies.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RouterConfig {
    /// Fail a debug assertion when a release finds an active target that no
    /// longer contains the pointer.
    ///
    /// The fault is always reported through [`Tick::faults`] and logged.
    pub strict_release: bool,
}

/// An internal-consistency fault observed during a tick.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Fault<K> {
    /// On a release edge, an active-click target did not contain the pointer.
    ///
    /// Hover tracking removes such targets before the release is routed, so
    /// this means the target answered `contains` inconsistently within a tick.
    /// The target receives [`PointerHook::ClickCanceled`] instead of
    /// [`PointerHook::ClickEnd`].
    StaleRelease {
        /// The offending target.
        target: K,
    },
}

/// Everything one [`PointerRouter::tick`] produced.
#[derive(Clone, Debug)]
pub struct Tick<K> {
    events: Vec<PointerEvent<K>>,
    faults: Vec<Fault<K>>,
}

impl<K> Default for Tick<K> {
    fn default() -> Self {
        Self {
            events: Vec::new(),
            faults: Vec::new(),
        }
    }
}

impl<K: Copy + PartialEq> Tick<K> {
    /// Events in delivery order.
    pub fn events(&self) -> &[PointerEvent<K>] {
        &self.events
    }

    /// Consistency faults, in the order they were found.
    pub fn faults(&self) -> &[Fault<K>] {
        &self.faults
    }

    /// Per-target events in delivery order.
    pub fn hooks(&self) -> impl Iterator<Item = (K, PointerHook)> + '_ {
        self.events.iter().filter_map(PointerEvent::target)
    }

    /// Hooks delivered to `target`, in order.
    pub fn for_target(&self, target: K) -> impl Iterator<Item = PointerHook> + '_ {
        self.hooks()
            .filter(move |&(k, _)| k == target)
            .map(|(_, hook)| hook)
    }

    /// Global misses, in order.
    pub fn misses(&self) -> impl Iterator<Item = Miss> + '_ {
        self.events.iter().filter_map(|e| match e {
            PointerEvent::Miss(m) => Some(*m),
            PointerEvent::Target { .. } => None,
        })
    }

    /// True when nothing happened.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty() && self.faults.is_empty()
    }

    fn push(&mut self, target: K, hook: PointerHook) {
        self.events.push(PointerEvent::Target { target, hook });
    }
}

/// Single-pointer hover and click router.
///
/// ## Usage
///
/// - [`PointerRouter::register`] every target when it is created and
///   [`PointerRouter::unregister`] it before it is destroyed. The router has
///   no way to notice dead targets on its own.
/// - Call [`PointerRouter::tick`] once per frame and deliver the returned
///   events in order.
///
/// ```rust
/// use kurbo::{Point, Rect};
/// use trellis_pointer::{HitTargets, PointerHook, PointerRouter, PointerSample, RawPointer};
///
/// struct One(Rect);
/// impl HitTargets<u8> for One {
///     fn contains(&self, _: u8, p: Point) -> bool { self.0.contains(p) }
///     fn depth_at(&self, _: u8, _: Point) -> f64 { 0.2 }
///     fn interactable(&self, _: u8) -> bool { true }
/// }
///
/// let targets = One(Rect::new(0.0, 0.0, 10.0, 10.0));
/// let mut router = PointerRouter::new();
/// router.register(7_u8);
///
/// let at = RawPointer::at((5.0, 5.0));
/// let press = PointerSample::new(at, at.with_left(true));
/// let tick = router.tick(&press, &targets);
/// let hooks: Vec<_> = tick.for_target(7).collect();
/// assert_eq!(hooks, [PointerHook::HoverStart, PointerHook::ClickStart]);
/// ```
#[derive(Clone, Debug)]
pub struct PointerRouter<K> {
    registry: Vec<K>,
    members: HashSet<K>,
    hovered: SmallVec<[K; 8]>,
    active_click: SmallVec<[K; 4]>,
    config: RouterConfig,
}

impl<K: Copy + Eq + Hash + Debug> Default for PointerRouter<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Copy + Eq + Hash + Debug> PointerRouter<K> {
    /// Create an empty router with default policies.
    pub fn new() -> Self {
        Self::with_config(RouterConfig::default())
    }

    /// Create an empty router with explicit policies.
    pub fn with_config(config: RouterConfig) -> Self {
        Self {
            registry: Vec::new(),
            members: HashSet::new(),
            hovered: SmallVec::new(),
            active_click: SmallVec::new(),
            config,
        }
    }

    /// Current policies.
    pub fn config(&self) -> RouterConfig {
        self.config
    }

    /// Replace the policies.
    pub fn set_config(&mut self, config: RouterConfig) {
        self.config = config;
    }

    /// Add a target. Registering twice is a no-op; returns whether it was added.
    pub fn register(&mut self, target: K) -> bool {
        if !self.members.insert(target) {
            return false;
        }
        self.registry.push(target);
        tracing::trace!(node = ?target, "hit target registered");
        true
    }

    /// Remove a target, dropping it from the hovered and active-click sets
    /// without notifying it. Returns whether it was registered.
    pub fn unregister(&mut self, target: K) -> bool {
        if !self.members.remove(&target) {
            return false;
        }
        self.registry.retain(|k| *k != target);
        self.hovered.retain(|k| *k != target);
        self.active_click.retain(|k| *k != target);
        tracing::trace!(node = ?target, "hit target unregistered");
        true
    }

    /// Whether `target` is registered.
    pub fn is_registered(&self, target: K) -> bool {
        self.members.contains(&target)
    }

    /// Registered targets, in registration order.
    pub fn registered(&self) -> &[K] {
        &self.registry
    }

    /// Number of registered targets.
    pub fn len(&self) -> usize {
        self.registry.len()
    }

    /// True when no target is registered.
    pub fn is_empty(&self) -> bool {
        self.registry.is_empty()
    }

    /// Targets hovered as of the last tick.
    pub fn hovered(&self) -> &[K] {
        &self.hovered
    }

    /// Targets holding an active click as of the last tick.
    pub fn active_click(&self) -> &[K] {
        &self.active_click
    }

    /// Route one tick.
    ///
    /// `targets` is only read; the returned events are meant to be delivered
    /// after this call returns.
    pub fn tick<T>(&mut self, sample: &PointerSample, targets: &T) -> Tick<K>
    where
        T: HitTargets<K> + ?Sized,
    {
        let point = sample.position();
        let mut tick = Tick::default();

        let hovered_now: SmallVec<[K; 8]> = self
            .registry
            .iter()
            .copied()
            .filter(|&k| targets.interactable(k) && targets.contains(k, point))
            .collect();

        let previous = core::mem::take(&mut self.hovered);
        for &k in previous.iter().filter(|k| !hovered_now.contains(k)) {
            if let Some(i) = self.active_click.iter().position(|a| *a == k) {
                self.active_click.remove(i);
                tick.push(k, PointerHook::ClickCanceled);
            }
            tick.push(k, PointerHook::HoverEnd);
        }
        for &k in hovered_now.iter().filter(|k| previous.contains(k)) {
            tick.push(k, PointerHook::Hover);
        }
        for &k in hovered_now.iter().filter(|k| !previous.contains(k)) {
            tick.push(k, PointerHook::HoverStart);
        }
        self.hovered = hovered_now;

        if sample.left_pressed() {
            self.press(point, targets, &mut tick);
        } else if sample.left_released() {
            self.release(point, targets, &mut tick);
        } else if sample.left_down() {
            self.hold(&mut tick);
        }
        tick
    }

    fn press<T>(&mut self, point: Point, targets: &T, tick: &mut Tick<K>)
    where
        T: HitTargets<K> + ?Sized,
    {
        if self.hovered.is_empty() {
            self.miss(Miss::ClickStart, tick);
            return;
        }
        let depths: SmallVec<[(K, f64); 8]> = self
            .hovered
            .iter()
            .map(|&k| {
                let depth = targets.depth_at(k, point);
                (k, if depth.is_nan() { f64::NEG_INFINITY } else { depth })
            })
            .collect();
        let top = depths
            .iter()
            .map(|&(_, d)| d)
            .fold(f64::NEG_INFINITY, f64::max);
        // Exact ties are all topmost.
        for (k, _) in depths.into_iter().filter(|&(_, d)| d == top) {
            tick.push(k, PointerHook::ClickStart);
            if !self.active_click.contains(&k) {
                self.active_click.push(k);
            }
        }
    }

    fn release<T>(&mut self, point: Point, targets: &T, tick: &mut Tick<K>)
    where
        T: HitTargets<K> + ?Sized,
    {
        if self.active_click.is_empty() {
            self.miss(Miss::ClickEnd, tick);
            return;
        }
        for k in core::mem::take(&mut self.active_click) {
            if targets.contains(k, point) {
                tick.push(k, PointerHook::ClickEnd);
            } else {
                tracing::error!(
                    node = ?k,
                    "active click target no longer contains the pointer on release"
                );
                debug_assert!(
                    !self.config.strict_release,
                    "stale active click on release: {k:?}"
                );
                tick.faults.push(Fault::StaleRelease { target: k });
                tick.push(k, PointerHook::ClickCanceled);
            }
        }
    }

    fn hold(&self, tick: &mut Tick<K>) {
        if self.active_click.is_empty() {
            self.miss(Miss::Click, tick);
            return;
        }
        for &k in &self.active_click {
            tick.push(k, PointerHook::Click);
        }
    }

    fn miss(&self, miss: Miss, tick: &mut Tick<K>) {
        tracing::trace!(?miss, fan_out = self.registry.len(), "pointer miss");
        tick.events.push(PointerEvent::Miss(miss));
        let hook = miss.fan_out();
        for &k in &self.registry {
            tick.push(k, hook);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sample::{PointerTracker, RawPointer};
    use core::cell::Cell;
    use kurbo::Rect;

    #[derive(Debug)]
    struct Target {
        rect: Rect,
        depth: f64,
        interactable: bool,
    }

    #[derive(Debug, Default)]
    struct Boxes(Vec<Target>);

    impl Boxes {
        fn add(&mut self, rect: Rect, depth: f64) -> u32 {
            self.0.push(Target {
                rect,
                depth,
                interactable: true,
            });
            u32::try_from(self.0.len() - 1).unwrap()
        }
    }

    impl HitTargets<u32> for Boxes {
        fn contains(&self, target: u32, point: Point) -> bool {
            self.0[target as usize].rect.contains(point)
        }
        fn depth_at(&self, target: u32, _: Point) -> f64 {
            self.0[target as usize].depth
        }
        fn interactable(&self, target: u32) -> bool {
            self.0[target as usize].interactable
        }
    }

    struct Harness {
        router: PointerRouter<u32>,
        tracker: PointerTracker,
    }

    impl Harness {
        fn new(boxes: &Boxes) -> Self {
            let mut router = PointerRouter::new();
            for id in 0..boxes.0.len() {
                router.register(u32::try_from(id).unwrap());
            }
            Self {
                router,
                tracker: PointerTracker::new(),
            }
        }

        fn step(&mut self, boxes: &Boxes, x: f64, y: f64, left: bool) -> Tick<u32> {
            let sample = self.tracker.advance(RawPointer::at((x, y)).with_left(left));
            self.router.tick(&sample, boxes)
        }
    }

    fn hooks(tick: &Tick<u32>, target: u32) -> Vec<PointerHook> {
        tick.for_target(target).collect()
    }

    #[test]
    fn hover_enter_stay_leave() {
        let mut boxes = Boxes::default();
        let a = boxes.add(Rect::new(0.0, 0.0, 10.0, 10.0), 0.2);
        let mut h = Harness::new(&boxes);

        let t = h.step(&boxes, 5.0, 5.0, false);
        assert_eq!(hooks(&t, a), [PointerHook::HoverStart]);
        assert_eq!(h.router.hovered(), &[a]);

        let t = h.step(&boxes, 6.0, 6.0, false);
        assert_eq!(hooks(&t, a), [PointerHook::Hover]);

        let t = h.step(&boxes, 50.0, 50.0, false);
        assert_eq!(hooks(&t, a), [PointerHook::HoverEnd]);
        assert!(h.router.hovered().is_empty());

        let t = h.step(&boxes, 50.0, 50.0, false);
        assert!(t.is_empty(), "idle pointer over empty space emits nothing");
    }

    #[test]
    fn press_hold_release_over_target() {
        let mut boxes = Boxes::default();
        let a = boxes.add(Rect::new(0.0, 0.0, 10.0, 10.0), 0.2);
        let mut h = Harness::new(&boxes);

        let t = h.step(&boxes, 5.0, 5.0, true);
        assert_eq!(hooks(&t, a), [PointerHook::HoverStart, PointerHook::ClickStart]);
        assert_eq!(h.router.active_click(), &[a]);

        let t = h.step(&boxes, 5.0, 5.0, true);
        assert_eq!(hooks(&t, a), [PointerHook::Hover, PointerHook::Click]);

        let t = h.step(&boxes, 5.0, 5.0, false);
        assert_eq!(hooks(&t, a), [PointerHook::Hover, PointerHook::ClickEnd]);
        assert!(h.router.active_click().is_empty());
        assert!(t.faults().is_empty());
    }

    #[test]
    fn leaving_during_click_cancels_before_hover_end() {
        let mut boxes = Boxes::default();
        let a = boxes.add(Rect::new(0.0, 0.0, 10.0, 10.0), 0.2);
        let mut h = Harness::new(&boxes);

        h.step(&boxes, 5.0, 5.0, true);
        let t = h.step(&boxes, 20.0, 5.0, true);
        let got = hooks(&t, a);
        let cancel = got.iter().position(|h| *h == PointerHook::ClickCanceled);
        let end = got.iter().position(|h| *h == PointerHook::HoverEnd);
        assert!(cancel.is_some() && end.is_some(), "both hooks fire: {got:?}");
        assert!(cancel < end, "cancel must precede hover end: {got:?}");
        assert!(h.router.active_click().is_empty());

        // Still held with nothing active: a global miss fans out to every target.
        assert_eq!(t.misses().collect::<Vec<_>>(), [Miss::Click]);
        assert_eq!(got.last(), Some(&PointerHook::ClickMissAll));
    }

    #[test]
    fn geometry_change_under_a_still_pointer_cancels() {
        let mut boxes = Boxes::default();
        let a = boxes.add(Rect::new(0.0, 0.0, 10.0, 10.0), 0.2);
        let mut h = Harness::new(&boxes);

        h.step(&boxes, 5.0, 5.0, true);
        boxes.0[a as usize].rect = Rect::new(100.0, 100.0, 110.0, 110.0);
        let t = h.step(&boxes, 5.0, 5.0, true);
        assert_eq!(
            &hooks(&t, a)[..2],
            [PointerHook::ClickCanceled, PointerHook::HoverEnd]
        );
    }

    #[test]
    fn topmost_by_depth_wins() {
        let mut boxes = Boxes::default();
        let low = boxes.add(Rect::new(0.0, 0.0, 100.0, 100.0), 0.2);
        let high = boxes.add(Rect::new(10.0, 10.0, 50.0, 50.0), 0.201);
        let mut h = Harness::new(&boxes);

        let t = h.step(&boxes, 20.0, 20.0, true);
        assert_eq!(hooks(&t, low), [PointerHook::HoverStart]);
        assert_eq!(hooks(&t, high), [PointerHook::HoverStart, PointerHook::ClickStart]);
        assert_eq!(h.router.active_click(), &[high]);
    }

    #[test]
    fn exact_depth_ties_all_receive_click_start() {
        let mut boxes = Boxes::default();
        let a = boxes.add(Rect::new(0.0, 0.0, 100.0, 100.0), 0.201);
        let b = boxes.add(Rect::new(10.0, 10.0, 50.0, 50.0), 0.201);
        let c = boxes.add(Rect::new(0.0, 0.0, 100.0, 100.0), 0.2);
        let mut h = Harness::new(&boxes);

        let t = h.step(&boxes, 20.0, 20.0, true);
        assert!(hooks(&t, a).contains(&PointerHook::ClickStart));
        assert!(hooks(&t, b).contains(&PointerHook::ClickStart));
        assert!(!hooks(&t, c).contains(&PointerHook::ClickStart));
        assert_eq!(h.router.active_click(), &[a, b]);

        let t = h.step(&boxes, 20.0, 20.0, false);
        assert!(hooks(&t, a).contains(&PointerHook::ClickEnd));
        assert!(hooks(&t, b).contains(&PointerHook::ClickEnd));
    }

    #[test]
    fn nan_depth_ranks_lowest() {
        let mut boxes = Boxes::default();
        let nan = boxes.add(Rect::new(0.0, 0.0, 100.0, 100.0), f64::NAN);
        let low = boxes.add(Rect::new(0.0, 0.0, 100.0, 100.0), 0.0);
        let mut h = Harness::new(&boxes);
        h.step(&boxes, 20.0, 20.0, true);
        assert_eq!(h.router.active_click(), &[low]);
        h.step(&boxes, 20.0, 20.0, false);

        boxes.0[low as usize].depth = f64::NAN;
        let t = h.step(&boxes, 20.0, 20.0, true);
        assert!(t.misses().next().is_none(), "press over targets is not a miss");
        assert_eq!(h.router.active_click(), &[nan, low]);
    }

    #[test]
    fn press_over_nothing_fans_out_to_every_target() {
        let mut boxes = Boxes::default();
        let a = boxes.add(Rect::new(0.0, 0.0, 10.0, 10.0), 0.2);
        let far = boxes.add(Rect::new(5000.0, 5000.0, 5010.0, 5010.0), 0.3);
        let mut h = Harness::new(&boxes);

        let t = h.step(&boxes, 500.0, 500.0, true);
        assert_eq!(
            t.events(),
            &[
                PointerEvent::Miss(Miss::ClickStart),
                PointerEvent::Target {
                    target: a,
                    hook: PointerHook::ClickStartMissAll
                },
                PointerEvent::Target {
                    target: far,
                    hook: PointerHook::ClickStartMissAll
                },
            ]
        );

        let t = h.step(&boxes, 500.0, 500.0, false);
        assert_eq!(t.misses().collect::<Vec<_>>(), [Miss::ClickEnd]);
        assert_eq!(hooks(&t, far), [PointerHook::ClickEndMissAll]);
    }

    #[test]
    fn non_interactable_targets_are_never_hovered() {
        let mut boxes = Boxes::default();
        let a = boxes.add(Rect::new(0.0, 0.0, 10.0, 10.0), 0.2);
        boxes.0[a as usize].interactable = false;
        let mut h = Harness::new(&boxes);

        let t = h.step(&boxes, 5.0, 5.0, true);
        assert!(h.router.hovered().is_empty());
        assert_eq!(t.misses().collect::<Vec<_>>(), [Miss::ClickStart]);
        assert_eq!(hooks(&t, a), [PointerHook::ClickStartMissAll]);
    }

    #[test]
    fn becoming_non_interactable_mid_click_cancels() {
        let mut boxes = Boxes::default();
        let a = boxes.add(Rect::new(0.0, 0.0, 10.0, 10.0), 0.2);
        let mut h = Harness::new(&boxes);

        h.step(&boxes, 5.0, 5.0, true);
        boxes.0[a as usize].interactable = false;
        let t = h.step(&boxes, 5.0, 5.0, true);
        assert_eq!(
            &hooks(&t, a)[..2],
            [PointerHook::ClickCanceled, PointerHook::HoverEnd]
        );
    }

    #[test]
    fn registration_is_idempotent_and_unregister_forgets_state() {
        let mut boxes = Boxes::default();
        let a = boxes.add(Rect::new(0.0, 0.0, 10.0, 10.0), 0.2);
        let b = boxes.add(Rect::new(0.0, 0.0, 10.0, 10.0), 0.1);
        let mut h = Harness::new(&boxes);
        assert!(!h.router.register(a));
        assert_eq!(h.router.len(), 2);

        h.step(&boxes, 5.0, 5.0, true);
        assert_eq!(h.router.active_click(), &[a]);

        assert!(h.router.unregister(a));
        assert!(!h.router.unregister(a));
        assert!(!h.router.is_registered(a));
        assert!(h.router.active_click().is_empty());
        assert_eq!(h.router.hovered(), &[b]);

        let t = h.step(&boxes, 5.0, 5.0, false);
        assert!(hooks(&t, a).is_empty(), "unregistered targets hear nothing");
        assert_eq!(t.misses().collect::<Vec<_>>(), [Miss::ClickEnd]);
        assert_eq!(h.router.registered(), &[b]);
    }

    /// Answers `contains` with `true` exactly once.
    struct Flaky {
        calls: Cell<u32>,
    }

    impl HitTargets<u32> for Flaky {
        fn contains(&self, _: u32, _: Point) -> bool {
            let n = self.calls.get();
            self.calls.set(n + 1);
            n == 0
        }
        fn depth_at(&self, _: u32, _: Point) -> f64 {
            0.0
        }
        fn interactable(&self, _: u32) -> bool {
            true
        }
    }

    #[test]
    fn inconsistent_contains_on_release_is_reported() {
        let mut router = PointerRouter::new();
        router.register(1_u32);
        let held = RawPointer::at((1.0, 1.0)).with_left(true);

        let press = PointerSample::new(RawPointer::at((1.0, 1.0)), held);
        router.tick(&press, &Flaky { calls: Cell::new(0) });
        assert_eq!(router.active_click(), &[1]);

        // Hover check says "inside", the release check says "outside".
        let release = PointerSample::new(held, RawPointer::at((1.0, 1.0)));
        let t = router.tick(&release, &Flaky { calls: Cell::new(0) });
        assert_eq!(t.faults(), &[Fault::StaleRelease { target: 1 }]);
        assert_eq!(
            hooks(&t, 1),
            vec![PointerHook::Hover, PointerHook::ClickCanceled]
        );
        assert!(router.active_click().is_empty());
    }
}
