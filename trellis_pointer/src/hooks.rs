// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Hook vocabulary: what a target can be told, and the optional handler trait.

/// A notification delivered to a single hit target.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum PointerHook {
    /// The left button went down over this target and it was topmost.
    ClickStart,
    /// The left button is still held after a click started on this target.
    Click,
    /// The left button went up over this target after a click started on it.
    ClickEnd,
    /// The pointer left this target while a click on it was active.
    ClickCanceled,
    /// The pointer entered this target.
    HoverStart,
    /// The pointer stayed over this target.
    Hover,
    /// The pointer left this target.
    HoverEnd,
    /// A press edge hit no target at all.
    ClickStartMissAll,
    /// The button is held with no active click anywhere.
    ClickMissAll,
    /// A release edge ended no active click anywhere.
    ClickEndMissAll,
}

/// A pointer action that hit no eligible target.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Miss {
    /// Press edge over empty space.
    ClickStart,
    /// Button held with no active click.
    Click,
    /// Release edge with no active click.
    ClickEnd,
}

impl Miss {
    /// The per-target fan-out hook that follows this miss.
    pub fn fan_out(self) -> PointerHook {
        match self {
            Self::ClickStart => PointerHook::ClickStartMissAll,
            Self::Click => PointerHook::ClickMissAll,
            Self::ClickEnd => PointerHook::ClickEndMissAll,
        }
    }
}

/// One entry of a tick's ordered event stream.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PointerEvent<K> {
    /// A hook for one target.
    Target {
        /// Receiving target.
        target: K,
        /// The hook to run.
        hook: PointerHook,
    },
    /// A global miss, emitted before its per-target fan-out.
    Miss(Miss),
}

impl<K: Copy> PointerEvent<K> {
    /// The target and hook, if this is a per-target event.
    pub fn target(&self) -> Option<(K, PointerHook)> {
        match *self {
            Self::Target { target, hook } => Some((target, hook)),
            Self::Miss(_) => None,
        }
    }
}

/// Optional pointer callbacks; every method defaults to a no-op.
///
/// `Cx` is whatever context the owner passes along with each hook, for example
/// an outbox for deferred requests. Handlers must not mutate the structure that
/// produced the hooks; record what should change and apply it after the tick.
///
/// ```rust
/// use trellis_pointer::{PointerHook, PointerHooks};
///
/// #[derive(Default)]
/// struct Counter { clicks: u32 }
///
/// impl PointerHooks for Counter {
///     fn on_click_end(&mut self, _: &mut ()) {
///         self.clicks += 1;
///     }
/// }
///
/// let mut c = Counter::default();
/// c.handle(PointerHook::Hover, &mut ());
/// c.handle(PointerHook::ClickEnd, &mut ());
/// assert_eq!(c.clicks, 1);
/// ```
pub trait PointerHooks<Cx: ?Sized = ()> {
    /// See [`PointerHook::ClickStart`].
    fn on_click_start(&mut self, _cx: &mut Cx) {}
    /// See [`PointerHook::Click`].
    fn on_click(&mut self, _cx: &mut Cx) {}
    /// See [`PointerHook::ClickEnd`].
    fn on_click_end(&mut self, _cx: &mut Cx) {}
    /// See [`PointerHook::ClickCanceled`].
    fn on_click_canceled(&mut self, _cx: &mut Cx) {}
    /// See [`PointerHook::HoverStart`].
    fn on_hover_start(&mut self, _cx: &mut Cx) {}
    /// See [`PointerHook::Hover`].
    fn on_hover(&mut self, _cx: &mut Cx) {}
    /// See [`PointerHook::HoverEnd`].
    fn on_hover_end(&mut self, _cx: &mut Cx) {}
    /// See [`PointerHook::ClickStartMissAll`].
    fn on_click_start_miss_all(&mut self, _cx: &mut Cx) {}
    /// See [`PointerHook::ClickMissAll`].
    fn on_click_miss_all(&mut self, _cx: &mut Cx) {}
    /// See [`PointerHook::ClickEndMissAll`].
    fn on_click_end_miss_all(&mut self, _cx: &mut Cx) {}

    /// Run the method matching `hook`.
    fn handle(&mut self, hook: PointerHook, cx: &mut Cx) {
        match hook {
            PointerHook::ClickStart => self.on_click_start(cx),
            PointerHook::Click => self.on_click(cx),
            PointerHook::ClickEnd => self.on_click_end(cx),
            PointerHook::ClickCanceled => self.on_click_canceled(cx),
            PointerHook::HoverStart => self.on_hover_start(cx),
            PointerHook::Hover => self.on_hover(cx),
            PointerHook::HoverEnd => self.on_hover_end(cx),
            PointerHook::ClickStartMissAll => self.on_click_start_miss_all(cx),
            PointerHook::ClickMissAll => self.on_click_miss_all(cx),
            PointerHook::ClickEndMissAll => self.on_click_end_miss_all(cx),
        }
    }
}
