// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Trellis Pointer: deterministic hover and click routing for one pointer.
//!
//! ## Overview
//!
//! The host feeds one [`RawPointer`] per frame. A [`PointerTracker`] turns
//! consecutive raw samples into a [`PointerSample`] with press/release edges and
//! deltas. A [`PointerRouter`] then reads every registered target through the
//! [`HitTargets`] capability and emits an ordered list of [`PointerEvent`]s:
//! hover transitions first, then exactly one of the press, release or hold
//! routes.
//!
//! ## Ordering guarantees
//!
//! - A target that loses hover while holding an active click receives
//!   [`PointerHook::ClickCanceled`] strictly before [`PointerHook::HoverEnd`].
//! - On a press edge only the hovered targets with the highest depth receive
//!   [`PointerHook::ClickStart`]. Exact ties all receive it.
//! - A press, hold or release that finds nothing to act on emits a global
//!   [`Miss`] followed by the matching `*MissAll` hook on every registered
//!   target, including targets far from the pointer.
//!
//! ## Delivery
//!
//! [`PointerRouter::tick`] only reads targets. Events come back as data so the
//! caller can deliver them after routing is done, typically through
//! [`PointerHooks::handle`]. Handlers therefore never observe a half-routed
//! tick, and they must defer structural changes (such as registering or
//! unregistering targets) until the tick has been delivered.
//!
//! ## Right button and scroll
//!
//! These are reported on [`PointerSample`] as raw edges and deltas; the router
//! does not build hover or click state for them.

mod hooks;
mod router;
mod sample;

pub use hooks::{Miss, PointerEvent, PointerHook, PointerHooks};
pub use router::{Fault, HitTargets, PointerRouter, RouterConfig, Tick};
pub use sample::{PointerSample, PointerTracker, RawPointer};
