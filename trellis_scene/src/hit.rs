// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pointer routing capability for the scene.

use kurbo::Point;
use trellis_pointer::HitTargets;

use crate::tree::Scene;
use crate::types::NodeId;

impl HitTargets<NodeId> for Scene {
    /// Half-open containment test against the node's current rectangle.
    ///
    /// Stale nodes contain nothing. A node whose layout fails to resolve
    /// contains nothing either; the failure is logged.
    fn contains(&self, target: NodeId, point: Point) -> bool {
        if !self.is_alive(target) {
            return false;
        }
        match self.rect(target) {
            Ok(rect) => rect.contains(point),
            Err(err) => {
                tracing::warn!(node = ?target, error = %err, "layout failed; treating as not hit");
                false
            }
        }
    }

    fn depth_at(&self, target: NodeId, _point: Point) -> f64 {
        self.depth(target).unwrap_or(f64::NEG_INFINITY)
    }

    /// Live, attached below the root, and interactable along the whole
    /// ancestor chain.
    fn interactable(&self, target: NodeId) -> bool {
        self.root_of(target) == Some(self.root()) && self.effective_interactable(target)
    }
}
