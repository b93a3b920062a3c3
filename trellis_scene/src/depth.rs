// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Depth values: the shared ordering key for drawing and hit testing.

/// Offset added on top of a node's depth for decorations drawn over its
/// background (borders, progress fills, ticks).
pub const OVERLAY_STEP: f64 = 0.01;

/// Coarse sorting layers, so UI composites over game content.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Layer {
    /// Unlayered content.
    None,
    /// World or game content.
    Game,
    /// User interface.
    #[default]
    Ui,
}

impl Layer {
    /// Base depth of the layer.
    pub fn base(self) -> f64 {
        match self {
            Self::None => 0.0,
            Self::Game => 0.1,
            Self::Ui => 0.2,
        }
    }

    /// Base depth plus a per-item detail offset.
    pub fn depth(self, detail: f64) -> f64 {
        self.base() + detail
    }
}

/// Assigns each node `base + step * ancestor_count`.
///
/// With a positive `step`, a node is always strictly deeper (drawn later,
/// hit first) than its parent.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DepthPolicy {
    /// Depth of the root (and of detached nodes).
    pub base: f64,
    /// Increment per ancestor.
    pub step: f64,
}

impl Default for DepthPolicy {
    fn default() -> Self {
        Self {
            base: Layer::Ui.base(),
            step: 0.001,
        }
    }
}

impl DepthPolicy {
    /// A policy rooted at `layer` with the default step.
    pub fn for_layer(layer: Layer) -> Self {
        Self {
            base: layer.base(),
            ..Self::default()
        }
    }

    /// Depth of a node with `ancestors` ancestors.
    pub fn depth(&self, ancestors: usize) -> f64 {
        #[allow(
            clippy::cast_precision_loss,
            reason = "Trees are nowhere near 2^52 levels deep."
        )]
        let n = ancestors as f64;
        self.base + self.step * n
    }
}
