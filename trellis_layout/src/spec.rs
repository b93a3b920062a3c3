// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Constraint types: the per-box spec, positioning mode and axis tag.

/// Which rectangle a box anchors to.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Positioning {
    /// Anchor to the resolved rectangle of the tree parent (the viewport for roots).
    #[default]
    Relative,
    /// Anchor to the viewport regardless of the tree parent.
    Absolute,
}

/// One of the two independently resolved axes.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Axis {
    /// `left`, `right` and `width`.
    Horizontal,
    /// `top`, `bottom` and `height`.
    Vertical,
}

impl core::fmt::Display for Axis {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Horizontal => f.write_str("left, right and width"),
            Self::Vertical => f.write_str("top, bottom and height"),
        }
    }
}

/// Edge and size constraints for a single box.
///
/// Offsets are signed and measured inward from the matching edge of the parent
/// rectangle. Unset fields are `None`. Setting both edges and the size of one
/// axis is a conflict, reported by [`resolve`](crate::resolve).
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct LayoutSpec {
    /// Offset from the parent's left edge.
    pub left: Option<f64>,
    /// Offset from the parent's right edge.
    pub right: Option<f64>,
    /// Offset from the parent's top edge.
    pub top: Option<f64>,
    /// Offset from the parent's bottom edge.
    pub bottom: Option<f64>,
    /// Fixed width.
    pub width: Option<f64>,
    /// Fixed height.
    pub height: Option<f64>,
    /// Parent rectangle source.
    pub position: Positioning,
}

impl LayoutSpec {
    /// All four edges set to `value`.
    pub fn all(value: f64) -> Self {
        Self::default().with_all(value)
    }

    /// `left`/`right` set to `horizontals` and `top`/`bottom` set to `verticals`.
    pub fn symmetric(horizontals: f64, verticals: f64) -> Self {
        let mut spec = Self::default();
        spec.set_horizontals(Some(horizontals));
        spec.set_verticals(Some(verticals));
        spec
    }

    /// All four edges, in CSS order.
    pub fn edges(top: f64, right: f64, bottom: f64, left: f64) -> Self {
        Self {
            top: Some(top),
            right: Some(right),
            bottom: Some(bottom),
            left: Some(left),
            ..Self::default()
        }
    }

    /// A fixed size, centered in the parent.
    pub fn sized(width: f64, height: f64) -> Self {
        Self {
            width: Some(width),
            height: Some(height),
            ..Self::default()
        }
    }

    /// Set `left` and `right` together.
    pub fn set_horizontals(&mut self, value: Option<f64>) {
        self.left = value;
        self.right = value;
    }

    /// Set `top` and `bottom` together.
    pub fn set_verticals(&mut self, value: Option<f64>) {
        self.top = value;
        self.bottom = value;
    }

    /// Set all four edges together.
    pub fn set_all(&mut self, value: Option<f64>) {
        self.set_horizontals(value);
        self.set_verticals(value);
    }

    /// Builder form of [`LayoutSpec::set_all`].
    #[must_use]
    pub fn with_all(mut self, value: f64) -> Self {
        self.set_all(Some(value));
        self
    }

    /// Set `left`.
    #[must_use]
    pub fn with_left(mut self, value: f64) -> Self {
        self.left = Some(value);
        self
    }

    /// Set `right`.
    #[must_use]
    pub fn with_right(mut self, value: f64) -> Self {
        self.right = Some(value);
        self
    }

    /// Set `top`.
    #[must_use]
    pub fn with_top(mut self, value: f64) -> Self {
        self.top = Some(value);
        self
    }

    /// Set `bottom`.
    #[must_use]
    pub fn with_bottom(mut self, value: f64) -> Self {
        self.bottom = Some(value);
        self
    }

    /// Set `width`.
    #[must_use]
    pub fn with_width(mut self, value: f64) -> Self {
        self.width = Some(value);
        self
    }

    /// Set `height`.
    #[must_use]
    pub fn with_height(mut self, value: f64) -> Self {
        self.height = Some(value);
        self
    }

    /// Set the positioning mode.
    #[must_use]
    pub fn with_position(mut self, position: Positioning) -> Self {
        self.position = position;
        self
    }

    /// The `(start, end, size)` triple for one axis.
    pub fn axis(&self, axis: Axis) -> (Option<f64>, Option<f64>, Option<f64>) {
        match axis {
            Axis::Horizontal => (self.left, self.right, self.width),
            Axis::Vertical => (self.top, self.bottom, self.height),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shorthand_constructors_fill_expected_fields() {
        let all = LayoutSpec::all(4.0);
        assert_eq!(all.axis(Axis::Horizontal), (Some(4.0), Some(4.0), None));
        assert_eq!(all.axis(Axis::Vertical), (Some(4.0), Some(4.0), None));

        let sym = LayoutSpec::symmetric(1.0, 2.0);
        assert_eq!(sym.axis(Axis::Horizontal), (Some(1.0), Some(1.0), None));
        assert_eq!(sym.axis(Axis::Vertical), (Some(2.0), Some(2.0), None));

        let e = LayoutSpec::edges(1.0, 2.0, 3.0, 4.0);
        assert_eq!(
            (e.top, e.right, e.bottom, e.left),
            (Some(1.0), Some(2.0), Some(3.0), Some(4.0))
        );
        assert_eq!(e.position, Positioning::Relative);
    }

    #[test]
    fn clearing_edges_leaves_size_alone() {
        let mut spec = LayoutSpec::sized(10.0, 20.0).with_all(3.0);
        spec.set_horizontals(None);
        assert_eq!(spec.axis(Axis::Horizontal), (None, None, Some(10.0)));
        assert_eq!(spec.axis(Axis::Vertical), (Some(3.0), Some(3.0), Some(20.0)));
    }
}
