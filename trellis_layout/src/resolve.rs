// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Box resolution: layout constraints plus parent rectangle to absolute rectangle.

use kurbo::Rect;

use crate::spec::{Axis, LayoutSpec};

/// Errors raised while resolving a [`LayoutSpec`].
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutError {
    /// Both edges and the size of one axis are set.
    #[error("conflicting constraints: {axis} cannot all be set")]
    Conflict {
        /// The axis carrying the conflict.
        axis: Axis,
    },
}

/// Resolve a [`LayoutSpec`] against a parent rectangle.
///
/// The horizontal axis is resolved first, so a layout that conflicts on both
/// axes reports [`Axis::Horizontal`]. The returned rectangle is not
/// normalized: over-constrained offsets may yield a negative width or height.
///
/// ```rust
/// use kurbo::Rect;
/// use trellis_layout::{LayoutSpec, resolve};
///
/// let parent = Rect::new(0.0, 0.0, 200.0, 100.0);
/// let centered = resolve(&LayoutSpec::sized(50.0, 50.0), parent).unwrap();
/// assert_eq!(centered, Rect::new(75.0, 25.0, 125.0, 75.0));
/// ```
pub fn resolve(spec: &LayoutSpec, parent: Rect) -> Result<Rect, LayoutError> {
    let (left, right, width) = spec.axis(Axis::Horizontal);
    let (x, w) = resolve_axis(
        Axis::Horizontal,
        left,
        right,
        width,
        parent.x0,
        parent.width(),
    )?;
    let (top, bottom, height) = spec.axis(Axis::Vertical);
    let (y, h) = resolve_axis(
        Axis::Vertical,
        top,
        bottom,
        height,
        parent.y0,
        parent.height(),
    )?;
    Ok(Rect::new(x, y, x + w, y + h))
}

/// Resolve one axis, returning `(origin, extent)`.
///
/// `start` and `end` are the offsets from the parent's leading and trailing
/// edges, `size` the fixed extent. `origin` and `extent` describe the parent
/// along the same axis.
pub fn resolve_axis(
    axis: Axis,
    start: Option<f64>,
    end: Option<f64>,
    size: Option<f64>,
    origin: f64,
    extent: f64,
) -> Result<(f64, f64), LayoutError> {
    Ok(match (start, end, size) {
        (Some(_), Some(_), Some(_)) => return Err(LayoutError::Conflict { axis }),
        (Some(s), Some(e), None) => (origin + s, extent - s - e),
        (Some(s), None, Some(len)) => (origin + s, len),
        (None, Some(e), Some(len)) => (origin + extent - len - e, len),
        (Some(s), None, None) => (origin + s, extent - s),
        (None, Some(e), None) => (origin, extent - e),
        (None, None, Some(len)) => (origin + extent / 2.0 - len / 2.0, len),
        (None, None, None) => (origin, extent),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spec::Positioning;

    const PARENT: Rect = Rect::new(20.0, 40.0, 220.0, 140.0);

    fn rect(x: f64, y: f64, w: f64, h: f64) -> Rect {
        Rect::new(x, y, x + w, y + h)
    }

    #[test]
    fn horizontal_table() {
        // (left, right, width) → (x, width) against a parent at x = 20, w = 200.
        let cases = [
            ((Some(10.0), Some(30.0), None), (30.0, 160.0)),
            ((Some(10.0), None, Some(50.0)), (30.0, 50.0)),
            ((None, Some(30.0), Some(50.0)), (140.0, 50.0)),
            ((Some(10.0), None, None), (30.0, 190.0)),
            ((None, Some(30.0), None), (20.0, 170.0)),
            ((None, None, Some(50.0)), (95.0, 50.0)),
            ((None, None, None), (20.0, 200.0)),
        ];
        for ((left, right, width), (x, w)) in cases {
            let spec = LayoutSpec {
                left,
                right,
                width,
                ..LayoutSpec::default()
            };
            let r = resolve(&spec, PARENT).unwrap();
            assert_eq!(
                (r.x0, r.width()),
                (x, w),
                "case {left:?} {right:?} {width:?}"
            );
            assert_eq!((r.y0, r.height()), (40.0, 100.0), "vertical fills");
        }
    }

    #[test]
    fn vertical_table() {
        // (top, bottom, height) → (y, height) against a parent at y = 40, h = 100.
        let cases = [
            ((Some(10.0), Some(30.0), None), (50.0, 60.0)),
            ((Some(10.0), None, Some(20.0)), (50.0, 20.0)),
            ((None, Some(30.0), Some(20.0)), (90.0, 20.0)),
            ((Some(10.0), None, None), (50.0, 90.0)),
            ((None, Some(30.0), None), (40.0, 70.0)),
            ((None, None, Some(20.0)), (80.0, 20.0)),
            ((None, None, None), (40.0, 100.0)),
        ];
        for ((top, bottom, height), (y, h)) in cases {
            let spec = LayoutSpec {
                top,
                bottom,
                height,
                ..LayoutSpec::default()
            };
            let r = resolve(&spec, PARENT).unwrap();
            assert_eq!(
                (r.y0, r.height()),
                (y, h),
                "case {top:?} {bottom:?} {height:?}"
            );
            assert_eq!((r.x0, r.width()), (20.0, 200.0), "horizontal fills");
        }
    }

    #[test]
    fn both_edges_and_size_conflict_per_axis() {
        let h = LayoutSpec::default()
            .with_left(1.0)
            .with_right(1.0)
            .with_width(1.0);
        assert_eq!(
            resolve(&h, PARENT),
            Err(LayoutError::Conflict {
                axis: Axis::Horizontal
            })
        );

        let v = LayoutSpec::default()
            .with_top(1.0)
            .with_bottom(1.0)
            .with_height(1.0);
        assert_eq!(
            resolve(&v, PARENT),
            Err(LayoutError::Conflict {
                axis: Axis::Vertical
            })
        );

        let both = LayoutSpec::all(1.0).with_width(1.0).with_height(1.0);
        assert_eq!(
            resolve(&both, PARENT),
            Err(LayoutError::Conflict {
                axis: Axis::Horizontal
            }),
            "horizontal is checked first"
        );
    }

    #[test]
    fn conflict_only_surfaces_once_the_spec_is_resolved() {
        let mut spec = LayoutSpec::default().with_left(5.0).with_right(5.0);
        assert!(resolve(&spec, PARENT).is_ok());
        spec.width = Some(10.0);
        assert!(resolve(&spec, PARENT).is_err());
        spec.right = None;
        assert_eq!(resolve(&spec, PARENT), Ok(rect(25.0, 40.0, 10.0, 100.0)));
    }

    #[test]
    fn viewport_scenarios() {
        let viewport = Rect::new(0.0, 0.0, 800.0, 600.0);

        let a = LayoutSpec::default()
            .with_left(10.0)
            .with_top(10.0)
            .with_width(100.0)
            .with_height(50.0);
        assert_eq!(resolve(&a, viewport), Ok(rect(10.0, 10.0, 100.0, 50.0)));
        let larger = Rect::new(0.0, 0.0, 1920.0, 1080.0);
        assert_eq!(
            resolve(&a, larger),
            Ok(rect(10.0, 10.0, 100.0, 50.0)),
            "independent of viewport size"
        );

        let b = LayoutSpec::all(0.0);
        assert_eq!(resolve(&b, viewport), Ok(viewport));

        let c = LayoutSpec::sized(50.0, 50.0);
        assert_eq!(
            resolve(&c, viewport),
            Ok(rect(800.0 / 2.0 - 25.0, 600.0 / 2.0 - 25.0, 50.0, 50.0))
        );
    }

    #[test]
    fn negative_offsets_extend_past_the_parent() {
        let spec = LayoutSpec::all(-5.0);
        assert_eq!(resolve(&spec, PARENT), Ok(rect(15.0, 35.0, 210.0, 110.0)));
    }

    #[test]
    fn resolution_is_idempotent() {
        let spec = LayoutSpec::default()
            .with_right(3.3)
            .with_width(17.1)
            .with_top(0.7)
            .with_position(Positioning::Absolute);
        let first = resolve(&spec, PARENT).unwrap();
        let second = resolve(&spec, PARENT).unwrap();
        assert_eq!(first.x0.to_bits(), second.x0.to_bits());
        assert_eq!(first.y0.to_bits(), second.y0.to_bits());
        assert_eq!(first.x1.to_bits(), second.x1.to_bits());
        assert_eq!(first.y1.to_bits(), second.y1.to_bits());
    }
}
