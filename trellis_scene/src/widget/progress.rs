// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Progress bars: a continuous fill and a row of discrete ticks.

use std::rc::Rc;

use kurbo::Rect;
use trellis_pointer::PointerHooks;

use super::{DrawCx, HookCx, Widget, WidgetError};
use crate::depth::OVERLAY_STEP;
use crate::node::NodeStyle;
use crate::surface::{Color, SolidSprite, Sprite, Surface};

fn check_value(value: f64, min: f64, max: f64) -> Result<(), WidgetError> {
    if value.is_nan() || value < min {
        return Err(WidgetError::BelowMin { value, min });
    }
    if value > max {
        return Err(WidgetError::AboveMax { value, max });
    }
    Ok(())
}

fn check_range(min: f64, max: f64) -> Result<(), WidgetError> {
    if min > max {
        return Err(WidgetError::InvertedRange { min, max });
    }
    Ok(())
}

/// Fraction of `[min, max]` covered by `value`; zero for an empty range.
fn fraction(value: f64, min: f64, max: f64) -> f64 {
    if max == min {
        0.0
    } else {
        (value - min) / (max - min)
    }
}

/// A bar filled left to right in proportion to a floating-point value.
///
/// Setters validate before storing: a rejected value leaves the bar as it
/// was.
///
/// ```rust
/// use trellis_scene::{ContinuousProgressBar, WidgetError};
///
/// let mut bar = ContinuousProgressBar::default();
/// bar.set_range(0.0, 200.0).unwrap();
/// bar.set_value(50.0).unwrap();
/// assert_eq!(bar.progress(), 0.25);
/// assert!(matches!(bar.set_value(250.0), Err(WidgetError::AboveMax { .. })));
/// assert_eq!(bar.value(), 50.0);
/// ```
#[derive(Clone, Debug)]
pub struct ContinuousProgressBar {
    value: f64,
    min: f64,
    max: f64,
    fill: Option<Rc<dyn Sprite>>,
    /// Fill tint.
    pub fill_color: Color,
}

impl Default for ContinuousProgressBar {
    fn default() -> Self {
        Self {
            value: 0.5,
            min: 0.0,
            max: 1.0,
            fill: None,
            fill_color: Color::rgb(54, 120, 33),
        }
    }
}

impl ContinuousProgressBar {
    /// Bar over `[min, max]` starting at `value`.
    pub fn new(value: f64, min: f64, max: f64) -> Result<Self, WidgetError> {
        check_range(min, max)?;
        check_value(value, min, max)?;
        Ok(Self {
            value,
            min,
            max,
            ..Self::default()
        })
    }

    /// Draw the fill with `sprite` instead of a solid color.
    #[must_use]
    pub fn with_fill(mut self, sprite: Rc<dyn Sprite>) -> Self {
        self.fill = Some(sprite);
        self
    }

    /// Current value.
    pub fn value(&self) -> f64 {
        self.value
    }

    /// Lower bound.
    pub fn min(&self) -> f64 {
        self.min
    }

    /// Upper bound.
    pub fn max(&self) -> f64 {
        self.max
    }

    /// Set the value; must lie in `[min, max]`.
    pub fn set_value(&mut self, value: f64) -> Result<(), WidgetError> {
        check_value(value, self.min, self.max)?;
        self.value = value;
        Ok(())
    }

    /// Set the lower bound; must not exceed the maximum or the value.
    pub fn set_min(&mut self, min: f64) -> Result<(), WidgetError> {
        self.set_range(min, self.max)
    }

    /// Set the upper bound; must not be below the minimum or the value.
    pub fn set_max(&mut self, max: f64) -> Result<(), WidgetError> {
        self.set_range(self.min, max)
    }

    /// Set both bounds at once.
    pub fn set_range(&mut self, min: f64, max: f64) -> Result<(), WidgetError> {
        check_range(min, max)?;
        check_value(self.value, min, max)?;
        self.min = min;
        self.max = max;
        Ok(())
    }

    /// Progress in `[0, 1]`.
    pub fn progress(&self) -> f64 {
        fraction(self.value, self.min, self.max)
    }

    /// Set the value from a progress fraction in `[0, 1]`.
    pub fn set_progress(&mut self, progress: f64) -> Result<(), WidgetError> {
        self.set_value(self.min + (self.max - self.min) * progress)
    }

    /// The filled part of `rect`.
    pub fn fill_rect(&self, rect: Rect) -> Rect {
        Rect::new(
            rect.x0,
            rect.y0,
            rect.x0 + rect.width() * self.progress(),
            rect.y1,
        )
    }
}

impl PointerHooks<HookCx> for ContinuousProgressBar {}

impl Widget for ContinuousProgressBar {
    fn default_style(&self) -> NodeStyle {
        NodeStyle {
            background_color: Color::rgb(171, 125, 101),
            ..NodeStyle::default()
        }
    }

    fn draw_background(&self, cx: &DrawCx<'_>, surface: &mut dyn Surface) {
        cx.draw_style_background(surface);
        let fill: &dyn Sprite = match &self.fill {
            Some(sprite) => &**sprite,
            None => &SolidSprite,
        };
        fill.draw(
            surface,
            self.fill_rect(cx.rect),
            self.fill_color,
            cx.depth + OVERLAY_STEP,
            1.0,
        );
    }
}

/// A bar made of `max - min` discrete ticks, the first `value - min` of them
/// filled.
///
/// Geometry is computed on whole pixels: ticks share the width left after
/// margins and spacing, and any remainder is split evenly around the tick
/// box.
#[derive(Clone, Debug)]
pub struct TickProgressBar {
    value: i32,
    min: i32,
    max: i32,
    tick: Option<Rc<dyn Sprite>>,
    /// Tick tint.
    pub tick_color: Color,
    /// Edge scale handed to the background and tick sprites.
    pub asset_scale: f64,
    /// Space between the tick box and the first or last tick.
    pub tick_margin: f64,
    /// Space between neighbouring ticks.
    pub tick_spacing: f64,
}

impl Default for TickProgressBar {
    fn default() -> Self {
        Self {
            value: 3,
            min: 0,
            max: 6,
            tick: None,
            tick_color: Color::WHITE,
            asset_scale: 3.0,
            tick_margin: 3.0,
            tick_spacing: 3.0,
        }
    }
}

impl TickProgressBar {
    /// Bar over `[min, max]` starting at `value`.
    pub fn new(value: i32, min: i32, max: i32) -> Result<Self, WidgetError> {
        let mut bar = Self {
            value: min,
            min,
            max: min,
            ..Self::default()
        };
        bar.set_range(min, max)?;
        bar.set_value(value)?;
        Ok(bar)
    }

    /// Draw ticks with `sprite` instead of a solid color.
    #[must_use]
    pub fn with_tick(mut self, sprite: Rc<dyn Sprite>) -> Self {
        self.tick = Some(sprite);
        self
    }

    /// Current value.
    pub fn value(&self) -> i32 {
        self.value
    }

    /// Lower bound.
    pub fn min(&self) -> i32 {
        self.min
    }

    /// Upper bound.
    pub fn max(&self) -> i32 {
        self.max
    }

    /// Set the value; must lie in `[min, max]`.
    pub fn set_value(&mut self, value: i32) -> Result<(), WidgetError> {
        check_value(
            f64::from(value),
            f64::from(self.min),
            f64::from(self.max),
        )?;
        self.value = value;
        Ok(())
    }

    /// Set the lower bound; must not exceed the maximum or the value.
    pub fn set_min(&mut self, min: i32) -> Result<(), WidgetError> {
        self.set_range(min, self.max)
    }

    /// Set the upper bound; must not be below the minimum or the value.
    pub fn set_max(&mut self, max: i32) -> Result<(), WidgetError> {
        self.set_range(self.min, max)
    }

    /// Set both bounds at once.
    pub fn set_range(&mut self, min: i32, max: i32) -> Result<(), WidgetError> {
        check_range(f64::from(min), f64::from(max))?;
        check_value(f64::from(self.value), f64::from(min), f64::from(max))?;
        self.min = min;
        self.max = max;
        Ok(())
    }

    /// Progress in `[0, 1]`.
    pub fn progress(&self) -> f64 {
        fraction(
            f64::from(self.value),
            f64::from(self.min),
            f64::from(self.max),
        )
    }

    /// Set the value from a progress fraction, truncating toward zero.
    pub fn set_progress(&mut self, progress: f64) -> Result<(), WidgetError> {
        let min = f64::from(self.min);
        let target = (min + (f64::from(self.max) - min) * progress).trunc();
        check_value(target, min, f64::from(self.max))?;
        #[allow(
            clippy::cast_possible_truncation,
            reason = "Checked against the i32 bounds above."
        )]
        let value = target as i32;
        self.value = value;
        Ok(())
    }

    /// The box the background is drawn into, and one rectangle per tick
    /// (filled or not) inside `rect`.
    pub fn tick_geometry(&self, rect: Rect) -> (Rect, Vec<Rect>) {
        let n = f64::from(self.max - self.min);
        if n <= 0.0 {
            return (rect, Vec::new());
        }
        let (m, s) = (self.tick_margin, self.tick_spacing);
        let (w, h) = (rect.width(), rect.height());
        let tick_w = ((w - (m + s) * 2.0 - s * (n - 1.0)) / n).trunc();
        let tick_h = h - (m + s) * 2.0;
        let offset_w = w - ((tick_w + s) * n + m * 2.0 + s);
        let offset_h = h - (tick_h + (m + s) * 2.0);
        let (dx, dy) = ((offset_w / 2.0).trunc(), (offset_h / 2.0).trunc());

        let frame = Rect::from_origin_size(
            (rect.x0 + dx, rect.y0 + dy),
            (w - offset_w, h - offset_h),
        );
        let ticks = (0..self.max - self.min)
            .map(|i| {
                let x = rect.x0 + m + s + f64::from(i) * (tick_w + s) + dx;
                let y = rect.y0 + m + s + dy;
                Rect::from_origin_size((x, y), (tick_w, tick_h))
            })
            .collect();
        (frame, ticks)
    }
}

impl PointerHooks<HookCx> for TickProgressBar {}

impl Widget for TickProgressBar {
    fn default_style(&self) -> NodeStyle {
        NodeStyle {
            background_color: Color::WHITE,
            border_width: 1.0,
            ..NodeStyle::default()
        }
    }

    fn draw_background(&self, cx: &DrawCx<'_>, surface: &mut dyn Surface) {
        let (frame, ticks) = self.tick_geometry(cx.rect);
        match &cx.style.background {
            Some(sprite) => sprite.draw(
                surface,
                frame,
                cx.style.background_color,
                cx.depth,
                self.asset_scale,
            ),
            None => cx.draw_background_in(surface, frame),
        }
        let tick: &dyn Sprite = match &self.tick {
            Some(sprite) => &**sprite,
            None => &SolidSprite,
        };
        let filled = usize::try_from(self.value - self.min).unwrap_or(0);
        for rect in ticks.into_iter().take(filled) {
            tick.draw(
                surface,
                rect,
                self.tick_color,
                cx.depth + OVERLAY_STEP,
                self.asset_scale,
            );
        }
    }
}
