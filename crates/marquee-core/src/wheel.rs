//! Wheel animation and screen-space geometry.
//!
//! The carousel produces target [`ItemLayout`]s; the animator eases each
//! item from wherever it is currently drawn toward its newest target, and
//! [`WheelGeometry`] turns layouts into rectangles for drawing and
//! pointer hit testing.

use std::time::{Duration, Instant};

use crate::animation::{Tween, easing};
use crate::carousel::ItemLayout;

// ---------------------------------------------------------------------------
// Animator
// ---------------------------------------------------------------------------

/// Eases every item toward its latest target layout.
#[derive(Debug)]
pub struct WheelAnimator {
    from: Vec<ItemLayout>,
    to: Vec<ItemLayout>,
    tween: Option<Tween>,
    duration: Duration,
}

impl WheelAnimator {
    pub fn new(duration: Duration) -> Self {
        Self {
            from: Vec::new(),
            to: Vec::new(),
            tween: None,
            duration,
        }
    }

    /// Start moving toward `targets`. Items keep continuity with whatever
    /// is displayed at `now`; a change in item count snaps instead.
    pub fn retarget(&mut self, now: Instant, targets: Vec<ItemLayout>) {
        if targets.len() != self.to.len() {
            self.from = targets.clone();
            self.to = targets;
            self.tween = None;
            return;
        }
        self.from = self.layouts(now);
        self.to = targets;
        self.tween = Some(Tween::new(now, self.duration, easing::ease_out_cubic));
    }

    /// Layouts as they should be drawn at `now`.
    pub fn layouts(&self, now: Instant) -> Vec<ItemLayout> {
        let Some(tween) = self.tween.filter(|t| !t.is_finished(now)) else {
            return self.to.clone();
        };
        let t = tween.progress(now);
        self.from
            .iter()
            .zip(&self.to)
            .map(|(from, to)| from.lerp(to, t))
            .collect()
    }

    pub fn is_animating(&self, now: Instant) -> bool {
        self.tween.is_some_and(|t| !t.is_finished(now))
    }
}

// ---------------------------------------------------------------------------
// Geometry
// ---------------------------------------------------------------------------

/// Unscaled tile edge in pixels.
pub const TILE_BASE_SIZE: f32 = 160.0;

/// Wheel baseline as a fraction of viewport height.
pub const BASELINE_RATIO: f32 = 0.62;

/// Screen placement of one item: a square of side `size` centred on
/// `(cx, cy)`, rotated clockwise by `rotation` degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ItemRect {
    pub cx: f32,
    pub cy: f32,
    pub size: f32,
    pub rotation: f32,
}

impl ItemRect {
    /// Axis-aligned top-left corner and edge, rounded for blitting.
    pub fn pixel_bounds(&self) -> (i32, i32, u32) {
        let half = self.size / 2.0;
        (
            (self.cx - half).round() as i32,
            (self.cy - half).round() as i32,
            self.size.round().max(0.0) as u32,
        )
    }

    /// Point-in-rotated-square test.
    pub fn contains(&self, x: f32, y: f32) -> bool {
        if self.size <= 0.0 {
            return false;
        }
        let (sin, cos) = (-self.rotation).to_radians().sin_cos();
        let (dx, dy) = (x - self.cx, y - self.cy);
        let lx = dx * cos - dy * sin;
        let ly = dx * sin + dy * cos;
        let half = self.size / 2.0;
        lx.abs() <= half && ly.abs() <= half
    }
}

/// Maps layouts onto a viewport.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WheelGeometry {
    pub width: u32,
    pub height: u32,
}

impl WheelGeometry {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn baseline(&self) -> f32 {
        self.height as f32 * BASELINE_RATIO
    }

    pub fn rect(&self, layout: &ItemLayout) -> ItemRect {
        let w = self.width as f32;
        ItemRect {
            cx: w / 2.0 + layout.offset_x / 100.0 * w,
            cy: self.baseline() + layout.offset_y,
            size: TILE_BASE_SIZE * layout.scale,
            rotation: layout.rotation,
        }
    }

    /// Index of the topmost interactive item under `(x, y)`.
    pub fn hit_test(&self, layouts: &[ItemLayout], x: i32, y: i32) -> Option<usize> {
        layouts
            .iter()
            .enumerate()
            .filter(|(_, l)| l.interactive && l.opacity > 0.0)
            .filter(|(_, l)| self.rect(l).contains(x as f32, y as f32))
            .max_by_key(|(_, l)| l.z_order)
            .map(|(i, _)| i)
    }
}
