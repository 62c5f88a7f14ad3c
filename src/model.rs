//! Overlay transform model.
//! `TransformState` is the single source of truth for where the overlay sits,
//! how big it is, how it is rotated and how see-through it is.

use serde::{Deserialize, Serialize};

use crate::util::clamp;

pub const DEFAULT_OPACITY: f64 = 0.4;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScaleBounds {
    pub min: f64,
    pub max: f64,
}

impl Default for ScaleBounds {
    fn default() -> Self {
        Self { min: 0.25, max: 3.0 }
    }
}

impl ScaleBounds {
    pub fn clamp(&self, v: f64) -> f64 {
        clamp(v, self.min, self.max)
    }

    pub fn contains(&self, v: f64) -> bool {
        (self.min..=self.max).contains(&v)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TransformState {
    /// Pixel offset from the viewport center.
    x: f64,
    y: f64,
    scale: f64,
    /// Degrees, no wraparound.
    rotation: f64,
    opacity: f64,
    /// Freezes the overlay against gestures. Sliders still apply.
    locked: bool,
    bounds: ScaleBounds,
    default_opacity: f64,
}

impl Default for TransformState {
    fn default() -> Self {
        Self::new(ScaleBounds::default(), DEFAULT_OPACITY)
    }
}

impl TransformState {
    pub fn new(bounds: ScaleBounds, default_opacity: f64) -> Self {
        let mut state = Self {
            x: 0.0,
            y: 0.0,
            scale: 1.0,
            rotation: 0.0,
            opacity: 0.0,
            locked: false,
            bounds,
            default_opacity: clamp(default_opacity, 0.0, 1.0),
        };
        state.reset();
        state
    }

    pub fn x(&self) -> f64 {
        self.x
    }
    pub fn y(&self) -> f64 {
        self.y
    }
    pub fn scale(&self) -> f64 {
        self.scale
    }
    pub fn rotation(&self) -> f64 {
        self.rotation
    }
    pub fn opacity(&self) -> f64 {
        self.opacity
    }
    pub fn locked(&self) -> bool {
        self.locked
    }
    pub fn bounds(&self) -> ScaleBounds {
        self.bounds
    }

    /// Back to the session defaults. The lock flag is left alone.
    pub fn reset(&mut self) {
        self.x = 0.0;
        self.y = 0.0;
        self.scale = self.bounds.clamp(1.0);
        self.rotation = 0.0;
        self.opacity = self.default_opacity;
    }

    // Slider setters: these bypass the lock.

    pub fn set_opacity(&mut self, v: f64) {
        if v.is_nan() {
            return;
        }
        self.opacity = clamp(v, 0.0, 1.0);
    }

    pub fn set_scale(&mut self, v: f64) {
        if v.is_nan() {
            return;
        }
        self.scale = self.bounds.clamp(v);
    }

    pub fn set_rotation(&mut self, v: f64) {
        if v.is_finite() {
            self.rotation = v;
        }
    }

    // Gesture mutators: no-ops while locked.

    /// Returns whether the offset changed.
    pub fn translate_by(&mut self, dx: f64, dy: f64) -> bool {
        if self.locked {
            return false;
        }
        let (nx, ny) = (self.x + dx, self.y + dy);
        if !(nx.is_finite() && ny.is_finite()) {
            return false;
        }
        let changed = nx != self.x || ny != self.y;
        self.x = nx;
        self.y = ny;
        changed
    }

    /// Returns whether the scale changed.
    pub fn scale_to(&mut self, v: f64) -> bool {
        if self.locked || v.is_nan() {
            return false;
        }
        let next = self.bounds.clamp(v);
        debug_assert!(self.bounds.contains(next));
        let changed = next != self.scale;
        self.scale = next;
        changed
    }

    pub fn set_locked(&mut self, locked: bool) {
        self.locked = locked;
    }
}
