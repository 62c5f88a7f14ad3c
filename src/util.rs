// Numeric helpers shared by the model, the gesture engine and the render step.

/// Exact `max(min, min(n, max))`, no rounding. NaN passes through unchanged so
/// callers can reject it.
pub fn clamp(n: f64, min: f64, max: f64) -> f64 {
    if n.is_nan() {
        return n;
    }
    min.max(n.min(max))
}

pub fn distance(a: (f64, f64), b: (f64, f64)) -> f64 {
    (a.0 - b.0).hypot(a.1 - b.1)
}

/// Half-up rounding, the way the browser's `Math.round` does it
/// (`-0.5` rounds to `0`, not `-1`).
pub fn round_half_up(v: f64) -> f64 {
    let r = (v + 0.5).floor();
    if r == 0.0 { 0.0 } else { r }
}
