use num_traits::{Float, NumCast};

/// Relative tolerance under which `value / step` counts as a whole
/// number of steps.
const WHOLE_STEP_TOLERANCE: f64 = 1e-9;

/// Returns true if `value` already sits on a multiple of `step`, up to
/// floating point error in the division.
fn on_multiple<T: Float>(value: T, step: T) -> bool {
    let quotient = value / step;
    let nearest = quotient.round();
    let tolerance = <T as NumCast>::from(WHOLE_STEP_TOLERANCE).unwrap_or_else(T::epsilon)
        * nearest.abs().max(T::one());
    (quotient - nearest).abs() <= tolerance
}

/// Snaps `value` down to the nearest multiple of `step`.
///
/// Values already on a multiple are returned unchanged.
pub fn snap_down<T: Float>(value: T, step: T) -> T {
    if on_multiple(value, step) {
        value
    } else {
        (value / step).floor() * step
    }
}

/// Snaps `value` up to the nearest multiple of `step`.
///
/// Values already on a multiple are returned unchanged.
pub fn snap_up<T: Float>(value: T, step: T) -> T {
    if on_multiple(value, step) {
        value
    } else {
        (value / step).ceil() * step
    }
}
