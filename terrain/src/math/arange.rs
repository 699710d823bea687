use num_traits::{Float, FromPrimitive};

/// Returns the half-open sequence `start, start + step, ...` of values
/// strictly less than `stop`.
///
/// Values are computed as `start + k * step` rather than by repeated
/// addition so long sequences don't drift.
pub fn arange<T>(start: T, stop: T, step: T) -> impl Iterator<Item = T>
where
    T: Float + FromPrimitive,
{
    let count = if step > T::zero() && stop > start {
        ((stop - start) / step).ceil().to_usize().unwrap_or(0)
    } else {
        0
    };
    (0..count)
        .map(move |k| start + T::from_usize(k).unwrap_or_else(T::zero) * step)
        .filter(move |value| *value < stop)
}
