use num_traits::{Float, FromPrimitive};

/// Returns `n` evenly spaced values from `start` to `end`, both
/// inclusive.
///
/// `n` must be at least 2.
pub fn linspace<T>(start: T, end: T, n: usize) -> impl Iterator<Item = T>
where
    T: Float + FromPrimitive,
{
    let step = (end - start) / T::from_usize(n - 1).unwrap_or_else(T::one);
    (0..n).map(move |i| {
        if i + 1 == n {
            end
        } else {
            start + T::from_usize(i).unwrap_or_else(T::zero) * step
        }
    })
}
