// Slice helpers that need randomness: in-place shuffle and sampling without
// replacement.
//
// Both are written purely against the `Sampling` trait, so they work with any
// generator (including `AnyGenerator` and `&mut dyn Generator`) and inherit
// its exact uniformity. Slices longer than `i32::MAX` items cannot be indexed
// through the signed sampling calls and are rejected up front.

use crate::error::RngError;
use crate::generator::Sampling;

fn signed_len(len: usize) -> Result<i32, RngError> {
    i32::try_from(len).map_err(|_| RngError::LengthOverflow(len))
}

/// Shuffle `items` in place with the Fisher-Yates algorithm.
///
/// Slot `i` is swapped with a uniform pick from `i..len`, for each `i` up
/// to the second-to-last slot.
pub fn shuffle<T, R: Sampling + ?Sized>(items: &mut [T], rng: &mut R) -> Result<(), RngError> {
    let last = signed_len(items.len())? - 1;
    for i in 0..last {
        let j = rng.random_in_range(i, last)?;
        items.swap(i as usize, j as usize);
    }
    Ok(())
}

/// Draw `count` items from `items` without replacement.
///
/// Each draw picks a uniform index into the pool of items not yet taken;
/// the last live item moves into the vacated slot. The result therefore has
/// no repeated positions, and for `count == items.len()` it is a uniformly
/// random permutation.
pub fn sample<T: Clone, R: Sampling + ?Sized>(
    items: &[T],
    count: usize,
    rng: &mut R,
) -> Result<Vec<T>, RngError> {
    if count > items.len() {
        return Err(RngError::SampleTooLarge {
            requested: count,
            available: items.len(),
        });
    }
    signed_len(items.len())?;

    let mut pool = items.to_vec();
    let mut taken = Vec::with_capacity(count);
    for _ in 0..count {
        let j = rng.random_index(pool.len() as i32)?;
        taken.push(pool.swap_remove(j as usize));
    }
    Ok(taken)
}
