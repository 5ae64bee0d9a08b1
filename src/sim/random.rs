//! Total random helpers over the seeded run RNG
//!
//! None of these panic or return NaN: inverted or degenerate bounds collapse to
//! a single value instead.

use rand::Rng;

/// Uniform draw in `[min, max)`; returns `max` when `min >= max`
pub fn range<R: Rng + ?Sized>(rng: &mut R, min: f32, max: f32) -> f32 {
    match (min.is_finite(), max.is_finite()) {
        (true, true) => {}
        (true, false) => return min,
        (false, true) => return max,
        (false, false) => return 0.0,
    }
    let t: f32 = rng.random();
    if max <= min {
        return max;
    }
    min + t * (max - min)
}

/// Bernoulli trial; `p` outside [0, 1] saturates
pub fn chance<R: Rng + ?Sized>(rng: &mut R, p: f32) -> bool {
    let roll: f32 = rng.random();
    roll < p
}

/// Pick from `(item, weight)` pairs with a single uniform draw compared against
/// cumulative thresholds in table order. Returns `None` only for an empty table.
pub fn weighted<R: Rng + ?Sized, T: Copy>(rng: &mut R, table: &[(T, u32)]) -> Option<T> {
    let total: u32 = table.iter().map(|&(_, w)| w).sum();
    let roll: f32 = rng.random();
    if total == 0 {
        return table.first().map(|&(item, _)| item);
    }
    let roll = roll * total as f32;
    let mut cumulative = 0u32;
    for &(item, weight) in table {
        cumulative += weight;
        if roll < cumulative as f32 {
            return Some(item);
        }
    }
    // f32 rounding can leave roll == total; fall back to the last kind
    table.last().map(|&(item, _)| item)
}
