//! Without-replacement round selection.
//!
//! The pool itself is never mutated. Consumed entries are tracked as a set
//! of identity keys and the draw is made uniformly over the complement.

use std::collections::HashSet;

use rand::Rng;

use crate::models::Country;

/// Draw the next round's country uniformly from the pool entries whose keys
/// are not in `used`. Returns `None` when the pool is exhausted.
///
/// Side-effect-free: the caller records the returned country's key in `used`
/// when it actually starts the round.
pub fn select_next<'a, R: Rng>(
    pool: &'a [Country],
    used: &HashSet<String>,
    rng: &mut R,
) -> Option<&'a Country> {
    let remaining: Vec<usize> =
        (0..pool.len()).filter(|&i| !used.contains(pool[i].key())).collect();
    if remaining.is_empty() {
        return None;
    }
    let idx = remaining[rng.gen_range(0..remaining.len())];
    Some(&pool[idx])
}
