use std::collections::BTreeSet;

use rand::{Rng, seq::IndexedRandom};

use crate::mode::Mode;

/// Draws a crisis seed for `mode` that is not in `used`, then records it.
///
/// Labels that do not belong to the mode's pool are dropped from `used` first.
/// Once every label of the pool has been used the set is cleared, so seeds
/// only repeat after the whole pool has been seen.
pub fn pick_seed<R: Rng + ?Sized>(
    mode: Mode,
    used: &mut BTreeSet<String>,
    rng: &mut R,
) -> &'static str {
    let pool = mode.seed_pool();
    used.retain(|seed| pool.contains(&seed.as_str()));

    if used.len() >= pool.len() {
        log::debug!("Seed pool for {mode} exhausted, clearing used seeds");
        used.clear();
    }

    let available: Vec<&'static str> = pool
        .iter()
        .copied()
        .filter(|seed| !used.contains(*seed))
        .collect();

    // `available` is non-empty: the pool is non-empty and was just cleared if needed.
    let seed = available.choose(rng).copied().unwrap_or(pool[0]);
    used.insert(seed.to_string());
    seed
}
