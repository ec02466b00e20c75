//! Deterministic target sampling
//!
//! Daily sessions on every server instance must pick the same words for the
//! same date, so the generator is pinned: a 32-bit linear congruential
//! generator with multiplier 1664525 and increment 1013904223. Changing
//! either constant reshuffles every future daily puzzle.

use rustc_hash::FxHashSet;

/// 32-bit linear congruential generator
#[derive(Debug, Clone)]
pub struct Lcg {
    state: u32,
}

impl Lcg {
    pub const MULTIPLIER: u32 = 1_664_525;
    pub const INCREMENT: u32 = 1_013_904_223;

    #[must_use]
    pub const fn new(seed: u32) -> Self {
        Self { state: seed }
    }

    /// Advance the generator and return the new state
    pub const fn next_u32(&mut self) -> u32 {
        self.state = self
            .state
            .wrapping_mul(Self::MULTIPLIER)
            .wrapping_add(Self::INCREMENT);
        self.state
    }

    /// Next value in `[0, 1)`
    pub fn next_f64(&mut self) -> f64 {
        f64::from(self.next_u32()) / 4_294_967_296.0
    }
}

/// Pick `count` distinct ids in `1..=max_id`, reproducibly from `seed`
///
/// Ids are returned in first-seen order, not sorted. Returns `None` when
/// `max_id < count`, since the draw could never finish.
///
/// # Examples
/// ```
/// use sixtysevendle::game::sample_ids;
///
/// let ids = sample_ids(42, 5, 10).unwrap();
/// assert_eq!(ids, vec![3, 1, 6, 4, 5]);
/// assert_eq!(sample_ids(42, 5, 10), Some(ids));
/// ```
#[must_use]
pub fn sample_ids(seed: u32, count: usize, max_id: usize) -> Option<Vec<usize>> {
    if max_id < count {
        return None;
    }

    let mut rng = Lcg::new(seed);
    let mut seen = FxHashSet::default();
    let mut picked = Vec::with_capacity(count);

    // The generator has full period 2^32, so every id is eventually drawn
    while picked.len() < count {
        let id = (rng.next_f64() * max_id as f64).floor() as usize + 1;
        if seen.insert(id) {
            picked.push(id);
        }
    }

    Some(picked)
}
