//! Process-scoped monotonic counter.

use std::sync::{
    atomic::{AtomicI64, Ordering},
    OnceLock,
};

use tracing::debug;

/// Odd multiplier that spreads the random seed over the 64-bit range.
const SEED_MULTIPLIER: i64 = 476_782_367;

/// Represents a monotonically increasing 64-bit counter shared by every generator of a
/// [`Context`](crate::Context).
///
/// The counter is seeded pseudo-randomly on first use so that independent processes start from
/// unrelated values. Every call to [`next`](Counter::next) advances it with a single atomic
/// increment; concurrent callers never block each other and never observe the same value.
/// Overflow wraps around.
///
/// # Examples
///
/// ```rust
/// use cuid2::Counter;
///
/// let counter = Counter::with_seed(5);
/// assert_eq!(counter.next(), 6);
/// assert_eq!(counter.next(), 7);
/// ```
#[derive(Debug, Default)]
pub struct Counter(OnceLock<AtomicI64>);

impl Counter {
    /// Creates a counter that seeds itself on first use.
    pub const fn new() -> Self {
        Self(OnceLock::new())
    }

    /// Creates a counter whose first [`next`](Counter::next) returns `seed + 1`.
    pub fn with_seed(seed: i64) -> Self {
        Self(OnceLock::from(AtomicI64::new(seed)))
    }

    /// Advances the counter and returns the new value.
    ///
    /// If two threads race to seed the counter, exactly one seed wins and both build on it.
    pub fn next(&self) -> i64 {
        self.0
            .get_or_init(|| AtomicI64::new(random_seed()))
            .fetch_add(1, Ordering::Relaxed)
            .wrapping_add(1)
    }
}

fn random_seed() -> i64 {
    let seed = i64::from(rand::random::<u32>()).wrapping_mul(SEED_MULTIPLIER);
    debug!(seed, "seeded identifier counter");
    seed
}

#[cfg(test)]
mod tests {
    use super::Counter;

    /// Returns consecutive values after seed
    #[test]
    fn returns_consecutive_values_after_seed() {
        let counter = Counter::with_seed(5);
        for expected in 6..1_000 {
            assert_eq!(counter.next(), expected);
        }
    }

    /// Increases by one from random seed
    #[test]
    fn increases_by_one_from_random_seed() {
        let counter = Counter::new();
        let mut prev = counter.next();
        for _ in 0..10_000 {
            let curr = counter.next();
            assert_eq!(curr, prev.wrapping_add(1));
            prev = curr;
        }
    }

    /// Wraps around at the end of the 64-bit range
    #[test]
    fn wraps_around_at_the_end_of_the_64_bit_range() {
        let counter = Counter::with_seed(i64::MAX - 1);
        assert_eq!(counter.next(), i64::MAX);
        assert_eq!(counter.next(), i64::MIN);
    }

    /// Hands out every value exactly once under multithreading
    #[test]
    fn hands_out_every_value_exactly_once_under_multithreading() {
        use std::thread;

        const N_THREADS: i64 = 8;
        const N_CALLS: i64 = 10_000;

        let seed = 1_000;
        let counter = Counter::with_seed(seed);
        let mut values: Vec<i64> = thread::scope(|s| {
            let handles: Vec<_> = (0..N_THREADS)
                .map(|_| s.spawn(|| (0..N_CALLS).map(|_| counter.next()).collect::<Vec<_>>()))
                .collect();
            handles
                .into_iter()
                .flat_map(|h| h.join().unwrap())
                .collect()
        });

        values.sort_unstable();
        let expected: Vec<i64> = (seed + 1..=seed + N_THREADS * N_CALLS).collect();
        assert_eq!(values, expected);
    }

    /// Seeds a shared counter once under racing initialization
    #[test]
    fn seeds_a_shared_counter_once_under_racing_initialization() {
        use std::{sync::Barrier, thread};

        let counter = Counter::new();
        let barrier = Barrier::new(4);
        let mut values: Vec<i64> = thread::scope(|s| {
            let handles: Vec<_> = (0..4)
                .map(|_| {
                    s.spawn(|| {
                        barrier.wait();
                        counter.next()
                    })
                })
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });

        values.sort_unstable();
        for w in values.windows(2) {
            assert_eq!(w[1], w[0].wrapping_add(1));
        }
    }
}
