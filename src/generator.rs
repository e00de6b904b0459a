//! Identifier generator and the collaborator traits it draws on.

use crate::{
    fingerprint::{HostIdentity, SystemHost},
    Context, Cuid2, Error, DEFAULT_LENGTH, MAX_LENGTH, MIN_LENGTH,
};

pub mod with_rand08;

/// A trait that defines the minimum random number generator interface for [`Generator`].
///
/// The source does not need to be cryptographically secure.
pub trait RandSource {
    /// Returns the next random `u32`.
    fn next_u32(&mut self) -> u32;

    /// Fills `dest` with random data.
    fn fill_bytes(&mut self, dest: &mut [u8]);
}

impl<R: RandSource + ?Sized> RandSource for &mut R {
    fn next_u32(&mut self) -> u32 {
        (**self).next_u32()
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        (**self).fill_bytes(dest)
    }
}

/// A trait that defines the minimum system clock interface for [`Generator`].
pub trait TimeSource {
    /// Returns the current Unix timestamp in milliseconds.
    fn unix_ts_ms(&mut self) -> u64;
}

/// The default [`TimeSource`] that uses [`std::time::SystemTime`].
#[derive(Clone, Eq, PartialEq, Debug, Default)]
pub struct StdSystemTime;

impl TimeSource for StdSystemTime {
    /// Returns zero if the system clock is set before the Unix epoch, which makes the resulting
    /// identifier render as the sentinel.
    fn unix_ts_ms(&mut self) -> u64 {
        use std::time;
        time::SystemTime::now()
            .duration_since(time::UNIX_EPOCH)
            .map_or(0, |e| e.as_millis() as u64)
    }
}

/// Represents an identifier generator bound to a shared [`Context`].
///
/// The generator owns its random number generator and system clock while the counter and
/// fingerprint live in the context, so any number of generators (typically one per thread) can
/// feed from one context without locking.
///
/// # Examples
///
/// ```rust
/// use cuid2::{Context, Generator};
/// use std::thread;
///
/// let context = Context::new();
/// thread::scope(|s| {
///     for i in 0..4 {
///         let context = &context;
///         s.spawn(move || {
///             let mut g = Generator::with_rand08(context, rand::thread_rng());
///             for _ in 0..8 {
///                 println!("{} by thread {}", g.generate(), i);
///             }
///         });
///     }
/// });
/// ```
#[derive(Debug)]
pub struct Generator<'c, R, T = StdSystemTime, H = SystemHost> {
    context: &'c Context<H>,

    /// The random number generator used by the generator.
    rand_source: R,

    /// The system clock used by the generator.
    time_source: T,
}

impl<'c, R: RandSource, H: HostIdentity> Generator<'c, R, StdSystemTime, H> {
    /// Creates a generator instance that reads the system clock.
    pub const fn new(context: &'c Context<H>, rand_source: R) -> Self {
        Self::with_rand_and_time_sources(context, rand_source, StdSystemTime)
    }
}

impl<'c, R: RandSource, T: TimeSource, H: HostIdentity> Generator<'c, R, T, H> {
    /// Creates a generator instance with specified random number generator and system clock.
    pub const fn with_rand_and_time_sources(
        context: &'c Context<H>,
        rand_source: R,
        time_source: T,
    ) -> Self {
        Self {
            context,
            rand_source,
            time_source,
        }
    }

    /// Generates a new identifier of [`DEFAULT_LENGTH`] characters.
    pub fn generate(&mut self) -> Cuid2<'c> {
        self.generate_core(DEFAULT_LENGTH)
    }

    /// Generates a new identifier of `max_length` characters.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidLength`] if `max_length` is outside `MIN_LENGTH..=MAX_LENGTH`.
    pub fn generate_with_length(&mut self, max_length: usize) -> Result<Cuid2<'c>, Error> {
        if !(MIN_LENGTH..=MAX_LENGTH).contains(&max_length) {
            return Err(Error::InvalidLength(max_length));
        }
        Ok(self.generate_core(max_length))
    }

    fn generate_core(&mut self, max_length: usize) -> Cuid2<'c> {
        debug_assert!((MIN_LENGTH..=MAX_LENGTH).contains(&max_length));
        let context = self.context;
        let counter = context.counter().next();
        let fingerprint = context.fingerprint(&mut self.rand_source);

        // multiply-shift maps a u32 uniformly enough onto 0..26
        let prefix = b'a' + ((u64::from(self.rand_source.next_u32()) * 26) >> 32) as u8;

        let mut random = [0u8; MAX_LENGTH];
        self.rand_source.fill_bytes(&mut random[..max_length]);

        let timestamp = self.time_source.unix_ts_ms();
        Cuid2::assemble(
            counter,
            fingerprint.as_bytes(),
            prefix,
            &random[..max_length],
            timestamp,
            max_length,
        )
    }
}

/// Supports operations as an infinite iterator that produces a new identifier of
/// [`DEFAULT_LENGTH`] characters for each call of `next()`.
///
/// # Examples
///
/// ```rust
/// use cuid2::{Context, Generator};
///
/// let context = Context::new();
/// Generator::with_rand08(&context, rand::thread_rng())
///     .enumerate()
///     .skip(4)
///     .take(4)
///     .for_each(|(i, e)| println!("[{}] {}", i, e));
/// ```
impl<'c, R: RandSource, T: TimeSource, H: HostIdentity> Iterator for Generator<'c, R, T, H> {
    type Item = Cuid2<'c>;

    fn next(&mut self) -> Option<Self::Item> {
        Some(self.generate())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (usize::MAX, None)
    }
}

impl<R: RandSource, T: TimeSource, H: HostIdentity> std::iter::FusedIterator
    for Generator<'_, R, T, H>
{
}

#[cfg(test)]
mod tests {
    use super::{with_rand08::Adapter, Generator, RandSource, TimeSource};
    use crate::{Context, Counter, Error, Fingerprint, SystemHost, MAX_LENGTH, MIN_LENGTH};

    type ThreadGen<'c> = Generator<'c, Adapter<rand::rngs::ThreadRng>>;

    /// Returns the same bytes on every call, for reproducible output.
    struct FixedRand(u8);

    impl RandSource for FixedRand {
        fn next_u32(&mut self) -> u32 {
            u32::from(self.0) << 24
        }

        fn fill_bytes(&mut self, dest: &mut [u8]) {
            dest.fill(self.0);
        }
    }

    struct FixedTime(u64);

    impl TimeSource for FixedTime {
        fn unix_ts_ms(&mut self) -> u64 {
            self.0
        }
    }

    /// Generates identifiers of every supported length
    #[test]
    fn generates_identifiers_of_every_supported_length() {
        let re = regex::Regex::new(r"^[a-z][0-9a-z]+$").unwrap();
        let context = Context::new();
        let mut g: ThreadGen = Generator::with_rand08(&context, rand::thread_rng());
        for len in MIN_LENGTH..=MAX_LENGTH {
            let e = g.generate_with_length(len).unwrap().to_string();
            assert_eq!(e.len(), len);
            assert!(re.is_match(&e), "{}", e);
        }
    }

    /// Rejects out-of-range lengths
    #[test]
    fn rejects_out_of_range_lengths() {
        let context = Context::new();
        let mut g: ThreadGen = Generator::with_rand08(&context, rand::thread_rng());
        for len in [0, 1, MAX_LENGTH + 1, usize::MAX] {
            assert_eq!(g.generate_with_length(len), Err(Error::InvalidLength(len)));
        }
    }

    /// Advances shared counter across generators
    #[test]
    fn advances_shared_counter_across_generators() {
        let fp = Fingerprint::from(vec![7; 12]);
        let context = Context::with_parts(SystemHost, Counter::with_seed(100), fp);
        let mut g1: ThreadGen = Generator::with_rand08(&context, rand::thread_rng());
        let mut g2: ThreadGen = Generator::with_rand08(&context, rand::thread_rng());
        assert_eq!(g1.generate().counter(), Some(101));
        assert_eq!(g2.generate().counter(), Some(102));
        assert_eq!(g1.generate().counter(), Some(103));
    }

    /// Captures the same fingerprint in every identifier
    #[test]
    fn captures_the_same_fingerprint_in_every_identifier() {
        let context = Context::new();
        let mut g: ThreadGen = Generator::with_rand08(&context, rand::thread_rng());
        let a = g.generate();
        let b = g.generate();
        assert_ne!(a.to_string(), b.to_string());
        assert_eq!(a.fingerprint(), b.fingerprint());
        assert!(std::ptr::eq(a.fingerprint().unwrap(), b.fingerprint().unwrap()));
    }

    /// Draws prefix from random source
    #[test]
    fn draws_prefix_from_random_source() {
        let context = Context::new();
        for (byte, prefix) in [(0x00, 'a'), (0x80, 'n'), (0xff, 'z')] {
            let mut g = Generator::with_rand_and_time_sources(
                &context,
                FixedRand(byte),
                FixedTime(1_700_000_000_000),
            );
            let e = g.generate();
            assert_eq!(e.prefix(), Some(prefix));
            assert!(e.to_string().starts_with(prefix));
        }
    }

    /// Differs only by counter under fixed random and clock
    #[test]
    fn differs_only_by_counter_under_fixed_random_and_clock() {
        let fp = Fingerprint::from(vec![1; 10]);
        let context = Context::with_parts(SystemHost, Counter::with_seed(0), fp);
        let mut g = Generator::with_rand_and_time_sources(
            &context,
            FixedRand(42),
            FixedTime(1_700_000_000_000),
        );
        let a = g.generate();
        let b = g.generate();
        assert_eq!(a.counter(), Some(1));
        assert_eq!(b.counter(), Some(2));
        assert_eq!(a.timestamp(), b.timestamp());
        assert_ne!(a.to_string(), b.to_string());
    }

    /// Renders sentinel if clock reads zero
    #[test]
    fn renders_sentinel_if_clock_reads_zero() {
        let context = Context::new();
        let mut g = Generator::with_rand_and_time_sources(&context, FixedRand(1), FixedTime(0));
        let e = g.generate_with_length(40).unwrap();
        assert!(e.is_uninitialized());
        assert_eq!(e.to_string(), "0".repeat(24));
    }

    /// Works as an infinite iterator
    #[test]
    fn works_as_an_infinite_iterator() {
        use std::collections::HashSet;
        let context = Context::new();
        let g: ThreadGen = Generator::with_rand08(&context, rand::thread_rng());
        let s: HashSet<String> = g.take(1_000).map(|e| e.to_string()).collect();
        assert_eq!(s.len(), 1_000);
    }
}
