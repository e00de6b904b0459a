use std::sync::OnceLock;

use crate::{
    fingerprint::{Fingerprint, HostIdentity, SystemHost},
    generator::RandSource,
    Counter,
};

/// Holds the state shared by every generator of one process: the [`Counter`] and the lazily built
/// [`Fingerprint`].
///
/// A context is meant to be created once by the application and handed by reference to each
/// [`Generator`](crate::Generator). It is `Sync`, so generators on different threads can share
/// it without extra locking.
///
/// # Examples
///
/// ```rust
/// use cuid2::{Context, Generator};
///
/// let context = Context::new();
/// let mut g = Generator::with_rand08(&context, rand::thread_rng());
/// println!("{}", g.generate());
/// ```
#[derive(Debug, Default)]
pub struct Context<H = SystemHost> {
    counter: Counter,
    fingerprint: OnceLock<Fingerprint>,
    host: H,
}

impl Context {
    /// Creates a context that queries the operating system for the host identity.
    pub const fn new() -> Self {
        Self::with_host(SystemHost)
    }
}

impl<H> Context<H> {
    /// Creates a context with a custom host identity.
    pub const fn with_host(host: H) -> Self {
        Self {
            counter: Counter::new(),
            fingerprint: OnceLock::new(),
            host,
        }
    }

    /// Creates a context from an explicit counter and fingerprint.
    pub fn with_parts(host: H, counter: Counter, fingerprint: Fingerprint) -> Self {
        Self {
            counter,
            fingerprint: OnceLock::from(fingerprint),
            host,
        }
    }

    /// Returns a reference to the shared counter.
    pub fn counter(&self) -> &Counter {
        &self.counter
    }
}

impl<H: HostIdentity> Context<H> {
    /// Returns the fingerprint, building it with `rand_source` on the first call.
    ///
    /// Every caller, on any thread, receives a reference to the same fingerprint.
    pub fn fingerprint<R: RandSource>(&self, rand_source: &mut R) -> &Fingerprint {
        self.fingerprint
            .get_or_init(|| Fingerprint::build(&self.host, rand_source))
    }
}

#[cfg(test)]
mod tests {
    use super::Context;
    use crate::{generator::with_rand08::Adapter, Counter, Fingerprint};

    /// Builds fingerprint once and returns the same reference
    #[test]
    fn builds_fingerprint_once_and_returns_the_same_reference() {
        let context = Context::new();
        let mut rng = Adapter(rand::thread_rng());
        let a = context.fingerprint(&mut rng);
        let b = context.fingerprint(&mut rng);
        assert!(std::ptr::eq(a, b));
    }

    /// Shares one fingerprint across threads
    #[test]
    fn shares_one_fingerprint_across_threads() {
        use std::thread;

        let context = Context::new();
        let fingerprints: Vec<&Fingerprint> = thread::scope(|s| {
            let handles: Vec<_> = (0..4)
                .map(|_| s.spawn(|| context.fingerprint(&mut Adapter(rand::thread_rng()))))
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });
        for e in &fingerprints[1..] {
            assert!(std::ptr::eq(fingerprints[0], *e));
        }
    }

    /// Uses explicitly supplied counter and fingerprint
    #[test]
    fn uses_explicitly_supplied_counter_and_fingerprint() {
        let fp = Fingerprint::from(vec![1, 2, 3]);
        let context = Context::with_parts(crate::SystemHost, Counter::with_seed(41), fp.clone());
        assert_eq!(context.counter().next(), 42);
        assert_eq!(context.fingerprint(&mut Adapter(rand::thread_rng())), &fp);
    }
}
