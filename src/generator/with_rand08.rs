//! Integration with `rand` (v0.8) crate.

use super::{Generator, RandSource, StdSystemTime};
use crate::{fingerprint::HostIdentity, Context};
use rand::RngCore;

/// An adapter that implements [`RandSource`] for [`RngCore`] types.
#[derive(Clone, Eq, PartialEq, Debug, Default)]
pub struct Adapter<T>(/** The wrapped [`RngCore`] type. */ pub T);

impl<T: RngCore> RandSource for Adapter<T> {
    fn next_u32(&mut self) -> u32 {
        self.0.next_u32()
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        self.0.fill_bytes(dest)
    }
}

impl<'c, T: RngCore, H: HostIdentity> Generator<'c, Adapter<T>, StdSystemTime, H> {
    /// Creates a generator object with a specified random number generator that implements
    /// [`RngCore`] from `rand` (v0.8) crate.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use cuid2::{Context, Generator};
    ///
    /// let context = Context::new();
    /// let mut g = Generator::with_rand08(&context, rand::rngs::OsRng);
    /// println!("{}", g.generate());
    /// ```
    pub const fn with_rand08(context: &'c Context<H>, rng: T) -> Self {
        Self::new(context, Adapter(rng))
    }
}
