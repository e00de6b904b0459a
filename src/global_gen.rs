//! Default context and entry point functions.

#![cfg(feature = "global_gen")]
#![cfg_attr(docsrs, doc(cfg(feature = "global_gen")))]

use std::cell::RefCell;

use rand::SeedableRng;
use rand_chacha::ChaCha12Rng;

use crate::{generator::with_rand08::Adapter, Context, Error, Generator};

/// The process-wide context shared by every thread.
static CONTEXT: Context = Context::new();

thread_local! {
    static RNG: RefCell<Adapter<ChaCha12Rng>> = RefCell::new(Adapter(ChaCha12Rng::from_entropy()));
}

/// Generates an identifier string of [`DEFAULT_LENGTH`](crate::DEFAULT_LENGTH) (24) characters.
///
/// This function employs a process-wide [`Context`] and a per-thread random number generator. On
/// Unix, the per-thread generator is reseeded when the process ID changes (i.e., upon process
/// forks) so that forked children do not repeat the parent's random stream.
///
/// # Examples
///
/// ```rust
/// let id = cuid2::cuid2();
/// println!("{}", id); // e.g., "tz4a98xxat96iws9zmbrgj3a"
/// assert_eq!(id.len(), 24);
/// ```
pub fn cuid2() -> String {
    with_generator(|g| g.generate().to_string())
}

/// Generates an identifier string of `max_length` characters.
///
/// # Errors
///
/// Returns [`Error::InvalidLength`] if `max_length` is outside
/// [`MIN_LENGTH`](crate::MIN_LENGTH)`..=`[`MAX_LENGTH`](crate::MAX_LENGTH).
///
/// # Examples
///
/// ```rust
/// let id = cuid2::cuid2_with_length(10)?;
/// assert_eq!(id.len(), 10);
/// assert!(cuid2::cuid2_with_length(1).is_err());
/// # Ok::<(), cuid2::Error>(())
/// ```
pub fn cuid2_with_length(max_length: usize) -> Result<String, Error> {
    with_generator(|g| g.generate_with_length(max_length).map(String::from))
}

/// Runs `f` with a generator bound to the process-wide context and this thread's RNG.
fn with_generator<F, T>(f: F) -> T
where
    F: FnOnce(&mut Generator<'static, &mut Adapter<ChaCha12Rng>>) -> T,
{
    RNG.with(|rng| {
        let mut rng = rng.borrow_mut();
        if unix_fork_safety::process_id_changed() {
            *rng = Adapter(ChaCha12Rng::from_entropy());
        }
        f(&mut Generator::new(&CONTEXT, &mut *rng))
    })
}

#[cfg(unix)]
mod unix_fork_safety {
    use std::{cell::Cell, process};

    thread_local! {
        static PID: Cell<u32> = Cell::new(process::id());
    }

    /// Returns true if the process ID differs from the one last seen by this thread.
    pub fn process_id_changed() -> bool {
        PID.with(|last_pid| {
            let pid = process::id();
            pid != last_pid.replace(pid)
        })
    }
}

#[cfg(not(unix))]
mod unix_fork_safety {
    pub const fn process_id_changed() -> bool {
        false
    }
}
