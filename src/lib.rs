//! Short, collision-resistant, hash-diffused identifiers for naming objects without central
//! coordination
//!
//! ```rust
//! let id = cuid2::cuid2();
//! println!("{}", id); // e.g., "tz4a98xxat96iws9zmbrgj3a"
//!
//! let short = cuid2::cuid2_with_length(10)?;
//! assert_eq!(short.len(), 10);
//! # Ok::<(), cuid2::Error>(())
//! ```
//!
//! # Construction
//!
//! Each identifier is built from five inputs:
//!
//! - A 64-bit counter shared by the whole process. It starts from a random seed and is advanced
//!   by one atomic increment per identifier, so identifiers generated within the same millisecond
//!   still differ.
//! - A process fingerprint made of the host name, the process ID, the ID of the thread that first
//!   needed it, and 32 random bytes. It is computed once and reused.
//! - A prefix letter drawn uniformly from `a`-`z`, so that the output never begins with a digit
//!   and can serve as an identifier token where leading digits are invalid.
//! - A random salt with as many bytes as the requested output length.
//! - The Unix timestamp in milliseconds.
//!
//! The timestamp and counter (little-endian), the fingerprint, and the salt are hashed with
//! SHA-512. The 64-byte digest, read as a little-endian integer, is written out in base 36 (100
//! digits), and the identifier is the prefix letter followed by the first `length - 1` digits.
//! The hash diffuses every input across the whole output; uniqueness is statistical, not
//! guaranteed.
//!
//! The default length is 24 characters. Any length from [`MIN_LENGTH`] (2) to [`MAX_LENGTH`]
//! (101) is accepted.
//!
//! # Sharing state explicitly
//!
//! The entry point functions use a process-wide [`Context`]. Applications that prefer to own
//! that state create a [`Context`] themselves and hand it to one [`Generator`] per thread:
//!
//! ```rust
//! use cuid2::{Context, Generator};
//!
//! let context = Context::new();
//! let mut g = Generator::with_rand08(&context, rand::thread_rng());
//! let id = g.generate();
//! assert_eq!(id.to_string().len(), 24);
//! ```

#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod base36;

mod counter;
pub use counter::Counter;

mod context;
pub use context::Context;

mod cuid2;
pub use crate::cuid2::{is_cuid, Cuid2, Parts};

mod error;
pub use error::Error;

mod fingerprint;
pub use fingerprint::{Fingerprint, HostIdentity, SystemHost};

pub mod generator;
pub use generator::Generator;

mod global_gen;
#[cfg(feature = "global_gen")]
pub use global_gen::{cuid2, cuid2_with_length};

/// Length of identifiers produced by [`Generator::generate`] and of the sentinel string.
pub const DEFAULT_LENGTH: usize = 24;

/// Shortest supported identifier: one prefix letter plus one digit.
pub const MIN_LENGTH: usize = 2;

/// Longest supported identifier: one prefix letter plus every digit of the encoded digest.
pub const MAX_LENGTH: usize = 101;
