use std::{fmt, ops, str};

use sha2::{Digest, Sha512};

use crate::{base36, Error, DEFAULT_LENGTH, MAX_LENGTH, MIN_LENGTH};

/// Byte length of the SHA-512 digest.
const DIGEST_LEN: usize = 64;

/// Number of base-36 digits of an encoded digest, i.e. `base36::encoded_len(DIGEST_LEN)`.
pub(crate) const ENCODED_DIGEST_LEN: usize = 100;

/// Represents a collision-resistant identifier, captured at construction and rendered on demand.
///
/// A constructed identifier holds the counter, fingerprint, prefix letter, random salt, and
/// timestamp it was built from. Its string form is derived lazily: the timestamp and counter
/// (little-endian), the fingerprint, and the salt are hashed with SHA-512, the digest is encoded
/// in base 36, and the prefix letter is prepended to the first `max_length - 1` digits.
///
/// [`Cuid2::Uninitialized`] is the default value. It skips hashing and always renders as 24 `'0'`
/// characters.
///
/// # Examples
///
/// ```rust
/// use cuid2::Cuid2;
///
/// let x = Cuid2::from_parts(5, &[1, 2, 3], 'q', &[0; 24], 1_700_000_000_000, 24)?;
/// assert_eq!(x.to_string().len(), 24);
/// assert_eq!(x.to_string(), x.to_string());
///
/// assert_eq!(Cuid2::default().to_string(), "000000000000000000000000");
/// # Ok::<(), cuid2::Error>(())
/// ```
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
pub enum Cuid2<'a> {
    /// A value that was never properly constructed.
    #[default]
    Uninitialized,

    /// A value captured from a counter, fingerprint, salt, and clock.
    Constructed(Parts<'a>),
}

/// Field values of a [`Cuid2::Constructed`] identifier.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct Parts<'a> {
    counter: i64,
    fingerprint: &'a [u8],
    prefix: u8,
    random: [u8; MAX_LENGTH],
    random_len: usize,
    timestamp: u64,
    max_length: usize,
}

impl<'a> Cuid2<'a> {
    /// Creates an identifier from explicit field values.
    ///
    /// If any field holds its zero value (`counter == 0`, empty `fingerprint`, `prefix == '\0'`,
    /// empty `random`, `timestamp == 0`, or `max_length == 0`), the result is
    /// [`Cuid2::Uninitialized`].
    ///
    /// # Errors
    ///
    /// Returns an error if `max_length` is outside `MIN_LENGTH..=MAX_LENGTH`, `prefix` is not a
    /// lowercase ASCII letter, or `random` is longer than `MAX_LENGTH` bytes.
    pub fn from_parts(
        counter: i64,
        fingerprint: &'a [u8],
        prefix: char,
        random: &[u8],
        timestamp: u64,
        max_length: usize,
    ) -> Result<Self, Error> {
        if prefix == '\0' || max_length == 0 {
            return Ok(Self::Uninitialized);
        }
        if !prefix.is_ascii_lowercase() {
            return Err(Error::InvalidPrefix(prefix));
        }
        if !(MIN_LENGTH..=MAX_LENGTH).contains(&max_length) {
            return Err(Error::InvalidLength(max_length));
        }
        if random.len() > MAX_LENGTH {
            return Err(Error::RandomTooLong(random.len()));
        }
        Ok(Self::assemble(
            counter,
            fingerprint,
            prefix as u8,
            random,
            timestamp,
            max_length,
        ))
    }

    /// Creates an identifier from field values already known to be in range.
    pub(crate) fn assemble(
        counter: i64,
        fingerprint: &'a [u8],
        prefix: u8,
        random: &[u8],
        timestamp: u64,
        max_length: usize,
    ) -> Self {
        if counter == 0
            || fingerprint.is_empty()
            || prefix == 0
            || random.is_empty()
            || timestamp == 0
            || max_length == 0
        {
            return Self::Uninitialized;
        }

        let mut buffer = [0u8; MAX_LENGTH];
        buffer[..random.len()].copy_from_slice(random);
        Self::Constructed(Parts {
            counter,
            fingerprint,
            prefix,
            random: buffer,
            random_len: random.len(),
            timestamp,
            max_length,
        })
    }

    /// Returns `true` if this is the [`Cuid2::Uninitialized`] sentinel.
    pub const fn is_uninitialized(&self) -> bool {
        matches!(self, Self::Uninitialized)
    }

    /// Returns the counter value captured at construction.
    pub const fn counter(&self) -> Option<i64> {
        match self {
            Self::Constructed(p) => Some(p.counter),
            Self::Uninitialized => None,
        }
    }

    /// Returns the process fingerprint captured at construction.
    pub const fn fingerprint(&self) -> Option<&'a [u8]> {
        match self {
            Self::Constructed(p) => Some(p.fingerprint),
            Self::Uninitialized => None,
        }
    }

    /// Returns the leading letter of the rendered string.
    pub const fn prefix(&self) -> Option<char> {
        match self {
            Self::Constructed(p) => Some(p.prefix as char),
            Self::Uninitialized => None,
        }
    }

    /// Returns the random salt captured at construction.
    pub fn random(&self) -> Option<&[u8]> {
        match self {
            Self::Constructed(p) => Some(&p.random[..p.random_len]),
            Self::Uninitialized => None,
        }
    }

    /// Returns the Unix timestamp in milliseconds captured at construction.
    pub const fn timestamp(&self) -> Option<u64> {
        match self {
            Self::Constructed(p) => Some(p.timestamp),
            Self::Uninitialized => None,
        }
    }

    /// Returns the length of the rendered string.
    pub const fn max_length(&self) -> usize {
        match self {
            Self::Constructed(p) => p.max_length,
            Self::Uninitialized => DEFAULT_LENGTH,
        }
    }

    /// Returns the string representation stored in a stack-allocated structure that can be
    /// dereferenced as `str` and [`Display`](fmt::Display)ed.
    ///
    /// Every call recomputes the same string; no heap allocation is involved.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use cuid2::Cuid2;
    ///
    /// let x = Cuid2::from_parts(1, b"host", 'k', &[9; 10], 1_700_000_000_000, 10)?;
    /// let y = x.encode();
    /// assert!(y.starts_with('k'));
    /// assert_eq!(y.len(), 10);
    /// # Ok::<(), cuid2::Error>(())
    /// ```
    pub fn encode(&self) -> impl ops::Deref<Target = str> + fmt::Display {
        let mut buffer = [b'0'; MAX_LENGTH];
        if let Self::Constructed(p) = self {
            buffer[0] = p.prefix;
            buffer[1..p.max_length].copy_from_slice(&p.digest_digits()[..p.max_length - 1]);
        }
        Cuid2Str {
            buffer,
            len: self.max_length(),
        }
    }
}

impl Parts<'_> {
    /// Hashes the captured fields and returns the base-36 digits of the digest.
    fn digest_digits(&self) -> [u8; ENCODED_DIGEST_LEN] {
        let mut head = [0u8; 16];
        head[..8].copy_from_slice(&self.timestamp.to_le_bytes());
        head[8..].copy_from_slice(&self.counter.to_le_bytes());

        let mut hasher = Sha512::new();
        hasher.update(head);
        hasher.update(self.fingerprint);
        hasher.update(&self.random[..self.random_len]);

        let mut value = [0u8; DIGEST_LEN];
        value.copy_from_slice(&hasher.finalize());
        let mut digits = [0u8; ENCODED_DIGEST_LEN];
        base36::write_digits(&mut value, &mut digits);
        digits
    }
}

impl fmt::Display for Cuid2<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encode())
    }
}

impl From<Cuid2<'_>> for String {
    fn from(src: Cuid2<'_>) -> Self {
        src.to_string()
    }
}

/// Concrete return type of [`Cuid2::encode()`] containing the stack-allocated string.
struct Cuid2Str {
    buffer: [u8; MAX_LENGTH],
    len: usize,
}

impl ops::Deref for Cuid2Str {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        debug_assert!(self.buffer.is_ascii());
        unsafe { str::from_utf8_unchecked(&self.buffer[..self.len]) }
    }
}

impl fmt::Display for Cuid2Str {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self)
    }
}

/// Returns `true` if `src` has the shape of a generated identifier: `MIN_LENGTH..=MAX_LENGTH`
/// characters, a lowercase ASCII letter first, and lowercase ASCII alphanumerics after it.
///
/// The sentinel string is not accepted because it starts with a digit.
///
/// # Examples
///
/// ```rust
/// assert!(cuid2::is_cuid("q0dagjosmuu4q0cmltt8lade"));
/// assert!(!cuid2::is_cuid("0dagjosmuu4q0cmltt8lade"));
/// assert!(!cuid2::is_cuid("Q0dagjosmuu4q0cmltt8lade"));
/// ```
pub fn is_cuid(src: &str) -> bool {
    let bytes = src.as_bytes();
    (MIN_LENGTH..=MAX_LENGTH).contains(&bytes.len())
        && bytes[0].is_ascii_lowercase()
        && bytes[1..]
            .iter()
            .all(|e| e.is_ascii_digit() || e.is_ascii_lowercase())
}

#[cfg(feature = "serde")]
#[cfg_attr(docsrs, doc(cfg(feature = "serde")))]
mod serde_support {
    use super::Cuid2;
    use serde::Serializer;

    impl serde::Serialize for Cuid2<'_> {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            serializer.serialize_str(&self.encode())
        }
    }

}
