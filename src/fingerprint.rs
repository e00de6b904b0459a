//! Process fingerprint and the host identity it is derived from.

use std::{
    process,
    sync::atomic::{AtomicU32, Ordering},
};

use tracing::{debug, warn};

use crate::generator::RandSource;

/// Bytes appended after the host name: pid and thread id fields plus random padding.
const TRAILER_LEN: usize = 40;

/// Length of the random padding at the end of a fingerprint.
const PADDING_LEN: usize = 32;

/// A trait that defines the host identity queried once to build a [`Fingerprint`].
pub trait HostIdentity {
    /// Returns the host name, or `None` if it cannot be determined.
    fn machine_name(&self) -> Option<String>;

    /// Returns the current process ID.
    fn process_id(&self) -> u32;

    /// Returns a logical ID of the calling thread, unique within the process.
    fn thread_id(&self) -> u32;
}

/// The default [`HostIdentity`] that queries the operating system.
#[derive(Clone, Copy, Eq, PartialEq, Hash, Debug, Default)]
pub struct SystemHost;

impl HostIdentity for SystemHost {
    fn machine_name(&self) -> Option<String> {
        // `gethostname` panics if the underlying system call fails
        std::panic::catch_unwind(gethostname::gethostname)
            .ok()?
            .into_string()
            .ok()
    }

    fn process_id(&self) -> u32 {
        process::id()
    }

    fn thread_id(&self) -> u32 {
        static NEXT_ID: AtomicU32 = AtomicU32::new(1);
        thread_local!(static ID: u32 = NEXT_ID.fetch_add(1, Ordering::Relaxed));
        ID.with(|id| *id)
    }
}

/// Represents the byte string that identifies the generating process.
///
/// The layout is the UTF-8 host name (`len` bytes) followed by a 40-byte trailer:
///
/// ```text
/// offset   len   len+1   len+5   len+6       len+10   len+40
///          | 0 | pid   | 0     | thread id | random |
/// ```
///
/// Both IDs are little-endian `u32`s. The random padding covers the last 32 bytes; the thread ID
/// field is written over its first two.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct Fingerprint(Box<[u8]>);

impl Fingerprint {
    /// Builds a fingerprint for the calling thread of the current process.
    ///
    /// Falls back to a random pseudo host name if `host` cannot report one.
    pub fn build<H: HostIdentity, R: RandSource>(host: &H, rand_source: &mut R) -> Self {
        let name = match host.machine_name().filter(|e| !e.is_empty()) {
            Some(name) => name,
            None => {
                warn!("could not determine host name; using a random pseudo host name");
                pseudo_host_name(rand_source)
            }
        };

        let len = name.len();
        let pid = host.process_id();
        let thread_id = host.thread_id();

        let mut buffer = vec![0u8; len + TRAILER_LEN];
        buffer[..len].copy_from_slice(name.as_bytes());
        rand_source.fill_bytes(&mut buffer[len + TRAILER_LEN - PADDING_LEN..]);
        buffer[len + 1..len + 5].copy_from_slice(&pid.to_le_bytes());
        buffer[len + 6..len + 10].copy_from_slice(&thread_id.to_le_bytes());

        debug!(host_name_len = len, pid, thread_id, "built process fingerprint");
        Self(buffer.into_boxed_slice())
    }

    /// Returns a reference to the underlying bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl AsRef<[u8]> for Fingerprint {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

impl From<Vec<u8>> for Fingerprint {
    fn from(src: Vec<u8>) -> Self {
        Self(src.into_boxed_slice())
    }
}

/// Renders 32 random bytes as hex, cut to NetBIOS length on Windows.
fn pseudo_host_name<R: RandSource>(rand_source: &mut R) -> String {
    let mut bytes = [0u8; 32];
    rand_source.fill_bytes(&mut bytes);
    let mut name = hex::encode(bytes);
    if cfg!(windows) {
        name.truncate(15);
    }
    name
}
