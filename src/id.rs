//! user IDs and the hasher the bucket index uses for them

use std::fmt;
use std::hash::{BuildHasherDefault, Hasher};

/// A caller-supplied user identifier.
///
/// IDs are never allocated by this crate. Whoever creates a [`User`](crate::User) picks the ID,
/// and the registry rejects a second user with the same one.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct UserId(pub u64);

impl UserId {
    pub fn get(self) -> u64 {
        self.0
    }
}

impl From<u64> for UserId {
    fn from(raw: u64) -> Self {
        Self(raw)
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A hasher that passes integer keys through unchanged.
///
/// With this hasher `UserId(n)` always lands in bucket `n % bucket_count`, which keeps bucket
/// placement stable across runs. Non-integer input is folded in byte by byte.
#[derive(Copy, Clone, Debug, Default)]
pub struct IdHasher(u64);

impl Hasher for IdHasher {
    fn finish(&self) -> u64 {
        self.0
    }

    fn write(&mut self, bytes: &[u8]) {
        for &byte in bytes {
            self.0 = self.0.rotate_left(8) ^ u64::from(byte);
        }
    }

    fn write_u64(&mut self, n: u64) {
        self.0 = n;
    }

    fn write_usize(&mut self, n: usize) {
        self.0 = n as u64;
    }
}

pub type BuildIdHasher = BuildHasherDefault<IdHasher>;
