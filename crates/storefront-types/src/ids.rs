//! Typed identifiers for analytics sessions and products.
//!
//! Both are opaque strings on the wire. `SessionId` is minted client-side
//! from random base-36 characters; `ProductId` comes from the catalogue
//! backend and is never generated here.

use std::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};

/// Alphabet used for session ids (lowercase base-36).
const BASE36: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Length of each of the two random segments in a [`SessionId`].
pub const SESSION_SEGMENT_LEN: usize = 13;

/// An analytics session identifier.
///
/// Two concatenated random base-36 segments. Good enough to correlate the
/// events of one browsing session; not a credential.
#[derive(Clone, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(String);

/// A catalogue product identifier.
#[derive(Clone, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(String);

// ── Shared behavior ─────────────────────────────────────────────────────────

macro_rules! impl_string_id {
    ($T:ident, $name:literal) => {
        impl $T {
            /// Borrow the raw string.
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// First 8 characters, for log lines only.
            pub fn short(&self) -> &str {
                let end = self.0.char_indices().nth(8).map(|(i, _)| i).unwrap_or(self.0.len());
                &self.0[..end]
            }

            /// Whether the id is the empty string.
            pub fn is_empty(&self) -> bool {
                self.0.is_empty()
            }
        }

        impl AsRef<str> for $T {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl From<$T> for String {
            fn from(id: $T) -> String {
                id.0
            }
        }

        impl fmt::Display for $T {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl fmt::Debug for $T {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", $name, self.short())
            }
        }
    };
}

impl_string_id!(SessionId, "SessionId");
impl_string_id!(ProductId, "ProductId");

impl SessionId {
    /// Mint a fresh id from the thread-local RNG.
    pub fn generate() -> Self {
        Self::generate_with(&mut rand::thread_rng())
    }

    /// Mint a fresh id from the given RNG.
    pub fn generate_with<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let mut id = String::with_capacity(SESSION_SEGMENT_LEN * 2);
        for _ in 0..2 {
            push_base36_segment(rng, &mut id, SESSION_SEGMENT_LEN);
        }
        Self(id)
    }

    /// Rehydrate an id read back from session storage.
    ///
    /// Returns `None` for an empty slot so callers mint a new one.
    pub fn from_stored(raw: impl Into<String>) -> Option<Self> {
        let raw = raw.into();
        if raw.trim().is_empty() { None } else { Some(Self(raw)) }
    }
}

fn push_base36_segment<R: Rng + ?Sized>(rng: &mut R, out: &mut String, len: usize) {
    for _ in 0..len {
        out.push(BASE36[rng.gen_range(0..BASE36.len())] as char);
    }
}

impl ProductId {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }
}

impl From<&str> for ProductId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for ProductId {
    fn from(s: String) -> Self {
        Self(s)
    }
}
