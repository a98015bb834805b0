//! Identifiers used across frameworks, mappings and entries
//!
//! Server-side identifiers ([`WidgetId`], [`TagId`]) are opaque strings.
//! [`ClientId`] values are generated locally through a [`ClientIdGenerator`]
//! so the recommendation pipeline stays deterministic under test.

use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};
use std::sync::atomic::{AtomicU64, Ordering};
use ulid::Ulid;

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Wrap a raw identifier
            #[inline]
            #[must_use]
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            /// Borrow the raw identifier
            #[inline]
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self(value)
            }
        }
    };
}

string_id!(
    /// Server identifier of a widget (the `pk` of the widget row)
    WidgetId
);

string_id!(
    /// Identifier of a prediction tag emitted by the NLP service
    TagId
);

string_id!(
    /// Locally unique identifier of an attribute, entry or mapping
    ///
    /// Client ids carry no meaning: two recommendation passes over the same
    /// input produce different ids and must still be considered equal.
    ClientId
);

/// Source of fresh [`ClientId`] values
///
/// Injected into every builder that creates attributes so tests can swap the
/// random generator for a predictable one.
pub trait ClientIdGenerator: Send + Sync + fmt::Debug {
    /// Produce the next identifier
    fn next_id(&self) -> ClientId;
}

/// Production generator backed by ULIDs
#[derive(Debug, Clone, Copy, Default)]
pub struct UlidGenerator;

impl UlidGenerator {
    /// Create new generator
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl ClientIdGenerator for UlidGenerator {
    fn next_id(&self) -> ClientId {
        ClientId(Ulid::new().to_string().to_lowercase())
    }
}

/// Deterministic generator yielding `prefix-1`, `prefix-2`, ...
#[derive(Debug)]
pub struct SequentialIds {
    prefix: String,
    next: AtomicU64,
}

impl SequentialIds {
    /// Create a generator with the given prefix
    #[must_use]
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            next: AtomicU64::new(1),
        }
    }

    /// Number of ids handed out so far
    #[must_use]
    pub fn issued(&self) -> u64 {
        self.next.load(Ordering::Relaxed) - 1
    }
}

impl Default for SequentialIds {
    fn default() -> Self {
        Self::new("client")
    }
}

impl ClientIdGenerator for SequentialIds {
    fn next_id(&self) -> ClientId {
        let n = self.next.fetch_add(1, Ordering::Relaxed);
        ClientId(format!("{}-{}", self.prefix, n))
    }
}
