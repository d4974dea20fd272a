//! The public workspace number used as the broadcast channel key.

use std::fmt;
use std::str::FromStr;

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize};

/// The public, human-readable workspace number (e.g. `1001`).
///
/// Workspace numbers identify broadcast channels: every connection that
/// has joined workspace `1001` receives the events published for it.
/// Clients send the number either as a JSON number or as its string form
/// (`"1001"`), so deserialization accepts both. Serialization always
/// emits the number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct WorkspaceKey(pub i64);

impl WorkspaceKey {
    /// Return the inner workspace number.
    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for WorkspaceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for WorkspaceKey {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse::<i64>().map(Self)
    }
}

impl From<i64> for WorkspaceKey {
    fn from(n: i64) -> Self {
        Self(n)
    }
}

impl<'de> Deserialize<'de> for WorkspaceKey {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct KeyVisitor;

        impl Visitor<'_> for KeyVisitor {
            type Value = WorkspaceKey;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a workspace number or its string form")
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
                Ok(WorkspaceKey(v))
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
                i64::try_from(v)
                    .map(WorkspaceKey)
                    .map_err(|_| E::custom("workspace number out of range"))
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
                v.parse()
                    .map_err(|_| E::custom(format!("invalid workspace number: {v:?}")))
            }
        }

        deserializer.deserialize_any(KeyVisitor)
    }
}
