// ── Core identity and state types ──
//
// PoolName and PoolState are the foundation of every other type in the
// workspace. The kernel reports pool state as free text; we keep it
// verbatim and only classify it (PoolHealth) when something needs to
// pick a display style.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use strum::{Display as StrumDisplay, EnumString};

// ── PoolName ────────────────────────────────────────────────────────

/// Name of a ZFS pool, as it appears under the kstat base directory.
///
/// Opaque: uniqueness and equality are exact string match. Ordered so
/// that discovery snapshots iterate deterministically by name.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PoolName(String);

impl PoolName {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PoolName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PoolName {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

impl From<String> for PoolName {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl AsRef<str> for PoolName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

// ── PoolState ───────────────────────────────────────────────────────

/// A pool's state exactly as the kernel reported it (e.g. `ONLINE`,
/// `DEGRADED`, `FAULTED`), already trimmed of surrounding whitespace.
///
/// `UNAVAIL` doubles as the sentinel for "could not be determined":
/// every read failure collapses into it, so consumers never see an
/// error, only an unavailable pool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PoolState(String);

/// The sentinel state value.
const UNAVAIL: &str = "UNAVAIL";

impl PoolState {
    /// The "could not be determined" sentinel.
    pub fn unavail() -> Self {
        Self(UNAVAIL.to_owned())
    }

    pub fn is_unavail(&self) -> bool {
        self.0 == UNAVAIL
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Lower-cased form of the state, used to select a display style.
    ///
    /// The input is trimmed at read time, so the tag can never carry a
    /// stray newline into a style name.
    pub fn style_tag(&self) -> String {
        self.0.to_ascii_lowercase()
    }

    /// Classify the verbatim state for display purposes.
    pub fn health(&self) -> PoolHealth {
        self.0.parse().unwrap_or(PoolHealth::Unknown)
    }
}

impl fmt::Display for PoolState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PoolState {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

impl From<String> for PoolState {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl FromStr for PoolState {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from(s))
    }
}

// ── PoolHealth ──────────────────────────────────────────────────────

/// By-convention classification of a pool state string.
///
/// ZFS reports a small set of well-known states; anything else parses
/// as [`Unknown`](Self::Unknown) and renders dimmed rather than failing.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, EnumString, StrumDisplay, Serialize, Deserialize,
)]
#[strum(ascii_case_insensitive, serialize_all = "UPPERCASE")]
#[non_exhaustive]
pub enum PoolHealth {
    Online,
    Degraded,
    Faulted,
    Offline,
    Removed,
    Unavail,
    Suspended,
    Unknown,
}

impl PoolHealth {
    pub fn is_healthy(&self) -> bool {
        matches!(self, Self::Online)
    }

    /// States that indicate the pool exists but cannot serve I/O.
    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Faulted | Self::Unavail | Self::Suspended)
    }
}
