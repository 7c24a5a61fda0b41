//! Schema versions and inclusive version ranges.
//!
//! The schema versions form a small totally ordered set; version inference
//! folds per-construct constraints into a [`VersionRange`] that only ever
//! narrows.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A schema version, ordered from earliest to latest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Version {
    #[serde(rename = "3.0")]
    V3_0,
    #[serde(rename = "3.1")]
    V3_1,
    #[serde(rename = "3.2")]
    V3_2,
    #[serde(rename = "4.0")]
    V4_0,
    #[serde(rename = "4.1")]
    V4_1,
    #[serde(rename = "4.2")]
    V4_2,
    #[serde(rename = "4.3")]
    V4_3,
    #[serde(rename = "4.4")]
    V4_4,
}

impl Version {
    /// The earliest supported schema version.
    pub const EARLIEST: Version = Version::V3_0;

    /// The latest supported schema version.
    pub const LATEST: Version = Version::V4_4;

    /// Returns the version string as it appears in documents.
    pub const fn as_str(self) -> &'static str {
        match self {
            Version::V3_0 => "3.0",
            Version::V3_1 => "3.1",
            Version::V3_2 => "3.2",
            Version::V4_0 => "4.0",
            Version::V4_1 => "4.1",
            Version::V4_2 => "4.2",
            Version::V4_3 => "4.3",
            Version::V4_4 => "4.4",
        }
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown version string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownVersion(pub String);

impl fmt::Display for UnknownVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown schema version {:?}", self.0)
    }
}

impl std::error::Error for UnknownVersion {}

impl FromStr for Version {
    type Err = UnknownVersion;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "3.0" => Ok(Version::V3_0),
            "3.1" => Ok(Version::V3_1),
            "3.2" => Ok(Version::V3_2),
            "4.0" => Ok(Version::V4_0),
            "4.1" => Ok(Version::V4_1),
            "4.2" => Ok(Version::V4_2),
            "4.3" => Ok(Version::V4_3),
            "4.4" => Ok(Version::V4_4),
            other => Err(UnknownVersion(other.to_string())),
        }
    }
}

/// An inclusive range of schema versions.
///
/// A range with `minimum > maximum` is contradictory: no single version
/// satisfies every constraint that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VersionRange {
    /// Earliest version the constrained construct is legal in.
    pub minimum: Version,
    /// Latest version the constrained construct is legal in.
    pub maximum: Version,
}

impl VersionRange {
    /// Creates a range with the given inclusive bounds.
    pub const fn new(minimum: Version, maximum: Version) -> Self {
        Self { minimum, maximum }
    }

    /// The widest possible range: every supported version.
    pub const fn full() -> Self {
        Self::new(Version::EARLIEST, Version::LATEST)
    }

    /// A range requiring at least `minimum`, with no upper constraint.
    pub const fn since(minimum: Version) -> Self {
        Self::new(minimum, Version::LATEST)
    }

    /// A range allowing at most `maximum`, with no lower constraint.
    pub const fn until(maximum: Version) -> Self {
        Self::new(Version::EARLIEST, maximum)
    }

    /// Narrows this range by another: the minimum can only rise, the
    /// maximum can only fall.
    #[must_use]
    pub fn narrow(self, other: VersionRange) -> Self {
        Self {
            minimum: self.minimum.max(other.minimum),
            maximum: self.maximum.min(other.maximum),
        }
    }

    /// Returns true if no version satisfies this range.
    pub fn is_contradictory(self) -> bool {
        self.minimum > self.maximum
    }

    /// Returns true if `version` lies within this range.
    pub fn contains(self, version: Version) -> bool {
        self.minimum <= version && version <= self.maximum
    }
}

impl Default for VersionRange {
    fn default() -> Self {
        Self::full()
    }
}

impl fmt::Display for VersionRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.minimum, self.maximum)
    }
}
