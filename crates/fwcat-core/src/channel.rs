//! Release channels and version classification.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

#[allow(clippy::expect_used)]
static STABLE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^v?\d+\.\d+\.\d+$").expect("stable regex is valid"));

/// Release maturity of an index entry.
///
/// Only `Stable`, `Beta` and `Dev` are ever produced by [`Channel::classify`].
/// `Unknown` keeps whatever a hand-edited index contained so it round-trips,
/// but it never feeds a `latest_*` pointer.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Channel {
    /// `vX.Y.Z` with no suffix.
    Stable,
    /// Beta and release-candidate builds.
    Beta,
    /// Alpha, dev and anything else.
    Dev,
    /// A channel name read from an existing index that fwcat does not know.
    Unknown(String),
}

impl Channel {
    /// The channels that carry a `latest_*` pointer, in index field order.
    pub const TRACKED: [Self; 3] = [Self::Stable, Self::Beta, Self::Dev];

    /// Classify a version string.
    ///
    /// Works on the raw string rather than on [`crate::VersionKey`], so
    /// `v1.2.3-betaextra` is still beta.
    ///
    /// ```rust
    /// use fwcat_core::Channel;
    ///
    /// assert_eq!(Channel::classify("v1.15.0"), Channel::Stable);
    /// assert_eq!(Channel::classify("v1.15.0-rc1"), Channel::Beta);
    /// assert_eq!(Channel::classify("v1.15.0-alpha1"), Channel::Dev);
    /// ```
    pub fn classify(version: &str) -> Self {
        if STABLE_RE.is_match(version) {
            return Self::Stable;
        }
        let lower = version.to_lowercase();
        if lower.contains("-beta") || lower.contains("-rc") {
            Self::Beta
        } else {
            Self::Dev
        }
    }

    /// The name used in index documents.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Stable => "stable",
            Self::Beta => "beta",
            Self::Dev => "dev",
            Self::Unknown(name) => name,
        }
    }

    pub(crate) fn from_name(name: String) -> Self {
        match name.as_str() {
            "stable" => Self::Stable,
            "beta" => Self::Beta,
            "dev" => Self::Dev,
            _ => Self::Unknown(name),
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Channel {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Channel {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        String::deserialize(deserializer).map(Self::from_name)
    }
}
