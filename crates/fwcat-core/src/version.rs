//! Ordering keys for release version strings.
//!
//! Release tags are only loosely semantic (`v1.15.0`, `v1.15.0-rc1`,
//! `v1.16.0-alpha`), so instead of a strict semver parse each string is
//! mapped to a [`VersionKey`] that is only ever used for sorting. Strings that
//! do not look like a version map to [`VersionKey::sentinel`], which ranks
//! alongside a bare `0.0.0`.

use std::cmp::Ordering;
use std::sync::LazyLock;

use regex::Regex;

#[allow(clippy::expect_used)]
static VERSION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d+)\.(\d+)\.(\d+)(?:-([a-zA-Z]+)(\d+)?)?").expect("version regex is valid")
});

/// Sortable key derived from a version string.
///
/// Fields compare in declaration order, so the derived `Ord` is the
/// lexicographic order over `(major, minor, patch, tag, number)`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VersionKey {
    /// Major component.
    pub major: u64,
    /// Minor component.
    pub minor: u64,
    /// Patch component.
    pub patch: u64,
    /// Lowercased prerelease tag, or [`VersionKey::SENTINEL_TAG`] for releases
    /// without one.
    pub prerelease_tag: String,
    /// Number following the prerelease tag, 0 when absent.
    pub prerelease_num: u64,
}

impl VersionKey {
    /// Tag substituted for missing prereleases.
    ///
    /// Sorts after every lowercase letter tag, which puts `v1.0.0` above
    /// `v1.0.0-rc1`.
    pub const SENTINEL_TAG: &'static str = "zzz";

    /// Key used for strings that do not parse: `(0, 0, 0, "zzz", 0)`.
    pub fn sentinel() -> Self {
        Self {
            major: 0,
            minor: 0,
            patch: 0,
            prerelease_tag: Self::SENTINEL_TAG.to_string(),
            prerelease_num: 0,
        }
    }

    /// Parse a version string into its ordering key.
    ///
    /// Leading `v` characters are stripped, then `MAJOR.MINOR.PATCH` with an
    /// optional `-TAG[NUM]` suffix is matched at the start of the string.
    /// Anything after the matched prefix is ignored. This never fails.
    ///
    /// ```rust
    /// use fwcat_core::VersionKey;
    ///
    /// let rc = VersionKey::parse("v1.15.0-rc1");
    /// assert_eq!((rc.major, rc.minor, rc.patch), (1, 15, 0));
    /// assert_eq!(rc.prerelease_tag, "rc");
    /// assert_eq!(rc.prerelease_num, 1);
    ///
    /// assert!(VersionKey::parse("v1.15.0") > rc);
    /// assert_eq!(VersionKey::parse("nightly"), VersionKey::sentinel());
    /// ```
    pub fn parse(version: &str) -> Self {
        Self::try_parse(version).unwrap_or_else(Self::sentinel)
    }

    fn try_parse(version: &str) -> Option<Self> {
        let caps = VERSION_RE.captures(version.trim_start_matches('v'))?;

        // Components too large for u64 are treated as unparseable.
        let number = |idx: usize| caps.get(idx).map(|m| m.as_str().parse::<u64>());
        let major = number(1)?.ok()?;
        let minor = number(2)?.ok()?;
        let patch = number(3)?.ok()?;
        let prerelease_num = match number(5) {
            Some(parsed) => parsed.ok()?,
            None => 0,
        };

        let prerelease_tag = caps.get(4).map_or_else(
            || Self::SENTINEL_TAG.to_string(),
            |m| m.as_str().to_ascii_lowercase(),
        );

        Some(Self {
            major,
            minor,
            patch,
            prerelease_tag,
            prerelease_num,
        })
    }
}

/// Compare two version strings newest-first.
///
/// Suitable for `sort_by`; with a stable sort, strings that map to the same
/// key keep their relative order.
pub fn newest_first(a: &str, b: &str) -> Ordering {
    VersionKey::parse(b).cmp(&VersionKey::parse(a))
}
