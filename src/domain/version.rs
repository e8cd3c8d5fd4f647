use crate::error::{Result, SemvertagError};
use regex::Regex;
use semver::{BuildMetadata, Prerelease, Version};
use std::sync::OnceLock;

fn tolerant_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(
            r"^v?(\d+)(?:\.(\d+))?(?:\.(\d+))?(?:-([0-9A-Za-z.-]+))?(?:\+([0-9A-Za-z.-]+))?$",
        )
        .expect("tolerant version pattern is valid")
    })
}

/// Parse a version leniently (e.g. "v1.2" -> 1.2.0, "01.2.3" -> 1.2.3)
///
/// Accepts an optional leading `v` and missing minor/patch components, which
/// default to zero. Short versions cannot carry pre-release or build metadata.
/// Returns `None` for anything that is not a version.
pub fn parse_tolerant(input: &str) -> Option<Version> {
    let caps = tolerant_pattern().captures(input.trim())?;

    let number = |idx: usize| -> Option<Option<u64>> {
        match caps.get(idx) {
            Some(m) => m.as_str().parse::<u64>().ok().map(Some),
            None => Some(None),
        }
    };

    let major = number(1)??;
    let minor = number(2)?;
    let patch = number(3)?;
    let pre = caps.get(4).map(|m| m.as_str());
    let build = caps.get(5).map(|m| m.as_str());

    let is_short = minor.is_none() || patch.is_none();
    if is_short && (pre.is_some() || build.is_some()) {
        return None;
    }

    let mut version = Version::new(major, minor.unwrap_or(0), patch.unwrap_or(0));
    if let Some(pre) = pre {
        version.pre = Prerelease::new(pre).ok()?;
    }
    if let Some(build) = build {
        version.build = BuildMetadata::new(build).ok()?;
    }
    Some(version)
}

/// Version bump type decision
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VersionBump {
    Major,
    Minor,
    Patch,
}

impl VersionBump {
    /// Pick the bump from the three command-line switches.
    ///
    /// Exactly one switch must be set.
    pub fn from_flags(major: bool, minor: bool, patch: bool) -> Result<Self> {
        match (major, minor, patch) {
            (true, false, false) => Ok(VersionBump::Major),
            (false, true, false) => Ok(VersionBump::Minor),
            (false, false, true) => Ok(VersionBump::Patch),
            _ => Err(SemvertagError::usage(
                "Set exactly one of --major, --minor or --patch to increment",
            )),
        }
    }
}

/// Compute the version that follows `current`.
///
/// With `reset_lower` unset only the selected component is incremented and
/// pre-release and build metadata are carried over, so 1.2.3-rc.1 bumped by
/// minor gives 1.3.3-rc.1. With it set, lower components are reset to zero as
/// semantic versioning prescribes and the metadata is dropped (1.2.3-rc.1 ->
/// 1.3.0).
///
/// Fails when the selected component is already `u64::MAX`.
pub fn bump(current: &Version, bump_type: VersionBump, reset_lower: bool) -> Result<Version> {
    let increment = |n: u64| {
        n.checked_add(1).ok_or_else(|| {
            SemvertagError::version(format!("Cannot bump {}: component would overflow", current))
        })
    };

    let mut next = current.clone();
    if reset_lower {
        next.pre = Prerelease::EMPTY;
        next.build = BuildMetadata::EMPTY;
    }

    match bump_type {
        VersionBump::Major => {
            next.major = increment(next.major)?;
            if reset_lower {
                next.minor = 0;
                next.patch = 0;
            }
        }
        VersionBump::Minor => {
            next.minor = increment(next.minor)?;
            if reset_lower {
                next.patch = 0;
            }
        }
        VersionBump::Patch => {
            next.patch = increment(next.patch)?;
        }
    }
    Ok(next)
}
