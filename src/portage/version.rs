use std::fmt;
use std::path::Path;

use regex::Regex;

/// A dotted numeric package version, e.g. `2.5`, parsed into integer
/// components so comparisons are exact rather than lexicographic.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PackageVersion {
    components: Vec<u32>,
}

impl PackageVersion {
    /// Parse a dotted numeric version. Returns `None` for anything with a
    /// non-numeric component (suffix letters, `9999_rc1`, empty).
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        if value.is_empty() {
            return None;
        }
        let components = value
            .split('.')
            .map(str::parse)
            .collect::<Result<Vec<u32>, _>>()
            .ok()?;
        Some(Self { components })
    }
}

impl fmt::Display for PackageVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for component in &self.components {
            if !first {
                f.write_str(".")?;
            }
            write!(f, "{component}")?;
            first = false;
        }
        Ok(())
    }
}

/// The version portion of an ebuild file name for a known package:
/// `<package>-<version>[-r<revision>].ebuild`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EbuildName {
    pub package: String,
    /// Raw version string between the package name and any revision suffix.
    pub version: String,
    pub revision: Option<u32>,
}

impl EbuildName {
    /// Split an ebuild file name whose package name is already known (from
    /// the directory it lives in). Returns `None` when the file name does not
    /// follow the `<package>-...` convention.
    #[must_use]
    pub fn parse_for_package(file_name: &str, package: &str) -> Option<Self> {
        let stem = file_name.strip_suffix(".ebuild")?;
        let rest = stem.strip_prefix(package)?.strip_prefix('-')?;
        let (version, revision) = match rest.split_once('-') {
            Some((version, suffix)) => {
                let revision = suffix.strip_prefix('r')?.parse().ok()?;
                (version, Some(revision))
            }
            None => (rest, None),
        };
        if version.is_empty() {
            return None;
        }
        Some(Self {
            package: package.to_string(),
            version: version.to_string(),
            revision,
        })
    }

    /// Parsed numeric form of the version, when it is purely dotted-numeric.
    #[must_use]
    pub fn package_version(&self) -> Option<PackageVersion> {
        PackageVersion::parse(&self.version)
    }
}

/// Whether the path names an ebuild carrying an explicit revision, e.g.
/// `pkg-0.1-r2.ebuild`. Touching one of these is what an uprev looks like.
#[must_use]
pub fn has_revision_suffix(path: &Path) -> bool {
    let pattern = Regex::new(r"-r\d+\.ebuild$").expect("Invalid regex");
    path.file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|name| pattern.is_match(name))
}

#[cfg(test)]
#[path = "version_tests.rs"]
mod tests;
