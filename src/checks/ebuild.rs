use std::path::{Path, PathBuf};

use indexmap::IndexSet;

use crate::Result;
use crate::git::{AffectedFilter, DiffEntry, DiffStatus};
use crate::portage::{self, EbuildName, OverlayTier, PackageVersion, metadata, overlay, version};

use super::{CheckContext, CheckFailure, CheckOutcome};

/// Non-symlink ebuild records touched by the commit, with relative paths.
/// Symlinked ebuilds only alias a sibling revision, so their content is not
/// worth scanning.
fn touched_ebuilds(ctx: &CheckContext<'_>) -> Result<Vec<DiffEntry>> {
    let filter = AffectedFilter::default().relative(true);
    Ok(ctx
        .affected_entries(filter)?
        .into_iter()
        .filter(|entry| {
            entry.current_file().is_some_and(portage::is_ebuild) && !entry.is_symlink()
        })
        .collect())
}

fn is_upstream_overlay(ctx: &CheckContext<'_>) -> bool {
    ctx.policy
        .ebuild
        .upstream_overlays
        .iter()
        .any(|overlay| overlay == ctx.project)
}

/// Reject ebuilds declaring an EAPI below the supported minimum. No `EAPI=`
/// assignment means EAPI 0. Upstream-mirror overlays are skipped since their
/// ebuilds should be imported as-is.
///
/// # Errors
/// Propagates diff or content read failures.
pub fn check_eapi(ctx: &CheckContext<'_>) -> Result<CheckOutcome> {
    let policy = &ctx.policy.ebuild;
    if is_upstream_overlay(ctx) {
        return Ok(None);
    }

    let mut bad = Vec::new();
    for entry in touched_ebuilds(ctx)? {
        let Some(path) = entry.current_file() else {
            continue;
        };
        let content = ctx.file_content(path)?;
        let eapi = metadata::declared_eapi(&content).unwrap_or_else(|| "0".to_string());
        if !metadata::eapi_at_least(&eapi, policy.min_eapi) {
            bad.push(format!("{}: EAPI={eapi}", path.display()));
        }
    }

    if bad.is_empty() {
        Ok(None)
    } else {
        Ok(Some(CheckFailure::with_items(
            format!(
                "These ebuilds are using EAPIs older than {}; please update them:",
                policy.min_eapi
            ),
            bad,
        )))
    }
}

/// Require `KEYWORDS` values to carry an all-architecture glob (`*`, `~*` or
/// `-*`). Empty values mean not-yet-keyworded and are fine; ebuilds without
/// a `KEYWORDS=` assignment are not scanned.
///
/// # Errors
/// Propagates diff or content read failures.
pub fn check_keywords(ctx: &CheckContext<'_>) -> Result<CheckOutcome> {
    let mut bad = Vec::new();
    for entry in touched_ebuilds(ctx)? {
        let Some(path) = entry.current_file() else {
            continue;
        };
        let content = ctx.file_content(path)?;
        let incomplete = metadata::keywords_assignments(&content).iter().any(|value| {
            value.split_whitespace().next().is_some() && !metadata::has_keyword_glob(value)
        });
        if incomplete {
            bad.push(path.display().to_string());
        }
    }

    if bad.is_empty() {
        Ok(None)
    } else {
        Ok(Some(CheckFailure::with_items(
            r#"KEYWORDS must use an all-architecture glob: "*" (stable), "~*" (unstable), or "-* arch ..." (specific arches only):"#,
            bad,
        )))
    }
}

/// Package metadata parsed from a `virtual/<pkg>/<pkg>-<ver>.ebuild` path.
/// Paths that do not follow the virtual layout carry no version policy.
fn virtual_ebuild_name(path: &Path) -> Option<EbuildName> {
    let components: Vec<&str> = path.iter().filter_map(|c| c.to_str()).collect();
    let pos = components.iter().position(|c| *c == "virtual")?;
    let rest = components.get(pos + 1..)?;
    if let [package, file_name] = rest {
        EbuildName::parse_for_package(file_name, package)
    } else {
        None
    }
}

/// Enforce the virtual package version convention: each overlay tier pins
/// its virtuals to one version so higher tiers reliably shadow lower ones.
///
/// # Errors
/// Propagates diff read failures.
pub fn check_virtual_pv(ctx: &CheckContext<'_>) -> Result<CheckOutcome> {
    let policy = &ctx.policy.ebuild;
    if is_upstream_overlay(ctx) {
        return Ok(None);
    }

    let mut bad = Vec::new();
    for entry in touched_ebuilds(ctx)? {
        let Some(path) = entry.current_file() else {
            continue;
        };
        let Some(name) = virtual_ebuild_name(path) else {
            continue;
        };
        let owner = overlay::owning_overlay(ctx.project, path);
        let tier = OverlayTier::classify(owner);
        let want = policy.virtual_pv.expected(tier);
        let matches = name
            .package_version()
            .zip(PackageVersion::parse(want))
            .is_some_and(|(have, want)| have == want);
        if !matches {
            bad.push(format!(
                "{}: PV is {} but {tier} overlays use {want}",
                path.display(),
                name.version
            ));
        }
    }

    if bad.is_empty() {
        Ok(None)
    } else {
        Ok(Some(CheckFailure::with_items(
            "These virtual packages have incorrect package versions:",
            bad,
        )))
    }
}

/// The package directory a change belongs to: the parent of a touched ebuild
/// or the directory owning a `files/` subtree. Other paths carry no package
/// evidence.
fn package_dir(path: &Path) -> Option<PathBuf> {
    if portage::is_ebuild(path) {
        return path
            .parent()
            .filter(|parent| !parent.as_os_str().is_empty())
            .map(Path::to_path_buf);
    }
    let components: Vec<&std::ffi::OsStr> = path.iter().collect();
    let pos = components.iter().position(|c| *c == "files")?;
    if pos == 0 {
        return None;
    }
    Some(components[..pos].iter().copied().collect())
}

/// Detect packages changed without a revision bump. A package satisfies the
/// requirement with a brand-new (Added) ebuild or any touched `-rN` ebuild;
/// metadata files (ChangeLog, Manifest, metadata.xml) never require one.
///
/// # Errors
/// Propagates diff read failures.
pub fn check_uprev(ctx: &CheckContext<'_>) -> Result<CheckOutcome> {
    let policy = &ctx.policy.uprev;
    if policy.exempt_overlays.iter().any(|o| o == ctx.project) {
        return Ok(None);
    }

    let filter = AffectedFilter::default().include_deletes(true).relative(true);
    let entries = ctx.affected_entries(filter)?;

    let relevant: Vec<(&DiffEntry, &Path)> = entries
        .iter()
        .filter_map(|entry| entry.current_file().map(|path| (entry, path)))
        .filter(|(_, path)| {
            !path
                .file_name()
                .and_then(|name| name.to_str())
                .is_some_and(|name| policy.exempt_files.iter().any(|f| f == name))
        })
        .collect();
    if relevant.is_empty() {
        return Ok(None);
    }

    // Touching any revision-suffixed ebuild is the common uprev shape.
    if relevant
        .iter()
        .any(|(_, path)| version::has_revision_suffix(path))
    {
        return Ok(None);
    }

    // Brand-new ebuilds cover their whole package directory, files/ included.
    let new_package_dirs: Vec<&Path> = relevant
        .iter()
        .filter(|(entry, path)| entry.status == DiffStatus::Added && portage::is_ebuild(path))
        .filter_map(|(_, path)| path.parent())
        .collect();

    let mut missing: IndexSet<PathBuf> = IndexSet::new();
    for (_, path) in &relevant {
        if new_package_dirs.iter().any(|dir| path.starts_with(dir)) {
            continue;
        }
        if let Some(dir) = package_dir(path) {
            missing.insert(dir);
        }
    }

    if missing.is_empty() {
        Ok(None)
    } else {
        Ok(Some(CheckFailure::with_items(
            "Changelist probably needs a revbump of an ebuild in these packages (or a new -r1 ebuild):",
            missing.iter().map(|dir| dir.display().to_string()).collect(),
        )))
    }
}

#[cfg(test)]
#[path = "ebuild_tests.rs"]
mod tests;
