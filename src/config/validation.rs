use regex::Regex;

use crate::portage::{OverlayTier, PackageVersion};
use crate::{Result, UploadGuardError};

use super::model::Policy;

const TIERS: [OverlayTier; 5] = [
    OverlayTier::Public,
    OverlayTier::PublicBoard,
    OverlayTier::PublicBoardVariant,
    OverlayTier::PrivateBoard,
    OverlayTier::PrivateBoardVariant,
];

/// Reject policy tables the checks could not act on: non-numeric virtual
/// version values and patterns that do not compile.
///
/// # Errors
/// Returns a [`UploadGuardError::Config`] naming the offending value.
pub fn validate_policy(policy: &Policy) -> Result<()> {
    for tier in TIERS {
        let value = policy.ebuild.virtual_pv.expected(tier);
        if PackageVersion::parse(value).is_none() {
            return Err(UploadGuardError::Config(format!(
                "virtual_pv value for {tier} overlays is not a dotted numeric version: '{value}'"
            )));
        }
    }

    compile_check("content.license_header", &policy.content.license_header)?;
    for pattern in policy
        .content
        .isolated_paths
        .iter()
        .chain(&policy.content.included_paths)
        .chain(&policy.content.excluded_paths)
    {
        compile_check("content path pattern", pattern)?;
    }
    Ok(())
}

fn compile_check(what: &str, pattern: &str) -> Result<()> {
    Regex::new(pattern)
        .map(|_| ())
        .map_err(|e| UploadGuardError::Config(format!("{what} '{pattern}' does not compile: {e}")))
}

#[cfg(test)]
#[path = "validation_tests.rs"]
mod tests;
