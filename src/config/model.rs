use serde::{Deserialize, Serialize};

use crate::portage::OverlayTier;

/// Policy tables for every check.
///
/// The defaults follow the Chromium OS tree conventions, but all of them are
/// deployment data rather than behavior, so any table can be overridden from
/// `.upload-guard.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Policy {
    /// Commit message grammar.
    #[serde(default)]
    pub message: MessagePolicy,

    /// Ebuild metadata policy (EAPI, virtual package versions).
    #[serde(default)]
    pub ebuild: EbuildPolicy,

    /// Uprev requirements for touched packages.
    #[serde(default)]
    pub uprev: UprevPolicy,

    /// Source-content hygiene (line length, license headers).
    #[serde(default)]
    pub content: ContentPolicy,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MessagePolicy {
    /// Bug trackers accepted in `BUG=tracker:id` references.
    #[serde(default = "default_bug_trackers")]
    pub bug_trackers: Vec<String>,

    /// Retired trackers that get a dedicated "deprecated" rejection.
    #[serde(default = "default_legacy_bug_trackers")]
    pub legacy_bug_trackers: Vec<String>,

    /// Character budget for the summary line.
    #[serde(default = "default_max_summary_len")]
    pub max_summary_len: usize,

    /// Trailer tags allowed to follow the `Change-Id:` line.
    #[serde(default = "default_changeid_trailers")]
    pub changeid_trailers: Vec<String>,

    /// Trailer tags additionally allowed when the message carries a
    /// cherry-pick marker line.
    #[serde(default = "default_cherry_pick_trailers")]
    pub cherry_pick_trailers: Vec<String>,
}

impl Default for MessagePolicy {
    fn default() -> Self {
        Self {
            bug_trackers: default_bug_trackers(),
            legacy_bug_trackers: default_legacy_bug_trackers(),
            max_summary_len: default_max_summary_len(),
            changeid_trailers: default_changeid_trailers(),
            cherry_pick_trailers: default_cherry_pick_trailers(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EbuildPolicy {
    /// Lowest EAPI accepted in edited ebuilds.
    #[serde(default = "default_min_eapi")]
    pub min_eapi: u32,

    /// Overlays that mirror upstream and are exempt from EAPI and virtual
    /// version policy (imports should stay as-is).
    #[serde(default = "default_upstream_overlays")]
    pub upstream_overlays: Vec<String>,

    /// Expected virtual package version per overlay tier.
    #[serde(default)]
    pub virtual_pv: VirtualPvPolicy,
}

impl Default for EbuildPolicy {
    fn default() -> Self {
        Self {
            min_eapi: default_min_eapi(),
            upstream_overlays: default_upstream_overlays(),
            virtual_pv: VirtualPvPolicy::default(),
        }
    }
}

/// Expected `PV` of a virtual package, by the tier of the overlay that
/// carries it. Values are version strings so fractional steps like `2.5`
/// stay exact.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct VirtualPvPolicy {
    #[serde(default = "default_pv_public")]
    pub public: String,

    #[serde(default = "default_pv_public_board")]
    pub public_board: String,

    #[serde(default = "default_pv_public_board_variant")]
    pub public_board_variant: String,

    #[serde(default = "default_pv_private_board")]
    pub private_board: String,

    #[serde(default = "default_pv_private_board_variant")]
    pub private_board_variant: String,
}

impl VirtualPvPolicy {
    /// The expected version string for a tier.
    #[must_use]
    pub fn expected(&self, tier: OverlayTier) -> &str {
        match tier {
            OverlayTier::Public => &self.public,
            OverlayTier::PublicBoard => &self.public_board,
            OverlayTier::PublicBoardVariant => &self.public_board_variant,
            OverlayTier::PrivateBoard => &self.private_board,
            OverlayTier::PrivateBoardVariant => &self.private_board_variant,
        }
    }
}

impl Default for VirtualPvPolicy {
    fn default() -> Self {
        Self {
            public: default_pv_public(),
            public_board: default_pv_public_board(),
            public_board_variant: default_pv_public_board_variant(),
            private_board: default_pv_private_board(),
            private_board_variant: default_pv_private_board_variant(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UprevPolicy {
    /// Overlays exempt from the uprev requirement.
    #[serde(default = "default_uprev_exempt_overlays")]
    pub exempt_overlays: Vec<String>,

    /// Metadata file names whose changes never require an uprev.
    #[serde(default = "default_uprev_exempt_files")]
    pub exempt_files: Vec<String>,
}

impl Default for UprevPolicy {
    fn default() -> Self {
        Self {
            exempt_overlays: default_uprev_exempt_overlays(),
            exempt_files: default_uprev_exempt_files(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ContentPolicy {
    /// Character budget for added/changed source lines.
    #[serde(default = "default_max_line_len")]
    pub max_line_len: usize,

    /// Multiline regex every affected source file must match.
    #[serde(default = "default_license_header")]
    pub license_header: String,

    /// Path fragments (regexes) whose changes must not be mixed with other
    /// changes in one commit.
    #[serde(default = "default_isolated_paths")]
    pub isolated_paths: Vec<String>,

    /// Path regexes selecting files subject to content checks.
    #[serde(default = "default_included_paths")]
    pub included_paths: Vec<String>,

    /// Path regexes exempt from content checks.
    #[serde(default = "default_excluded_paths")]
    pub excluded_paths: Vec<String>,
}

impl Default for ContentPolicy {
    fn default() -> Self {
        Self {
            max_line_len: default_max_line_len(),
            license_header: default_license_header(),
            isolated_paths: default_isolated_paths(),
            included_paths: default_included_paths(),
            excluded_paths: default_excluded_paths(),
        }
    }
}

fn default_bug_trackers() -> Vec<String> {
    vec!["chromium".to_string(), "chrome-os-partner".to_string()]
}

fn default_legacy_bug_trackers() -> Vec<String> {
    vec!["chromium-os".to_string()]
}

const fn default_max_summary_len() -> usize {
    100
}

fn default_changeid_trailers() -> Vec<String> {
    vec!["Signed-off-by".to_string()]
}

fn default_cherry_pick_trailers() -> Vec<String> {
    [
        "Commit-Queue",
        "Commit-Ready",
        "Reviewed-by",
        "Reviewed-on",
        "Signed-off-by",
        "Tested-by",
    ]
    .iter()
    .map(ToString::to_string)
    .collect()
}

const fn default_min_eapi() -> u32 {
    4
}

fn default_upstream_overlays() -> Vec<String> {
    vec!["chromiumos/overlays/portage-stable".to_string()]
}

fn default_pv_public() -> String {
    "1".to_string()
}

fn default_pv_public_board() -> String {
    "2".to_string()
}

fn default_pv_public_board_variant() -> String {
    "2.5".to_string()
}

fn default_pv_private_board() -> String {
    "3".to_string()
}

fn default_pv_private_board_variant() -> String {
    "3.5".to_string()
}

fn default_uprev_exempt_overlays() -> Vec<String> {
    vec!["chromiumos/overlays/portage-stable".to_string()]
}

fn default_uprev_exempt_files() -> Vec<String> {
    vec![
        "ChangeLog".to_string(),
        "Manifest".to_string(),
        "metadata.xml".to_string(),
    ]
}

const fn default_max_line_len() -> usize {
    80
}

fn default_license_header() -> String {
    concat!(
        r".* Copyright (\(c\) )?20[-0-9]{2,7} The Chromium OS Authors\. All rights reserved\.",
        "\n",
        r".* Use of this source code is governed by a BSD-style license that can be",
        "\n",
        r".* found in the LICENSE file\.",
    )
    .to_string()
}

fn default_isolated_paths() -> Vec<String> {
    vec!["chromeos/config".to_string()]
}

fn default_included_paths() -> Vec<String> {
    [
        // C and friends
        r"\.c$",
        r"\.cc$",
        r"\.cpp$",
        r"\.h$",
        r"\.hpp$",
        r"\.inl$",
        r"\.asm$",
        r"\.s$",
        r"\.S$",
        // Scripts
        r"\.js$",
        r"\.py$",
        r"\.sh$",
        r"\.rb$",
        r"\.pl$",
        r"\.pm$",
        r"\.rs$",
        r"\.go$",
        // Build glue
        r"\.java$",
        r"\.mk$",
        r"\.am$",
        // Files with no extension at all (ALL CAPS names are excluded below)
        r"(^|/)[^./]+$",
    ]
    .iter()
    .map(ToString::to_string)
    .collect()
}

fn default_excluded_paths() -> Vec<String> {
    [
        // Imported kernel trees carry their own style
        r"/third_party/kernel/",
        r"(^|/)experimental/",
        // ALL CAPS files: COPYING, LICENSE, OWNERS, ...
        r"(^|/)[A-Z0-9_]{2,}$",
        r"(^|/)debian/rules$",
        // For ebuild trees, ignore caches and manifest data
        r"(^|/)Manifest$",
        r"/metadata/[^/]*cache[^/]*/",
        // Board profile data
        r"(^|/)overlay-[^/]*/profiles/",
        // Minified or vendored javascript
        r"\.min\.js$",
        r"jquery[^/]*\.js$",
    ]
    .iter()
    .map(ToString::to_string)
    .collect()
}

#[cfg(test)]
#[path = "model_tests.rs"]
mod tests;
