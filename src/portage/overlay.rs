use std::fmt;
use std::path::Path;

const BOARD_PREFIX: &str = "overlay-";
const VARIANT_PREFIX: &str = "overlay-variant-";
const PRIVATE_SUFFIX: &str = "-private";

/// Classification of an overlay by visibility and board specialization.
///
/// Computed once per check invocation from the overlay name; the rest of the
/// code matches on the tier instead of re-testing name substrings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OverlayTier {
    /// Shared overlays that apply to every device.
    Public,
    /// A public overlay for one board.
    PublicBoard,
    /// A public overlay for one variant of a board.
    PublicBoardVariant,
    /// A private overlay for one board.
    PrivateBoard,
    /// A private overlay for one variant of a board.
    PrivateBoardVariant,
}

impl OverlayTier {
    /// Classify an overlay directory name.
    ///
    /// Rules apply in order, first match wins:
    /// 1. name ends with `-private` and starts with `overlay-variant-`
    /// 2. name ends with `-private`
    /// 3. name starts with `overlay-variant-`
    /// 4. name starts with `overlay-`
    /// 5. anything else is a shared public overlay
    #[must_use]
    pub fn classify(overlay: &str) -> Self {
        let private = overlay.ends_with(PRIVATE_SUFFIX);
        let variant = overlay.starts_with(VARIANT_PREFIX);
        if private {
            if variant {
                Self::PrivateBoardVariant
            } else {
                Self::PrivateBoard
            }
        } else if variant {
            Self::PublicBoardVariant
        } else if overlay.starts_with(BOARD_PREFIX) {
            Self::PublicBoard
        } else {
            Self::Public
        }
    }
}

impl fmt::Display for OverlayTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Public => "public",
            Self::PublicBoard => "public board",
            Self::PublicBoardVariant => "public board variant",
            Self::PrivateBoard => "private board",
            Self::PrivateBoardVariant => "private board variant",
        };
        f.write_str(name)
    }
}

/// The overlay that owns `path` inside `project`.
///
/// Multi-board trees nest per-board overlays at the top level
/// (`overlay-lumpy/virtual/...`); for such paths the nested overlay directory
/// is the owner. Otherwise the project itself is the overlay, identified by
/// the last component of its name.
#[must_use]
pub fn owning_overlay<'a>(project: &'a str, path: &'a Path) -> &'a str {
    let components: Vec<&str> = path
        .iter()
        .filter_map(|c| c.to_str())
        .collect();
    if let Some(pos) = components.iter().position(|c| *c == "virtual")
        && pos > 0
        && components[pos - 1].starts_with(BOARD_PREFIX)
    {
        return components[pos - 1];
    }
    project.rsplit('/').next().unwrap_or(project)
}

#[cfg(test)]
#[path = "overlay_tests.rs"]
mod tests;
