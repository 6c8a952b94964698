pub mod metadata;
pub mod overlay;
pub mod version;

pub use overlay::OverlayTier;
pub use version::{EbuildName, PackageVersion};

use std::path::Path;

/// Whether a path names an ebuild file.
#[must_use]
pub fn is_ebuild(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "ebuild")
}
