use regex::Regex;

/// Glob tokens that mark an ebuild as keyworded for all architectures:
/// stable, unstable, and masked-by-default respectively.
pub const KEYWORD_GLOBS: [&str; 3] = ["*", "~*", "-*"];

/// The value of the first `EAPI=` assignment in ebuild text.
///
/// The value may be bare, single- or double-quoted. Only the first assignment
/// counts; the format requires a single EAPI line, so later reassignments are
/// noise.
#[must_use]
pub fn declared_eapi(content: &str) -> Option<String> {
    let pattern = Regex::new(r#"^\s*EAPI=['"]?([^'"\s]+)"#).expect("Invalid regex");
    content
        .lines()
        .find_map(|line| pattern.captures(line))
        .map(|captures| captures[1].to_string())
}

/// Whether an EAPI value is at or above `minimum`.
///
/// Suffixed values such as `5-hdepend` compare by their numeric prefix;
/// values with no numeric prefix are assumed to be newer than anything we
/// know about.
#[must_use]
pub fn eapi_at_least(eapi: &str, minimum: u32) -> bool {
    let digits: String = eapi.chars().take_while(char::is_ascii_digit).collect();
    digits.parse::<u32>().is_ok_and(|n| n >= minimum) || digits.is_empty()
}

/// The values of every `KEYWORDS="..."` assignment in ebuild text.
#[must_use]
pub fn keywords_assignments(content: &str) -> Vec<String> {
    let pattern = Regex::new(r#"^\s*KEYWORDS="(.*)""#).expect("Invalid regex");
    content
        .lines()
        .filter_map(|line| pattern.captures(line))
        .map(|captures| captures[1].to_string())
        .collect()
}

/// Whether a KEYWORDS value contains at least one of the all-architecture
/// glob tokens.
#[must_use]
pub fn has_keyword_glob(value: &str) -> bool {
    value
        .split_whitespace()
        .any(|token| KEYWORD_GLOBS.contains(&token))
}

#[cfg(test)]
#[path = "metadata_tests.rs"]
mod tests;
