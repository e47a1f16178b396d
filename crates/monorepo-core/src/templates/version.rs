//! Version parsing and CLI/template compatibility

use semver::Version;

/// Compare the CLI version against the version the bundled templates expect.
/// Returns a warning when the CLI is older; unparsable versions never warn.
pub fn check_compatibility(cli_version: &str, template_version: &str) -> Option<String> {
    let cli_ver = parse_version(cli_version)?;
    let template_ver = parse_version(template_version)?;

    if cli_ver < template_ver {
        Some(format!(
            "Bundled templates were written for turbo-ts-cli {} or newer; you are running {}.",
            template_version, cli_version
        ))
    } else {
        None
    }
}

/// Parse a version string, tolerating a leading `v`
pub fn parse_version(version_str: &str) -> Option<Version> {
    let trimmed = version_str.trim();
    let cleaned = trimmed.strip_prefix('v').unwrap_or(trimmed);
    Version::parse(cleaned).ok()
}
