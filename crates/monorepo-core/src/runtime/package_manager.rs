//! Package manager version detection

use super::command::{CommandRunner, CommandSpec};
use crate::templates::version::parse_version;
use colored::Colorize;

/// Query `<binary> --version`, falling back when the tool is missing or its
/// answer is not a semver version.
pub fn detect_version<R: CommandRunner + ?Sized>(runner: &R, binary: &str, fallback: &str) -> String {
    let command = CommandSpec::new(binary).arg("--version");

    match runner.run_with_output(&command) {
        Ok(output) => match parse_version(&output) {
            Some(version) => version.to_string(),
            None => {
                eprintln!(
                    "{} Unexpected {} version '{}', using {}",
                    "Warning:".yellow(),
                    binary,
                    output,
                    fallback
                );
                fallback.to_string()
            }
        },
        Err(_) => {
            eprintln!(
                "{} Could not determine {} version, using {}",
                "Warning:".yellow(),
                binary,
                fallback
            );
            fallback.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::command::testing::RecordingRunner;

    #[test]
    fn test_detected_version() {
        let runner = RecordingRunner::with_output("10.2.1");
        assert_eq!(detect_version(&runner, "pnpm", "9.15.4"), "10.2.1");
        assert_eq!(runner.calls.borrow()[0].to_string(), "pnpm --version");
    }

    #[test]
    fn test_fallback_on_failure_or_garbage() {
        assert_eq!(
            detect_version(&RecordingRunner::failing(), "pnpm", "9.15.4"),
            "9.15.4"
        );
        assert_eq!(
            detect_version(&RecordingRunner::with_output("not a version"), "pnpm", "9.15.4"),
            "9.15.4"
        );
    }
}
