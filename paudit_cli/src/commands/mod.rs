//! SUSE command runner configuration
//!
//! Provides the whitelisted command runner for SLE patch auditing.

use paudit_core::SystemCommandRunner;

/// Create command runner configured for SLE patch audit queries
///
/// Whitelist includes:
/// - hostname: Host identity
/// - cat: Release file content
/// - zypper: Patch listing and detail queries
pub fn create_suse_command_runner() -> SystemCommandRunner {
    let mut runner = SystemCommandRunner::new();

    runner.allow_commands(&[
        "hostname", // Host identity
        "cat",      // Release file content
        "zypper",   // Patch management queries
    ]);

    runner
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_suse_runner_whitelist() {
        let runner = create_suse_command_runner();

        assert!(runner.is_allowed("hostname"));
        assert!(runner.is_allowed("cat"));
        assert!(runner.is_allowed("zypper"));

        // Random commands are NOT whitelisted
        assert!(!runner.is_allowed("rm"));
        assert!(!runner.is_allowed("dd"));
        assert!(!runner.is_allowed("curl"));
    }
}
