//! Command execution with security controls for audit queries

use std::collections::HashSet;
use std::process::{Command, Stdio};
use std::time::Instant;

use log::debug;

/// Seam for query execution so collectors can run against stubbed outputs
pub trait CommandRunner {
    /// Execute a program with an argument array and capture its output
    fn run(&self, program: &str, args: &[&str]) -> Result<CommandOutput, CommandError>;
}

/// Executes whitelisted system programs and captures output
///
/// Calls are fully blocking: no timeout, no streaming, no cancellation.
#[derive(Debug, Clone, Default)]
pub struct SystemCommandRunner {
    allowed_commands: HashSet<String>,
}

impl SystemCommandRunner {
    /// Create runner with empty whitelist - must be configured before use
    pub fn new() -> Self {
        Self {
            allowed_commands: HashSet::new(),
        }
    }

    /// Add program to whitelist
    pub fn allow_command(&mut self, command: impl Into<String>) {
        self.allowed_commands.insert(command.into());
    }

    /// Add multiple programs to whitelist
    pub fn allow_commands(&mut self, commands: &[&str]) {
        for cmd in commands {
            self.allowed_commands.insert(cmd.to_string());
        }
    }

    /// Check if program is whitelisted
    pub fn is_allowed(&self, command: &str) -> bool {
        self.allowed_commands.contains(command)
    }
}

impl CommandRunner for SystemCommandRunner {
    fn run(&self, program: &str, args: &[&str]) -> Result<CommandOutput, CommandError> {
        // Validate program is whitelisted before anything is spawned
        if !self.allowed_commands.contains(program) {
            return Err(CommandError::NotWhitelisted {
                program: program.to_string(),
            });
        }

        let start = Instant::now();

        // Build command with sanitized environment
        let mut cmd = Command::new(program);
        cmd.args(args)
            .env_clear()
            .env("PATH", "/usr/bin:/bin:/usr/sbin:/sbin") // Restricted PATH
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());

        let child = cmd.spawn().map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                CommandError::ProgramNotFound {
                    program: program.to_string(),
                }
            } else if e.kind() == std::io::ErrorKind::PermissionDenied {
                CommandError::PermissionDenied {
                    program: program.to_string(),
                }
            } else {
                CommandError::SpawnFailed {
                    program: program.to_string(),
                    reason: e.to_string(),
                }
            }
        })?;

        // wait_with_output consumes the child, releasing its handles on
        // both success and failure paths
        let output = child
            .wait_with_output()
            .map_err(|e| CommandError::SpawnFailed {
                program: program.to_string(),
                reason: e.to_string(),
            })?;

        let stdout = String::from_utf8_lossy(&output.stdout).trim().to_string();
        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();

        debug!(
            "executed '{}' ({} args) in {:?}, exit {:?}",
            program,
            args.len(),
            start.elapsed(),
            output.status.code()
        );

        if !output.status.success() {
            return Err(CommandError::CommandFailed {
                command: render_command_line(program, args),
                code: output.status.code().unwrap_or(-1),
                stderr,
            });
        }

        Ok(CommandOutput { stdout, stderr })
    }
}

/// Command execution output, whitespace-trimmed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutput {
    pub stdout: String,
    pub stderr: String,
}

/// Command execution errors
#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error("Program '{program}' not in whitelist")]
    NotWhitelisted { program: String },

    #[error("Program not found: {program}")]
    ProgramNotFound { program: String },

    #[error("Permission denied: {program}")]
    PermissionDenied { program: String },

    #[error("Execution failed for '{program}': {reason}")]
    SpawnFailed { program: String, reason: String },

    #[error("Command '{command}' exited with status {code}: {stderr}")]
    CommandFailed {
        command: String,
        code: i32,
        stderr: String,
    },
}

fn render_command_line(program: &str, args: &[&str]) -> String {
    if args.is_empty() {
        program.to_string()
    } else {
        format!("{} {}", program, args.join(" "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn test_empty_whitelist() {
        let runner = SystemCommandRunner::new();
        assert!(!runner.is_allowed("zypper"));
        assert!(!runner.is_allowed("ls"));
    }

    #[test]
    fn test_whitelist_management() {
        let mut runner = SystemCommandRunner::new();

        runner.allow_command("zypper");
        assert!(runner.is_allowed("zypper"));
        assert!(!runner.is_allowed("hostname"));

        runner.allow_commands(&["hostname", "cat"]);
        assert!(runner.is_allowed("hostname"));
        assert!(runner.is_allowed("cat"));
    }

    #[test]
    fn test_refuses_non_whitelisted_program() {
        let runner = SystemCommandRunner::new();
        let result = runner.run("rm", &["-rf", "/tmp/nope"]);

        assert_matches!(result, Err(CommandError::NotWhitelisted { program }) if program == "rm");
    }

    #[test]
    fn test_successful_run_trims_output() {
        let mut runner = SystemCommandRunner::new();
        runner.allow_command("echo");

        let output = runner.run("echo", &["  padded value  "]).unwrap();
        assert_eq!(output.stdout, "padded value");
        assert_eq!(output.stderr, "");
    }

    #[test]
    fn test_non_zero_exit_is_an_error() {
        let mut runner = SystemCommandRunner::new();
        runner.allow_command("cat");

        let result = runner.run("cat", &["/paudit/no/such/file"]);
        match result {
            Err(CommandError::CommandFailed {
                command,
                code,
                stderr,
            }) => {
                assert_eq!(command, "cat /paudit/no/such/file");
                assert_ne!(code, 0);
                assert!(!stderr.is_empty());
            }
            other => panic!("Expected CommandFailed error, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_program_maps_to_not_found() {
        let mut runner = SystemCommandRunner::new();
        runner.allow_command("paudit-no-such-program");

        let result = runner.run("paudit-no-such-program", &[]);
        assert_matches!(result, Err(CommandError::ProgramNotFound { .. }));
    }

    #[test]
    fn test_command_line_rendering() {
        assert_eq!(render_command_line("hostname", &[]), "hostname");
        assert_eq!(
            render_command_line("zypper", &["list-patches", "--cve"]),
            "zypper list-patches --cve"
        );
    }
}
