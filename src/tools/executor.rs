//! Shell command execution
//!
//! Runs a command string through `sh -c` and folds the outcome into text.
//! Nothing here returns an error to the caller: spawn failures, bad working
//! directories and non-zero exits all become descriptive strings.
//!
//! There is no deadline. A command that never exits blocks its invocation,
//! and dropping the awaiting future does not kill the child.

use std::fs;
use std::path::Path;
use std::process::Stdio;

use tokio::process::Command;

/// Classified result of running one command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExecOutcome {
    /// Zero exit with stdout; any stderr is discarded
    Output(String),
    /// Zero exit, nothing on stdout, something on stderr
    StderrOnly(String),
    /// Zero exit, nothing on either stream
    Empty,
    /// Non-zero exit (or killed by a signal)
    Failed { code: Option<i32>, stderr: String },
    /// Working directory check failed; the command was not spawned
    BadWorkingDir(String),
    /// Spawning or collecting output failed
    SpawnFailed(String),
}

impl ExecOutcome {
    /// Whether this outcome represents a failure
    pub fn is_error(&self) -> bool {
        matches!(
            self,
            Self::Failed { .. } | Self::BadWorkingDir(_) | Self::SpawnFailed(_)
        )
    }

    /// Text handed back to the caller of a tool
    pub fn into_text(self) -> String {
        match self {
            Self::Output(stdout) => stdout,
            Self::StderrOnly(stderr) => format!("Command produced no output, but stderr: {}", stderr),
            Self::Empty => String::new(),
            Self::Failed { stderr, .. } => {
                let message = if stderr.is_empty() { "Unknown error" } else { stderr.as_str() };
                format!("Error executing command: {}", message)
            }
            Self::BadWorkingDir(reason) => format!("Error: {}", reason),
            Self::SpawnFailed(reason) => format!("Error: {}", reason),
        }
    }

    fn classify(code: Option<i32>, success: bool, stdout: String, stderr: String) -> Self {
        if !success {
            Self::Failed { code, stderr }
        } else if !stdout.is_empty() {
            Self::Output(stdout)
        } else if !stderr.is_empty() {
            Self::StderrOnly(stderr)
        } else {
            Self::Empty
        }
    }
}

/// Check that `dir` exists, is a directory and can be listed.
///
/// Advisory only: the directory can change between this check and spawn.
pub fn check_working_dir(dir: &Path) -> Result<(), String> {
    if !dir.exists() {
        return Err(format!("Working directory does not exist: {}", dir.display()));
    }
    if !dir.is_dir() {
        return Err(format!("Working directory is not a directory: {}", dir.display()));
    }
    if fs::read_dir(dir).is_err() {
        return Err(format!("Working directory is not readable: {}", dir.display()));
    }
    Ok(())
}

/// Run `command` and classify the outcome.
///
/// An empty `working_dir` means the current directory of this process.
pub async fn execute(command: &str, working_dir: &str) -> ExecOutcome {
    log::info!("Executing command: {}", command);

    let mut cmd = Command::new("sh");
    cmd.arg("-c").arg(command);

    if !working_dir.is_empty() {
        log::debug!("Working directory: {}", working_dir);
        let dir = Path::new(working_dir);
        if let Err(reason) = check_working_dir(dir) {
            log::warn!("{}", reason);
            return ExecOutcome::BadWorkingDir(reason);
        }
        cmd.current_dir(dir);
    }

    cmd.stdin(Stdio::null()).stdout(Stdio::piped()).stderr(Stdio::piped());

    let output = match cmd.output().await {
        Ok(output) => output,
        Err(e) => {
            log::warn!("Failed to run '{}': {}", command, e);
            return ExecOutcome::SpawnFailed(e.to_string());
        }
    };

    let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
    let stderr = String::from_utf8_lossy(&output.stderr).into_owned();

    log::debug!(
        "Command exited with {:?} ({} bytes stdout, {} bytes stderr)",
        output.status.code(),
        stdout.len(),
        stderr.len()
    );

    ExecOutcome::classify(output.status.code(), output.status.success(), stdout, stderr)
}

/// Run `command` and return its text result.
pub async fn run(command: &str, working_dir: &str) -> String {
    execute(command, working_dir).await.into_text()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_true_is_empty() {
        assert_eq!(run("true", "").await, "");
    }

    #[tokio::test]
    async fn test_false_is_error() {
        let result = run("false", "").await;
        assert_eq!(result, "Error executing command: Unknown error");
    }

    #[tokio::test]
    async fn test_echo_returns_stdout_verbatim() {
        assert_eq!(run("echo hi", "").await, "hi\n");
    }

    #[tokio::test]
    async fn test_stderr_only() {
        let result = run("echo x >&2", "").await;
        assert!(result.contains("no output, but stderr"));
        assert!(result.contains('x'));
    }

    #[tokio::test]
    async fn test_stderr_discarded_when_stdout_present() {
        let outcome = execute("echo out; echo warn >&2", "").await;
        assert_eq!(outcome, ExecOutcome::Output("out\n".to_string()));
    }

    #[tokio::test]
    async fn test_failure_embeds_stderr() {
        let outcome = execute("echo boom >&2; exit 3", "").await;
        assert_eq!(
            outcome,
            ExecOutcome::Failed {
                code: Some(3),
                stderr: "boom\n".to_string()
            }
        );
        assert!(outcome.is_error());
        assert_eq!(outcome.into_text(), "Error executing command: boom\n");
    }

    #[tokio::test]
    async fn test_command_not_found_is_text() {
        let result = run("definitely-not-a-real-command-xyz", "").await;
        assert!(result.starts_with("Error executing command:"));
    }

    #[tokio::test]
    async fn test_shell_features() {
        assert_eq!(run("printf 'a\\nb\\nc\\n' | grep b", "").await, "b\n");
        assert_eq!(run("X=1; echo \"$X$X\"", "").await, "11\n");
    }

    #[tokio::test]
    async fn test_missing_working_dir_not_spawned() {
        let dir = tempdir().unwrap();
        let marker = dir.path().join("marker");
        let command = format!("touch {}", marker.display());

        let result = run(&command, "/path/does/not/exist").await;
        assert!(result.contains("does not exist"));
        assert!(!marker.exists());
    }

    #[tokio::test]
    async fn test_working_dir_is_a_file() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("file.txt");
        std::fs::write(&file, "content").unwrap();

        let result = run("pwd", file.to_str().unwrap()).await;
        assert!(result.contains("is not a directory"));
    }

    #[tokio::test]
    async fn test_runs_in_working_dir() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("marker.txt"), "found").unwrap();

        let result = run("cat marker.txt", dir.path().to_str().unwrap()).await;
        assert_eq!(result, "found");
    }

    #[tokio::test]
    async fn test_unreadable_working_dir_not_spawned() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempdir().unwrap();
        let locked = dir.path().join("locked");
        std::fs::create_dir(&locked).unwrap();
        std::fs::set_permissions(&locked, std::fs::Permissions::from_mode(0o000)).unwrap();

        // root can list any directory
        if fs::read_dir(&locked).is_ok() {
            std::fs::set_permissions(&locked, std::fs::Permissions::from_mode(0o755)).unwrap();
            return;
        }

        let marker = dir.path().join("marker");
        let command = format!("touch {}", marker.display());
        let result = run(&command, locked.to_str().unwrap()).await;

        std::fs::set_permissions(&locked, std::fs::Permissions::from_mode(0o755)).unwrap();

        assert_eq!(
            result,
            format!("Error: Working directory is not readable: {}", locked.display())
        );
        assert!(!marker.exists());
    }

    #[test]
    fn test_check_working_dir_ok() {
        let dir = tempdir().unwrap();
        assert!(check_working_dir(dir.path()).is_ok());
    }

    #[test]
    fn test_outcome_text() {
        assert_eq!(ExecOutcome::Empty.into_text(), "");
        assert_eq!(
            ExecOutcome::SpawnFailed("No such file".to_string()).into_text(),
            "Error: No such file"
        );
        assert!(!ExecOutcome::StderrOnly("w".to_string()).is_error());
    }
}
