//! `docker pull` as a child process

use crate::image::reference::ImageReference;
use crate::{DimgError, Result};
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::process::Command;

/// Pulls by running the docker CLI with the terminal's stdio
#[derive(Debug, Clone)]
pub struct SubprocessPuller {
    program: PathBuf,
}

impl SubprocessPuller {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// Resolve `program` against a search path, `None` when it is not there
    pub fn discover_in(program: &str, search_path: Option<&OsStr>) -> Option<Self> {
        let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        which::which_in(program, search_path, cwd).ok().map(Self::new)
    }

    /// Resolved executable
    pub fn program(&self) -> &Path {
        &self.program
    }

    /// Run `docker pull <reference>` and wait for it
    pub async fn pull(&self, reference: &ImageReference) -> Result<()> {
        let status = Command::new(&self.program)
            .arg("pull")
            .arg(reference.to_string())
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .await
            .map_err(|e| {
                DimgError::Pull(format!("failed to run {}: {}", self.program.display(), e))
            })?;

        if !status.success() {
            return Err(DimgError::Pull(format!(
                "{} pull {} exited with {}",
                self.program.display(),
                reference,
                status
            )));
        }

        Ok(())
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use std::os::unix::fs::PermissionsExt;

    fn script(dir: &Path, name: &str, body: &str) -> PathBuf {
        let path = dir.join(name);
        std::fs::write(&path, format!("#!/bin/sh\n{}\n", body)).unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
        path
    }

    #[test]
    fn test_discover_finds_executable() {
        let dir = tempfile::tempdir().unwrap();
        let expected = script(dir.path(), "docker", "exit 0");

        let puller = SubprocessPuller::discover_in("docker", Some(dir.path().as_os_str())).unwrap();
        assert_eq!(puller.program().file_name(), expected.file_name());
        assert!(puller.program().is_file());
    }

    #[test]
    fn test_discover_missing_executable() {
        let dir = tempfile::tempdir().unwrap();
        assert!(SubprocessPuller::discover_in("may_not_exist", Some(dir.path().as_os_str())).is_none());
    }

    #[tokio::test]
    async fn test_zero_exit_succeeds() {
        let reference = ImageReference::new("library/redis", "7.2");
        SubprocessPuller::new("true").pull(&reference).await.unwrap();
    }

    #[tokio::test]
    async fn test_non_zero_exit_is_pull_error() {
        let reference = ImageReference::new("library/redis", "nope");
        let err = SubprocessPuller::new("false").pull(&reference).await.unwrap_err();
        assert!(matches!(err, DimgError::Pull(_)));
    }

    #[tokio::test]
    async fn test_spawn_failure_is_pull_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("docker");

        let reference = ImageReference::new("library/redis", "7.2");
        let err = SubprocessPuller::new(missing).pull(&reference).await.unwrap_err();
        assert!(matches!(err, DimgError::Pull(_)));
    }
}
