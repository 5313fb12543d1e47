//! Pull strategies
//!
//! The strategy is picked once at startup: shell out to `docker pull` when
//! the executable is on the search path, otherwise talk to the Engine API.

pub mod engine;
pub mod subprocess;

pub use engine::{EngineApiPuller, PullStatus};
pub use subprocess::SubprocessPuller;

use crate::image::reference::ImageReference;
use crate::Result;
use std::ffi::OsStr;
use tracing::{debug, warn};

/// How an image gets pulled
#[derive(Debug)]
pub enum Puller {
    /// `docker pull` with inherited stdio
    Subprocess(SubprocessPuller),
    /// Direct Docker Engine API image create
    EngineApi(EngineApiPuller),
}

impl Puller {
    /// Pick a strategy by looking `program` up on `PATH`
    pub fn select(program: &str, force_engine_api: bool) -> Self {
        Self::select_in(program, std::env::var_os("PATH").as_deref(), force_engine_api)
    }

    /// Pick a strategy by looking `program` up on the given search path
    pub fn select_in(program: &str, search_path: Option<&OsStr>, force_engine_api: bool) -> Self {
        if force_engine_api {
            debug!("Engine API pull requested explicitly");
            return Puller::EngineApi(EngineApiPuller::new());
        }

        match SubprocessPuller::discover_in(program, search_path) {
            Some(puller) => {
                debug!(program = %puller.program().display(), "using docker executable");
                Puller::Subprocess(puller)
            }
            None => {
                warn!(program, "docker executable not found, falling back to the Engine API");
                Puller::EngineApi(EngineApiPuller::new())
            }
        }
    }

    /// Short strategy name for logs
    pub fn name(&self) -> &'static str {
        match self {
            Puller::Subprocess(_) => "subprocess",
            Puller::EngineApi(_) => "engine-api",
        }
    }

    /// Pull `reference` into local image storage
    pub async fn pull(&self, reference: &ImageReference) -> Result<()> {
        debug!(strategy = self.name(), image = %reference, "pulling");
        match self {
            Puller::Subprocess(puller) => puller.pull(reference).await,
            Puller::EngineApi(puller) => puller.pull(reference).await,
        }
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use std::os::unix::fs::PermissionsExt;

    fn fake_executable(dir: &std::path::Path, name: &str) {
        let path = dir.join(name);
        std::fs::write(&path, "#!/bin/sh\nexit 0\n").unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
    }

    #[test]
    fn test_selects_subprocess_when_docker_is_found() {
        let dir = tempfile::tempdir().unwrap();
        fake_executable(dir.path(), "docker");

        let puller = Puller::select_in("docker", Some(dir.path().as_os_str()), false);
        assert_eq!(puller.name(), "subprocess");
    }

    #[test]
    fn test_falls_back_to_engine_api() {
        let dir = tempfile::tempdir().unwrap();

        let puller = Puller::select_in("docker", Some(dir.path().as_os_str()), false);
        assert_eq!(puller.name(), "engine-api");
    }

    #[test]
    fn test_engine_api_can_be_forced() {
        let dir = tempfile::tempdir().unwrap();
        fake_executable(dir.path(), "docker");

        let puller = Puller::select_in("docker", Some(dir.path().as_os_str()), true);
        assert_eq!(puller.name(), "engine-api");
    }
}
