//! Pulling through the Docker Engine API
//!
//! Used when no docker executable is available. The Engine streams one JSON
//! progress record per line; each is printed as it arrives.

use crate::image::reference::ImageReference;
use crate::{DimgError, Result};
use bollard::errors::Error as EngineError;
use bollard::image::CreateImageOptions;
use bollard::models::CreateImageInfo;
use bollard::Docker;
use futures_util::StreamExt;
use std::fmt;
use tracing::debug;

/// One progress record of an image pull
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PullStatus {
    /// Layer id, empty for image-level records
    pub id: String,
    pub status: String,
    /// Rendered progress bar, e.g. `[=====>    ] 12MB/30MB`
    pub progress: String,
    pub current: i64,
    pub total: i64,
}

impl From<CreateImageInfo> for PullStatus {
    fn from(info: CreateImageInfo) -> Self {
        let (current, total) = info
            .progress_detail
            .map(|detail| (detail.current.unwrap_or(0), detail.total.unwrap_or(0)))
            .unwrap_or((0, 0));

        Self {
            id: info.id.unwrap_or_default(),
            status: info.status.unwrap_or_default(),
            progress: info.progress.unwrap_or_default(),
            current,
            total,
        }
    }
}

impl fmt::Display for PullStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let line = if self.id.is_empty() {
            format!("{} {}", self.status, self.progress)
        } else {
            format!("{}: {} {}", self.id, self.status, self.progress)
        };
        f.write_str(line.trim_end())
    }
}

/// Pulls by asking the Docker Engine directly
#[derive(Debug, Clone, Default)]
pub struct EngineApiPuller;

impl EngineApiPuller {
    pub fn new() -> Self {
        Self
    }

    /// Connect with `DOCKER_HOST`-style defaults and negotiate the API version
    async fn connect(&self) -> Result<Docker> {
        let docker = Docker::connect_with_defaults().map_err(engine_error)?;
        let docker = docker.negotiate_version().await.map_err(engine_error)?;
        debug!("connected to Docker Engine");
        Ok(docker)
    }

    /// Pull `reference`, printing each progress record until the stream ends
    pub async fn pull(&self, reference: &ImageReference) -> Result<()> {
        let docker = self.connect().await?;

        let options = CreateImageOptions {
            from_image: reference.repository.as_str(),
            tag: reference.tag.as_str(),
            ..Default::default()
        };

        let mut stream = docker.create_image(Some(options), None, None);
        while let Some(item) = stream.next().await {
            let info = item.map_err(engine_error)?;
            if let Some(error) = info.error {
                return Err(DimgError::Pull(error));
            }
            println!("{}", PullStatus::from(info));
        }

        Ok(())
    }
}

/// Malformed progress records are decode errors, everything else is a pull failure
fn engine_error(err: EngineError) -> DimgError {
    match &err {
        EngineError::JsonDataError { .. } | EngineError::JsonSerdeError { .. } => {
            DimgError::Decode(err.to_string())
        }
        _ => DimgError::Pull(err.to_string()),
    }
}
