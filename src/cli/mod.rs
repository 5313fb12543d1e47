//! CLI definition and the prompt, fetch, select, confirm, pull pipeline

pub mod prompt;
pub mod select;
pub mod style;

use crate::image::reference::{normalize_image_name, ImageReference};
use crate::image::registry::{TagFetcher, DEFAULT_REGISTRY, MAX_PAGE_SIZE};
use crate::pull::Puller;
use crate::{DimgError, Result};
use clap::Parser;
use std::future::Future;
use tracing::{debug, info};

/// dimg - docker pull image supporter
#[derive(Parser, Debug)]
#[command(name = "dimg")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Image name; prompted for when omitted
    pub image: Option<String>,

    /// Pull without asking for confirmation
    #[arg(short, long)]
    pub yes: bool,

    /// Registry serving the tag listing API
    #[arg(long, default_value = DEFAULT_REGISTRY)]
    pub registry: String,

    /// Tags requested per page
    #[arg(long, default_value_t = MAX_PAGE_SIZE, value_parser = clap::value_parser!(u32).range(1..=MAX_PAGE_SIZE as i64))]
    pub page_size: u32,

    /// Docker executable used for pulling
    #[arg(long, default_value = "docker")]
    pub docker: String,

    /// Pull through the Docker Engine API even if the docker executable exists
    #[arg(long)]
    pub engine_api: bool,

    /// Verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

/// Interactive steps of the pipeline
pub(crate) trait Prompter {
    /// Normalized image name
    fn image_name(&mut self) -> Result<String>;
    fn select_tag(&mut self, tags: &[String]) -> Result<String>;
    /// `false` for both "no" and an aborted prompt
    fn confirm(&mut self, label: &str) -> bool;
}

/// Prompts on the controlling terminal
pub(crate) struct TerminalPrompter;

impl Prompter for TerminalPrompter {
    fn image_name(&mut self) -> Result<String> {
        prompt::image_name()
    }

    fn select_tag(&mut self, tags: &[String]) -> Result<String> {
        select::select_tag(tags)
    }

    fn confirm(&mut self, label: &str) -> bool {
        prompt::confirm(label)
    }
}

/// Where the tag list comes from
pub(crate) trait TagSource {
    async fn list_tags(&self, repository: &str) -> Result<Vec<String>>;
}

impl TagSource for TagFetcher {
    async fn list_tags(&self, repository: &str) -> Result<Vec<String>> {
        self.fetch_tags(repository).await
    }
}

/// What performs the pull
pub(crate) trait ImagePuller {
    async fn pull_image(&self, reference: &ImageReference) -> Result<()>;
}

impl ImagePuller for Puller {
    async fn pull_image(&self, reference: &ImageReference) -> Result<()> {
        self.pull(reference).await
    }
}

/// How a run finished without error
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Repository unknown or without tags; the selector never ran
    NoTags(String),
    /// Confirmation answered no; nothing was pulled
    Declined(ImageReference),
    Pulled(ImageReference),
}

/// Prompt, fetch, select, confirm and pull, stopping at the first error
pub(crate) async fn run<P, S, U>(
    image: Option<&str>,
    assume_yes: bool,
    prompter: &mut P,
    source: &S,
    puller: &U,
) -> Result<Outcome>
where
    P: Prompter,
    S: TagSource,
    U: ImagePuller,
{
    let image_name = match image {
        Some(raw) => normalize_image_name(raw)?,
        None => prompter.image_name()?,
    };

    println!("Searching {} tags...", style::bold(&image_name));

    let tags = source.list_tags(&image_name).await?;

    if tags.is_empty() {
        println!("{} not found or no tags.", style::red(format!("{:?}", image_name)));
        return Ok(Outcome::NoTags(image_name));
    }

    println!(
        "{} has {} tags.",
        style::bold(&image_name),
        style::green(tags.len())
    );

    let tag = prompter.select_tag(&tags)?;
    let reference = ImageReference::new(image_name, tag);

    if !assume_yes && !prompter.confirm(&format!("Start pulling {}", reference)) {
        println!("{}", style::faint("Not pulling."));
        return Ok(Outcome::Declined(reference));
    }

    puller.pull_image(&reference).await?;

    Ok(Outcome::Pulled(reference))
}

/// Start listening for SIGINT so Ctrl-C outside a prompt ends the run as cancelled
#[cfg(unix)]
fn interrupt_signal() -> Result<impl Future<Output = ()>> {
    use tokio::signal::unix::{signal, SignalKind};

    let mut sigint = signal(SignalKind::interrupt())?;
    Ok(async move {
        sigint.recv().await;
    })
}

#[cfg(not(unix))]
fn interrupt_signal() -> Result<impl Future<Output = ()>> {
    Ok(async {
        let _ = tokio::signal::ctrl_c().await;
    })
}

/// Drive `work` unless `interrupt` fires first
pub(crate) async fn with_interrupt<T>(
    work: impl Future<Output = Result<T>>,
    interrupt: impl Future<Output = ()>,
) -> Result<T> {
    tokio::select! {
        result = work => result,
        _ = interrupt => {
            let _ = console::Term::stdout().show_cursor();
            Err(DimgError::Cancelled)
        }
    }
}

/// Run the whole pipeline once
pub async fn execute(cli: Cli) -> anyhow::Result<()> {
    let interrupt = interrupt_signal()?;

    let puller = Puller::select(&cli.docker, cli.engine_api);
    info!(strategy = puller.name(), "pull strategy selected");

    let fetcher = TagFetcher::new(&cli.registry, cli.page_size)?;
    let mut prompter = TerminalPrompter;

    let outcome = with_interrupt(
        run(cli.image.as_deref(), cli.yes, &mut prompter, &fetcher, &puller),
        interrupt,
    )
    .await?;
    debug!(?outcome, "finished");

    Ok(())
}
