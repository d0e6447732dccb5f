use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use chatmark_config::{ChatmarkConfig, ConfigReader, load_dot_env};
use chatmark_main::{Cli, TerminalSink, UI};
use chatmark_markdown_stream::{CodeHighlighter, Highlighted, Theme, detect_theme_mode};
use chatmark_provider::OpenAIProvider;
use chatmark_stream::SchedulePolicy;
use clap::Parser;
use tracing::warn;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt;
use tracing_subscriber::prelude::*;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    load_dot_env(&cwd);

    let mut reader = ConfigReader::default();
    if let Some(path) = &cli.config {
        reader = reader.path(path.clone());
    }
    let config = reader.read().context("Failed to load settings")?;
    if config.provider.api_key.is_none() && cli.replay.is_none() {
        warn!("No API key configured; set CHATMARK_PROVIDER__API_KEY");
    }

    let policy = schedule_policy(&config);
    let mode = detect_theme_mode();
    let styler = Highlighted::new(Theme::for_mode(mode), CodeHighlighter::new(mode));
    let sink = TerminalSink::new(io::stdout(), styler);
    let provider = OpenAIProvider::new(config.provider);

    let mut ui = UI::new(provider, policy, sink);
    ui.run(&cli).await
}

fn schedule_policy(config: &ChatmarkConfig) -> SchedulePolicy {
    SchedulePolicy::default()
        .batch_size(config.schedule.batch_size)
        .long_delta_threshold(config.schedule.long_delta_threshold)
        .pacing(config.schedule.pacing())
}

/// Logs go to stderr so they never interleave with the rendered reply.
fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(io::stderr))
        .with(filter)
        .init();
}
