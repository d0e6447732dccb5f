use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct Cli {
    /// Send a single prompt and exit instead of starting an interactive
    /// session.
    #[arg(long, short = 'p', allow_hyphen_values = true)]
    pub prompt: Option<String>,

    /// Render a recorded event-stream file instead of calling upstream.
    #[arg(long, conflicts_with = "prompt")]
    pub replay: Option<PathBuf>,

    /// Wait for the whole reply instead of streaming it.
    #[arg(long, default_value_t = false, conflicts_with = "replay")]
    pub no_stream: bool,

    /// Settings file to use instead of the one in the user config directory.
    #[arg(long, short = 'c')]
    pub config: Option<PathBuf>,

    /// Enable verbose logging output.
    #[arg(long, default_value_t = false)]
    pub verbose: bool,
}

impl Cli {
    pub fn is_interactive(&self) -> bool {
        self.prompt.is_none() && self.replay.is_none()
    }
}
