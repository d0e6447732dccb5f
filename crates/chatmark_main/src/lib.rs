mod cli;
mod stream_renderer;
mod ui;

pub use cli::Cli;
pub use stream_renderer::TerminalSink;
pub use ui::UI;
