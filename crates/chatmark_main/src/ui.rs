use std::convert::Infallible;
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use chatmark_domain::{ChatMessage, Conversation};
use chatmark_eventsource::into_fragments;
use chatmark_markdown_stream::SpanStyler;
use chatmark_provider::ChatProvider;
use chatmark_stream::{SchedulePolicy, StreamSession};
use futures::StreamExt;
use futures::stream::{self, BoxStream};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tracing::{debug, info};

use crate::cli::Cli;
use crate::stream_renderer::TerminalSink;

const INPUT_PROMPT: &str = "> ";

/// Terminal front end: turns prompts into rendered replies and keeps the
/// conversation of this run.
pub struct UI<P, W, S> {
    provider: P,
    policy: SchedulePolicy,
    conversation: Conversation,
    sink: TerminalSink<W, S>,
}

impl<P: ChatProvider, W: Write, S: SpanStyler> UI<P, W, S> {
    pub fn new(provider: P, policy: SchedulePolicy, sink: TerminalSink<W, S>) -> Self {
        Self { provider, policy, conversation: Conversation::default(), sink }
    }

    pub fn conversation(&self) -> &Conversation {
        &self.conversation
    }

    pub fn sink(&self) -> &TerminalSink<W, S> {
        &self.sink
    }

    pub async fn run(&mut self, cli: &Cli) -> Result<()> {
        let streaming = !cli.no_stream;
        if let Some(path) = &cli.replay {
            return self.replay(path).await;
        }
        if let Some(prompt) = &cli.prompt {
            self.exchange(prompt, streaming).await?;
            return Ok(());
        }

        let input = BufReader::new(tokio::io::stdin());
        self.interactive(input, streaming).await
    }

    /// Read prompts line by line until end of input, `exit`/`quit` or
    /// Ctrl-C at the prompt.
    pub async fn interactive<R>(&mut self, input: R, streaming: bool) -> Result<()>
    where
        R: AsyncBufRead + Unpin,
    {
        let mut lines = input.lines();
        loop {
            self.sink.write_text(INPUT_PROMPT)?;
            let line = tokio::select! {
                line = lines.next_line() => line.context("Failed to read input")?,
                _ = tokio::signal::ctrl_c() => None,
            };
            let Some(line) = line else {
                self.sink.write_text("\n")?;
                break;
            };

            let prompt = line.trim();
            if prompt.is_empty() {
                continue;
            }
            if matches!(prompt, "exit" | "quit") {
                break;
            }
            self.exchange(prompt, streaming).await?;
        }
        Ok(())
    }

    /// Send one prompt and render the reply. Returns the reply text, or
    /// `None` if the exchange was cancelled; only completed exchanges join
    /// the conversation.
    pub async fn exchange(&mut self, prompt: &str, streaming: bool) -> Result<Option<String>> {
        let history = self.conversation.messages();
        let fragments = if streaming {
            self.provider.chat_stream(history, prompt).await
        } else {
            let reply = self.provider.complete(history, prompt).await;
            stream::once(async move { reply }).boxed()
        };

        let reply = self.render(fragments).await?;
        if let Some(reply) = &reply {
            self.conversation.push(ChatMessage::user(prompt));
            self.conversation.push(ChatMessage::assistant(reply.as_str()));
            debug!(messages = self.conversation.len(), "Exchange complete");
        }
        Ok(reply)
    }

    /// Render a recorded event-stream file as if it arrived from upstream.
    pub async fn replay(&mut self, path: &Path) -> Result<()> {
        let content = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read replay file {}", path.display()))?;
        let lines: Vec<Result<String, Infallible>> =
            content.lines().map(|line| Ok(line.to_string())).collect();

        self.render(into_fragments(stream::iter(lines)).boxed()).await?;
        Ok(())
    }

    async fn render(&mut self, fragments: BoxStream<'static, String>) -> Result<Option<String>> {
        let outcome = {
            let session = StreamSession::new(self.policy.clone(), &mut self.sink);
            tokio::select! {
                outcome = session.run(fragments) => Some(outcome),
                _ = tokio::signal::ctrl_c() => None,
            }
        };

        match outcome {
            Some(outcome) => {
                debug!(
                    fragments = outcome.fragments,
                    reparses = outcome.reparses,
                    "Message complete"
                );
                Ok(Some(outcome.text))
            }
            None => {
                info!("Message cancelled");
                self.sink.finish()?;
                Ok(None)
            }
        }
    }
}
