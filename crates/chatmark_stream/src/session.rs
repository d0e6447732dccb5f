use chatmark_domain::{Document, DocumentSink};
use chatmark_markdown_stream::parse;
use futures::{Stream, StreamExt, pin_mut};
use tracing::{debug, warn};

use crate::scheduler::{SchedulePolicy, UpdateScheduler};

/// What a finished session produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionOutcome {
    /// Full text of the message.
    pub text: String,
    /// Document of the terminal reparse.
    pub document: Document,
    /// Number of fragments received.
    pub fragments: u64,
    /// Number of reparses, the terminal one included.
    pub reparses: u64,
}

/// One request/response exchange: drains a fragment source, reparses when
/// the scheduler says so and pushes every document into the sink.
///
/// Dropping the future returned by [`StreamSession::run`] abandons the
/// exchange; the fragment source is simply no longer drained.
pub struct StreamSession<K> {
    scheduler: UpdateScheduler,
    sink: K,
    reparses: u64,
}

impl<K: DocumentSink> StreamSession<K> {
    pub fn new(policy: SchedulePolicy, sink: K) -> Self {
        Self { scheduler: UpdateScheduler::new(policy), sink, reparses: 0 }
    }

    /// Drive the session to completion.
    ///
    /// Fragments are processed strictly in arrival order. When the source
    /// ends, one final reparse runs regardless of the batch counter and its
    /// document is delivered twice: once while still streaming and once
    /// marking the message complete.
    pub async fn run<S>(mut self, fragments: S) -> SessionOutcome
    where
        S: Stream<Item = String>,
    {
        pin_mut!(fragments);
        while let Some(fragment) = fragments.next().await {
            let trigger = self.scheduler.push(&fragment);
            debug!(
                update = self.scheduler.update_count(),
                len = fragment.len(),
                trigger = ?trigger,
                "Received fragment"
            );

            if trigger.should_reparse() {
                let document = self.reparse();
                self.emit(&document, true);
            }

            if let Some(pacing) = self.scheduler.pacing_after(trigger) {
                tokio::time::sleep(pacing).await;
            }
        }

        let document = self.reparse();
        self.emit(&document, true);
        self.emit(&document, false);

        SessionOutcome {
            fragments: self.scheduler.update_count(),
            reparses: self.reparses,
            text: self.scheduler.into_text(),
            document,
        }
    }

    fn reparse(&mut self) -> Document {
        self.reparses += 1;
        parse(self.scheduler.text())
    }

    fn emit(&mut self, document: &Document, still_streaming: bool) {
        if let Err(error) = self.sink.on_document(document, still_streaming) {
            warn!(error = ?error, still_streaming, "Document sink failed");
        }
    }
}
