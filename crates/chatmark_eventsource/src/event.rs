use serde::Deserialize;

/// Prefix of every line that carries an event payload.
pub const DATA_PREFIX: &str = "data: ";

/// Payload that marks the end of the response stream.
pub const DONE_SENTINEL: &str = "[DONE]";

/// What a single transport line means for the fragment sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineEvent {
    /// Nothing to emit: blank, foreign, malformed or content-less lines.
    Skip,
    /// The next piece of message text.
    Delta(String),
    /// The sentinel; no fragments follow.
    Done,
}

/// Chat-completion chunk envelope. Only the path to the delta text is
/// modelled; every other field is ignored.
#[derive(Debug, Deserialize)]
struct Envelope {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    delta: Option<Delta>,
}

#[derive(Debug, Deserialize)]
struct Delta {
    content: Option<String>,
}

impl Envelope {
    fn into_content(self) -> Option<String> {
        self.choices
            .into_iter()
            .next()?
            .delta?
            .content
            .filter(|content| !content.is_empty())
    }
}

/// Classify one transport line. Decode failures are never surfaced; the line
/// is skipped instead.
pub fn decode_line(line: &str) -> LineEvent {
    let Some(payload) = line.strip_prefix(DATA_PREFIX) else {
        return LineEvent::Skip;
    };

    if payload == DONE_SENTINEL {
        return LineEvent::Done;
    }

    match serde_json::from_str::<Envelope>(payload) {
        Ok(envelope) => envelope
            .into_content()
            .map_or(LineEvent::Skip, LineEvent::Delta),
        Err(error) => {
            tracing::debug!(error = %error, payload, "Skipping malformed event payload");
            LineEvent::Skip
        }
    }
}
