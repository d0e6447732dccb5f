use std::fmt::Display;

use futures::{Stream, StreamExt, pin_mut};
use tracing::{debug, warn};

use crate::event::{LineEvent, decode_line};

/// Decode a stream of transport lines into message fragments.
///
/// The returned stream ends cleanly on the `[DONE]` sentinel, when the line
/// source is exhausted, or when reading a line fails part-way through the
/// response. Lines after the sentinel are never read.
pub fn into_fragments<S, E>(lines: S) -> impl Stream<Item = String>
where
    S: Stream<Item = Result<String, E>>,
    E: Display,
{
    async_stream::stream! {
        pin_mut!(lines);
        while let Some(line) = lines.next().await {
            let line = match line {
                Ok(line) => line,
                Err(error) => {
                    warn!(error = %error, "Failed to read event stream, ending response");
                    break;
                }
            };

            match decode_line(&line) {
                LineEvent::Delta(delta) => yield delta,
                LineEvent::Done => {
                    debug!("Received completion from Upstream");
                    break;
                }
                LineEvent::Skip => {}
            }
        }
    }
}
