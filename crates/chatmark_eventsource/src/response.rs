use std::io;

use futures::stream::{self, BoxStream};
use futures::{Stream, StreamExt, TryStreamExt};
use reqwest::{Response, StatusCode};
use tokio::io::AsyncBufReadExt;
use tokio_stream::wrappers::SplitStream;
use tokio_util::io::StreamReader;
use tracing::{debug, error};

use crate::stream::into_fragments;

/// Fragment sent in place of content when the request never got a response.
pub const NETWORK_FAILURE_NOTICE: &str = "网络连接失败";

/// Fragment sent in place of content when upstream answers with an error
/// status.
pub fn status_failure_notice(status: StatusCode, body: &str) -> String {
    format!("API请求失败: {} - {body}", status_name(status))
}

/// Status as a bare PascalCase name (`TooManyRequests`), or the numeric code
/// when the status has no name.
fn status_name(status: StatusCode) -> String {
    let reason = match status.as_u16() {
        413 => Some("RequestEntityTooLarge"),
        414 => Some("RequestUriTooLong"),
        416 => Some("RequestedRangeNotSatisfiable"),
        505 => Some("HttpVersionNotSupported"),
        418 | 425 => None,
        _ => status.canonical_reason(),
    };
    let Some(reason) = reason else {
        return status.as_u16().to_string();
    };

    reason
        .split([' ', '-'])
        .flat_map(|word| {
            let mut chars = word.chars().filter(|c| c.is_ascii_alphanumeric());
            chars.next().map(|first| first.to_ascii_uppercase()).into_iter().chain(chars)
        })
        .collect()
}

/// Turn the outcome of a streaming chat request into its fragment sequence.
///
/// Transport failures are not errors for the caller: a failed request yields
/// exactly one notice fragment and ends, as does a non-success status.
pub fn into_message_fragments(
    response: Result<Response, reqwest::Error>,
) -> BoxStream<'static, String> {
    match response {
        Err(error) => {
            error!(error = ?error, "Failed to connect to Upstream");
            stream::once(async { NETWORK_FAILURE_NOTICE.to_string() }).boxed()
        }
        Ok(response) if !response.status().is_success() => stream::once(async move {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            error!(status = %status, body = %body, "Upstream rejected the request");
            status_failure_notice(status, &body)
        })
        .boxed(),
        Ok(response) => {
            debug!(status = %response.status(), "Streaming response from Upstream");
            into_fragments(response_lines(response)).boxed()
        }
    }
}

/// Re-buffer the response body into lines without their line terminators.
///
/// Invalid UTF-8 is replaced rather than rejected, so a bad byte only spoils
/// the line it sits on.
pub fn response_lines(response: Response) -> impl Stream<Item = io::Result<String>> {
    let body = response.bytes_stream().map_err(io::Error::other);
    SplitStream::new(StreamReader::new(body).split(b'\n')).map_ok(|mut line| {
        if line.last() == Some(&b'\r') {
            line.pop();
        }
        String::from_utf8_lossy(&line).into_owned()
    })
}

#[cfg(test)]
mod tests {
    use chatmark_test_kit::sse_body;
    use pretty_assertions::assert_eq;

    use super::*;

    async fn fragments(url: &str) -> Vec<String> {
        let response = reqwest::Client::new().post(url).body("{}").send().await;
        into_message_fragments(response).collect().await
    }

    #[tokio::test]
    async fn test_streams_fragments_until_done() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/v1/chat/completions")
            .with_status(200)
            .with_header("content-type", "text/event-stream")
            .with_body(sse_body(&["Hello", " **wor", "ld**"]))
            .create_async()
            .await;

        let actual = fragments(&format!("{}/v1/chat/completions", server.url())).await;
        let expected = vec!["Hello", " **wor", "ld**"];
        assert_eq!(actual, expected);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_crlf_line_endings() {
        let mut server = mockito::Server::new_async().await;
        let body = sse_body(&["a", "b"]).replace('\n', "\r\n");
        server
            .mock("POST", "/")
            .with_status(200)
            .with_body(body)
            .create_async()
            .await;

        let actual = fragments(&server.url()).await;
        assert_eq!(actual, vec!["a", "b"]);
    }

    #[tokio::test]
    async fn test_error_status_yields_single_notice() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/")
            .with_status(401)
            .with_body(r#"{"error":"bad key"}"#)
            .create_async()
            .await;

        let actual = fragments(&server.url()).await;
        let expected = vec![r#"API请求失败: Unauthorized - {"error":"bad key"}"#.to_string()];
        assert_eq!(actual, expected);
    }

    #[test]
    fn test_status_names() {
        let fixture = [
            StatusCode::TOO_MANY_REQUESTS,
            StatusCode::INTERNAL_SERVER_ERROR,
            StatusCode::NON_AUTHORITATIVE_INFORMATION,
            StatusCode::PAYLOAD_TOO_LARGE,
            StatusCode::HTTP_VERSION_NOT_SUPPORTED,
            StatusCode::IM_A_TEAPOT,
            StatusCode::from_u16(599).unwrap(),
        ];
        let actual: Vec<_> = fixture.into_iter().map(status_name).collect();
        let expected = vec![
            "TooManyRequests",
            "InternalServerError",
            "NonAuthoritativeInformation",
            "RequestEntityTooLarge",
            "HttpVersionNotSupported",
            "418",
            "599",
        ];
        assert_eq!(actual, expected);
        assert_eq!(
            status_failure_notice(StatusCode::TOO_MANY_REQUESTS, "slow"),
            "API请求失败: TooManyRequests - slow"
        );
    }

    #[tokio::test]
    async fn test_invalid_utf8_only_spoils_its_line() {
        let mut server = mockito::Server::new_async().await;
        let mut body = b"data: {\"choices\":[{\"delta\":{\"content\":\"a\xFF\"}}]}\n\n".to_vec();
        body.extend_from_slice(sse_body(&["b"]).as_bytes());
        server
            .mock("POST", "/")
            .with_status(200)
            .with_body(body)
            .create_async()
            .await;

        let actual = fragments(&server.url()).await;
        assert_eq!(actual, vec!["a\u{FFFD}", "b"]);
    }

    #[tokio::test]
    async fn test_connection_failure_yields_single_notice() {
        let port = {
            let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap().port()
        };
        let actual = fragments(&format!("http://127.0.0.1:{port}/")).await;
        let expected = vec![NETWORK_FAILURE_NOTICE.to_string()];
        assert_eq!(actual, expected);
    }
}
