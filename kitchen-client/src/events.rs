//! `stateChanged` event subscription
//!
//! Consumes the server's SSE stream and yields one unit per change event.
//! The events carry no payload; treat each as a hint to refetch whatever
//! views the application displays.

use futures::{Stream, StreamExt};

use crate::{ClientConfig, ClientResult};

const STATE_CHANGED: &str = "stateChanged";

fn frame_is_state_changed(frame: &str) -> bool {
    frame
        .lines()
        .any(|line| matches!(line.strip_prefix("event:"), Some(name) if name.trim() == STATE_CHANGED))
}

/// Open the SSE stream at `GET /api/events`
///
/// The returned stream ends when the connection drops; callers reconnect
/// with their own backoff.
pub async fn subscribe(config: &ClientConfig) -> ClientResult<impl Stream<Item = ()>> {
    // no request timeout, the stream stays open indefinitely
    let client = reqwest::Client::builder().build()?;
    let response = client
        .get(format!(
            "{}/api/events",
            config.base_url.trim_end_matches('/')
        ))
        .header(reqwest::header::ACCEPT, "text/event-stream")
        .send()
        .await?
        .error_for_status()?;

    let chunks = response.bytes_stream();
    let stream = futures::stream::unfold(
        (chunks, String::new()),
        |(mut chunks, mut buffer)| async move {
            loop {
                // frames are separated by a blank line
                if let Some(end) = buffer.find("\n\n") {
                    let frame: String = buffer.drain(..end + 2).collect();
                    if frame_is_state_changed(&frame) {
                        return Some(((), (chunks, buffer)));
                    }
                    continue;
                }
                match chunks.next().await {
                    Some(Ok(chunk)) => buffer.push_str(&String::from_utf8_lossy(&chunk)),
                    Some(Err(_)) | None => return None,
                }
            }
        },
    );
    Ok(stream)
}
