//! Streaming support for Gemini responses

use crate::protocol::{GenerateContentResponse, GenerateContentStream};
use crate::providers::GeneratorError;
use bytes::Bytes;
use eventsource_stream::Eventsource;
use futures::{Stream, StreamExt};

/// Parse an `alt=sse` body; every event already is a canonical response delta
pub fn parse_stream(
    stream: impl Stream<Item = Result<Bytes, reqwest::Error>> + Send + 'static,
) -> GenerateContentStream {
    Box::pin(stream.eventsource().filter_map(|result| async move {
        match result {
            Ok(event) if event.data.trim().is_empty() => None,
            Ok(event) => {
                let parsed = serde_json::from_str::<GenerateContentResponse>(&event.data);
                Some(parsed.map_err(GeneratorError::from))
            }
            Err(e) => Some(Err(GeneratorError::from(e))),
        }
    }))
}
