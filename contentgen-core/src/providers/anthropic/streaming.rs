//! Streaming support for Anthropic responses

use super::types::{BlockDelta, StreamEvent};
use crate::protocol::GenerateContentStream;
use crate::providers::transform::model_response;
use crate::providers::GeneratorError;
use bytes::Bytes;
use eventsource_stream::Eventsource;
use futures::{Stream, StreamExt};

/// Parse a Server-Sent Events body into response deltas.
///
/// Only `text_delta` blocks produce elements. An `error` event fails the
/// stream with the event payload as sent.
pub fn parse_stream(
    stream: impl Stream<Item = Result<Bytes, reqwest::Error>> + Send + 'static,
) -> GenerateContentStream {
    let event_stream = stream.eventsource();

    Box::pin(event_stream.filter_map(|result| async move {
        let event = match result {
            Ok(event) => event,
            Err(e) => return Some(Err(GeneratorError::from(e))),
        };

        match serde_json::from_str::<StreamEvent>(&event.data) {
            Ok(StreamEvent::ContentBlockDelta {
                delta: BlockDelta::TextDelta { text },
            }) => Some(Ok(model_response(text, None, None))),
            Ok(StreamEvent::Error) => Some(Err(GeneratorError::Stream(event.data))),
            Ok(_) => None,
            Err(e) => Some(Err(GeneratorError::from(e))),
        }
    }))
}
