//! Streaming support for OpenAI-compatible responses

use super::converter::from_chat_chunk;
use super::types::ChatCompletionChunk;
use crate::protocol::GenerateContentStream;
use crate::providers::GeneratorError;
use bytes::Bytes;
use eventsource_stream::Eventsource;
use futures::{Stream, StreamExt};

/// Parse a Server-Sent Events body into response deltas
pub fn parse_stream(
    stream: impl Stream<Item = Result<Bytes, reqwest::Error>> + Send + 'static,
) -> GenerateContentStream {
    let event_stream = stream.eventsource();

    Box::pin(event_stream.filter_map(|result| async move {
        match result {
            Ok(event) => {
                // The last message is "data: [DONE]"
                if event.data == "[DONE]" {
                    return None;
                }

                match serde_json::from_str::<ChatCompletionChunk>(&event.data) {
                    Ok(chunk) => from_chat_chunk(chunk).map(Ok),
                    Err(e) => Some(Err(GeneratorError::from(e))),
                }
            }
            Err(e) => Some(Err(GeneratorError::from(e))),
        }
    }))
}
