//! Conversion between the canonical protocol and OpenAI chat format

use super::types::*;
use crate::protocol::{
    Content, ContentEmbedding, ContentListUnion, ContentUnion, EmbedContentParameters,
    EmbedContentResponse, FinishReason, GenerateContentParameters, GenerateContentResponse,
    UsageMetadata,
};
use crate::providers::transform::{
    chat_role_name, embedding_inputs, flatten_contents, model_response, role_from_chat_name,
    system_text, ChatTurn,
};

/// Convert a canonical request to an OpenAI chat completion request
pub fn to_chat_request(request: &GenerateContentParameters, stream: bool) -> ChatCompletionRequest {
    ChatCompletionRequest {
        model: request.model.clone(),
        messages: to_chat_messages(&request.contents, request.system_instruction.as_ref()),
        temperature: request.config.temperature,
        top_p: request.config.top_p,
        max_tokens: request.config.max_output_tokens,
        stop: request.config.stop_sequences.clone(),
        stream: stream.then_some(true),
    }
}

/// Convert a content list to ordered chat messages.
///
/// A system instruction, when present, becomes the leading `system` message.
pub fn to_chat_messages(
    contents: &ContentListUnion,
    system_instruction: Option<&ContentUnion>,
) -> Vec<ChatMessage> {
    let system = system_text(system_instruction).map(|text| ChatMessage {
        role: "system".to_string(),
        content: Some(text),
    });

    let turns = flatten_contents(contents)
        .into_iter()
        .map(|turn| ChatMessage {
            role: chat_role_name(turn.role).to_string(),
            content: Some(turn.text),
        });

    system.into_iter().chain(turns).collect()
}

/// Convert a chat message back to a canonical turn
pub fn chat_message_to_content(message: ChatMessage) -> Content {
    ChatTurn::new(
        role_from_chat_name(&message.role),
        message.content.unwrap_or_default(),
    )
    .into_content()
}

/// Map an OpenAI finish reason
pub fn finish_reason(reason: &str) -> FinishReason {
    match reason {
        "stop" => FinishReason::Stop,
        "length" => FinishReason::MaxTokens,
        "content_filter" => FinishReason::Safety,
        _ => FinishReason::Other,
    }
}

fn usage_metadata(usage: ChatUsage) -> UsageMetadata {
    UsageMetadata {
        prompt_token_count: usage.prompt_tokens,
        candidates_token_count: usage.completion_tokens,
        total_token_count: usage.total_tokens,
    }
}

/// Convert an OpenAI response; only the first choice is kept
pub fn from_chat_response(response: ChatCompletionResponse) -> GenerateContentResponse {
    let (text, reason) = response
        .choices
        .into_iter()
        .next()
        .map(|choice| {
            (
                choice.message.content.unwrap_or_default(),
                choice.finish_reason.as_deref().map(finish_reason),
            )
        })
        .unwrap_or_default();

    let mut converted = model_response(text, reason, response.usage.map(usage_metadata));
    converted.model_version = response.model;
    converted.response_id = response.id;
    converted
}

/// Convert one streaming chunk.
///
/// A chunk without a choice becomes an empty-text delta when it carries
/// usage, and produces nothing otherwise.
pub fn from_chat_chunk(chunk: ChatCompletionChunk) -> Option<GenerateContentResponse> {
    let usage = chunk.usage.map(usage_metadata);
    let mut converted = match chunk.choices.into_iter().next() {
        Some(choice) => model_response(
            choice.delta.content.unwrap_or_default(),
            choice.finish_reason.as_deref().map(finish_reason),
            usage,
        ),
        None => model_response(String::new(), None, Some(usage?)),
    };
    converted.model_version = chunk.model;
    converted.response_id = chunk.id;
    Some(converted)
}

/// Convert a canonical embedding request
pub fn to_embedding_request(request: &EmbedContentParameters) -> EmbeddingRequest {
    EmbeddingRequest {
        model: request.model.clone(),
        input: embedding_inputs(&request.contents),
    }
}

/// Convert an embedding response, restoring input order by index
pub fn from_embedding_response(response: EmbeddingResponse) -> EmbedContentResponse {
    let mut data = response.data;
    data.sort_by_key(|item| item.index);

    EmbedContentResponse {
        embeddings: data
            .into_iter()
            .map(|item| ContentEmbedding {
                values: item.embedding,
            })
            .collect(),
    }
}
