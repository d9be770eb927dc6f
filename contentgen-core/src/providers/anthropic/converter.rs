//! Conversion between the canonical protocol and Anthropic Messages format

use super::types::*;
use crate::protocol::{
    FinishReason, GenerateContentParameters, GenerateContentResponse, Role, UsageMetadata,
};
use crate::providers::transform::{chat_role_name, flatten_contents, model_response, system_text};

/// `max_tokens` is mandatory for Anthropic; used when the request sets none
pub const DEFAULT_MAX_TOKENS: u32 = 4096;

/// Convert a canonical request to a Messages API request.
///
/// `system` turns are lifted, together with any system instruction, into
/// the top-level `system` field, joined by a blank line.
pub fn to_messages_request(request: &GenerateContentParameters, stream: bool) -> MessagesRequest {
    let mut system_parts: Vec<String> = system_text(request.system_instruction.as_ref())
        .into_iter()
        .collect();
    let mut messages = Vec::new();
    let config = &request.config;

    for turn in flatten_contents(&request.contents) {
        match turn.role {
            Role::System => system_parts.push(turn.text),
            role => messages.push(AnthropicMessage {
                role: chat_role_name(role).to_string(),
                content: turn.text,
            }),
        }
    }

    MessagesRequest {
        model: request.model.clone(),
        max_tokens: config.max_output_tokens.unwrap_or(DEFAULT_MAX_TOKENS),
        messages,
        system: (!system_parts.is_empty()).then(|| system_parts.join("\n\n")),
        temperature: config.temperature,
        top_p: config.top_p,
        stop_sequences: config.stop_sequences.clone(),
        stream: stream.then_some(true),
    }
}

/// Map an Anthropic stop reason
pub fn finish_reason(reason: &str) -> FinishReason {
    match reason {
        "end_turn" | "stop_sequence" => FinishReason::Stop,
        "max_tokens" => FinishReason::MaxTokens,
        "refusal" => FinishReason::Safety,
        _ => FinishReason::Other,
    }
}

fn usage_metadata(usage: AnthropicUsage) -> UsageMetadata {
    let total = match (usage.input_tokens, usage.output_tokens) {
        (None, None) => None,
        (input, output) => Some(input.unwrap_or(0) + output.unwrap_or(0)),
    };

    UsageMetadata {
        prompt_token_count: usage.input_tokens,
        candidates_token_count: usage.output_tokens,
        total_token_count: total,
    }
}

/// Convert a Messages API response; text blocks are concatenated in order
pub fn from_messages_response(response: MessagesResponse) -> GenerateContentResponse {
    let text: String = response
        .content
        .iter()
        .filter(|block| block.block_type == "text")
        .filter_map(|block| block.text.as_deref())
        .collect();

    let mut converted = model_response(
        text,
        response.stop_reason.as_deref().map(finish_reason),
        response.usage.map(usage_metadata),
    );
    converted.model_version = response.model;
    converted.response_id = response.id;
    converted
}
