//! Shared translation between canonical content and chat-completion messages
//!
//! Chat-completion backends only carry role + text. Translation therefore
//! flattens every turn to its concatenated text; non-text parts contribute
//! nothing and never fail.

use crate::protocol::{
    Candidate, Content, ContentListUnion, ContentUnion, FinishReason, GenerateContentResponse,
    Part, Role, UsageMetadata,
};

/// A turn reduced to role and flattened text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatTurn {
    pub role: Role,
    pub text: String,
}

impl ChatTurn {
    pub fn new(role: Role, text: impl Into<String>) -> Self {
        Self {
            role,
            text: text.into(),
        }
    }

    /// Back to a canonical turn with a single text part
    pub fn into_content(self) -> Content {
        Content {
            role: Some(self.role),
            parts: vec![Part::text(self.text)],
        }
    }
}

/// Normalize and flatten a request's content list
pub fn flatten_contents(contents: &ContentListUnion) -> Vec<ChatTurn> {
    contents
        .normalize()
        .iter()
        .map(|content| ChatTurn::new(content.effective_role(), content.text()))
        .collect()
}

/// Flattened text of a system instruction
pub fn system_text(instruction: Option<&ContentUnion>) -> Option<String> {
    instruction.map(|instruction| instruction.to_content().text())
}

/// Role name used by chat-completion wire formats
pub fn chat_role_name(role: Role) -> &'static str {
    match role {
        Role::User => "user",
        Role::Model => "assistant",
        Role::System => "system",
    }
}

/// Inverse of [`chat_role_name`]; unknown names read as `user`
pub fn role_from_chat_name(name: &str) -> Role {
    match name {
        "assistant" | "model" => Role::Model,
        "system" | "developer" => Role::System,
        _ => Role::User,
    }
}

/// Wrap generated text as a response with exactly one `model` candidate
pub fn model_response(
    text: String,
    finish_reason: Option<FinishReason>,
    usage: Option<UsageMetadata>,
) -> GenerateContentResponse {
    GenerateContentResponse {
        candidates: vec![Candidate {
            content: Content::model(text),
            finish_reason,
            index: Some(0),
        }],
        usage_metadata: usage,
        ..Default::default()
    }
}

/// One embedding input per normalized content, in order
pub fn embedding_inputs(contents: &ContentListUnion) -> Vec<String> {
    contents.normalize().iter().map(Content::text).collect()
}
