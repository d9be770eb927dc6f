//! Core protocol types for content generation
//!
//! These structures are the provider-agnostic request/response model every
//! adapter translates to and from. They serialize in camelCase so that the
//! primary backend (Gemini) can consume and produce them without translation.
//! The design prioritizes:
//! - Type safety through enums and strong typing
//! - Forward compatibility through optional fields and a preserved extra map
//! - Streaming support through the same response shape per delta

use futures::Stream;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::pin::Pin;

use crate::providers::GeneratorResult;

/// Role of a turn in the conversation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// End-user input
    User,
    /// Model output (chat-style backends call this `assistant`)
    #[serde(alias = "assistant")]
    Model,
    /// System instructions
    System,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Model => "model",
            Role::System => "system",
        }
    }
}

/// Inline binary payload (base64 encoded)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Blob {
    pub mime_type: String,
    pub data: String,
}

/// Reference to an uploaded file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileData {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,
    pub file_uri: String,
}

/// Function call requested by the model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionCall {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub args: Value,
}

/// Result of a function call, sent back to the model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub response: Value,
}

/// One atomic fragment of a turn.
///
/// Exactly one of the payload fields is expected to be set. Only `text`
/// survives translation to chat-completion backends; every other payload
/// reads as empty text there.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Part {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,

    /// Marks reasoning output
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thought: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub inline_data: Option<Blob>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_data: Option<FileData>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub function_call: Option<FunctionCall>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub function_response: Option<FunctionResponse>,

    /// Backend fields this model does not name, kept for pass-through
    #[serde(flatten, default)]
    pub extra: Map<String, Value>,
}

impl Part {
    /// Create a text part
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            ..Default::default()
        }
    }

    /// Visible text of this part.
    ///
    /// Non-text parts and model thoughts read as `""`.
    pub fn as_text(&self) -> &str {
        if self.is_thought() {
            return "";
        }
        self.text.as_deref().unwrap_or("")
    }

    pub fn is_thought(&self) -> bool {
        self.thought == Some(true)
    }
}

/// One role-tagged unit of conversation content
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Content {
    /// Absent roles are read as `user`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,

    #[serde(default)]
    pub parts: Vec<Part>,
}

impl Content {
    /// Create a turn with a single text part
    pub fn new(role: Role, text: impl Into<String>) -> Self {
        Self {
            role: Some(role),
            parts: vec![Part::text(text)],
        }
    }

    pub fn user(text: impl Into<String>) -> Self {
        Self::new(Role::User, text)
    }

    pub fn model(text: impl Into<String>) -> Self {
        Self::new(Role::Model, text)
    }

    pub fn system(text: impl Into<String>) -> Self {
        Self::new(Role::System, text)
    }

    /// Role of this turn, defaulting to `user`
    pub fn effective_role(&self) -> Role {
        self.role.unwrap_or(Role::User)
    }

    /// Concatenated text of every part, in order, with no separator
    pub fn text(&self) -> String {
        self.parts.iter().map(Part::as_text).collect()
    }
}

/// A single turn in convenience form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ContentUnion {
    /// Shorthand for one `user` turn with one text part
    Text(String),
    Content(Content),
}

impl ContentUnion {
    /// Expand into a full turn; role-less turns become `user`
    pub fn to_content(&self) -> Content {
        match self {
            ContentUnion::Text(text) => Content::user(text.clone()),
            ContentUnion::Content(content) => Content {
                role: Some(content.effective_role()),
                parts: content.parts.clone(),
            },
        }
    }
}

impl From<&str> for ContentUnion {
    fn from(value: &str) -> Self {
        ContentUnion::Text(value.to_string())
    }
}

impl From<String> for ContentUnion {
    fn from(value: String) -> Self {
        ContentUnion::Text(value)
    }
}

impl From<Content> for ContentUnion {
    fn from(value: Content) -> Self {
        ContentUnion::Content(value)
    }
}

/// The content list of a request in any accepted convenience form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ContentListUnion {
    Text(String),
    Items(Vec<ContentUnion>),
    Content(Content),
}

impl ContentListUnion {
    /// Normalize to an ordered list of fully-formed turns
    pub fn normalize(&self) -> Vec<Content> {
        match self {
            ContentListUnion::Text(text) => vec![Content::user(text.clone())],
            ContentListUnion::Content(content) => {
                vec![ContentUnion::Content(content.clone()).to_content()]
            }
            ContentListUnion::Items(items) => items.iter().map(ContentUnion::to_content).collect(),
        }
    }
}

impl From<&str> for ContentListUnion {
    fn from(value: &str) -> Self {
        ContentListUnion::Text(value.to_string())
    }
}

impl From<String> for ContentListUnion {
    fn from(value: String) -> Self {
        ContentListUnion::Text(value)
    }
}

impl From<Content> for ContentListUnion {
    fn from(value: Content) -> Self {
        ContentListUnion::Content(value)
    }
}

impl From<Vec<Content>> for ContentListUnion {
    fn from(value: Vec<Content>) -> Self {
        ContentListUnion::Items(value.into_iter().map(ContentUnion::Content).collect())
    }
}

impl From<Vec<ContentUnion>> for ContentListUnion {
    fn from(value: Vec<ContentUnion>) -> Self {
        ContentListUnion::Items(value)
    }
}

impl From<Vec<&str>> for ContentListUnion {
    fn from(value: Vec<&str>) -> Self {
        ContentListUnion::Items(value.into_iter().map(ContentUnion::from).collect())
    }
}

/// Sampling and length options
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    /// Sampling temperature (typically 0.0 to 2.0)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,

    /// Nucleus sampling parameter (0.0 to 1.0)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_p: Option<f32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_k: Option<u32>,

    /// Maximum tokens to generate; the default is provider-specific
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_output_tokens: Option<u32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub candidate_count: Option<u32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub stop_sequences: Option<Vec<String>>,
}

impl GenerationConfig {
    /// True when no option is set
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Content generation request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentParameters {
    /// Target model identifier
    pub model: String,

    pub contents: ContentListUnion,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub system_instruction: Option<ContentUnion>,

    #[serde(default, skip_serializing_if = "GenerationConfig::is_empty")]
    pub config: GenerationConfig,
}

impl GenerateContentParameters {
    pub fn new(model: impl Into<String>, contents: impl Into<ContentListUnion>) -> Self {
        Self {
            model: model.into(),
            contents: contents.into(),
            system_instruction: None,
            config: GenerationConfig::default(),
        }
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.config.temperature = Some(temperature);
        self
    }

    pub fn with_top_p(mut self, top_p: f32) -> Self {
        self.config.top_p = Some(top_p);
        self
    }

    pub fn with_max_output_tokens(mut self, max_output_tokens: u32) -> Self {
        self.config.max_output_tokens = Some(max_output_tokens);
        self
    }

    pub fn with_stop_sequences(mut self, stop: Vec<String>) -> Self {
        self.config.stop_sequences = Some(stop);
        self
    }

    pub fn with_system_instruction(mut self, instruction: impl Into<ContentUnion>) -> Self {
        self.system_instruction = Some(instruction.into());
        self
    }
}

/// Why a candidate stopped generating
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FinishReason {
    Stop,
    MaxTokens,
    Safety,
    Recitation,
    #[serde(other)]
    Other,
}

/// One generated alternative
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    #[serde(default)]
    pub content: Content,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub finish_reason: Option<FinishReason>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub index: Option<u32>,
}

/// Token counters as reported by the backend
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageMetadata {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prompt_token_count: Option<u32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub candidates_token_count: Option<u32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_token_count: Option<u32>,
}

/// Complete response, or one incremental delta when streaming
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub usage_metadata: Option<UsageMetadata>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub model_version: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_id: Option<String>,
}

impl GenerateContentResponse {
    /// Text of the first candidate, empty when there is none
    pub fn text(&self) -> String {
        self.candidates
            .first()
            .map(|candidate| candidate.content.text())
            .unwrap_or_default()
    }
}

/// Token counting request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CountTokensParameters {
    pub model: String,
    pub contents: ContentListUnion,
}

impl CountTokensParameters {
    pub fn new(model: impl Into<String>, contents: impl Into<ContentListUnion>) -> Self {
        Self {
            model: model.into(),
            contents: contents.into(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CountTokensResponse {
    #[serde(default)]
    pub total_tokens: u32,
}

/// Embedding request: one vector is produced per normalized content
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmbedContentParameters {
    pub model: String,
    pub contents: ContentListUnion,
}

impl EmbedContentParameters {
    pub fn new(model: impl Into<String>, contents: impl Into<ContentListUnion>) -> Self {
        Self {
            model: model.into(),
            contents: contents.into(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContentEmbedding {
    #[serde(default)]
    pub values: Vec<f32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EmbedContentResponse {
    #[serde(default)]
    pub embeddings: Vec<ContentEmbedding>,
}

/// Forward-only, single-pass sequence of response deltas
pub type GenerateContentStream =
    Pin<Box<dyn Stream<Item = GeneratorResult<GenerateContentResponse>> + Send>>;

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_bare_string_normalizes_to_user_turn() {
        let contents = ContentListUnion::from("hello").normalize();
        assert_eq!(contents, vec![Content::user("hello")]);
    }

    #[test]
    fn test_missing_role_defaults_to_user() {
        let list: ContentListUnion =
            serde_json::from_value(json!([{ "parts": [{ "text": "hi" }] }, "there"])).unwrap();
        let contents = list.normalize();
        assert_eq!(contents.len(), 2);
        assert!(contents.iter().all(|c| c.role == Some(Role::User)));
        assert_eq!(contents[1].text(), "there");
    }

    #[test]
    fn test_text_concatenates_without_separator() {
        let content = Content {
            role: Some(Role::Model),
            parts: vec![Part::text("Hel"), Part::default(), Part::text("lo")],
        };
        assert_eq!(content.text(), "Hello");
    }

    #[test]
    fn test_thoughts_are_not_visible_text() {
        let thought = Part {
            text: Some("planning the answer".to_string()),
            thought: Some(true),
            ..Default::default()
        };
        assert_eq!(thought.as_text(), "");

        let response = GenerateContentResponse {
            candidates: vec![Candidate {
                content: Content {
                    role: Some(Role::Model),
                    parts: vec![thought, Part::text("42")],
                },
                ..Default::default()
            }],
            ..Default::default()
        };
        assert_eq!(response.text(), "42");
    }

    #[test]
    fn test_explicit_non_thought_keeps_text() {
        let part = Part {
            text: Some("visible".to_string()),
            thought: Some(false),
            ..Default::default()
        };
        assert_eq!(part.as_text(), "visible");
    }

    #[test]
    fn test_assistant_alias_reads_as_model() {
        let content: Content =
            serde_json::from_value(json!({ "role": "assistant", "parts": [] })).unwrap();
        assert_eq!(content.role, Some(Role::Model));
    }

    #[test]
    fn test_unknown_part_fields_survive() {
        let value = json!({ "text": "x", "thoughtSignature": "abc" });
        let part: Part = serde_json::from_value(value.clone()).unwrap();
        assert_eq!(part.extra.get("thoughtSignature"), Some(&json!("abc")));
        assert_eq!(serde_json::to_value(&part).unwrap(), value);
    }

    #[test]
    fn test_unknown_finish_reason_is_other() {
        let candidate: Candidate =
            serde_json::from_value(json!({ "finishReason": "BLOCKLIST" })).unwrap();
        assert_eq!(candidate.finish_reason, Some(FinishReason::Other));
    }

    #[test]
    fn test_empty_generation_config_is_skipped() {
        let request = GenerateContentParameters::new("m", "hi");
        let value = serde_json::to_value(&request).unwrap();
        assert!(value.get("config").is_none());
    }
}
