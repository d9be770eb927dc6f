//! Request envelopes for the Gemini REST API
//!
//! Only the envelopes live here; the payloads are the canonical protocol
//! structures, serialized as-is.

use crate::protocol::{
    Content, ContentEmbedding, EmbedContentResponse, GenerateContentParameters, GenerationConfig,
};
use serde::{Deserialize, Serialize};

/// Body of `generateContent` and `streamGenerateContent`
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentBody<'a> {
    pub contents: Vec<Content>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub system_instruction: Option<Content>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub generation_config: Option<&'a GenerationConfig>,
}

impl<'a> GenerateContentBody<'a> {
    pub fn from_request(request: &'a GenerateContentParameters) -> Self {
        Self {
            contents: request.contents.normalize(),
            system_instruction: request.system_instruction.as_ref().map(|s| s.to_content()),
            generation_config: (!request.config.is_empty()).then_some(&request.config),
        }
    }
}

/// Body of `countTokens`
#[derive(Debug, Serialize)]
pub struct CountTokensBody {
    pub contents: Vec<Content>,
}

/// Body of `batchEmbedContents`
#[derive(Debug, Serialize)]
pub struct BatchEmbedBody {
    pub requests: Vec<EmbedRequestItem>,
}

#[derive(Debug, Serialize)]
pub struct EmbedRequestItem {
    /// Fully qualified, `models/<id>`
    pub model: String,
    pub content: Content,
}

/// Body of the Vertex `predict` embeddings call
#[derive(Debug, Serialize)]
pub struct PredictBody {
    pub instances: Vec<PredictInstance>,
}

#[derive(Debug, Serialize)]
pub struct PredictInstance {
    pub content: String,
}

#[derive(Debug, Deserialize)]
pub struct PredictResponse {
    #[serde(default)]
    pub predictions: Vec<Prediction>,
}

#[derive(Debug, Deserialize)]
pub struct Prediction {
    pub embeddings: ContentEmbedding,
}

impl From<PredictResponse> for EmbedContentResponse {
    fn from(response: PredictResponse) -> Self {
        EmbedContentResponse {
            embeddings: response
                .predictions
                .into_iter()
                .map(|p| p.embeddings)
                .collect(),
        }
    }
}
