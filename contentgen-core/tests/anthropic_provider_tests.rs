//! Tests for the Anthropic provider against a mocked backend

use contentgen_core::config::{Environment, SecretString};
use contentgen_core::protocol::{
    Content, CountTokensParameters, EmbedContentParameters, FinishReason,
    GenerateContentParameters, Role,
};
use contentgen_core::providers::{
    AnthropicGenerator, ContentGenerator, ContentGeneratorConfig, GeneratorError,
};
use futures::StreamExt;
use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const MODEL: &str = "claude-sonnet-4-20250514";

fn generator(server: &MockServer) -> AnthropicGenerator {
    let config = ContentGeneratorConfig::new(MODEL, "anthropic")
        .with_api_key(SecretString::new("ant-key"))
        .with_base_url(server.uri());
    AnthropicGenerator::with_env(&config, &Environment::empty()).unwrap()
}

fn event_stream(body: &'static str) -> ResponseTemplate {
    ResponseTemplate::new(200)
        .insert_header("content-type", "text/event-stream")
        .set_body_string(body)
}

#[tokio::test]
async fn test_generate_content() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/messages"))
        .and(header("x-api-key", "ant-key"))
        .and(header("anthropic-version", "2023-06-01"))
        .and(body_partial_json(json!({
            "max_tokens": 4096,
            "system": "be brief",
            "messages": [
                {"role": "user", "content": "Hello"},
                {"role": "assistant", "content": "Hi"},
                {"role": "user", "content": "Again"}
            ]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "msg_01",
            "type": "message",
            "role": "assistant",
            "model": MODEL,
            "content": [{"type": "text", "text": "Hello again"}],
            "stop_reason": "max_tokens",
            "usage": {"input_tokens": 10, "output_tokens": 3}
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let request = GenerateContentParameters::new(
        MODEL,
        vec![
            Content::system("be brief"),
            Content::user("Hello"),
            Content::model("Hi"),
            Content::user("Again"),
        ],
    );
    let response = generator(&mock_server)
        .generate_content(request)
        .await
        .unwrap();

    let candidate = &response.candidates[0];
    assert_eq!(candidate.content.role, Some(Role::Model));
    assert_eq!(candidate.content.text(), "Hello again");
    assert_eq!(candidate.finish_reason, Some(FinishReason::MaxTokens));

    let usage = response.usage_metadata.unwrap();
    assert_eq!(usage.prompt_token_count, Some(10));
    assert_eq!(usage.total_token_count, Some(13));
}

#[tokio::test]
async fn test_stream_yields_text_deltas() {
    let mock_server = MockServer::start().await;

    let body = concat!(
        "event: message_start\n",
        "data: {\"type\":\"message_start\",",
        "\"message\":{\"id\":\"msg_01\",\"usage\":{\"input_tokens\":4}}}\n\n",
        "event: content_block_start\n",
        "data: {\"type\":\"content_block_start\",\"index\":0,",
        "\"content_block\":{\"type\":\"text\",\"text\":\"\"}}\n\n",
        "event: content_block_delta\n",
        "data: {\"type\":\"content_block_delta\",\"index\":0,",
        "\"delta\":{\"type\":\"text_delta\",\"text\":\"Hel\"}}\n\n",
        "event: content_block_delta\n",
        "data: {\"type\":\"content_block_delta\",\"index\":0,",
        "\"delta\":{\"type\":\"text_delta\",\"text\":\"lo\"}}\n\n",
        "event: content_block_stop\n",
        "data: {\"type\":\"content_block_stop\",\"index\":0}\n\n",
        "event: message_delta\n",
        "data: {\"type\":\"message_delta\",\"delta\":{\"stop_reason\":\"end_turn\"},",
        "\"usage\":{\"output_tokens\":2}}\n\n",
        "event: message_stop\n",
        "data: {\"type\":\"message_stop\"}\n\n"
    );

    Mock::given(method("POST"))
        .and(path("/v1/messages"))
        .and(body_partial_json(json!({"stream": true})))
        .respond_with(event_stream(body))
        .mount(&mock_server)
        .await;

    let request = GenerateContentParameters::new(MODEL, "Hello");
    let stream = generator(&mock_server)
        .generate_content_stream(request)
        .await
        .unwrap();
    let texts: Vec<String> = stream.map(|chunk| chunk.unwrap().text()).collect().await;

    assert_eq!(texts, vec!["Hel", "lo"]);
}

#[tokio::test]
async fn test_stream_error_event_fails_the_stream() {
    let mock_server = MockServer::start().await;

    let body = concat!(
        "event: content_block_delta\n",
        "data: {\"type\":\"content_block_delta\",\"index\":0,",
        "\"delta\":{\"type\":\"text_delta\",\"text\":\"Hel\"}}\n\n",
        "event: error\n",
        "data: {\"type\":\"error\",",
        "\"error\":{\"type\":\"overloaded_error\",\"message\":\"Overloaded\"}}\n\n"
    );

    Mock::given(method("POST"))
        .and(path("/v1/messages"))
        .respond_with(event_stream(body))
        .mount(&mock_server)
        .await;

    let request = GenerateContentParameters::new(MODEL, "Hello");
    let stream = generator(&mock_server)
        .generate_content_stream(request)
        .await
        .unwrap();
    let items: Vec<_> = stream.collect().await;

    assert_eq!(items.len(), 2);
    assert_eq!(items[0].as_ref().unwrap().text(), "Hel");
    match &items[1] {
        Err(GeneratorError::Stream(payload)) => assert!(payload.contains("Overloaded")),
        other => panic!("expected stream error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_unsupported_operations_reject_without_network() {
    let mock_server = MockServer::start().await;
    let generator = generator(&mock_server);

    let count = generator
        .count_tokens(CountTokensParameters::new(MODEL, "Hello"))
        .await
        .unwrap_err();
    let embed = generator
        .embed_content(EmbedContentParameters::new(MODEL, "Hello"))
        .await
        .unwrap_err();

    assert!(count.is_not_implemented());
    assert_eq!(
        embed.to_string(),
        "embed_content is not implemented for provider anthropic"
    );
    assert!(mock_server.received_requests().await.unwrap().is_empty());
}

#[test]
fn test_missing_key_names_anthropic_variable() {
    let config = ContentGeneratorConfig::new(MODEL, "anthropic");
    let result = AnthropicGenerator::with_env(&config, &Environment::empty());
    let err = result.err().unwrap();
    assert!(err.to_string().contains("ANTHROPIC_API_KEY"));
}
