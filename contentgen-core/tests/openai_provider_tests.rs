//! Tests for the OpenAI provider against a mocked backend

use contentgen_core::config::{Environment, SecretString};
use contentgen_core::protocol::{
    Content, CountTokensParameters, EmbedContentParameters, FinishReason,
    GenerateContentParameters, Role,
};
use contentgen_core::providers::{
    ContentGenerator, ContentGeneratorConfig, GeneratorError, OpenAiGenerator,
};
use futures::StreamExt;
use serde_json::json;
use std::io;
use std::sync::{Arc, Mutex};
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn generator(server: &MockServer) -> OpenAiGenerator {
    let config = ContentGeneratorConfig::new("gpt-4o", "openai")
        .with_api_key(SecretString::new("test-key"))
        .with_base_url(server.uri());
    OpenAiGenerator::with_env(&config, &Environment::empty()).unwrap()
}

#[tokio::test]
async fn test_generate_content() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(header("Authorization", "Bearer test-key"))
        .and(body_partial_json(json!({
            "model": "gpt-4o",
            "messages": [
                {"role": "system", "content": "be brief"},
                {"role": "user", "content": "Hello"}
            ],
            "temperature": 0.5
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "chatcmpl-123",
            "model": "gpt-4o",
            "choices": [{
                "index": 0,
                "message": {"role": "assistant", "content": "Hi there"},
                "finish_reason": "stop"
            }],
            "usage": {"prompt_tokens": 5, "completion_tokens": 2, "total_tokens": 7}
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let request = GenerateContentParameters::new("gpt-4o", "Hello")
        .with_system_instruction("be brief")
        .with_temperature(0.5);
    let response = generator(&mock_server)
        .generate_content(request)
        .await
        .unwrap();

    assert_eq!(response.candidates.len(), 1);
    let candidate = &response.candidates[0];
    assert_eq!(candidate.content.role, Some(Role::Model));
    assert_eq!(candidate.content.text(), "Hi there");
    assert_eq!(candidate.finish_reason, Some(FinishReason::Stop));
    assert_eq!(response.usage_metadata.unwrap().total_token_count, Some(7));
}

#[tokio::test]
async fn test_generate_content_without_choices_is_empty_text() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"choices": []})))
        .mount(&mock_server)
        .await;

    let request = GenerateContentParameters::new("gpt-4o", "Hello");
    let response = generator(&mock_server)
        .generate_content(request)
        .await
        .unwrap();

    assert_eq!(response.candidates.len(), 1);
    assert_eq!(response.text(), "");
}

#[tokio::test]
async fn test_stream_yields_deltas_not_cumulative_text() {
    let mock_server = MockServer::start().await;

    let body = concat!(
        "data: {\"choices\":[{\"index\":0,",
        "\"delta\":{\"role\":\"assistant\",\"content\":\"Hel\"}}]}\n\n",
        "data: {\"choices\":[{\"index\":0,",
        "\"delta\":{\"content\":\"lo\"},\"finish_reason\":\"stop\"}]}\n\n",
        "data: [DONE]\n\n"
    );

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(body_partial_json(json!({"stream": true})))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-type", "text/event-stream")
                .set_body_string(body),
        )
        .mount(&mock_server)
        .await;

    let request = GenerateContentParameters::new("gpt-4o", "Hello");
    let stream = generator(&mock_server)
        .generate_content_stream(request)
        .await
        .unwrap();
    let texts: Vec<String> = stream.map(|chunk| chunk.unwrap().text()).collect().await;

    assert_eq!(texts, vec!["Hel", "lo"]);
}

#[tokio::test]
async fn test_embeddings_keep_input_order() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/embeddings"))
        .and(body_partial_json(json!({"input": ["a", "b", "c"]})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [
                {"index": 2, "embedding": [3.0]},
                {"index": 0, "embedding": [1.0]},
                {"index": 1, "embedding": [2.0]}
            ]
        })))
        .mount(&mock_server)
        .await;

    let request = EmbedContentParameters::new(
        "text-embedding-3-small",
        vec![Content::user("a"), Content::user("b"), Content::user("c")],
    );
    let response = generator(&mock_server)
        .embed_content(request)
        .await
        .unwrap();

    let firsts: Vec<f32> = response.embeddings.iter().map(|e| e.values[0]).collect();
    assert_eq!(firsts, vec![1.0, 2.0, 3.0]);
}

#[tokio::test]
async fn test_count_tokens_is_not_implemented_without_network() {
    let mock_server = MockServer::start().await;

    let request = CountTokensParameters::new("gpt-4o", "Hello");
    let err = generator(&mock_server)
        .count_tokens(request)
        .await
        .unwrap_err();

    assert!(err.is_not_implemented());
    assert_eq!(
        err.to_string(),
        "count_tokens is not implemented for provider openai"
    );
    assert!(mock_server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_backend_error_body_is_kept_verbatim() {
    let mock_server = MockServer::start().await;
    let body = r#"{"error":{"message":"Incorrect API key provided"}}"#;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(401).set_body_string(body))
        .mount(&mock_server)
        .await;

    let request = GenerateContentParameters::new("gpt-4o", "Hello");
    let err = generator(&mock_server)
        .generate_content(request)
        .await
        .unwrap_err();

    match err {
        GeneratorError::Api {
            provider,
            status,
            body: returned,
        } => {
            assert_eq!(provider, "openai");
            assert_eq!(status, 401);
            assert_eq!(returned, body);
        }
        other => panic!("expected Api error, got {other:?}"),
    }
}

#[test]
fn test_base_url_from_environment() {
    let environment = Environment::from_pairs([
        ("OPENAI_API_KEY", "env-key"),
        ("OPENAI_BASE_URL", "http://localhost:1234/v1"),
    ]);
    let config = ContentGeneratorConfig::new("gpt-4o", "openai");
    assert!(OpenAiGenerator::with_env(&config, &environment).is_ok());
}

/// Shared buffer the fmt subscriber writes into
#[derive(Clone, Default)]
struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

impl CapturedLogs {
    fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl io::Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[tokio::test]
async fn test_request_flow_is_logged_with_redacted_key() {
    let logs = CapturedLogs::default();
    let writer = logs.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_ansi(false)
        .with_writer(move || writer.clone())
        .finish();
    let _guard = tracing::subscriber::set_default(subscriber);

    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "choices": [{
                "index": 0,
                "message": {"role": "assistant", "content": "ok"},
                "finish_reason": "stop"
            }]
        })))
        .mount(&mock_server)
        .await;

    let config = ContentGeneratorConfig::new("gpt-4o", "openai")
        .with_api_key(SecretString::new("sk-test-1234567890"))
        .with_base_url(mock_server.uri());
    let generator = OpenAiGenerator::with_env(&config, &Environment::empty()).unwrap();
    let request = GenerateContentParameters::new("gpt-4o", "Hello");
    generator.generate_content(request).await.unwrap();

    let output = logs.contents();
    assert!(output.contains("created chat completions client"));
    assert!(output.contains("api_key=sk-...7890"));
    assert!(output.contains("chat completion finished"));
    assert!(output.contains("request_id="));
    assert!(!output.contains("sk-test-1234567890"));
}
