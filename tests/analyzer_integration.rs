// tests/analyzer_integration.rs
// End-to-end: Analyzer -> GeminiClient -> mock generateContent endpoint

use serde_json::json;
use std::io::Write;
use std::sync::Arc;
use std::time::Duration;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use reviewsense::config::AnalyzerConfig;
use reviewsense::eval::{evaluate, load_csv, sample};
use reviewsense::llm::GeminiClient;
use reviewsense::{Analyzer, Label};

const MODEL: &str = "gemini-test";

fn gemini_reply(text: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "candidates": [{
            "content": {"role": "model", "parts": [{"text": text}]},
            "finishReason": "STOP"
        }],
        "usageMetadata": {"promptTokenCount": 120, "candidatesTokenCount": 30, "totalTokenCount": 150}
    }))
}

fn analyzer_for(server: &MockServer, config: AnalyzerConfig) -> Analyzer {
    let client = GeminiClient::with_model("test-key".to_string(), MODEL.to_string())
        .with_base_url(server.uri())
        .with_retry(0, Duration::from_millis(1));
    Analyzer::new(Arc::new(client), config)
}

fn endpoint() -> String {
    format!("/{}:generateContent", MODEL)
}

// ============================================================================
// Single review
// ============================================================================

#[tokio::test]
async fn test_positive_review_end_to_end() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(endpoint()))
        .respond_with(gemini_reply(
            "```json\n{\"label\": \"Positive\", \"confidence\": 0.92, \"explanation\": \"Praises the acting.\", \"evidence_phrases\": [\"superb acting\"]}\n```",
        ))
        .expect(1)
        .mount(&server)
        .await;

    let analyzer = analyzer_for(&server, AnalyzerConfig::default());
    let review = "Superb film, superb acting throughout.";

    let first = analyzer.analyze(review).await;
    assert_eq!(first.label, Label::Positive);
    assert!((first.confidence - 0.92).abs() < 1e-6);
    assert_eq!(first.evidence_phrases, vec!["superb acting".to_string()]);

    // Served from cache; the mock expects exactly one request
    let second = analyzer.analyze(review).await;
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_low_confidence_becomes_neutral() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(endpoint()))
        .respond_with(gemini_reply(
            r#"{"label": "Negative", "confidence": 0.3, "explanation": "Mildly critical.", "evidence_phrases": []}"#,
        ))
        .mount(&server)
        .await;

    let result = analyzer_for(&server, AnalyzerConfig::default())
        .analyze("It was okay, a bit long.")
        .await;
    assert_eq!(result.label, Label::Neutral);
    assert!((result.confidence - 0.3).abs() < 1e-6);
}

#[tokio::test]
async fn test_unparseable_reply_falls_back() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(endpoint()))
        .respond_with(gemini_reply("I think this review is positive."))
        .expect(2)
        .mount(&server)
        .await;

    let analyzer = analyzer_for(&server, AnalyzerConfig::default());
    let result = analyzer.analyze("Loved it").await;
    assert_eq!(result.label, Label::Neutral);
    assert_eq!(result.confidence, 0.5);
    assert!(result.explanation.starts_with("Could not parse sentiment analysis response."));

    // Fallbacks are not cached, so the model is asked again
    analyzer.analyze("Loved it").await;
    assert_eq!(analyzer.cache_len().await, 0);
}

#[tokio::test]
async fn test_server_error_is_error_result() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(endpoint()))
        .respond_with(ResponseTemplate::new(500).set_body_string("internal"))
        .mount(&server)
        .await;

    let result = analyzer_for(&server, AnalyzerConfig::default())
        .analyze("Loved it")
        .await;
    assert_eq!(result.label, Label::Error);
    assert_eq!(result.confidence, 0.0);
    assert!(result.explanation.starts_with("Analysis failed"));
    assert!(result.evidence_phrases.is_empty());
}

#[tokio::test]
async fn test_transport_failure_does_not_expose_api_key() {
    let client = GeminiClient::with_model("SECRET-KEY-123".to_string(), "m".to_string())
        .with_base_url("http://127.0.0.1:1")
        .with_retry(0, Duration::from_millis(1));
    let analyzer = Analyzer::new(Arc::new(client), AnalyzerConfig::default());

    let result = analyzer.analyze("Loved it").await;
    assert_eq!(result.label, Label::Error);
    assert!(result.explanation.starts_with("Analysis failed"));
    assert!(!result.explanation.contains("SECRET-KEY-123"));
}

#[tokio::test]
async fn test_slow_server_times_out() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(endpoint()))
        .respond_with(gemini_reply("{}").set_delay(Duration::from_millis(500)))
        .mount(&server)
        .await;

    let config = AnalyzerConfig::default().with_request_timeout(Duration::from_millis(50));
    let result = analyzer_for(&server, config).analyze("Loved it").await;
    assert_eq!(result.label, Label::Error);
    assert!(result.explanation.contains("timed out"));
}

// ============================================================================
// Batch evaluation
// ============================================================================

#[tokio::test]
async fn test_eval_over_csv() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(endpoint()))
        .respond_with(gemini_reply(
            r#"{"label": "Positive", "confidence": 0.8, "explanation": "Upbeat.", "evidence_phrases": []}"#,
        ))
        .mount(&server)
        .await;

    let mut csv = tempfile::NamedTempFile::new().unwrap();
    write!(
        csv,
        "review,sentiment\nGreat fun,positive\nDreadful,negative\nWonderful cast,Positive\nFine I guess,neutral\n"
    )
    .unwrap();

    let rows = load_csv(csv.path(), "review", "sentiment").unwrap();
    let rows = sample(rows, 50, 42);
    assert_eq!(rows.len(), 4);

    let analyzer = analyzer_for(&server, AnalyzerConfig::default());
    let report = evaluate(&analyzer, &rows, "reviews.csv").await;

    assert_eq!(report.total, 4);
    assert_eq!(report.correct, 2);
    assert_eq!(report.accuracy(), 0.5);
    assert_eq!(report.matrix.get(Label::Negative, Label::Positive), 1);
    assert!(report.render().contains("Overall Accuracy: 50.00%"));
}
