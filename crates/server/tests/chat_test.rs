//! # Chat Endpoint Tests
//!
//! Drives `POST /chat` end to end: the chat and embedding endpoints are mocked
//! with `httpmock`, and pages are served from an in-memory store.

mod common;

use anyhow::Result;
use common::{TestApp, CHAT_PATH, EMBEDDINGS_PATH};
use dhonkbot::{intents::intent_response, Document};
use dhonkbot_server::types::ChatResponse;
use httpmock::Method;
use reqwest::StatusCode;
use serde_json::json;

const INDIGO_PAGE: &str = "Each kurti is dyed with natural indigo. Dyeing takes two days. \
                           Kurtis are sold in three sizes.";

fn completion(content: &str) -> serde_json::Value {
    json!({"choices": [{"message": {"role": "assistant", "content": content}}]})
}

#[tokio::test]
async fn test_empty_message_is_rejected_without_external_calls() -> Result<()> {
    let app = TestApp::spawn(vec![Document::new("Dyes", None, INDIGO_PAGE)]).await?;
    let chat_mock = app.mock_server.mock(|when, then| {
        when.method(Method::POST).path(CHAT_PATH);
        then.status(200).json_body(completion("unused"));
    });
    let embedding_mock = app.mock_server.mock(|when, then| {
        when.method(Method::POST).path(EMBEDDINGS_PATH);
        then.status(200).json_body(json!({"data": [{"embedding": [1.0]}]}));
    });

    for body in [json!({"message": "   "}), json!({"message": ""}), json!({})] {
        let response = app.post_chat(body).await?;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body: ChatResponse = response.json().await?;
        assert_eq!(body.answer, "❌ Please type something.");
    }

    assert_eq!(chat_mock.hits(), 0);
    assert_eq!(embedding_mock.hits(), 0);
    assert!(app.store.get_fetches().is_empty());
    Ok(())
}

#[tokio::test]
async fn test_intent_is_answered_locally() -> Result<()> {
    let app = TestApp::spawn(vec![Document::new("Dyes", None, INDIGO_PAGE)]).await?;
    let chat_mock = app.mock_server.mock(|when, then| {
        when.method(Method::POST).path(CHAT_PATH);
        then.status(200).json_body(completion("unused"));
    });

    let response = app
        .post_chat(json!({"message": "What is your address?"}))
        .await?;

    assert_eq!(response.status(), StatusCode::OK);
    let body: ChatResponse = response.json().await?;
    assert_eq!(body.answer, intent_response("address").unwrap());
    assert_eq!(chat_mock.hits(), 0);
    assert!(app.store.get_fetches().is_empty());
    Ok(())
}

#[tokio::test]
async fn test_contact_lookup_returns_gm_details() -> Result<()> {
    let app = TestApp::spawn(Vec::new()).await?;

    let response = app
        .post_chat(json!({"message": "Who is the General Manager?"}))
        .await?;

    let body: ChatResponse = response.json().await?;
    assert_eq!(
        body.answer,
        "👨‍💼 GM: Mr. Maan Singh\n📧 mansinghr4@gmail.com\n📞 9829854896"
    );
    Ok(())
}

#[tokio::test]
async fn test_search_hit_returns_excerpt_and_link() -> Result<()> {
    let app = TestApp::spawn(vec![Document::new(
        "Natural dyes",
        Some("https://dhonk.com/dyes"),
        INDIGO_PAGE,
    )])
    .await?;
    let query_mock = app.mock_server.mock(|when, then| {
        when.method(Method::POST)
            .path(EMBEDDINGS_PATH)
            .body_contains("indigo dye made");
        then.status(200)
            .json_body(json!({"data": [{"embedding": [1.0, 0.0]}]}));
    });
    let page_mock = app.mock_server.mock(|when, then| {
        when.method(Method::POST)
            .path(EMBEDDINGS_PATH)
            .body_contains("Each kurti");
        then.status(200)
            .json_body(json!({"data": [{"embedding": [0.9, 0.1]}]}));
    });
    let chat_mock = app.mock_server.mock(|when, then| {
        when.method(Method::POST).path(CHAT_PATH);
        then.status(200).json_body(completion("unused"));
    });

    let response = app
        .post_chat(json!({"message": "how is the indigo dye made"}))
        .await?;

    assert_eq!(response.status(), StatusCode::OK);
    let body: ChatResponse = response.json().await?;
    assert!(body.answer.starts_with("Each kurti is dyed with natural indigo."));
    assert!(body
        .answer
        .ends_with("\n\n🔗 [More Info](https://dhonk.com/dyes)"));
    query_mock.assert();
    page_mock.assert();
    assert_eq!(chat_mock.hits(), 0);
    assert_eq!(app.store.get_fetches(), vec![20]);
    Ok(())
}

#[tokio::test]
async fn test_generative_fallback_returns_model_text() -> Result<()> {
    let app = TestApp::spawn(Vec::new()).await?;
    let chat_mock = app.mock_server.mock(|when, then| {
        when.method(Method::POST)
            .path(CHAT_PATH)
            .json_body_partial(r#"{"model": "mock-chat-model", "temperature": 0.6}"#)
            .body_contains("Can I pay by card?");
        then.status(200)
            .json_body(completion("We accept UPI and all major cards."));
    });

    let response = app
        .post_chat(json!({"message": "  Can I pay by card?  "}))
        .await?;

    assert_eq!(response.status(), StatusCode::OK);
    let body: ChatResponse = response.json().await?;
    assert_eq!(body.answer, "We accept UPI and all major cards.");
    chat_mock.assert();
    Ok(())
}

#[tokio::test]
async fn test_generative_failure_is_reported_as_server_error() -> Result<()> {
    let app = TestApp::spawn(Vec::new()).await?;
    app.mock_server.mock(|when, then| {
        when.method(Method::POST).path(CHAT_PATH);
        then.status(500).body("quota exceeded");
    });

    let response = app
        .post_chat(json!({"message": "Can I pay by card?"}))
        .await?;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: ChatResponse = response.json().await?;
    assert!(body.answer.starts_with("❌ OpenAI Error: "));
    assert!(body.answer.contains("quota exceeded"));
    Ok(())
}
