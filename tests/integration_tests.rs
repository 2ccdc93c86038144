use std::time::Duration;

use alsom_probe::{
    ErrorCategory, ProbeConfig, ProbeError, ProbeRunner, Session, SUITE_SIZE,
};
use mockito::{Matcher, Server, ServerGuard};
use serde_json::json;

fn runner_for(server: &ServerGuard) -> ProbeRunner {
    let config = ProbeConfig::new()
        .with_url(format!("{}/api/chat", server.url()))
        .with_timeout(Duration::from_secs(5));

    ProbeRunner::new(config)
        .unwrap()
        .with_session(Session::from_parts("testuser_fixed", "test_fixed"))
}

#[tokio::test]
async fn test_minimal_probe_reports_reply_preview() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/api/chat")
        .match_header("content-type", "application/json")
        .match_body(Matcher::Json(json!({
            "site": "eduscrapeapp",
            "user_id": "testuser_fixed",
            "session_id": "test_fixed",
            "messages": [{"role": "user", "content": "hi"}]
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"reply":"hello"}"#)
        .create_async()
        .await;

    let runner = runner_for(&server);
    let cases = runner.test_cases();
    let result = runner.probe(&cases[0]).await;

    assert!(result.succeeded());
    assert_eq!(result.response_body().unwrap()["reply"], "hello");
    assert!(result.outcome.render().contains("Reply: hello"));

    mock.assert_async().await;
}

#[tokio::test]
async fn test_all_probes_share_session_identifiers() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/api/chat")
        .match_body(Matcher::PartialJson(json!({
            "user_id": "testuser_fixed",
            "session_id": "test_fixed"
        })))
        .with_status(200)
        .with_body(r#"{"reply":"ok","usage":{"prompt_tokens":1,"completion_tokens":1,"total_tokens":2}}"#)
        .expect(SUITE_SIZE)
        .create_async()
        .await;

    let runner = runner_for(&server);
    let mut out = Vec::new();
    let report = runner.run_with_writer(&mut out).await.unwrap();

    assert_eq!(report.total(), SUITE_SIZE);
    assert_eq!(report.passed(), SUITE_SIZE);

    let text = String::from_utf8(out).unwrap();
    assert!(text.contains("Total: 12/12 tests passed"));
    assert!(text.contains("TEST: 3. With time tool enabled"));
    assert!(text.contains("✅ PASS - With time tool ("));
    assert!(text.contains("TEST: 12. Different site name"));
    assert!(text.contains("Tokens: 1 prompt + 1 completion = 2 total"));
    assert!(text.contains("Working configurations found"));

    mock.assert_async().await;
}

#[tokio::test]
async fn test_http_error_does_not_stop_the_run() {
    let mut server = Server::new_async().await;
    let accepted = server
        .mock("POST", "/api/chat")
        .match_body(Matcher::PartialJson(json!({"site": "eduscrapeapp"})))
        .with_status(200)
        .with_body(r#"{"reply":"fine"}"#)
        .expect(SUITE_SIZE - 1)
        .create_async()
        .await;
    let rejected = server
        .mock("POST", "/api/chat")
        .match_body(Matcher::PartialJson(json!({"site": "test"})))
        .with_status(500)
        .with_body(r#"{"error":"bad request"}"#)
        .expect(1)
        .create_async()
        .await;

    let runner = runner_for(&server);
    let mut out = Vec::new();
    let report = runner.run_with_writer(&mut out).await.unwrap();

    assert_eq!(report.total(), SUITE_SIZE);
    assert_eq!(report.passed(), SUITE_SIZE - 1);

    let last = &report.results()[SUITE_SIZE - 1];
    assert!(!last.succeeded());
    match last.error() {
        Some(ProbeError::Http {
            status, details, ..
        }) => {
            assert_eq!(*status, 500);
            assert_eq!(details.as_ref().unwrap()["error"], "bad request");
        }
        other => panic!("expected HTTP error, got {:?}", other),
    }

    let text = String::from_utf8(out).unwrap();
    assert!(text.contains("❌ HTTP ERROR 500"));
    assert!(text.contains("❌ FAIL - Different site name"));
    assert!(text.contains("Total: 11/12 tests passed"));

    accepted.assert_async().await;
    rejected.assert_async().await;
}

#[tokio::test]
async fn test_connection_refused_is_a_transport_failure() {
    let config = ProbeConfig::new()
        .with_url("http://127.0.0.1:1/api/chat")
        .with_timeout(Duration::from_secs(5));
    let runner = ProbeRunner::new(config).unwrap();

    let mut out = Vec::new();
    let report = runner.run_with_writer(&mut out).await.unwrap();

    assert_eq!(report.total(), SUITE_SIZE);
    assert_eq!(report.passed(), 0);
    assert!(report
        .results()
        .iter()
        .all(|r| r.error().map(ProbeError::category) == Some(ErrorCategory::Transport)));

    let text = String::from_utf8(out).unwrap();
    assert!(text.contains("❌ URL ERROR"));
    assert!(text.contains("Total: 0/12 tests passed"));
    assert!(text.contains("No working configurations found"));
}

#[tokio::test]
async fn test_non_json_success_body_fails_the_probe() {
    let mut server = Server::new_async().await;
    server
        .mock("POST", "/api/chat")
        .with_status(200)
        .with_body("<html>maintenance</html>")
        .create_async()
        .await;

    let runner = runner_for(&server);
    let cases = runner.test_cases();
    let result = runner.probe(&cases[1]).await;

    assert!(!result.succeeded());
    assert!(matches!(result.error(), Some(ProbeError::Decode(_))));
    assert!(result.outcome.render().starts_with("\n❌ EXCEPTION"));
}

#[tokio::test]
async fn test_non_string_reply_fails_the_probe() {
    for body in [r#"{"reply":null}"#, r#"{"reply":42}"#, r#"{"reply":{"a":1}}"#] {
        let mut server = Server::new_async().await;
        server
            .mock("POST", "/api/chat")
            .with_status(200)
            .with_body(body)
            .create_async()
            .await;

        let runner = runner_for(&server);
        let cases = runner.test_cases();
        let result = runner.probe(&cases[0]).await;

        assert!(!result.succeeded(), "{}", body);
        assert_eq!(
            result.error().map(ProbeError::category),
            Some(ErrorCategory::Unexpected),
            "{}",
            body
        );
        assert!(result.outcome.render().contains("❌ EXCEPTION: reply:"));
    }
}

#[tokio::test]
async fn test_error_body_is_truncated_and_plain_text_tolerated() {
    let mut server = Server::new_async().await;
    server
        .mock("POST", "/api/chat")
        .with_status(502)
        .with_body("x".repeat(800))
        .create_async()
        .await;

    let runner = runner_for(&server);
    let cases = runner.test_cases();
    let result = runner.probe(&cases[0]).await;

    match result.error() {
        Some(ProbeError::Http {
            status,
            body,
            details,
        }) => {
            assert_eq!(*status, 502);
            assert_eq!(body.chars().count(), 500);
            assert!(details.is_none());
        }
        other => panic!("expected HTTP error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_application_error_on_success_still_passes() {
    let mut server = Server::new_async().await;
    server
        .mock("POST", "/api/chat")
        .match_body(Matcher::PartialJson(json!({"add_tools": true})))
        .with_status(200)
        .with_body(r#"{"reply":"","error":"tool details unavailable","debug":{"site":"eduscrapeapp"}}"#)
        .create_async()
        .await;

    let runner = runner_for(&server);
    let case = runner
        .test_cases()
        .into_iter()
        .find(|case| case.name == "With add_tools=true")
        .unwrap();
    let result = runner.probe(&case).await;

    assert!(result.succeeded());
    let text = result.outcome.render();
    assert!(text.contains("Error in response: tool details unavailable"));
    assert!(text.contains("Debug:"));
}

#[test]
fn test_invalid_url_is_rejected_before_any_probe() {
    let err = ProbeRunner::new(ProbeConfig::new().with_url("alsom.vercel.app/api/chat"))
        .unwrap_err();

    assert!(err.is_fatal());
    assert_eq!(err.error_code(), "CONFIG_ERROR");
}
