//! End-to-end relay behaviour over real HTTP against `wiremock` servers.

use std::sync::Arc;

use relay::{
    DeliveryError, DeliveryResult, EventHandler, FieldMapping, HandlerError, HttpClient, Notifier,
    RelayConfig, SubmissionEvent, TelegramConfig, WebhookSender, WebhookUrl,
};
use serde_json::json;
use transport::ReqwestHttpClient;
use wiremock::matchers::{body_json, body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client() -> Arc<dyn HttpClient> {
    Arc::new(ReqwestHttpClient::new().expect("client builds"))
}

fn webhook_url(server: &MockServer) -> WebhookUrl {
    WebhookUrl::parse(&format!("{}/webhook", server.uri())).unwrap()
}

fn submission() -> SubmissionEvent {
    SubmissionEvent::from_pairs([
        ("매장 선택", vec!["A/B 매장"]),
        ("차량번호", vec!["  12가3456  "]),
    ])
}

fn handler(client: Arc<dyn HttpClient>, webhook: WebhookUrl, bot: Option<&MockServer>) -> EventHandler {
    let telegram = bot.map(|server| {
        TelegramConfig::new(
            relay::BotToken::new("123:abc").unwrap(),
            relay::ChatId::new("42").unwrap(),
        )
        .with_api_base(server.uri())
    });
    EventHandler::new(
        FieldMapping::default(),
        WebhookSender::new(client.clone(), webhook),
        Notifier::new(client, telegram),
    )
}

#[tokio::test]
async fn post_returns_status_and_body_for_any_status() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/webhook"))
        .and(header("Content-Type", "application/json"))
        .respond_with(ResponseTemplate::new(418).set_body_string("teapot"))
        .mount(&server)
        .await;

    let response = client()
        .post(
            &format!("{}/webhook", server.uri()),
            &[("Content-Type", "application/json")],
            "{}".into(),
        )
        .await
        .unwrap();

    assert_eq!(response.status, 418);
    assert_eq!(response.body, "teapot");
}

#[tokio::test]
async fn unreachable_host_is_a_transport_error() {
    let server = MockServer::start().await;
    let url = format!("{}/webhook", server.uri());
    drop(server);

    let err = client().get(&url).await.unwrap_err();
    assert!(matches!(err, relay::TransportError::Request { .. }));
}

#[tokio::test]
async fn webhook_credentials_stay_out_of_errors_and_notifications() {
    let webhook = MockServer::start().await;
    let url = WebhookUrl::parse(&format!(
        "{}/webhook",
        webhook.uri().replacen("http://", "http://relay:s3cret@", 1)
    ))
    .unwrap();
    drop(webhook);
    let bot = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/bot123:abc/sendMessage"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": true})))
        .expect(1)
        .mount(&bot)
        .await;

    let err = handler(client(), url, Some(&bot))
        .handle(&submission())
        .await
        .unwrap_err();

    assert!(matches!(err, HandlerError::Delivery(_)));
    assert!(!err.to_string().contains("s3cret"));
    let sent = bot.received_requests().await.unwrap();
    let text = String::from_utf8_lossy(&sent[0].body);
    assert!(text.contains("웹훅 전송 실패"));
    assert!(!text.contains("s3cret"));
}

#[tokio::test]
async fn webhook_200_with_json_is_delivered() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/webhook"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": true})))
        .expect(1)
        .mount(&server)
        .await;

    let sender = WebhookSender::new(client(), webhook_url(&server));
    let result = sender.send(&json!({"store_id": "A"})).await;

    assert_eq!(
        result,
        DeliveryResult::Delivered {
            data: json!({"ok": true})
        }
    );
}

#[tokio::test]
async fn webhook_500_is_reported_with_raw_text() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/webhook"))
        .respond_with(ResponseTemplate::new(500).set_body_string("server error"))
        .mount(&server)
        .await;

    let sender = WebhookSender::new(client(), webhook_url(&server));
    let result = sender.send(&json!({})).await;

    assert_eq!(
        result,
        DeliveryResult::Failed {
            error: "HTTP 500: server error".into()
        }
    );
}

#[tokio::test]
async fn handler_relays_submission_and_notifies() {
    let webhook = MockServer::start().await;
    let bot = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/webhook"))
        .and(body_partial_json(json!({
            "store_id": "A",
            "vehicle_number": "12가3456",
            "source": "google_form",
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": true})))
        .expect(1)
        .mount(&webhook)
        .await;
    Mock::given(method("POST"))
        .and(path("/bot123:abc/sendMessage"))
        .and(body_json(json!({
            "chat_id": "42",
            "text": "✅ 자동화 요청 전송 완료\n매장: A\n차량: 12가3456",
            "parse_mode": "HTML",
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": true})))
        .expect(1)
        .mount(&bot)
        .await;

    let delivered = handler(client(), webhook_url(&webhook), Some(&bot))
        .handle(&submission())
        .await
        .unwrap();

    assert_eq!(delivered.response, json!({"ok": true}));
}

#[tokio::test]
async fn handler_surfaces_delivery_error_despite_bot_rejection() {
    let webhook = MockServer::start().await;
    let bot = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/webhook"))
        .respond_with(ResponseTemplate::new(500).set_body_string("server error"))
        .mount(&webhook)
        .await;
    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(401)
                .set_body_json(json!({"ok": false, "description": "Unauthorized"})),
        )
        .expect(1)
        .mount(&bot)
        .await;

    let err = handler(client(), webhook_url(&webhook), Some(&bot))
        .handle(&submission())
        .await
        .unwrap_err();

    assert_eq!(
        err,
        HandlerError::Delivery(DeliveryError("HTTP 500: server error".into()))
    );
}

#[tokio::test]
async fn invalid_submission_never_reaches_webhook() {
    let webhook = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": true})))
        .expect(0)
        .mount(&webhook)
        .await;

    let event = SubmissionEvent::from_pairs([("매장 선택", vec!["A 매장"]), ("차량번호", vec!["   "])]);
    let err = handler(client(), webhook_url(&webhook), None)
        .handle(&event)
        .await
        .unwrap_err();

    assert!(matches!(err, HandlerError::Validation(_)));
}

#[tokio::test]
async fn configuration_check_probes_health_endpoint() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/health"))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"status":"healthy"}"#))
        .expect(1)
        .mount(&server)
        .await;

    let config = RelayConfig::new(webhook_url(&server));
    let report = relay::check_configuration(&config, client()).await;

    assert_eq!(
        report.health,
        relay::HealthProbe::Reachable {
            status: 200,
            body: r#"{"status":"healthy"}"#.into()
        }
    );
}
