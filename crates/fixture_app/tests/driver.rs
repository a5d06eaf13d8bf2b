use fixture_app::{build_driver, render, FixtureConfig, RunReport};
use fixture_core::{AsyncStatus, ReplySlice};
use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn config_for(server: &MockServer) -> FixtureConfig {
    FixtureConfig {
        base_url: server.uri(),
        settle_timeout_ms: 5_000,
        ..FixtureConfig::default()
    }
}

async fn run(config: FixtureConfig) -> RunReport {
    tokio::task::spawn_blocking(move || {
        fixture_logging::initialize_for_tests();
        build_driver(&config).expect("driver").run()
    })
    .await
    .expect("driver thread")
}

async fn mount_identity(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/user"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "username": "alice",
            "groups": ["privileged"],
            "permissions": [],
            "displayName": "Alice"
        })))
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path("/users"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!(["bob", "alice"])))
        .mount(server)
        .await;
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn logged_in_run_exercises_every_endpoint() {
    let server = MockServer::start().await;
    mount_identity(&server).await;
    Mock::given(method("POST"))
        .and(path("/api/hello"))
        .and(body_json(json!({ "whom": "bob" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "whom": "bob" })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/hello"))
        .respond_with(ResponseTemplate::new(403))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/message"))
        .and(body_json(json!({ "whom": null, "what": "hello" })))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/message"))
        .and(body_json(json!({ "whom": "bob", "what": "hello" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "whom": "bob" })))
        .expect(1)
        .mount(&server)
        .await;

    let report = run(config_for(&server)).await;

    assert!(report.settled);
    assert!(report.identity_resolved());
    let view = &report.view;
    assert_eq!(view.username.as_deref(), Some("alice"));
    assert_eq!(view.users, vec!["bob", "alice"]);
    assert!(!view.busy);

    let hello_someone = view.reply(ReplySlice::HelloSomeone).expect("hello someone");
    assert_eq!(hello_someone.status, AsyncStatus::Resolved);
    assert_eq!(hello_someone.line(), Some("bob"));

    let hello_everybody = view
        .reply(ReplySlice::HelloEverybody)
        .expect("hello everybody");
    assert_eq!(hello_everybody.status, AsyncStatus::Failed);
    assert_eq!(hello_everybody.line(), Some("403 Forbidden"));

    let message_someone = view.reply(ReplySlice::MessageSomeone).expect("message");
    assert_eq!(message_someone.line(), Some("bob"));
    assert_eq!(
        view.reply(ReplySlice::MessageEverybody).map(|r| r.status),
        Some(AsyncStatus::Resolved)
    );

    let text = render::render_report(&report);
    assert!(text.contains("Signed in: Alice"));
    assert!(text.contains("Say hello to everybody: error 403 Forbidden"));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn unauthenticated_run_skips_messaging() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/user"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/users"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let report = run(config_for(&server)).await;

    assert!(report.settled);
    assert!(!report.identity_resolved());
    assert_eq!(report.view.identity_status, AsyncStatus::Failed);
    assert_eq!(
        report.view.identity_error.as_deref(),
        Some("401 Unauthorized")
    );
    assert!(render::render_report(&report).contains("Login required (401 Unauthorized)"));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn logout_at_end_records_redirect() {
    let server = MockServer::start().await;
    mount_identity(&server).await;
    Mock::given(method("POST"))
        .and(path("/api/hello"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "whom": "bob" })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/message"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/logout"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "logoutUrl": "https://idp.example.com/logout" })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let config = FixtureConfig {
        logout_at_end: true,
        ..config_for(&server)
    };
    let report = run(config).await;

    assert!(report.settled);
    assert_eq!(
        report.view.logout_redirect.as_deref(),
        Some("https://idp.example.com/logout")
    );
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn hung_backend_stops_at_settle_timeout() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/user"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_delay(std::time::Duration::from_secs(5))
                .set_body_json(json!({ "username": "late" })),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/users"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let config = FixtureConfig {
        settle_timeout_ms: 200,
        ..config_for(&server)
    };
    let report = run(config).await;

    assert!(!report.settled);
    assert_eq!(report.view.identity_status, AsyncStatus::Pending);
    assert!(report.view.busy);
}
