//! 判定サービス連携テスト
//!
//! axumでモックの `/predict` を立て、送信パイプラインを端から端まで検証する。

use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::routing::post;
use axum::Router;
use potato_leaf_common::{Completion, Error, FormConfig, Panel};
use potato_leaf_rust::client::PredictClient;
use potato_leaf_rust::error::LeafError;
use potato_leaf_rust::image_file::ImageFile;
use potato_leaf_rust::session::Session;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tempfile::{tempdir, TempDir};

const PNG_HEADER: &[u8] = &[
    0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A, 0x00, 0x00, 0x00, 0x0D, b'I', b'H', b'D', b'R',
];

/// モックサーバーが受け取ったパート
#[derive(Debug, Clone, Default)]
struct Received {
    field_name: String,
    file_name: Option<String>,
    content_type: Option<String>,
    len: usize,
}

#[derive(Clone)]
struct MockState {
    status: StatusCode,
    body: &'static str,
    delay: Duration,
    received: Arc<Mutex<Vec<Received>>>,
}

async fn predict_handler(
    State(state): State<MockState>,
    mut multipart: Multipart,
) -> (StatusCode, String) {
    while let Ok(Some(field)) = multipart.next_field().await {
        let field_name = field.name().unwrap_or_default().to_string();
        let file_name = field.file_name().map(str::to_string);
        let content_type = field.content_type().map(str::to_string);
        let len = field.bytes().await.map(|b| b.len()).unwrap_or_default();
        state.received.lock().unwrap().push(Received {
            field_name,
            file_name,
            content_type,
            len,
        });
    }

    tokio::time::sleep(state.delay).await;
    (state.status, state.body.to_string())
}

/// モックサーバーを起動してベースURLを返す
async fn spawn_mock(
    status: StatusCode,
    body: &'static str,
    delay: Duration,
) -> (String, Arc<Mutex<Vec<Received>>>) {
    let received = Arc::new(Mutex::new(Vec::new()));
    let state = MockState {
        status,
        body,
        delay,
        received: received.clone(),
    };
    let app = Router::new()
        .route("/predict", post(predict_handler))
        .with_state(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{}", addr), received)
}

fn write_leaf(dir: &TempDir, name: &str) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, PNG_HEADER).unwrap();
    path
}

fn new_session(base_url: &str, timeout: Duration) -> Session {
    let config = FormConfig::new(base_url).with_error_banner(true);
    let client = PredictClient::new(&config, timeout).expect("クライアント作成失敗");
    Session::new(config, client)
}

#[tokio::test]
async fn test_successful_prediction_renders_result() {
    let (base_url, received) = spawn_mock(
        StatusCode::OK,
        r#"{"class": "Healthy", "confidence": 0.97}"#,
        Duration::ZERO,
    )
    .await;
    let dir = tempdir().unwrap();
    let image = ImageFile::load(&write_leaf(&dir, "leaf.png")).unwrap();

    let mut session = new_session(&base_url, Duration::from_secs(5));
    let completion = session.select_and_submit(Some(image)).await;
    assert!(matches!(completion, Some(Completion::Applied)));

    let view = session.view();
    match view.panel {
        Panel::Result(result) => {
            assert_eq!(result.label, "Healthy");
            assert_eq!(result.confidence_text, "97.00%");
            assert_eq!(result.disease_info, potato_leaf_common::disease_info::lookup("Healthy"));
        }
        other => panic!("結果パネルではない: {:?}", other),
    }
    assert!(!session.form().is_submitting());

    // multipartの `file` フィールドで送られている
    let received = received.lock().unwrap();
    assert_eq!(received.len(), 1);
    assert_eq!(received[0].field_name, "file");
    assert_eq!(received[0].file_name.as_deref(), Some("leaf.png"));
    assert_eq!(received[0].content_type.as_deref(), Some("image/png"));
    assert_eq!(received[0].len, PNG_HEADER.len());
}

#[tokio::test]
async fn test_service_error_leaves_no_result() {
    let (base_url, _) =
        spawn_mock(StatusCode::INTERNAL_SERVER_ERROR, "boom", Duration::ZERO).await;
    let dir = tempdir().unwrap();
    let image = ImageFile::load(&write_leaf(&dir, "leaf.png")).unwrap();

    let mut session = new_session(&base_url, Duration::from_secs(5));
    let completion = session.select_and_submit(Some(image)).await;

    assert!(matches!(
        completion,
        Some(Completion::Failed(Error::Service { status: 500 }))
    ));
    assert!(session.form().prediction().is_none());
    assert!(!session.form().is_submitting());

    let view = session.view();
    assert!(matches!(view.panel, Panel::Preview { .. }));
    assert_eq!(
        view.error_banner.as_deref(),
        Some("Prediction service returned HTTP 500")
    );
    assert!(view.can_retry);
}

#[tokio::test]
async fn test_malformed_body_leaves_no_result() {
    let (base_url, _) =
        spawn_mock(StatusCode::OK, r#"{"label": "Healthy"}"#, Duration::ZERO).await;
    let dir = tempdir().unwrap();
    let image = ImageFile::load(&write_leaf(&dir, "leaf.png")).unwrap();

    let mut session = new_session(&base_url, Duration::from_secs(5));
    let completion = session.select_and_submit(Some(image)).await;

    assert!(matches!(
        completion,
        Some(Completion::Failed(Error::MalformedResponse(_)))
    ));
    assert!(session.form().prediction().is_none());
    assert!(!session.form().is_submitting());
}

#[tokio::test]
async fn test_network_failure_leaves_no_result() {
    // 空きポートを確保してすぐ閉じる
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let dir = tempdir().unwrap();
    let image = ImageFile::load(&write_leaf(&dir, "leaf.png")).unwrap();

    let mut session = new_session(&format!("http://{}", addr), Duration::from_secs(5));
    let completion = session.select_and_submit(Some(image)).await;

    assert!(matches!(completion, Some(Completion::Failed(Error::Network(_)))));
    assert!(session.form().prediction().is_none());
    assert!(!session.form().is_submitting());
}

#[tokio::test]
async fn test_timeout_is_network_failure() {
    let (base_url, _) = spawn_mock(
        StatusCode::OK,
        r#"{"class": "Healthy", "confidence": 0.97}"#,
        Duration::from_secs(2),
    )
    .await;
    let dir = tempdir().unwrap();
    let image = ImageFile::load(&write_leaf(&dir, "leaf.png")).unwrap();

    let mut session = new_session(&base_url, Duration::from_millis(200));
    let completion = session.select_and_submit(Some(image)).await;

    assert!(matches!(completion, Some(Completion::Failed(Error::Network(_)))));
    assert!(!session.form().is_submitting());
}

#[tokio::test]
async fn test_retry_after_failure_succeeds() {
    let (bad_url, _) =
        spawn_mock(StatusCode::SERVICE_UNAVAILABLE, "busy", Duration::ZERO).await;
    let dir = tempdir().unwrap();
    let image = ImageFile::load(&write_leaf(&dir, "leaf.png")).unwrap();

    let mut session = new_session(&bad_url, Duration::from_secs(5));
    session.select_and_submit(Some(image)).await;
    assert!(session.form().can_retry());

    let ticket = session.retry().expect("再送信できない");
    assert!(session.form().is_submitting());
    let completion = session.complete(
        ticket.token,
        Ok(potato_leaf_common::PredictionResult {
            label: "Early Blight".to_string(),
            confidence: 0.9704,
        }),
    );
    assert!(matches!(completion, Completion::Applied));

    match session.view().panel {
        Panel::Result(result) => assert_eq!(result.confidence_text, "97.04%"),
        other => panic!("結果パネルではない: {:?}", other),
    }
}

#[tokio::test]
async fn test_stale_response_does_not_overwrite_newer_selection() {
    let (slow_url, _) = spawn_mock(
        StatusCode::OK,
        r#"{"class": "Healthy", "confidence": 0.97}"#,
        Duration::from_millis(300),
    )
    .await;
    let dir = tempdir().unwrap();
    let first_image = ImageFile::load(&write_leaf(&dir, "first.png")).unwrap();
    let second_image = ImageFile::load(&write_leaf(&dir, "second.png")).unwrap();

    let mut session = new_session(&slow_url, Duration::from_secs(5));

    // 1件目を送信中に2件目を選択
    let first = session.select(Some(first_image)).unwrap();
    let first_request = {
        let config = session.form().config().clone();
        let client = PredictClient::new(&config, Duration::from_secs(5)).unwrap();
        let file = first.file.clone();
        tokio::spawn(async move { client.predict(&file).await })
    };
    let second = session.select(Some(second_image)).unwrap();

    // 2件目が先に完了
    let late_blight = potato_leaf_common::PredictionResult {
        label: "Late Blight".to_string(),
        confidence: 0.88,
    };
    assert!(matches!(
        session.complete(second.token, Ok(late_blight.clone())),
        Completion::Applied
    ));

    // 1件目の応答が後から届く
    let first_outcome = first_request.await.unwrap();
    assert!(first_outcome.is_ok());
    assert!(matches!(
        session.complete(first.token, first_outcome),
        Completion::Stale
    ));

    assert_eq!(session.form().prediction(), Some(&late_blight));
    assert_eq!(
        session.form().selected_file().map(|f| f.file_name.as_str()),
        Some("second.png")
    );
}

#[tokio::test]
async fn test_clear_releases_preview_file() {
    let (base_url, _) = spawn_mock(
        StatusCode::OK,
        r#"{"class": "Late Blight", "confidence": 0.5}"#,
        Duration::ZERO,
    )
    .await;
    let dir = tempdir().unwrap();
    let image = ImageFile::load(&write_leaf(&dir, "leaf.png")).unwrap();

    let mut session = new_session(&base_url, Duration::from_secs(5));
    session.select_and_submit(Some(image)).await;

    let preview_path = session.form().preview().expect("プレビューがない").path.clone();
    assert!(preview_path.exists());
    assert_eq!(session.form().store().live_count(), 1);

    session.clear();
    assert!(session.form().is_initial());
    assert!(!preview_path.exists());
    assert_eq!(session.form().store().live_count(), 0);
    assert!(matches!(session.view().panel, Panel::Picker));
}

#[tokio::test]
async fn test_classify_returns_prediction() {
    let (base_url, _) = spawn_mock(
        StatusCode::OK,
        r#"{"class": "Early Blight", "confidence": 0.9704}"#,
        Duration::ZERO,
    )
    .await;
    let dir = tempdir().unwrap();
    let image = ImageFile::load(&write_leaf(&dir, "leaf.png")).unwrap();

    let mut session = new_session(&base_url, Duration::from_secs(5));
    let prediction = session.classify(image).await.expect("判定失敗");
    assert_eq!(prediction.label, "Early Blight");
    assert_eq!(prediction.confidence, 0.9704);
}

#[tokio::test]
async fn test_classify_failure_is_prediction_error() {
    let (base_url, _) =
        spawn_mock(StatusCode::SERVICE_UNAVAILABLE, "busy", Duration::ZERO).await;
    let dir = tempdir().unwrap();
    let image = ImageFile::load(&write_leaf(&dir, "leaf.png")).unwrap();

    let mut session = new_session(&base_url, Duration::from_secs(5));
    let err = session.classify(image).await.unwrap_err();

    match err {
        LeafError::Prediction(e) => {
            assert!(matches!(e, Error::Service { status: 503 }));
            assert!(e.is_submission_failure());
        }
        other => panic!("判定エラーではない: {:?}", other),
    }
    assert!(session.form().can_retry());
}
