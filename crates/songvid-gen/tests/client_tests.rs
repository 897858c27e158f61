//! Generation client tests against a mock backend.

use std::time::Duration;

use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use songvid_gen::{GenClient, GenConfig, GenError};
use songvid_models::GenerationParams;

fn config_for(server: &MockServer) -> GenConfig {
    GenConfig {
        endpoint: format!("{}/generate/ltx", server.uri()),
        model: "Lightricks/LTX-Video".to_string(),
        token: None,
        timeout: Duration::from_secs(5),
    }
}

#[tokio::test]
async fn raw_bytes_response_is_written_to_disk() {
    let server = MockServer::start().await;
    let media = b"fake-mp4-bytes".to_vec();

    Mock::given(method("POST"))
        .and(path("/generate/ltx"))
        .and(body_partial_json(serde_json::json!({
            "prompt": "chorus scene",
            "num_frames": 96,
            "width": 1216,
            "height": 704,
            "fps": 24,
        })))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-type", "video/mp4")
                .set_body_bytes(media.clone()),
        )
        .mount(&server)
        .await;

    let client = GenClient::new(config_for(&server)).unwrap();
    let dir = tempfile::tempdir().unwrap();

    let clip = client
        .generate_clip("chorus scene", &GenerationParams::default(), dir.path(), "shot_01")
        .await
        .unwrap();

    assert_eq!(clip.bytes, media.len() as u64);
    assert!(clip.filename.starts_with("shot_01_"));
    assert!(clip.filename.ends_with(".mp4"));
    assert_eq!(std::fs::read(&clip.file_path).unwrap(), media);
    assert_eq!(clip.model, "Lightricks/LTX-Video");
}

#[tokio::test]
async fn json_data_url_response_is_decoded() {
    use base64::engine::general_purpose::STANDARD;
    use base64::engine::Engine;

    let server = MockServer::start().await;
    let media = b"decoded-clip".to_vec();
    let payload = format!("data:video/mp4;base64,{}", STANDARD.encode(&media));

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "success": true,
            "video": payload,
        })))
        .mount(&server)
        .await;

    let client = GenClient::new(config_for(&server)).unwrap();
    let dir = tempfile::tempdir().unwrap();

    let clip = client
        .generate_clip("verse scene", &GenerationParams::default(), dir.path(), "shot_02")
        .await
        .unwrap();

    assert_eq!(std::fs::read(&clip.file_path).unwrap(), media);
}

#[tokio::test]
async fn backend_error_carries_status_and_body() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500).set_body_string("CUDA out of memory"))
        .mount(&server)
        .await;

    let client = GenClient::new(config_for(&server)).unwrap();
    let dir = tempfile::tempdir().unwrap();

    let err = client
        .generate_clip("bridge scene", &GenerationParams::default(), dir.path(), "shot_03")
        .await
        .unwrap_err();

    match err {
        GenError::Backend { status, body } => {
            assert_eq!(status, 500);
            assert_eq!(body, "CUDA out of memory");
        }
        other => panic!("expected backend error, got {other}"),
    }

    // Nothing is written on failure.
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[tokio::test]
async fn success_false_body_is_rejected() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "success": false,
            "video": null,
        })))
        .mount(&server)
        .await;

    let client = GenClient::new(config_for(&server)).unwrap();
    let dir = tempfile::tempdir().unwrap();

    let err = client
        .generate_clip("outro", &GenerationParams::default(), dir.path(), "shot_04")
        .await
        .unwrap_err();

    assert!(matches!(err, GenError::MalformedBody(_)));
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
}
