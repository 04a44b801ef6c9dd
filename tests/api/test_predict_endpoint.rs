// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! Predict endpoint tests for POST /predict
//!
//! These tests drive the full router with fake models and verify that:
//! - Successful uploads return age, gender and a 300x300 JPEG preview
//! - Upload problems are reported in-band with the fixed messages
//! - Every failure keeps HTTP 200

use age_gender_node::{
    api::{create_app, AppState, PredictResponse},
    inference::{PipelineOptions, Predictor},
    utils::latin1,
};
use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
};
use image::{GenericImageView, ImageFormat};
use std::sync::Arc;
use tower::util::ServiceExt;

use super::common::*;

#[cfg(test)]
mod predict_endpoint_tests {
    use super::*;

    // =============================================================================
    // Success path
    // =============================================================================

    /// Test 1: Valid upload returns prediction and preview
    #[tokio::test]
    async fn test_predict_success() {
        let app = create_app(state(34.9, 0.12));

        let response = app
            .oneshot(upload_request("portrait.png", &png_bytes(320, 240)))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = json_body(response).await;
        assert_eq!(json["age"], 34);
        assert_eq!(json["gender"], "male");
        assert!(json.get("error").is_none());
        assert!(json["result_image"].is_string());
    }

    /// Test 2: result_image reverses to a 300x300 JPEG
    #[tokio::test]
    async fn test_result_image_round_trip() {
        let app = create_app(state(20.0, 0.9));

        let response = app
            .oneshot(upload_request("tall.png", &png_bytes(150, 400)))
            .await
            .unwrap();
        let json = json_body(response).await;

        let text = json["result_image"].as_str().unwrap();
        let jpeg = latin1::decode(text).expect("result_image must be byte-per-char");
        assert_eq!(&jpeg[..2], &[0xFF, 0xD8]);

        let preview = image::load_from_memory_with_format(&jpeg, ImageFormat::Jpeg).unwrap();
        assert_eq!(preview.dimensions(), (300, 300));
    }

    /// Test 3: Gender boundary 0.5 maps to female
    #[tokio::test]
    async fn test_gender_boundary_is_female() {
        let app = create_app(state(50.0, 0.5));

        let response = app
            .oneshot(upload_request("a.png", &png_bytes(64, 64)))
            .await
            .unwrap();
        let json = json_body(response).await;
        assert_eq!(json["gender"], "female");
    }

    /// Test 4: Response deserializes into the typed document
    #[tokio::test]
    async fn test_response_matches_typed_document() {
        let app = create_app(state(7.2, 0.7));

        let response = app
            .oneshot(upload_request("kid.png", &png_bytes(100, 100)))
            .await
            .unwrap();
        let json = json_body(response).await;
        let typed: PredictResponse = serde_json::from_value(json).unwrap();

        match typed {
            PredictResponse::Success { age, gender, .. } => {
                assert_eq!(age, 7);
                assert_eq!(gender, "female");
            }
            PredictResponse::Error { error } => panic!("unexpected error: {}", error),
        }
    }

    /// Test 5: Extra form fields are ignored
    #[tokio::test]
    async fn test_extra_fields_ignored() {
        let app = create_app(state(40.0, 0.1));
        let png = png_bytes(80, 60);

        let request = predict_request(&[
            Part::Text {
                name: "note",
                value: "hello",
            },
            Part::File {
                name: "file",
                filename: "face.png",
                content_type: "image/png",
                data: &png,
            },
        ]);

        let json = json_body(app.oneshot(request).await.unwrap()).await;
        assert_eq!(json["age"], 40);
    }

    // =============================================================================
    // Upload errors
    // =============================================================================

    /// Test 6: Form without a file field
    #[tokio::test]
    async fn test_missing_file_part() {
        let app = create_app(state(30.0, 0.3));

        let request = predict_request(&[Part::Text {
            name: "name",
            value: "nobody",
        }]);

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            json_body(response).await,
            serde_json::json!({"error": "No file part"})
        );
    }

    /// Test 7: A `file` field without a filename is not an upload
    #[tokio::test]
    async fn test_file_field_without_filename() {
        let app = create_app(state(30.0, 0.3));

        let request = predict_request(&[Part::Text {
            name: "file",
            value: "just text",
        }]);

        let json = json_body(app.oneshot(request).await.unwrap()).await;
        assert_eq!(json["error"], "No file part");
    }

    /// Test 8: Body that is not multipart at all
    #[tokio::test]
    async fn test_non_multipart_body() {
        let app = create_app(state(30.0, 0.3));

        let request = Request::builder()
            .method(Method::POST)
            .uri("/predict")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(r#"{"file": "nope"}"#))
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await["error"], "No file part");
    }

    /// Test 9: Empty filename
    #[tokio::test]
    async fn test_empty_filename() {
        let app = create_app(state(30.0, 0.3));

        let response = app.oneshot(upload_request("", b"")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            json_body(response).await,
            serde_json::json!({"error": "No selected file"})
        );
    }

    // =============================================================================
    // Processing errors
    // =============================================================================

    /// Test 10: Corrupt payload reports an error with HTTP 200
    #[tokio::test]
    async fn test_corrupt_image() {
        let app = create_app(state(30.0, 0.3));

        let response = app
            .oneshot(upload_request("broken.jpg", b"this is not a jpeg"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = json_body(response).await;
        assert!(json["error"].is_string());
        assert!(json.get("age").is_none());
    }

    /// Test 11: Truncated PNG reports a decode error
    #[tokio::test]
    async fn test_truncated_png() {
        let app = create_app(state(30.0, 0.3));
        let png = png_bytes(50, 50);

        let response = app
            .oneshot(upload_request("cut.png", &png[..png.len() / 2]))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = json_body(response).await;
        assert!(json["error"].as_str().unwrap().contains("decode"));
    }

    /// Test 12: Empty upload with a filename
    #[tokio::test]
    async fn test_empty_upload() {
        let app = create_app(state(30.0, 0.3));

        let json = json_body(app.oneshot(upload_request("a.png", b"")).await.unwrap()).await;
        assert_eq!(json["error"], "Image data is empty");
    }

    /// Test 13: Model failure surfaces its message
    #[tokio::test]
    async fn test_model_failure() {
        let predictor = Predictor::new(
            Arc::new(FakeModel {
                name: "Agemodel1",
                output: Err("shape mismatch"),
            }),
            Arc::new(FakeModel {
                name: "Genmodel1",
                output: Ok(vec![0.9]),
            }),
        );
        let app = create_app(Arc::new(AppState::with_predictor(predictor)));

        let response = app
            .oneshot(upload_request("a.png", &png_bytes(30, 30)))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let error = json_body(response).await["error"]
            .as_str()
            .unwrap()
            .to_string();
        assert!(error.contains("Agemodel1"));
        assert!(error.contains("shape mismatch"));
    }

    /// Test 14: Oversized upload is reported in-band
    #[tokio::test]
    async fn test_upload_too_large() {
        let state = Arc::new(AppState {
            predictor: Arc::new(predictor(30.0, 0.3)),
            pipeline_options: PipelineOptions {
                max_image_bytes: 1024,
                ..PipelineOptions::default()
            },
        });
        let app = create_app(state);

        let response = app
            .oneshot(upload_request("big.png", &png_bytes(400, 400)))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert!(json_body(response).await["error"].is_string());
    }

    // =============================================================================
    // Routing
    // =============================================================================

    /// Test 15: GET is not allowed on /predict
    #[tokio::test]
    async fn test_predict_rejects_get() {
        let app = create_app(state(30.0, 0.3));

        let request = Request::builder()
            .method(Method::GET)
            .uri("/predict")
            .body(Body::empty())
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    }

    /// Test 16: CORS allows any origin
    #[tokio::test]
    async fn test_cors_any_origin() {
        let app = create_app(state(30.0, 0.3));

        let request = Request::builder()
            .method(Method::OPTIONS)
            .uri("/predict")
            .header(header::ORIGIN, "https://example.com")
            .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
            .body(Body::empty())
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(
            response
                .headers()
                .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
                .unwrap(),
            "*"
        );
    }
}
