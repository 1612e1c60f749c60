//! HTTP tests for file upload and download

mod common;

use axum::http::{StatusCode, header};
use axum_test::multipart::{MultipartForm, Part};
use common::open_app;
use serde_json::Value;

fn text_part(name: &str, content: &str) -> Part {
    Part::bytes(content.as_bytes().to_vec())
        .file_name(name.to_string())
        .mime_type("text/plain")
}

#[tokio::test]
async fn test_upload_then_download() {
    let app = open_app();
    let form = MultipartForm::new().add_part("file", text_part("notes.txt", "hello bookstore"));

    let response = app.server.post("/files/uploadFile").multipart(form).await;
    response.assert_status(StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["file_name"], "notes.txt");
    assert_eq!(
        body["file_download_uri"],
        "http://localhost:8080/files/downloadFile/notes.txt"
    );
    assert_eq!(body["file_type"], "text/plain");
    assert_eq!(body["size"], 15);
    assert!(app.upload_dir.path().join("notes.txt").exists());

    let response = app.server.get("/files/downloadFile/notes.txt").await;
    response.assert_status(StatusCode::OK);
    assert_eq!(response.text(), "hello bookstore");
    assert!(
        response
            .header(header::CONTENT_TYPE)
            .to_str()
            .unwrap()
            .starts_with("text/plain")
    );
    assert_eq!(
        response.header(header::CONTENT_DISPOSITION),
        "attachment; filename=\"notes.txt\""
    );
}

#[tokio::test]
async fn test_upload_replaces_existing_file() {
    let app = open_app();
    for content in ["first", "second"] {
        let form = MultipartForm::new().add_part("file", text_part("same.txt", content));
        app.server
            .post("/files/uploadFile")
            .multipart(form)
            .await
            .assert_status(StatusCode::OK);
    }

    let response = app.server.get("/files/downloadFile/same.txt").await;
    assert_eq!(response.text(), "second");
}

#[tokio::test]
async fn test_upload_multiple_files() {
    let app = open_app();
    let form = MultipartForm::new()
        .add_part("files", text_part("a.txt", "A"))
        .add_part("files", text_part("b.txt", "BB"));

    let response = app
        .server
        .post("/files/uploadMultipleFiles")
        .multipart(form)
        .await;
    response.assert_status(StatusCode::OK);
    let body: Vec<Value> = response.json();
    assert_eq!(body.len(), 2);
    assert_eq!(body[0]["file_name"], "a.txt");
    assert_eq!(body[1]["size"], 2);
}

#[tokio::test]
async fn test_upload_with_traversal_name_is_refused() {
    let app = open_app();
    let form = MultipartForm::new().add_part("file", text_part("../escape.txt", "nope"));

    let response = app.server.post("/files/uploadFile").multipart(form).await;
    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = response.json();
    assert_eq!(body["code"], "FILE_STORAGE_ERROR");
    assert!(
        body["message"]
            .as_str()
            .unwrap()
            .contains("invalid path sequence")
    );
    assert!(!app.upload_dir.path().join("../escape.txt").exists());
}

#[tokio::test]
async fn test_download_missing_file_is_not_found() {
    let app = open_app();
    let response = app.server.get("/files/downloadFile/missing.pdf").await;
    response.assert_status(StatusCode::NOT_FOUND);
    let body: Value = response.json();
    assert_eq!(body["code"], "FILE_NOT_FOUND");
}

#[tokio::test]
async fn test_upload_without_file_part_is_rejected() {
    let app = open_app();
    let form = MultipartForm::new().add_text("comment", "no file here");
    app.server
        .post("/files/uploadFile")
        .multipart(form)
        .await
        .assert_status(StatusCode::BAD_REQUEST);
}
