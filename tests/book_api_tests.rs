//! HTTP tests for the books resource

mod common;

use axum::http::StatusCode;
use chrono::{DateTime, Utc};
use common::{docker_book, link, open_app};
use serde_json::{Value, json};

#[tokio::test]
async fn test_book_lifecycle() {
    let app = open_app();
    let server = &app.server;

    let response = server.post("/books").json(&docker_book()).await;
    response.assert_status(StatusCode::CREATED);
    let created: Value = response.json();
    let id = created["id"].as_i64().unwrap();
    assert_eq!(created["title"], "Docker Deep Dive");
    assert_eq!(created["price"], 55.99);

    let launch: DateTime<Utc> = created["launch_date"].as_str().unwrap().parse().unwrap();
    assert_eq!(launch, "2017-11-29T13:50:05Z".parse::<DateTime<Utc>>().unwrap());

    let mut changed = created.clone();
    changed["price"] = json!(49.9);
    changed["title"] = json!("Docker Deep Dive 2nd Edition");
    changed.as_object_mut().unwrap().remove("links");
    let response = server.put("/books").json(&changed).await;
    response.assert_status(StatusCode::OK);
    let updated: Value = response.json();
    assert_eq!(updated["id"], id);
    assert_eq!(updated["price"], 49.9);
    assert_eq!(updated["author"], "Nigel Poulton");

    server
        .delete(&format!("/books/{id}"))
        .await
        .assert_status(StatusCode::NO_CONTENT);
    server
        .get(&format!("/books/{id}"))
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_book_links() {
    let app = open_app();
    let created: Value = app.server.post("/books").json(&docker_book()).await.json();
    let id = created["id"].as_i64().unwrap();

    let rels: Vec<_> = created["links"]
        .as_array()
        .unwrap()
        .iter()
        .map(|l| l["rel"].as_str().unwrap())
        .collect();
    assert_eq!(rels, vec!["self", "findAll", "create", "update", "delete"]);
    assert_eq!(
        link(&created, "self").unwrap()["href"],
        format!("http://localhost:8080/books/{id}")
    );
    assert_eq!(link(&created, "update").unwrap()["type"], "PUT");
}

#[tokio::test]
async fn test_books_are_sorted_by_title() {
    let app = open_app();
    for title in ["Kubernetes in Action", "clean code", "Refactoring"] {
        let mut book = docker_book();
        book["title"] = json!(title);
        app.server.post("/books").json(&book).await;
    }

    let body: Value = app.server.get("/books").await.json();
    let titles: Vec<_> = body["content"]
        .as_array()
        .unwrap()
        .iter()
        .map(|b| b["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, vec!["clean code", "Kubernetes in Action", "Refactoring"]);
    assert_eq!(body["page"]["total_elements"], 3);
}

#[tokio::test]
async fn test_find_books_by_title() {
    let app = open_app();
    for title in ["Docker Deep Dive", "Docker Up and Running", "Refactoring"] {
        let mut book = docker_book();
        book["title"] = json!(title);
        app.server.post("/books").json(&book).await;
    }

    let body: Value = app.server.get("/books/findBooksByTitle/docker").await.json();
    assert_eq!(body["content"].as_array().unwrap().len(), 2);
    assert_eq!(body["page"]["total_elements"], 2);
}

#[tokio::test]
async fn test_create_book_without_body_is_rejected() {
    let app = open_app();
    app.server
        .post("/books")
        .await
        .assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_delete_unknown_book_is_not_found() {
    let app = open_app();
    let response = app.server.delete("/books/31").await;
    response.assert_status(StatusCode::NOT_FOUND);
    let body: Value = response.json();
    assert_eq!(body["message"], "No records found for this ID!");
    assert_eq!(body["details"], "uri=/books/31");
}
