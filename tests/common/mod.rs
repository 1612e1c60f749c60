//! Shared setup for the HTTP tests

#![allow(dead_code)]

use axum_test::TestServer;
use bookstore::config::{AppConfig, UserConfig};
use bookstore::server::ServerBuilder;
use serde_json::{Value, json};
use tempfile::TempDir;

pub const USERNAME: &str = "leandro";
pub const PASSWORD: &str = "admin123";

/// Test server plus the directory backing its uploads
pub struct TestApp {
    pub server: TestServer,
    pub upload_dir: TempDir,
}

fn start(config: AppConfig, upload_dir: TempDir) -> TestApp {
    let router = ServerBuilder::new().with_config(config).build().unwrap();
    TestApp {
        server: TestServer::new(router),
        upload_dir,
    }
}

/// Security off, in-memory stores
pub fn open_app() -> TestApp {
    let upload_dir = tempfile::tempdir().unwrap();
    let config = AppConfig::default_config(upload_dir.path());
    start(config, upload_dir)
}

/// Security on, with one seeded account
pub fn secured_app() -> TestApp {
    let upload_dir = tempfile::tempdir().unwrap();
    let mut config = AppConfig::default_config(upload_dir.path());
    config.security.enabled = true;
    config.security.jwt.secret = "integration-secret".to_string();
    config.security.users.push(UserConfig {
        username: USERNAME.to_string(),
        full_name: "Leandro Costa".to_string(),
        password: Some(PASSWORD.to_string()),
        roles: vec!["ADMIN".to_string()],
        ..UserConfig::default()
    });
    start(config, upload_dir)
}

pub fn murilo() -> Value {
    json!({
        "first_name": "Murilo",
        "last_name": "Dias",
        "address": "Uberlândia - Minas Gerais - Brasil",
        "gender": "Male"
    })
}

pub fn person(first_name: &str, last_name: &str, gender: &str) -> Value {
    json!({
        "first_name": first_name,
        "last_name": last_name,
        "address": "Brasil",
        "gender": gender
    })
}

pub fn docker_book() -> Value {
    json!({
        "author": "Nigel Poulton",
        "title": "Docker Deep Dive",
        "price": 55.99,
        "launch_date": "2017-11-29T13:50:05Z"
    })
}

/// Find the link with relation `rel` in a representation
pub fn link<'a>(body: &'a Value, rel: &str) -> Option<&'a Value> {
    body["links"]
        .as_array()?
        .iter()
        .find(|link| link["rel"] == rel)
}
