//! Configuration loading and management
//!
//! Configuration is read from YAML, then selected values are overridden from
//! the environment:
//!
//! | Variable | Field |
//! |---|---|
//! | `BOOKSTORE_HOST` | `server.host` |
//! | `BOOKSTORE_PORT` | `server.port` |
//! | `BOOKSTORE_BASE_URL` | `server.base_url` |
//! | `BOOKSTORE_UPLOAD_DIR` | `files.upload_dir` |
//! | `BOOKSTORE_JWT_SECRET` | `security.jwt.secret` |
//! | `BOOKSTORE_DATABASE_URL` | `database.url` |

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

pub const DEFAULT_JWT_SECRET: &str = "53cr37";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub files: FilesConfig,
    pub security: SecurityConfig,
    pub database: Option<DatabaseConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Public url prefixed to every hypermedia link
    pub base_url: String,
    /// Allowed CORS origins; `*` allows any origin, empty disables CORS
    pub cors_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            base_url: "http://localhost:8080".to_string(),
            cors_origins: vec!["http://localhost:3000".to_string()],
        }
    }
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .with_context(|| format!("invalid listen address {}:{}", self.host, self.port))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FilesConfig {
    pub upload_dir: PathBuf,
    /// Largest accepted request body, in bytes
    pub max_upload_bytes: usize,
}

impl Default for FilesConfig {
    fn default() -> Self {
        Self {
            upload_dir: PathBuf::from("uploads"),
            max_upload_bytes: 10 * 1024 * 1024,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SecurityConfig {
    /// When false, resource routes are served without a bearer token
    pub enabled: bool,
    pub jwt: JwtConfig,
    /// Accounts available to `/auth/signin`
    pub users: Vec<UserConfig>,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            jwt: JwtConfig::default(),
            users: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct JwtConfig {
    /// HMAC secret used to sign HS256 tokens
    pub secret: String,
    pub issuer: String,
    pub access_token_ttl_secs: i64,
    pub refresh_token_ttl_secs: i64,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            secret: DEFAULT_JWT_SECRET.to_string(),
            issuer: "bookstore".to_string(),
            access_token_ttl_secs: 3600,
            refresh_token_ttl_secs: 3 * 3600,
        }
    }
}

/// A seeded account. Give either an argon2 `password_hash` (PHC string) or
/// a plain `password`, hashed at startup.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct UserConfig {
    pub username: String,
    pub full_name: String,
    pub password_hash: Option<String>,
    pub password: Option<String>,
    pub roles: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

fn default_max_connections() -> u32 {
    5
}

impl AppConfig {
    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("cannot read config file {}", path.display()))?;
        Self::from_yaml_str(&content)
    }

    /// Load configuration from a YAML string
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        Ok(config)
    }

    /// Read `path` when given (defaults otherwise), then apply the
    /// environment overrides
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config = match path {
            Some(path) => Self::from_yaml_file(path)?,
            None => Self::default(),
        };
        config.with_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides looked up by variable name
    pub fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        if let Some(host) = lookup("BOOKSTORE_HOST") {
            self.server.host = host;
        }
        if let Some(port) = lookup("BOOKSTORE_PORT") {
            self.server.port = port
                .parse()
                .with_context(|| format!("BOOKSTORE_PORT is not a port: {}", port))?;
        }
        if let Some(base_url) = lookup("BOOKSTORE_BASE_URL") {
            self.server.base_url = base_url;
        }
        if let Some(dir) = lookup("BOOKSTORE_UPLOAD_DIR") {
            self.files.upload_dir = PathBuf::from(dir);
        }
        if let Some(secret) = lookup("BOOKSTORE_JWT_SECRET") {
            self.security.jwt.secret = secret;
        }
        if let Some(url) = lookup("BOOKSTORE_DATABASE_URL") {
            let max_connections = self
                .database
                .as_ref()
                .map(|db| db.max_connections)
                .unwrap_or_else(default_max_connections);
            self.database = Some(DatabaseConfig {
                url,
                max_connections,
            });
        }
        Ok(self)
    }

    /// Create a default configuration for testing: security off, uploads
    /// under `upload_dir`
    pub fn default_config(upload_dir: impl Into<PathBuf>) -> Self {
        let mut config = Self::default();
        config.security.enabled = false;
        config.files.upload_dir = upload_dir.into();
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.server.port, 8080);
        assert!(config.security.enabled);
        assert_eq!(config.security.jwt.secret, DEFAULT_JWT_SECRET);
        assert!(config.database.is_none());
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let yaml = r#"
server:
  port: 9090
  base_url: https://books.example.com
security:
  enabled: false
  users:
    - username: leandro
      full_name: Leandro Costa
      password: admin123
      roles: [ADMIN]
"#;
        let config = AppConfig::from_yaml_str(yaml).unwrap();
        assert_eq!(config.server.port, 9090);
        assert_eq!(config.server.host, "0.0.0.0");
        assert!(!config.security.enabled);
        assert_eq!(config.security.jwt.access_token_ttl_secs, 3600);
        assert_eq!(config.security.users[0].roles, vec!["ADMIN"]);
        assert_eq!(config.files.upload_dir, PathBuf::from("uploads"));
    }

    #[test]
    fn test_env_overrides() {
        let env: HashMap<&str, &str> = [
            ("BOOKSTORE_PORT", "7000"),
            ("BOOKSTORE_JWT_SECRET", "s3cret"),
            ("BOOKSTORE_DATABASE_URL", "postgres://localhost/bookstore"),
        ]
        .into_iter()
        .collect();

        let config = AppConfig::default()
            .with_overrides(|key| env.get(key).map(|v| v.to_string()))
            .unwrap();
        assert_eq!(config.server.port, 7000);
        assert_eq!(config.security.jwt.secret, "s3cret");
        let db = config.database.unwrap();
        assert_eq!(db.url, "postgres://localhost/bookstore");
        assert_eq!(db.max_connections, 5);
    }

    #[test]
    fn test_bad_port_is_rejected() {
        let result = AppConfig::default().with_overrides(|key| {
            (key == "BOOKSTORE_PORT").then(|| "not-a-port".to_string())
        });
        assert!(result.is_err());
    }

    #[test]
    fn test_socket_addr() {
        let addr = ServerConfig::default().socket_addr().unwrap();
        assert_eq!(addr.port(), 8080);
    }
}
