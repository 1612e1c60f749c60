//! Accounts that may sign in

use super::password::PasswordHasher;
use crate::config::UserConfig;
use anyhow::{Result, anyhow, bail};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub username: String,
    pub full_name: String,
    pub password_hash: String,
    pub roles: Vec<String>,
    pub enabled: bool,
}

/// Lookup of accounts by user name
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>>;
}

/// In-memory account store, seeded from configuration
#[derive(Clone, Default)]
pub struct InMemoryUserStore {
    users: Arc<RwLock<HashMap<String, User>>>,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, user: User) -> Result<()> {
        let mut users = self
            .users
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;
        users.insert(user.username.clone(), user);
        Ok(())
    }

    /// Build a store from configured accounts, hashing plain passwords
    pub fn from_config(accounts: &[UserConfig], hasher: &PasswordHasher) -> Result<Self> {
        let store = Self::new();
        for account in accounts {
            let password_hash = match (&account.password_hash, &account.password) {
                (Some(hash), _) => hash.clone(),
                (None, Some(plain)) => hasher.hash(plain).map_err(|e| anyhow!("{}", e))?,
                (None, None) => bail!("user {} has no password", account.username),
            };
            store.insert(User {
                username: account.username.clone(),
                full_name: account.full_name.clone(),
                password_hash,
                roles: account.roles.clone(),
                enabled: true,
            })?;
        }
        Ok(store)
    }
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>> {
        let users = self
            .users
            .read()
            .map_err(|e| anyhow!("Failed to acquire read lock: {}", e))?;
        Ok(users.get(username).cloned())
    }
}
