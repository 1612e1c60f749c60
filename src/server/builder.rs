//! ServerBuilder for fluent API to build the HTTP server

use super::exposure::RestExposure;
use super::host::ServerHost;
use crate::auth::{AuthService, InMemoryUserStore, PasswordHasher, TokenProvider, UserStore};
use crate::config::AppConfig;
use crate::core::store::{DisableStore, EntityStore};
use crate::entities::book::BookLinks;
use crate::entities::person::PersonLinks;
use crate::entities::{Book, BookService, Person, PersonService};
use crate::files::FileStorageService;
use crate::links::LinkBuilder;
use crate::storage::InMemoryStore;
use anyhow::{Result, anyhow};
use axum::Router;
use std::sync::Arc;
use tokio::net::TcpListener;

/// Both views of one person store
struct PersonStores {
    records: Arc<dyn EntityStore<Person>>,
    states: Arc<dyn DisableStore<Person>>,
}

/// Builder for the bookstore server
///
/// Stores left unset fall back to in-memory ones; users fall back to the
/// accounts listed in `security.users`.
///
/// # Example
///
/// ```ignore
/// let app = ServerBuilder::new()
///     .with_config(AppConfig::load(None)?)
///     .build()?;
/// ```
pub struct ServerBuilder {
    config: AppConfig,
    person_store: Option<PersonStores>,
    book_store: Option<Arc<dyn EntityStore<Book>>>,
    user_store: Option<Arc<dyn UserStore>>,
    custom_routes: Vec<Router>,
}

impl ServerBuilder {
    pub fn new() -> Self {
        Self {
            config: AppConfig::default(),
            person_store: None,
            book_store: None,
            user_store: None,
            custom_routes: Vec::new(),
        }
    }

    pub fn with_config(mut self, config: AppConfig) -> Self {
        self.config = config;
        self
    }

    /// Use `store` for people instead of the in-memory default
    pub fn with_person_store<S>(mut self, store: S) -> Self
    where
        S: DisableStore<Person> + 'static,
    {
        let store = Arc::new(store);
        let records: Arc<dyn EntityStore<Person>> = store.clone();
        self.person_store = Some(PersonStores {
            records,
            states: store,
        });
        self
    }

    pub fn with_book_store(mut self, store: impl EntityStore<Book> + 'static) -> Self {
        self.book_store = Some(Arc::new(store));
        self
    }

    pub fn with_user_store(mut self, store: impl UserStore + 'static) -> Self {
        self.user_store = Some(Arc::new(store));
        self
    }

    /// Add routes outside the resource groups.
    ///
    /// They are merged into the protected group, so they need a bearer
    /// token when security is enabled.
    pub fn with_custom_routes(mut self, routes: Router) -> Self {
        self.custom_routes.push(routes);
        self
    }

    /// Build the services and the host
    pub fn build_host(mut self) -> Result<ServerHost> {
        let links = LinkBuilder::new(self.config.server.base_url.clone());

        let people = match self.person_store.take() {
            Some(stores) => {
                PersonService::from_parts(stores.records, stores.states, PersonLinks::new(links.clone()))
            }
            None => PersonService::new(
                Arc::new(InMemoryStore::<Person>::new()),
                PersonLinks::new(links.clone()),
            ),
        };

        let book_store = self
            .book_store
            .take()
            .unwrap_or_else(|| Arc::new(InMemoryStore::<Book>::new()));
        let books = BookService::new(book_store, BookLinks::new(links));

        let files = FileStorageService::new(&self.config.files.upload_dir)
            .map_err(|e| anyhow!("{}", e))?;

        let hasher = PasswordHasher::default();
        let users = match self.user_store.take() {
            Some(store) => store,
            None => Arc::new(InMemoryUserStore::from_config(
                &self.config.security.users,
                &hasher,
            )?),
        };
        let tokens = Arc::new(TokenProvider::new(&self.config.security.jwt));
        let auth = AuthService::new(users, hasher, tokens);

        Ok(ServerHost::from_components(
            self.config,
            Arc::new(people),
            Arc::new(books),
            Arc::new(files),
            Arc::new(auth),
        ))
    }

    /// Build the final REST router
    pub fn build(mut self) -> Result<Router> {
        let custom_routes = std::mem::take(&mut self.custom_routes);
        let host = Arc::new(self.build_host()?);
        RestExposure::build_router(host, custom_routes)
    }

    /// Serve on `server.host:server.port` until SIGTERM or Ctrl+C
    pub async fn serve(self) -> Result<()> {
        let addr = self.config.server.socket_addr()?;
        let app = self.build()?;
        let listener = TcpListener::bind(addr).await?;

        tracing::info!("Server listening on {}", addr);

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server shutdown complete");
        Ok(())
    }
}

impl Default for ServerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Wait for shutdown signal (SIGTERM or Ctrl+C)
async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "Cannot listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Cannot listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C signal, initiating graceful shutdown...");
        },
        _ = terminate => {
            tracing::info!("Received SIGTERM signal, initiating graceful shutdown...");
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::UserConfig;
    use crate::core::entity::Entity;

    #[tokio::test]
    async fn test_custom_person_store_is_used() {
        let dir = tempfile::tempdir().unwrap();
        let store = InMemoryStore::<Person>::new();
        let saved = store
            .save(Person {
                id: None,
                first_name: "Ayrton".into(),
                last_name: "Senna".into(),
                address: "São Paulo".into(),
                gender: "Male".into(),
                enabled: true,
                profile_url: None,
                photo_url: None,
            })
            .await
            .unwrap();

        let host = ServerBuilder::new()
            .with_config(AppConfig::default_config(dir.path()))
            .with_person_store(store)
            .build_host()
            .unwrap();

        let found = host.people.find_by_id(saved.id().unwrap()).await.unwrap();
        assert_eq!(found.first_name, "Ayrton");
    }

    #[tokio::test]
    async fn test_users_come_from_config() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = AppConfig::default_config(dir.path());
        config.security.users.push(UserConfig {
            username: "leandro".into(),
            full_name: "Leandro Costa".into(),
            password: Some("admin123".into()),
            roles: vec!["ADMIN".into()],
            ..UserConfig::default()
        });

        let host = ServerBuilder::new().with_config(config).build_host().unwrap();
        let token = host
            .auth
            .sign_in(Some(crate::auth::AccountCredentials {
                username: "leandro".into(),
                password: "admin123".into(),
            }))
            .await
            .unwrap();
        assert!(token.authenticated);
    }

    #[test]
    fn test_user_without_password_fails_the_build() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = AppConfig::default_config(dir.path());
        config.security.users.push(UserConfig {
            username: "ghost".into(),
            ..UserConfig::default()
        });

        assert!(ServerBuilder::new().with_config(config).build_host().is_err());
    }
}
