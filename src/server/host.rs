//! Server host: the state every route group is built from
//!
//! The host owns the services and the resource registry. It knows nothing
//! about HTTP; [`super::exposure::RestExposure`] turns it into a router.

use crate::auth::{AuthService, TokenProvider};
use crate::config::AppConfig;
use crate::entities::book::BookDescriptor;
use crate::entities::person::PersonDescriptor;
use crate::entities::{BookService, PersonService};
use crate::files::FileStorageService;
use crate::links::LinkBuilder;
use crate::server::entity_registry::EntityRegistry;
use std::sync::Arc;

/// Host context containing all application state
///
/// # Example
///
/// ```rust,ignore
/// let host = ServerBuilder::new().with_config(config).build_host()?;
/// let app = RestExposure::build_router(Arc::new(host), vec![])?;
/// ```
pub struct ServerHost {
    pub config: Arc<AppConfig>,

    /// Builds absolute hrefs from `server.base_url`
    pub links: LinkBuilder,

    pub people: Arc<PersonService>,
    pub books: Arc<BookService>,
    pub files: Arc<FileStorageService>,
    pub auth: Arc<AuthService>,

    /// Shared with the bearer middleware
    pub tokens: Arc<TokenProvider>,

    /// Route groups of the person and books resources
    pub entity_registry: EntityRegistry,
}

impl ServerHost {
    /// Assemble the host and register the resource descriptors
    pub fn from_components(
        config: AppConfig,
        people: Arc<PersonService>,
        books: Arc<BookService>,
        files: Arc<FileStorageService>,
        auth: Arc<AuthService>,
    ) -> Self {
        let links = LinkBuilder::new(config.server.base_url.clone());
        let tokens = auth.tokens().clone();

        let mut entity_registry = EntityRegistry::new();
        entity_registry.register(Box::new(PersonDescriptor::new(people.clone())));
        entity_registry.register(Box::new(BookDescriptor::new(books.clone())));

        Self {
            config: Arc::new(config),
            links,
            people,
            books,
            files,
            auth,
            tokens,
            entity_registry,
        }
    }

    /// Get resource names registered in the host
    pub fn entity_types(&self) -> Vec<&str> {
        self.entity_registry.entity_types()
    }

    /// Whether protected routes require a bearer token
    pub fn security_enabled(&self) -> bool {
        self.config.security.enabled
    }
}
