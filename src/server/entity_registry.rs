//! Registry of resource descriptors and their route groups

use axum::Router;
use std::collections::BTreeMap;

/// Trait that describes how to build routes for a resource
///
/// Each resource (person, books) implements this trait to provide its
/// route group, already bound to its own state.
pub trait EntityDescriptor: Send + Sync {
    /// The resource name, also the first path segment (e.g., "person")
    fn entity_type(&self) -> &str;

    /// Build the routes for this resource
    fn build_routes(&self) -> Router;
}

/// Registry for all resources served by the application
#[derive(Default)]
pub struct EntityRegistry {
    descriptors: BTreeMap<String, Box<dyn EntityDescriptor>>,
}

impl EntityRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a descriptor, replacing any previous one with the same name
    pub fn register(&mut self, descriptor: Box<dyn EntityDescriptor>) {
        let entity_type = descriptor.entity_type().to_string();
        self.descriptors.insert(entity_type, descriptor);
    }

    /// Merge every registered route group into one router
    pub fn build_routes(&self) -> Router {
        self.descriptors
            .values()
            .fold(Router::new(), |router, descriptor| {
                router.merge(descriptor.build_routes())
            })
    }

    /// Registered resource names, sorted
    pub fn entity_types(&self) -> Vec<&str> {
        self.descriptors.keys().map(|s| s.as_str()).collect()
    }
}
