//! HTTP server: builder, host, routing and content negotiation

pub mod builder;
pub mod entity_registry;
pub mod exposure;
pub mod host;
pub mod middleware;
pub mod negotiation;
pub mod router;

pub use builder::ServerBuilder;
pub use entity_registry::{EntityDescriptor, EntityRegistry};
pub use exposure::RestExposure;
pub use host::ServerHost;
pub use negotiation::{Accepts, ListBody, MediaFormat, Negotiated, Payload};
