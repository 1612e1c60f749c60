//! Person resource

pub mod descriptor;
pub mod handlers;
pub mod links;
pub mod model;
pub mod service;

pub use descriptor::PersonDescriptor;
pub use links::PersonLinks;
pub use model::{Person, PersonDto};
pub use service::PersonService;
