//! Book resource

pub mod descriptor;
pub mod handlers;
pub mod links;
pub mod model;
pub mod service;

pub use descriptor::BookDescriptor;
pub use links::BookLinks;
pub use model::{Book, BookDto};
pub use service::BookService;
