//! Bookstore resources
//!
//! Each resource follows the same layout: `model` (record and DTO),
//! `links` (link assembler), `service`, `handlers` and `descriptor`
//! (route group registered with the server).

pub mod book;
pub mod macros;
pub mod person;

pub use book::{Book, BookDto, BookService};
pub use person::{Person, PersonDto, PersonService};
