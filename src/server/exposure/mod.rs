//! API exposure
//!
//! Each exposure consumes a `ServerHost` and produces a router.

pub mod rest;

pub use rest::RestExposure;
