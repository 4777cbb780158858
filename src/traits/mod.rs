//! Trait seams between the client core and its environment.
//!
//! - [`HttpClient`] - HTTP transport used by the API client

pub mod http;

pub use http::{Headers, HttpClient, Response};
