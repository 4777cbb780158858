//! Test doubles for the trait seams in [`crate::traits`].

pub mod http;

pub use http::{MockHttpClient, MockResponse, RecordedRequest};
