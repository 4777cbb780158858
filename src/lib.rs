//! Backer - client core for a crowdfunding backend
//!
//! Two building blocks carry every list screen:
//!
//! - [`sections`]: a sectioned list model that maps renderer positions onto
//!   grouped data, plus the adapter contract screens implement on top of it
//! - [`transformers`]: small stream combinators view-models are written in,
//!   including funnelling structured API errors out of response streams
//!
//! The rest of the crate is what those blocks plug into: the API client,
//! the session, the UI scheduler and two example screens.

pub mod adapters;
pub mod api;
pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod scheduler;
pub mod screens;
pub mod sections;
pub mod session;
pub mod subscriptions;
pub mod traits;
pub mod transformers;
pub mod viewmodels;
