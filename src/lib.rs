//! Client for a property-listing REST API.
//!
//! Filters flow from a [`filter::FilterController`] (debounced text fields,
//! immediate discrete fields) into a cached [`fetch::QueryClient`], which
//! resolves them through a [`repository::PropertyRepository`] building
//! `GET /properties` requests.

pub mod config;
pub mod fetch;
pub mod filter;
pub mod models;
pub mod repository;
pub mod store;
