//! HTTP client and typed service wrappers for the ConceptLens backend.

pub mod client;
pub mod graph;
pub mod reports;

pub use client::{ApiClient, ApiError};
