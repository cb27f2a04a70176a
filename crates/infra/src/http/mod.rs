//! HTTP client with retries

pub mod client;

pub use client::{HttpClient, HttpClientBuilder};
