//! Thin reqwest wrapper shared by the API clients

pub mod client;

pub use client::{HttpClient, HttpClientBuilder};
