//! Kinetic Panel API client
//!
//! The [`PanelClient`] implements the `Transport` port from
//! `kineticpanel-core` on top of [`crate::http::HttpClient`]. It owns
//! authentication, namespace selection and status classification; decoding
//! is left to the codecs.

pub mod client;

pub use client::{ClientConfig, PanelClient};
