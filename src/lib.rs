//! Incident Console
//!
//! Client-side admin tables for the incident-reporting backend: a reusable
//! filter/sort/paginate data view, REST collaborators, a session provider and
//! a polling feed for live incident updates.

pub mod api;
pub mod config;
pub mod errors;
pub mod feed;
pub mod models;
pub mod notify;
pub mod render;
pub mod session;
pub mod view;
