//! Request extractors guarding authenticated routes.

pub mod auth;
