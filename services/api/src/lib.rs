//! VAPT tracker REST service
//!
//! Exposes the tracker's operations over HTTP: authentication, application /
//! finding / risk register CRUD, evidence upload, finding discussion, user
//! management, and dashboard aggregation. All policy and scoring semantics
//! live in the `types` crate; this crate wires them to axum, SQLite, and the
//! local file store.

pub mod auth;
pub mod config;
pub mod error;
pub mod files;
pub mod handlers;
pub mod models;
pub mod rate_limit;
pub mod router;
pub mod seed;
pub mod state;
pub mod store;
