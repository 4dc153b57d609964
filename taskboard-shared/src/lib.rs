//! # Taskboard Shared Library
//!
//! This crate contains the domain types, persistence and authentication
//! primitives used by the Taskboard API server.
//!
//! ## Module Organization
//!
//! - `auth`: Password hashing, JWT issuance/validation, request auth context
//! - `db`: Connection pool and embedded migrations
//! - `models`: Users, projects, tasks and the dashboard aggregate
//! - `seed`: Demo data for an empty database

pub mod auth;
pub mod db;
pub mod models;
pub mod seed;

/// Current version of the Taskboard shared library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
