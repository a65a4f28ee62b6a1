//! Core logic for the ladle recipe-catalog client.
//!
//! - `api`: HTTP transport and endpoint wrappers for the remote recipe API
//! - `auth`: session lifecycle (credential storage, profile, roles)
//! - `browse`: dual-mode catalog browsing state machine
//! - `config`: configuration loading and path resolution

pub mod api;
pub mod auth;
pub mod browse;
pub mod config;
