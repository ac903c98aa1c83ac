//! Core library for tabcli.
//!
//! Provides the pieces the `tabcli` binary composes:
//! - `config`: credentials loaded from the environment
//! - `api`: REST client for the Tableau Server/Cloud API
//! - `auth`: cached session lifecycle (sign-in, validity window, sign-out)
//! - `engine`: authenticated resource operations (sites, workbooks, tasks, permissions)
//! - `models`: wire and output types

pub mod api;
pub mod auth;
pub mod config;
pub mod engine;
pub mod models;

pub use engine::Engine;
