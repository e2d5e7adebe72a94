//! Hifz Tracker server library.
//!
//! This crate provides the API server functionality as a library,
//! allowing it to be tested and reused (the CLI uses the password hasher
//! and repositories when bootstrapping users).

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod state;
