//! Core types for Hifz Tracker.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod id;
pub mod quran;
pub mod role;
pub mod username;

pub use id::*;
pub use quran::{Page, Position, QuranError, Surah};
pub use role::Role;
pub use username::{Username, UsernameError};
