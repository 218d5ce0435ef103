//! # bale-core
//!
//! Core types, traits, configuration, and error handling for the Bale bot client.

pub mod config;
pub mod error;
pub mod message;
pub mod sanitize;
pub mod traits;
