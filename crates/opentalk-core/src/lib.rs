//! Shared data model, time utilities and configuration for the OpenTalk
//! schedule crates.

pub mod config;
pub mod constants;
pub mod error;
pub mod model;
pub mod types;
pub mod util;
