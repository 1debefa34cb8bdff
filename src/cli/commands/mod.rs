//! Command implementations for the wordfreq CLI

pub mod config;
pub mod count;
pub mod version;
