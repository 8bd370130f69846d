//! pr-group - merge labeled pull requests into an integration branch
//!
//! Finds open pull requests carrying a label, merges their head branches one
//! after another into a throwaway branch cut from trunk, and points the
//! integration branch at the result so the whole group can be built together.

pub mod actions;
pub mod auth;
pub mod config;
pub mod error;
pub mod group;
pub mod platform;
pub mod progress;
pub mod types;
