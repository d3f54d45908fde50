//! Utility functions shared across the codebase

pub mod retry;

pub use retry::{CallPolicy, call_with_policy};
