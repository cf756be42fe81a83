//! HTTP request handlers
//!
//! Handlers are thin: extract, call one service method, wrap the result.

pub mod accounts;
pub mod comments;
pub mod health;
pub mod posts;
