//! # forum-service
//!
//! Application layer containing business logic, the reaction engine, services, and DTOs.

pub mod dto;
pub mod services;

#[cfg(test)]
pub(crate) mod testing;

pub use services::{
    AccountService, AuthService, AuthenticatedAccount, CommentService, PostService,
    ReactionLedger, ReactionService, RetryPolicy, ServiceContext, ServiceContextBuilder,
    ServiceError, ServiceResult,
};
