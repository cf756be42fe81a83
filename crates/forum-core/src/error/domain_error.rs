//! Domain errors - error types for the domain layer

use thiserror::Error;

use crate::value_objects::{AccountId, CommentId, PostId};

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    // =========================================================================
    // Not Found Errors
    // =========================================================================
    #[error("Account not found: {0}")]
    AccountNotFound(AccountId),

    #[error("Author not found")]
    AuthorNotFound,

    #[error("Post not found")]
    PostNotFound(PostId),

    #[error("Comment not found")]
    CommentNotFound(CommentId),

    #[error("Session not found")]
    SessionNotFound,

    // =========================================================================
    // Authorization Errors
    // =========================================================================
    #[error("Only the author can modify this resource")]
    NotResourceOwner,

    // =========================================================================
    // Unprocessable Errors
    // =========================================================================
    #[error("Email already in use")]
    EmailAlreadyExists,

    // =========================================================================
    // Conflict Errors
    // =========================================================================
    /// The ledger row changed between reading it and writing it. The reaction
    /// engine retries on this; it only escapes once every retry attempt is spent.
    #[error("Concurrent reaction update, please retry")]
    ReactionConflict,

    // =========================================================================
    // Infrastructure Errors
    // =========================================================================
    #[error("Database error: {0}")]
    DatabaseError(String),
}

impl DomainError {
    /// Get an error code string for API responses
    pub fn code(&self) -> &'static str {
        match self {
            // Not Found
            Self::AccountNotFound(_) => "UNKNOWN_ACCOUNT",
            Self::AuthorNotFound => "UNKNOWN_AUTHOR",
            Self::PostNotFound(_) => "UNKNOWN_POST",
            Self::CommentNotFound(_) => "UNKNOWN_COMMENT",
            Self::SessionNotFound => "UNKNOWN_SESSION",

            // Authorization
            Self::NotResourceOwner => "NOT_RESOURCE_OWNER",

            // Unprocessable
            Self::EmailAlreadyExists => "EMAIL_ALREADY_EXISTS",

            // Conflict
            Self::ReactionConflict => "REACTION_CONFLICT",

            // Infrastructure
            Self::DatabaseError(_) => "DATABASE_ERROR",
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::AccountNotFound(_)
                | Self::AuthorNotFound
                | Self::PostNotFound(_)
                | Self::CommentNotFound(_)
                | Self::SessionNotFound
        )
    }

    /// Check if this is an authorization error
    pub fn is_authorization(&self) -> bool {
        matches!(self, Self::NotResourceOwner)
    }

    /// Check if the request was well-formed but cannot be processed
    pub fn is_unprocessable(&self) -> bool {
        matches!(self, Self::EmailAlreadyExists)
    }

    /// Check if this is a conflict error
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::ReactionConflict)
    }

    /// HTTP status code this error surfaces as
    pub fn status_code(&self) -> u16 {
        if self.is_not_found() {
            404
        } else if self.is_authorization() {
            401
        } else if self.is_unprocessable() {
            422
        } else if self.is_conflict() {
            409
        } else {
            500
        }
    }
}
