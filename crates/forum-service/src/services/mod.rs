//! Business logic services
//!
//! Each service borrows the shared `ServiceContext` and orchestrates domain
//! operations over the repository ports.

pub mod account;
pub mod auth;
pub mod comment;
pub mod context;
pub mod error;
pub mod post;
pub mod reaction;

pub use account::AccountService;
pub use auth::{AuthService, AuthenticatedAccount};
pub use comment::CommentService;
pub use context::{ServiceContext, ServiceContextBuilder};
pub use error::{ServiceError, ServiceResult};
pub use post::PostService;
pub use reaction::{ReactionLedger, ReactionService, RetryPolicy};
