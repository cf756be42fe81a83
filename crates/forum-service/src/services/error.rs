//! Service layer error type

use forum_common::AppError;
use forum_core::DomainError;
use std::fmt;

#[derive(Debug)]
pub enum ServiceError {
    /// A domain rule failed, or a repository reported a domain outcome
    Domain(DomainError),

    /// Authentication or crypto failure from `forum-common`
    App(AppError),

    /// `ServiceContextBuilder::build` was called without this dependency
    MissingDependency(&'static str),
}

impl fmt::Display for ServiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Domain(e) => e.fmt(f),
            Self::App(e) => e.fmt(f),
            Self::MissingDependency(name) => write!(f, "Service context is missing {name}"),
        }
    }
}

impl std::error::Error for ServiceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Domain(e) => Some(e),
            Self::App(e) => Some(e),
            Self::MissingDependency(_) => None,
        }
    }
}

impl ServiceError {
    pub fn status_code(&self) -> u16 {
        match self {
            Self::Domain(e) => e.status_code(),
            Self::App(e) => e.status_code(),
            Self::MissingDependency(_) => 500,
        }
    }

    pub fn error_code(&self) -> &str {
        match self {
            Self::Domain(e) => e.code(),
            Self::App(e) => e.error_code(),
            Self::MissingDependency(_) => "MISSING_DEPENDENCY",
        }
    }
}

impl From<DomainError> for ServiceError {
    fn from(err: DomainError) -> Self {
        Self::Domain(err)
    }
}

impl From<AppError> for ServiceError {
    fn from(err: AppError) -> Self {
        Self::App(err)
    }
}

pub type ServiceResult<T> = Result<T, ServiceError>;
