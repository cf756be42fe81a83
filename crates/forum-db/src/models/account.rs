//! Account database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for the accounts table, without the password hash
#[derive(Debug, Clone, FromRow)]
pub struct AccountModel {
    pub id: i64,
    pub nick: String,
    pub name: String,
    pub email: String,
    pub public_name: bool,
    pub public_email: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
