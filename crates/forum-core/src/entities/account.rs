//! Account entity - a registered author and voter

use chrono::{DateTime, Utc};

use crate::value_objects::AccountId;

/// Account entity
///
/// The password hash is deliberately not part of the entity; repositories
/// hand it out only through dedicated credential lookups.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    pub id: AccountId,
    pub nick: String,
    pub name: String,
    pub email: String,
    /// Whether `name` is shown to other accounts
    pub public_name: bool,
    /// Whether `email` is shown to other accounts
    pub public_email: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Account {
    /// Update the nick
    pub fn set_nick(&mut self, nick: String) {
        self.nick = nick;
        self.updated_at = Utc::now();
    }

    /// Update the display name
    pub fn set_name(&mut self, name: String) {
        self.name = name;
        self.updated_at = Utc::now();
    }

    /// Update the email address
    pub fn set_email(&mut self, email: String) {
        self.email = email;
        self.updated_at = Utc::now();
    }

    /// Change profile visibility flags
    pub fn set_visibility(&mut self, public_name: Option<bool>, public_email: Option<bool>) {
        if let Some(public_name) = public_name {
            self.public_name = public_name;
        }
        if let Some(public_email) = public_email {
            self.public_email = public_email;
        }
        self.updated_at = Utc::now();
    }
}

/// Data needed to insert a new account
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAccount {
    pub nick: String,
    pub name: String,
    pub email: String,
}
