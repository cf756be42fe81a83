//! Account model -> entity mapper

use forum_core::entities::Account;
use forum_core::value_objects::AccountId;

use crate::models::AccountModel;

impl From<AccountModel> for Account {
    fn from(model: AccountModel) -> Self {
        Account {
            id: AccountId::new(model.id),
            nick: model.nick,
            name: model.name,
            email: model.email,
            public_name: model.public_name,
            public_email: model.public_email,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
