//! The module contains the `Account` struct and its persistence model.

use sea_orm::{ActiveValue, entity::prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{LedgerError, util::parse_uuid};

/// An account.
///
/// An account represents anywhere money is kept: cash, a bank account, a
/// brokerage account. Its balances are **derived** state, maintained per
/// currency by the engine from the events that reference it — they are never
/// entered directly.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    /// Stable identifier, generated once and persisted.
    pub id: Uuid,
    pub name: String,
    pub note: Option<String>,
    pub archived: bool,
}

impl Account {
    pub fn new(name: String, note: Option<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            note,
            archived: false,
        }
    }

    pub fn archive(&mut self) {
        self.archived = true;
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "accounts")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub name: String,
    pub note: Option<String>,
    pub archived: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<&Account> for ActiveModel {
    fn from(account: &Account) -> Self {
        Self {
            id: ActiveValue::Set(account.id.to_string()),
            name: ActiveValue::Set(account.name.clone()),
            note: ActiveValue::Set(account.note.clone()),
            archived: ActiveValue::Set(account.archived),
        }
    }
}

impl TryFrom<Model> for Account {
    type Error = LedgerError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: parse_uuid(&model.id, "account")?,
            name: model.name,
            note: model.note,
            archived: model.archived,
        })
    }
}
