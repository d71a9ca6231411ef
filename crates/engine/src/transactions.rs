//! Transaction events: spending, income and transfers between accounts.
//!
//! A `Transaction` is an atomic event that changes account balances through
//! its kind-specific effects (see `effects`).

use chrono::NaiveDate;
use sea_orm::{ActiveValue, entity::prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{Currency, LedgerError, util::parse_uuid};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionKind {
    Spending,
    Income,
    Transfer,
}

impl TransactionKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Spending => "spending",
            Self::Income => "income",
            Self::Transfer => "transfer",
        }
    }
}

impl TryFrom<&str> for TransactionKind {
    type Error = LedgerError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "spending" => Ok(Self::Spending),
            "income" => Ok(Self::Income),
            "transfer" => Ok(Self::Transfer),
            other => Err(LedgerError::UnknownKind(other.to_string())),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: Uuid,
    pub kind: TransactionKind,
    pub currency: Currency,
    pub amount_minor: i64,
    pub fee_minor: i64,
    pub pay_account_id: Option<Uuid>,
    pub receive_account_id: Option<Uuid>,
    pub occurred_on: NaiveDate,
    pub note: Option<String>,
    pub category_id: Option<Uuid>,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "transactions")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub kind: String,
    pub currency: String,
    pub amount_minor: i64,
    pub fee_minor: i64,
    pub pay_account_id: Option<String>,
    pub receive_account_id: Option<String>,
    pub occurred_on: Date,
    pub note: Option<String>,
    pub category_id: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<&Transaction> for ActiveModel {
    fn from(tx: &Transaction) -> Self {
        Self {
            id: ActiveValue::Set(tx.id.to_string()),
            kind: ActiveValue::Set(tx.kind.as_str().to_string()),
            currency: ActiveValue::Set(tx.currency.code().to_string()),
            amount_minor: ActiveValue::Set(tx.amount_minor),
            fee_minor: ActiveValue::Set(tx.fee_minor),
            pay_account_id: ActiveValue::Set(tx.pay_account_id.map(|id| id.to_string())),
            receive_account_id: ActiveValue::Set(tx.receive_account_id.map(|id| id.to_string())),
            occurred_on: ActiveValue::Set(tx.occurred_on),
            note: ActiveValue::Set(tx.note.clone()),
            category_id: ActiveValue::Set(tx.category_id.map(|id| id.to_string())),
        }
    }
}

impl TryFrom<Model> for Transaction {
    type Error = LedgerError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: parse_uuid(&model.id, "transaction")?,
            kind: TransactionKind::try_from(model.kind.as_str())?,
            currency: Currency::try_from(model.currency.as_str())?,
            amount_minor: model.amount_minor,
            fee_minor: model.fee_minor,
            pay_account_id: model
                .pay_account_id
                .as_deref()
                .map(|id| parse_uuid(id, "account"))
                .transpose()?,
            receive_account_id: model
                .receive_account_id
                .as_deref()
                .map(|id| parse_uuid(id, "account"))
                .transpose()?,
            occurred_on: model.occurred_on,
            note: model.note,
            category_id: model
                .category_id
                .as_deref()
                .map(|id| parse_uuid(id, "category"))
                .transpose()?,
        })
    }
}
