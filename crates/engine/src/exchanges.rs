//! Currency exchange events.
//!
//! An exchange converts money inside one account: it removes the sold amount
//! in the sold currency, adds the bought amount in the bought currency, and
//! charges the fee in the ledger's base currency. Exchange rates are
//! whatever the two amounts imply; the engine does not compute them.

use chrono::NaiveDate;
use sea_orm::{ActiveValue, entity::prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{Currency, LedgerError, util::parse_uuid};

/// Direction of the exchange relative to the base currency (reporting tag).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExchangeKind {
    Buy,
    Sell,
}

impl ExchangeKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Buy => "buy",
            Self::Sell => "sell",
        }
    }
}

impl TryFrom<&str> for ExchangeKind {
    type Error = LedgerError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "buy" => Ok(Self::Buy),
            "sell" => Ok(Self::Sell),
            other => Err(LedgerError::UnknownKind(other.to_string())),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Exchange {
    pub id: Uuid,
    pub kind: ExchangeKind,
    pub account_id: Uuid,
    pub sell_currency: Currency,
    pub sell_amount_minor: i64,
    pub buy_currency: Currency,
    pub buy_amount_minor: i64,
    pub fee_minor: i64,
    pub occurred_on: NaiveDate,
    pub note: Option<String>,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "exchanges")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub kind: String,
    pub account_id: String,
    pub sell_currency: String,
    pub sell_amount_minor: i64,
    pub buy_currency: String,
    pub buy_amount_minor: i64,
    pub fee_minor: i64,
    pub occurred_on: Date,
    pub note: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<&Exchange> for ActiveModel {
    fn from(exchange: &Exchange) -> Self {
        Self {
            id: ActiveValue::Set(exchange.id.to_string()),
            kind: ActiveValue::Set(exchange.kind.as_str().to_string()),
            account_id: ActiveValue::Set(exchange.account_id.to_string()),
            sell_currency: ActiveValue::Set(exchange.sell_currency.code().to_string()),
            sell_amount_minor: ActiveValue::Set(exchange.sell_amount_minor),
            buy_currency: ActiveValue::Set(exchange.buy_currency.code().to_string()),
            buy_amount_minor: ActiveValue::Set(exchange.buy_amount_minor),
            fee_minor: ActiveValue::Set(exchange.fee_minor),
            occurred_on: ActiveValue::Set(exchange.occurred_on),
            note: ActiveValue::Set(exchange.note.clone()),
        }
    }
}

impl TryFrom<Model> for Exchange {
    type Error = LedgerError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: parse_uuid(&model.id, "exchange")?,
            kind: ExchangeKind::try_from(model.kind.as_str())?,
            account_id: parse_uuid(&model.account_id, "account")?,
            sell_currency: Currency::try_from(model.sell_currency.as_str())?,
            sell_amount_minor: model.sell_amount_minor,
            buy_currency: Currency::try_from(model.buy_currency.as_str())?,
            buy_amount_minor: model.buy_amount_minor,
            fee_minor: model.fee_minor,
            occurred_on: model.occurred_on,
            note: model.note,
        })
    }
}
