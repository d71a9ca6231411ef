//! Stock trade events.
//!
//! A trade settles against a single account in the trade currency: buys
//! charge the account the traded amount plus tax and fee, sells credit the
//! amount net of tax and fee.

use chrono::NaiveDate;
use sea_orm::{ActiveValue, entity::prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{Currency, LedgerError, util::parse_uuid};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TradeKind {
    Buy,
    Sell,
}

impl TradeKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Buy => "buy",
            Self::Sell => "sell",
        }
    }
}

impl TryFrom<&str> for TradeKind {
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
pub struct Trade {
    pub id: Uuid,
    pub kind: TradeKind,
    pub account_id: Uuid,
    /// Reference to the traded instrument; opaque to this engine.
    pub stock_id: Uuid,
    pub currency: Currency,
    pub quantity: i64,
    pub price_minor: i64,
    pub tax_minor: i64,
    pub fee_minor: i64,
    pub occurred_on: NaiveDate,
    pub note: Option<String>,
}

impl Trade {
    /// Total traded amount (`quantity * price`).
    #[must_use]
    pub fn amount_minor(&self) -> i64 {
        self.quantity * self.price_minor
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "trades")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub kind: String,
    pub account_id: String,
    pub stock_id: String,
    pub currency: String,
    pub quantity: i64,
    pub price_minor: i64,
    pub tax_minor: i64,
    pub fee_minor: i64,
    pub occurred_on: Date,
    pub note: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<&Trade> for ActiveModel {
    fn from(trade: &Trade) -> Self {
        Self {
            id: ActiveValue::Set(trade.id.to_string()),
            kind: ActiveValue::Set(trade.kind.as_str().to_string()),
            account_id: ActiveValue::Set(trade.account_id.to_string()),
            stock_id: ActiveValue::Set(trade.stock_id.to_string()),
            currency: ActiveValue::Set(trade.currency.code().to_string()),
            quantity: ActiveValue::Set(trade.quantity),
            price_minor: ActiveValue::Set(trade.price_minor),
            tax_minor: ActiveValue::Set(trade.tax_minor),
            fee_minor: ActiveValue::Set(trade.fee_minor),
            occurred_on: ActiveValue::Set(trade.occurred_on),
            note: ActiveValue::Set(trade.note.clone()),
        }
    }
}

impl TryFrom<Model> for Trade {
    type Error = LedgerError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: parse_uuid(&model.id, "trade")?,
            kind: TradeKind::try_from(model.kind.as_str())?,
            account_id: parse_uuid(&model.account_id, "account")?,
            stock_id: parse_uuid(&model.stock_id, "stock")?,
            currency: Currency::try_from(model.currency.as_str())?,
            quantity: model.quantity,
            price_minor: model.price_minor,
            tax_minor: model.tax_minor,
            fee_minor: model.fee_minor,
            occurred_on: model.occurred_on,
            note: model.note,
        })
    }
}
