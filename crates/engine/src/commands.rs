//! Form structs for write operations.
//!
//! These types group the caller-supplied fields of an event for create and
//! update calls, keeping call sites readable and avoiding long argument
//! lists. The same form type is used for both: update overwrites the stored
//! row with the form's fields while keeping the event's identity.

use chrono::NaiveDate;
use uuid::Uuid;

use crate::{Currency, ExchangeKind, TradeKind, TransactionKind};

/// Fields of a spending/income/transfer event.
#[derive(Clone, Debug)]
pub struct TransactionForm {
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

impl TransactionForm {
    #[must_use]
    pub fn new(
        kind: TransactionKind,
        currency: Currency,
        amount_minor: i64,
        occurred_on: NaiveDate,
    ) -> Self {
        Self {
            kind,
            currency,
            amount_minor,
            fee_minor: 0,
            pay_account_id: None,
            receive_account_id: None,
            occurred_on,
            note: None,
            category_id: None,
        }
    }

    #[must_use]
    pub fn fee(mut self, fee_minor: i64) -> Self {
        self.fee_minor = fee_minor;
        self
    }

    #[must_use]
    pub fn pay_account(mut self, account_id: Uuid) -> Self {
        self.pay_account_id = Some(account_id);
        self
    }

    #[must_use]
    pub fn receive_account(mut self, account_id: Uuid) -> Self {
        self.receive_account_id = Some(account_id);
        self
    }

    #[must_use]
    pub fn note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }

    #[must_use]
    pub fn category(mut self, category_id: Uuid) -> Self {
        self.category_id = Some(category_id);
        self
    }
}

/// Fields of a stock trade event.
#[derive(Clone, Debug)]
pub struct TradeForm {
    pub kind: TradeKind,
    pub account_id: Uuid,
    pub stock_id: Uuid,
    pub currency: Currency,
    pub quantity: i64,
    pub price_minor: i64,
    pub tax_minor: i64,
    pub fee_minor: i64,
    pub occurred_on: NaiveDate,
    pub note: Option<String>,
}

impl TradeForm {
    #[must_use]
    pub fn new(
        kind: TradeKind,
        account_id: Uuid,
        stock_id: Uuid,
        currency: Currency,
        quantity: i64,
        price_minor: i64,
        occurred_on: NaiveDate,
    ) -> Self {
        Self {
            kind,
            account_id,
            stock_id,
            currency,
            quantity,
            price_minor,
            tax_minor: 0,
            fee_minor: 0,
            occurred_on,
            note: None,
        }
    }

    #[must_use]
    pub fn tax(mut self, tax_minor: i64) -> Self {
        self.tax_minor = tax_minor;
        self
    }

    #[must_use]
    pub fn fee(mut self, fee_minor: i64) -> Self {
        self.fee_minor = fee_minor;
        self
    }

    #[must_use]
    pub fn note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }
}

/// Fields of a currency exchange event.
#[derive(Clone, Debug)]
pub struct ExchangeForm {
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

impl ExchangeForm {
    #[must_use]
    pub fn new(
        kind: ExchangeKind,
        account_id: Uuid,
        sell_currency: Currency,
        sell_amount_minor: i64,
        buy_currency: Currency,
        buy_amount_minor: i64,
        occurred_on: NaiveDate,
    ) -> Self {
        Self {
            kind,
            account_id,
            sell_currency,
            sell_amount_minor,
            buy_currency,
            buy_amount_minor,
            fee_minor: 0,
            occurred_on,
            note: None,
        }
    }

    #[must_use]
    pub fn fee(mut self, fee_minor: i64) -> Self {
        self.fee_minor = fee_minor;
        self
    }

    #[must_use]
    pub fn note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }
}
