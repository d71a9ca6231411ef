//! Kind-specific balance effects.
//!
//! Every monetary event implies an ordered list of signed balance
//! adjustments, one per touched `(account, currency)` pair. The policy is a
//! pure function of the event fields. Undoing an event is the element-wise
//! negation of the forward list, always computed from the event's *stored*
//! field values.
//!
//! Dispatch is an exhaustive `match` on the kind enums: adding a new kind
//! does not compile until it gets a row here.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    Currency, Exchange, LedgerError, ResultLedger, Trade, TradeKind, Transaction, TransactionKind,
};

/// A single signed balance adjustment implied by one event.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Effect {
    pub account_id: Uuid,
    pub currency: Currency,
    pub delta_minor: i64,
}

impl Effect {
    #[must_use]
    pub fn new(account_id: Uuid, currency: Currency, delta_minor: i64) -> Self {
        Self {
            account_id,
            currency,
            delta_minor,
        }
    }

    #[must_use]
    pub fn negated(self) -> Self {
        Self {
            delta_minor: -self.delta_minor,
            ..self
        }
    }
}

/// Element-wise negation, used to undo a previously applied event.
#[must_use]
pub fn reversed(effects: &[Effect]) -> Vec<Effect> {
    effects.iter().copied().map(Effect::negated).collect()
}

fn require_account(id: Option<Uuid>, kind: &str, role: &str) -> ResultLedger<Uuid> {
    id.ok_or_else(|| LedgerError::InvalidEvent(format!("{kind} requires a {role} account")))
}

pub(crate) fn transaction_effects(
    kind: TransactionKind,
    amount_minor: i64,
    fee_minor: i64,
    pay_account_id: Option<Uuid>,
    receive_account_id: Option<Uuid>,
    currency: Currency,
) -> ResultLedger<Vec<Effect>> {
    match kind {
        TransactionKind::Spending => {
            let pay = require_account(pay_account_id, "spending", "pay")?;
            Ok(vec![Effect::new(pay, currency, -(amount_minor + fee_minor))])
        }
        TransactionKind::Income => {
            let receive = require_account(receive_account_id, "income", "receive")?;
            Ok(vec![Effect::new(
                receive,
                currency,
                amount_minor - fee_minor,
            )])
        }
        TransactionKind::Transfer => {
            let pay = require_account(pay_account_id, "transfer", "pay")?;
            let receive = require_account(receive_account_id, "transfer", "receive")?;
            Ok(vec![
                Effect::new(pay, currency, -(amount_minor + fee_minor)),
                Effect::new(receive, currency, amount_minor),
            ])
        }
    }
}

pub(crate) fn trade_effects(
    kind: TradeKind,
    account_id: Uuid,
    amount_minor: i64,
    tax_minor: i64,
    fee_minor: i64,
    currency: Currency,
) -> Vec<Effect> {
    let delta_minor = match kind {
        TradeKind::Buy => -(amount_minor + tax_minor + fee_minor),
        TradeKind::Sell => amount_minor - tax_minor - fee_minor,
    };
    vec![Effect::new(account_id, currency, delta_minor)]
}

pub(crate) fn exchange_effects(
    account_id: Uuid,
    sell_currency: Currency,
    sell_amount_minor: i64,
    buy_currency: Currency,
    buy_amount_minor: i64,
    fee_minor: i64,
    base_currency: Currency,
) -> Vec<Effect> {
    let mut effects = vec![
        Effect::new(account_id, sell_currency, -sell_amount_minor),
        Effect::new(account_id, buy_currency, buy_amount_minor),
    ];
    // The exchange fee is charged in the configured base currency.
    if fee_minor > 0 {
        effects.push(Effect::new(account_id, base_currency, -fee_minor));
    }
    effects
}

impl Transaction {
    /// Balance effects this transaction implies.
    pub fn effects(&self) -> ResultLedger<Vec<Effect>> {
        transaction_effects(
            self.kind,
            self.amount_minor,
            self.fee_minor,
            self.pay_account_id,
            self.receive_account_id,
            self.currency,
        )
    }
}

impl Trade {
    /// Balance effects this trade implies.
    #[must_use]
    pub fn effects(&self) -> Vec<Effect> {
        trade_effects(
            self.kind,
            self.account_id,
            self.amount_minor(),
            self.tax_minor,
            self.fee_minor,
            self.currency,
        )
    }
}

impl Exchange {
    /// Balance effects this exchange implies; the fee leg is charged in
    /// `base_currency`.
    #[must_use]
    pub fn effects(&self, base_currency: Currency) -> Vec<Effect> {
        exchange_effects(
            self.account_id,
            self.sell_currency,
            self.sell_amount_minor,
            self.buy_currency,
            self.buy_amount_minor,
            self.fee_minor,
            base_currency,
        )
    }
}
