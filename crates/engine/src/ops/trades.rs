use sea_orm::{TransactionTrait, prelude::*};
use uuid::Uuid;

use crate::{
    LedgerError, ResultLedger, Trade, TradeForm, reversed, trades, util::normalize_optional_text,
};

use super::{Ledger, with_tx};

fn build_trade(id: Uuid, form: &TradeForm) -> ResultLedger<Trade> {
    if form.quantity <= 0 {
        return Err(LedgerError::InvalidAmount(
            "quantity must be > 0".to_string(),
        ));
    }
    if form.price_minor <= 0 {
        return Err(LedgerError::InvalidAmount(
            "price_minor must be > 0".to_string(),
        ));
    }
    if form.tax_minor < 0 || form.fee_minor < 0 {
        return Err(LedgerError::InvalidAmount(
            "tax_minor and fee_minor must be >= 0".to_string(),
        ));
    }
    if form.quantity.checked_mul(form.price_minor).is_none() {
        return Err(LedgerError::InvalidAmount(
            "trade amount overflows".to_string(),
        ));
    }

    Ok(Trade {
        id,
        kind: form.kind,
        account_id: form.account_id,
        stock_id: form.stock_id,
        currency: form.currency,
        quantity: form.quantity,
        price_minor: form.price_minor,
        tax_minor: form.tax_minor,
        fee_minor: form.fee_minor,
        occurred_on: form.occurred_on,
        note: normalize_optional_text(form.note.as_deref()),
    })
}

impl Ledger {
    /// Records a new stock trade and applies its balance effects.
    pub async fn create_trade(&self, form: &TradeForm) -> ResultLedger<Uuid> {
        let trade = build_trade(Uuid::new_v4(), form)?;
        let effects = trade.effects();

        with_tx!(self, |db_tx| {
            trades::ActiveModel::from(&trade).insert(&db_tx).await?;
            self.apply_effects(&db_tx, &effects).await?;
            tracing::debug!(id = %trade.id, kind = trade.kind.as_str(), "trade created");
            Ok(trade.id)
        })
    }

    /// Rewrites an existing trade, undoing the balance effects of its stored
    /// state before applying the new ones.
    pub async fn update_trade(&self, trade_id: Uuid, form: &TradeForm) -> ResultLedger<()> {
        with_tx!(self, |db_tx| {
            let model = trades::Entity::find_by_id(trade_id.to_string())
                .one(&db_tx)
                .await?
                .ok_or_else(|| LedgerError::KeyNotFound("trade not exists".to_string()))?;
            let before = Trade::try_from(model)?;
            self.apply_effects(&db_tx, &reversed(&before.effects()))
                .await?;

            let after = build_trade(trade_id, form)?;
            trades::ActiveModel::from(&after).update(&db_tx).await?;
            self.apply_effects(&db_tx, &after.effects()).await?;
            tracing::debug!(id = %trade_id, "trade updated");
            Ok(())
        })
    }

    /// Deletes a trade and undoes its balance effects.
    pub async fn delete_trade(&self, trade_id: Uuid) -> ResultLedger<()> {
        with_tx!(self, |db_tx| {
            let model = trades::Entity::find_by_id(trade_id.to_string())
                .one(&db_tx)
                .await?
                .ok_or_else(|| LedgerError::KeyNotFound("trade not exists".to_string()))?;
            let before = Trade::try_from(model)?;

            trades::Entity::delete_by_id(trade_id.to_string())
                .exec(&db_tx)
                .await?;
            self.apply_effects(&db_tx, &reversed(&before.effects()))
                .await?;
            tracing::debug!(id = %trade_id, "trade deleted");
            Ok(())
        })
    }

    /// Return a [`Trade`]
    pub async fn trade(&self, trade_id: Uuid) -> ResultLedger<Trade> {
        let model = trades::Entity::find_by_id(trade_id.to_string())
            .one(&self.database)
            .await?
            .ok_or_else(|| LedgerError::KeyNotFound("trade not exists".to_string()))?;
        Trade::try_from(model)
    }
}
