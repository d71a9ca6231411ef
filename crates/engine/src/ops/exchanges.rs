use sea_orm::{TransactionTrait, prelude::*};
use uuid::Uuid;

use crate::{
    Exchange, ExchangeForm, LedgerError, ResultLedger, exchanges, reversed,
    util::normalize_optional_text,
};

use super::{Ledger, with_tx};

fn build_exchange(id: Uuid, form: &ExchangeForm) -> ResultLedger<Exchange> {
    if form.sell_currency == form.buy_currency {
        return Err(LedgerError::InvalidEvent(
            "exchange currencies must differ".to_string(),
        ));
    }
    if form.sell_amount_minor <= 0 || form.buy_amount_minor <= 0 {
        return Err(LedgerError::InvalidAmount(
            "exchange amounts must be > 0".to_string(),
        ));
    }
    if form.fee_minor < 0 {
        return Err(LedgerError::InvalidAmount(
            "fee_minor must be >= 0".to_string(),
        ));
    }

    Ok(Exchange {
        id,
        kind: form.kind,
        account_id: form.account_id,
        sell_currency: form.sell_currency,
        sell_amount_minor: form.sell_amount_minor,
        buy_currency: form.buy_currency,
        buy_amount_minor: form.buy_amount_minor,
        fee_minor: form.fee_minor,
        occurred_on: form.occurred_on,
        note: normalize_optional_text(form.note.as_deref()),
    })
}

impl Ledger {
    /// Records a new currency exchange and applies its balance effects.
    pub async fn create_exchange(&self, form: &ExchangeForm) -> ResultLedger<Uuid> {
        let exchange = build_exchange(Uuid::new_v4(), form)?;
        let effects = exchange.effects(self.base_currency);

        with_tx!(self, |db_tx| {
            exchanges::ActiveModel::from(&exchange)
                .insert(&db_tx)
                .await?;
            self.apply_effects(&db_tx, &effects).await?;
            tracing::debug!(id = %exchange.id, kind = exchange.kind.as_str(), "exchange created");
            Ok(exchange.id)
        })
    }

    /// Rewrites an existing exchange, undoing the balance effects of its
    /// stored state before applying the new ones.
    pub async fn update_exchange(&self, exchange_id: Uuid, form: &ExchangeForm) -> ResultLedger<()> {
        with_tx!(self, |db_tx| {
            let model = exchanges::Entity::find_by_id(exchange_id.to_string())
                .one(&db_tx)
                .await?
                .ok_or_else(|| LedgerError::KeyNotFound("exchange not exists".to_string()))?;
            let before = Exchange::try_from(model)?;
            self.apply_effects(&db_tx, &reversed(&before.effects(self.base_currency)))
                .await?;

            let after = build_exchange(exchange_id, form)?;
            exchanges::ActiveModel::from(&after).update(&db_tx).await?;
            self.apply_effects(&db_tx, &after.effects(self.base_currency))
                .await?;
            tracing::debug!(id = %exchange_id, "exchange updated");
            Ok(())
        })
    }

    /// Deletes an exchange and undoes its balance effects.
    pub async fn delete_exchange(&self, exchange_id: Uuid) -> ResultLedger<()> {
        with_tx!(self, |db_tx| {
            let model = exchanges::Entity::find_by_id(exchange_id.to_string())
                .one(&db_tx)
                .await?
                .ok_or_else(|| LedgerError::KeyNotFound("exchange not exists".to_string()))?;
            let before = Exchange::try_from(model)?;

            exchanges::Entity::delete_by_id(exchange_id.to_string())
                .exec(&db_tx)
                .await?;
            self.apply_effects(&db_tx, &reversed(&before.effects(self.base_currency)))
                .await?;
            tracing::debug!(id = %exchange_id, "exchange deleted");
            Ok(())
        })
    }

    /// Return an [`Exchange`]
    pub async fn exchange(&self, exchange_id: Uuid) -> ResultLedger<Exchange> {
        let model = exchanges::Entity::find_by_id(exchange_id.to_string())
            .one(&self.database)
            .await?
            .ok_or_else(|| LedgerError::KeyNotFound("exchange not exists".to_string()))?;
        Exchange::try_from(model)
    }
}
