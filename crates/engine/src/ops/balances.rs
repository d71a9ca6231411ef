use std::collections::HashMap;

use sea_orm::{ActiveValue, DatabaseTransaction, QueryFilter, TransactionTrait, prelude::*};
use uuid::Uuid;

use crate::{
    Currency, Effect, Exchange, ResultLedger, Trade, Transaction, balances, exchanges, trades,
    transactions, util::model_currency,
};

use super::{Ledger, with_tx};

impl Ledger {
    /// Applies one signed delta to one account balance for one currency.
    ///
    /// The `(account, currency)` row is created at zero when absent, so the
    /// net result always equals the prior balance plus the delta. Any account
    /// id is accepted; the mutator performs no existence check.
    pub(super) async fn apply_delta(
        &self,
        db_tx: &DatabaseTransaction,
        account_id: Uuid,
        currency: Currency,
        delta_minor: i64,
    ) -> ResultLedger<()> {
        let key = (account_id.to_string(), currency.code().to_string());
        let existing = balances::Entity::find_by_id(key.clone()).one(db_tx).await?;

        match existing {
            Some(model) => {
                let updated = balances::ActiveModel {
                    account_id: ActiveValue::Set(model.account_id),
                    currency: ActiveValue::Set(model.currency),
                    balance_minor: ActiveValue::Set(model.balance_minor + delta_minor),
                };
                updated.update(db_tx).await?;
            }
            None => {
                let created = balances::ActiveModel {
                    account_id: ActiveValue::Set(key.0),
                    currency: ActiveValue::Set(key.1),
                    balance_minor: ActiveValue::Set(delta_minor),
                };
                created.insert(db_tx).await?;
            }
        }
        Ok(())
    }

    /// Applies an effect list in order within the given atomic scope.
    pub(super) async fn apply_effects(
        &self,
        db_tx: &DatabaseTransaction,
        effects: &[Effect],
    ) -> ResultLedger<()> {
        for effect in effects {
            self.apply_delta(db_tx, effect.account_id, effect.currency, effect.delta_minor)
                .await?;
        }
        Ok(())
    }

    /// Balance map for one account, keyed by currency.
    ///
    /// Contains every currency the account was ever touched in, including
    /// entries that are back to zero.
    pub async fn account_balances(&self, account_id: Uuid) -> ResultLedger<HashMap<Currency, i64>> {
        let models = balances::Entity::find()
            .filter(balances::Column::AccountId.eq(account_id.to_string()))
            .all(&self.database)
            .await?;

        let mut out = HashMap::with_capacity(models.len());
        for model in models {
            out.insert(model_currency(&model.currency)?, model.balance_minor);
        }
        Ok(out)
    }

    /// Balance of one account in one currency (0 when no entry exists yet).
    pub async fn balance(&self, account_id: Uuid, currency: Currency) -> ResultLedger<i64> {
        let model = balances::Entity::find_by_id((
            account_id.to_string(),
            currency.code().to_string(),
        ))
        .one(&self.database)
        .await?;
        Ok(model.map_or(0, |m| m.balance_minor))
    }

    /// Recomputes every account balance from the stored events.
    ///
    /// Zeroes all existing balance rows, then replays the effects of every
    /// transaction, trade and exchange inside one atomic scope. Restores the
    /// derived state after external corruption.
    pub async fn recompute_balances(&self) -> ResultLedger<()> {
        with_tx!(self, |db_tx| {
            let balance_models = balances::Entity::find().all(&db_tx).await?;
            for model in balance_models {
                let zeroed = balances::ActiveModel {
                    account_id: ActiveValue::Set(model.account_id),
                    currency: ActiveValue::Set(model.currency),
                    balance_minor: ActiveValue::Set(0),
                };
                zeroed.update(&db_tx).await?;
            }

            let tx_models = transactions::Entity::find().all(&db_tx).await?;
            for model in tx_models {
                let tx = Transaction::try_from(model)?;
                self.apply_effects(&db_tx, &tx.effects()?).await?;
            }

            let trade_models = trades::Entity::find().all(&db_tx).await?;
            for model in trade_models {
                let trade = Trade::try_from(model)?;
                self.apply_effects(&db_tx, &trade.effects()).await?;
            }

            let exchange_models = exchanges::Entity::find().all(&db_tx).await?;
            for model in exchange_models {
                let exchange = Exchange::try_from(model)?;
                self.apply_effects(&db_tx, &exchange.effects(self.base_currency))
                    .await?;
            }

            tracing::debug!("account balances recomputed from events");
            Ok(())
        })
    }
}
