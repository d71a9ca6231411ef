use sea_orm::{TransactionTrait, prelude::*};
use uuid::Uuid;

use crate::{
    LedgerError, ResultLedger, Transaction, TransactionForm, reversed, transactions,
    util::normalize_optional_text,
};

use super::{Ledger, with_tx};

fn build_transaction(id: Uuid, form: &TransactionForm) -> ResultLedger<Transaction> {
    if form.amount_minor <= 0 {
        return Err(LedgerError::InvalidAmount(
            "amount_minor must be > 0".to_string(),
        ));
    }
    if form.fee_minor < 0 {
        return Err(LedgerError::InvalidAmount(
            "fee_minor must be >= 0".to_string(),
        ));
    }

    Ok(Transaction {
        id,
        kind: form.kind,
        currency: form.currency,
        amount_minor: form.amount_minor,
        fee_minor: form.fee_minor,
        pay_account_id: form.pay_account_id,
        receive_account_id: form.receive_account_id,
        occurred_on: form.occurred_on,
        note: normalize_optional_text(form.note.as_deref()),
        category_id: form.category_id,
    })
}

impl Ledger {
    /// Records a new transaction and applies its balance effects.
    ///
    /// Nothing survives a failure: the event row and every balance change
    /// commit together or not at all.
    pub async fn create_transaction(&self, form: &TransactionForm) -> ResultLedger<Uuid> {
        let tx = build_transaction(Uuid::new_v4(), form)?;
        let effects = tx.effects()?;

        with_tx!(self, |db_tx| {
            transactions::ActiveModel::from(&tx).insert(&db_tx).await?;
            self.apply_effects(&db_tx, &effects).await?;
            tracing::debug!(id = %tx.id, kind = tx.kind.as_str(), "transaction created");
            Ok(tx.id)
        })
    }

    /// Rewrites an existing transaction.
    ///
    /// The balance effects of the stored state are undone before the new
    /// state's effects are applied; both happen in the same atomic scope, so
    /// this is equivalent to a delete immediately followed by a create that
    /// keeps the event's identity.
    pub async fn update_transaction(
        &self,
        transaction_id: Uuid,
        form: &TransactionForm,
    ) -> ResultLedger<()> {
        with_tx!(self, |db_tx| {
            let model = transactions::Entity::find_by_id(transaction_id.to_string())
                .one(&db_tx)
                .await?
                .ok_or_else(|| LedgerError::KeyNotFound("transaction not exists".to_string()))?;
            let before = Transaction::try_from(model)?;
            self.apply_effects(&db_tx, &reversed(&before.effects()?))
                .await?;

            let after = build_transaction(transaction_id, form)?;
            transactions::ActiveModel::from(&after).update(&db_tx).await?;
            self.apply_effects(&db_tx, &after.effects()?).await?;
            tracing::debug!(id = %transaction_id, "transaction updated");
            Ok(())
        })
    }

    /// Deletes a transaction and undoes its balance effects.
    pub async fn delete_transaction(&self, transaction_id: Uuid) -> ResultLedger<()> {
        with_tx!(self, |db_tx| {
            let model = transactions::Entity::find_by_id(transaction_id.to_string())
                .one(&db_tx)
                .await?
                .ok_or_else(|| LedgerError::KeyNotFound("transaction not exists".to_string()))?;
            let before = Transaction::try_from(model)?;

            transactions::Entity::delete_by_id(transaction_id.to_string())
                .exec(&db_tx)
                .await?;
            self.apply_effects(&db_tx, &reversed(&before.effects()?))
                .await?;
            tracing::debug!(id = %transaction_id, "transaction deleted");
            Ok(())
        })
    }

    /// Return a [`Transaction`]
    pub async fn transaction(&self, transaction_id: Uuid) -> ResultLedger<Transaction> {
        let model = transactions::Entity::find_by_id(transaction_id.to_string())
            .one(&self.database)
            .await?
            .ok_or_else(|| LedgerError::KeyNotFound("transaction not exists".to_string()))?;
        Transaction::try_from(model)
    }
}
