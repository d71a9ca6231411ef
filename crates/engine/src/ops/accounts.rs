use sea_orm::{QueryFilter, QueryOrder, TransactionTrait, prelude::*};
use uuid::Uuid;

use crate::{Account, LedgerError, ResultLedger, accounts, util::normalize_optional_text};

use super::{Ledger, with_tx};

impl Ledger {
    /// Add a new account. Names must be unique.
    pub async fn new_account(&self, name: &str, note: Option<&str>) -> ResultLedger<Uuid> {
        let name = name.trim();
        if name.is_empty() {
            return Err(LedgerError::InvalidEvent(
                "account name must not be empty".to_string(),
            ));
        }
        let account = Account::new(name.to_string(), normalize_optional_text(note));

        with_tx!(self, |db_tx| {
            let existing = accounts::Entity::find()
                .filter(accounts::Column::Name.eq(name))
                .one(&db_tx)
                .await?;
            if existing.is_some() {
                return Err(LedgerError::ExistingKey(name.to_string()));
            }

            accounts::ActiveModel::from(&account).insert(&db_tx).await?;
            Ok(account.id)
        })
    }

    /// Return an [`Account`]
    pub async fn account(&self, account_id: Uuid) -> ResultLedger<Account> {
        let model = accounts::Entity::find_by_id(account_id.to_string())
            .one(&self.database)
            .await?
            .ok_or_else(|| LedgerError::KeyNotFound("account not exists".to_string()))?;
        Account::try_from(model)
    }

    /// List all accounts, ordered by name.
    pub async fn accounts(&self) -> ResultLedger<Vec<Account>> {
        let models = accounts::Entity::find()
            .order_by_asc(accounts::Column::Name)
            .all(&self.database)
            .await?;
        models.into_iter().map(Account::try_from).collect()
    }
}
