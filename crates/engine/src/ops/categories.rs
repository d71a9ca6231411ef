use sea_orm::{QueryFilter, QueryOrder, TransactionTrait, prelude::*};
use uuid::Uuid;

use crate::{Category, LedgerError, ResultLedger, TransactionKind, categories};

use super::{Ledger, with_tx};

impl Ledger {
    /// Add a new category. Pass `parent_id` to create a leaf under an
    /// existing top-level category.
    pub async fn new_category(
        &self,
        kind: TransactionKind,
        name: &str,
        parent_id: Option<Uuid>,
    ) -> ResultLedger<Uuid> {
        let name = name.trim();
        if name.is_empty() {
            return Err(LedgerError::InvalidEvent(
                "category name must not be empty".to_string(),
            ));
        }

        with_tx!(self, |db_tx| {
            if let Some(parent_id) = parent_id {
                categories::Entity::find_by_id(parent_id.to_string())
                    .one(&db_tx)
                    .await?
                    .ok_or_else(|| LedgerError::KeyNotFound("category not exists".to_string()))?;
            }

            let category = Category::new(kind, name.to_string(), parent_id);
            categories::ActiveModel::from(&category)
                .insert(&db_tx)
                .await?;
            Ok(category.id)
        })
    }

    /// List the categories of one transaction kind, ordered by name.
    pub async fn categories(&self, kind: TransactionKind) -> ResultLedger<Vec<Category>> {
        let models = categories::Entity::find()
            .filter(categories::Column::Kind.eq(kind.as_str()))
            .order_by_asc(categories::Column::Name)
            .all(&self.database)
            .await?;
        models.into_iter().map(Category::try_from).collect()
    }
}
