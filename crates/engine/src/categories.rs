//! Transaction categories.
//!
//! Categories form a two-level tree: top-level categories have no parent,
//! leaf categories reference one. Monthly summaries attribute amounts to the
//! top-level parent of the transaction's category.

use sea_orm::{ActiveValue, entity::prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{LedgerError, TransactionKind, util::parse_uuid};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: Uuid,
    pub kind: TransactionKind,
    pub name: String,
    pub parent_id: Option<Uuid>,
}

impl Category {
    pub fn new(kind: TransactionKind, name: String, parent_id: Option<Uuid>) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind,
            name,
            parent_id,
        }
    }

    #[must_use]
    pub fn is_top_level(&self) -> bool {
        self.parent_id.is_none()
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "categories")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub kind: String,
    pub name: String,
    pub parent_id: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<&Category> for ActiveModel {
    fn from(category: &Category) -> Self {
        Self {
            id: ActiveValue::Set(category.id.to_string()),
            kind: ActiveValue::Set(category.kind.as_str().to_string()),
            name: ActiveValue::Set(category.name.clone()),
            parent_id: ActiveValue::Set(category.parent_id.map(|id| id.to_string())),
        }
    }
}

impl TryFrom<Model> for Category {
    type Error = LedgerError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: parse_uuid(&model.id, "category")?,
            kind: TransactionKind::try_from(model.kind.as_str())?,
            name: model.name,
            parent_id: model
                .parent_id
                .as_deref()
                .map(|id| parse_uuid(id, "category"))
                .transpose()?,
        })
    }
}
