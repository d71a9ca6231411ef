use chrono::NaiveDate;
use sea_orm::sea_query::{Expr, LikeExpr};
use sea_orm::{Condition, QueryFilter, QueryOrder, Statement, prelude::*};
use uuid::Uuid;

use crate::{
    Currency, LedgerError, ResultLedger, Transaction, TransactionKind, transactions,
    util::{escape_like, parse_uuid},
};

use super::Ledger;

/// Filters for searching transactions.
///
/// `from` and `to` are inclusive calendar dates. Built once and passed to
/// [`Ledger::search_transactions`]; the criteria themselves never mutate a
/// running query.
#[derive(Clone, Debug)]
pub struct TransactionSearch {
    pub from: NaiveDate,
    pub to: NaiveDate,
    /// If present, acts as an allow-list of kinds to return.
    pub kinds: Option<Vec<TransactionKind>>,
    pub currency: Option<Currency>,
    /// Matches the pay **or** the receive side.
    pub account_id: Option<Uuid>,
    /// Substring match on the note; `%`/`_` in the needle match literally.
    pub note: Option<String>,
}

impl TransactionSearch {
    #[must_use]
    pub fn new(from: NaiveDate, to: NaiveDate) -> Self {
        Self {
            from,
            to,
            kinds: None,
            currency: None,
            account_id: None,
            note: None,
        }
    }

    #[must_use]
    pub fn kinds(mut self, kinds: Vec<TransactionKind>) -> Self {
        self.kinds = Some(kinds);
        self
    }

    #[must_use]
    pub fn currency(mut self, currency: Currency) -> Self {
        self.currency = Some(currency);
        self
    }

    #[must_use]
    pub fn account(mut self, account_id: Uuid) -> Self {
        self.account_id = Some(account_id);
        self
    }

    #[must_use]
    pub fn note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }
}

fn validate_search(search: &TransactionSearch) -> ResultLedger<()> {
    if search.from > search.to {
        return Err(LedgerError::InvalidAmount(
            "invalid range: from must be <= to".to_string(),
        ));
    }
    if search.kinds.as_ref().is_some_and(|k| k.is_empty()) {
        return Err(LedgerError::InvalidAmount(
            "kinds must not be empty".to_string(),
        ));
    }
    Ok(())
}

/// One month bucket of the per-top-level-category summary.
///
/// `parent_category_id` is the top-level parent of the transaction's
/// category; `None` groups transactions whose category is itself top-level
/// or missing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MonthlyCategorySummary {
    /// First day of the month bucket.
    pub month: NaiveDate,
    pub parent_category_id: Option<Uuid>,
    pub amount_minor: i64,
}

/// One month bucket of the per-kind amount/fee sums.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MonthlyAmountSum {
    /// First day of the month bucket.
    pub month: NaiveDate,
    pub kind: TransactionKind,
    pub amount_minor: i64,
    pub fee_minor: i64,
}

fn parse_month(value: &str) -> ResultLedger<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|_| LedgerError::InvalidEvent(format!("invalid month bucket: {value}")))
}

impl Ledger {
    /// Lists transactions matching `search`, newest first
    /// (`occurred_on DESC, id DESC`).
    pub async fn search_transactions(
        &self,
        search: &TransactionSearch,
    ) -> ResultLedger<Vec<Transaction>> {
        validate_search(search)?;

        let mut query = transactions::Entity::find()
            .filter(transactions::Column::OccurredOn.gte(search.from))
            .filter(transactions::Column::OccurredOn.lte(search.to));

        if let Some(kinds) = &search.kinds {
            let kinds: Vec<String> = kinds.iter().map(|k| k.as_str().to_string()).collect();
            query = query.filter(transactions::Column::Kind.is_in(kinds));
        }
        if let Some(currency) = search.currency {
            query = query.filter(transactions::Column::Currency.eq(currency.code()));
        }
        if let Some(account_id) = search.account_id {
            let id = account_id.to_string();
            query = query.filter(
                Condition::any()
                    .add(transactions::Column::PayAccountId.eq(id.clone()))
                    .add(transactions::Column::ReceiveAccountId.eq(id)),
            );
        }
        if let Some(note) = &search.note {
            let pattern = format!("%{}%", escape_like(note));
            query = query.filter(
                Expr::col((transactions::Entity, transactions::Column::Note))
                    .like(LikeExpr::new(pattern).escape('\\')),
            );
        }

        let rows = query
            .order_by_desc(transactions::Column::OccurredOn)
            .order_by_desc(transactions::Column::Id)
            .all(&self.database)
            .await?;
        rows.into_iter().map(Transaction::try_from).collect()
    }

    /// Month-bucketed amount sums of one kind/currency, grouped by the
    /// top-level parent of each transaction's category, ascending by month.
    pub async fn monthly_category_summary(
        &self,
        from: NaiveDate,
        to: NaiveDate,
        kind: TransactionKind,
        currency: Currency,
    ) -> ResultLedger<Vec<MonthlyCategorySummary>> {
        let backend = self.database.get_database_backend();
        let stmt = Statement::from_sql_and_values(
            backend,
            "SELECT strftime('%Y-%m-01', t.occurred_on) AS month, \
                    c.parent_id AS parent_id, \
                    COALESCE(SUM(t.amount_minor), 0) AS amount \
             FROM transactions t \
             LEFT JOIN categories c ON t.category_id = c.id \
             WHERE t.occurred_on BETWEEN ? AND ? \
               AND t.kind = ? AND t.currency = ? \
             GROUP BY strftime('%Y-%m-01', t.occurred_on), c.parent_id \
             ORDER BY strftime('%Y-%m-01', t.occurred_on) ASC",
            vec![from.into(), to.into(), kind.as_str().into(), currency.code().into()],
        );

        let rows = self.database.query_all(stmt).await?;
        let mut out = Vec::with_capacity(rows.len());
        for row in rows {
            let month: String = row.try_get("", "month")?;
            let parent_id: Option<String> = row.try_get("", "parent_id")?;
            let amount_minor: i64 = row.try_get("", "amount")?;
            out.push(MonthlyCategorySummary {
                month: parse_month(&month)?,
                parent_category_id: parent_id
                    .as_deref()
                    .map(|id| parse_uuid(id, "category"))
                    .transpose()?,
                amount_minor,
            });
        }
        Ok(out)
    }

    /// Month-bucketed amount and fee sums of one currency, grouped by kind,
    /// ascending by month.
    pub async fn monthly_amount_sum(
        &self,
        from: NaiveDate,
        to: NaiveDate,
        currency: Currency,
    ) -> ResultLedger<Vec<MonthlyAmountSum>> {
        let backend = self.database.get_database_backend();
        let stmt = Statement::from_sql_and_values(
            backend,
            "SELECT strftime('%Y-%m-01', occurred_on) AS month, \
                    kind, \
                    COALESCE(SUM(amount_minor), 0) AS amount, \
                    COALESCE(SUM(fee_minor), 0) AS fee \
             FROM transactions \
             WHERE occurred_on BETWEEN ? AND ? AND currency = ? \
             GROUP BY strftime('%Y-%m-01', occurred_on), kind \
             ORDER BY strftime('%Y-%m-01', occurred_on) ASC",
            vec![from.into(), to.into(), currency.code().into()],
        );

        let rows = self.database.query_all(stmt).await?;
        let mut out = Vec::with_capacity(rows.len());
        for row in rows {
            let month: String = row.try_get("", "month")?;
            let kind: String = row.try_get("", "kind")?;
            let amount_minor: i64 = row.try_get("", "amount")?;
            let fee_minor: i64 = row.try_get("", "fee")?;
            out.push(MonthlyAmountSum {
                month: parse_month(&month)?,
                kind: TransactionKind::try_from(kind.as_str())?,
                amount_minor,
                fee_minor,
            });
        }
        Ok(out)
    }

    /// Category ids of `kind` transactions within the 100 days before
    /// `today`, most frequent first.
    ///
    /// With `note_prefix`, only transactions whose note starts with the
    /// prefix are counted (wildcards in the prefix match literally).
    pub async fn frequent_categories(
        &self,
        kind: TransactionKind,
        note_prefix: Option<&str>,
        today: NaiveDate,
    ) -> ResultLedger<Vec<Uuid>> {
        let from = today - chrono::Duration::days(100);

        let note_cond = if note_prefix.is_some() {
            " AND note LIKE ? ESCAPE '\\'"
        } else {
            ""
        };
        let mut values: Vec<sea_orm::Value> = vec![from.into(), kind.as_str().into()];
        if let Some(prefix) = note_prefix {
            values.push(format!("{}%", escape_like(prefix)).into());
        }

        let backend = self.database.get_database_backend();
        let stmt = Statement::from_sql_and_values(
            backend,
            format!(
                "SELECT category_id, COUNT(*) AS cnt \
                 FROM transactions \
                 WHERE occurred_on > ? AND kind = ? AND category_id IS NOT NULL{note_cond} \
                 GROUP BY category_id \
                 ORDER BY cnt DESC"
            ),
            values,
        );

        let rows = self.database.query_all(stmt).await?;
        let mut out = Vec::with_capacity(rows.len());
        for row in rows {
            let category_id: String = row.try_get("", "category_id")?;
            out.push(parse_uuid(&category_id, "category")?);
        }
        Ok(out)
    }
}
