use sea_orm::DatabaseConnection;

use crate::Currency;

mod accounts;
mod balances;
mod categories;
mod exchanges;
mod search;
mod trades;
mod transactions;

pub use search::{MonthlyAmountSum, MonthlyCategorySummary, TransactionSearch};

/// Run a block inside a DB transaction, committing on success and rolling back on error.
macro_rules! with_tx {
    ($self:expr, |$tx:ident| $body:expr) => {{
        let $tx = $self.database.begin().await?;
        let result = $body;
        match result {
            Ok(value) => {
                $tx.commit().await?;
                Ok(value)
            }
            Err(err) => Err(err),
        }
    }};
}

pub(crate) use with_tx;

/// The ledger engine.
///
/// Owns the database handle and keeps the derived account balances exactly
/// in sync with the stored events: every write operation runs as one atomic
/// scope that either fully commits or leaves no trace.
#[derive(Debug)]
pub struct Ledger {
    database: DatabaseConnection,
    base_currency: Currency,
}

impl Ledger {
    /// Return a builder for `Ledger`. Help to build the struct.
    pub fn builder() -> LedgerBuilder {
        LedgerBuilder::default()
    }

    /// Currency that exchange fees are charged in.
    #[must_use]
    pub fn base_currency(&self) -> Currency {
        self.base_currency
    }
}

/// The builder for `Ledger`
#[derive(Default)]
pub struct LedgerBuilder {
    database: DatabaseConnection,
    base_currency: Currency,
}

impl LedgerBuilder {
    /// Pass the required database
    pub fn database(mut self, db: DatabaseConnection) -> LedgerBuilder {
        self.database = db;
        self
    }

    /// Currency exchange fees are charged in (defaults to KRW).
    pub fn base_currency(mut self, currency: Currency) -> LedgerBuilder {
        self.base_currency = currency;
        self
    }

    /// Construct `Ledger`
    pub async fn build(self) -> crate::ResultLedger<Ledger> {
        Ok(Ledger {
            database: self.database,
            base_currency: self.base_currency,
        })
    }
}
