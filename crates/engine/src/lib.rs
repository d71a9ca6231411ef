pub use accounts::Account;
pub use categories::Category;
pub use commands::{ExchangeForm, TradeForm, TransactionForm};
pub use currency::Currency;
pub use effects::{Effect, reversed};
pub use error::LedgerError;
pub use exchanges::{Exchange, ExchangeKind};
pub use money::{format_minor, parse_major};
pub use ops::{
    Ledger, LedgerBuilder, MonthlyAmountSum, MonthlyCategorySummary, TransactionSearch,
};
pub use trades::{Trade, TradeKind};
pub use transactions::{Transaction, TransactionKind};

mod accounts;
mod balances;
mod categories;
mod commands;
mod currency;
mod effects;
mod error;
mod exchanges;
mod money;
mod ops;
mod trades;
mod transactions;
mod util;

type ResultLedger<T> = Result<T, LedgerError>;
