//! Initial schema migration - creates all tables from scratch.
//!
//! It creates the complete schema for the ledger engine:
//!
//! - `accounts`: places money is kept (cash, bank, brokerage)
//! - `account_balances`: derived per-account, per-currency balances
//! - `categories`: two-level transaction categories
//! - `transactions`: spending / income / transfer events
//! - `trades`: stock buy / sell events
//! - `exchanges`: currency exchange events

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

// ─────────────────────────────────────────────────────────────────────────────
// Table identifiers
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Iden)]
enum Accounts {
    Table,
    Id,
    Name,
    Note,
    Archived,
}

#[derive(Iden)]
enum AccountBalances {
    Table,
    AccountId,
    Currency,
    BalanceMinor,
}

#[derive(Iden)]
enum Categories {
    Table,
    Id,
    Kind,
    Name,
    ParentId,
}

#[derive(Iden)]
enum Transactions {
    Table,
    Id,
    Kind,
    Currency,
    AmountMinor,
    FeeMinor,
    PayAccountId,
    ReceiveAccountId,
    OccurredOn,
    Note,
    CategoryId,
}

#[derive(Iden)]
enum Trades {
    Table,
    Id,
    Kind,
    AccountId,
    StockId,
    Currency,
    Quantity,
    PriceMinor,
    TaxMinor,
    FeeMinor,
    OccurredOn,
    Note,
}

#[derive(Iden)]
enum Exchanges {
    Table,
    Id,
    Kind,
    AccountId,
    SellCurrency,
    SellAmountMinor,
    BuyCurrency,
    BuyAmountMinor,
    FeeMinor,
    OccurredOn,
    Note,
}

// ─────────────────────────────────────────────────────────────────────────────
// Migration implementation
// ─────────────────────────────────────────────────────────────────────────────

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // ───────────────────────────────────────────────────────────────────
        // 1. Accounts
        // ───────────────────────────────────────────────────────────────────
        manager
            .create_table(
                Table::create()
                    .table(Accounts::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Accounts::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Accounts::Name).string().not_null())
                    .col(ColumnDef::new(Accounts::Note).string())
                    .col(ColumnDef::new(Accounts::Archived).boolean().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-accounts-name-unique")
                    .table(Accounts::Table)
                    .col(Accounts::Name)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // ───────────────────────────────────────────────────────────────────
        // 2. Account balances
        // ───────────────────────────────────────────────────────────────────
        // Derived state keyed by (account, currency). Deliberately no foreign
        // key on account_id: balance rows are created lazily for whatever
        // account id an event references.
        manager
            .create_table(
                Table::create()
                    .table(AccountBalances::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(AccountBalances::AccountId)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(AccountBalances::Currency)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(AccountBalances::BalanceMinor)
                            .big_integer()
                            .not_null(),
                    )
                    .primary_key(
                        Index::create()
                            .col(AccountBalances::AccountId)
                            .col(AccountBalances::Currency),
                    )
                    .to_owned(),
            )
            .await?;

        // ───────────────────────────────────────────────────────────────────
        // 3. Categories
        // ───────────────────────────────────────────────────────────────────
        manager
            .create_table(
                Table::create()
                    .table(Categories::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Categories::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Categories::Kind).string().not_null())
                    .col(ColumnDef::new(Categories::Name).string().not_null())
                    .col(ColumnDef::new(Categories::ParentId).string())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-categories-parent_id")
                            .from(Categories::Table, Categories::ParentId)
                            .to(Categories::Table, Categories::Id),
                    )
                    .to_owned(),
            )
            .await?;

        // ───────────────────────────────────────────────────────────────────
        // 4. Transactions
        // ───────────────────────────────────────────────────────────────────
        manager
            .create_table(
                Table::create()
                    .table(Transactions::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Transactions::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Transactions::Kind).string().not_null())
                    .col(ColumnDef::new(Transactions::Currency).string().not_null())
                    .col(
                        ColumnDef::new(Transactions::AmountMinor)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Transactions::FeeMinor)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Transactions::PayAccountId).string())
                    .col(ColumnDef::new(Transactions::ReceiveAccountId).string())
                    .col(ColumnDef::new(Transactions::OccurredOn).date().not_null())
                    .col(ColumnDef::new(Transactions::Note).string())
                    .col(ColumnDef::new(Transactions::CategoryId).string())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-transactions-occurred_on")
                    .table(Transactions::Table)
                    .col(Transactions::OccurredOn)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-transactions-category_id")
                    .table(Transactions::Table)
                    .col(Transactions::CategoryId)
                    .to_owned(),
            )
            .await?;

        // ───────────────────────────────────────────────────────────────────
        // 5. Trades
        // ───────────────────────────────────────────────────────────────────
        manager
            .create_table(
                Table::create()
                    .table(Trades::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Trades::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Trades::Kind).string().not_null())
                    .col(ColumnDef::new(Trades::AccountId).string().not_null())
                    .col(ColumnDef::new(Trades::StockId).string().not_null())
                    .col(ColumnDef::new(Trades::Currency).string().not_null())
                    .col(ColumnDef::new(Trades::Quantity).big_integer().not_null())
                    .col(ColumnDef::new(Trades::PriceMinor).big_integer().not_null())
                    .col(ColumnDef::new(Trades::TaxMinor).big_integer().not_null())
                    .col(ColumnDef::new(Trades::FeeMinor).big_integer().not_null())
                    .col(ColumnDef::new(Trades::OccurredOn).date().not_null())
                    .col(ColumnDef::new(Trades::Note).string())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-trades-account_id")
                    .table(Trades::Table)
                    .col(Trades::AccountId)
                    .to_owned(),
            )
            .await?;

        // ───────────────────────────────────────────────────────────────────
        // 6. Exchanges
        // ───────────────────────────────────────────────────────────────────
        manager
            .create_table(
                Table::create()
                    .table(Exchanges::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Exchanges::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Exchanges::Kind).string().not_null())
                    .col(ColumnDef::new(Exchanges::AccountId).string().not_null())
                    .col(ColumnDef::new(Exchanges::SellCurrency).string().not_null())
                    .col(
                        ColumnDef::new(Exchanges::SellAmountMinor)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Exchanges::BuyCurrency).string().not_null())
                    .col(
                        ColumnDef::new(Exchanges::BuyAmountMinor)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Exchanges::FeeMinor).big_integer().not_null())
                    .col(ColumnDef::new(Exchanges::OccurredOn).date().not_null())
                    .col(ColumnDef::new(Exchanges::Note).string())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-exchanges-account_id")
                    .table(Exchanges::Table)
                    .col(Exchanges::AccountId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Exchanges::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Trades::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Transactions::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Categories::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(AccountBalances::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Accounts::Table).to_owned())
            .await?;
        Ok(())
    }
}
