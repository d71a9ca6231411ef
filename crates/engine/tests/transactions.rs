use chrono::NaiveDate;
use sea_orm::Database;
use uuid::Uuid;

use engine::{Currency, Ledger, LedgerError, TransactionForm, TransactionKind};
use migration::MigratorTrait;

async fn ledger() -> Ledger {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    migration::Migrator::up(&db, None).await.unwrap();
    Ledger::builder().database(db).build().await.unwrap()
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[tokio::test]
async fn spending_charges_pay_account() {
    let ledger = ledger().await;
    let cash = ledger.new_account("Cash", None).await.unwrap();

    ledger
        .create_transaction(
            &TransactionForm::new(TransactionKind::Spending, Currency::Krw, 1000, date(2026, 7, 1))
                .fee(10)
                .pay_account(cash),
        )
        .await
        .unwrap();

    assert_eq!(ledger.balance(cash, Currency::Krw).await.unwrap(), -1010);
}

#[tokio::test]
async fn update_then_delete_restores_balances() {
    let ledger = ledger().await;
    let cash = ledger.new_account("Cash", None).await.unwrap();

    let id = ledger
        .create_transaction(
            &TransactionForm::new(TransactionKind::Spending, Currency::Krw, 1000, date(2026, 7, 1))
                .fee(10)
                .pay_account(cash),
        )
        .await
        .unwrap();
    assert_eq!(ledger.balance(cash, Currency::Krw).await.unwrap(), -1010);

    // Reverse (+1010) then forward (-500).
    ledger
        .update_transaction(
            id,
            &TransactionForm::new(TransactionKind::Spending, Currency::Krw, 500, date(2026, 7, 2))
                .pay_account(cash),
        )
        .await
        .unwrap();
    assert_eq!(ledger.balance(cash, Currency::Krw).await.unwrap(), -500);

    let updated = ledger.transaction(id).await.unwrap();
    assert_eq!(updated.id, id);
    assert_eq!(updated.amount_minor, 500);
    assert_eq!(updated.fee_minor, 0);
    assert_eq!(updated.occurred_on, date(2026, 7, 2));

    ledger.delete_transaction(id).await.unwrap();
    assert_eq!(ledger.balance(cash, Currency::Krw).await.unwrap(), 0);
    assert_eq!(
        ledger.transaction(id).await.unwrap_err(),
        LedgerError::KeyNotFound("transaction not exists".to_string())
    );
}

#[tokio::test]
async fn transfer_touches_both_accounts() {
    let ledger = ledger().await;
    let checking = ledger.new_account("Checking", None).await.unwrap();
    let savings = ledger.new_account("Savings", None).await.unwrap();

    let id = ledger
        .create_transaction(
            &TransactionForm::new(TransactionKind::Transfer, Currency::Usd, 2000, date(2026, 7, 3))
                .fee(5)
                .pay_account(checking)
                .receive_account(savings),
        )
        .await
        .unwrap();

    assert_eq!(ledger.balance(checking, Currency::Usd).await.unwrap(), -2005);
    assert_eq!(ledger.balance(savings, Currency::Usd).await.unwrap(), 2000);

    ledger.delete_transaction(id).await.unwrap();
    assert_eq!(ledger.balance(checking, Currency::Usd).await.unwrap(), 0);
    assert_eq!(ledger.balance(savings, Currency::Usd).await.unwrap(), 0);
}

#[tokio::test]
async fn income_credits_net_of_fee() {
    let ledger = ledger().await;
    let bank = ledger.new_account("Bank", None).await.unwrap();

    ledger
        .create_transaction(
            &TransactionForm::new(TransactionKind::Income, Currency::Krw, 300, date(2026, 7, 4))
                .fee(20)
                .receive_account(bank),
        )
        .await
        .unwrap();

    assert_eq!(ledger.balance(bank, Currency::Krw).await.unwrap(), 280);
}

#[tokio::test]
async fn first_effect_creates_balance_entry_lazily() {
    let ledger = ledger().await;
    // No account row exists for this id; the mutator must not care.
    let phantom = Uuid::new_v4();

    let id = ledger
        .create_transaction(
            &TransactionForm::new(TransactionKind::Spending, Currency::Jpy, 700, date(2026, 7, 5))
                .pay_account(phantom),
        )
        .await
        .unwrap();

    // Entry started at zero before the delta, so the net equals the delta.
    assert_eq!(ledger.balance(phantom, Currency::Jpy).await.unwrap(), -700);

    // Deleting brings the entry back to zero but never prunes it.
    ledger.delete_transaction(id).await.unwrap();
    let balances = ledger.account_balances(phantom).await.unwrap();
    assert_eq!(balances.get(&Currency::Jpy), Some(&0));
}

#[tokio::test]
async fn same_account_tracks_currencies_independently() {
    let ledger = ledger().await;
    let broker = ledger.new_account("Broker", None).await.unwrap();

    ledger
        .create_transaction(
            &TransactionForm::new(TransactionKind::Spending, Currency::Krw, 1000, date(2026, 7, 6))
                .pay_account(broker),
        )
        .await
        .unwrap();
    ledger
        .create_transaction(
            &TransactionForm::new(TransactionKind::Income, Currency::Usd, 2000, date(2026, 7, 6))
                .receive_account(broker),
        )
        .await
        .unwrap();

    let balances = ledger.account_balances(broker).await.unwrap();
    assert_eq!(balances.get(&Currency::Krw), Some(&-1000));
    assert_eq!(balances.get(&Currency::Usd), Some(&2000));
}

#[tokio::test]
async fn update_matches_delete_then_create() {
    // Run the same edit through both code paths on two fresh ledgers and
    // compare the final balances.
    let updated = ledger().await;
    let a1 = updated.new_account("A", None).await.unwrap();
    let b1 = updated.new_account("B", None).await.unwrap();

    let replayed = ledger().await;
    let a2 = replayed.new_account("A", None).await.unwrap();
    let b2 = replayed.new_account("B", None).await.unwrap();

    let before = |a, b| {
        TransactionForm::new(TransactionKind::Transfer, Currency::Krw, 5000, date(2026, 7, 7))
            .fee(50)
            .pay_account(a)
            .receive_account(b)
    };
    let after = |b| {
        TransactionForm::new(TransactionKind::Spending, Currency::Krw, 1200, date(2026, 7, 8))
            .pay_account(b)
    };

    let id = updated.create_transaction(&before(a1, b1)).await.unwrap();
    updated.update_transaction(id, &after(b1)).await.unwrap();

    let id = replayed.create_transaction(&before(a2, b2)).await.unwrap();
    replayed.delete_transaction(id).await.unwrap();
    replayed.create_transaction(&after(b2)).await.unwrap();

    let updated_balances = (
        updated.balance(a1, Currency::Krw).await.unwrap(),
        updated.balance(b1, Currency::Krw).await.unwrap(),
    );
    let replayed_balances = (
        replayed.balance(a2, Currency::Krw).await.unwrap(),
        replayed.balance(b2, Currency::Krw).await.unwrap(),
    );
    assert_eq!(updated_balances, replayed_balances);
    assert_eq!(updated_balances, (0, -1200));
}

#[tokio::test]
async fn failed_update_leaves_no_trace() {
    let ledger = ledger().await;
    let cash = ledger.new_account("Cash", None).await.unwrap();

    let id = ledger
        .create_transaction(
            &TransactionForm::new(TransactionKind::Spending, Currency::Krw, 1000, date(2026, 7, 9))
                .fee(10)
                .pay_account(cash),
        )
        .await
        .unwrap();

    // The new state is invalid (income without a receive account); its effects
    // are rejected only after the stored state has been reversed inside the
    // scope, so the whole scope must roll back.
    let err = ledger
        .update_transaction(
            id,
            &TransactionForm::new(TransactionKind::Income, Currency::Krw, 500, date(2026, 7, 9)),
        )
        .await
        .unwrap_err();
    assert_eq!(
        err,
        LedgerError::InvalidEvent("income requires a receive account".to_string())
    );

    assert_eq!(ledger.balance(cash, Currency::Krw).await.unwrap(), -1010);
    let stored = ledger.transaction(id).await.unwrap();
    assert_eq!(stored.kind, TransactionKind::Spending);
    assert_eq!(stored.amount_minor, 1000);
}

#[tokio::test]
async fn failed_create_leaves_no_trace() {
    let ledger = ledger().await;
    let cash = ledger.new_account("Cash", None).await.unwrap();

    let err = ledger
        .create_transaction(
            &TransactionForm::new(
                TransactionKind::Transfer,
                Currency::Krw,
                1000,
                date(2026, 7, 10),
            )
            .pay_account(cash),
        )
        .await
        .unwrap_err();
    assert_eq!(
        err,
        LedgerError::InvalidEvent("transfer requires a receive account".to_string())
    );

    assert_eq!(ledger.balance(cash, Currency::Krw).await.unwrap(), 0);
}

#[tokio::test]
async fn missing_transaction_is_reported() {
    let ledger = ledger().await;
    let missing = Uuid::new_v4();
    let not_found = LedgerError::KeyNotFound("transaction not exists".to_string());

    assert_eq!(ledger.transaction(missing).await.unwrap_err(), not_found);
    assert_eq!(
        ledger.delete_transaction(missing).await.unwrap_err(),
        not_found
    );
    assert_eq!(
        ledger
            .update_transaction(
                missing,
                &TransactionForm::new(
                    TransactionKind::Spending,
                    Currency::Krw,
                    100,
                    date(2026, 7, 11),
                )
                .pay_account(Uuid::new_v4()),
            )
            .await
            .unwrap_err(),
        not_found
    );
}

#[tokio::test]
async fn invalid_amounts_are_rejected() {
    let ledger = ledger().await;
    let cash = ledger.new_account("Cash", None).await.unwrap();

    let err = ledger
        .create_transaction(
            &TransactionForm::new(TransactionKind::Spending, Currency::Krw, 0, date(2026, 7, 12))
                .pay_account(cash),
        )
        .await
        .unwrap_err();
    assert_eq!(
        err,
        LedgerError::InvalidAmount("amount_minor must be > 0".to_string())
    );

    let err = ledger
        .create_transaction(
            &TransactionForm::new(TransactionKind::Spending, Currency::Krw, 100, date(2026, 7, 12))
                .fee(-1)
                .pay_account(cash),
        )
        .await
        .unwrap_err();
    assert_eq!(
        err,
        LedgerError::InvalidAmount("fee_minor must be >= 0".to_string())
    );
}

#[tokio::test]
async fn duplicate_account_name_is_rejected() {
    let ledger = ledger().await;
    ledger.new_account("Cash", None).await.unwrap();

    assert_eq!(
        ledger.new_account("Cash", None).await.unwrap_err(),
        LedgerError::ExistingKey("Cash".to_string())
    );
}
