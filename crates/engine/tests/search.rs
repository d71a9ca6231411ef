use chrono::NaiveDate;
use sea_orm::Database;
use uuid::Uuid;

use engine::{
    Currency, Ledger, LedgerError, TransactionForm, TransactionKind, TransactionSearch,
};
use migration::MigratorTrait;

async fn ledger() -> Ledger {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    migration::Migrator::up(&db, None).await.unwrap();
    Ledger::builder().database(db).build().await.unwrap()
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

struct Fixture {
    ledger: Ledger,
    cash: Uuid,
    bank: Uuid,
}

/// Seeds: two spendings (July), one income (July), one spending (August),
/// one transfer (August).
async fn fixture() -> Fixture {
    let ledger = ledger().await;
    let cash = ledger.new_account("Cash", None).await.unwrap();
    let bank = ledger.new_account("Bank", None).await.unwrap();

    ledger
        .create_transaction(
            &TransactionForm::new(TransactionKind::Spending, Currency::Krw, 1000, date(2026, 7, 1))
                .pay_account(cash)
                .note("Lunch at the corner"),
        )
        .await
        .unwrap();
    ledger
        .create_transaction(
            &TransactionForm::new(TransactionKind::Spending, Currency::Usd, 2500, date(2026, 7, 10))
                .fee(5)
                .pay_account(bank)
                .note("50% off books"),
        )
        .await
        .unwrap();
    ledger
        .create_transaction(
            &TransactionForm::new(TransactionKind::Income, Currency::Krw, 90_000, date(2026, 7, 25))
                .receive_account(bank)
                .note("Salary"),
        )
        .await
        .unwrap();
    ledger
        .create_transaction(
            &TransactionForm::new(TransactionKind::Spending, Currency::Krw, 4000, date(2026, 8, 2))
                .pay_account(cash)
                .note("Lunch again"),
        )
        .await
        .unwrap();
    ledger
        .create_transaction(
            &TransactionForm::new(TransactionKind::Transfer, Currency::Krw, 30_000, date(2026, 8, 3))
                .fee(100)
                .pay_account(bank)
                .receive_account(cash),
        )
        .await
        .unwrap();

    Fixture { ledger, cash, bank }
}

#[tokio::test]
async fn search_orders_newest_first() {
    let f = fixture().await;

    let all = f
        .ledger
        .search_transactions(&TransactionSearch::new(date(2026, 7, 1), date(2026, 8, 31)))
        .await
        .unwrap();

    assert_eq!(all.len(), 5);
    for pair in all.windows(2) {
        assert!(pair[0].occurred_on >= pair[1].occurred_on);
    }
    assert_eq!(all[0].occurred_on, date(2026, 8, 3));
}

#[tokio::test]
async fn search_filters_by_kind_and_currency() {
    let f = fixture().await;

    let spendings = f
        .ledger
        .search_transactions(
            &TransactionSearch::new(date(2026, 7, 1), date(2026, 8, 31))
                .kinds(vec![TransactionKind::Spending]),
        )
        .await
        .unwrap();
    assert_eq!(spendings.len(), 3);
    assert!(spendings.iter().all(|t| t.kind == TransactionKind::Spending));

    let usd = f
        .ledger
        .search_transactions(
            &TransactionSearch::new(date(2026, 7, 1), date(2026, 8, 31)).currency(Currency::Usd),
        )
        .await
        .unwrap();
    assert_eq!(usd.len(), 1);
    assert_eq!(usd[0].amount_minor, 2500);
}

#[tokio::test]
async fn search_matches_account_on_either_side() {
    let f = fixture().await;

    let cash_side = f
        .ledger
        .search_transactions(
            &TransactionSearch::new(date(2026, 7, 1), date(2026, 8, 31)).account(f.cash),
        )
        .await
        .unwrap();
    // Two spendings paid from cash plus the transfer received into cash.
    assert_eq!(cash_side.len(), 3);
    assert!(
        cash_side
            .iter()
            .all(|t| t.pay_account_id == Some(f.cash) || t.receive_account_id == Some(f.cash))
    );
}

#[tokio::test]
async fn search_matches_note_substring_literally() {
    let f = fixture().await;

    let lunches = f
        .ledger
        .search_transactions(
            &TransactionSearch::new(date(2026, 7, 1), date(2026, 8, 31)).note("Lunch"),
        )
        .await
        .unwrap();
    assert_eq!(lunches.len(), 2);

    // `%` in the needle must not act as a wildcard.
    let discount = f
        .ledger
        .search_transactions(
            &TransactionSearch::new(date(2026, 7, 1), date(2026, 8, 31)).note("50%"),
        )
        .await
        .unwrap();
    assert_eq!(discount.len(), 1);
    assert_eq!(discount[0].note.as_deref(), Some("50% off books"));
}

#[tokio::test]
async fn search_range_bounds_are_inclusive() {
    let f = fixture().await;

    let july = f
        .ledger
        .search_transactions(&TransactionSearch::new(date(2026, 7, 1), date(2026, 7, 25)))
        .await
        .unwrap();
    assert_eq!(july.len(), 3);

    let err = f
        .ledger
        .search_transactions(&TransactionSearch::new(date(2026, 8, 1), date(2026, 7, 1)))
        .await
        .unwrap_err();
    assert_eq!(
        err,
        LedgerError::InvalidAmount("invalid range: from must be <= to".to_string())
    );
}

#[tokio::test]
async fn monthly_category_summary_groups_by_parent() {
    let ledger = ledger().await;
    let cash = ledger.new_account("Cash", None).await.unwrap();

    let food = ledger
        .new_category(TransactionKind::Spending, "Food", None)
        .await
        .unwrap();
    let lunch = ledger
        .new_category(TransactionKind::Spending, "Lunch", Some(food))
        .await
        .unwrap();
    let dinner = ledger
        .new_category(TransactionKind::Spending, "Dinner", Some(food))
        .await
        .unwrap();
    let travel = ledger
        .new_category(TransactionKind::Spending, "Travel", None)
        .await
        .unwrap();
    let taxi = ledger
        .new_category(TransactionKind::Spending, "Taxi", Some(travel))
        .await
        .unwrap();

    for (amount, day, category) in [
        (1000, date(2026, 7, 1), lunch),
        (2000, date(2026, 7, 15), dinner),
        (500, date(2026, 7, 20), taxi),
        (3000, date(2026, 8, 5), lunch),
    ] {
        ledger
            .create_transaction(
                &TransactionForm::new(TransactionKind::Spending, Currency::Krw, amount, day)
                    .pay_account(cash)
                    .category(category),
            )
            .await
            .unwrap();
    }

    let summary = ledger
        .monthly_category_summary(
            date(2026, 7, 1),
            date(2026, 8, 31),
            TransactionKind::Spending,
            Currency::Krw,
        )
        .await
        .unwrap();

    // July: Food 3000, Travel 500; August: Food 3000.
    assert_eq!(summary.len(), 3);
    assert!(summary.windows(2).all(|p| p[0].month <= p[1].month));

    let july_food = summary
        .iter()
        .find(|s| s.month == date(2026, 7, 1) && s.parent_category_id == Some(food))
        .unwrap();
    assert_eq!(july_food.amount_minor, 3000);

    let july_travel = summary
        .iter()
        .find(|s| s.month == date(2026, 7, 1) && s.parent_category_id == Some(travel))
        .unwrap();
    assert_eq!(july_travel.amount_minor, 500);

    let august_food = summary
        .iter()
        .find(|s| s.month == date(2026, 8, 1) && s.parent_category_id == Some(food))
        .unwrap();
    assert_eq!(august_food.amount_minor, 3000);
}

#[tokio::test]
async fn monthly_amount_sum_groups_by_kind() {
    let f = fixture().await;

    let sums = f
        .ledger
        .monthly_amount_sum(date(2026, 7, 1), date(2026, 8, 31), Currency::Krw)
        .await
        .unwrap();

    let july_spending = sums
        .iter()
        .find(|s| s.month == date(2026, 7, 1) && s.kind == TransactionKind::Spending)
        .unwrap();
    assert_eq!(july_spending.amount_minor, 1000);
    assert_eq!(july_spending.fee_minor, 0);

    let july_income = sums
        .iter()
        .find(|s| s.month == date(2026, 7, 1) && s.kind == TransactionKind::Income)
        .unwrap();
    assert_eq!(july_income.amount_minor, 90_000);

    let august_transfer = sums
        .iter()
        .find(|s| s.month == date(2026, 8, 1) && s.kind == TransactionKind::Transfer)
        .unwrap();
    assert_eq!(august_transfer.amount_minor, 30_000);
    assert_eq!(august_transfer.fee_minor, 100);

    // The USD spending must not leak into KRW sums.
    assert!(
        sums.iter()
            .all(|s| !(s.kind == TransactionKind::Spending && s.amount_minor == 2500))
    );
}

#[tokio::test]
async fn frequent_categories_ranks_by_recent_usage() {
    let ledger = ledger().await;
    let cash = ledger.new_account("Cash", None).await.unwrap();
    let today = date(2026, 8, 6);

    let coffee = ledger
        .new_category(TransactionKind::Spending, "Coffee", None)
        .await
        .unwrap();
    let books = ledger
        .new_category(TransactionKind::Spending, "Books", None)
        .await
        .unwrap();

    // Three recent coffee runs, one recent book buy.
    for day in [date(2026, 8, 1), date(2026, 8, 2), date(2026, 8, 3)] {
        ledger
            .create_transaction(
                &TransactionForm::new(TransactionKind::Spending, Currency::Krw, 500, day)
                    .pay_account(cash)
                    .category(coffee)
                    .note("Cafe latte"),
            )
            .await
            .unwrap();
    }
    ledger
        .create_transaction(
            &TransactionForm::new(TransactionKind::Spending, Currency::Krw, 1500, date(2026, 8, 4))
                .pay_account(cash)
                .category(books)
                .note("Cafe guidebook"),
        )
        .await
        .unwrap();

    // Outside the 100-day window; must be ignored.
    ledger
        .create_transaction(
            &TransactionForm::new(TransactionKind::Spending, Currency::Krw, 500, date(2026, 1, 1))
                .pay_account(cash)
                .category(books)
                .note("Cafe mocha"),
        )
        .await
        .unwrap();

    let ranked = ledger
        .frequent_categories(TransactionKind::Spending, Some("Cafe"), today)
        .await
        .unwrap();
    assert_eq!(ranked, vec![coffee, books]);

    // A prefix that only the book note matches.
    let ranked = ledger
        .frequent_categories(TransactionKind::Spending, Some("Cafe g"), today)
        .await
        .unwrap();
    assert_eq!(ranked, vec![books]);

    // Income categories are a different namespace.
    let ranked = ledger
        .frequent_categories(TransactionKind::Income, None, today)
        .await
        .unwrap();
    assert!(ranked.is_empty());
}
