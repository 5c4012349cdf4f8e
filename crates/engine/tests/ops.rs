use chrono::NaiveDate;
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, Statement};

use engine::{Engine, EngineError, EntryKind, TRANSACTIONS_PAGE_MAX};
use migration::MigratorTrait;

async fn engine_with_db() -> (Engine, DatabaseConnection) {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    migration::Migrator::up(&db, None).await.unwrap();
    let backend = db.get_database_backend();
    for user in ["alice", "bob"] {
        db.execute(Statement::from_sql_and_values(
            backend,
            "INSERT INTO users (username, password) VALUES (?, ?)",
            vec![user.into(), "password".into()],
        ))
        .await
        .unwrap();
    }
    let engine = Engine::builder()
        .database(db.clone())
        .build()
        .await
        .unwrap();
    (engine, db)
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[tokio::test]
async fn categories_are_listed_by_name_ascending() {
    let (engine, _db) = engine_with_db().await;

    for name in ["Travel", "Food", "Rent"] {
        engine
            .create_category("alice", name, EntryKind::Expense, "#ef4444", "tag")
            .await
            .unwrap();
    }

    let categories = engine.list_categories("alice").await.unwrap();
    let names: Vec<&str> = categories.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["Food", "Rent", "Travel"]);
}

#[tokio::test]
async fn category_name_must_not_be_empty() {
    let (engine, _db) = engine_with_db().await;

    let err = engine
        .create_category("alice", "   ", EntryKind::Expense, "#ef4444", "tag")
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::InvalidName(_)));
}

#[tokio::test]
async fn category_creation_requires_a_known_user() {
    let (engine, _db) = engine_with_db().await;

    let err = engine
        .create_category("mallory", "Food", EntryKind::Expense, "#ef4444", "tag")
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::KeyNotFound(_)));
}

#[tokio::test]
async fn transaction_requires_a_category_owned_by_the_caller() {
    let (engine, _db) = engine_with_db().await;

    let category = engine
        .create_category("alice", "Food", EntryKind::Expense, "#ef4444", "cart")
        .await
        .unwrap();

    let err = engine
        .create_transaction(
            "bob",
            category.id,
            1000,
            "Groceries",
            date(2024, 1, 5),
            EntryKind::Expense,
        )
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::KeyNotFound(_)));
}

#[tokio::test]
async fn transaction_kind_must_match_category_kind() {
    let (engine, _db) = engine_with_db().await;

    let salary = engine
        .create_category("alice", "Salary", EntryKind::Income, "#22c55e", "coins")
        .await
        .unwrap();

    let err = engine
        .create_transaction(
            "alice",
            salary.id,
            1000,
            "Groceries",
            date(2024, 1, 5),
            EntryKind::Expense,
        )
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::KindMismatch(_)));
}

#[tokio::test]
async fn transaction_amount_and_description_are_validated() {
    let (engine, _db) = engine_with_db().await;

    let food = engine
        .create_category("alice", "Food", EntryKind::Expense, "#ef4444", "cart")
        .await
        .unwrap();

    let err = engine
        .create_transaction(
            "alice",
            food.id,
            0,
            "Groceries",
            date(2024, 1, 5),
            EntryKind::Expense,
        )
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::InvalidAmount(_)));

    let err = engine
        .create_transaction(
            "alice",
            food.id,
            1000,
            "  ",
            date(2024, 1, 5),
            EntryKind::Expense,
        )
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::InvalidName(_)));
}

#[tokio::test]
async fn transactions_list_newest_first_with_cursor() {
    let (engine, _db) = engine_with_db().await;

    let food = engine
        .create_category("alice", "Food", EntryKind::Expense, "#ef4444", "cart")
        .await
        .unwrap();
    for day in 1..=3 {
        engine
            .create_transaction(
                "alice",
                food.id,
                1000 * day as i64,
                &format!("day {day}"),
                date(2024, 1, day),
                EntryKind::Expense,
            )
            .await
            .unwrap();
    }

    let (page, next) = engine.list_transactions("alice", 2, None).await.unwrap();
    assert_eq!(page.len(), 2);
    assert_eq!(page[0].date, date(2024, 1, 3));
    assert_eq!(page[1].date, date(2024, 1, 2));
    let cursor = next.expect("expected a next cursor");

    let (rest, next) = engine
        .list_transactions("alice", 2, Some(&cursor))
        .await
        .unwrap();
    assert_eq!(rest.len(), 1);
    assert_eq!(rest[0].date, date(2024, 1, 1));
    assert!(next.is_none());
}

#[tokio::test]
async fn transactions_of_other_users_stay_invisible() {
    let (engine, _db) = engine_with_db().await;

    let food = engine
        .create_category("alice", "Food", EntryKind::Expense, "#ef4444", "cart")
        .await
        .unwrap();
    let tx = engine
        .create_transaction(
            "alice",
            food.id,
            1000,
            "Groceries",
            date(2024, 1, 5),
            EntryKind::Expense,
        )
        .await
        .unwrap();

    let (page, _) = engine
        .list_transactions("bob", TRANSACTIONS_PAGE_MAX, None)
        .await
        .unwrap();
    assert!(page.is_empty());

    let err = engine.delete_transaction("bob", tx.id).await.unwrap_err();
    assert!(matches!(err, EngineError::KeyNotFound(_)));

    // Still there for its owner.
    let (page, _) = engine
        .list_transactions("alice", TRANSACTIONS_PAGE_MAX, None)
        .await
        .unwrap();
    assert_eq!(page.len(), 1);
}

#[tokio::test]
async fn deleting_a_category_cascades_to_transactions_and_budgets() {
    let (engine, _db) = engine_with_db().await;

    let food = engine
        .create_category("alice", "Food", EntryKind::Expense, "#ef4444", "cart")
        .await
        .unwrap();
    engine
        .create_transaction(
            "alice",
            food.id,
            1000,
            "Groceries",
            date(2024, 1, 5),
            EntryKind::Expense,
        )
        .await
        .unwrap();
    engine
        .create_budget("alice", food.id, 10000, date(2024, 1, 1))
        .await
        .unwrap();

    engine.delete_category("alice", food.id).await.unwrap();

    let categories = engine.list_categories("alice").await.unwrap();
    assert!(categories.is_empty());
    let (transactions, _) = engine
        .list_transactions("alice", TRANSACTIONS_PAGE_MAX, None)
        .await
        .unwrap();
    assert!(transactions.is_empty());
    let budgets = engine.list_budgets("alice").await.unwrap();
    assert!(budgets.is_empty());
}

#[tokio::test]
async fn budget_month_is_normalized_to_the_first() {
    let (engine, _db) = engine_with_db().await;

    let food = engine
        .create_category("alice", "Food", EntryKind::Expense, "#ef4444", "cart")
        .await
        .unwrap();
    let budget = engine
        .create_budget("alice", food.id, 10000, date(2024, 1, 17))
        .await
        .unwrap();
    assert_eq!(budget.month, date(2024, 1, 1));
}

#[tokio::test]
async fn duplicate_budget_for_same_month_is_rejected() {
    let (engine, _db) = engine_with_db().await;

    let food = engine
        .create_category("alice", "Food", EntryKind::Expense, "#ef4444", "cart")
        .await
        .unwrap();
    engine
        .create_budget("alice", food.id, 10000, date(2024, 1, 1))
        .await
        .unwrap();

    // Another day of the same month collides after normalization.
    let err = engine
        .create_budget("alice", food.id, 5000, date(2024, 1, 20))
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::ExistingKey(_)));

    // A different month is fine.
    engine
        .create_budget("alice", food.id, 5000, date(2024, 2, 1))
        .await
        .unwrap();
}

#[tokio::test]
async fn budgets_require_an_expense_category() {
    let (engine, _db) = engine_with_db().await;

    let salary = engine
        .create_category("alice", "Salary", EntryKind::Income, "#22c55e", "coins")
        .await
        .unwrap();

    let err = engine
        .create_budget("alice", salary.id, 10000, date(2024, 1, 1))
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::KindMismatch(_)));
}

#[tokio::test]
async fn budgets_list_most_recent_month_first() {
    let (engine, _db) = engine_with_db().await;

    let food = engine
        .create_category("alice", "Food", EntryKind::Expense, "#ef4444", "cart")
        .await
        .unwrap();
    for month in [1, 3, 2] {
        engine
            .create_budget("alice", food.id, 10000, date(2024, month, 1))
            .await
            .unwrap();
    }

    let budgets = engine.list_budgets("alice").await.unwrap();
    let months: Vec<NaiveDate> = budgets.iter().map(|b| b.month).collect();
    assert_eq!(
        months,
        vec![date(2024, 3, 1), date(2024, 2, 1), date(2024, 1, 1)]
    );
}

#[tokio::test]
async fn overview_derives_dashboard_from_one_load() {
    let (engine, _db) = engine_with_db().await;

    let food = engine
        .create_category("alice", "Food", EntryKind::Expense, "#ef4444", "cart")
        .await
        .unwrap();
    let salary = engine
        .create_category("alice", "Salary", EntryKind::Income, "#22c55e", "coins")
        .await
        .unwrap();

    engine
        .create_transaction(
            "alice",
            food.id,
            5000,
            "Groceries",
            date(2024, 1, 5),
            EntryKind::Expense,
        )
        .await
        .unwrap();
    engine
        .create_transaction(
            "alice",
            salary.id,
            20000,
            "January",
            date(2024, 1, 10),
            EntryKind::Income,
        )
        .await
        .unwrap();
    engine
        .create_transaction(
            "alice",
            food.id,
            3000,
            "Lunch",
            date(2024, 1, 5),
            EntryKind::Expense,
        )
        .await
        .unwrap();
    engine
        .create_budget("alice", food.id, 10000, date(2024, 1, 1))
        .await
        .unwrap();

    let overview = engine.overview("alice", date(2024, 1, 15)).await.unwrap();

    assert_eq!(overview.totals.income_minor, 20000);
    assert_eq!(overview.totals.expenses_minor, 8000);
    assert_eq!(overview.balance_minor, 12000);

    assert_eq!(overview.month_breakdown.len(), 1);
    assert_eq!(overview.month_breakdown[0].category_id, food.id);
    assert_eq!(overview.month_breakdown[0].amount_minor, 8000);
    assert_eq!(overview.month_breakdown[0].percentage, 100.0);

    assert_eq!(overview.week.days.len(), 7);
    assert_eq!(overview.week.days[6].date, date(2024, 1, 15));
    assert_eq!(overview.week.days[1].income_minor, 20000);

    assert_eq!(overview.budgets.len(), 1);
    let (_, usage) = &overview.budgets[0];
    assert_eq!(usage.spent_minor, 8000);
    assert_eq!(usage.percentage, 80.0);
    assert!(!usage.is_over_budget);
}

#[tokio::test]
async fn overview_on_empty_data_is_all_zeroes() {
    let (engine, _db) = engine_with_db().await;

    let overview = engine.overview("alice", date(2024, 1, 15)).await.unwrap();
    assert_eq!(overview.balance_minor, 0);
    assert!(overview.month_breakdown.is_empty());
    assert_eq!(overview.week.days.len(), 7);
    assert_eq!(overview.week.max_amount_minor, 100);
    assert!(overview.budgets.is_empty());
}
