use chrono::NaiveDate;
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, Statement};

use engine::{
    Amount, BudgetPatch, BudgetPeriod, Category, Engine, EngineError, TransactionKind,
    TransactionPatch,
};
use migration::MigratorTrait;
use uuid::Uuid;

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
async fn list_orders_by_date_then_creation() {
    let (engine, _db) = engine_with_db().await;

    let older = engine
        .new_transaction(
            "alice",
            TransactionKind::Expense,
            Amount::new(1000),
            Category::Food,
            "lunch",
            date(2026, 8, 10),
        )
        .await
        .unwrap();
    let newest = engine
        .new_transaction(
            "alice",
            TransactionKind::Income,
            Amount::new(150_000),
            Category::Salary,
            "salary",
            date(2026, 8, 28),
        )
        .await
        .unwrap();
    let same_day_later = engine
        .new_transaction(
            "alice",
            TransactionKind::Expense,
            Amount::new(500),
            Category::Food,
            "coffee",
            date(2026, 8, 10),
        )
        .await
        .unwrap();

    let listed = engine.list_transactions("alice").await.unwrap();
    assert_eq!(listed.len(), 3);
    assert_eq!(listed[0].id, newest.id);
    // Same transaction date: the later insert wins the tiebreak.
    assert_eq!(listed[1].id, same_day_later.id);
    assert_eq!(listed[2].id, older.id);
}

#[tokio::test]
async fn update_changes_only_provided_fields() {
    let (engine, _db) = engine_with_db().await;

    let original = engine
        .new_transaction(
            "alice",
            TransactionKind::Expense,
            Amount::new(2000),
            Category::Transportation,
            "train",
            date(2026, 8, 5),
        )
        .await
        .unwrap();

    let updated = engine
        .update_transaction(
            original.id,
            TransactionPatch {
                amount: Some(Amount::new(2500)),
                ..Default::default()
            },
            "alice",
        )
        .await
        .unwrap();

    assert_eq!(updated.id, original.id);
    assert_eq!(updated.created_at, original.created_at);
    assert_eq!(updated.amount, Amount::new(2500));
    assert_eq!(updated.category, Category::Transportation);
    assert_eq!(updated.description, "train");
}

#[tokio::test]
async fn foreign_transaction_is_forbidden_missing_is_not_found() {
    let (engine, _db) = engine_with_db().await;

    let tx = engine
        .new_transaction(
            "alice",
            TransactionKind::Expense,
            Amount::new(700),
            Category::Bills,
            "phone",
            date(2026, 8, 1),
        )
        .await
        .unwrap();

    let err = engine.delete_transaction(tx.id, "bob").await.unwrap_err();
    assert!(matches!(err, EngineError::Forbidden(_)));

    let err = engine
        .delete_transaction(Uuid::new_v4(), "bob")
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::KeyNotFound(_)));

    // The failed attempts changed nothing.
    assert_eq!(engine.list_transactions("alice").await.unwrap().len(), 1);
}

#[tokio::test]
async fn create_rejects_kind_category_mismatch_and_bad_amounts() {
    let (engine, _db) = engine_with_db().await;

    let err = engine
        .new_transaction(
            "alice",
            TransactionKind::Income,
            Amount::new(100),
            Category::Food,
            "wrong set",
            date(2026, 8, 1),
        )
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::Validation(_)));

    let err = engine
        .new_transaction(
            "alice",
            TransactionKind::Expense,
            Amount::ZERO,
            Category::Food,
            "free lunch",
            date(2026, 8, 1),
        )
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::Validation(_)));

    assert!(engine.list_transactions("alice").await.unwrap().is_empty());
}

#[tokio::test]
async fn delete_removes_the_record() {
    let (engine, _db) = engine_with_db().await;

    let tx = engine
        .new_transaction(
            "alice",
            TransactionKind::Expense,
            Amount::new(4200),
            Category::Shopping,
            "shoes",
            date(2026, 8, 20),
        )
        .await
        .unwrap();

    engine.delete_transaction(tx.id, "alice").await.unwrap();
    assert!(engine.list_transactions("alice").await.unwrap().is_empty());
}

#[tokio::test]
async fn budget_update_and_ownership() {
    let (engine, _db) = engine_with_db().await;

    let budget = engine
        .new_budget(
            "alice",
            Category::Food,
            Amount::new(40_000),
            BudgetPeriod::Monthly,
        )
        .await
        .unwrap();

    let updated = engine
        .update_budget(
            budget.id,
            BudgetPatch {
                limit: Some(Amount::new(25_000)),
                ..Default::default()
            },
            "alice",
        )
        .await
        .unwrap();
    assert_eq!(updated.id, budget.id);
    assert_eq!(updated.limit, Amount::new(25_000));
    assert_eq!(updated.period, BudgetPeriod::Monthly);

    let err = engine
        .update_budget(
            budget.id,
            BudgetPatch {
                limit: Some(Amount::ZERO),
                ..Default::default()
            },
            "alice",
        )
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::Validation(_)));

    let err = engine.delete_budget(budget.id, "bob").await.unwrap_err();
    assert!(matches!(err, EngineError::Forbidden(_)));

    engine.delete_budget(budget.id, "alice").await.unwrap();
    assert!(engine.list_budgets("alice").await.unwrap().is_empty());
}
