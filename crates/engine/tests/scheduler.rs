use chrono::NaiveDate;
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, Statement};

use engine::{
    AlertKind, AlertSeverity, Amount, BudgetPeriod, Category, Engine, Frequency, RecurringPatch,
    TransactionKind,
};
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
async fn overdue_template_catches_up_one_transaction_per_period() {
    let (engine, _db) = engine_with_db().await;

    let template = engine
        .new_recurring(
            "alice",
            TransactionKind::Expense,
            Amount::new(999),
            Category::Entertainment,
            "streaming",
            Frequency::Monthly,
            date(2026, 5, 10),
            None,
        )
        .await
        .unwrap();

    let count = engine.run_due(date(2026, 8, 30)).await.unwrap();
    assert_eq!(count, 4); // May 10, Jun 10, Jul 10, Aug 10

    let listed = engine.list_transactions("alice").await.unwrap();
    assert_eq!(listed.len(), 4);
    assert_eq!(listed[0].date, date(2026, 8, 10));
    assert_eq!(listed[3].date, date(2026, 5, 10));
    assert!(listed.iter().all(|tx| tx.description == "streaming"));

    let reread = engine.recurring(template.id, "alice").await.unwrap();
    assert_eq!(reread.last_run, Some(date(2026, 8, 10)));

    // One reminder alert for the whole run.
    let alerts = engine.list_alerts("alice", false).await.unwrap();
    assert_eq!(alerts.len(), 1);
    assert_eq!(alerts[0].kind, AlertKind::RecurringReminder);

    // A second run on the same day finds nothing due.
    let count = engine.run_due(date(2026, 8, 30)).await.unwrap();
    assert_eq!(count, 0);
    assert_eq!(engine.list_transactions("alice").await.unwrap().len(), 4);
}

#[tokio::test]
async fn inactive_and_exhausted_templates_are_skipped() {
    let (engine, _db) = engine_with_db().await;

    let paused = engine
        .new_recurring(
            "alice",
            TransactionKind::Expense,
            Amount::new(3000),
            Category::Bills,
            "gym",
            Frequency::Monthly,
            date(2026, 8, 1),
            None,
        )
        .await
        .unwrap();
    engine
        .update_recurring(
            paused.id,
            RecurringPatch {
                is_active: Some(false),
                ..Default::default()
            },
            "alice",
        )
        .await
        .unwrap();

    // Ends before it ever becomes due.
    engine
        .new_recurring(
            "alice",
            TransactionKind::Expense,
            Amount::new(1500),
            Category::Bills,
            "trial",
            Frequency::Weekly,
            date(2026, 9, 15),
            Some(date(2026, 9, 1)),
        )
        .await
        .unwrap();

    let count = engine.run_due(date(2026, 8, 30)).await.unwrap();
    assert_eq!(count, 0);
    assert!(engine.list_transactions("alice").await.unwrap().is_empty());
}

#[tokio::test]
async fn budget_sweep_raises_and_dedupes_warnings() {
    let (engine, _db) = engine_with_db().await;
    let today = date(2026, 8, 30);

    engine
        .new_budget(
            "alice",
            Category::Food,
            Amount::new(10_000),
            BudgetPeriod::Monthly,
        )
        .await
        .unwrap();
    engine
        .new_transaction(
            "alice",
            TransactionKind::Expense,
            Amount::new(9_000),
            Category::Food,
            "groceries",
            date(2026, 8, 12),
        )
        .await
        .unwrap();

    let raised = engine.sweep_budgets(today).await.unwrap();
    assert_eq!(raised, 1);

    let alerts = engine.list_alerts("alice", true).await.unwrap();
    assert_eq!(alerts.len(), 1);
    assert_eq!(alerts[0].kind, AlertKind::BudgetWarning);
    assert_eq!(alerts[0].severity, AlertSeverity::Warning);

    // While the warning stays unread the sweep will not duplicate it.
    let raised = engine.sweep_budgets(today).await.unwrap();
    assert_eq!(raised, 0);
}

#[tokio::test]
async fn overspent_budget_gets_an_error_alert() {
    let (engine, _db) = engine_with_db().await;
    let today = date(2026, 8, 30);

    engine
        .new_budget(
            "alice",
            Category::Transportation,
            Amount::new(5_000),
            BudgetPeriod::Monthly,
        )
        .await
        .unwrap();
    engine
        .new_transaction(
            "alice",
            TransactionKind::Expense,
            Amount::new(7_500),
            Category::Transportation,
            "taxi",
            date(2026, 8, 25),
        )
        .await
        .unwrap();
    // Last month's spending never counts against this window.
    engine
        .new_transaction(
            "alice",
            TransactionKind::Expense,
            Amount::new(99_900),
            Category::Transportation,
            "flight",
            date(2026, 7, 2),
        )
        .await
        .unwrap();

    let raised = engine.sweep_budgets(today).await.unwrap();
    assert_eq!(raised, 1);

    let alerts = engine.list_alerts("alice", true).await.unwrap();
    assert_eq!(alerts[0].severity, AlertSeverity::Error);
}

#[tokio::test]
async fn healthy_budget_raises_nothing() {
    let (engine, _db) = engine_with_db().await;

    engine
        .new_budget(
            "alice",
            Category::Food,
            Amount::new(20_000),
            BudgetPeriod::Monthly,
        )
        .await
        .unwrap();
    engine
        .new_transaction(
            "alice",
            TransactionKind::Expense,
            Amount::new(11_000),
            Category::Food,
            "groceries",
            date(2026, 8, 12),
        )
        .await
        .unwrap();

    let raised = engine.sweep_budgets(date(2026, 8, 30)).await.unwrap();
    assert_eq!(raised, 0);
    assert!(engine.list_alerts("alice", false).await.unwrap().is_empty());
}
