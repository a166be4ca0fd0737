use chrono::NaiveDate;
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, Statement};

use engine::{
    AlertKind, Amount, Category, Engine, EngineError, GoalPatch, TransactionKind,
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

async fn seed_income(engine: &Engine, owner: &str, cents: i64) {
    engine
        .new_transaction(
            owner,
            TransactionKind::Income,
            Amount::new(cents),
            Category::Salary,
            "salary",
            date(2026, 8, 1),
        )
        .await
        .unwrap();
}

#[tokio::test]
async fn contribution_grows_goal_and_records_expense() {
    let (engine, _db) = engine_with_db().await;
    seed_income(&engine, "alice", 50_000).await;

    let goal = engine
        .new_goal(
            "alice",
            "Emergency fund",
            Amount::new(30_000),
            Amount::ZERO,
            None,
            None,
            None,
        )
        .await
        .unwrap();

    let contribution = engine
        .contribute(goal.id, Amount::new(10_000), "alice", date(2026, 8, 30))
        .await
        .unwrap();

    assert_eq!(contribution.goal.current, Amount::new(10_000));
    assert!(!contribution.goal.is_completed);
    assert_eq!(contribution.transaction.kind, TransactionKind::Expense);
    assert_eq!(contribution.transaction.category, Category::OtherExpense);
    assert_eq!(contribution.transaction.amount, Amount::new(10_000));
    assert_eq!(
        contribution.transaction.description,
        "Contribution to savings goal: Emergency fund"
    );

    // The expense is a real transaction, so the balance shrank.
    let listed = engine.list_transactions("alice").await.unwrap();
    assert_eq!(listed.len(), 2);
}

#[tokio::test]
async fn completing_contribution_raises_a_milestone_alert() {
    let (engine, _db) = engine_with_db().await;
    seed_income(&engine, "alice", 50_000).await;

    let goal = engine
        .new_goal(
            "alice",
            "Laptop",
            Amount::new(20_000),
            Amount::new(15_000),
            None,
            None,
            None,
        )
        .await
        .unwrap();

    let contribution = engine
        .contribute(goal.id, Amount::new(5_000), "alice", date(2026, 8, 30))
        .await
        .unwrap();
    assert!(contribution.goal.is_completed);

    let alerts = engine.list_alerts("alice", false).await.unwrap();
    assert_eq!(alerts.len(), 1);
    assert_eq!(alerts[0].kind, AlertKind::GoalMilestone);

    // Contributing past the target again does not raise a second alert.
    let contribution = engine
        .contribute(goal.id, Amount::new(1_000), "alice", date(2026, 8, 30))
        .await
        .unwrap();
    assert!(contribution.goal.is_completed);
    assert_eq!(engine.list_alerts("alice", false).await.unwrap().len(), 1);
}

#[tokio::test]
async fn contribution_is_rejected_and_rolled_back_without_funds() {
    let (engine, _db) = engine_with_db().await;
    seed_income(&engine, "alice", 5_000).await;

    let goal = engine
        .new_goal(
            "alice",
            "Car",
            Amount::new(500_000),
            Amount::ZERO,
            None,
            None,
            None,
        )
        .await
        .unwrap();

    let err = engine
        .contribute(goal.id, Amount::new(10_000), "alice", date(2026, 8, 30))
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::InsufficientFunds(_)));

    // Nothing moved: no expense, no balance change, no alert.
    let reread = engine.goal(goal.id, "alice").await.unwrap();
    assert_eq!(reread.current, Amount::ZERO);
    assert_eq!(engine.list_transactions("alice").await.unwrap().len(), 1);
    assert!(engine.list_alerts("alice", false).await.unwrap().is_empty());

    let err = engine
        .contribute(goal.id, Amount::ZERO, "alice", date(2026, 8, 30))
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::Validation(_)));
}

#[tokio::test]
async fn foreign_goals_conflate_to_not_found() {
    let (engine, _db) = engine_with_db().await;
    seed_income(&engine, "bob", 50_000).await;

    let goal = engine
        .new_goal(
            "alice",
            "Secret",
            Amount::new(10_000),
            Amount::ZERO,
            None,
            None,
            None,
        )
        .await
        .unwrap();

    let err = engine.goal(goal.id, "bob").await.unwrap_err();
    assert!(matches!(err, EngineError::KeyNotFound(_)));

    let err = engine
        .contribute(goal.id, Amount::new(1_000), "bob", date(2026, 8, 30))
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::KeyNotFound(_)));
}

#[tokio::test]
async fn update_recomputes_completion_unless_overridden() {
    let (engine, _db) = engine_with_db().await;

    let goal = engine
        .new_goal(
            "alice",
            "Holiday",
            Amount::new(100_000),
            Amount::new(40_000),
            Some(date(2026, 12, 31)),
            None,
            None,
        )
        .await
        .unwrap();
    assert!(!goal.is_completed);

    // Lowering the target below the saved amount flips completion.
    let updated = engine
        .update_goal(
            goal.id,
            GoalPatch {
                target: Some(Amount::new(30_000)),
                ..Default::default()
            },
            "alice",
        )
        .await
        .unwrap();
    assert!(updated.is_completed);

    // An explicit flag wins over the recomputation.
    let updated = engine
        .update_goal(
            goal.id,
            GoalPatch {
                is_completed: Some(false),
                ..Default::default()
            },
            "alice",
        )
        .await
        .unwrap();
    assert!(!updated.is_completed);
}
