use std::{sync::Arc, time::Duration};

use migration::{Migrator, MigratorTrait};
use settings::Database;

mod settings;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let settings = settings::Settings::new()?;
    let mut tasks = tokio::task::JoinSet::new();

    tracing_subscriber::fmt()
        .with_env_filter(format!(
            "florin={level},server={level},engine={level}",
            level = settings.app.level
        ))
        .init();

    let db = parse_database(&settings.database).await?;
    let engine = Arc::new(engine::Engine::builder().database(db.clone()).build().await?);

    if let Some(server) = settings.server {
        let engine = Arc::clone(&engine);
        let db = db.clone();
        tasks.spawn(async move {
            tracing::info!("Found server settings...");
            let bind = server.bind.unwrap_or_else(|| "127.0.0.1".to_string());
            let addr = format!("{}:{}", bind, server.port);
            let listener = match tokio::net::TcpListener::bind(addr).await {
                Ok(listener) => listener,
                Err(err) => {
                    tracing::error!("failed to bind server listener: {err}");
                    return;
                }
            };
            if let Err(err) = server::run_with_listener(engine, db, listener).await {
                tracing::error!("server failed: {err}");
            }
        });
    }

    if let Some(scheduler) = settings.scheduler {
        let engine = Arc::clone(&engine);
        tasks.spawn(async move {
            tracing::info!("Found scheduler settings...");
            let mut ticker = tokio::time::interval(Duration::from_secs(scheduler.interval_secs));
            loop {
                ticker.tick().await;
                let today = chrono::Utc::now().date_naive();

                match engine.run_due(today).await {
                    Ok(count) if count > 0 => {
                        tracing::info!("materialized {count} recurring transaction template(s)");
                    }
                    Ok(_) => {}
                    Err(err) => tracing::error!("recurring run failed: {err}"),
                }

                match engine.sweep_budgets(today).await {
                    Ok(count) if count > 0 => {
                        tracing::info!("raised {count} budget warning(s)");
                    }
                    Ok(_) => {}
                    Err(err) => tracing::error!("budget sweep failed: {err}"),
                }
            }
        });
    }

    while tasks.join_next().await.is_some() {
        tasks.shutdown().await;
    }

    Ok(())
}

async fn parse_database(
    config: &settings::Database,
) -> Result<sea_orm::DatabaseConnection, Box<dyn std::error::Error + Send + Sync>> {
    let url = match config {
        Database::Memory => String::from("sqlite::memory:"),
        Database::Sqlite(path) => format!("sqlite:{}?mode=rwc", path),
    };

    let database = sea_orm::Database::connect(url).await?;
    Migrator::up(&database, None).await?;
    Ok(database)
}
