use sqlx::SqlitePool;
use sqlx::sqlite::SqlitePoolOptions;
use tracing::info;

pub async fn setup_database(database_url: &str) -> anyhow::Result<SqlitePool> {
    info!("📂 Database: {}", database_url);

    let pool = SqlitePoolOptions::new()
        .max_connections(16)
        .connect(database_url)
        .await?;

    sqlx::migrate!("./migrations").run(&pool).await?;

    info!("✅ Database connected and migrated");

    Ok(pool)
}
