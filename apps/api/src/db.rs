use anyhow::Result;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tracing::info;

/// Creates and returns a PostgreSQL connection pool.
pub async fn create_pool(database_url: &str) -> Result<PgPool> {
    info!("Connecting to PostgreSQL...");

    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(database_url)
        .await?;

    info!("PostgreSQL connection pool established");
    Ok(pool)
}

/// Creates the question table if it does not exist yet.
pub async fn ensure_schema(pool: &PgPool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS mahjong_question (
            id          BIGSERIAL PRIMARY KEY,
            question    TEXT    NOT NULL,
            hand        TEXT    NOT NULL,
            answer      TEXT    NOT NULL,
            explanation TEXT    NOT NULL,
            difficulty  INTEGER NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    info!("Schema ready: mahjong_question");
    Ok(())
}
