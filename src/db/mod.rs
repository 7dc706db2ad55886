//! Database module for SQLite persistence.
//!
//! SQLite is the source of truth for all application data. Nested values
//! (team members, milestones, social links, office details) are stored as
//! JSON text columns.

mod repository;

pub use repository::*;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::path::Path;
use std::str::FromStr;

/// Initialize the database connection pool and run migrations.
pub async fn init_database(db_path: &Path) -> Result<SqlitePool, sqlx::Error> {
    // Ensure the parent directory exists
    if let Some(parent) = db_path.parent() {
        tokio::fs::create_dir_all(parent).await.ok();
    }

    let db_url = format!("sqlite:{}?mode=rwc", db_path.display());

    let options = SqliteConnectOptions::from_str(&db_url)?
        .create_if_missing(true)
        .journal_mode(sqlx::sqlite::SqliteJournalMode::Wal)
        .synchronous(sqlx::sqlite::SqliteSynchronous::Normal)
        .busy_timeout(std::time::Duration::from_secs(30));

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await?;

    // Run embedded migrations
    run_migrations(&pool).await?;

    Ok(pool)
}

/// Run database migrations.
async fn run_migrations(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS events (
            id TEXT PRIMARY KEY,
            schedule TEXT,
            venue TEXT,
            title TEXT,
            event_type TEXT,
            fee TEXT,
            description TEXT,
            community TEXT,
            register_link TEXT,
            payment_name TEXT,
            prize TEXT,
            duration TEXT,
            team_size INTEGER,
            image_path TEXT NOT NULL,
            image_mime_type TEXT NOT NULL
        );
        "#,
    )
    .execute(pool)
    .await?;

    // The UNIQUE index backstops the handler-level username pre-check: a
    // lost create/create race yields a constraint error instead of a
    // duplicate row.
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS admins (
            id TEXT PRIMARY KEY,
            name TEXT NOT NULL,
            username TEXT NOT NULL UNIQUE,
            role TEXT NOT NULL DEFAULT 'moderator',
            password TEXT NOT NULL
        );
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS contacts (
            id TEXT PRIMARY KEY,
            first_name TEXT NOT NULL,
            last_name TEXT NOT NULL,
            email TEXT NOT NULL,
            phone TEXT,
            message TEXT NOT NULL,
            created_at TEXT NOT NULL
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Singleton: the CHECK pins the record to one well-known key, making
    // the full-replace upsert atomic at the store level.
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS system_data (
            id INTEGER PRIMARY KEY CHECK (id = 1),
            social_media_links TEXT NOT NULL,
            milestones TEXT NOT NULL,
            logo_name TEXT NOT NULL,
            logo_image_path TEXT NOT NULL,
            office_details TEXT NOT NULL,
            promo_video_path TEXT NOT NULL,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        );
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS teams (
            id TEXT PRIMARY KEY,
            title TEXT NOT NULL,
            members TEXT NOT NULL
        );
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE INDEX IF NOT EXISTS idx_contacts_created_at ON contacts(created_at);
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}
