//! Database bootstrap: create the database if missing and the six resource
//! tables. DDL is idempotent; there is no schema evolution beyond this.

use crate::error::AppError;
use sqlx::ConnectOptions;
use sqlx::PgPool;
use std::str::FromStr;

const TABLE_DDL: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS "reservations" (
        "id" BIGSERIAL PRIMARY KEY,
        "guest_name" TEXT NOT NULL,
        "room_number" TEXT NOT NULL,
        "check_in_date" TIMESTAMPTZ NOT NULL,
        "check_out_date" TIMESTAMPTZ NOT NULL,
        "total_amount" DOUBLE PRECISION NOT NULL,
        "document_id" TEXT NOT NULL,
        "phone_number" TEXT,
        "email" TEXT,
        "notes" TEXT,
        "created_at" TIMESTAMPTZ NOT NULL DEFAULT NOW()
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS "guest_feedback" (
        "id" BIGSERIAL PRIMARY KEY,
        "guest_name" TEXT NOT NULL,
        "room_number" TEXT NOT NULL,
        "rating" INTEGER NOT NULL,
        "comment" TEXT NOT NULL,
        "category" TEXT NOT NULL,
        "created_at" TIMESTAMPTZ NOT NULL DEFAULT NOW()
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS "check_in_out" (
        "id" BIGSERIAL PRIMARY KEY,
        "guest_name" TEXT NOT NULL,
        "room_number" TEXT NOT NULL,
        "type" TEXT NOT NULL,
        "special_requests" TEXT,
        "luggage" INTEGER NOT NULL,
        "room_condition" TEXT,
        "minibar_usage" BOOLEAN NOT NULL DEFAULT FALSE,
        "created_at" TIMESTAMPTZ NOT NULL DEFAULT NOW()
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS "local_preferences" (
        "id" BIGSERIAL PRIMARY KEY,
        "guest_name" TEXT NOT NULL,
        "room_number" TEXT NOT NULL,
        "language" TEXT NOT NULL,
        "dietary_needs" TEXT,
        "temperature" DOUBLE PRECISION NOT NULL,
        "wake_up_call" TEXT,
        "newspaper" BOOLEAN NOT NULL DEFAULT FALSE,
        "created_at" TIMESTAMPTZ NOT NULL DEFAULT NOW()
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS "food_orders" (
        "id" BIGSERIAL PRIMARY KEY,
        "guest_name" TEXT NOT NULL,
        "items" TEXT NOT NULL,
        "special_instructions" TEXT NOT NULL DEFAULT '',
        "total_amount" DOUBLE PRECISION NOT NULL,
        "status" TEXT NOT NULL,
        "created_at" TIMESTAMPTZ NOT NULL DEFAULT NOW()
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS "messages" (
        "id" BIGSERIAL PRIMARY KEY,
        "name" TEXT NOT NULL,
        "email" TEXT NOT NULL,
        "subject" TEXT NOT NULL,
        "message" TEXT NOT NULL,
        "status" TEXT NOT NULL DEFAULT 'pending',
        "created_at" TIMESTAMPTZ NOT NULL DEFAULT NOW()
    )
    "#,
];

/// Create the six resource tables if they do not exist.
pub async fn ensure_tables(pool: &PgPool) -> Result<(), AppError> {
    for ddl in TABLE_DDL {
        sqlx::query(ddl).execute(pool).await?;
    }
    Ok(())
}

/// Ensure the database in `database_url` exists; create it if not. Connects to
/// the default `postgres` database to run CREATE DATABASE. Call before
/// creating the main pool.
pub async fn ensure_database_exists(database_url: &str) -> Result<(), AppError> {
    let (admin_url, db_name) = parse_db_name_from_url(database_url)?;
    if db_name.is_empty() || db_name == "postgres" {
        return Ok(());
    }
    let opts = sqlx::postgres::PgConnectOptions::from_str(&admin_url)
        .map_err(|e| AppError::BadRequest(format!("invalid DATABASE_URL: {}", e)))?;
    let mut conn: sqlx::PgConnection = opts.connect().await?;
    let exists: (bool,) =
        sqlx::query_as("SELECT EXISTS(SELECT 1 FROM pg_database WHERE datname = $1)")
            .bind(&db_name)
            .fetch_one(&mut conn)
            .await?;
    if !exists.0 {
        sqlx::query(&format!("CREATE DATABASE {}", quote_ident(&db_name)))
            .execute(&mut conn)
            .await?;
    }
    Ok(())
}

fn parse_db_name_from_url(url: &str) -> Result<(String, String), AppError> {
    let path_start = url
        .rfind('/')
        .ok_or_else(|| AppError::BadRequest("DATABASE_URL: no path".into()))?
        + 1;
    let path_and_query = url.get(path_start..).unwrap_or("");
    let db_name = path_and_query.split('?').next().unwrap_or("").trim();
    let base = url.get(..path_start).unwrap_or(url);
    let admin_url = format!("{}postgres", base);
    Ok((admin_url, db_name.to_string()))
}

/// Quote an identifier for DDL; embedded quotes are doubled per PostgreSQL rules.
fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}
