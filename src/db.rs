use sqlx::postgres::PgPoolOptions;
use sqlx::{Connection, Executor, PgConnection, PgPool};

use crate::error::AppError;

/// Validate a configurable SQL identifier (database or table name) and
/// return it double-quoted. Identifiers cannot be bound as parameters, so
/// this is the only way a config value reaches SQL text.
pub fn quote_ident(name: &str) -> Result<String, AppError> {
    let mut chars = name.chars();
    let valid = match chars.next() {
        Some(first) => {
            (first.is_ascii_alphabetic() || first == '_')
                && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        None => false,
    };
    if !valid {
        return Err(AppError::InvalidIdentifier(name.to_string()));
    }
    Ok(format!("\"{name}\""))
}

pub async fn create_pool(url: &str) -> Result<PgPool, AppError> {
    let pool = PgPoolOptions::new().max_connections(5).connect(url).await?;
    Ok(pool)
}

/// Destructive bootstrap: drop the target database if it exists, then
/// create it fresh. Runs against the maintenance database, outside any
/// transaction (CREATE DATABASE does not allow one).
pub async fn recreate_database(admin_url: &str, db_name: &str) -> Result<(), AppError> {
    let ident = quote_ident(db_name)?;
    let mut conn = PgConnection::connect(admin_url).await?;

    // Raw &str execution keeps these off the prepared-statement path;
    // CREATE DATABASE cannot be prepared.
    conn.execute(format!("DROP DATABASE IF EXISTS {ident}").as_str())
        .await?;
    conn.execute(format!("CREATE DATABASE {ident}").as_str())
        .await?;

    conn.close().await?;
    Ok(())
}

/// Create the vacancy table. No primary key and no indexes: the table is an
/// append-only store for one run and is wiped by the database bootstrap,
/// never row-by-row.
pub async fn create_table(pool: &PgPool, table: &str) -> Result<(), AppError> {
    let sql = format!(
        "CREATE TABLE {} (\
         name varchar(100), \
         area varchar(50), \
         min_salary int, \
         max_salary int, \
         currency varchar(50), \
         employer varchar(50), \
         url varchar(100))",
        quote_ident(table)?
    );
    pool.execute(sql.as_str()).await?;
    Ok(())
}
