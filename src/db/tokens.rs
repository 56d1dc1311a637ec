// This does not store tokens themselves, only the details required to
// invalidate one (the jti recorded at issue time).

use anyhow::Result;
use chrono::DateTime;
use chrono::Utc;
use sqlx::postgres::PgRow;
use sqlx::PgPool;
use sqlx::Row;
use tracing::{info, warn};

use crate::secrets::SECRETS;

pub struct Database {
    pub pool: PgPool,
}

#[derive(Debug)]
pub struct SessionToken {
    pub uid: i64,
    pub jti: String,
    pub expires_at: DateTime<Utc>,
}

impl Database {
    pub async fn new() -> Result<Self> {
        let url = format!(
            "postgresql://postgres:{}@localhost:{}/{}",
            SECRETS.get("DB_PW").unwrap(),
            SECRETS.get("DB_PORT").unwrap(),
            SECRETS.get("DB_NAME").unwrap()
        );
        let pool = sqlx::postgres::PgPool::connect(&url).await?;
        Ok(Self { pool })
    }

    pub async fn create_table(&self) -> Result<()> {
        sqlx::query(
            "CREATE TABLE IF NOT EXISTS session_tokens (
                jti TEXT PRIMARY KEY,
                uid BIGINT NOT NULL,
                expires_at TIMESTAMPTZ NOT NULL
            )",
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    pub async fn insert(&self, user_id: i64, jti: &str, expires_at: DateTime<Utc>) -> Result<()> {
        let mut txn = self.pool.begin().await?;

        sqlx::query(
            "INSERT INTO session_tokens (
                jti,
                uid,
                expires_at
            ) VALUES ($1, $2, $3)",
        )
        .bind(jti)
        .bind(user_id)
        .bind(expires_at)
        .execute(&mut *txn)
        .await?;

        txn.commit().await?;

        Ok(())
    }

    pub async fn read_by_uid(&self, user_id: i64) -> Result<Vec<String>> {
        let results = sqlx::query("SELECT * FROM session_tokens WHERE uid = $1 AND expires_at > NOW()")
            .bind(user_id)
            .fetch_all(&self.pool)
            .await?;

        let mut jtis = Vec::with_capacity(results.len());
        for record in results {
            jtis.push(parse_session_token(record)?.jti);
        }

        Ok(jtis)
    }

    pub async fn delete_by_uid(&self, user_id: i64) -> Result<()> {
        let mut txn = self.pool.begin().await?;

        let result = sqlx::query("DELETE FROM session_tokens WHERE uid = $1")
            .bind(user_id)
            .execute(&mut *txn)
            .await;

        match result {
            Ok(_) => {
                txn.commit().await?;
                info!("Revoked all session tokens for uid = {}", user_id);
                Ok(())
            }
            Err(e) => {
                txn.rollback().await?;
                warn!("Failed to revoke session tokens for uid = {}: {}", user_id, e);
                Err(e.into())
            }
        }
    }
}

fn parse_session_token(row: PgRow) -> Result<SessionToken> {
    Ok(SessionToken {
        jti: row.try_get(0)?,
        uid: row.try_get(1)?,
        expires_at: row.try_get(2)?,
    })
}
