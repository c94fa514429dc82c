//! # Session Store
//!
//! Operations for the `sessions` table. A row is identified by its cookie
//! name and token; several tokens can live under the same name at once.
//! The store does not enforce expiry, callers check [`Session::is_active`]
//! when they read a row.

use crate::backend::db::{Database, Result};
use chrono::{DateTime, Utc};
use sqlx::SqliteConnection;

/// One active login
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct Session {
    /// Cookie name the token is delivered under
    pub name: String,
    /// Opaque random token
    pub token: String,
    /// Absolute expiry (UTC)
    pub expires_at: DateTime<Utc>,
}

impl Session {
    /// Whether the session is still valid at `now`
    pub fn is_active_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at > now
    }

    /// Whether the session is still valid right now
    pub fn is_active(&self) -> bool {
        self.is_active_at(Utc::now())
    }
}

impl Database {
    /// Store a session
    pub async fn insert_session(&self, session: &Session) -> Result<()> {
        let mut tx = self.pool().begin().await?;
        insert_session(&mut *tx, session).await?;
        tx.commit().await?;

        tracing::debug!(name = %session.name, expires_at = %session.expires_at, "Inserted session");
        Ok(())
    }

    /// Most recently inserted session under cookie `name`
    pub async fn find_session(&self, name: &str) -> Result<Option<Session>> {
        sqlx::query_as::<_, Session>(
            "SELECT name, token, expires_at
             FROM sessions
             WHERE name = ?
             ORDER BY rowid DESC
             LIMIT 1",
        )
        .bind(name)
        .fetch_optional(self.pool())
        .await
    }

    /// Session with exactly this cookie name and token
    pub async fn find_session_token(&self, name: &str, token: &str) -> Result<Option<Session>> {
        sqlx::query_as::<_, Session>(
            "SELECT name, token, expires_at
             FROM sessions
             WHERE name = ? AND token = ?",
        )
        .bind(name)
        .bind(token)
        .fetch_optional(self.pool())
        .await
    }

    /// Remove the session with this cookie name and token
    ///
    /// Returns `false` when nothing matched.
    pub async fn delete_session(&self, name: &str, token: &str) -> Result<bool> {
        let mut tx = self.pool().begin().await?;
        let result = sqlx::query("DELETE FROM sessions WHERE name = ? AND token = ?")
            .bind(name)
            .bind(token)
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;

        Ok(result.rows_affected() > 0)
    }
}

/// Insert on an existing connection or transaction
pub(crate) async fn insert_session(conn: &mut SqliteConnection, session: &Session) -> Result<()> {
    sqlx::query("INSERT INTO sessions (name, token, expires_at) VALUES (?, ?, ?)")
        .bind(&session.name)
        .bind(&session.token)
        .bind(session.expires_at)
        .execute(conn)
        .await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use pretty_assertions::assert_eq;

    async fn test_db() -> Database {
        Database::init("sqlite::memory:").await.unwrap()
    }

    fn session(token: &str, expires_in: Duration) -> Session {
        Session {
            name: "session".to_string(),
            token: token.to_string(),
            expires_at: Utc::now() + expires_in,
        }
    }

    #[tokio::test]
    async fn test_find_returns_most_recent() {
        let db = test_db().await;
        db.insert_session(&session("first", Duration::hours(1))).await.unwrap();
        db.insert_session(&session("second", Duration::hours(1))).await.unwrap();

        let found = db.find_session("session").await.unwrap().unwrap();
        assert_eq!(found.token, "second");
        assert_eq!(db.find_session("other").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_find_token_round_trips_expiry() {
        let db = test_db().await;
        let stored = session("abc", Duration::days(30));
        db.insert_session(&stored).await.unwrap();

        let found = db.find_session_token("session", "abc").await.unwrap().unwrap();
        assert_eq!(found, stored);
        assert_eq!(db.find_session_token("session", "abd").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_delete_requires_exact_match() {
        let db = test_db().await;
        db.insert_session(&session("keep", Duration::hours(1))).await.unwrap();
        db.insert_session(&session("drop", Duration::hours(1))).await.unwrap();

        assert!(!db.delete_session("other", "drop").await.unwrap());
        assert!(db.delete_session("session", "drop").await.unwrap());
        assert!(!db.delete_session("session", "drop").await.unwrap());

        assert!(db.find_session_token("session", "keep").await.unwrap().is_some());
    }

    #[test]
    fn test_expiry_is_checked_at_read_time() {
        let now = Utc::now();
        let expired = Session {
            name: "session".to_string(),
            token: "t".to_string(),
            expires_at: now - Duration::seconds(1),
        };
        assert!(!expired.is_active_at(now));
        assert!(session("t", Duration::minutes(5)).is_active_at(now));
    }
}
