//! # Credential Store
//!
//! CRUD operations for the `credentials` table. An identity is either a
//! credential's `name` or its `mail`; lookups are exact and case-sensitive.
//! One identity always resolves to at most one row. A name match wins over
//! a mail match, so a name that equals someone else's mail still reaches
//! its own account.
//!
//! Uniqueness of `name` and `mail` is enforced by the table's UNIQUE
//! constraints. A rejected insert surfaces as a unique violation, which
//! [`conflicting_field`] maps back to the offending column.

use crate::backend::db::sessions::insert_session;
use crate::backend::db::{Database, Result, Session};
use sqlx::SqliteConnection;

/// A registered identity as stored in the database
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct Credential {
    /// Surrogate key, assigned by the database
    pub id: i64,
    /// Unique login name
    pub name: String,
    /// Unique mail address
    pub mail: String,
    /// Per-credential salt (base64)
    pub salt: String,
    /// bcrypt hash of password + salt
    pub password_hash: String,
}

/// The mutable fields of a credential
///
/// Used both for inserts and for replacing an existing row in place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCredential {
    pub name: String,
    pub mail: String,
    pub salt: String,
    pub password_hash: String,
}

/// Column that caused a unique violation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialField {
    Name,
    Mail,
}

/// Identify which credential column a failed write collided on
///
/// Returns `None` for every error that is not a unique violation on the
/// `credentials` table.
pub fn conflicting_field(err: &sqlx::Error) -> Option<CredentialField> {
    let sqlx::Error::Database(db_err) = err else {
        return None;
    };
    if !db_err.is_unique_violation() {
        return None;
    }

    let message = db_err.message();
    if message.contains("credentials.name") {
        Some(CredentialField::Name)
    } else if message.contains("credentials.mail") {
        Some(CredentialField::Mail)
    } else {
        None
    }
}

impl Database {
    /// Insert a new credential
    ///
    /// Fails with a unique violation when the name or mail is taken.
    pub async fn insert_credential(&self, credential: &NewCredential) -> Result<Credential> {
        let mut tx = self.pool().begin().await?;
        let inserted = insert_credential(&mut *tx, credential).await?;
        tx.commit().await?;

        tracing::info!(id = inserted.id, name = %inserted.name, "Inserted credential");
        Ok(inserted)
    }

    /// Insert a credential together with its first session
    ///
    /// Both rows commit or neither does.
    pub async fn insert_credential_with_session(
        &self,
        credential: &NewCredential,
        session: &Session,
    ) -> Result<Credential> {
        let mut tx = self.pool().begin().await?;
        let inserted = insert_credential(&mut *tx, credential).await?;
        insert_session(&mut *tx, session).await?;
        tx.commit().await?;

        Ok(inserted)
    }

    /// Find the credential `identity` resolves to
    ///
    /// Tries `name` first and falls back to `mail`.
    pub async fn find_credential(&self, identity: &str) -> Result<Option<Credential>> {
        sqlx::query_as::<_, Credential>(
            "SELECT id, name, mail, salt, password_hash
             FROM credentials
             WHERE name = ? OR mail = ?
             ORDER BY name = ? DESC
             LIMIT 1",
        )
        .bind(identity)
        .bind(identity)
        .bind(identity)
        .fetch_optional(self.pool())
        .await
    }

    /// Replace name, mail, salt and hash of the credential matching `identity`
    ///
    /// Returns `false` when no credential matched.
    pub async fn update_credential(
        &self,
        identity: &str,
        credential: &NewCredential,
    ) -> Result<bool> {
        let mut tx = self.pool().begin().await?;
        let result = sqlx::query(
            "UPDATE credentials
             SET name = ?, mail = ?, salt = ?, password_hash = ?
             WHERE id = (
                 SELECT id FROM credentials
                 WHERE name = ? OR mail = ?
                 ORDER BY name = ? DESC
                 LIMIT 1
             )",
        )
        .bind(&credential.name)
        .bind(&credential.mail)
        .bind(&credential.salt)
        .bind(&credential.password_hash)
        .bind(identity)
        .bind(identity)
        .bind(identity)
        .execute(&mut *tx)
        .await?;
        tx.commit().await?;

        let updated = result.rows_affected() > 0;
        if updated {
            tracing::info!(identity, "Updated credential");
        } else {
            tracing::warn!(identity, "Update skipped, no such credential");
        }
        Ok(updated)
    }

    /// Delete the credential `identity` resolves to
    ///
    /// Removes at most one row. Returns `false` when no credential matched.
    pub async fn delete_credential(&self, identity: &str) -> Result<bool> {
        let mut tx = self.pool().begin().await?;
        let result = sqlx::query(
            "DELETE FROM credentials
             WHERE id = (
                 SELECT id FROM credentials
                 WHERE name = ? OR mail = ?
                 ORDER BY name = ? DESC
                 LIMIT 1
             )",
        )
        .bind(identity)
        .bind(identity)
        .bind(identity)
        .execute(&mut *tx)
        .await?;
        tx.commit().await?;

        let deleted = result.rows_affected() > 0;
        if deleted {
            tracing::info!(identity, "Deleted credential");
        } else {
            tracing::warn!(identity, "Delete skipped, no such credential");
        }
        Ok(deleted)
    }
}

/// Insert on an existing connection or transaction
pub(crate) async fn insert_credential(
    conn: &mut SqliteConnection,
    credential: &NewCredential,
) -> Result<Credential> {
    sqlx::query_as::<_, Credential>(
        "INSERT INTO credentials (name, mail, salt, password_hash)
         VALUES (?, ?, ?, ?)
         RETURNING id, name, mail, salt, password_hash",
    )
    .bind(&credential.name)
    .bind(&credential.mail)
    .bind(&credential.salt)
    .bind(&credential.password_hash)
    .fetch_one(conn)
    .await
}
