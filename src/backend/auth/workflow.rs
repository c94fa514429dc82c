/**
 * Authentication Workflow
 *
 * Register, login, logout and session lookup on top of the credential and
 * session stores. Each call is self-contained; nothing is remembered
 * between calls.
 *
 * # Registration
 *
 * There is no "does this name exist?" pre-check. The password is hashed,
 * then the credential and its first session are written in one
 * transaction. The UNIQUE constraints on `name` and `mail` decide who wins
 * when two registrations race, and the loser gets `Conflict`.
 *
 * # Login
 *
 * An unknown identity and a wrong password produce the same error after
 * the same amount of hashing work.
 */

use crate::backend::auth::password::PasswordHasher;
use crate::backend::auth::sessions::{self, SESSION_COOKIE_NAME};
use crate::backend::db::{conflicting_field, CredentialField, Database, NewCredential, Session};
use crate::backend::error::BackendError;

/// Orchestrates the credential and session stores
#[derive(Clone)]
pub struct AuthWorkflow {
    db: Database,
    hasher: PasswordHasher,
}

impl AuthWorkflow {
    pub fn new(db: Database, hasher: PasswordHasher) -> Self {
        Self { db, hasher }
    }

    /// Create a credential and its first (24h) session
    ///
    /// # Errors
    ///
    /// * `Conflict` - name or mail already registered
    pub async fn register(
        &self,
        mail: &str,
        name: &str,
        password: &str,
    ) -> Result<Session, BackendError> {
        let (password_hash, salt) = self.hasher.hash_async(password.to_string(), None).await?;
        let credential = NewCredential {
            name: name.to_string(),
            mail: mail.to_string(),
            salt,
            password_hash,
        };
        let session = sessions::issue(false)?;

        match self.db.insert_credential_with_session(&credential, &session).await {
            Ok(created) => {
                tracing::info!("Registered credential {} ({})", created.name, created.id);
                Ok(session)
            }
            Err(err) => match conflicting_field(&err) {
                Some(CredentialField::Name) => {
                    tracing::warn!("Registration rejected, name taken: {}", name);
                    Err(BackendError::conflict("Name already taken"))
                }
                Some(CredentialField::Mail) => {
                    tracing::warn!("Registration rejected, mail taken: {}", mail);
                    Err(BackendError::conflict("Mail already registered"))
                }
                None => Err(err.into()),
            },
        }
    }

    /// Verify credentials and open a session
    ///
    /// `identity` is matched against name or mail. With `remember` the
    /// session lasts 30 days, otherwise 24 hours.
    ///
    /// # Errors
    ///
    /// * `InvalidCredentials` - unknown identity or wrong password
    pub async fn login(
        &self,
        identity: &str,
        password: &str,
        remember: bool,
    ) -> Result<Session, BackendError> {
        let credential = self.db.find_credential(identity).await?;

        let valid = match &credential {
            Some(credential) => {
                self.hasher
                    .verify(
                        password.to_string(),
                        credential.salt.clone(),
                        credential.password_hash.clone(),
                    )
                    .await?
            }
            None => self.hasher.verify_unknown(password.to_string()).await?,
        };

        if !valid {
            tracing::warn!("Login failed for: {}", identity);
            return Err(BackendError::InvalidCredentials);
        }

        let session = sessions::issue(remember)?;
        self.db.insert_session(&session).await?;

        tracing::info!("Login succeeded for: {} (remember: {})", identity, remember);
        Ok(session)
    }

    /// Revoke the session behind `token`
    ///
    /// A token without a stored row still counts as logged out.
    ///
    /// # Errors
    ///
    /// * `NotFound` - no session cookie was sent
    pub async fn logout(&self, token: Option<&str>) -> Result<(), BackendError> {
        let token = token.ok_or_else(|| {
            tracing::warn!("Logout without session cookie");
            BackendError::not_found("No active session")
        })?;

        if self.db.delete_session(SESSION_COOKIE_NAME, token).await? {
            tracing::info!("Session revoked");
        } else {
            tracing::debug!("Logout for unknown session, nothing to revoke");
        }
        Ok(())
    }

    /// The unexpired session behind `token`
    ///
    /// # Errors
    ///
    /// * `NotFound` - no cookie, unknown token, or expired session
    pub async fn current_session(&self, token: Option<&str>) -> Result<Session, BackendError> {
        let token = token.ok_or_else(|| BackendError::not_found("No active session"))?;

        self.db
            .find_session_token(SESSION_COOKIE_NAME, token)
            .await?
            .filter(Session::is_active)
            .ok_or_else(|| BackendError::not_found("No active session"))
    }
}
