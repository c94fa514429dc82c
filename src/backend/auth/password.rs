/**
 * Password Hashing Service
 *
 * Salted bcrypt hashing that never runs on the async executor.
 *
 * # Salts
 *
 * Each credential gets 16 bytes from the OS RNG, stored as unpadded
 * base64. The same (password, salt, cost) always yields the same hash,
 * which is what verification relies on: the stored salt is fed back into
 * bcrypt and the result is compared with the stored hash.
 *
 * # Worker Pool
 *
 * bcrypt is CPU-bound. Jobs are dispatched to tokio's blocking
 * pool and gated by a semaphore, so at most `workers` hashes run at once
 * and in-flight requests keep being served meanwhile.
 *
 * # Timing
 *
 * Hash comparison is constant-time (`subtle`). A login for an unknown name
 * still pays for a full hash and a comparison against a dummy credential,
 * see [`PasswordHasher::verify_unknown`].
 */

use crate::backend::error::BackendError;
use base64::{engine::general_purpose::STANDARD_NO_PAD, Engine};
use std::sync::Arc;
use subtle::ConstantTimeEq;
use tokio::sync::Semaphore;

/// Salt length in bytes, fixed by bcrypt
pub const SALT_LEN: usize = 16;

const DUMMY_PASSWORD: &str = "unknown-identity";

/// Generate a fresh random salt
pub fn generate_salt() -> Result<String, BackendError> {
    let mut bytes = [0u8; SALT_LEN];
    getrandom::fill(&mut bytes)
        .map_err(|e| BackendError::crypto(format!("OS random source unavailable: {e}")))?;
    Ok(STANDARD_NO_PAD.encode(bytes))
}

fn decode_salt(salt: &str) -> Result<[u8; SALT_LEN], BackendError> {
    let bytes = STANDARD_NO_PAD
        .decode(salt)
        .map_err(|e| BackendError::crypto(format!("Malformed salt: {e}")))?;
    bytes
        .try_into()
        .map_err(|_| BackendError::crypto(format!("Salt must decode to {SALT_LEN} bytes")))
}

/// Hash `password` with `salt` at the given bcrypt cost
///
/// Blocking. Call through [`PasswordHasher`] from async code.
pub fn hash(password: &str, salt: &str, cost: u32) -> Result<String, BackendError> {
    let salt = decode_salt(salt)?;
    let parts = bcrypt::hash_with_salt(password, cost, salt)
        .map_err(|e| BackendError::crypto(format!("bcrypt failed: {e}")))?;
    Ok(parts.format_for_version(bcrypt::Version::TwoB))
}

/// Constant-time hash comparison
pub fn hashes_match(computed: &str, stored: &str) -> bool {
    computed.as_bytes().ct_eq(stored.as_bytes()).into()
}

/// Async front-end for hashing on a bounded worker pool
#[derive(Clone, Debug)]
pub struct PasswordHasher {
    cost: u32,
    workers: Arc<Semaphore>,
    dummy_salt: String,
    dummy_hash: String,
}

impl PasswordHasher {
    /// Create a hasher with a bcrypt `cost` and at most `workers` concurrent jobs
    ///
    /// Hashes the dummy credential once, so this blocks for one bcrypt run.
    pub fn new(cost: u32, workers: usize) -> Result<Self, BackendError> {
        let dummy_salt = generate_salt()?;
        let dummy_hash = hash(DUMMY_PASSWORD, &dummy_salt, cost)?;
        Ok(Self {
            cost,
            workers: Arc::new(Semaphore::new(workers.max(1))),
            dummy_salt,
            dummy_hash,
        })
    }

    /// Configured bcrypt cost
    pub fn cost(&self) -> u32 {
        self.cost
    }

    async fn run<T, F>(&self, job: F) -> Result<T, BackendError>
    where
        F: FnOnce() -> Result<T, BackendError> + Send + 'static,
        T: Send + 'static,
    {
        let permit = self
            .workers
            .clone()
            .acquire_owned()
            .await
            .map_err(|_| BackendError::crypto("Hash worker pool closed"))?;

        tokio::task::spawn_blocking(move || {
            let _permit = permit;
            job()
        })
        .await
        .map_err(|e| BackendError::crypto(format!("Hash worker failed: {e}")))?
    }

    /// Hash `password`, generating a salt first when none is given
    ///
    /// Returns `(hash, salt)`.
    pub async fn hash_async(
        &self,
        password: String,
        salt: Option<String>,
    ) -> Result<(String, String), BackendError> {
        let cost = self.cost;
        self.run(move || {
            let salt = match salt {
                Some(salt) => salt,
                None => generate_salt()?,
            };
            let hashed = hash(&password, &salt, cost)?;
            Ok((hashed, salt))
        })
        .await
    }

    /// Check `password` against a stored salt and hash
    pub async fn verify(
        &self,
        password: String,
        salt: String,
        expected: String,
    ) -> Result<bool, BackendError> {
        let (computed, _) = self.hash_async(password, Some(salt)).await?;
        Ok(hashes_match(&computed, &expected))
    }

    /// Same work as [`verify`](Self::verify) for an identity that does not exist
    ///
    /// Always `Ok(false)`, even when `password` happens to match the dummy.
    pub async fn verify_unknown(&self, password: String) -> Result<bool, BackendError> {
        let matched = self
            .verify(password, self.dummy_salt.clone(), self.dummy_hash.clone())
            .await?;
        std::hint::black_box(matched);
        Ok(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    const TEST_COST: u32 = 4;

    #[test]
    fn test_hash_is_deterministic() {
        let salt = generate_salt().unwrap();
        let first = hash("p", &salt, TEST_COST).unwrap();
        let second = hash("p", &salt, TEST_COST).unwrap();
        assert_eq!(first, second);
        assert!(first.starts_with("$2b$04$"));
    }

    #[test]
    fn test_different_salt_gives_different_hash() {
        let a = hash("p", &generate_salt().unwrap(), TEST_COST).unwrap();
        let b = hash("p", &generate_salt().unwrap(), TEST_COST).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_generated_salts_are_unique() {
        let a = generate_salt().unwrap();
        let b = generate_salt().unwrap();
        assert_ne!(a, b);
        assert_eq!(decode_salt(&a).unwrap().len(), SALT_LEN);
    }

    #[test]
    fn test_malformed_salt_is_rejected() {
        assert_matches!(hash("p", "not base64!", TEST_COST), Err(BackendError::CryptoError { .. }));
        assert_matches!(hash("p", "c2hvcnQ", TEST_COST), Err(BackendError::CryptoError { .. }));
    }

    #[test]
    fn test_invalid_cost_is_rejected() {
        let salt = generate_salt().unwrap();
        assert_matches!(hash("p", &salt, 2), Err(BackendError::CryptoError { .. }));
    }

    #[test]
    fn test_hashes_match() {
        assert!(hashes_match("$2b$04$abc", "$2b$04$abc"));
        assert!(!hashes_match("$2b$04$abc", "$2b$04$abd"));
        assert!(!hashes_match("$2b$04$abc", "$2b$04$ab"));
    }

    #[tokio::test]
    async fn test_hash_async_generates_salt_when_missing() {
        let hasher = PasswordHasher::new(TEST_COST, 2).unwrap();
        let (hashed, salt) = hasher.hash_async("p".to_string(), None).await.unwrap();
        assert_eq!(hash("p", &salt, TEST_COST).unwrap(), hashed);
    }

    #[tokio::test]
    async fn test_verify() {
        let hasher = PasswordHasher::new(TEST_COST, 2).unwrap();
        let (hashed, salt) = hasher.hash_async("secret".to_string(), None).await.unwrap();

        assert!(hasher
            .verify("secret".to_string(), salt.clone(), hashed.clone())
            .await
            .unwrap());
        assert!(!hasher
            .verify("wrong".to_string(), salt, hashed)
            .await
            .unwrap());
    }

    #[tokio::test]
    async fn test_verify_unknown_never_succeeds() {
        let hasher = PasswordHasher::new(TEST_COST, 1).unwrap();
        assert!(!hasher.verify_unknown("anything".to_string()).await.unwrap());
        assert!(!hasher.verify_unknown(DUMMY_PASSWORD.to_string()).await.unwrap());
    }

    #[tokio::test]
    async fn test_dummy_credential_is_a_real_hash() {
        let hasher = PasswordHasher::new(TEST_COST, 1).unwrap();
        assert!(hasher.dummy_hash.starts_with("$2b$04$"));
        assert!(hasher
            .verify(
                DUMMY_PASSWORD.to_string(),
                hasher.dummy_salt.clone(),
                hasher.dummy_hash.clone()
            )
            .await
            .unwrap());
    }

    #[test]
    fn test_new_rejects_invalid_cost() {
        assert_matches!(PasswordHasher::new(2, 1), Err(BackendError::CryptoError { .. }));
    }

    #[tokio::test]
    async fn test_single_worker_serves_concurrent_jobs() {
        let hasher = PasswordHasher::new(TEST_COST, 1).unwrap();
        let (a, b) = tokio::join!(
            hasher.hash_async("a".to_string(), None),
            hasher.hash_async("b".to_string(), None),
        );
        assert_ne!(a.unwrap().0, b.unwrap().0);
    }
}
