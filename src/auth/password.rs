//! bcrypt password hashing. Both calls are CPU bound; async callers wrap
//! them in `spawn_blocking`.

pub use bcrypt::BcryptError;
use once_cell::sync::OnceCell;

pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Stand-in hash checked when a login names an unknown email.
static DUMMY_HASH: OnceCell<String> = OnceCell::new();

pub fn hash_password(password: &str, cost: u32) -> Result<String, BcryptError> {
    bcrypt::hash(password, cost)
}

pub fn verify_password(password: &str, hash: &str) -> Result<bool, BcryptError> {
    bcrypt::verify(password, hash)
}

pub async fn hash_password_async(password: String, cost: u32) -> Result<String, BcryptError> {
    tokio::task::spawn_blocking(move || hash_password(&password, cost))
        .await
        .unwrap_or_else(|e| Err(BcryptError::Io(std::io::Error::new(std::io::ErrorKind::Other, e))))
}

pub async fn verify_password_async(password: String, hash: String) -> Result<bool, BcryptError> {
    tokio::task::spawn_blocking(move || verify_password(&password, &hash))
        .await
        .unwrap_or_else(|e| Err(BcryptError::Io(std::io::Error::new(std::io::ErrorKind::Other, e))))
}

/// Spend the same bcrypt work as a real check without a stored hash, so a
/// missed lookup takes as long as a wrong password.
pub async fn verify_dummy_password_async(password: String, cost: u32) -> Result<(), BcryptError> {
    tokio::task::spawn_blocking(move || {
        let hash = DUMMY_HASH.get_or_try_init(|| hash_password("no such account", cost))?;
        verify_password(&password, hash).map(|_| ())
    })
    .await
    .unwrap_or_else(|e| Err(BcryptError::Io(std::io::Error::new(std::io::ErrorKind::Other, e))))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_then_verify() {
        let hash = hash_password("correct horse", 4).unwrap();
        assert!(verify_password("correct horse", &hash).unwrap());
        assert!(!verify_password("wrong horse", &hash).unwrap());
    }

    #[tokio::test]
    async fn async_wrappers_agree() {
        let hash = hash_password_async("battery staple".to_string(), 4).await.unwrap();
        assert!(verify_password_async("battery staple".to_string(), hash).await.unwrap());
    }

    #[tokio::test]
    async fn dummy_verification_runs_bcrypt_at_the_requested_cost() {
        verify_dummy_password_async("anything".to_string(), 4).await.unwrap();
        let hash = DUMMY_HASH.get().expect("dummy hash initialised");
        assert!(hash.starts_with("$2b$04$"));
        verify_dummy_password_async("again".to_string(), 4).await.unwrap();
    }
}
