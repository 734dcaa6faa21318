use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::PasswordHash;
use argon2::password_hash::PasswordHasher as _;
use argon2::password_hash::PasswordVerifier;
use argon2::password_hash::SaltString;
use argon2::Algorithm;
use argon2::Argon2;
use argon2::Params;
use argon2::Version;

use super::errors::PasswordError;
use super::scheme::PasswordScheme;

/// Argon2 password hashing.
///
/// New hashes use Argon2id v19. Verification reads algorithm variant and
/// cost parameters from the stored hash, so `argon2i` and `argon2d` hashes
/// and hashes made with older cost settings keep verifying.
#[derive(Debug, Clone)]
pub struct Argon2Scheme {
    params: Params,
}

impl Argon2Scheme {
    /// Create a scheme with the crate's recommended cost parameters.
    pub fn new() -> Self {
        Self {
            params: Params::default(),
        }
    }

    /// Create a scheme with explicit cost parameters.
    ///
    /// # Arguments
    /// * `memory_kib` - Memory cost in KiB
    /// * `iterations` - Number of passes
    /// * `parallelism` - Degree of parallelism
    ///
    /// # Errors
    /// * `InvalidParameters` - Parameters are outside Argon2's accepted range
    pub fn with_cost(
        memory_kib: u32,
        iterations: u32,
        parallelism: u32,
    ) -> Result<Self, PasswordError> {
        let params = Params::new(memory_kib, iterations, parallelism, None)
            .map_err(|e| PasswordError::InvalidParameters(e.to_string()))?;
        Ok(Self { params })
    }

    fn context(&self) -> Argon2<'static> {
        Argon2::new(Algorithm::Argon2id, Version::V0x13, self.params.clone())
    }
}

impl Default for Argon2Scheme {
    fn default() -> Self {
        Self::new()
    }
}

impl PasswordScheme for Argon2Scheme {
    fn identifiers(&self) -> &'static [&'static str] {
        &["argon2id", "argon2i", "argon2d"]
    }

    fn hash(&self, password: &str) -> Result<String, PasswordError> {
        let salt = SaltString::generate(&mut OsRng);

        self.context()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| PasswordError::HashingFailed(e.to_string()))
    }

    fn verify(&self, password: &str, stored_hash: &str) -> bool {
        let Ok(hash) = PasswordHash::new(stored_hash) else {
            return false;
        };

        self.context()
            .verify_password(password.as_bytes(), &hash)
            .is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cheap() -> Argon2Scheme {
        Argon2Scheme::with_cost(1024, 1, 1).expect("valid argon2 parameters")
    }

    #[test]
    fn test_hash_and_verify() {
        let scheme = cheap();
        let password = "my_secure_password";

        let hash = scheme.hash(password).expect("Failed to hash password");
        assert!(hash.starts_with("$argon2id$"));

        assert!(scheme.verify(password, &hash));
        assert!(!scheme.verify("wrong_password", &hash));
    }

    #[test]
    fn test_verify_hash_made_with_other_cost() {
        let stronger = Argon2Scheme::with_cost(2048, 2, 1).unwrap();
        let hash = stronger.hash("password").unwrap();

        assert!(cheap().verify("password", &hash));
    }

    #[test]
    fn test_verify_argon2i_hash() {
        let params = Params::new(1024, 1, 1, None).unwrap();
        let argon2i = Argon2::new(Algorithm::Argon2i, Version::V0x13, params);
        let salt = SaltString::generate(&mut OsRng);
        let hash = argon2i
            .hash_password(b"password", &salt)
            .unwrap()
            .to_string();
        assert!(hash.starts_with("$argon2i$"));

        assert!(cheap().verify("password", &hash));
    }

    #[test]
    fn test_verify_unparseable_hash() {
        assert!(!cheap().verify("password", "$argon2id$v=19$garbage"));
    }

    #[test]
    fn test_with_cost_rejects_invalid_parameters() {
        let result = Argon2Scheme::with_cost(1024, 0, 1);
        assert!(matches!(result, Err(PasswordError::InvalidParameters(_))));
    }
}
