use super::errors::PasswordError;
use super::scheme::PasswordScheme;

pub const DEFAULT_BCRYPT_COST: u32 = 12;

/// bcrypt password hashing.
///
/// Writes `$2b$` hashes; also verifies the `$2a$` and `$2y$` variants found in
/// stores written by other bcrypt implementations.
#[derive(Debug, Clone)]
pub struct BcryptScheme {
    cost: u32,
}

impl BcryptScheme {
    pub fn new() -> Self {
        Self {
            cost: DEFAULT_BCRYPT_COST,
        }
    }

    /// # Errors
    /// * `InvalidParameters` - `cost` is outside 4..=31
    pub fn with_cost(cost: u32) -> Result<Self, PasswordError> {
        if !(4..=31).contains(&cost) {
            return Err(PasswordError::InvalidParameters(format!(
                "bcrypt cost must be between 4 and 31, got {}",
                cost
            )));
        }
        Ok(Self { cost })
    }
}

impl Default for BcryptScheme {
    fn default() -> Self {
        Self::new()
    }
}

impl PasswordScheme for BcryptScheme {
    fn identifiers(&self) -> &'static [&'static str] {
        &["2b", "2a", "2y"]
    }

    fn hash(&self, password: &str) -> Result<String, PasswordError> {
        ::bcrypt::hash(password, self.cost)
            .map_err(|e| PasswordError::HashingFailed(e.to_string()))
    }

    fn verify(&self, password: &str, stored_hash: &str) -> bool {
        ::bcrypt::verify(password, stored_hash).unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // OpenWall crypt_blowfish test vector
    const KNOWN_2A: &str = "$2a$05$CCCCCCCCCCCCCCCCCCCCC.E5YPO9kmyuRGyh0XouQYb4YMJKvyOeW";

    #[test]
    fn test_verify_known_vector() {
        let scheme = BcryptScheme::new();

        assert!(scheme.verify("U*U", KNOWN_2A));
        assert!(!scheme.verify("U*V", KNOWN_2A));
    }

    #[test]
    fn test_verify_2y_variant() {
        let hash = KNOWN_2A.replacen("$2a$", "$2y$", 1);

        assert!(BcryptScheme::new().verify("U*U", &hash));
    }

    #[test]
    fn test_hash_and_verify() {
        let scheme = BcryptScheme::with_cost(4).unwrap();

        let hash = scheme.hash("hunter2").expect("Failed to hash password");
        assert!(hash.starts_with("$2b$04$"));
        assert!(scheme.verify("hunter2", &hash));
        assert!(!scheme.verify("hunter3", &hash));
    }

    #[test]
    fn test_verify_malformed_hash() {
        assert!(!BcryptScheme::new().verify("U*U", "$2b$05$short"));
    }

    #[test]
    fn test_with_cost_rejects_out_of_range() {
        assert!(matches!(
            BcryptScheme::with_cost(3),
            Err(PasswordError::InvalidParameters(_))
        ));
        assert!(matches!(
            BcryptScheme::with_cost(32),
            Err(PasswordError::InvalidParameters(_))
        ));
    }
}
