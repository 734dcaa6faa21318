use super::argon2::Argon2Scheme;
use super::bcrypt::BcryptScheme;
use super::errors::PasswordError;
use super::pbkdf2::Pbkdf2Scheme;
use super::scheme::scheme_tag;
use super::scheme::PasswordScheme;

/// Password hashing with an allow-list of schemes.
///
/// New hashes always use the default scheme. Stored hashes are verified by
/// whichever allow-listed scheme claims the tag between the first two `$` of
/// the hash, so the default can change without rehashing the whole store.
pub struct PasswordHasher {
    default_scheme: Box<dyn PasswordScheme>,
    legacy_schemes: Vec<Box<dyn PasswordScheme>>,
}

impl PasswordHasher {
    /// Create a password hasher with Argon2id as default and PBKDF2 and
    /// bcrypt accepted for verification.
    pub fn new() -> Self {
        Self {
            default_scheme: Box::new(Argon2Scheme::new()),
            legacy_schemes: vec![
                Box::new(Pbkdf2Scheme::new()),
                Box::new(BcryptScheme::new()),
            ],
        }
    }

    /// Create a password hasher that only knows `scheme`.
    pub fn with_default_scheme(scheme: impl PasswordScheme + 'static) -> Self {
        Self {
            default_scheme: Box::new(scheme),
            legacy_schemes: Vec::new(),
        }
    }

    /// Accept hashes produced by `scheme` during verification.
    pub fn accept(mut self, scheme: impl PasswordScheme + 'static) -> Self {
        self.legacy_schemes.push(Box::new(scheme));
        self
    }

    /// Hash a plaintext password with the default scheme.
    ///
    /// # Returns
    /// Modular crypt string (includes scheme tag, parameters, salt, and hash)
    ///
    /// # Errors
    /// * `HashingFailed` - Password hashing operation failed
    pub fn hash(&self, password: &str) -> Result<String, PasswordError> {
        self.default_scheme.hash(password)
    }

    /// Verify a password against a stored hash.
    ///
    /// Returns false for hashes that do not parse or whose scheme is not
    /// allow-listed.
    pub fn verify(&self, password: &str, stored_hash: &str) -> bool {
        let Some(tag) = scheme_tag(stored_hash) else {
            tracing::warn!("Stored password hash has no scheme tag");
            return false;
        };

        match self.scheme_for(tag) {
            Some(scheme) => scheme.verify(password, stored_hash),
            None => {
                tracing::warn!(
                    algorithm = tag,
                    "Stored password hash uses a scheme outside the allow-list"
                );
                false
            }
        }
    }

    /// True when `stored_hash` was not produced by the default scheme.
    pub fn needs_rehash(&self, stored_hash: &str) -> bool {
        let written_by_default = self.default_scheme.identifiers().first().copied();
        scheme_tag(stored_hash) != written_by_default
    }

    fn scheme_for(&self, identifier: &str) -> Option<&dyn PasswordScheme> {
        std::iter::once(&self.default_scheme)
            .chain(self.legacy_schemes.iter())
            .find(|scheme| scheme.supports(identifier))
            .map(|scheme| scheme.as_ref())
    }
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fast_hasher() -> PasswordHasher {
        PasswordHasher::with_default_scheme(Argon2Scheme::with_cost(1024, 1, 1).unwrap())
            .accept(Pbkdf2Scheme::with_rounds(1_000).unwrap())
    }

    #[test]
    fn test_hash_and_verify() {
        let hasher = fast_hasher();
        let password = "my_secure_password";

        // Hash the password
        let hash = hasher.hash(password).expect("Failed to hash password");

        // Verify correct password
        assert!(hasher.verify(password, &hash));

        // Verify incorrect password
        assert!(!hasher.verify("wrong_password", &hash));
    }

    #[test]
    fn test_hashes_of_same_password_differ() {
        let hasher = fast_hasher();

        let first = hasher.hash("s3cret!").unwrap();
        let second = hasher.hash("s3cret!").unwrap();

        assert_ne!(first, second);
        assert!(hasher.verify("s3cret!", &first));
        assert!(hasher.verify("s3cret!", &second));
    }

    #[test]
    fn test_verify_legacy_scheme_hash() {
        let hasher = fast_hasher();
        let legacy = Pbkdf2Scheme::with_rounds(1_000).unwrap();

        let hash = legacy.hash("old_password").unwrap();

        assert!(hasher.verify("old_password", &hash));
        assert!(!hasher.verify("new_password", &hash));
        assert!(hasher.needs_rehash(&hash));
    }

    #[test]
    fn test_verify_rejects_scheme_outside_allow_list() {
        let hasher =
            PasswordHasher::with_default_scheme(Argon2Scheme::with_cost(1024, 1, 1).unwrap());
        let pbkdf2_hash = Pbkdf2Scheme::with_rounds(1_000)
            .unwrap()
            .hash("password")
            .unwrap();

        assert!(!hasher.verify("password", &pbkdf2_hash));
    }

    #[test]
    fn test_default_allow_list_verifies_bcrypt_and_passlib() {
        let hasher = PasswordHasher::new();
        let bcrypt = "$2a$05$CCCCCCCCCCCCCCCCCCCCC.E5YPO9kmyuRGyh0XouQYb4YMJKvyOeW";
        let passlib =
            "$pbkdf2-sha256$29000$FTgiseRcjAuh4/fC/gqbfQ$T2jKACqJG5b5Nq1rn0rHDGkXIF68XU7Ear8jyV9m.u4";

        assert!(hasher.verify("U*U", bcrypt));
        assert!(!hasher.verify("U*V", bcrypt));
        assert!(hasher.verify("s3cret!", passlib));
        assert!(!hasher.verify("s3cret?", passlib));
        assert!(hasher.needs_rehash(bcrypt));
        assert!(hasher.needs_rehash(passlib));
    }

    #[test]
    fn test_bcrypt_outside_allow_list_is_rejected() {
        let bcrypt = BcryptScheme::with_cost(4).unwrap().hash("password").unwrap();

        assert!(!fast_hasher().verify("password", &bcrypt));
    }

    #[test]
    fn test_verify_invalid_hash() {
        let hasher = fast_hasher();

        assert!(!hasher.verify("password", "invalid_hash"));
        assert!(!hasher.verify("password", ""));
        assert!(!hasher.verify("password", "$argon2id$v=19$garbage"));
        assert!(!hasher.verify("password", "$md5$abc$def"));
    }

    #[test]
    fn test_needs_rehash_for_default_scheme() {
        let hasher = fast_hasher();
        let hash = hasher.hash("password").unwrap();

        assert!(!hasher.needs_rehash(&hash));
        assert!(hasher.needs_rehash("not-a-hash"));
    }
}
