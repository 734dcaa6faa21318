use super::errors::PasswordError;

/// A password hashing scheme that can take part in the allow-list.
///
/// Stored hashes are modular crypt strings (`$<tag>$...`). PHC strings such as
/// `$argon2id$v=19$...` and bcrypt's `$2b$12$...` both qualify, so the scheme
/// that made a stored hash can be recovered from the hash itself.
pub trait PasswordScheme: Send + Sync {
    /// Scheme tags this scheme can verify (e.g. `argon2id`, `2b`).
    ///
    /// The first entry is the tag written by [`hash`](Self::hash).
    fn identifiers(&self) -> &'static [&'static str];

    /// Hash a plaintext password with a fresh random salt.
    fn hash(&self, password: &str) -> Result<String, PasswordError>;

    /// Check a plaintext password against a stored hash carrying one of
    /// [`identifiers`](Self::identifiers). False when the hash does not parse.
    ///
    /// Must run in constant time with respect to the contents of `password`.
    fn verify(&self, password: &str, stored_hash: &str) -> bool;

    fn supports(&self, identifier: &str) -> bool {
        self.identifiers().contains(&identifier)
    }
}

/// Tag between the first two `$` of a stored hash.
pub fn scheme_tag(stored_hash: &str) -> Option<&str> {
    stored_hash
        .strip_prefix('$')?
        .split('$')
        .next()
        .filter(|tag| !tag.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scheme_tag() {
        assert_eq!(scheme_tag("$argon2id$v=19$m=1024,t=1,p=1$c2FsdA$aGFzaA"), Some("argon2id"));
        assert_eq!(scheme_tag("$2b$12$abcdefghijklmnopqrstuv"), Some("2b"));
        assert_eq!(scheme_tag("$pbkdf2-sha256$29000$c2FsdA$aGFzaA"), Some("pbkdf2-sha256"));
        assert_eq!(scheme_tag("plaintext"), None);
        assert_eq!(scheme_tag("$$"), None);
        assert_eq!(scheme_tag(""), None);
    }
}
