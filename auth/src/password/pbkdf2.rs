use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::PasswordHash;
use argon2::password_hash::PasswordHasher as _;
use argon2::password_hash::PasswordVerifier;
use argon2::password_hash::SaltString;
use pbkdf2::Algorithm;
use pbkdf2::Params;
use pbkdf2::Pbkdf2;

use super::errors::PasswordError;
use super::scheme::PasswordScheme;

/// PBKDF2-HMAC-SHA256 iteration count (OWASP 2023 recommendation).
pub const DEFAULT_PBKDF2_ROUNDS: u32 = 600_000;

const OUTPUT_LENGTH: usize = 32;

/// PBKDF2 password hashing.
///
/// Kept in the allow-list so stores migrated from PBKDF2-based systems keep
/// working. Writes `pbkdf2-sha256` hashes; verifies `pbkdf2-sha256` and
/// `pbkdf2-sha512`.
#[derive(Debug, Clone)]
pub struct Pbkdf2Scheme {
    rounds: u32,
}

impl Pbkdf2Scheme {
    pub fn new() -> Self {
        Self {
            rounds: DEFAULT_PBKDF2_ROUNDS,
        }
    }

    /// # Errors
    /// * `InvalidParameters` - `rounds` is zero
    pub fn with_rounds(rounds: u32) -> Result<Self, PasswordError> {
        if rounds == 0 {
            return Err(PasswordError::InvalidParameters(
                "pbkdf2 rounds must be positive".to_string(),
            ));
        }
        Ok(Self { rounds })
    }
}

impl Default for Pbkdf2Scheme {
    fn default() -> Self {
        Self::new()
    }
}

impl PasswordScheme for Pbkdf2Scheme {
    fn identifiers(&self) -> &'static [&'static str] {
        &["pbkdf2-sha256", "pbkdf2-sha512"]
    }

    fn hash(&self, password: &str) -> Result<String, PasswordError> {
        let salt = SaltString::generate(&mut OsRng);
        let params = Params {
            rounds: self.rounds,
            output_length: OUTPUT_LENGTH,
        };

        Pbkdf2
            .hash_password_customized(
                password.as_bytes(),
                Some(Algorithm::Pbkdf2Sha256.ident()),
                None,
                params,
                &salt,
            )
            .map(|hash| hash.to_string())
            .map_err(|e| PasswordError::HashingFailed(e.to_string()))
    }

    fn verify(&self, password: &str, stored_hash: &str) -> bool {
        let phc = passlib_to_phc(stored_hash).unwrap_or_else(|| stored_hash.to_string());
        let Ok(hash) = PasswordHash::new(&phc) else {
            return false;
        };

        Pbkdf2.verify_password(password.as_bytes(), &hash).is_ok()
    }
}

/// Rewrite passlib's `$pbkdf2-sha256$<rounds>$<salt>$<checksum>` as a PHC
/// string. passlib encodes salt and checksum in unpadded base64 with `.` in
/// place of `+`. None when `stored_hash` is not in that layout.
fn passlib_to_phc(stored_hash: &str) -> Option<String> {
    let mut fields = stored_hash.strip_prefix('$')?.split('$');
    let ident = fields.next()?;
    let rounds = fields.next()?;
    let salt = fields.next()?;
    let checksum = fields.next()?;
    if fields.next().is_some()
        || rounds.is_empty()
        || !rounds.bytes().all(|b| b.is_ascii_digit())
    {
        return None;
    }

    let output_length = checksum.len() * 6 / 8;
    Some(format!(
        "${ident}$i={rounds},l={output_length}${}${}",
        salt.replace('.', "+"),
        checksum.replace('.', "+"),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let scheme = Pbkdf2Scheme::with_rounds(1_000).unwrap();

        let hash = scheme.hash("hunter2").expect("Failed to hash password");
        assert!(hash.starts_with("$pbkdf2-sha256$"));

        assert!(scheme.verify("hunter2", &hash));
        assert!(!scheme.verify("hunter3", &hash));
    }

    #[test]
    fn test_verify_sha512_hash() {
        let salt = SaltString::generate(&mut OsRng);
        let hash = Pbkdf2
            .hash_password_customized(
                b"hunter2",
                Some(Algorithm::Pbkdf2Sha512.ident()),
                None,
                Params {
                    rounds: 1_000,
                    output_length: 64,
                },
                &salt,
            )
            .unwrap()
            .to_string();

        assert!(Pbkdf2Scheme::new().verify("hunter2", &hash));
    }

    // Salt 153822b1e45c8c0ba1e3f7c2fe0a9b7d, 29000 rounds, password "s3cret!"
    const PASSLIB_SHA256: &str =
        "$pbkdf2-sha256$29000$FTgiseRcjAuh4/fC/gqbfQ$T2jKACqJG5b5Nq1rn0rHDGkXIF68XU7Ear8jyV9m.u4";
    const PASSLIB_SHA512: &str = "$pbkdf2-sha512$29000$FTgiseRcjAuh4/fC/gqbfQ$18W7dy/CWAxmH7uxdJhcuYhmXYuwwG9U3NHy3PHS1Ae0yo5PJFm3H644oaJi/nqqZ4Vp7Ey0Jr7HxIVmyfwU/Q";

    #[test]
    fn test_verify_passlib_hashes() {
        let scheme = Pbkdf2Scheme::new();

        assert!(scheme.verify("s3cret!", PASSLIB_SHA256));
        assert!(!scheme.verify("s3cret?", PASSLIB_SHA256));
        assert!(scheme.verify("s3cret!", PASSLIB_SHA512));
        assert!(!scheme.verify("s3cret?", PASSLIB_SHA512));
    }

    #[test]
    fn test_passlib_to_phc() {
        assert_eq!(
            passlib_to_phc(PASSLIB_SHA256).as_deref(),
            Some("$pbkdf2-sha256$i=29000,l=32$FTgiseRcjAuh4/fC/gqbfQ$T2jKACqJG5b5Nq1rn0rHDGkXIF68XU7Ear8jyV9m+u4")
        );
        assert_eq!(passlib_to_phc("$pbkdf2-sha256$i=1000,l=32$c2FsdA$aGFzaA"), None);
        assert_eq!(passlib_to_phc("$pbkdf2-sha256$29000$c2FsdA"), None);
        assert!(!Pbkdf2Scheme::new().verify("s3cret!", "$pbkdf2-sha256$29000$!!$??"));
    }

    #[test]
    fn test_with_rounds_rejects_zero() {
        assert!(matches!(
            Pbkdf2Scheme::with_rounds(0),
            Err(PasswordError::InvalidParameters(_))
        ));
    }
}
